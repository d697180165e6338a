use super::{Column, ErrorSet, Extract, Relates};

use syn::ext::IdentExt;

#[derive(Debug)]
pub(crate) struct Field {
    /// Field identifier
    pub(crate) ident: syn::Ident,

    /// Declared field name, without any raw identifier prefix
    pub(crate) name: String,

    /// Field attributes
    pub(crate) attrs: FieldAttr,

    /// True if the field holds the model's `Binding`
    pub(crate) binding: bool,
}

#[derive(Debug, Default)]
pub(crate) struct FieldAttr {
    /// `#[key]`
    pub(crate) key: Option<syn::Attribute>,

    /// `#[column]` / `#[column("name")]`
    pub(crate) column: Option<Column>,

    /// `#[extract(sub_key = "field", ...)]`
    pub(crate) extract: Option<Extract>,

    /// `#[relates(...)]`
    pub(crate) relates: Option<Relates>,

    /// `#[skip]`
    pub(crate) skip: Option<syn::Attribute>,
}

impl Field {
    pub(super) fn from_ast(field: &syn::Field) -> syn::Result<Field> {
        let Some(ident) = &field.ident else {
            return Err(syn::Error::new_spanned(field, "model fields must be named"));
        };

        let mut errs = ErrorSet::new();
        let mut attrs = FieldAttr::default();

        for attr in &field.attrs {
            if attr.path().is_ident("key") {
                if attrs.key.is_some() {
                    errs.push(syn::Error::new_spanned(attr, "duplicate #[key] attribute"));
                } else if let Err(err) = attr.meta.require_path_only() {
                    errs.push(err);
                } else {
                    attrs.key = Some(attr.clone());
                }
            } else if attr.path().is_ident("column") {
                if attrs.column.is_some() {
                    errs.push(syn::Error::new_spanned(
                        attr,
                        "duplicate #[column] attribute",
                    ));
                } else {
                    match Column::from_ast(attr) {
                        Ok(column) => attrs.column = Some(column),
                        Err(err) => errs.push(err),
                    }
                }
            } else if attr.path().is_ident("extract") {
                if attrs.extract.is_some() {
                    errs.push(syn::Error::new_spanned(
                        attr,
                        "duplicate #[extract] attribute",
                    ));
                } else {
                    match Extract::from_ast(attr) {
                        Ok(extract) => attrs.extract = Some(extract),
                        Err(err) => errs.push(err),
                    }
                }
            } else if attr.path().is_ident("relates") {
                if attrs.relates.is_some() {
                    errs.push(syn::Error::new_spanned(
                        attr,
                        "duplicate #[relates] attribute",
                    ));
                } else {
                    match Relates::from_ast(attr) {
                        Ok(relates) => attrs.relates = Some(relates),
                        Err(err) => errs.push(err),
                    }
                }
            } else if attr.path().is_ident("skip") {
                if attrs.skip.is_some() {
                    errs.push(syn::Error::new_spanned(attr, "duplicate #[skip] attribute"));
                } else {
                    attrs.skip = Some(attr.clone());
                }
            }
        }

        let binding = is_binding(&field.ty);

        if attrs.skip.is_some() || binding {
            if attrs.is_mapped() {
                let what = if binding { "the binding field" } else { "a #[skip] field" };
                errs.push(syn::Error::new_spanned(
                    ident,
                    format!("{what} cannot carry mapping attributes"),
                ));
            }
        } else if attrs.column.is_none() {
            if attrs.key.is_some() {
                errs.push(syn::Error::new_spanned(
                    ident,
                    "#[key] fields must also be annotated with #[column]",
                ));
            }

            if attrs.extract.is_some() || attrs.relates.is_some() {
                errs.push(syn::Error::new_spanned(
                    ident,
                    "#[extract] and #[relates] fields must also be annotated with #[column]",
                ));
            }
        }

        if attrs.extract.is_some() && attrs.relates.is_some() {
            errs.push(syn::Error::new_spanned(
                ident,
                "field cannot be both #[extract] and #[relates]",
            ));
        }

        if let Some(extract) = &attrs.extract {
            if extract.columns.is_empty() {
                errs.push(syn::Error::new_spanned(
                    ident,
                    "no columns defined for #[extract]",
                ));
            }
        }

        if let Some(err) = errs.collect() {
            return Err(err);
        }

        Ok(Field {
            ident: ident.clone(),
            name: ident.unraw().to_string(),
            attrs,
            binding,
        })
    }

    /// True if the field is listed among the model's declared fields.
    pub(crate) fn is_declared(&self) -> bool {
        !self.binding && self.attrs.skip.is_none()
    }

    /// True if the field has storage of its own the engine reads and writes.
    pub(crate) fn has_slot(&self) -> bool {
        self.is_declared() && self.attrs.extract.is_none()
    }
}

impl FieldAttr {
    fn is_mapped(&self) -> bool {
        self.key.is_some()
            || self.column.is_some()
            || self.extract.is_some()
            || self.relates.is_some()
    }
}

fn is_binding(ty: &syn::Type) -> bool {
    let syn::Type::Path(path) = ty else {
        return false;
    };

    path.qself.is_none()
        && path
            .path
            .segments
            .last()
            .is_some_and(|segment| segment.ident == "Binding" && segment.arguments.is_none())
}
