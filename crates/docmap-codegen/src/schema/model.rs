use super::{ErrorSet, Field};

use syn::ext::IdentExt;

#[derive(Debug)]
pub(crate) struct Model {
    /// Model name
    pub(crate) name: String,

    /// Type identifier
    pub(crate) ident: syn::Ident,

    /// Model fields, in declaration order
    pub(crate) fields: Vec<Field>,

    /// The field holding the model's `Binding`
    pub(crate) binding: syn::Ident,
}

impl Model {
    pub(crate) fn from_ast(ast: &syn::ItemStruct) -> syn::Result<Self> {
        let syn::Fields::Named(node) = &ast.fields else {
            return Err(syn::Error::new_spanned(
                &ast.fields,
                "model fields must be named",
            ));
        };

        if !ast.generics.params.is_empty() {
            return Err(syn::Error::new_spanned(
                &ast.generics,
                "model generics are not supported",
            ));
        }

        let mut errs = ErrorSet::new();
        let mut fields = vec![];

        for node in &node.named {
            match Field::from_ast(node) {
                Ok(field) => fields.push(field),
                Err(err) => errs.push(err),
            }
        }

        if let Some(err) = errs.collect() {
            return Err(err);
        }

        let mut bindings = fields.iter().filter(|field| field.binding);

        let binding = match (bindings.next(), bindings.next()) {
            (Some(binding), None) => binding.ident.clone(),
            (None, _) => {
                return Err(syn::Error::new_spanned(
                    &ast.ident,
                    "model must have a field of type `Binding`",
                ))
            }
            (Some(_), Some(second)) => {
                return Err(syn::Error::new_spanned(
                    &second.ident,
                    "model has more than one field of type `Binding`",
                ))
            }
        };

        let mut errs = ErrorSet::new();

        for field in &fields {
            let Some(extract) = &field.attrs.extract else {
                continue;
            };

            for (_, target) in &extract.columns {
                let declared = fields
                    .iter()
                    .any(|other| other.is_declared() && other.name == target.unraw().to_string());

                if !declared {
                    errs.push(syn::Error::new_spanned(
                        target,
                        format!("extract target `{target}` is not a declared field of the model"),
                    ));
                }
            }
        }

        if let Some(err) = errs.collect() {
            return Err(err);
        }

        Ok(Model {
            name: ast.ident.unraw().to_string(),
            ident: ast.ident.clone(),
            fields,
            binding,
        })
    }

    /// Fields listed in `Reflect::FIELDS`.
    pub(crate) fn declared_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|field| field.is_declared())
    }
}
