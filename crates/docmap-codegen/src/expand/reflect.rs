use super::Expand;
use crate::schema::Field;

use proc_macro2::TokenStream;
use quote::quote;

impl Expand<'_> {
    pub(super) fn expand_reflect_impl(&self) -> TokenStream {
        let docmap = &self.docmap;
        let model_ident = &self.model.ident;
        let model_name = &self.model.name;

        let field_names = self.model.declared_fields().map(|field| &field.name);

        let attribute_arms = self.model.declared_fields().filter_map(|field| {
            let directives = self.expand_directives(field);

            if directives.is_empty() {
                return None;
            }

            let name = &field.name;
            Some(quote! {
                #name => #docmap::Vec::from([ #( #directives ),* ]),
            })
        });

        quote! {
            impl #docmap::Reflect for #model_ident {
                const NAME: &'static str = #model_name;
                const FIELDS: &'static [&'static str] = &[ #( #field_names ),* ];

                fn attributes(field: &str) -> #docmap::Vec<#docmap::Directive> {
                    match field {
                        #( #attribute_arms )*
                        _ => #docmap::Vec::new(),
                    }
                }
            }
        }
    }

    fn expand_directives(&self, field: &Field) -> Vec<TokenStream> {
        let docmap = &self.docmap;
        let mut directives = vec![];

        if field.attrs.key.is_some() {
            directives.push(quote!(#docmap::Directive::Key));
        }

        if let Some(column) = &field.attrs.column {
            directives.push(match &column.name {
                Some(name) => quote!(#docmap::Directive::column_named(#name)),
                None => quote!(#docmap::Directive::column()),
            });
        }

        if let Some(extract) = &field.attrs.extract {
            let columns = extract.columns.iter().map(|(key, target)| {
                let target = target.to_string();
                quote!((#key, #target))
            });

            directives.push(quote! {
                #docmap::Directive::extract([ #( #columns ),* ])
            });
        }

        if let Some(relates) = &field.attrs.relates {
            let resource = relates
                .resource
                .as_ref()
                .map(|resource| resource.value())
                .unwrap_or_default();

            let model = relates
                .model
                .as_ref()
                .map(|model| quote!(.model::<#model>()));

            let collection = relates.collection.then(|| quote!(.collection()));

            directives.push(quote! {
                #docmap::Directive::relates(
                    #docmap::Relates::new(#resource) #model #collection
                )
            });
        }

        directives
    }
}
