use super::Expand;

use proc_macro2::TokenStream;
use quote::quote;

impl Expand<'_> {
    pub(super) fn expand_entity_impl(&self) -> TokenStream {
        let docmap = &self.docmap;
        let model_ident = &self.model.ident;
        let binding = &self.model.binding;

        let slot_fields: Vec<_> = self
            .model
            .fields
            .iter()
            .filter(|field| field.has_slot())
            .collect();

        let slot_names = slot_fields.iter().map(|field| &field.name);
        let slot_idents = slot_fields.iter().map(|field| &field.ident);
        let slot_mut_names = slot_names.clone();
        let slot_mut_idents = slot_idents.clone();

        quote! {
            impl #docmap::Entity for #model_ident {
                fn model_type(&self) -> #docmap::ModelType {
                    #docmap::ModelType::of::<Self>()
                }

                fn slot(&self, field: &str) -> #docmap::Option<&dyn #docmap::Slot> {
                    match field {
                        #( #slot_names => #docmap::Some(&self.#slot_idents as &dyn #docmap::Slot), )*
                        _ => #docmap::None,
                    }
                }

                fn slot_mut(&mut self, field: &str) -> #docmap::Option<&mut dyn #docmap::Slot> {
                    match field {
                        #( #slot_mut_names => #docmap::Some(&mut self.#slot_mut_idents as &mut dyn #docmap::Slot), )*
                        _ => #docmap::None,
                    }
                }

                fn binding(&self) -> &#docmap::Binding {
                    &self.#binding
                }

                fn binding_mut(&mut self) -> &mut #docmap::Binding {
                    &mut self.#binding
                }

                fn as_any(&self) -> &dyn #docmap::Any {
                    self
                }

                fn as_any_mut(&mut self) -> &mut dyn #docmap::Any {
                    self
                }
            }
        }
    }

    pub(super) fn expand_model_impl(&self) -> TokenStream {
        let docmap = &self.docmap;
        let model_ident = &self.model.ident;

        quote! {
            impl #docmap::Model for #model_ident {}
        }
    }
}
