mod entity;
mod reflect;

use crate::schema::Model;

use proc_macro2::TokenStream;
use quote::quote;

struct Expand<'a> {
    /// The model being expanded
    model: &'a Model,

    /// Path prefix for docmap types
    docmap: TokenStream,
}

impl Expand<'_> {
    fn expand(&self) -> TokenStream {
        let reflect_impl = self.expand_reflect_impl();
        let entity_impl = self.expand_entity_impl();
        let model_impl = self.expand_model_impl();

        wrap_in_const(quote! {
            #reflect_impl
            #entity_impl
            #model_impl
        })
    }
}

pub(super) fn model(model: &Model) -> TokenStream {
    Expand {
        model,
        docmap: quote!(_docmap::codegen_support),
    }
    .expand()
}

fn wrap_in_const(code: TokenStream) -> TokenStream {
    quote! {
        const _: () = {
            use docmap as _docmap;
            #code
        };
    }
}
