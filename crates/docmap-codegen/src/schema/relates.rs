#[derive(Debug)]
pub(crate) struct Relates {
    /// Target model; `None` keeps fetched data raw
    pub(crate) model: Option<syn::Path>,

    /// True when the field holds a list of targets
    pub(crate) collection: bool,

    /// Resource path template
    pub(crate) resource: Option<syn::LitStr>,
}

mod kw {
    syn::custom_keyword!(model);
    syn::custom_keyword!(collection);
    syn::custom_keyword!(resource);
}

impl Relates {
    pub(super) fn from_ast(attr: &syn::Attribute) -> syn::Result<Relates> {
        match &attr.meta {
            syn::Meta::Path(_) => Ok(Relates {
                model: None,
                collection: false,
                resource: None,
            }),
            _ => attr.parse_args(),
        }
    }
}

impl syn::parse::Parse for Relates {
    fn parse(input: syn::parse::ParseStream) -> syn::Result<Self> {
        let mut result = Relates {
            model: None,
            collection: false,
            resource: None,
        };

        // Allowed syntax, in any order:
        //
        // #[relates(model = Address, collection, resource = "addresses/:id")]
        loop {
            let lookahead = input.lookahead1();

            if lookahead.peek(kw::model) {
                let kw: kw::model = input.parse()?;
                if result.model.is_some() {
                    return Err(syn::Error::new(kw.span, "duplicate `model` argument"));
                }
                let _eq_token: syn::Token![=] = input.parse()?;
                result.model = Some(input.parse()?);
            } else if lookahead.peek(kw::collection) {
                let kw: kw::collection = input.parse()?;
                if result.collection {
                    return Err(syn::Error::new(kw.span, "duplicate `collection` argument"));
                }
                result.collection = true;
            } else if lookahead.peek(kw::resource) {
                let kw: kw::resource = input.parse()?;
                if result.resource.is_some() {
                    return Err(syn::Error::new(kw.span, "duplicate `resource` argument"));
                }
                let _eq_token: syn::Token![=] = input.parse()?;
                result.resource = Some(input.parse()?);
            } else {
                return Err(lookahead.error());
            }

            if input.is_empty() {
                break;
            }
            let _comma_token: syn::Token![,] = input.parse()?;
        }

        Ok(result)
    }
}
