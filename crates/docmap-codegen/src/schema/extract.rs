use syn::ext::IdentExt;

#[derive(Debug)]
pub(crate) struct Extract {
    /// Sub-document key and the name of the field receiving it, in order
    pub(crate) columns: Vec<(syn::LitStr, syn::Ident)>,
}

impl Extract {
    pub(super) fn from_ast(attr: &syn::Attribute) -> syn::Result<Extract> {
        attr.parse_args()
    }
}

impl syn::parse::Parse for Extract {
    fn parse(input: syn::parse::ParseStream) -> syn::Result<Self> {
        let mut columns: Vec<(syn::LitStr, syn::Ident)> = vec![];

        // Allowed syntax:
        //
        // #[extract(street = "street", city = "town")]
        // #[extract("zip-code" = "zip")]
        while !input.is_empty() {
            let key = if input.peek(syn::LitStr) {
                input.parse::<syn::LitStr>()?
            } else if input.peek(syn::Ident::peek_any) {
                let ident = input.call(syn::Ident::parse_any)?;
                syn::LitStr::new(&ident.unraw().to_string(), ident.span())
            } else {
                return Err(input.error("expected `key = \"field\"`"));
            };

            if columns.iter().any(|(existing, _)| existing.value() == key.value()) {
                return Err(syn::Error::new(key.span(), "duplicate extract key"));
            }

            let _eq_token: syn::Token![=] = input.parse()?;
            let target: syn::LitStr = input.parse()?;
            let target = target.parse::<syn::Ident>().map_err(|_| {
                syn::Error::new(target.span(), "extract target must name a field")
            })?;

            columns.push((key, target));

            if input.is_empty() {
                break;
            }
            let _comma_token: syn::Token![,] = input.parse()?;
        }

        Ok(Extract { columns })
    }
}
