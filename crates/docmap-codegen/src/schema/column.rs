#[derive(Debug)]
pub(crate) struct Column {
    /// Storage name override
    pub(crate) name: Option<syn::LitStr>,
}

impl Column {
    /// Parses `#[column]` or `#[column("storage_name")]`.
    pub(super) fn from_ast(attr: &syn::Attribute) -> syn::Result<Column> {
        match &attr.meta {
            syn::Meta::Path(_) => Ok(Column { name: None }),
            syn::Meta::List(_) => attr.parse_args(),
            syn::Meta::NameValue(_) => Err(syn::Error::new_spanned(
                attr,
                "expected `#[column]` or `#[column(\"name\")]`",
            )),
        }
    }
}

impl syn::parse::Parse for Column {
    fn parse(input: syn::parse::ParseStream) -> syn::Result<Self> {
        let name: syn::LitStr = input.parse()?;

        if name.value().is_empty() {
            return Err(syn::Error::new(name.span(), "column name cannot be empty"));
        }

        if !input.is_empty() {
            return Err(input.error("unexpected tokens after column name"));
        }

        Ok(Column { name: Some(name) })
    }
}
