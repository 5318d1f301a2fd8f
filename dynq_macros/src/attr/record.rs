use syn::parse::ParseStream;

/// `#[record(rename = "team.name")]` or `#[record(skip)]`
pub enum RecordAttr {
    Rename(syn::LitStr),
    Skip,
}

impl syn::parse::Parse for RecordAttr {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let content;
        let _paren_token = syn::parenthesized!(content in input);

        let ident: syn::Ident = content.parse()?;
        let attr = if ident == "rename" {
            let _: syn::token::Eq = content.parse()?;
            Self::Rename(content.parse()?)
        } else if ident == "skip" {
            Self::Skip
        } else {
            return Err(syn::Error::new(
                ident.span(),
                "Expected `rename = \"...\"` or `skip`",
            ));
        };

        if !content.is_empty() {
            return Err(content.error("Unexpected tokens"));
        }

        Ok(attr)
    }
}
