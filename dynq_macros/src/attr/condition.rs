use syn::parse::ParseStream;

/// `#[condition(goe = "age")]`
pub struct ConditionAttr {
    pub kind: Kind,
    pub path: syn::LitStr,
}

pub enum Kind {
    Eq,
    Goe,
    Loe,
    Gt,
    Lt,
}

impl Kind {
    /// The `ConditionBuilder` method implementing this kind.
    pub fn method(&self) -> &'static str {
        match self {
            Kind::Eq => "eq",
            Kind::Goe => "goe",
            Kind::Loe => "loe",
            Kind::Gt => "gt",
            Kind::Lt => "lt",
        }
    }
}

impl syn::parse::Parse for ConditionAttr {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let content;
        let _paren_token = syn::parenthesized!(content in input);

        let ident: syn::Ident = content.parse()?;
        let kind = match ident.to_string().as_str() {
            "eq" => Kind::Eq,
            "goe" => Kind::Goe,
            "loe" => Kind::Loe,
            "gt" => Kind::Gt,
            "lt" => Kind::Lt,
            _ => {
                return Err(syn::Error::new(
                    ident.span(),
                    "Expected one of `eq`, `goe`, `loe`, `gt`, `lt`",
                ))
            }
        };

        let _: syn::token::Eq = content.parse()?;
        let path: syn::LitStr = content.parse()?;

        if path.value().is_empty() {
            return Err(syn::Error::new(path.span(), "Field path must not be empty"));
        }

        if !content.is_empty() {
            return Err(content.error("Unexpected tokens after field path"));
        }

        Ok(Self { kind, path })
    }
}
