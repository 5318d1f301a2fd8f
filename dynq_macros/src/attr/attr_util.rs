pub fn attr_has_simple_ident(attr: &syn::Attribute, name: &str) -> bool {
    let path = &attr.path;
    if path.leading_colon.is_some() || path.segments.len() != 1 {
        return false;
    }

    match path.segments.last() {
        Some(segment) => segment.ident == name,
        None => false,
    }
}

/// Whether `ty` is spelled `Option<_>` (with or without a path prefix).
pub fn is_option(ty: &syn::Type) -> bool {
    match ty {
        syn::Type::Path(type_path) if type_path.qself.is_none() => {
            match type_path.path.segments.last() {
                Some(segment) => {
                    segment.ident == "Option"
                        && matches!(segment.arguments, syn::PathArguments::AngleBracketed(_))
                }
                None => false,
            }
        }
        _ => false,
    }
}

pub fn named_fields(
    item: &syn::ItemStruct,
) -> syn::Result<&syn::punctuated::Punctuated<syn::Field, syn::token::Comma>> {
    use syn::spanned::Spanned;

    match &item.fields {
        syn::Fields::Named(fields_named) => Ok(&fields_named.named),
        _ => Err(syn::Error::new(
            item.fields.span(),
            "Expected a struct with named fields",
        )),
    }
}
