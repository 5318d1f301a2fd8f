use quote::{format_ident, quote};
use syn::parse::ParseStream;
use syn::spanned::Spanned;

use crate::attr::attr_util;
use crate::attr::condition::ConditionAttr;

pub struct ConditionStruct {
    pub item: syn::ItemStruct,
    pub criteria: Vec<syn::Result<Criterion>>,
}

/// One annotated field: a single optional criterion.
pub struct Criterion {
    field_ident: syn::Ident,
    attr: ConditionAttr,
}

impl syn::parse::Parse for ConditionStruct {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let item: syn::ItemStruct = input.parse()?;

        let mut criteria = vec![];
        for field in attr_util::named_fields(&item)? {
            for attr in &field.attrs {
                if attr_util::attr_has_simple_ident(attr, "condition") {
                    criteria.push(Criterion::try_from_field(field, attr));
                }
            }
        }

        Ok(Self { item, criteria })
    }
}

impl Criterion {
    fn try_from_field(field: &syn::Field, attr: &syn::Attribute) -> syn::Result<Self> {
        let field_ident = field
            .ident
            .clone()
            .ok_or_else(|| syn::Error::new(field.span(), "Expected a named field"))?;

        if !attr_util::is_option(&field.ty) {
            return Err(syn::Error::new(
                field.ty.span(),
                "Expected an Option<_> field: absent criteria must be expressible",
            ));
        }

        let attr: ConditionAttr = syn::parse2(attr.tokens.clone())?;

        Ok(Self { field_ident, attr })
    }
}

pub fn gen_condition(condition_struct: ConditionStruct) -> proc_macro2::TokenStream {
    let ident = &condition_struct.item.ident;
    let (impl_generics, ty_generics, where_clause) =
        condition_struct.item.generics.split_for_impl();

    let mut calls = vec![];
    let mut errors = vec![];

    for result in &condition_struct.criteria {
        match result {
            Ok(criterion) => {
                let method = format_ident!("{}", criterion.attr.kind.method());
                let field_ident = &criterion.field_ident;
                let path = &criterion.attr.path;

                calls.push(quote! {
                    .#method(#path, ::std::clone::Clone::clone(&self.#field_ident))
                });
            }
            Err(err) => errors.push(err.to_compile_error()),
        }
    }

    quote! {
        impl #impl_generics ::dynq::Condition for #ident #ty_generics #where_clause {
            fn to_predicate(&self) -> ::dynq::Predicate {
                ::dynq::ConditionBuilder::new()
                    #(#calls)*
                    .build()
            }
        }

        #(#errors)*
    }
}
