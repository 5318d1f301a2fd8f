use quote::quote;
use syn::parse::ParseStream;
use syn::spanned::Spanned;

use crate::attr::attr_util;
use crate::attr::record::RecordAttr;

pub struct RecordStruct {
    pub item: syn::ItemStruct,
    pub fields: Vec<syn::Result<RecordField>>,
}

pub struct RecordField {
    ident: syn::Ident,
    name: syn::LitStr,
}

impl syn::parse::Parse for RecordStruct {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let item: syn::ItemStruct = input.parse()?;

        let fields = attr_util::named_fields(&item)?
            .iter()
            .filter_map(|field| RecordField::from_field(field).transpose())
            .collect();

        Ok(Self { item, fields })
    }
}

impl RecordField {
    /// `Ok(None)` for skipped fields.
    fn from_field(field: &syn::Field) -> syn::Result<Option<Self>> {
        let ident = field
            .ident
            .clone()
            .ok_or_else(|| syn::Error::new(field.span(), "Expected a named field"))?;

        let mut name = syn::LitStr::new(&ident.to_string(), ident.span());

        for attr in &field.attrs {
            if !attr_util::attr_has_simple_ident(attr, "record") {
                continue;
            }

            match syn::parse2::<RecordAttr>(attr.tokens.clone())? {
                RecordAttr::Skip => return Ok(None),
                RecordAttr::Rename(rename) => name = rename,
            }
        }

        Ok(Some(Self { ident, name }))
    }
}

pub fn gen_record(record_struct: RecordStruct) -> proc_macro2::TokenStream {
    let ident = &record_struct.item.ident;
    let (impl_generics, ty_generics, where_clause) = record_struct.item.generics.split_for_impl();

    let mut names = vec![];
    let mut idents = vec![];
    let mut errors = vec![];

    for result in &record_struct.fields {
        match result {
            Ok(field) => {
                names.push(&field.name);
                idents.push(&field.ident);
            }
            Err(err) => errors.push(err.to_compile_error()),
        }
    }

    quote! {
        impl #impl_generics ::dynq::Record for #ident #ty_generics #where_clause {
            fn get(&self, field: &str) -> ::dynq::Value {
                match field {
                    #(
                        #names => ::dynq::Value::from(::std::clone::Clone::clone(&self.#idents)),
                    )*
                    _ => ::dynq::Value::Null,
                }
            }

            fn set(&mut self, field: &str, value: ::dynq::Value) -> ::dynq::DynqResult<()> {
                match field {
                    #(
                        #names => {
                            self.#idents = ::dynq::FromValue::from_value(value)?;
                            ::std::result::Result::Ok(())
                        }
                    )*
                    _ => {
                        let _ = value;
                        ::std::result::Result::Err(::dynq::DynqError::InvalidSpec(
                            ::std::format!("unknown field `{}`", field),
                        ))
                    }
                }
            }
        }

        #(#errors)*
    }
}
