#![forbid(unsafe_code)]

extern crate proc_macro;

mod derive_condition;
mod derive_record;

mod attr {
    pub mod attr_util;
    pub mod condition;
    pub mod record;
}

use proc_macro::TokenStream;

/// Implement `dynq::Condition` for a struct of optional search criteria.
///
/// Each field carrying `#[condition(<kind> = "<field path>")]` contributes
/// one predicate when it is `Some`, where `<kind>` is one of
/// `eq`, `goe`, `loe`, `gt` or `lt`. Unannotated fields are ignored.
#[proc_macro_derive(Condition, attributes(condition))]
pub fn derive_condition(input: TokenStream) -> TokenStream {
    let condition_struct =
        syn::parse_macro_input!(input as derive_condition::ConditionStruct);

    TokenStream::from(derive_condition::gen_condition(condition_struct))
}

/// Implement `dynq::Record` for a struct with named fields.
///
/// Fields are addressed by their name, or by `#[record(rename = "...")]`.
/// `#[record(skip)]` hides a field.
#[proc_macro_derive(Record, attributes(record))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let record_struct = syn::parse_macro_input!(input as derive_record::RecordStruct);

    TokenStream::from(derive_record::gen_record(record_struct))
}
