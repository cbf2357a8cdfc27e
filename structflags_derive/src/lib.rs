use proc_macro::TokenStream as TokenStream1;
use proc_macro2::TokenStream;
use quote::quote;
use syn::{parse_macro_input, DeriveInput};
use syn::{Data, DataStruct, Error, Fields};

mod proc_macro_options;
use proc_macro_options::GenFlagsStruct;

pub(crate) mod util;

/// Derive a `Flags` implementation (and a matching `Field` implementation) for a struct with
/// `#[tag(...)]` attributes on its fields
#[proc_macro_derive(Flags, attributes(tag))]
pub fn flags(input: TokenStream1) -> TokenStream1 {
    let input: DeriveInput = parse_macro_input!(input);
    derive_flags(&input)
        .unwrap_or_else(|error| error.to_compile_error())
        .into()
}

fn derive_flags(input: &DeriveInput) -> Result<TokenStream, syn::Error> {
    let ident = &input.ident;

    match &input.data {
        Data::Struct(DataStruct {
            fields: Fields::Named(fields),
            ..
        }) => {
            let gen = GenFlagsStruct::new(ident, &input.attrs, fields)?;
            let flags_impl = gen.gen_flags_impl(&input.generics)?;
            let field_impl = gen.gen_field_impl(&input.generics)?;

            Ok(quote! {
                #flags_impl

                #field_impl
            })
        }

        _ => Err(Error::new(
            ident.span(),
            "#[derive(Flags)] is only supported on structs with named fields",
        )),
    }
}
