//! GenFlagsStruct helps with parsing syn data for a struct with `#[derive(Flags)]`, and generating
//! the `Flags` and `Field` trait implementations.
//!
//! This module also provides StructItem, FieldItem helper structures which:
//! * Parse the `#[tag(...)]` attributes that appear on fields (and reject them elsewhere)
//! * Store the results and make them easily available
//! * Assist with subsequent codegen

use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::{Attribute, Error, FieldsNamed, Generics, Ident, Lifetime};

mod field_item;
use field_item::FieldItem;

mod struct_item;
use struct_item::StructItem;

/// Helper which generates individual functions related to `#[derive(Flags)]`
/// on a struct.
///
/// Calling "new" parses all the proc macro attributes for struct and fields.
/// Calling individual functions returns code gen.
pub struct GenFlagsStruct {
    struct_item: StructItem,
    fields: Vec<FieldItem>,
}

impl GenFlagsStruct {
    /// Parse syn data for a struct with derive(Flags) on it
    pub fn new(ident: &Ident, attrs: &[Attribute], fields: &FieldsNamed) -> Result<Self, Error> {
        let struct_item = StructItem::new(ident, attrs)?;
        let fields = fields
            .named
            .iter()
            .map(FieldItem::new)
            .collect::<Result<Vec<_>, Error>>()?;
        Ok(Self {
            struct_item,
            fields,
        })
    }

    /// Generate an impl Flags block for this struct
    ///
    /// Takes generics associated to the struct.
    pub fn gen_flags_impl(&self, generics: &Generics) -> Result<TokenStream, Error> {
        let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

        let ident = self.struct_item.get_ident();
        let flags_fns = [self.walk_impl(), self.struct_name_impl()];

        Ok(quote! {
            #[automatically_derived]
            #[allow(
                unused_qualifications,
            )]
            impl #impl_generics ::structflags::Flags for #ident #ty_generics #where_clause {
                #(#flags_fns)*
            }
        })
    }

    /// Generate an impl Field block for this struct, so that it can be nested inside of other
    /// structs (and passed to the root of a walk)
    ///
    /// An absent `Option` of the struct is filled with `Default::default()` if the struct has it.
    pub fn gen_field_impl(&self, generics: &Generics) -> Result<TokenStream, Error> {
        let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
        let ident = self.struct_item.get_ident();

        Ok(quote! {
            #[automatically_derived]
            impl #impl_generics ::structflags::Field for #ident #ty_generics #where_clause {
                fn bind(&mut self) -> ::structflags::Bound<'_> {
                    ::structflags::Bound::Struct(self)
                }

                fn absent() -> ::core::option::Option<Self> {
                    #[allow(unused_imports)]
                    use ::structflags::__private::{AbsentDefault as _, AbsentNone as _};
                    (&::structflags::__private::Absent::<Self>::new()).__absent()
                }
            }
        })
    }

    /// Generate Flags::struct_name implementation
    fn struct_name_impl(&self) -> TokenStream {
        let struct_name = self.struct_item.get_ident().to_string();

        quote! {
            fn struct_name(&self) -> &'static str {
                #struct_name
            }
        }
    }

    /// Generate Flags::walk implementation
    ///
    /// Every field is reported to the walker in declaration order. Walked fields are borrowed
    /// disjointly by destructuring `self`, so that each of them can be handed out for the whole
    /// lifetime of the walk.
    fn walk_impl(&self) -> TokenStream {
        let walker_ident = Ident::new("__walker__", Span::call_site());
        let lifetime = Lifetime::new("'__walk", Span::call_site());

        let walked_names: Vec<&Ident> = self
            .fields
            .iter()
            .filter(|field| field.is_walked())
            .map(|field| field.get_field_name())
            .collect();

        let field_walks: Vec<TokenStream> = self
            .fields
            .iter()
            .map(|field| field.gen_walk(&walker_ident))
            .collect();

        quote! {
            fn walk<#lifetime>(
                &#lifetime mut self,
                #walker_ident: &mut ::structflags::Walker<#lifetime>,
            ) -> ::core::result::Result<(), ::structflags::Error> {
                let Self { #(#walked_names,)* .. } = self;

                #(#field_walks)*

                ::core::result::Result::Ok(())
            }
        }
    }
}
