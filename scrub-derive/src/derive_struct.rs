//! Struct-specific `Walk` derivation.
//!
//! Named fields are walked under their own names in declaration order. Tuple
//! fields have no name and inherit the one the struct was reached through,
//! which makes newtypes like `struct Password(pub String)` transparent.

use proc_macro2::{Ident, TokenStream};
use quote::quote;
use syn::{spanned::Spanned, DataStruct, Fields, Index, Result};

use crate::{
    crate_path,
    strategy::parse_struct_field_strategy,
    transform::{field_name, generate_field_walk, DeriveContext, FieldName},
};

pub(crate) struct StructDeriveOutput {
    pub(crate) walk_body: TokenStream,
    pub(crate) used_generics: Vec<Ident>,
}

pub(crate) fn derive_struct(data: DataStruct, generics: &syn::Generics) -> Result<StructDeriveOutput> {
    let walk_path = crate_path("Walk");
    let mut used_generics = Vec::new();
    let mut ctx = DeriveContext {
        generics,
        walk_path: &walk_path,
        used_generics: &mut used_generics,
    };

    let mut calls = Vec::new();
    match data.fields {
        Fields::Named(fields) => {
            for field in fields.named {
                let span = field.span();
                let strategy = parse_struct_field_strategy(&field.vis, &field.attrs)?;
                let ident = field.ident.expect("named field should have an identifier");
                let access = quote! { &mut self.#ident };
                let name = FieldName::Own(field_name(&ident));
                calls.extend(generate_field_walk(
                    &mut ctx, &field.ty, &access, name, span, &strategy,
                ));
            }
        }
        Fields::Unnamed(fields) => {
            for (index, field) in fields.unnamed.into_iter().enumerate() {
                let span = field.span();
                let strategy = parse_struct_field_strategy(&field.vis, &field.attrs)?;
                let index = Index::from(index);
                let access = quote! { &mut self.#index };
                calls.extend(generate_field_walk(
                    &mut ctx,
                    &field.ty,
                    &access,
                    FieldName::Inherited,
                    span,
                    &strategy,
                ));
            }
        }
        Fields::Unit => {}
    }

    Ok(StructDeriveOutput {
        walk_body: quote! { #(#calls)* },
        used_generics,
    })
}
