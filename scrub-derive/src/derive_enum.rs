//! Enum-specific `Walk` derivation.
//!
//! This module generates one match arm per variant. Only the fields that are
//! walked get a binding; the rest are matched with `_` / `..`. Bindings carry
//! a `__walk_` prefix so field names never shadow the method parameters.

use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote};
use syn::{spanned::Spanned, DataEnum, Fields, Result};

use crate::{
    crate_path,
    strategy::parse_variant_field_strategy,
    transform::{field_name, generate_field_walk, DeriveContext, FieldName},
};

pub(crate) struct EnumDeriveOutput {
    pub(crate) walk_body: TokenStream,
    pub(crate) used_generics: Vec<Ident>,
}

pub(crate) fn derive_enum(data: DataEnum, generics: &syn::Generics) -> Result<EnumDeriveOutput> {
    let walk_path = crate_path("Walk");
    let mut used_generics = Vec::new();
    let mut arms = Vec::new();

    for variant in data.variants {
        let variant_ident = &variant.ident;
        let mut ctx = DeriveContext {
            generics,
            walk_path: &walk_path,
            used_generics: &mut used_generics,
        };

        let arm = match variant.fields {
            Fields::Unit => quote! { Self::#variant_ident => {} },
            Fields::Named(fields) => {
                let mut bindings = Vec::new();
                let mut calls = Vec::new();
                for field in fields.named {
                    let span = field.span();
                    let strategy = parse_variant_field_strategy(&field.attrs)?;
                    let ident = field.ident.expect("named field should have an identifier");
                    let binding = format_ident!("__walk_{}", ident);
                    let access = quote! { #binding };
                    let name = FieldName::Own(field_name(&ident));
                    if let Some(call) =
                        generate_field_walk(&mut ctx, &field.ty, &access, name, span, &strategy)
                    {
                        bindings.push(quote! { #ident: #binding });
                        calls.push(call);
                    }
                }
                quote! {
                    Self::#variant_ident { #(#bindings,)* .. } => {
                        #(#calls)*
                    }
                }
            }
            Fields::Unnamed(fields) => {
                let mut patterns = Vec::new();
                let mut calls = Vec::new();
                for (index, field) in fields.unnamed.into_iter().enumerate() {
                    let span = field.span();
                    let strategy = parse_variant_field_strategy(&field.attrs)?;
                    let binding = format_ident!("__walk_{index}");
                    let access = quote! { #binding };
                    match generate_field_walk(
                        &mut ctx,
                        &field.ty,
                        &access,
                        FieldName::Inherited,
                        span,
                        &strategy,
                    ) {
                        Some(call) => {
                            patterns.push(quote! { #binding });
                            calls.push(call);
                        }
                        None => patterns.push(quote! { _ }),
                    }
                }
                quote! {
                    Self::#variant_ident ( #(#patterns),* ) => {
                        #(#calls)*
                    }
                }
            }
        };
        arms.push(arm);
    }

    let walk_body = if arms.is_empty() {
        // Uninhabited enum: there is no value to walk.
        quote! { match *self {} }
    } else {
        quote! {
            match self {
                #(#arms)*
            }
        }
    };

    Ok(EnumDeriveOutput {
        walk_body,
        used_generics,
    })
}
