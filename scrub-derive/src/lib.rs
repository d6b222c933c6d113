//! Derive macro for `scrub`.
//!
//! This crate generates the traversal code behind `#[derive(Walk)]`. It:
//! - reads field visibility and `#[walk(...)]` field attributes
//! - emits a `Walk` implementation that hands every reachable string, with
//!   the name of the field it was reached through, to a visitor
//!
//! It does **not** decide what gets masked. Field policies and masking live in
//! the main `scrub` crate and are applied at runtime.

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::default_trait_access,
    clippy::doc_markdown,
    clippy::if_not_else,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::needless_ifs,
    clippy::use_self,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::enum_glob_use,
    clippy::struct_excessive_bools,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::result_large_err,
    clippy::future_not_send,
    clippy::option_if_let_else,
    clippy::from_over_into,
    clippy::manual_inspect
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

#[allow(unused_extern_crates)]
extern crate proc_macro;

use proc_macro2::{Ident, TokenStream};
use proc_macro_crate::{crate_name, FoundCrate};
use quote::{format_ident, quote};
use syn::{parse_macro_input, spanned::Spanned, Data, DeriveInput, Result};

mod derive_enum;
mod derive_struct;
mod generics;
mod strategy;
mod transform;
mod types;
use derive_enum::derive_enum;
use derive_struct::derive_struct;
use generics::add_walk_bounds;

/// Derives `scrub::Walk` for structs and enums.
///
/// The generated walker visits fields in declaration order and passes each
/// field's name down, so string leaves can be matched against field policies.
///
/// # Field Rules
///
/// - **`pub` fields** are walked under their own name. Raw identifiers lose
///   their `r#` prefix.
/// - **Private fields** (including `pub(crate)` and other restricted
///   visibilities) are not externally visible and are never walked.
/// - **Tuple fields** have no name of their own and inherit the name the
///   value was reached through, so `struct Password(pub String)` behaves like
///   the `String` it wraps.
/// - **Enum variant fields** are always visible; named ones are walked under
///   their name, positional ones inherit.
/// - Bare scalar fields (`i32`, `bool`, ...) and `PhantomData` are skipped at
///   compile time since they cannot carry a string.
///
/// # Field Attributes
///
/// - `#[walk(skip)]`: never visit this field.
/// - `#[walk(rename = "name")]`: use `name` for policy lookup instead of the
///   field identifier. Also gives a tuple field a name of its own.
///
/// Unions are rejected at compile time.
#[proc_macro_derive(Walk, attributes(walk))]
pub fn derive_walk(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}

/// Returns the token stream to reference the scrub crate root.
///
/// Handles crate renaming (e.g., `my_scrub = { package = "scrub", ... }`)
/// and internal usage (when derive is used inside the scrub crate itself).
fn crate_root() -> proc_macro2::TokenStream {
    match crate_name("scrub") {
        Ok(FoundCrate::Itself) => quote! { crate },
        Ok(FoundCrate::Name(name)) => {
            let ident = format_ident!("{}", name);
            quote! { ::#ident }
        }
        Err(_) => quote! { ::scrub },
    }
}

fn crate_path(item: &str) -> proc_macro2::TokenStream {
    let root = crate_root();
    let item_ident = syn::parse_str::<syn::Path>(item).expect("scrub crate path should parse");
    quote! { #root::#item_ident }
}

struct DeriveOutput {
    walk_body: TokenStream,
    used_generics: Vec<Ident>,
}

fn expand(input: DeriveInput) -> Result<TokenStream> {
    let DeriveInput {
        ident,
        generics,
        data,
        attrs,
        ..
    } = input;

    if let Some(attr) = attrs.iter().find(|attr| attr.path().is_ident("walk")) {
        return Err(syn::Error::new(
            attr.span(),
            "#[walk] is a field attribute; it has no meaning on the container",
        ));
    }

    let crate_root = crate_root();

    let derive_output = match data {
        Data::Struct(data) => {
            let output = derive_struct(data, &generics)?;
            DeriveOutput {
                walk_body: output.walk_body,
                used_generics: output.used_generics,
            }
        }
        Data::Enum(data) => {
            let output = derive_enum(data, &generics)?;
            DeriveOutput {
                walk_body: output.walk_body,
                used_generics: output.used_generics,
            }
        }
        Data::Union(u) => {
            return Err(syn::Error::new(
                u.union_token.span(),
                "`Walk` cannot be derived for unions",
            ));
        }
    };

    let walk_generics = add_walk_bounds(generics, &derive_output.used_generics);
    let (impl_generics, ty_generics, where_clause) = walk_generics.split_for_impl();
    let walk_body = &derive_output.walk_body;

    Ok(quote! {
        impl #impl_generics #crate_root::Walk for #ident #ty_generics #where_clause {
            #[allow(unused_variables, clippy::used_underscore_binding)]
            fn walk<__ScrubVisitor: #crate_root::Visitor + ?Sized>(
                &mut self,
                __field: &str,
                __visitor: &mut __ScrubVisitor,
            ) {
                #walk_body
            }
        }
    })
}
