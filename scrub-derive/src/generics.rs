//! Generic type parameter handling and trait bound management.
//!
//! Bounds are added only for generics that appear in walked fields.
//!
//! ## PhantomData Handling
//!
//! `PhantomData<T>` fields are skipped when collecting generics:
//!
//! ```ignore
//! struct TypedId<T> {
//!     pub id: String,
//!     pub _marker: PhantomData<T>,  // T should NOT require Walk
//! }
//! ```

use syn::{parse_quote, Ident};

use crate::crate_path;

pub(crate) fn collect_generics_from_type(
    ty: &syn::Type,
    generics: &syn::Generics,
    result: &mut Vec<Ident>,
) {
    match ty {
        syn::Type::Path(path) => {
            let Some(segment) = path.path.segments.last() else {
                return;
            };
            if segment.ident == "PhantomData" {
                return;
            }

            if let syn::PathArguments::AngleBracketed(args) = &segment.arguments {
                for arg in &args.args {
                    if let syn::GenericArgument::Type(inner_ty) = arg {
                        collect_generics_from_type(inner_ty, generics, result);
                    }
                }
            }

            for param in generics.type_params() {
                if segment.ident == param.ident && !result.iter().any(|g| g == &param.ident) {
                    result.push(param.ident.clone());
                }
            }
        }
        syn::Type::Array(array) => collect_generics_from_type(&array.elem, generics, result),
        syn::Type::Paren(paren) => collect_generics_from_type(&paren.elem, generics, result),
        syn::Type::Group(group) => collect_generics_from_type(&group.elem, generics, result),
        _ => {}
    }
}

/// Adds `Walk` bounds to generic parameters used in walked fields.
pub(crate) fn add_walk_bounds(mut generics: syn::Generics, used_generics: &[Ident]) -> syn::Generics {
    for param in generics.type_params_mut() {
        if used_generics.iter().any(|g| g == &param.ident) {
            let walk_path = crate_path("Walk");
            param.bounds.push(parse_quote!(#walk_path));
        }
    }
    generics
}

#[cfg(test)]
mod tests {
    use quote::quote;

    use super::*;

    fn generics_of(tokens: proc_macro2::TokenStream) -> syn::Generics {
        let input: syn::DeriveInput = syn::parse2(tokens).expect("should parse as DeriveInput");
        input.generics
    }

    fn parse_type(tokens: proc_macro2::TokenStream) -> syn::Type {
        syn::parse2(tokens).expect("should parse as Type")
    }

    #[test]
    fn nested_generic_is_collected_once() {
        let generics = generics_of(quote! { struct Dummy<T, U>; });
        let mut used = Vec::new();
        collect_generics_from_type(&parse_type(quote! { Vec<Option<T>> }), &generics, &mut used);
        collect_generics_from_type(&parse_type(quote! { T }), &generics, &mut used);
        assert_eq!(used.len(), 1);
        assert_eq!(used[0], "T");
    }

    #[test]
    fn phantom_data_generic_is_ignored() {
        let generics = generics_of(quote! { struct Dummy<T>; });
        let mut used = Vec::new();
        collect_generics_from_type(&parse_type(quote! { PhantomData<T> }), &generics, &mut used);
        assert!(used.is_empty());
    }

    #[test]
    fn array_element_generic_is_collected() {
        let generics = generics_of(quote! { struct Dummy<T>; });
        let mut used = Vec::new();
        collect_generics_from_type(&parse_type(quote! { [T; 4] }), &generics, &mut used);
        assert_eq!(used.len(), 1);
    }

    #[test]
    fn bounds_added_only_to_used_params() {
        let generics = generics_of(quote! { struct Dummy<T, U>; });
        let used = vec![Ident::new("U", proc_macro2::Span::call_site())];
        let bounded = add_walk_bounds(generics, &used);
        let params: Vec<_> = bounded.type_params().collect();
        assert!(params[0].bounds.is_empty());
        assert_eq!(params[1].bounds.len(), 1);
    }
}
