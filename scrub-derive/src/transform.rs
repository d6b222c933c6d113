//! Shared field traversal logic for struct and enum derivation.

use proc_macro2::{Ident, Span, TokenStream};
use quote::quote_spanned;

use crate::{generics::collect_generics_from_type, strategy::Strategy, types::is_opaque_type};

/// Accumulated state during field processing.
pub(crate) struct DeriveContext<'a> {
    pub(crate) generics: &'a syn::Generics,
    pub(crate) walk_path: &'a TokenStream,
    pub(crate) used_generics: &'a mut Vec<Ident>,
}

/// How a field is named when it is visited.
pub(crate) enum FieldName {
    /// Named field: walked under its own (unraw'd) identifier.
    Own(String),
    /// Tuple field: inherits the name the container was reached through.
    Inherited,
}

/// Generates the walk call for a single field.
///
/// `access` is an expression of type `&mut FieldType`: `&mut self.name` for
/// structs, a match binding for enum variants.
///
/// | Strategy | Field type | Output |
/// |----------|------------|--------|
/// | `Skip` | any | nothing |
/// | `Walk` | scalar / `PhantomData` | nothing |
/// | `Walk` | anything else | `Walk::walk(access, name, __visitor)` |
pub(crate) fn generate_field_walk(
    ctx: &mut DeriveContext<'_>,
    ty: &syn::Type,
    access: &TokenStream,
    name: FieldName,
    span: Span,
    strategy: &Strategy,
) -> Option<TokenStream> {
    let Strategy::Walk { rename } = strategy else {
        return None;
    };
    if is_opaque_type(ty) {
        return None;
    }

    collect_generics_from_type(ty, ctx.generics, ctx.used_generics);
    let walk_path = ctx.walk_path;
    let call = match (rename, name) {
        (Some(rename), _) => quote_spanned! { span =>
            #walk_path::walk(#access, #rename, __visitor);
        },
        (None, FieldName::Own(own)) => quote_spanned! { span =>
            #walk_path::walk(#access, #own, __visitor);
        },
        (None, FieldName::Inherited) => quote_spanned! { span =>
            #walk_path::walk(#access, __field, __visitor);
        },
    };
    Some(call)
}

/// Field name as written in source, without a raw identifier prefix.
pub(crate) fn field_name(ident: &Ident) -> String {
    let name = ident.to_string();
    name.strip_prefix("r#").map_or_else(|| name.clone(), ToString::to_string)
}

#[cfg(test)]
mod tests {
    use quote::{format_ident, quote};

    use super::*;

    #[test]
    fn raw_identifier_prefix_is_stripped() {
        let ident: Ident = syn::parse_str("r#type").unwrap();
        assert_eq!(field_name(&ident), "type");
        assert_eq!(field_name(&format_ident!("password")), "password");
    }

    #[test]
    fn skipped_and_opaque_fields_emit_nothing() {
        let generics = syn::Generics::default();
        let walk_path = quote! { ::scrub::Walk };
        let mut used = Vec::new();
        let mut ctx = DeriveContext {
            generics: &generics,
            walk_path: &walk_path,
            used_generics: &mut used,
        };
        let access = quote! { &mut self.count };
        let string_ty: syn::Type = syn::parse_quote!(String);
        let count_ty: syn::Type = syn::parse_quote!(u64);

        assert!(generate_field_walk(
            &mut ctx,
            &string_ty,
            &access,
            FieldName::Own("count".into()),
            Span::call_site(),
            &Strategy::Skip,
        )
        .is_none());
        assert!(generate_field_walk(
            &mut ctx,
            &count_ty,
            &access,
            FieldName::Own("count".into()),
            Span::call_site(),
            &Strategy::Walk { rename: None },
        )
        .is_none());
    }

    #[test]
    fn renamed_field_uses_new_name() {
        let generics = syn::Generics::default();
        let walk_path = quote! { ::scrub::Walk };
        let mut used = Vec::new();
        let mut ctx = DeriveContext {
            generics: &generics,
            walk_path: &walk_path,
            used_generics: &mut used,
        };
        let ty: syn::Type = syn::parse_quote!(String);
        let tokens = generate_field_walk(
            &mut ctx,
            &ty,
            &quote! { &mut self.pw },
            FieldName::Own("pw".into()),
            Span::call_site(),
            &Strategy::Walk {
                rename: Some("password".into()),
            },
        )
        .unwrap();
        assert!(tokens.to_string().contains("\"password\""));
    }
}
