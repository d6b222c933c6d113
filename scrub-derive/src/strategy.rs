//! Parsing of `#[walk(...)]` field attributes.
//!
//! This module maps attribute syntax to traversal decisions and produces
//! structured errors for invalid forms.

use proc_macro2::Span;
use syn::{spanned::Spanned, Attribute, LitStr, Meta, Result, Visibility};

/// Field traversal strategy based on visibility and `#[walk(...)]` attributes.
///
/// | Field | Strategy | Behavior |
/// |-------|----------|----------|
/// | private (`struct` fields without `pub`) | `Skip` | Not visited |
/// | `#[walk(skip)]` | `Skip` | Not visited |
/// | `pub` / enum variant field | `Walk { rename: None }` | Walked under its own name |
/// | `#[walk(rename = "n")]` | `Walk { rename: Some("n") }` | Walked under `n` |
#[derive(Clone, Debug)]
pub(crate) enum Strategy {
    /// The field is never visited.
    Skip,
    /// The field is walked. `rename` overrides the name used for policy lookup.
    Walk { rename: Option<String> },
}

#[derive(Default)]
struct FieldOptions {
    skip: bool,
    rename: Option<String>,
}

fn parse_field_options(attrs: &[Attribute]) -> Result<FieldOptions> {
    let mut options = FieldOptions::default();
    let mut seen: Option<Span> = None;

    for attr in attrs {
        if !attr.path().is_ident("walk") {
            continue;
        }
        if seen.is_some() {
            return Err(syn::Error::new(
                attr.span(),
                "multiple #[walk] attributes specified on the same field",
            ));
        }
        seen = Some(attr.span());

        match &attr.meta {
            Meta::Path(_) => {
                return Err(syn::Error::new(
                    attr.span(),
                    "bare #[walk] has no effect; expected `skip` or `rename = \"...\"`",
                ));
            }
            Meta::List(list) => {
                list.parse_nested_meta(|meta| {
                    if meta.path.is_ident("skip") {
                        options.skip = true;
                        Ok(())
                    } else if meta.path.is_ident("rename") {
                        let name: LitStr = meta.value()?.parse()?;
                        if name.value().is_empty() {
                            return Err(meta.error("`rename` needs a non-empty field name"));
                        }
                        options.rename = Some(name.value());
                        Ok(())
                    } else {
                        Err(meta.error(format!(
                            "unknown field option `{}`; expected `skip` or `rename`",
                            meta.path
                                .get_ident()
                                .map_or_else(|| "?".to_string(), ToString::to_string)
                        )))
                    }
                })?;
            }
            Meta::NameValue(_) => {
                return Err(syn::Error::new(
                    attr.span(),
                    "name-value syntax is not supported for #[walk]",
                ));
            }
        }
    }

    if options.skip && options.rename.is_some() {
        if let Some(span) = seen {
            return Err(syn::Error::new(
                span,
                "`skip` and `rename` cannot be combined on the same field",
            ));
        }
    }

    Ok(options)
}

/// Resolves the strategy for a struct field.
///
/// Only `pub` fields are externally visible and therefore candidates; every
/// other visibility is skipped, with or without attributes.
pub(crate) fn parse_struct_field_strategy(
    vis: &Visibility,
    attrs: &[Attribute],
) -> Result<Strategy> {
    let options = parse_field_options(attrs)?;
    if !matches!(vis, Visibility::Public(_)) || options.skip {
        return Ok(Strategy::Skip);
    }
    Ok(Strategy::Walk {
        rename: options.rename,
    })
}

/// Resolves the strategy for an enum variant field. Variant fields share the
/// visibility of the enum, so only attributes decide.
pub(crate) fn parse_variant_field_strategy(attrs: &[Attribute]) -> Result<Strategy> {
    let options = parse_field_options(attrs)?;
    if options.skip {
        return Ok(Strategy::Skip);
    }
    Ok(Strategy::Walk {
        rename: options.rename,
    })
}
