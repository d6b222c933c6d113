//! Mask computation for a single string value.
//!
//! Lengths are counted in Unicode scalar values, so a multi-byte character
//! is kept or masked as a whole.

use crate::{
    config::ScrubConfig,
    scrub::policy::{FieldPolicy, PartialMask},
};

/// Computes the replacement for `value` under `policy`.
///
/// Returns `None` when the value is left as is (empty strings are never
/// masked).
///
/// With partial masking enabled, checks run in order:
/// 1. shorter than `min_len`: full mask
/// 2. longer than `max_len`: full mask
/// 3. shorter than `visible_back_if_longer_than`: front kept, rest masked
/// 4. otherwise: front and back kept, middle masked
///
/// A visible span that does not fit the value falls back to a full mask.
#[must_use]
pub fn mask_value(value: &str, policy: &FieldPolicy, config: &ScrubConfig) -> Option<String> {
    if value.is_empty() {
        return None;
    }

    let symbol = policy.symbol_or(config.mask_symbol);
    let len = value.chars().count();
    let masked = policy
        .partial()
        .and_then(|partial| partial_mask(value, len, partial, symbol))
        .unwrap_or_else(|| full_mask(len, symbol, config));
    Some(masked)
}

fn full_mask(len: usize, symbol: char, config: &ScrubConfig) -> String {
    let mask_len = if config.vary_mask_len {
        len
    } else {
        config.fixed_mask_len
    };
    vec![symbol; mask_len].into_iter().collect()
}

/// `None` means the thresholds call for a full mask.
fn partial_mask(value: &str, len: usize, partial: &PartialMask, symbol: char) -> Option<String> {
    if len < partial.min_len || len > partial.max_len {
        return None;
    }

    let front = partial.visible_front;
    let back = if len < partial.visible_back_if_longer_than {
        0
    } else {
        partial.visible_back
    };
    if front.checked_add(back)? > len {
        return None;
    }

    let mut chars: Vec<char> = value.chars().collect();
    chars[front..len - back].fill(symbol);
    Some(chars.into_iter().collect())
}
