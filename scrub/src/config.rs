//! Scrubbing configuration.
//!
//! A [`ScrubConfig`] is handed to each [`Scrubber`](crate::Scrubber); there is
//! no process-wide state. Every field has a default, so partial configs can be
//! loaded from any serde format.

use serde::{Deserialize, Serialize};

use crate::scrub::FieldPolicies;

/// Field scrubbed when no policies are supplied.
pub const DEFAULT_FIELD: &str = "password";

/// Symbol used when a policy does not name a usable one.
pub const DEFAULT_MASK_SYMBOL: char = '*';

/// Length of a full mask unless `vary_mask_len` is set.
pub const DEFAULT_MASK_LEN: usize = 8;

/// Defaults shared by every scrub performed through one `Scrubber`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrubConfig {
    /// Field names fully masked when no explicit policies are given.
    pub default_fields: Vec<String>,
    /// Default masking symbol.
    pub mask_symbol: char,
    /// Full-mask length when `vary_mask_len` is `false`.
    pub fixed_mask_len: usize,
    /// Makes a full mask as long as the value it replaces.
    pub vary_mask_len: bool,
}

impl Default for ScrubConfig {
    fn default() -> Self {
        Self {
            default_fields: vec![DEFAULT_FIELD.to_string()],
            mask_symbol: DEFAULT_MASK_SYMBOL,
            fixed_mask_len: DEFAULT_MASK_LEN,
            vary_mask_len: false,
        }
    }
}

impl ScrubConfig {
    #[must_use]
    pub fn with_default_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.default_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_symbol(mut self, symbol: char) -> Self {
        self.mask_symbol = symbol;
        self
    }

    #[must_use]
    pub fn with_fixed_len(mut self, len: usize) -> Self {
        self.fixed_mask_len = len;
        self
    }

    #[must_use]
    pub fn with_vary_len(mut self, vary: bool) -> Self {
        self.vary_mask_len = vary;
        self
    }

    /// Full-mask policies for [`ScrubConfig::default_fields`].
    #[must_use]
    pub fn default_policies(&self) -> FieldPolicies {
        FieldPolicies::from_names(&self.default_fields)
    }
}
