//! Field policies: which names are scrubbed, and with which mask.
//!
//! Policies are pure lookup data. They do not traverse values or compute
//! masks; see `mask` for the latter.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Partial-masking thresholds for a field.
///
/// With `enabled` set, values whose length lies within `[min_len, max_len]`
/// keep `visible_front` leading characters (and, once the value is at least
/// `visible_back_if_longer_than` long, `visible_back` trailing characters) in
/// clear text. Everything else is fully masked.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartialMask {
    /// Turns partial masking on. When `false` the field is always fully masked.
    pub enabled: bool,
    /// Values shorter than this are fully masked.
    pub min_len: usize,
    /// Values longer than this are fully masked.
    pub max_len: usize,
    /// Leading characters kept visible.
    pub visible_front: usize,
    /// Values shorter than this keep only the front visible.
    pub visible_back_if_longer_than: usize,
    /// Trailing characters kept visible for long enough values.
    pub visible_back: usize,
}

impl PartialMask {
    /// Builds a partial mask from its thresholds, in the order they are checked.
    #[must_use]
    pub const fn new(
        enabled: bool,
        min_len: usize,
        max_len: usize,
        visible_front: usize,
        visible_back_if_longer_than: usize,
        visible_back: usize,
    ) -> Self {
        Self {
            enabled,
            min_len,
            max_len,
            visible_front,
            visible_back_if_longer_than,
            visible_back,
        }
    }
}

/// How one field is masked.
///
/// The default policy is a full mask using the configured default symbol.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldPolicy {
    symbol: Option<String>,
    partial: Option<PartialMask>,
}

impl FieldPolicy {
    /// Full mask with the default symbol.
    #[must_use]
    pub fn full() -> Self {
        Self::default()
    }

    /// Uses a specific masking symbol.
    ///
    /// Only single-character symbols take effect; anything else falls back to
    /// the configured default symbol when masks are computed.
    #[must_use]
    pub fn with_symbol<S>(mut self, symbol: S) -> Self
    where
        S: Into<String>,
    {
        self.symbol = Some(symbol.into());
        self
    }

    /// Enables partial masking with the given thresholds.
    #[must_use]
    pub fn with_partial(mut self, partial: PartialMask) -> Self {
        self.partial = Some(partial);
        self
    }

    /// Returns the symbol to mask with, or `default` if none usable is set.
    #[must_use]
    pub fn symbol_or(&self, default: char) -> char {
        let Some(symbol) = self.symbol.as_deref() else {
            return default;
        };
        let mut chars = symbol.chars();
        match (chars.next(), chars.next()) {
            (Some(only), None) => only,
            _ => default,
        }
    }

    /// Returns the partial-mask thresholds if partial masking is enabled.
    #[must_use]
    pub fn partial(&self) -> Option<&PartialMask> {
        self.partial.as_ref().filter(|partial| partial.enabled)
    }
}

/// Field name to [`FieldPolicy`] lookup.
///
/// Names are stored lowercased and matched case-insensitively, so a policy
/// for `"password"` also applies to fields named `Password` or `PASSWORD`.
/// A name without an entry is never masked.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "HashMap<String, FieldPolicy>", into = "HashMap<String, FieldPolicy>")]
pub struct FieldPolicies {
    policies: HashMap<String, FieldPolicy>,
}

impl FieldPolicies {
    /// Creates an empty policy set (nothing is masked).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a policy set that fully masks each of `names`.
    #[must_use]
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names
            .into_iter()
            .map(|name| (name.as_ref().to_lowercase(), FieldPolicy::full()))
            .collect()
    }

    /// Adds or replaces the policy for `name`.
    pub fn insert<S>(&mut self, name: S, policy: FieldPolicy) -> Option<FieldPolicy>
    where
        S: AsRef<str>,
    {
        self.policies.insert(name.as_ref().to_lowercase(), policy)
    }

    /// Builder form of [`FieldPolicies::insert`].
    #[must_use]
    pub fn with<S>(mut self, name: S, policy: FieldPolicy) -> Self
    where
        S: AsRef<str>,
    {
        self.insert(name, policy);
        self
    }

    /// Looks up the policy for a visited field name.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&FieldPolicy> {
        // Keys are lowercase, so an exact hit needs no allocation.
        self.policies
            .get(field)
            .or_else(|| self.policies.get(&field.to_lowercase()))
    }

    /// Returns `true` if `field` has a policy.
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.policies.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }
}

impl<S> FromIterator<(S, FieldPolicy)> for FieldPolicies
where
    S: AsRef<str>,
{
    fn from_iter<I: IntoIterator<Item = (S, FieldPolicy)>>(iter: I) -> Self {
        let mut policies = Self::new();
        for (name, policy) in iter {
            policies.insert(name, policy);
        }
        policies
    }
}

impl From<HashMap<String, FieldPolicy>> for FieldPolicies {
    fn from(policies: HashMap<String, FieldPolicy>) -> Self {
        policies.into_iter().collect()
    }
}

impl From<FieldPolicies> for HashMap<String, FieldPolicy> {
    fn from(policies: FieldPolicies) -> Self {
        policies.policies
    }
}

#[cfg(test)]
mod tests {
    use super::{FieldPolicies, FieldPolicy, PartialMask};

    #[test]
    fn lookup_is_case_insensitive() {
        let policies = FieldPolicies::from_names(["Password", "dbsecrets"]);
        assert!(policies.contains("password"));
        assert!(policies.contains("PASSWORD"));
        assert!(policies.contains("DbSecrets"));
        assert!(!policies.contains("username"));
    }

    #[test]
    fn single_char_symbol_is_used() {
        let policy = FieldPolicy::full().with_symbol(".");
        assert_eq!(policy.symbol_or('*'), '.');
    }

    #[test]
    fn missing_or_multi_char_symbol_falls_back() {
        assert_eq!(FieldPolicy::full().symbol_or('*'), '*');
        assert_eq!(FieldPolicy::full().with_symbol("##").symbol_or('*'), '*');
        assert_eq!(FieldPolicy::full().with_symbol("").symbol_or('*'), '*');
    }

    #[test]
    fn multibyte_symbol_counts_as_one_char() {
        assert_eq!(FieldPolicy::full().with_symbol("•").symbol_or('*'), '•');
    }

    #[test]
    fn disabled_partial_mask_is_ignored() {
        let policy = FieldPolicy::full().with_partial(PartialMask::new(false, 1, 2, 3, 4, 5));
        assert!(policy.partial().is_none());

        let policy = FieldPolicy::full().with_partial(PartialMask::new(true, 10, 19, 6, 16, 4));
        assert_eq!(policy.partial().map(|p| p.visible_front), Some(6));
    }

    #[test]
    fn insert_replaces_existing_entry() {
        let mut policies = FieldPolicies::new();
        assert!(policies.insert("Keys", FieldPolicy::full()).is_none());
        let previous = policies.insert("keys", FieldPolicy::full().with_symbol("."));
        assert_eq!(previous, Some(FieldPolicy::full()));
        assert_eq!(policies.len(), 1);
    }

    #[test]
    fn deserialized_names_are_lowercased() {
        let policies: FieldPolicies = serde_json::from_str(
            r#"{
                "Password": {},
                "Keys": { "symbol": "." },
                "Username": { "partial": { "enabled": true, "min_len": 10, "max_len": 19,
                    "visible_front": 6, "visible_back_if_longer_than": 16, "visible_back": 4 } }
            }"#,
        )
        .unwrap();
        assert_eq!(policies.len(), 3);
        assert_eq!(policies.get("keys").unwrap().symbol_or('*'), '.');
        assert!(policies.get("username").unwrap().partial().is_some());
        assert_eq!(policies.get("password"), Some(&FieldPolicy::full()));
    }
}
