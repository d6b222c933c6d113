//! Producing scrubbed renderings without losing the caller's data.
//!
//! Three strategies share one walk:
//! - **Mutate and restore** ([`Scrubber::scrub_in_place`]): mask the target,
//!   encode it, then put every original string back in the same walk order.
//! - **Clone and mutate** ([`Scrubber::scrub_cloned`], [`Scrubber::scrub_into`]):
//!   round-trip the target through the codec into a fresh value and mask that.
//! - **Clone and mask** ([`Scrubber::masked`]): a plain `Clone` followed by an
//!   in-place mask, no codec involved.
//!
//! Walking and masking never fail. Only absent input and codec errors are
//! reported, as [`ScrubError`].

use std::{collections::VecDeque, fmt, mem};

use serde::{de::DeserializeOwned, Serialize};

use crate::{
    codec::{Codec, JsonCodec},
    config::ScrubConfig,
    error::ScrubError,
    scrub::{
        mask::mask_value,
        policy::FieldPolicies,
        walk::{Visitor, Walk},
    },
};

/// Applies field policies to values.
///
/// A `Scrubber` holds no per-call state and can be shared freely between
/// threads.
#[derive(Clone, Debug)]
pub struct Scrubber {
    config: ScrubConfig,
    policies: FieldPolicies,
}

impl Default for Scrubber {
    fn default() -> Self {
        Self::new(ScrubConfig::default())
    }
}

impl Scrubber {
    /// Masks the configuration's default fields.
    #[must_use]
    pub fn new(config: ScrubConfig) -> Self {
        let policies = config.default_policies();
        Self { config, policies }
    }

    /// Masks exactly the fields named in `policies`.
    #[must_use]
    pub fn with_policies(config: ScrubConfig, policies: FieldPolicies) -> Self {
        Self { config, policies }
    }

    pub fn config(&self) -> &ScrubConfig {
        &self.config
    }

    pub fn policies(&self) -> &FieldPolicies {
        &self.policies
    }

    /// Masks every matching string of `target` in place. Nothing is kept to
    /// undo it.
    pub fn mask<T>(&self, target: &mut T)
    where
        T: Walk + ?Sized,
    {
        let mut visitor = MaskVisitor { scrubber: self };
        target.walk("", &mut visitor);
    }

    /// Returns a masked copy of `target`, leaving `target` untouched.
    #[must_use]
    pub fn masked<T>(&self, target: &T) -> T
    where
        T: Walk + Clone,
    {
        let mut copy = target.clone();
        self.mask(&mut copy);
        copy
    }

    /// Masks `target` in place and returns the replaced originals.
    ///
    /// Pass the result to [`Scrubber::restore`] on the same, structurally
    /// unchanged value to undo the masking.
    pub fn mask_saving<T>(&self, target: &mut T) -> SavedValues
    where
        T: Walk + ?Sized,
    {
        let mut visitor = SaveVisitor {
            scrubber: self,
            saved: SavedValues::default(),
        };
        target.walk("", &mut visitor);
        visitor.saved
    }

    /// Puts back the values taken by [`Scrubber::mask_saving`].
    ///
    /// Originals are handed out first-in, first-out, one per matching field,
    /// following the same walk order as the masking pass.
    pub fn restore<T>(&self, target: &mut T, saved: SavedValues)
    where
        T: Walk + ?Sized,
    {
        let mut visitor = RestoreVisitor {
            policies: &self.policies,
            saved,
        };
        target.walk("", &mut visitor);
    }

    /// Renders `target` with matching fields masked, then restores it.
    ///
    /// The originals are restored even when encoding fails.
    pub fn scrub_in_place<T, C>(&self, target: &mut T, codec: &C) -> Result<String, ScrubError>
    where
        T: Walk + Serialize + ?Sized,
        C: Codec,
    {
        if target.is_absent() {
            return Err(ScrubError::EmptyInput);
        }

        let saved = self.mask_saving(target);
        let encoded = codec.encode(&*target);
        self.restore(target, saved);

        let bytes = encoded.map_err(ScrubError::Encode)?;
        Ok(String::from_utf8(bytes)?)
    }

    /// Renders a masked clone of `target`, built by round-tripping it
    /// through `codec`. `target` is never modified.
    pub fn scrub_cloned<T, C>(&self, target: &T, codec: &C) -> Result<String, ScrubError>
    where
        T: Walk + Serialize + DeserializeOwned,
        C: Codec,
    {
        if target.is_absent() {
            return Err(ScrubError::EmptyInput);
        }

        let mut clone: T = clone_through(target, codec)?;
        self.mask(&mut clone);
        render(&clone, codec)
    }

    /// Like [`Scrubber::scrub_cloned`], but leaves the masked clone in
    /// `receptacle` for the caller to inspect.
    pub fn scrub_into<T, C>(
        &self,
        receptacle: Option<&mut T>,
        target: &T,
        codec: &C,
    ) -> Result<String, ScrubError>
    where
        T: Walk + Serialize + DeserializeOwned,
        C: Codec,
    {
        let Some(receptacle) = receptacle else {
            return Err(ScrubError::EmptyInput);
        };
        if target.is_absent() {
            return Err(ScrubError::EmptyInput);
        }

        *receptacle = clone_through(target, codec)?;
        self.mask(&mut *receptacle);
        render(&*receptacle, codec)
    }
}

fn clone_through<T, C>(target: &T, codec: &C) -> Result<T, ScrubError>
where
    T: Serialize + DeserializeOwned,
    C: Codec,
{
    let bytes = codec.encode(target).map_err(ScrubError::Encode)?;
    codec.decode(&bytes).map_err(ScrubError::Decode)
}

fn render<T, C>(value: &T, codec: &C) -> Result<String, ScrubError>
where
    T: Serialize + ?Sized,
    C: Codec,
{
    let bytes = codec.encode(value).map_err(ScrubError::Encode)?;
    Ok(String::from_utf8(bytes)?)
}

/// Original values replaced by [`Scrubber::mask_saving`].
///
/// Holds one entry per matching field in walk order; empty strings match but
/// are not masked, and keep their slot so the restore pass stays aligned.
#[must_use = "masked values stay masked unless passed to `Scrubber::restore`"]
#[derive(Default)]
pub struct SavedValues {
    values: VecDeque<Option<String>>,
}

impl SavedValues {
    /// Number of matching fields seen while masking.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

// Saved values are the secrets themselves.
impl fmt::Debug for SavedValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SavedValues")
            .field("len", &self.values.len())
            .finish_non_exhaustive()
    }
}

struct MaskVisitor<'a> {
    scrubber: &'a Scrubber,
}

impl Visitor for MaskVisitor<'_> {
    fn visit_str(&mut self, field: &str, value: &mut String) {
        let Some(policy) = self.scrubber.policies.get(field) else {
            return;
        };
        if let Some(masked) = mask_value(value, policy, &self.scrubber.config) {
            *value = masked;
        }
    }
}

struct SaveVisitor<'a> {
    scrubber: &'a Scrubber,
    saved: SavedValues,
}

impl Visitor for SaveVisitor<'_> {
    fn visit_str(&mut self, field: &str, value: &mut String) {
        let Some(policy) = self.scrubber.policies.get(field) else {
            return;
        };
        let original = mask_value(value, policy, &self.scrubber.config)
            .map(|masked| mem::replace(value, masked));
        self.saved.values.push_back(original);
    }
}

struct RestoreVisitor<'a> {
    policies: &'a FieldPolicies,
    saved: SavedValues,
}

impl Visitor for RestoreVisitor<'_> {
    fn visit_str(&mut self, field: &str, value: &mut String) {
        if !self.policies.contains(field) {
            return;
        }
        if let Some(Some(original)) = self.saved.values.pop_front() {
            *value = original;
        }
    }
}

/// Renders `target` as JSON with the named fields masked by a fixed
/// `********`, restoring `target` before returning.
///
/// `fields` defaults to `["password"]`. Absent input renders as `null`, and
/// so does an encoding failure.
pub fn scrub<T>(target: Option<&mut T>, fields: Option<&[&str]>) -> String
where
    T: Walk + Serialize + ?Sized,
{
    let config = ScrubConfig::default();
    let scrubber = match fields {
        Some(fields) => Scrubber::with_policies(config, FieldPolicies::from_names(fields)),
        None => Scrubber::new(config),
    };
    let codec = JsonCodec::new();

    let Some(target) = target else {
        return codec.format().empty_text().to_string();
    };
    scrubber
        .scrub_in_place(target, &codec)
        .unwrap_or_else(|error| error.fallback_text(codec.format()).to_string())
}

/// Renders a masked clone of `target` in `codec`'s format, leaving the clone
/// in `receptacle`.
///
/// `policies` defaults to a full mask of `password`. Absent input, a missing
/// receptacle, or a codec failure all render as the format's empty text
/// (`null` for JSON).
pub fn scrub_with_format<T, C>(
    receptacle: Option<&mut T>,
    target: Option<&T>,
    policies: Option<&FieldPolicies>,
    config: &ScrubConfig,
    codec: &C,
) -> String
where
    T: Walk + Serialize + DeserializeOwned,
    C: Codec,
{
    let scrubber = match policies {
        Some(policies) => Scrubber::with_policies(config.clone(), policies.clone()),
        None => Scrubber::new(config.clone()),
    };
    let result = match target {
        Some(target) => scrubber.scrub_into(receptacle, target, codec),
        None => Err(ScrubError::EmptyInput),
    };
    result.unwrap_or_else(|error| error.fallback_text(codec.format()).to_string())
}
