//! Adapters for emitting scrubbed values through `slog`.
//!
//! This module exists to connect [`Scrubber`] with `slog` by providing
//! `slog::Value` implementations that serialize scrubbed outputs as structured
//! JSON via `slog`'s nested-value support.
//!
//! It is responsible for:
//! - Ensuring the logged representation is derived from [`Scrubber::masked`],
//!   never from the original value.
//! - Avoiding fallible logging APIs: serialization failures are represented as
//!   placeholder strings rather than propagated as errors.
//!
//! It does not configure `slog` or decide which fields are sensitive.

use serde::Serialize;
use serde_json::Value as JsonValue;
use slog::{Key, Record, Result as SlogResult, Serializer, Value as SlogValue};

use crate::scrub::{Scrubber, Walk};

/// Logged in place of a value that could not be converted to JSON.
pub const SERIALIZE_FAILED_PLACEHOLDER: &str = "Failed to serialize scrubbed value";

/// A `slog::Value` that emits an owned scrubbed payload as structured JSON.
///
/// If converting the scrubbed value into JSON failed, this holds a JSON string
/// with [`SERIALIZE_FAILED_PLACEHOLDER`] instead.
pub struct ScrubbedJson {
    value: JsonValue,
}

impl ScrubbedJson {
    fn new(value: JsonValue) -> Self {
        Self { value }
    }
}

impl SlogValue for ScrubbedJson {
    fn serialize(
        &self,
        record: &Record<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        let nested = slog::Serde(self.value.clone());
        SlogValue::serialize(&nested, record, key, serializer)
    }
}

/// Converts values into a `slog::Value` that logs their scrubbed form as JSON.
///
/// The value itself is left untouched; a masked copy is serialized.
///
/// ## Example
/// ```ignore
/// use scrub::slog::IntoScrubbedJson;
///
/// info!(logger, "login"; "user" => user.scrubbed_json(&scrubber));
/// ```
pub trait IntoScrubbedJson: Walk + Clone + Serialize {
    /// Masks a copy of `self` with `scrubber` and wraps it for logging.
    fn scrubbed_json(&self, scrubber: &Scrubber) -> ScrubbedJson {
        let masked = scrubber.masked(self);
        let json_value = serde_json::to_value(masked)
            .unwrap_or_else(|_| JsonValue::String(SERIALIZE_FAILED_PLACEHOLDER.to_string()));
        ScrubbedJson::new(json_value)
    }
}

impl<T> IntoScrubbedJson for T where T: Walk + Clone + Serialize {}
