//! Field scrubbing for arbitrarily nested values.
//!
//! This crate separates:
//! - **Traversal**: where the strings of a value live ([`Walk`]).
//! - **Policy**: which field names are sensitive and how they are masked
//!   ([`FieldPolicies`]).
//!
//! A [`Scrubber`] combines both to render a value with its sensitive fields
//! masked, without losing the caller's data.
//!
//! Key rules:
//! - Derive [`Walk`] on your structs and enums; only `pub` fields are walked.
//! - Strings are matched by the name of the field or map key they sit under,
//!   case-insensitively. Sequence elements and `Option`/`Box` contents inherit
//!   that name; so do tuple fields, which makes newtypes transparent.
//! - `serde_json` objects are scrubbed by key: string entries under their
//!   key, and objects nested in arrays recursively.
//! - Empty strings are never masked.
//!
//! Choosing a strategy:
//! - [`Scrubber::masked`] returns a masked copy (`Clone`, no codec).
//! - [`Scrubber::scrub_in_place`] masks, encodes, and restores the original.
//! - [`Scrubber::scrub_cloned`] round-trips through the codec into a fresh
//!   value and masks that.
//!
//! What this crate does:
//! - defines the [`Walk`] traversal and its impls for std and serde_json types
//! - defines field policies, partial masks, and the [`Scrubber`] entrypoints
//! - provides integrations behind feature flags (`slog`, and `xml` for a
//!   tag-notation codec)
//!
//! What it does not do:
//! - perform I/O or logging
//! - mask numbers, booleans, or binary payloads
//!
//! The `Walk` derive macro lives in `scrub-derive` and is re-exported here.

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

pub use scrub_derive::Walk;

// Module declarations
mod codec;
mod config;
mod error;
mod scrub;
#[cfg(feature = "slog")]
pub mod slog;

// Re-exports
pub use crate::scrub::{
    mask_value, scrub, scrub_with_format, FieldPolicies, FieldPolicy, PartialMask, SavedValues,
    Scrubber, Visitor, Walk,
};
pub use codec::{Codec, Format, JsonCodec};
#[cfg(feature = "xml")]
pub use codec::XmlCodec;
pub use config::{ScrubConfig, DEFAULT_FIELD, DEFAULT_MASK_LEN, DEFAULT_MASK_SYMBOL};
pub use error::{CodecError, ScrubError};
