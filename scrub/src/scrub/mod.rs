//! Scrubbing policies, traversal, and entrypoints.
//!
//! This module ties the pieces together:
//!
//! - **`walk`**: Traversal layer - where strings live (`Walk`, `Visitor`)
//! - **`policy`**: Policy layer - which fields to scrub (`FieldPolicies`, `FieldPolicy`)
//! - **`mask`**: Masking layer - what a scrubbed value looks like (`mask_value`)
//! - **`engine`**: Application layer - scrubbing without losing data (`Scrubber`, `scrub`)

mod engine;
mod mask;
mod policy;
mod walk;

pub use engine::{scrub, scrub_with_format, SavedValues, Scrubber};
pub use mask::mask_value;
pub use policy::{FieldPolicies, FieldPolicy, PartialMask};
pub use walk::{Visitor, Walk};
