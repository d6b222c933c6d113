//! Test: an unknown `#[walk(...)]` option should fail.
//!
//! Only `skip` and `rename = "..."` are understood.

use scrub::Walk;

#[derive(Walk)]
pub struct Login {
    #[walk(hide)]
    pub password: String,
}

fn main() {}
