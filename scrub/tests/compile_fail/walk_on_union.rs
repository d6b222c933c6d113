//! Test: deriving `Walk` for a union should fail.
//!
//! A union has no single active field that could be walked.

use scrub::Walk;

#[derive(Walk)]
union Bits {
    pub int: u32,
    pub float: f32,
}

fn main() {}
