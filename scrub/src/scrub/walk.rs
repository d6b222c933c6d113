//! Traversal layer: how values expose their string leaves.
//!
//! - [`Walk`]: implemented by every type the walker can descend into or stop at
//! - [`Visitor`]: receives each string leaf together with its field name
//!
//! ## Value shapes
//!
//! | Shape | Types | Behavior |
//! |-------|-------|----------|
//! | Record | `#[derive(Walk)]` structs and enums | `pub` fields walked under their own name |
//! | Sequence | `Vec`, `VecDeque`, arrays, slices | every element, same field name |
//! | Indirection | `Option`, `Box`, `&mut T` | inner value, same field name; `None` stops |
//! | Keyed map | `serde_json::Map`, `HashMap<String, Value>`, `BTreeMap<String, Value>` | string entries visited under their key, arrays of maps recursed |
//! | String | `String`, `Cow<str>` | visited when the field name is non-empty |
//! | Other | numbers, `bool`, `char`, sets, `String`-valued typed maps | never visited |
//!
//! A walk is deterministic for a given value: declaration order for records,
//! index order for sequences, and the map's own iteration order, which does
//! not change while only values are rewritten.

use std::{
    borrow::Cow,
    collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque},
    hash::BuildHasher,
};

use serde_json::{Map, Value};

/// Receives every string location reached by a [`Walk`].
///
/// `field` is the name of the record field or map key the string was reached
/// through. It is never empty; unnamed leaves are not visited.
pub trait Visitor {
    /// Inspects or rewrites one string in place.
    fn visit_str(&mut self, field: &str, value: &mut String);
}

impl<F> Visitor for F
where
    F: FnMut(&str, &mut String),
{
    fn visit_str(&mut self, field: &str, value: &mut String) {
        self(field, value);
    }
}

/// A value whose string leaves can be visited in place.
///
/// Derive this with `#[derive(Walk)]` for your own structs and enums. The
/// derive walks `pub` fields only; private fields are not externally visible
/// and are left alone.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be walked for scrubbing",
    label = "this type does not implement `Walk`",
    note = "use `#[derive(Walk)]` on the type definition",
    note = "or mark the field with `#[walk(skip)]` if it never holds secrets"
)]
pub trait Walk {
    /// Visits every reachable string under `field`, in a stable order.
    fn walk<V: Visitor + ?Sized>(&mut self, field: &str, visitor: &mut V);

    /// Returns `true` if there is no value at all (e.g. `None`).
    fn is_absent(&self) -> bool {
        false
    }
}

// =============================================================================
// Strings
// =============================================================================

impl Walk for String {
    fn walk<V: Visitor + ?Sized>(&mut self, field: &str, visitor: &mut V) {
        // Without a name there is nothing to match a policy against.
        if !field.is_empty() {
            visitor.visit_str(field, self);
        }
    }
}

/// A borrowed value stays borrowed unless the visitor changes it.
impl Walk for Cow<'_, str> {
    fn walk<V: Visitor + ?Sized>(&mut self, field: &str, visitor: &mut V) {
        if field.is_empty() {
            return;
        }
        let mut text = self.to_string();
        visitor.visit_str(field, &mut text);
        if text != **self {
            *self = Cow::Owned(text);
        }
    }
}

// =============================================================================
// Opaque leaves
// =============================================================================

macro_rules! impl_walk_opaque {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Walk for $ty {
                fn walk<V: Visitor + ?Sized>(&mut self, _field: &str, _visitor: &mut V) {}
            }
        )*
    };
}

impl_walk_opaque!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, ()
);

// Set elements cannot be rewritten without rehashing; they are read-only.
impl<T, S> Walk for HashSet<T, S> {
    fn walk<V: Visitor + ?Sized>(&mut self, _field: &str, _visitor: &mut V) {}
}

impl<T> Walk for BTreeSet<T> {
    fn walk<V: Visitor + ?Sized>(&mut self, _field: &str, _visitor: &mut V) {}
}

// Statically typed string maps are not keyed maps: their values are left as is.
impl<K, S> Walk for HashMap<K, String, S> {
    fn walk<V: Visitor + ?Sized>(&mut self, _field: &str, _visitor: &mut V) {}
}

impl<K> Walk for BTreeMap<K, String> {
    fn walk<V: Visitor + ?Sized>(&mut self, _field: &str, _visitor: &mut V) {}
}

// =============================================================================
// Indirections
// =============================================================================

impl<T> Walk for Option<T>
where
    T: Walk,
{
    fn walk<V: Visitor + ?Sized>(&mut self, field: &str, visitor: &mut V) {
        if let Some(value) = self {
            value.walk(field, visitor);
        }
    }

    fn is_absent(&self) -> bool {
        self.as_ref().map_or(true, Walk::is_absent)
    }
}

impl<T> Walk for Box<T>
where
    T: Walk + ?Sized,
{
    fn walk<V: Visitor + ?Sized>(&mut self, field: &str, visitor: &mut V) {
        (**self).walk(field, visitor);
    }

    fn is_absent(&self) -> bool {
        (**self).is_absent()
    }
}

impl<T> Walk for &mut T
where
    T: Walk + ?Sized,
{
    fn walk<V: Visitor + ?Sized>(&mut self, field: &str, visitor: &mut V) {
        (**self).walk(field, visitor);
    }

    fn is_absent(&self) -> bool {
        (**self).is_absent()
    }
}

// =============================================================================
// Sequences
// =============================================================================

impl<T> Walk for [T]
where
    T: Walk,
{
    fn walk<V: Visitor + ?Sized>(&mut self, field: &str, visitor: &mut V) {
        for item in self {
            item.walk(field, visitor);
        }
    }
}

impl<T, const N: usize> Walk for [T; N]
where
    T: Walk,
{
    fn walk<V: Visitor + ?Sized>(&mut self, field: &str, visitor: &mut V) {
        self.as_mut_slice().walk(field, visitor);
    }
}

impl<T> Walk for Vec<T>
where
    T: Walk,
{
    fn walk<V: Visitor + ?Sized>(&mut self, field: &str, visitor: &mut V) {
        self.as_mut_slice().walk(field, visitor);
    }
}

impl<T> Walk for VecDeque<T>
where
    T: Walk,
{
    fn walk<V: Visitor + ?Sized>(&mut self, field: &str, visitor: &mut V) {
        for item in self {
            item.walk(field, visitor);
        }
    }
}

// =============================================================================
// Keyed maps (string keys, dynamically typed values)
// =============================================================================

/// Applies the keyed-map rules to a set of entries.
///
/// Keys become field names. String values are visited directly; arrays are
/// searched for nested maps, which are walked the same way. Every other value
/// shape is left untouched.
fn walk_entries<'a, I, V>(entries: I, visitor: &mut V)
where
    I: IntoIterator<Item = (&'a String, &'a mut Value)>,
    V: Visitor + ?Sized,
{
    for (key, value) in entries {
        match value {
            Value::String(text) => text.walk(key, visitor),
            Value::Array(items) => {
                for item in items {
                    if let Value::Object(nested) = item {
                        walk_entries(nested.iter_mut(), visitor);
                    }
                }
            }
            _ => {}
        }
    }
}

impl Walk for Map<String, Value> {
    fn walk<V: Visitor + ?Sized>(&mut self, _field: &str, visitor: &mut V) {
        walk_entries(self.iter_mut(), visitor);
    }
}

impl<S> Walk for HashMap<String, Value, S>
where
    S: BuildHasher,
{
    fn walk<V: Visitor + ?Sized>(&mut self, _field: &str, visitor: &mut V) {
        walk_entries(self.iter_mut(), visitor);
    }
}

impl Walk for BTreeMap<String, Value> {
    fn walk<V: Visitor + ?Sized>(&mut self, _field: &str, visitor: &mut V) {
        walk_entries(self.iter_mut(), visitor);
    }
}

/// A dynamic value takes the shape it currently holds: a string, a sequence,
/// or a keyed map.
impl Walk for Value {
    fn walk<V: Visitor + ?Sized>(&mut self, field: &str, visitor: &mut V) {
        match self {
            Value::String(text) => text.walk(field, visitor),
            Value::Array(items) => items.walk(field, visitor),
            Value::Object(map) => map.walk(field, visitor),
            Value::Null | Value::Bool(_) | Value::Number(_) => {}
        }
    }

    fn is_absent(&self) -> bool {
        self.is_null()
    }
}
