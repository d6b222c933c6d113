//! Type utilities for the derive macro.

/// Checks if a type can never hold a string and needs no traversal.
///
/// Returns `true` for bare primitive type names like `i32`, `bool`, `f64`, and
/// for `PhantomData<...>`. Returns `false` for qualified paths, generic types
/// other than `PhantomData`, or type aliases; those are walked through their
/// `Walk` impl instead.
pub(crate) fn is_opaque_type(ty: &syn::Type) -> bool {
    let syn::Type::Path(path) = ty else {
        return false;
    };
    if path.qself.is_some() {
        return false;
    }

    let Some(segment) = path.path.segments.last() else {
        return false;
    };

    // `PhantomData<T>` is zero-sized and carries nothing to scrub, whatever `T` is.
    if segment.ident == "PhantomData" {
        return true;
    }

    if path.path.leading_colon.is_some() || path.path.segments.len() != 1 {
        return false;
    }
    if !segment.arguments.is_empty() {
        return false;
    }

    matches!(
        segment.ident.to_string().as_str(),
        "i8" | "i16"
            | "i32"
            | "i64"
            | "i128"
            | "isize"
            | "u8"
            | "u16"
            | "u32"
            | "u64"
            | "u128"
            | "usize"
            | "f32"
            | "f64"
            | "bool"
            | "char"
    )
}
