//! Serde helpers shared by the schema types.

/// Used with `skip_serializing_if` to omit `false` flags from the output.
pub fn is_false(value: &bool) -> bool {
    !*value
}
