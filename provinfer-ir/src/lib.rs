//! Schema description types for provinfer.
//!
//! This crate provides the serializable output of the inference engine: the
//! declarative, cross-referenceable description of a provider's resources,
//! functions and shared types, consumed by schema publication and client
//! code generation tooling.
//!
//! # Architecture
//!
//! ```text
//! Rust types (Describe) → provinfer (inference) → provinfer-ir (schema) → JSON
//! ```
//!
//! The IR types are designed to be:
//! - Language-agnostic (no Rust-specific concerns leak into the output)
//! - Stable to serialize (ordered property maps, sorted package sections)
//! - Self-contained (only serde and indexmap)

mod package;
mod property;
mod serde_helpers;
mod types;

pub use package::{
    EnumTypeSpec, EnumValueSpec, FunctionSpec, ObjectTypeSpec, PackageSpec, ResourceSchema,
    TypeDefinition,
};
pub use property::{DefaultSpec, PropertyMap, PropertySpec};
pub use types::{ANY_REF, PrimitiveKind, ResourceLocator, Token, TypeKind, TypeSpec};
