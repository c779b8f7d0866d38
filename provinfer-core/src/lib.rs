//! Core types for provinfer.
//!
//! This crate provides the type descriptors the inference engine walks in
//! place of runtime reflection, the per-field tag mini-language, and the
//! metadata annotations a type can attach to itself.
//!
//! Every type that takes part in a schema implements [`Describe`], usually
//! with one of the [`TypeInfo`] builders:
//!
//! ```ignore
//! impl Describe for BucketArgs {
//!     fn describe() -> TypeInfo {
//!         TypeInfo::structure::<Self>()
//!             .field::<String>("name", "name,replaceOnChanges")
//!             .field::<Option<Vec<String>>>("tags", "tags,optional")
//!             .annotated::<Self>()
//!             .build()
//!     }
//! }
//! ```

mod annotate;
mod builder;
mod describe;
mod reflect;
mod tag;
mod utils;

pub use annotate::{Annotated, Annotator, TokenOverride, TypeMetadata};
pub use builder::{EnumBuilder, InputBuilder, StructBuilder};
pub use describe::Describe;
pub use reflect::{
    Capabilities, EnumInfo, EnumValue, FieldInfo, Kind, MethodInfo, ResourceCapability, TypeInfo,
};
pub use tag::{FieldTag, TagError};
pub use utils::{short_type_name, to_camel_case, to_pascal_case, type_module};
