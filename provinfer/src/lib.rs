//! Infer provider schemas from annotated Rust types.
//!
//! Resources, components and functions are declared as ordinary Rust types
//! described through [`provinfer_core::Describe`]. This crate walks those
//! descriptions and produces the declarative package schema consumed by
//! schema publication and client code generation.
//!
//! # Module Organization
//!
//! - [`wrapper`] - Input and output wrapper resolution
//! - [`token`] - Classification of named types into references
//! - [`walker`] - Type to schema type translation
//! - [`fields`] - Struct fields to schema properties
//! - [`assemble`] - Resource, function and type schemas
//! - [`package`] - Whole-package schemas and schema output
//! - [`registry`] - Token assignment shared by a run
//! - [`testing`] - Wrapper fixtures (feature-gated)
//!
//! Inference reports every defect it finds instead of stopping at the
//! first one; see [`Assembly`] and [`SchemaErrors`].

pub mod assemble;
mod error;
pub mod fields;
mod options;
pub mod package;
mod provider;
pub mod registry;
pub mod token;
pub mod walker;
pub mod wrapper;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use assemble::SchemaAssembler;
pub use error::{Assembly, InferError, SchemaErrors};
pub use fields::{FieldCollector, PropertyList};
pub use options::InferOptions;
pub use package::{PackageBuilder, write_schema};
pub use provider::{ProviderComponent, ProviderFunction, ProviderResource};
pub use registry::{RegisteredType, TokenRegistry, TypeRegistry};
pub use token::{Classification, TokenResolver, parse_external_locator};
pub use walker::TypeWalker;
pub use wrapper::{Unwrapped, resolve_wrapper};
