//! `provinfer.toml` manifest parsing and validation.
//!
//! The manifest carries the provider package metadata published alongside
//! the inferred schema, and the settings that tune inference.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod manifest;

pub use error::{Error, Result, SourceContext};
pub use manifest::{InferConfig, Manifest, ParseContext, ProviderConfig, parse_manifest};
