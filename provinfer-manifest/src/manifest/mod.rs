//! Manifest types and parsing for provinfer.toml files.

mod parse;
mod validate;

pub use parse::parse_manifest;
use serde::Deserialize;
pub use validate::ParseContext;

/// Root manifest for provinfer.toml
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Package metadata
    pub provider: ProviderConfig,

    /// Inference settings
    #[serde(default)]
    pub infer: InferConfig,
}

/// Provider package metadata, published at the top of the schema.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct ProviderConfig {
    /// Package name, used as the first segment of every token
    pub name: String,
    pub version: Option<String>,
    pub display_name: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub homepage: Option<String>,
    pub repository: Option<String>,
    pub publisher: Option<String>,
    pub license: Option<String>,
}

/// Settings that tune inference.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct InferConfig {
    /// Accept foreign resource fields without a `type=` locator
    #[serde(default)]
    pub allow_missing_external_types: bool,

    /// Module for types declared at the crate root
    #[serde(default = "default_module")]
    pub default_module: String,
}

impl Default for InferConfig {
    fn default() -> Self {
        Self {
            allow_missing_external_types: false,
            default_module: default_module(),
        }
    }
}

fn default_module() -> String {
    "index".to_string()
}
