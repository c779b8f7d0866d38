//! Inference settings.

use provinfer_manifest::Manifest;

/// Settings shared by every stage of one inference run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferOptions {
    /// First segment of every token this run produces.
    pub package: String,
    /// Module used for types declared at a crate root.
    pub default_module: String,
    /// Treat foreign resource fields without a `type=` locator as `Any`
    /// instead of failing.
    pub allow_missing_external_types: bool,
}

impl InferOptions {
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            ..Default::default()
        }
    }

    /// Settings from the `[provider]` and `[infer]` tables of a manifest.
    pub fn from_manifest(manifest: &Manifest) -> Self {
        Self {
            package: manifest.provider.name.clone(),
            default_module: manifest.infer.default_module.clone(),
            allow_missing_external_types: manifest.infer.allow_missing_external_types,
        }
    }

    pub fn with_default_module(mut self, module: impl Into<String>) -> Self {
        self.default_module = module.into();
        self
    }

    pub fn allow_missing_external_types(mut self, allow: bool) -> Self {
        self.allow_missing_external_types = allow;
        self
    }
}

impl Default for InferOptions {
    fn default() -> Self {
        Self {
            package: "pkg".to_string(),
            default_module: "index".to_string(),
            allow_missing_external_types: false,
        }
    }
}
