//! Type-level metadata: descriptions, defaults and token overrides.

use std::collections::HashMap;

use crate::TypeInfo;

/// Overrides the module and name part of a type's token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenOverride {
    pub module: String,
    pub name: String,
}

/// Metadata a type supplies about itself, keyed by exposed property name.
///
/// The empty key holds the description of the type as a whole.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeMetadata {
    pub descriptions: HashMap<String, String>,
    pub defaults: HashMap<String, serde_json::Value>,
    pub default_envs: HashMap<String, Vec<String>>,
    pub token: Option<TokenOverride>,
}

impl TypeMetadata {
    /// Run the type's self-registration hook, or return empty metadata when
    /// it has none.
    pub fn collect(info: &TypeInfo) -> Self {
        let Some(annotate) = info.pointee().capabilities().annotate else {
            return Self::default();
        };
        let mut annotator = Annotator::default();
        annotate(&mut annotator);
        annotator.finish()
    }

    /// Description of the whole type.
    pub fn type_description(&self) -> Option<&str> {
        self.description("")
    }

    /// Description of a property; empty descriptions count as absent.
    pub fn description(&self, name: &str) -> Option<&str> {
        self.descriptions
            .get(name)
            .map(String::as_str)
            .filter(|d| !d.is_empty())
    }

    pub fn default_value(&self, name: &str) -> Option<&serde_json::Value> {
        self.defaults.get(name)
    }

    pub fn default_env(&self, name: &str) -> &[String] {
        self.default_envs
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// Collects metadata from a type's [`Annotated::annotate`] hook.
#[derive(Debug, Default)]
pub struct Annotator {
    metadata: TypeMetadata,
}

impl Annotator {
    /// Describe the type as a whole.
    pub fn describe_type(&mut self, description: impl Into<String>) -> &mut Self {
        self.describe("", description)
    }

    /// Describe the property exposed as `name`.
    pub fn describe(&mut self, name: impl Into<String>, description: impl Into<String>) -> &mut Self {
        self.metadata
            .descriptions
            .insert(name.into(), description.into());
        self
    }

    /// Set the default value of the property exposed as `name`.
    pub fn set_default(
        &mut self,
        name: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> &mut Self {
        self.metadata.defaults.insert(name.into(), value.into());
        self
    }

    /// Append environment variables that supply a default for `name`.
    pub fn set_default_env<I, S>(&mut self, name: impl Into<String>, envs: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.metadata
            .default_envs
            .entry(name.into())
            .or_default()
            .extend(envs.into_iter().map(Into::into));
        self
    }

    /// Publish the type under `module:name` instead of the derived token.
    pub fn set_token(&mut self, module: impl Into<String>, name: impl Into<String>) -> &mut Self {
        self.metadata.token = Some(TokenOverride {
            module: module.into(),
            name: name.into(),
        });
        self
    }

    pub fn finish(self) -> TypeMetadata {
        self.metadata
    }
}

/// A type that annotates itself with descriptions, defaults or a token.
pub trait Annotated {
    fn annotate(a: &mut Annotator);
}
