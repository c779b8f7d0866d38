//! Error taxonomy and multi-error aggregation.
//!
//! Inference never stops at the first defect. Field-level failures are
//! recorded and the walk continues, so a single run reports every problem
//! across a resource's input and output types.

use std::{error::Error as StdError, fmt};

use miette::Diagnostic;
use provinfer_core::TagError;
use thiserror::Error;

/// A single defect found while inferring a schema.
#[derive(Debug, Clone, Error, Diagnostic)]
pub enum InferError {
    #[error("unsupported type '{ty}' of kind {kind}")]
    #[diagnostic(
        code(provinfer::unsupported_kind),
        help("supported kinds are bool, integers up to 64 bits, floats, strings, sequences, string-keyed maps, structs and serde_json::Value")
    )]
    UnsupportedKind { ty: String, kind: String },

    #[error("map keys must be strings, found '{key}' in '{ty}'")]
    #[diagnostic(code(provinfer::map_key))]
    MapKey { ty: String, key: String },

    #[error("invalid tag {tag:?} on field '{owner}.{field}'")]
    #[diagnostic(code(provinfer::tag_parse))]
    TagParse {
        owner: String,
        field: String,
        tag: String,
        #[source]
        source: TagError,
    },

    #[error("property '{name}' is exposed by more than one field of '{owner}'")]
    #[diagnostic(
        code(provinfer::duplicate_property),
        help("give field '{field}' a different name in its tag")
    )]
    DuplicateProperty {
        owner: String,
        field: String,
        name: String,
    },

    #[error("missing type= tag on foreign resource '{ty}'")]
    #[diagnostic(
        code(provinfer::missing_external_type),
        help("add a locator to the field tag, e.g. type=aws@6.0.0:s3:Bucket")
    )]
    MissingExternalType { ty: String },

    #[error("invalid type= tag {locator:?}: {reason}")]
    #[diagnostic(
        code(provinfer::malformed_external_type),
        help("locators have the form package@version:module:name")
    )]
    MalformedExternalType { locator: String, reason: String },

    #[error("'{ty}' is an input type, but {reason}")]
    #[diagnostic(code(provinfer::input_contract))]
    InputContract { ty: String, reason: String },

    #[error("return type '{returns}' of method {method} on '{ty}' is not an output type")]
    #[diagnostic(code(provinfer::output_contract))]
    OutputContract {
        ty: String,
        method: String,
        returns: String,
    },

    #[error("cannot resolve a token for '{ty}': {reason}")]
    #[diagnostic(code(provinfer::token_resolution))]
    TokenResolution { ty: String, reason: String },

    #[error("invalid type '{ty}' on '{owner}.{field}'")]
    #[diagnostic(code(provinfer::field))]
    InField {
        owner: String,
        field: String,
        ty: String,
        #[source]
        source: Box<InferError>,
    },

    #[error("could not infer {role} '{ty}'")]
    #[diagnostic(code(provinfer::type_context))]
    InType {
        role: String,
        ty: String,
        #[source]
        source: Box<InferError>,
    },
}

impl InferError {
    pub fn token_resolution(ty: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::TokenResolution {
            ty: ty.into(),
            reason: reason.into(),
        }
    }

    pub fn malformed_external_type(locator: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedExternalType {
            locator: locator.into(),
            reason: reason.into(),
        }
    }

    pub fn input_contract(ty: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InputContract {
            ty: ty.into(),
            reason: reason.into(),
        }
    }

    /// Attach the field an error was found on.
    pub fn in_field(
        self,
        owner: impl Into<String>,
        field: impl Into<String>,
        ty: impl Into<String>,
    ) -> Self {
        Self::InField {
            owner: owner.into(),
            field: field.into(),
            ty: ty.into(),
            source: Box::new(self),
        }
    }

    /// Attach the role ("input type", "output type", ...) of the type being inferred.
    pub fn in_type(self, role: impl Into<String>, ty: impl Into<String>) -> Self {
        Self::InType {
            role: role.into(),
            ty: ty.into(),
            source: Box::new(self),
        }
    }

    /// The innermost defect, with field and type context stripped.
    pub fn root(&self) -> &InferError {
        match self {
            InferError::InField { source, .. } | InferError::InType { source, .. } => source.root(),
            other => other,
        }
    }

    /// The error message followed by the messages of all its sources.
    pub fn full_message(&self) -> String {
        let mut message = self.to_string();
        let mut source = StdError::source(self);
        while let Some(err) = source {
            message.push_str(": ");
            message.push_str(&err.to_string());
            source = err.source();
        }
        message
    }
}

/// Every defect found during one inference run.
#[derive(Debug, Clone, Default, Diagnostic)]
#[diagnostic(code(provinfer::schema_errors))]
pub struct SchemaErrors {
    #[related]
    errors: Vec<InferError>,
}

impl SchemaErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: InferError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &InferError> {
        self.errors.iter()
    }

    /// Wrap every error with the role of the type it was found in.
    pub fn in_type(self, role: &str, ty: &str) -> Self {
        self.errors
            .into_iter()
            .map(|e| e.in_type(role, ty))
            .collect()
    }

    /// `Ok(value)` when no errors were recorded.
    pub fn into_result<T>(self, value: T) -> Result<T, SchemaErrors> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl fmt::Display for SchemaErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.errors.len() {
            0 => return write!(f, "no errors"),
            1 => write!(f, "1 error occurred:")?,
            n => write!(f, "{} errors occurred:", n)?,
        }
        for error in &self.errors {
            write!(f, "\n\t* {}", error.full_message())?;
        }
        Ok(())
    }
}

impl StdError for SchemaErrors {}

impl From<InferError> for SchemaErrors {
    fn from(error: InferError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

impl Extend<InferError> for SchemaErrors {
    fn extend<I: IntoIterator<Item = InferError>>(&mut self, iter: I) {
        self.errors.extend(iter);
    }
}

impl FromIterator<InferError> for SchemaErrors {
    fn from_iter<I: IntoIterator<Item = InferError>>(iter: I) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for SchemaErrors {
    type Item = InferError;
    type IntoIter = std::vec::IntoIter<InferError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

/// A value produced by inference together with every defect found on the way.
///
/// The value holds whatever could be inferred; parts that failed are left
/// empty rather than suppressing the parts that succeeded.
#[derive(Debug, Clone)]
pub struct Assembly<T> {
    pub value: T,
    pub errors: SchemaErrors,
}

impl<T> Assembly<T> {
    pub fn new(value: T, errors: SchemaErrors) -> Self {
        Self { value, errors }
    }

    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_result(self) -> Result<T, SchemaErrors> {
        self.errors.into_result(self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map_key_error() -> InferError {
        InferError::MapKey {
            ty: "std::collections::HashMap<i32, String>".to_string(),
            key: "i32".to_string(),
        }
    }

    #[test]
    fn test_root_strips_context() {
        let err = map_key_error()
            .in_field("Args", "labels", "HashMap<i32, String>")
            .in_type("input type", "Args");
        assert!(matches!(err.root(), InferError::MapKey { .. }));
    }

    #[test]
    fn test_full_message_includes_sources() {
        let err = map_key_error().in_field("Args", "labels", "HashMap<i32, String>");
        assert_eq!(
            err.full_message(),
            "invalid type 'HashMap<i32, String>' on 'Args.labels': map keys must be strings, found 'i32' in 'std::collections::HashMap<i32, String>'"
        );
    }

    #[test]
    fn test_schema_errors_display() {
        let mut errors = SchemaErrors::new();
        assert_eq!(errors.to_string(), "no errors");

        errors.push(InferError::MissingExternalType {
            ty: "Bucket".to_string(),
        });
        errors.push(InferError::token_resolution("Node", "anonymous types have no token"));
        assert_eq!(
            errors.to_string(),
            "2 errors occurred:\n\t* missing type= tag on foreign resource 'Bucket'\n\t* cannot resolve a token for 'Node': anonymous types have no token"
        );
    }

    #[test]
    fn test_into_result() {
        assert_eq!(SchemaErrors::new().into_result(7).unwrap(), 7);
        let errors: SchemaErrors = std::iter::once(map_key_error()).collect();
        assert_eq!(errors.into_result(7).unwrap_err().len(), 1);
    }

    #[test]
    fn test_in_type_wraps_each_error() {
        let errors: SchemaErrors = vec![map_key_error(), map_key_error()].into_iter().collect();
        let wrapped = errors.in_type("output type", "BucketState");
        assert_eq!(wrapped.len(), 2);
        assert!(
            wrapped
                .iter()
                .all(|e| matches!(e, InferError::InType { role, .. } if role == "output type"))
        );
    }
}
