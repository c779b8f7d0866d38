//! Validation context and utilities for manifest parsing.

use std::sync::Arc;

use miette::SourceSpan;

use crate::{Result, error::SourceContext};

/// Parsing and validation context that carries source information.
#[derive(Debug, Clone)]
pub struct ParseContext {
    /// Source context for error reporting
    source: Arc<SourceContext>,
}

impl ParseContext {
    /// Create a new parse context with the given source and filename.
    pub fn new(src: &str, filename: &str) -> Self {
        Self {
            source: Arc::new(SourceContext::new(src, filename)),
        }
    }

    /// Get the source context for error creation.
    pub fn source_context(&self) -> &SourceContext {
        &self.source
    }

    /// Validate the package name.
    ///
    /// Package names become the first segment of every token, so they are
    /// restricted to lowercase letters, digits and single dashes.
    pub fn validate_package_name(&self, name: &str) -> Result<()> {
        match validate_package_name(name) {
            None => Ok(()),
            Some(reason) => Err(self.source.invalid_name_error(
                name,
                "package name",
                reason,
                find_value_span(self.source.src(), name),
            )),
        }
    }

    /// Validate a token module name.
    pub fn validate_module(&self, module: &str) -> Result<()> {
        match validate_module(module) {
            None => Ok(()),
            Some(reason) => Err(self.source.invalid_name_error(
                module,
                "module name",
                reason,
                find_value_span(self.source.src(), module),
            )),
        }
    }
}

/// Find the span of a string value in the TOML source.
/// Searches for `= "value"` or `= 'value'`.
pub(crate) fn find_value_span(src: &str, value: &str) -> Option<SourceSpan> {
    for quote in ['"', '\''] {
        for pattern in [
            format!("= {quote}{value}{quote}"),
            format!("={quote}{value}{quote}"),
        ] {
            if let Some(pos) = src.find(&pattern) {
                // Skip up to and including the opening quote
                let start = pos + pattern.len() - value.len() - 1;
                return Some(SourceSpan::from((start, value.len())));
            }
        }
    }

    // No fallback - better to have no span than point to wrong location
    None
}

/// Returns None if valid, Some(reason) if invalid.
pub(crate) fn validate_package_name(name: &str) -> Option<&'static str> {
    let mut chars = name.chars();

    match chars.next() {
        Some(c) if c.is_ascii_lowercase() => {}
        Some(_) => return Some("package names must start with a lowercase letter"),
        None => return Some("package name cannot be empty"),
    }

    let mut prev_was_dash = false;
    for c in chars {
        if c == '-' {
            if prev_was_dash {
                return Some("package names cannot contain consecutive dashes");
            }
            prev_was_dash = true;
        } else if c.is_ascii_lowercase() || c.is_ascii_digit() {
            prev_was_dash = false;
        } else {
            return Some("package names may only contain lowercase letters, digits, and dashes");
        }
    }

    if prev_was_dash {
        return Some("package names cannot end with a dash");
    }

    None
}

/// Returns None if valid, Some(reason) if invalid.
pub(crate) fn validate_module(module: &str) -> Option<&'static str> {
    if module.is_empty() {
        return Some("module name cannot be empty");
    }
    if module.chars().any(|c| c == ':' || c.is_whitespace()) {
        return Some("module names cannot contain ':' or whitespace");
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_package_names() {
        assert!(validate_package_name("aws").is_none());
        assert!(validate_package_name("aws-native").is_none());
        assert!(validate_package_name("k8s").is_none());
    }

    #[test]
    fn test_invalid_package_names() {
        assert!(validate_package_name("").is_some());
        assert!(validate_package_name("Aws").is_some());
        assert!(validate_package_name("1aws").is_some());
        assert!(validate_package_name("aws_native").is_some());
        assert!(validate_package_name("aws--native").is_some());
        assert!(validate_package_name("aws-").is_some());
    }

    #[test]
    fn test_validate_module() {
        assert!(validate_module("index").is_none());
        assert!(validate_module("s3/v2").is_none());
        assert!(validate_module("").is_some());
        assert!(validate_module("a:b").is_some());
        assert!(validate_module("a b").is_some());
    }

    #[test]
    fn test_find_value_span() {
        let src = "[provider]\nname = \"Bad_Name\"\n";
        let span = find_value_span(src, "Bad_Name").expect("span");
        assert_eq!(span.offset(), src.find("Bad_Name").unwrap());
        assert_eq!(span.len(), "Bad_Name".len());
    }

    #[test]
    fn test_find_value_span_single_quotes() {
        let src = "[infer]\ndefault-module='a:b'\n";
        let span = find_value_span(src, "a:b").expect("span");
        assert_eq!(span.offset(), src.find("a:b").unwrap());
    }

    #[test]
    fn test_find_value_span_missing() {
        assert!(find_value_span("[provider]\n", "random").is_none());
    }
}
