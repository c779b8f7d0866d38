//! The per-field tag mini-language.
//!
//! A tag is a comma separated list of segments:
//!
//! ```text
//! out,secret                    exposed as "out", secret
//! name=region,optional          exposed as "region", optional
//! replaceOnChanges              exposed under the camelCase field name
//! bucket,type=aws@6.0.0:s3:Bucket
//! internal                      never exposed
//! ```
//!
//! A bare first segment that is not a flag names the property. Recognized
//! flags are `optional`, `secret`, `replaceOnChanges` and `internal`;
//! recognized keys are `name` and `type`.

use thiserror::Error;

use crate::to_camel_case;

/// Errors from parsing tag text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagError {
    #[error("empty segment in tag")]
    EmptySegment,

    #[error("unknown tag key '{0}'")]
    UnknownKey(String),

    #[error("tag key '{0}' has no value")]
    EmptyValue(String),

    #[error("'{0}' is given more than once")]
    Duplicate(String),

    #[error("unknown tag option '{0}'")]
    UnknownOption(String),

    #[error("invalid property name '{0}'")]
    InvalidName(String),
}

/// Parsed field metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldTag {
    /// The exposed property name.
    pub name: String,
    pub optional: bool,
    pub secret: bool,
    pub replace_on_changes: bool,
    /// Excluded from the schema altogether.
    pub internal: bool,
    /// `package@version:module:name` locator for foreign resources.
    pub external_type: Option<String>,
}

impl FieldTag {
    /// Parse the tag of the field named `field`.
    pub fn parse(field: &str, tag: &str) -> Result<Self, TagError> {
        let mut parsed = FieldTag::default();
        let mut name: Option<String> = None;

        let tag = tag.trim();
        if !tag.is_empty() {
            for (index, segment) in tag.split(',').map(str::trim).enumerate() {
                if segment.is_empty() {
                    return Err(TagError::EmptySegment);
                }

                if let Some((key, value)) = segment.split_once('=') {
                    let (key, value) = (key.trim(), value.trim());
                    if value.is_empty() {
                        return Err(TagError::EmptyValue(key.to_string()));
                    }
                    match key {
                        "name" => set_once(&mut name, "name", value)?,
                        "type" => set_once(&mut parsed.external_type, "type", value)?,
                        other => return Err(TagError::UnknownKey(other.to_string())),
                    }
                    continue;
                }

                let flag = match segment {
                    "optional" => &mut parsed.optional,
                    "secret" => &mut parsed.secret,
                    "replaceOnChanges" => &mut parsed.replace_on_changes,
                    "internal" => &mut parsed.internal,
                    other if index == 0 => {
                        set_once(&mut name, "name", other)?;
                        continue;
                    }
                    other => return Err(TagError::UnknownOption(other.to_string())),
                };
                if *flag {
                    return Err(TagError::Duplicate(segment.to_string()));
                }
                *flag = true;
            }
        }

        parsed.name = match name {
            Some(name) => validate_name(name)?,
            None => to_camel_case(field),
        };
        Ok(parsed)
    }
}

fn set_once(slot: &mut Option<String>, key: &str, value: &str) -> Result<(), TagError> {
    if slot.is_some() {
        return Err(TagError::Duplicate(key.to_string()));
    }
    *slot = Some(value.to_string());
    Ok(())
}

fn validate_name(name: String) -> Result<String, TagError> {
    if name
        .chars()
        .any(|c| c.is_whitespace() || c == '=' || c == ':')
    {
        return Err(TagError::InvalidName(name));
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_name_and_flags() {
        let tag = FieldTag::parse("out", "out,secret,replaceOnChanges").unwrap();
        assert_eq!(tag.name, "out");
        assert!(tag.secret);
        assert!(tag.replace_on_changes);
        assert!(!tag.optional);
        assert!(!tag.internal);
    }

    #[test]
    fn test_name_key() {
        let tag = FieldTag::parse("output", "name=out,secret").unwrap();
        assert_eq!(tag.name, "out");
        assert!(tag.secret);
    }

    #[test]
    fn test_default_name_from_field() {
        let tag = FieldTag::parse("bucket_name", "").unwrap();
        assert_eq!(tag.name, "bucketName");

        let tag = FieldTag::parse("bucket_name", "optional").unwrap();
        assert_eq!(tag.name, "bucketName");
        assert!(tag.optional);
    }

    #[test]
    fn test_external_type() {
        let tag = FieldTag::parse("bucket", "bucket,type=aws@6.0.0:s3:Bucket").unwrap();
        assert_eq!(tag.external_type.as_deref(), Some("aws@6.0.0:s3:Bucket"));
    }

    #[test]
    fn test_internal() {
        let tag = FieldTag::parse("cache", "cache,internal").unwrap();
        assert!(tag.internal);
    }

    #[test]
    fn test_malformed_tags() {
        assert_eq!(
            FieldTag::parse("a", "a,,secret"),
            Err(TagError::EmptySegment)
        );
        assert_eq!(
            FieldTag::parse("a", "a,colour=red"),
            Err(TagError::UnknownKey("colour".to_string()))
        );
        assert_eq!(
            FieldTag::parse("a", "a,type="),
            Err(TagError::EmptyValue("type".to_string()))
        );
        assert_eq!(
            FieldTag::parse("a", "a,secret,secret"),
            Err(TagError::Duplicate("secret".to_string()))
        );
        assert_eq!(
            FieldTag::parse("a", "a,b"),
            Err(TagError::UnknownOption("b".to_string()))
        );
        assert_eq!(
            FieldTag::parse("a", "name=a,name=b"),
            Err(TagError::Duplicate("name".to_string()))
        );
        assert_eq!(
            FieldTag::parse("a", "my field"),
            Err(TagError::InvalidName("my field".to_string()))
        );
    }
}
