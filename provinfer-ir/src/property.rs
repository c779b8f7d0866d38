//! Property descriptions.

use indexmap::IndexMap;
use serde::Serialize;

use crate::{TypeSpec, serde_helpers::is_false};

/// Properties keyed by exposed name, in field declaration order.
pub type PropertyMap = IndexMap<String, PropertySpec>;

/// Description of a single property of a resource, function or type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertySpec {
    #[serde(flatten)]
    pub type_spec: TypeSpec,
    #[serde(skip_serializing_if = "is_false")]
    pub secret: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub replace_on_changes: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_info: Option<DefaultSpec>,
}

impl PropertySpec {
    /// A property with no flags or metadata.
    pub fn new(type_spec: TypeSpec) -> Self {
        Self {
            type_spec,
            secret: false,
            replace_on_changes: false,
            description: None,
            default: None,
            default_info: None,
        }
    }
}

/// Where a property's default value may come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DefaultSpec {
    /// Environment variables, checked in order.
    pub environment: Vec<String>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::PrimitiveKind;

    #[test]
    fn test_minimal_property_serialization() {
        let prop = PropertySpec::new(TypeSpec::primitive(PrimitiveKind::String, false));
        assert_eq!(serde_json::to_value(&prop).unwrap(), json!({"type": "string"}));
    }

    #[test]
    fn test_full_property_serialization() {
        let prop = PropertySpec {
            secret: true,
            replace_on_changes: true,
            description: Some("The region to deploy into.".to_string()),
            default: Some(json!("us-west-2")),
            default_info: Some(DefaultSpec {
                environment: vec!["AWS_REGION".to_string(), "AWS_DEFAULT_REGION".to_string()],
            }),
            ..PropertySpec::new(TypeSpec::primitive(PrimitiveKind::String, true))
        };

        assert_eq!(
            serde_json::to_value(&prop).unwrap(),
            json!({
                "type": "string",
                "plain": true,
                "secret": true,
                "replaceOnChanges": true,
                "description": "The region to deploy into.",
                "default": "us-west-2",
                "defaultInfo": {"environment": ["AWS_REGION", "AWS_DEFAULT_REGION"]}
            })
        );
    }
}
