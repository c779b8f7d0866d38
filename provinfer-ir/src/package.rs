//! Resource, function, type and package level schema descriptions.

use std::collections::BTreeMap;

use serde::{Serialize, Serializer, ser::SerializeMap};

use crate::{PrimitiveKind, PropertyMap, serde_helpers::is_false};

/// Schema of a resource or component.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceSchema {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "properties", skip_serializing_if = "PropertyMap::is_empty")]
    pub output_properties: PropertyMap,
    #[serde(rename = "required", skip_serializing_if = "Vec::is_empty")]
    pub required_outputs: Vec<String>,
    #[serde(skip_serializing_if = "PropertyMap::is_empty")]
    pub input_properties: PropertyMap,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required_inputs: Vec<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub is_component: bool,
}

/// Schema of a structured (object) type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectTypeSpec {
    pub description: Option<String>,
    pub properties: PropertyMap,
    pub required: Vec<String>,
}

impl Serialize for ObjectTypeSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", "object")?;
        if let Some(description) = &self.description {
            map.serialize_entry("description", description)?;
        }
        if !self.properties.is_empty() {
            map.serialize_entry("properties", &self.properties)?;
        }
        if !self.required.is_empty() {
            map.serialize_entry("required", &self.required)?;
        }
        map.end()
    }
}

/// One member of an enumeration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumValueSpec {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub value: serde_json::Value,
}

/// Schema of an enumeration over a primitive base type.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumTypeSpec {
    pub description: Option<String>,
    pub base: PrimitiveKind,
    pub values: Vec<EnumValueSpec>,
}

impl Serialize for EnumTypeSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", self.base.as_str())?;
        if let Some(description) = &self.description {
            map.serialize_entry("description", description)?;
        }
        map.serialize_entry("enum", &self.values)?;
        map.end()
    }
}

/// An entry of the package `types` section.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TypeDefinition {
    Object(ObjectTypeSpec),
    Enum(EnumTypeSpec),
}

/// Schema of a provider function (invoke).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FunctionSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inputs: Option<ObjectTypeSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outputs: Option<ObjectTypeSpec>,
}

/// The complete schema of a provider package.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageSpec {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub resources: BTreeMap<String, ResourceSchema>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub functions: BTreeMap<String, FunctionSpec>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub types: BTreeMap<String, TypeDefinition>,
}

impl PackageSpec {
    /// Render the package as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
