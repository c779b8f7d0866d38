//! Type references: tokens, primitive kinds and `TypeSpec`.

use std::fmt;

use serde::{Serialize, Serializer, ser::SerializeMap};

/// Reference used for properties that accept any value.
pub const ANY_REF: &str = "pulumi.json#/Any";

/// Package-qualified identifier of a structured type, enum, resource or
/// component, rendered as `package:module:name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Token {
    pub package: String,
    pub module: String,
    pub name: String,
}

impl Token {
    pub fn new(
        package: impl Into<String>,
        module: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            package: package.into(),
            module: module.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.package, self.module, self.name)
    }
}

impl Serialize for Token {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Where a referenced resource is defined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceLocator {
    /// A resource or component defined in the package being described.
    Local(Token),
    /// A resource defined by another published package.
    External {
        package: String,
        version: String,
        token: Token,
    },
}

impl ResourceLocator {
    /// The `$ref` string for this resource.
    pub fn reference(&self) -> String {
        match self {
            ResourceLocator::Local(token) => format!("#/resources/{}", token),
            ResourceLocator::External {
                package,
                version,
                token,
            } => format!("/{}/{}/schema.json#/resources/{}", package, version, token),
        }
    }
}

/// Primitive schema types. All integer widths unify into `Integer`, all
/// floating point widths into `Number`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Boolean,
    Integer,
    Number,
    String,
}

impl PrimitiveKind {
    /// Get the schema type name.
    pub fn as_str(&self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Integer => "integer",
            PrimitiveKind::Number => "number",
            PrimitiveKind::String => "string",
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The shape of a schema type.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeKind {
    Primitive(PrimitiveKind),
    Array(Box<TypeSpec>),
    /// A string-keyed map; the payload is the value type.
    Map(Box<TypeSpec>),
    /// A structured type published in the `types` section.
    Ref(Token),
    /// An enumeration published in the `types` section.
    EnumRef(Token),
    ResourceRef(ResourceLocator),
    Any,
}

/// A schema type together with its `plain` flag.
///
/// `plain` marks a value that is available immediately rather than resolved
/// later; it is only ever set on primitives and containers.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeSpec {
    pub kind: TypeKind,
    pub plain: bool,
}

impl TypeSpec {
    pub fn primitive(kind: PrimitiveKind, plain: bool) -> Self {
        Self {
            kind: TypeKind::Primitive(kind),
            plain,
        }
    }

    pub fn array(items: TypeSpec, plain: bool) -> Self {
        Self {
            kind: TypeKind::Array(Box::new(items)),
            plain,
        }
    }

    pub fn map(values: TypeSpec, plain: bool) -> Self {
        Self {
            kind: TypeKind::Map(Box::new(values)),
            plain,
        }
    }

    pub fn reference(token: Token) -> Self {
        Self {
            kind: TypeKind::Ref(token),
            plain: false,
        }
    }

    pub fn enum_reference(token: Token) -> Self {
        Self {
            kind: TypeKind::EnumRef(token),
            plain: false,
        }
    }

    pub fn resource(locator: ResourceLocator) -> Self {
        Self {
            kind: TypeKind::ResourceRef(locator),
            plain: false,
        }
    }

    pub fn any() -> Self {
        Self {
            kind: TypeKind::Any,
            plain: false,
        }
    }

    /// The `$ref` target of this type, if it is a reference.
    pub fn reference_target(&self) -> Option<String> {
        match &self.kind {
            TypeKind::Ref(token) | TypeKind::EnumRef(token) => Some(format!("#/types/{}", token)),
            TypeKind::ResourceRef(locator) => Some(locator.reference()),
            TypeKind::Any => Some(ANY_REF.to_string()),
            TypeKind::Primitive(_) | TypeKind::Array(_) | TypeKind::Map(_) => None,
        }
    }

    /// Visit every type token (`Ref` and `EnumRef`) reachable from this spec.
    pub fn type_tokens(&self) -> Vec<&Token> {
        match &self.kind {
            TypeKind::Ref(token) | TypeKind::EnumRef(token) => vec![token],
            TypeKind::Array(inner) | TypeKind::Map(inner) => inner.type_tokens(),
            TypeKind::Primitive(_) | TypeKind::ResourceRef(_) | TypeKind::Any => Vec::new(),
        }
    }
}

impl Serialize for TypeSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        match &self.kind {
            TypeKind::Primitive(kind) => map.serialize_entry("type", kind.as_str())?,
            TypeKind::Array(items) => {
                map.serialize_entry("type", "array")?;
                map.serialize_entry("items", items)?;
            }
            TypeKind::Map(values) => {
                map.serialize_entry("type", "object")?;
                map.serialize_entry("additionalProperties", values)?;
            }
            TypeKind::Ref(_) | TypeKind::EnumRef(_) | TypeKind::ResourceRef(_) | TypeKind::Any => {
                if let Some(target) = self.reference_target() {
                    map.serialize_entry("$ref", &target)?;
                }
            }
        }
        if self.plain {
            map.serialize_entry("plain", &true)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn token() -> Token {
        Token::new("aws", "s3", "Bucket")
    }

    #[test]
    fn test_token_display() {
        assert_eq!(token().to_string(), "aws:s3:Bucket");
    }

    #[test]
    fn test_resource_locator_reference() {
        assert_eq!(
            ResourceLocator::Local(token()).reference(),
            "#/resources/aws:s3:Bucket"
        );
        let external = ResourceLocator::External {
            package: "aws".to_string(),
            version: "6.0.0".to_string(),
            token: token(),
        };
        assert_eq!(
            external.reference(),
            "/aws/6.0.0/schema.json#/resources/aws:s3:Bucket"
        );
    }

    #[test]
    fn test_primitive_serialization() {
        let spec = TypeSpec::primitive(PrimitiveKind::String, false);
        assert_eq!(serde_json::to_value(&spec).unwrap(), json!({"type": "string"}));

        let plain = TypeSpec::primitive(PrimitiveKind::Integer, true);
        assert_eq!(
            serde_json::to_value(&plain).unwrap(),
            json!({"type": "integer", "plain": true})
        );
    }

    #[test]
    fn test_container_serialization() {
        let spec = TypeSpec::map(
            TypeSpec::array(TypeSpec::primitive(PrimitiveKind::Boolean, false), false),
            true,
        );
        assert_eq!(
            serde_json::to_value(&spec).unwrap(),
            json!({
                "type": "object",
                "additionalProperties": {"type": "array", "items": {"type": "boolean"}},
                "plain": true
            })
        );
    }

    #[test]
    fn test_reference_serialization() {
        assert_eq!(
            serde_json::to_value(TypeSpec::reference(token())).unwrap(),
            json!({"$ref": "#/types/aws:s3:Bucket"})
        );
        assert_eq!(
            serde_json::to_value(TypeSpec::any()).unwrap(),
            json!({"$ref": "pulumi.json#/Any"})
        );
    }

    #[test]
    fn test_type_tokens() {
        let nested = TypeSpec::array(TypeSpec::enum_reference(token()), false);
        assert_eq!(nested.type_tokens(), vec![&token()]);
        assert!(TypeSpec::resource(ResourceLocator::Local(token()))
            .type_tokens()
            .is_empty());
    }
}
