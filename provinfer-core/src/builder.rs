//! Builders for describing user types.

use crate::{
    Annotated, Capabilities, Describe, EnumInfo, EnumValue, FieldInfo, Kind, MethodInfo,
    ResourceCapability, TypeInfo, short_type_name,
};

impl TypeInfo {
    /// Start describing a struct. The declared name is taken from the type path.
    pub fn structure<T: 'static>() -> StructBuilder {
        StructBuilder {
            info: TypeInfo::new::<T>(Kind::Opaque)
                .with_name(short_type_name(std::any::type_name::<T>())),
            fields: Vec::new(),
            capabilities: Capabilities::default(),
        }
    }

    /// Start describing an enumeration whose values have the shape of `Base`.
    pub fn enumeration<T: 'static, Base: Describe>() -> EnumBuilder {
        let base = Base::describe();
        EnumBuilder {
            info: TypeInfo::new::<T>(base.kind().clone())
                .with_name(short_type_name(std::any::type_name::<T>())),
            capabilities: Capabilities {
                enumeration: Some(EnumInfo::default()),
                ..Default::default()
            },
        }
    }

    /// Describe a deferred output wrapper carrying values of type `E`.
    pub fn output<T: 'static, E: Describe>() -> TypeInfo {
        TypeInfo::new::<T>(Kind::Opaque)
            .with_name(short_type_name(std::any::type_name::<T>()))
            .with_capabilities(Capabilities {
                output: Some(E::describe),
                ..Default::default()
            })
    }

    /// Start describing an input wrapper, convertible to an output.
    pub fn input<T: 'static>() -> InputBuilder {
        InputBuilder {
            info: TypeInfo::new::<T>(Kind::Opaque)
                .with_name(short_type_name(std::any::type_name::<T>())),
            capabilities: Capabilities {
                input: true,
                ..Default::default()
            },
        }
    }
}

/// Builder for struct descriptors.
#[derive(Debug)]
pub struct StructBuilder {
    info: TypeInfo,
    fields: Vec<FieldInfo>,
    capabilities: Capabilities,
}

impl StructBuilder {
    /// Add a field with its tag text (see [`FieldTag`](crate::FieldTag)).
    pub fn field<F: Describe>(mut self, name: &'static str, tag: &'static str) -> Self {
        self.fields.push(FieldInfo {
            name,
            tag,
            ty: F::describe,
        });
        self
    }

    /// Override the declared name.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.info = self.info.with_name(name);
        self
    }

    /// Mark the struct as anonymous; anonymous structs have no token.
    pub fn anonymous(mut self) -> Self {
        self.info = self.info.without_name();
        self
    }

    /// Use `A`'s annotations as this type's metadata.
    pub fn annotated<A: Annotated>(mut self) -> Self {
        self.capabilities.annotate = Some(A::annotate);
        self
    }

    /// Mark the struct as a resource or component of this provider.
    pub fn resource(mut self) -> Self {
        self.capabilities.resource = Some(ResourceCapability::Local);
        self
    }

    /// Mark the struct as a resource defined by another package.
    pub fn foreign_resource(mut self) -> Self {
        self.capabilities.resource = Some(ResourceCapability::Foreign);
        self
    }

    /// Mark the struct as a deferred output carrying values of type `E`.
    pub fn output<E: Describe>(mut self) -> Self {
        self.capabilities.output = Some(E::describe);
        self
    }

    pub fn build(self) -> TypeInfo {
        TypeInfo::new_like(self.info, Kind::Struct(self.fields), self.capabilities)
    }
}

/// Builder for enumeration descriptors.
#[derive(Debug)]
pub struct EnumBuilder {
    info: TypeInfo,
    capabilities: Capabilities,
}

impl EnumBuilder {
    /// Add a member.
    pub fn value(self, name: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.push(name.into(), value.into(), None)
    }

    /// Add a member with a description.
    pub fn described_value(
        self,
        name: impl Into<String>,
        value: impl Into<serde_json::Value>,
        description: impl Into<String>,
    ) -> Self {
        self.push(name.into(), value.into(), Some(description.into()))
    }

    fn push(
        mut self,
        name: String,
        value: serde_json::Value,
        description: Option<String>,
    ) -> Self {
        if let Some(info) = self.capabilities.enumeration.as_mut() {
            info.values.push(EnumValue {
                name,
                value,
                description,
            });
        }
        self
    }

    pub fn annotated<A: Annotated>(mut self) -> Self {
        self.capabilities.annotate = Some(A::annotate);
        self
    }

    pub fn build(self) -> TypeInfo {
        self.info.with_capabilities(self.capabilities)
    }
}

/// Builder for input wrapper descriptors.
#[derive(Debug)]
pub struct InputBuilder {
    info: TypeInfo,
    capabilities: Capabilities,
}

impl InputBuilder {
    /// Declare a conversion method returning `R`, e.g. `ToStringOutput`.
    pub fn method<R: Describe>(mut self, name: impl Into<String>) -> Self {
        self.capabilities.methods.push(MethodInfo {
            name: name.into(),
            returns: R::describe,
        });
        self
    }

    pub fn build(self) -> TypeInfo {
        self.info.with_capabilities(self.capabilities)
    }
}

impl TypeInfo {
    fn without_name(mut self) -> Self {
        self.name = None;
        self
    }

    fn new_like(info: TypeInfo, kind: Kind, capabilities: Capabilities) -> Self {
        TypeInfo {
            kind,
            capabilities,
            ..info
        }
    }
}
