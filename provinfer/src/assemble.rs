//! Resource, function and type schema assembly.

use std::sync::Arc;

use provinfer_core::{Describe, Kind, TypeInfo};
use provinfer_ir::{
    EnumTypeSpec, EnumValueSpec, FunctionSpec, ObjectTypeSpec, PrimitiveKind, ResourceSchema,
    TypeDefinition,
};
use tracing::debug;

use crate::{
    Assembly, FieldCollector, InferError, InferOptions, PropertyList, ProviderComponent,
    ProviderFunction, ProviderResource, SchemaErrors, TokenRegistry, TypeRegistry, TypeWalker,
};

/// Assembles schemas from described types.
///
/// One assembler, and so one registry, is used for every member of a
/// package so that each named type keeps a single token.
#[derive(Clone)]
pub struct SchemaAssembler {
    registry: Arc<dyn TokenRegistry>,
    options: InferOptions,
}

impl SchemaAssembler {
    pub fn new(options: InferOptions) -> Self {
        let registry = Arc::new(TypeRegistry::new(options.clone()));
        Self { registry, options }
    }

    /// Use an existing registry, e.g. one shared with other assemblers.
    pub fn with_registry(options: InferOptions, registry: Arc<dyn TokenRegistry>) -> Self {
        Self { registry, options }
    }

    pub fn options(&self) -> &InferOptions {
        &self.options
    }

    pub fn registry(&self) -> &dyn TokenRegistry {
        self.registry.as_ref()
    }

    pub fn walker(&self) -> TypeWalker<'_> {
        TypeWalker::new(self.registry.as_ref(), &self.options)
    }

    pub fn collector(&self) -> FieldCollector<'_> {
        FieldCollector::new(self.registry.as_ref(), self.walker())
    }

    /// Assemble the schema of a resource from its input and output types.
    ///
    /// Both sides are always collected. A side with errors contributes no
    /// properties; the other side is kept, and every error from both is
    /// returned.
    pub fn assemble(
        &self,
        resource: &TypeInfo,
        inputs: &TypeInfo,
        outputs: &TypeInfo,
        is_component: bool,
    ) -> Assembly<ResourceSchema> {
        let metadata = self.registry.metadata(resource);
        let mut errors = SchemaErrors::new();

        let output_list = self
            .properties(outputs, is_component, "output type", &mut errors)
            .unwrap_or_default();
        let input_list = self
            .properties(inputs, is_component, "input type", &mut errors)
            .unwrap_or_default();

        debug!(
            resource = resource.path(),
            is_component,
            errors = errors.len(),
            "assembled resource schema"
        );

        let schema = ResourceSchema {
            description: metadata.type_description().map(str::to_string),
            output_properties: output_list.properties,
            required_outputs: output_list.required,
            input_properties: input_list.properties,
            required_inputs: input_list.required,
            is_component,
        };
        Assembly::new(schema, errors)
    }

    pub fn resource<R: ProviderResource>(&self) -> Assembly<ResourceSchema> {
        self.assemble(
            &R::describe(),
            &R::Inputs::describe(),
            &R::Outputs::describe(),
            false,
        )
    }

    /// Components ask for plain properties.
    pub fn component<C: ProviderComponent>(&self) -> Assembly<ResourceSchema> {
        self.assemble(
            &C::describe(),
            &C::Inputs::describe(),
            &C::Outputs::describe(),
            true,
        )
    }

    /// Assemble the schema of a function. Arguments of type `()` mean the
    /// function takes no inputs.
    pub fn function(
        &self,
        function: &TypeInfo,
        args: &TypeInfo,
        result: &TypeInfo,
    ) -> Assembly<FunctionSpec> {
        let metadata = self.registry.metadata(function);
        let mut errors = SchemaErrors::new();

        let inputs = if matches!(args.pointee().kind(), Kind::Unit) {
            None
        } else {
            self.object(args, "function arguments", &mut errors)
        };
        let outputs = self.object(result, "function result", &mut errors);

        debug!(
            function = function.path(),
            errors = errors.len(),
            "assembled function schema"
        );

        let spec = FunctionSpec {
            description: metadata.type_description().map(str::to_string),
            inputs,
            outputs,
        };
        Assembly::new(spec, errors)
    }

    pub fn typed_function<F: ProviderFunction>(&self) -> Assembly<FunctionSpec> {
        self.function(&F::describe(), &F::Args::describe(), &F::Result::describe())
    }

    /// The `types` section entry of a struct or enumeration.
    pub fn object_type(&self, ty: &TypeInfo) -> Result<TypeDefinition, SchemaErrors> {
        let ty = ty.pointee();
        if let Some(enumeration) = &ty.capabilities().enumeration {
            let base = enum_base(ty).map_err(|e| {
                SchemaErrors::from(e.in_type("enum type", display_name(ty)))
            })?;
            let metadata = self.registry.metadata(ty);
            return Ok(TypeDefinition::Enum(EnumTypeSpec {
                description: metadata.type_description().map(str::to_string),
                base,
                values: enumeration
                    .values
                    .iter()
                    .map(|v| EnumValueSpec {
                        name: v.name.clone(),
                        description: v.description.clone(),
                        value: v.value.clone(),
                    })
                    .collect(),
            }));
        }

        let mut errors = SchemaErrors::new();
        let object = self.object(ty, "object type", &mut errors);
        match object {
            Some(object) if errors.is_empty() => Ok(TypeDefinition::Object(object)),
            _ => Err(errors),
        }
    }

    fn properties(
        &self,
        ty: &TypeInfo,
        plain: bool,
        role: &str,
        errors: &mut SchemaErrors,
    ) -> Option<PropertyList> {
        let Assembly {
            value,
            errors: found,
        } = self.collector().collect(ty, plain);
        if found.is_empty() {
            Some(value)
        } else {
            errors.extend(found.in_type(role, display_name(ty)));
            None
        }
    }

    fn object(
        &self,
        ty: &TypeInfo,
        role: &str,
        errors: &mut SchemaErrors,
    ) -> Option<ObjectTypeSpec> {
        let list = self.properties(ty, false, role, errors)?;
        let metadata = self.registry.metadata(ty);
        Some(ObjectTypeSpec {
            description: metadata.type_description().map(str::to_string),
            properties: list.properties,
            required: list.required,
        })
    }
}

impl Default for SchemaAssembler {
    fn default() -> Self {
        Self::new(InferOptions::default())
    }
}

fn display_name(ty: &TypeInfo) -> &str {
    let ty = ty.pointee();
    ty.name().unwrap_or(ty.path())
}

fn enum_base(ty: &TypeInfo) -> Result<PrimitiveKind, InferError> {
    match ty.kind() {
        Kind::Bool => Ok(PrimitiveKind::Boolean),
        Kind::Int { bits, .. } if *bits <= 64 => Ok(PrimitiveKind::Integer),
        Kind::Float { .. } => Ok(PrimitiveKind::Number),
        Kind::String => Ok(PrimitiveKind::String),
        other => Err(InferError::UnsupportedKind {
            ty: ty.path().to_string(),
            kind: other.to_string(),
        }),
    }
}
