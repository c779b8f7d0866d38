//! Struct fields to schema properties.

use provinfer_core::{FieldTag, TypeInfo};
use provinfer_ir::{DefaultSpec, PropertyMap, PropertySpec};
use tracing::trace;

use crate::{Assembly, InferError, SchemaErrors, TokenRegistry, TypeWalker};

/// The properties of one struct.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyList {
    /// Exposed properties in field declaration order.
    pub properties: PropertyMap,
    /// Names of properties not tagged `optional`.
    pub required: Vec<String>,
}

/// Collects the exposed properties of a struct.
#[derive(Clone, Copy)]
pub struct FieldCollector<'a> {
    registry: &'a dyn TokenRegistry,
    walker: TypeWalker<'a>,
}

impl<'a> FieldCollector<'a> {
    pub fn new(registry: &'a dyn TokenRegistry, walker: TypeWalker<'a>) -> Self {
        Self { registry, walker }
    }

    /// Collect every exposed field of `ty`.
    ///
    /// A field that fails is left out of the result and its error recorded;
    /// the remaining fields are still collected.
    pub fn collect(&self, ty: &TypeInfo, plain: bool) -> Assembly<PropertyList> {
        let ty = ty.pointee();
        let mut list = PropertyList::default();
        let mut errors = SchemaErrors::new();

        let Some(fields) = ty.fields() else {
            errors.push(InferError::UnsupportedKind {
                ty: ty.path().to_string(),
                kind: ty.kind().to_string(),
            });
            return Assembly::new(list, errors);
        };

        let owner = ty.name().unwrap_or(ty.path());
        let metadata = self.registry.metadata(ty);

        for field in fields {
            let tag = match FieldTag::parse(field.name, field.tag) {
                Ok(tag) => tag,
                Err(source) => {
                    errors.push(InferError::TagParse {
                        owner: owner.to_string(),
                        field: field.name.to_string(),
                        tag: field.tag.to_string(),
                        source,
                    });
                    continue;
                }
            };
            if tag.internal {
                continue;
            }
            if list.properties.contains_key(&tag.name) {
                errors.push(InferError::DuplicateProperty {
                    owner: owner.to_string(),
                    field: field.name.to_string(),
                    name: tag.name,
                });
                continue;
            }

            let field_ty = field.type_info();
            trace!(owner, field = field.name, property = %tag.name, "collecting field");
            let type_spec = match self
                .walker
                .walk(&field_ty, plain, tag.external_type.as_deref())
            {
                Ok(spec) => spec,
                Err(err) => {
                    errors.push(err.in_field(owner, field.name, field_ty.path()));
                    continue;
                }
            };

            if !tag.optional {
                list.required.push(tag.name.clone());
            }

            let environment = metadata.default_env(&tag.name);
            let property = PropertySpec {
                secret: tag.secret,
                replace_on_changes: tag.replace_on_changes,
                description: metadata.description(&tag.name).map(str::to_string),
                default: metadata.default_value(&tag.name).cloned(),
                default_info: (!environment.is_empty()).then(|| DefaultSpec {
                    environment: environment.to_vec(),
                }),
                ..PropertySpec::new(type_spec)
            };
            list.properties.insert(tag.name, property);
        }

        Assembly::new(list, errors)
    }
}
