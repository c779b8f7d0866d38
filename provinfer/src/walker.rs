//! Type to schema type translation.

use std::any::TypeId;

use provinfer_core::{Kind, TypeInfo};
use provinfer_ir::{PrimitiveKind, TypeSpec};
use tracing::{trace, warn};

use crate::{
    Classification, InferError, InferOptions, TokenRegistry, TokenResolver, Unwrapped,
    resolve_wrapper,
};

/// Widest integer that fits the schema's integer type.
const MAX_INTEGER_BITS: u32 = 64;

/// Produces the [`TypeSpec`] of a field type.
#[derive(Clone, Copy)]
pub struct TypeWalker<'a> {
    registry: &'a dyn TokenRegistry,
    options: &'a InferOptions,
}

impl<'a> TypeWalker<'a> {
    pub fn new(registry: &'a dyn TokenRegistry, options: &'a InferOptions) -> Self {
        Self { registry, options }
    }

    /// Translate `ty`.
    ///
    /// `plain` asks for primitives and containers to be marked plain; the
    /// mark is dropped when the value came through a wrapper. `external` is
    /// the locator from the field's `type=` tag, used by foreign resources
    /// at any container depth.
    pub fn walk(
        &self,
        ty: &TypeInfo,
        plain: bool,
        external: Option<&str>,
    ) -> Result<TypeSpec, InferError> {
        self.walk_within(ty, plain, external, &mut Vec::new())
    }

    /// `visiting` holds the unnamed types whose structure is being walked.
    /// Meeting one again means the type contains itself with no token to
    /// refer to it by.
    fn walk_within(
        &self,
        ty: &TypeInfo,
        plain: bool,
        external: Option<&str>,
        visiting: &mut Vec<TypeId>,
    ) -> Result<TypeSpec, InferError> {
        let base = ty.pointee();
        trace!(ty = base.path(), plain, "walking type");

        if base.capabilities().enumeration.is_some() {
            return Ok(TypeSpec::enum_reference(self.registry.register(base)?));
        }

        let resolver = TokenResolver::new(self.registry, self.options);
        if let Some(classification) = resolver.classify(base, external)? {
            return Ok(match classification {
                Classification::Resource(locator) => TypeSpec::resource(locator),
                Classification::Object(token) => TypeSpec::reference(token),
                Classification::Unresolved => {
                    warn!(
                        ty = base.path(),
                        "foreign resource has no type= locator, publishing it as Any"
                    );
                    TypeSpec::any()
                }
            });
        }

        if visiting.contains(&base.id()) {
            return Err(InferError::token_resolution(
                base.path(),
                "the type contains itself but has no token to refer to it by",
            ));
        }
        visiting.push(base.id());
        let spec = self.structure(base, plain, external, visiting);
        visiting.pop();
        spec
    }

    fn structure(
        &self,
        base: &TypeInfo,
        plain: bool,
        external: Option<&str>,
        visiting: &mut Vec<TypeId>,
    ) -> Result<TypeSpec, InferError> {
        let Unwrapped { ty: inner, wrapped } = resolve_wrapper(base)?;
        if wrapped && is_named_element(&inner) {
            return self.walk_within(&inner, false, external, visiting);
        }
        let plain = plain && !wrapped;

        match inner.kind() {
            Kind::Map { key, value } => {
                if !matches!(key.pointee().kind(), Kind::String) {
                    return Err(InferError::MapKey {
                        ty: inner.path().to_string(),
                        key: key.path().to_string(),
                    });
                }
                let values = self.walk_within(value, plain, external, visiting)?;
                Ok(TypeSpec::map(values, plain))
            }
            Kind::Sequence(element) => {
                let items = self.walk_within(element, plain, external, visiting)?;
                Ok(TypeSpec::array(items, plain))
            }
            Kind::Bool => Ok(TypeSpec::primitive(PrimitiveKind::Boolean, plain)),
            Kind::Int { bits, .. } if *bits <= MAX_INTEGER_BITS => {
                Ok(TypeSpec::primitive(PrimitiveKind::Integer, plain))
            }
            Kind::Float { .. } => Ok(TypeSpec::primitive(PrimitiveKind::Number, plain)),
            Kind::String => Ok(TypeSpec::primitive(PrimitiveKind::String, plain)),
            Kind::Interface => Ok(TypeSpec::any()),
            other => Err(InferError::UnsupportedKind {
                ty: inner.path().to_string(),
                kind: other.to_string(),
            }),
        }
    }
}

/// An element type that is referenced by token rather than inlined.
fn is_named_element(ty: &TypeInfo) -> bool {
    let capabilities = ty.capabilities();
    let named = ty.is_struct() || capabilities.enumeration.is_some();
    named && capabilities.output.is_none() && !capabilities.input
}
