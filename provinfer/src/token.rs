//! Classification of named types into references.

use provinfer_core::{ResourceCapability, TypeInfo};
use provinfer_ir::{ResourceLocator, Token};

use crate::{InferError, InferOptions, TokenRegistry};

/// How a type is referenced from a property.
#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    /// A resource or component, local or from another package.
    Resource(ResourceLocator),
    /// A structured type published in the `types` section.
    Object(Token),
    /// A foreign resource without a locator, accepted in permissive mode.
    Unresolved,
}

/// Decides whether a type is referenced by token.
#[derive(Clone, Copy)]
pub struct TokenResolver<'a> {
    registry: &'a dyn TokenRegistry,
    options: &'a InferOptions,
}

impl<'a> TokenResolver<'a> {
    pub fn new(registry: &'a dyn TokenRegistry, options: &'a InferOptions) -> Self {
        Self { registry, options }
    }

    /// Classify `ty`, looking through pointers.
    ///
    /// Local resources are checked before foreign ones, and both before
    /// plain structs. Returns `None` for types that are not referenced by
    /// token, output wrapper structs included. `external` is the field's
    /// `type=` locator.
    pub fn classify(
        &self,
        ty: &TypeInfo,
        external: Option<&str>,
    ) -> Result<Option<Classification>, InferError> {
        let ty = ty.pointee();
        match ty.capabilities().resource {
            Some(ResourceCapability::Local) => {
                let token = self.registry.register(ty)?;
                Ok(Some(Classification::Resource(ResourceLocator::Local(token))))
            }
            Some(ResourceCapability::Foreign) => match external {
                Some(locator) => Ok(Some(Classification::Resource(parse_external_locator(
                    locator,
                )?))),
                None if self.options.allow_missing_external_types => {
                    Ok(Some(Classification::Unresolved))
                }
                None => Err(InferError::MissingExternalType {
                    ty: ty.path().to_string(),
                }),
            },
            None if ty.is_struct() && ty.capabilities().output.is_none() => {
                let token = self.registry.register(ty)?;
                Ok(Some(Classification::Object(token)))
            }
            None => Ok(None),
        }
    }
}

/// Parse a `package@version:module:name` locator.
pub fn parse_external_locator(locator: &str) -> Result<ResourceLocator, InferError> {
    let segments: Vec<&str> = locator.split(':').collect();
    let [head, module, name] = segments.as_slice() else {
        return Err(InferError::malformed_external_type(
            locator,
            format!(
                "expected 3 ':'-separated segments, found {}",
                segments.len()
            ),
        ));
    };

    let Some((package, version)) = head.split_once('@') else {
        return Err(InferError::malformed_external_type(
            locator,
            "the package segment has no '@version'",
        ));
    };
    if version.contains('@') {
        return Err(InferError::malformed_external_type(
            locator,
            "the package segment has more than one '@'",
        ));
    }
    if [package, version, *module, *name].iter().any(|s| s.is_empty()) {
        return Err(InferError::malformed_external_type(
            locator,
            "segments must not be empty",
        ));
    }

    Ok(ResourceLocator::External {
        package: package.to_string(),
        version: version.to_string(),
        token: Token::new(package, *module, *name),
    })
}
