//! Input and output wrapper resolution.
//!
//! Deferred values are carried by wrapper types: an output wrapper holds a
//! value that becomes known later, an input wrapper is anything that can be
//! converted into one. Both are transparent in the schema, which only sees
//! the carried element type.

use provinfer_core::{TypeInfo, short_type_name};

use crate::InferError;

const INPUT_SUFFIX: &str = "Input";

/// The result of [`resolve_wrapper`].
#[derive(Debug, Clone, PartialEq)]
pub struct Unwrapped {
    /// The carried element type, with pointers stripped.
    pub ty: TypeInfo,
    /// Whether a wrapper was removed.
    pub wrapped: bool,
}

/// Strip pointer indirection and any input or output wrapper from `ty`.
///
/// Output wrappers are checked first: a type declaring both capabilities
/// resolves as an output. An input wrapper named `FooInput` must declare a
/// `ToFooOutput` method whose return type is an output wrapper.
pub fn resolve_wrapper(ty: &TypeInfo) -> Result<Unwrapped, InferError> {
    let base = ty.pointee();
    let capabilities = base.capabilities();

    if let Some(element) = capabilities.output {
        return Ok(Unwrapped {
            ty: element().pointee().clone(),
            wrapped: true,
        });
    }

    if !capabilities.input {
        return Ok(Unwrapped {
            ty: base.clone(),
            wrapped: false,
        });
    }

    let name = base.name().unwrap_or_else(|| short_type_name(base.path()));
    let Some(stem) = name.strip_suffix(INPUT_SUFFIX) else {
        return Err(InferError::input_contract(
            name,
            format!("its name does not end in \"{}\"", INPUT_SUFFIX),
        ));
    };

    let method_name = format!("To{}Output", stem);
    let Some(method) = base.method(&method_name) else {
        return Err(InferError::input_contract(
            name,
            format!("it has no {} method", method_name),
        ));
    };

    let returns = (method.returns)();
    let Some(element) = returns.pointee().capabilities().output else {
        return Err(InferError::OutputContract {
            ty: name.to_string(),
            method: method_name,
            returns: returns.path().to_string(),
        });
    };

    Ok(Unwrapped {
        ty: element().pointee().clone(),
        wrapped: true,
    })
}
