//! Typed provider members.
//!
//! A provider declares each resource, component and function as a type
//! implementing one of these traits. The implementing type itself supplies
//! the token and description (through its [`Describe`] impl and, usually,
//! an [`Annotated`](provinfer_core::Annotated) hook); the associated types
//! supply the properties.

use provinfer_core::Describe;

/// A custom resource managed by the provider.
pub trait ProviderResource: Describe {
    /// Arguments accepted on create and update.
    type Inputs: Describe;
    /// State reported back after each operation.
    type Outputs: Describe;
}

/// A component resource, composed of other resources.
pub trait ProviderComponent: Describe {
    type Inputs: Describe;
    type Outputs: Describe;
}

/// A provider function (invoke).
///
/// Use `()` as `Args` for a function that takes no arguments.
pub trait ProviderFunction: Describe {
    type Args: Describe;
    type Result: Describe;
}
