//! Wrapper fixtures for tests.
//!
//! This module is only available when the `testing` feature is enabled
//! or during tests. The types mirror the input and output wrappers a
//! provider SDK generates, without carrying any values.

use provinfer_core::{Describe, TypeInfo};

/// Deferred `String`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringOutput;

impl Describe for StringOutput {
    fn describe() -> TypeInfo {
        TypeInfo::output::<Self, String>()
    }
}

/// Anything convertible to a [`StringOutput`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StringInput;

impl Describe for StringInput {
    fn describe() -> TypeInfo {
        TypeInfo::input::<Self>()
            .method::<StringOutput>("ToStringOutput")
            .build()
    }
}

/// Deferred `i64`.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntOutput;

impl Describe for IntOutput {
    fn describe() -> TypeInfo {
        TypeInfo::output::<Self, i64>()
    }
}

/// Anything convertible to an [`IntOutput`].
#[derive(Debug, Clone, Copy, Default)]
pub struct IntInput;

impl Describe for IntInput {
    fn describe() -> TypeInfo {
        TypeInfo::input::<Self>()
            .method::<IntOutput>("ToIntOutput")
            .build()
    }
}

/// Deferred `Vec<i64>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntArrayOutput;

impl Describe for IntArrayOutput {
    fn describe() -> TypeInfo {
        TypeInfo::output::<Self, Vec<i64>>()
    }
}

/// Deferred `HashMap<String, String>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringMapOutput;

impl Describe for StringMapOutput {
    fn describe() -> TypeInfo {
        TypeInfo::output::<Self, std::collections::HashMap<String, String>>()
    }
}

/// A resource from another package's SDK.
#[derive(Debug, Clone, Copy, Default)]
pub struct ForeignBucket;

impl Describe for ForeignBucket {
    fn describe() -> TypeInfo {
        TypeInfo::structure::<Self>()
            .named("Bucket")
            .field::<StringOutput>("arn", "arn")
            .foreign_resource()
            .build()
    }
}
