//! The [`Describe`] trait and its implementations for std types.

use std::{
    collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque},
    rc::Rc,
    sync::Arc,
};

use indexmap::IndexMap;

use crate::{Kind, TypeInfo};

/// A type that can describe its own shape.
pub trait Describe: 'static {
    fn describe() -> TypeInfo;
}

macro_rules! describe_scalar {
    ($($ty:ty => $kind:expr;)*) => {
        $(
            impl Describe for $ty {
                fn describe() -> TypeInfo {
                    TypeInfo::new::<$ty>($kind)
                }
            }
        )*
    };
}

describe_scalar! {
    bool => Kind::Bool;
    i8 => Kind::Int { bits: 8, signed: true };
    i16 => Kind::Int { bits: 16, signed: true };
    i32 => Kind::Int { bits: 32, signed: true };
    i64 => Kind::Int { bits: 64, signed: true };
    i128 => Kind::Int { bits: 128, signed: true };
    isize => Kind::Int { bits: isize::BITS, signed: true };
    u8 => Kind::Int { bits: 8, signed: false };
    u16 => Kind::Int { bits: 16, signed: false };
    u32 => Kind::Int { bits: 32, signed: false };
    u64 => Kind::Int { bits: 64, signed: false };
    u128 => Kind::Int { bits: 128, signed: false };
    usize => Kind::Int { bits: usize::BITS, signed: false };
    f32 => Kind::Float { bits: 32 };
    f64 => Kind::Float { bits: 64 };
    String => Kind::String;
    &'static str => Kind::String;
    char => Kind::Char;
    () => Kind::Unit;
    serde_json::Value => Kind::Interface;
}

macro_rules! describe_pointer {
    ($($wrapper:ident),*) => {
        $(
            impl<T: Describe> Describe for $wrapper<T> {
                fn describe() -> TypeInfo {
                    TypeInfo::new::<$wrapper<T>>(Kind::Pointer(Box::new(T::describe())))
                }
            }
        )*
    };
}

describe_pointer!(Option, Box, Arc, Rc);

macro_rules! describe_sequence {
    ($($wrapper:ident),*) => {
        $(
            impl<T: Describe> Describe for $wrapper<T> {
                fn describe() -> TypeInfo {
                    TypeInfo::new::<$wrapper<T>>(Kind::Sequence(Box::new(T::describe())))
                }
            }
        )*
    };
}

describe_sequence!(Vec, VecDeque, BTreeSet);

impl<T: Describe, S: 'static> Describe for HashSet<T, S> {
    fn describe() -> TypeInfo {
        TypeInfo::new::<HashSet<T, S>>(Kind::Sequence(Box::new(T::describe())))
    }
}

impl<T: Describe, const N: usize> Describe for [T; N] {
    fn describe() -> TypeInfo {
        TypeInfo::new::<[T; N]>(Kind::Sequence(Box::new(T::describe())))
    }
}

fn map_kind<K: Describe, V: Describe>() -> Kind {
    Kind::Map {
        key: Box::new(K::describe()),
        value: Box::new(V::describe()),
    }
}

impl<K: Describe, V: Describe> Describe for BTreeMap<K, V> {
    fn describe() -> TypeInfo {
        TypeInfo::new::<BTreeMap<K, V>>(map_kind::<K, V>())
    }
}

impl<K: Describe, V: Describe, S: 'static> Describe for HashMap<K, V, S> {
    fn describe() -> TypeInfo {
        TypeInfo::new::<HashMap<K, V, S>>(map_kind::<K, V>())
    }
}

impl<K: Describe, V: Describe, S: 'static> Describe for IndexMap<K, V, S> {
    fn describe() -> TypeInfo {
        TypeInfo::new::<IndexMap<K, V, S>>(map_kind::<K, V>())
    }
}

impl Describe for serde_json::Map<String, serde_json::Value> {
    fn describe() -> TypeInfo {
        TypeInfo::new::<serde_json::Map<String, serde_json::Value>>(map_kind::<
            String,
            serde_json::Value,
        >())
    }
}

macro_rules! describe_tuple {
    ($($arity:literal => ($($name:ident),+);)*) => {
        $(
            impl<$($name: 'static),+> Describe for ($($name,)+) {
                fn describe() -> TypeInfo {
                    TypeInfo::new::<($($name,)+)>(Kind::Tuple($arity))
                }
            }
        )*
    };
}

describe_tuple! {
    2 => (A, B);
    3 => (A, B, C);
    4 => (A, B, C, D);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_widths() {
        assert!(matches!(
            i64::describe().kind(),
            Kind::Int {
                bits: 64,
                signed: true
            }
        ));
        assert!(matches!(
            u8::describe().kind(),
            Kind::Int {
                bits: 8,
                signed: false
            }
        ));
    }

    #[test]
    fn test_option_is_pointer() {
        let info = <Option<Box<String>>>::describe();
        let Kind::Pointer(inner) = info.kind() else {
            panic!("expected pointer, got {}", info.kind());
        };
        assert!(matches!(inner.kind(), Kind::Pointer(_)));
        assert!(matches!(info.pointee().kind(), Kind::String));
    }

    #[test]
    fn test_containers() {
        assert!(matches!(<Vec<bool>>::describe().kind(), Kind::Sequence(_)));
        assert!(matches!(<[f64; 3]>::describe().kind(), Kind::Sequence(_)));

        let map = <HashMap<i32, String>>::describe();
        let Kind::Map { key, value } = map.kind() else {
            panic!("expected map");
        };
        assert!(matches!(key.kind(), Kind::Int { .. }));
        assert!(matches!(value.kind(), Kind::String));
    }

    #[test]
    fn test_json_value_is_interface() {
        assert!(matches!(
            serde_json::Value::describe().kind(),
            Kind::Interface
        ));
    }
}
