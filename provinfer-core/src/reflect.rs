//! Type descriptors.
//!
//! A [`TypeInfo`] describes the shape of a Rust type the way a reflection
//! API would: its kind, its fields, and the capabilities it declares (being
//! an input or output wrapper, a resource, an enumeration, or carrying its
//! own metadata). The inference engine only ever sees these descriptors.

use std::{any::TypeId, fmt};

use crate::Annotator;

/// Descriptor of a single Rust type.
#[derive(Debug, Clone)]
pub struct TypeInfo {
    pub(crate) id: TypeId,
    pub(crate) path: &'static str,
    pub(crate) name: Option<String>,
    pub(crate) kind: Kind,
    pub(crate) capabilities: Capabilities,
}

impl TypeInfo {
    /// Create a descriptor for `T` with the given kind and no capabilities.
    pub fn new<T: ?Sized + 'static>(kind: Kind) -> Self {
        Self {
            id: TypeId::of::<T>(),
            path: std::any::type_name::<T>(),
            name: None,
            kind,
            capabilities: Capabilities::default(),
        }
    }

    /// Set the declared name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replace the declared capabilities.
    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Full path as reported by `std::any::type_name`.
    pub fn path(&self) -> &'static str {
        self.path
    }

    /// Declared name; `None` for anonymous composites and builtin types.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn kind(&self) -> &Kind {
        &self.kind
    }

    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    /// Fields of a struct type, or `None` for any other kind.
    pub fn fields(&self) -> Option<&[FieldInfo]> {
        match &self.kind {
            Kind::Struct(fields) => Some(fields),
            _ => None,
        }
    }

    pub fn is_struct(&self) -> bool {
        matches!(self.kind, Kind::Struct(_))
    }

    /// Look up a declared method by name.
    pub fn method(&self, name: &str) -> Option<&MethodInfo> {
        self.capabilities.methods.iter().find(|m| m.name == name)
    }

    /// Strip every layer of pointer indirection.
    pub fn pointee(&self) -> &TypeInfo {
        let mut current = self;
        while let Kind::Pointer(inner) = &current.kind {
            current = inner;
        }
        current
    }
}

impl PartialEq for TypeInfo {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeInfo {}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path)
    }
}

/// The structural kind of a type.
#[derive(Debug, Clone)]
pub enum Kind {
    Bool,
    Int { bits: u32, signed: bool },
    Float { bits: u32 },
    String,
    Char,
    Unit,
    Tuple(usize),
    /// Ownership indirection: `Option`, `Box`, `Arc`, `Rc`.
    Pointer(Box<TypeInfo>),
    /// Homogeneous sequences: `Vec`, arrays, sets.
    Sequence(Box<TypeInfo>),
    Map {
        key: Box<TypeInfo>,
        value: Box<TypeInfo>,
    },
    Struct(Vec<FieldInfo>),
    /// An open value that may hold anything.
    Interface,
    /// A type with no introspectable structure.
    Opaque,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Bool => write!(f, "bool"),
            Kind::Int { bits, signed: true } => write!(f, "i{}", bits),
            Kind::Int {
                bits,
                signed: false,
            } => write!(f, "u{}", bits),
            Kind::Float { bits } => write!(f, "f{}", bits),
            Kind::String => write!(f, "string"),
            Kind::Char => write!(f, "char"),
            Kind::Unit => write!(f, "unit"),
            Kind::Tuple(arity) => write!(f, "tuple of {}", arity),
            Kind::Pointer(_) => write!(f, "pointer"),
            Kind::Sequence(_) => write!(f, "sequence"),
            Kind::Map { .. } => write!(f, "map"),
            Kind::Struct(_) => write!(f, "struct"),
            Kind::Interface => write!(f, "interface"),
            Kind::Opaque => write!(f, "opaque"),
        }
    }
}

/// A struct field.
#[derive(Debug, Clone)]
pub struct FieldInfo {
    /// The Rust field name.
    pub name: &'static str,
    /// Raw tag text, parsed with [`FieldTag::parse`](crate::FieldTag::parse).
    pub tag: &'static str,
    /// Describes the field type on demand, so recursive types stay finite.
    pub ty: fn() -> TypeInfo,
}

impl FieldInfo {
    pub fn type_info(&self) -> TypeInfo {
        (self.ty)()
    }
}

/// A method declared on a type, recorded for wrapper contract checks.
#[derive(Debug, Clone)]
pub struct MethodInfo {
    pub name: String,
    pub returns: fn() -> TypeInfo,
}

/// Which kind of resource a type represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceCapability {
    /// A resource or component implemented by this provider; it knows its
    /// own token.
    Local,
    /// A resource from another package's SDK, located with an explicit
    /// `package@version:module:name` tag.
    Foreign,
}

/// A member of an enumeration.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumValue {
    pub name: String,
    pub value: serde_json::Value,
    pub description: Option<String>,
}

/// Enumeration members; the enum's kind is its base kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnumInfo {
    pub values: Vec<EnumValue>,
}

/// Capabilities a type declares about itself.
#[derive(Debug, Clone, Default)]
pub struct Capabilities {
    /// Set on deferred output wrappers; describes the carried element type.
    pub output: Option<fn() -> TypeInfo>,
    /// Set on input wrappers (convertible to an output).
    pub input: bool,
    pub methods: Vec<MethodInfo>,
    pub resource: Option<ResourceCapability>,
    pub enumeration: Option<EnumInfo>,
    /// Self-registration hook supplying descriptions, defaults and tokens.
    pub annotate: Option<fn(&mut Annotator)>,
}
