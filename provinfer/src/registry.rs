//! Token registry.
//!
//! Named types are published once, in the package `types` or `resources`
//! section, and referenced everywhere else by token. The registry assigns
//! those tokens and remembers which type owns each one for the lifetime of
//! an inference run.

use std::{any::TypeId, collections::HashMap, sync::Arc};

use parking_lot::RwLock;
use provinfer_core::{TypeInfo, TypeMetadata, type_module};
use provinfer_ir::Token;
use tracing::debug;

use crate::{InferError, InferOptions};

/// Assigns tokens to named types and resolves them back.
///
/// Implementations are shared by every walker of a run, possibly across
/// threads.
pub trait TokenRegistry: Send + Sync {
    /// The token of `ty`, assigning one on first use.
    fn register(&self, ty: &TypeInfo) -> Result<Token, InferError>;

    /// The type a token was assigned to.
    fn resolve(&self, token: &Token) -> Option<RegisteredType>;

    /// Metadata the type supplies about itself.
    fn metadata(&self, ty: &TypeInfo) -> Arc<TypeMetadata>;
}

/// A type known to the registry.
#[derive(Debug, Clone)]
pub struct RegisteredType {
    pub token: Token,
    pub info: TypeInfo,
    pub metadata: Arc<TypeMetadata>,
}

#[derive(Debug, Default)]
struct Tables {
    by_type: HashMap<TypeId, Token>,
    by_token: HashMap<Token, RegisteredType>,
}

/// In-memory [`TokenRegistry`].
#[derive(Debug)]
pub struct TypeRegistry {
    options: InferOptions,
    tables: RwLock<Tables>,
    metadata: RwLock<HashMap<TypeId, Arc<TypeMetadata>>>,
}

impl TypeRegistry {
    pub fn new(options: InferOptions) -> Self {
        Self {
            options,
            tables: RwLock::new(Tables::default()),
            metadata: RwLock::new(HashMap::new()),
        }
    }

    pub fn options(&self) -> &InferOptions {
        &self.options
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.tables.read().by_token.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn derive_token(&self, ty: &TypeInfo, metadata: &TypeMetadata) -> Result<Token, InferError> {
        let Some(name) = ty.name() else {
            return Err(InferError::token_resolution(
                ty.path(),
                "anonymous types have no token",
            ));
        };

        if let Some(token) = &metadata.token {
            for part in [&token.module, &token.name] {
                if part.is_empty() || part.contains(':') {
                    return Err(InferError::token_resolution(
                        ty.path(),
                        format!("invalid token override '{}:{}'", token.module, token.name),
                    ));
                }
            }
            return Ok(Token::new(
                &self.options.package,
                &token.module,
                &token.name,
            ));
        }

        let module = type_module(ty.path()).unwrap_or(self.options.default_module.as_str());
        Ok(Token::new(&self.options.package, module, name))
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new(InferOptions::default())
    }
}

impl TokenRegistry for TypeRegistry {
    fn register(&self, ty: &TypeInfo) -> Result<Token, InferError> {
        let ty = ty.pointee();
        if let Some(token) = self.tables.read().by_type.get(&ty.id()) {
            return Ok(token.clone());
        }

        let metadata = self.metadata(ty);
        let token = self.derive_token(ty, &metadata)?;

        let mut tables = self.tables.write();
        // Another thread may have registered it while the lock was released.
        if let Some(existing) = tables.by_type.get(&ty.id()) {
            return Ok(existing.clone());
        }
        if let Some(owner) = tables.by_token.get(&token) {
            return Err(InferError::token_resolution(
                ty.path(),
                format!("token '{}' is already used by '{}'", token, owner.info.path()),
            ));
        }

        debug!(token = %token, ty = ty.path(), "registered type");
        tables.by_type.insert(ty.id(), token.clone());
        tables.by_token.insert(
            token.clone(),
            RegisteredType {
                token: token.clone(),
                info: ty.clone(),
                metadata,
            },
        );
        Ok(token)
    }

    fn resolve(&self, token: &Token) -> Option<RegisteredType> {
        self.tables.read().by_token.get(token).cloned()
    }

    fn metadata(&self, ty: &TypeInfo) -> Arc<TypeMetadata> {
        let ty = ty.pointee();
        if let Some(metadata) = self.metadata.read().get(&ty.id()) {
            return Arc::clone(metadata);
        }
        let metadata = Arc::new(TypeMetadata::collect(ty));
        self.metadata
            .write()
            .entry(ty.id())
            .or_insert(metadata)
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use provinfer_core::{Annotated, Annotator, Describe};

    use super::*;

    struct Bucket;
    struct Versioning;
    struct Renamed;

    impl Describe for Bucket {
        fn describe() -> TypeInfo {
            TypeInfo::structure::<Self>()
                .field::<String>("name", "")
                .build()
        }
    }

    impl Describe for Versioning {
        fn describe() -> TypeInfo {
            TypeInfo::structure::<Self>()
                .field::<bool>("enabled", "")
                .annotated::<Self>()
                .build()
        }
    }

    impl Annotated for Versioning {
        fn annotate(a: &mut Annotator) {
            a.describe_type("Bucket versioning.")
                .set_token("s3", "BucketVersioning");
        }
    }

    impl Describe for Renamed {
        fn describe() -> TypeInfo {
            TypeInfo::structure::<Self>().named("Bucket").build()
        }
    }

    fn registry() -> TypeRegistry {
        TypeRegistry::new(InferOptions::new("aws"))
    }

    #[test]
    fn test_token_from_type_path() {
        let registry = registry();
        let token = registry.register(&Bucket::describe()).unwrap();
        assert_eq!(token, Token::new("aws", "tests", "Bucket"));
    }

    #[test]
    fn test_token_override() {
        let registry = registry();
        let token = registry.register(&Versioning::describe()).unwrap();
        assert_eq!(token.to_string(), "aws:s3:BucketVersioning");

        let registered = registry.resolve(&token).unwrap();
        assert_eq!(registered.info, Versioning::describe());
        assert_eq!(
            registered.metadata.type_description(),
            Some("Bucket versioning.")
        );
    }

    #[test]
    fn test_register_is_stable_through_pointers() {
        let registry = registry();
        let direct = registry.register(&Bucket::describe()).unwrap();
        let boxed = registry
            .register(&<Option<Box<Bucket>>>::describe())
            .unwrap();
        assert_eq!(direct, boxed);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_anonymous_type_is_rejected() {
        let registry = registry();
        let anonymous = TypeInfo::structure::<Bucket>().anonymous().build();
        let err = registry.register(&anonymous).unwrap_err();
        assert!(matches!(err, InferError::TokenResolution { .. }));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_token_conflict() {
        let registry = registry();
        registry.register(&Bucket::describe()).unwrap();
        let err = registry.register(&Renamed::describe()).unwrap_err();
        assert!(err.to_string().contains("already used by"));
    }

    #[test]
    fn test_unknown_token_resolves_to_none() {
        assert!(registry().resolve(&Token::new("aws", "s3", "Nope")).is_none());
    }

    #[test]
    fn test_concurrent_registration() {
        let registry = Arc::new(registry());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || {
                    if i % 2 == 0 {
                        registry.register(&Bucket::describe()).unwrap()
                    } else {
                        registry.register(&Versioning::describe()).unwrap()
                    }
                })
            })
            .collect();

        let tokens: Vec<Token> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(tokens.iter().step_by(2).all(|t| t.name == "Bucket"));
        assert!(tokens.iter().skip(1).step_by(2).all(|t| t.name == "BucketVersioning"));
        assert_eq!(registry.len(), 2);
    }
}
