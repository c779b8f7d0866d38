//! Whole-package schema assembly.

use std::{collections::BTreeSet, fs, path::Path};

use eyre::{Context, Result};
use provinfer_core::TypeInfo;
use provinfer_ir::{FunctionSpec, PackageSpec, PropertyMap, ResourceSchema, Token, TypeDefinition};
use provinfer_manifest::Manifest;
use tracing::debug;

use crate::{
    Assembly, InferError, InferOptions, ProviderComponent, ProviderFunction, ProviderResource,
    SchemaAssembler, SchemaErrors,
};

/// Builds the schema of a provider package from its members.
///
/// ```ignore
/// let package = PackageBuilder::from_manifest(&manifest)
///     .resource::<Bucket>()
///     .component::<StaticSite>()
///     .function::<GetRegion>()
///     .build()
///     .into_result()?;
/// ```
pub struct PackageBuilder {
    assembler: SchemaAssembler,
    spec: PackageSpec,
    errors: SchemaErrors,
}

impl PackageBuilder {
    pub fn new(options: InferOptions) -> Self {
        let spec = PackageSpec {
            name: options.package.clone(),
            ..Default::default()
        };
        Self {
            assembler: SchemaAssembler::new(options),
            spec,
            errors: SchemaErrors::new(),
        }
    }

    /// A package named and described by the manifest's `[provider]` table.
    pub fn from_manifest(manifest: &Manifest) -> Self {
        let mut builder = Self::new(InferOptions::from_manifest(manifest));
        let provider = &manifest.provider;
        builder.spec.version = provider.version.clone();
        builder.spec.display_name = provider.display_name.clone();
        builder.spec.description = provider.description.clone();
        builder.spec.keywords = provider.keywords.clone();
        builder.spec.homepage = provider.homepage.clone();
        builder.spec.repository = provider.repository.clone();
        builder.spec.publisher = provider.publisher.clone();
        builder.spec.license = provider.license.clone();
        builder
    }

    pub fn assembler(&self) -> &SchemaAssembler {
        &self.assembler
    }

    pub fn resource<R: ProviderResource>(mut self) -> Self {
        let assembly = self.assembler.resource::<R>();
        self.add_resource(&R::describe(), assembly);
        self
    }

    pub fn component<C: ProviderComponent>(mut self) -> Self {
        let assembly = self.assembler.component::<C>();
        self.add_resource(&C::describe(), assembly);
        self
    }

    pub fn function<F: ProviderFunction>(mut self) -> Self {
        let Some(token) = self.member_token(&F::describe(), "function") else {
            return self;
        };
        let Assembly { value, errors } = self.assembler.typed_function::<F>();
        self.errors.extend(errors);
        debug!(token = %token, "added function");
        self.spec.functions.insert(token.to_string(), value);
        self
    }

    /// Finish the package, publishing every structured type and enumeration
    /// reachable from its members.
    pub fn build(mut self) -> Assembly<PackageSpec> {
        let mut pending: Vec<Token> = Vec::new();
        for resource in self.spec.resources.values() {
            pending.extend(resource_tokens(resource));
        }
        for function in self.spec.functions.values() {
            pending.extend(function_tokens(function));
        }

        let mut visited = BTreeSet::new();
        while let Some(token) = pending.pop() {
            if !visited.insert(token.clone()) {
                continue;
            }
            let Some(registered) = self.assembler.registry().resolve(&token) else {
                self.errors.push(InferError::token_resolution(
                    token.to_string(),
                    "no type is registered under this token",
                ));
                continue;
            };
            match self.assembler.object_type(&registered.info) {
                Ok(definition) => {
                    if let TypeDefinition::Object(object) = &definition {
                        pending.extend(property_tokens(&object.properties));
                    }
                    debug!(token = %token, "added type");
                    self.spec.types.insert(token.to_string(), definition);
                }
                Err(errors) => self.errors.extend(errors),
            }
        }

        debug!(
            package = %self.spec.name,
            resources = self.spec.resources.len(),
            functions = self.spec.functions.len(),
            types = self.spec.types.len(),
            errors = self.errors.len(),
            "built package schema"
        );
        Assembly::new(self.spec, self.errors)
    }

    fn add_resource(&mut self, ty: &TypeInfo, assembly: Assembly<ResourceSchema>) {
        let Some(token) = self.member_token(ty, "resource") else {
            return;
        };
        let key = token.to_string();
        if self.spec.resources.contains_key(&key) {
            self.errors.push(InferError::token_resolution(
                ty.path(),
                format!("resource '{}' is declared more than once", key),
            ));
            return;
        }
        self.errors.extend(assembly.errors);
        debug!(token = %token, "added resource");
        self.spec.resources.insert(key, assembly.value);
    }

    fn member_token(&mut self, ty: &TypeInfo, role: &str) -> Option<Token> {
        match self.assembler.registry().register(ty) {
            Ok(token) => Some(token),
            Err(err) => {
                let name = ty.name().unwrap_or(ty.path()).to_string();
                self.errors.push(err.in_type(role, name));
                None
            }
        }
    }
}

fn property_tokens(properties: &PropertyMap) -> impl Iterator<Item = Token> + '_ {
    properties
        .values()
        .flat_map(|p| p.type_spec.type_tokens())
        .cloned()
}

fn resource_tokens(resource: &ResourceSchema) -> impl Iterator<Item = Token> + '_ {
    property_tokens(&resource.output_properties).chain(property_tokens(&resource.input_properties))
}

fn function_tokens(function: &FunctionSpec) -> impl Iterator<Item = Token> + '_ {
    [&function.inputs, &function.outputs]
        .into_iter()
        .flatten()
        .flat_map(|object| property_tokens(&object.properties))
}

/// Write `spec` as pretty-printed JSON, creating parent directories.
pub fn write_schema(spec: &PackageSpec, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let json = spec
        .to_json_pretty()
        .wrap_err("Failed to serialize package schema")?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .wrap_err_with(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, json + "\n")
        .wrap_err_with(|| format!("Failed to write schema to {}", path.display()))
}
