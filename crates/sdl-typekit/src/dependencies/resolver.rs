//! Swaps pending references for loaded dependencies.

use std::sync::Arc;

use tracing::{trace, warn};

use super::{Dependencies, Dependency};
use crate::error::TypeKitError;
use crate::types::{NamedType, SchemaType, TypeRef};

/// Resolves type references against a [`Dependencies`] map.
///
/// Loading is not cached: each occurrence of a dependency name triggers its
/// own lookup.
#[derive(Debug, Clone, Copy)]
pub struct DependencyResolver<'a> {
    dependencies: &'a Dependencies,
}

impl<'a> DependencyResolver<'a> {
    pub fn new(dependencies: &'a Dependencies) -> Self {
        Self { dependencies }
    }

    /// Resolves a possibly wrapped reference, rebuilding the wrappers around
    /// the resolved inner type.
    ///
    /// # Errors
    ///
    /// Returns `TypeKitError::DependencyLoad` if a locator cannot be loaded.
    pub fn resolve(&self, ty: &TypeRef) -> Result<TypeRef, TypeKitError> {
        Ok(match ty {
            TypeRef::Named(named) => TypeRef::Named(self.resolve_named(named)?),
            TypeRef::List(inner) => TypeRef::List(Box::new(self.resolve(inner)?)),
            TypeRef::NonNull(inner) => TypeRef::NonNull(Box::new(self.resolve(inner)?)),
        })
    }

    /// Resolves a named reference. Only pending names present in the map
    /// change; everything else is returned as is.
    ///
    /// # Errors
    ///
    /// Returns `TypeKitError::DependencyLoad` if a locator cannot be loaded.
    pub fn resolve_named(&self, named: &NamedType) -> Result<NamedType, TypeKitError> {
        let NamedType::Pending(placeholder) = named else {
            return Ok(named.clone());
        };
        let name = placeholder.name();
        match self.dependencies.get(name) {
            Some(dependency) => Ok(NamedType::Resolved(self.load(name, dependency)?)),
            None => Ok(named.clone()),
        }
    }

    fn load(&self, name: &str, dependency: &Dependency) -> Result<Arc<SchemaType>, TypeKitError> {
        match dependency {
            Dependency::Type(ty) => {
                trace!(type_name = name, "Resolved dependency from direct reference");
                Ok(Arc::clone(ty))
            }
            Dependency::Locator(locator) => {
                trace!(type_name = name, locator = %locator, "Loading dependency");
                let module = self
                    .dependencies
                    .loader()
                    .load(locator)
                    .map_err(|e| match e {
                        TypeKitError::DependencyLoad { .. } => e,
                        other => TypeKitError::dependency_load(name, locator, other.to_string()),
                    })?;
                module.select(name).ok_or_else(|| {
                    warn!(type_name = name, locator = %locator, "Module has no usable export");
                    TypeKitError::dependency_load(name, locator, "module has no default export")
                })
            }
        }
    }
}
