//! Dependency maps and their resolution.
//!
//! Callers map bare type names either to a type they already built or to a
//! locator that an injected [`TypeLoader`] turns into a type. Only pending
//! references are ever matched against the map.

mod loader;
mod resolver;

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

pub use loader::{Module, NoLoader, SdlFileLoader, StaticLoader, TypeLoader};
pub use resolver::DependencyResolver;

use crate::types::SchemaType;

/// Where a dependency's type comes from.
#[derive(Debug, Clone)]
pub enum Dependency {
    /// An already constructed type.
    Type(Arc<SchemaType>),
    /// A locator loaded lazily, when the name is encountered.
    Locator(String),
}

/// Dependency map plus the loader used for locators.
#[derive(Clone)]
pub struct Dependencies {
    entries: IndexMap<String, Dependency>,
    loader: Arc<dyn TypeLoader>,
}

impl Default for Dependencies {
    fn default() -> Self {
        Self {
            entries: IndexMap::new(),
            loader: Arc::new(NoLoader),
        }
    }
}

impl Dependencies {
    /// Creates an empty map that rejects locators.
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps `name` to an already constructed type.
    #[must_use]
    pub fn with_type(mut self, name: impl Into<String>, ty: impl Into<Arc<SchemaType>>) -> Self {
        self.entries.insert(name.into(), Dependency::Type(ty.into()));
        self
    }

    /// Maps `name` to a locator.
    #[must_use]
    pub fn with_locator(mut self, name: impl Into<String>, locator: impl Into<String>) -> Self {
        self.entries
            .insert(name.into(), Dependency::Locator(locator.into()));
        self
    }

    /// Sets the loader used for locator entries.
    #[must_use]
    pub fn with_loader(mut self, loader: impl TypeLoader + 'static) -> Self {
        self.loader = Arc::new(loader);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Dependency> {
        self.entries.get(name)
    }

    pub fn loader(&self) -> &dyn TypeLoader {
        self.loader.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns a resolver over this map.
    pub fn resolver(&self) -> DependencyResolver<'_> {
        DependencyResolver::new(self)
    }
}

impl fmt::Debug for Dependencies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dependencies")
            .field("entries", &self.entries)
            .finish_non_exhaustive()
    }
}
