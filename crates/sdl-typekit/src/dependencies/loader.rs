//! Loaders turning dependency locators into types.

use std::path::PathBuf;
use std::sync::Arc;

use indexmap::IndexMap;
use tracing::debug;

use crate::builder::{AstTypeBuilder, parse_type_definitions};
use crate::config::TypeKitConfig;
use crate::error::TypeKitError;
use crate::types::SchemaType;

/// What a loader returns for a locator.
#[derive(Debug, Clone)]
pub enum Module {
    /// The locator names a type directly.
    Type(Arc<SchemaType>),
    /// The locator names a collection of types.
    Exports {
        /// Type used when the module is referenced as a whole.
        default: Option<Arc<SchemaType>>,
        /// Every type the module defines, by name.
        named: IndexMap<String, Arc<SchemaType>>,
    },
}

impl Module {
    /// Picks the type a dependency refers to.
    ///
    /// The default export wins; without one, the export named like the
    /// dependency is used.
    pub fn select(&self, dependency: &str) -> Option<Arc<SchemaType>> {
        match self {
            Self::Type(ty) => Some(Arc::clone(ty)),
            Self::Exports { default, named } => default
                .as_ref()
                .or_else(|| named.get(dependency))
                .map(Arc::clone),
        }
    }
}

/// Capability to load a module from a string locator.
pub trait TypeLoader: Send + Sync {
    /// Loads the module identified by `locator`.
    ///
    /// # Errors
    ///
    /// Returns an error if the locator cannot be loaded.
    fn load(&self, locator: &str) -> Result<Module, TypeKitError>;
}

/// Loader that rejects every locator.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoLoader;

impl TypeLoader for NoLoader {
    fn load(&self, locator: &str) -> Result<Module, TypeKitError> {
        Err(TypeKitError::build(format!(
            "no loader configured for locator `{locator}`"
        )))
    }
}

/// In-memory locator table.
#[derive(Debug, Default, Clone)]
pub struct StaticLoader {
    modules: IndexMap<String, Module>,
}

impl StaticLoader {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_module(mut self, locator: impl Into<String>, module: Module) -> Self {
        self.modules.insert(locator.into(), module);
        self
    }

    #[must_use]
    pub fn with_type(self, locator: impl Into<String>, ty: impl Into<SchemaType>) -> Self {
        self.with_module(locator, Module::Type(Arc::new(ty.into())))
    }
}

impl TypeLoader for StaticLoader {
    fn load(&self, locator: &str) -> Result<Module, TypeKitError> {
        self.modules
            .get(locator)
            .cloned()
            .ok_or_else(|| TypeKitError::build(format!("unknown module `{locator}`")))
    }
}

/// Loads SDL files from disk.
///
/// A locator is a path, relative to the module root, optionally followed by
/// `#TypeName` to pick one definition. Paths without an extension get the
/// configured one. The first definition in a file is its default export.
#[derive(Debug, Clone)]
pub struct SdlFileLoader {
    root: Option<PathBuf>,
    extension: String,
}

impl SdlFileLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
            extension: "graphql".to_string(),
        }
    }

    /// Creates a loader from the module settings of `config`.
    pub fn from_config(config: &TypeKitConfig) -> Self {
        Self {
            root: config.module_root.clone(),
            extension: config.module_extension.clone(),
        }
    }

    fn path_for(&self, locator: &str) -> PathBuf {
        let mut path = PathBuf::from(locator);
        if path.extension().is_none() {
            path.set_extension(&self.extension);
        }
        match &self.root {
            Some(root) => root.join(path),
            None => path,
        }
    }
}

impl TypeLoader for SdlFileLoader {
    fn load(&self, locator: &str) -> Result<Module, TypeKitError> {
        let (file, selector) = match locator.split_once('#') {
            Some((file, selector)) => (file, Some(selector)),
            None => (locator, None),
        };
        let path = self.path_for(file);
        debug!(path = %path.display(), "Loading SDL module");

        let text = std::fs::read_to_string(&path)?;
        let mut builder = AstTypeBuilder::new();
        let mut named = IndexMap::new();
        for definition in parse_type_definitions(&text)? {
            let ty = builder.build_definition(&definition)?;
            named.insert(ty.name().to_string(), Arc::new(ty));
        }

        if let Some(selector) = selector {
            return named
                .get(selector)
                .map(|ty| Module::Type(Arc::clone(ty)))
                .ok_or_else(|| {
                    TypeKitError::build(format!(
                        "`{}` defines no type `{selector}`",
                        path.display()
                    ))
                });
        }

        Ok(Module::Exports {
            default: named.values().next().cloned(),
            named,
        })
    }
}
