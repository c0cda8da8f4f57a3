//! Schema assembly configuration.
//!
//! Configuration can be built in code or loaded from a TOML file.
//!
//! # Example Configuration
//!
//! ```toml
//! max_depth = 15
//! max_complexity = 500
//! introspection = true
//! module_root = "schema/types"
//! module_extension = "graphql"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::TypeKitError;

/// Options applied when a schema is assembled and when SDL modules are loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeKitConfig {
    /// Maximum query depth allowed.
    /// Default: 15
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Maximum query complexity allowed.
    /// Default: 500
    #[serde(default = "default_max_complexity")]
    pub max_complexity: usize,

    /// Enable GraphQL introspection queries.
    /// Default: true
    #[serde(default = "default_introspection")]
    pub introspection: bool,

    /// Directory that dependency locators are resolved against.
    /// Default: none (locators are used as given)
    #[serde(default)]
    pub module_root: Option<PathBuf>,

    /// File extension appended to locators that have none.
    /// Default: "graphql"
    #[serde(default = "default_module_extension")]
    pub module_extension: String,
}

fn default_max_depth() -> usize {
    15
}

fn default_max_complexity() -> usize {
    500
}

fn default_introspection() -> bool {
    true
}

fn default_module_extension() -> String {
    "graphql".to_string()
}

impl Default for TypeKitConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            max_complexity: default_max_complexity(),
            introspection: default_introspection(),
            module_root: None,
            module_extension: default_module_extension(),
        }
    }
}

impl TypeKitConfig {
    /// Parses configuration from TOML text and validates it.
    ///
    /// # Errors
    ///
    /// Returns `TypeKitError::Config` if the text is not valid TOML or the
    /// values are out of range.
    pub fn from_toml_str(text: &str) -> Result<Self, TypeKitError> {
        let config: Self =
            toml::from_str(text).map_err(|e| TypeKitError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns `TypeKitError::Io` if the file cannot be read, otherwise the
    /// same errors as [`TypeKitConfig::from_toml_str`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TypeKitError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration values are invalid.
    pub fn validate(&self) -> Result<(), TypeKitError> {
        if self.max_depth == 0 {
            return Err(TypeKitError::Config("max_depth must be > 0".into()));
        }
        if self.max_complexity == 0 {
            return Err(TypeKitError::Config("max_complexity must be > 0".into()));
        }
        if self.module_extension.trim().is_empty() {
            return Err(TypeKitError::Config("module_extension must not be empty".into()));
        }
        Ok(())
    }
}
