//! Error types for type construction.
//!
//! Every failure in the build → extend → assemble pipeline is reported as a
//! [`TypeKitError`] and propagated unchanged to the caller. Nothing here is
//! retried or recovered locally.

use thiserror::Error;

/// Errors that can occur while building, extending or assembling types.
#[derive(Debug, Error)]
pub enum TypeKitError {
    /// The type-definition text is not valid SDL.
    #[error("Failed to parse type definition: {0}")]
    Parse(#[from] async_graphql_parser::Error),

    /// The definition cannot be turned into a type.
    #[error("Failed to build type: {0}")]
    Build(String),

    /// A constructor received a definition of the wrong kind.
    #[error("Expected {expected} definition, found {found} `{name}`")]
    UnexpectedKind {
        /// Kind the constructor builds.
        expected: &'static str,
        /// Kind that was actually defined.
        found: &'static str,
        /// Name of the offending definition.
        name: String,
    },

    /// A named dependency could not be loaded.
    #[error("Failed to load dependency `{name}` from `{locator}`: {reason}")]
    DependencyLoad {
        /// Bare type name that was being resolved.
        name: String,
        /// Locator the loader was asked for.
        locator: String,
        /// Loader-provided reason.
        reason: String,
    },

    /// `schema_type` found no resolver map for a definition.
    #[error("No resolver map for type `{0}`")]
    MissingResolverMap(String),

    /// The host library rejected the assembled schema.
    #[error("Failed to build GraphQL schema: {0}")]
    SchemaBuild(String),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem access failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TypeKitError {
    /// Create a new Build error
    pub fn build(message: impl Into<String>) -> Self {
        Self::Build(message.into())
    }

    /// Create a new DependencyLoad error
    pub fn dependency_load(
        name: impl Into<String>,
        locator: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::DependencyLoad {
            name: name.into(),
            locator: locator.into(),
            reason: reason.into(),
        }
    }

    /// Returns a stable code identifying the error variant.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Parse(_) => "PARSE_ERROR",
            Self::Build(_) | Self::UnexpectedKind { .. } => "BUILD_ERROR",
            Self::DependencyLoad { .. } => "DEPENDENCY_LOAD_ERROR",
            Self::MissingResolverMap(_) => "MISSING_RESOLVER_MAP",
            Self::SchemaBuild(_) => "SCHEMA_BUILD_FAILED",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Io(_) => "IO_ERROR",
        }
    }
}
