//! # sdl-typekit
//!
//! Build `async-graphql` dynamic types from inline SDL.
//!
//! Each constructor takes a type definition written in SDL plus plain-function
//! hooks and returns a finished type:
//!
//! - [`object_type`] - Object types with field resolvers
//! - [`interface_type`] / [`union_type`] - Abstract types with a resolveType hook
//! - [`enum_type`] - Enum types with optional literal overrides
//! - [`input_type`] - Input object types
//! - [`schema_type`] - A whole document assembled into a `dynamic::Schema`
//!
//! ## Deferred type references
//!
//! Type definitions are built one at a time, so a field may name a type that
//! does not exist yet. Such names become pending references backed by a
//! per-build placeholder. Extending the type swaps every pending name found
//! in the caller's [`Dependencies`] map for the real type, either given
//! directly or loaded through an injected [`TypeLoader`].
//!
//! ```ignore
//! let color = enum_type("enum Color { RED GREEN }", EnumValues::new().value("RED", 1))?;
//! let shirt = object_type(
//!     ObjectTypeArgs::new("type Shirt { colors: [Color!]! }")
//!         .resolvers(Resolvers::new())
//!         .dependencies(Dependencies::new().with_type("Color", SchemaType::from(color))),
//! )?;
//! ```
//!
//! ## Modules
//!
//! - [`builder`] - SDL to built types, placeholder registry
//! - [`dependencies`] - Dependency maps, loaders and the resolver
//! - [`extend`] - Pure type extenders
//! - [`schema`] - Projection into an executable schema
//! - [`config`] - Configuration options
//! - [`error`] - Error types

pub mod builder;
pub mod config;
pub mod constructors;
pub mod dependencies;
pub mod error;
pub mod extend;
pub mod schema;
pub mod types;

// Re-export main types
pub use builder::{AstTypeBuilder, TypeDefSource};
pub use config::TypeKitConfig;
pub use constructors::{
    CompositeTypeArgs, ObjectTypeArgs, SchemaTypeArgs, enum_type, input_type, interface_type,
    object_type, schema_type, union_type,
};
pub use dependencies::{
    Dependencies, Dependency, Module, NoLoader, SdlFileLoader, StaticLoader, TypeLoader,
};
pub use error::TypeKitError;
pub use types::{
    EnumType, EnumValues, FieldResolver, InputObjectType, InterfaceType, ObjectType,
    ResolveTypeFn, ResolverArgs, Resolvers, SchemaResolvers, SchemaType, TypeRef, UnionType,
};

/// Result type for type construction.
pub type Result<T> = std::result::Result<T, TypeKitError>;
