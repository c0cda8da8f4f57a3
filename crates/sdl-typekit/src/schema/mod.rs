//! GraphQL schema assembly.
//!
//! This module turns finished types into an executable
//! `async_graphql::dynamic::Schema`.
//!
//! ## Components
//!
//! - [`SchemaAssembler`] - Collects root slots and builds the schema
//! - `FieldBinding` - Adapts plain-function resolvers to dynamic fields
//!
//! ## Execution behaviour
//!
//! 1. Fields without a resolver read the parent object's property of the same name
//! 2. Enum arguments reach resolvers as their literals
//! 3. Resolver results equal to an enum literal are serialized as the value name
//! 4. Interface and union results are tagged by the type's resolveType hook

mod assembler;
mod binding;

pub use assembler::{MUTATION_SLOT, QUERY_SLOT, SUBSCRIPTION_SLOT, SchemaAssembler};
