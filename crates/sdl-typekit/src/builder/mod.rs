//! Type construction from SDL.
//!
//! ## Components
//!
//! - [`AstTypeBuilder`] - Turns one type definition into a [`crate::SchemaType`]
//! - [`PlaceholderRegistry`] - Memoized stand-ins for names not yet defined
//!
//! A builder owns its registry, so placeholder identities never outlive the
//! build that created them.

mod ast;
mod placeholder;

pub use ast::{AstTypeBuilder, TypeDefSource, parse_type_definitions};
pub use placeholder::{Placeholder, PlaceholderRegistry};
