//! Type references carried by fields, arguments and union members.

use std::fmt;
use std::sync::Arc;

use async_graphql::Name;
use async_graphql::dynamic::TypeRef as DynTypeRef;

use super::SchemaType;
use crate::builder::Placeholder;

/// Built-in scalar names that never need a placeholder.
pub const BUILTIN_SCALARS: [&str; 5] = ["Int", "Float", "String", "Boolean", "ID"];

/// Returns true for the standard GraphQL scalars.
pub fn is_builtin_scalar(name: &str) -> bool {
    BUILTIN_SCALARS.contains(&name)
}

/// Terminal, named end of a type reference chain.
#[derive(Debug, Clone)]
pub enum NamedType {
    /// Built-in scalar, or the type currently being defined.
    Known(Name),
    /// Forward or external reference awaiting a dependency.
    Pending(Arc<Placeholder>),
    /// Reference replaced by a loaded dependency.
    Resolved(Arc<SchemaType>),
}

impl NamedType {
    pub fn name(&self) -> &str {
        match self {
            Self::Known(name) => name.as_str(),
            Self::Pending(placeholder) => placeholder.name(),
            Self::Resolved(ty) => ty.name(),
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }

    /// Returns the loaded type, if this reference was resolved.
    pub fn resolved(&self) -> Option<&Arc<SchemaType>> {
        match self {
            Self::Resolved(ty) => Some(ty),
            _ => None,
        }
    }
}

/// A possibly wrapped type reference.
#[derive(Debug, Clone)]
pub enum TypeRef {
    Named(NamedType),
    List(Box<TypeRef>),
    NonNull(Box<TypeRef>),
}

impl TypeRef {
    /// Returns the named reference at the end of the wrapper chain.
    pub fn innermost(&self) -> &NamedType {
        match self {
            Self::Named(named) => named,
            Self::List(inner) | Self::NonNull(inner) => inner.innermost(),
        }
    }

    /// Name of the innermost type.
    pub fn type_name(&self) -> &str {
        self.innermost().name()
    }

    /// Converts the reference into the host library's type reference.
    ///
    /// Pending references keep their bare name, so they only validate when a
    /// type of that name is registered in the same schema.
    pub fn to_dynamic(&self) -> DynTypeRef {
        match self {
            Self::Named(named) => DynTypeRef::named(named.name().to_string()),
            Self::List(inner) => DynTypeRef::List(Box::new(inner.to_dynamic())),
            Self::NonNull(inner) => DynTypeRef::NonNull(Box::new(inner.to_dynamic())),
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(named) => f.write_str(named.name()),
            Self::List(inner) => write!(f, "[{inner}]"),
            Self::NonNull(inner) => write!(f, "{inner}!"),
        }
    }
}
