//! Executable hooks attached to built types.
//!
//! Resolvers are plain synchronous functions over `async_graphql::Value`s.
//! Schema assembly adapts them into dynamic field resolvers; the core never
//! calls them itself.

use std::fmt;
use std::sync::Arc;

use async_graphql::{Name, Value};
use indexmap::IndexMap;

/// Result returned by a field resolver.
pub type FieldResult = Result<Value, async_graphql::Error>;

/// Inputs handed to a [`FieldResolver`].
///
/// `ResolverArgs::default()` carries no parent and no arguments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolverArgs {
    /// Value produced by the parent field, if any.
    pub parent: Option<Value>,
    /// Argument values, enum arguments already mapped to their literals.
    pub args: IndexMap<Name, Value>,
}

impl ResolverArgs {
    /// Creates arguments with the given parent value.
    #[must_use]
    pub fn with_parent(parent: Value) -> Self {
        Self {
            parent: Some(parent),
            args: IndexMap::new(),
        }
    }

    /// Adds an argument value.
    #[must_use]
    pub fn arg(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.args.insert(Name::new(name), value.into());
        self
    }

    /// Returns an argument value by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.args.get(name)
    }

    /// Returns a property of the parent object.
    pub fn parent_field(&self, name: &str) -> Option<&Value> {
        match &self.parent {
            Some(Value::Object(obj)) => obj.get(name),
            _ => None,
        }
    }
}

/// Shared field resolver function.
#[derive(Clone)]
pub struct FieldResolver(Arc<dyn Fn(&ResolverArgs) -> FieldResult + Send + Sync>);

impl FieldResolver {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&ResolverArgs) -> FieldResult + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Invokes the resolver.
    pub fn call(&self, args: &ResolverArgs) -> FieldResult {
        (self.0)(args)
    }

    /// Returns true if both handles share the same function.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }
}

impl fmt::Debug for FieldResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FieldResolver")
    }
}

/// Hook naming the concrete object type of an interface or union value.
#[derive(Clone)]
pub struct ResolveTypeFn(Arc<dyn Fn(&Value) -> Option<String> + Send + Sync>);

impl ResolveTypeFn {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Value) -> Option<String> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Invokes the hook.
    pub fn call(&self, value: &Value) -> Option<String> {
        (self.0)(value)
    }

    /// Returns true if both handles share the same function.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }
}

impl fmt::Debug for ResolveTypeFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ResolveTypeFn")
    }
}

/// Field resolvers of one type, keyed by field name.
#[derive(Debug, Clone, Default)]
pub struct Resolvers(IndexMap<String, FieldResolver>);

impl Resolvers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a resolver for a field.
    #[must_use]
    pub fn resolver<F>(mut self, field: impl Into<String>, f: F) -> Self
    where
        F: Fn(&ResolverArgs) -> FieldResult + Send + Sync + 'static,
    {
        self.0.insert(field.into(), FieldResolver::new(f));
        self
    }

    /// Adds an existing resolver handle for a field.
    pub fn insert(&mut self, field: impl Into<String>, resolver: FieldResolver) {
        self.0.insert(field.into(), resolver);
    }

    pub fn get(&self, field: &str) -> Option<&FieldResolver> {
        self.0.get(field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Per-type resolver maps used by `schema_type`, keyed by type name.
#[derive(Debug, Clone, Default)]
pub struct SchemaResolvers(IndexMap<String, Resolvers>);

impl SchemaResolvers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the resolver map of a type.
    #[must_use]
    pub fn type_resolvers(mut self, type_name: impl Into<String>, resolvers: Resolvers) -> Self {
        self.0.insert(type_name.into(), resolvers);
        self
    }

    pub fn get(&self, type_name: &str) -> Option<&Resolvers> {
        self.0.get(type_name)
    }
}

/// Enum literal overrides keyed by enum value name.
#[derive(Debug, Clone, Default)]
pub struct EnumValues(IndexMap<String, Value>);

impl EnumValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the literal of one enum value.
    #[must_use]
    pub fn value(mut self, name: impl Into<String>, literal: impl Into<Value>) -> Self {
        self.0.insert(name.into(), literal.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolver_call_without_context() {
        let resolvers = Resolvers::new().resolver("name", |_| Ok(Value::from("GM TEST")));
        let resolver = resolvers.get("name").unwrap();
        assert_eq!(
            resolver.call(&ResolverArgs::default()).unwrap(),
            Value::from("GM TEST")
        );
        assert!(resolvers.get("id").is_none());
    }

    #[test]
    fn test_resolver_args_accessors() {
        let mut parent = IndexMap::new();
        parent.insert(Name::new("id"), Value::from("1"));
        let args = ResolverArgs::with_parent(Value::Object(parent)).arg("first", 10);

        assert_eq!(args.parent_field("id"), Some(&Value::from("1")));
        assert_eq!(args.get("first"), Some(&Value::from(10)));
        assert!(args.parent_field("missing").is_none());
    }

    #[test]
    fn test_ptr_eq() {
        let a = FieldResolver::new(|_| Ok(Value::Null));
        let b = a.clone();
        let c = FieldResolver::new(|_| Ok(Value::Null));
        assert!(FieldResolver::ptr_eq(&a, &b));
        assert!(!FieldResolver::ptr_eq(&a, &c));
    }
}
