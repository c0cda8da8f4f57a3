//! Placeholders for names referenced before they are declared.

use std::collections::HashMap;
use std::sync::Arc;

use async_graphql::Name;
use tracing::trace;

/// Uninhabited stand-in for a type referenced by name.
#[derive(Debug, PartialEq, Eq)]
pub struct Placeholder {
    name: Name,
}

impl Placeholder {
    /// Name of the referenced type.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}

/// Registry handing out one placeholder per referenced name.
///
/// A registry lives for a single build. Sharing one across unrelated
/// schemas would leak placeholder identities between them.
#[derive(Debug, Default)]
pub struct PlaceholderRegistry {
    placeholders: HashMap<Name, Arc<Placeholder>>,
}

impl PlaceholderRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the placeholder for `name`, creating it on first request.
    pub fn get_or_create(&mut self, name: &Name) -> Arc<Placeholder> {
        Arc::clone(self.placeholders.entry(name.clone()).or_insert_with(|| {
            trace!(type_name = %name, "Creating placeholder type");
            Arc::new(Placeholder { name: name.clone() })
        }))
    }

    /// Returns the number of distinct placeholders created.
    pub fn len(&self) -> usize {
        self.placeholders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placeholders.is_empty()
    }
}
