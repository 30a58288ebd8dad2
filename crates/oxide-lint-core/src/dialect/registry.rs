//! Lookup of published dialects by name.

use std::collections::BTreeMap;

use super::{Dialect, DialectError, Result};

/// Published dialects, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct DialectRegistry {
    dialects: BTreeMap<String, Dialect>,
}

impl DialectRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a dialect under its own name, returning any dialect it
    /// displaced.
    pub fn register(&mut self, dialect: Dialect) -> Option<Dialect> {
        self.dialects.insert(dialect.name().to_string(), dialect)
    }

    /// Looks up a dialect by name.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError::UnknownDialect`] if no dialect has that name.
    pub fn get(&self, name: &str) -> Result<&Dialect> {
        self.dialects
            .get(name)
            .ok_or_else(|| DialectError::UnknownDialect(name.to_string()))
    }

    /// Registered names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.dialects.keys().map(String::as_str)
    }

    /// Returns the number of registered dialects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dialects.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dialects.is_empty()
    }
}
