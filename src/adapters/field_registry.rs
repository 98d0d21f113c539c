//! Field Type Registry
//!
//! Maps the type identifier carried by a field definition to a factory
//! for its presentation type. The registry is filled once at startup and
//! only read afterwards, so it can be shared behind an `Arc`.
//!
//! Lookup is case-insensitive. Identifiers written in assembly-qualified
//! form (`Type.Name, Assembly`) fall back to their type part.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::domain::{FieldControl, FormError};

/// Builds a fresh control; an `Err` means the type could not be used
pub type FieldFactory = Arc<dyn Fn() -> Result<Box<dyn FieldControl>, FormError> + Send + Sync>;

/// A registered presentation type
#[derive(Clone)]
pub struct FieldType {
    id: String,
    /// `None` for abstract registrations that can never be instantiated
    factory: Option<FieldFactory>,
}

impl FieldType {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_abstract(&self) -> bool {
        self.factory.is_none()
    }

    pub fn instantiate(&self) -> Result<Box<dyn FieldControl>, FormError> {
        match &self.factory {
            Some(factory) => factory(),
            None => Err(FormError::Construction {
                type_id: self.id.clone(),
                reason: "type is abstract".to_string(),
            }),
        }
    }
}

impl fmt::Debug for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldType")
            .field("id", &self.id)
            .field("abstract", &self.is_abstract())
            .finish()
    }
}

#[derive(Debug, Default, Clone)]
pub struct FieldTypeRegistry {
    types: HashMap<String, FieldType>,
    aliases: HashMap<String, String>,
}

impl FieldTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in field type
    pub fn with_builtin_fields() -> Self {
        let mut registry = Self::new();
        super::fields::register_builtin_fields(&mut registry);
        registry
    }

    pub fn register<F>(&mut self, id: &str, factory: F) -> &mut Self
    where
        F: Fn() -> Result<Box<dyn FieldControl>, FormError> + Send + Sync + 'static,
    {
        self.insert(id, Some(Arc::new(factory)))
    }

    /// Register a control built with `Default::default()`
    pub fn register_default<T>(&mut self, id: &str) -> &mut Self
    where
        T: FieldControl + Default + 'static,
    {
        self.register(id, || Ok(Box::new(T::default()) as Box<dyn FieldControl>))
    }

    /// Register an identifier that resolves to nothing, e.g. a base type
    /// or a type switched off by configuration.
    pub fn register_abstract(&mut self, id: &str) -> &mut Self {
        self.insert(id, None)
    }

    pub fn register_alias(&mut self, alias: &str, target: &str) -> &mut Self {
        self.aliases
            .insert(normalize_id(alias), normalize_id(target));
        self
    }

    fn insert(&mut self, id: &str, factory: Option<FieldFactory>) -> &mut Self {
        let key = normalize_id(id);
        self.types.insert(
            key.clone(),
            FieldType { id: key, factory },
        );
        self
    }

    /// Resolve an identifier to an instantiable type.
    ///
    /// Returns `None` for empty, unknown and abstract identifiers.
    pub fn resolve(&self, type_id: &str) -> Option<&FieldType> {
        let key = normalize_id(type_id);
        if key.is_empty() {
            return None;
        }

        let found = self.lookup(&key).or_else(|| {
            let (type_part, _assembly) = key.split_once(',')?;
            self.lookup(type_part.trim())
        });

        found.filter(|t| !t.is_abstract())
    }

    fn lookup(&self, key: &str) -> Option<&FieldType> {
        self.types.get(key).or_else(|| {
            self.aliases
                .get(key)
                .and_then(|target| self.types.get(target))
        })
    }

    /// Resolve and instantiate in one step
    pub fn instantiate(&self, type_id: &str) -> Result<Box<dyn FieldControl>, FormError> {
        self.resolve(type_id)
            .ok_or_else(|| FormError::UnknownFieldType(type_id.to_string()))?
            .instantiate()
    }

    pub fn contains(&self, type_id: &str) -> bool {
        self.resolve(type_id).is_some()
    }

    /// Registered identifiers, sorted
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.types.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn aliases(&self) -> impl Iterator<Item = (&str, &str)> {
        self.aliases.iter().map(|(a, t)| (a.as_str(), t.as_str()))
    }
}

fn normalize_id(id: &str) -> String {
    id.trim().to_ascii_lowercase()
}

#[cfg(test)]
#[path = "field_registry_test.rs"]
mod tests;
