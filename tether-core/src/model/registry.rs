//! Model Registry
//!
//! A process-wide mapping from instance name to the live model handle. The
//! two-way wiring uses it to route a presentation-originated edit back to
//! the model that owns the field.
//!
//! The registry is an explicitly constructed, clonable handle — it is owned
//! by the binding wiring and passed to whoever needs lookups, never a hidden
//! module-level singleton. Entries are never removed; registering a second
//! instance under an existing name silently replaces the entry, which is a
//! documented caller obligation rather than an enforced invariant.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::Model;

/// Shared name-to-model mapping with the lifetime of the hosting process.
pub struct ModelRegistry {
    entries: Arc<RwLock<HashMap<String, Model>>>,
}

impl ModelRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Register a model under its instance name. Last registration wins.
    pub fn register(&self, model: Model) {
        let name = model.name().to_string();
        let replaced = self
            .entries
            .write()
            .expect("registry lock poisoned")
            .insert(name.clone(), model);

        if replaced.is_some() {
            tracing::debug!(model = %name, "registry entry replaced");
        } else {
            tracing::debug!(model = %name, "model registered");
        }
    }

    /// Look up the live model registered under `name`.
    pub fn get(&self, name: &str) -> Option<Model> {
        self.entries
            .read()
            .expect("registry lock poisoned")
            .get(name)
            .cloned()
    }

    /// Whether a model is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.entries
            .read()
            .expect("registry lock poisoned")
            .contains_key(name)
    }

    /// Number of registered models.
    pub fn len(&self) -> usize {
        self.entries.read().expect("registry lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Clone for ModelRegistry {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
        }
    }
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ModelSchema;
    use crate::store::MemoryStore;
    use crate::tree::ElementTree;
    use serde_json::json;
    use std::sync::Arc;

    fn named_model(name: &str) -> Model {
        Model::new(
            name,
            ModelSchema::builder().field("value", json!(0)).build(),
            false,
            Arc::new(MemoryStore::new()),
            ElementTree::new(),
        )
    }

    #[test]
    fn register_then_get() {
        let registry = ModelRegistry::new();
        assert!(registry.is_empty());

        registry.register(named_model("settings"));

        assert!(registry.contains("settings"));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("settings").unwrap().name(), "settings");
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn last_registration_wins() {
        let registry = ModelRegistry::new();

        let first = named_model("user");
        first.set("value", json!(1)).unwrap();
        registry.register(first);

        let second = named_model("user");
        second.set("value", json!(2)).unwrap();
        registry.register(second);

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("user").unwrap().get("value"), Some(json!(2)));
    }

    #[test]
    fn clone_shares_entries() {
        let registry = ModelRegistry::new();
        let alias = registry.clone();

        registry.register(named_model("user"));
        assert!(alias.contains("user"));
    }
}
