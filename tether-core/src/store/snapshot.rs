//! Persisted Snapshots
//!
//! A snapshot is the serialized public-field state of one model: a flat JSON
//! object in field declaration order, stored under `"model:" + name`. It is
//! overwritten on every accepted mutation and read once at construction to
//! seed initial state.
//!
//! Restore is deliberately forgiving: a missing snapshot is a no-op and a
//! corrupt one is logged and discarded, so storage contents can never
//! prevent a model from being constructed.

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::Result;
use crate::model::Model;

/// Prefix of every model storage key.
pub const KEY_PREFIX: &str = "model:";

/// Storage key for a model instance name.
pub fn storage_key(name: &str) -> String {
    format!("{KEY_PREFIX}{name}")
}

/// Serialize the model's public fields and write them to its store.
pub fn save(model: &Model) -> Result<()> {
    let serialized = serde_json::to_string(&model.public_fields())?;
    model.store().set(&storage_key(model.name()), &serialized)?;
    tracing::debug!(model = model.name(), bytes = serialized.len(), "snapshot saved");
    Ok(())
}

/// Seed the model from its persisted snapshot, if one exists.
///
/// Hydration writes directly into the field map. The model is not yet
/// registered or bound while it restores, so no persist or render pass runs
/// and nothing can observe the difference.
pub fn restore(model: &Model) {
    let raw = match model.store().get(&storage_key(model.name())) {
        Some(raw) => raw,
        None => return,
    };

    match serde_json::from_str::<IndexMap<String, Value>>(&raw) {
        Ok(stored) => model.hydrate(stored),
        Err(error) => {
            tracing::warn!(model = model.name(), %error, "discarding unreadable snapshot");
        }
    }
}
