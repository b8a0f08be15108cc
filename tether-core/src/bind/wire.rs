//! Binding Wiring
//!
//! The [`Binder`] owns the pieces a model needs at construction time — the
//! store, the presentation tree, and the registry — and wires two-way bound
//! elements to their models.
//!
//! Wiring is push-based: registering a model flushes the wiring scan and
//! renders the new model, so bindings attach regardless of the order in
//! which models and elements appear. Elements already wired are tracked by
//! identity and never receive a duplicate observer, making repeated scans
//! idempotent.
//!
//! Observers look their model up in the registry at event time. An edit
//! addressed to a name with no registered model is dropped with a warning,
//! never an error into the presentation layer's event handling.

use std::collections::HashSet;
use std::sync::{Arc, RwLock};

use serde_json::Value;

use crate::model::{Model, ModelRegistry, ModelSchema};
use crate::store::{snapshot, Store};
use crate::tree::{ElementId, ElementKind, ElementTree};

use super::{render, split_expression, SYNC_ATTR};

/// Construction and wiring hub: owns the store, tree, and registry.
pub struct Binder {
    store: Arc<dyn Store>,
    tree: ElementTree,
    registry: ModelRegistry,
    wired: Arc<RwLock<HashSet<ElementId>>>,
}

impl Binder {
    /// Create a binder over a store and a presentation tree.
    pub fn new(store: Arc<dyn Store>, tree: ElementTree) -> Self {
        Self {
            store,
            tree,
            registry: ModelRegistry::new(),
            wired: Arc::new(RwLock::new(HashSet::new())),
        }
    }

    /// The registry this binder routes two-way edits through.
    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    /// The presentation tree this binder scans and renders into.
    pub fn tree(&self) -> &ElementTree {
        &self.tree
    }

    /// Construct, restore, register, and bind a persisted model.
    ///
    /// Construction never fails: a missing snapshot is a no-op and a corrupt
    /// one is discarded with a warning.
    pub fn model(&self, name: &str, schema: ModelSchema) -> Model {
        self.model_with_options(name, schema, true)
    }

    /// Construct a model; with `persist` false, construction skips restore
    /// and subsequent writes skip the persist step, while render still
    /// occurs.
    pub fn model_with_options(&self, name: &str, schema: ModelSchema, persist: bool) -> Model {
        let model = Model::new(
            name,
            schema,
            persist,
            Arc::clone(&self.store),
            self.tree.clone(),
        );
        if persist {
            snapshot::restore(&model);
        }
        self.registry.register(model.clone());

        // Registration flushes wiring, so bindings attach no matter which of
        // the model or its elements appeared first.
        self.wire();
        render::update_tree(&model, &self.tree);
        model
    }

    /// Scan for two-way bound elements and attach change observers.
    ///
    /// Idempotent: an element is wired at most once, however often the scan
    /// runs.
    pub fn wire(&self) {
        let candidates = self.tree.query(|el| el.attr(SYNC_ATTR).is_some());

        for id in candidates {
            let newly_wired = self
                .wired
                .write()
                .expect("wired lock poisoned")
                .insert(id);
            if !newly_wired {
                continue;
            }

            let registry = self.registry.clone();
            self.tree.observe(id, move |tree, id| {
                forward_edit(&registry, tree, id);
            });
            tracing::debug!(element = ?id, "two-way binding attached");
        }
    }
}

/// Route a user edit back into its model through the interception pipeline.
fn forward_edit(registry: &ModelRegistry, tree: &ElementTree, id: ElementId) {
    let expr = match tree.attr(id, SYNC_ATTR) {
        Some(expr) => expr,
        None => return,
    };

    let (name, field) = match split_expression(&expr) {
        Some(parts) => parts,
        None => {
            tracing::warn!(%expr, "malformed binding expression");
            return;
        }
    };

    let model = match registry.get(name) {
        Some(model) => model,
        None => {
            tracing::warn!(model = name, "edit for unregistered model dropped");
            return;
        }
    };

    let value = match tree.kind(id) {
        Some(ElementKind::Checkbox) => Value::Bool(tree.checked(id)),
        Some(_) => Value::String(tree.value(id)),
        None => return,
    };

    if let Err(error) = model.set(field, value) {
        tracing::warn!(model = name, field, %error, "reverse write failed");
    }
}
