//! Model Handle
//!
//! A `Model` is the intercepting façade over one record instance. Every
//! field write goes through [`Model::set`], which classifies the write and
//! runs the propagation pipeline:
//!
//! 1. Private and configuration writes apply directly, with no propagation.
//!
//! 2. A write that leaves the value unchanged applies but skips propagation,
//!    so re-setting the same value never re-persists or re-renders.
//!
//! 3. Any other write applies, then saves the snapshot, then re-renders
//!    every bound element, in that order. Persist-before-render keeps
//!    storage in agreement with what is displayed.
//!
//! Reads are transparent passthroughs; no interception logic runs on read.
//!
//! # Thread Safety
//!
//! The handle is cheap to clone and shares its interior. Field state is
//! protected by a RwLock; the persist and render steps run after the write
//! lock is released, so downstream observers may read the model freely.

use std::fmt;
use std::sync::{Arc, RwLock};

use indexmap::IndexMap;
use serde_json::Value;

use crate::bind;
use crate::error::Result;
use crate::store::{snapshot, Store};
use crate::tree::ElementTree;

use super::schema::{Accessor, FieldView, ModelSchema};
use super::visibility::{self, Visibility, ENDPOINT_FIELD};

struct ModelInner {
    name: String,
    fields: RwLock<IndexMap<String, Value>>,
    accessors: RwLock<IndexMap<String, Accessor>>,
    persist: bool,
    store: Arc<dyn Store>,
    tree: ElementTree,
}

/// A reactive model instance.
///
/// # Example
///
/// ```rust,ignore
/// let user = binder.model("user", schema);
///
/// user.set("name", json!("John Doe"))?;   // persists, then re-renders
/// assert_eq!(user.get("name"), Some(json!("John Doe")));
/// ```
pub struct Model {
    inner: Arc<ModelInner>,
}

impl Model {
    pub(crate) fn new(
        name: &str,
        schema: ModelSchema,
        persist: bool,
        store: Arc<dyn Store>,
        tree: ElementTree,
    ) -> Self {
        Self {
            inner: Arc::new(ModelInner {
                name: name.to_string(),
                fields: RwLock::new(schema.fields),
                accessors: RwLock::new(schema.accessors),
                persist,
                store,
                tree,
            }),
        }
    }

    /// The instance name this model is registered and persisted under.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Whether accepted writes are persisted to the store.
    pub fn persist_enabled(&self) -> bool {
        self.inner.persist
    }

    /// Current value of a field.
    pub fn get(&self, field: &str) -> Option<Value> {
        self.inner
            .fields
            .read()
            .expect("fields lock poisoned")
            .get(field)
            .cloned()
    }

    /// Whether the model currently holds a field of this name.
    pub fn has_field(&self, field: &str) -> bool {
        self.inner
            .fields
            .read()
            .expect("fields lock poisoned")
            .contains_key(field)
    }

    /// Whether a derived accessor of this name is registered.
    pub fn has_accessor(&self, name: &str) -> bool {
        self.inner
            .accessors
            .read()
            .expect("accessors lock poisoned")
            .contains_key(name)
    }

    /// Invoke a derived accessor against the current fields.
    pub fn invoke(&self, name: &str) -> Option<Value> {
        let accessor = self
            .inner
            .accessors
            .read()
            .expect("accessors lock poisoned")
            .get(name)
            .cloned()?;

        let fields = self.inner.fields.read().expect("fields lock poisoned");
        Some(accessor(&FieldView::new(&fields)))
    }

    /// The configured remote endpoint, if any.
    pub fn endpoint(&self) -> Option<String> {
        self.inner
            .fields
            .read()
            .expect("fields lock poisoned")
            .get(ENDPOINT_FIELD)
            .and_then(Value::as_str)
            .map(str::to_owned)
    }

    /// The public-field state: what gets persisted and sent as a payload.
    ///
    /// Private members and the `endpoint` configuration field never appear
    /// here, regardless of their values.
    pub fn public_fields(&self) -> IndexMap<String, Value> {
        self.inner
            .fields
            .read()
            .expect("fields lock poisoned")
            .iter()
            .filter(|(name, _)| visibility::is_public(name))
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect()
    }

    /// Write a field through the interception pipeline.
    ///
    /// Errors from the persist step propagate to the caller; the pipeline
    /// itself raises none of its own.
    pub fn set(&self, field: &str, value: Value) -> Result<()> {
        match visibility::of(field) {
            Visibility::Private | Visibility::Config => {
                // Internal bookkeeping and configuration bypass the pipeline.
                self.write_direct(field, value);
                return Ok(());
            }
            Visibility::Public => {}
        }

        // A name registered only as an accessor is not writable state.
        if !self.has_field(field) && self.has_accessor(field) {
            tracing::debug!(
                model = self.name(),
                field,
                "write to accessor-only member ignored"
            );
            return Ok(());
        }

        let changed = {
            let mut fields = self.inner.fields.write().expect("fields lock poisoned");
            let changed = fields.get(field) != Some(&value);
            fields.insert(field.to_string(), value);
            changed
        };

        // Idempotence: re-setting the current value never re-propagates.
        if !changed {
            return Ok(());
        }

        tracing::debug!(model = self.name(), field, "field changed");

        if self.inner.persist {
            snapshot::save(self)?;
        }
        bind::update_tree(self, &self.inner.tree);
        Ok(())
    }

    /// Replace a derived accessor.
    ///
    /// Applies directly with no propagation, like any other non-state write.
    pub fn set_accessor<F>(&self, name: &str, accessor: F)
    where
        F: Fn(&FieldView<'_>) -> Value + Send + Sync + 'static,
    {
        self.inner
            .accessors
            .write()
            .expect("accessors lock poisoned")
            .insert(name.to_string(), Arc::new(accessor));
    }

    /// Seed fields from a persisted snapshot, bypassing the pipeline.
    ///
    /// Only runs during construction, before the model is registered or
    /// bound, so the skipped persist and render passes are unobservable.
    /// Keys the schema does not declare are dropped, as are any that are
    /// not public state.
    pub(crate) fn hydrate(&self, stored: IndexMap<String, Value>) {
        let mut fields = self.inner.fields.write().expect("fields lock poisoned");
        for (name, value) in stored {
            if fields.contains_key(&name) && visibility::is_public(&name) {
                fields.insert(name, value);
            }
        }
    }

    pub(crate) fn store(&self) -> &dyn Store {
        self.inner.store.as_ref()
    }

    fn write_direct(&self, field: &str, value: Value) {
        self.inner
            .fields
            .write()
            .expect("fields lock poisoned")
            .insert(field.to_string(), value);
    }
}

impl Clone for Model {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl fmt::Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("name", &self.inner.name)
            .field(
                "fields",
                &*self.inner.fields.read().expect("fields lock poisoned"),
            )
            .field("persist", &self.inner.persist)
            .finish()
    }
}
