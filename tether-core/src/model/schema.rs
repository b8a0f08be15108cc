//! Model Schema
//!
//! A schema declares the shape of a model up front: stored fields with their
//! default values, and zero-argument derived accessors computed from the
//! current fields. The schema is the explicit capability table the binding
//! resolver consults when deciding whether a path segment is invocable or a
//! plain field read; there is no runtime reflection involved.
//!
//! Declaration order is preserved, so a model's persisted snapshot always
//! serializes its fields in the same order.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;

use super::visibility::ENDPOINT_FIELD;

/// A zero-argument derived accessor computed from the model's current fields.
pub type Accessor = Arc<dyn Fn(&FieldView<'_>) -> Value + Send + Sync>;

/// Read-only view of a model's fields, handed to derived accessors.
pub struct FieldView<'a> {
    fields: &'a IndexMap<String, Value>,
}

impl<'a> FieldView<'a> {
    pub(crate) fn new(fields: &'a IndexMap<String, Value>) -> Self {
        Self { fields }
    }

    /// Current value of a field, if present.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Current value of a field as a string slice, if it is a string.
    pub fn str(&self, name: &str) -> &str {
        self.fields.get(name).and_then(Value::as_str).unwrap_or("")
    }
}

/// The declared shape of a model: default fields plus derived accessors.
pub struct ModelSchema {
    pub(crate) fields: IndexMap<String, Value>,
    pub(crate) accessors: IndexMap<String, Accessor>,
}

impl ModelSchema {
    /// Start declaring a schema.
    pub fn builder() -> ModelSchemaBuilder {
        ModelSchemaBuilder {
            fields: IndexMap::new(),
            accessors: IndexMap::new(),
        }
    }
}

impl fmt::Debug for ModelSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelSchema")
            .field("fields", &self.fields)
            .field("accessors", &self.accessors.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Builder for [`ModelSchema`].
pub struct ModelSchemaBuilder {
    fields: IndexMap<String, Value>,
    accessors: IndexMap<String, Accessor>,
}

impl ModelSchemaBuilder {
    /// Declare a stored field with its default value.
    pub fn field(mut self, name: impl Into<String>, default: Value) -> Self {
        self.fields.insert(name.into(), default);
        self
    }

    /// Declare the remote endpoint this model synchronizes against.
    ///
    /// Shorthand for declaring the reserved `endpoint` configuration field.
    pub fn endpoint(self, url: impl Into<String>) -> Self {
        self.field(ENDPOINT_FIELD, Value::String(url.into()))
    }

    /// Declare a zero-argument derived accessor.
    pub fn accessor<F>(mut self, name: impl Into<String>, accessor: F) -> Self
    where
        F: Fn(&FieldView<'_>) -> Value + Send + Sync + 'static,
    {
        self.accessors.insert(name.into(), Arc::new(accessor));
        self
    }

    /// Finish the declaration.
    pub fn build(self) -> ModelSchema {
        ModelSchema {
            fields: self.fields,
            accessors: self.accessors,
        }
    }
}
