//! Reactive Models
//!
//! This module implements the model side of the runtime: the record schema,
//! the intercepting handle, the member visibility rules, and the instance
//! registry.
//!
//! # Concepts
//!
//! ## Models
//!
//! A model is a dynamic record: named fields holding JSON values, plus named
//! zero-argument derived accessors. Every field write goes through the
//! handle's interception pipeline, which persists and re-renders as needed.
//!
//! ## Visibility
//!
//! A member's name classifies it: `__`-prefixed members are private,
//! `endpoint` is remote configuration, everything else is public state.
//! Only public state is persisted, sent in payloads, or bindable.
//!
//! ## Identity
//!
//! Each model is constructed with a caller-supplied instance name used for
//! the registry key, the storage key, and the binding-expression prefix. At
//! most one live instance per name; the last registration wins.

mod handle;
mod registry;
mod schema;
pub mod visibility;

pub use handle::Model;
pub use registry::ModelRegistry;
pub use schema::{Accessor, FieldView, ModelSchema, ModelSchemaBuilder};
pub use visibility::Visibility;
