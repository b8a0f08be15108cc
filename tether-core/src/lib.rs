//! Tether Core
//!
//! This crate provides the core runtime for the Tether reactive model
//! binding library. It implements:
//!
//! - Reactive models (intercepted field writes with a persist/render pipeline)
//! - Declarative bindings between models and presentation elements
//! - Snapshot persistence to an abstract key-value store
//! - Optional synchronization with a remote HTTP endpoint
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - `model`: reactive model handles, schemas, and the instance registry
//! - `store`: the abstract storage trait and snapshot persistence
//! - `bind`: binding resolution, render synchronization, and two-way wiring
//! - `tree`: the abstract presentation tree the bindings target
//! - `remote`: the HTTP fetch/send contract layered on top of the pipeline
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use serde_json::json;
//! use tether_core::{Binder, ElementKind, ElementTree, MemoryStore, ModelSchema};
//!
//! let tree = ElementTree::new();
//! let label = tree.create(ElementKind::Display);
//! tree.set_attr(label, "data-bind", "user.name");
//!
//! let binder = Binder::new(Arc::new(MemoryStore::new()), tree.clone());
//! let user = binder.model("user", ModelSchema::builder()
//!     .field("name", json!(""))
//!     .field("email", json!(""))
//!     .build());
//!
//! user.set("name", json!("John Doe"))?;
//! // The label now shows "John Doe" and the snapshot under "model:user"
//! // contains {"name":"John Doe","email":""}.
//! ```

pub mod bind;
pub mod error;
pub mod model;
pub mod remote;
pub mod store;
pub mod tree;

pub use bind::{Binder, BIND_ATTR, SYNC_ATTR};
pub use error::{Result, TetherError};
pub use model::{FieldView, Model, ModelRegistry, ModelSchema, Visibility};
pub use remote::RemoteClient;
pub use store::{MemoryStore, Store, StoreError};
pub use tree::{ElementId, ElementKind, ElementTree};
