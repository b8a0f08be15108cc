//! Declarative Bindings
//!
//! This module connects models to the presentation tree. Elements opt in by
//! carrying a binding attribute whose value is a binding expression:
//!
//! - [`BIND_ATTR`] (`data-bind`) — one-way, render-only propagation from
//!   model to element.
//! - [`SYNC_ATTR`] (`data-sync`) — two-way; additionally wired to change
//!   observers that route user edits back into the model.
//!
//! A binding expression is `"<name>.<path>"` where `name` is a model
//! instance name and `path` is an accessor or field name, optionally dotted
//! for nested access.

mod render;
mod resolve;
mod wire;

pub use render::update_tree;
pub use resolve::{display, resolve, truthy};
pub use wire::Binder;

/// Attribute holding a one-way (render-only) binding expression.
pub const BIND_ATTR: &str = "data-bind";

/// Attribute holding a two-way binding expression.
pub const SYNC_ATTR: &str = "data-sync";

/// Split a binding expression into `(instance name, path)`.
pub(crate) fn split_expression(expr: &str) -> Option<(&str, &str)> {
    let (name, path) = expr.split_once('.')?;
    if name.is_empty() || path.is_empty() {
        return None;
    }
    Some((name, path))
}
