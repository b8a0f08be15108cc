//! Render Sync
//!
//! Pushes a model's current state into every element bound to it. This is a
//! full re-scan on every mutation: query the tree for elements whose binding
//! attribute carries this model's prefix, resolve each path, and re-apply
//! the value according to element kind. There is no diffing and no batching
//! across synchronous mutations; the cost is linear in the number of bound
//! elements.
//!
//! Two-way bound elements are re-applied as well — including the element
//! that originated a change, so it always reflects model-normalized state.

use crate::model::Model;
use crate::tree::{ElementId, ElementKind, ElementTree};

use super::resolve::{display, resolve, truthy};
use super::{BIND_ATTR, SYNC_ATTR};

/// Re-apply resolved values to every element bound to `model`.
pub fn update_tree(model: &Model, tree: &ElementTree) {
    let prefix = format!("{}.", model.name());

    let bound = tree.query(|el| {
        [BIND_ATTR, SYNC_ATTR].iter().any(|attr| {
            el.attr(attr)
                .is_some_and(|expr| expr.starts_with(&prefix))
        })
    });

    for id in bound {
        for attr in [BIND_ATTR, SYNC_ATTR] {
            let path = tree
                .attr(id, attr)
                .and_then(|expr| expr.strip_prefix(&prefix).map(str::to_owned));
            if let Some(path) = path {
                apply(model, tree, id, &path);
            }
        }
    }
}

fn apply(model: &Model, tree: &ElementTree, id: ElementId, path: &str) {
    let value = resolve(model, path);
    match tree.kind(id) {
        Some(ElementKind::Checkbox) => tree.set_checked(id, truthy(value.as_ref())),
        Some(ElementKind::Input) | Some(ElementKind::Select) => {
            tree.set_value(id, &display(value.as_ref()));
        }
        Some(ElementKind::TextArea) | Some(ElementKind::Display) => {
            tree.set_text(id, &display(value.as_ref()));
        }
        None => {}
    }
}
