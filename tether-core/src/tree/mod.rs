//! Presentation Tree
//!
//! An abstract document: a collection of elements addressable by ID, each
//! with a kind, string attributes, and presentation state (value, checked,
//! text). The binding layer only needs attribute lookup, query-by-predicate,
//! and state application, so no hierarchy is modeled.
//!
//! # Change Observers
//!
//! User-originated edits are represented by [`ElementTree::input`] and
//! [`ElementTree::toggle`], which update element state and then dispatch any
//! attached change observers. Programmatic setters (`set_value`,
//! `set_checked`, `set_text`) never dispatch — a render pass that writes
//! into a bound element must not be mistaken for a user edit, or every
//! render would feed back into the mutation pipeline.
//!
//! Observers are invoked with the tree lock released, so an observer is free
//! to query and mutate the tree (and trigger renders) reentrantly.
//!
//! Operations addressed to a removed element are no-ops.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use indexmap::IndexMap;

/// Counter for generating unique element IDs.
static ELEMENT_ID_COUNTER: AtomicU64 = AtomicU64::new(0);

fn next_element_id() -> ElementId {
    ElementId(ELEMENT_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
}

/// Unique identifier for an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(u64);

/// The kind of an element, which decides how a bound value is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// Single-line input control; bound values apply to `value`.
    Input,

    /// Toggle control; bound values apply to `checked`.
    Checkbox,

    /// Selection control; bound values apply to `value`.
    Select,

    /// Multi-line input control; bound values apply to text content.
    TextArea,

    /// Non-interactive element; bound values apply to text content.
    Display,
}

/// Observer invoked after a user-originated edit to an element.
pub type ChangeObserver = Arc<dyn Fn(&ElementTree, ElementId) + Send + Sync>;

/// One element: kind, attributes, and presentation state.
pub struct Element {
    id: ElementId,
    kind: ElementKind,
    attrs: IndexMap<String, String>,
    value: String,
    checked: bool,
    text: String,
    observers: Vec<ChangeObserver>,
}

impl Element {
    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    /// Attribute value, if the attribute is present.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn checked(&self) -> bool {
        self.checked
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("attrs", &self.attrs)
            .field("observers", &self.observers.len())
            .finish()
    }
}

/// A shared handle to the abstract document.
pub struct ElementTree {
    elements: Arc<RwLock<IndexMap<ElementId, Element>>>,
}

impl ElementTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self {
            elements: Arc::new(RwLock::new(IndexMap::new())),
        }
    }

    /// Create an element of the given kind.
    pub fn create(&self, kind: ElementKind) -> ElementId {
        let id = next_element_id();
        let element = Element {
            id,
            kind,
            attrs: IndexMap::new(),
            value: String::new(),
            checked: false,
            text: String::new(),
            observers: Vec::new(),
        };
        self.elements
            .write()
            .expect("elements lock poisoned")
            .insert(id, element);
        id
    }

    /// Remove an element. Further operations on its ID are no-ops.
    pub fn remove(&self, id: ElementId) {
        self.elements
            .write()
            .expect("elements lock poisoned")
            .shift_remove(&id);
    }

    /// Set an attribute on an element.
    pub fn set_attr(&self, id: ElementId, name: &str, value: &str) {
        self.with_element_mut(id, |el| {
            el.attrs.insert(name.to_string(), value.to_string());
        });
    }

    /// Attribute value of an element.
    pub fn attr(&self, id: ElementId, name: &str) -> Option<String> {
        self.elements
            .read()
            .expect("elements lock poisoned")
            .get(&id)
            .and_then(|el| el.attrs.get(name).cloned())
    }

    /// Kind of an element, if it still exists.
    pub fn kind(&self, id: ElementId) -> Option<ElementKind> {
        self.elements
            .read()
            .expect("elements lock poisoned")
            .get(&id)
            .map(Element::kind)
    }

    /// IDs of all elements matching the predicate, in creation order.
    pub fn query<F>(&self, predicate: F) -> Vec<ElementId>
    where
        F: Fn(&Element) -> bool,
    {
        self.elements
            .read()
            .expect("elements lock poisoned")
            .values()
            .filter(|el| predicate(el))
            .map(Element::id)
            .collect()
    }

    /// Value state of an element; empty for missing elements.
    pub fn value(&self, id: ElementId) -> String {
        self.elements
            .read()
            .expect("elements lock poisoned")
            .get(&id)
            .map(|el| el.value.clone())
            .unwrap_or_default()
    }

    /// Set value state programmatically. Does not dispatch observers.
    pub fn set_value(&self, id: ElementId, value: &str) {
        self.with_element_mut(id, |el| el.value = value.to_string());
    }

    /// Checked state of an element; false for missing elements.
    pub fn checked(&self, id: ElementId) -> bool {
        self.elements
            .read()
            .expect("elements lock poisoned")
            .get(&id)
            .map(|el| el.checked)
            .unwrap_or(false)
    }

    /// Set checked state programmatically. Does not dispatch observers.
    pub fn set_checked(&self, id: ElementId, checked: bool) {
        self.with_element_mut(id, |el| el.checked = checked);
    }

    /// Text content of an element; empty for missing elements.
    pub fn text(&self, id: ElementId) -> String {
        self.elements
            .read()
            .expect("elements lock poisoned")
            .get(&id)
            .map(|el| el.text.clone())
            .unwrap_or_default()
    }

    /// Set text content programmatically. Does not dispatch observers.
    pub fn set_text(&self, id: ElementId, text: &str) {
        self.with_element_mut(id, |el| el.text = text.to_string());
    }

    /// Attach a change observer to an element.
    pub fn observe<F>(&self, id: ElementId, observer: F)
    where
        F: Fn(&ElementTree, ElementId) + Send + Sync + 'static,
    {
        self.with_element_mut(id, |el| el.observers.push(Arc::new(observer)));
    }

    /// Number of observers attached to an element.
    pub fn observer_count(&self, id: ElementId) -> usize {
        self.elements
            .read()
            .expect("elements lock poisoned")
            .get(&id)
            .map(|el| el.observers.len())
            .unwrap_or(0)
    }

    /// A user edit of a value-carrying element: apply, then dispatch.
    pub fn input(&self, id: ElementId, value: &str) {
        self.set_value(id, value);
        self.dispatch(id);
    }

    /// A user edit of a toggle element: apply, then dispatch.
    pub fn toggle(&self, id: ElementId, checked: bool) {
        self.set_checked(id, checked);
        self.dispatch(id);
    }

    fn dispatch(&self, id: ElementId) {
        // Clone the observer list so the lock is released before any
        // observer runs; observers may query and mutate the tree.
        let observers: Vec<ChangeObserver> = {
            let elements = self.elements.read().expect("elements lock poisoned");
            match elements.get(&id) {
                Some(el) => el.observers.clone(),
                None => return,
            }
        };

        for observer in observers {
            observer(self, id);
        }
    }

    fn with_element_mut<F>(&self, id: ElementId, apply: F)
    where
        F: FnOnce(&mut Element),
    {
        let mut elements = self.elements.write().expect("elements lock poisoned");
        if let Some(el) = elements.get_mut(&id) {
            apply(el);
        }
    }
}

impl Clone for ElementTree {
    fn clone(&self) -> Self {
        Self {
            elements: Arc::clone(&self.elements),
        }
    }
}

impl Default for ElementTree {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ElementTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let elements = self.elements.read().expect("elements lock poisoned");
        f.debug_struct("ElementTree")
            .field("elements", &elements.len())
            .finish()
    }
}
