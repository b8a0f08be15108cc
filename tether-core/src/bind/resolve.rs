//! Binding Resolver
//!
//! Evaluates the path side of a binding expression against a model. The
//! first segment resolves against the model itself — a registered derived
//! accessor wins over a stored field of the same name — and any further
//! segments index into JSON object values.
//!
//! Resolution never fails: an absent intermediate, a terminal null, or a
//! non-public member short-circuits to nothing, which renders as an empty
//! string. A binding to a not-yet-populated field shows blank, it does not
//! raise into the presentation layer.

use serde_json::Value;

use crate::model::{visibility, Model};

/// Resolve a dotted path against a model.
pub fn resolve(model: &Model, path: &str) -> Option<Value> {
    let mut segments = path.split('.');
    let head = segments.next()?;

    // Private members and configuration are never bindable.
    if !visibility::is_public(head) {
        return None;
    }

    let mut current = match model.invoke(head) {
        Some(value) => value,
        None => model.get(head)?,
    };

    for segment in segments {
        current = current.get(segment)?.clone();
    }

    if current.is_null() {
        None
    } else {
        Some(current)
    }
}

/// Render a resolved value for presentation.
///
/// Nothing and null render as the empty string; strings render unquoted;
/// everything else renders as compact JSON.
pub fn display(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Truthiness of a resolved value, for checked-state application.
pub fn truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Model, ModelSchema};
    use crate::store::MemoryStore;
    use crate::tree::ElementTree;
    use serde_json::json;
    use std::sync::Arc;

    fn model() -> Model {
        let schema = ModelSchema::builder()
            .field("name", json!("Ada"))
            .field("address", json!({"city": "London", "country": null}))
            .field("nickname", json!(null))
            .field("__token", json!("secret"))
            .accessor("shout", |f| json!(f.str("name").to_uppercase()))
            .field("shadowed", json!("field"))
            .accessor("shadowed", |_| json!("accessor"))
            .build();
        Model::new(
            "user",
            schema,
            false,
            Arc::new(MemoryStore::new()),
            ElementTree::new(),
        )
    }

    #[test]
    fn resolves_a_plain_field() {
        assert_eq!(resolve(&model(), "name"), Some(json!("Ada")));
    }

    #[test]
    fn accessor_wins_over_field() {
        let model = model();
        assert_eq!(resolve(&model, "shout"), Some(json!("ADA")));
        assert_eq!(resolve(&model, "shadowed"), Some(json!("accessor")));
    }

    #[test]
    fn dotted_paths_index_into_objects() {
        assert_eq!(resolve(&model(), "address.city"), Some(json!("London")));
    }

    #[test]
    fn absent_members_resolve_to_nothing() {
        let model = model();
        assert_eq!(resolve(&model, "missing"), None);
        assert_eq!(resolve(&model, "address.street"), None);
        assert_eq!(resolve(&model, "name.further"), None);
    }

    #[test]
    fn nulls_resolve_to_nothing() {
        let model = model();
        assert_eq!(resolve(&model, "nickname"), None);
        assert_eq!(resolve(&model, "address.country"), None);
    }

    #[test]
    fn private_members_are_not_bindable() {
        assert_eq!(resolve(&model(), "__token"), None);
    }

    #[test]
    fn display_renders_blank_strings_and_json() {
        assert_eq!(display(None), "");
        assert_eq!(display(Some(&json!(null))), "");
        assert_eq!(display(Some(&json!("plain"))), "plain");
        assert_eq!(display(Some(&json!(42))), "42");
        assert_eq!(display(Some(&json!(true))), "true");
        assert_eq!(display(Some(&json!([1, 2]))), "[1,2]");
    }

    #[test]
    fn truthiness_follows_presentation_conventions() {
        assert!(!truthy(None));
        assert!(!truthy(Some(&json!(null))));
        assert!(!truthy(Some(&json!(false))));
        assert!(truthy(Some(&json!(true))));
        assert!(!truthy(Some(&json!(0))));
        assert!(truthy(Some(&json!(1))));
        assert!(!truthy(Some(&json!(""))));
        assert!(truthy(Some(&json!("x"))));
        assert!(truthy(Some(&json!([]))));
        assert!(truthy(Some(&json!({}))));
    }
}
