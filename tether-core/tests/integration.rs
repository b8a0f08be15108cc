//! Integration Tests for the Binding Runtime
//!
//! These tests verify that models, persistence, rendering, and two-way
//! wiring work together correctly.

use std::sync::Arc;

use serde_json::json;
use tether_core::{
    Binder, ElementKind, ElementTree, MemoryStore, ModelSchema, Store, BIND_ATTR, SYNC_ATTR,
};

fn binder_with_store() -> (Binder, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let binder = Binder::new(store.clone(), ElementTree::new());
    (binder, store)
}

fn user_schema() -> ModelSchema {
    ModelSchema::builder()
        .field("name", json!(""))
        .field("email", json!(""))
        .accessor("full_contact", |f| {
            json!(format!("{} <{}>", f.str("name"), f.str("email")))
        })
        .build()
}

/// Test the end-to-end scenario: one write updates memory, storage, and
/// every bound element.
#[test]
fn write_propagates_to_storage_and_elements() {
    let (binder, store) = binder_with_store();
    let label = binder.tree().create(ElementKind::Display);
    binder.tree().set_attr(label, BIND_ATTR, "user.name");

    let user = binder.model("user", user_schema());
    user.set("name", json!("John Doe")).unwrap();

    assert_eq!(user.get("name"), Some(json!("John Doe")));
    assert_eq!(
        store.get("model:user").unwrap(),
        r#"{"name":"John Doe","email":""}"#
    );
    assert_eq!(binder.tree().text(label), "John Doe");
}

/// Test that re-setting the current value leaves the serialized snapshot
/// byte-for-byte identical.
#[test]
fn idempotent_writes_are_byte_stable() {
    let (binder, store) = binder_with_store();
    let user = binder.model("user", user_schema());

    user.set("name", json!("Alice")).unwrap();
    let before = store.get("model:user").unwrap();

    user.set("name", json!("Alice")).unwrap();
    assert_eq!(store.get("model:user").unwrap(), before);
}

/// Test that private members and `endpoint` never reach storage.
#[test]
fn snapshot_excludes_private_and_configuration() {
    let (binder, store) = binder_with_store();
    let schema = ModelSchema::builder()
        .field("name", json!(""))
        .field("__attempts", json!(3))
        .endpoint("https://api.example.com/user")
        .build();
    let user = binder.model("user", schema);

    user.set("name", json!("Alice")).unwrap();

    let raw = store.get("model:user").unwrap();
    assert_eq!(raw, r#"{"name":"Alice"}"#);
}

/// Test that a model constructed over an existing snapshot starts from the
/// stored state.
#[test]
fn construction_restores_the_snapshot() {
    let (binder, store) = binder_with_store();
    store
        .set("model:user", r#"{"name":"Alice","email":"a@x.com"}"#)
        .unwrap();

    let user = binder.model("user", user_schema());

    assert_eq!(user.get("name"), Some(json!("Alice")));
    assert_eq!(user.get("email"), Some(json!("a@x.com")));
}

/// Test that a corrupt snapshot is discarded and construction proceeds with
/// declared defaults.
#[test]
fn corrupt_snapshot_never_prevents_construction() {
    let (binder, store) = binder_with_store();
    store.set("model:user", "][ definitely not json").unwrap();

    let user = binder.model("user", user_schema());

    assert_eq!(user.get("name"), Some(json!("")));
    assert_eq!(user.get("email"), Some(json!("")));
}

/// Test that an element bound to a derived accessor updates whenever a field
/// the accessor reads is mutated.
#[test]
fn accessor_bindings_track_their_inputs() {
    let (binder, _store) = binder_with_store();
    let label = binder.tree().create(ElementKind::Display);
    binder.tree().set_attr(label, BIND_ATTR, "user.full_contact");

    let user = binder.model("user", user_schema());
    user.set("name", json!("Alice")).unwrap();
    user.set("email", json!("a@x.com")).unwrap();

    assert_eq!(binder.tree().text(label), "Alice <a@x.com>");
}

/// Test the two-way checkbox contract in both directions.
#[test]
fn checkbox_two_way_binding_round_trips() {
    let (binder, _store) = binder_with_store();
    let checkbox = binder.tree().create(ElementKind::Checkbox);
    binder
        .tree()
        .set_attr(checkbox, SYNC_ATTR, "settings.notifications");

    let settings = binder.model(
        "settings",
        ModelSchema::builder()
            .field("notifications", json!(false))
            .build(),
    );

    // Control -> model.
    binder.tree().toggle(checkbox, true);
    assert_eq!(settings.get("notifications"), Some(json!(true)));

    // Model -> control.
    settings.set("notifications", json!(false)).unwrap();
    assert!(!binder.tree().checked(checkbox));
}

/// Test that independently named models never observe each other's writes
/// or storage entries.
#[test]
fn instances_are_isolated() {
    let (binder, store) = binder_with_store();
    let alice = binder.model("alice", user_schema());
    let bob = binder.model("bob", user_schema());

    alice.set("name", json!("Alice")).unwrap();
    bob.set("name", json!("Bob")).unwrap();

    assert_eq!(alice.get("name"), Some(json!("Alice")));
    assert_eq!(bob.get("name"), Some(json!("Bob")));
    assert_eq!(
        store.get("model:alice").unwrap(),
        r#"{"name":"Alice","email":""}"#
    );
    assert_eq!(
        store.get("model:bob").unwrap(),
        r#"{"name":"Bob","email":""}"#
    );
}

/// Test that disabling persistence skips storage while rendering still
/// occurs.
#[test]
fn persistence_can_be_disabled_per_model() {
    let (binder, store) = binder_with_store();
    let label = binder.tree().create(ElementKind::Display);
    binder.tree().set_attr(label, BIND_ATTR, "scratch.note");

    let scratch = binder.model_with_options(
        "scratch",
        ModelSchema::builder().field("note", json!("")).build(),
        false,
    );
    scratch.set("note", json!("ephemeral")).unwrap();

    assert_eq!(binder.tree().text(label), "ephemeral");
    assert!(store.get("model:scratch").is_none());
}

/// Test that a user edit re-renders every element bound to the same field,
/// including the one that originated the change.
#[test]
fn edits_fan_out_to_all_bound_elements() {
    let (binder, _store) = binder_with_store();
    let input = binder.tree().create(ElementKind::Input);
    binder.tree().set_attr(input, SYNC_ATTR, "user.name");
    let greeting = binder.tree().create(ElementKind::Display);
    binder.tree().set_attr(greeting, BIND_ATTR, "user.full_contact");

    binder.model("user", user_schema());
    binder.tree().input(input, "Alice");

    assert_eq!(binder.tree().value(input), "Alice");
    assert_eq!(binder.tree().text(greeting), "Alice <>");
}

/// Test that registration order does not matter: elements first, model
/// later, edits still arrive.
#[test]
fn late_model_registration_attaches_pending_bindings() {
    let (binder, _store) = binder_with_store();
    let input = binder.tree().create(ElementKind::Input);
    binder.tree().set_attr(input, SYNC_ATTR, "user.name");
    binder.wire();

    // Edit before the model exists: dropped with a warning, not fatal.
    binder.tree().input(input, "lost");

    let user = binder.model("user", user_schema());
    binder.tree().input(input, "Alice");

    assert_eq!(user.get("name"), Some(json!("Alice")));
}

/// Test that re-registering a name routes subsequent edits to the new
/// instance.
#[test]
fn last_registration_wins_for_edits() {
    let (binder, _store) = binder_with_store();
    let input = binder.tree().create(ElementKind::Input);
    binder.tree().set_attr(input, SYNC_ATTR, "user.name");

    let first = binder.model("user", user_schema());
    let second = binder.model("user", user_schema());

    binder.tree().input(input, "Alice");

    assert_eq!(second.get("name"), Some(json!("Alice")));
    assert_eq!(first.get("name"), Some(json!("")));
}
