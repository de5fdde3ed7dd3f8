//! View rebuild integration tests
//!
//! These tests drive a view through the same notify/rebuild loop a host
//! application runs: every store write is followed by a change notification
//! listing the written keys, and the view is expected to stay consistent
//! without recomputing its own echoed writes.

use std::collections::BTreeMap;
use std::sync::Arc;

use graphview_core::{
    edgetype::StoreEdgeTypeRegistry,
    store::{Document, DocumentStore, MemoryStore},
    view::{Position, ViewAbstraction},
};

/// Helper wiring a store, registry and view the way an embedding host does.
fn host_setup(label: &str) -> (Arc<MemoryStore>, ViewAbstraction) {
    let store = MemoryStore::new();
    let types = StoreEdgeTypeRegistry::new(store.clone());
    let mut view = ViewAbstraction::open(store.clone(), types, label);
    view.create();
    (store, view)
}

/// Write through the store and deliver the change notification, the way an
/// external editor session would.
fn external_write(store: &Arc<MemoryStore>, view: &mut ViewAbstraction, doc: Document) -> Vec<String> {
    let key = doc.key.clone();
    store.put(doc);
    view.refresh(&[key])
}

#[test]
fn test_notification_loop_with_external_edits() {
    let (store, mut view) = host_setup("default");

    // An external edit to the node filter refreshes exactly that role.
    let refreshed = external_write(
        &store,
        &mut view,
        Document::new("views/default/filter/nodes").with_field("filter", "[prefix[docs/]]"),
    );
    assert_eq!(refreshed, vec!["views/default/filter/nodes"]);
    assert_eq!(view.node_filter(false).expression, "[prefix[docs/]]");

    // An external edit to the position map refreshes exactly that role.
    let refreshed = external_write(
        &store,
        &mut view,
        Document::new("views/default/map")
            .with_field("positions", r#"{"docs/alpha":{"x":10.0,"y":20.0}}"#),
    );
    assert_eq!(refreshed, vec!["views/default/map"]);
    assert_eq!(
        view.positions(false).get("docs/alpha"),
        Some(&Position { x: 10.0, y: 20.0 })
    );

    // An external config edit invalidates everything.
    let mut root = store.get("views/default").unwrap();
    root.set_field("config.layout.active", "physics");
    let refreshed = external_write(&store, &mut view, root);
    assert_eq!(refreshed.len(), 4);
    assert_eq!(view.config_value("layout.active").as_deref(), Some("physics"));
    assert_eq!(view.node_filter(false).expression, "[prefix[docs/]]");
}

#[test]
fn test_own_writes_do_not_feed_back() {
    let (store, mut view) = host_setup("default");

    // A host session batches its notifications; a setter followed by the
    // echoed notification must be a net no-op for the rebuild engine.
    view.set_node_filter("[prefix[docs/]]", false);
    view.set_config_value("layout.active", "hierarchical");
    let mut positions = BTreeMap::new();
    positions.insert("docs/alpha".to_string(), Position { x: 1.0, y: 2.0 });
    view.set_positions(positions);

    let echoed: Vec<String> = vec![
        "views/default".to_string(),
        "views/default/map".to_string(),
        "views/default/filter/nodes".to_string(),
    ];
    assert!(view.refresh(&echoed).is_empty());

    // The suppression was consumed; the same batch now refreshes normally,
    // and the cached values still match what the setters persisted.
    assert_eq!(view.refresh(&echoed).len(), 4);
    assert_eq!(
        view.config_value("layout.active").as_deref(),
        Some("hierarchical")
    );
    assert_eq!(view.node_filter(false).expression, "[prefix[docs/]]");
    assert_eq!(view.positions(false).len(), 1);

    let doc = store.get("views/default/filter/nodes").unwrap();
    assert_eq!(doc.field("filter"), Some("[prefix[docs/]]"));
}

#[test]
fn test_mixed_batch_interleaves_suppressed_and_external() {
    let (store, mut view) = host_setup("default");

    // One batch carries this view's own filter write, an external position
    // edit, an unrelated content edit, and a sibling view's key.
    view.set_node_filter("[prefix[docs/]]", false);
    store.put(
        Document::new("views/default/map")
            .with_field("positions", r#"{"docs/alpha":{"x":3.0,"y":4.0}}"#),
    );
    store.put(Document::new("docs/alpha").with_field("text", "content"));
    store.put(Document::new("views/other").with_field("graph-view", "true"));

    let batch: Vec<String> = vec![
        "views/default/filter/nodes".to_string(),
        "views/default/map".to_string(),
        "docs/alpha".to_string(),
        "views/other".to_string(),
    ];
    assert_eq!(view.refresh(&batch), vec!["views/default/map"]);
    assert_eq!(view.positions(false).len(), 1);
    assert_eq!(view.node_filter(false).expression, "[prefix[docs/]]");
}

#[test]
fn test_two_views_share_a_store_independently() {
    let store = MemoryStore::new();
    let types = StoreEdgeTypeRegistry::new(store.clone());
    let mut alpha = ViewAbstraction::open(store.clone(), types.clone(), "alpha");
    let mut beta = ViewAbstraction::open(store.clone(), types, "beta");
    alpha.create();
    beta.create();

    alpha.set_node_filter("[prefix[docs/]]", false);
    let batch = vec!["views/alpha/filter/nodes".to_string()];

    // Alpha suppresses its own echo; beta ignores a foreign key entirely.
    assert!(alpha.refresh(&batch).is_empty());
    assert!(beta.refresh(&batch).is_empty());
    assert_eq!(beta.node_filter(false).expression, "");

    // Destroying beta leaves alpha's documents untouched.
    beta.destroy();
    assert!(store.exists("views/alpha/filter/nodes"));
    assert!(!store.exists("views/beta"));
    assert_eq!(alpha.node_filter(false).expression, "[prefix[docs/]]");
}

#[test]
fn test_rename_then_notification_loop_continues() {
    let (store, mut view) = host_setup("alpha");
    view.set_node_filter("[prefix[docs/]]", false);

    view.rename("beta");
    assert_eq!(view.root(), Some("views/beta"));

    // Notifications for the old keys are now foreign and ignored; the new
    // keys participate in the loop as usual.
    assert!(view
        .refresh(&["views/alpha/filter/nodes".to_string()])
        .is_empty());
    let refreshed = external_write(
        &store,
        &mut view,
        Document::new("views/beta/filter/nodes").with_field("filter", "[all[]]"),
    );
    assert_eq!(refreshed, vec!["views/beta/filter/nodes"]);
    assert_eq!(view.node_filter(false).expression, "[all[]]");
}
