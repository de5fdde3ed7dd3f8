//! Shared test utilities for view testing

use std::sync::Arc;

use parking_lot::Mutex;

use crate::{
    edgetype::{EdgeTypeRegistry, StoreEdgeTypeRegistry},
    notify::Notifier,
    store::{Document, DocumentStore, MemoryStore},
    view::ViewAbstraction,
};

/// Initialize logging for tests
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init()
        .ok();
}

/// Notifier that records every message for assertion.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Arc<RecordingNotifier> {
        Arc::new(RecordingNotifier::default())
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages.lock().push(message.to_string());
    }
}

pub struct TestContext {
    pub store: Arc<MemoryStore>,
    pub types: Arc<StoreEdgeTypeRegistry>,
    pub notifier: Arc<RecordingNotifier>,
}

impl TestContext {
    pub fn new() -> TestContext {
        init_logging();
        let store = MemoryStore::new();
        let types = StoreEdgeTypeRegistry::new(store.clone());
        TestContext {
            store,
            types,
            notifier: RecordingNotifier::new(),
        }
    }

    /// Open a handle on `label` without creating any documents.
    pub fn open(&self, label: &str) -> ViewAbstraction {
        ViewAbstraction::open_with_notifier(
            self.store.clone(),
            self.types.clone(),
            self.notifier.clone(),
            label,
        )
    }

    /// Open and create a fresh view.
    pub fn create_view(&self, label: &str) -> ViewAbstraction {
        let mut view = self.open(label);
        view.create();
        assert!(view.exists());
        view
    }

    /// Register a few edge types and return their names.
    pub fn seed_edge_types(&self, names: &[&str]) {
        for name in names {
            self.types.persist(name);
        }
    }

    /// Write a plain content document, standing in for host wiki content.
    pub fn seed_document(&self, key: &str) {
        self.store
            .put(Document::new(key).with_field("text", "content"));
    }
}
