//! Edge type registry.
//!
//! Edge types are the named categories an edge can carry. Views consume the
//! registry as an opaque capability — existence check, creation, stable-id
//! lookup — through [`EdgeTypeRegistry`]. [`StoreEdgeTypeRegistry`] keeps
//! registry entries as documents under the `edgetypes/` prefix, one per type,
//! with a generated stable id field.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{
    paths::EDGE_TYPE_NAMESPACE,
    store::{Document, DocumentStore, KEY_SEPARATOR},
};

/// Field carrying an edge type's stable id.
pub const FIELD_EDGE_TYPE_ID: &str = "id";

/// Handle to a registered edge type, as surfaced by the type allow-list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeType {
    pub name: String,
    pub id: String,
}

/// Existence check, creation and stable-id lookup for named edge categories.
pub trait EdgeTypeRegistry: Send + Sync {
    fn exists(&self, name: &str) -> bool;

    /// Create the type if it does not exist yet. Idempotent.
    fn persist(&self, name: &str);

    fn get_id(&self, name: &str) -> Option<String>;
}

/// Registry key for a type name.
pub fn edge_type_key(name: &str) -> String {
    format!("{EDGE_TYPE_NAMESPACE}{KEY_SEPARATOR}{name}")
}

/// [`EdgeTypeRegistry`] persisting entries in the document store.
pub struct StoreEdgeTypeRegistry {
    store: Arc<dyn DocumentStore>,
}

impl StoreEdgeTypeRegistry {
    pub fn new(store: Arc<dyn DocumentStore>) -> Arc<StoreEdgeTypeRegistry> {
        Arc::new(StoreEdgeTypeRegistry { store })
    }
}

impl EdgeTypeRegistry for StoreEdgeTypeRegistry {
    fn exists(&self, name: &str) -> bool {
        self.store.exists(&edge_type_key(name))
    }

    fn persist(&self, name: &str) {
        if self.exists(name) {
            return;
        }
        tracing::debug!("Registering edge type '{name}'");
        let doc = Document::new(edge_type_key(name))
            .with_field(FIELD_EDGE_TYPE_ID, self.store.generate_uid());
        self.store.put(doc);
    }

    fn get_id(&self, name: &str) -> Option<String> {
        self.store
            .get(&edge_type_key(name))
            .and_then(|doc| doc.field(FIELD_EDGE_TYPE_ID).map(str::to_string))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_persist_exists_get_id() {
        let store = MemoryStore::new();
        let registry = StoreEdgeTypeRegistry::new(store.clone());

        assert!(!registry.exists("friend"));
        assert_eq!(registry.get_id("friend"), None);

        registry.persist("friend");
        assert!(registry.exists("friend"));
        let id = registry.get_id("friend").unwrap();
        assert!(!id.is_empty());

        // Idempotent: re-persisting keeps the stable id.
        registry.persist("friend");
        assert_eq!(registry.get_id("friend").unwrap(), id);
    }

    #[test]
    fn test_entries_live_under_namespace() {
        let store = MemoryStore::new();
        let registry = StoreEdgeTypeRegistry::new(store.clone());
        registry.persist("follows");
        assert!(store.exists("edgetypes/follows"));
    }
}
