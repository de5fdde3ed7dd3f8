//! Document store adapter.
//!
//! Views do not own their persistence: they read and write field-bearing
//! records in a host-provided key/value document store. [`DocumentStore`] is
//! the exact surface the view layer consumes — key-based CRUD, prefix and
//! compiled-filter queries, and unique id generation. Hosts adapt their own
//! store behind this trait; [`MemoryStore`] is the in-process reference
//! implementation used by tests and embedders without a host store.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::filter::CompiledFilter;

/// Separator character for hierarchical document keys.
pub const KEY_SEPARATOR: char = '/';

/// A field-bearing record keyed by a hierarchical string path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub key: String,
    pub fields: BTreeMap<String, String>,
}

impl Document {
    pub fn new<K: Into<String>>(key: K) -> Document {
        Document {
            key: key.into(),
            fields: BTreeMap::new(),
        }
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn set_field<V: Into<String>>(&mut self, name: &str, value: V) {
        self.fields.insert(name.to_string(), value.into());
    }

    pub fn with_field<V: Into<String>>(mut self, name: &str, value: V) -> Document {
        self.set_field(name, value);
        self
    }
}

/// Key-based CRUD and query surface over a document corpus.
///
/// All operations are synchronous and in-process. The store is treated as
/// effectively single-writer from the view layer's perspective: external
/// mutation of view documents without a change notification desynchronizes
/// the cache by contract.
pub trait DocumentStore: Send + Sync {
    fn get(&self, key: &str) -> Option<Document>;

    fn put(&self, doc: Document);

    fn remove(&self, keys: &[String]);

    fn exists(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// All keys currently in the corpus, in key order.
    fn all_keys(&self) -> Vec<String>;

    fn keys_with_prefix(&self, prefix: &str) -> Vec<String>;

    /// Run a compiled filter against `source` keys, or the whole corpus when
    /// `source` is `None`.
    fn filter_keys(&self, filter: &CompiledFilter, source: Option<&[String]>) -> Vec<String> {
        match source {
            Some(keys) => filter.run(keys.iter().map(String::as_str)),
            None => {
                let all = self.all_keys();
                filter.run(all.iter().map(String::as_str))
            }
        }
    }

    fn compile_filter(&self, expression: &str) -> CompiledFilter {
        CompiledFilter::compile(expression)
    }

    fn generate_uid(&self) -> String;
}

/// In-memory [`DocumentStore`] backed by a `BTreeMap` behind a `RwLock`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: RwLock<BTreeMap<String, Document>>,
}

impl MemoryStore {
    pub fn new() -> Arc<MemoryStore> {
        Arc::new(MemoryStore::default())
    }
}

impl DocumentStore for MemoryStore {
    fn get(&self, key: &str) -> Option<Document> {
        self.documents.read().get(key).cloned()
    }

    fn put(&self, doc: Document) {
        tracing::trace!("MemoryStore put: {}", doc.key);
        self.documents.write().insert(doc.key.clone(), doc);
    }

    fn remove(&self, keys: &[String]) {
        let mut documents = self.documents.write();
        for key in keys {
            documents.remove(key);
        }
    }

    fn exists(&self, key: &str) -> bool {
        self.documents.read().contains_key(key)
    }

    fn all_keys(&self) -> Vec<String> {
        self.documents.read().keys().cloned().collect()
    }

    fn keys_with_prefix(&self, prefix: &str) -> Vec<String> {
        self.documents
            .read()
            .range(prefix.to_string()..)
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(key, _)| key.clone())
            .collect()
    }

    fn generate_uid(&self) -> String {
        Uuid::new_v4().to_string()
    }
}
