//! # graphview-core
//!
//! A view abstraction layer that maps logical graph-visualization "views"
//! (node filter, edge filter, layout config, node positions) onto a set of
//! documents in a wiki-style document store.
//!
//! ## Overview
//!
//! A view is a named, independently addressable bundle of documents sharing
//! one root key. graphview-core binds those documents into a single
//! partially-cached object and keeps the cache synchronized **incrementally**:
//! given a host change notification listing changed document keys, only the
//! cache entries whose backing document changed are recomputed, and writes
//! performed through the view's own setters are suppressed for exactly one
//! rebuild cycle so the store's change echo never re-triggers its own
//! rebuild.
//!
//! ### Key Features
//!
//! - **Selective invalidation**: bulk "many documents changed" notifications
//!   recompute only the affected roles; a config change escalates to a full
//!   rebuild.
//! - **Self-write suppression**: a two-phase suppress set, swapped at the
//!   start of each rebuild cycle, breaks the notify/rebuild feedback loop.
//! - **Typed accessors**: config options, node/edge filter expressions with
//!   compiled predicates, node positions, and the edge-type allow-list each
//!   carry their own cached-or-fresh retrieval semantics.
//! - **Whole-view lifecycle**: create (overwrite semantics), destroy, and
//!   rename with consistent re-keying of every constituent document.
//!
//! ## Architecture
//!
//! - **[`store`]**: the document-store collaborator surface
//!   ([`store::DocumentStore`]) and the in-memory reference implementation
//! - **[`filter`]**: the compiled filter expression language
//! - **[`paths`]**: view label resolution and the role-to-key path set
//! - **[`edgetype`]**: the edge-type registry collaborator surface
//! - **[`view`]**: the cached view, its accessors, the rebuild engine, and
//!   lifecycle operations
//! - **[`notify`]**: the fire-and-forget user notification side-channel
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use graphview_core::{
//!     edgetype::StoreEdgeTypeRegistry,
//!     store::MemoryStore,
//!     view::ViewAbstraction,
//! };
//!
//! let store = MemoryStore::new();
//! let types = StoreEdgeTypeRegistry::new(store.clone());
//!
//! let mut view = ViewAbstraction::open(store.clone(), types, "default");
//! view.create();
//!
//! view.set_node_filter("[prefix[docs/]]", false);
//! view.set_config_value("layout.active", "hierarchical");
//!
//! // Host change notifications drive incremental cache rebuilds. The
//! // setter writes above are suppressed for this first cycle.
//! let refreshed = view.refresh(&["views/default/filter/nodes".to_string()]);
//! assert!(refreshed.is_empty());
//! ```
//!
//! The cache is an in-memory derived projection: only the underlying
//! documents are persisted, and external mutation of those documents without
//! a change notification is outside the consistency contract.

pub mod edgetype;
pub mod error;
pub mod filter;
pub mod notify;
pub mod paths;
pub mod store;
#[cfg(test)]
mod tests;
pub mod view;

pub use error::*;
