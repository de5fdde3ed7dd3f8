//! # View abstraction and incremental cache rebuilds
//!
//! A view is a named bundle of independently-stored documents — layout
//! config, node filter, edge filter, position map — describing one graph
//! visualization. [`ViewAbstraction`] binds them into a single partially
//! cached object:
//!
//! - **Accessors** read each constituent document with cached-or-fresh
//!   semantics and write back through setters that persist, update the cache
//!   synchronously, and mark their own key as suppressed.
//! - **The rebuild engine** ([`ViewAbstraction::refresh`] /
//!   [`ViewAbstraction::rebuild`]) receives the host's change-notification
//!   batches and recomputes only the cache entries whose backing document
//!   changed. A config change escalates to a full rebuild, since config
//!   semantics can affect every derived value.
//! - **The suppress set** breaks the notify -> rebuild -> notify feedback
//!   loop: every setter records its own persisted key, and the next rebuild
//!   cycle consumes that record instead of recomputing. The set is swapped
//!   for an empty one at the start of each cycle, so suppression holds for
//!   exactly one cycle (two-phase swap-then-populate; collapsing it into a
//!   single list re-introduces the feedback loop).
//!
//! The cache is an in-memory derived projection — only the underlying
//! documents are persisted. External mutation of those documents without a
//! change notification desynchronizes the cache; that is the documented
//! consistency boundary. Everything here is synchronous and single-threaded;
//! operations either complete or are no-ops on a failed precondition.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{
    edgetype::{EdgeType, EdgeTypeRegistry},
    filter::CompiledFilter,
    notify::{Notifier, TracingNotifier},
    paths::{
        resolve_root, PathSet, ViewRole, ViewSpec, EDGE_TYPE_NAMESPACE, LIVE_VIEW_LABEL,
        VIEW_NAMESPACE,
    },
    store::{Document, DocumentStore, KEY_SEPARATOR},
    GraphViewError,
};

/// Prefix of config option fields on the view's root document.
pub const CONFIG_PREFIX: &str = "config.";

/// The one built-in config default, merged beneath whatever is persisted.
pub const OPT_LAYOUT_ACTIVE: &str = "config.layout.active";
pub const DEFAULT_LAYOUT_ACTIVE: &str = "user";

/// Option recording an edge-type namespace prefix. Its value must end in the
/// namespace separator; setters append one when missing.
pub const OPT_EDGE_TYPE_NAMESPACE: &str = "config.edge_type_namespace";
pub const NAMESPACE_SEPARATOR: char = ':';

pub const OPT_STABILIZATION_ITERATIONS: &str = "physics.stabilization_iterations";
pub const DEFAULT_STABILIZATION_ITERATIONS: u32 = 1000;

/// Default edge filter expression when none is persisted. Node filters
/// default to the empty (match-nothing) expression instead.
pub const DEFAULT_EDGE_FILTER: &str = "[all[]]";

/// Field carrying a filter document's raw expression.
pub const FIELD_FILTER: &str = "filter";

/// Field carrying a position document's JSON-encoded coordinate map.
pub const FIELD_POSITIONS: &str = "positions";

/// Marker field distinguishing a config document as a view root.
pub const FIELD_VIEW_MARKER: &str = "graph-view";

/// Field carrying a view's generated unique identifier.
pub const FIELD_ID: &str = "id";

/// Per-role cache state.
///
/// `Stale -> Cached` happens only through an explicit reload; `Cached ->
/// Stale` through invalidation. Accessors reload on anything but `Cached`.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CacheSlot<T> {
    #[default]
    Unloaded,
    Cached(T),
    Stale,
}

impl<T> CacheSlot<T> {
    pub fn cached(&self) -> Option<&T> {
        match self {
            CacheSlot::Cached(value) => Some(value),
            _ => None,
        }
    }

    pub fn invalidate(&mut self) {
        if matches!(self, CacheSlot::Cached(_)) {
            *self = CacheSlot::Stale;
        }
    }
}

/// A raw filter expression together with its compiled form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterPair {
    pub expression: String,
    pub compiled: CompiledFilter,
}

/// A node's 2D layout coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// An explicit config mutation for bulk updates. Leaving an option untouched
/// is expressed by omitting it from the update mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigUpdate {
    Set(String),
    Delete,
}

/// One view, bound to its constituent documents with per-role caching.
pub struct ViewAbstraction {
    store: Arc<dyn DocumentStore>,
    types: Arc<dyn EdgeTypeRegistry>,
    notifier: Arc<dyn Notifier>,
    /// `None` marks the handle as non-existent (failed resolution or a
    /// completed destroy).
    paths: Option<PathSet>,
    config_cache: CacheSlot<BTreeMap<String, String>>,
    node_filter_cache: CacheSlot<FilterPair>,
    edge_filter_cache: CacheSlot<FilterPair>,
    positions_cache: CacheSlot<BTreeMap<String, Position>>,
    whitelist_cache: CacheSlot<BTreeMap<String, EdgeType>>,
    /// Keys whose next reported change is already reflected in the cache.
    suppress: BTreeSet<String>,
}

impl ViewAbstraction {
    /// Bind a view with the default tracing notifier.
    pub fn open<S: Into<ViewSpec>>(
        store: Arc<dyn DocumentStore>,
        types: Arc<dyn EdgeTypeRegistry>,
        spec: S,
    ) -> ViewAbstraction {
        ViewAbstraction::open_with_notifier(store, types, Arc::new(TracingNotifier), spec)
    }

    pub fn open_with_notifier<S: Into<ViewSpec>>(
        store: Arc<dyn DocumentStore>,
        types: Arc<dyn EdgeTypeRegistry>,
        notifier: Arc<dyn Notifier>,
        spec: S,
    ) -> ViewAbstraction {
        let spec = spec.into();
        let paths = match resolve_root(&spec) {
            Ok(root) => Some(PathSet::derive(&root)),
            Err(err) => {
                tracing::warn!("View resolution failed: {err}");
                None
            }
        };
        ViewAbstraction {
            store,
            types,
            notifier,
            paths,
            config_cache: CacheSlot::Unloaded,
            node_filter_cache: CacheSlot::Unloaded,
            edge_filter_cache: CacheSlot::Unloaded,
            positions_cache: CacheSlot::Unloaded,
            whitelist_cache: CacheSlot::Unloaded,
            suppress: BTreeSet::new(),
        }
    }

    /// True when the handle resolved and the config document is in the store.
    pub fn exists(&self) -> bool {
        self.paths
            .as_ref()
            .map(|paths| self.store.exists(paths.root()))
            .unwrap_or(false)
    }

    /// The canonical root key, when resolved.
    pub fn root(&self) -> Option<&str> {
        self.paths.as_ref().map(PathSet::root)
    }

    /// The view's label. Empty when the handle is non-existent.
    pub fn label(&self) -> String {
        self.paths
            .as_ref()
            .map(|paths| paths.label().to_string())
            .unwrap_or_default()
    }

    pub fn path_set(&self) -> Option<&PathSet> {
        self.paths.as_ref()
    }

    /// Whether this handle names the distinguished live view singleton.
    pub fn is_live(&self) -> bool {
        self.paths
            .as_ref()
            .map(|paths| paths.label() == LIVE_VIEW_LABEL)
            .unwrap_or(false)
    }

    fn existing_paths(&self) -> Option<PathSet> {
        let paths = self.paths.clone()?;
        self.store.exists(paths.root()).then_some(paths)
    }

    // ------------------------------------------------------------------
    // Rebuild engine
    // ------------------------------------------------------------------

    /// Entry point for host change notifications. Recomputes the cache
    /// entries backed by `changed_keys`, honoring the suppress set, and
    /// returns the keys actually refreshed.
    pub fn refresh(&mut self, changed_keys: &[String]) -> Vec<String> {
        self.rebuild(changed_keys, false)
    }

    /// Selectively recompute cached fields for the given document keys.
    ///
    /// A `forced` rebuild ignores the suppress set. Returns the keys that
    /// were recomputed, in dispatch order, for caller bookkeeping such as
    /// incremental redraw decisions.
    pub fn rebuild(&mut self, components: &[String], forced: bool) -> Vec<String> {
        let Some(paths) = self.existing_paths() else {
            return Vec::new();
        };
        // Two-phase swap: the consumed set applies to this cycle only, and
        // setters invoked during this cycle populate the next cycle's set.
        let consumed = std::mem::take(&mut self.suppress);
        // A config change invalidates everything. Evaluated once up front —
        // unless the config change is this view's own suppressed write, in
        // which case it must not fan out into a full rebuild.
        let escalate = components.iter().any(|key| key == paths.root())
            && (forced || !consumed.contains(paths.root()));
        let components: Vec<String> = if escalate {
            paths.all_keys()
        } else {
            components.to_vec()
        };
        let type_prefix = format!("{EDGE_TYPE_NAMESPACE}{KEY_SEPARATOR}");
        let mut updated = Vec::new();
        for key in &components {
            if !forced && consumed.contains(key) {
                tracing::trace!("Skipping suppressed key {key}");
                continue;
            }
            match paths.role_of(key) {
                Some(ViewRole::Config) => {
                    self.reload_config(&paths);
                }
                Some(ViewRole::Map) => {
                    self.reload_positions(&paths);
                }
                Some(ViewRole::NodeFilter) => {
                    self.reload_filter(&paths, ViewRole::NodeFilter);
                }
                Some(ViewRole::EdgeFilter) => {
                    // An edge filter change implicitly invalidates the
                    // derived type allow-list.
                    self.reload_filter(&paths, ViewRole::EdgeFilter);
                    self.reload_whitelist();
                }
                None if key.starts_with(&type_prefix) => {
                    self.reload_whitelist();
                }
                None => continue,
            }
            updated.push(key.clone());
        }
        tracing::debug!("View '{}' refreshed {:?}", paths.label(), updated);
        updated
    }

    // ------------------------------------------------------------------
    // Config accessor
    // ------------------------------------------------------------------

    /// The full option mapping, `config.`-prefixed, with the built-in
    /// default merged beneath whatever is persisted.
    pub fn config(&mut self, force_reload: bool) -> BTreeMap<String, String> {
        let Some(paths) = self.paths.clone() else {
            return default_config();
        };
        if !force_reload {
            if let Some(mapping) = self.config_cache.cached() {
                return mapping.clone();
            }
        }
        self.reload_config(&paths)
    }

    /// A single option. The `config.` prefix may be omitted.
    pub fn config_value(&mut self, name: &str) -> Option<String> {
        let name = prefixed_option(name);
        self.config(false).get(&name).cloned()
    }

    pub fn set_config_value(&mut self, name: &str, value: &str) {
        let mut updates = BTreeMap::new();
        updates.insert(name.to_string(), ConfigUpdate::Set(value.to_string()));
        self.update_config(&updates);
    }

    pub fn delete_config_value(&mut self, name: &str) {
        let mut updates = BTreeMap::new();
        updates.insert(name.to_string(), ConfigUpdate::Delete);
        self.update_config(&updates);
    }

    /// Apply a bulk option update key-by-key, then persist the full merged
    /// mapping back to the root document once.
    pub fn update_config(&mut self, updates: &BTreeMap<String, ConfigUpdate>) {
        let Some(paths) = self.existing_paths() else {
            return;
        };
        let mut mapping = self.config(false);
        for (name, update) in updates {
            let name = prefixed_option(name);
            match update {
                ConfigUpdate::Set(value) => {
                    mapping.insert(name.clone(), normalize_option(&name, value));
                }
                ConfigUpdate::Delete => {
                    mapping.remove(&name);
                }
            }
        }
        // Deleting a defaulted option resurfaces the built-in value.
        for (name, value) in default_config() {
            mapping.entry(name).or_insert(value);
        }

        let mut doc = self
            .store
            .get(paths.root())
            .unwrap_or_else(|| Document::new(paths.root()));
        doc.fields.retain(|name, _| !name.starts_with(CONFIG_PREFIX));
        for (name, value) in &mapping {
            doc.set_field(name, value.clone());
        }
        self.store.put(doc);
        self.config_cache = CacheSlot::Cached(mapping);
        self.suppress.insert(paths.root().to_string());
    }

    fn reload_config(&mut self, paths: &PathSet) -> BTreeMap<String, String> {
        let mut mapping = default_config();
        if let Some(doc) = self.store.get(paths.root()) {
            for (name, value) in &doc.fields {
                if name.starts_with(CONFIG_PREFIX) {
                    mapping.insert(name.clone(), value.clone());
                }
            }
        }
        self.config_cache = CacheSlot::Cached(mapping.clone());
        mapping
    }

    // ------------------------------------------------------------------
    // Filter accessors
    // ------------------------------------------------------------------

    pub fn node_filter(&mut self, force_reload: bool) -> FilterPair {
        self.filter_pair(ViewRole::NodeFilter, force_reload)
    }

    pub fn edge_filter(&mut self, force_reload: bool) -> FilterPair {
        self.filter_pair(ViewRole::EdgeFilter, force_reload)
    }

    /// Replace the node filter expression. The live view's node filter is
    /// protected; mutation is rejected with a user-facing notice unless
    /// `force_override` is set.
    pub fn set_node_filter(&mut self, expression: &str, force_override: bool) {
        self.set_filter(ViewRole::NodeFilter, expression, force_override)
    }

    pub fn set_edge_filter(&mut self, expression: &str) {
        self.set_filter(ViewRole::EdgeFilter, expression, false)
    }

    pub fn append_node_filter(&mut self, expression: &str) {
        let current = self.node_filter(false).expression;
        self.set_node_filter(&concat_filter(&current, expression), false);
    }

    pub fn append_edge_filter(&mut self, expression: &str) {
        let current = self.edge_filter(false).expression;
        self.set_edge_filter(&concat_filter(&current, expression));
    }

    fn filter_pair(&mut self, role: ViewRole, force_reload: bool) -> FilterPair {
        let Some(paths) = self.paths.clone() else {
            return default_filter_pair(role);
        };
        if !force_reload {
            if let Some(pair) = self.filter_slot(role).cached() {
                return pair.clone();
            }
        }
        self.reload_filter(&paths, role)
    }

    fn filter_slot(&mut self, role: ViewRole) -> &mut CacheSlot<FilterPair> {
        match role {
            ViewRole::NodeFilter => &mut self.node_filter_cache,
            ViewRole::EdgeFilter => &mut self.edge_filter_cache,
            ViewRole::Config | ViewRole::Map => {
                unreachable!("role {role:?} carries no filter cache")
            }
        }
    }

    fn set_filter(&mut self, role: ViewRole, expression: &str, force_override: bool) {
        let Some(paths) = self.existing_paths() else {
            return;
        };
        let expression = expression.replace(['\n', '\r'], " ");
        // Redundant writes must not re-trigger cycles.
        if expression == self.filter_pair(role, false).expression {
            return;
        }
        if role == ViewRole::NodeFilter && self.is_live() && !force_override {
            self.notifier.notify(
                "The live view's node filter is protected and cannot be edited directly.",
            );
            return;
        }
        let key = paths.key_for(role).to_string();
        let mut doc = self
            .store
            .get(&key)
            .unwrap_or_else(|| Document::new(&key));
        doc.set_field(FIELD_FILTER, expression.clone());
        self.store.put(doc);

        // Recompute the compiled form synchronously rather than deferring to
        // the next rebuild cycle.
        let compiled = self.store.compile_filter(&expression);
        *self.filter_slot(role) = CacheSlot::Cached(FilterPair {
            expression,
            compiled,
        });
        if role == ViewRole::EdgeFilter {
            self.whitelist_cache.invalidate();
        }
        self.suppress.insert(key);
    }

    fn reload_filter(&mut self, paths: &PathSet, role: ViewRole) -> FilterPair {
        let key = paths.key_for(role);
        let default = default_filter_expression(role);
        let expression = self
            .store
            .get(key)
            .and_then(|doc| doc.field(FIELD_FILTER).map(str::to_string))
            .unwrap_or_else(|| default.to_string());
        let compiled = self.store.compile_filter(&expression);
        let pair = FilterPair {
            expression,
            compiled,
        };
        *self.filter_slot(role) = CacheSlot::Cached(pair.clone());
        pair
    }

    // ------------------------------------------------------------------
    // Type allow-list accessor
    // ------------------------------------------------------------------

    /// Edge-type names currently permitted by the edge filter, each bound to
    /// its registry handle.
    pub fn type_whitelist(&mut self, force_reload: bool) -> BTreeMap<String, EdgeType> {
        if self.paths.is_none() {
            return BTreeMap::new();
        }
        if !force_reload {
            if let Some(whitelist) = self.whitelist_cache.cached() {
                return whitelist.clone();
            }
        }
        self.reload_whitelist()
    }

    fn reload_whitelist(&mut self) -> BTreeMap<String, EdgeType> {
        let edge_filter = self.edge_filter(false);
        let type_prefix = format!("{EDGE_TYPE_NAMESPACE}{KEY_SEPARATOR}");
        let type_keys = self.store.keys_with_prefix(&type_prefix);
        let mut whitelist = BTreeMap::new();
        for key in self.store.filter_keys(&edge_filter.compiled, Some(&type_keys)) {
            let name = key
                .strip_prefix(&type_prefix)
                .unwrap_or(key.as_str())
                .to_string();
            if !self.types.exists(&name) {
                self.types.persist(&name);
            }
            let id = self.types.get_id(&name).unwrap_or_default();
            whitelist.insert(name.clone(), EdgeType { name, id });
        }
        self.whitelist_cache = CacheSlot::Cached(whitelist.clone());
        whitelist
    }

    // ------------------------------------------------------------------
    // Position accessor
    // ------------------------------------------------------------------

    /// Node coordinates from the position store document.
    ///
    /// The live view always reloads: its position store key is derived from
    /// the currently focused document, so its cache cannot be trusted across
    /// filter changes.
    pub fn positions(&mut self, force_reload: bool) -> BTreeMap<String, Position> {
        let Some(paths) = self.paths.clone() else {
            return BTreeMap::new();
        };
        if !self.is_live() && !force_reload {
            if let Some(positions) = self.positions_cache.cached() {
                return positions.clone();
            }
        }
        self.reload_positions(&paths)
    }

    pub fn set_positions(&mut self, positions: BTreeMap<String, Position>) {
        let Some(paths) = self.existing_paths() else {
            return;
        };
        let Some(key) = self.position_store_key(&paths) else {
            return;
        };
        let raw = match serde_json::to_string(&positions).map_err(GraphViewError::from) {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!("Discarding position write: {err}");
                return;
            }
        };
        let mut doc = self
            .store
            .get(&key)
            .unwrap_or_else(|| Document::new(&key));
        doc.set_field(FIELD_POSITIONS, raw);
        self.store.put(doc);
        self.positions_cache = CacheSlot::Cached(positions);
        self.suppress.insert(key);
    }

    /// Merge one node's coordinates into the position map. Non-finite
    /// coordinates are absorbed as a no-op.
    pub fn set_node_position(&mut self, node: &str, position: Position) {
        if !position.x.is_finite() || !position.y.is_finite() {
            return;
        }
        let mut positions = self.positions(false);
        positions.insert(node.to_string(), position);
        self.set_positions(positions);
    }

    /// The key of the document holding this view's positions. For the live
    /// view this is a dedicated sub-store keyed by the single document
    /// currently matched by the node filter; `None` when nothing is focused.
    pub fn position_store_key(&mut self, paths: &PathSet) -> Option<String> {
        if !self.is_live() {
            return Some(paths.map.clone());
        }
        let node_filter = self.node_filter(false);
        let matched = self.store.filter_keys(&node_filter.compiled, None);
        let focused = matched.first()?;
        Some(format!(
            "{}{KEY_SEPARATOR}{}",
            paths.map,
            focused.replace(KEY_SEPARATOR, "_")
        ))
    }

    fn reload_positions(&mut self, paths: &PathSet) -> BTreeMap<String, Position> {
        let positions = match self.position_store_key(paths) {
            Some(key) => self
                .store
                .get(&key)
                .and_then(|doc| doc.field(FIELD_POSITIONS).map(parse_positions))
                .unwrap_or_default(),
            None => BTreeMap::new(),
        };
        self.positions_cache = CacheSlot::Cached(positions.clone());
        positions
    }

    // ------------------------------------------------------------------
    // Physics options
    // ------------------------------------------------------------------

    pub fn stabilization_iterations(&mut self) -> u32 {
        self.config_value(OPT_STABILIZATION_ITERATIONS)
            .and_then(|value| value.parse().ok())
            .unwrap_or(DEFAULT_STABILIZATION_ITERATIONS)
    }

    /// The iteration count is not persisted; the getter serves the
    /// configured option or the fixed fallback.
    pub fn set_stabilization_iterations(&mut self, _iterations: u32) {}

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Establish the view's config document. An existing view under the same
    /// root is destroyed first (overwrite semantics).
    pub fn create(&mut self) {
        let Some(paths) = self.paths.clone() else {
            return;
        };
        if self.store.exists(paths.root()) {
            self.delete_documents(&paths);
        }
        let doc = Document::new(paths.root())
            .with_field(FIELD_ID, self.store.generate_uid())
            .with_field(FIELD_VIEW_MARKER, "true");
        self.store.put(doc);
        self.reset_cache();
    }

    /// Delete every document under the root prefix and mark the handle as
    /// non-existent. No-op when the view does not exist.
    pub fn destroy(&mut self) {
        if !self.exists() {
            return;
        }
        if let Some(paths) = self.paths.take() {
            tracing::debug!("Destroying view '{}'", paths.label());
            self.delete_documents(&paths);
        }
        self.reset_cache();
    }

    /// Move every document under the root to a new label and force a full
    /// rebuild over the renamed roles.
    pub fn rename(&mut self, new_label: &str) {
        let Some(paths) = self.existing_paths() else {
            return;
        };
        if new_label.is_empty() {
            return;
        }
        if new_label.contains(KEY_SEPARATOR) {
            self.notifier.notify(&format!(
                "Renaming failed: the label must not contain '{KEY_SEPARATOR}'."
            ));
            return;
        }
        if paths.label() == new_label {
            return;
        }
        let old_root = paths.root().to_string();
        let new_root = format!("{VIEW_NAMESPACE}{KEY_SEPARATOR}{new_label}");

        let mut keys = self
            .store
            .keys_with_prefix(&format!("{old_root}{KEY_SEPARATOR}"));
        keys.push(old_root.clone());
        for key in keys {
            if let Some(mut doc) = self.store.get(&key) {
                doc.key = key.replacen(&old_root, &new_root, 1);
                self.store.put(doc);
                self.store.remove(&[key]);
            }
        }

        let new_paths = PathSet::derive(&new_root);
        let all_keys = new_paths.all_keys();
        self.paths = Some(new_paths);
        self.rebuild(&all_keys, true);
    }

    fn delete_documents(&self, paths: &PathSet) {
        let mut keys = self
            .store
            .keys_with_prefix(&format!("{}{KEY_SEPARATOR}", paths.root()));
        if self.store.exists(paths.root()) {
            keys.push(paths.root().to_string());
        }
        self.store.remove(&keys);
    }

    fn reset_cache(&mut self) {
        self.config_cache = CacheSlot::Unloaded;
        self.node_filter_cache = CacheSlot::Unloaded;
        self.edge_filter_cache = CacheSlot::Unloaded;
        self.positions_cache = CacheSlot::Unloaded;
        self.whitelist_cache = CacheSlot::Unloaded;
        self.suppress.clear();
    }
}

impl std::fmt::Debug for ViewAbstraction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewAbstraction")
            .field("paths", &self.paths)
            .field("suppress", &self.suppress)
            .finish_non_exhaustive()
    }
}

fn default_config() -> BTreeMap<String, String> {
    let mut mapping = BTreeMap::new();
    mapping.insert(
        OPT_LAYOUT_ACTIVE.to_string(),
        DEFAULT_LAYOUT_ACTIVE.to_string(),
    );
    mapping
}

fn prefixed_option(name: &str) -> String {
    if name.starts_with(CONFIG_PREFIX) {
        name.to_string()
    } else {
        format!("{CONFIG_PREFIX}{name}")
    }
}

/// The one domain-specific option normalization: a namespace prefix string
/// must end in the namespace separator.
fn normalize_option(name: &str, value: &str) -> String {
    if name == OPT_EDGE_TYPE_NAMESPACE
        && !value.is_empty()
        && !value.ends_with(NAMESPACE_SEPARATOR)
    {
        return format!("{value}{NAMESPACE_SEPARATOR}");
    }
    value.to_string()
}

fn default_filter_expression(role: ViewRole) -> &'static str {
    match role {
        ViewRole::EdgeFilter => DEFAULT_EDGE_FILTER,
        _ => "",
    }
}

fn default_filter_pair(role: ViewRole) -> FilterPair {
    let expression = default_filter_expression(role);
    FilterPair {
        expression: expression.to_string(),
        compiled: CompiledFilter::compile(expression),
    }
}

fn concat_filter(current: &str, addition: &str) -> String {
    if current.is_empty() {
        addition.to_string()
    } else {
        format!("{current} {addition}")
    }
}

fn parse_positions(raw: &str) -> BTreeMap<String, Position> {
    serde_json::from_str(raw)
        .map_err(GraphViewError::from)
        .unwrap_or_else(|err| {
            tracing::warn!("Discarding malformed position data: {err}");
            BTreeMap::new()
        })
}
