//! Path resolution for views.
//!
//! A view is a named bundle of documents sharing one root prefix. [`ViewSpec`]
//! is the tagged-union input to view construction (raw label, existing path
//! set, or store record — one resolution rule per tag), [`resolve_root`]
//! produces the canonical root key, and [`PathSet`] derives the full
//! role-to-key mapping from it by deterministic string concatenation.

use serde::{Deserialize, Serialize};

use crate::{
    store::{Document, KEY_SEPARATOR},
    GraphViewError,
};

/// Namespace prefix under which all view documents live.
pub const VIEW_NAMESPACE: &str = "views";

/// Namespace prefix under which edge-type registry documents live.
pub const EDGE_TYPE_NAMESPACE: &str = "edgetypes";

/// Label of the distinguished live view singleton.
pub const LIVE_VIEW_LABEL: &str = "Live View";

/// Logical role of one of a view's constituent documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViewRole {
    Config,
    Map,
    NodeFilter,
    EdgeFilter,
}

/// The flat role-to-key mapping for one view.
///
/// All four keys share the same root prefix. Role lookup is by exact key
/// match only — the rebuild engine does not walk key hierarchies (edge-type
/// keys are the one prefix-matched special case, handled by the engine
/// itself).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathSet {
    pub config: String,
    pub map: String,
    pub node_filter: String,
    pub edge_filter: String,
}

impl PathSet {
    /// Derive the path set from a root key. No I/O.
    pub fn derive(root: &str) -> PathSet {
        PathSet {
            config: root.to_string(),
            map: format!("{root}/map"),
            node_filter: format!("{root}/filter/nodes"),
            edge_filter: format!("{root}/filter/edges"),
        }
    }

    /// The canonical root key (the config document's key).
    pub fn root(&self) -> &str {
        &self.config
    }

    /// The view's label, the last segment of the root key.
    pub fn label(&self) -> &str {
        self.config
            .rsplit(KEY_SEPARATOR)
            .next()
            .unwrap_or(&self.config)
    }

    pub fn role_of(&self, key: &str) -> Option<ViewRole> {
        if key == self.config {
            Some(ViewRole::Config)
        } else if key == self.map {
            Some(ViewRole::Map)
        } else if key == self.node_filter {
            Some(ViewRole::NodeFilter)
        } else if key == self.edge_filter {
            Some(ViewRole::EdgeFilter)
        } else {
            None
        }
    }

    pub fn key_for(&self, role: ViewRole) -> &str {
        match role {
            ViewRole::Config => &self.config,
            ViewRole::Map => &self.map,
            ViewRole::NodeFilter => &self.node_filter,
            ViewRole::EdgeFilter => &self.edge_filter,
        }
    }

    /// All four role keys, config first (the order a full rebuild processes
    /// them in).
    pub fn all_keys(&self) -> Vec<String> {
        vec![
            self.config.clone(),
            self.map.clone(),
            self.node_filter.clone(),
            self.edge_filter.clone(),
        ]
    }
}

/// Tagged-union input for view construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewSpec {
    /// A raw view name, with or without the namespace prefix.
    Label(String),
    /// An already-resolved path set — identity passthrough.
    Paths(PathSet),
    /// A store record; its own key is the root.
    Record(Document),
}

impl From<&str> for ViewSpec {
    fn from(label: &str) -> ViewSpec {
        ViewSpec::Label(label.to_string())
    }
}

impl From<PathSet> for ViewSpec {
    fn from(paths: PathSet) -> ViewSpec {
        ViewSpec::Paths(paths)
    }
}

impl From<Document> for ViewSpec {
    fn from(doc: Document) -> ViewSpec {
        ViewSpec::Record(doc)
    }
}

/// Resolve a [`ViewSpec`] to its canonical root key.
///
/// Labels are stripped of the namespace prefix if present; a remainder
/// containing the key separator is ambiguous (a nested name is not a valid
/// view label) and fails resolution.
pub fn resolve_root(spec: &ViewSpec) -> Result<String, GraphViewError> {
    match spec {
        ViewSpec::Paths(paths) => Ok(paths.root().to_string()),
        ViewSpec::Record(doc) => Ok(doc.key.clone()),
        ViewSpec::Label(label) => {
            let namespace_prefix = format!("{VIEW_NAMESPACE}{KEY_SEPARATOR}");
            let rest = label.strip_prefix(&namespace_prefix).unwrap_or(label);
            if rest.is_empty() {
                return Err(GraphViewError::InvalidLabel(
                    "view label is empty".to_string(),
                ));
            }
            if rest.contains(KEY_SEPARATOR) {
                return Err(GraphViewError::InvalidLabel(format!(
                    "view label '{rest}' contains the path separator '{KEY_SEPARATOR}'"
                )));
            }
            Ok(format!("{namespace_prefix}{rest}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_label() {
        assert_eq!(
            resolve_root(&ViewSpec::from("default")).unwrap(),
            "views/default"
        );
        // Namespace prefix is stripped before re-attachment.
        assert_eq!(
            resolve_root(&ViewSpec::from("views/default")).unwrap(),
            "views/default"
        );
    }

    #[test]
    fn test_resolve_label_rejects_nested_and_empty() {
        assert!(matches!(
            resolve_root(&ViewSpec::from("nested/name")),
            Err(GraphViewError::InvalidLabel(_))
        ));
        assert!(matches!(
            resolve_root(&ViewSpec::from("views/nested/name")),
            Err(GraphViewError::InvalidLabel(_))
        ));
        assert!(matches!(
            resolve_root(&ViewSpec::from("")),
            Err(GraphViewError::InvalidLabel(_))
        ));
        assert!(matches!(
            resolve_root(&ViewSpec::from("views/")),
            Err(GraphViewError::InvalidLabel(_))
        ));
    }

    #[test]
    fn test_resolve_record_and_paths_passthrough() {
        let doc = Document::new("views/from-record");
        assert_eq!(
            resolve_root(&ViewSpec::from(doc)).unwrap(),
            "views/from-record"
        );

        let paths = PathSet::derive("views/existing");
        assert_eq!(
            resolve_root(&ViewSpec::from(paths.clone())).unwrap(),
            paths.root()
        );
    }

    #[test]
    fn test_derive_path_set() {
        let paths = PathSet::derive("views/default");
        assert_eq!(paths.config, "views/default");
        assert_eq!(paths.map, "views/default/map");
        assert_eq!(paths.node_filter, "views/default/filter/nodes");
        assert_eq!(paths.edge_filter, "views/default/filter/edges");
        assert_eq!(paths.label(), "default");
        assert_eq!(paths.root(), "views/default");
    }

    #[test]
    fn test_role_of_exact_match_only() {
        let paths = PathSet::derive("views/default");
        assert_eq!(paths.role_of("views/default"), Some(ViewRole::Config));
        assert_eq!(paths.role_of("views/default/map"), Some(ViewRole::Map));
        assert_eq!(
            paths.role_of("views/default/filter/nodes"),
            Some(ViewRole::NodeFilter)
        );
        assert_eq!(
            paths.role_of("views/default/filter/edges"),
            Some(ViewRole::EdgeFilter)
        );
        // Nested keys under a role key carry no role.
        assert_eq!(paths.role_of("views/default/map/focused"), None);
        assert_eq!(paths.role_of("views/other"), None);
    }

    #[test]
    fn test_all_keys_config_first() {
        let paths = PathSet::derive("views/default");
        assert_eq!(
            paths.all_keys(),
            vec![
                "views/default",
                "views/default/map",
                "views/default/filter/nodes",
                "views/default/filter/edges",
            ]
        );
    }
}
