//! Hierarchical navigation tree built from the flat manifest file list.
//!
//! Each content file contributes one node chain; per-directory metadata
//! (`_meta.json` contents) is merged into the corresponding nodes. Metadata
//! overrides inferred defaults (title-cased segment names) but never removes
//! children. Siblings listed in metadata come first, in metadata order; the
//! rest keep manifest discovery order.

use std::collections::{BTreeMap, HashMap};

use serde_json::Value;
use tracing::warn;

use crate::route_table::{META_FILE_NAME, route_for};
use crate::{RouteError, validate_path};

/// One node of the navigation tree.
///
/// The root node has an empty segment. Invariants: sibling segments are
/// unique; children are ordered by merged metadata when present, else by
/// manifest discovery order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageMapNode {
    /// Slug segment for this node (empty for the root).
    pub segment: String,
    /// Ordered child nodes.
    pub children: Vec<PageMapNode>,
    /// Navigation attributes (title, ordering hints, visibility).
    pub meta: BTreeMap<String, Value>,
}

impl PageMapNode {
    fn new(segment: &str) -> Self {
        let mut meta = BTreeMap::new();
        meta.insert("title".to_owned(), Value::String(title_case(segment)));
        Self {
            segment: segment.to_owned(),
            children: Vec::new(),
            meta,
        }
    }

    fn root() -> Self {
        Self {
            segment: String::new(),
            children: Vec::new(),
            meta: BTreeMap::new(),
        }
    }

    /// Look up a direct child by segment.
    #[must_use]
    pub fn child(&self, segment: &str) -> Option<&PageMapNode> {
        self.children.iter().find(|c| c.segment == segment)
    }

    fn child_mut(&mut self, segment: &str) -> Option<&mut PageMapNode> {
        self.children.iter_mut().find(|c| c.segment == segment)
    }

    /// Walk a `/`-joined route to a descendant node (`""` is the node itself).
    #[must_use]
    pub fn descendant(&self, route: &str) -> Option<&PageMapNode> {
        let mut node = self;
        for segment in route.split('/').filter(|s| !s.is_empty()) {
            node = node.child(segment)?;
        }
        Some(node)
    }

    /// Navigation title: merged metadata title, if any.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.meta.get("title").and_then(Value::as_str)
    }
}

/// Builder for the navigation tree.
///
/// Directory metadata is supplied up front, keyed by the directory's route
/// (`""` for the root directory). Entries map a child segment to either a
/// title string or an attribute object, mirroring the `_meta.json` sidecar
/// files of the legacy documentation source.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use verdocs_routes::PageMapBuilder;
///
/// let meta = json!({"setup": "Setup Guide"});
/// let root = PageMapBuilder::new()
///     .with_directory_meta("guide", meta.as_object().unwrap().clone())
///     .build(&["guide/setup.md".to_owned(), "guide/faq.md".to_owned()])
///     .unwrap();
///
/// let guide = root.child("guide").unwrap();
/// assert_eq!(guide.child("setup").unwrap().title(), Some("Setup Guide"));
/// ```
#[derive(Debug, Default)]
pub struct PageMapBuilder {
    dir_meta: BTreeMap<String, serde_json::Map<String, Value>>,
}

impl PageMapBuilder {
    /// Create a builder with no directory metadata.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach metadata entries for one directory.
    ///
    /// `dir` is the directory's route (`""` for the root directory).
    #[must_use]
    pub fn with_directory_meta(
        mut self,
        dir: impl Into<String>,
        entries: serde_json::Map<String, Value>,
    ) -> Self {
        self.dir_meta.insert(dir.into(), entries);
        self
    }

    /// Build the navigation tree from the manifest file list.
    ///
    /// Deterministic: identical input always produces a structurally equal
    /// tree. All paths are validated before the tree is touched, so a
    /// malformed manifest never yields a partial tree.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError`] for malformed paths (empty segments, traversal
    /// sequences, absolute paths).
    pub fn build(&self, file_paths: &[String]) -> Result<PageMapNode, RouteError> {
        for path in file_paths {
            validate_path(path)?;
        }

        let mut root = PageMapNode::root();
        for path in file_paths {
            let file_name = path.rsplit('/').next().unwrap_or(path);
            if file_name == META_FILE_NAME {
                continue;
            }
            let Some(route) = route_for(path) else {
                continue;
            };
            insert_route(&mut root, &route);
        }

        self.apply_meta(&mut root, "");
        Ok(root)
    }

    /// Merge directory metadata into `node`'s children and order them,
    /// then recurse.
    fn apply_meta(&self, node: &mut PageMapNode, dir: &str) {
        if let Some(entries) = self.dir_meta.get(dir) {
            for (segment, value) in entries {
                let Some(child) = node.child_mut(segment) else {
                    warn!(dir, segment, "Metadata entry has no matching page");
                    continue;
                };
                merge_entry(child, value);
            }

            let order: HashMap<&str, usize> = entries
                .keys()
                .enumerate()
                .map(|(i, segment)| (segment.as_str(), i))
                .collect();
            // Stable sort: unlisted siblings keep discovery order after the
            // listed ones.
            node.children.sort_by_key(|child| {
                order.get(child.segment.as_str()).copied().unwrap_or(usize::MAX)
            });
        }

        for child in &mut node.children {
            let child_dir = if dir.is_empty() {
                child.segment.clone()
            } else {
                format!("{dir}/{}", child.segment)
            };
            self.apply_meta(child, &child_dir);
        }
    }
}

/// Insert a route's segment chain, creating intermediate nodes as needed.
fn insert_route(root: &mut PageMapNode, route: &str) {
    let mut node = root;
    for segment in route.split('/').filter(|s| !s.is_empty()) {
        let idx = match node.children.iter().position(|c| c.segment == segment) {
            Some(idx) => idx,
            None => {
                node.children.push(PageMapNode::new(segment));
                node.children.len() - 1
            }
        };
        node = &mut node.children[idx];
    }
}

/// Merge one metadata entry into a node.
///
/// A string value sets the title; an object value extends the node's meta
/// map. Either form overrides inferred defaults but never touches children.
fn merge_entry(node: &mut PageMapNode, value: &Value) {
    match value {
        Value::String(title) => {
            node.meta
                .insert("title".to_owned(), Value::String(title.clone()));
        }
        Value::Object(attrs) => {
            for (key, attr) in attrs {
                node.meta.insert(key.clone(), attr.clone());
            }
        }
        _ => {
            warn!(segment = %node.segment, "Ignoring non-string, non-object metadata entry");
        }
    }
}

/// Title-case a slug segment: `"setup-guide"` → `"Setup Guide"`.
fn title_case(segment: &str) -> String {
    segment
        .split(['-', '_'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
