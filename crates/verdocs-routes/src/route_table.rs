//! Route table: normalized route → originating content file.

use std::collections::BTreeMap;

use crate::{RouteError, validate_path};

/// File name of per-directory navigation metadata files.
///
/// These live alongside content files in the manifest but are not routable
/// pages; they only carry ordering/labeling hints for the page map.
pub const META_FILE_NAME: &str = "_meta.json";

/// Mapping from normalized route string to the originating file path.
///
/// Routes are `/`-joined slug segments without leading or trailing slash;
/// the root route is the empty string. Derived deterministically from the
/// manifest file list:
///
/// - `"intro.md"` → `"intro"`
/// - `"guide/setup.md"` → `"guide/setup"`
/// - `"index.md"` → `""`
/// - `"guide/index.md"` → `"guide"`
/// - `"_meta.json"` files are skipped (not routes)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteTable {
    routes: BTreeMap<String, String>,
}

impl RouteTable {
    /// Build a route table from the manifest file list.
    ///
    /// All paths are validated before any route is derived, so a bad
    /// manifest never yields a partial table.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError`] for malformed paths or when two files derive
    /// the same route.
    pub fn build(file_paths: &[String]) -> Result<Self, RouteError> {
        for path in file_paths {
            validate_path(path)?;
        }

        let mut routes = BTreeMap::new();
        for path in file_paths {
            let Some(route) = route_for(path) else {
                continue;
            };
            if let Some(first) = routes.insert(route.clone(), path.clone()) {
                return Err(RouteError::DuplicateRoute {
                    route,
                    first,
                    second: path.clone(),
                });
            }
        }

        Ok(Self { routes })
    }

    /// Resolve a sequence of slug segments to the originating file path.
    ///
    /// Exact lookup only: no partial or fuzzy matching. An empty segment
    /// list resolves to the index route when the manifest has one.
    #[must_use]
    pub fn resolve(&self, segments: &[&str]) -> Option<&str> {
        self.get(&segments.join("/"))
    }

    /// Look up a normalized route string directly.
    #[must_use]
    pub fn get(&self, route: &str) -> Option<&str> {
        self.routes.get(route).map(String::as_str)
    }

    /// Number of routes in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// True if the table has no routes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Iterate over `(route, file path)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.routes
            .iter()
            .map(|(route, path)| (route.as_str(), path.as_str()))
    }

    /// Enumerate every known route as a slug-segment sequence.
    ///
    /// One entry per route, exhaustive and duplicate-free; the root route
    /// yields an empty sequence. Consumed by the host's pre-render step.
    #[must_use]
    pub fn static_routes(&self) -> Vec<Vec<String>> {
        self.routes
            .keys()
            .map(|route| {
                route
                    .split('/')
                    .filter(|segment| !segment.is_empty())
                    .map(str::to_owned)
                    .collect()
            })
            .collect()
    }
}

/// Derive the route for a content file path, or `None` for metadata files.
pub(crate) fn route_for(path: &str) -> Option<String> {
    let file_name = path.rsplit('/').next().unwrap_or(path);
    if file_name == META_FILE_NAME {
        return None;
    }

    let without_ext = path
        .strip_suffix(".mdx")
        .or_else(|| path.strip_suffix(".md"))
        .unwrap_or(path);

    if without_ext == "index" {
        return Some(String::new());
    }
    if let Some(dir) = without_ext.strip_suffix("/index") {
        return Some(dir.to_owned());
    }
    Some(without_ext.to_owned())
}
