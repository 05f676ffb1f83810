//! The per-version rendering pipeline.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, info};

use verdocs_fetch::{ContentFetcher, FetchError};
use verdocs_manifest::ContentManifest;
use verdocs_page::{CompileOptions, ComponentRegistry, EvaluatedPage, compile, evaluate};
use verdocs_routes::{META_FILE_NAME, PageMapBuilder, PageMapNode, RouteTable};

use crate::error::{PageError, SetupError};

/// One pre-renderable route, as consumed by the host's build step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StaticRoute {
    /// Slug segments; empty for the root page.
    pub slug: Vec<String>,
}

/// Rendering pipeline for one documentation version.
///
/// Built once at startup from a validated manifest; construction retrieves
/// and merges all navigation metadata, derives the route table, and builds
/// the page map. After that the pipeline is immutable and renders pages on
/// demand, one remote fetch per request.
pub struct Pipeline {
    manifest: ContentManifest,
    routes: RouteTable,
    page_map: PageMapNode,
    fetcher: Box<dyn ContentFetcher>,
    registry: ComponentRegistry,
    metadata_defaults: BTreeMap<String, serde_json::Value>,
}

impl Pipeline {
    /// Assemble a pipeline from a manifest, a fetcher, and a component
    /// registry.
    ///
    /// Retrieves every navigation metadata file named in the manifest up
    /// front. A metadata file the remote no longer has is tolerated (the
    /// manifest may lag the remote); one that exists but is not a JSON
    /// object is fatal.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError`] for invalid routes, unreachable metadata
    /// files, or malformed metadata. No partially-initialized pipeline is
    /// ever produced.
    pub fn new(
        manifest: ContentManifest,
        fetcher: Box<dyn ContentFetcher>,
        registry: ComponentRegistry,
    ) -> Result<Self, SetupError> {
        let routes = RouteTable::build(&manifest.file_paths)?;

        let mut builder = PageMapBuilder::new();
        for path in &manifest.file_paths {
            let Some(dir) = meta_dir(path) else {
                continue;
            };
            let text = match fetcher.fetch(path) {
                Ok(text) => text,
                Err(FetchError::Status { status: 404, .. }) => {
                    debug!(path, "Navigation metadata file gone from remote");
                    continue;
                }
                Err(err) => return Err(err.into()),
            };
            let entries: serde_json::Map<String, serde_json::Value> =
                serde_json::from_str(&text).map_err(|source| SetupError::Meta {
                    path: path.clone(),
                    source,
                })?;
            builder = builder.with_directory_meta(dir, entries);
        }
        let page_map = builder.build(&manifest.file_paths)?;

        info!(
            routes = routes.len(),
            owner = %manifest.remote.owner,
            repository = %manifest.remote.repository,
            branch = %manifest.remote.branch,
            "Pipeline ready"
        );

        Ok(Self {
            manifest,
            routes,
            page_map,
            fetcher,
            registry,
            metadata_defaults: BTreeMap::new(),
        })
    }

    /// Set metadata applied under every document's own front matter.
    #[must_use]
    pub fn with_metadata_defaults(
        mut self,
        defaults: BTreeMap<String, serde_json::Value>,
    ) -> Self {
        self.metadata_defaults = defaults;
        self
    }

    /// Render the page at the given slug segments.
    ///
    /// Resolves the slug, fetches the document (one attempt, no retry),
    /// compiles it, and evaluates it against the registry.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::NotFound`] for unknown slugs and passes through
    /// the fetch, compile, and evaluation failures of known ones. A failed
    /// fetch never reaches the compiler.
    pub fn render(&self, segments: &[&str]) -> Result<EvaluatedPage, PageError> {
        let route = segments.join("/");
        let Some(file_path) = self.routes.get(&route) else {
            return Err(PageError::NotFound { route });
        };
        debug!(route = %route, file = file_path, "Rendering page");

        let text = self.fetcher.fetch(file_path)?;

        let mut options = CompileOptions::for_file(file_path);
        options.metadata_defaults = self.metadata_defaults.clone();
        let module = compile(&text, &options)?;

        let page = evaluate(&module, &self.registry)?;
        debug!(route = %route, toc_entries = page.toc.len(), "Page rendered");
        Ok(page)
    }

    /// Every pre-renderable route, exhaustive and duplicate-free.
    #[must_use]
    pub fn static_routes(&self) -> Vec<StaticRoute> {
        self.routes
            .static_routes()
            .into_iter()
            .map(|slug| StaticRoute { slug })
            .collect()
    }

    /// The navigation tree for this version.
    #[must_use]
    pub fn page_map(&self) -> &PageMapNode {
        &self.page_map
    }

    /// The route table for this version.
    #[must_use]
    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// The manifest this pipeline was built from.
    #[must_use]
    pub fn manifest(&self) -> &ContentManifest {
        &self.manifest
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("routes", &self.routes.len())
            .field("remote", &self.manifest.remote)
            .finish_non_exhaustive()
    }
}

/// Directory route a navigation metadata file applies to, or `None` for
/// content files.
fn meta_dir(path: &str) -> Option<&str> {
    if path == META_FILE_NAME {
        return Some("");
    }
    path.strip_suffix(META_FILE_NAME)?.strip_suffix('/')
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use static_assertions::assert_impl_all;
    use verdocs_fetch::MockFetcher;
    use verdocs_manifest::RemoteSource;

    use super::*;

    assert_impl_all!(Pipeline: Send, Sync);

    fn manifest(files: &[&str]) -> ContentManifest {
        ContentManifest::new(
            RemoteSource {
                owner: "acme".to_owned(),
                repository: "docs".to_owned(),
                branch: "main".to_owned(),
                base_path: String::new(),
            },
            files.iter().map(|s| (*s).to_owned()).collect(),
        )
        .unwrap()
    }

    fn pipeline(files: &[&str], fetcher: MockFetcher) -> Result<Pipeline, SetupError> {
        Pipeline::new(
            manifest(files),
            Box::new(fetcher),
            ComponentRegistry::with_defaults(),
        )
    }

    #[test]
    fn test_meta_dir() {
        assert_eq!(meta_dir("_meta.json"), Some(""));
        assert_eq!(meta_dir("guide/_meta.json"), Some("guide"));
        assert_eq!(meta_dir("guide/setup.md"), None);
    }

    #[test]
    fn test_setup_fetches_navigation_meta() {
        let fetcher = MockFetcher::new()
            .with_file("intro.md", "# Intro")
            .with_file("_meta.json", r#"{"intro": "Getting Started"}"#);
        let pipeline = pipeline(&["intro.md", "_meta.json"], fetcher).unwrap();

        let intro = pipeline.page_map().child("intro").unwrap();
        assert_eq!(intro.title(), Some("Getting Started"));
    }

    #[test]
    fn test_setup_tolerates_missing_meta_file() {
        let fetcher = MockFetcher::new().with_file("intro.md", "# Intro");
        let pipeline = pipeline(&["intro.md", "_meta.json"], fetcher).unwrap();
        assert_eq!(pipeline.routes().len(), 1);
    }

    #[test]
    fn test_setup_rejects_malformed_meta() {
        let fetcher = MockFetcher::new().with_file("_meta.json", "not json");
        let result = pipeline(&["_meta.json"], fetcher);
        assert!(matches!(result, Err(SetupError::Meta { path, .. }) if path == "_meta.json"));
    }

    #[test]
    fn test_setup_rejects_duplicate_routes() {
        let fetcher = MockFetcher::new();
        let result = pipeline(&["guide.md", "guide/index.md"], fetcher);
        assert!(matches!(result, Err(SetupError::Route(_))));
    }

    #[test]
    fn test_setup_surfaces_meta_fetch_timeout() {
        let fetcher = MockFetcher::new().with_timeout("_meta.json");
        let result = pipeline(&["_meta.json"], fetcher);
        assert!(matches!(
            result,
            Err(SetupError::Fetch(FetchError::Timeout { .. }))
        ));
    }

    #[test]
    fn test_render_unknown_slug_is_not_found() {
        let fetcher = MockFetcher::new().with_file("intro.md", "# Intro");
        let pipeline = pipeline(&["intro.md"], fetcher).unwrap();

        let err = pipeline.render(&["missing"]).unwrap_err();
        assert!(matches!(err, PageError::NotFound { route } if route == "missing"));
    }

    #[test]
    fn test_failed_fetch_never_compiles() {
        // The file is routable but the remote answers 404; the error is a
        // fetch error, not a compile error on empty input.
        let fetcher = MockFetcher::new();
        let pipeline = pipeline(&["intro.md"], fetcher).unwrap();

        let err = pipeline.render(&["intro"]).unwrap_err();
        assert!(matches!(
            err,
            PageError::Fetch(FetchError::Status { status: 404, .. })
        ));
    }

    #[test]
    fn test_static_routes() {
        let fetcher = MockFetcher::new();
        let pipeline = pipeline(&["index.md", "guide/setup.md"], fetcher).unwrap();

        let mut routes = pipeline.static_routes();
        routes.sort_by(|a, b| a.slug.cmp(&b.slug));
        assert_eq!(
            routes,
            vec![
                StaticRoute { slug: vec![] },
                StaticRoute {
                    slug: vec!["guide".to_owned(), "setup".to_owned()]
                },
            ]
        );
    }

    #[test]
    fn test_metadata_defaults_flow_into_pages() {
        let fetcher = MockFetcher::new().with_file("intro.md", "text\n");
        let mut defaults = BTreeMap::new();
        defaults.insert("layout".to_owned(), serde_json::json!("docs"));
        let pipeline = pipeline(&["intro.md"], fetcher)
            .unwrap()
            .with_metadata_defaults(defaults);

        let page = pipeline.render(&["intro"]).unwrap();
        assert_eq!(page.metadata["layout"], serde_json::json!("docs"));
    }
}
