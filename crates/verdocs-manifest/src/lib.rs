//! Content manifest for a mirrored documentation version.
//!
//! Parses `manifest.toml` files with serde and validates the remote source
//! locator. The manifest is loaded once at process start and never mutated:
//! it names where the legacy content lives (owner, repository, branch, base
//! path) and which content files exist there.
//!
//! # Example
//!
//! ```
//! use verdocs_manifest::ContentManifest;
//!
//! let manifest = ContentManifest::from_toml(
//!     r#"
//!     files = ["index.md", "guide/setup.md"]
//!
//!     [remote]
//!     owner = "acme"
//!     repository = "docs"
//!     branch = "main"
//!     base_path = "docs"
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(manifest.remote.owner, "acme");
//! assert_eq!(manifest.file_paths.len(), 2);
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Error returned when a manifest cannot be loaded or is invalid.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    /// Manifest file could not be read.
    #[error("Failed to read manifest {}: {source}", .path.display())]
    Io {
        /// Path to the manifest file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Manifest file is not valid TOML.
    #[error("Failed to parse manifest: {0}")]
    Parse(#[from] toml::de::Error),
    /// A required remote field is empty.
    #[error("Manifest field '{0}' must not be empty")]
    EmptyField(&'static str),
}

/// Remote source locator: where the legacy documentation version lives.
///
/// Identifies one branch of one repository. `base_path` is the directory
/// inside the repository that holds the content files; it is stored without
/// leading or trailing slashes (empty for the repository root).
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct RemoteSource {
    /// Repository owner (user or organization).
    pub owner: String,
    /// Repository name.
    pub repository: String,
    /// Branch or tag to read from.
    pub branch: String,
    /// Directory inside the repository holding the content files.
    #[serde(default)]
    pub base_path: String,
}

impl RemoteSource {
    fn validate(mut self) -> Result<Self, ManifestError> {
        if self.owner.is_empty() {
            return Err(ManifestError::EmptyField("remote.owner"));
        }
        if self.repository.is_empty() {
            return Err(ManifestError::EmptyField("remote.repository"));
        }
        if self.branch.is_empty() {
            return Err(ManifestError::EmptyField("remote.branch"));
        }
        self.base_path = self.base_path.trim_matches('/').to_owned();
        Ok(self)
    }
}

/// Raw manifest as parsed from TOML, before validation.
#[derive(Debug, Deserialize)]
struct ManifestRaw {
    remote: RemoteSource,
    #[serde(default)]
    files: Vec<String>,
}

/// Immutable content manifest.
///
/// Holds the remote source locator plus the ordered list of relative content
/// file paths that exist in the mirrored version. The order of `file_paths`
/// is significant: it is the discovery-order tie-break for navigation nodes
/// without explicit ordering metadata.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentManifest {
    /// Where the content lives.
    pub remote: RemoteSource,
    /// Relative content file paths, in discovery order.
    pub file_paths: Vec<String>,
}

impl ContentManifest {
    /// Create a manifest from parts, validating the remote locator.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::EmptyField`] if owner, repository, or branch
    /// is empty.
    pub fn new(
        remote: RemoteSource,
        file_paths: Vec<String>,
    ) -> Result<Self, ManifestError> {
        Ok(Self {
            remote: remote.validate()?,
            file_paths,
        })
    }

    /// Parse a manifest from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::Parse`] for malformed TOML and
    /// [`ManifestError::EmptyField`] for missing remote fields.
    pub fn from_toml(text: &str) -> Result<Self, ManifestError> {
        let raw: ManifestRaw = toml::from_str(text)?;
        Self::new(raw.remote, raw.files)
    }

    /// Load a manifest from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::Io`] if the file cannot be read, plus the
    /// errors of [`ContentManifest::from_toml`].
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let text = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn remote() -> RemoteSource {
        RemoteSource {
            owner: "acme".to_owned(),
            repository: "docs".to_owned(),
            branch: "main".to_owned(),
            base_path: "docs".to_owned(),
        }
    }

    #[test]
    fn test_new_valid() {
        let manifest =
            ContentManifest::new(remote(), vec!["intro.md".to_owned()]).unwrap();
        assert_eq!(manifest.remote.owner, "acme");
        assert_eq!(manifest.file_paths, vec!["intro.md"]);
    }

    #[test]
    fn test_new_normalizes_base_path() {
        let manifest = ContentManifest::new(
            RemoteSource {
                base_path: "/docs/".to_owned(),
                ..remote()
            },
            Vec::new(),
        )
        .unwrap();
        assert_eq!(manifest.remote.base_path, "docs");
    }

    #[test]
    fn test_new_empty_base_path_allowed() {
        let manifest = ContentManifest::new(
            RemoteSource {
                base_path: String::new(),
                ..remote()
            },
            Vec::new(),
        )
        .unwrap();
        assert_eq!(manifest.remote.base_path, "");
    }

    #[test]
    fn test_new_rejects_empty_owner() {
        let result = ContentManifest::new(
            RemoteSource {
                owner: String::new(),
                ..remote()
            },
            Vec::new(),
        );
        assert!(matches!(
            result,
            Err(ManifestError::EmptyField("remote.owner"))
        ));
    }

    #[test]
    fn test_new_rejects_empty_branch() {
        let result = ContentManifest::new(
            RemoteSource {
                branch: String::new(),
                ..remote()
            },
            Vec::new(),
        );
        assert!(matches!(
            result,
            Err(ManifestError::EmptyField("remote.branch"))
        ));
    }

    #[test]
    fn test_from_toml() {
        let manifest = ContentManifest::from_toml(
            r#"
            files = ["index.md", "guide/setup.md"]

            [remote]
            owner = "acme"
            repository = "docs"
            branch = "main"
            base_path = "/docs/"
            "#,
        )
        .unwrap();

        assert_eq!(manifest.remote.repository, "docs");
        assert_eq!(manifest.remote.base_path, "docs");
        assert_eq!(manifest.file_paths, vec!["index.md", "guide/setup.md"]);
    }

    #[test]
    fn test_from_toml_files_default_empty() {
        let manifest = ContentManifest::from_toml(
            r#"
            [remote]
            owner = "acme"
            repository = "docs"
            branch = "main"
            "#,
        )
        .unwrap();

        assert!(manifest.file_paths.is_empty());
        assert_eq!(manifest.remote.base_path, "");
    }

    #[test]
    fn test_from_toml_malformed() {
        let result = ContentManifest::from_toml("not = valid = toml");
        assert!(matches!(result, Err(ManifestError::Parse(_))));
    }

    #[test]
    fn test_from_toml_missing_remote() {
        let result = ContentManifest::from_toml(r#"files = ["a.md"]"#);
        assert!(matches!(result, Err(ManifestError::Parse(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("manifest.toml");
        std::fs::write(
            &path,
            "files = [\"intro.md\"]\n\n[remote]\nowner = \"acme\"\nrepository = \"docs\"\nbranch = \"main\"\n",
        )
        .unwrap();

        let manifest = ContentManifest::load(&path).unwrap();
        assert_eq!(manifest.file_paths, vec!["intro.md"]);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = ContentManifest::load(&dir.path().join("nope.toml"));
        assert!(matches!(result, Err(ManifestError::Io { .. })));
    }
}
