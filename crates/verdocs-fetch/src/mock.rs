//! Mock fetcher for testing without network access.

use std::collections::HashMap;

use crate::fetcher::{ContentFetcher, FetchError};

/// In-memory fetcher for tests.
///
/// Stores file contents in memory; paths without content answer with a
/// configurable failure. Use the builder methods to set up test data.
///
/// # Example
///
/// ```
/// use verdocs_fetch::{ContentFetcher, MockFetcher};
///
/// let fetcher = MockFetcher::new().with_file("intro.md", "# Intro");
///
/// assert!(fetcher.fetch("intro.md").is_ok());
/// assert!(fetcher.fetch("missing.md").is_err());
/// ```
#[derive(Debug, Default)]
pub struct MockFetcher {
    files: HashMap<String, String>,
    timeouts: Vec<String>,
}

impl MockFetcher {
    /// Create an empty mock fetcher.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add content for a file path.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.files.insert(path.into(), content.into());
        self
    }

    /// Make a path answer with [`FetchError::Timeout`].
    #[must_use]
    pub fn with_timeout(mut self, path: impl Into<String>) -> Self {
        self.timeouts.push(path.into());
        self
    }
}

impl ContentFetcher for MockFetcher {
    fn fetch(&self, file_path: &str) -> Result<String, FetchError> {
        if self.timeouts.iter().any(|p| p == file_path) {
            return Err(FetchError::Timeout {
                path: file_path.to_owned(),
            });
        }
        self.files
            .get(file_path)
            .cloned()
            .ok_or_else(|| FetchError::Status {
                status: 404,
                path: file_path.to_owned(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_known_file() {
        let fetcher = MockFetcher::new().with_file("intro.md", "# Intro");
        assert_eq!(fetcher.fetch("intro.md").unwrap(), "# Intro");
    }

    #[test]
    fn test_fetch_unknown_file_is_404() {
        let fetcher = MockFetcher::new();
        assert!(matches!(
            fetcher.fetch("missing.md"),
            Err(FetchError::Status { status: 404, .. })
        ));
    }

    #[test]
    fn test_fetch_timeout() {
        let fetcher = MockFetcher::new().with_timeout("slow.md");
        assert!(matches!(
            fetcher.fetch("slow.md"),
            Err(FetchError::Timeout { .. })
        ));
    }
}
