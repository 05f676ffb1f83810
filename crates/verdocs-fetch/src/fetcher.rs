//! Fetcher trait and error type.

/// Error returned when a remote fetch fails.
///
/// Every failure mode is distinguishable: the pipeline logs the specific
/// kind while the host maps all of them to a generic failure response.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Remote answered with a non-success status.
    #[error("Remote returned status {status} for '{path}'")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Relative file path that was requested.
        path: String,
    },
    /// Retrieval did not complete within the configured timeout.
    #[error("Timed out fetching '{path}'")]
    Timeout {
        /// Relative file path that was requested.
        path: String,
    },
    /// Network-level failure (DNS, connect, TLS).
    #[error("Transport error fetching '{path}': {source}")]
    Transport {
        /// Relative file path that was requested.
        path: String,
        /// Underlying transport error.
        #[source]
        source: Box<ureq::Error>,
    },
    /// Response arrived but the body could not be read.
    #[error("Failed to read response body for '{path}': {source}")]
    Body {
        /// Relative file path that was requested.
        path: String,
        /// Underlying read error.
        #[source]
        source: Box<ureq::Error>,
    },
}

/// Retrieval of raw document text by relative file path.
///
/// One outbound call per invocation; implementations retain no local state
/// about past fetches. The path has already been resolved through the route
/// table, so it is always a path the manifest knows about — a 404-equivalent
/// answer is still possible (the remote may have moved on) and surfaces as
/// [`FetchError::Status`].
pub trait ContentFetcher: Send + Sync {
    /// Fetch the raw text of one content file.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] on network failure, non-success status, or
    /// timeout.
    fn fetch(&self, file_path: &str) -> Result<String, FetchError>;
}
