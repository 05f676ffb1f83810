//! HTTP fetcher for raw repository content.

use std::time::Duration;

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use tracing::debug;
use ureq::Agent;
use verdocs_manifest::RemoteSource;

use crate::fetcher::{ContentFetcher, FetchError};

/// Default endpoint serving raw file content.
pub const DEFAULT_ENDPOINT: &str = "https://raw.githubusercontent.com";

/// Default HTTP timeout in seconds.
const DEFAULT_TIMEOUT: u64 = 30;

/// Characters percent-encoded inside a URL path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Fetches raw document text from a remote version-controlled source.
///
/// Builds `{endpoint}/{owner}/{repository}/{branch}/{base_path}/{file}` and
/// performs one GET per [`fetch`](ContentFetcher::fetch) call. The agent
/// carries a global timeout so a stalled remote never blocks a request
/// indefinitely; a timeout surfaces as [`FetchError::Timeout`].
pub struct RemoteFetcher {
    agent: Agent,
    remote: RemoteSource,
    endpoint: String,
}

impl RemoteFetcher {
    /// Create a fetcher with the default endpoint and timeout.
    #[must_use]
    pub fn new(remote: RemoteSource) -> Self {
        Self::with_timeout(remote, Duration::from_secs(DEFAULT_TIMEOUT))
    }

    /// Create a fetcher with a custom timeout.
    #[must_use]
    pub fn with_timeout(remote: RemoteSource, timeout: Duration) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            remote,
            endpoint: DEFAULT_ENDPOINT.to_owned(),
        }
    }

    /// Override the raw-content endpoint (mirrors, test servers).
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_owned();
        self
    }

    /// Fully-qualified retrieval address for a relative file path.
    #[must_use]
    pub fn url_for(&self, file_path: &str) -> String {
        let RemoteSource {
            owner,
            repository,
            branch,
            base_path,
        } = &self.remote;

        let mut url = format!(
            "{}/{}/{}/{}",
            self.endpoint,
            encode_path(owner),
            encode_path(repository),
            encode_path(branch)
        );
        if !base_path.is_empty() {
            url.push('/');
            url.push_str(&encode_path(base_path));
        }
        url.push('/');
        url.push_str(&encode_path(file_path));
        url
    }
}

impl ContentFetcher for RemoteFetcher {
    fn fetch(&self, file_path: &str) -> Result<String, FetchError> {
        let url = self.url_for(file_path);
        debug!(%url, "Fetching remote content");

        let response = self.agent.get(&url).call().map_err(|e| match e {
            ureq::Error::Timeout(_) => FetchError::Timeout {
                path: file_path.to_owned(),
            },
            other => FetchError::Transport {
                path: file_path.to_owned(),
                source: Box::new(other),
            },
        })?;

        let status = response.status().as_u16();
        let mut body = response.into_body();

        if !(200..300).contains(&status) {
            return Err(FetchError::Status {
                status,
                path: file_path.to_owned(),
            });
        }

        body.read_to_string().map_err(|e| FetchError::Body {
            path: file_path.to_owned(),
            source: Box::new(e),
        })
    }
}

/// Percent-encode each segment of a `/`-separated path.
fn encode_path(path: &str) -> String {
    path.split('/')
        .map(|segment| utf8_percent_encode(segment, SEGMENT).to_string())
        .collect::<Vec<_>>()
        .join("/")
}
