//! Remote content retrieval for verdocs.
//!
//! Provides the [`ContentFetcher`] trait for retrieving raw document text by
//! relative file path, with [`RemoteFetcher`] as the production backend
//! (raw content of a version-controlled repository over HTTP). A fetch is a
//! single attempt: no retry, no cache, no rate limiting. Failures surface as
//! [`FetchError`] with the underlying status or cause.
//!
//! Enable the `mock` feature for [`MockFetcher`], an in-memory backend used
//! in pipeline tests.

mod fetcher;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod remote;

pub use fetcher::{ContentFetcher, FetchError};
#[cfg(any(test, feature = "mock"))]
pub use mock::MockFetcher;
pub use remote::{DEFAULT_ENDPOINT, RemoteFetcher};
