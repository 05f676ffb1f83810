//! Pipeline error types.

use verdocs_fetch::FetchError;
use verdocs_page::{CompileError, EvaluationError};
use verdocs_routes::RouteError;

/// Error raised while assembling a [`Pipeline`](crate::Pipeline).
///
/// Setup is all-or-nothing: any failure here means no pipeline, never a
/// pipeline with partial routes or partial navigation.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    /// The manifest file list produced an invalid route set.
    #[error(transparent)]
    Route(#[from] RouteError),
    /// A navigation metadata file could not be retrieved.
    #[error(transparent)]
    Fetch(#[from] FetchError),
    /// A navigation metadata file is not a JSON object.
    #[error("Invalid navigation metadata in '{path}': {source}")]
    Meta {
        /// Manifest path of the metadata file.
        path: String,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

/// Error raised while rendering one page.
///
/// Every stage keeps its own failure kind so callers can map them to
/// distinct responses (404 for [`NotFound`](PageError::NotFound), 5xx or a
/// build abort for the rest).
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    /// The requested slug matches no route.
    #[error("No page at '/{route}'")]
    NotFound {
        /// The normalized route that was requested.
        route: String,
    },
    /// The content file could not be retrieved.
    #[error(transparent)]
    Fetch(#[from] FetchError),
    /// The retrieved document failed to compile.
    #[error(transparent)]
    Compile(#[from] CompileError),
    /// The compiled module failed to evaluate.
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
}
