//! Route building error type.

/// Error returned when the route table or page map cannot be built.
///
/// Any of these is fatal at startup: the pipeline refuses to serve from a
/// partially built route table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    /// Path is empty or contains an empty segment (`a//b`, trailing slash).
    #[error("Empty segment in path '{path}'")]
    EmptySegment {
        /// Offending manifest path.
        path: String,
    },
    /// Path contains `.` or `..` segments.
    #[error("Path traversal sequence in path '{path}'")]
    Traversal {
        /// Offending manifest path.
        path: String,
    },
    /// Path starts with `/`; manifest paths must be relative.
    #[error("Absolute path not allowed: '{path}'")]
    Absolute {
        /// Offending manifest path.
        path: String,
    },
    /// File name is nothing but an extension (`.md`), so no route segment
    /// can be derived from it.
    #[error("Path '{path}' has no file name before its extension")]
    EmptyStem {
        /// Offending manifest path.
        path: String,
    },
    /// Two manifest entries derive the same route.
    #[error("Files '{first}' and '{second}' both map to route '{route}'")]
    DuplicateRoute {
        /// The derived route both files map to.
        route: String,
        /// First file mapping to the route.
        first: String,
        /// Second file mapping to the route.
        second: String,
    },
}
