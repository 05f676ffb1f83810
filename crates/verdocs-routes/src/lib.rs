//! Route table and navigation tree building for verdocs.
//!
//! This crate turns the manifest's flat content-file list into the two
//! structures the pipeline serves from:
//!
//! - [`RouteTable`]: normalized route string → originating file path, with
//!   exact-match resolution and static route enumeration
//! - [`PageMapBuilder`] / [`PageMapNode`]: the hierarchical navigation tree,
//!   with per-directory ordering/labeling metadata merged in
//!
//! Both are built once at startup and are read-only afterwards. Malformed
//! paths fail the whole build with a [`RouteError`]; nothing is ever served
//! from a partially built table.

mod error;
mod page_map;
mod route_table;

pub use error::RouteError;
pub use page_map::{PageMapBuilder, PageMapNode};
pub use route_table::{META_FILE_NAME, RouteTable};

/// Validate a relative content-file path.
///
/// Rejects absolute paths, empty segments, and traversal sequences. Used by
/// both the route table and the page map builder so a bad manifest fails the
/// same way everywhere.
///
/// # Errors
///
/// Returns [`RouteError`] describing the first problem found.
pub(crate) fn validate_path(path: &str) -> Result<(), RouteError> {
    if path.is_empty() {
        return Err(RouteError::EmptySegment {
            path: path.to_owned(),
        });
    }
    if path.starts_with('/') {
        return Err(RouteError::Absolute {
            path: path.to_owned(),
        });
    }
    for segment in path.split('/') {
        if segment.is_empty() {
            return Err(RouteError::EmptySegment {
                path: path.to_owned(),
            });
        }
        if segment == "." || segment == ".." {
            return Err(RouteError::Traversal {
                path: path.to_owned(),
            });
        }
    }

    // An extension-only file name (".md") would derive a route with an
    // empty final segment, which resolution could never round-trip.
    let file_name = path.rsplit('/').next().unwrap_or(path);
    let stem = file_name
        .strip_suffix(".mdx")
        .or_else(|| file_name.strip_suffix(".md"))
        .unwrap_or(file_name);
    if stem.is_empty() {
        return Err(RouteError::EmptyStem {
            path: path.to_owned(),
        });
    }

    Ok(())
}
