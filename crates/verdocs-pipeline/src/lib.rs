//! End-to-end rendering pipeline for verdocs.
//!
//! A [`Pipeline`] is built once per documentation version from a validated
//! [`ContentManifest`](verdocs_manifest::ContentManifest), a
//! [`ContentFetcher`](verdocs_fetch::ContentFetcher), and a
//! [`ComponentRegistry`](verdocs_page::ComponentRegistry). A render request
//! flows through four stages:
//!
//! 1. resolve the slug against the route table
//! 2. fetch the content file from the remote (single attempt)
//! 3. compile the document into a module
//! 4. evaluate the module against the component registry
//!
//! Each stage has its own [`PageError`] variant so hosts can map failures to
//! distinct responses. Setup failures ([`SetupError`]) are fatal: the
//! pipeline is all-or-nothing and never serves from partial state.

mod error;
mod pipeline;

pub use error::{PageError, SetupError};
pub use pipeline::{Pipeline, StaticRoute};
