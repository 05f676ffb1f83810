//! Compiled module representation.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::directive::ComponentArgs;

/// One table-of-contents entry exported by a compiled module.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TocEntry {
    /// Heading depth (2–6; the first H1 is the page title, not a toc entry).
    pub level: u8,
    /// Heading text with markup stripped.
    pub title: String,
    /// Anchor id, unique within the page.
    pub anchor: String,
}

/// One instruction of a compiled module body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Node {
    /// Lowered markdown, ready to emit.
    Html(String),
    /// A component reference, resolved at evaluation time.
    Component {
        name: String,
        args: ComponentArgs,
        children: Vec<Node>,
    },
}

/// The executable form of one compiled document.
///
/// Opaque: the body and exports can only be observed by evaluating the
/// module against a component registry. Carries no identity beyond the
/// source text it was compiled from, and is created fresh per request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompiledModule {
    pub(crate) body: Vec<Node>,
    pub(crate) toc: Vec<TocEntry>,
    pub(crate) metadata: BTreeMap<String, serde_json::Value>,
}
