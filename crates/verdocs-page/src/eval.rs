//! Module evaluation.

use std::collections::BTreeMap;

use crate::error::EvaluationError;
use crate::module::{CompiledModule, Node, TocEntry};
use crate::registry::ComponentRegistry;

/// The result of evaluating a module: renderable output plus the module's
/// exports.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvaluatedPage {
    /// Full page HTML.
    pub html: String,
    /// Table of contents exported by the module.
    pub toc: Vec<TocEntry>,
    /// Metadata exported by the module.
    pub metadata: BTreeMap<String, serde_json::Value>,
}

/// Evaluate a compiled module against a component registry.
///
/// Every component reference in the body is resolved by name; nested content
/// is rendered before its parent component. The toc and metadata are taken
/// from the module's exports, not re-derived from the output.
///
/// # Errors
///
/// Returns [`EvaluationError::UnknownComponent`] if any reference, at any
/// depth, names a component the registry does not hold. Nothing is
/// substituted for missing components.
pub fn evaluate(
    module: &CompiledModule,
    registry: &ComponentRegistry,
) -> Result<EvaluatedPage, EvaluationError> {
    let html = render_nodes(&module.body, registry)?;
    Ok(EvaluatedPage {
        html,
        toc: module.toc.clone(),
        metadata: module.metadata.clone(),
    })
}

fn render_nodes(nodes: &[Node], registry: &ComponentRegistry) -> Result<String, EvaluationError> {
    let mut out = String::new();
    for node in nodes {
        match node {
            Node::Html(html) => out.push_str(html),
            Node::Component {
                name,
                args,
                children,
            } => {
                let component =
                    registry
                        .get(name)
                        .ok_or_else(|| EvaluationError::UnknownComponent {
                            name: name.clone(),
                        })?;
                let inner = render_nodes(children, registry)?;
                out.push_str(&component.render(args, &inner));
            }
        }
    }
    Ok(out)
}
