//! Document compilation.
//!
//! Turns raw text (front matter + markdown + component references) into a
//! [`CompiledModule`]. Compilation is pure: it never touches a registry and
//! never executes components.

use std::collections::BTreeMap;

use crate::directive::{ComponentArgs, ComponentLine, FenceTracker, parse_component_line};
use crate::error::CompileError;
use crate::frontmatter;
use crate::html::SlugCounter;
use crate::markdown;
use crate::module::{CompiledModule, Node, TocEntry};

/// Options for [`compile`].
#[derive(Clone, Debug, Default)]
pub struct CompileOptions {
    /// Manifest path of the file being compiled, used to resolve relative
    /// links. Empty means the content root.
    pub file_path: String,
    /// Metadata applied under the document's own front matter. Front matter
    /// keys win.
    pub metadata_defaults: BTreeMap<String, serde_json::Value>,
}

impl CompileOptions {
    /// Options for a document at `file_path`.
    #[must_use]
    pub fn for_file(file_path: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            ..Self::default()
        }
    }
}

/// An open component container during parsing.
struct Frame {
    name: String,
    args: ComponentArgs,
    /// Line of the opening fence, for the unclosed error.
    line: usize,
    children: Vec<Node>,
    /// Pending markdown lines not yet lowered.
    buffer: String,
}

impl Frame {
    fn root() -> Self {
        Self::open(String::new(), ComponentArgs::default(), 0)
    }

    fn open(name: String, args: ComponentArgs, line: usize) -> Self {
        Self {
            name,
            args,
            line,
            children: Vec::new(),
            buffer: String::new(),
        }
    }

    fn push_line(&mut self, line: &str) {
        self.buffer.push_str(line);
        self.buffer.push('\n');
    }
}

/// Shared lowering state threaded through every markdown fragment of one
/// document.
struct LowerState<'a> {
    dir_route: &'a str,
    slugs: SlugCounter,
    toc: Vec<TocEntry>,
    title: Option<String>,
}

impl LowerState<'_> {
    /// Lower a frame's buffered markdown into an html node.
    fn flush(&mut self, frame: &mut Frame) {
        if frame.buffer.trim().is_empty() {
            frame.buffer.clear();
            return;
        }
        let html = markdown::lower(
            &frame.buffer,
            self.dir_route,
            &mut self.slugs,
            &mut self.toc,
            &mut self.title,
        );
        frame.buffer.clear();
        if !html.is_empty() {
            frame.children.push(Node::Html(html));
        }
    }
}

/// Compile raw document text into a module.
///
/// # Errors
///
/// Returns [`CompileError`] for invalid front matter, malformed component
/// references, unclosed containers, and stray closing fences. Line numbers
/// count from the start of the raw text, front matter included.
pub fn compile(text: &str, options: &CompileOptions) -> Result<CompiledModule, CompileError> {
    let (front, body) = frontmatter::extract(text)?;

    let mut state = LowerState {
        dir_route: options.file_path.rsplit_once('/').map_or("", |(dir, _)| dir),
        slugs: SlugCounter::default(),
        toc: Vec::new(),
        title: None,
    };
    let mut fences = FenceTracker::default();
    let mut stack = vec![Frame::root()];

    for (i, line) in body.lines().enumerate() {
        let line_no = front.body_offset + i + 1;

        if fences.observe(line) {
            if let Some(current) = stack.last_mut() {
                current.push_line(line);
            }
            continue;
        }

        let parsed = parse_component_line(line).map_err(|e| CompileError::Syntax {
            line: line_no,
            column: e.column,
            message: e.message,
        })?;

        match parsed {
            None => {
                if let Some(current) = stack.last_mut() {
                    current.push_line(line);
                }
            }
            Some(ComponentLine::Leaf { name, args }) => {
                if let Some(current) = stack.last_mut() {
                    state.flush(current);
                    current.children.push(Node::Component {
                        name,
                        args,
                        children: Vec::new(),
                    });
                }
            }
            Some(ComponentLine::ContainerStart { name, args, .. }) => {
                if let Some(current) = stack.last_mut() {
                    state.flush(current);
                }
                stack.push(Frame::open(name, args, line_no));
            }
            Some(ComponentLine::ContainerEnd) => {
                if stack.len() == 1 {
                    return Err(CompileError::UnexpectedClose { line: line_no });
                }
                if let Some(current) = stack.last_mut() {
                    state.flush(current);
                }
                if let Some(closed) = stack.pop()
                    && let Some(parent) = stack.last_mut()
                {
                    parent.children.push(Node::Component {
                        name: closed.name,
                        args: closed.args,
                        children: closed.children,
                    });
                }
            }
        }
    }

    // Deepest unclosed container is the most useful to report.
    if stack.len() > 1
        && let Some(frame) = stack.pop()
    {
        return Err(CompileError::UnclosedComponent {
            name: frame.name,
            line: frame.line,
        });
    }

    let mut root = stack.pop().unwrap_or_else(Frame::root);
    state.flush(&mut root);

    let mut metadata = options.metadata_defaults.clone();
    metadata.extend(front.metadata);
    if let Some(title) = state.title {
        metadata
            .entry("title".to_owned())
            .or_insert_with(|| serde_json::Value::String(title));
    }

    Ok(CompiledModule {
        body: root.children,
        toc: state.toc,
        metadata,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::module::Node;

    fn compile_default(text: &str) -> CompiledModule {
        compile(text, &CompileOptions::default()).unwrap()
    }

    #[test]
    fn test_plain_markdown() {
        let module = compile_default("Just a paragraph.\n");
        assert_eq!(module.body.len(), 1);
        assert!(matches!(&module.body[0], Node::Html(html) if html.contains("<p>")));
        assert!(module.toc.is_empty());
    }

    #[test]
    fn test_leaf_component_splits_body() {
        let module = compile_default("before\n\n::badge[New]\n\nafter\n");
        assert_eq!(module.body.len(), 3);
        assert!(matches!(
            &module.body[1],
            Node::Component { name, children, .. } if name == "badge" && children.is_empty()
        ));
    }

    #[test]
    fn test_container_collects_children() {
        let text = ":::callout{type=\"tip\"}\nInner *markdown*.\n:::\n";
        let module = compile_default(text);
        assert_eq!(module.body.len(), 1);
        let Node::Component { name, args, children } = &module.body[0] else {
            panic!("expected component");
        };
        assert_eq!(name, "callout");
        assert_eq!(args.get("type"), Some("tip"));
        assert!(matches!(&children[0], Node::Html(html) if html.contains("<em>")));
    }

    #[test]
    fn test_nested_containers() {
        let text = "::::tabs\n:::tab{label=\"One\"}\nfirst\n:::\n:::tab{label=\"Two\"}\nsecond\n:::\n::::\n";
        let module = compile_default(text);
        let Node::Component { name, children, .. } = &module.body[0] else {
            panic!("expected tabs");
        };
        assert_eq!(name, "tabs");
        assert_eq!(children.len(), 2);
        assert!(matches!(
            &children[1],
            Node::Component { name, .. } if name == "tab"
        ));
    }

    #[test]
    fn test_unclosed_container_is_error() {
        let err = compile(":::callout\ntext\n", &CompileOptions::default()).unwrap_err();
        match err {
            CompileError::UnclosedComponent { name, line } => {
                assert_eq!(name, "callout");
                assert_eq!(line, 1);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_stray_close_is_error() {
        let err = compile("text\n:::\n", &CompileOptions::default()).unwrap_err();
        assert!(matches!(err, CompileError::UnexpectedClose { line: 2 }));
    }

    #[test]
    fn test_syntax_error_reports_raw_line() {
        let text = "---\ntitle: x\n---\n\n::badge[oops\n";
        let err = compile(text, &CompileOptions::default()).unwrap_err();
        match err {
            CompileError::Syntax { line, column, .. } => {
                assert_eq!(line, 5);
                assert_eq!(column, 8);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_front_matter_becomes_metadata() {
        let module = compile_default("---\ntitle: Guide\norder: 3\n---\nbody\n");
        assert_eq!(module.metadata["title"], serde_json::json!("Guide"));
        assert_eq!(module.metadata["order"], serde_json::json!(3));
    }

    #[test]
    fn test_metadata_defaults_lose_to_front_matter() {
        let mut options = CompileOptions::default();
        options
            .metadata_defaults
            .insert("title".to_owned(), serde_json::json!("Default"));
        options
            .metadata_defaults
            .insert("layout".to_owned(), serde_json::json!("docs"));
        let module = compile("---\ntitle: Mine\n---\nbody\n", &options).unwrap();
        assert_eq!(module.metadata["title"], serde_json::json!("Mine"));
        assert_eq!(module.metadata["layout"], serde_json::json!("docs"));
    }

    #[test]
    fn test_first_h1_is_title_fallback() {
        let module = compile_default("# Welcome\n\ntext\n");
        assert_eq!(module.metadata["title"], serde_json::json!("Welcome"));

        let module = compile_default("---\ntitle: Explicit\n---\n# Welcome\n");
        assert_eq!(module.metadata["title"], serde_json::json!("Explicit"));
    }

    #[test]
    fn test_toc_exported() {
        let module = compile_default("# Title\n\n## First\n\n### Deep\n\n## Second\n");
        let titles: Vec<_> = module.toc.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, ["First", "Deep", "Second"]);
        assert_eq!(module.toc[1].level, 3);
    }

    #[test]
    fn test_code_fence_shields_references() {
        let text = "```\n:::callout\n:::\n```\n";
        let module = compile_default(text);
        assert_eq!(module.body.len(), 1);
        assert!(matches!(&module.body[0], Node::Html(html) if html.contains(":::callout")));
    }

    #[test]
    fn test_relative_links_use_file_path() {
        let options = CompileOptions::for_file("guide/setup.md");
        let module = compile("[next](advanced.md)\n", &options).unwrap();
        let Node::Html(html) = &module.body[0] else {
            panic!("expected html");
        };
        assert!(html.contains(r#"href="/guide/advanced""#), "{html}");
    }

    #[test]
    fn test_headings_inside_containers_reach_toc() {
        let text = ":::details[More]\n## Hidden Section\n:::\n";
        let module = compile_default(text);
        assert_eq!(module.toc.len(), 1);
        assert_eq!(module.toc[0].anchor, "hidden-section");
    }
}
