//! Document compilation and evaluation for verdocs.
//!
//! Raw document text flows through two stages:
//!
//! 1. **Compile** ([`compile`]): markdown plus embedded component references
//!    is parsed into an opaque [`CompiledModule`] — a lowered body plus
//!    explicit exports (table of contents, metadata). Compilation never
//!    executes anything.
//! 2. **Evaluate** ([`evaluate`]): the module is executed against an
//!    injected [`ComponentRegistry`], resolving every component reference by
//!    name. Unknown names fail evaluation; nothing is substituted silently.
//!
//! # Component syntax
//!
//! Components are referenced with block directive syntax:
//!
//! ```text
//! :::callout{type="warning"}
//! Mind the gap.
//! :::
//!
//! ::badge[Deprecated]{since="2.0"}
//! ```
//!
//! Containers (`:::name` … `:::`) nest by using more colons on the outer
//! fence; leaves (`::name`) are self-contained. Fenced code blocks shield
//! directive-looking lines.
//!
//! # Example
//!
//! ```
//! use verdocs_page::{CompileOptions, ComponentRegistry, compile, evaluate};
//!
//! let module = compile("# Hello\n\nWorld.", &CompileOptions::default()).unwrap();
//! let page = evaluate(&module, &ComponentRegistry::with_defaults()).unwrap();
//! assert!(page.html.contains("<p>World.</p>"));
//! ```

mod compiler;
mod components;
mod directive;
mod error;
mod eval;
mod frontmatter;
mod html;
mod markdown;
mod module;
mod registry;

pub use compiler::{CompileOptions, compile};
pub use components::{Callout, Details, Tab, Tabs};
pub use directive::ComponentArgs;
pub use error::{CompileError, EvaluationError};
pub use eval::{EvaluatedPage, evaluate};
pub use html::escape_html;
pub use module::{CompiledModule, TocEntry};
pub use registry::{ComponentRegistry, PresentationComponent};
