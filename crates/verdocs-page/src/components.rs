//! Built-in presentation components.

use crate::directive::ComponentArgs;
use crate::html::escape_html;
use crate::registry::PresentationComponent;

const CALLOUT_KINDS: [&str; 4] = ["note", "tip", "warning", "caution"];

/// Admonition box: `:::callout{type="warning" title="Careful"}`.
///
/// Unknown `type` values fall back to `note`. The heading is the `title`
/// attribute if given, otherwise the capitalized kind.
pub struct Callout;

impl PresentationComponent for Callout {
    fn render(&self, args: &ComponentArgs, children: &str) -> String {
        let kind = args
            .get("type")
            .filter(|t| CALLOUT_KINDS.contains(t))
            .unwrap_or("note");
        let heading = match args.get("title") {
            Some(title) => escape_html(title),
            None => {
                let mut chars = kind.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            }
        };
        format!(
            "<div class=\"callout callout-{kind}\">\
             <p class=\"callout-title\">{heading}</p>\
             <div class=\"callout-body\">{children}</div>\
             </div>"
        )
    }
}

/// Collapsible section: `:::details[Show more]`.
pub struct Details;

impl PresentationComponent for Details {
    fn render(&self, args: &ComponentArgs, children: &str) -> String {
        let summary = if args.content.is_empty() {
            "Details".to_owned()
        } else {
            escape_html(&args.content)
        };
        format!("<details><summary>{summary}</summary>{children}</details>")
    }
}

/// Tab group container; holds [`Tab`] children.
pub struct Tabs;

impl PresentationComponent for Tabs {
    fn render(&self, _args: &ComponentArgs, children: &str) -> String {
        format!("<div class=\"tabs\">{children}</div>")
    }
}

/// One pane of a [`Tabs`] group: `:::tab{label="Linux"}`.
pub struct Tab;

impl PresentationComponent for Tab {
    fn render(&self, args: &ComponentArgs, children: &str) -> String {
        let label = escape_html(args.get("label").unwrap_or(""));
        format!("<section class=\"tab\" data-label=\"{label}\">{children}</section>")
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use pretty_assertions::assert_eq;

    use super::*;

    fn args(content: &str, attrs: &[(&str, &str)]) -> ComponentArgs {
        ComponentArgs {
            content: content.to_owned(),
            attrs: attrs
                .iter()
                .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
                .collect::<BTreeMap<_, _>>(),
        }
    }

    #[test]
    fn test_callout_kind_and_heading() {
        let html = Callout.render(&args("", &[("type", "warning")]), "<p>body</p>");
        assert!(html.contains("callout-warning"));
        assert!(html.contains(">Warning</p>"));
        assert!(html.contains("<p>body</p>"));
    }

    #[test]
    fn test_callout_unknown_kind_is_note() {
        let html = Callout.render(&args("", &[("type", "shiny")]), "");
        assert!(html.contains("callout-note"));
    }

    #[test]
    fn test_callout_custom_title_escaped() {
        let html = Callout.render(&args("", &[("title", "A & B")]), "");
        assert!(html.contains(">A &amp; B</p>"));
    }

    #[test]
    fn test_details_summary() {
        let html = Details.render(&args("Show <more>", &[]), "<p>hidden</p>");
        assert_eq!(
            html,
            "<details><summary>Show &lt;more&gt;</summary><p>hidden</p></details>"
        );
    }

    #[test]
    fn test_details_default_summary() {
        let html = Details.render(&args("", &[]), "");
        assert!(html.contains("<summary>Details</summary>"));
    }

    #[test]
    fn test_tabs_and_tab() {
        let pane = Tab.render(&args("", &[("label", "Linux")]), "<p>one</p>");
        assert_eq!(
            pane,
            "<section class=\"tab\" data-label=\"Linux\"><p>one</p></section>"
        );
        let group = Tabs.render(&ComponentArgs::default(), &pane);
        assert!(group.starts_with("<div class=\"tabs\">"));
    }
}
