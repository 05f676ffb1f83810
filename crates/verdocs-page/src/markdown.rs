//! Markdown lowering.
//!
//! Parses a markdown fragment into events, injects heading anchors, collects
//! table-of-contents entries, rewrites relative document links into routes,
//! then emits HTML. State is threaded through so anchors stay unique across
//! fragments of the same document.

use pulldown_cmark::{CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd, html};

use crate::html::SlugCounter;
use crate::module::TocEntry;

fn parser_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_TASKLISTS
}

/// Lower one markdown fragment to HTML.
///
/// `dir_route` is the route of the directory containing the source file,
/// used to resolve relative links. Headings at level 2 and deeper are
/// appended to `toc`; the first H1 of the document is captured into `title`.
pub(crate) fn lower(
    text: &str,
    dir_route: &str,
    slugs: &mut SlugCounter,
    toc: &mut Vec<TocEntry>,
    title: &mut Option<String>,
) -> String {
    let mut events: Vec<Event<'_>> = Vec::new();
    // Level, accumulated text, and index of the start event being patched.
    let mut heading: Option<(HeadingLevel, String, usize)> = None;

    for event in Parser::new_ext(text, parser_options()) {
        match event {
            Event::Start(Tag::Heading {
                level,
                id,
                classes,
                attrs,
            }) => {
                events.push(Event::Start(Tag::Heading {
                    level,
                    id,
                    classes,
                    attrs,
                }));
                heading = Some((level, String::new(), events.len() - 1));
            }
            Event::End(TagEnd::Heading(level)) => {
                if let Some((lvl, text, start)) = heading.take() {
                    let anchor = slugs.anchor_for(&text);
                    if let Event::Start(Tag::Heading { id, .. }) = &mut events[start] {
                        *id = Some(CowStr::from(anchor.clone()));
                    }
                    if lvl == HeadingLevel::H1 {
                        if title.is_none() {
                            *title = Some(text);
                        }
                    } else {
                        toc.push(TocEntry {
                            level: lvl as u8,
                            title: text,
                            anchor,
                        });
                    }
                }
                events.push(Event::End(TagEnd::Heading(level)));
            }
            Event::Text(t) => {
                if let Some((_, buf, _)) = heading.as_mut() {
                    buf.push_str(&t);
                }
                events.push(Event::Text(t));
            }
            Event::Code(t) => {
                if let Some((_, buf, _)) = heading.as_mut() {
                    buf.push_str(&t);
                }
                events.push(Event::Code(t));
            }
            Event::Start(Tag::Link {
                link_type,
                dest_url,
                title: link_title,
                id,
            }) => {
                let dest_url = match rewrite_link(&dest_url, dir_route) {
                    Some(rewritten) => CowStr::from(rewritten),
                    None => dest_url,
                };
                events.push(Event::Start(Tag::Link {
                    link_type,
                    dest_url,
                    title: link_title,
                    id,
                }));
            }
            other => events.push(other),
        }
    }

    let mut out = String::with_capacity(text.len() * 2);
    html::push_html(&mut out, events.into_iter());
    out
}

/// Rewrite a relative `.md`/`.mdx` link into an absolute route.
///
/// Absolute URLs, site-absolute paths, fragments, and non-document links are
/// left untouched. Returns `None` when no rewrite applies.
fn rewrite_link(dest: &str, dir_route: &str) -> Option<String> {
    if dest.is_empty()
        || dest.starts_with('#')
        || dest.starts_with('/')
        || dest.contains("://")
        || dest.starts_with("mailto:")
    {
        return None;
    }

    let (path, fragment) = match dest.split_once('#') {
        Some((path, fragment)) => (path, Some(fragment)),
        None => (dest, None),
    };
    let stripped = path
        .strip_suffix(".md")
        .or_else(|| path.strip_suffix(".mdx"))?;

    let mut segments: Vec<&str> = dir_route.split('/').filter(|s| !s.is_empty()).collect();
    for segment in stripped.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    // index files address their directory.
    if segments.last() == Some(&"index") {
        segments.pop();
    }

    let mut route = format!("/{}", segments.join("/"));
    if let Some(fragment) = fragment {
        route.push('#');
        route.push_str(fragment);
    }
    Some(route)
}
