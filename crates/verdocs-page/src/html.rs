//! HTML escaping and anchor slug generation.

use std::collections::HashMap;

/// Escape text for safe embedding in HTML.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Turn heading text into an anchor slug.
///
/// Lowercases, keeps alphanumerics, folds everything else into single
/// hyphens: `"Install & Setup"` → `"install-setup"`.
#[must_use]
pub(crate) fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;
    for c in text.chars() {
        if c.is_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            for lower in c.to_lowercase() {
                slug.push(lower);
            }
        } else {
            pending_hyphen = true;
        }
    }
    if slug.is_empty() {
        "section".to_owned()
    } else {
        slug
    }
}

/// Document-wide anchor deduplication.
///
/// Repeated headings get `-1`, `-2`, … suffixes so every anchor in a page
/// is unique.
#[derive(Debug, Default)]
pub(crate) struct SlugCounter {
    seen: HashMap<String, usize>,
}

impl SlugCounter {
    /// Produce a unique anchor for heading text.
    pub(crate) fn anchor_for(&mut self, text: &str) -> String {
        let base = slugify(text);
        let count = self.seen.entry(base.clone()).or_insert(0);
        let anchor = if *count == 0 {
            base.clone()
        } else {
            format!("{base}-{count}")
        };
        *count += 1;
        anchor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">&"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Section Title"), "section-title");
        assert_eq!(slugify("Install & Setup"), "install-setup");
        assert_eq!(slugify("  FAQ  "), "faq");
        assert_eq!(slugify("!!!"), "section");
    }

    #[test]
    fn test_slug_counter_dedupes() {
        let mut counter = SlugCounter::default();
        assert_eq!(counter.anchor_for("FAQ"), "faq");
        assert_eq!(counter.anchor_for("FAQ"), "faq-1");
        assert_eq!(counter.anchor_for("FAQ"), "faq-2");
        assert_eq!(counter.anchor_for("Other"), "other");
    }
}
