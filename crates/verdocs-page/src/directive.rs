//! Component reference syntax.
//!
//! Parses block directive lines: container fences `:::name[content]{attrs}`
//! … `:::` and leaves `::name[content]{attrs}`. Attributes are `key="value"`
//! pairs (single quotes and bare values also accepted). Anything that does
//! not look like a component reference is plain markdown; anything that
//! starts like one but is malformed is a syntax error with a column.

use std::collections::BTreeMap;

/// Arguments attached to a component reference.
///
/// `content` comes from the bracket part `[…]`; `attrs` from the brace part
/// `{key="value" …}`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ComponentArgs {
    /// Bracket content (empty if not provided).
    pub content: String,
    /// Key-value attributes, in key order.
    pub attrs: BTreeMap<String, String>,
}

impl ComponentArgs {
    /// Get an attribute value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }
}

/// A recognized component reference line.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum ComponentLine {
    /// `:::name[content]{attrs}` — opens a container.
    ContainerStart {
        name: String,
        args: ComponentArgs,
        colons: usize,
    },
    /// `:::` — closes the innermost container.
    ContainerEnd,
    /// `::name[content]{attrs}` — self-contained component.
    Leaf { name: String, args: ComponentArgs },
}

/// Syntax failure within a component reference line.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct SyntaxError {
    /// 1-based column where parsing failed.
    pub(crate) column: usize,
    pub(crate) message: String,
}

impl SyntaxError {
    fn new(column: usize, message: impl Into<String>) -> Self {
        Self {
            column,
            message: message.into(),
        }
    }
}

/// Parse one line for component reference syntax.
///
/// Returns `Ok(None)` for plain markdown lines. Lines that open with a
/// directive marker but carry malformed brackets, braces, or trailing junk
/// are errors rather than silently passing through as text.
pub(crate) fn parse_component_line(
    line: &str,
) -> Result<Option<ComponentLine>, SyntaxError> {
    let indent = line.len() - line.trim_start().len();
    let trimmed = line.trim_start();

    let colons = trimmed.chars().take_while(|&c| c == ':').count();
    if colons < 2 {
        return Ok(None);
    }

    let rest = trimmed[colons..].trim_end();

    // Closing fence: colons only.
    if rest.is_empty() {
        return if colons >= 3 {
            Ok(Some(ComponentLine::ContainerEnd))
        } else {
            // A bare `::` line is not a reference.
            Ok(None)
        };
    }

    let name_end = rest
        .find(|c: char| c == '[' || c == '{' || c.is_whitespace())
        .unwrap_or(rest.len());
    let name = &rest[..name_end];
    if !is_valid_name(name) {
        // Looks like punctuation, not a component reference.
        return Ok(None);
    }

    let mut pos = name_end;
    let col = |offset: usize| indent + colons + offset + 1;

    let content = match take_delimited(&rest[pos..], '[', ']') {
        Ok(Some((content, consumed))) => {
            pos += consumed;
            content
        }
        Ok(None) => String::new(),
        Err(offset) => {
            return Err(SyntaxError::new(col(pos + offset), "unclosed '['"));
        }
    };

    let attrs_str = match take_delimited(&rest[pos..], '{', '}') {
        Ok(Some((attrs, consumed))) => {
            pos += consumed;
            Some(attrs)
        }
        Ok(None) => None,
        Err(offset) => {
            return Err(SyntaxError::new(col(pos + offset), "unclosed '{'"));
        }
    };

    if !rest[pos..].trim().is_empty() {
        return Err(SyntaxError::new(
            col(pos),
            "unexpected text after component reference",
        ));
    }

    let attrs = match attrs_str {
        Some(s) => parse_attrs(&s).map_err(|(offset, message)| {
            // Offset is relative to the attrs string; the brace itself adds one.
            SyntaxError::new(col(pos - s.len() - 1 + offset), message)
        })?,
        None => BTreeMap::new(),
    };

    let args = ComponentArgs { content, attrs };
    let parsed = if colons == 2 {
        ComponentLine::Leaf {
            name: name.to_owned(),
            args,
        }
    } else {
        ComponentLine::ContainerStart {
            name: name.to_owned(),
            args,
            colons,
        }
    };
    Ok(Some(parsed))
}

/// Valid component names: alphanumerics, hyphens, underscores.
fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
}

/// Take a `open…close` delimited span from the start of `s`.
///
/// Returns `Ok(Some((inner, bytes_consumed)))`, `Ok(None)` when `s` does not
/// start with `open`, or `Err(byte_offset)` of the opener when unclosed.
fn take_delimited(s: &str, open: char, close: char) -> Result<Option<(String, usize)>, usize> {
    if !s.starts_with(open) {
        return Ok(None);
    }

    let mut depth = 0usize;
    for (i, c) in s.char_indices() {
        if c == open {
            depth += 1;
        } else if c == close {
            depth -= 1;
            if depth == 0 {
                return Ok(Some((s[open.len_utf8()..i].to_owned(), i + close.len_utf8())));
            }
        }
    }
    Err(0)
}

/// Parse `key="value"` attribute pairs.
///
/// Accepts double quotes, single quotes, and bare values. Returns the byte
/// offset and message of the first malformed pair.
fn parse_attrs(s: &str) -> Result<BTreeMap<String, String>, (usize, String)> {
    let mut attrs = BTreeMap::new();
    let mut pos = 0;

    while pos < s.len() {
        let rest = &s[pos..];
        let skipped = rest.len() - rest.trim_start().len();
        pos += skipped;
        if pos >= s.len() {
            break;
        }
        let rest = &s[pos..];

        let Some(eq) = rest.find('=') else {
            return Err((pos, format!("expected key=value, found '{}'", rest.trim())));
        };
        let key = rest[..eq].trim();
        if key.is_empty() || key.contains(char::is_whitespace) {
            return Err((pos, "expected key=value".to_owned()));
        }

        let after_eq = &rest[eq + 1..];
        let (value, consumed) = if let Some(stripped) = after_eq.strip_prefix('"') {
            let end = stripped
                .find('"')
                .ok_or((pos + eq + 1, "unclosed '\"'".to_owned()))?;
            (stripped[..end].to_owned(), eq + 1 + end + 2)
        } else if let Some(stripped) = after_eq.strip_prefix('\'') {
            let end = stripped
                .find('\'')
                .ok_or((pos + eq + 1, "unclosed \"'\"".to_owned()))?;
            (stripped[..end].to_owned(), eq + 1 + end + 2)
        } else {
            let end = after_eq
                .find(char::is_whitespace)
                .unwrap_or(after_eq.len());
            (after_eq[..end].to_owned(), eq + 1 + end)
        };

        attrs.insert(key.to_owned(), value);
        pos += consumed;
    }

    Ok(attrs)
}

/// Tracks fenced code blocks so directive-looking lines inside them pass
/// through as code.
#[derive(Debug, Default)]
pub(crate) struct FenceTracker {
    open: Option<(char, usize)>,
}

impl FenceTracker {
    /// Observe a line; returns true if the line belongs to a code fence
    /// (including the fence delimiters themselves).
    pub(crate) fn observe(&mut self, line: &str) -> bool {
        let trimmed = line.trim_start();
        let marker = trimmed.chars().next().filter(|&c| c == '`' || c == '~');

        if let Some(c) = marker {
            let run = trimmed.chars().take_while(|&x| x == c).count();
            if run >= 3 {
                match self.open {
                    None => {
                        self.open = Some((c, run));
                        return true;
                    }
                    Some((open_c, open_run)) if c == open_c && run >= open_run => {
                        self.open = None;
                        return true;
                    }
                    Some(_) => {}
                }
            }
        }

        self.open.is_some()
    }
}
