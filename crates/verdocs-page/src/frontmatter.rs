//! YAML front matter extraction.

use std::collections::BTreeMap;

use crate::error::CompileError;

/// Front matter split out of a raw document.
#[derive(Debug)]
pub(crate) struct FrontMatter {
    /// Parsed metadata (empty if the document had no front matter block).
    pub(crate) metadata: BTreeMap<String, serde_json::Value>,
    /// Number of raw lines consumed before the body starts.
    pub(crate) body_offset: usize,
}

/// Split front matter from the document body.
///
/// A front matter block is a `---` fence on the very first line, YAML until
/// the next `---` fence. Documents without one pass through untouched. A
/// fence that opens but never closes is treated as a thematic break by
/// markdown, so it is also passed through rather than rejected.
pub(crate) fn extract(text: &str) -> Result<(FrontMatter, &str), CompileError> {
    let empty = FrontMatter {
        metadata: BTreeMap::new(),
        body_offset: 0,
    };

    let Some(after_open) = text.strip_prefix("---\n").or_else(|| {
        (text == "---").then_some("")
    }) else {
        return Ok((empty, text));
    };

    let Some(close) = find_close(after_open) else {
        return Ok((empty, text));
    };

    let yaml = &after_open[..close.yaml_end];
    let metadata: BTreeMap<String, serde_json::Value> = if yaml.trim().is_empty() {
        BTreeMap::new()
    } else {
        serde_yaml::from_str(yaml)
            .map_err(|source| CompileError::FrontMatter { line: 1, source })?
    };

    // Opening fence + yaml lines + closing fence.
    let body_offset = 2 + yaml.lines().count();
    let body = &after_open[close.body_start..];
    Ok((FrontMatter { metadata, body_offset }, body))
}

struct Close {
    yaml_end: usize,
    body_start: usize,
}

/// Find the closing `---` fence in the text after the opening fence.
fn find_close(after_open: &str) -> Option<Close> {
    let mut offset = 0;
    for line in after_open.split_inclusive('\n') {
        if line.trim_end() == "---" {
            return Some(Close {
                yaml_end: offset,
                body_start: offset + line.len(),
            });
        }
        offset += line.len();
    }
    None
}
