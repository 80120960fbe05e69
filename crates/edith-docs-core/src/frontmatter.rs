//! Minimal frontmatter parser.
//!
//! A document may start with a metadata block delimited by `---` lines:
//!
//! ```text
//! ---
//! title: "Hooks"
//! tags: ["react", "hooks"]
//! ---
//! Body text
//! ```
//!
//! Each line inside the block is split on its first colon into a trimmed
//! key and value. Values wrapped in matching single or double quotes are
//! unwrapped, and values that look like a JSON array (`[...]`) are parsed
//! as one, keeping the literal string when that fails.
//!
//! This is deliberately a small `key: value` subset, not YAML. Nested
//! structures, multi-line values, and comments are not understood.
//!
//! # Example
//!
//! ```rust
//! use edith_docs_core::frontmatter::parse_frontmatter;
//!
//! let parsed = parse_frontmatter("---\ntitle: Hooks\n---\nBody text");
//! assert_eq!(parsed.metadata["title"], "Hooks");
//! assert_eq!(parsed.content, "Body text");
//! ```

use std::collections::BTreeMap;

use serde_json::Value;

/// Frontmatter keys and values exactly as written, before defaults.
pub type RawMetadata = BTreeMap<String, Value>;

const DELIMITER: &str = "---";
const CLOSING: &str = "\n---";

/// A document split into its metadata block and body.
#[derive(Debug, Clone, PartialEq)]
pub struct Frontmatter {
    pub metadata: RawMetadata,
    pub content: String,
}

/// Splits `text` into frontmatter and body. Never fails.
///
/// Without a delimited block at the very start of `text`, the metadata is
/// empty and `content` is `text` unchanged. Otherwise `content` is the body
/// with surrounding whitespace trimmed.
pub fn parse_frontmatter(text: &str) -> Frontmatter {
    let Some((block, body)) = split_block(text) else {
        return Frontmatter {
            metadata: RawMetadata::new(),
            content: text.to_string(),
        };
    };

    let metadata = block.split('\n').filter_map(parse_line).collect();

    Frontmatter {
        metadata,
        content: body.trim().to_string(),
    }
}

/// Locates the block between the opening and closing delimiters.
///
/// The opening `---` may be followed by whitespace that must contain a
/// newline; the block starts after one of those newlines, trying the last
/// one first. The block ends at the first `\n---` whose trailing
/// whitespace also contains a newline.
fn split_block(text: &str) -> Option<(&str, &str)> {
    let rest = text.strip_prefix(DELIMITER)?;
    let gap = leading_whitespace(rest);

    let newlines: Vec<usize> = gap.match_indices('\n').map(|(i, _)| i).collect();
    newlines
        .into_iter()
        .rev()
        .find_map(|nl| find_closing(&rest[nl + 1..]))
}

fn find_closing(inner: &str) -> Option<(&str, &str)> {
    let mut from = 0;
    while let Some(offset) = inner[from..].find(CLOSING) {
        let at = from + offset;
        let after = &inner[at + CLOSING.len()..];
        if let Some(nl) = leading_whitespace(after).rfind('\n') {
            return Some((&inner[..at], &after[nl + 1..]));
        }
        from = at + 1;
    }
    None
}

fn leading_whitespace(s: &str) -> &str {
    &s[..s.len() - s.trim_start().len()]
}

fn parse_line(line: &str) -> Option<(String, Value)> {
    // A colon in the first column does not start a key.
    let colon = line.find(':').filter(|&i| i > 0)?;
    let key = line[..colon].trim().to_string();
    let value = parse_value(line[colon + 1..].trim());
    Some((key, value))
}

fn parse_value(raw: &str) -> Value {
    let value = strip_quotes(raw);
    if value.starts_with('[') && value.ends_with(']') {
        if let Ok(list) = serde_json::from_str::<Value>(value) {
            return list;
        }
    }
    Value::String(value.to_string())
}

fn strip_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.starts_with(quote) && value.ends_with(quote) {
            // A lone quote character unwraps to the empty string.
            return value.get(1..value.len() - 1).unwrap_or("");
        }
    }
    value
}
