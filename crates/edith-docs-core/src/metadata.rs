//! Typed document metadata with defaults.
//!
//! Raw frontmatter is an open map of strings and arrays. This module folds
//! it into [`DocumentMetadata`], applying the defaults listed below. An
//! empty string counts as absent.
//!
//! | Key | Default |
//! |-----|---------|
//! | `title` | slug with hyphens replaced by spaces |
//! | `description` | empty |
//! | `category` | directory the file was found under |
//! | `tags` | empty list |
//! | `status` | `published` |
//! | `author` | `Unknown` |
//! | `date` | today, `YYYY-MM-DD` |
//! | `readTime` | `5min` |
//! | `slug` | file name without extension |
//!
//! Unrecognised keys are kept in [`DocumentMetadata::extra`].

use chrono::Utc;
use serde_json::Value;

use crate::frontmatter::RawMetadata;
use crate::models::{DocStatus, DocumentMetadata};

pub const DEFAULT_AUTHOR: &str = "Unknown";
pub const DEFAULT_READ_TIME: &str = "5min";

/// Today's date in UTC as `YYYY-MM-DD`.
pub fn today() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}

/// Human-readable title derived from a slug (`hooks-guide` → `hooks guide`).
pub fn title_from_slug(slug: &str) -> String {
    slug.replace('-', " ")
}

impl DocumentMetadata {
    /// Applies defaults to parsed frontmatter.
    ///
    /// `slug` and `category` are the structural values taken from the
    /// file name and its directory; `today` is the date used when the
    /// frontmatter has none.
    pub fn resolve(mut raw: RawMetadata, slug: &str, category: &str, today: &str) -> Self {
        let title = text(raw.remove("title")).unwrap_or_else(|| title_from_slug(slug));
        let description = text(raw.remove("description")).unwrap_or_default();
        let category = text(raw.remove("category")).unwrap_or_else(|| category.to_string());
        let tags = tags(raw.remove("tags"));
        let status = text(raw.remove("status"))
            .map(|s| DocStatus::parse(&s))
            .unwrap_or_default();
        let author = text(raw.remove("author")).unwrap_or_else(|| DEFAULT_AUTHOR.to_string());
        let date = text(raw.remove("date")).unwrap_or_else(|| today.to_string());
        let read_time =
            text(raw.remove("readTime")).unwrap_or_else(|| DEFAULT_READ_TIME.to_string());
        let slug = text(raw.remove("slug")).unwrap_or_else(|| slug.to_string());

        Self {
            title,
            description,
            category,
            tags,
            status,
            author,
            date: Some(date),
            read_time,
            slug,
            extra: raw,
        }
    }

    /// Metadata for a document whose content is unavailable.
    pub fn fallback(slug: &str, category: &str) -> Self {
        Self {
            title: title_from_slug(slug),
            description: String::new(),
            category: category.to_string(),
            tags: Vec::new(),
            status: DocStatus::Unknown,
            author: DEFAULT_AUTHOR.to_string(),
            date: None,
            read_time: DEFAULT_READ_TIME.to_string(),
            slug: slug.to_string(),
            extra: RawMetadata::new(),
        }
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn text(value: Option<Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::Array(items) => Some(
            items
                .iter()
                .map(scalar_text)
                .collect::<Vec<_>>()
                .join(", "),
        ),
        other => Some(scalar_text(&other)),
    }
}

fn tags(value: Option<Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items.iter().map(scalar_text).collect(),
        Some(Value::String(tag)) if !tag.is_empty() => vec![tag],
        Some(Value::Null) | Some(Value::String(_)) | None => Vec::new(),
        Some(other) => vec![scalar_text(&other)],
    }
}
