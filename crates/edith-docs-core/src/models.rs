//! Core data models used throughout Edith Docs.
//!
//! These types represent the categories, files, documents, and catalog
//! entries that flow through the retrieval pipeline. All of them are
//! transient: they are rebuilt from the content host on every request.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One top-level directory of the content repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDescriptor {
    pub name: String,
    pub path: String,
    pub url: String,
}

/// A markdown file listed inside a category directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileDescriptor {
    pub name: String,
    /// File name without its markdown extension.
    pub slug: String,
    pub path: String,
    pub download_url: Option<String>,
    pub size: u64,
    /// Content-addressed blob version reported by the host.
    pub sha: String,
}

/// Publication status shown as a badge next to each document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocStatus {
    New,
    Updated,
    Popular,
    #[default]
    Published,
    Unknown,
}

impl DocStatus {
    /// Parses a frontmatter status value. Matching is case-insensitive;
    /// anything unrecognised becomes [`DocStatus::Unknown`].
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "new" => DocStatus::New,
            "updated" => DocStatus::Updated,
            "popular" => DocStatus::Popular,
            "published" => DocStatus::Published,
            _ => DocStatus::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DocStatus::New => "new",
            DocStatus::Updated => "updated",
            DocStatus::Popular => "popular",
            DocStatus::Published => "published",
            DocStatus::Unknown => "unknown",
        }
    }

    /// Badge text used by listing views.
    pub fn label(&self) -> &'static str {
        match self {
            DocStatus::New => "NEW",
            DocStatus::Updated => "UPDATED",
            DocStatus::Popular => "POPULAR",
            DocStatus::Published => "PUBLISHED",
            DocStatus::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for DocStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed frontmatter of a document, with defaults already applied.
///
/// See [`DocumentMetadata::resolve`](crate::metadata) for how raw
/// frontmatter values map onto these fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetadata {
    pub title: String,
    pub description: String,
    /// Authoritative category. May differ from the directory the file
    /// was found under when the frontmatter sets it explicitly.
    pub category: String,
    pub tags: Vec<String>,
    pub status: DocStatus,
    pub author: String,
    /// ISO `YYYY-MM-DD`. `None` only for catalog fallback entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    pub read_time: String,
    pub slug: String,
    /// Frontmatter keys with no dedicated field.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// A fully fetched and parsed document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub metadata: DocumentMetadata,
    /// Markdown body with the frontmatter block removed.
    pub content: String,
    /// Decoded file text, frontmatter included.
    pub raw_content: String,
    /// Blob sha of the file the document was read from.
    pub last_modified: String,
    pub size: u64,
}

/// Result of a slug lookup: the document plus the category it was
/// catalogued under.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedDocument {
    #[serde(flatten)]
    pub document: Document,
    pub category: String,
}

/// One row of the flattened document catalog.
///
/// Combines the host's file listing with the document's metadata. Built
/// fresh for every catalog request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub name: String,
    pub path: String,
    pub download_url: Option<String>,
    pub size: u64,
    pub sha: String,
    #[serde(flatten)]
    pub metadata: DocumentMetadata,
    pub full_path: String,
    pub last_modified: String,
}

/// JSON keys written by [`CatalogEntry`]'s own fields. Frontmatter keys
/// with these names are dropped from the flattened `extra` map so every
/// key appears once.
const ENTRY_KEYS: &[&str] = &[
    "name",
    "path",
    "downloadUrl",
    "size",
    "sha",
    "fullPath",
    "lastModified",
];

impl CatalogEntry {
    /// Builds an entry for a document whose content was fetched and parsed.
    pub fn from_document(file: FileDescriptor, document: &Document) -> Self {
        let mut metadata = document.metadata.clone();
        metadata
            .extra
            .retain(|key, _| !ENTRY_KEYS.contains(&key.as_str()));

        Self {
            full_path: file.path.clone(),
            last_modified: document.last_modified.clone(),
            name: file.name,
            path: file.path,
            download_url: file.download_url,
            size: file.size,
            sha: file.sha,
            metadata,
        }
    }

    /// Builds an entry from structural information only, for documents
    /// whose content could not be fetched or parsed.
    pub fn fallback(file: FileDescriptor, category: &str) -> Self {
        let metadata = DocumentMetadata::fallback(&file.slug, category);
        Self {
            full_path: file.path.clone(),
            last_modified: file.sha.clone(),
            name: file.name,
            path: file.path,
            download_url: file.download_url,
            size: file.size,
            sha: file.sha,
            metadata,
        }
    }

    pub fn slug(&self) -> &str {
        &self.metadata.slug
    }

    pub fn category(&self) -> &str {
        &self.metadata.category
    }
}
