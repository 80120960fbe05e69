//! Catalog assembly from the content host.
//!
//! [`DocumentSource`] walks the repository tree and turns it into a flat
//! catalog:
//!
//! 1. List the root; every directory is a category. Root files (a README)
//!    are ignored.
//! 2. List each category; files matching the include globs (and not the
//!    exclude globs) are documents.
//! 3. Fetch, decode, and parse every document for its metadata.
//! 4. Merge file listing and metadata into a [`CatalogEntry`].
//!
//! A document that cannot be fetched or parsed still gets an entry, built
//! from its file name alone. A category that cannot be listed is skipped,
//! and an unreadable root yields an empty catalog; both are logged.
//!
//! Categories are visited one after another. Within a category up to
//! `index.concurrency` documents are fetched at once, and entries keep the
//! host's listing order regardless of which fetch finishes first.

use std::sync::Arc;

use anyhow::{Context, Result};
use edith_docs_core::frontmatter::parse_frontmatter;
use edith_docs_core::metadata::today;
use edith_docs_core::models::{
    CatalogEntry, CategoryDescriptor, Document, DocumentMetadata, FileDescriptor,
};
use futures::stream::{self, StreamExt};
use globset::{Glob, GlobSet, GlobSetBuilder};
use tracing::{info, warn};

use crate::config::{Config, IndexConfig};
use crate::decode::{decode_content, decode_content_or_empty};
use crate::error::{DocumentError, HostError};
use crate::host::{self, ContentHost, Contents, EntryKind};

/// Read-only view of a documentation repository.
pub struct DocumentSource {
    host: Arc<dyn ContentHost>,
    files: FileFilter,
    concurrency: usize,
    strict_decode: bool,
}

impl DocumentSource {
    pub fn new(host: Arc<dyn ContentHost>, config: &IndexConfig) -> Result<Self> {
        Ok(Self {
            host,
            files: FileFilter::new(config)?,
            concurrency: config.concurrency.max(1),
            strict_decode: config.strict_decode,
        })
    }

    /// Connects to the host described by `config.host`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let host = host::from_config(&config.host)?;
        Self::new(host, &config.index)
    }

    pub fn host(&self) -> &Arc<dyn ContentHost> {
        &self.host
    }

    /// Top-level directories of the repository.
    pub async fn categories(&self) -> Result<Vec<CategoryDescriptor>, HostError> {
        let entries = match self.host.get_contents("").await? {
            Contents::Directory(entries) => entries,
            Contents::File(_) => {
                warn!("repository root is not a directory");
                return Ok(Vec::new());
            }
        };

        Ok(entries
            .into_iter()
            .filter(|e| e.kind == EntryKind::Dir)
            .map(|e| CategoryDescriptor {
                name: e.name,
                path: e.path,
                url: e.url.unwrap_or_default(),
            })
            .collect())
    }

    /// Document files directly inside the category directory at `path`.
    pub async fn category_files(&self, path: &str) -> Result<Vec<FileDescriptor>, HostError> {
        let entries = match self.host.get_contents(path).await? {
            Contents::Directory(entries) => entries,
            Contents::File(_) => {
                warn!(path, "category is not a directory");
                return Ok(Vec::new());
            }
        };

        Ok(entries
            .into_iter()
            .filter(|e| e.kind == EntryKind::File && self.files.accepts(&e.name))
            .map(|e| FileDescriptor {
                slug: slug_of(&e.name).to_string(),
                name: e.name,
                path: e.path,
                download_url: e.download_url,
                size: e.size,
                sha: e.sha,
            })
            .collect())
    }

    /// Fetches and parses the document at `path`.
    ///
    /// Metadata defaults use the file name as slug and the containing
    /// directory as category. Undecodable content yields an empty
    /// document unless `strict_decode` is set, in which case it is a
    /// [`DocumentError::Decode`].
    pub async fn fetch_document(&self, path: &str) -> Result<Document, DocumentError> {
        let file = match self.host.get_contents(path).await? {
            Contents::File(file) if file.entry.kind == EntryKind::File => file,
            _ => return Err(DocumentError::NotAFile(path.to_string())),
        };

        let encoded = file.content.as_deref().unwrap_or_default();
        let raw_content = if self.strict_decode {
            decode_content(encoded)?
        } else {
            decode_content_or_empty(encoded)
        };

        let (category, file_name) = split_path(path);
        let parsed = parse_frontmatter(&raw_content);
        let metadata =
            DocumentMetadata::resolve(parsed.metadata, slug_of(file_name), category, &today());

        Ok(Document {
            metadata,
            content: parsed.content,
            raw_content,
            last_modified: file.entry.sha,
            size: file.entry.size,
        })
    }

    /// Builds the full catalog. Never fails; see the module docs for how
    /// partial failures are absorbed.
    pub async fn build_catalog(&self) -> Vec<CatalogEntry> {
        let categories = match self.categories().await {
            Ok(categories) => categories,
            Err(e) => {
                warn!(error = %e, "failed to list categories");
                return Vec::new();
            }
        };

        let mut catalog = Vec::new();
        for category in &categories {
            let files = match self.category_files(&category.path).await {
                Ok(files) => files,
                Err(e) => {
                    warn!(category = %category.name, error = %e, "failed to list category");
                    continue;
                }
            };

            let entries: Vec<CatalogEntry> = stream::iter(files)
                .map(|file| self.catalog_entry(&category.name, file))
                .buffered(self.concurrency)
                .collect()
                .await;
            catalog.extend(entries);
        }

        info!(
            categories = categories.len(),
            documents = catalog.len(),
            "catalog built"
        );
        catalog
    }

    async fn catalog_entry(&self, category: &str, file: FileDescriptor) -> CatalogEntry {
        match self.fetch_document(&file.path).await {
            Ok(document) => CatalogEntry::from_document(file, &document),
            Err(e) => {
                warn!(path = %file.path, error = %e, "using fallback metadata");
                CatalogEntry::fallback(file, category)
            }
        }
    }
}

/// Include/exclude globs applied to file names within a category.
struct FileFilter {
    include: GlobSet,
    exclude: GlobSet,
}

impl FileFilter {
    fn new(config: &IndexConfig) -> Result<Self> {
        Ok(Self {
            include: build_globset(&config.include_globs)?,
            exclude: build_globset(&config.exclude_globs)?,
        })
    }

    fn accepts(&self, name: &str) -> bool {
        self.include.is_match(name) && !self.exclude.is_match(name)
    }
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern).with_context(|| format!("invalid glob: {}", pattern))?);
    }
    Ok(builder.build()?)
}

/// File name without its last extension (`hooks-guide.md` → `hooks-guide`).
/// A bare `.md` has an empty slug.
pub fn slug_of(name: &str) -> &str {
    match name.rsplit_once('.') {
        Some((stem, _)) => stem,
        None => name,
    }
}

/// Splits `react/hooks-guide.md` into the containing directory's name and
/// the file name.
fn split_path(path: &str) -> (&str, &str) {
    let path = path.trim_matches('/');
    match path.rsplit_once('/') {
        Some((dir, name)) => (dir.rsplit('/').next().unwrap_or(dir), name),
        None => ("", path),
    }
}
