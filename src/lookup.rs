//! Document retrieval by slug.
//!
//! Slugs are unique only by convention, so a lookup scans the catalog and
//! takes the first entry with a matching slug, then fetches that entry's
//! file again for the full body. The refetch goes to the entry's actual
//! path, so documents whose frontmatter overrides `slug` or `category`
//! resolve as well.
//!
//! Used by both the `edith get` CLI command and `GET /docs/{slug}`.

use anyhow::{bail, Result};
use edith_docs_core::models::{CatalogEntry, ResolvedDocument};
use tracing::debug;

use crate::config::Config;
use crate::error::DocumentError;
use crate::index::DocumentSource;

impl DocumentSource {
    /// Builds the catalog and resolves `slug` against it.
    ///
    /// Returns `Ok(None)` when no entry carries the slug. An error means
    /// the entry exists but its file could not be fetched.
    pub async fn find_document(
        &self,
        slug: &str,
    ) -> Result<Option<ResolvedDocument>, DocumentError> {
        let catalog = self.build_catalog().await;
        self.resolve_in(&catalog, slug).await
    }

    /// Resolves `slug` against an already built catalog.
    pub async fn resolve_in(
        &self,
        catalog: &[CatalogEntry],
        slug: &str,
    ) -> Result<Option<ResolvedDocument>, DocumentError> {
        let Some(entry) = catalog.iter().find(|e| e.slug() == slug) else {
            debug!(slug, "no catalog entry");
            return Ok(None);
        };

        let document = self.fetch_document(&entry.full_path).await?;
        Ok(Some(ResolvedDocument {
            document,
            category: entry.category().to_string(),
        }))
    }
}

/// CLI entry point: looks up `slug` and prints the document.
pub async fn run_get(config: &Config, slug: &str) -> Result<()> {
    let source = DocumentSource::from_config(config)?;
    let Some(resolved) = source.find_document(slug).await? else {
        bail!("document not found: {}", slug);
    };

    let doc = &resolved.document;
    let meta = &doc.metadata;
    println!("--- Document ---");
    println!("slug:         {}", meta.slug);
    println!("title:        {}", meta.title);
    println!("category:     {}", resolved.category);
    println!("status:       {}", meta.status.label());
    println!("author:       {}", meta.author);
    if let Some(ref date) = meta.date {
        println!("date:         {}", date);
    }
    println!("read_time:    {}", meta.read_time);
    if !meta.tags.is_empty() {
        println!("tags:         {}", meta.tags.join(", "));
    }
    if !meta.description.is_empty() {
        println!("description:  {}", meta.description);
    }
    println!("sha:          {}", doc.last_modified);
    println!("size:         {}", doc.size);
    println!();

    println!("--- Body ---");
    println!("{}", doc.content);

    Ok(())
}
