//! Catalog views and their CLI commands.
//!
//! Each view builds a fresh catalog and narrows it with the pure functions
//! in [`edith_docs_core::query`]. The `run_*` functions back the `edith`
//! subcommands of the same name and print plain-text tables.

use anyhow::Result;
use edith_docs_core::models::{CatalogEntry, CategoryDescriptor};
use edith_docs_core::query::{
    catalog_stats, filter_catalog, popular_documents, recent_documents, CatalogQuery,
    CatalogStats,
};

use crate::config::Config;
use crate::error::HostError;
use crate::index::DocumentSource;

impl DocumentSource {
    pub async fn search(&self, query: &CatalogQuery) -> Vec<CatalogEntry> {
        filter_catalog(&self.build_catalog().await, query)
    }

    pub async fn popular(&self, limit: usize) -> Vec<CatalogEntry> {
        popular_documents(&self.build_catalog().await, limit)
    }

    pub async fn recent(&self, limit: usize) -> Vec<CatalogEntry> {
        recent_documents(&self.build_catalog().await, limit)
    }

    pub async fn stats(&self) -> CatalogStats {
        catalog_stats(&self.build_catalog().await)
    }
}

pub async fn run_categories(config: &Config) -> Result<()> {
    let source = DocumentSource::from_config(config)?;
    let categories: Vec<CategoryDescriptor> = source.categories().await.map_err(host_error)?;

    if categories.is_empty() {
        println!("No categories.");
        return Ok(());
    }

    for category in &categories {
        println!("{}", category.name);
    }
    Ok(())
}

pub async fn run_list(config: &Config, query: CatalogQuery) -> Result<()> {
    let source = DocumentSource::from_config(config)?;
    print_entries(&source.search(&query).await);
    Ok(())
}

pub async fn run_popular(config: &Config, limit: usize) -> Result<()> {
    let source = DocumentSource::from_config(config)?;
    print_entries(&source.popular(limit).await);
    Ok(())
}

pub async fn run_recent(config: &Config, limit: usize) -> Result<()> {
    let source = DocumentSource::from_config(config)?;
    print_entries(&source.recent(limit).await);
    Ok(())
}

pub async fn run_stats(config: &Config) -> Result<()> {
    let source = DocumentSource::from_config(config)?;
    let stats = source.stats().await;

    println!("Edith Docs — Catalog Stats");
    println!("==========================");
    println!();
    println!(
        "  Repository:  {}/{}@{}",
        config.host.owner, config.host.repo, config.host.branch
    );
    println!();
    println!("  Documents:   {}", stats.documents);
    println!("  Categories:  {}", stats.categories);
    println!("  New:         {}", stats.new_documents);
    println!("  Avg. read:   {} min", stats.average_read_minutes);
    println!();
    Ok(())
}

fn print_entries(entries: &[CatalogEntry]) {
    if entries.is_empty() {
        println!("No documents.");
        return;
    }

    println!(
        "  {:<28} {:<14} {:<10} {:<11} {}",
        "SLUG", "CATEGORY", "STATUS", "DATE", "TITLE"
    );
    println!("  {}", "-".repeat(84));
    for e in entries {
        let meta = &e.metadata;
        println!(
            "  {:<28} {:<14} {:<10} {:<11} {}",
            truncate(&meta.slug, 28),
            truncate(&meta.category, 14),
            meta.status.as_str(),
            meta.date.as_deref().unwrap_or("-"),
            meta.title
        );
    }
    println!();
    println!("{} document(s)", entries.len());
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let head: String = s.chars().take(width.saturating_sub(1)).collect();
        format!("{}…", head)
    }
}

fn host_error(e: HostError) -> anyhow::Error {
    anyhow::Error::new(e).context("failed to list categories")
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::IndexConfig;
    use crate::host::MemoryHost;
    use edith_docs_core::models::DocStatus;

    fn source() -> DocumentSource {
        let host = MemoryHost::new()
            .with_file(
                "react/hooks.md",
                "1",
                "---\nstatus: popular\ndate: 2024-01-10\ntags: [\"react\", \"hooks\"]\nreadTime: 10min\n---\n",
            )
            .with_file(
                "react/context.md",
                "2",
                "---\nstatus: new\ndate: 2024-03-01\ntags: [\"react\"]\nreadTime: 4min\n---\n",
            )
            .with_file(
                "css/grid.md",
                "3",
                "---\nstatus: popular\ndate: 2023-12-24\ndescription: Grid layout\n---\n",
            );
        DocumentSource::new(Arc::new(host), &IndexConfig::default()).unwrap()
    }

    fn slugs(entries: &[CatalogEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.slug()).collect()
    }

    #[tokio::test]
    async fn test_search_by_category_and_text() {
        let src = source();
        let react = src
            .search(&CatalogQuery {
                category: Some("react".to_string()),
                ..CatalogQuery::default()
            })
            .await;
        assert_eq!(slugs(&react), vec!["hooks", "context"]);

        let grid = src
            .search(&CatalogQuery {
                text: Some("LAYOUT".to_string()),
                ..CatalogQuery::default()
            })
            .await;
        assert_eq!(slugs(&grid), vec!["grid"]);
    }

    #[tokio::test]
    async fn test_search_by_tag() {
        let tagged = source()
            .search(&CatalogQuery {
                tag: Some("hooks".to_string()),
                ..CatalogQuery::default()
            })
            .await;
        assert_eq!(slugs(&tagged), vec!["hooks"]);
    }

    #[tokio::test]
    async fn test_popular_keeps_catalog_order() {
        let popular = source().popular(5).await;
        assert_eq!(slugs(&popular), vec!["hooks", "grid"]);
        assert!(popular.iter().all(|e| e.metadata.status == DocStatus::Popular));
    }

    #[tokio::test]
    async fn test_recent_is_newest_first() {
        assert_eq!(slugs(&source().recent(2).await), vec!["context", "hooks"]);
    }

    #[tokio::test]
    async fn test_stats() {
        let stats = source().stats().await;
        assert_eq!(stats.documents, 3);
        assert_eq!(stats.categories, 2);
        assert_eq!(stats.new_documents, 1);
        // (10 + 4 + 5) / 3 rounds to 6
        assert_eq!(stats.average_read_minutes, 6);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 5), "abcd…");
    }
}
