//! In-memory views over a built catalog.
//!
//! Every function here is pure: it borrows the catalog, returns a new
//! `Vec`, and never touches the content host.
//!
//! | Function | View |
//! |----------|------|
//! | [`filter_catalog`] | category and/or free-text and/or tag |
//! | [`documents_by_tag`] | entries carrying an exact tag |
//! | [`popular_documents`] | first N entries with status `popular` |
//! | [`recent_documents`] | first N entries by `date`, newest first |
//! | [`catalog_stats`] | counts for the listing header |

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate};
use serde::Serialize;

use crate::models::{CatalogEntry, DocStatus};

/// Default number of entries returned by the popular and recent views.
pub const DEFAULT_LIMIT: usize = 5;

/// Category value that disables category filtering.
pub const ALL_CATEGORIES: &str = "all";

/// Filter criteria for [`filter_catalog`]. Unset fields match everything.
#[derive(Debug, Clone, Default)]
pub struct CatalogQuery {
    /// Exact category match. `"all"` matches every category.
    pub category: Option<String>,
    /// Case-insensitive substring over title, description, and tags.
    pub text: Option<String>,
    /// Exact tag membership.
    pub tag: Option<String>,
}

impl CatalogQuery {
    pub fn matches(&self, entry: &CatalogEntry) -> bool {
        self.matches_category(entry) && self.matches_text(entry) && self.matches_tag(entry)
    }

    fn matches_category(&self, entry: &CatalogEntry) -> bool {
        match self.category.as_deref() {
            None | Some(ALL_CATEGORIES) => true,
            Some(category) => entry.category() == category,
        }
    }

    fn matches_text(&self, entry: &CatalogEntry) -> bool {
        let Some(text) = self.text.as_deref() else {
            return true;
        };
        let needle = text.to_lowercase();
        let meta = &entry.metadata;
        meta.title.to_lowercase().contains(&needle)
            || meta.description.to_lowercase().contains(&needle)
            || meta.tags.iter().any(|t| t.to_lowercase().contains(&needle))
    }

    fn matches_tag(&self, entry: &CatalogEntry) -> bool {
        match self.tag.as_deref() {
            None => true,
            Some(tag) => entry.metadata.tags.iter().any(|t| t == tag),
        }
    }
}

pub fn filter_catalog(entries: &[CatalogEntry], query: &CatalogQuery) -> Vec<CatalogEntry> {
    entries
        .iter()
        .filter(|e| query.matches(e))
        .cloned()
        .collect()
}

pub fn documents_by_tag(entries: &[CatalogEntry], tag: &str) -> Vec<CatalogEntry> {
    filter_catalog(
        entries,
        &CatalogQuery {
            tag: Some(tag.to_string()),
            ..Default::default()
        },
    )
}

pub fn popular_documents(entries: &[CatalogEntry], limit: usize) -> Vec<CatalogEntry> {
    entries
        .iter()
        .filter(|e| e.metadata.status == DocStatus::Popular)
        .take(limit)
        .cloned()
        .collect()
}

/// Entries with a date, newest first. Dates that do not parse sort after
/// every parsable date; ties keep catalog order.
pub fn recent_documents(entries: &[CatalogEntry], limit: usize) -> Vec<CatalogEntry> {
    let mut dated: Vec<(Option<NaiveDate>, &CatalogEntry)> = entries
        .iter()
        .filter_map(|e| e.metadata.date.as_deref().map(|d| (parse_date(d), e)))
        .collect();

    dated.sort_by(|(a, _), (b, _)| b.cmp(a));

    dated
        .into_iter()
        .take(limit)
        .map(|(_, e)| e.clone())
        .collect()
}

/// Parses `YYYY-MM-DD` or an RFC 3339 timestamp.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

/// Summary counts shown above the document listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
    pub documents: usize,
    pub categories: usize,
    pub new_documents: usize,
    pub average_read_minutes: u32,
}

pub fn catalog_stats(entries: &[CatalogEntry]) -> CatalogStats {
    let categories: HashSet<&str> = entries.iter().map(|e| e.category()).collect();
    let new_documents = entries
        .iter()
        .filter(|e| e.metadata.status == DocStatus::New)
        .count();

    let average_read_minutes = if entries.is_empty() {
        0
    } else {
        let total: u64 = entries
            .iter()
            .map(|e| leading_minutes(&e.metadata.read_time) as u64)
            .sum();
        (total as f64 / entries.len() as f64).round() as u32
    };

    CatalogStats {
        documents: entries.len(),
        categories: categories.len(),
        new_documents,
        average_read_minutes,
    }
}

/// Leading integer of a read-time string (`"15min"` → 15), 0 if none.
fn leading_minutes(read_time: &str) -> u32 {
    let digits: String = read_time
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(0)
}
