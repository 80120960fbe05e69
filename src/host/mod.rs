//! Content host abstraction.
//!
//! The [`ContentHost`] trait is the single read operation the pipeline
//! needs from a repository host: fetch the contents of a path, which is
//! either a directory listing or one file.
//!
//! | Implementation | Purpose |
//! |----------------|---------|
//! | [`GithubClient`] | GitHub contents REST API over `reqwest` |
//! | [`CachedHost`] | Reuses responses for a revalidation window |
//! | [`MemoryHost`] | Fixed in-memory tree for tests and offline use |

pub mod cache;
pub mod github;
pub mod memory;

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::HostConfig;
use crate::error::HostError;

pub use cache::CachedHost;
pub use github::GithubClient;
pub use memory::MemoryHost;

/// Read access to a repository's directory tree.
#[async_trait]
pub trait ContentHost: Send + Sync {
    /// Fetches `path` relative to the repository root. The empty string
    /// is the root itself.
    async fn get_contents(&self, path: &str) -> Result<Contents, HostError>;
}

#[async_trait]
impl<T: ContentHost + ?Sized> ContentHost for Arc<T> {
    async fn get_contents(&self, path: &str) -> Result<Contents, HostError> {
        (**self).get_contents(path).await
    }
}

/// Response of a contents request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Contents {
    Directory(Vec<RepoEntry>),
    File(RepoFile),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Dir,
    Symlink,
    Submodule,
    #[serde(other)]
    Other,
}

/// One item of a directory listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoEntry {
    pub name: String,
    pub path: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    #[serde(default)]
    pub sha: String,
    #[serde(default)]
    pub size: u64,
    /// API URL of the entry itself.
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub download_url: Option<String>,
}

/// A single file, including its encoded content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoFile {
    #[serde(flatten)]
    pub entry: RepoEntry,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub encoding: Option<String>,
}

/// Builds the host stack described by `config`: a [`GithubClient`],
/// wrapped in a [`CachedHost`] unless revalidation is disabled.
pub fn from_config(config: &HostConfig) -> Result<Arc<dyn ContentHost>> {
    let client = GithubClient::new(config)?;
    if config.revalidate_secs == 0 {
        return Ok(Arc::new(client));
    }
    Ok(Arc::new(CachedHost::new(
        client,
        std::time::Duration::from_secs(config.revalidate_secs),
    )))
}
