//! In-memory [`ContentHost`] implementation for testing and offline use.
//!
//! Paths are registered with builder methods; parent directories and
//! their listings are created on the fly, in insertion order. Unknown
//! paths answer 404, and individual paths can be made to fail with any
//! status.
//!
//! ```rust
//! use edith_docs::host::MemoryHost;
//!
//! let host = MemoryHost::new()
//!     .with_file("react/hooks-guide.md", "abc123", "---\ntitle: Hooks\n---\nBody")
//!     .with_failure("react/broken.md", 500);
//! ```

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use reqwest::StatusCode;

use super::{ContentHost, Contents, EntryKind, RepoEntry, RepoFile};
use crate::decode::encode_content;
use crate::error::HostError;

#[derive(Default)]
pub struct MemoryHost {
    tree: HashMap<String, Contents>,
    failures: HashMap<String, u16>,
    requests: AtomicUsize,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a text file, stored base64-encoded as the contents API would.
    pub fn with_file(self, path: &str, sha: &str, text: &str) -> Self {
        self.with_encoded_file(path, sha, text.len() as u64, &encode_content(text))
    }

    /// Adds a file whose encoded content is taken verbatim.
    pub fn with_encoded_file(mut self, path: &str, sha: &str, size: u64, content: &str) -> Self {
        let path = normalize(path);
        let entry = RepoEntry {
            name: file_name(&path).to_string(),
            path: path.clone(),
            kind: EntryKind::File,
            sha: sha.to_string(),
            size,
            url: Some(format!("memory://{}", path)),
            download_url: Some(format!("memory://raw/{}", path)),
        };
        self.tree.insert(
            path.clone(),
            Contents::File(RepoFile {
                entry: entry.clone(),
                content: Some(content.to_string()),
                encoding: Some("base64".to_string()),
            }),
        );
        self.list_in_parent(entry);
        self
    }

    /// Adds an empty directory.
    pub fn with_dir(mut self, path: &str) -> Self {
        self.ensure_dir(&normalize(path));
        self
    }

    /// Appends an arbitrary entry to a directory listing without making
    /// the entry itself fetchable.
    pub fn with_entry(mut self, dir: &str, entry: RepoEntry) -> Self {
        let dir = normalize(dir);
        self.ensure_dir(&dir);
        self.push_entry(&dir, entry);
        self
    }

    /// Makes every request for `path` fail with `status`.
    pub fn with_failure(mut self, path: &str, status: u16) -> Self {
        self.failures.insert(normalize(path), status);
        self
    }

    /// Number of `get_contents` calls served so far, failures included.
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    fn ensure_dir(&mut self, dir: &str) {
        if self.tree.contains_key(dir) {
            return;
        }
        self.tree
            .insert(dir.to_string(), Contents::Directory(Vec::new()));
        if dir.is_empty() {
            return;
        }
        self.list_in_parent(RepoEntry {
            name: file_name(dir).to_string(),
            path: dir.to_string(),
            kind: EntryKind::Dir,
            sha: String::new(),
            size: 0,
            url: Some(format!("memory://{}", dir)),
            download_url: None,
        });
    }

    fn list_in_parent(&mut self, entry: RepoEntry) {
        let parent = parent_dir(&entry.path).to_string();
        self.ensure_dir(&parent);
        self.push_entry(&parent, entry);
    }

    fn push_entry(&mut self, dir: &str, entry: RepoEntry) {
        if let Some(Contents::Directory(entries)) = self.tree.get_mut(dir) {
            entries.retain(|e| e.path != entry.path);
            entries.push(entry);
        }
    }
}

#[async_trait]
impl ContentHost for MemoryHost {
    async fn get_contents(&self, path: &str) -> Result<Contents, HostError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        let path = normalize(path);

        if let Some(&status) = self.failures.get(&path) {
            let reason = StatusCode::from_u16(status)
                .ok()
                .and_then(|s| s.canonical_reason())
                .unwrap_or_default();
            return Err(HostError::status(&path, status, reason));
        }

        self.tree
            .get(&path)
            .cloned()
            .ok_or_else(|| HostError::status(&path, 404, "Not Found"))
    }
}

fn normalize(path: &str) -> String {
    path.trim_matches('/').to_string()
}

fn parent_dir(path: &str) -> &str {
    path.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("")
}

fn file_name(path: &str) -> &str {
    path.rsplit_once('/').map(|(_, name)| name).unwrap_or(path)
}
