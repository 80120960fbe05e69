//! Time-based response reuse in front of a [`ContentHost`].
//!
//! Successful responses are kept per path and served again until the
//! revalidation window elapses, after which the next request goes to the
//! wrapped host. Errors are never stored, so a failed path is retried on
//! the next request.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tracing::debug;

use super::{ContentHost, Contents};
use crate::error::HostError;

struct CachedResponse {
    fetched_at: Instant,
    contents: Contents,
}

pub struct CachedHost<H> {
    inner: H,
    revalidate_after: Duration,
    responses: RwLock<HashMap<String, CachedResponse>>,
}

impl<H: ContentHost> CachedHost<H> {
    pub fn new(inner: H, revalidate_after: Duration) -> Self {
        Self {
            inner,
            revalidate_after,
            responses: RwLock::new(HashMap::new()),
        }
    }

    pub fn inner(&self) -> &H {
        &self.inner
    }

    /// Drops every stored response.
    pub fn clear(&self) {
        self.responses
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }

    fn fresh(&self, path: &str) -> Option<Contents> {
        let responses = self.responses.read().unwrap_or_else(|e| e.into_inner());
        responses
            .get(path)
            .filter(|r| r.fetched_at.elapsed() < self.revalidate_after)
            .map(|r| r.contents.clone())
    }
}

#[async_trait]
impl<H: ContentHost> ContentHost for CachedHost<H> {
    async fn get_contents(&self, path: &str) -> Result<Contents, HostError> {
        if let Some(contents) = self.fresh(path) {
            debug!(path, "serving cached contents");
            return Ok(contents);
        }

        let contents = self.inner.get_contents(path).await?;

        self.responses
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(
                path.to_string(),
                CachedResponse {
                    fetched_at: Instant::now(),
                    contents: contents.clone(),
                },
            );

        Ok(contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryHost;

    fn host() -> MemoryHost {
        MemoryHost::new().with_file("react/hooks.md", "abc123", "# Hooks")
    }

    #[tokio::test]
    async fn test_second_read_is_served_from_cache() {
        let cached = CachedHost::new(host(), Duration::from_secs(3600));

        cached.get_contents("react").await.unwrap();
        cached.get_contents("react").await.unwrap();
        assert_eq!(cached.inner().requests(), 1);

        cached.get_contents("react/hooks.md").await.unwrap();
        assert_eq!(cached.inner().requests(), 2);
    }

    #[tokio::test]
    async fn test_zero_window_always_revalidates() {
        let cached = CachedHost::new(host(), Duration::ZERO);

        cached.get_contents("react").await.unwrap();
        cached.get_contents("react").await.unwrap();
        assert_eq!(cached.inner().requests(), 2);
    }

    #[tokio::test]
    async fn test_errors_are_not_cached() {
        let cached = CachedHost::new(
            host().with_failure("react/hooks.md", 503),
            Duration::from_secs(3600),
        );

        assert!(cached.get_contents("react/hooks.md").await.is_err());
        assert!(cached.get_contents("react/hooks.md").await.is_err());
        assert_eq!(cached.inner().requests(), 2);
    }

    #[tokio::test]
    async fn test_clear_forces_refetch() {
        let cached = CachedHost::new(host(), Duration::from_secs(3600));

        cached.get_contents("").await.unwrap();
        cached.clear();
        cached.get_contents("").await.unwrap();
        assert_eq!(cached.inner().requests(), 2);
    }
}
