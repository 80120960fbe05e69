//! GitHub contents API client.
//!
//! Issues `GET {api_base}/repos/{owner}/{repo}/contents/{path}?ref={branch}`
//! with the v3 JSON media type. A bearer token is sent only when one is
//! configured; anonymous access works for public repositories at a lower
//! rate limit.
//!
//! # Errors
//!
//! Non-success statuses become [`HostError::Status`] carrying the status
//! code and reason phrase. Network failures become
//! [`HostError::Transport`] and unparsable bodies [`HostError::Body`].
//! Nothing is retried here.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::Url;
use tracing::debug;

use super::{ContentHost, Contents};
use crate::config::HostConfig;
use crate::error::HostError;

const MEDIA_TYPE: &str = "application/vnd.github.v3+json";

pub struct GithubClient {
    http: reqwest::Client,
    api_base: Url,
    owner: String,
    repo: String,
    branch: String,
}

impl GithubClient {
    pub fn new(config: &HostConfig) -> Result<Self> {
        let api_base = Url::parse(&config.api_base)
            .with_context(|| format!("invalid api_base: {}", config.api_base))?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(MEDIA_TYPE));
        if let Some(token) = config.resolve_token() {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
                .context("bearer token contains invalid header characters")?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            http,
            api_base,
            owner: config.owner.clone(),
            repo: config.repo.clone(),
            branch: config.branch.clone(),
        })
    }

    /// URL of the contents endpoint for `path`. Each path segment is
    /// percent-encoded separately.
    pub fn contents_url(&self, path: &str) -> Url {
        let mut url = self.api_base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["repos", self.owner.as_str(), self.repo.as_str(), "contents"])
                .extend(path.split('/').filter(|s| !s.is_empty()));
        }
        url.query_pairs_mut().append_pair("ref", &self.branch);
        url
    }
}

#[async_trait]
impl ContentHost for GithubClient {
    async fn get_contents(&self, path: &str) -> Result<Contents, HostError> {
        let url = self.contents_url(path);
        debug!(%url, "fetching contents");

        let resp = self.http.get(url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(HostError::status(
                path,
                status.as_u16(),
                status.canonical_reason().unwrap_or_default(),
            ));
        }

        let body = resp.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
