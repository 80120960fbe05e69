//! Configuration parsing and validation.
//!
//! Edith Docs is configured via a TOML file (default: `config/edith.toml`).
//! Only the repository coordinates are required:
//!
//! ```toml
//! [host]
//! owner = "Aprasaks"
//! repo = "edith-docs"
//! # branch = "main"
//! # api_base = "https://api.github.com"
//! # token_env = "GITHUB_TOKEN"
//! # revalidate_secs = 3600
//! # timeout_secs = 30
//!
//! [index]
//! # include_globs = ["*.md"]
//! # exclude_globs = []
//! # concurrency = 4
//! # strict_decode = false
//!
//! [server]
//! # bind = "127.0.0.1:7340"
//! ```

use anyhow::{bail, Context, Result};
use globset::Glob;
use reqwest::Url;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub host: HostConfig,
    #[serde(default)]
    pub index: IndexConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// Coordinates and transport settings for the content host.
#[derive(Debug, Deserialize, Clone)]
pub struct HostConfig {
    #[serde(default = "default_api_base")]
    pub api_base: String,
    pub owner: String,
    pub repo: String,
    #[serde(default = "default_branch")]
    pub branch: String,
    /// Inline bearer token. Takes precedence over `token_env`.
    #[serde(default)]
    pub token: Option<String>,
    /// Name of an environment variable holding a bearer token.
    #[serde(default)]
    pub token_env: Option<String>,
    /// How long a host response is reused before it is fetched again.
    /// `0` disables response caching.
    #[serde(default = "default_revalidate_secs")]
    pub revalidate_secs: u64,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_base() -> String {
    "https://api.github.com".to_string()
}
fn default_branch() -> String {
    "main".to_string()
}
fn default_revalidate_secs() -> u64 {
    3600
}
fn default_timeout_secs() -> u64 {
    30
}

impl HostConfig {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            api_base: default_api_base(),
            owner: owner.into(),
            repo: repo.into(),
            branch: default_branch(),
            token: None,
            token_env: None,
            revalidate_secs: default_revalidate_secs(),
            timeout_secs: default_timeout_secs(),
        }
    }

    /// Returns the bearer token, if one is configured and non-empty.
    pub fn resolve_token(&self) -> Option<String> {
        self.token
            .clone()
            .filter(|t| !t.is_empty())
            .or_else(|| {
                self.token_env
                    .as_deref()
                    .and_then(|var| std::env::var(var).ok())
                    .filter(|t| !t.is_empty())
            })
    }
}

/// How the catalog is assembled from the repository tree.
#[derive(Debug, Deserialize, Clone)]
pub struct IndexConfig {
    /// Glob patterns matched against file names inside a category.
    #[serde(default = "default_include_globs")]
    pub include_globs: Vec<String>,
    #[serde(default)]
    pub exclude_globs: Vec<String>,
    /// Maximum in-flight document fetches per category.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
    /// Treat undecodable file content as a fetch failure instead of an
    /// empty document.
    #[serde(default)]
    pub strict_decode: bool,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            include_globs: default_include_globs(),
            exclude_globs: Vec::new(),
            concurrency: default_concurrency(),
            strict_decode: false,
        }
    }
}

fn default_include_globs() -> Vec<String> {
    vec!["*.md".to_string()]
}
fn default_concurrency() -> usize {
    4
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:7340".to_string()
}

impl Config {
    /// A config with defaults everywhere except the repository coordinates.
    pub fn minimal(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            host: HostConfig::new(owner, repo),
            index: IndexConfig::default(),
            server: ServerConfig::default(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.host.owner.trim().is_empty() {
            bail!("host.owner must not be empty");
        }
        if self.host.repo.trim().is_empty() {
            bail!("host.repo must not be empty");
        }
        if self.host.branch.trim().is_empty() {
            bail!("host.branch must not be empty");
        }

        let base = Url::parse(&self.host.api_base)
            .with_context(|| format!("host.api_base is not a valid URL: {}", self.host.api_base))?;
        if base.cannot_be_a_base() {
            bail!("host.api_base cannot be used as a base URL: {}", base);
        }

        if self.host.timeout_secs == 0 {
            bail!("host.timeout_secs must be > 0");
        }

        if self.index.concurrency == 0 {
            bail!("index.concurrency must be >= 1");
        }
        if self.index.include_globs.is_empty() {
            bail!("index.include_globs must not be empty");
        }
        for pattern in self
            .index
            .include_globs
            .iter()
            .chain(&self.index.exclude_globs)
        {
            Glob::new(pattern).with_context(|| format!("invalid glob pattern: {}", pattern))?;
        }

        Ok(())
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;
    config.validate()?;

    Ok(config)
}
