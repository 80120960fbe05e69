//! # Edith Docs
//!
//! A markdown documentation catalog read straight from a GitHub repository.
//!
//! The repository is the database: every top-level directory is a
//! category, every markdown file inside one is a document, and YAML-like
//! frontmatter at the top of each file carries its metadata. Edith Docs
//! reads that tree through the GitHub contents API, assembles a flat
//! catalog, and serves filtered views of it via a CLI and a JSON HTTP API.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐   ┌─────────────┐   ┌─────────────┐
//! │ ContentHost │──▶│   Decode +   │──▶│   Catalog    │
//! │ GitHub API  │   │ Frontmatter │   │   entries    │
//! └─────────────┘   └─────────────┘   └──────┬──────┘
//!                                            │
//!                      ┌─────────────────────┤
//!                      ▼                     ▼
//!                 ┌──────────┐         ┌──────────┐
//!                 │   CLI    │         │   HTTP   │
//!                 │ (edith)  │         │  (JSON)  │
//!                 └──────────┘         └──────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! edith categories              # list category directories
//! edith list --category react   # catalog, filtered
//! edith get hooks-guide         # one document with its body
//! edith serve                   # start HTTP server
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`error`] | Host, decode, and document errors |
//! | [`host`] | Content host trait, GitHub client, caching |
//! | [`decode`] | Base64 file content decoding |
//! | [`index`] | Catalog assembly with per-document fallback |
//! | [`lookup`] | Document retrieval by slug |
//! | [`catalog`] | Filtered views and their CLI commands |
//! | [`server`] | JSON HTTP API |
//!
//! Models, frontmatter parsing, and the pure query functions live in the
//! [`edith_docs_core`] crate; its modules are re-exported here.

pub mod catalog;
pub mod config;
pub mod decode;
pub mod error;
pub mod host;
pub mod index;
pub mod lookup;
pub mod server;

pub use edith_docs_core::{frontmatter, metadata, models, query};
