//! # Edith Docs Core
//!
//! Shared, I/O-free logic for Edith Docs: document models, frontmatter
//! parsing, metadata defaulting, and in-memory catalog queries.
//!
//! This crate performs no network or filesystem access. Everything that
//! talks to the content host lives in the `edith-docs` crate, which feeds
//! decoded text into [`frontmatter::parse_frontmatter`] and assembles
//! [`models::CatalogEntry`] values that the [`query`] functions slice.

pub mod frontmatter;
pub mod metadata;
pub mod models;
pub mod query;
