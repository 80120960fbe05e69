//! # Edith Docs CLI (`edith`)
//!
//! The `edith` binary reads a documentation repository through the GitHub
//! contents API and prints catalog views, or serves them over HTTP.
//!
//! ## Usage
//!
//! ```bash
//! edith --config ./config/edith.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `edith categories` | List category directories |
//! | `edith list` | List documents, optionally filtered |
//! | `edith get <slug>` | Print one document with its body |
//! | `edith popular` | Documents with status `popular` |
//! | `edith recent` | Newest documents by date |
//! | `edith stats` | Catalog counts |
//! | `edith serve` | Start the JSON HTTP API |
//!
//! ## Examples
//!
//! ```bash
//! # Everything under react/ mentioning "hooks"
//! edith list --category react --query hooks
//!
//! # Ten most recent documents
//! edith recent --limit 10
//!
//! # Serve the API on [server].bind
//! edith serve --config ./config/edith.toml
//! ```
//!
//! Logs go to stderr. Set `RUST_LOG` to change verbosity (default `info`).

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use edith_docs::query::{CatalogQuery, DEFAULT_LIMIT};
use edith_docs::{catalog, config, lookup, server};

/// Edith Docs CLI: a markdown documentation catalog served from a GitHub
/// repository.
#[derive(Parser)]
#[command(
    name = "edith",
    about = "Edith Docs — a markdown documentation catalog served from a GitHub repository",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/edith.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the repository's category directories.
    Categories,

    /// List catalog entries.
    ///
    /// Filters combine: an entry must match every filter given.
    List {
        /// Exact category; `all` matches every category.
        #[arg(long)]
        category: Option<String>,

        /// Case-insensitive text matched against title, description, and tags.
        #[arg(long)]
        query: Option<String>,

        /// Exact tag.
        #[arg(long)]
        tag: Option<String>,
    },

    /// Print a document by slug.
    Get { slug: String },

    /// Documents with status `popular`, in catalog order.
    Popular {
        #[arg(long, default_value_t = DEFAULT_LIMIT)]
        limit: usize,
    },

    /// Newest documents by frontmatter date.
    Recent {
        #[arg(long, default_value_t = DEFAULT_LIMIT)]
        limit: usize,
    },

    /// Document, category, and read-time counts.
    Stats,

    /// Start the JSON HTTP API on `[server].bind`.
    Serve,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();
    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Categories => {
            catalog::run_categories(&cfg).await?;
        }
        Commands::List {
            category,
            query,
            tag,
        } => {
            let query = CatalogQuery {
                category,
                text: query,
                tag,
            };
            catalog::run_list(&cfg, query).await?;
        }
        Commands::Get { slug } => {
            lookup::run_get(&cfg, &slug).await?;
        }
        Commands::Popular { limit } => {
            catalog::run_popular(&cfg, limit).await?;
        }
        Commands::Recent { limit } => {
            catalog::run_recent(&cfg, limit).await?;
        }
        Commands::Stats => {
            catalog::run_stats(&cfg).await?;
        }
        Commands::Serve => {
            server::run_server(&cfg).await?;
        }
    }

    Ok(())
}
