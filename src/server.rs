//! JSON HTTP API over the document catalog.
//!
//! Every request reads through the configured content host; with the
//! default config, host responses are reused for `host.revalidate_secs`.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/health` | Health check (returns version) |
//! | `GET`  | `/categories` | Top-level category directories |
//! | `GET`  | `/docs` | Catalog, filtered by `category`, `q`, and `tag` |
//! | `GET`  | `/docs/{slug}` | One document with its body |
//! | `GET`  | `/views/popular` | First `limit` documents with status `popular` |
//! | `GET`  | `/views/recent` | `limit` newest dated documents |
//! | `GET`  | `/views/stats` | Counts for the listing header |
//!
//! Derived views live outside `/docs` so every slug is reachable under
//! `/docs/{slug}`. `limit` defaults to 5.
//!
//! # Error Contract
//!
//! ```json
//! { "error": { "code": "not_found", "message": "document not found: hooks" } }
//! ```
//!
//! Error codes: `bad_request` (400), `not_found` (404), `upstream` (502).
//!
//! # CORS
//!
//! All origins, methods, and headers are permitted so browser front ends
//! on other origins can call the API directly.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use edith_docs_core::models::{CatalogEntry, CategoryDescriptor, ResolvedDocument};
use edith_docs_core::query::{CatalogQuery, CatalogStats, DEFAULT_LIMIT};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{DocumentError, HostError};
use crate::index::DocumentSource;

#[derive(Clone)]
struct AppState {
    source: Arc<DocumentSource>,
}

/// Starts the HTTP server on `[server].bind` and runs until the process
/// is terminated.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let source = Arc::new(DocumentSource::from_config(config)?);
    let app = build_router(source);

    let bind_addr = config.server.bind.clone();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("listening on http://{}", bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}

/// Builds the API router. Exposed separately so tests and embedders can
/// serve it on their own listener.
pub fn build_router(source: Arc<DocumentSource>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handle_health))
        .route("/categories", get(handle_categories))
        .route("/docs", get(handle_list))
        .route("/docs/{slug}", get(handle_document))
        .route("/views/popular", get(handle_popular))
        .route("/views/recent", get(handle_recent))
        .route("/views/stats", get(handle_stats))
        .layer(cors)
        .with_state(AppState { source })
}

// ============ Error response ============

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    /// Machine-readable error code (e.g., `"bad_request"`, `"not_found"`).
    code: String,
    message: String,
}

struct AppError {
    status: StatusCode,
    code: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

fn bad_request(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::BAD_REQUEST,
        code: "bad_request".to_string(),
        message: message.into(),
    }
}

fn not_found(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::NOT_FOUND,
        code: "not_found".to_string(),
        message: message.into(),
    }
}

/// The content host failed or returned something unusable.
fn upstream(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::BAD_GATEWAY,
        code: "upstream".to_string(),
        message: message.into(),
    }
}

impl From<HostError> for AppError {
    fn from(e: HostError) -> Self {
        warn!(error = %e, "content host request failed");
        upstream(e.to_string())
    }
}

impl From<DocumentError> for AppError {
    fn from(e: DocumentError) -> Self {
        warn!(error = %e, "document fetch failed");
        upstream(e.to_string())
    }
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============ GET /categories ============

#[derive(Serialize)]
struct CategoriesResponse {
    categories: Vec<CategoryDescriptor>,
}

async fn handle_categories(
    State(state): State<AppState>,
) -> Result<Json<CategoriesResponse>, AppError> {
    let categories = state.source.categories().await?;
    Ok(Json(CategoriesResponse { categories }))
}

// ============ GET /docs ============

#[derive(Deserialize)]
struct ListParams {
    category: Option<String>,
    q: Option<String>,
    tag: Option<String>,
}

#[derive(Serialize)]
struct DocumentsResponse {
    documents: Vec<CatalogEntry>,
    total: usize,
}

impl From<Vec<CatalogEntry>> for DocumentsResponse {
    fn from(documents: Vec<CatalogEntry>) -> Self {
        Self {
            total: documents.len(),
            documents,
        }
    }
}

async fn handle_list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Json<DocumentsResponse> {
    let query = CatalogQuery {
        category: non_empty(params.category),
        text: non_empty(params.q),
        tag: non_empty(params.tag),
    };
    Json(state.source.search(&query).await.into())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// ============ GET /views/popular, /views/recent ============

/// `limit` is taken as a string so a malformed value is reported through
/// the JSON error contract instead of axum's plain-text rejection.
#[derive(Deserialize)]
struct LimitParams {
    limit: Option<String>,
}

impl LimitParams {
    fn limit(&self) -> Result<usize, AppError> {
        match self.limit.as_deref() {
            None | Some("") => Ok(DEFAULT_LIMIT),
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| bad_request(format!("limit must be a non-negative integer: {}", raw))),
        }
    }
}

async fn handle_popular(
    State(state): State<AppState>,
    Query(params): Query<LimitParams>,
) -> Result<Json<DocumentsResponse>, AppError> {
    let limit = params.limit()?;
    Ok(Json(state.source.popular(limit).await.into()))
}

async fn handle_recent(
    State(state): State<AppState>,
    Query(params): Query<LimitParams>,
) -> Result<Json<DocumentsResponse>, AppError> {
    let limit = params.limit()?;
    Ok(Json(state.source.recent(limit).await.into()))
}

// ============ GET /views/stats ============

async fn handle_stats(State(state): State<AppState>) -> Json<CatalogStats> {
    Json(state.source.stats().await)
}

// ============ GET /docs/{slug} ============

async fn handle_document(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ResolvedDocument>, AppError> {
    match state.source.find_document(&slug).await? {
        Some(document) => Ok(Json(document)),
        None => Err(not_found(format!("document not found: {}", slug))),
    }
}
