//! HTTP API tests: the router served on an ephemeral port over an
//! in-memory repository.

use std::sync::Arc;

use edith_docs::config::IndexConfig;
use edith_docs::host::MemoryHost;
use edith_docs::index::DocumentSource;
use edith_docs::server::build_router;
use serde_json::Value;

fn repository() -> MemoryHost {
    MemoryHost::new()
        .with_file("README.md", "readme", "# Docs")
        .with_file(
            "react/hooks-guide.md",
            "abc123",
            "---\ntitle: \"Hooks\"\ntags: [\"react\"]\nstatus: popular\ndate: 2024-02-01\n---\nBody text",
        )
        .with_file(
            "react/context.md",
            "c0n",
            "---\ntitle: Context API\nstatus: new\ndate: 2024-05-20\n---\nContext body",
        )
        .with_file(
            "css/grid.md",
            "9r1d",
            "---\ntitle: Grid Layout\ntags: [\"css\", \"layout\"]\ndate: 2023-11-02\n---\nGrid body",
        )
        .with_file("css/flex.md", "f1ex", "---\ntitle: Flexbox\n---\nFlex body")
        .with_failure("css/flex.md", 500)
}

async fn spawn_server(host: MemoryHost) -> String {
    let source = DocumentSource::new(Arc::new(host), &IndexConfig::default()).unwrap();
    let app = build_router(Arc::new(source));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn get_json(url: &str) -> (u16, Value) {
    let resp = reqwest::get(url).await.unwrap();
    let status = resp.status().as_u16();
    (status, resp.json().await.unwrap())
}

fn slugs(body: &Value) -> Vec<&str> {
    body["documents"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["slug"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn test_health() {
    let base = spawn_server(repository()).await;
    let (status, body) = get_json(&format!("{}/health", base)).await;
    assert_eq!(status, 200);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_categories() {
    let base = spawn_server(repository()).await;
    let (status, body) = get_json(&format!("{}/categories", base)).await;
    assert_eq!(status, 200);
    let names: Vec<_> = body["categories"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["react", "css"]);
}

#[tokio::test]
async fn test_categories_upstream_failure() {
    let base = spawn_server(repository().with_failure("", 403)).await;
    let (status, body) = get_json(&format!("{}/categories", base)).await;
    assert_eq!(status, 502);
    assert_eq!(body["error"]["code"], "upstream");
    assert!(body["error"]["message"].as_str().unwrap().contains("403"));
}

#[tokio::test]
async fn test_list_includes_fallback_entries() {
    let base = spawn_server(repository()).await;
    let (status, body) = get_json(&format!("{}/docs", base)).await;
    assert_eq!(status, 200);
    assert_eq!(body["total"], 4);
    assert_eq!(slugs(&body), vec!["hooks-guide", "context", "grid", "flex"]);

    let hooks = &body["documents"][0];
    assert_eq!(hooks["title"], "Hooks");
    assert_eq!(hooks["category"], "react");
    assert_eq!(hooks["tags"], serde_json::json!(["react"]));
    assert_eq!(hooks["lastModified"], "abc123");
    assert_eq!(hooks["fullPath"], "react/hooks-guide.md");
    assert_eq!(hooks["readTime"], "5min");

    let flex = &body["documents"][3];
    assert_eq!(flex["status"], "unknown");
    assert_eq!(flex["title"], "flex");
    assert!(flex.get("date").is_none());
}

#[tokio::test]
async fn test_list_filters() {
    let base = spawn_server(repository()).await;

    let (_, body) = get_json(&format!("{}/docs?category=css", base)).await;
    assert_eq!(slugs(&body), vec!["grid", "flex"]);

    let (_, body) = get_json(&format!("{}/docs?category=all&q=context", base)).await;
    assert_eq!(slugs(&body), vec!["context"]);

    let (_, body) = get_json(&format!("{}/docs?tag=layout", base)).await;
    assert_eq!(slugs(&body), vec!["grid"]);

    let (_, body) = get_json(&format!("{}/docs?q=", base)).await;
    assert_eq!(body["total"], 4);
}

#[tokio::test]
async fn test_popular_and_recent() {
    let base = spawn_server(repository()).await;

    let (status, body) = get_json(&format!("{}/views/popular", base)).await;
    assert_eq!(status, 200);
    assert_eq!(slugs(&body), vec!["hooks-guide"]);

    let (_, body) = get_json(&format!("{}/views/recent?limit=2", base)).await;
    assert_eq!(slugs(&body), vec!["context", "hooks-guide"]);

    // Fallback entries have no date and are left out.
    let (_, body) = get_json(&format!("{}/views/recent?limit=10", base)).await;
    assert_eq!(slugs(&body), vec!["context", "hooks-guide", "grid"]);
}

#[tokio::test]
async fn test_bad_limit() {
    let base = spawn_server(repository()).await;
    let (status, body) = get_json(&format!("{}/views/recent?limit=ten", base)).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"]["code"], "bad_request");
}

#[tokio::test]
async fn test_stats() {
    let base = spawn_server(repository()).await;
    let (status, body) = get_json(&format!("{}/views/stats", base)).await;
    assert_eq!(status, 200);
    assert_eq!(body["documents"], 4);
    assert_eq!(body["categories"], 2);
    assert_eq!(body["newDocuments"], 1);
    assert_eq!(body["averageReadMinutes"], 5);
}

#[tokio::test]
async fn test_document_by_slug() {
    let base = spawn_server(repository()).await;
    let (status, body) = get_json(&format!("{}/docs/hooks-guide", base)).await;
    assert_eq!(status, 200);
    assert_eq!(body["category"], "react");
    assert_eq!(body["content"], "Body text");
    assert_eq!(body["metadata"]["title"], "Hooks");
    assert_eq!(body["lastModified"], "abc123");
}

#[tokio::test]
async fn test_view_names_are_valid_slugs() {
    let host = MemoryHost::new()
        .with_file("ops/stats.md", "57a7", "---\ntitle: Stats Guide\n---\nReading the numbers")
        .with_file("ops/popular.md", "p0p", "---\ntitle: Popular Picks\n---\nPicks");
    let base = spawn_server(host).await;

    let (status, body) = get_json(&format!("{}/docs/stats", base)).await;
    assert_eq!(status, 200);
    assert_eq!(body["metadata"]["title"], "Stats Guide");
    assert_eq!(body["content"], "Reading the numbers");
    assert!(body.get("averageReadMinutes").is_none());

    let (status, body) = get_json(&format!("{}/docs/popular", base)).await;
    assert_eq!(status, 200);
    assert_eq!(body["metadata"]["title"], "Popular Picks");

    let (_, body) = get_json(&format!("{}/views/stats", base)).await;
    assert_eq!(body["documents"], 2);
}

#[tokio::test]
async fn test_document_not_found() {
    let base = spawn_server(repository()).await;
    let (status, body) = get_json(&format!("{}/docs/nope", base)).await;
    assert_eq!(status, 404);
    assert_eq!(body["error"]["code"], "not_found");
    assert_eq!(body["error"]["message"], "document not found: nope");
}

#[tokio::test]
async fn test_document_refetch_failure() {
    let base = spawn_server(repository()).await;
    let (status, body) = get_json(&format!("{}/docs/flex", base)).await;
    assert_eq!(status, 502);
    assert_eq!(body["error"]["code"], "upstream");
}

#[tokio::test]
async fn test_cors_headers() {
    let base = spawn_server(repository()).await;
    let resp = reqwest::Client::new()
        .get(format!("{}/health", base))
        .header("origin", "https://docs.example.com")
        .send()
        .await
        .unwrap();
    assert_eq!(
        resp.headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}
