use edith_docs::config::HostConfig;
use edith_docs::decode::{decode_content, encode_content};
use edith_docs::error::HostError;
use edith_docs::host::{ContentHost, Contents, EntryKind, GithubClient};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> GithubClient {
    let mut config = HostConfig::new("Aprasaks", "edith-docs");
    config.api_base = server.uri();
    GithubClient::new(&config).unwrap()
}

#[tokio::test]
async fn test_root_listing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/Aprasaks/edith-docs/contents"))
        .and(query_param("ref", "main"))
        .and(header("accept", "application/vnd.github.v3+json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"name": "README.md", "path": "README.md", "type": "file", "sha": "r1", "size": 10},
            {"name": "react", "path": "react", "type": "dir", "sha": "d1", "size": 0,
             "url": "https://api.github.com/repos/Aprasaks/edith-docs/contents/react?ref=main"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let contents = client(&server).get_contents("").await.unwrap();
    let Contents::Directory(entries) = contents else {
        panic!("expected a directory listing");
    };
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[1].kind, EntryKind::Dir);
    assert_eq!(entries[1].name, "react");
}

#[tokio::test]
async fn test_file_contents() {
    let server = MockServer::start().await;
    let text = "---\ntitle: Hooks\n---\nBody";
    Mock::given(method("GET"))
        .and(path("/repos/Aprasaks/edith-docs/contents/react/hooks-guide.md"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "hooks-guide.md",
            "path": "react/hooks-guide.md",
            "type": "file",
            "sha": "abc123",
            "size": text.len(),
            "content": encode_content(text),
            "encoding": "base64"
        })))
        .mount(&server)
        .await;

    let contents = client(&server)
        .get_contents("react/hooks-guide.md")
        .await
        .unwrap();
    let Contents::File(file) = contents else {
        panic!("expected a file");
    };
    assert_eq!(file.entry.sha, "abc123");
    assert_eq!(decode_content(file.content.as_deref().unwrap()).unwrap(), text);
}

#[tokio::test]
async fn test_error_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not Found"})))
        .mount(&server)
        .await;

    let err = client(&server).get_contents("missing").await.unwrap_err();
    match err {
        HostError::Status {
            path,
            status,
            status_text,
        } => {
            assert_eq!(path, "missing");
            assert_eq!(status, 404);
            assert_eq!(status_text, "Not Found");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_rate_limit_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let err = client(&server).get_contents("").await.unwrap_err();
    assert_eq!(err.status_code(), Some(403));
    assert!(err.to_string().contains("403 Forbidden"));
}

#[tokio::test]
async fn test_malformed_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let err = client(&server).get_contents("").await.unwrap_err();
    assert!(matches!(err, HostError::Body(_)));
    assert_eq!(err.status_code(), None);
}

#[tokio::test]
async fn test_bearer_token_is_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header("authorization", "Bearer s3cret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = HostConfig::new("Aprasaks", "edith-docs");
    config.api_base = server.uri();
    config.token = Some("s3cret".to_string());
    let client = GithubClient::new(&config).unwrap();

    let contents = client.get_contents("").await.unwrap();
    assert_eq!(contents, Contents::Directory(Vec::new()));
}

#[tokio::test]
async fn test_branch_is_sent_as_ref() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("ref", "drafts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = HostConfig::new("Aprasaks", "edith-docs");
    config.api_base = server.uri();
    config.branch = "drafts".to_string();
    GithubClient::new(&config)
        .unwrap()
        .get_contents("")
        .await
        .unwrap();
}
