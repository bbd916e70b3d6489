//! The production GitHub client against a local one-shot HTTP server

use std::sync::Arc;

use serde_json::json;
use skillindex_persistence::MemoryStore;
use skillindex_stars::{GitHubClient, RepoMetadataClient, StarCountCache, StarsConfig, StarsError};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

const REPO_URL: &str = "https://github.com/test-owner/test-repo";

/// Serve a single canned response and hand back the raw request
async fn serve_once(
    status_line: &'static str,
    body: &'static str,
) -> (String, oneshot::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();

        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }

        let response = format!(
            "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;
        let _ = tx.send(String::from_utf8_lossy(&request).into_owned());
    });

    (format!("http://{addr}"), rx)
}

fn config(api_base_url: String) -> StarsConfig {
    StarsConfig {
        api_base_url,
        ..StarsConfig::default()
    }
}

#[tokio::test]
async fn test_success_is_cached_and_sends_github_headers() {
    let (base, request) = serve_once("200 OK", r#"{"stargazers_count":3}"#).await;
    let store = Arc::new(MemoryStore::new());
    let cache = StarCountCache::from_config(&config(base), store.clone()).unwrap();

    assert_eq!(cache.get_star_count(REPO_URL).await, Some(3));
    assert_eq!(store.len().await, 1);

    let request = request.await.unwrap().to_ascii_lowercase();
    assert!(request.starts_with("get /repos/test-owner/test-repo http/1.1"));
    assert!(request.contains("user-agent: skillindex/"));
    assert!(request.contains("accept: application/vnd.github+json"));
}

#[tokio::test]
async fn test_not_found_leaves_store_empty() {
    let (base, _request) = serve_once("404 Not Found", r#"{"message":"Not Found"}"#).await;
    let store = Arc::new(MemoryStore::new());
    let cache = StarCountCache::from_config(&config(base), store.clone()).unwrap();

    assert_eq!(cache.get_star_count(REPO_URL).await, None);
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_non_success_status_is_reported() {
    let (base, _request) =
        serve_once("403 Forbidden", r#"{"message":"rate limited"}"#).await;
    let client = GitHubClient::new(StarsConfig::default().request_timeout()).unwrap();
    let url = format!("{base}/repos/o/r");

    match client.fetch_repo(&url).await {
        Err(StarsError::Status { status, url: failed }) => {
            assert_eq!(status, 403);
            assert_eq!(failed, url);
        }
        other => panic!("expected a status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_non_json_body_is_a_decode_error() {
    let (base, _request) = serve_once("200 OK", "<html>oops</html>").await;
    let client = GitHubClient::new(StarsConfig::default().request_timeout()).unwrap();

    let result = client.fetch_repo(&format!("{base}/repos/o/r")).await;
    assert!(matches!(result, Err(StarsError::Json(_))));
}

#[tokio::test]
async fn test_decoded_document_is_returned() {
    let (base, _request) =
        serve_once("200 OK", r#"{"stargazers_count":12,"full_name":"o/r"}"#).await;
    let client = GitHubClient::new(StarsConfig::default().request_timeout()).unwrap();

    let document = client.fetch_repo(&format!("{base}/repos/o/r")).await.unwrap();
    assert_eq!(document, json!({ "stargazers_count": 12, "full_name": "o/r" }));
}
