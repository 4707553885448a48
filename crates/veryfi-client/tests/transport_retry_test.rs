//! Transport behaviour against raw TCP servers that misbehave.
//!
//! The closing listener accepts and immediately drops every connection.
//! Each accepted connection is one attempt, so its counter shows how many
//! times the transport tried a request.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use veryfi_client::{ProcessOptions, VeryfiClient, VeryfiConfig, VeryfiError};

async fn closing_listener() -> (String, Arc<AtomicUsize>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let accepted = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&accepted);
    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            counter.fetch_add(1, Ordering::SeqCst);
            drop(stream);
        }
    });
    (format!("http://{addr}"), accepted)
}

fn client_with_retries(uri: &str, retries: u32) -> VeryfiClient {
    let config = VeryfiConfig::local_mock(uri)
        .unwrap()
        .with_max_retries(retries);
    VeryfiClient::new(config).unwrap()
}

#[tokio::test]
async fn default_config_makes_a_single_attempt() {
    let (uri, accepted) = closing_listener().await;
    let config = VeryfiConfig::new("cid", "user", "key")
        .unwrap()
        .with_base_url(&uri)
        .unwrap();
    let client = VeryfiClient::new(config).unwrap();

    let err = client.documents().delete(1).await.unwrap_err();
    assert!(matches!(err, VeryfiError::Http { .. }), "got: {err:?}");
    assert_eq!(accepted.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn get_is_retried_when_retries_are_enabled() {
    let (uri, accepted) = closing_listener().await;

    let err = client_with_retries(&uri, 2)
        .documents()
        .get(1)
        .await
        .unwrap_err();
    assert!(matches!(err, VeryfiError::Http { .. }), "got: {err:?}");
    assert_eq!(accepted.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn post_is_never_retried() {
    let (uri, accepted) = closing_listener().await;

    let err = client_with_retries(&uri, 3)
        .documents()
        .process_url("https://cdn.example.com/r.jpg", &ProcessOptions::new())
        .await
        .unwrap_err();
    assert!(matches!(err, VeryfiError::Http { .. }), "got: {err:?}");
    assert_eq!(accepted.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn truncated_error_body_is_http_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        if let Ok((mut stream, _)) = listener.accept().await {
            let mut buf = [0u8; 4096];
            let _ = stream.read(&mut buf).await;
            let _ = stream
                .write_all(b"HTTP/1.1 500 Internal Server Error\r\nContent-Length: 100\r\n\r\nshort")
                .await;
            let _ = stream.shutdown().await;
        }
    });

    let err = client_with_retries(&format!("http://{addr}"), 0)
        .documents()
        .get(1)
        .await
        .unwrap_err();
    match err {
        VeryfiError::Http { endpoint, .. } => assert_eq!(endpoint, "GET /partner/documents/1/"),
        other => panic!("expected Http error, got: {other:?}"),
    }
}
