//! Quote fetching against a mocked HTTP endpoint.

use std::time::Duration;

use focusdesk_core::{load_quote, HttpQuoteSource, QuoteError, QuoteSource};

fn source(server: &mockito::Server, timeout: Duration) -> HttpQuoteSource {
    HttpQuoteSource::new(format!("{}/random", server.url()), timeout).unwrap()
}

#[tokio::test]
async fn parses_content_and_author() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/random")
        .match_header("cache-control", "no-store")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"_id":"x","content":"Well begun is half done.","author":"Aristotle","tags":[]}"#)
        .create_async()
        .await;

    let quote = source(&server, Duration::from_secs(5)).fetch().await.unwrap();
    assert_eq!(quote.text, "Well begun is half done.");
    assert_eq!(quote.author, "Aristotle");
    assert_eq!(quote.text_line(), "“Well begun is half done.”");
    mock.assert_async().await;
}

#[tokio::test]
async fn missing_author_becomes_unknown() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/random")
        .with_status(200)
        .with_body(r#"{"content":"Anonymous wisdom."}"#)
        .create_async()
        .await;

    let quote = load_quote(&source(&server, Duration::from_secs(5))).await;
    assert_eq!(quote.author, "Unknown");
    assert!(!quote.is_fallback());
}

#[tokio::test]
async fn non_success_status_is_an_error_and_falls_back() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/random")
        .with_status(429)
        .create_async()
        .await;

    let src = source(&server, Duration::from_secs(5));
    assert!(matches!(src.fetch().await, Err(QuoteError::Status(429))));
    assert!(load_quote(&src).await.is_fallback());
}

#[tokio::test]
async fn garbage_body_falls_back() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/random")
        .with_status(200)
        .with_body("<html>maintenance</html>")
        .create_async()
        .await;

    assert!(load_quote(&source(&server, Duration::from_secs(5))).await.is_fallback());
}

#[tokio::test]
async fn empty_content_falls_back() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/random")
        .with_status(200)
        .with_body(r#"{"content":"   ","author":"Nobody"}"#)
        .create_async()
        .await;

    let src = source(&server, Duration::from_secs(5));
    assert!(matches!(src.fetch().await, Err(QuoteError::Empty)));
}

#[tokio::test]
async fn unreachable_host_falls_back() {
    // port 9 (discard) is closed on test machines
    let src = HttpQuoteSource::new("http://127.0.0.1:9/random", Duration::from_secs(2)).unwrap();
    assert!(load_quote(&src).await.is_fallback());
}
