use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use patchwatch::checker::fetch::{HttpPageFetcher, PageFetcher};
use patchwatch::errors::WatchError;
use patchwatch::line::{LineClient, Messenger};

fn http_response(status_line: &str, body: &str) -> String {
    format!(
        "HTTP/1.1 {status_line}\r\n\
         Content-Type: text/plain; charset=utf-8\r\n\
         Content-Length: {}\r\n\
         Connection: close\r\n\r\n{body}",
        body.len()
    )
}

fn content_length(head: &str) -> usize {
    head.lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse().ok())
        .unwrap_or(0)
}

/// Accepts a single connection, answers it with `response`, and yields the raw
/// request text.
async fn serve_once(response: String) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&chunk[..n]);
            let text = String::from_utf8_lossy(&request);
            if let Some(head_end) = text.find("\r\n\r\n") {
                let expected = head_end + 4 + content_length(&text[..head_end]);
                if request.len() >= expected {
                    break;
                }
            }
        }
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;
        String::from_utf8_lossy(&request).into_owned()
    });

    (format!("http://{addr}/"), handle)
}

#[tokio::test]
async fn test_fetch_returns_body_on_success() {
    let (url, server) = serve_once(http_response(
        "200 OK",
        "<div class=\"PatchNotes-live\"></div>",
    ))
    .await;

    let fetcher = HttpPageFetcher::new().unwrap();
    let body = fetcher.fetch(&url).await.unwrap();

    assert_eq!(body, "<div class=\"PatchNotes-live\"></div>");
    let request = server.await.unwrap();
    assert!(request.starts_with("GET / HTTP/1.1"));
}

#[tokio::test]
async fn test_fetch_non_success_status_is_fetch_error() {
    let (url, server) =
        serve_once(http_response("503 Service Unavailable", "maintenance")).await;

    let fetcher = HttpPageFetcher::new().unwrap();
    let err = fetcher.fetch(&url).await.unwrap_err();

    match err {
        WatchError::FetchError(message) => assert!(message.contains("503"), "{message}"),
        other => panic!("unexpected error: {other:?}"),
    }
    server.await.unwrap();
}

#[tokio::test]
async fn test_fetch_connection_refused_is_fetch_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let fetcher = HttpPageFetcher::new().unwrap();
    let err = fetcher.fetch(&format!("http://{addr}/")).await.unwrap_err();

    assert!(matches!(err, WatchError::FetchError(_)));
}

#[tokio::test]
async fn test_push_sends_bearer_token_and_payload() {
    let (url, server) = serve_once(http_response("200 OK", "{}")).await;
    let client =
        LineClient::with_endpoints("secret-token".to_string(), url, "unused".to_string());

    client.push_text("C0123", "新しいパッチ").await.unwrap();

    let request = server.await.unwrap();
    assert!(request.starts_with("POST / HTTP/1.1"));
    assert!(
        request
            .lines()
            .any(|line| line.eq_ignore_ascii_case("authorization: Bearer secret-token")),
        "{request}"
    );
    assert!(request.contains(r#""to":"C0123""#), "{request}");
    assert!(request.contains("新しいパッチ"), "{request}");
}

#[tokio::test]
async fn test_rejected_reply_is_notify_error_with_status_and_body() {
    let (url, server) = serve_once(http_response(
        "401 Unauthorized",
        r#"{"message":"Authentication failed"}"#,
    ))
    .await;
    let client = LineClient::with_endpoints("bad-token".to_string(), "unused".to_string(), url);

    let err = client.reply_text("reply-token", "hi").await.unwrap_err();

    match err {
        WatchError::NotifyError(message) => {
            assert!(message.contains("401"), "{message}");
            assert!(message.contains("Authentication failed"), "{message}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    let request = server.await.unwrap();
    assert!(request.contains(r#""replyToken":"reply-token""#), "{request}");
}
