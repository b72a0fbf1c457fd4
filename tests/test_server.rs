//! End-to-end tests over a real loopback socket

use basic_server::config::Config;
use basic_server::files::{FileResolver, StaticHandler};
use basic_server::server::listener;
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

fn site(name: &str) -> PathBuf {
    let root = std::env::temp_dir().join(format!(
        "basic-server-e2e-{}-{}",
        name,
        std::process::id()
    ));
    let _ = std::fs::remove_dir_all(&root);
    std::fs::create_dir_all(&root).unwrap();
    std::fs::write(root.join("index.html"), "<h1>It works</h1>").unwrap();
    std::fs::write(root.join("style.css"), "h1 { color: red; }").unwrap();
    root
}

async fn start(root: PathBuf, max_request_bytes: usize) -> SocketAddr {
    let cfg = Config {
        port: 0,
        web_root: root.clone(),
        max_request_bytes,
        ..Config::default()
    };

    let listener = listener::bind(&cfg).unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let handler = StaticHandler::new(FileResolver::new(root));
        let _ = listener::serve(listener, &handler, max_request_bytes).await;
    });

    addr
}

struct RawResponse {
    status_line: String,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl RawResponse {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

fn parse_response(bytes: &[u8]) -> RawResponse {
    let end = bytes.windows(4).position(|w| w == b"\r\n\r\n").unwrap();
    let head = std::str::from_utf8(&bytes[..end]).unwrap();
    let mut lines = head.split("\r\n");

    let status_line = lines.next().unwrap().to_string();
    let headers = lines
        .map(|l| {
            let (k, v) = l.split_once(": ").unwrap();
            (k.to_string(), v.to_string())
        })
        .collect();

    RawResponse {
        status_line,
        headers,
        body: bytes[end + 4..].to_vec(),
    }
}

/// Sends `raw` in the given pieces and reads until the server closes.
async fn exchange(addr: SocketAddr, pieces: &[&[u8]]) -> Vec<u8> {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    for piece in pieces {
        stream.write_all(piece).await.unwrap();
        stream.flush().await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    }

    let mut out = Vec::new();
    stream.read_to_end(&mut out).await.unwrap();
    out
}

#[tokio::test]
async fn test_get_root_serves_index() {
    let root = site("index");
    let addr = start(root.clone(), 8192).await;

    let resp = parse_response(&exchange(addr, &[b"GET / HTTP/1.1\r\n\r\n"]).await);

    assert_eq!(resp.status_line, "HTTP/1.1 200 OK");
    assert_eq!(resp.body, std::fs::read(root.join("index.html")).unwrap());
    assert_eq!(resp.header("Content-Type"), Some("text/html"));
    assert_eq!(resp.header("Content-Length"), Some("17"));
}

#[tokio::test]
async fn test_css_content_type() {
    let addr = start(site("css"), 8192).await;

    let resp = parse_response(
        &exchange(addr, &[b"GET /style.css HTTP/1.1\r\nHost: x\r\n\r\n"]).await,
    );

    assert_eq!(resp.status_line, "HTTP/1.1 200 OK");
    assert_eq!(resp.header("Content-Type"), Some("text/css"));
    assert_eq!(resp.body, b"h1 { color: red; }".to_vec());
}

#[tokio::test]
async fn test_missing_path_is_404() {
    let addr = start(site("missing"), 8192).await;

    let resp = parse_response(&exchange(addr, &[b"GET /nope HTTP/1.1\r\n\r\n"]).await);

    assert_eq!(resp.status_line, "HTTP/1.1 404 Not Found");
    assert_eq!(resp.body, b"<h1>404 Not Found</h1>".to_vec());
    assert_eq!(resp.header("Content-Length"), Some("22"));
}

#[tokio::test]
async fn test_non_get_is_405() {
    let addr = start(site("post"), 8192).await;

    let resp = parse_response(
        &exchange(addr, &[b"POST /index.html HTTP/1.1\r\nContent-Length: 3\r\n\r\na=1"]).await,
    );

    assert_eq!(resp.status_line, "HTTP/1.1 405 Method Not Allowed");
    assert_eq!(resp.body, b"<h1>405 Method Not Allowed</h1>".to_vec());
}

#[tokio::test]
async fn test_mixed_line_endings_end_the_headers() {
    let addr = start(site("mixed"), 8192).await;

    for raw in [
        &b"GET /style.css HTTP/1.1\n\r\n"[..],
        &b"GET /style.css HTTP/1.1\r\n\n"[..],
        &b"GET /style.css HTTP/1.1\r\nHost: x\n\r\n"[..],
    ] {
        // The client keeps its write half open, so only the blank line
        // can complete the request
        let out = tokio::time::timeout(
            std::time::Duration::from_secs(2),
            exchange(addr, &[raw]),
        )
        .await
        .expect("no response before timeout");

        let resp = parse_response(&out);
        assert_eq!(resp.status_line, "HTTP/1.1 200 OK");
        assert_eq!(resp.header("Content-Type"), Some("text/css"));
    }
}

#[tokio::test]
async fn test_request_split_across_writes() {
    let addr = start(site("split"), 8192).await;

    let resp = parse_response(
        &exchange(addr, &[b"GET /style", b".css HTTP/1.1\r\nHo", b"st: x\r\n\r\n"]).await,
    );

    assert_eq!(resp.status_line, "HTTP/1.1 200 OK");
    assert_eq!(resp.header("Content-Type"), Some("text/css"));
}

#[tokio::test]
async fn test_connection_closed_after_one_response() {
    let addr = start(site("close"), 8192).await;

    // A second pipelined request on the same connection is ignored
    let out = exchange(
        addr,
        &[b"GET / HTTP/1.1\r\n\r\nGET /style.css HTTP/1.1\r\n\r\n"],
    )
    .await;

    let text = String::from_utf8_lossy(&out);
    assert_eq!(text.matches("HTTP/1.1 ").count(), 1);
}

#[tokio::test]
async fn test_oversized_request_is_truncated_not_fatal() {
    let addr = start(site("oversized"), 64).await;

    // Exactly the cap, with no header terminator: the server stops reading
    // at the limit and answers with what it has
    let mut raw = b"GET / HTTP/1.1\r\nX-Fill: ".to_vec();
    raw.resize(64, b'a');

    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(&raw).await.unwrap();
    let mut out = Vec::new();
    stream.read_to_end(&mut out).await.unwrap();

    let resp = parse_response(&out);
    assert_eq!(resp.status_line, "HTTP/1.1 200 OK");

    // Server is still accepting
    let again = parse_response(&exchange(addr, &[b"GET /nope HTTP/1.1\r\n\r\n"]).await);
    assert_eq!(again.status_line, "HTTP/1.1 404 Not Found");
}

#[tokio::test]
async fn test_silent_client_gets_no_response() {
    let addr = start(site("silent"), 8192).await;

    let stream = TcpStream::connect(addr).await.unwrap();
    drop(stream);

    let resp = parse_response(&exchange(addr, &[b"GET / HTTP/1.1\r\n\r\n"]).await);
    assert_eq!(resp.status_line, "HTTP/1.1 200 OK");
}

#[tokio::test]
async fn test_half_closed_request_without_blank_line() {
    let addr = start(site("halfclose"), 8192).await;

    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(b"GET /style.css HTTP/1.1").await.unwrap();
    stream.shutdown().await.unwrap();

    let mut out = Vec::new();
    stream.read_to_end(&mut out).await.unwrap();

    let resp = parse_response(&out);
    assert_eq!(resp.status_line, "HTTP/1.1 200 OK");
    assert_eq!(resp.header("Content-Type"), Some("text/css"));
}

#[test]
fn test_bind_rejects_non_ipv4_host() {
    let cfg = Config {
        host: "::1".to_string(),
        port: 0,
        ..Config::default()
    };

    assert!(listener::bind(&cfg).is_err());
}
