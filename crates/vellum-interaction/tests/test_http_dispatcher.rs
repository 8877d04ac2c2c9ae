//! Exercises `HttpSubmissionDispatcher` against a one-shot local HTTP server.

use futures::StreamExt;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use vellum_core::analysis::SubmissionDispatcher;
use vellum_core::{Document, VellumError};
use vellum_interaction::HttpSubmissionDispatcher;

/// Accepts a single connection, captures the request and replies with
/// `response` verbatim before closing the socket.
async fn serve_once(response: Vec<u8>) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;
        socket.write_all(&response).await.unwrap();
        socket.flush().await.unwrap();
        let _ = socket.shutdown().await;
        request
    });

    (format!("http://{addr}/analyze-resume"), handle)
}

/// Like `serve_once`, but keeps the connection open after writing so the
/// response body never ends.
async fn serve_and_hold(response: Vec<u8>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        read_request(&mut socket).await;
        socket.write_all(&response).await.unwrap();
        socket.flush().await.unwrap();
        tokio::time::sleep(Duration::from_secs(60)).await;
    });

    format!("http://{addr}/analyze-resume")
}

async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf).to_string();
        let Some(header_end) = text.find("\r\n\r\n") else {
            continue;
        };
        let headers = text[..header_end].to_ascii_lowercase();
        let body_len = buf.len() - (header_end + 4);

        let content_length = headers
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .and_then(|value| value.trim().parse::<usize>().ok());

        match content_length {
            Some(expected) if body_len >= expected => break,
            Some(_) => continue,
            None if headers.contains("transfer-encoding: chunked") => {
                if buf.ends_with(b"0\r\n\r\n") {
                    break;
                }
            }
            None => break,
        }
    }

    String::from_utf8_lossy(&buf).to_string()
}

fn ok_response(body: &str) -> Vec<u8> {
    format!(
        "HTTP/1.1 200 OK\r\nContent-Type: text/plain; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        body.len(),
        body
    )
    .into_bytes()
}

fn resume() -> Document {
    Document::new("resume.pdf", b"%PDF-1.4 fake".to_vec())
}

#[tokio::test]
async fn test_streams_report_body() {
    let report = "1. Summary\nStrong background\n2. Skills\n- Python\n- Gö\n";
    let (endpoint, server) = serve_once(ok_response(report)).await;

    let dispatcher = HttpSubmissionDispatcher::new(endpoint);
    let mut stream = dispatcher.submit(&resume()).await.expect("submission succeeds");

    let mut body = Vec::new();
    while let Some(chunk) = stream.next().await {
        body.extend(chunk.expect("chunk reads cleanly"));
    }
    assert_eq!(String::from_utf8(body).unwrap(), report);

    let request = server.await.unwrap();
    assert!(request.starts_with("POST /analyze-resume HTTP/1.1"));
    assert!(request.contains("multipart/form-data; boundary="));
    assert!(request.contains("name=\"file\"; filename=\"resume.pdf\""));
    assert!(request.to_ascii_lowercase().contains("content-type: application/pdf"));
    assert!(request.contains("%PDF-1.4 fake"));
}

#[tokio::test]
async fn test_custom_field_name() {
    let (endpoint, server) = serve_once(ok_response("")).await;

    let dispatcher = HttpSubmissionDispatcher::new(endpoint).with_field_name("resume");
    let stream = dispatcher.submit(&resume()).await.unwrap();
    let chunks: Vec<_> = stream.collect().await;
    assert!(chunks.iter().all(Result::is_ok));

    let request = server.await.unwrap();
    assert!(request.contains("name=\"resume\"; filename=\"resume.pdf\""));
}

#[tokio::test]
async fn test_non_success_status_is_submission_error() {
    let response =
        b"HTTP/1.1 500 Internal Server Error\r\nContent-Length: 5\r\nConnection: close\r\n\r\nboom!"
            .to_vec();
    let (endpoint, server) = serve_once(response).await;

    let dispatcher = HttpSubmissionDispatcher::new(endpoint);
    let err = match dispatcher.submit(&resume()).await {
        Ok(_) => panic!("a 500 response must not open a stream"),
        Err(err) => err,
    };

    assert_eq!(err, VellumError::submission_status(500, "boom!"));
    server.await.unwrap();
}

#[tokio::test]
async fn test_connection_refused_is_submission_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let dispatcher = HttpSubmissionDispatcher::new(format!("http://{addr}/analyze-resume"));
    match dispatcher.submit(&resume()).await {
        Ok(_) => panic!("nothing is listening"),
        Err(err) => {
            assert!(err.is_submission());
            assert!(matches!(err, VellumError::Submission { status: None, .. }));
        }
    }
}

#[tokio::test]
async fn test_truncated_body_is_stream_read_error() {
    let response =
        b"HTTP/1.1 200 OK\r\nContent-Length: 100\r\nConnection: close\r\n\r\n1. Summary\n".to_vec();
    let (endpoint, server) = serve_once(response).await;

    let dispatcher = HttpSubmissionDispatcher::new(endpoint);
    let mut stream = dispatcher.submit(&resume()).await.unwrap();

    let mut received = Vec::new();
    let mut failure = None;
    while let Some(chunk) = stream.next().await {
        match chunk {
            Ok(bytes) => received.extend(bytes),
            Err(err) => {
                failure = Some(err);
                break;
            }
        }
    }

    assert_eq!(received, b"1. Summary\n");
    assert!(failure.expect("truncated body must error").is_stream_read());
    server.await.unwrap();
}

#[tokio::test]
async fn test_endless_error_body_is_read_bounded() {
    let mut response =
        b"HTTP/1.1 502 Bad Gateway\r\nContent-Length: 10000000\r\n\r\n".to_vec();
    response.extend(std::iter::repeat_n(b'x', 8192));
    let endpoint = serve_and_hold(response).await;

    let dispatcher = HttpSubmissionDispatcher::new(endpoint);
    let result = tokio::time::timeout(Duration::from_secs(10), dispatcher.submit(&resume()))
        .await
        .expect("error body must not be read to the end");

    let err = match result {
        Ok(_) => panic!("a 502 response must not open a stream"),
        Err(err) => err,
    };
    assert_eq!(err, VellumError::submission_status(502, "x".repeat(512)));
}
