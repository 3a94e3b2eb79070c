/*
 * http_integration.rs
 * Copyright (C) 2026 Chris Burdess
 *
 * Integration tests for the HTTP client. Each test starts a one-shot server on
 * an ephemeral loopback port, serves a canned response (optionally split into
 * several writes) and checks the full request/response cycle over the real
 * plain transport. One ignored test performs a real HTTPS GET.
 *
 * Run with:
 *   cargo test -p lwhttp_core --test http_integration -- --nocapture
 * Network test:
 *   cargo test -p lwhttp_core --test http_integration -- --ignored --nocapture
 */

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::mpsc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use lwhttp_core::{HttpClient, HttpError, HttpVersion, Request, Url};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Read one request: header block, then Content-Length bytes of body.
fn read_request(stream: &mut TcpStream) -> Vec<u8> {
    let mut request = Vec::new();
    let mut buf = [0u8; 1024];
    let head_end = loop {
        if let Some(at) = request.windows(4).position(|w| w == b"\r\n\r\n") {
            break at + 4;
        }
        let n = stream.read(&mut buf).unwrap();
        assert!(n > 0, "client closed before sending a full request");
        request.extend_from_slice(&buf[..n]);
    };
    let head = String::from_utf8_lossy(&request[..head_end]).to_ascii_lowercase();
    let content_length = head
        .lines()
        .find_map(|l| l.strip_prefix("content-length:"))
        .map(|v| v.trim().parse::<usize>().unwrap())
        .unwrap_or(0);
    while request.len() < head_end + content_length {
        let n = stream.read(&mut buf).unwrap();
        assert!(n > 0);
        request.extend_from_slice(&buf[..n]);
    }
    request
}

/// One-shot server: accepts a connection, reads the request, writes `pieces`
/// with a short pause between them, then closes. Returns the port and a handle
/// yielding the request bytes received.
fn serve(pieces: Vec<Vec<u8>>) -> (u16, JoinHandle<Vec<u8>>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let request = read_request(&mut stream);
        for piece in pieces {
            if stream.write_all(&piece).is_err() {
                break;
            }
            let _ = stream.flush();
            thread::sleep(Duration::from_millis(10));
        }
        request
    });
    (port, handle)
}

fn client() -> HttpClient {
    HttpClient::builder().user_agent("itest/1.0").timeout(10).build()
}

#[test]
fn content_length_response_over_split_writes() {
    init_logging();
    let (port, server) = serve(vec![
        b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nCont".to_vec(),
        b"ent-Length: 11\r\n\r\nhello".to_vec(),
        b" world".to_vec(),
    ]);
    let (n, response) = client()
        .get(&format!("http://127.0.0.1:{}/greeting?lang=en", port))
        .unwrap();
    assert_eq!(n, 11);
    assert_eq!(response.status_code(), 200);
    assert_eq!(response.reason(), "OK");
    assert_eq!(response.version(), HttpVersion::Http11);
    assert_eq!(response.content_type(), "text/plain");
    assert_eq!(response.content_length(), Some(11));
    assert_eq!(response.body().unwrap().text(), "hello world");

    let request = String::from_utf8(server.join().unwrap()).unwrap();
    assert!(request.starts_with("GET /greeting?lang=en HTTP/1.1\r\n"), "{}", request);
    assert!(request.contains(&format!("Host: 127.0.0.1:{}\r\n", port)));
    assert!(request.contains("User-Agent: itest/1.0\r\n"));
    assert!(request.contains("Accept: */*\r\n"));
    assert!(request.contains("Connection: close\r\n"));
    assert!(request.ends_with("\r\n\r\n"));
}

#[test]
fn chunked_response_with_split_terminator() {
    init_logging();
    let (port, server) = serve(vec![
        b"HTTP/1.1 200 OK\r\nTransfer-Encoding: chunked\r\n\r\n".to_vec(),
        b"7\r\nMozilla\r\n9\r\nDeveloper\r\n0\r\n".to_vec(),
        b"\r\n".to_vec(),
    ]);
    let (n, response) = client().get(&format!("http://127.0.0.1:{}/", port)).unwrap();
    assert!(response.is_chunked());
    assert_eq!(response.body().unwrap().as_bytes(), b"7\r\nMozilla\r\n9\r\nDeveloper\r\n");
    assert_eq!(n, response.body_len());
    assert_eq!(response.decoded_body().unwrap(), b"MozillaDeveloper");
    server.join().unwrap();
}

#[test]
fn post_sends_body_after_headers() {
    init_logging();
    let (port, server) = serve(vec![b"HTTP/1.1 201 Created\r\nContent-Length: 0\r\n\r\n".to_vec()]);
    let url = Url::parse(&format!("http://127.0.0.1:{}/todos", port)).unwrap();
    let request = Request::builder()
        .url(url)
        .post(r#"{"title":"milk"}"#)
        .header("Content-Type", "application/json")
        .build()
        .unwrap();
    let (n, response) = client().send(&request).unwrap();
    assert_eq!(n, 0);
    assert_eq!(response.status_code(), 201);
    assert!(response.body().is_none());

    let received = String::from_utf8(server.join().unwrap()).unwrap();
    assert!(received.starts_with("POST /todos HTTP/1.1\r\n"));
    assert!(received.contains("Content-Length: 16\r\n"));
    assert!(received.contains("Content-Type: application/json\r\n"));
    assert!(received.ends_with("\r\n\r\n{\"title\":\"milk\"}"));
}

#[test]
fn large_body_across_many_reads() {
    init_logging();
    let body: Vec<u8> = (0..300 * 1024).map(|i| (i % 251) as u8).collect();
    let mut pieces = vec![format!("HTTP/1.1 200 OK\r\nContent-Length: {}\r\n\r\n", body.len()).into_bytes()];
    pieces.extend(body.chunks(64 * 1024).map(<[u8]>::to_vec));
    let (port, server) = serve(pieces);
    let (n, response) = client().get(&format!("http://127.0.0.1:{}/blob", port)).unwrap();
    assert_eq!(n, body.len());
    assert_eq!(response.into_body().unwrap().into_bytes(), body);
    server.join().unwrap();
}

#[test]
fn malformed_status_line_yields_no_response() {
    init_logging();
    let (port, server) = serve(vec![b"GARBAGE\r\n\r\n".to_vec()]);
    let err = client().get(&format!("http://127.0.0.1:{}/", port)).unwrap_err();
    assert!(matches!(err, HttpError::MalformedStatusLine(_)), "{:?}", err);
    assert_eq!(err.bytes_transferred(), 0);
    server.join().unwrap();
}

#[test]
fn connection_closed_mid_body_is_incomplete() {
    init_logging();
    let (port, server) = serve(vec![b"HTTP/1.1 200 OK\r\nContent-Length: 10\r\n\r\nabcd".to_vec()]);
    let err = client().get(&format!("http://127.0.0.1:{}/", port)).unwrap_err();
    assert!(matches!(err, HttpError::Incomplete { transferred: 4 }), "{:?}", err);
    server.join().unwrap();
}

#[test]
fn connect_failure_reports_zero_bytes() {
    init_logging();
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let err = client().get(&format!("http://127.0.0.1:{}/", port)).unwrap_err();
    assert!(matches!(err, HttpError::ConnectFailure { .. }), "{:?}", err);
    assert_eq!(err.bytes_transferred(), 0);
}

#[test]
fn stalled_server_hits_deadline() {
    init_logging();
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    let (done_tx, done_rx) = mpsc::channel::<()>();
    let server = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        read_request(&mut stream);
        stream
            .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 100\r\n\r\npartial")
            .unwrap();
        // hold the connection open until the client gives up
        let _ = done_rx.recv_timeout(Duration::from_secs(30));
    });
    let client = HttpClient::builder().timeout(1).build();
    let err = client.get(&format!("http://127.0.0.1:{}/", port)).unwrap_err();
    done_tx.send(()).unwrap();
    assert!(matches!(err, HttpError::Incomplete { transferred: 7 }), "{:?}", err);
    server.join().unwrap();
}

#[test]
#[ignore] // requires network; run with: cargo test --test http_integration -- --ignored --nocapture
fn get_over_https() {
    init_logging();
    let client = HttpClient::default();
    let (n, response) = client.get("https://example.com/").expect("request failed");

    println!("Status: {} {}", response.status_code(), response.reason());
    for (name, value) in response.headers() {
        println!("{}: {}", name, value);
    }
    println!("Body length: {} bytes", n);

    assert_eq!(response.status_code(), 200);
    assert!(response.status_line().is_success());
    assert!(response.content_type().starts_with("text/html"));
    let body = response.decoded_body().unwrap();
    assert!(String::from_utf8_lossy(&body).contains("<html"));
}
