//! Loopback HTTP server serving one canned response per test.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

/// Request as received by a [`CannedServer`].
#[derive(Debug, Clone, Default)]
pub struct CapturedRequest {
    /// Request line, e.g. `GET /search?q=x HTTP/1.1`.
    pub request_line: String,
    /// Raw body text.
    pub body: String,
}

/// Single-shot HTTP server bound to `127.0.0.1` on an ephemeral port.
#[derive(Debug)]
pub struct CannedServer {
    base_url: String,
    captured: Arc<Mutex<Option<CapturedRequest>>>,
}

impl CannedServer {
    /// Serve `body` with `status` to the first connection.
    pub fn respond(status: u16, body: &str) -> Self {
        let response = format!(
            "HTTP/1.1 {status} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            reason(status),
            body.len()
        );
        Self::spawn(move |stream| {
            stream
                .write_all(response.as_bytes())
                .unwrap_or_else(|err| panic!("failed to write canned response: {err}"));
        })
    }

    /// Accept the first connection and never answer.
    pub fn silent(hold: Duration) -> Self {
        Self::spawn(move |_| thread::sleep(hold))
    }

    /// Base URL of a port nothing listens on.
    pub fn refused_url() -> String {
        let listener = TcpListener::bind("127.0.0.1:0")
            .unwrap_or_else(|err| panic!("failed to bind loopback port: {err}"));
        let port = listener
            .local_addr()
            .unwrap_or_else(|err| panic!("failed to read local address: {err}"))
            .port();
        drop(listener);
        format!("http://127.0.0.1:{port}")
    }

    /// Base URL for adapters under test.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The request received so far, if any.
    pub fn captured(&self) -> Option<CapturedRequest> {
        self.captured
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    fn spawn(reply: impl FnOnce(&mut TcpStream) + Send + 'static) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .unwrap_or_else(|err| panic!("failed to bind loopback port: {err}"));
        let addr = listener
            .local_addr()
            .unwrap_or_else(|err| panic!("failed to read local address: {err}"));
        let captured = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&captured);

        thread::spawn(move || {
            let Ok((mut stream, _)) = listener.accept() else {
                return;
            };
            let request = read_request(&stream);
            *sink
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner) = Some(request);
            reply(&mut stream);
        });

        Self {
            base_url: format!("http://{addr}"),
            captured,
        }
    }
}

fn read_request(stream: &TcpStream) -> CapturedRequest {
    let mut reader = BufReader::new(stream);
    let mut request_line = String::new();
    reader
        .read_line(&mut request_line)
        .unwrap_or_else(|err| panic!("failed to read request line: {err}"));

    let mut content_length = 0_usize;
    loop {
        let mut header = String::new();
        let read = reader
            .read_line(&mut header)
            .unwrap_or_else(|err| panic!("failed to read header: {err}"));
        let trimmed = header.trim();
        if read == 0 || trimmed.is_empty() {
            break;
        }
        if let Some((name, value)) = trimmed.split_once(':') {
            if name.eq_ignore_ascii_case("content-length") {
                content_length = value.trim().parse().unwrap_or(0);
            }
        }
    }

    let mut body = vec![0_u8; content_length];
    reader
        .read_exact(&mut body)
        .unwrap_or_else(|err| panic!("failed to read body: {err}"));

    CapturedRequest {
        request_line: request_line.trim_end().to_owned(),
        body: String::from_utf8_lossy(&body).into_owned(),
    }
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        503 => "Service Unavailable",
        _ => "Unknown",
    }
}
