//! Helpers shared by the data crate's behaviour tests.

use std::fs;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;

/// Directory containing the JSON fixtures.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Read a fixture file by name.
pub fn read_fixture(name: &str) -> String {
    let path = fixtures_dir().join(name);
    fs::read_to_string(&path).unwrap_or_else(|err| {
        panic!("failed to read fixture {path:?}: {err}");
    })
}

/// A loopback HTTP server that answers every request with one canned
/// response and records the request lines it saw.
#[derive(Debug)]
pub struct CannedServer {
    base: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl CannedServer {
    /// Start serving `body` with `status` on an ephemeral port.
    pub fn start(status: u16, body: String) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap_or_else(|err| {
            panic!("failed to bind loopback listener: {err}");
        });
        let addr = listener.local_addr().unwrap_or_else(|err| {
            panic!("listener has no address: {err}");
        });
        let requests = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&requests);
        thread::spawn(move || {
            for mut stream in listener.incoming().flatten() {
                let Some(line) = read_request_line(&mut stream) else {
                    continue;
                };
                seen.lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .push(line);
                write_response(&mut stream, status, &body);
            }
        });
        Self {
            base: format!("http://{addr}"),
            requests,
        }
    }

    /// URL of `path` on this server.
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    /// Request lines received so far, e.g. `GET /directions?... HTTP/1.1`.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

fn read_request_line(stream: &mut TcpStream) -> Option<String> {
    let mut received = Vec::new();
    let mut chunk = [0_u8; 1024];
    while !received.windows(4).any(|window| window == b"\r\n\r\n") {
        let read = stream.read(&mut chunk).ok()?;
        if read == 0 {
            break;
        }
        received.extend_from_slice(chunk.get(..read)?);
    }
    let request = String::from_utf8_lossy(&received);
    request.lines().next().map(str::to_owned)
}

fn write_response(stream: &mut TcpStream, status: u16, body: &str) {
    let reason = if status == 200 { "OK" } else { "Error" };
    let response = format!(
        "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\n\
         Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    // The client may already have given up; nothing to report then.
    let _ = stream.write_all(response.as_bytes());
}
