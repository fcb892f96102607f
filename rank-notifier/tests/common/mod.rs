#![allow(dead_code)]

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::Once;
use std::thread::{self, JoinHandle};
use std::time::Duration;

static INIT: Once = Once::new();

/// Keeps loopback traffic away from any proxy configured on the host.
pub fn init() {
    INIT.call_once(|| {
        std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
        let _ = env_logger::builder()
            .filter_level(log::LevelFilter::Debug)
            .is_test(true)
            .try_init();
    });
}

#[derive(Debug)]
pub struct CapturedRequest {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Backend stand-in answering one connection per configured status.
pub struct StubBackend {
    pub base_url: String,
    handle: JoinHandle<Vec<CapturedRequest>>,
}

impl StubBackend {
    pub fn respond_with(status: u16) -> Self {
        Self::serve(vec![Some(status)])
    }

    /// Reads the request and never answers.
    pub fn silent() -> Self {
        Self::serve(vec![None])
    }

    pub fn serve(statuses: Vec<Option<u16>>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = thread::spawn(move || {
            let mut captured = vec![];
            for status in statuses {
                let (mut stream, _) = listener.accept().unwrap();
                stream
                    .set_read_timeout(Some(Duration::from_secs(5)))
                    .unwrap();
                captured.push(read_request(&mut stream));
                match status {
                    Some(status) => {
                        let response = format!(
                            "HTTP/1.1 {} Stub\r\ncontent-length: 0\r\nconnection: close\r\n\r\n",
                            status
                        );
                        stream.write_all(response.as_bytes()).unwrap();
                    }
                    None => {
                        // Hold the connection until the client hangs up.
                        let mut sink = [0u8; 64];
                        let _ = stream.read(&mut sink);
                    }
                }
            }
            captured
        });
        Self {
            base_url: format!("http://{}", addr),
            handle,
        }
    }

    pub fn captured(self) -> Vec<CapturedRequest> {
        self.handle.join().unwrap()
    }
}

/// A base url nothing is listening on.
pub fn refused_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

fn read_request(stream: &mut TcpStream) -> CapturedRequest {
    let mut buf = vec![];
    let mut chunk = [0u8; 1024];
    let head_end = loop {
        if let Some(pos) = find_head_end(&buf) {
            break pos;
        }
        let n = stream.read(&mut chunk).unwrap();
        assert!(n > 0, "connection closed before request head was complete");
        buf.extend_from_slice(&chunk[..n]);
    };

    let head = String::from_utf8_lossy(&buf[..head_end]).to_string();
    let mut lines = head.split("\r\n");
    let mut request_line = lines.next().unwrap().split(' ');
    let method = request_line.next().unwrap().to_string();
    let path = request_line.next().unwrap().to_string();
    let headers: Vec<(String, String)> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
        .collect();

    let content_length = headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case("content-length"))
        .map(|(_, value)| value.parse::<usize>().unwrap())
        .unwrap_or(0);
    let mut body = buf[head_end + 4..].to_vec();
    while body.len() < content_length {
        let n = stream.read(&mut chunk).unwrap();
        assert!(n > 0, "connection closed before body was complete");
        body.extend_from_slice(&chunk[..n]);
    }

    CapturedRequest {
        method,
        path,
        headers,
        body,
    }
}

fn find_head_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|window| window == b"\r\n\r\n")
}
