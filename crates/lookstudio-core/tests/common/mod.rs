#![allow(dead_code)]

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use lookstudio_core::capability::{EditCapability, EditedImage};
use lookstudio_core::error::CapabilityError;
use lookstudio_core::session::{SessionChange, SessionObserver, SessionStore};

/// Smallest valid PNG signature plus IHDR chunk header; enough for format sniffing.
pub const PNG_BYTES: &[u8] = &[
    0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, b'I', b'H', b'D', b'R',
];

/// Synthetic JPEG of the given size: SOI/APP0 marker followed by padding.
pub fn jpeg_bytes(size: usize) -> Vec<u8> {
    let mut bytes = vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F', 0x00];
    bytes.resize(size, 0x42);
    bytes
}

pub const WEBP_BYTES: &[u8] = b"RIFF\x24\x00\x00\x00WEBPVP8 ";

pub const GIF_BYTES: &[u8] = b"GIF89a\x01\x00\x01\x00\x00\x00\x00";

/// Base64 of the bytes `edited`.
pub const EDITED_PAYLOAD: &str = "ZWRpdGVk";

/// One recorded call to the fake capability.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedCall {
    pub image_base64: String,
    pub mime_type: String,
    pub instruction: String,
}

/// Capability double that records calls and answers with a canned result.
pub struct FakeCapability {
    pub calls: Mutex<Vec<RecordedCall>>,
    response: Result<EditedImage, CapabilityError>,
}

impl FakeCapability {
    pub fn succeeding(data: &str, mime_type: Option<&str>) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            response: Ok(EditedImage {
                data: data.to_string(),
                mime_type: mime_type.map(str::to_string),
                text: None,
            }),
        }
    }

    pub fn failing(error: CapabilityError) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            response: Err(error),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl EditCapability for FakeCapability {
    fn edit(
        &self,
        image_base64: &str,
        mime_type: &str,
        instruction: &str,
    ) -> Result<EditedImage, CapabilityError> {
        self.calls.lock().unwrap().push(RecordedCall {
            image_base64: image_base64.to_string(),
            mime_type: mime_type.to_string(),
            instruction: instruction.to_string(),
        });
        self.response.clone()
    }
}

/// Observer that records every change tag it sees.
#[derive(Clone, Default)]
pub struct ChangeLog {
    pub changes: Arc<Mutex<Vec<SessionChange>>>,
}

impl ChangeLog {
    pub fn snapshot(&self) -> Vec<SessionChange> {
        self.changes.lock().unwrap().clone()
    }
}

impl SessionObserver for ChangeLog {
    fn session_changed(&self, _session: &SessionStore, change: SessionChange) {
        self.changes.lock().unwrap().push(change);
    }
}

/// One-shot HTTP server on a loopback port that answers with a canned response
/// and hands back the raw request it received.
pub struct CannedServer {
    pub base_url: String,
    handle: JoinHandle<String>,
}

impl CannedServer {
    pub fn start(status_line: &'static str, body: String) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}/v1beta", listener.local_addr().unwrap());

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let request = read_request(&mut stream);
            let response = format!(
                "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).unwrap();
            request
        });

        Self { base_url, handle }
    }

    /// Wait for the exchange to finish and return the request text.
    pub fn request(self) -> String {
        self.handle.join().unwrap()
    }
}

fn read_request(stream: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = stream.read(&mut chunk).unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
            continue;
        };
        let head = String::from_utf8_lossy(&buf[..end]).to_ascii_lowercase();
        let content_length = head
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .and_then(|value| value.trim().parse::<usize>().ok())
            .unwrap_or(0);
        if buf.len() >= end + 4 + content_length {
            break;
        }
    }
    String::from_utf8_lossy(&buf).to_string()
}
