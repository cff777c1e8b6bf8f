//! `multipart/form-data` encoding for the standard ShareFile upload
//!
//! The chunk endpoint expects a single file field named `File1`. The payload is
//! assembled by hand so the framing is byte-exact and the `Content-Length` is
//! known before sending.

use bytes::{BufMut, Bytes, BytesMut};
use rand::{distributions::Alphanumeric, Rng};
use std::path::Path;

/// Form field name the upload endpoint reads the file from
pub const FILE_FIELD: &str = "File1";

/// Content type used when nothing better can be detected
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Number of leading bytes inspected when sniffing
pub const SNIFF_LEN: usize = 512;

const BOUNDARY_PREFIX: &str = "----------";
const BOUNDARY_TOKEN_LEN: usize = 32;

/// An encoded single-part form body
#[derive(Clone, Debug)]
pub struct MultipartPayload {
    boundary: String,
    body: Bytes,
}

impl MultipartPayload {
    /// Boundary delimiting the part
    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// Value for the `Content-Type` request header
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    /// Exact encoded length in bytes
    pub fn content_length(&self) -> u64 {
        self.body.len() as u64
    }

    /// Encoded payload
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    pub fn into_body(self) -> Bytes {
        self.body
    }
}

/// Random boundary token drawn from the thread-local CSPRNG
pub fn generate_boundary() -> String {
    let token: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(BOUNDARY_TOKEN_LEN)
        .map(char::from)
        .collect();
    format!("{}{}", BOUNDARY_PREFIX, token)
}

/// Encode `data` as the `File1` part, with a boundary that does not occur in `data`
pub fn encode_file_part(file_name: &str, content_type: &str, data: &[u8]) -> MultipartPayload {
    let mut boundary = generate_boundary();
    while contains(data, boundary.as_bytes()) {
        boundary = generate_boundary();
    }
    encode_file_part_with_boundary(&boundary, file_name, content_type, data)
}

/// Encode `data` as the `File1` part using a caller-chosen boundary
pub fn encode_file_part_with_boundary(
    boundary: &str,
    file_name: &str,
    content_type: &str,
    data: &[u8],
) -> MultipartPayload {
    let head = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"{FILE_FIELD}\"; filename=\"{}\"\r\n\
         Content-Type: {content_type}\r\n\
         \r\n",
        escape_file_name(file_name),
    );
    let tail = format!("\r\n--{boundary}--\r\n");

    let mut body = BytesMut::with_capacity(head.len() + data.len() + tail.len());
    body.put_slice(head.as_bytes());
    body.put_slice(data);
    body.put_slice(tail.as_bytes());

    MultipartPayload {
        boundary: boundary.to_string(),
        body: body.freeze(),
    }
}

/// Content type for an upload: sniffed from the leading bytes, then guessed
/// from the file extension, then [`DEFAULT_CONTENT_TYPE`].
pub fn detect_content_type(path: &Path, data: &[u8]) -> String {
    if let Some(sniffed) = sniff_content_type(data) {
        return sniffed.to_string();
    }
    match mime_guess::from_path(path).first() {
        Some(guess) => guess.essence_str().to_string(),
        None => {
            tracing::warn!(path = %path.display(), "content type not detected, using {}", DEFAULT_CONTENT_TYPE);
            DEFAULT_CONTENT_TYPE.to_string()
        }
    }
}

/// Identify well known formats by their signature.
///
/// Returns `None` for data that is neither a known binary format nor text.
pub fn sniff_content_type(data: &[u8]) -> Option<&'static str> {
    let head = &data[..data.len().min(SNIFF_LEN)];

    const SIGNATURES: &[(&[u8], &str)] = &[
        (b"%PDF-", "application/pdf"),
        (b"%!PS-Adobe-", "application/postscript"),
        (b"\x89PNG\r\n\x1a\n", "image/png"),
        (b"\xFF\xD8\xFF", "image/jpeg"),
        (b"GIF87a", "image/gif"),
        (b"GIF89a", "image/gif"),
        (b"BM", "image/bmp"),
        (b"\x00\x00\x01\x00", "image/x-icon"),
        (b"PK\x03\x04", "application/zip"),
        (b"\x1F\x8B\x08", "application/x-gzip"),
        (b"Rar!\x1A\x07", "application/x-rar-compressed"),
        (b"OggS\x00", "application/ogg"),
        (b"ID3", "audio/mpeg"),
        (b"\x1A\x45\xDF\xA3", "video/webm"),
        (b"\x00asm", "application/wasm"),
        (b"\xFE\xFF", "text/plain; charset=utf-16be"),
        (b"\xFF\xFE", "text/plain; charset=utf-16le"),
        (b"\xEF\xBB\xBF", "text/plain; charset=utf-8"),
    ];
    if let Some((_, mime)) = SIGNATURES.iter().find(|(sig, _)| head.starts_with(sig)) {
        return Some(*mime);
    }

    if head.len() >= 12 && &head[..4] == b"RIFF" {
        match &head[8..12] {
            b"WEBP" => return Some("image/webp"),
            b"WAVE" => return Some("audio/wave"),
            b"AVI " => return Some("video/avi"),
            _ => {}
        }
    }

    let trimmed = trim_leading_whitespace(head);
    const MARKUP: &[(&[u8], &str)] = &[
        (b"<!DOCTYPE HTML", "text/html; charset=utf-8"),
        (b"<HTML", "text/html; charset=utf-8"),
        (b"<HEAD", "text/html; charset=utf-8"),
        (b"<BODY", "text/html; charset=utf-8"),
        (b"<?XML", "text/xml; charset=utf-8"),
    ];
    if let Some((_, mime)) = MARKUP.iter().find(|(tag, _)| starts_with_ignore_case(trimmed, tag)) {
        return Some(*mime);
    }

    if !head.iter().any(|&b| is_binary_byte(b)) {
        return Some("text/plain; charset=utf-8");
    }

    None
}

fn is_binary_byte(b: u8) -> bool {
    matches!(b, 0x00..=0x08 | 0x0B | 0x0E..=0x1A | 0x1C..=0x1F)
}

fn trim_leading_whitespace(data: &[u8]) -> &[u8] {
    let start = data
        .iter()
        .position(|&b| !matches!(b, b'\t' | b'\n' | b'\x0C' | b'\r' | b' '))
        .unwrap_or(data.len());
    &data[start..]
}

fn starts_with_ignore_case(data: &[u8], prefix: &[u8]) -> bool {
    data.len() >= prefix.len() && data[..prefix.len()].eq_ignore_ascii_case(prefix)
}

fn escape_file_name(name: &str) -> String {
    name.replace('"', "%22")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    needle.len() <= haystack.len() && haystack.windows(needle.len()).any(|w| w == needle)
}
