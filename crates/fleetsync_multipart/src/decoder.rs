//! Boundary-driven multipart decoder.

use crate::error::{MultipartError, MultipartResult};
use crate::part::Part;

/// Decode a `multipart/form-data` body into its parts.
///
/// # Errors
///
/// Returns an error if the body has no boundary delimiter, is truncated,
/// carries malformed part headers, or decodes to zero parts.
pub fn decode_form_data(body: &[u8], boundary: &str) -> MultipartResult<Vec<Part>> {
    let mut decoder = MultipartDecoder::new(body, boundary);
    decoder.decode()
}

/// Maximum number of parts accepted from one body.
///
/// Sync requests carry a handful of named fields; bodies beyond this are
/// rejected rather than buffered.
const MAX_PARTS: usize = 64;

/// Maximum content length of a single part.
///
/// Caps allocation from untrusted input; oversized parts are rejected,
/// never truncated.
const MAX_PART_BYTES: usize = 32 * 1024 * 1024;

/// A `multipart/form-data` decoder.
///
/// Walks boundary delimiters, part headers, and part content over a byte
/// cursor. Content is treated as opaque bytes; only part headers must be
/// UTF-8.
pub struct MultipartDecoder<'a> {
    data: &'a [u8],
    pos: usize,
    delimiter: Vec<u8>,
    max_parts: usize,
    max_part_bytes: usize,
}

impl<'a> MultipartDecoder<'a> {
    /// Create a new decoder for the given body and boundary token.
    pub fn new(data: &'a [u8], boundary: &str) -> Self {
        let mut delimiter = Vec::with_capacity(2 + boundary.len());
        delimiter.extend_from_slice(b"--");
        delimiter.extend_from_slice(boundary.as_bytes());
        Self {
            data,
            pos: 0,
            delimiter,
            max_parts: MAX_PARTS,
            max_part_bytes: MAX_PART_BYTES,
        }
    }

    /// Overrides the part count and per-part size limits.
    pub fn with_limits(mut self, max_parts: usize, max_part_bytes: usize) -> Self {
        self.max_parts = max_parts;
        self.max_part_bytes = max_part_bytes;
        self
    }

    /// Decode every part of the body.
    ///
    /// # Errors
    ///
    /// Returns an error on a missing or unterminated boundary, a malformed
    /// part header, a limit violation, or a body with zero parts.
    pub fn decode(&mut self) -> MultipartResult<Vec<Part>> {
        let data = self.data;
        let first =
            find_subslice(data, &self.delimiter).ok_or(MultipartError::MissingBoundary)?;
        self.pos = first + self.delimiter.len();

        // Content of a part runs until the next CRLF-prefixed delimiter.
        let mut close = Vec::with_capacity(2 + self.delimiter.len());
        close.extend_from_slice(b"\r\n");
        close.extend_from_slice(&self.delimiter);

        let mut parts = Vec::new();
        loop {
            if data[self.pos..].starts_with(b"--") {
                // Terminal delimiter; epilogue is ignored.
                break;
            }
            self.expect_crlf()?;
            let (name, filename) = self.decode_part_headers()?;
            let content = self.decode_content(&name, &close)?;
            if parts.len() >= self.max_parts {
                return Err(MultipartError::TooManyParts {
                    count: parts.len() + 1,
                    max: self.max_parts,
                });
            }
            parts.push(Part {
                name,
                filename,
                data: content.to_vec(),
            });
        }

        if parts.is_empty() {
            return Err(MultipartError::Empty);
        }
        Ok(parts)
    }

    /// Consumes the CRLF that ends a boundary line.
    fn expect_crlf(&mut self) -> MultipartResult<()> {
        if self.data[self.pos..].starts_with(b"\r\n") {
            self.pos += 2;
            Ok(())
        } else {
            Err(MultipartError::Truncated(self.pos))
        }
    }

    /// Reads part headers up to the blank line, returning the field name
    /// and optional filename from the `Content-Disposition` header.
    fn decode_part_headers(&mut self) -> MultipartResult<(String, Option<String>)> {
        let mut name = None;
        let mut filename = None;
        loop {
            let line = self.read_line()?;
            if line.is_empty() {
                break;
            }
            let Some((header, value)) = line.split_once(':') else {
                return Err(MultipartError::MalformedHeader(line.to_string()));
            };
            if header.trim().eq_ignore_ascii_case("content-disposition") {
                let (n, f) = parse_disposition(value);
                name = n;
                filename = f;
            }
            // Other part headers (e.g. a per-part Content-Type) are ignored.
        }
        match name {
            Some(name) => Ok((name, filename)),
            None => Err(MultipartError::MalformedHeader(
                "missing Content-Disposition field name".into(),
            )),
        }
    }

    /// Reads one CRLF-terminated header line.
    fn read_line(&mut self) -> MultipartResult<&'a str> {
        let data = self.data;
        let start = self.pos;
        let end =
            find_subslice(&data[start..], b"\r\n").ok_or(MultipartError::Truncated(start))?;
        self.pos = start + end + 2;
        std::str::from_utf8(&data[start..start + end])
            .map_err(|_| MultipartError::MalformedHeader("non-UTF-8 header line".into()))
    }

    /// Reads part content up to the next delimiter, advancing past it.
    fn decode_content(&mut self, name: &str, close: &[u8]) -> MultipartResult<&'a [u8]> {
        let data = self.data;
        let start = self.pos;
        let end = find_subslice(&data[start..], close).ok_or(MultipartError::Truncated(start))?;
        let content = &data[start..start + end];
        if content.len() > self.max_part_bytes {
            return Err(MultipartError::PartTooLarge {
                name: name.to_string(),
                len: content.len(),
                max: self.max_part_bytes,
            });
        }
        self.pos = start + end + close.len();
        Ok(content)
    }
}

/// Returns true if the content type denotes a multipart body.
pub fn is_multipart(content_type: &str) -> bool {
    let bytes = content_type.trim_start().as_bytes();
    bytes.len() >= 10 && bytes[..10].eq_ignore_ascii_case(b"multipart/")
}

/// Extracts the boundary token from a multipart content type.
///
/// Handles both quoted and unquoted boundary parameters.
pub fn boundary_from_content_type(content_type: &str) -> Option<&str> {
    content_type.split(';').skip(1).find_map(|param| {
        let (key, value) = param.split_once('=')?;
        if key.trim().eq_ignore_ascii_case("boundary") {
            let value = value.trim().trim_matches('"');
            (!value.is_empty()).then_some(value)
        } else {
            None
        }
    })
}

/// Parses the parameters of a `Content-Disposition` header value.
fn parse_disposition(value: &str) -> (Option<String>, Option<String>) {
    let mut name = None;
    let mut filename = None;
    for param in value.split(';').skip(1) {
        if let Some((key, val)) = param.split_once('=') {
            let val = val.trim().trim_matches('"');
            match key.trim() {
                k if k.eq_ignore_ascii_case("name") => name = Some(val.to_string()),
                k if k.eq_ignore_ascii_case("filename") => filename = Some(val.to_string()),
                _ => {}
            }
        }
    }
    (name, filename)
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.len() > haystack.len() {
        return None;
    }
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
