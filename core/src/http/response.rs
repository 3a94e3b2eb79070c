/*
 * response.rs
 * Copyright (C) 2026 Chris Burdess
 *
 * This file is part of lwhttp, a minimal HTTP/1.x client.
 *
 * lwhttp is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * lwhttp is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with lwhttp.  If not, see <http://www.gnu.org/licenses/>.
 */

//! Assembled HTTP response: status line, headers, optional body.

use std::borrow::Cow;

use crate::error::Result;
use crate::http::h1::chunked;
use crate::http::header::HeaderMap;
use crate::http::status::{HttpVersion, StatusLine};

/// Owned message body. Moves with its request or response; never shared.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Body {
    data: Vec<u8>,
}

impl Body {
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Body as text, replacing invalid UTF-8.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.data)
    }
}

impl From<Vec<u8>> for Body {
    fn from(data: Vec<u8>) -> Self {
        Self::new(data)
    }
}

impl From<&[u8]> for Body {
    fn from(data: &[u8]) -> Self {
        Self::new(data.to_vec())
    }
}

impl From<&str> for Body {
    fn from(s: &str) -> Self {
        Self::new(s.as_bytes().to_vec())
    }
}

impl From<String> for Body {
    fn from(s: String) -> Self {
        Self::new(s.into_bytes())
    }
}

/// A complete response. Only the response assembler constructs these, and only
/// once framing is complete, so a `Response` always has a status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status_line: StatusLine,
    headers: HeaderMap,
    body: Option<Body>,
}

impl Response {
    /// Empty bodies are stored as `None`.
    pub(crate) fn new(status_line: StatusLine, headers: HeaderMap, body: Vec<u8>) -> Self {
        let body = if body.is_empty() { None } else { Some(Body::new(body)) };
        Self {
            status_line,
            headers,
            body,
        }
    }

    pub fn status_line(&self) -> &StatusLine {
        &self.status_line
    }

    pub fn status_code(&self) -> u16 {
        self.status_line.code()
    }

    pub fn reason(&self) -> &str {
        self.status_line.reason()
    }

    pub fn version(&self) -> HttpVersion {
        self.status_line.version()
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Header value, or the empty string when absent.
    pub fn header(&self, name: &str) -> &str {
        self.headers.get_field(name)
    }

    pub fn content_type(&self) -> &str {
        self.headers.get_field("content-type")
    }

    pub fn content_length(&self) -> Option<usize> {
        self.headers.get("content-length").and_then(|v| v.parse().ok())
    }

    pub fn is_chunked(&self) -> bool {
        self.headers
            .get_field("transfer-encoding")
            .to_ascii_lowercase()
            .contains("chunked")
    }

    /// Raw body as received. For chunked responses the chunk framing is still present.
    pub fn body(&self) -> Option<&Body> {
        self.body.as_ref()
    }

    pub fn body_len(&self) -> usize {
        self.body.as_ref().map_or(0, Body::len)
    }

    pub fn into_body(self) -> Option<Body> {
        self.body
    }

    /// Body with chunk framing removed when the response was chunked.
    pub fn decoded_body(&self) -> Result<Vec<u8>> {
        let raw = self.body.as_ref().map_or(&[][..], Body::as_bytes);
        if self.is_chunked() {
            chunked::decode(raw)
        } else {
            Ok(raw.to_vec())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok_line() -> StatusLine {
        StatusLine::new(HttpVersion::Http11, 200, "OK")
    }

    #[test]
    fn empty_body_is_absent() {
        let r = Response::new(ok_line(), HeaderMap::new(), Vec::new());
        assert!(r.body().is_none());
        assert_eq!(r.body_len(), 0);
        assert_eq!(r.decoded_body().unwrap(), b"");
    }

    #[test]
    fn accessors() {
        let mut headers = HeaderMap::new();
        headers.set_field("Content-Type", "text/plain");
        headers.set_field("Content-Length", "5");
        let r = Response::new(ok_line(), headers, b"hello".to_vec());
        assert_eq!(r.status_code(), 200);
        assert_eq!(r.reason(), "OK");
        assert_eq!(r.content_type(), "text/plain");
        assert_eq!(r.content_length(), Some(5));
        assert!(!r.is_chunked());
        assert_eq!(r.body().unwrap().text(), "hello");
        assert_eq!(r.decoded_body().unwrap(), b"hello");
    }

    #[test]
    fn chunked_body_is_decoded_on_request() {
        let mut headers = HeaderMap::new();
        headers.set_field("Transfer-Encoding", "chunked");
        let r = Response::new(ok_line(), headers, b"5\r\nhello\r\n6\r\n world\r\n".to_vec());
        assert!(r.is_chunked());
        assert_eq!(r.body_len(), 21);
        assert_eq!(r.decoded_body().unwrap(), b"hello world");
    }
}
