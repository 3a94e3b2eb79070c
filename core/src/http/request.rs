/*
 * request.rs
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

//! HTTP request: method, target URL, version, headers, optional body.
//!
//! Built via RequestBuilder; `encode` produces the bytes written to the transport.

use crate::error::{HttpError, Result};
use crate::http::header::HeaderMap;
use crate::http::response::Body;
use crate::http::status::HttpVersion;
use crate::uri::Url;

/// HTTP request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

/// An immutable request. The client reads it; nothing mutates it after `build()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    method: Method,
    url: Url,
    version: HttpVersion,
    headers: HeaderMap,
    body: Option<Body>,
}

impl Request {
    pub fn builder() -> RequestBuilder {
        RequestBuilder::new()
    }

    /// GET with no extra headers.
    pub fn get(url: Url) -> Self {
        Self {
            method: Method::Get,
            url,
            version: HttpVersion::Http11,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn version(&self) -> HttpVersion {
        self.version
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> Option<&Body> {
        self.body.as_ref()
    }

    /// `METHOD SP path[?query] SP HTTP/version CRLF`
    pub fn request_line(&self) -> String {
        format!(
            "{} {} {}\r\n",
            self.method.as_str(),
            self.url.request_target(),
            self.version.as_str()
        )
    }

    /// Headers as sent: Host always from the URL; User-Agent, Accept,
    /// Content-Length and Connection filled in only when the caller left them unset.
    pub fn effective_headers(&self, user_agent: &str) -> HeaderMap {
        let mut headers = self.headers.clone();
        headers.set_field("host", self.url.host_header());
        if !headers.contains("user-agent") {
            headers.set_field("user-agent", user_agent);
        }
        if !headers.contains("accept") {
            headers.set_field("accept", "*/*");
        }
        if let Some(body) = self.body.as_ref().filter(|b| !b.is_empty()) {
            if !headers.contains("content-length") {
                headers.set_field("content-length", body.len().to_string());
            }
        }
        if !headers.contains("connection") {
            headers.set_field("connection", "close");
        }
        headers
    }

    /// Request line, header block and body, ready to write. Fails with
    /// `MalformedHeaderField` when a field would break the header block.
    pub fn encode(&self, user_agent: &str) -> Result<Vec<u8>> {
        let headers = self.effective_headers(user_agent);
        headers.validate()?;
        let head = self.request_line() + &headers.serialize();
        let body = self.body.as_ref().map_or(&[][..], Body::as_bytes);
        let mut out = Vec::with_capacity(head.len() + body.len());
        out.extend_from_slice(head.as_bytes());
        out.extend_from_slice(body);
        Ok(out)
    }
}

/// Mutable request builder: url, method, version, headers, body.
#[derive(Debug, Clone, Default)]
pub struct RequestBuilder {
    url: Option<Url>,
    method: Method,
    version: HttpVersion,
    headers: HeaderMap,
    body: Option<Body>,
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn url(&mut self, url: Url) -> &mut Self {
        self.url = Some(url);
        self
    }

    pub fn method(&mut self, method: Method) -> &mut Self {
        self.method = method;
        self
    }

    pub fn get(&mut self) -> &mut Self {
        self.method(Method::Get)
    }

    pub fn post(&mut self, body: impl Into<Body>) -> &mut Self {
        self.body = Some(body.into());
        self.method(Method::Post)
    }

    pub fn put(&mut self, body: impl Into<Body>) -> &mut Self {
        self.body = Some(body.into());
        self.method(Method::Put)
    }

    pub fn delete(&mut self) -> &mut Self {
        self.method(Method::Delete)
    }

    pub fn version(&mut self, version: HttpVersion) -> &mut Self {
        self.version = version;
        self
    }

    /// Add or replace a header. Comparison is case-insensitive.
    pub fn header(&mut self, name: &str, value: impl Into<String>) -> &mut Self {
        self.headers.set_field(name, value);
        self
    }

    /// Replace the whole header map.
    pub fn headers(&mut self, headers: HeaderMap) -> &mut Self {
        self.headers = headers;
        self
    }

    pub fn build(&self) -> Result<Request> {
        let url = self
            .url
            .clone()
            .ok_or_else(|| HttpError::InvalidUrl("request has no URL".to_string()))?;
        self.headers.validate()?;
        Ok(Request {
            method: self.method,
            url,
            version: self.version,
            headers: self.headers.clone(),
            body: self.body.clone(),
        })
    }
}
