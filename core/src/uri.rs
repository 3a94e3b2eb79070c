/*
 * uri.rs
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

//! URL parsing and serialization for http and https targets.
//!
//! Grammar: `scheme://[userinfo@]host[:port][/path][?query]`. Optional segments
//! are accepted on input; `serialize()` emits the minimal form (default port
//! dropped, `?` only when a query exists, path always present).

use std::fmt;
use std::str::FromStr;

use crate::error::{HttpError, Result};

/// Supported URL schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scheme {
    Http,
    Https,
}

impl Scheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }

    pub fn default_port(&self) -> u16 {
        match self {
            Scheme::Http => 80,
            Scheme::Https => 443,
        }
    }

    pub fn is_secure(&self) -> bool {
        matches!(self, Scheme::Https)
    }
}

/// A parsed http/https URL. Host is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Url {
    scheme: Scheme,
    userinfo: Option<String>,
    host: String,
    port: u16,
    path: String,
    query: Option<String>,
}

fn invalid(input: &str, why: &str) -> HttpError {
    HttpError::InvalidUrl(format!("{}: {}", why, input))
}

impl Url {
    pub fn parse(input: &str) -> Result<Self> {
        if input.chars().any(char::is_whitespace) {
            return Err(invalid(input, "whitespace not allowed"));
        }
        let (scheme_str, rest) = input
            .split_once("://")
            .ok_or_else(|| invalid(input, "missing scheme"))?;
        let scheme = match scheme_str {
            "http" => Scheme::Http,
            "https" => Scheme::Https,
            _ => return Err(invalid(input, "only http and https are supported")),
        };

        let authority_end = rest.find(['/', '?']).unwrap_or(rest.len());
        let (authority, tail) = rest.split_at(authority_end);

        let (userinfo, host_port) = match authority.rsplit_once('@') {
            Some((info, _)) if info.is_empty() => {
                return Err(invalid(input, "empty userinfo"));
            }
            Some((info, hp)) => (Some(info.to_string()), hp),
            None => (None, authority),
        };

        let (host, port_str) = split_host_port(host_port).ok_or_else(|| invalid(input, "bad host"))?;
        if host.is_empty() {
            return Err(invalid(input, "host is essential"));
        }
        let port = match port_str {
            Some(p) => p
                .parse::<u16>()
                .ok()
                .filter(|p| *p != 0)
                .ok_or_else(|| invalid(input, "bad port"))?,
            None => scheme.default_port(),
        };

        let (path, query) = match tail.split_once('?') {
            Some((p, q)) => (p, Some(q)),
            None => (tail, None),
        };
        let path = if path.is_empty() { "/" } else { path };
        let query = query.filter(|q| !q.is_empty()).map(str::to_string);

        Ok(Self {
            scheme,
            userinfo,
            host: host.to_string(),
            port,
            path: path.to_string(),
            query,
        })
    }

    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    /// Userinfo exactly as written (e.g. `user:pass` or a bare token).
    pub fn userinfo(&self) -> Option<&str> {
        self.userinfo.as_deref()
    }

    /// Host without IPv6 brackets.
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Raw query, without the leading `?`.
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn has_default_port(&self) -> bool {
        self.port == self.scheme.default_port()
    }

    /// Host as it appears in an authority: IPv6 literals are bracketed.
    pub fn host_for_authority(&self) -> String {
        if self.host.contains(':') {
            format!("[{}]", self.host)
        } else {
            self.host.clone()
        }
    }

    /// Value for the `Host` request header: port only when not the scheme default.
    pub fn host_header(&self) -> String {
        if self.has_default_port() {
            self.host_for_authority()
        } else {
            format!("{}:{}", self.host_for_authority(), self.port)
        }
    }

    /// `path[?query]` as used in the request line.
    pub fn request_target(&self) -> String {
        match &self.query {
            Some(q) => format!("{}?{}", self.path, q),
            None => self.path.clone(),
        }
    }

    pub fn serialize(&self) -> String {
        let mut out = String::with_capacity(self.host.len() + self.path.len() + 16);
        out.push_str(self.scheme.as_str());
        out.push_str("://");
        if let Some(info) = &self.userinfo {
            out.push_str(info);
            out.push('@');
        }
        out.push_str(&self.host_header());
        out.push_str(&self.request_target());
        out
    }
}

/// Split `host[:port]` or `[v6]:port`. Returns None on an unterminated bracket
/// or junk after the bracket.
fn split_host_port(s: &str) -> Option<(&str, Option<&str>)> {
    if let Some(bracketed) = s.strip_prefix('[') {
        let close = bracketed.find(']')?;
        let host = &bracketed[..close];
        let after = &bracketed[close + 1..];
        if after.is_empty() {
            return Some((host, None));
        }
        return after.strip_prefix(':').map(|p| (host, Some(p)));
    }
    let (host, port) = match s.rsplit_once(':') {
        Some((h, p)) => (h, Some(p)),
        None => (s, None),
    };
    if host.contains([':', '[', ']']) {
        return None;
    }
    Some((host, port))
}

impl FromStr for Url {
    type Err = HttpError;

    fn from_str(s: &str) -> Result<Self> {
        Url::parse(s)
    }
}

impl fmt::Display for Url {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize())
    }
}
