/*
 * status.rs
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

//! Status line and protocol version.

use std::fmt;

use crate::error::{HttpError, Result};

/// Protocol version on the request or status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HttpVersion {
    Http10,
    #[default]
    Http11,
    Http2,
}

impl HttpVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpVersion::Http10 => "HTTP/1.0",
            HttpVersion::Http11 => "HTTP/1.1",
            HttpVersion::Http2 => "HTTP/2",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "HTTP/1.0" => Some(HttpVersion::Http10),
            "HTTP/1.1" => Some(HttpVersion::Http11),
            "HTTP/2" | "HTTP/2.0" => Some(HttpVersion::Http2),
            _ => None,
        }
    }
}

impl fmt::Display for HttpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reason phrase this crate expects for `code`, if the code is known.
pub fn canonical_reason(code: u16) -> Option<&'static str> {
    let reason = match code {
        100 => "Continue",
        101 => "Switching Protocols",
        102 => "Processing",
        103 => "Checkpoint",
        200 => "OK",
        201 => "Created",
        202 => "Accepted",
        203 => "Non-Authoritative Information",
        204 => "No Content",
        205 => "Reset Content",
        206 => "Partial Content",
        207 => "Multi-Status",
        208 => "Already Reported",
        226 => "IM Used",
        300 => "Multiple Choices",
        301 => "Moved Permanently",
        302 => "Found",
        303 => "See Other",
        304 => "Not Modified",
        307 => "Temporary Redirect",
        308 => "Permanent Redirect",
        400 => "Bad Request",
        401 => "Unauthorized",
        402 => "Payment Required",
        403 => "Forbidden",
        404 => "Not Found",
        405 => "Method Not Allowed",
        406 => "Not Acceptable",
        407 => "Proxy Authentication Required",
        408 => "Request Timeout",
        409 => "Conflict",
        410 => "Gone",
        411 => "Length Required",
        412 => "Precondition Failed",
        413 => "Payload Too Large",
        414 => "URI Too Long",
        415 => "Unsupported Media Type",
        416 => "Requested Range Not Satisfiable",
        417 => "Expectation Failed",
        418 => "I'm a teapot",
        422 => "Unprocessable Entity",
        423 => "Locked",
        424 => "Failed Dependency",
        425 => "Too Early",
        426 => "Upgrade Required",
        428 => "Precondition Required",
        429 => "Too Many Requests",
        431 => "Request Header Fields Too Large",
        451 => "Unavailable For Legal Reasons",
        500 => "Internal Server Error",
        501 => "Not Implemented",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        504 => "Gateway Timeout",
        505 => "HTTP Version Not Supported",
        506 => "Variant Also Negotiates",
        507 => "Insufficient Storage",
        508 => "Loop Detected",
        509 => "Bandwidth Limit Exceeded",
        510 => "Not Extended",
        511 => "Network Authentication Required",
        _ => return None,
    };
    Some(reason)
}

/// `HTTP/version SP code SP reason`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    version: HttpVersion,
    code: u16,
    reason: String,
}

impl StatusLine {
    pub fn new(version: HttpVersion, code: u16, reason: impl Into<String>) -> Self {
        Self {
            version,
            code,
            reason: reason.into(),
        }
    }

    /// Parse a status line without its CRLF (a trailing `\r` is tolerated).
    ///
    /// Version, a three-digit code and the separator before the reason are
    /// required. A reason that differs from `canonical_reason` is only logged.
    pub fn parse(line: &str) -> Result<Self> {
        let malformed = || HttpError::MalformedStatusLine(line.to_string());
        let text = line.strip_suffix('\r').unwrap_or(line);

        let (version, rest) = text.split_once(' ').ok_or_else(malformed)?;
        let version = HttpVersion::parse(version).ok_or_else(malformed)?;
        let rest = rest.trim_start_matches(' ');
        let (code, reason) = rest.split_once(' ').ok_or_else(malformed)?;
        if code.len() != 3 || !code.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }
        let code: u16 = code.parse().map_err(|_| malformed())?;
        let reason = reason.trim_start_matches(' ');

        match canonical_reason(code) {
            Some(expected) if expected.eq_ignore_ascii_case(reason) => {}
            Some(expected) => {
                log::warn!("reason phrase {:?} for {} differs from {:?}", reason, code, expected);
            }
            None => log::warn!("unknown status code {} ({:?})", code, reason),
        }

        Ok(Self::new(version, code, reason))
    }

    pub fn version(&self) -> HttpVersion {
        self.version
    }

    pub fn code(&self) -> u16 {
        self.code
    }

    /// Reason phrase as sent by the server.
    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.code)
    }
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.version, self.code, self.reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ordinary_lines() {
        let s = StatusLine::parse("HTTP/1.1 200 OK").unwrap();
        assert_eq!(s.version(), HttpVersion::Http11);
        assert_eq!(s.code(), 200);
        assert_eq!(s.reason(), "OK");
        assert!(s.is_success());

        let s = StatusLine::parse("HTTP/1.0 404 Not Found\r").unwrap();
        assert_eq!(s.version(), HttpVersion::Http10);
        assert_eq!(s.reason(), "Not Found");
        assert!(!s.is_success());
    }

    #[test]
    fn unknown_code_and_odd_reason_are_carried_through() {
        let s = StatusLine::parse("HTTP/1.1 299 Whatever").unwrap();
        assert_eq!(s.code(), 299);
        assert_eq!(s.reason(), "Whatever");

        let s = StatusLine::parse("HTTP/1.1 200 Fine Thanks").unwrap();
        assert_eq!(s.reason(), "Fine Thanks");

        let s = StatusLine::parse("HTTP/2 204 ").unwrap();
        assert_eq!(s.version(), HttpVersion::Http2);
        assert_eq!(s.reason(), "");
    }

    #[test]
    fn rejects_malformed_lines() {
        for bad in [
            "GARBAGE",
            "",
            "HTTP/1.1",
            "HTTP/1.1 200",
            "HTTP/1.1 abc OK",
            "HTTP/1.1 20 OK",
            "HTTP/1.1 2000 OK",
            "HTTP/3.5 200 OK",
            "ICY 200 OK",
        ] {
            assert!(
                matches!(StatusLine::parse(bad), Err(HttpError::MalformedStatusLine(_))),
                "{:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn reason_table() {
        assert_eq!(canonical_reason(200), Some("OK"));
        assert_eq!(canonical_reason(418), Some("I'm a teapot"));
        assert_eq!(canonical_reason(509), Some("Bandwidth Limit Exceeded"));
        assert_eq!(canonical_reason(299), None);
    }

    #[test]
    fn display_round_trips() {
        let line = "HTTP/1.1 301 Moved Permanently";
        assert_eq!(StatusLine::parse(line).unwrap().to_string(), line);
    }
}
