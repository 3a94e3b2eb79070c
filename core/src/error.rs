/*
 * error.rs
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

//! Errors from URL parsing, response parsing, and transport operations.

use std::io;

/// Errors returned by every fallible operation in this crate.
///
/// Parse failures are permanent: the assembler never reports "need more
/// bytes" through this type, it simply stays in its current state.
#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    /// URL string does not match `scheme://[userinfo@]host[:port][/path][?query]`
    /// or uses a scheme other than http/https.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("malformed status line: {0:?}")]
    MalformedStatusLine(String),

    /// A header line without a `:`, or a framing header whose value cannot be used.
    #[error("malformed header field: {0:?}")]
    MalformedHeaderField(String),

    /// Name resolution failed or no candidate address accepted the connection.
    #[error("cannot connect to {host}:{port}: {source}")]
    ConnectFailure {
        host: String,
        port: u16,
        #[source]
        source: io::Error,
    },

    #[error("TLS handshake with {host} failed: {reason}")]
    TlsHandshakeFailure { host: String, reason: String },

    #[error("I/O failure: {0}")]
    IoFailure(#[from] io::Error),

    /// The stream ended, failed or timed out before the response framing completed.
    /// `transferred` is the number of body bytes accumulated (0 if headers never completed).
    #[error("incomplete response: stream ended after {transferred} body bytes")]
    Incomplete { transferred: usize },
}

impl HttpError {
    /// Body bytes received before the failure. Zero for every kind except `Incomplete`.
    pub fn bytes_transferred(&self) -> usize {
        match self {
            HttpError::Incomplete { transferred } => *transferred,
            _ => 0,
        }
    }
}

pub type Result<T> = std::result::Result<T, HttpError>;
