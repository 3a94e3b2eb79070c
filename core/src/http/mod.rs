/*
 * mod.rs
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

//! HTTP/1.x client: request encoding, incremental response assembly, blocking exchange.
//!
//! - Buffers: `bytes` crate (BytesMut for the receive buffer).
//! - Response framing by Content-Length or chunked terminator; the chunked payload is
//!   kept raw, `Response::decoded_body` strips the framing on request.
//! - One connection per request (`Connection: close`); no redirects, no keep-alive.

pub mod header;
pub mod status;

mod request;
mod response;

pub mod h1;

pub use header::HeaderMap;
pub use request::{Method, Request, RequestBuilder};
pub use response::{Body, Response};
pub use status::{canonical_reason, HttpVersion, StatusLine};

pub mod client;
pub mod connection;

pub use client::{ClientBuilder, HttpClient};
pub use connection::HttpConnection;
