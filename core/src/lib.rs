/*
 * lib.rs
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

//! lwhttp core: a minimal blocking HTTP/1.x client over plain TCP and TLS.
//!
//! ```no_run
//! use lwhttp_core::HttpClient;
//!
//! let client = HttpClient::builder().user_agent("fetch/1").build();
//! let (len, response) = client.get("https://example.com/")?;
//! println!("{} {} ({} bytes)", response.status_code(), response.reason(), len);
//! # Ok::<(), lwhttp_core::HttpError>(())
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod net;
pub mod search;
pub mod uri;

pub use config::{ClientConfig, RedirectPolicy};
pub use error::{HttpError, Result};
pub use http::{
    Body, ClientBuilder, HeaderMap, HttpClient, HttpVersion, Method, Request, RequestBuilder,
    Response, StatusLine,
};
pub use uri::{Scheme, Url};
