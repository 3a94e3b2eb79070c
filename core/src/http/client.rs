/*
 * client.rs
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

//! HTTP client: `send(request)` connects by URL scheme, performs one exchange
//! and closes the connection.

use std::time::Instant;

use crate::config::{ClientConfig, RedirectPolicy};
use crate::error::Result;
use crate::http::connection::HttpConnection;
use crate::http::request::Request;
use crate::http::response::Response;
use crate::net::{self, Transport};
use crate::uri::Url;

/// Blocking HTTP/1.x client. Each `send` owns its own socket and receive buffer,
/// so one client may be shared between threads.
#[derive(Debug, Clone, Default)]
pub struct HttpClient {
    config: ClientConfig,
}

impl HttpClient {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Send `request` and block until the response is complete.
    ///
    /// Returns the body byte count and the response. On failure no response
    /// exists; `HttpError::bytes_transferred` gives the partial count.
    pub fn send(&self, request: &Request) -> Result<(usize, Response)> {
        let timeout = self.config.timeout();
        let deadline = timeout.map(|t| Instant::now() + t);
        let url = request.url();
        let stream = net::connect(url, timeout)?;
        log::debug!(
            "connected to {}:{} ({})",
            url.host(),
            url.port(),
            url.scheme().as_str()
        );

        let mut conn = HttpConnection::new(stream).with_deadline(deadline);
        let result = conn.send(request, &self.config.user_agent);
        if let Err(e) = conn.get_mut().close() {
            log::debug!("close failed: {}", e);
        }
        result
    }

    /// GET `url` with default headers.
    pub fn get(&self, url: &str) -> Result<(usize, Response)> {
        let url = Url::parse(url)?;
        self.send(&Request::get(url))
    }
}

/// Builder for HttpClient. Starts from `ClientConfig::default()`.
#[derive(Debug, Clone, Default)]
pub struct ClientBuilder {
    config: ClientConfig,
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a loaded configuration.
    pub fn from_config(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn redirect(&mut self, policy: RedirectPolicy) -> &mut Self {
        self.config.redirect = policy;
        self
    }

    pub fn user_agent(&mut self, agent: impl Into<String>) -> &mut Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Timeout in seconds; 0 leaves the current value.
    pub fn timeout(&mut self, secs: u32) -> &mut Self {
        if secs > 0 {
            self.config.timeout_secs = secs;
        }
        self
    }

    pub fn build(&self) -> HttpClient {
        HttpClient::new(self.config.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HttpError;
    use std::net::TcpListener;

    #[test]
    fn builder_sets_options() {
        let client = HttpClient::builder()
            .redirect(RedirectPolicy::Never)
            .user_agent("fetch/2")
            .timeout(30)
            .build();
        assert_eq!(client.config().redirect, RedirectPolicy::Never);
        assert_eq!(client.config().user_agent, "fetch/2");
        assert_eq!(client.config().timeout_secs, 30);
    }

    #[test]
    fn zero_timeout_is_ignored_by_builder() {
        let client = HttpClient::builder().timeout(0).build();
        assert_eq!(client.config().timeout_secs, 5);
        let client = ClientBuilder::from_config(ClientConfig {
            timeout_secs: 9,
            ..ClientConfig::default()
        })
        .timeout(0)
        .build();
        assert_eq!(client.config().timeout_secs, 9);
    }

    #[test]
    fn refused_connection_sends_nothing() {
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let client = HttpClient::default();
        let err = client.get(&format!("http://127.0.0.1:{}/", port)).unwrap_err();
        assert!(matches!(err, HttpError::ConnectFailure { .. }));
        assert_eq!(err.bytes_transferred(), 0);
    }

    #[test]
    fn bad_url_fails_before_connecting() {
        let err = HttpClient::default().get("ftp://example.com/").unwrap_err();
        assert!(matches!(err, HttpError::InvalidUrl(_)));
    }
}
