/*
 * net.rs
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

//! Transports: blocking TCP and TLS (rustls) streams behind one `Transport` trait.
//!
//! A connection is plain or secure; TLS handshakes immediately after the TCP
//! connect, before anything is written. The connector is chosen by URL scheme.

use std::io::{self, Read, Write};
use std::net::{IpAddr, Shutdown, SocketAddr, TcpStream, ToSocketAddrs};
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use rustls::pki_types::ServerName;
use rustls::{ClientConfig, ClientConnection, RootCertStore, StreamOwned};

use crate::error::{HttpError, Result};
use crate::uri::{Scheme, Url};

/// A connected byte stream: write, read, close.
///
/// `read` follows `std::io::Read`: `Ok(0)` at end of stream, `WouldBlock`,
/// `TimedOut` or `Interrupted` for transient conditions, any other error is hard.
pub trait Transport: Read + Write {
    /// Orderly shutdown. TLS sends close_notify first.
    fn close(&mut self) -> io::Result<()>;
}

/// Build a root certificate store: platform native certs first, then webpki-roots as fallback.
fn build_root_store() -> RootCertStore {
    let mut root_store = RootCertStore::empty();
    if let Ok(certs) = rustls_native_certs::load_native_certs() {
        for cert in certs {
            let _ = root_store.add(cert);
        }
    }
    if root_store.is_empty() {
        root_store.roots = webpki_roots::TLS_SERVER_ROOTS.iter().cloned().collect();
    }
    root_store
}

/// TLS client config for HTTP/1.1 (ALPN `http/1.1`, no client auth).
pub fn http_client_config() -> Arc<ClientConfig> {
    let mut config = ClientConfig::builder()
        .with_root_certificates(build_root_store())
        .with_no_client_auth();
    config.alpn_protocols = vec![b"http/1.1".to_vec()];
    Arc::new(config)
}

/// Candidate addresses for `host`: a literal IPv4/IPv6 address directly,
/// otherwise name resolution in resolver order.
pub fn resolve(host: &str, port: u16) -> io::Result<Vec<SocketAddr>> {
    if let Ok(ip) = host.parse::<IpAddr>() {
        return Ok(vec![SocketAddr::new(ip, port)]);
    }
    let addrs: Vec<SocketAddr> = (host, port).to_socket_addrs()?.collect();
    if addrs.is_empty() {
        return Err(io::Error::new(io::ErrorKind::NotFound, "host has no addresses"));
    }
    Ok(addrs)
}

/// TCP connect to `host`, trying each resolved candidate in turn. `timeout`
/// bounds each attempt and becomes the socket read/write timeout.
pub fn connect_tcp(host: &str, port: u16, timeout: Option<Duration>) -> Result<TcpStream> {
    let failure = |source: io::Error| HttpError::ConnectFailure {
        host: host.to_string(),
        port,
        source,
    };
    let addrs = resolve(host, port).map_err(failure)?;
    let stream = connect_any(&addrs, timeout).map_err(failure)?;
    stream.set_read_timeout(timeout)?;
    stream.set_write_timeout(timeout)?;
    let _ = stream.set_nodelay(true);
    Ok(stream)
}

/// First candidate that accepts the connection, in order; otherwise the last error.
pub fn connect_any(addrs: &[SocketAddr], timeout: Option<Duration>) -> io::Result<TcpStream> {
    let mut last_err = None;
    for addr in addrs {
        log::debug!("connecting to {}", addr);
        let attempt = match timeout {
            Some(t) => TcpStream::connect_timeout(addr, t),
            None => TcpStream::connect(addr),
        };
        match attempt {
            Ok(stream) => return Ok(stream),
            Err(e) => {
                log::debug!("connect to {} failed: {}", addr, e);
                last_err = Some(e);
            }
        }
    }
    Err(last_err.unwrap_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no address to connect to")))
}

/// Blocking TLS stream (rustls client connection over TcpStream).
pub struct TlsStream {
    inner: StreamOwned<ClientConnection, TcpStream>,
}

impl TlsStream {
    /// Run the handshake to completion over an already-connected socket.
    pub fn handshake(mut tcp: TcpStream, host: &str, config: Arc<ClientConfig>) -> Result<Self> {
        let failure = |reason: String| HttpError::TlsHandshakeFailure {
            host: host.to_string(),
            reason,
        };
        let server_name = ServerName::try_from(host)
            .map_err(|_| failure("invalid host name".to_string()))?
            .to_owned();
        let mut conn = ClientConnection::new(config, server_name).map_err(|e| failure(e.to_string()))?;
        while conn.is_handshaking() {
            conn.complete_io(&mut tcp).map_err(|e| failure(e.to_string()))?;
        }
        log::debug!(
            "TLS established with {} ({:?})",
            host,
            conn.protocol_version()
        );
        Ok(Self {
            inner: StreamOwned::new(conn, tcp),
        })
    }

    pub fn get_ref(&self) -> &TcpStream {
        &self.inner.sock
    }
}

impl Read for TlsStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl Write for TlsStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

impl Transport for TlsStream {
    fn close(&mut self) -> io::Result<()> {
        self.inner.conn.send_close_notify();
        let notified = (|| {
            while self.inner.conn.wants_write() {
                self.inner.conn.write_tls(&mut self.inner.sock)?;
            }
            Ok::<(), io::Error>(())
        })();
        if let Err(e) = &notified {
            log::warn!("TLS close_notify not delivered: {}", e);
        }
        self.inner.sock.shutdown(Shutdown::Both)
    }
}

impl Transport for TcpStream {
    fn close(&mut self) -> io::Result<()> {
        self.shutdown(Shutdown::Both)
    }
}

/// Unified stream: plain TCP or TLS.
pub enum HttpStream {
    Plain(TcpStream),
    Tls(Box<TlsStream>),
}

impl HttpStream {
    pub fn is_secure(&self) -> bool {
        matches!(self, HttpStream::Tls(_))
    }
}

impl Read for HttpStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            HttpStream::Plain(s) => s.read(buf),
            HttpStream::Tls(s) => s.read(buf),
        }
    }
}

impl Write for HttpStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            HttpStream::Plain(s) => s.write(buf),
            HttpStream::Tls(s) => s.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            HttpStream::Plain(s) => s.flush(),
            HttpStream::Tls(s) => s.flush(),
        }
    }
}

impl Transport for HttpStream {
    fn close(&mut self) -> io::Result<()> {
        match self {
            HttpStream::Plain(s) => Transport::close(s),
            HttpStream::Tls(s) => s.close(),
        }
    }
}

/// Opens connections for one scheme. One shared instance per scheme exists per
/// process; the TLS one owns the rustls config (root store is loaded once).
pub enum Connector {
    Plain,
    Tls(Arc<ClientConfig>),
}

static PLAIN_CONNECTOR: OnceLock<Connector> = OnceLock::new();
static TLS_CONNECTOR: OnceLock<Connector> = OnceLock::new();

impl Connector {
    /// Lazily created process-wide connector for `scheme`.
    pub fn shared(scheme: Scheme) -> &'static Connector {
        match scheme {
            Scheme::Http => PLAIN_CONNECTOR.get_or_init(|| Connector::Plain),
            Scheme::Https => TLS_CONNECTOR.get_or_init(|| Connector::Tls(http_client_config())),
        }
    }

    pub fn connect(&self, host: &str, port: u16, timeout: Option<Duration>) -> Result<HttpStream> {
        let tcp = connect_tcp(host, port, timeout)?;
        match self {
            Connector::Plain => Ok(HttpStream::Plain(tcp)),
            Connector::Tls(config) => {
                let tls = TlsStream::handshake(tcp, host, Arc::clone(config))?;
                Ok(HttpStream::Tls(Box::new(tls)))
            }
        }
    }
}

/// Connect to the URL's host and port with the connector for its scheme.
pub fn connect(url: &Url, timeout: Option<Duration>) -> Result<HttpStream> {
    Connector::shared(url.scheme()).connect(url.host(), url.port(), timeout)
}
