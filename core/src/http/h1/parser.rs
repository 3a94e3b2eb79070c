/*
 * parser.rs
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

//! HTTP/1.x response assembler: status line, headers, body (Content-Length or chunked).
//!
//! Bytes arrive in arbitrary pieces. Each piece is appended to a single
//! receive buffer and the state machine advances as far as the buffered bytes
//! allow: `AwaitingHeaders -> AwaitingBody(framing) -> Complete`. "Not enough
//! data yet" is simply staying in the current state; `Err` always means the
//! input is malformed.

use std::io::{self, Read};

use bytes::BytesMut;

use crate::error::{HttpError, Result};
use crate::http::header::HeaderMap;
use crate::http::response::Response;
use crate::http::status::StatusLine;
use crate::http::h1::chunked;
use crate::search::{Pattern, CRLF, HEADER_END};

/// Initial receive buffer size.
pub const INITIAL_CAPACITY: usize = 64 * 1024;

/// Largest single read from the transport (one TLS record).
pub const READ_CHUNK: usize = 16 * 1024;

/// Growable byte region for one exchange. Capacity quadruples when full and
/// never shrinks.
#[derive(Debug)]
pub struct ReceiveBuffer {
    data: BytesMut,
}

impl ReceiveBuffer {
    pub fn new() -> Self {
        Self::with_capacity(INITIAL_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: BytesMut::with_capacity(capacity.max(1)),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    fn grow(&mut self) {
        let target = self.data.capacity().max(1) * 4;
        self.data.reserve(target - self.data.len());
    }

    pub fn extend(&mut self, chunk: &[u8]) {
        while self.data.len() + chunk.len() > self.data.capacity() {
            self.grow();
        }
        self.data.extend_from_slice(chunk);
    }

    /// One `read` call of at most `READ_CHUNK` bytes, appended to the buffer.
    pub fn read_from<R: Read + ?Sized>(&mut self, reader: &mut R) -> io::Result<usize> {
        let mut scratch = [0u8; READ_CHUNK];
        let n = reader.read(&mut scratch)?.min(READ_CHUNK);
        self.extend(&scratch[..n]);
        Ok(n)
    }
}

impl Default for ReceiveBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// How the end of the body is recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyFraming {
    /// Exactly this many bytes (always non-zero).
    ContentLength(usize),
    /// Chunks up to the zero-size last chunk; the `0\r\n\r\n` terminator only
    /// counts at a chunk boundary.
    Chunked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssemblyState {
    AwaitingHeaders,
    AwaitingBody(BodyFraming),
    Complete,
}

/// Incremental response reconstruction for one exchange.
#[derive(Debug)]
pub struct ResponseAssembler {
    state: AssemblyState,
    buffer: ReceiveBuffer,
    status_line: Option<StatusLine>,
    status_end: usize,
    headers: HeaderMap,
    body_start: usize,
    body_end: usize,
    /// Where the next boundary search resumes; in chunked mode, the next chunk-size line.
    scan_from: usize,
}

impl ResponseAssembler {
    pub fn new() -> Self {
        Self::with_capacity(INITIAL_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            state: AssemblyState::AwaitingHeaders,
            buffer: ReceiveBuffer::with_capacity(capacity),
            status_line: None,
            status_end: 0,
            headers: HeaderMap::new(),
            body_start: 0,
            body_end: 0,
            scan_from: 0,
        }
    }

    pub fn state(&self) -> AssemblyState {
        self.state
    }

    pub fn is_complete(&self) -> bool {
        self.state == AssemblyState::Complete
    }

    pub fn buffer(&self) -> &ReceiveBuffer {
        &self.buffer
    }

    /// Append a chunk and advance. Bytes arriving after completion are ignored.
    pub fn feed(&mut self, chunk: &[u8]) -> Result<AssemblyState> {
        if self.is_complete() {
            return Ok(self.state);
        }
        self.buffer.extend(chunk);
        self.advance()
    }

    /// Read once from `reader` into the receive buffer without advancing.
    /// Returns the byte count (0 at end of stream).
    pub fn receive_from<R: Read + ?Sized>(&mut self, reader: &mut R) -> io::Result<usize> {
        self.buffer.read_from(reader)
    }

    /// Advance the state machine over everything buffered so far.
    pub fn advance(&mut self) -> Result<AssemblyState> {
        loop {
            match self.state {
                AssemblyState::AwaitingHeaders => {
                    if !self.parse_head()? {
                        return Ok(self.state);
                    }
                }
                AssemblyState::AwaitingBody(BodyFraming::ContentLength(n)) => {
                    if self.buffer.len() - self.body_start < n {
                        return Ok(self.state);
                    }
                    self.complete(self.body_start + n);
                }
                AssemblyState::AwaitingBody(BodyFraming::Chunked) => match self.scan_chunks()? {
                    Some(end) => self.complete(end),
                    None => return Ok(self.state),
                },
                AssemblyState::Complete => return Ok(self.state),
            }
        }
    }

    /// Parse status line and header block if they are fully buffered.
    /// Returns false when more bytes are needed.
    fn parse_head(&mut self) -> Result<bool> {
        let data = self.buffer.as_slice();

        // The status line is checked as soon as it is complete so that garbage
        // is rejected without waiting for a header terminator that may never come.
        if self.status_line.is_none() {
            let eol = match Pattern::new(CRLF).find_first(data) {
                Some(n) => n,
                None => return Ok(false),
            };
            let line = String::from_utf8_lossy(&data[..eol]);
            self.status_line = Some(StatusLine::parse(&line)?);
            self.status_end = eol;
            self.scan_from = eol;
        }

        let head_end = match Pattern::new(HEADER_END).find_from(data, self.scan_from) {
            Some(n) => n,
            None => {
                self.scan_from = resume_point(data.len(), HEADER_END, self.status_end);
                return Ok(false);
            }
        };

        let block = String::from_utf8_lossy(&data[self.status_end + 2..head_end + 4]);
        self.headers = HeaderMap::parse(&block)?;
        self.body_start = head_end + 4;
        self.scan_from = self.body_start;

        match body_framing(&self.headers)? {
            Some(framing) => {
                log::debug!("headers complete, body framing {:?}", framing);
                self.state = AssemblyState::AwaitingBody(framing);
            }
            None => {
                log::debug!("headers complete, no body");
                self.complete(self.body_start);
            }
        }
        Ok(true)
    }

    /// Step over whole chunks starting at `scan_from`, which always sits on a
    /// chunk-size line. Returns the end of the raw payload once the zero-size
    /// chunk and its (possibly empty) trailer section are buffered.
    fn scan_chunks(&mut self) -> Result<Option<usize>> {
        let data = self.buffer.as_slice();
        let crlf = Pattern::new(CRLF);
        loop {
            let line_start = self.scan_from;
            let line_end = match crlf.find_from(data, line_start) {
                Some(n) => n,
                None => return Ok(None),
            };
            let size = chunked::parse_size(&data[line_start..line_end])?;
            if size == 0 {
                return Ok(Pattern::new(HEADER_END)
                    .find_from(data, line_end)
                    .map(|_| line_start));
            }
            let data_end = size
                .checked_add(line_end + 2)
                .ok_or_else(|| chunked::bad_size(&data[line_start..line_end]))?;
            if data.len() < data_end || data.len() - data_end < 2 {
                return Ok(None);
            }
            if &data[data_end..data_end + 2] != CRLF {
                return Err(HttpError::MalformedHeaderField(
                    "chunk data not followed by CRLF".to_string(),
                ));
            }
            self.scan_from = data_end + 2;
        }
    }

    fn complete(&mut self, body_end: usize) {
        self.body_end = body_end;
        self.state = AssemblyState::Complete;
    }

    /// Body bytes accumulated so far, capped at the framing boundary once known.
    pub fn body_bytes(&self) -> usize {
        match self.state {
            AssemblyState::AwaitingHeaders => 0,
            AssemblyState::AwaitingBody(BodyFraming::ContentLength(n)) => {
                (self.buffer.len() - self.body_start).min(n)
            }
            AssemblyState::AwaitingBody(BodyFraming::Chunked) => self.buffer.len() - self.body_start,
            AssemblyState::Complete => self.body_end - self.body_start,
        }
    }

    /// Take the finished response. Before completion this is `Incomplete` with
    /// the partial body count; no partially-built response is ever returned.
    pub fn finish(self) -> Result<Response> {
        let transferred = self.body_bytes();
        match (self.state, self.status_line) {
            (AssemblyState::Complete, Some(status_line)) => {
                let body = self.buffer.as_slice()[self.body_start..self.body_end].to_vec();
                Ok(Response::new(status_line, self.headers, body))
            }
            _ => Err(HttpError::Incomplete { transferred }),
        }
    }
}

impl Default for ResponseAssembler {
    fn default() -> Self {
        Self::new()
    }
}

/// Content-Length (non-zero) wins over chunked; neither means no body.
fn body_framing(headers: &HeaderMap) -> Result<Option<BodyFraming>> {
    if let Some(value) = headers.get("content-length") {
        let n: usize = value
            .parse()
            .map_err(|_| HttpError::MalformedHeaderField(format!("content-length: {}", value)))?;
        if n > 0 {
            return Ok(Some(BodyFraming::ContentLength(n)));
        }
    }
    if headers
        .get_field("transfer-encoding")
        .to_ascii_lowercase()
        .contains("chunked")
    {
        return Ok(Some(BodyFraming::Chunked));
    }
    Ok(None)
}

/// A match may straddle the end of the buffer; rescan the last `len - 1` bytes.
fn resume_point(buffered: usize, pattern: &[u8], floor: usize) -> usize {
    buffered.saturating_sub(pattern.len() - 1).max(floor)
}
