/*
 * connection.rs
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

//! HTTP connection: one request/response exchange over a connected stream.
//!
//! The request is written and flushed in full, then the stream is read into a
//! `ResponseAssembler` until the response is complete, the stream ends, or a
//! hard error occurs. Works over any `Read + Write`, so the plain and TLS
//! transports share the loop.

use std::io::{self, Read, Write};
use std::time::Instant;

use crate::error::{HttpError, Result};
use crate::http::h1::{AssemblyState, ResponseAssembler};
use crate::http::request::Request;
use crate::http::response::Response;

pub struct HttpConnection<S> {
    stream: S,
    deadline: Option<Instant>,
}

impl<S: Read + Write> HttpConnection<S> {
    pub fn new(stream: S) -> Self {
        Self {
            stream,
            deadline: None,
        }
    }

    /// Give up reading once `deadline` has passed. `None` blocks indefinitely.
    pub fn with_deadline(mut self, deadline: Option<Instant>) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn get_ref(&self) -> &S {
        &self.stream
    }

    pub fn get_mut(&mut self) -> &mut S {
        &mut self.stream
    }

    pub fn into_inner(self) -> S {
        self.stream
    }

    /// Write the request, then read until the response is complete.
    /// Returns the body byte count with the response.
    pub fn send(&mut self, request: &Request, user_agent: &str) -> Result<(usize, Response)> {
        self.write_request(request, user_agent)?;
        let response = self.read_response()?;
        Ok((response.body_len(), response))
    }

    fn write_request(&mut self, request: &Request, user_agent: &str) -> Result<()> {
        let wire = request.encode(user_agent)?;
        log::debug!(
            "sending {}",
            request.request_line().trim_end()
        );
        self.stream.write_all(&wire)?;
        self.stream.flush()?;
        Ok(())
    }

    fn read_response(&mut self) -> Result<Response> {
        let mut assembler = ResponseAssembler::new();
        loop {
            match assembler.receive_from(&mut self.stream) {
                Ok(0) => {
                    log::debug!("stream ended in state {:?}", assembler.state());
                    return assembler.finish();
                }
                Ok(n) => {
                    log::trace!("read {} bytes", n);
                    if assembler.advance()? == AssemblyState::Complete {
                        return assembler.finish();
                    }
                }
                Err(e) if is_transient(&e) => {
                    if self.deadline_passed() {
                        log::debug!("deadline passed in state {:?}", assembler.state());
                        return Err(HttpError::Incomplete {
                            transferred: assembler.body_bytes(),
                        });
                    }
                }
                Err(e) => {
                    log::debug!("read failed in state {:?}: {}", assembler.state(), e);
                    return Err(HttpError::Incomplete {
                        transferred: assembler.body_bytes(),
                    });
                }
            }
        }
    }

    fn deadline_passed(&self) -> bool {
        self.deadline.map_or(false, |d| Instant::now() >= d)
    }
}

fn is_transient(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut | io::ErrorKind::Interrupted
    )
}
