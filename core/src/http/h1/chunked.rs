/*
 * chunked.rs
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

//! Removal of chunked transfer-coding from an assembled body.
//!
//! The assembler stops before `0\r\n\r\n`, so the input normally ends right
//! after the CRLF of the last data chunk. A trailing zero-size chunk (with or
//! without trailers) is also accepted.

use bytes::{Buf, BufMut, BytesMut};

use crate::error::{HttpError, Result};
use crate::search::{Pattern, CRLF};

pub fn decode(raw: &[u8]) -> Result<Vec<u8>> {
    let crlf = Pattern::new(CRLF);
    let mut out = BytesMut::with_capacity(raw.len());
    let mut buf = raw;

    while !buf.is_empty() {
        let line_end = match crlf.find_first(buf) {
            Some(n) => n,
            None => return Err(bad_size(buf)),
        };
        let size = parse_size(&buf[..line_end])?;
        buf.advance(line_end + 2);
        if size == 0 {
            // Last chunk; anything left is trailer fields.
            break;
        }
        if buf.len() < size {
            return Err(HttpError::Incomplete {
                transferred: out.len() + buf.len(),
            });
        }
        out.put_slice(&buf[..size]);
        buf.advance(size);
        if buf.starts_with(CRLF) {
            buf.advance(2);
        } else if !buf.is_empty() {
            return Err(HttpError::MalformedHeaderField(
                "chunk data not followed by CRLF".to_string(),
            ));
        }
    }
    Ok(out.to_vec())
}

/// Hex chunk size, ignoring `;extension` parameters.
pub(crate) fn parse_size(line: &[u8]) -> Result<usize> {
    let text = std::str::from_utf8(line).map_err(|_| bad_size(line))?;
    let hex = text.split(';').next().unwrap_or(text).trim();
    usize::from_str_radix(hex, 16).map_err(|_| bad_size(line))
}

pub(crate) fn bad_size(line: &[u8]) -> HttpError {
    let shown = &line[..line.len().min(32)];
    HttpError::MalformedHeaderField(format!("chunk size {:?}", String::from_utf8_lossy(shown)))
}
