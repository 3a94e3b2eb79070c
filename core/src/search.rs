/*
 * search.rs
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

//! Knuth-Morris-Pratt byte search: O(pattern) preprocessing, O(data) scan.
//!
//! Used to find `\r\n`, `\r\n\r\n` and the chunked terminator `0\r\n\r\n` in
//! receive buffers. Absence is `None`, never an error: the caller reads more
//! and searches again.

/// CRLF line terminator.
pub const CRLF: &[u8] = b"\r\n";
/// End of the header block.
pub const HEADER_END: &[u8] = b"\r\n\r\n";
/// Last chunk plus empty trailer of a chunked body.
pub const CHUNKED_END: &[u8] = b"0\r\n\r\n";

/// A needle with its precomputed longest-proper-prefix-suffix table.
#[derive(Debug, Clone)]
pub struct Pattern<'a> {
    needle: &'a [u8],
    lps: Vec<usize>,
}

impl<'a> Pattern<'a> {
    pub fn new(needle: &'a [u8]) -> Self {
        let mut lps = vec![0usize; needle.len()];
        let mut len = 0;
        for i in 1..needle.len() {
            while len > 0 && needle[i] != needle[len] {
                len = lps[len - 1];
            }
            if needle[i] == needle[len] {
                len += 1;
            }
            lps[i] = len;
        }
        Self { needle, lps }
    }

    pub fn len(&self) -> usize {
        self.needle.len()
    }

    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    /// Feed `data` through the automaton, calling `on_match` with each match offset
    /// (overlapping matches included). Stops early when `on_match` returns false.
    fn scan(&self, data: &[u8], mut on_match: impl FnMut(usize) -> bool) {
        if self.needle.is_empty() {
            return;
        }
        let mut j = 0;
        for (i, &b) in data.iter().enumerate() {
            while j > 0 && b != self.needle[j] {
                j = self.lps[j - 1];
            }
            if b == self.needle[j] {
                j += 1;
            }
            if j == self.needle.len() {
                if !on_match(i + 1 - j) {
                    return;
                }
                j = self.lps[j - 1];
            }
        }
    }

    pub fn find_first(&self, data: &[u8]) -> Option<usize> {
        let mut found = None;
        self.scan(data, |at| {
            found = Some(at);
            false
        });
        found
    }

    pub fn find_last(&self, data: &[u8]) -> Option<usize> {
        let mut found = None;
        self.scan(data, |at| {
            found = Some(at);
            true
        });
        found
    }

    pub fn find_all(&self, data: &[u8]) -> Vec<usize> {
        let mut found = Vec::new();
        self.scan(data, |at| {
            found.push(at);
            true
        });
        found
    }

    /// First match at or after `start`, as an offset into the whole of `data`.
    pub fn find_from(&self, data: &[u8], start: usize) -> Option<usize> {
        let start = start.min(data.len());
        self.find_first(&data[start..]).map(|at| at + start)
    }
}

pub fn find_first(pattern: &[u8], data: &[u8]) -> Option<usize> {
    Pattern::new(pattern).find_first(data)
}

pub fn find_last(pattern: &[u8], data: &[u8]) -> Option<usize> {
    Pattern::new(pattern).find_last(data)
}

pub fn find_all(pattern: &[u8], data: &[u8]) -> Vec<usize> {
    Pattern::new(pattern).find_all(data)
}
