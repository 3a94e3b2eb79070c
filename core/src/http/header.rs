/*
 * header.rs
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

//! Case-insensitive header field map.
//!
//! Names are stored lower-case; one value per name, last write wins.
//! Serialization is in sorted name order so output is stable.

use std::collections::btree_map;
use std::collections::BTreeMap;

use crate::error::{HttpError, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    fields: BTreeMap<String, String>,
}

impl HeaderMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, replacing any value stored under the same name in any case.
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) {
        self.fields.insert(name.to_ascii_lowercase(), value.into());
    }

    /// Value of a field, or the empty string when absent.
    pub fn get_field(&self, name: &str) -> &str {
        self.get(name).unwrap_or("")
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(&name.to_ascii_lowercase())
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.fields.remove(&name.to_ascii_lowercase())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// (lower-case name, value) pairs in serialization order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, String> {
        self.fields.iter()
    }

    /// Check every field can be written as one header line: names non-empty
    /// without `:`, and no CR or LF in names or values.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in &self.fields {
            let bad_name = name.is_empty() || name.contains([':', '\r', '\n']);
            if bad_name || value.contains(['\r', '\n']) {
                return Err(HttpError::MalformedHeaderField(format!("{}: {}", name, value)));
            }
        }
        Ok(())
    }

    /// `Name: value\r\n` per field, then a blank `\r\n`.
    pub fn serialize(&self) -> String {
        let mut out = String::new();
        for (name, value) in &self.fields {
            out.push_str(&display_name(name));
            out.push_str(": ");
            out.push_str(value);
            out.push_str("\r\n");
        }
        out.push_str("\r\n");
        out
    }

    /// Parse a header block. Lines are split on `\n` with `\r` dropped; an empty
    /// line ends the block. Every whitespace character is removed from values.
    pub fn parse(text: &str) -> Result<Self> {
        let mut map = HeaderMap::new();
        for raw in text.split('\n') {
            let line = raw.replace('\r', "");
            if line.is_empty() {
                break;
            }
            let (name, value) = line
                .split_once(':')
                .ok_or_else(|| HttpError::MalformedHeaderField(line.clone()))?;
            let value: String = value.chars().filter(|c| !c.is_whitespace()).collect();
            map.set_field(name, value);
        }
        Ok(map)
    }
}

/// Display form: first character and every character after `-` or a space upper-cased.
pub fn display_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper = true;
    for c in name.chars() {
        if upper {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
        upper = c == '-' || c == ' ';
    }
    out
}

impl<'a> IntoIterator for &'a HeaderMap {
    type Item = (&'a String, &'a String);
    type IntoIter = btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        let mut h = HeaderMap::new();
        h.set_field("Content-Type", "text/html");
        assert_eq!(h.get_field("Content-Type"), "text/html");
        assert_eq!(h.get_field("content-type"), "text/html");
        assert_eq!(h.get_field("CONTENT-TYPE"), "text/html");
        assert_eq!(h.get_field("Accept"), "");
        assert_eq!(h.get("accept"), None);
    }

    #[test]
    fn last_write_wins() {
        let mut h = HeaderMap::new();
        h.set_field("X-Token", "a");
        h.set_field("x-token", "b");
        assert_eq!(h.len(), 1);
        assert_eq!(h.get_field("X-TOKEN"), "b");
    }

    #[test]
    fn serialize_uses_display_names_in_sorted_order() {
        let mut h = HeaderMap::new();
        h.set_field("user-agent", "lwhttp/0.0.1");
        h.set_field("ACCEPT", "*/*");
        h.set_field("x-forwarded-for", "10.0.0.1");
        assert_eq!(
            h.serialize(),
            "Accept: */*\r\nUser-Agent: lwhttp/0.0.1\r\nX-Forwarded-For: 10.0.0.1\r\n\r\n"
        );
        assert_eq!(HeaderMap::new().serialize(), "\r\n");
    }

    #[test]
    fn display_name_capitalizes_tokens() {
        assert_eq!(display_name("content-length"), "Content-Length");
        assert_eq!(display_name("x custom"), "X Custom");
        assert_eq!(display_name("te"), "Te");
    }

    #[test]
    fn parse_strips_all_value_whitespace() {
        let h = HeaderMap::parse("Content-Type: text/html; charset=utf-8\r\nDate: Sun, 10 Oct 2010\r\n\r\n").unwrap();
        assert_eq!(h.get_field("content-type"), "text/html;charset=utf-8");
        assert_eq!(h.get_field("date"), "Sun,10Oct2010");
    }

    #[test]
    fn parse_splits_on_first_colon() {
        let h = HeaderMap::parse("Location: http://example.com:8080/\n").unwrap();
        assert_eq!(h.get_field("location"), "http://example.com:8080/");
    }

    #[test]
    fn parse_rejects_line_without_colon() {
        let err = HeaderMap::parse("Content-Length: 5\r\nbogus line\r\n\r\n").unwrap_err();
        assert!(matches!(err, HttpError::MalformedHeaderField(ref l) if l == "bogus line"));
    }

    #[test]
    fn parse_of_serialize_preserves_fields() {
        let mut h = HeaderMap::new();
        h.set_field("Host", "example.com:8080");
        h.set_field("Accept", "*/*");
        h.set_field("Content-Length", "42");
        let back = HeaderMap::parse(&h.serialize()).unwrap();
        assert_eq!(back, h);
    }

    #[test]
    fn validate_rejects_line_breaks_and_bad_names() {
        let mut h = HeaderMap::new();
        h.set_field("X-Trace", "abc def");
        assert!(h.validate().is_ok());

        for (name, value) in [
            ("X-Trace", "abc\r\nSet-Cookie: stolen=1"),
            ("X-Trace", "abc\nEvil: 1"),
            ("X-Bad\r\nEvil", "1"),
            ("X:Colon", "1"),
            ("", "1"),
        ] {
            let mut h = HeaderMap::new();
            h.set_field(name, value);
            assert!(
                matches!(h.validate(), Err(HttpError::MalformedHeaderField(_))),
                "{:?}: {:?}",
                name,
                value
            );
        }
    }
}
