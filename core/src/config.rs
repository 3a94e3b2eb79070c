/*
 * config.rs
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

//! Client configuration: redirect policy, user agent, timeout.
//!
//! Loadable from JSON, e.g. `{"user_agent": "fetch/2", "timeout_secs": 10}`;
//! omitted keys take their defaults.

use std::io;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{HttpError, Result};

pub const DEFAULT_USER_AGENT: &str = "lwhttp/0.0.1";
pub const DEFAULT_TIMEOUT_SECS: u32 = 5;

/// Redirect handling preference. Recorded on the client; redirects are not followed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RedirectPolicy {
    /// Never redirect.
    Never,
    /// Always redirect.
    Always,
    /// Always redirect, except from https to http.
    #[default]
    Normal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub redirect: RedirectPolicy,
    pub user_agent: String,
    /// Connect timeout, socket timeout and overall read deadline. 0 disables all three.
    pub timeout_secs: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            redirect: RedirectPolicy::default(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text)
            .map_err(|e| HttpError::IoFailure(io::Error::new(io::ErrorKind::InvalidData, e)))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| HttpError::IoFailure(io::Error::new(io::ErrorKind::InvalidData, e)))
    }

    pub fn timeout(&self) -> Option<Duration> {
        match self.timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(u64::from(secs))),
        }
    }
}
