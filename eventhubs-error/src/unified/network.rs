// Copyright 2025 The Event Hubs Admin Rust Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Network-related errors for management API calls

use thiserror::Error;

/// Network operation errors
#[derive(Debug, Error)]
pub enum NetworkError {
    /// Request could not be sent or the connection broke
    #[error("Request to {url} failed: {reason}")]
    RequestFailed { url: String, reason: String },

    /// Request timeout
    #[error("Request to {url} timed out after {timeout_ms}ms")]
    RequestTimeout { url: String, timeout_ms: u64 },

    /// Invalid url
    #[error("Invalid url: {url}")]
    InvalidUrl { url: String },
}

impl NetworkError {
    /// Create a request failed error
    #[inline]
    pub fn request_failed(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::RequestFailed {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Create a request timeout error
    #[inline]
    pub fn request_timeout(url: impl Into<String>, timeout_ms: u64) -> Self {
        Self::RequestTimeout {
            url: url.into(),
            timeout_ms,
        }
    }

    /// Get the associated url
    pub fn url(&self) -> &str {
        match self {
            Self::RequestFailed { url, .. } | Self::RequestTimeout { url, .. } | Self::InvalidUrl { url } => url,
        }
    }
}
