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

//! Authentication error types.

use thiserror::Error;

/// Errors raised while acquiring an access token for the management plane.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// A credential source is not configured in this environment
    #[error("{credential} is unavailable: {reason}")]
    CredentialUnavailable { credential: &'static str, reason: String },

    /// The identity provider rejected the token request
    #[error("Token request failed with status {status}: {message}")]
    TokenRequestFailed { status: u16, message: String },

    /// The token response could not be understood
    #[error("Invalid token response: {0}")]
    InvalidTokenResponse(String),

    /// Every credential in the chain failed
    #[error("Authentication failed. {}", .attempts.join(" "))]
    ChainExhausted { attempts: Vec<String> },

    /// Generic authentication failure
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),
}

impl AuthError {
    #[inline]
    pub fn unavailable(credential: &'static str, reason: impl Into<String>) -> Self {
        Self::CredentialUnavailable {
            credential,
            reason: reason.into(),
        }
    }
}

impl From<String> for AuthError {
    fn from(msg: String) -> Self {
        AuthError::AuthenticationFailed(msg)
    }
}

impl From<&str> for AuthError {
    fn from(msg: &str) -> Self {
        AuthError::AuthenticationFailed(msg.to_string())
    }
}
