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

mod network;
mod tools;

use std::io;

pub use network::NetworkError;
use thiserror::Error;
pub use tools::ToolsError;

pub use crate::auth_error::AuthError;

#[derive(Debug, Error)]
pub enum EventHubsError {
    // ============================================================================
    // Network Errors
    // ============================================================================
    /// Transport level failures (connect, timeout, malformed urls)
    #[error(transparent)]
    Network(#[from] NetworkError),

    // ============================================================================
    // Authentication Errors
    // ============================================================================
    /// Token acquisition failures
    #[error(transparent)]
    Authentication(#[from] AuthError),

    // ============================================================================
    // Management API Errors
    // ============================================================================
    /// The management API answered with a non-success status
    #[error("Request failed with status {status}{}: {message}", .code.as_ref().map(|c| format!(" ({c})")).unwrap_or_default())]
    RequestFailed {
        status: u16,
        code: Option<String>,
        message: String,
    },

    /// A looked-up resource does not exist
    #[error("{message}")]
    NotFound { message: String },

    /// A required argument is missing or malformed
    #[error("Invalid argument '{param}': {reason}")]
    InvalidArgument { param: &'static str, reason: String },

    /// A long running operation finished in a non-successful state
    #[error("Operation '{operation}' finished with status '{status}'")]
    OperationFailed { operation: String, status: String },

    // ============================================================================
    // Tools/Admin Errors
    // ============================================================================
    /// Tools and admin operation errors
    #[error(transparent)]
    Tools(#[from] ToolsError),

    // ============================================================================
    // Serialization Errors
    // ============================================================================
    /// Response or request body could not be (de)serialized
    #[error("Serialization of {what} failed: {reason}")]
    Serialization { what: &'static str, reason: String },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    /// Configuration parsing failed
    #[error("Configuration parse error for '{key}': {reason}")]
    ConfigParseFailed { key: &'static str, reason: String },

    /// Invalid configuration value
    #[error("Invalid configuration for '{key}': value='{value}', reason={reason}")]
    ConfigInvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },

    // ============================================================================
    // System Errors
    // ============================================================================
    /// IO error from std::io
    #[error("IO error: {0}")]
    IO(#[from] io::Error),

    /// Operation timeout
    #[error("Operation '{operation}' timed out after {timeout_ms}ms")]
    Timeout { operation: &'static str, timeout_ms: u64 },

    /// Internal error (should be rare)
    #[error("Internal error: {0}")]
    Internal(String),
}

// ============================================================================
// Convenience Constructors
// ============================================================================

impl EventHubsError {
    /// Create a management API failure
    #[inline]
    pub fn request_failed(status: u16, code: Option<String>, message: impl Into<String>) -> Self {
        Self::RequestFailed {
            status,
            code,
            message: message.into(),
        }
    }

    /// Create a not-found error
    #[inline]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create an invalid argument error for the named parameter
    #[inline]
    pub fn invalid_argument(param: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            param,
            reason: reason.into(),
        }
    }

    /// Create a serialization error
    #[inline]
    pub fn serialization(what: &'static str, reason: impl Into<String>) -> Self {
        Self::Serialization {
            what,
            reason: reason.into(),
        }
    }

    /// Create an internal error
    #[inline]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// HTTP status reported by the management API, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RequestFailed { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether this error means the addressed resource does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. }) || self.status() == Some(404)
    }

    /// Name of the offending parameter for argument errors
    pub fn param_name(&self) -> Option<&str> {
        match self {
            Self::InvalidArgument { param, .. } => Some(*param),
            Self::Tools(ToolsError::ValidationError { field, .. }) => Some(field.as_str()),
            _ => None,
        }
    }
}

pub type EventHubsResult<T> = std::result::Result<T, EventHubsError>;

pub type Result<T> = EventHubsResult<T>;
