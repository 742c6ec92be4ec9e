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

//! Command results and the error to status mapping shared by every command

use serde::Serialize;
use tracing::debug;

use crate::core::event_hub::types::EventHubStatus;
use crate::core::EventHubsError;
use crate::core::ToolsError;

pub const AUTHENTICATION_FAILED_MESSAGE: &str =
    "Authentication failed. Please ensure your Azure credentials are properly configured and have not expired.";

/// What a command hands back to the caller
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandResponse {
    pub status: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<serde_json::Value>,
}

impl CommandResponse {
    /// 200 carrying `results`
    pub fn success<T: Serialize>(results: &T) -> Self {
        match serde_json::to_value(results) {
            Ok(value) => Self {
                status: 200,
                message: "Success".to_string(),
                results: Some(value),
            },
            Err(e) => Self {
                status: 500,
                message: EventHubsError::serialization("command results", e.to_string()).to_string(),
                results: None,
            },
        }
    }

    /// The user declined a confirmation prompt
    pub fn cancelled() -> Self {
        Self {
            status: 200,
            message: ToolsError::OperationCancelled.to_string(),
            results: None,
        }
    }

    /// 400 listing every option problem
    pub fn validation_failed(errors: Vec<String>) -> Self {
        Self {
            status: 400,
            message: errors.join("\n"),
            results: None,
        }
    }

    /// Maps a failure to its status and the command's message table
    pub fn from_error(error: &EventHubsError, messages: &ErrorMessages) -> Self {
        let status = status_code(error);
        debug!(status, error = %error, "command failed");
        Self {
            status,
            message: messages.message_for(error),
            results: None,
        }
    }

    #[inline]
    pub fn is_success(&self) -> bool {
        self.status < 400
    }
}

/// HTTP-like status for a failure
pub fn status_code(error: &EventHubsError) -> u16 {
    match error {
        EventHubsError::Authentication(_) => 401,
        EventHubsError::RequestFailed { status, .. } => *status,
        EventHubsError::NotFound { .. } => 404,
        EventHubsError::InvalidArgument { .. } => 400,
        EventHubsError::Tools(ToolsError::ValidationError { .. } | ToolsError::MissingRequiredOptions { .. }) => 400,
        _ => 500,
    }
}

/// Message for an invalid value of a well known parameter
pub fn invalid_argument_message(param: &str) -> Option<String> {
    let message = match param {
        "eventHubName" => "Invalid event hub name. Please provide a valid event hub name.",
        "namespaceName" => "Invalid namespace name. Please provide a valid Event Hubs namespace name.",
        "resourceGroup" => "Invalid resource group name. Please provide a valid resource group name.",
        "subscription" => "Invalid subscription. Please provide a valid subscription ID or name.",
        "consumerGroupName" => "Invalid consumer group name. Please provide a valid consumer group name.",
        "partitionCount" => "Invalid partition count. The partition count must be at least 1.",
        "messageRetentionInHours" => "Invalid message retention. The retention time in hours must be at least 1.",
        "status" => {
            return Some(format!(
                "Invalid event hub status. Valid values are: {}.",
                EventHubStatus::ALL.map(|s| s.as_str()).join(", ")
            ))
        }
        _ => return None,
    };
    Some(message.to_string())
}

/// Per command wording for the well known failures
#[derive(Debug, Clone, Copy)]
pub struct ErrorMessages {
    /// 403 from the management plane
    pub forbidden: &'static str,
    /// 404 from the management plane
    pub not_found: &'static str,
    /// 409 from the management plane
    pub conflict: Option<&'static str>,
    /// The addressed resource does not exist
    pub missing_resource: Option<&'static str>,
}

impl ErrorMessages {
    pub fn message_for(&self, error: &EventHubsError) -> String {
        let message = match error {
            EventHubsError::Authentication(_) => Some(AUTHENTICATION_FAILED_MESSAGE),
            EventHubsError::NotFound { .. } => self.missing_resource,
            EventHubsError::RequestFailed { status: 403, .. } => Some(self.forbidden),
            EventHubsError::RequestFailed { status: 404, .. } => Some(self.not_found),
            EventHubsError::RequestFailed { status: 409, .. } => self.conflict,
            _ => None,
        };
        message
            .map(str::to_string)
            .or_else(|| error.param_name().and_then(invalid_argument_message))
            .unwrap_or_else(|| error.to_string())
    }
}
