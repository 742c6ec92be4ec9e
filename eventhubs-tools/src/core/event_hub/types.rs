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

//! Event hub related types and data structures

use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use eventhubs_common::resource_id::ResourceIdentifier;
use eventhubs_common::time_utils::parse_arm_timestamp;
use serde::Deserialize;
use serde::Serialize;

use crate::core::EventHubsError;
use crate::core::EventHubsResult;

/// Lifecycle state of an event hub
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventHubStatus {
    Active,
    Disabled,
    Restoring,
    SendDisabled,
    ReceiveDisabled,
    Creating,
    Deleting,
    Renaming,
    Unknown,
}

impl EventHubStatus {
    pub const ALL: [EventHubStatus; 9] = [
        Self::Active,
        Self::Disabled,
        Self::Restoring,
        Self::SendDisabled,
        Self::ReceiveDisabled,
        Self::Creating,
        Self::Deleting,
        Self::Renaming,
        Self::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Disabled => "Disabled",
            Self::Restoring => "Restoring",
            Self::SendDisabled => "SendDisabled",
            Self::ReceiveDisabled => "ReceiveDisabled",
            Self::Creating => "Creating",
            Self::Deleting => "Deleting",
            Self::Renaming => "Renaming",
            Self::Unknown => "Unknown",
        }
    }

    /// Lenient mapping for values read back from the service
    pub fn from_service(value: &str) -> Self {
        value.parse().unwrap_or(Self::Unknown)
    }
}

impl FromStr for EventHubStatus {
    type Err = EventHubsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                EventHubsError::invalid_argument(
                    "status",
                    format!(
                        "'{s}' is not a valid event hub status, expected one of: {}",
                        Self::ALL.map(|status| status.as_str()).join(", ")
                    ),
                )
            })
    }
}

impl fmt::Display for EventHubStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `Microsoft.EventHub/namespaces/eventhubs` as returned by the management plane
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventHubResource {
    pub id: Option<String>,
    pub name: Option<String>,
    pub location: Option<String>,
    #[serde(default)]
    pub properties: EventHubProperties,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventHubProperties {
    pub partition_ids: Option<Vec<String>>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub message_retention_in_days: Option<i64>,
    pub partition_count: Option<i32>,
    pub status: Option<String>,
    pub retention_description: Option<RetentionDescription>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetentionDescription {
    pub cleanup_policy: Option<String>,
    pub retention_time_in_hours: Option<i64>,
}

/// Settings applied by create-or-update; unset fields keep their current value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventHubSettings {
    pub partition_count: Option<i32>,
    pub message_retention_in_hours: Option<i64>,
    pub status: Option<EventHubStatus>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventHub {
    pub name: String,
    pub id: String,
    pub resource_group: String,
    pub namespace: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partition_count: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_retention_in_hours: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<EventHubStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partition_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_time: Option<DateTime<Utc>>,
}

impl EventHub {
    /// Projects a management plane payload; `resource_group` is used when the id lacks one.
    pub fn from_resource(resource: EventHubResource, namespace: &str, resource_group: &str) -> EventHubsResult<Self> {
        let id = resource
            .id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| EventHubsError::internal("Event hub resource ID is missing"))?;
        let name = resource
            .name
            .filter(|name| !name.is_empty())
            .ok_or_else(|| EventHubsError::internal("Event hub name is missing"))?;
        let resource_group = id
            .parse::<ResourceIdentifier>()
            .ok()
            .and_then(|parsed| parsed.resource_group_name().map(str::to_string))
            .unwrap_or_else(|| resource_group.to_string());

        let properties = resource.properties;
        let message_retention_in_hours = properties
            .retention_description
            .as_ref()
            .and_then(|retention| retention.retention_time_in_hours)
            .or_else(|| properties.message_retention_in_days.map(|days| days.saturating_mul(24)));

        Ok(EventHub {
            name,
            id,
            resource_group,
            namespace: namespace.to_string(),
            location: resource.location,
            partition_count: properties.partition_count,
            message_retention_in_hours,
            status: properties.status.as_deref().map(EventHubStatus::from_service),
            partition_ids: properties.partition_ids,
            creation_time: properties.created_at.as_deref().and_then(parse_arm_timestamp),
            updated_time: properties.updated_at.as_deref().and_then(parse_arm_timestamp),
        })
    }
}
