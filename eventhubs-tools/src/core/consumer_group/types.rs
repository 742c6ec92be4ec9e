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

//! Consumer group related types and data structures

use chrono::DateTime;
use chrono::Utc;
use eventhubs_common::resource_id::ResourceIdentifier;
use eventhubs_common::time_utils::parse_arm_timestamp;
use serde::Deserialize;
use serde::Serialize;

use crate::core::EventHubsError;
use crate::core::EventHubsResult;

/// `Microsoft.EventHub/namespaces/eventhubs/consumergroups` as returned by the management plane
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConsumerGroupResource {
    pub id: Option<String>,
    pub name: Option<String>,
    pub location: Option<String>,
    #[serde(default)]
    pub properties: ConsumerGroupProperties,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsumerGroupProperties {
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub user_metadata: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsumerGroup {
    pub name: String,
    pub id: String,
    pub resource_group: String,
    pub namespace: String,
    pub event_hub: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_metadata: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_time: Option<DateTime<Utc>>,
}

impl ConsumerGroup {
    pub fn from_resource(
        resource: ConsumerGroupResource,
        event_hub: &str,
        namespace: &str,
        resource_group: &str,
    ) -> EventHubsResult<Self> {
        let id = resource
            .id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| EventHubsError::internal("Consumer group resource ID is missing"))?;
        let parsed = id.parse::<ResourceIdentifier>().ok();
        let name = resource
            .name
            .filter(|name| !name.is_empty())
            .or_else(|| parsed.as_ref().and_then(|p| p.name().map(str::to_string)))
            .ok_or_else(|| EventHubsError::internal("Consumer group name is missing"))?;
        let resource_group = parsed
            .as_ref()
            .and_then(|p| p.resource_group_name().map(str::to_string))
            .unwrap_or_else(|| resource_group.to_string());

        Ok(ConsumerGroup {
            name,
            id,
            resource_group,
            namespace: namespace.to_string(),
            event_hub: event_hub.to_string(),
            location: resource.location,
            user_metadata: resource.properties.user_metadata,
            creation_time: resource.properties.created_at.as_deref().and_then(parse_arm_timestamp),
            updated_time: resource.properties.updated_at.as_deref().and_then(parse_arm_timestamp),
        })
    }
}
