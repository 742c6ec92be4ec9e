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

//! Namespace related types and data structures

use std::collections::BTreeMap;

use chrono::DateTime;
use chrono::Utc;
use eventhubs_common::resource_id::ResourceIdentifier;
use eventhubs_common::time_utils::parse_arm_timestamp;
use serde::Deserialize;
use serde::Serialize;

use crate::core::EventHubsError;
use crate::core::EventHubsResult;

/// `Microsoft.EventHub/namespaces` as returned by the management plane
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamespaceResource {
    pub id: Option<String>,
    pub name: Option<String>,
    pub location: Option<String>,
    pub sku: Option<NamespaceSkuResource>,
    pub tags: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub properties: NamespaceProperties,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamespaceSkuResource {
    pub name: Option<String>,
    pub tier: Option<String>,
    pub capacity: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamespaceProperties {
    pub status: Option<String>,
    pub provisioning_state: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub service_bus_endpoint: Option<String>,
    pub metric_id: Option<String>,
    pub is_auto_inflate_enabled: Option<bool>,
    pub maximum_throughput_units: Option<i32>,
    pub kafka_enabled: Option<bool>,
    pub zone_redundant: Option<bool>,
}

/// Namespace summary used by listings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamespaceInfo {
    pub name: String,
    pub id: String,
    pub resource_group: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamespaceSku {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<i32>,
}

/// Detailed namespace view returned for a single namespace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Namespace {
    pub name: String,
    pub id: String,
    pub resource_group: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<NamespaceSku>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provisioning_state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_bus_endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metric_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_auto_inflate_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_throughput_units: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kafka_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone_redundant: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<BTreeMap<String, String>>,
}

impl Namespace {
    pub fn info(&self) -> NamespaceInfo {
        NamespaceInfo {
            name: self.name.clone(),
            id: self.id.clone(),
            resource_group: self.resource_group.clone(),
        }
    }
}

impl TryFrom<NamespaceResource> for Namespace {
    type Error = EventHubsError;

    fn try_from(resource: NamespaceResource) -> EventHubsResult<Self> {
        let id = resource
            .id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| EventHubsError::internal("Resource ID is missing"))?;
        let resource_group = id
            .parse::<ResourceIdentifier>()
            .ok()
            .and_then(|parsed| parsed.resource_group_name().map(str::to_string))
            .filter(|rg| !rg.is_empty())
            .ok_or_else(|| EventHubsError::internal("Resource ID is missing resource group"))?;
        let name = resource
            .name
            .filter(|name| !name.is_empty())
            .ok_or_else(|| EventHubsError::internal("Resource Name is missing"))?;

        let properties = resource.properties;
        Ok(Namespace {
            name,
            id,
            resource_group,
            location: resource.location,
            sku: resource.sku.map(|sku| NamespaceSku {
                name: sku.name,
                tier: sku.tier,
                capacity: sku.capacity,
            }),
            status: properties.status,
            provisioning_state: properties.provisioning_state,
            creation_time: properties.created_at.as_deref().and_then(parse_arm_timestamp),
            updated_time: properties.updated_at.as_deref().and_then(parse_arm_timestamp),
            service_bus_endpoint: properties.service_bus_endpoint,
            metric_id: properties.metric_id,
            is_auto_inflate_enabled: properties.is_auto_inflate_enabled,
            maximum_throughput_units: properties.maximum_throughput_units,
            kafka_enabled: properties.kafka_enabled,
            zone_redundant: properties.zone_redundant,
            tags: resource.tags,
        })
    }
}
