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

//! Event hub operations - Core business logic

use eventhubs_common::arm_client::ArmClient;
use eventhubs_common::resource_id::ResourcePath;
use serde_json::json;
use serde_json::Map;
use serde_json::Value;

use super::types::EventHub;
use super::types::EventHubResource;
use super::types::EventHubSettings;
use crate::core::namespace::operations::namespace_path;
use crate::core::EventHubsResult;

/// Properties the service computes and rejects on write
const READ_ONLY_PROPERTIES: [&str; 3] = ["createdAt", "updatedAt", "partitionIds"];

pub(crate) fn event_hubs_path(
    subscription: &str,
    resource_group: &str,
    namespace: &str,
) -> EventHubsResult<ResourcePath> {
    Ok(namespace_path(subscription, resource_group, namespace)?.segment("eventhubs"))
}

pub(crate) fn event_hub_path(
    subscription: &str,
    resource_group: &str,
    namespace: &str,
    event_hub: &str,
) -> EventHubsResult<ResourcePath> {
    event_hubs_path(subscription, resource_group, namespace)?.name("eventHubName", event_hub)
}

/// Event hub operations service
pub struct EventHubService;

impl EventHubService {
    /// List every event hub of a namespace
    pub async fn list_event_hubs(
        client: &ArmClient,
        subscription: &str,
        resource_group: &str,
        namespace: &str,
    ) -> EventHubsResult<Vec<EventHub>> {
        let path = event_hubs_path(subscription, resource_group, namespace)?;
        let resources: Vec<EventHubResource> = client.list(path.as_str()).await?;
        resources
            .into_iter()
            .map(|resource| EventHub::from_resource(resource, namespace, resource_group))
            .collect()
    }

    /// Get one event hub, `None` when it does not exist
    pub async fn find_event_hub(
        client: &ArmClient,
        subscription: &str,
        resource_group: &str,
        namespace: &str,
        event_hub: &str,
    ) -> EventHubsResult<Option<EventHub>> {
        let path = event_hub_path(subscription, resource_group, namespace, event_hub)?;
        match client.get_optional::<EventHubResource>(path.as_str()).await? {
            Some(resource) => EventHub::from_resource(resource, namespace, resource_group).map(Some),
            None => Ok(None),
        }
    }

    /// Create the event hub, or overlay `settings` onto the existing one
    pub async fn create_or_update_event_hub(
        client: &ArmClient,
        subscription: &str,
        resource_group: &str,
        namespace: &str,
        event_hub: &str,
        settings: &EventHubSettings,
    ) -> EventHubsResult<EventHub> {
        let path = event_hub_path(subscription, resource_group, namespace, event_hub)?;
        let existing = client.get_optional::<Value>(path.as_str()).await?;
        tracing::debug!(event_hub, exists = existing.is_some(), "writing event hub");
        let body = update_body(existing, settings);
        let resource: EventHubResource = client.put(path.as_str(), &body).await?;
        EventHub::from_resource(resource, namespace, resource_group)
    }

    /// Delete an event hub; `false` when the service had nothing to remove
    pub async fn delete_event_hub(
        client: &ArmClient,
        subscription: &str,
        resource_group: &str,
        namespace: &str,
        event_hub: &str,
    ) -> EventHubsResult<bool> {
        let path = event_hub_path(subscription, resource_group, namespace, event_hub)?;
        client.delete(path.as_str()).await
    }

    /// Fails with the management plane error when the event hub is not reachable
    pub(crate) async fn ensure_event_hub(
        client: &ArmClient,
        subscription: &str,
        resource_group: &str,
        namespace: &str,
        event_hub: &str,
    ) -> EventHubsResult<()> {
        let path = event_hub_path(subscription, resource_group, namespace, event_hub)?;
        client.get::<Value>(path.as_str()).await.map(|_| ())
    }
}

/// Builds the PUT payload from the current resource and the requested changes.
fn update_body(existing: Option<Value>, settings: &EventHubSettings) -> Value {
    let mut properties = existing
        .and_then(|mut resource| resource.get_mut("properties").map(Value::take))
        .and_then(|properties| match properties {
            Value::Object(map) => Some(map),
            _ => None,
        })
        .unwrap_or_default();
    for key in READ_ONLY_PROPERTIES {
        properties.remove(key);
    }

    if let Some(partition_count) = settings.partition_count {
        properties.insert("partitionCount".to_string(), json!(partition_count));
    }
    if let Some(hours) = settings.message_retention_in_hours {
        let mut retention = match properties.remove("retentionDescription") {
            Some(Value::Object(map)) => map,
            _ => Map::new(),
        };
        retention
            .entry("cleanupPolicy")
            .or_insert_with(|| json!("Delete"));
        retention.insert("retentionTimeInHours".to_string(), json!(hours));
        properties.remove("messageRetentionInDays");
        properties.insert("retentionDescription".to_string(), Value::Object(retention));
    }
    if let Some(status) = settings.status {
        properties.insert("status".to_string(), json!(status.as_str()));
    }

    json!({ "properties": properties })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use eventhubs_common::credential::StaticTokenCredential;
    use mockito::Matcher;
    use mockito::Server;

    use super::*;
    use crate::core::event_hub::types::EventHubStatus;

    const HUB_PATH: &str = "/subscriptions/sub/resourceGroups/rg/providers/Microsoft.EventHub/namespaces/ns/eventhubs/eh";

    fn client(server: &Server) -> ArmClient {
        ArmClient::new(server.url(), "2024-01-01", Arc::new(StaticTokenCredential::new("token")))
            .with_poll_interval(Duration::ZERO)
    }

    fn hub_json(partitions: i32, hours: i64) -> Value {
        json!({
            "id": HUB_PATH,
            "name": "eh",
            "properties": {
                "partitionCount": partitions,
                "partitionIds": ["0", "1"],
                "createdAt": "2024-01-01T00:00:00Z",
                "messageRetentionInDays": 1,
                "status": "Active",
                "retentionDescription": {"cleanupPolicy": "Delete", "retentionTimeInHours": hours}
            }
        })
    }

    #[test]
    fn test_update_body_for_new_event_hub() {
        let body = update_body(
            None,
            &EventHubSettings {
                partition_count: Some(4),
                message_retention_in_hours: Some(24),
                status: None,
            },
        );
        assert_eq!(
            body,
            json!({"properties": {
                "partitionCount": 4,
                "retentionDescription": {"cleanupPolicy": "Delete", "retentionTimeInHours": 24}
            }})
        );
    }

    #[test]
    fn test_update_body_overlays_existing() {
        let body = update_body(
            Some(hub_json(2, 12)),
            &EventHubSettings {
                status: Some(EventHubStatus::Disabled),
                ..Default::default()
            },
        );
        let properties = &body["properties"];
        assert_eq!(properties["partitionCount"], 2);
        assert_eq!(properties["status"], "Disabled");
        assert_eq!(properties["retentionDescription"]["retentionTimeInHours"], 12);
        assert!(properties.get("partitionIds").is_none());
        assert!(properties.get("createdAt").is_none());
    }

    #[test]
    fn test_update_body_replaces_day_retention() {
        let body = update_body(
            Some(hub_json(2, 24)),
            &EventHubSettings {
                message_retention_in_hours: Some(72),
                ..Default::default()
            },
        );
        assert!(body["properties"].get("messageRetentionInDays").is_none());
        assert_eq!(body["properties"]["retentionDescription"]["retentionTimeInHours"], 72);
    }

    #[tokio::test]
    async fn test_create_or_update_reads_then_writes() {
        let mut server = Server::new_async().await;
        let read = server
            .mock("GET", HUB_PATH)
            .with_status(200)
            .with_body(hub_json(2, 24).to_string())
            .create_async()
            .await;
        let write = server
            .mock("PUT", HUB_PATH)
            .match_body(Matcher::PartialJson(json!({"properties": {"partitionCount": 8}})))
            .with_status(200)
            .with_body(hub_json(8, 24).to_string())
            .create_async()
            .await;

        let hub = EventHubService::create_or_update_event_hub(
            &client(&server),
            "sub",
            "rg",
            "ns",
            "eh",
            &EventHubSettings {
                partition_count: Some(8),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(hub.partition_count, Some(8));
        assert_eq!(hub.namespace, "ns");
        read.assert_async().await;
        write.assert_async().await;
    }

    #[tokio::test]
    async fn test_find_missing_event_hub() {
        let mut server = Server::new_async().await;
        let _read = server.mock("GET", HUB_PATH).with_status(404).create_async().await;

        let hub = EventHubService::find_event_hub(&client(&server), "sub", "rg", "ns", "eh")
            .await
            .unwrap();
        assert!(hub.is_none());
    }

    #[tokio::test]
    async fn test_list_event_hubs() {
        let mut server = Server::new_async().await;
        let _list = server
            .mock("GET", "/subscriptions/sub/resourceGroups/rg/providers/Microsoft.EventHub/namespaces/ns/eventhubs")
            .with_status(200)
            .with_body(json!({"value": [hub_json(2, 24)]}).to_string())
            .create_async()
            .await;

        let hubs = EventHubService::list_event_hubs(&client(&server), "sub", "rg", "ns")
            .await
            .unwrap();
        assert_eq!(hubs.len(), 1);
        assert_eq!(hubs[0].message_retention_in_hours, Some(24));
    }
}
