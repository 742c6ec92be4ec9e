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

//! Consumer group operations - Core business logic

use eventhubs_common::arm_client::ArmClient;
use eventhubs_common::resource_id::ResourcePath;
use serde_json::json;

use super::types::ConsumerGroup;
use super::types::ConsumerGroupResource;
use crate::core::event_hub::operations::event_hub_path;
use crate::core::EventHubsResult;

fn consumer_groups_path(
    subscription: &str,
    resource_group: &str,
    namespace: &str,
    event_hub: &str,
) -> EventHubsResult<ResourcePath> {
    Ok(event_hub_path(subscription, resource_group, namespace, event_hub)?.segment("consumergroups"))
}

/// Consumer group operations service
pub struct ConsumerGroupService;

impl ConsumerGroupService {
    pub async fn list_consumer_groups(
        client: &ArmClient,
        subscription: &str,
        resource_group: &str,
        namespace: &str,
        event_hub: &str,
    ) -> EventHubsResult<Vec<ConsumerGroup>> {
        let path = consumer_groups_path(subscription, resource_group, namespace, event_hub)?;
        let resources: Vec<ConsumerGroupResource> = client.list(path.as_str()).await?;
        resources
            .into_iter()
            .map(|resource| ConsumerGroup::from_resource(resource, event_hub, namespace, resource_group))
            .collect()
    }

    /// Get one consumer group, `None` when it does not exist
    pub async fn find_consumer_group(
        client: &ArmClient,
        subscription: &str,
        resource_group: &str,
        namespace: &str,
        event_hub: &str,
        consumer_group: &str,
    ) -> EventHubsResult<Option<ConsumerGroup>> {
        let path = consumer_groups_path(subscription, resource_group, namespace, event_hub)?
            .name("consumerGroupName", consumer_group)?;
        match client.get_optional::<ConsumerGroupResource>(path.as_str()).await? {
            Some(resource) => ConsumerGroup::from_resource(resource, event_hub, namespace, resource_group).map(Some),
            None => Ok(None),
        }
    }

    /// Create or update a consumer group
    ///
    /// `user_metadata` is only sent when non-empty.
    pub async fn create_or_update_consumer_group(
        client: &ArmClient,
        subscription: &str,
        resource_group: &str,
        namespace: &str,
        event_hub: &str,
        consumer_group: &str,
        user_metadata: Option<&str>,
    ) -> EventHubsResult<ConsumerGroup> {
        let path = consumer_groups_path(subscription, resource_group, namespace, event_hub)?
            .name("consumerGroupName", consumer_group)?;
        let body = match user_metadata.filter(|m| !m.is_empty()) {
            Some(metadata) => json!({"properties": {"userMetadata": metadata}}),
            None => json!({"properties": {}}),
        };
        let resource: ConsumerGroupResource = client.put(path.as_str(), &body).await?;
        ConsumerGroup::from_resource(resource, event_hub, namespace, resource_group)
    }

    pub async fn delete_consumer_group(
        client: &ArmClient,
        subscription: &str,
        resource_group: &str,
        namespace: &str,
        event_hub: &str,
        consumer_group: &str,
    ) -> EventHubsResult<bool> {
        let path = consumer_groups_path(subscription, resource_group, namespace, event_hub)?
            .name("consumerGroupName", consumer_group)?;
        client.delete(path.as_str()).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use eventhubs_common::credential::StaticTokenCredential;
    use mockito::Matcher;
    use mockito::Server;

    use super::*;

    const GROUPS_PATH: &str =
        "/subscriptions/sub/resourceGroups/rg/providers/Microsoft.EventHub/namespaces/ns/eventhubs/eh/consumergroups";

    fn client(server: &Server) -> ArmClient {
        ArmClient::new(server.url(), "2024-01-01", Arc::new(StaticTokenCredential::new("token")))
    }

    #[tokio::test]
    async fn test_update_sends_user_metadata() {
        let mut server = Server::new_async().await;
        let path = format!("{GROUPS_PATH}/cg");
        let put = server
            .mock("PUT", path.as_str())
            .match_body(Matcher::Json(json!({"properties": {"userMetadata": "reporting"}})))
            .with_status(200)
            .with_body(
                json!({
                    "id": format!("{GROUPS_PATH}/cg"),
                    "name": "cg",
                    "location": "eastus",
                    "properties": {"userMetadata": "reporting"}
                })
                .to_string(),
            )
            .create_async()
            .await;

        let group = ConsumerGroupService::create_or_update_consumer_group(
            &client(&server),
            "sub",
            "rg",
            "ns",
            "eh",
            "cg",
            Some("reporting"),
        )
        .await
        .unwrap();
        assert_eq!(group.user_metadata.as_deref(), Some("reporting"));
        assert_eq!(group.location.as_deref(), Some("eastus"));
        put.assert_async().await;
    }

    #[tokio::test]
    async fn test_update_without_metadata_sends_empty_properties() {
        let mut server = Server::new_async().await;
        let path = format!("{GROUPS_PATH}/cg");
        let put = server
            .mock("PUT", path.as_str())
            .match_body(Matcher::Json(json!({"properties": {}})))
            .with_status(200)
            .with_body(json!({"id": format!("{GROUPS_PATH}/cg"), "name": "cg"}).to_string())
            .create_async()
            .await;

        ConsumerGroupService::create_or_update_consumer_group(&client(&server), "sub", "rg", "ns", "eh", "cg", Some(""))
            .await
            .unwrap();
        put.assert_async().await;
    }

    #[tokio::test]
    async fn test_list_consumer_groups() {
        let mut server = Server::new_async().await;
        let _list = server
            .mock("GET", GROUPS_PATH)
            .with_status(200)
            .with_body(
                json!({"value": [
                    {"id": format!("{GROUPS_PATH}/$Default"), "name": "$Default"},
                    {"id": format!("{GROUPS_PATH}/cg"), "name": "cg"}
                ]})
                .to_string(),
            )
            .create_async()
            .await;

        let groups = ConsumerGroupService::list_consumer_groups(&client(&server), "sub", "rg", "ns", "eh")
            .await
            .unwrap();
        let names: Vec<&str> = groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["$Default", "cg"]);
    }
}
