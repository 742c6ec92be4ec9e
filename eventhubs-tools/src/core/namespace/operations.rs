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

//! Namespace operations - Core business logic
//!
//! Thin wrappers over the management plane that return the projected namespace types.

use eventhubs_common::arm_client::ArmClient;
use eventhubs_common::resource_id::ResourcePath;

use super::types::Namespace;
use super::types::NamespaceInfo;
use super::types::NamespaceResource;
use crate::core::EventHubsResult;

pub(crate) const PROVIDER: &str = "Microsoft.EventHub";

fn resource_group_path(subscription: &str, resource_group: &str) -> EventHubsResult<ResourcePath> {
    ResourcePath::new()
        .segment("subscriptions")
        .name("subscription", subscription)?
        .segment("resourceGroups")
        .name("resourceGroup", resource_group)
}

/// `/subscriptions/{s}/resourceGroups/{rg}/providers/Microsoft.EventHub/namespaces/{ns}`
pub(crate) fn namespace_path(
    subscription: &str,
    resource_group: &str,
    namespace: &str,
) -> EventHubsResult<ResourcePath> {
    resource_group_path(subscription, resource_group)?
        .segment("providers")
        .segment(PROVIDER)
        .segment("namespaces")
        .name("namespaceName", namespace)
}

/// Namespace operations service
pub struct NamespaceService;

impl NamespaceService {
    /// List namespaces in a subscription, or in one resource group when given
    ///
    /// # Arguments
    /// * `client` - Management client
    /// * `subscription` - Subscription id
    /// * `resource_group` - Optional resource group filter
    pub async fn list_namespaces(
        client: &ArmClient,
        subscription: &str,
        resource_group: Option<&str>,
    ) -> EventHubsResult<Vec<NamespaceInfo>> {
        let scope = match resource_group {
            Some(rg) => resource_group_path(subscription, rg)?,
            None => ResourcePath::new().segment("subscriptions").name("subscription", subscription)?,
        };
        let path = scope.segment("providers").segment(PROVIDER).segment("namespaces");
        let resources: Vec<NamespaceResource> = client.list(path.as_str()).await?;
        resources
            .into_iter()
            .map(|resource| Namespace::try_from(resource).map(|namespace| namespace.info()))
            .collect()
    }

    /// Get a single namespace, `None` when it does not exist
    pub async fn find_namespace(
        client: &ArmClient,
        subscription: &str,
        resource_group: &str,
        namespace: &str,
    ) -> EventHubsResult<Option<Namespace>> {
        let path = namespace_path(subscription, resource_group, namespace)?;
        match client.get_optional::<NamespaceResource>(path.as_str()).await? {
            Some(resource) => Namespace::try_from(resource).map(Some),
            None => Ok(None),
        }
    }

    /// Fails with the management plane error when the namespace is not reachable
    pub(crate) async fn ensure_namespace(
        client: &ArmClient,
        subscription: &str,
        resource_group: &str,
        namespace: &str,
    ) -> EventHubsResult<()> {
        let path = namespace_path(subscription, resource_group, namespace)?;
        client.get::<serde_json::Value>(path.as_str()).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use eventhubs_common::credential::StaticTokenCredential;
    use mockito::Server;
    use serde_json::json;

    use super::*;

    fn client(server: &Server) -> ArmClient {
        ArmClient::new(server.url(), "2024-01-01", Arc::new(StaticTokenCredential::new("token")))
    }

    fn namespace_json(rg: &str, name: &str) -> serde_json::Value {
        json!({
            "id": format!("/subscriptions/sub/resourceGroups/{rg}/providers/Microsoft.EventHub/namespaces/{name}"),
            "name": name,
            "location": "westus",
            "properties": {"status": "Active"}
        })
    }

    #[tokio::test]
    async fn test_list_namespaces_in_resource_group() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/subscriptions/sub/resourceGroups/rg1/providers/Microsoft.EventHub/namespaces")
            .with_status(200)
            .with_body(json!({"value": [namespace_json("rg1", "a"), namespace_json("rg1", "b")]}).to_string())
            .create_async()
            .await;

        let namespaces = NamespaceService::list_namespaces(&client(&server), "sub", Some("rg1"))
            .await
            .unwrap();
        assert_eq!(namespaces.len(), 2);
        assert_eq!(namespaces[1].name, "b");
        assert_eq!(namespaces[1].resource_group, "rg1");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_list_namespaces_in_subscription() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/subscriptions/sub/providers/Microsoft.EventHub/namespaces")
            .with_status(200)
            .with_body(json!({"value": [namespace_json("rg2", "c")]}).to_string())
            .create_async()
            .await;

        let namespaces = NamespaceService::list_namespaces(&client(&server), "sub", None).await.unwrap();
        assert_eq!(namespaces[0].resource_group, "rg2");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_find_missing_namespace() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/subscriptions/sub/resourceGroups/rg1/providers/Microsoft.EventHub/namespaces/gone")
            .with_status(404)
            .with_body(r#"{"error":{"code":"ResourceNotFound","message":"not found"}}"#)
            .create_async()
            .await;

        let namespace = NamespaceService::find_namespace(&client(&server), "sub", "rg1", "gone")
            .await
            .unwrap();
        assert!(namespace.is_none());
    }
}
