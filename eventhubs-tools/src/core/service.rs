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

//! Event Hubs service facade
//!
//! [`EventHubsService`] is the seam between commands and the management plane. Commands only
//! see this trait, which keeps them testable with a mock.

use async_trait::async_trait;
use eventhubs_common::arm_client::ArmClient;
use eventhubs_common::retry::RetryPolicy;
use serde::Deserialize;
use tracing::error;
use uuid::Uuid;

use crate::core::admin::AdminBuilder;
use crate::core::consumer_group::operations::ConsumerGroupService;
use crate::core::consumer_group::types::ConsumerGroup;
use crate::core::event_hub::operations::EventHubService;
use crate::core::event_hub::types::EventHub;
use crate::core::event_hub::types::EventHubSettings;
use crate::core::namespace::operations::NamespaceService;
use crate::core::namespace::types::Namespace;
use crate::core::namespace::types::NamespaceInfo;
use crate::core::EventHubsError;
use crate::core::EventHubsResult;

/// Subscriptions API version, independent of the Event Hubs provider version
const SUBSCRIPTIONS_API_VERSION: &str = "2022-12-01";

/// Per request settings shared by every operation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    /// Subscription id or display name
    pub subscription: String,
    pub tenant: Option<String>,
    pub retry_policy: Option<RetryPolicy>,
}

impl RequestOptions {
    pub fn new(subscription: impl Into<String>) -> Self {
        Self {
            subscription: subscription.into(),
            ..Default::default()
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventHubsService: Send + Sync {
    /// Namespaces of the subscription, or of one resource group
    async fn get_namespaces(
        &self,
        resource_group: Option<String>,
        options: &RequestOptions,
    ) -> EventHubsResult<Vec<NamespaceInfo>>;

    /// A single namespace; [`EventHubsError::NotFound`] when it does not exist
    async fn get_namespace(
        &self,
        namespace: &str,
        resource_group: &str,
        options: &RequestOptions,
    ) -> EventHubsResult<Namespace>;

    async fn get_event_hubs(
        &self,
        namespace: &str,
        resource_group: &str,
        options: &RequestOptions,
    ) -> EventHubsResult<Vec<EventHub>>;

    /// `None` when the event hub does not exist; a missing namespace is an error
    async fn get_event_hub(
        &self,
        event_hub: &str,
        namespace: &str,
        resource_group: &str,
        options: &RequestOptions,
    ) -> EventHubsResult<Option<EventHub>>;

    async fn create_or_update_event_hub(
        &self,
        event_hub: &str,
        namespace: &str,
        resource_group: &str,
        settings: &EventHubSettings,
        options: &RequestOptions,
    ) -> EventHubsResult<EventHub>;

    /// `false` when there was no such event hub
    async fn delete_event_hub(
        &self,
        event_hub: &str,
        namespace: &str,
        resource_group: &str,
        options: &RequestOptions,
    ) -> EventHubsResult<bool>;

    async fn get_consumer_groups(
        &self,
        event_hub: &str,
        namespace: &str,
        resource_group: &str,
        options: &RequestOptions,
    ) -> EventHubsResult<Vec<ConsumerGroup>>;

    async fn get_consumer_group(
        &self,
        consumer_group: &str,
        event_hub: &str,
        namespace: &str,
        resource_group: &str,
        options: &RequestOptions,
    ) -> EventHubsResult<Option<ConsumerGroup>>;

    /// Create or update a consumer group
    async fn update_consumer_group(
        &self,
        consumer_group: &str,
        event_hub: &str,
        namespace: &str,
        resource_group: &str,
        user_metadata: Option<String>,
        options: &RequestOptions,
    ) -> EventHubsResult<ConsumerGroup>;

    /// `false` when there was no such consumer group
    async fn delete_consumer_group(
        &self,
        consumer_group: &str,
        event_hub: &str,
        namespace: &str,
        resource_group: &str,
        options: &RequestOptions,
    ) -> EventHubsResult<bool>;
}

/// Rejects empty required parameters before anything goes over the wire.
fn require(param: &'static str, value: &str) -> EventHubsResult<()> {
    if value.trim().is_empty() {
        return Err(EventHubsError::invalid_argument(param, "Value cannot be null or empty."));
    }
    Ok(())
}

fn treat_not_found_as_absent(result: EventHubsResult<bool>) -> EventHubsResult<bool> {
    match result {
        Err(e) if e.is_not_found() => Ok(false),
        other => other,
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubscriptionResource {
    subscription_id: Option<String>,
    display_name: Option<String>,
}

/// [`EventHubsService`] backed by the Azure Resource Manager
#[derive(Debug, Clone)]
pub struct DefaultEventHubsService {
    admin: AdminBuilder,
}

impl DefaultEventHubsService {
    pub fn new(admin: AdminBuilder) -> Self {
        Self { admin }
    }

    /// Builds the client for one request and resolves the subscription to its id.
    async fn connect(&self, options: &RequestOptions) -> EventHubsResult<(ArmClient, String)> {
        require("subscription", &options.subscription)?;
        let mut builder = self.admin.clone();
        if let Some(tenant) = options.tenant.as_deref().filter(|t| !t.is_empty()) {
            builder = builder.tenant(tenant);
        }
        if let Some(policy) = options.retry_policy.clone() {
            builder = builder.retry_policy(policy);
        }
        let client = builder.build();
        let subscription = resolve_subscription(&client, options.subscription.trim()).await?;
        Ok((client, subscription))
    }
}

/// Accepts a subscription id as is and looks display names up.
async fn resolve_subscription(client: &ArmClient, subscription: &str) -> EventHubsResult<String> {
    if Uuid::parse_str(subscription).is_ok() {
        return Ok(subscription.to_string());
    }
    let path = format!("/subscriptions?api-version={SUBSCRIPTIONS_API_VERSION}");
    let subscriptions: Vec<SubscriptionResource> = client.list(&path).await?;
    subscriptions
        .into_iter()
        .find(|s| {
            s.display_name
                .as_deref()
                .is_some_and(|name| name.eq_ignore_ascii_case(subscription))
        })
        .and_then(|s| s.subscription_id)
        .ok_or_else(|| {
            EventHubsError::invalid_argument(
                "subscription",
                format!("Could not find subscription with name {subscription}"),
            )
        })
}

#[async_trait]
impl EventHubsService for DefaultEventHubsService {
    async fn get_namespaces(
        &self,
        resource_group: Option<String>,
        options: &RequestOptions,
    ) -> EventHubsResult<Vec<NamespaceInfo>> {
        let resource_group = resource_group.filter(|rg| !rg.trim().is_empty());
        async {
            let (client, subscription) = self.connect(options).await?;
            NamespaceService::list_namespaces(&client, &subscription, resource_group.as_deref()).await
        }
        .await
        .inspect_err(|e| {
            error!(
                subscription = %options.subscription,
                resource_group = ?resource_group,
                "Error listing Event Hubs namespaces: {e}"
            )
        })
    }

    async fn get_namespace(
        &self,
        namespace: &str,
        resource_group: &str,
        options: &RequestOptions,
    ) -> EventHubsResult<Namespace> {
        async {
            require("namespaceName", namespace)?;
            require("resourceGroup", resource_group)?;
            let (client, subscription) = self.connect(options).await?;
            NamespaceService::find_namespace(&client, &subscription, resource_group, namespace)
                .await?
                .ok_or_else(|| {
                    EventHubsError::not_found(format!(
                        "Event Hubs namespace '{namespace}' not found for subscription '{}'.",
                        options.subscription
                    ))
                })
        }
        .await
        .inspect_err(|e| {
            error!(
                namespace,
                subscription = %options.subscription,
                "Error retrieving Event Hubs namespace: {e}"
            )
        })
    }

    async fn get_event_hubs(
        &self,
        namespace: &str,
        resource_group: &str,
        options: &RequestOptions,
    ) -> EventHubsResult<Vec<EventHub>> {
        async {
            require("namespaceName", namespace)?;
            require("resourceGroup", resource_group)?;
            let (client, subscription) = self.connect(options).await?;
            EventHubService::list_event_hubs(&client, &subscription, resource_group, namespace).await
        }
        .await
        .inspect_err(|e| {
            error!(
                namespace,
                resource_group,
                subscription = %options.subscription,
                "Error listing event hubs: {e}"
            )
        })
    }

    async fn get_event_hub(
        &self,
        event_hub: &str,
        namespace: &str,
        resource_group: &str,
        options: &RequestOptions,
    ) -> EventHubsResult<Option<EventHub>> {
        async {
            require("eventHubName", event_hub)?;
            require("namespaceName", namespace)?;
            require("resourceGroup", resource_group)?;
            let (client, subscription) = self.connect(options).await?;
            NamespaceService::ensure_namespace(&client, &subscription, resource_group, namespace).await?;
            EventHubService::find_event_hub(&client, &subscription, resource_group, namespace, event_hub).await
        }
        .await
        .inspect_err(|e| {
            error!(
                event_hub,
                namespace,
                resource_group,
                subscription = %options.subscription,
                "Error getting event hub: {e}"
            )
        })
    }

    async fn create_or_update_event_hub(
        &self,
        event_hub: &str,
        namespace: &str,
        resource_group: &str,
        settings: &EventHubSettings,
        options: &RequestOptions,
    ) -> EventHubsResult<EventHub> {
        async {
            require("eventHubName", event_hub)?;
            require("namespaceName", namespace)?;
            require("resourceGroup", resource_group)?;
            let (client, subscription) = self.connect(options).await?;
            EventHubService::create_or_update_event_hub(
                &client,
                &subscription,
                resource_group,
                namespace,
                event_hub,
                settings,
            )
            .await
        }
        .await
        .inspect_err(|e| {
            error!(
                event_hub,
                namespace,
                resource_group,
                subscription = %options.subscription,
                "Error creating or updating event hub: {e}"
            )
        })
    }

    async fn delete_event_hub(
        &self,
        event_hub: &str,
        namespace: &str,
        resource_group: &str,
        options: &RequestOptions,
    ) -> EventHubsResult<bool> {
        async {
            require("eventHubName", event_hub)?;
            require("namespaceName", namespace)?;
            require("resourceGroup", resource_group)?;
            let (client, subscription) = self.connect(options).await?;
            NamespaceService::ensure_namespace(&client, &subscription, resource_group, namespace).await?;
            treat_not_found_as_absent(
                EventHubService::delete_event_hub(&client, &subscription, resource_group, namespace, event_hub).await,
            )
        }
        .await
        .inspect_err(|e| {
            error!(
                event_hub,
                namespace,
                resource_group,
                subscription = %options.subscription,
                "Error deleting event hub: {e}"
            )
        })
    }

    async fn get_consumer_groups(
        &self,
        event_hub: &str,
        namespace: &str,
        resource_group: &str,
        options: &RequestOptions,
    ) -> EventHubsResult<Vec<ConsumerGroup>> {
        async {
            require("eventHubName", event_hub)?;
            require("namespaceName", namespace)?;
            require("resourceGroup", resource_group)?;
            let (client, subscription) = self.connect(options).await?;
            ConsumerGroupService::list_consumer_groups(&client, &subscription, resource_group, namespace, event_hub)
                .await
        }
        .await
        .inspect_err(|e| {
            error!(
                event_hub,
                namespace,
                resource_group,
                "Error listing consumer groups: {e}"
            )
        })
    }

    async fn get_consumer_group(
        &self,
        consumer_group: &str,
        event_hub: &str,
        namespace: &str,
        resource_group: &str,
        options: &RequestOptions,
    ) -> EventHubsResult<Option<ConsumerGroup>> {
        async {
            require("consumerGroupName", consumer_group)?;
            require("eventHubName", event_hub)?;
            require("namespaceName", namespace)?;
            require("resourceGroup", resource_group)?;
            let (client, subscription) = self.connect(options).await?;
            EventHubService::ensure_event_hub(&client, &subscription, resource_group, namespace, event_hub).await?;
            ConsumerGroupService::find_consumer_group(
                &client,
                &subscription,
                resource_group,
                namespace,
                event_hub,
                consumer_group,
            )
            .await
        }
        .await
        .inspect_err(|e| {
            error!(
                consumer_group,
                event_hub,
                namespace,
                "Error getting consumer group: {e}"
            )
        })
    }

    async fn update_consumer_group(
        &self,
        consumer_group: &str,
        event_hub: &str,
        namespace: &str,
        resource_group: &str,
        user_metadata: Option<String>,
        options: &RequestOptions,
    ) -> EventHubsResult<ConsumerGroup> {
        async {
            require("consumerGroupName", consumer_group)?;
            require("eventHubName", event_hub)?;
            require("namespaceName", namespace)?;
            require("resourceGroup", resource_group)?;
            let (client, subscription) = self.connect(options).await?;
            EventHubService::ensure_event_hub(&client, &subscription, resource_group, namespace, event_hub).await?;
            ConsumerGroupService::create_or_update_consumer_group(
                &client,
                &subscription,
                resource_group,
                namespace,
                event_hub,
                consumer_group,
                user_metadata.as_deref(),
            )
            .await
        }
        .await
        .inspect_err(|e| {
            error!(
                consumer_group,
                event_hub,
                namespace,
                "Error creating/updating consumer group: {e}"
            )
        })
    }

    async fn delete_consumer_group(
        &self,
        consumer_group: &str,
        event_hub: &str,
        namespace: &str,
        resource_group: &str,
        options: &RequestOptions,
    ) -> EventHubsResult<bool> {
        async {
            require("consumerGroupName", consumer_group)?;
            require("eventHubName", event_hub)?;
            require("namespaceName", namespace)?;
            require("resourceGroup", resource_group)?;
            let (client, subscription) = self.connect(options).await?;
            EventHubService::ensure_event_hub(&client, &subscription, resource_group, namespace, event_hub).await?;
            treat_not_found_as_absent(
                ConsumerGroupService::delete_consumer_group(
                    &client,
                    &subscription,
                    resource_group,
                    namespace,
                    event_hub,
                    consumer_group,
                )
                .await,
            )
        }
        .await
        .inspect_err(|e| {
            error!(
                consumer_group,
                event_hub,
                namespace,
                "Error deleting consumer group: {e}"
            )
        })
    }
}
