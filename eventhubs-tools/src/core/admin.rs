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

//! Management client builder
//!
//! [`AdminBuilder`] turns the layered [`AdminConfig`] plus per-request overrides (tenant,
//! retry policy) into a ready to use [`ArmClient`].

use std::sync::Arc;
use std::time::Duration;

use eventhubs_common::arm_client::ArmClient;
use eventhubs_common::config::AdminConfig;
use eventhubs_common::credential::ChainedTokenCredential;
use eventhubs_common::credential::TokenCredential;
use eventhubs_common::retry::RetryPolicy;

use crate::core::EventHubsResult;

/// Builder for creating and configuring management clients
///
/// # Examples
///
/// ```rust,ignore
/// use eventhubs_tools::core::admin::AdminBuilder;
///
/// let client = AdminBuilder::from_config(&config)?
///     .tenant("72f988bf-86f1-41af-91ab-2d7cd011db47")
///     .build();
/// ```
#[derive(Clone, Default)]
pub struct AdminBuilder {
    endpoint: Option<String>,
    authority_host: Option<String>,
    api_version: Option<String>,
    tenant: Option<String>,
    retry_policy: Option<RetryPolicy>,
    poll_interval: Option<Duration>,
    operation_timeout: Option<Duration>,
    credential: Option<Arc<dyn TokenCredential>>,
}

impl std::fmt::Debug for AdminBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminBuilder")
            .field("endpoint", &self.endpoint)
            .field("authority_host", &self.authority_host)
            .field("api_version", &self.api_version)
            .field("tenant", &self.tenant)
            .field("retry_policy", &self.retry_policy)
            .field("operation_timeout", &self.operation_timeout)
            .field("credential", &self.credential.as_ref().map(|c| c.name()))
            .finish()
    }
}

impl AdminBuilder {
    /// Create a new builder with default configuration
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a builder from the loaded configuration
    pub fn from_config(config: &AdminConfig) -> EventHubsResult<Self> {
        let mut builder = Self::new()
            .endpoint(config.arm_endpoint.clone())
            .authority_host(config.authority_host.clone())
            .api_version(config.api_version.clone())
            .retry_policy(config.retry.to_policy()?)
            .operation_timeout(config.operation_timeout()?);
        builder.tenant = config.tenant.clone();
        Ok(builder)
    }

    /// Set the management endpoint, e.g. `https://management.azure.com`
    #[inline]
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    #[inline]
    pub fn authority_host(mut self, authority_host: impl Into<String>) -> Self {
        self.authority_host = Some(authority_host.into());
        self
    }

    #[inline]
    pub fn api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = Some(api_version.into());
        self
    }

    /// Set the tenant tokens are requested for
    #[inline]
    pub fn tenant(mut self, tenant: impl Into<String>) -> Self {
        self.tenant = Some(tenant.into());
        self
    }

    #[inline]
    pub fn retry_policy(mut self, retry_policy: RetryPolicy) -> Self {
        self.retry_policy = Some(retry_policy);
        self
    }

    /// Interval between long running operation polls
    #[inline]
    pub fn poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = Some(poll_interval);
        self
    }

    /// How long to wait for a long running operation before giving up
    #[inline]
    pub fn operation_timeout(mut self, operation_timeout: Duration) -> Self {
        self.operation_timeout = Some(operation_timeout);
        self
    }

    /// Use a specific credential instead of the default chain
    #[inline]
    pub fn credential(mut self, credential: Arc<dyn TokenCredential>) -> Self {
        self.credential = Some(credential);
        self
    }

    /// Build the management client
    ///
    /// Without an explicit credential the default chain is used: `AZURE_ACCESS_TOKEN`, then the
    /// service principal environment variables, then the Azure CLI.
    pub fn build(self) -> ArmClient {
        let authority_host = self
            .authority_host
            .unwrap_or_else(|| eventhubs_common::config::DEFAULT_AUTHORITY_HOST.to_string());
        let credential = self
            .credential
            .unwrap_or_else(|| Arc::new(ChainedTokenCredential::default_chain(&authority_host)));
        let client = ArmClient::new(
            self.endpoint
                .unwrap_or_else(|| eventhubs_common::config::DEFAULT_ARM_ENDPOINT.to_string()),
            self.api_version
                .unwrap_or_else(|| eventhubs_common::config::DEFAULT_API_VERSION.to_string()),
            credential,
        )
        .with_tenant(self.tenant)
        .with_retry_policy(self.retry_policy.unwrap_or_default());
        let client = match self.operation_timeout {
            Some(timeout) => client.with_operation_timeout(timeout),
            None => client,
        };
        match self.poll_interval {
            Some(interval) => client.with_poll_interval(interval),
            None => client,
        }
    }
}
