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

//! Layered configuration for the admin tools.
//!
//! Sources, lowest precedence first: built-in defaults, the user config file
//! (`<config dir>/eventhubs-admin/config.toml`, optional), an explicit file passed on the
//! command line (required when given) and `EVENTHUBS_ADMIN__*` environment variables.

use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use config::Config;
use config::Environment;
use config::File;
use eventhubs_error::EventHubsError;
use eventhubs_error::EventHubsResult;
use serde::Deserialize;
use serde::Serialize;

use crate::retry::RetryMode;
use crate::retry::RetryPolicy;

pub const DEFAULT_ARM_ENDPOINT: &str = "https://management.azure.com";
pub const DEFAULT_AUTHORITY_HOST: &str = "https://login.microsoftonline.com";
pub const DEFAULT_API_VERSION: &str = "2024-01-01";
pub const ENV_PREFIX: &str = "EVENTHUBS_ADMIN";
pub const DEFAULT_OPERATION_TIMEOUT_SECS: f64 = 600.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub delay_secs: f64,
    pub max_delay_secs: f64,
    pub mode: RetryMode,
    pub network_timeout_secs: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        let policy = RetryPolicy::default();
        Self {
            max_retries: policy.max_retries,
            delay_secs: policy.delay.as_secs_f64(),
            max_delay_secs: policy.max_delay.as_secs_f64(),
            mode: policy.mode,
            network_timeout_secs: policy.network_timeout.as_secs_f64(),
        }
    }
}

impl RetryConfig {
    pub fn to_policy(&self) -> EventHubsResult<RetryPolicy> {
        Ok(RetryPolicy {
            max_retries: self.max_retries,
            delay: seconds("retry.delay_secs", self.delay_secs)?,
            max_delay: seconds("retry.max_delay_secs", self.max_delay_secs)?,
            mode: self.mode,
            network_timeout: seconds("retry.network_timeout_secs", self.network_timeout_secs)?,
        })
    }
}

fn seconds(key: &'static str, value: f64) -> EventHubsResult<Duration> {
    Duration::try_from_secs_f64(value).map_err(|e| EventHubsError::ConfigInvalidValue {
        key,
        value: value.to_string(),
        reason: e.to_string(),
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    pub arm_endpoint: String,
    pub authority_host: String,
    pub api_version: String,
    pub subscription: Option<String>,
    pub tenant: Option<String>,
    pub log_level: String,
    pub output: String,
    /// Upper bound for waiting on a long running ARM operation.
    pub operation_timeout_secs: f64,
    pub retry: RetryConfig,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            arm_endpoint: DEFAULT_ARM_ENDPOINT.to_string(),
            authority_host: DEFAULT_AUTHORITY_HOST.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            subscription: None,
            tenant: None,
            log_level: "WARN".to_string(),
            output: "json".to_string(),
            operation_timeout_secs: DEFAULT_OPERATION_TIMEOUT_SECS,
            retry: RetryConfig::default(),
        }
    }
}

impl AdminConfig {
    /// Location of the per-user config file, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("eventhubs-admin").join("config.toml"))
    }

    /// Loads the layered configuration.
    pub fn load(explicit: Option<&Path>) -> EventHubsResult<Self> {
        Self::load_from(Self::default_path().as_deref(), explicit)
    }

    pub fn operation_timeout(&self) -> EventHubsResult<Duration> {
        seconds("operation_timeout_secs", self.operation_timeout_secs)
    }

    pub fn load_from(user_file: Option<&Path>, explicit: Option<&Path>) -> EventHubsResult<Self> {
        let mut builder = Config::builder();
        if let Some(path) = user_file {
            builder = builder.add_source(File::from(path).required(false));
        }
        if let Some(path) = explicit {
            builder = builder.add_source(File::from(path).required(true));
        }
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().map_err(|e| EventHubsError::ConfigParseFailed {
            key: "config",
            reason: e.to_string(),
        })?;
        let admin_config: AdminConfig = config.try_deserialize().map_err(|e| EventHubsError::ConfigParseFailed {
            key: "config",
            reason: e.to_string(),
        })?;
        admin_config.validate()?;
        Ok(admin_config)
    }

    fn validate(&self) -> EventHubsResult<()> {
        for (key, value) in [
            ("arm_endpoint", &self.arm_endpoint),
            ("authority_host", &self.authority_host),
        ] {
            url::Url::parse(value).map_err(|e| EventHubsError::ConfigInvalidValue {
                key,
                value: value.clone(),
                reason: e.to_string(),
            })?;
        }
        if self.api_version.trim().is_empty() {
            return Err(EventHubsError::ConfigInvalidValue {
                key: "api_version",
                value: self.api_version.clone(),
                reason: "must not be empty".to_string(),
            });
        }
        self.operation_timeout()?;
        self.retry.to_policy().map(|_| ())
    }
}
