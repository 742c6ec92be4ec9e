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

pub mod command_context;
pub mod command_response;
mod consumer_group_commands;
mod event_hub_commands;
mod namespace_commands;

use std::time::Duration;

use clap::Parser;
use clap::Subcommand;
use eventhubs_common::config::AdminConfig;
use eventhubs_common::retry::RetryMode;
use eventhubs_common::retry::RetryPolicy;
use serde::Serialize;
use tabled::settings::Style;
use tabled::Table;
use tabled::Tabled;

use crate::cli::validators::OptionChecks;
use crate::commands::command_context::CommandContext;
use crate::commands::command_response::CommandResponse;
use crate::core::service::RequestOptions;
use crate::core::EventHubsError;
use crate::core::EventHubsResult;

/// A trait that defines the execution behavior for commands.
///
/// Implementations validate their options, call the service held by the context and turn the
/// outcome, success or failure, into a [`CommandResponse`].
pub trait CommandExecute {
    /// Executes the command.
    ///
    /// # Parameters
    /// - `context`: The service, configuration and terminal capabilities for this invocation.
    async fn execute(&self, context: &CommandContext) -> CommandResponse;
}

#[derive(Debug, Parser, Clone, Default)]
pub struct CommonArgs {
    /// Subscription id or display name
    #[arg(
        long = "subscription",
        env = "AZURE_SUBSCRIPTION_ID",
        help = "The Azure subscription ID or name, falls back to the configured subscription"
    )]
    pub subscription: Option<String>,

    /// Tenant to authenticate against
    #[arg(long = "tenant", help = "The Microsoft Entra ID tenant ID or name")]
    pub tenant: Option<String>,

    #[arg(long = "retry-delay", value_name = "SECONDS", help = "Initial delay between retry attempts")]
    pub retry_delay: Option<f64>,

    #[arg(long = "retry-max-delay", value_name = "SECONDS", help = "Maximum delay between retry attempts")]
    pub retry_max_delay: Option<f64>,

    #[arg(long = "retry-max-retries", help = "Maximum number of retry attempts")]
    pub retry_max_retries: Option<u32>,

    #[arg(long = "retry-mode", value_name = "MODE", help = "Retry strategy: fixed or exponential")]
    pub retry_mode: Option<String>,

    #[arg(
        long = "retry-network-timeout",
        value_name = "SECONDS",
        help = "Network timeout for a single attempt"
    )]
    pub retry_network_timeout: Option<f64>,

    /// Skip confirmation prompts (automatically answer 'yes')
    #[arg(
        short = 'y',
        long = "yes",
        help = "Skip confirmation prompts for dangerous operations"
    )]
    pub skip_confirm: bool,
}

fn seconds(param: &'static str, value: f64) -> EventHubsResult<Duration> {
    Duration::try_from_secs_f64(value)
        .map_err(|_| EventHubsError::invalid_argument(param, format!("'{value}' is not a valid number of seconds")))
}

impl CommonArgs {
    /// `--subscription`, then the configured subscription
    pub fn subscription(&self, config: &AdminConfig) -> Option<String> {
        self.subscription
            .clone()
            .or_else(|| config.subscription.clone())
            .filter(|s| !s.trim().is_empty())
    }

    /// The configured retry policy with any `--retry-*` overrides, `None` without overrides
    pub fn retry_policy(&self, config: &AdminConfig) -> EventHubsResult<Option<RetryPolicy>> {
        if self.retry_delay.is_none()
            && self.retry_max_delay.is_none()
            && self.retry_max_retries.is_none()
            && self.retry_mode.is_none()
            && self.retry_network_timeout.is_none()
        {
            return Ok(None);
        }
        let mut policy = config.retry.to_policy()?;
        if let Some(delay) = self.retry_delay {
            policy.delay = seconds("retryDelay", delay)?;
        }
        if let Some(max_delay) = self.retry_max_delay {
            policy.max_delay = seconds("retryMaxDelay", max_delay)?;
        }
        if let Some(max_retries) = self.retry_max_retries {
            policy.max_retries = max_retries;
        }
        if let Some(mode) = &self.retry_mode {
            policy.mode = mode.parse::<RetryMode>()?;
        }
        if let Some(timeout) = self.retry_network_timeout {
            policy.network_timeout = seconds("retryNetworkTimeout", timeout)?;
        }
        Ok(Some(policy))
    }

    /// Adds the checks for the shared options
    pub fn check(&self, checks: &mut OptionChecks, config: &AdminConfig) {
        checks
            .require("--subscription", self.subscription(config).as_deref())
            .check(self.retry_policy(config).map(|_| ()));
    }

    pub fn request_options(&self, config: &AdminConfig) -> EventHubsResult<RequestOptions> {
        Ok(RequestOptions {
            subscription: self.subscription(config).unwrap_or_default(),
            tenant: self.tenant.clone().or_else(|| config.tenant.clone()),
            retry_policy: self.retry_policy(config)?,
        })
    }
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(subcommand)]
    #[command(about = "Event Hubs namespace commands")]
    #[command(name = "namespace")]
    Namespace(namespace_commands::NamespaceCommands),

    #[command(subcommand)]
    #[command(about = "Event hub commands")]
    #[command(name = "eventhub")]
    EventHub(event_hub_commands::EventHubCommands),

    #[command(subcommand)]
    #[command(about = "Consumer group commands")]
    #[command(name = "consumergroup")]
    ConsumerGroup(consumer_group_commands::ConsumerGroupCommands),

    #[command(about = "Category commands show")]
    Show(ClassificationTablePrint),
}

impl CommandExecute for Commands {
    async fn execute(&self, context: &CommandContext) -> CommandResponse {
        match self {
            Commands::Namespace(value) => value.execute(context).await,
            Commands::EventHub(value) => value.execute(context).await,
            Commands::ConsumerGroup(value) => value.execute(context).await,
            Commands::Show(value) => value.execute(context).await,
        }
    }
}

// ================for commands table print================
#[derive(Tabled, Serialize, Clone)]
struct Command {
    #[tabled(rename = "Category")]
    category: &'static str,

    #[tabled(rename = "Command")]
    command: &'static str,

    #[tabled(rename = "Remark")]
    remark: &'static str,
}

const COMMANDS: [Command; 7] = [
    Command {
        category: "Namespace",
        command: "namespace get",
        remark: "List namespaces, or get one namespace in detail.",
    },
    Command {
        category: "EventHub",
        command: "eventhub get",
        remark: "List event hubs of a namespace, or get one event hub.",
    },
    Command {
        category: "EventHub",
        command: "eventhub create-or-update",
        remark: "Create or update an event hub.",
    },
    Command {
        category: "EventHub",
        command: "eventhub delete",
        remark: "Delete an event hub.",
    },
    Command {
        category: "ConsumerGroup",
        command: "consumergroup get",
        remark: "List consumer groups of an event hub, or get one consumer group.",
    },
    Command {
        category: "ConsumerGroup",
        command: "consumergroup update",
        remark: "Create or update a consumer group.",
    },
    Command {
        category: "ConsumerGroup",
        command: "consumergroup delete",
        remark: "Delete a consumer group.",
    },
];

#[derive(Parser)]
pub struct ClassificationTablePrint;

impl ClassificationTablePrint {
    /// Renders the command overview as a table
    pub fn render(&self) -> String {
        let mut table = Table::new(COMMANDS);
        table.with(Style::extended());
        table.to_string()
    }
}

impl CommandExecute for ClassificationTablePrint {
    async fn execute(&self, _context: &CommandContext) -> CommandResponse {
        CommandResponse::success(&serde_json::json!({ "commands": COMMANDS }))
    }
}
