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

use clap::Parser;
use serde::Serialize;

use crate::cli::validators::validate_at_least_one;
use crate::cli::validators::OptionChecks;
use crate::commands::command_context::CommandContext;
use crate::commands::command_response::CommandResponse;
use crate::commands::command_response::ErrorMessages;
use crate::commands::CommandExecute;
use crate::commands::CommonArgs;
use crate::core::event_hub::types::EventHub;
use crate::core::event_hub::types::EventHubSettings;
use crate::core::event_hub::types::EventHubStatus;
use crate::core::EventHubsResult;
use crate::ui::progress;

const MESSAGES: ErrorMessages = ErrorMessages {
    forbidden: "Access denied. Please ensure you have sufficient permissions to create or update Event Hubs in the specified namespace and resource group.",
    not_found: "The specified namespace, resource group, or subscription was not found. Please verify all names and identifiers.",
    conflict: Some("Conflict occurred. The event hub may be in use or in a transitional state. Please try again later."),
    missing_resource: None,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EventHubUpdateResult {
    event_hub: EventHub,
}

#[derive(Debug, Clone, Parser)]
pub struct CreateOrUpdateEventHubSubCommand {
    /// Common arguments
    #[command(flatten)]
    common_args: CommonArgs,

    #[arg(short = 'g', long = "resource-group", help = "The name of the Azure resource group")]
    resource_group: Option<String>,

    #[arg(long = "namespace", help = "The name of the Event Hubs namespace")]
    namespace: Option<String>,

    #[arg(long = "eventhub", help = "The name of the event hub to create or update")]
    event_hub: Option<String>,

    #[arg(
        long = "partition-count",
        allow_negative_numbers = true,
        help = "Number of partitions. Can only be increased on tiers that allow it."
    )]
    partition_count: Option<i32>,

    #[arg(
        long = "message-retention-in-hours",
        allow_negative_numbers = true,
        help = "How long events are retained, in hours"
    )]
    message_retention_in_hours: Option<i64>,

    #[arg(
        long = "status",
        help = "Event hub status: Active, Disabled, SendDisabled, ReceiveDisabled, ..."
    )]
    status: Option<String>,
}

impl CreateOrUpdateEventHubSubCommand {
    fn status(&self) -> EventHubsResult<Option<EventHubStatus>> {
        self.status.as_deref().map(str::parse).transpose()
    }

    fn settings(&self) -> EventHubsResult<EventHubSettings> {
        Ok(EventHubSettings {
            partition_count: self.partition_count,
            message_retention_in_hours: self.message_retention_in_hours,
            status: self.status()?,
        })
    }
}

impl CommandExecute for CreateOrUpdateEventHubSubCommand {
    async fn execute(&self, context: &CommandContext) -> CommandResponse {
        let mut checks = OptionChecks::new();
        self.common_args.check(&mut checks, context.config());
        checks
            .require("--resource-group", self.resource_group.as_deref())
            .require("--namespace", self.namespace.as_deref())
            .require("--eventhub", self.event_hub.as_deref())
            .check(validate_at_least_one(
                "--partition-count",
                self.partition_count.map(i64::from),
            ))
            .check(validate_at_least_one(
                "--message-retention-in-hours",
                self.message_retention_in_hours,
            ));
        if !checks.is_valid() {
            return CommandResponse::validation_failed(checks.into_messages());
        }
        let (settings, options) = match self
            .settings()
            .and_then(|settings| Ok((settings, self.common_args.request_options(context.config())?)))
        {
            Ok(prepared) => prepared,
            Err(e) => return CommandResponse::from_error(&e, &MESSAGES),
        };
        let event_hub = self.event_hub.as_deref().unwrap_or_default();
        let namespace = self.namespace.as_deref().unwrap_or_default();
        let resource_group = self.resource_group.as_deref().unwrap_or_default();

        let spinner = context.spinner(&format!("Applying event hub '{event_hub}'..."));
        let result = context
            .service()
            .create_or_update_event_hub(event_hub, namespace, resource_group, &settings, &options)
            .await;
        progress::finish_spinner(spinner);

        match result {
            Ok(event_hub) => CommandResponse::success(&EventHubUpdateResult { event_hub }),
            Err(e) => CommandResponse::from_error(&e, &MESSAGES),
        }
    }
}
