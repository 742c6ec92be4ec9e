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

use crate::cli::validators::OptionChecks;
use crate::commands::command_context::CommandContext;
use crate::commands::command_response::CommandResponse;
use crate::commands::command_response::ErrorMessages;
use crate::commands::CommandExecute;
use crate::commands::CommonArgs;
use crate::ui::progress;

const MESSAGES: ErrorMessages = ErrorMessages {
    forbidden: "Access denied. Please ensure you have sufficient permissions to delete consumer groups of the specified event hub.",
    not_found: "The specified event hub, namespace, resource group, or subscription was not found. Note: If the consumer group doesn't exist, the operation succeeds with Deleted = false.",
    conflict: Some("Conflict occurred. The consumer group may be in use or in a transitional state. Please try again later."),
    missing_resource: None,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ConsumerGroupDeleteResult {
    deleted: bool,
    consumer_group_name: String,
    event_hub_name: String,
}

#[derive(Debug, Clone, Parser)]
pub struct DeleteConsumerGroupSubCommand {
    /// Common arguments
    #[command(flatten)]
    common_args: CommonArgs,

    #[arg(short = 'g', long = "resource-group", help = "The name of the Azure resource group")]
    resource_group: Option<String>,

    #[arg(long = "namespace", help = "The name of the Event Hubs namespace")]
    namespace: Option<String>,

    #[arg(long = "eventhub", help = "The name of the event hub")]
    event_hub: Option<String>,

    #[arg(long = "consumer-group", help = "The name of the consumer group to delete")]
    consumer_group: Option<String>,
}

impl CommandExecute for DeleteConsumerGroupSubCommand {
    async fn execute(&self, context: &CommandContext) -> CommandResponse {
        let mut checks = OptionChecks::new();
        self.common_args.check(&mut checks, context.config());
        checks
            .require("--resource-group", self.resource_group.as_deref())
            .require("--namespace", self.namespace.as_deref())
            .require("--eventhub", self.event_hub.as_deref())
            .require("--consumer-group", self.consumer_group.as_deref());
        if !checks.is_valid() {
            return CommandResponse::validation_failed(checks.into_messages());
        }
        let options = match self.common_args.request_options(context.config()) {
            Ok(options) => options,
            Err(e) => return CommandResponse::from_error(&e, &MESSAGES),
        };
        let consumer_group = self.consumer_group.as_deref().unwrap_or_default();
        let event_hub = self.event_hub.as_deref().unwrap_or_default();
        let namespace = self.namespace.as_deref().unwrap_or_default();
        let resource_group = self.resource_group.as_deref().unwrap_or_default();

        if !context.confirm(
            self.common_args.skip_confirm,
            "delete",
            &format!("consumer group '{consumer_group}' of event hub '{event_hub}'"),
        ) {
            return CommandResponse::cancelled();
        }

        let spinner = context.spinner(&format!("Deleting consumer group '{consumer_group}'..."));
        let result = context
            .service()
            .delete_consumer_group(consumer_group, event_hub, namespace, resource_group, &options)
            .await;
        progress::finish_spinner(spinner);

        match result {
            Ok(deleted) => CommandResponse::success(&ConsumerGroupDeleteResult {
                deleted,
                consumer_group_name: consumer_group.to_string(),
                event_hub_name: event_hub.to_string(),
            }),
            Err(e) => CommandResponse::from_error(&e, &MESSAGES),
        }
    }
}
