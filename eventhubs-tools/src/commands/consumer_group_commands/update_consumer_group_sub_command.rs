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
use crate::core::consumer_group::types::ConsumerGroup;
use crate::ui::progress;

const MESSAGES: ErrorMessages = ErrorMessages {
    forbidden: "Access denied. Please ensure you have sufficient permissions to create or update consumer groups of the specified event hub.",
    not_found: "The specified event hub, namespace, resource group, or subscription was not found. Please verify all names and identifiers.",
    conflict: Some("Conflict occurred. The consumer group may be in use or in a transitional state. Please try again later."),
    missing_resource: None,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ConsumerGroupUpdateResult {
    consumer_group: ConsumerGroup,
}

#[derive(Debug, Clone, Parser)]
pub struct UpdateConsumerGroupSubCommand {
    /// Common arguments
    #[command(flatten)]
    common_args: CommonArgs,

    #[arg(short = 'g', long = "resource-group", help = "The name of the Azure resource group")]
    resource_group: Option<String>,

    #[arg(long = "namespace", help = "The name of the Event Hubs namespace")]
    namespace: Option<String>,

    #[arg(long = "eventhub", help = "The name of the event hub")]
    event_hub: Option<String>,

    #[arg(long = "consumer-group", help = "The name of the consumer group to create or update")]
    consumer_group: Option<String>,

    #[arg(long = "user-metadata", help = "Free-form user metadata stored on the consumer group")]
    user_metadata: Option<String>,
}

impl CommandExecute for UpdateConsumerGroupSubCommand {
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

        let spinner = context.spinner(&format!("Applying consumer group '{consumer_group}'..."));
        let result = context
            .service()
            .update_consumer_group(
                consumer_group,
                event_hub,
                namespace,
                resource_group,
                self.user_metadata.clone(),
                &options,
            )
            .await;
        progress::finish_spinner(spinner);

        match result {
            Ok(consumer_group) => CommandResponse::success(&ConsumerGroupUpdateResult { consumer_group }),
            Err(e) => CommandResponse::from_error(&e, &MESSAGES),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use eventhubs_error::EventHubsError;

    use super::*;
    use crate::commands::test_support::context;
    use crate::commands::test_support::SUBSCRIPTION;
    use crate::core::service::MockEventHubsService;

    fn parse(args: &[&str]) -> UpdateConsumerGroupSubCommand {
        UpdateConsumerGroupSubCommand::try_parse_from(
            ["update", "--subscription", SUBSCRIPTION].iter().chain(args.iter()).copied(),
        )
        .unwrap()
    }

    const SCOPE: [&str; 8] = [
        "-g",
        "rg",
        "--namespace",
        "ns",
        "--eventhub",
        "orders",
        "--consumer-group",
        "audit",
    ];

    #[tokio::test]
    async fn test_update_with_metadata() {
        let mut service = MockEventHubsService::new();
        service
            .expect_update_consumer_group()
            .withf(|cg, eh, ns, rg, metadata, _| {
                cg == "audit" && eh == "orders" && ns == "ns" && rg == "rg" && metadata.as_deref() == Some("team=ops")
            })
            .times(1)
            .returning(|cg, eh, ns, rg, metadata, _| {
                Ok(ConsumerGroup {
                    name: cg.to_string(),
                    id: format!(
                        "/subscriptions/{SUBSCRIPTION}/resourceGroups/{rg}/providers/Microsoft.EventHub/namespaces/{ns}/eventhubs/{eh}/consumergroups/{cg}"
                    ),
                    resource_group: rg.to_string(),
                    namespace: ns.to_string(),
                    event_hub: eh.to_string(),
                    location: None,
                    user_metadata: metadata,
                    creation_time: None,
                    updated_time: None,
                })
            });

        let mut args = SCOPE.to_vec();
        args.extend(["--user-metadata", "team=ops"]);
        let response = parse(&args).execute(&context(service)).await;
        assert_eq!(response.status, 200);
        let results = response.results.unwrap();
        assert_eq!(results["consumerGroup"]["userMetadata"], "team=ops");
        assert_eq!(results["consumerGroup"]["eventHub"], "orders");
        assert!(results["consumerGroup"].get("location").is_none());
    }

    #[tokio::test]
    async fn test_every_missing_option_is_listed() {
        let mut service = MockEventHubsService::new();
        service.expect_update_consumer_group().never();

        let response = parse(&["--eventhub", "orders"]).execute(&context(service)).await;
        assert_eq!(response.status, 400);
        assert_eq!(
            response.message,
            "Missing Required options: --resource-group, --namespace, --consumer-group"
        );
    }

    #[tokio::test]
    async fn test_missing_event_hub_maps_to_404() {
        let mut service = MockEventHubsService::new();
        service
            .expect_update_consumer_group()
            .returning(|_, _, _, _, _, _| Err(EventHubsError::request_failed(404, None, "Event hub 'orders' not found.")));

        let response = parse(&SCOPE).execute(&context(service)).await;
        assert_eq!(response.status, 404);
        assert_eq!(response.message, MESSAGES.not_found);
    }
}
