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

const MESSAGES: ErrorMessages = ErrorMessages {
    forbidden: "Access denied. Please ensure you have sufficient permissions to access consumer groups of the specified event hub.",
    not_found: "The specified event hub, namespace, resource group, or subscription was not found. Please verify all names and identifiers.",
    conflict: None,
    missing_resource: None,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ConsumerGroupGetResult {
    consumer_groups: Vec<ConsumerGroup>,
}

#[derive(Debug, Clone, Parser)]
pub struct GetConsumerGroupSubCommand {
    /// Common arguments
    #[command(flatten)]
    common_args: CommonArgs,

    #[arg(short = 'g', long = "resource-group", help = "The name of the Azure resource group")]
    resource_group: Option<String>,

    #[arg(long = "namespace", help = "The name of the Event Hubs namespace")]
    namespace: Option<String>,

    #[arg(long = "eventhub", help = "The name of the event hub")]
    event_hub: Option<String>,

    #[arg(long = "consumer-group", help = "The name of a single consumer group to get")]
    consumer_group: Option<String>,
}

impl CommandExecute for GetConsumerGroupSubCommand {
    async fn execute(&self, context: &CommandContext) -> CommandResponse {
        let mut checks = OptionChecks::new();
        self.common_args.check(&mut checks, context.config());
        checks
            .require("--resource-group", self.resource_group.as_deref())
            .require("--namespace", self.namespace.as_deref())
            .require("--eventhub", self.event_hub.as_deref());
        if !checks.is_valid() {
            return CommandResponse::validation_failed(checks.into_messages());
        }
        let options = match self.common_args.request_options(context.config()) {
            Ok(options) => options,
            Err(e) => return CommandResponse::from_error(&e, &MESSAGES),
        };
        let event_hub = self.event_hub.as_deref().unwrap_or_default();
        let namespace = self.namespace.as_deref().unwrap_or_default();
        let resource_group = self.resource_group.as_deref().unwrap_or_default();
        let service = context.service();

        let consumer_groups = match self.consumer_group.as_deref() {
            Some(consumer_group) => service
                .get_consumer_group(consumer_group, event_hub, namespace, resource_group, &options)
                .await
                .map(|found| found.into_iter().collect::<Vec<_>>()),
            None => {
                service
                    .get_consumer_groups(event_hub, namespace, resource_group, &options)
                    .await
            }
        };
        match consumer_groups {
            Ok(consumer_groups) => CommandResponse::success(&ConsumerGroupGetResult { consumer_groups }),
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

    fn parse(args: &[&str]) -> GetConsumerGroupSubCommand {
        GetConsumerGroupSubCommand::try_parse_from(
            ["get", "--subscription", SUBSCRIPTION].iter().chain(args.iter()).copied(),
        )
        .unwrap()
    }

    fn consumer_group(name: &str) -> ConsumerGroup {
        ConsumerGroup {
            name: name.to_string(),
            id: format!(
                "/subscriptions/{SUBSCRIPTION}/resourceGroups/rg/providers/Microsoft.EventHub/namespaces/ns/eventhubs/orders/consumergroups/{name}"
            ),
            resource_group: "rg".to_string(),
            namespace: "ns".to_string(),
            event_hub: "orders".to_string(),
            location: None,
            user_metadata: None,
            creation_time: None,
            updated_time: None,
        }
    }

    #[tokio::test]
    async fn test_lists_consumer_groups() {
        let mut service = MockEventHubsService::new();
        service
            .expect_get_consumer_groups()
            .withf(|eh, ns, rg, _| eh == "orders" && ns == "ns" && rg == "rg")
            .times(1)
            .returning(|_, _, _, _| Ok(vec![consumer_group("$Default"), consumer_group("audit")]));

        let response = parse(&["-g", "rg", "--namespace", "ns", "--eventhub", "orders"])
            .execute(&context(service))
            .await;
        assert_eq!(response.status, 200);
        let results = response.results.unwrap();
        assert_eq!(results["consumerGroups"][0]["name"], "$Default");
        assert_eq!(results["consumerGroups"][1]["eventHub"], "orders");
    }

    #[tokio::test]
    async fn test_single_missing_consumer_group_is_empty() {
        let mut service = MockEventHubsService::new();
        service.expect_get_consumer_groups().never();
        service
            .expect_get_consumer_group()
            .withf(|cg, _, _, _, _| cg == "ghost")
            .returning(|_, _, _, _, _| Ok(None));

        let response = parse(&["-g", "rg", "--namespace", "ns", "--eventhub", "orders", "--consumer-group", "ghost"])
            .execute(&context(service))
            .await;
        assert_eq!(response.status, 200);
        assert!(response.results.unwrap()["consumerGroups"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_event_hub_is_required() {
        let mut service = MockEventHubsService::new();
        service.expect_get_consumer_groups().never();

        let response = parse(&["-g", "rg", "--namespace", "ns"]).execute(&context(service)).await;
        assert_eq!(response.status, 400);
        assert_eq!(response.message, "Missing Required options: --eventhub");
    }

    #[tokio::test]
    async fn test_missing_event_hub_maps_to_404() {
        let mut service = MockEventHubsService::new();
        service
            .expect_get_consumer_groups()
            .returning(|_, _, _, _| Err(EventHubsError::request_failed(404, None, "Event hub 'orders' not found.")));

        let response = parse(&["-g", "rg", "--namespace", "ns", "--eventhub", "orders"])
            .execute(&context(service))
            .await;
        assert_eq!(response.status, 404);
        assert_eq!(response.message, MESSAGES.not_found);
    }
}
