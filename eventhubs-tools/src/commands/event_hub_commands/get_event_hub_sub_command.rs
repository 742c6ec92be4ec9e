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

use crate::cli::validators::validate_event_hub_scope;
use crate::cli::validators::OptionChecks;
use crate::commands::command_context::CommandContext;
use crate::commands::command_response::CommandResponse;
use crate::commands::command_response::ErrorMessages;
use crate::commands::CommandExecute;
use crate::commands::CommonArgs;
use crate::core::event_hub::types::EventHub;

const MESSAGES: ErrorMessages = ErrorMessages {
    forbidden: "Access denied. Please ensure you have sufficient permissions to access Event Hubs in the specified namespace and resource group.",
    not_found: "The specified event hub, namespace, resource group, or subscription was not found. Please verify all names and identifiers.",
    conflict: None,
    missing_resource: None,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EventHubGetResult {
    event_hubs: Vec<EventHub>,
}

#[derive(Debug, Clone, Parser)]
pub struct GetEventHubSubCommand {
    /// Common arguments
    #[command(flatten)]
    common_args: CommonArgs,

    #[arg(short = 'g', long = "resource-group", help = "The name of the Azure resource group")]
    resource_group: Option<String>,

    #[arg(long = "namespace", help = "The name of the Event Hubs namespace")]
    namespace: Option<String>,

    #[arg(
        long = "eventhub",
        help = "The name of a single event hub to get. Requires --namespace and --resource-group."
    )]
    event_hub: Option<String>,
}

impl CommandExecute for GetEventHubSubCommand {
    async fn execute(&self, context: &CommandContext) -> CommandResponse {
        let mut checks = OptionChecks::new();
        self.common_args.check(&mut checks, context.config());
        checks
            .require("--resource-group", self.resource_group.as_deref())
            .require("--namespace", self.namespace.as_deref())
            .check(validate_event_hub_scope(
                self.event_hub.as_deref(),
                self.namespace.as_deref(),
                self.resource_group.as_deref(),
            ));
        if !checks.is_valid() {
            return CommandResponse::validation_failed(checks.into_messages());
        }
        let options = match self.common_args.request_options(context.config()) {
            Ok(options) => options,
            Err(e) => return CommandResponse::from_error(&e, &MESSAGES),
        };
        let namespace = self.namespace.as_deref().unwrap_or_default();
        let resource_group = self.resource_group.as_deref().unwrap_or_default();
        let service = context.service();

        let event_hubs = match self.event_hub.as_deref() {
            Some(event_hub) => service
                .get_event_hub(event_hub, namespace, resource_group, &options)
                .await
                .map(|found| found.into_iter().collect::<Vec<_>>()),
            None => service.get_event_hubs(namespace, resource_group, &options).await,
        };
        match event_hubs {
            Ok(event_hubs) => CommandResponse::success(&EventHubGetResult { event_hubs }),
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
    use crate::core::event_hub::types::EventHubStatus;
    use crate::core::service::MockEventHubsService;

    fn parse(args: &[&str]) -> GetEventHubSubCommand {
        GetEventHubSubCommand::try_parse_from(
            ["get", "--subscription", SUBSCRIPTION].iter().chain(args.iter()).copied(),
        )
        .unwrap()
    }

    fn event_hub(name: &str) -> EventHub {
        EventHub {
            name: name.to_string(),
            id: format!(
                "/subscriptions/{SUBSCRIPTION}/resourceGroups/rg/providers/Microsoft.EventHub/namespaces/ns/eventhubs/{name}"
            ),
            resource_group: "rg".to_string(),
            namespace: "ns".to_string(),
            location: None,
            partition_count: Some(4),
            message_retention_in_hours: Some(24),
            status: Some(EventHubStatus::Active),
            partition_ids: Some(vec!["0".into(), "1".into(), "2".into(), "3".into()]),
            creation_time: None,
            updated_time: None,
        }
    }

    #[tokio::test]
    async fn test_lone_event_hub_option_is_rejected() {
        let mut service = MockEventHubsService::new();
        service.expect_get_event_hub().never();
        service.expect_get_event_hubs().never();

        let response = parse(&["--eventhub", "orders"]).execute(&context(service)).await;
        assert_eq!(response.status, 400);
        assert!(response.results.is_none());
        assert_eq!(
            response.message,
            "Missing Required options: --resource-group, --namespace\n\
             --eventhub option requires both --namespace and --resource-group options."
        );
    }

    #[tokio::test]
    async fn test_lists_event_hubs() {
        let mut service = MockEventHubsService::new();
        service
            .expect_get_event_hubs()
            .withf(|ns, rg, _| ns == "ns" && rg == "rg")
            .times(1)
            .returning(|_, _, _| Ok(vec![event_hub("orders"), event_hub("audit")]));

        let response = parse(&["-g", "rg", "--namespace", "ns"]).execute(&context(service)).await;
        assert_eq!(response.status, 200);
        let results = response.results.unwrap();
        assert_eq!(results["eventHubs"][1]["name"], "audit");
        assert_eq!(results["eventHubs"][0]["messageRetentionInHours"], 24);
        assert_eq!(results["eventHubs"][0]["status"], "Active");
    }

    #[tokio::test]
    async fn test_single_event_hub_yields_zero_or_one_entries() {
        let mut service = MockEventHubsService::new();
        service
            .expect_get_event_hub()
            .withf(|name, _, _, _| name == "orders")
            .returning(|name, _, _, _| Ok(Some(event_hub(name))));
        service
            .expect_get_event_hub()
            .withf(|name, _, _, _| name == "ghost")
            .returning(|_, _, _, _| Ok(None));
        let context = context(service);

        let response = parse(&["-g", "rg", "--namespace", "ns", "--eventhub", "orders"])
            .execute(&context)
            .await;
        assert_eq!(response.results.unwrap()["eventHubs"].as_array().unwrap().len(), 1);

        let response = parse(&["-g", "rg", "--namespace", "ns", "--eventhub", "ghost"])
            .execute(&context)
            .await;
        assert_eq!(response.status, 200);
        assert_eq!(response.results.unwrap()["eventHubs"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_missing_namespace_maps_to_404() {
        let mut service = MockEventHubsService::new();
        service
            .expect_get_event_hubs()
            .returning(|_, _, _| {
                Err(EventHubsError::request_failed(
                    404,
                    Some("ParentResourceNotFound".into()),
                    "Namespace 'ns' not found.",
                ))
            });

        let response = parse(&["-g", "rg", "--namespace", "ns"]).execute(&context(service)).await;
        assert_eq!(response.status, 404);
        assert_eq!(response.message, MESSAGES.not_found);
    }

    #[tokio::test]
    async fn test_resource_group_not_found_from_service() {
        let mut service = MockEventHubsService::new();
        service.expect_get_event_hubs().returning(|_, _, _| {
            Err(EventHubsError::request_failed(
                404,
                Some("ResourceGroupNotFound".into()),
                "Resource group 'rg' could not be found.",
            ))
        });

        let response = parse(&["-g", "rg", "--namespace", "ns"]).execute(&context(service)).await;
        assert_eq!(response.status, 404);
        assert_eq!(response.message, MESSAGES.not_found);
    }
}
