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
    forbidden: "Access denied. Please ensure you have sufficient permissions to delete Event Hubs in the specified namespace and resource group.",
    not_found: "The specified namespace, resource group, or subscription was not found. Note: If the event hub doesn't exist, the operation succeeds with Deleted = false.",
    conflict: Some("Conflict occurred. The event hub may be in use or in a transitional state. Please try again later."),
    missing_resource: None,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EventHubDeleteResult {
    deleted: bool,
    event_hub_name: String,
}

#[derive(Debug, Clone, Parser)]
pub struct DeleteEventHubSubCommand {
    /// Common arguments
    #[command(flatten)]
    common_args: CommonArgs,

    #[arg(short = 'g', long = "resource-group", help = "The name of the Azure resource group")]
    resource_group: Option<String>,

    #[arg(long = "namespace", help = "The name of the Event Hubs namespace")]
    namespace: Option<String>,

    #[arg(long = "eventhub", help = "The name of the event hub to delete")]
    event_hub: Option<String>,
}

impl CommandExecute for DeleteEventHubSubCommand {
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

        if !context.confirm(
            self.common_args.skip_confirm,
            "delete",
            &format!("event hub '{event_hub}' in namespace '{namespace}'"),
        ) {
            return CommandResponse::cancelled();
        }

        let spinner = context.spinner(&format!("Deleting event hub '{event_hub}'..."));
        let result = context
            .service()
            .delete_event_hub(event_hub, namespace, resource_group, &options)
            .await;
        progress::finish_spinner(spinner);

        match result {
            Ok(deleted) => CommandResponse::success(&EventHubDeleteResult {
                deleted,
                event_hub_name: event_hub.to_string(),
            }),
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

    fn parse(args: &[&str]) -> DeleteEventHubSubCommand {
        DeleteEventHubSubCommand::try_parse_from(
            ["delete", "--subscription", SUBSCRIPTION].iter().chain(args.iter()).copied(),
        )
        .unwrap()
    }

    const SCOPE: [&str; 6] = ["-g", "rg", "--namespace", "ns", "--eventhub", "orders"];

    #[tokio::test]
    async fn test_delete_existing_event_hub() {
        let mut service = MockEventHubsService::new();
        service
            .expect_delete_event_hub()
            .withf(|eh, ns, rg, options| {
                eh == "orders" && ns == "ns" && rg == "rg" && options.subscription == SUBSCRIPTION
            })
            .times(1)
            .returning(|_, _, _, _| Ok(true));

        let response = parse(&SCOPE).execute(&context(service)).await;
        assert_eq!(response.status, 200);
        let results = response.results.unwrap();
        assert_eq!(results["deleted"], true);
        assert_eq!(results["eventHubName"], "orders");
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let mut service = MockEventHubsService::new();
        service
            .expect_delete_event_hub()
            .times(2)
            .returning(|_, _, _, _| Ok(false));
        let context = context(service);
        let command = parse(&SCOPE);

        for _ in 0..2 {
            let response = command.execute(&context).await;
            assert_eq!(response.status, 200);
            assert_eq!(response.results.unwrap()["deleted"], false);
        }
    }

    #[tokio::test]
    async fn test_missing_options() {
        let mut service = MockEventHubsService::new();
        service.expect_delete_event_hub().never();

        let response = parse(&["--namespace", "ns"]).execute(&context(service)).await;
        assert_eq!(response.status, 400);
        assert_eq!(response.message, "Missing Required options: --resource-group, --eventhub");
    }

    #[tokio::test]
    async fn test_conflict_and_missing_namespace() {
        let mut service = MockEventHubsService::new();
        service
            .expect_delete_event_hub()
            .withf(|eh, _, _, _| eh == "orders")
            .returning(|_, _, _, _| Err(EventHubsError::request_failed(409, Some("Conflict".into()), "busy")));
        service
            .expect_delete_event_hub()
            .withf(|eh, _, _, _| eh == "other")
            .returning(|_, _, _, _| Err(EventHubsError::request_failed(404, None, "Namespace 'ns' not found.")));
        let context = context(service);

        let response = parse(&SCOPE).execute(&context).await;
        assert_eq!(response.status, 409);
        assert_eq!(response.message, MESSAGES.conflict.unwrap());

        let response = parse(&["-g", "rg", "--namespace", "ns", "--eventhub", "other"])
            .execute(&context)
            .await;
        assert_eq!(response.status, 404);
        assert!(response.message.contains("Deleted = false"));
    }

    #[tokio::test]
    async fn test_unexpected_failure_is_500() {
        let mut service = MockEventHubsService::new();
        service
            .expect_delete_event_hub()
            .returning(|_, _, _, _| Err(EventHubsError::internal("boom")));

        let response = parse(&SCOPE).execute(&context(service)).await;
        assert_eq!(response.status, 500);
        assert_eq!(response.message, "Internal error: boom");
    }
}
