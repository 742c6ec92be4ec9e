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
use tracing::warn;

use crate::cli::validators::OptionChecks;
use crate::commands::command_context::CommandContext;
use crate::commands::command_response::CommandResponse;
use crate::commands::command_response::ErrorMessages;
use crate::commands::CommandExecute;
use crate::commands::CommonArgs;
use crate::core::namespace::types::Namespace;
use crate::core::namespace::types::NamespaceInfo;

const MESSAGES: ErrorMessages = ErrorMessages {
    forbidden: "Access denied. Please ensure you have sufficient permissions to get Event Hubs namespaces in the specified resource group.",
    not_found: "The specified resource group or subscription was not found. Please verify the resource group name and subscription.",
    conflict: None,
    missing_resource: Some(
        "Event Hubs namespace not found. Verify the namespace name, resource group, and that you have access.",
    ),
};

#[derive(Debug, Serialize)]
struct NamespaceListResult {
    namespaces: Vec<NamespaceInfo>,
}

#[derive(Debug, Serialize)]
struct NamespaceSingleResult {
    namespace: Namespace,
}

#[derive(Debug, Clone, Parser)]
pub struct GetNamespaceSubCommand {
    /// Common arguments
    #[command(flatten)]
    common_args: CommonArgs,

    #[arg(short = 'g', long = "resource-group", help = "The name of the Azure resource group")]
    resource_group: Option<String>,

    #[arg(
        long = "namespace",
        help = "The name of the Event Hubs namespace to retrieve. Must be used with --resource-group option."
    )]
    namespace: Option<String>,
}

impl GetNamespaceSubCommand {
    fn single_request(&self) -> Option<(&str, &str)> {
        let namespace = self.namespace.as_deref().filter(|n| !n.is_empty())?;
        let resource_group = self.resource_group.as_deref().filter(|rg| !rg.is_empty())?;
        Some((namespace, resource_group))
    }
}

impl CommandExecute for GetNamespaceSubCommand {
    async fn execute(&self, context: &CommandContext) -> CommandResponse {
        let mut checks = OptionChecks::new();
        self.common_args.check(&mut checks, context.config());
        if !checks.is_valid() {
            return CommandResponse::validation_failed(checks.into_messages());
        }
        let options = match self.common_args.request_options(context.config()) {
            Ok(options) => options,
            Err(e) => return CommandResponse::from_error(&e, &MESSAGES),
        };

        match self.single_request() {
            Some((namespace, resource_group)) => {
                match context.service().get_namespace(namespace, resource_group, &options).await {
                    Ok(namespace) => CommandResponse::success(&NamespaceSingleResult { namespace }),
                    Err(e) => CommandResponse::from_error(&e, &MESSAGES),
                }
            }
            None => {
                if self.namespace.is_some() {
                    warn!("--namespace without --resource-group lists every namespace of the subscription");
                }
                match context
                    .service()
                    .get_namespaces(self.resource_group.clone(), &options)
                    .await
                {
                    Ok(namespaces) => CommandResponse::success(&NamespaceListResult { namespaces }),
                    Err(e) => CommandResponse::from_error(&e, &MESSAGES),
                }
            }
        }
    }
}
