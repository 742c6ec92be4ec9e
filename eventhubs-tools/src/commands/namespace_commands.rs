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

mod get_namespace_sub_command;

use clap::Subcommand;

use crate::commands::command_context::CommandContext;
use crate::commands::command_response::CommandResponse;
use crate::commands::CommandExecute;

#[derive(Subcommand)]
pub enum NamespaceCommands {
    #[command(
        name = "get",
        about = "Get Event Hubs namespaces",
        long_about = r#"Get Event Hubs namespaces from Azure. Lists every namespace of the subscription, or of
one resource group when --resource-group is given. With both --namespace and --resource-group a
single namespace is returned with its SKU, settings and metadata."#
    )]
    Get(get_namespace_sub_command::GetNamespaceSubCommand),
}

impl CommandExecute for NamespaceCommands {
    async fn execute(&self, context: &CommandContext) -> CommandResponse {
        match self {
            NamespaceCommands::Get(cmd) => cmd.execute(context).await,
        }
    }
}
