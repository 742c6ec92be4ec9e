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

mod create_or_update_event_hub_sub_command;
mod delete_event_hub_sub_command;
mod get_event_hub_sub_command;

use clap::Subcommand;

use crate::commands::command_context::CommandContext;
use crate::commands::command_response::CommandResponse;
use crate::commands::CommandExecute;

#[derive(Subcommand)]
pub enum EventHubCommands {
    #[command(
        name = "get",
        about = "Get event hubs of a namespace",
        long_about = r#"List every event hub of a namespace, or get a single event hub with --eventhub.
Reports partition count, message retention, status and partition ids."#
    )]
    Get(get_event_hub_sub_command::GetEventHubSubCommand),

    #[command(
        name = "delete",
        about = "Delete an event hub",
        long_about = r#"Delete an event hub from a namespace. Deleting an event hub that does not exist
succeeds with deleted set to false."#
    )]
    Delete(delete_event_hub_sub_command::DeleteEventHubSubCommand),

    #[command(
        name = "create-or-update",
        about = "Create or update an event hub",
        long_about = r#"Create an event hub, or update the partition count, message retention or status of
an existing one. Settings that are not given keep their current value."#
    )]
    CreateOrUpdate(create_or_update_event_hub_sub_command::CreateOrUpdateEventHubSubCommand),
}

impl CommandExecute for EventHubCommands {
    async fn execute(&self, context: &CommandContext) -> CommandResponse {
        match self {
            EventHubCommands::Get(cmd) => cmd.execute(context).await,
            EventHubCommands::Delete(cmd) => cmd.execute(context).await,
            EventHubCommands::CreateOrUpdate(cmd) => cmd.execute(context).await,
        }
    }
}
