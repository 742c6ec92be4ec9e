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

mod delete_consumer_group_sub_command;
mod get_consumer_group_sub_command;
mod update_consumer_group_sub_command;

use clap::Subcommand;

use crate::commands::command_context::CommandContext;
use crate::commands::command_response::CommandResponse;
use crate::commands::CommandExecute;

#[derive(Subcommand)]
pub enum ConsumerGroupCommands {
    #[command(
        name = "get",
        about = "Get consumer groups of an event hub",
        long_about = r#"List the consumer groups of an event hub, or get a single one with --consumer-group."#
    )]
    Get(get_consumer_group_sub_command::GetConsumerGroupSubCommand),

    #[command(
        name = "update",
        about = "Create or update a consumer group",
        long_about = r#"Create a consumer group on an event hub, or replace the user metadata of an existing one."#
    )]
    Update(update_consumer_group_sub_command::UpdateConsumerGroupSubCommand),

    #[command(
        name = "delete",
        about = "Delete a consumer group",
        long_about = r#"Delete a consumer group from an event hub. Deleting a consumer group that does not
exist succeeds with deleted set to false."#
    )]
    Delete(delete_consumer_group_sub_command::DeleteConsumerGroupSubCommand),
}

impl CommandExecute for ConsumerGroupCommands {
    async fn execute(&self, context: &CommandContext) -> CommandResponse {
        match self {
            ConsumerGroupCommands::Get(cmd) => cmd.execute(context).await,
            ConsumerGroupCommands::Update(cmd) => cmd.execute(context).await,
            ConsumerGroupCommands::Delete(cmd) => cmd.execute(context).await,
        }
    }
}
