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

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::CommandFactory;
use clap::Parser;
use clap_complete::generate;
use clap_complete::shells::Bash;
use clap_complete::shells::Fish;
use clap_complete::shells::Zsh;
use eventhubs_common::config::AdminConfig;
use eventhubs_common::log;
use eventhubs_common::log::Level;
use tracing::debug;

use crate::cli::formatters::get_formatter;
use crate::cli::formatters::OutputFormat;
use crate::cli::validators::validate_output_format;
use crate::commands::command_context::CommandContext;
use crate::commands::command_response::CommandResponse;
use crate::commands::CommandExecute;
use crate::commands::Commands;
use crate::core::admin::AdminBuilder;
use crate::core::service::DefaultEventHubsService;
use crate::core::EventHubsResult;
use crate::ui::output;

const BIN_NAME: &str = "eventhubs-admin-cli";

#[derive(Parser)]
#[command(name = "eventhubs-admin-cli")]
#[command(about = "Azure Event Hubs admin commands", long_about = None)]
pub struct EventHubsCli {
    /// Generate shell completion script
    #[arg(
        long = "generate-completion",
        value_name = "SHELL",
        help = "Generate shell completion script (bash, zsh, fish)"
    )]
    completion: Option<String>,

    #[arg(
        long = "config",
        value_name = "FILE",
        global = true,
        help = "Configuration file, layered over ~/.config/eventhubs-admin/config.toml"
    )]
    config: Option<PathBuf>,

    #[arg(
        short = 'o',
        long = "output",
        value_name = "FORMAT",
        global = true,
        help = "Output format: json or yaml, defaults to the configured output"
    )]
    output: Option<String>,

    #[command(subcommand)]
    commands: Option<Commands>,
}

impl EventHubsCli {
    pub async fn handle(&self) -> ExitCode {
        // Handle completion generation
        if let Some(shell) = &self.completion {
            return Self::generate_completion(shell);
        }

        let Some(commands) = &self.commands else {
            output::print_error("No command specified. Use --help for usage information.");
            return ExitCode::FAILURE;
        };
        if let Commands::Show(show) = commands {
            println!("{}", show.render());
            return ExitCode::SUCCESS;
        }

        let config = match AdminConfig::load(self.config.as_deref()) {
            Ok(config) => config,
            Err(e) => {
                log::init_logger();
                output::print_error(&e.to_string());
                return ExitCode::FAILURE;
            }
        };
        log::init_logger_with_level(Level::parse(&config.log_level).unwrap_or(Level::WARN));

        let format = match self.output_format(&config) {
            Ok(format) => format,
            Err(e) => {
                let response = CommandResponse::validation_failed(vec![e.to_string()]);
                return Self::print(&response, OutputFormat::Json);
            }
        };
        let admin = match AdminBuilder::from_config(&config) {
            Ok(admin) => admin,
            Err(e) => {
                output::print_error(&e.to_string());
                return ExitCode::FAILURE;
            }
        };

        let interactive = std::io::stdin().is_terminal() && std::io::stderr().is_terminal();
        let context =
            CommandContext::new(Arc::new(DefaultEventHubsService::new(admin)), config).with_interactive(interactive);
        let response = commands.execute(&context).await;
        debug!(status = response.status, "command finished");
        Self::print(&response, format)
    }

    /// `--output`, else the configured output
    fn output_format(&self, config: &AdminConfig) -> EventHubsResult<OutputFormat> {
        let format = self.output.as_deref().unwrap_or(config.output.as_str());
        validate_output_format(format)?;
        Ok(OutputFormat::from(format))
    }

    fn print(response: &CommandResponse, format: OutputFormat) -> ExitCode {
        println!("{}", get_formatter(format).format(response));
        if response.is_success() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        }
    }

    fn generate_completion(shell: &str) -> ExitCode {
        let mut cmd = EventHubsCli::command();
        match shell.to_lowercase().as_str() {
            "bash" => generate(Bash, &mut cmd, BIN_NAME, &mut std::io::stdout()),
            "zsh" => generate(Zsh, &mut cmd, BIN_NAME, &mut std::io::stdout()),
            "fish" => generate(Fish, &mut cmd, BIN_NAME, &mut std::io::stdout()),
            _ => {
                output::print_error(&format!("Unsupported shell: {shell}"));
                output::print_warning("Supported shells: bash, zsh, fish");
                return ExitCode::FAILURE;
            }
        }
        ExitCode::SUCCESS
    }
}
