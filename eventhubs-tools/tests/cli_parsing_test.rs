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

use clap::CommandFactory;
use clap::Parser;
use eventhubs_tools::cli::formatters::get_formatter;
use eventhubs_tools::cli::formatters::OutputFormat;
use eventhubs_tools::commands::command_response::status_code;
use eventhubs_tools::commands::command_response::CommandResponse;
use eventhubs_tools::commands::command_response::ErrorMessages;
use eventhubs_tools::core::EventHubsError;
use eventhubs_tools::eventhubs_cli::EventHubsCli;

const MESSAGES: ErrorMessages = ErrorMessages {
    forbidden: "Access denied.",
    not_found: "Not found.",
    conflict: None,
    missing_resource: None,
};

#[test]
fn every_command_parses() {
    let cases: &[&[&str]] = &[
        &["namespace", "get"],
        &["namespace", "get", "-g", "rg", "--namespace", "ns"],
        &["eventhub", "get", "-g", "rg", "--namespace", "ns", "--eventhub", "orders"],
        &["eventhub", "delete", "-g", "rg", "--namespace", "ns", "--eventhub", "orders", "-y"],
        &[
            "eventhub",
            "create-or-update",
            "-g",
            "rg",
            "--namespace",
            "ns",
            "--eventhub",
            "orders",
            "--partition-count",
            "4",
            "--message-retention-in-hours",
            "48",
            "--status",
            "Active",
        ],
        &["consumergroup", "get", "-g", "rg", "--namespace", "ns", "--eventhub", "orders"],
        &[
            "consumergroup",
            "update",
            "-g",
            "rg",
            "--namespace",
            "ns",
            "--eventhub",
            "orders",
            "--consumer-group",
            "audit",
            "--user-metadata",
            "owner=ops",
        ],
        &[
            "consumergroup",
            "delete",
            "-g",
            "rg",
            "--namespace",
            "ns",
            "--eventhub",
            "orders",
            "--consumer-group",
            "audit",
            "--retry-mode",
            "fixed",
            "--retry-max-retries",
            "1",
        ],
        &["show"],
    ];
    for args in cases {
        let argv = std::iter::once("eventhubs-admin-cli").chain(args.iter().copied());
        assert!(EventHubsCli::try_parse_from(argv).is_ok(), "failed to parse {args:?}");
    }
}

#[test]
fn unknown_commands_are_rejected_by_the_parser() {
    assert!(EventHubsCli::try_parse_from(["eventhubs-admin-cli", "topic", "list"]).is_err());
    assert!(EventHubsCli::try_parse_from(["eventhubs-admin-cli", "eventhub", "purge"]).is_err());
    assert!(EventHubsCli::try_parse_from(["eventhubs-admin-cli", "eventhub", "create-or-update", "--partition-count", "many"]).is_err());
}

#[test]
fn completion_script_mentions_subcommands() {
    let mut cmd = EventHubsCli::command();
    let mut script = Vec::new();
    clap_complete::generate(clap_complete::shells::Bash, &mut cmd, "eventhubs-admin-cli", &mut script);
    let script = String::from_utf8(script).unwrap();
    assert!(script.contains("consumergroup"));
    assert!(script.contains("create-or-update"));
}

#[test]
fn error_responses_render_in_both_formats() {
    let error = EventHubsError::request_failed(403, Some("AuthorizationFailed".into()), "denied");
    assert_eq!(status_code(&error), 403);
    let response = CommandResponse::from_error(&error, &MESSAGES);

    let json = get_formatter(OutputFormat::Json).format(&response);
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value, serde_json::json!({"status": 403, "message": "Access denied."}));

    let yaml = get_formatter(OutputFormat::Yaml).format(&response);
    assert!(yaml.contains("status: 403"));
    assert!(!yaml.contains("results"));
}
