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

//! CLI input validators
//!
//! Options are declared optional to clap and checked here, so that every problem is reported
//! together in one response instead of clap stopping at the first one.

use crate::core::EventHubsError;
use crate::core::EventHubsResult;
use crate::core::ToolsError;

/// Collects option problems in the order they are found
#[derive(Debug, Default)]
pub struct OptionChecks {
    missing: Vec<String>,
    errors: Vec<String>,
}

impl OptionChecks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `flag` as missing when no non-blank value was given
    pub fn require(&mut self, flag: &str, value: Option<&str>) -> &mut Self {
        if value.is_none_or(|v| v.trim().is_empty()) {
            self.missing.push(flag.to_string());
        }
        self
    }

    pub fn check(&mut self, result: EventHubsResult<()>) -> &mut Self {
        if let Err(e) = result {
            self.errors.push(validation_message(&e));
        }
        self
    }

    pub fn is_valid(&self) -> bool {
        self.missing.is_empty() && self.errors.is_empty()
    }

    /// Every problem as a user facing line, missing options first
    pub fn into_messages(self) -> Vec<String> {
        let mut messages = Vec::with_capacity(self.errors.len() + 1);
        if !self.missing.is_empty() {
            messages.push(ToolsError::missing_options(self.missing).to_string());
        }
        messages.extend(self.errors);
        messages
    }
}

/// Validation failures carry a complete sentence as their reason
fn validation_message(error: &EventHubsError) -> String {
    match error {
        EventHubsError::Tools(ToolsError::ValidationError { reason, .. }) => reason.clone(),
        other => other.to_string(),
    }
}

/// `--eventhub` narrows a namespace listing and is meaningless without its namespace
pub fn validate_event_hub_scope(
    event_hub: Option<&str>,
    namespace: Option<&str>,
    resource_group: Option<&str>,
) -> EventHubsResult<()> {
    let given = |v: Option<&str>| v.is_some_and(|v| !v.trim().is_empty());
    if event_hub.is_some() && (!given(namespace) || !given(resource_group)) {
        return Err(ToolsError::validation_error(
            "eventhub",
            "--eventhub option requires both --namespace and --resource-group options.",
        )
        .into());
    }
    Ok(())
}

/// Validate a count or duration option that must be at least one
pub fn validate_at_least_one(flag: &str, value: Option<i64>) -> EventHubsResult<()> {
    match value {
        Some(v) if v < 1 => Err(ToolsError::validation_error(
            flag.trim_start_matches('-'),
            format!("{flag} must be at least 1, got {v}."),
        )
        .into()),
        _ => Ok(()),
    }
}

/// Validate an output format name
pub fn validate_output_format(format: &str) -> EventHubsResult<()> {
    match format.to_ascii_lowercase().as_str() {
        "json" | "yaml" | "yml" => Ok(()),
        _ => Err(ToolsError::validation_error(
            "output",
            format!("Unsupported output format '{format}', expected 'json' or 'yaml'."),
        )
        .into()),
    }
}
