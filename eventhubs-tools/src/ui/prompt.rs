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

//! Interactive prompts for user confirmation

use dialoguer::theme::ColorfulTheme;
use dialoguer::Confirm;

/// Prompt for yes/no confirmation; anything but an explicit yes declines
pub fn confirm(message: &str) -> bool {
    Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(message)
        .default(false)
        .interact()
        .unwrap_or(false)
}

fn dangerous_operation_message(operation: &str, target: &str) -> String {
    format!("[WARNING] This will {operation} {target}. This action cannot be undone. Continue?")
}

/// Confirm dangerous operation
pub fn confirm_dangerous_operation(operation: &str, target: &str) -> bool {
    confirm(&dangerous_operation_message(operation, target))
}
