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

//! Colored status lines on stderr

use colored::Colorize;

fn error_line(message: &str) -> String {
    format!("{} {}", "[ERROR]".red().bold(), message)
}

fn warning_line(message: &str) -> String {
    format!("{} {}", "[WARN]".yellow().bold(), message)
}

/// Print error message with red marker
pub fn print_error(message: &str) {
    eprintln!("{}", error_line(message));
}

/// Print warning message with yellow marker
pub fn print_warning(message: &str) {
    eprintln!("{}", warning_line(message));
}
