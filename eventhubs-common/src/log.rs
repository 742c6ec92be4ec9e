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

use std::fmt;
use std::str::FromStr;

/// Initializes the logger with the specified configuration.
///
/// Reads the log level from the `RUST_LOG` environment variable, defaulting to `WARN` when it
/// is not set or cannot be parsed. Output goes to stderr so command results on stdout stay
/// machine readable.
pub fn init_logger() {
    let level = std::env::var("RUST_LOG").unwrap_or_else(|_| Level::WARN.as_str().to_string());
    init_with(level.as_str());
}

/// Initializes the logger with `RUST_LOG` taking precedence over the given level.
pub fn init_logger_with_level(level: Level) {
    let level = std::env::var("RUST_LOG").unwrap_or_else(|_| level.as_str().to_string());
    init_with(level.as_str());
}

fn init_with(level: &str) {
    let max_level = tracing::Level::from_str(level.trim()).unwrap_or(tracing::Level::WARN);
    // A second initialization (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_thread_names(true)
        .with_level(true)
        .with_line_number(true)
        .with_thread_ids(true)
        .with_max_level(max_level)
        .try_init();
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Level(&'static str);

impl Level {
    /// Constant representing the ERROR log level.
    pub const ERROR: Level = Level("ERROR");

    /// Constant representing the WARN log level.
    pub const WARN: Level = Level("WARN");

    /// Constant representing the INFO log level.
    pub const INFO: Level = Level("INFO");

    /// Constant representing the DEBUG log level.
    pub const DEBUG: Level = Level("DEBUG");

    /// Constant representing the TRACE log level.
    pub const TRACE: Level = Level("TRACE");

    pub fn as_str(&self) -> &'static str {
        self.0
    }

    /// Parses a level name case-insensitively, `None` for unknown names.
    pub fn parse(level: &str) -> Option<Level> {
        match level.trim().to_ascii_uppercase().as_str() {
            "ERROR" => Some(Level::ERROR),
            "WARN" | "WARNING" => Some(Level::WARN),
            "INFO" => Some(Level::INFO),
            "DEBUG" => Some(Level::DEBUG),
            "TRACE" => Some(Level::TRACE),
            _ => None,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.0)
    }
}
