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

//! Retry policy applied by the management client to every request.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use eventhubs_error::EventHubsError;
use serde::Deserialize;
use serde::Serialize;

/// How the delay between attempts grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RetryMode {
    Fixed,
    #[default]
    Exponential,
}

impl FromStr for RetryMode {
    type Err = EventHubsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fixed" => Ok(Self::Fixed),
            "exponential" => Ok(Self::Exponential),
            other => Err(EventHubsError::invalid_argument(
                "retryMode",
                format!("unknown retry mode '{other}', expected 'fixed' or 'exponential'"),
            )),
        }
    }
}

impl fmt::Display for RetryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed => f.write_str("fixed"),
            Self::Exponential => f.write_str("exponential"),
        }
    }
}

/// Retry settings for management API calls
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub delay: Duration,
    pub max_delay: Duration,
    pub mode: RetryMode,
    pub network_timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            delay: Duration::from_millis(800),
            max_delay: Duration::from_secs(60),
            mode: RetryMode::Exponential,
            network_timeout: Duration::from_secs(100),
        }
    }
}

impl RetryPolicy {
    /// Statuses the management plane documents as transient.
    const RETRIABLE_STATUS: [u16; 6] = [408, 429, 500, 502, 503, 504];

    #[inline]
    pub fn is_retriable_status(status: u16) -> bool {
        Self::RETRIABLE_STATUS.contains(&status)
    }

    /// Whether another attempt is allowed after `attempt` retries have been made.
    #[inline]
    pub fn should_retry(&self, attempt: u32) -> bool {
        attempt < self.max_retries
    }

    /// Delay before retry number `attempt` (zero based).
    ///
    /// A server supplied `retry_after` wins over the computed delay; both are capped at
    /// `max_delay`.
    pub fn delay_for(&self, attempt: u32, retry_after: Option<Duration>) -> Duration {
        let computed = match (retry_after, self.mode) {
            (Some(after), _) => after,
            (None, RetryMode::Fixed) => self.delay,
            (None, RetryMode::Exponential) => {
                let factor = 2u32.saturating_pow(attempt.min(31));
                self.delay.saturating_mul(factor)
            }
        };
        computed.min(self.max_delay)
    }
}
