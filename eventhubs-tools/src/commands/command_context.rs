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

//! Everything a command needs besides its own arguments

use std::sync::Arc;

use eventhubs_common::config::AdminConfig;
use indicatif::ProgressBar;

use crate::core::service::EventHubsService;
use crate::ui::progress;
use crate::ui::prompt;

pub struct CommandContext {
    service: Arc<dyn EventHubsService>,
    config: AdminConfig,
    interactive: bool,
}

impl CommandContext {
    pub fn new(service: Arc<dyn EventHubsService>, config: AdminConfig) -> Self {
        Self {
            service,
            config,
            interactive: false,
        }
    }

    /// Whether prompts and spinners may be shown
    pub fn with_interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    #[inline]
    pub fn service(&self) -> &dyn EventHubsService {
        self.service.as_ref()
    }

    #[inline]
    pub fn config(&self) -> &AdminConfig {
        &self.config
    }

    /// Asks before a destructive operation; only an interactive terminal without `--yes` asks
    pub fn confirm(&self, skip_confirm: bool, operation: &str, target: &str) -> bool {
        if skip_confirm || !self.interactive {
            return true;
        }
        prompt::confirm_dangerous_operation(operation, target)
    }

    pub fn spinner(&self, message: &str) -> Option<ProgressBar> {
        self.interactive.then(|| progress::create_spinner(message))
    }
}
