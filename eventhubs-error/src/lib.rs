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

//! Unified error types for the Event Hubs admin workspace.

pub mod auth_error;
pub mod unified;

pub use auth_error::AuthError;
pub use unified::EventHubsError;
pub use unified::EventHubsResult;
pub use unified::NetworkError;
pub use unified::Result;
pub use unified::ToolsError;
