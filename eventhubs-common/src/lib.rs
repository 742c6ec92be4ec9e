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

//! Building blocks shared by the Event Hubs admin tools: logging, layered configuration,
//! credentials and the management plane client.

pub mod arm_client;
pub mod config;
pub mod credential;
pub mod log;
pub mod resource_id;
pub mod retry;
pub mod time_utils;

pub use arm_client::ArmClient;
pub use config::AdminConfig;
pub use credential::ChainedTokenCredential;
pub use credential::TokenCredential;
pub use resource_id::ResourceIdentifier;
pub use resource_id::ResourcePath;
pub use retry::RetryMode;
pub use retry::RetryPolicy;
