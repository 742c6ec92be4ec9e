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

//! Event Hubs Tools - Admin and CLI utilities
//!
//! This crate provides both:
//! - **Core**: Reusable operations on namespaces, event hubs and consumer groups
//! - **CLI**: Command-line interface with formatting and validation
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           CLI Layer (bin/)              │
//! │  - Command parsing (clap)               │
//! │  - Output formatting (formatters/)      │
//! │  - Input validation (validators/)       │
//! └─────────────────┬───────────────────────┘
//!                   │
//!                   ▼
//! ┌─────────────────────────────────────────┐
//! │         Core Logic (core/)              │
//! │  - EventHubsService facade              │
//! │  - Namespace operations                 │
//! │  - Event hub operations                 │
//! │  - Consumer group operations            │
//! └─────────────────┬───────────────────────┘
//!                   │
//!                   ▼
//! ┌─────────────────────────────────────────┐
//! │   Management client (eventhubs-common)  │
//! │  - ArmClient, retries, LRO polling      │
//! │  - Token credentials                    │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Usage Examples
//!
//! ## As a Library (using core)
//!
//! ```rust,ignore
//! use eventhubs_tools::core::admin::AdminBuilder;
//! use eventhubs_tools::core::service::DefaultEventHubsService;
//! use eventhubs_tools::core::service::EventHubsService;
//! use eventhubs_tools::core::service::RequestOptions;
//!
//! let service = DefaultEventHubsService::new(AdminBuilder::from_config(&config)?);
//! let options = RequestOptions::new("my-subscription");
//! let hubs = service.get_event_hubs("my-namespace", "my-rg", &options).await?;
//! ```
//!
//! ## As a CLI Tool
//!
//! ```bash
//! eventhubs-admin-cli eventhub get -g my-rg --namespace my-namespace --subscription my-subscription
//! ```

// Core business logic - reusable across different interfaces
pub mod core {
    //! Core business logic module
    //!
    //! Operations here know nothing about the command line. They take plain names and
    //! [`service::RequestOptions`] and return typed projections of the management plane
    //! resources.
    //!
    //! # Available Modules
    //!
    //! - [`admin`] - Management client builder
    //! - [`namespace`] - Namespace listing and retrieval
    //! - [`event_hub`] - Event hub management operations
    //! - [`consumer_group`] - Consumer group management operations
    //! - [`service`] - The [`service::EventHubsService`] facade used by commands

    pub mod admin;
    pub mod consumer_group;
    pub mod event_hub;
    pub mod namespace;
    pub mod service;

    // Re-export error types from eventhubs-error
    pub use eventhubs_error::EventHubsError;
    pub use eventhubs_error::EventHubsResult;
    pub use eventhubs_error::ToolsError;
}

// CLI presentation layer
pub mod cli {
    //! CLI presentation layer
    //!
    //! - [`formatters`] - Output formatters (JSON, YAML)
    //! - [`validators`] - Input validators

    pub mod formatters;
    pub mod validators;
}

// UI utilities for enhanced CLI experience
pub mod ui;

// Command definitions
pub mod commands;

// CLI entry point
pub mod eventhubs_cli;
