// Copyright 2025 itscheems
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

//! Veryfi SDK - Client library for the Veryfi document extraction API
//!
//! This crate signs and sends requests for receipts, invoices, checks, tax
//! forms, bank statements, business cards, contracts, and blueprint-driven
//! AnyDocument extraction. Responses are returned as raw JSON text.
//!
//! The SDK is designed to be lightweight and embeddable:
//! - No background threads (the blocking client owns one private runtime)
//! - No global logger: diagnostics go through an injectable observer
//! - No retries, no response parsing
//!
//! ```no_run
//! use veryfi_sdk::{Client, Credentials, Payload, UrlSubmission};
//!
//! # async fn run() -> Result<(), veryfi_sdk::ClientError> {
//! let client = Client::new(Credentials::new("client_id", "secret", "user", "api_key"))?;
//! let json = client
//!     .documents()
//!     .process_url(&UrlSubmission::new("https://example.com/receipt.jpg"), Payload::new())
//!     .await?;
//! println!("{}", json);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod dispatch;
pub mod documents;
pub mod file;
pub mod request;
pub mod resources;
pub mod signing;
pub mod types;

pub use client::{Client, ClientError, SyncClient};
pub use crate::config::{ClientConfig, ClientSettings, ConfigError, Credentials, FailureMode};
pub use dispatch::{Dispatcher, RequestObserver, TracingObserver};
pub use documents::{Documents, SyncDocuments};
pub use file::FileAttachment;
pub use request::{Method, Payload, PreparedRequest, RequestSpec, SignedHeaders};
pub use resources::{ProcessOptions, Resource, ResourceKind, SyncResource, UrlSubmission};
pub use signing::{SigningError, sign_payload};
pub use types::*;
