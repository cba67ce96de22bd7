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

use anyhow::{Context, Result};
use veryfi_sdk::{Client, ClientSettings, FailureMode};

// Logging configuration constants
/// Default log level (can be overridden by RUST_LOG environment variable)
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Log file prefix and log directory component name
pub const LOG_COMPONENT_NAME: &str = "veryfi-cli";

/// Default console output enabled (can be overridden by LOG_TO_CONSOLE environment variable)
pub const DEFAULT_LOG_TO_CONSOLE: bool = true;

/// Build the API client from `VERYFI_*` environment variables (and `.env`)
pub fn client_from_env(empty_on_failure: bool) -> Result<Client> {
	dotenv::dotenv().ok();

	let settings = ClientSettings::from_env().context("Failed to load VERYFI_* settings")?;
	tracing::debug!(target: "cli", "Loaded settings: {:?}", settings);

	let (credentials, config) = settings.into_parts();
	let mut client =
		Client::with_config(credentials, config).context("Failed to create API client")?;
	if empty_on_failure {
		client.set_failure_mode(FailureMode::EmptyBody);
	}

	Ok(client)
}
