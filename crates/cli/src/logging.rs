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

//! Logging initialization for the command-line client
//!
//! Standard output carries only the API response, so every log line goes to
//! stderr or to a file.
//!
//! # Configuration
//!
//! - `RUST_LOG`: Log level filter (default: `warn`)
//!   - Example: `RUST_LOG=veryfi=debug` shows every signed request and trace id
//!
//! - `LOG_DIR`: Enables file output when set
//!   - Log files are created in `{LOG_DIR}/veryfi-cli/`
//!   - Rotation: one file per day (UTC), named `veryfi-cli.{date}.log`
//!
//! - `LOG_TO_CONSOLE`: stderr output (default: `true`)
//!   - Set to `false`, `0`, or `no` to disable

use std::{env, path::Path, sync::OnceLock};

use anyhow::{Context, Result};
use tracing::info;
use tracing_appender::{
	non_blocking,
	rolling::{self, Rotation},
};
use tracing_subscriber::{
	EnvFilter, fmt, layer::SubscriberExt, registry::Registry, util::SubscriberInitExt,
};

use crate::config::{DEFAULT_LOG_LEVEL, DEFAULT_LOG_TO_CONSOLE, LOG_COMPONENT_NAME};

// Store log guard to prevent log loss on program exit
static LOG_GUARD: OnceLock<non_blocking::WorkerGuard> = OnceLock::new();

fn setup_file_logging(log_dir: &Path) -> Result<non_blocking::NonBlocking> {
	std::fs::create_dir_all(log_dir)
		.with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;

	let file_appender = rolling::RollingFileAppender::builder()
		.rotation(Rotation::DAILY)
		.filename_prefix(LOG_COMPONENT_NAME.to_string())
		.filename_suffix("log")
		.build(log_dir)
		.with_context(|| {
			format!(
				"Failed to create rolling file appender in {}",
				log_dir.display()
			)
		})?;

	let (file_writer, guard) = non_blocking(file_appender);
	LOG_GUARD.set(guard).ok();

	Ok(file_writer)
}

/// Initialize logging with stderr output and optional file output
pub fn init_logging() -> Result<()> {
	dotenv::dotenv().ok();

	let log_level = env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string());
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level));

	let log_to_console = env::var("LOG_TO_CONSOLE")
		.map(|v| !(v == "false" || v == "0" || v == "no"))
		.unwrap_or(DEFAULT_LOG_TO_CONSOLE);

	let log_dir = env::var("LOG_DIR")
		.ok()
		.map(|root| Path::new(&root).join(LOG_COMPONENT_NAME));

	let file_layer = match &log_dir {
		Some(dir) => Some(
			fmt::layer()
				.with_writer(setup_file_logging(dir)?)
				.with_timer(fmt::time::UtcTime::rfc_3339())
				.with_thread_ids(true)
				.with_target(true)
				.with_ansi(false),
		),
		None => None,
	};

	let console_layer = log_to_console.then(|| {
		fmt::layer()
			.with_writer(std::io::stderr)
			.with_timer(fmt::time::UtcTime::rfc_3339())
			.with_target(true)
			.with_ansi(true)
	});

	Registry::default()
		.with(filter)
		.with(file_layer)
		.with(console_layer)
		.init();

	info!(target: "cli", "Log level: {}", log_level);
	if let Some(dir) = &log_dir {
		info!(target: "cli", "Log directory: {}", dir.display());
	}

	Ok(())
}
