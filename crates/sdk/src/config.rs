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

use std::{fmt, time::Duration};

use serde::Deserialize;

/// Default API root (can be overridden by VERYFI_BASE_URL)
pub const DEFAULT_BASE_URL: &str = "https://api.veryfi.com/api/";

/// Default API version segment (can be overridden by VERYFI_API_VERSION)
pub const DEFAULT_API_VERSION: u32 = 8;

/// Default per-request timeout in seconds (can be overridden by VERYFI_TIMEOUT_SECS)
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Environment variable prefix for settings
pub const ENV_PREFIX: &str = "VERYFI";

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("Failed to load settings: {0}")]
	Source(#[from] config::ConfigError),
	#[error("Invalid setting: {0}")]
	Invalid(String),
}

/// API credentials
///
/// Immutable once built. Every request built by a client reads the same
/// shared copy.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
	client_id: String,
	client_secret: String,
	username: String,
	api_key: String,
}

impl Credentials {
	pub fn new(
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
		username: impl Into<String>,
		api_key: impl Into<String>,
	) -> Self {
		Self {
			client_id: client_id.into(),
			client_secret: client_secret.into(),
			username: username.into(),
			api_key: api_key.into(),
		}
	}

	pub fn client_id(&self) -> &str {
		&self.client_id
	}

	pub fn client_secret(&self) -> &str {
		&self.client_secret
	}

	pub fn username(&self) -> &str {
		&self.username
	}

	pub fn api_key(&self) -> &str {
		&self.api_key
	}

	/// Value of the `Authorization` header
	pub fn authorization(&self) -> String {
		format!("apikey {}:{}", self.username, self.api_key)
	}
}

impl fmt::Debug for Credentials {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Credentials")
			.field("client_id", &self.client_id)
			.field("client_secret", &"[REDACTED]")
			.field("username", &self.username)
			.field("api_key", &"[REDACTED]")
			.finish()
	}
}

/// What the dispatcher reports when the transport fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureMode {
	/// Return `ClientError::Transport`
	#[default]
	Propagate,
	/// Log the failure and return an empty body
	EmptyBody,
}

/// Client-level request settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
	/// API root, including its trailing slash
	pub base_url: String,
	pub api_version: u32,
	/// Attached to every request
	pub timeout: Duration,
	pub failure_mode: FailureMode,
}

impl Default for ClientConfig {
	fn default() -> Self {
		Self {
			base_url: DEFAULT_BASE_URL.to_string(),
			api_version: DEFAULT_API_VERSION,
			timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
			failure_mode: FailureMode::default(),
		}
	}
}

impl ClientConfig {
	/// Full URL for a resource path.
	///
	/// Plain concatenation: `{base_url}v{api_version}{resource_path}`. Slashes
	/// in `resource_path` are endpoint-specific and kept as given.
	pub fn endpoint_url(&self, resource_path: &str) -> String {
		format!("{}v{}{}", self.base_url, self.api_version, resource_path)
	}
}

fn default_base_url() -> String {
	DEFAULT_BASE_URL.to_string()
}

fn default_api_version() -> u32 {
	DEFAULT_API_VERSION
}

fn default_timeout_secs() -> u64 {
	DEFAULT_TIMEOUT_SECS
}

/// Settings loaded from `VERYFI_*` environment variables
///
/// - `VERYFI_CLIENT_ID`, `VERYFI_CLIENT_SECRET`, `VERYFI_USERNAME`,
///   `VERYFI_API_KEY` (required)
/// - `VERYFI_BASE_URL` (default: `https://api.veryfi.com/api/`)
/// - `VERYFI_API_VERSION` (default: 8)
/// - `VERYFI_TIMEOUT_SECS` (default: 120)
/// - `VERYFI_FAILURE_MODE` (`propagate` or `empty_body`, default: `propagate`)
#[derive(Clone, Deserialize)]
pub struct ClientSettings {
	pub client_id: String,
	pub client_secret: String,
	pub username: String,
	pub api_key: String,
	#[serde(default = "default_base_url")]
	pub base_url: String,
	#[serde(default = "default_api_version")]
	pub api_version: u32,
	#[serde(default = "default_timeout_secs")]
	pub timeout_secs: u64,
	#[serde(default)]
	pub failure_mode: FailureMode,
}

impl ClientSettings {
	/// Load settings from the process environment
	///
	/// Values stay strings until deserialized, so credentials such as
	/// `0012345` keep their exact text while numeric fields still parse.
	pub fn from_env() -> Result<Self, ConfigError> {
		let cfg = config::Config::builder()
			.add_source(config::Environment::with_prefix(ENV_PREFIX))
			.build()?;

		Self::from_config(cfg)
	}

	/// Deserialize and validate settings from an already-built source
	pub fn from_config(cfg: config::Config) -> Result<Self, ConfigError> {
		let settings: Self = cfg.try_deserialize()?;
		settings.validate()?;
		Ok(settings)
	}

	fn validate(&self) -> Result<(), ConfigError> {
		if self.base_url.is_empty() {
			return Err(ConfigError::Invalid("base_url must not be empty".to_string()));
		}
		if self.timeout_secs == 0 {
			return Err(ConfigError::Invalid(
				"timeout_secs must be greater than zero".to_string(),
			));
		}
		Ok(())
	}

	pub fn credentials(&self) -> Credentials {
		Credentials::new(
			self.client_id.clone(),
			self.client_secret.clone(),
			self.username.clone(),
			self.api_key.clone(),
		)
	}

	pub fn client_config(&self) -> ClientConfig {
		ClientConfig {
			base_url: self.base_url.clone(),
			api_version: self.api_version,
			timeout: Duration::from_secs(self.timeout_secs),
			failure_mode: self.failure_mode,
		}
	}

	/// Split into the arguments of `Client::with_config`
	pub fn into_parts(self) -> (Credentials, ClientConfig) {
		let config = self.client_config();
		let credentials = Credentials::new(
			self.client_id,
			self.client_secret,
			self.username,
			self.api_key,
		);
		(credentials, config)
	}
}

impl fmt::Debug for ClientSettings {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ClientSettings")
			.field("credentials", &self.credentials())
			.field("base_url", &self.base_url)
			.field("api_version", &self.api_version)
			.field("timeout_secs", &self.timeout_secs)
			.field("failure_mode", &self.failure_mode)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn builder_with_credentials() -> config::ConfigBuilder<config::builder::DefaultState> {
		config::Config::builder()
			.set_override("client_id", "vrfClient")
			.unwrap()
			.set_override("client_secret", "s3cr3t")
			.unwrap()
			.set_override("username", "jane")
			.unwrap()
			.set_override("api_key", "k3y")
			.unwrap()
	}

	#[test]
	fn test_default_config() {
		let config = ClientConfig::default();
		assert_eq!(config.base_url, "https://api.veryfi.com/api/");
		assert_eq!(config.api_version, 8);
		assert_eq!(config.timeout, Duration::from_secs(120));
		assert_eq!(config.failure_mode, FailureMode::Propagate);
	}

	#[test]
	fn test_endpoint_url() {
		let config = ClientConfig {
			base_url: "https://x/".to_string(),
			..ClientConfig::default()
		};
		assert_eq!(config.endpoint_url("/documents/"), "https://x/v8/documents/");
		assert_eq!(
			config.endpoint_url("/documents/1/line-items/2"),
			"https://x/v8/documents/1/line-items/2"
		);
	}

	#[test]
	fn test_authorization_header_value() {
		let credentials = Credentials::new("id", "secret", "jane", "k3y");
		assert_eq!(credentials.authorization(), "apikey jane:k3y");
	}

	#[test]
	fn test_debug_redacts_secrets() {
		let credentials = Credentials::new("id", "very-secret", "jane", "very-key");
		let debug = format!("{:?}", credentials);
		assert!(debug.contains("[REDACTED]"));
		assert!(!debug.contains("very-secret"));
		assert!(!debug.contains("very-key"));
	}

	#[test]
	fn test_settings_defaults() {
		let cfg = builder_with_credentials().build().unwrap();
		let settings = ClientSettings::from_config(cfg).unwrap();
		let (credentials, config) = settings.into_parts();
		assert_eq!(credentials.client_id(), "vrfClient");
		assert_eq!(credentials.username(), "jane");
		assert_eq!(config, ClientConfig::default());
	}

	#[test]
	fn test_settings_overrides() {
		let cfg = builder_with_credentials()
			.set_override("base_url", "http://localhost:9000/api/")
			.unwrap()
			.set_override("api_version", 7_i64)
			.unwrap()
			.set_override("timeout_secs", 5_i64)
			.unwrap()
			.set_override("failure_mode", "empty_body")
			.unwrap()
			.build()
			.unwrap();
		let config = ClientSettings::from_config(cfg).unwrap().client_config();
		assert_eq!(config.base_url, "http://localhost:9000/api/");
		assert_eq!(config.api_version, 7);
		assert_eq!(config.timeout, Duration::from_secs(5));
		assert_eq!(config.failure_mode, FailureMode::EmptyBody);
	}

	#[test]
	fn test_settings_missing_credentials() {
		let cfg = config::Config::builder()
			.set_override("client_id", "vrfClient")
			.unwrap()
			.build()
			.unwrap();
		assert!(matches!(
			ClientSettings::from_config(cfg),
			Err(ConfigError::Source(_))
		));
	}

	// The only test in this crate that touches VERYFI_* process variables
	#[test]
	fn test_settings_from_env_keeps_credential_text() {
		let vars = [
			("VERYFI_CLIENT_ID", "vrf0001"),
			("VERYFI_CLIENT_SECRET", "0012345"),
			("VERYFI_USERNAME", "jane"),
			("VERYFI_API_KEY", "1e10"),
			("VERYFI_API_VERSION", "7"),
			("VERYFI_TIMEOUT_SECS", "5"),
			("VERYFI_FAILURE_MODE", "empty_body"),
		];
		for (key, value) in vars {
			unsafe { std::env::set_var(key, value) };
		}

		let result = ClientSettings::from_env();

		for (key, _) in vars {
			unsafe { std::env::remove_var(key) };
		}

		let settings = result.unwrap();
		assert_eq!(settings.client_id, "vrf0001");
		assert_eq!(settings.client_secret, "0012345");
		assert_eq!(settings.api_key, "1e10");
		assert_eq!(settings.base_url, DEFAULT_BASE_URL);

		let (credentials, config) = settings.into_parts();
		assert_eq!(credentials.client_secret(), "0012345");
		assert_eq!(credentials.authorization(), "apikey jane:1e10");
		assert_eq!(config.api_version, 7);
		assert_eq!(config.timeout, Duration::from_secs(5));
		assert_eq!(config.failure_mode, FailureMode::EmptyBody);
	}

	#[test]
	fn test_settings_zero_timeout_rejected() {
		let cfg = builder_with_credentials()
			.set_override("timeout_secs", 0_i64)
			.unwrap()
			.build()
			.unwrap();
		assert!(matches!(
			ClientSettings::from_config(cfg),
			Err(ConfigError::Invalid(_))
		));
	}
}
