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

use std::{future::Future, path::PathBuf, sync::Arc, time::Duration};

use reqwest::Client as ReqwestClient;
use thiserror::Error;

use crate::config::{ClientConfig, ClientSettings, ConfigError, Credentials, FailureMode};
use crate::dispatch::{Dispatcher, RequestObserver};
use crate::documents::{Documents, SyncDocuments};
use crate::request::{self, Method, Payload, RequestSpec};
use crate::resources::{Resource, ResourceKind, SyncResource};
use crate::signing::SigningError;

/// Error types for client operations
#[derive(Debug, Error)]
pub enum ClientError {
	#[error("Network error: {0}")]
	Transport(#[from] reqwest::Error),
	#[error("Signing error: {0}")]
	Signing(#[from] SigningError),
	#[error("Serialization error: {0}")]
	Serialization(#[from] serde_json::Error),
	#[error("Not a valid model: {0}")]
	InvalidModel(String),
	#[error("Failed to read {}: {source}", .path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
	#[error("Configuration error: {0}")]
	Config(#[from] ConfigError),
	#[error("Failed to create tokio runtime: {0}")]
	Runtime(#[source] std::io::Error),
}

/// Client for the document extraction API
///
/// Every call returns the raw response text. Non-2xx responses are not
/// errors; their body comes back like any other.
///
/// Configuration setters take `&mut self`, so they cannot run while a
/// request borrowing the client is in flight. Clones carry their own copy
/// of the configuration and share the transport and credentials.
#[derive(Clone)]
pub struct Client {
	credentials: Arc<Credentials>,
	config: ClientConfig,
	dispatcher: Dispatcher,
}

impl Client {
	/// Create a new client with the default configuration
	pub fn new(credentials: Credentials) -> Result<Self, ClientError> {
		Self::with_config(credentials, ClientConfig::default())
	}

	/// Create a new client with custom configuration
	pub fn with_config(credentials: Credentials, config: ClientConfig) -> Result<Self, ClientError> {
		let http = ReqwestClient::builder().build()?;

		Ok(Self {
			credentials: Arc::new(credentials),
			config,
			dispatcher: Dispatcher::new(http),
		})
	}

	/// Create a client from `VERYFI_*` environment variables
	pub fn from_env() -> Result<Self, ClientError> {
		let (credentials, config) = ClientSettings::from_env()?.into_parts();
		Self::with_config(credentials, config)
	}

	/// Replace the diagnostics observer
	pub fn with_observer(mut self, observer: Arc<dyn RequestObserver>) -> Self {
		self.dispatcher.set_observer(observer);
		self
	}

	pub fn config(&self) -> &ClientConfig {
		&self.config
	}

	pub fn credentials(&self) -> &Credentials {
		&self.credentials
	}

	pub fn set_base_url(&mut self, base_url: impl Into<String>) {
		self.config.base_url = base_url.into();
	}

	pub fn set_api_version(&mut self, api_version: u32) {
		self.config.api_version = api_version;
	}

	pub fn set_timeout(&mut self, timeout: Duration) {
		self.config.timeout = timeout;
	}

	pub fn set_failure_mode(&mut self, failure_mode: FailureMode) {
		self.config.failure_mode = failure_mode;
	}

	/// Replace the underlying HTTP transport
	pub fn set_http_client(&mut self, http: ReqwestClient) {
		self.dispatcher.set_http_client(http);
	}

	/// Sign and send one request
	pub async fn execute(&self, spec: &RequestSpec) -> Result<String, ClientError> {
		let prepared = request::build(spec, &self.credentials, &self.config)?;
		self.dispatcher
			.send(&prepared, self.config.failure_mode)
			.await
	}

	/// Sign and send a request to an arbitrary resource path
	pub async fn request(
		&self,
		method: Method,
		resource_path: &str,
		payload: Payload,
	) -> Result<String, ClientError> {
		self.execute(&RequestSpec::new(method, resource_path, payload))
			.await
	}

	pub fn resource(&self, kind: ResourceKind) -> Resource<'_> {
		Resource::new(self, kind)
	}

	/// Receipts and invoices
	pub fn documents(&self) -> Documents<'_> {
		Documents::new(self)
	}

	pub fn any_documents(&self) -> Resource<'_> {
		self.resource(ResourceKind::AnyDocuments)
	}

	pub fn bank_statements(&self) -> Resource<'_> {
		self.resource(ResourceKind::BankStatements)
	}

	pub fn business_cards(&self) -> Resource<'_> {
		self.resource(ResourceKind::BusinessCards)
	}

	pub fn checks(&self) -> Resource<'_> {
		self.resource(ResourceKind::Checks)
	}

	pub fn w2s(&self) -> Resource<'_> {
		self.resource(ResourceKind::W2s)
	}

	pub fn w8ben_es(&self) -> Resource<'_> {
		self.resource(ResourceKind::W8BenEs)
	}

	pub fn w9s(&self) -> Resource<'_> {
		self.resource(ResourceKind::W9s)
	}

	pub fn contracts(&self) -> Resource<'_> {
		self.resource(ResourceKind::Contracts)
	}
}

/// Synchronous client wrapper
///
/// This wraps the async client and runs it in a private tokio runtime.
/// Must not be called from inside another tokio runtime.
pub struct SyncClient {
	client: Client,
	runtime: tokio::runtime::Runtime,
}

impl SyncClient {
	/// Create a new synchronous client
	pub fn new(credentials: Credentials) -> Result<Self, ClientError> {
		Self::from_client(Client::new(credentials)?)
	}

	/// Create a new synchronous client with custom configuration
	pub fn with_config(credentials: Credentials, config: ClientConfig) -> Result<Self, ClientError> {
		Self::from_client(Client::with_config(credentials, config)?)
	}

	/// Wrap an existing async client
	pub fn from_client(client: Client) -> Result<Self, ClientError> {
		let runtime = tokio::runtime::Runtime::new().map_err(ClientError::Runtime)?;
		Ok(Self { client, runtime })
	}

	/// The wrapped async client
	pub fn client(&self) -> &Client {
		&self.client
	}

	pub fn client_mut(&mut self) -> &mut Client {
		&mut self.client
	}

	/// Run any future from the async client to completion
	pub fn block_on<F: Future>(&self, future: F) -> F::Output {
		self.runtime.block_on(future)
	}

	/// Sign and send one request (synchronous)
	pub fn execute(&self, spec: &RequestSpec) -> Result<String, ClientError> {
		self.block_on(self.client.execute(spec))
	}

	/// Sign and send a request to an arbitrary resource path (synchronous)
	pub fn request(
		&self,
		method: Method,
		resource_path: &str,
		payload: Payload,
	) -> Result<String, ClientError> {
		self.execute(&RequestSpec::new(method, resource_path, payload))
	}

	pub fn resource(&self, kind: ResourceKind) -> SyncResource<'_> {
		SyncResource::new(self, kind)
	}

	/// Receipts and invoices (synchronous)
	pub fn documents(&self) -> SyncDocuments<'_> {
		SyncDocuments::new(self)
	}

	pub fn any_documents(&self) -> SyncResource<'_> {
		self.resource(ResourceKind::AnyDocuments)
	}

	pub fn bank_statements(&self) -> SyncResource<'_> {
		self.resource(ResourceKind::BankStatements)
	}

	pub fn business_cards(&self) -> SyncResource<'_> {
		self.resource(ResourceKind::BusinessCards)
	}

	pub fn checks(&self) -> SyncResource<'_> {
		self.resource(ResourceKind::Checks)
	}

	pub fn w2s(&self) -> SyncResource<'_> {
		self.resource(ResourceKind::W2s)
	}

	pub fn w8ben_es(&self) -> SyncResource<'_> {
		self.resource(ResourceKind::W8BenEs)
	}

	pub fn w9s(&self) -> SyncResource<'_> {
		self.resource(ResourceKind::W9s)
	}

	pub fn contracts(&self) -> SyncResource<'_> {
		self.resource(ResourceKind::Contracts)
	}
}
