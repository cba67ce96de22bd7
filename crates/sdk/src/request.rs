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

//! Request construction
//!
//! Turns a verb, a resource path, and a JSON payload into a fully signed
//! request. The builder does no validation of its own: a malformed path or
//! an unreachable host only shows up when the dispatcher sends it.
//!
//! # Wire format
//!
//! - URL: `{base_url}v{api_version}{resource_path}`
//! - Headers (always exactly seven): `User-Agent`, `Accept`, `Content-Type`,
//!   `Client-Id`, `Authorization`, `X-Veryfi-Request-Timestamp`,
//!   `X-Veryfi-Request-Signature`
//! - Body: the serialized payload for POST and PUT, nothing for GET and DELETE

use std::{fmt, time::Duration};

use serde_json::{Map, Value};

use crate::client::ClientError;
use crate::config::{ClientConfig, Credentials};
use crate::signing::{SigningError, sign_payload};

pub const USER_AGENT: &str = concat!("Rust Veryfi-Rust/", env!("CARGO_PKG_VERSION"));
pub const JSON_MEDIA_TYPE: &str = "application/json";
pub const CLIENT_ID_HEADER: &str = "Client-Id";
pub const TIMESTAMP_HEADER: &str = "X-Veryfi-Request-Timestamp";
pub const SIGNATURE_HEADER: &str = "X-Veryfi-Request-Signature";

/// JSON object sent (and signed) with a request
pub type Payload = Map<String, Value>;

/// HTTP verb
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
	Get,
	Post,
	Put,
	Delete,
}

impl Method {
	pub fn as_str(self) -> &'static str {
		match self {
			Method::Get => "GET",
			Method::Post => "POST",
			Method::Put => "PUT",
			Method::Delete => "DELETE",
		}
	}

	/// Whether the payload travels as the request body
	pub fn has_body(self) -> bool {
		matches!(self, Method::Post | Method::Put)
	}

	pub(crate) fn to_reqwest(self) -> reqwest::Method {
		match self {
			Method::Get => reqwest::Method::GET,
			Method::Post => reqwest::Method::POST,
			Method::Put => reqwest::Method::PUT,
			Method::Delete => reqwest::Method::DELETE,
		}
	}
}

impl fmt::Display for Method {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// One API call before signing: verb, endpoint path, and payload
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSpec {
	pub method: Method,
	/// Appended verbatim after the version segment
	pub resource_path: String,
	pub payload: Payload,
}

impl RequestSpec {
	pub fn new(method: Method, resource_path: impl Into<String>, payload: Payload) -> Self {
		Self {
			method,
			resource_path: resource_path.into(),
			payload,
		}
	}

	pub fn get(resource_path: impl Into<String>, payload: Payload) -> Self {
		Self::new(Method::Get, resource_path, payload)
	}

	pub fn post(resource_path: impl Into<String>, payload: Payload) -> Self {
		Self::new(Method::Post, resource_path, payload)
	}

	pub fn put(resource_path: impl Into<String>, payload: Payload) -> Self {
		Self::new(Method::Put, resource_path, payload)
	}

	pub fn delete(resource_path: impl Into<String>, payload: Payload) -> Self {
		Self::new(Method::Delete, resource_path, payload)
	}
}

/// The authentication header set of a single request
///
/// Never reused: the timestamp, and therefore the signature, differs on
/// every build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedHeaders {
	timestamp_ms: i64,
	entries: Vec<(&'static str, String)>,
}

impl SignedHeaders {
	pub fn new(
		credentials: &Credentials,
		timestamp_ms: i64,
		payload: &Payload,
	) -> Result<Self, SigningError> {
		let signature = sign_payload(
			credentials.client_secret().as_bytes(),
			timestamp_ms,
			payload,
		)?;

		let entries = vec![
			("User-Agent", USER_AGENT.to_string()),
			("Accept", JSON_MEDIA_TYPE.to_string()),
			("Content-Type", JSON_MEDIA_TYPE.to_string()),
			(CLIENT_ID_HEADER, credentials.client_id().to_string()),
			("Authorization", credentials.authorization()),
			(TIMESTAMP_HEADER, timestamp_ms.to_string()),
			(SIGNATURE_HEADER, signature),
		];

		Ok(Self {
			timestamp_ms,
			entries,
		})
	}

	pub fn timestamp_ms(&self) -> i64 {
		self.timestamp_ms
	}

	/// Case-insensitive header lookup
	pub fn get(&self, name: &str) -> Option<&str> {
		self.entries
			.iter()
			.find(|(key, _)| key.eq_ignore_ascii_case(name))
			.map(|(_, value)| value.as_str())
	}

	pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
		self.entries.iter().map(|(key, value)| (*key, value.as_str()))
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

/// A signed request ready for the dispatcher
#[derive(Debug, Clone)]
pub struct PreparedRequest {
	pub method: Method,
	pub url: String,
	pub headers: SignedHeaders,
	pub body: Option<String>,
	pub timeout: Duration,
}

/// Build a request stamped with the current wall-clock time
pub fn build(
	spec: &RequestSpec,
	credentials: &Credentials,
	config: &ClientConfig,
) -> Result<PreparedRequest, ClientError> {
	build_at(spec, credentials, config, chrono::Utc::now().timestamp_millis())
}

/// Build a request with an explicit timestamp (milliseconds since the epoch)
pub fn build_at(
	spec: &RequestSpec,
	credentials: &Credentials,
	config: &ClientConfig,
	timestamp_ms: i64,
) -> Result<PreparedRequest, ClientError> {
	let url = config.endpoint_url(&spec.resource_path);
	let headers = SignedHeaders::new(credentials, timestamp_ms, &spec.payload)?;

	let body = if spec.method.has_body() {
		Some(serde_json::to_string(&spec.payload)?)
	} else {
		None
	};

	tracing::debug!(
		target: "veryfi::request",
		method = %spec.method,
		url = %url,
		timestamp_ms,
		"Built signed request"
	);

	Ok(PreparedRequest {
		method: spec.method,
		url,
		headers,
		body,
		timeout: config.timeout,
	})
}
