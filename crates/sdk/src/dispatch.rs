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

//! Request dispatch
//!
//! Sends a [`PreparedRequest`] over the shared `reqwest` transport and hands
//! back the raw response text. The status code is not inspected: a 4xx or
//! 5xx body is returned like any other. Only transport-level failures
//! (connect, DNS, timeout, body read) count as errors.
//!
//! Diagnostics go through a [`RequestObserver`] so callers can capture them
//! without installing a global subscriber.

use std::sync::Arc;

use reqwest::Client as ReqwestClient;

use crate::client::ClientError;
use crate::config::FailureMode;
use crate::request::{Method, PreparedRequest};

/// Server-supplied diagnostic header
pub const TRACE_ID_HEADER: &str = "x-veryfi-trace-id";

/// Receives dispatch diagnostics
pub trait RequestObserver: Send + Sync {
	/// The response carried a trace id
	fn on_trace_id(&self, method: Method, url: &str, trace_id: &str);

	/// The transport failed before a complete response was read
	fn on_transport_error(&self, method: Method, url: &str, error: &reqwest::Error);
}

/// Default observer: emits `tracing` events
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl RequestObserver for TracingObserver {
	fn on_trace_id(&self, method: Method, url: &str, trace_id: &str) {
		tracing::info!(
			target: "veryfi::dispatch",
			method = %method,
			url = %url,
			trace_id = %trace_id,
			"Received response"
		);
	}

	fn on_transport_error(&self, method: Method, url: &str, error: &reqwest::Error) {
		tracing::error!(
			target: "veryfi::dispatch",
			method = %method,
			url = %url,
			timeout = error.is_timeout(),
			"Request failed: {}",
			error
		);
	}
}

/// Sends prepared requests
#[derive(Clone)]
pub struct Dispatcher {
	http: ReqwestClient,
	observer: Arc<dyn RequestObserver>,
}

impl Dispatcher {
	pub fn new(http: ReqwestClient) -> Self {
		Self::with_observer(http, Arc::new(TracingObserver))
	}

	pub fn with_observer(http: ReqwestClient, observer: Arc<dyn RequestObserver>) -> Self {
		Self { http, observer }
	}

	pub fn set_http_client(&mut self, http: ReqwestClient) {
		self.http = http;
	}

	pub fn set_observer(&mut self, observer: Arc<dyn RequestObserver>) {
		self.observer = observer;
	}

	/// Send a request and return the response body
	///
	/// On a transport failure the observer is notified first; `mode` then
	/// decides between returning the error and returning an empty body.
	pub async fn send(
		&self,
		request: &PreparedRequest,
		mode: FailureMode,
	) -> Result<String, ClientError> {
		match self.exchange(request).await {
			Ok(body) => Ok(body),
			Err(e) => {
				self.observer
					.on_transport_error(request.method, &request.url, &e);
				match mode {
					FailureMode::Propagate => Err(ClientError::Transport(e)),
					FailureMode::EmptyBody => Ok(String::new()),
				}
			}
		}
	}

	async fn exchange(&self, request: &PreparedRequest) -> Result<String, reqwest::Error> {
		let mut builder = self
			.http
			.request(request.method.to_reqwest(), &request.url)
			.timeout(request.timeout);

		for (name, value) in request.headers.iter() {
			builder = builder.header(name, value);
		}

		if let Some(body) = &request.body {
			builder = builder.body(body.clone());
		}

		let response = builder.send().await?;

		if let Some(trace_id) = response
			.headers()
			.get(TRACE_ID_HEADER)
			.and_then(|v| v.to_str().ok())
		{
			self.observer
				.on_trace_id(request.method, &request.url, trace_id);
		}

		response.text().await
	}
}
