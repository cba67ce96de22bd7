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

//! Dispatcher diagnostics and transport-failure handling

use std::{
	sync::{Arc, Mutex},
	time::Duration,
};

use veryfi_sdk::dispatch::TRACE_ID_HEADER;
use veryfi_sdk::{
	Client, ClientConfig, ClientError, Credentials, FailureMode, Method, RequestObserver,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Nothing listens on port 1
const UNREACHABLE_BASE_URL: &str = "http://127.0.0.1:1/api/";

#[derive(Default)]
struct RecordingObserver {
	trace_ids: Mutex<Vec<(Method, String, String)>>,
	errors: Mutex<Vec<(Method, String, bool)>>,
}

impl RequestObserver for RecordingObserver {
	fn on_trace_id(&self, method: Method, url: &str, trace_id: &str) {
		self.trace_ids
			.lock()
			.unwrap()
			.push((method, url.to_string(), trace_id.to_string()));
	}

	fn on_transport_error(&self, method: Method, url: &str, error: &reqwest::Error) {
		self.errors
			.lock()
			.unwrap()
			.push((method, url.to_string(), error.is_timeout()));
	}
}

fn client_with(base_url: String, failure_mode: FailureMode) -> (Client, Arc<RecordingObserver>) {
	let observer = Arc::new(RecordingObserver::default());
	let config = ClientConfig {
		base_url,
		failure_mode,
		..ClientConfig::default()
	};
	let client = Client::with_config(Credentials::new("vrfClient", "s3cr3t", "jane", "k3y"), config)
		.unwrap()
		.with_observer(observer.clone());
	(client, observer)
}

#[tokio::test]
async fn trace_id_is_reported() {
	let server = MockServer::start().await;

	Mock::given(method("GET"))
		.and(path("/api/v8/w2s/5/"))
		.respond_with(
			ResponseTemplate::new(200)
				.insert_header(TRACE_ID_HEADER, "trace-abc")
				.set_body_string("{}"),
		)
		.mount(&server)
		.await;

	let (client, observer) = client_with(format!("{}/api/", server.uri()), FailureMode::Propagate);
	client.w2s().get(5).await.unwrap();

	let trace_ids = observer.trace_ids.lock().unwrap();
	assert_eq!(trace_ids.len(), 1);
	assert_eq!(trace_ids[0].0, Method::Get);
	assert!(trace_ids[0].1.ends_with("/api/v8/w2s/5/"));
	assert_eq!(trace_ids[0].2, "trace-abc");
	assert!(observer.errors.lock().unwrap().is_empty());
}

#[tokio::test]
async fn missing_trace_id_is_not_reported() {
	let server = MockServer::start().await;

	Mock::given(method("GET"))
		.respond_with(ResponseTemplate::new(200).set_body_string("{}"))
		.mount(&server)
		.await;

	let (client, observer) = client_with(format!("{}/api/", server.uri()), FailureMode::Propagate);
	client.contracts().list().await.unwrap();
	assert!(observer.trace_ids.lock().unwrap().is_empty());
}

#[tokio::test]
async fn transport_failure_degrades_to_empty_body() {
	let (client, observer) = client_with(UNREACHABLE_BASE_URL.to_string(), FailureMode::EmptyBody);

	let body = client.business_cards().get(1).await.unwrap();
	assert_eq!(body, "");

	let errors = observer.errors.lock().unwrap();
	assert_eq!(errors.len(), 1);
	assert_eq!(errors[0].0, Method::Get);
	assert_eq!(errors[0].1, "http://127.0.0.1:1/api/v8/business-cards/1/");
}

#[tokio::test]
async fn transport_failure_propagates_by_default() {
	let (client, observer) = client_with(UNREACHABLE_BASE_URL.to_string(), FailureMode::Propagate);

	let err = client.documents().list().await.unwrap_err();
	assert!(matches!(err, ClientError::Transport(_)));
	assert_eq!(observer.errors.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn timeout_is_a_transport_failure() {
	let server = MockServer::start().await;

	Mock::given(method("GET"))
		.respond_with(
			ResponseTemplate::new(200)
				.set_delay(Duration::from_secs(2))
				.set_body_string("{}"),
		)
		.mount(&server)
		.await;

	let (mut client, observer) =
		client_with(format!("{}/api/", server.uri()), FailureMode::Propagate);
	client.set_timeout(Duration::from_millis(100));

	let err = client.checks().list().await.unwrap_err();
	match err {
		ClientError::Transport(e) => assert!(e.is_timeout()),
		other => panic!("expected Transport, got: {other:?}"),
	}

	let errors = observer.errors.lock().unwrap();
	assert_eq!(errors.len(), 1);
	assert!(errors[0].2);
}

#[tokio::test]
async fn concurrent_requests_are_signed_independently() {
	let server = MockServer::start().await;

	Mock::given(method("GET"))
		.respond_with(ResponseTemplate::new(200).set_body_string("{}"))
		.expect(2)
		.mount(&server)
		.await;

	let (client, _observer) = client_with(format!("{}/api/", server.uri()), FailureMode::Propagate);
	let (checks, w2s) = (client.checks(), client.w2s());
	let (first, second) = tokio::join!(checks.get(1), w2s.get(2));
	assert_eq!(first.unwrap(), "{}");
	assert_eq!(second.unwrap(), "{}");

	let requests = server.received_requests().await.unwrap();
	let mut paths: Vec<_> = requests.iter().map(|r| r.url.path().to_string()).collect();
	paths.sort();
	assert_eq!(paths, vec!["/api/v8/checks/1/", "/api/v8/w2s/2/"]);
}
