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

//! Blocking client tests
//!
//! These are plain `#[test]` functions: the blocking client owns a runtime
//! and cannot be driven from inside `#[tokio::test]`. The mock server is set
//! up through a separate runtime.

use serde_json::json;
use veryfi_sdk::{
	Client, ClientConfig, Credentials, FailureMode, NewLineItem, Payload, SyncClient,
	UrlSubmission,
};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn credentials() -> Credentials {
	Credentials::new("vrfClient", "s3cr3t", "jane", "k3y")
}

fn config_for(server: &MockServer) -> ClientConfig {
	ClientConfig {
		base_url: format!("{}/api/", server.uri()),
		..ClientConfig::default()
	}
}

#[test]
fn sync_and_async_return_the_same_body() {
	let rt = tokio::runtime::Runtime::new().unwrap();
	let server = rt.block_on(MockServer::start());

	rt.block_on(
		Mock::given(method("GET"))
			.and(path("/api/v8/checks/7/"))
			.respond_with(ResponseTemplate::new(200).set_body_string(r#"{"id":7,"amount":12.5}"#))
			.expect(2)
			.mount(&server),
	);

	let async_client = Client::with_config(credentials(), config_for(&server)).unwrap();
	let async_body = rt.block_on(async_client.checks().get(7)).unwrap();

	let sync_client = SyncClient::with_config(credentials(), config_for(&server)).unwrap();
	let sync_body = sync_client.checks().get(7).unwrap();

	assert_eq!(sync_body, async_body);
	assert_eq!(sync_body, r#"{"id":7,"amount":12.5}"#);
}

#[test]
fn sync_document_calls() {
	let rt = tokio::runtime::Runtime::new().unwrap();
	let server = rt.block_on(MockServer::start());

	rt.block_on(async {
		Mock::given(method("POST"))
			.and(path("/api/v8/documents/"))
			.and(body_json(json!({
				"auto_delete": true,
				"boost_mode": false,
				"categories": ["Fuel"],
				"file_url": "https://x/r.jpg"
			})))
			.respond_with(ResponseTemplate::new(201).set_body_string(r#"{"id":1}"#))
			.expect(1)
			.mount(&server)
			.await;
		Mock::given(method("POST"))
			.and(path("/api/v8/documents/1/line-items/"))
			.respond_with(ResponseTemplate::new(201).set_body_string(r#"{"id":2}"#))
			.expect(1)
			.mount(&server)
			.await;
	});

	let client = SyncClient::with_config(credentials(), config_for(&server)).unwrap();
	let submission = UrlSubmission::new("https://x/r.jpg")
		.with_categories(["Fuel"])
		.with_auto_delete(true);
	assert_eq!(
		client
			.documents()
			.process_url(&submission, Payload::new())
			.unwrap(),
		r#"{"id":1}"#
	);
	assert_eq!(
		client
			.documents()
			.add_line_item(1, &NewLineItem::new(1, "Fuel", 40.0))
			.unwrap(),
		r#"{"id":2}"#
	);
}

#[test]
fn sync_transport_failure_degrades_to_empty_body() {
	let config = ClientConfig {
		base_url: "http://127.0.0.1:1/api/".to_string(),
		failure_mode: FailureMode::EmptyBody,
		..ClientConfig::default()
	};
	let client = SyncClient::with_config(credentials(), config).unwrap();
	assert_eq!(client.w8ben_es().list().unwrap(), "");
}
