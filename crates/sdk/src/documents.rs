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

//! Receipts and invoices
//!
//! On top of the generic family calls, documents have line items and tags.
//! Line-item paths are built from the document path without its trailing
//! slash: the collection is `/documents/{id}/line-items/` but a single item
//! is `/documents/{id}/line-items/{line_item_id}` with no slash after it.

use serde_json::Value;

use crate::client::{Client, ClientError, SyncClient};
use crate::file::FileAttachment;
use crate::request::{Payload, RequestSpec};
use crate::resources::{ProcessOptions, Resource, ResourceKind, SyncResource, UrlSubmission};
use crate::types::{LineItemUpdate, NewLineItem, to_payload};

fn line_items_path(document_id: u64) -> String {
	format!("/documents/{}/line-items/", document_id)
}

fn line_item_path(document_id: u64, line_item_id: u64) -> String {
	format!("/documents/{}/line-items/{}", document_id, line_item_id)
}

fn tags_path(document_id: u64) -> String {
	format!("/documents/{}/tags/", document_id)
}

fn check_tag(name: &str) -> Result<(), ClientError> {
	if name.trim().is_empty() {
		return Err(ClientError::InvalidModel("tag name must not be empty".to_string()));
	}
	Ok(())
}

fn tags_payload(names: &[String]) -> Result<Payload, ClientError> {
	names.iter().try_for_each(|name| check_tag(name))?;
	let mut payload = Payload::new();
	payload.insert("tags".to_string(), Value::from(names.to_vec()));
	Ok(payload)
}

pub fn line_items_spec(document_id: u64) -> RequestSpec {
	RequestSpec::get(line_items_path(document_id), Payload::new())
}

pub fn line_item_spec(document_id: u64, line_item_id: u64) -> RequestSpec {
	RequestSpec::get(line_item_path(document_id, line_item_id), Payload::new())
}

/// Validated before anything is signed
pub fn add_line_item_spec(
	document_id: u64,
	item: &NewLineItem,
) -> Result<RequestSpec, ClientError> {
	item.validate()?;
	Ok(RequestSpec::post(
		line_items_path(document_id),
		to_payload(item)?,
	))
}

pub fn update_line_item_spec(
	document_id: u64,
	line_item_id: u64,
	update: &LineItemUpdate,
) -> Result<RequestSpec, ClientError> {
	update.validate()?;
	Ok(RequestSpec::put(
		line_item_path(document_id, line_item_id),
		to_payload(update)?,
	))
}

pub fn delete_line_item_spec(document_id: u64, line_item_id: u64) -> RequestSpec {
	RequestSpec::delete(line_item_path(document_id, line_item_id), Payload::new())
}

pub fn delete_line_items_spec(document_id: u64) -> RequestSpec {
	RequestSpec::delete(line_items_path(document_id), Payload::new())
}

pub fn add_tag_spec(document_id: u64, name: &str) -> Result<RequestSpec, ClientError> {
	check_tag(name)?;
	let mut payload = Payload::new();
	payload.insert("name".to_string(), Value::from(name));
	Ok(RequestSpec::put(tags_path(document_id), payload))
}

pub fn add_tags_spec(document_id: u64, names: &[String]) -> Result<RequestSpec, ClientError> {
	Ok(RequestSpec::post(tags_path(document_id), tags_payload(names)?))
}

/// Replaces the whole tag list through a document update
pub fn replace_tags_spec(document_id: u64, names: &[String]) -> Result<RequestSpec, ClientError> {
	Ok(ResourceKind::Documents.update_spec(document_id, tags_payload(names)?))
}

/// Async calls on receipts and invoices
#[derive(Clone, Copy)]
pub struct Documents<'a> {
	client: &'a Client,
	resource: Resource<'a>,
}

impl<'a> Documents<'a> {
	pub(crate) fn new(client: &'a Client) -> Self {
		Self {
			client,
			resource: Resource::new(client, ResourceKind::Documents),
		}
	}

	pub async fn list(&self) -> Result<String, ClientError> {
		self.resource.list().await
	}

	pub async fn get(&self, document_id: u64) -> Result<String, ClientError> {
		self.resource.get(document_id).await
	}

	pub async fn process_file(
		&self,
		file: &FileAttachment,
		options: &ProcessOptions,
		extra: Payload,
	) -> Result<String, ClientError> {
		self.resource.process_file(file, options, extra).await
	}

	pub async fn process_url(
		&self,
		submission: &UrlSubmission,
		extra: Payload,
	) -> Result<String, ClientError> {
		self.resource.process_url(submission, extra).await
	}

	pub async fn update(&self, document_id: u64, fields: Payload) -> Result<String, ClientError> {
		self.resource.update(document_id, fields).await
	}

	pub async fn delete(&self, document_id: u64) -> Result<String, ClientError> {
		self.resource.delete(document_id).await
	}

	pub async fn line_items(&self, document_id: u64) -> Result<String, ClientError> {
		self.client.execute(&line_items_spec(document_id)).await
	}

	pub async fn line_item(
		&self,
		document_id: u64,
		line_item_id: u64,
	) -> Result<String, ClientError> {
		self.client
			.execute(&line_item_spec(document_id, line_item_id))
			.await
	}

	pub async fn add_line_item(
		&self,
		document_id: u64,
		item: &NewLineItem,
	) -> Result<String, ClientError> {
		let spec = add_line_item_spec(document_id, item)?;
		self.client.execute(&spec).await
	}

	pub async fn update_line_item(
		&self,
		document_id: u64,
		line_item_id: u64,
		update: &LineItemUpdate,
	) -> Result<String, ClientError> {
		let spec = update_line_item_spec(document_id, line_item_id, update)?;
		self.client.execute(&spec).await
	}

	pub async fn delete_line_item(
		&self,
		document_id: u64,
		line_item_id: u64,
	) -> Result<String, ClientError> {
		self.client
			.execute(&delete_line_item_spec(document_id, line_item_id))
			.await
	}

	pub async fn delete_line_items(&self, document_id: u64) -> Result<String, ClientError> {
		self.client
			.execute(&delete_line_items_spec(document_id))
			.await
	}

	pub async fn add_tag(&self, document_id: u64, name: &str) -> Result<String, ClientError> {
		let spec = add_tag_spec(document_id, name)?;
		self.client.execute(&spec).await
	}

	pub async fn add_tags(&self, document_id: u64, names: &[String]) -> Result<String, ClientError> {
		let spec = add_tags_spec(document_id, names)?;
		self.client.execute(&spec).await
	}

	pub async fn replace_tags(
		&self,
		document_id: u64,
		names: &[String],
	) -> Result<String, ClientError> {
		let spec = replace_tags_spec(document_id, names)?;
		self.client.execute(&spec).await
	}
}

/// Blocking calls on receipts and invoices
#[derive(Clone, Copy)]
pub struct SyncDocuments<'a> {
	client: &'a SyncClient,
	resource: SyncResource<'a>,
}

impl<'a> SyncDocuments<'a> {
	pub(crate) fn new(client: &'a SyncClient) -> Self {
		Self {
			client,
			resource: SyncResource::new(client, ResourceKind::Documents),
		}
	}

	pub fn list(&self) -> Result<String, ClientError> {
		self.resource.list()
	}

	pub fn get(&self, document_id: u64) -> Result<String, ClientError> {
		self.resource.get(document_id)
	}

	pub fn process_file(
		&self,
		file: &FileAttachment,
		options: &ProcessOptions,
		extra: Payload,
	) -> Result<String, ClientError> {
		self.resource.process_file(file, options, extra)
	}

	pub fn process_url(
		&self,
		submission: &UrlSubmission,
		extra: Payload,
	) -> Result<String, ClientError> {
		self.resource.process_url(submission, extra)
	}

	pub fn update(&self, document_id: u64, fields: Payload) -> Result<String, ClientError> {
		self.resource.update(document_id, fields)
	}

	pub fn delete(&self, document_id: u64) -> Result<String, ClientError> {
		self.resource.delete(document_id)
	}

	pub fn line_items(&self, document_id: u64) -> Result<String, ClientError> {
		self.client.execute(&line_items_spec(document_id))
	}

	pub fn line_item(&self, document_id: u64, line_item_id: u64) -> Result<String, ClientError> {
		self.client.execute(&line_item_spec(document_id, line_item_id))
	}

	pub fn add_line_item(
		&self,
		document_id: u64,
		item: &NewLineItem,
	) -> Result<String, ClientError> {
		self.client.execute(&add_line_item_spec(document_id, item)?)
	}

	pub fn update_line_item(
		&self,
		document_id: u64,
		line_item_id: u64,
		update: &LineItemUpdate,
	) -> Result<String, ClientError> {
		self.client
			.execute(&update_line_item_spec(document_id, line_item_id, update)?)
	}

	pub fn delete_line_item(
		&self,
		document_id: u64,
		line_item_id: u64,
	) -> Result<String, ClientError> {
		self.client
			.execute(&delete_line_item_spec(document_id, line_item_id))
	}

	pub fn delete_line_items(&self, document_id: u64) -> Result<String, ClientError> {
		self.client.execute(&delete_line_items_spec(document_id))
	}

	pub fn add_tag(&self, document_id: u64, name: &str) -> Result<String, ClientError> {
		self.client.execute(&add_tag_spec(document_id, name)?)
	}

	pub fn add_tags(&self, document_id: u64, names: &[String]) -> Result<String, ClientError> {
		self.client.execute(&add_tags_spec(document_id, names)?)
	}

	pub fn replace_tags(&self, document_id: u64, names: &[String]) -> Result<String, ClientError> {
		self.client.execute(&replace_tags_spec(document_id, names)?)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::request::Method;
	use serde_json::json;

	#[test]
	fn test_line_item_paths() {
		assert_eq!(
			line_items_spec(5).resource_path,
			"/documents/5/line-items/"
		);
		let single = line_item_spec(5, 9);
		assert_eq!(single.method, Method::Get);
		assert_eq!(single.resource_path, "/documents/5/line-items/9");
		assert!(single.payload.is_empty());

		assert_eq!(delete_line_items_spec(5).method, Method::Delete);
		assert_eq!(
			delete_line_item_spec(5, 9).resource_path,
			"/documents/5/line-items/9"
		);
	}

	#[test]
	fn test_add_line_item_spec() {
		let spec = add_line_item_spec(5, &NewLineItem::new(1, "Coffee", 4.5)).unwrap();
		assert_eq!(spec.method, Method::Post);
		assert_eq!(spec.resource_path, "/documents/5/line-items/");
		assert_eq!(
			spec.payload,
			to_payload(&json!({ "order": 1, "description": "Coffee", "total": 4.5 })).unwrap()
		);
	}

	#[test]
	fn test_invalid_line_item_rejected_before_signing() {
		let err = add_line_item_spec(5, &NewLineItem::new(1, "", 4.5)).unwrap_err();
		assert!(matches!(err, ClientError::InvalidModel(_)));

		let err = update_line_item_spec(5, 9, &LineItemUpdate::default()).unwrap_err();
		assert!(matches!(err, ClientError::InvalidModel(_)));
	}

	#[test]
	fn test_update_line_item_spec() {
		let update = LineItemUpdate {
			description: Some("Tea".to_string()),
			..Default::default()
		};
		let spec = update_line_item_spec(5, 9, &update).unwrap();
		assert_eq!(spec.method, Method::Put);
		assert_eq!(spec.resource_path, "/documents/5/line-items/9");
		assert_eq!(
			spec.payload,
			to_payload(&json!({ "description": "Tea" })).unwrap()
		);
	}

	#[test]
	fn test_tag_specs() {
		let spec = add_tag_spec(5, "travel").unwrap();
		assert_eq!(spec.method, Method::Put);
		assert_eq!(spec.resource_path, "/documents/5/tags/");
		assert_eq!(spec.payload["name"], "travel");

		let names = vec!["a".to_string(), "b".to_string()];
		let spec = add_tags_spec(5, &names).unwrap();
		assert_eq!(spec.method, Method::Post);
		assert_eq!(spec.payload["tags"], json!(["a", "b"]));

		let spec = replace_tags_spec(5, &names).unwrap();
		assert_eq!(spec.method, Method::Put);
		assert_eq!(spec.resource_path, "/documents/5/");

		assert!(add_tag_spec(5, " ").is_err());
		assert!(add_tags_spec(5, &["".to_string()]).is_err());
	}
}
