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

//! Resource families
//!
//! Every document family exposes the same six calls (list, get, process a
//! file, process a URL, update, delete). They differ only in their path
//! root and in which fields a submission must carry, so one
//! [`ResourceKind`] value describes a whole family and the request shapes
//! are produced here once.
//!
//! | Kind | Root | GET/DELETE payload |
//! |------|------|--------------------|
//! | Documents | `/documents/` | `{"id": id}` |
//! | AnyDocuments | `/anydocs/` | `{}` |
//! | BankStatements | `/bank-statements/` | `{}` |
//! | BusinessCards | `/business-cards/` | `{}` |
//! | Checks | `/checks/` | `{}` |
//! | W2s | `/w2s/` | `{}` |
//! | W8BenEs | `/w-8ben-es/` | `{}` |
//! | W9s | `/w9s/` | `{}` |
//! | Contracts | `/contracts/` | `{}` |

use std::{fmt, str::FromStr};

use serde_json::Value;

use crate::client::{Client, ClientError, SyncClient};
use crate::file::FileAttachment;
use crate::request::{Payload, RequestSpec};
use crate::types::{categories_or_default, merge_payload};

/// A document family of the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
	/// Receipts and invoices
	Documents,
	/// Blueprint-driven extraction
	AnyDocuments,
	BankStatements,
	BusinessCards,
	Checks,
	W2s,
	W8BenEs,
	W9s,
	Contracts,
}

impl ResourceKind {
	pub const ALL: [ResourceKind; 9] = [
		ResourceKind::Documents,
		ResourceKind::AnyDocuments,
		ResourceKind::BankStatements,
		ResourceKind::BusinessCards,
		ResourceKind::Checks,
		ResourceKind::W2s,
		ResourceKind::W8BenEs,
		ResourceKind::W9s,
		ResourceKind::Contracts,
	];

	/// Collection path, with leading and trailing slash
	pub fn root(self) -> &'static str {
		match self {
			ResourceKind::Documents => "/documents/",
			ResourceKind::AnyDocuments => "/anydocs/",
			ResourceKind::BankStatements => "/bank-statements/",
			ResourceKind::BusinessCards => "/business-cards/",
			ResourceKind::Checks => "/checks/",
			ResourceKind::W2s => "/w2s/",
			ResourceKind::W8BenEs => "/w-8ben-es/",
			ResourceKind::W9s => "/w9s/",
			ResourceKind::Contracts => "/contracts/",
		}
	}

	/// Short name, as accepted by [`FromStr`]
	pub fn name(self) -> &'static str {
		match self {
			ResourceKind::Documents => "documents",
			ResourceKind::AnyDocuments => "anydocs",
			ResourceKind::BankStatements => "bank-statements",
			ResourceKind::BusinessCards => "business-cards",
			ResourceKind::Checks => "checks",
			ResourceKind::W2s => "w2s",
			ResourceKind::W8BenEs => "w-8ben-es",
			ResourceKind::W9s => "w9s",
			ResourceKind::Contracts => "contracts",
		}
	}

	/// Path of a single item: `{root}{id}/`
	pub fn item_path(self, id: u64) -> String {
		format!("{}{}/", self.root(), id)
	}

	/// Payload signed by GET and DELETE on a single item.
	///
	/// The documents endpoints expect the id inside the signed object; the
	/// other families sign an empty one.
	fn id_payload(self, id: u64) -> Payload {
		let mut payload = Payload::new();
		if self == ResourceKind::Documents {
			payload.insert("id".to_string(), Value::from(id));
		}
		payload
	}

	pub fn list_spec(self) -> RequestSpec {
		RequestSpec::get(self.root(), Payload::new())
	}

	pub fn get_spec(self, id: u64) -> RequestSpec {
		RequestSpec::get(self.item_path(id), self.id_payload(id))
	}

	pub fn delete_spec(self, id: u64) -> RequestSpec {
		RequestSpec::delete(self.item_path(id), self.id_payload(id))
	}

	pub fn update_spec(self, id: u64, fields: Payload) -> RequestSpec {
		RequestSpec::put(self.item_path(id), fields)
	}

	/// Submit a file. Mandated fields go first, `extra` overwrites them.
	pub fn process_file_spec(
		self,
		file: &FileAttachment,
		options: &ProcessOptions,
		extra: Payload,
	) -> Result<RequestSpec, ClientError> {
		let mut payload = Payload::new();
		payload.insert("file_name".to_string(), Value::from(file.file_name.as_str()));
		payload.insert("file_data".to_string(), Value::from(file.file_data.as_str()));

		match self {
			ResourceKind::Documents => {
				payload.insert(
					"categories".to_string(),
					categories_or_default(&options.categories),
				);
				payload.insert("auto_delete".to_string(), Value::from(options.auto_delete));
			}
			ResourceKind::AnyDocuments => {
				payload.insert(
					"blueprint_name".to_string(),
					Value::from(require_blueprint(options.blueprint_name.as_deref())?),
				);
			}
			_ => {}
		}

		merge_payload(&mut payload, extra);
		Ok(RequestSpec::post(self.root(), payload))
	}

	/// Submit one or more remote files by URL
	pub fn process_url_spec(
		self,
		submission: &UrlSubmission,
		extra: Payload,
	) -> Result<RequestSpec, ClientError> {
		let mut payload = Payload::new();

		match self {
			ResourceKind::Documents => {
				if submission.file_url.is_none() && submission.file_urls.is_empty() {
					return Err(ClientError::InvalidModel(
						"file_url or file_urls is required".to_string(),
					));
				}
				payload.insert(
					"auto_delete".to_string(),
					Value::from(submission.auto_delete),
				);
				payload.insert("boost_mode".to_string(), Value::from(submission.boost_mode));
				payload.insert(
					"categories".to_string(),
					categories_or_default(&submission.categories),
				);
				if let Some(external_id) = &submission.external_id {
					payload.insert(
						"external_id".to_string(),
						Value::from(external_id.as_str()),
					);
				}
				if let Some(file_url) = &submission.file_url {
					payload.insert("file_url".to_string(), Value::from(file_url.as_str()));
				}
				if !submission.file_urls.is_empty() {
					payload.insert(
						"file_urls".to_string(),
						Value::from(submission.file_urls.clone()),
					);
				}
				if let Some(max_pages) = submission.max_pages_to_process {
					payload.insert("max_pages_to_process".to_string(), Value::from(max_pages));
				}
			}
			_ => {
				let file_url = submission.file_url.as_deref().ok_or_else(|| {
					ClientError::InvalidModel(format!("file_url is required for {}", self))
				})?;
				payload.insert("file_url".to_string(), Value::from(file_url));
				if self == ResourceKind::AnyDocuments {
					payload.insert(
						"blueprint_name".to_string(),
						Value::from(require_blueprint(submission.blueprint_name.as_deref())?),
					);
				}
			}
		}

		merge_payload(&mut payload, extra);
		Ok(RequestSpec::post(self.root(), payload))
	}
}

fn require_blueprint(name: Option<&str>) -> Result<&str, ClientError> {
	match name {
		Some(name) if !name.trim().is_empty() => Ok(name),
		_ => Err(ClientError::InvalidModel(
			"blueprint_name is required for anydocs".to_string(),
		)),
	}
}

impl fmt::Display for ResourceKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

impl FromStr for ResourceKind {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let wanted = s.trim().to_ascii_lowercase();
		ResourceKind::ALL
			.into_iter()
			.find(|kind| kind.name() == wanted)
			.ok_or_else(|| {
				let names: Vec<_> = ResourceKind::ALL.iter().map(|k| k.name()).collect();
				format!(
					"unknown resource '{}' (expected one of: {})",
					s,
					names.join(", ")
				)
			})
	}
}

/// Options for a file submission
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOptions {
	/// Documents only. Empty means the default category list.
	pub categories: Vec<String>,
	/// Documents only
	pub auto_delete: bool,
	/// Required for AnyDocuments, ignored elsewhere
	pub blueprint_name: Option<String>,
}

impl ProcessOptions {
	pub fn with_categories<I, S>(mut self, categories: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.categories = categories.into_iter().map(Into::into).collect();
		self
	}

	pub fn with_auto_delete(mut self, auto_delete: bool) -> Self {
		self.auto_delete = auto_delete;
		self
	}

	pub fn with_blueprint(mut self, blueprint_name: impl Into<String>) -> Self {
		self.blueprint_name = Some(blueprint_name.into());
		self
	}
}

/// A URL submission
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlSubmission {
	pub file_url: Option<String>,
	/// Documents only
	pub file_urls: Vec<String>,
	/// Documents only. Empty means the default category list.
	pub categories: Vec<String>,
	/// Documents only
	pub auto_delete: bool,
	/// Documents only
	pub boost_mode: bool,
	/// Documents only
	pub external_id: Option<String>,
	/// Documents only
	pub max_pages_to_process: Option<u32>,
	/// Required for AnyDocuments, ignored elsewhere
	pub blueprint_name: Option<String>,
}

impl UrlSubmission {
	pub fn new(file_url: impl Into<String>) -> Self {
		Self {
			file_url: Some(file_url.into()),
			..Default::default()
		}
	}

	pub fn from_urls<I, S>(file_urls: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			file_urls: file_urls.into_iter().map(Into::into).collect(),
			..Default::default()
		}
	}

	pub fn with_categories<I, S>(mut self, categories: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.categories = categories.into_iter().map(Into::into).collect();
		self
	}

	pub fn with_auto_delete(mut self, auto_delete: bool) -> Self {
		self.auto_delete = auto_delete;
		self
	}

	pub fn with_boost_mode(mut self, boost_mode: bool) -> Self {
		self.boost_mode = boost_mode;
		self
	}

	pub fn with_external_id(mut self, external_id: impl Into<String>) -> Self {
		self.external_id = Some(external_id.into());
		self
	}

	pub fn with_max_pages(mut self, max_pages: u32) -> Self {
		self.max_pages_to_process = Some(max_pages);
		self
	}

	pub fn with_blueprint(mut self, blueprint_name: impl Into<String>) -> Self {
		self.blueprint_name = Some(blueprint_name.into());
		self
	}
}

/// Async calls on one resource family
#[derive(Clone, Copy)]
pub struct Resource<'a> {
	client: &'a Client,
	kind: ResourceKind,
}

impl<'a> Resource<'a> {
	pub(crate) fn new(client: &'a Client, kind: ResourceKind) -> Self {
		Self { client, kind }
	}

	pub fn kind(&self) -> ResourceKind {
		self.kind
	}

	pub async fn list(&self) -> Result<String, ClientError> {
		self.client.execute(&self.kind.list_spec()).await
	}

	pub async fn get(&self, id: u64) -> Result<String, ClientError> {
		self.client.execute(&self.kind.get_spec(id)).await
	}

	pub async fn process_file(
		&self,
		file: &FileAttachment,
		options: &ProcessOptions,
		extra: Payload,
	) -> Result<String, ClientError> {
		let spec = self.kind.process_file_spec(file, options, extra)?;
		self.client.execute(&spec).await
	}

	pub async fn process_url(
		&self,
		submission: &UrlSubmission,
		extra: Payload,
	) -> Result<String, ClientError> {
		let spec = self.kind.process_url_spec(submission, extra)?;
		self.client.execute(&spec).await
	}

	pub async fn update(&self, id: u64, fields: Payload) -> Result<String, ClientError> {
		self.client.execute(&self.kind.update_spec(id, fields)).await
	}

	pub async fn delete(&self, id: u64) -> Result<String, ClientError> {
		self.client.execute(&self.kind.delete_spec(id)).await
	}
}

/// Blocking calls on one resource family
#[derive(Clone, Copy)]
pub struct SyncResource<'a> {
	client: &'a SyncClient,
	kind: ResourceKind,
}

impl<'a> SyncResource<'a> {
	pub(crate) fn new(client: &'a SyncClient, kind: ResourceKind) -> Self {
		Self { client, kind }
	}

	pub fn kind(&self) -> ResourceKind {
		self.kind
	}

	pub fn list(&self) -> Result<String, ClientError> {
		self.client.execute(&self.kind.list_spec())
	}

	pub fn get(&self, id: u64) -> Result<String, ClientError> {
		self.client.execute(&self.kind.get_spec(id))
	}

	pub fn process_file(
		&self,
		file: &FileAttachment,
		options: &ProcessOptions,
		extra: Payload,
	) -> Result<String, ClientError> {
		let spec = self.kind.process_file_spec(file, options, extra)?;
		self.client.execute(&spec)
	}

	pub fn process_url(
		&self,
		submission: &UrlSubmission,
		extra: Payload,
	) -> Result<String, ClientError> {
		let spec = self.kind.process_url_spec(submission, extra)?;
		self.client.execute(&spec)
	}

	pub fn update(&self, id: u64, fields: Payload) -> Result<String, ClientError> {
		self.client.execute(&self.kind.update_spec(id, fields))
	}

	pub fn delete(&self, id: u64) -> Result<String, ClientError> {
		self.client.execute(&self.kind.delete_spec(id))
	}
}
