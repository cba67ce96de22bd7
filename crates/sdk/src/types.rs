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

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::ClientError;
use crate::request::Payload;

/// Categories sent with a document submission when the caller gives none
pub const DEFAULT_CATEGORIES: [&str; 15] = [
	"Advertising & Marketing",
	"Automotive",
	"Bank Charges & Fees",
	"Legal & Professional Services",
	"Insurance",
	"Meals & Entertainment",
	"Office Supplies & Software",
	"Taxes & Licenses",
	"Travel",
	"Rent & Lease",
	"Repairs & Maintenance",
	"Payroll",
	"Utilities",
	"Job Supplies",
	"Grocery",
];

/// `categories` value for a submission: the caller's list, or the defaults
/// when that list is empty. Never a merge of the two.
pub fn categories_or_default(categories: &[String]) -> Value {
	if categories.is_empty() {
		Value::from(DEFAULT_CATEGORIES.to_vec())
	} else {
		Value::from(categories.to_vec())
	}
}

/// Serialize a model into a request payload
pub fn to_payload<T: Serialize>(value: &T) -> Result<Payload, ClientError> {
	match serde_json::to_value(value)? {
		Value::Object(map) => Ok(map),
		other => Err(ClientError::InvalidModel(format!(
			"expected a JSON object, got {}",
			other
		))),
	}
}

/// Overwrite `target` with every key of `extra`
///
/// Existing keys keep their position, new keys are appended.
pub fn merge_payload(target: &mut Payload, extra: Payload) {
	for (key, value) in extra {
		target.insert(key, value);
	}
}

fn require_finite(field: &str, value: Option<f64>) -> Result<(), ClientError> {
	match value {
		Some(v) if !v.is_finite() => Err(ClientError::InvalidModel(format!(
			"{} must be a finite number",
			field
		))),
		_ => Ok(()),
	}
}

/// Line item to add to a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewLineItem {
	/// Position within the document
	pub order: u32,
	pub description: String,
	pub total: f64,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub sku: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub category: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub tax: Option<f64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub tax_rate: Option<f64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub price: Option<f64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub quantity: Option<f64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub discount: Option<f64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub unit_of_measure: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub upc: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub hsn: Option<String>,
}

impl NewLineItem {
	pub fn new(order: u32, description: impl Into<String>, total: f64) -> Self {
		Self {
			order,
			description: description.into(),
			total,
			sku: None,
			category: None,
			tax: None,
			tax_rate: None,
			price: None,
			quantity: None,
			discount: None,
			unit_of_measure: None,
			upc: None,
			hsn: None,
		}
	}

	pub fn validate(&self) -> Result<(), ClientError> {
		if self.description.trim().is_empty() {
			return Err(ClientError::InvalidModel(
				"description must not be empty".to_string(),
			));
		}
		require_finite("total", Some(self.total))?;
		require_finite("tax", self.tax)?;
		require_finite("tax_rate", self.tax_rate)?;
		require_finite("price", self.price)?;
		require_finite("quantity", self.quantity)?;
		require_finite("discount", self.discount)
	}
}

/// Partial update of an existing line item. Unset fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineItemUpdate {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub order: Option<u32>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub total: Option<f64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub sku: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub category: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub tax: Option<f64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub tax_rate: Option<f64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub price: Option<f64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub quantity: Option<f64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub discount: Option<f64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub unit_of_measure: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub upc: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub hsn: Option<String>,
}

impl LineItemUpdate {
	pub fn validate(&self) -> Result<(), ClientError> {
		if *self == Self::default() {
			return Err(ClientError::InvalidModel(
				"line item update sets no fields".to_string(),
			));
		}
		if let Some(description) = &self.description
			&& description.trim().is_empty()
		{
			return Err(ClientError::InvalidModel(
				"description must not be empty".to_string(),
			));
		}
		require_finite("total", self.total)?;
		require_finite("tax", self.tax)?;
		require_finite("tax_rate", self.tax_rate)?;
		require_finite("price", self.price)?;
		require_finite("quantity", self.quantity)?;
		require_finite("discount", self.discount)
	}
}
