// Copyright 2025 chenjjiaa
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

//! Request signing
//!
//! Every request carries an HMAC-SHA256 signature over the JSON payload with
//! the request timestamp injected under the `timestamp` key. The server
//! re-serializes the same object and compares, so the signed bytes must come
//! from the same serializer and key order as the transmitted body.

use base64::{Engine, engine::general_purpose::STANDARD};
use hmac::{Hmac, Mac};
use serde_json::{Map, Value};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Key injected into the signed copy of the payload
pub const TIMESTAMP_KEY: &str = "timestamp";

/// Error types for signing operations
#[derive(Debug, thiserror::Error)]
pub enum SigningError {
	#[error("Serialization error: {0}")]
	Serialization(#[from] serde_json::Error),
	#[error("Invalid signing key: {0}")]
	InvalidKey(String),
}

/// Sign a request payload
///
/// The caller's payload is left untouched; the timestamp is written into a
/// clone, which is serialized and MAC'd with `secret`. The result is the
/// base64 (standard alphabet, padded) encoding of the raw MAC bytes.
pub fn sign_payload(
	secret: &[u8],
	timestamp_ms: i64,
	payload: &Map<String, Value>,
) -> Result<String, SigningError> {
	let mut signed = payload.clone();
	signed.insert(
		TIMESTAMP_KEY.to_string(),
		Value::String(timestamp_ms.to_string()),
	);

	let serialized = serde_json::to_vec(&signed)?;

	let mut mac =
		HmacSha256::new_from_slice(secret).map_err(|e| SigningError::InvalidKey(e.to_string()))?;
	mac.update(&serialized);

	Ok(STANDARD.encode(mac.finalize().into_bytes()))
}
