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

//! File payloads for document submission

use std::path::Path;

use base64::{Engine, engine::general_purpose::STANDARD};

use crate::client::ClientError;

/// Used when the path has no extension
const FALLBACK_EXTENSION: &str = "jpeg";

/// A document file encoded for the `file_name` / `file_data` fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileAttachment {
	pub file_name: String,
	pub file_data: String,
}

impl FileAttachment {
	/// Read a local file and encode it as a `data:image/<ext>;base64,` URI
	pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ClientError> {
		let path = path.as_ref();
		let bytes = std::fs::read(path).map_err(|source| ClientError::Io {
			path: path.to_path_buf(),
			source,
		})?;

		let file_name = path
			.file_name()
			.map(|n| n.to_string_lossy().into_owned())
			.unwrap_or_default();
		let extension = path
			.extension()
			.map(|e| e.to_string_lossy().to_ascii_lowercase())
			.unwrap_or_else(|| FALLBACK_EXTENSION.to_string());

		Ok(Self {
			file_name,
			file_data: format!("data:image/{};base64,{}", extension, STANDARD.encode(bytes)),
		})
	}

	/// Encode in-memory bytes (no data URI prefix)
	pub fn from_bytes(file_name: impl Into<String>, bytes: impl AsRef<[u8]>) -> Self {
		Self {
			file_name: file_name.into(),
			file_data: STANDARD.encode(bytes),
		}
	}

	/// Use data that is already base64-encoded
	pub fn from_base64(file_name: impl Into<String>, file_data: impl Into<String>) -> Self {
		Self {
			file_name: file_name.into(),
			file_data: file_data.into(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;

	#[test]
	fn test_from_path_uses_data_uri() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("receipt.PNG");
		let mut file = std::fs::File::create(&path).unwrap();
		file.write_all(b"hello").unwrap();

		let attachment = FileAttachment::from_path(&path).unwrap();
		assert_eq!(attachment.file_name, "receipt.PNG");
		assert_eq!(attachment.file_data, "data:image/png;base64,aGVsbG8=");
	}

	#[test]
	fn test_from_path_without_extension() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("scan");
		std::fs::write(&path, b"hi").unwrap();

		let attachment = FileAttachment::from_path(&path).unwrap();
		assert_eq!(attachment.file_data, "data:image/jpeg;base64,aGk=");
	}

	#[test]
	fn test_missing_file() {
		let err = FileAttachment::from_path("/definitely/not/here.jpg").unwrap_err();
		assert!(matches!(err, ClientError::Io { .. }));
	}

	#[test]
	fn test_from_bytes() {
		let attachment = FileAttachment::from_bytes("invoice.pdf", b"hello");
		assert_eq!(attachment.file_name, "invoice.pdf");
		assert_eq!(attachment.file_data, "aGVsbG8=");
	}
}
