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

//! Veryfi command-line client
//!
//! Reads credentials from `VERYFI_*` environment variables (or `.env`),
//! sends one request, and prints the raw JSON response to stdout.

mod config;
mod logging;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use veryfi_sdk::{FileAttachment, Payload, ProcessOptions, ResourceKind, UrlSubmission};

use crate::{config::client_from_env, logging::init_logging};

#[derive(Debug, Parser)]
#[command(name = "veryfi", version, about = "Veryfi document extraction client")]
struct Cli {
	/// Print an empty body instead of failing on network errors
	#[arg(long, global = true)]
	empty_on_failure: bool,

	#[command(subcommand)]
	command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
	/// Submit a local file
	Process {
		path: PathBuf,
		#[arg(long, default_value = "documents")]
		kind: ResourceKind,
		/// Repeat for several categories (documents only)
		#[arg(long = "category")]
		categories: Vec<String>,
		#[arg(long)]
		auto_delete: bool,
		/// Required for anydocs
		#[arg(long)]
		blueprint: Option<String>,
		/// Extra JSON object merged into the payload
		#[arg(long)]
		params: Option<String>,
	},
	/// Submit a remote file by URL
	ProcessUrl {
		url: String,
		#[arg(long, default_value = "documents")]
		kind: ResourceKind,
		#[arg(long = "category")]
		categories: Vec<String>,
		#[arg(long)]
		auto_delete: bool,
		#[arg(long)]
		boost_mode: bool,
		#[arg(long)]
		external_id: Option<String>,
		#[arg(long)]
		max_pages: Option<u32>,
		#[arg(long)]
		blueprint: Option<String>,
		/// Extra JSON object merged into the payload
		#[arg(long)]
		params: Option<String>,
	},
	/// Fetch one item
	Get { kind: ResourceKind, id: u64 },
	/// List a collection
	List { kind: ResourceKind },
	/// Delete one item
	Delete { kind: ResourceKind, id: u64 },
	/// List the line items of a document
	LineItems { document_id: u64 },
}

fn parse_params(raw: Option<&str>) -> Result<Payload> {
	match raw {
		Some(raw) => serde_json::from_str(raw).context("--params must be a JSON object"),
		None => Ok(Payload::new()),
	}
}

#[tokio::main]
async fn main() -> Result<()> {
	init_logging()?;

	let cli = Cli::parse();
	let client = client_from_env(cli.empty_on_failure)?;

	let body = match cli.command {
		Command::Process {
			path,
			kind,
			categories,
			auto_delete,
			blueprint,
			params,
		} => {
			let extra = parse_params(params.as_deref())?;
			let file = FileAttachment::from_path(&path)?;
			let mut options = ProcessOptions::default()
				.with_categories(categories)
				.with_auto_delete(auto_delete);
			options.blueprint_name = blueprint;
			info!(target: "cli", "Submitting {} as {}", path.display(), kind);
			client.resource(kind).process_file(&file, &options, extra).await?
		}
		Command::ProcessUrl {
			url,
			kind,
			categories,
			auto_delete,
			boost_mode,
			external_id,
			max_pages,
			blueprint,
			params,
		} => {
			let extra = parse_params(params.as_deref())?;
			let submission = UrlSubmission {
				file_url: Some(url),
				categories,
				auto_delete,
				boost_mode,
				external_id,
				max_pages_to_process: max_pages,
				blueprint_name: blueprint,
				..Default::default()
			};
			client.resource(kind).process_url(&submission, extra).await?
		}
		Command::Get { kind, id } => client.resource(kind).get(id).await?,
		Command::List { kind } => client.resource(kind).list().await?,
		Command::Delete { kind, id } => client.resource(kind).delete(id).await?,
		Command::LineItems { document_id } => client.documents().line_items(document_id).await?,
	};

	println!("{}", body);

	Ok(())
}
