//! Blocking REST client for the BigQuery v2 catalog surface.
//!
//! Only the four read operations the navigation loop needs are mapped:
//! project, dataset, and table listings (paginated) plus `tables.get`.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde_json::Value;
use tracing::debug;

use super::Catalog;
use super::error::CatalogError;
use super::types::{TableMeta, TableRef};

const DEFAULT_BASE_URL: &str = "https://bigquery.googleapis.com/bigquery/v2";
const PAGE_SIZE: &str = "1000";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Catalog implementation backed by the warehouse REST API.
pub struct RestCatalog {
	http: Client,
	base_url: String,
	token: String,
}

impl RestCatalog {
	pub fn new(token: String) -> Result<Self, CatalogError> {
		Self::with_base_url(token, DEFAULT_BASE_URL.to_string())
	}

	/// Point the client at a different endpoint (tests, emulators).
	pub fn with_base_url(token: String, base_url: String) -> Result<Self, CatalogError> {
		let http = Client::builder()
			.timeout(REQUEST_TIMEOUT)
			.build()
			.map_err(CatalogError::Network)?;
		Ok(Self {
			http,
			base_url,
			token,
		})
	}

	fn get_json(&self, url: &str, page_token: Option<&str>) -> Result<Value, CatalogError> {
		debug!(url, "catalog request");
		let mut request = self
			.http
			.get(url)
			.bearer_auth(&self.token)
			.query(&[("maxResults", PAGE_SIZE)]);
		if let Some(token) = page_token {
			request = request.query(&[("pageToken", token)]);
		}

		let response = request.send()?;
		let status = response.status();
		if status.is_success() {
			return response.json().map_err(CatalogError::Network);
		}

		let detail = error_message(response.json().ok()).unwrap_or_else(|| url.to_string());
		Err(match status {
			StatusCode::NOT_FOUND => CatalogError::NotFound(detail),
			StatusCode::FORBIDDEN => CatalogError::PermissionDenied(detail),
			StatusCode::UNAUTHORIZED => CatalogError::Auth(detail),
			_ => CatalogError::Malformed(format!("{status}: {detail}")),
		})
	}

	/// Follow `nextPageToken` until the listing is exhausted, extracting one
	/// identifier per item with `pick`.
	fn list_paged(
		&self,
		url: &str,
		list_key: &str,
		pick: impl Fn(&Value) -> Option<String>,
	) -> Result<Vec<String>, CatalogError> {
		let mut names = Vec::new();
		let mut page_token: Option<String> = None;

		loop {
			let body = self.get_json(url, page_token.as_deref())?;
			if let Some(items) = body.get(list_key).and_then(Value::as_array) {
				names.extend(items.iter().filter_map(&pick));
			}
			match body.get("nextPageToken").and_then(Value::as_str) {
				Some(token) if !token.is_empty() => page_token = Some(token.to_string()),
				_ => break,
			}
			debug!(count = names.len(), "fetched listing page");
		}

		Ok(names)
	}
}

fn error_message(body: Option<Value>) -> Option<String> {
	let message = body?
		.get("error")?
		.get("message")?
		.as_str()?
		.to_string();
	Some(message)
}

fn string_at<'a>(value: &'a Value, path: &[&str]) -> Option<&'a str> {
	let mut current = value;
	for key in path {
		current = current.get(key)?;
	}
	current.as_str()
}

impl Catalog for RestCatalog {
	fn list_projects(&self) -> Result<Vec<String>, CatalogError> {
		let url = format!("{}/projects", self.base_url);
		self.list_paged(&url, "projects", |item| {
			string_at(item, &["id"]).map(str::to_string)
		})
	}

	fn list_datasets(&self, project: &str) -> Result<Vec<String>, CatalogError> {
		let url = format!("{}/projects/{project}/datasets", self.base_url);
		self.list_paged(&url, "datasets", |item| {
			string_at(item, &["datasetReference", "datasetId"]).map(str::to_string)
		})
	}

	fn list_tables(&self, project: &str, dataset: &str) -> Result<Vec<String>, CatalogError> {
		let url = format!(
			"{}/projects/{project}/datasets/{dataset}/tables",
			self.base_url
		);
		self.list_paged(&url, "tables", |item| {
			string_at(item, &["tableReference", "tableId"]).map(str::to_string)
		})
	}

	fn get_table(&self, table: &TableRef) -> Result<TableMeta, CatalogError> {
		let url = format!(
			"{}/projects/{}/datasets/{}/tables/{}",
			self.base_url, table.project, table.dataset, table.table
		);
		let body = self.get_json(&url, None)?;
		TableMeta::from_json(body)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn extracts_nested_identifier_strings() {
		let item = serde_json::json!({
			"tableReference": { "tableId": "events" }
		});
		assert_eq!(string_at(&item, &["tableReference", "tableId"]), Some("events"));
		assert_eq!(string_at(&item, &["tableReference", "projectId"]), None);
	}

	#[test]
	fn extracts_service_error_message() {
		let body = serde_json::json!({
			"error": { "code": 404, "message": "Not found: Table x" }
		});
		assert_eq!(
			error_message(Some(body)).as_deref(),
			Some("Not found: Table x")
		);
		assert_eq!(error_message(None), None);
	}
}
