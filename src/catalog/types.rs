//! Identifier and metadata types for the warehouse catalog.
//!
//! `TableMeta` keeps the raw property bag alongside the typed fields so the
//! raw/JSON views never lose information the typed mapping does not cover.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use super::error::CatalogError;

/// Fully qualified table identifier within the project → dataset → table
/// hierarchy.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TableRef {
	pub project: String,
	pub dataset: String,
	pub table: String,
}

/// The identifier could not be split into its three components.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid table identifier '{0}', expected project.dataset.table")]
pub struct ParseRefError(pub String);

impl TableRef {
	pub fn new(
		project: impl Into<String>,
		dataset: impl Into<String>,
		table: impl Into<String>,
	) -> Self {
		Self {
			project: project.into(),
			dataset: dataset.into(),
			table: table.into(),
		}
	}

	/// Cloud console URL for this table.
	pub fn console_url(&self) -> String {
		format!(
			"https://console.cloud.google.com/bigquery?p={}&d={}&t={}&page=query",
			self.project, self.dataset, self.table
		)
	}
}

impl fmt::Display for TableRef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}.{}.{}", self.project, self.dataset, self.table)
	}
}

impl FromStr for TableRef {
	type Err = ParseRefError;

	/// Accepts `project.dataset.table` and the legacy `project:dataset.table`
	/// form; the colon is normalized to a dot.
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let normalized = s.replacen(':', ".", 1);
		let mut parts = normalized.split('.');
		match (parts.next(), parts.next(), parts.next(), parts.next()) {
			(Some(project), Some(dataset), Some(table), None)
				if !project.is_empty() && !dataset.is_empty() && !table.is_empty() =>
			{
				Ok(Self::new(project, dataset, table))
			}
			_ => Err(ParseRefError(s.to_string())),
		}
	}
}

/// Time-based partitioning configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimePartitioning {
	/// Partition granularity (`DAY`, `HOUR`, `MONTH`, `YEAR`).
	pub kind: String,
	pub field: Option<String>,
	pub expiration_ms: Option<u64>,
	pub require_filter: bool,
}

/// Estimated contents of the streaming buffer, when one exists.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StreamingBuffer {
	pub estimated_rows: Option<u64>,
	pub estimated_bytes: Option<u64>,
	pub oldest_entry: Option<DateTime<Utc>>,
}

/// One field of a table schema. `fields` is non-empty for RECORD fields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SchemaField {
	pub name: String,
	pub field_type: String,
	pub mode: Option<String>,
	pub description: Option<String>,
	pub fields: Vec<SchemaField>,
}

/// Metadata for a single table, as returned by the catalog.
#[derive(Clone, Debug, PartialEq)]
pub struct TableMeta {
	pub reference: TableRef,
	pub description: Option<String>,
	pub location: Option<String>,
	pub table_type: Option<String>,
	pub num_bytes: Option<u64>,
	pub num_long_term_bytes: Option<u64>,
	pub num_logical_bytes: Option<u64>,
	pub num_physical_bytes: Option<u64>,
	pub num_rows: Option<u64>,
	pub created: Option<DateTime<Utc>>,
	pub modified: Option<DateTime<Utc>>,
	pub expires: Option<DateTime<Utc>>,
	pub partitioning: Option<TimePartitioning>,
	pub clustering_fields: Vec<String>,
	pub streaming_buffer: Option<StreamingBuffer>,
	pub schema: Vec<SchemaField>,
	/// Full property bag exactly as the service returned it.
	pub raw: Value,
}

// Wire-side mirror of the `tables.get` resource. Integer fields arrive as
// JSON strings.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TableResource {
	table_reference: ReferenceResource,
	description: Option<String>,
	location: Option<String>,
	#[serde(rename = "type")]
	table_type: Option<String>,
	num_bytes: Option<String>,
	num_long_term_bytes: Option<String>,
	num_total_logical_bytes: Option<String>,
	num_total_physical_bytes: Option<String>,
	num_rows: Option<String>,
	creation_time: Option<String>,
	last_modified_time: Option<String>,
	expiration_time: Option<String>,
	time_partitioning: Option<PartitioningResource>,
	clustering: Option<ClusteringResource>,
	streaming_buffer: Option<StreamingBufferResource>,
	schema: Option<SchemaResource>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReferenceResource {
	project_id: String,
	dataset_id: String,
	table_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PartitioningResource {
	#[serde(rename = "type")]
	kind: String,
	field: Option<String>,
	expiration_ms: Option<String>,
	require_partition_filter: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct ClusteringResource {
	fields: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StreamingBufferResource {
	estimated_rows: Option<String>,
	estimated_bytes: Option<String>,
	oldest_entry_time: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SchemaResource {
	fields: Option<Vec<SchemaFieldResource>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SchemaFieldResource {
	name: String,
	#[serde(rename = "type")]
	field_type: String,
	mode: Option<String>,
	description: Option<String>,
	fields: Option<Vec<SchemaFieldResource>>,
}

fn parse_count(value: Option<String>) -> Option<u64> {
	value.and_then(|s| s.parse().ok())
}

fn parse_millis(value: Option<String>) -> Option<DateTime<Utc>> {
	let millis: i64 = value?.parse().ok()?;
	DateTime::from_timestamp_millis(millis)
}

fn convert_schema(fields: Vec<SchemaFieldResource>) -> Vec<SchemaField> {
	fields
		.into_iter()
		.map(|field| SchemaField {
			name: field.name,
			field_type: field.field_type,
			mode: field.mode,
			description: field.description,
			fields: convert_schema(field.fields.unwrap_or_default()),
		})
		.collect()
}

impl TableMeta {
	/// Build a `TableMeta` from a raw `tables.get` response body.
	pub fn from_json(raw: Value) -> Result<Self, CatalogError> {
		let resource: TableResource = serde_json::from_value(raw.clone())
			.map_err(|err| CatalogError::Malformed(format!("table resource: {err}")))?;

		let reference = TableRef::new(
			resource.table_reference.project_id,
			resource.table_reference.dataset_id,
			resource.table_reference.table_id,
		);

		Ok(Self {
			reference,
			description: resource.description,
			location: resource.location,
			table_type: resource.table_type,
			num_bytes: parse_count(resource.num_bytes),
			num_long_term_bytes: parse_count(resource.num_long_term_bytes),
			num_logical_bytes: parse_count(resource.num_total_logical_bytes),
			num_physical_bytes: parse_count(resource.num_total_physical_bytes),
			num_rows: parse_count(resource.num_rows),
			created: parse_millis(resource.creation_time),
			modified: parse_millis(resource.last_modified_time),
			expires: parse_millis(resource.expiration_time),
			partitioning: resource.time_partitioning.map(|p| TimePartitioning {
				kind: p.kind,
				field: p.field,
				expiration_ms: parse_count(p.expiration_ms),
				require_filter: p.require_partition_filter.unwrap_or(false),
			}),
			clustering_fields: resource
				.clustering
				.and_then(|c| c.fields)
				.unwrap_or_default(),
			streaming_buffer: resource.streaming_buffer.map(|b| StreamingBuffer {
				estimated_rows: parse_count(b.estimated_rows),
				estimated_bytes: parse_count(b.estimated_bytes),
				oldest_entry: parse_millis(b.oldest_entry_time),
			}),
			schema: resource
				.schema
				.and_then(|s| s.fields)
				.map(convert_schema)
				.unwrap_or_default(),
			raw,
		})
	}
}
