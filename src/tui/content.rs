//! Derives the displayable content block for the current view.
//!
//! Content is a render-agnostic model; `render` turns it into widgets. This
//! keeps the transition logic testable without a terminal.

use crate::catalog::{SchemaField, TableMeta};
use crate::format::{bytes_fmt, num_fmt, opt_time_fmt};
use crate::snippets::SnippetStore;

use super::session::{ListKind, Session, View};

/// One key/value group; groups are separated by horizontal rules.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Section(pub Vec<(String, String)>);

/// One row of the flattened schema tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SchemaLine {
	pub depth: usize,
	pub name: String,
	pub field_type: String,
	pub mode: String,
}

/// Displayable content for a single frame.
#[derive(Clone, Debug, PartialEq)]
pub enum ContentBlock {
	Empty,
	Sections(Vec<Section>),
	Schema(Vec<SchemaLine>),
	Text(String),
}

/// Metadata fields offered by the `m` list view, in display order.
pub const METADATA_FIELDS: &[&str] = &[
	"Table ID",
	"Description",
	"Location",
	"Table type",
	"Table size",
	"Long-term storage size",
	"Total logical bytes",
	"Total physical bytes",
	"Number of rows",
	"Created",
	"Last modified",
	"Table expiry",
	"Partitioning",
	"Clustering",
	"Streaming buffer",
];

/// Build the content block for the session's current view.
pub fn build(session: &Session, snippets: &SnippetStore) -> ContentBlock {
	match (&session.view, &session.table) {
		(View::Empty, _) | (_, None) => ContentBlock::Empty,
		(View::Table, Some(table)) => table_content(table),
		(View::Schema, Some(table)) => schema_content(table),
		(View::List(ListKind::Snippets), Some(table)) => {
			let Some(name) = session.selected_item() else {
				return ContentBlock::Text("No snippets found.".to_string());
			};
			match snippets.render(name, &table.reference) {
				Ok(rendered) => ContentBlock::Text(rendered),
				Err(err) => ContentBlock::Text(format!("Failed to render {name}: {err}")),
			}
		}
		(View::List(ListKind::Metadata), Some(table)) => {
			let Some(field) = session.selected_item() else {
				return ContentBlock::Empty;
			};
			ContentBlock::Text(metadata_value(table, field))
		}
	}
}

fn opt(value: &Option<String>) -> String {
	value.clone().unwrap_or_default()
}

fn opt_bytes(value: Option<u64>) -> String {
	value.map(bytes_fmt).unwrap_or_default()
}

fn partitioning_fmt(table: &TableMeta) -> String {
	match &table.partitioning {
		Some(partitioning) => {
			let mut out = partitioning.kind.clone();
			if let Some(field) = &partitioning.field {
				out.push_str(&format!(" on {field}"));
			}
			if partitioning.require_filter {
				out.push_str(" (filter required)");
			}
			out
		}
		None => String::new(),
	}
}

fn streaming_buffer_fmt(table: &TableMeta) -> String {
	match &table.streaming_buffer {
		Some(buffer) => format!(
			"{} rows / {} (oldest {})",
			buffer.estimated_rows.map(num_fmt).unwrap_or_default(),
			opt_bytes(buffer.estimated_bytes),
			opt_time_fmt(buffer.oldest_entry),
		),
		None => String::new(),
	}
}

/// Key/value sections mirroring the table overview.
pub fn table_content(table: &TableMeta) -> ContentBlock {
	let identity = Section(vec![
		("Table ID".into(), table.reference.to_string()),
		("Description".into(), opt(&table.description)),
		("Data location".into(), opt(&table.location)),
		("Table type".into(), opt(&table.table_type)),
	]);
	let size = Section(vec![
		("Table size".into(), opt_bytes(table.num_bytes)),
		(
			"Long-term storage size".into(),
			opt_bytes(table.num_long_term_bytes),
		),
		(
			"Total logical bytes".into(),
			opt_bytes(table.num_logical_bytes),
		),
		(
			"Total physical bytes".into(),
			opt_bytes(table.num_physical_bytes),
		),
		(
			"Number of rows".into(),
			table.num_rows.map(num_fmt).unwrap_or_default(),
		),
	]);
	let lifetime = Section(vec![
		("Created".into(), opt_time_fmt(table.created)),
		("Last modified".into(), opt_time_fmt(table.modified)),
		("Table expiry".into(), opt_time_fmt(table.expires)),
	]);
	let organization = Section(vec![
		("Partitioned by".into(), partitioning_fmt(table)),
		("Clustered by".into(), table.clustering_fields.join(", ")),
		("Streaming buffer".into(), streaming_buffer_fmt(table)),
	]);

	ContentBlock::Sections(vec![identity, size, lifetime, organization])
}

fn flatten_schema(fields: &[SchemaField], depth: usize, out: &mut Vec<SchemaLine>) {
	for field in fields {
		out.push(SchemaLine {
			depth,
			name: field.name.clone(),
			field_type: field.field_type.clone(),
			mode: field.mode.clone().unwrap_or_default(),
		});
		if !field.fields.is_empty() {
			flatten_schema(&field.fields, depth + 1, out);
		}
	}
}

/// Flattened schema tree, nested RECORD fields indented beneath their parent.
pub fn schema_content(table: &TableMeta) -> ContentBlock {
	let mut lines = Vec::new();
	flatten_schema(&table.schema, 0, &mut lines);
	ContentBlock::Schema(lines)
}

/// The value shown (and copied) for one entry of the metadata list view.
pub fn metadata_value(table: &TableMeta, field: &str) -> String {
	match field {
		"Table ID" => table.reference.to_string(),
		"Description" => opt(&table.description),
		"Location" => opt(&table.location),
		"Table type" => opt(&table.table_type),
		"Table size" => opt_bytes(table.num_bytes),
		"Long-term storage size" => opt_bytes(table.num_long_term_bytes),
		"Total logical bytes" => opt_bytes(table.num_logical_bytes),
		"Total physical bytes" => opt_bytes(table.num_physical_bytes),
		"Number of rows" => table.num_rows.map(num_fmt).unwrap_or_default(),
		"Created" => opt_time_fmt(table.created),
		"Last modified" => opt_time_fmt(table.modified),
		"Table expiry" => opt_time_fmt(table.expires),
		"Partitioning" => partitioning_fmt(table),
		"Clustering" => table.clustering_fields.join(", "),
		"Streaming buffer" => streaming_buffer_fmt(table),
		_ => String::new(),
	}
}

/// Plain-text rendering of a content block, used for clipboard copies and
/// the non-interactive `--schema` output.
pub fn to_text(content: &ContentBlock) -> String {
	match content {
		ContentBlock::Empty => String::new(),
		ContentBlock::Text(text) => text.clone(),
		ContentBlock::Sections(sections) => {
			let mut out = Vec::new();
			for (i, section) in sections.iter().enumerate() {
				if i > 0 {
					out.push(String::new());
				}
				for (key, value) in &section.0 {
					out.push(format!("{key} = {value}"));
				}
			}
			out.join("\n")
		}
		ContentBlock::Schema(lines) => lines
			.iter()
			.map(|line| {
				format!(
					"{}{}  {}  {}",
					"  ".repeat(line.depth),
					line.name,
					line.field_type,
					line.mode
				)
			})
			.collect::<Vec<_>>()
			.join("\n"),
	}
}
