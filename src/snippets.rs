//! Query snippet library.
//!
//! Snippets are plain `.sql` files in the snippet directory. Rendering
//! substitutes the current table's identifiers into `{project}`, `{dataset}`,
//! `{table}`, and `{full_table_id}` placeholders.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::catalog::TableRef;

pub struct SnippetStore {
	dir: PathBuf,
}

impl SnippetStore {
	pub fn new(dir: PathBuf) -> Self {
		Self { dir }
	}

	/// Snippet names, sorted. A missing directory is an empty library.
	pub fn list(&self) -> Vec<String> {
		let Ok(entries) = fs::read_dir(&self.dir) else {
			return Vec::new();
		};

		let mut names: Vec<String> = entries
			.filter_map(|entry| entry.ok())
			.filter(|entry| entry.path().is_file())
			.map(|entry| entry.file_name().to_string_lossy().into_owned())
			.collect();
		names.sort();
		names
	}

	/// Read a snippet and substitute the table's identifiers.
	pub fn render(&self, name: &str, table: &TableRef) -> Result<String> {
		let path = self.dir.join(name);
		let template = fs::read_to_string(&path)
			.with_context(|| format!("failed to read snippet {}", path.display()))?;
		Ok(substitute(&template, table))
	}
}

fn substitute(template: &str, table: &TableRef) -> String {
	template
		.replace("{full_table_id}", &table.to_string())
		.replace("{project}", &table.project)
		.replace("{dataset}", &table.dataset)
		.replace("{table}", &table.table)
}

/// Snippet written by `--init` so the list view has something to show.
pub const EXAMPLE_SNIPPET_NAME: &str = "preview.sql";
pub const EXAMPLE_SNIPPET: &str = "SELECT *\nFROM `{full_table_id}`\nLIMIT 100\n";
