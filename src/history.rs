//! Persisted list of previously visited tables.
//!
//! The backing file holds one `project.dataset.table` identifier per line,
//! newest last. It is reloaded on every read so external edits between runs
//! (or by the user) are picked up without any locking.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::debug;

use crate::catalog::TableRef;

/// Append-or-move-to-end history of table identifiers.
pub struct HistoryStore {
	path: PathBuf,
}

impl HistoryStore {
	pub fn new(path: PathBuf) -> Self {
		Self { path }
	}

	/// All entries, oldest first. A missing file is an empty history;
	/// malformed lines are skipped.
	pub fn list(&self) -> Vec<TableRef> {
		let Ok(contents) = fs::read_to_string(&self.path) else {
			return Vec::new();
		};

		contents
			.lines()
			.filter(|line| !line.trim().is_empty())
			.filter_map(|line| match line.trim().parse() {
				Ok(reference) => Some(reference),
				Err(_) => {
					debug!(line, "skipping malformed history entry");
					None
				}
			})
			.collect()
	}

	/// Append `reference`, moving it to the end if already present.
	pub fn save(&self, reference: &TableRef) -> Result<()> {
		let mut entries = self.list();
		entries.retain(|entry| entry != reference);
		entries.push(reference.clone());
		self.write(&entries)
	}

	pub fn remove(&self, reference: &TableRef) -> Result<()> {
		let mut entries = self.list();
		entries.retain(|entry| entry != reference);
		self.write(&entries)
	}

	fn write(&self, entries: &[TableRef]) -> Result<()> {
		if let Some(parent) = self.path.parent() {
			fs::create_dir_all(parent)
				.with_context(|| format!("failed to create {}", parent.display()))?;
		}

		let mut contents = entries
			.iter()
			.map(ToString::to_string)
			.collect::<Vec<_>>()
			.join("\n");
		if !contents.is_empty() {
			contents.push('\n');
		}
		fs::write(&self.path, contents)
			.with_context(|| format!("failed to write {}", self.path.display()))
	}
}
