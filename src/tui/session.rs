//! Mutable navigation state owned by the window loop.
//!
//! The `Session` is created once at startup, mutated exclusively by the
//! window's transition function one keystroke at a time, and never shared
//! across threads.

use std::time::{Duration, Instant};

use chrono::{DateTime, Local};

use crate::catalog::TableMeta;

/// How long the border pulse stays highlighted.
pub const FLASH_DURATION: Duration = Duration::from_millis(100);

/// Which kind of list the side panel is showing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListKind {
	Snippets,
	Metadata,
}

/// The active view. Exactly one at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
	Empty,
	Table,
	Schema,
	List(ListKind),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Session {
	/// Currently displayed table, if any.
	pub table: Option<TableMeta>,
	pub view: View,
	/// Side-list entries; relevant only to `View::List`.
	pub items: Vec<String>,
	/// Index into `items`; `Some` exactly when `items` is non-empty.
	pub selected: Option<usize>,
	/// Last time content was (re)computed; shown in the frame title.
	pub refreshed_at: DateTime<Local>,
	/// Border pulse deadline; cleared by the loop once it passes.
	pub flash_until: Option<Instant>,
	/// One-line message surfaced after a failed operation.
	pub notice: Option<String>,
}

impl Session {
	pub fn new(table: Option<TableMeta>) -> Self {
		let view = if table.is_some() {
			View::Table
		} else {
			View::Empty
		};
		Self {
			table,
			view,
			items: Vec::new(),
			selected: None,
			refreshed_at: Local::now(),
			flash_until: None,
			notice: None,
		}
	}

	pub fn project(&self) -> Option<&str> {
		self.table
			.as_ref()
			.map(|table| table.reference.project.as_str())
	}

	pub fn dataset(&self) -> Option<&str> {
		self.table
			.as_ref()
			.map(|table| table.reference.dataset.as_str())
	}

	/// Install a freshly fetched table and show it.
	pub fn set_table(&mut self, table: TableMeta) {
		self.table = Some(table);
		self.view = View::Table;
		self.clear_list();
		self.touch();
	}

	/// Replace the table in place, keeping the current view (refresh).
	pub fn replace_table(&mut self, table: TableMeta) {
		self.table = Some(table);
		self.touch();
	}

	/// Return to the table view (or empty, when nothing is loaded) and drop
	/// any list selection.
	pub fn reset_view(&mut self) {
		self.view = if self.table.is_some() {
			View::Table
		} else {
			View::Empty
		};
		self.clear_list();
		self.touch();
	}

	pub fn toggle_schema(&mut self) {
		self.view = match self.view {
			View::Table => View::Schema,
			View::Schema => View::Table,
			other => other,
		};
		self.touch();
	}

	/// Enter a list view with the given entries; selection starts at the
	/// first entry when there is one.
	pub fn enter_list(&mut self, kind: ListKind, items: Vec<String>) {
		self.selected = if items.is_empty() { None } else { Some(0) };
		self.items = items;
		self.view = View::List(kind);
		self.touch();
	}

	pub fn select_prev(&mut self) {
		if let Some(selected) = self.selected {
			self.selected = Some(selected.saturating_sub(1));
		}
	}

	pub fn select_next(&mut self) {
		if let Some(selected) = self.selected
			&& !self.items.is_empty()
		{
			self.selected = Some((selected + 1).min(self.items.len() - 1));
		}
	}

	/// The selected list entry, when a list is active.
	pub fn selected_item(&self) -> Option<&str> {
		self.items.get(self.selected?).map(String::as_str)
	}

	pub fn flash(&mut self) {
		self.flash_until = Some(Instant::now() + FLASH_DURATION);
	}

	pub fn flash_active(&self, now: Instant) -> bool {
		self.flash_until.is_some_and(|until| now < until)
	}

	/// Drop an expired pulse so the next frame paints the resting border.
	pub fn expire_flash(&mut self, now: Instant) {
		if let Some(until) = self.flash_until
			&& now >= until
		{
			self.flash_until = None;
		}
	}

	fn clear_list(&mut self) {
		self.items.clear();
		self.selected = None;
	}

	fn touch(&mut self) {
		self.refreshed_at = Local::now();
	}
}
