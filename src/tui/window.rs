//! The navigation state machine.
//!
//! A single-threaded render → block-on-key → transition loop. The window is
//! the sole writer of the [`Session`]; the catalog, picker, history store,
//! and frame sink are collaborators consumed through narrow interfaces so the
//! transition logic is testable without a terminal or network.

use std::time::Instant;

use anyhow::Result;
use ratatui::crossterm::event::{KeyCode, KeyEvent};
use tracing::{debug, warn};

use crate::catalog::{Catalog, CatalogError, TableMeta, TableRef};
use crate::clipboard;
use crate::history::HistoryStore;
use crate::picker::Picker;
use crate::snippets::SnippetStore;

use super::content;
use super::input::KeySource;
use super::session::{ListKind, Session, View};
use super::sink::{FrameModel, FrameSink, SideList};

/// What the loop does after a keystroke.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Flow {
	Continue,
	Quit,
}

/// Result of the multi-step table selection sub-protocol.
enum SelectOutcome {
	Selected(TableMeta),
	/// The user backed out of a picker; nothing was mutated.
	Cancelled,
	Failed(CatalogError),
}

pub struct Window<C, P, S> {
	session: Session,
	catalog: C,
	picker: P,
	sink: S,
	history: HistoryStore,
	snippets: SnippetStore,
	default_project: Option<String>,
	account: Option<String>,
}

impl<C, P, S> Window<C, P, S>
where
	C: Catalog,
	P: Picker,
	S: FrameSink,
{
	#[allow(clippy::too_many_arguments)]
	pub fn new(
		table: Option<TableMeta>,
		catalog: C,
		picker: P,
		sink: S,
		history: HistoryStore,
		snippets: SnippetStore,
		default_project: Option<String>,
		account: Option<String>,
	) -> Result<Self> {
		if let Some(table) = &table {
			history.save(&table.reference)?;
		}
		Ok(Self {
			session: Session::new(table),
			catalog,
			picker,
			sink,
			history,
			snippets,
			default_project,
			account,
		})
	}

	/// Pump the loop until the user quits. The sink is stopped exactly once,
	/// also on error.
	pub fn run(&mut self, keys: &mut dyn KeySource) -> Result<()> {
		let looped = self.event_loop(keys);
		let stopped = self.sink.stop();
		looped?;
		stopped
	}

	fn event_loop(&mut self, keys: &mut dyn KeySource) -> Result<()> {
		loop {
			let model = self.frame_model();
			self.sink.paint(&model)?;

			// While a flash is pending the read carries a deadline so the
			// border reverts without waiting for a keystroke.
			let Some(key) = keys.next_key(self.session.flash_until)? else {
				self.session.expire_flash(Instant::now());
				continue;
			};

			if self.handle_key(key)? == Flow::Quit {
				return Ok(());
			}
		}
	}

	/// Transition function: one keystroke, evaluated against the current
	/// view and table. Unknown keys and failed preconditions leave the
	/// session untouched.
	fn handle_key(&mut self, key: KeyEvent) -> Result<Flow> {
		let has_table = self.session.table.is_some();
		debug!(code = ?key.code, view = ?self.session.view, "keystroke");

		match key.code {
			KeyCode::Char('q') => return Ok(Flow::Quit),
			KeyCode::Char('o') | KeyCode::Char('1') => self.open_flow(None, None)?,
			KeyCode::Char('2') => {
				if let Some(project) = self.session.project().map(str::to_string) {
					self.open_flow(Some(project), None)?;
				}
			}
			KeyCode::Char('3') => {
				if let (Some(project), Some(dataset)) = (
					self.session.project().map(str::to_string),
					self.session.dataset().map(str::to_string),
				) {
					self.open_flow(Some(project), Some(dataset))?;
				}
			}
			KeyCode::Char('h') => self.history_flow()?,
			KeyCode::Char('r') if has_table => self.refresh(),
			KeyCode::Char('s') if has_table => self.session.toggle_schema(),
			KeyCode::Char('t') | KeyCode::Backspace | KeyCode::Esc => {
				self.session.reset_view();
			}
			KeyCode::Char('p') if has_table => {
				self.session
					.enter_list(ListKind::Snippets, self.snippets.list());
			}
			KeyCode::Char('m') if has_table => {
				let fields = content::METADATA_FIELDS
					.iter()
					.map(|field| field.to_string())
					.collect();
				self.session.enter_list(ListKind::Metadata, fields);
			}
			KeyCode::Up if !self.session.items.is_empty() => self.session.select_prev(),
			KeyCode::Down if !self.session.items.is_empty() => self.session.select_next(),
			KeyCode::Char('c') if has_table => self.copy_current(),
			KeyCode::Char('b') if has_table => self.open_browser(),
			_ => {}
		}

		Ok(Flow::Continue)
	}

	/// Assemble the frame for the current session.
	fn frame_model(&self) -> FrameModel {
		let project = self
			.session
			.project()
			.map(str::to_string)
			.or_else(|| self.default_project.clone())
			.unwrap_or_default();
		let account = self.account.clone().unwrap_or_default();

		let side = match self.session.view {
			View::List(kind) => Some(SideList {
				title: match kind {
					ListKind::Snippets => "Snippets".to_string(),
					ListKind::Metadata => "Metadata".to_string(),
				},
				items: self.session.items.clone(),
				selected: self.session.selected,
			}),
			_ => None,
		};

		FrameModel {
			title: self
				.session
				.refreshed_at
				.format("%Y-%m-%d %H:%M:%S")
				.to_string(),
			header: vec![
				("Project".to_string(), project),
				("Account".to_string(), account),
			],
			content: content::build(&self.session, &self.snippets),
			side,
			hint: hint_for(self.session.view).to_string(),
			notice: self.session.notice.clone(),
			flash: self.session.flash_active(Instant::now()),
		}
	}

	// ── navigation flows ────────────────────────────────────────────────

	/// The `o`/`2`/`3` sub-protocol: pick the missing levels in order, then
	/// fetch. Any cancellation aborts the whole flow; nothing is written to
	/// the session until the fetch succeeded.
	fn open_flow(&mut self, project: Option<String>, dataset: Option<String>) -> Result<()> {
		match self.select_table(project, dataset)? {
			SelectOutcome::Selected(table) => self.install_table(table),
			SelectOutcome::Cancelled => {}
			SelectOutcome::Failed(err) => self.report(&err),
		}
		Ok(())
	}

	fn select_table(
		&mut self,
		project: Option<String>,
		dataset: Option<String>,
	) -> Result<SelectOutcome> {
		let project = match project {
			Some(project) => project,
			None => {
				let projects = match self.catalog.list_projects() {
					Ok(projects) => projects,
					Err(err) => return Ok(SelectOutcome::Failed(err)),
				};
				match self.pick("project", &projects)? {
					Some(project) => project,
					None => return Ok(SelectOutcome::Cancelled),
				}
			}
		};

		let dataset = match dataset {
			Some(dataset) => dataset,
			None => {
				let datasets = match self.catalog.list_datasets(&project) {
					Ok(datasets) => datasets,
					Err(err) => return Ok(SelectOutcome::Failed(err)),
				};
				match self.pick("dataset", &datasets)? {
					Some(dataset) => dataset,
					None => return Ok(SelectOutcome::Cancelled),
				}
			}
		};

		let tables = match self.catalog.list_tables(&project, &dataset) {
			Ok(tables) => tables,
			Err(err) => return Ok(SelectOutcome::Failed(err)),
		};
		let table = match self.pick("table", &tables)? {
			Some(table) => table,
			None => return Ok(SelectOutcome::Cancelled),
		};

		let reference = TableRef::new(project, dataset, table);
		match self.catalog.get_table(&reference) {
			Ok(table) => Ok(SelectOutcome::Selected(table)),
			Err(err) => Ok(SelectOutcome::Failed(err)),
		}
	}

	/// Pick from previously visited tables, most recent first. An entry
	/// that no longer exists is pruned from the history.
	fn history_flow(&mut self) -> Result<()> {
		let entries = self.history.list();
		let display: Vec<String> = entries.iter().rev().map(ToString::to_string).collect();
		let Some(choice) = self.pick("history", &display)? else {
			return Ok(());
		};
		let Ok(reference) = choice.parse::<TableRef>() else {
			return Ok(());
		};

		match self.catalog.get_table(&reference) {
			Ok(table) => self.install_table(table),
			Err(err @ CatalogError::NotFound(_)) => {
				warn!(%reference, "pruning vanished history entry");
				if let Err(remove_err) = self.history.remove(&reference) {
					warn!(%remove_err, "failed to prune history entry");
				}
				self.report(&err);
			}
			Err(err) => self.report(&err),
		}
		Ok(())
	}

	fn refresh(&mut self) {
		let Some(reference) = self.session.table.as_ref().map(|t| t.reference.clone()) else {
			return;
		};
		match self.catalog.get_table(&reference) {
			Ok(table) => {
				self.session.replace_table(table);
				self.session.notice = None;
				self.session.flash();
			}
			Err(err) => self.report(&err),
		}
	}

	/// The new table always becomes current; a failed history write only
	/// surfaces a notice, it never ends the session.
	fn install_table(&mut self, table: TableMeta) {
		let saved = self.history.save(&table.reference);
		self.session.set_table(table);
		match saved {
			Ok(()) => self.session.notice = None,
			Err(err) => {
				warn!(%err, "failed to update history");
				self.session.notice = Some(format!("history not saved: {err}"));
			}
		}
	}

	fn copy_current(&mut self) {
		let text = match self.session.view {
			View::Table => self
				.session
				.table
				.as_ref()
				.and_then(|table| serde_json::to_string_pretty(&table.raw).ok()),
			View::List(_) => Some(content::to_text(&content::build(
				&self.session,
				&self.snippets,
			))),
			_ => None,
		};
		let Some(text) = text else {
			return;
		};

		match clipboard::copy(&text) {
			Ok(()) => self.session.flash(),
			Err(err) => self.session.notice = Some(format!("copy failed: {err}")),
		}
	}

	fn open_browser(&mut self) {
		let Some(table) = &self.session.table else {
			return;
		};
		let url = table.reference.console_url();
		if let Err(err) = open::that(&url) {
			self.session.notice = Some(format!("failed to open browser: {err}"));
		}
	}

	/// Bracket a picker invocation with the frame-sink suspend/resume so the
	/// external selection owns the terminal; the sink is resumed even when
	/// the picker fails.
	fn pick(&mut self, title: &str, choices: &[String]) -> Result<Option<String>> {
		self.sink.suspend()?;
		let picked = self.picker.pick(title, choices);
		let resumed = self.sink.resume();
		let picked = picked?;
		resumed?;
		Ok(picked)
	}

	/// Fetch failures never unwind past the loop: log, keep the previous
	/// view, surface a one-line notice.
	fn report(&mut self, err: &CatalogError) {
		warn!(%err, "catalog operation failed");
		self.session.notice = Some(err.to_string());
	}
}

fn hint_for(view: View) -> &'static str {
	match view {
		View::Empty => "open (o) | history (h) | quit (q)",
		View::Table => {
			"open (o) | refresh (r) | schema (s) | snippets (p) | metadata (m) | copy (c) | browser (b) | history (h) | quit (q)"
		}
		View::Schema => {
			"open (o) | refresh (r) | table (s) | snippets (p) | metadata (m) | browser (b) | history (h) | quit (q)"
		}
		View::List(_) => "↑/↓ select | copy (c) | back (t) | quit (q)",
	}
}

#[cfg(test)]
mod tests {
	use std::collections::{HashMap, VecDeque};
	use std::fs;

	use anyhow::bail;
	use ratatui::crossterm::event::KeyModifiers;
	use serde_json::{Value, json};
	use tempfile::TempDir;

	use super::*;
	use crate::catalog::fixtures::TABLE_JSON;

	fn key(code: KeyCode) -> KeyEvent {
		KeyEvent::new(code, KeyModifiers::NONE)
	}

	fn ch(c: char) -> KeyEvent {
		key(KeyCode::Char(c))
	}

	fn meta(reference: &TableRef) -> TableMeta {
		let mut raw: Value = serde_json::from_str(TABLE_JSON).unwrap();
		raw["tableReference"]["projectId"] = json!(reference.project);
		raw["tableReference"]["datasetId"] = json!(reference.dataset);
		raw["tableReference"]["tableId"] = json!(reference.table);
		TableMeta::from_json(raw).unwrap()
	}

	#[derive(Default)]
	struct StubCatalog {
		projects: Vec<String>,
		datasets: Vec<String>,
		tables: Vec<String>,
		metas: HashMap<String, TableMeta>,
		deny_projects: bool,
	}

	impl StubCatalog {
		fn with_table(reference: &TableRef) -> Self {
			let mut stub = Self {
				projects: vec![reference.project.clone()],
				datasets: vec![reference.dataset.clone()],
				tables: vec![reference.table.clone()],
				..Self::default()
			};
			stub.metas.insert(reference.to_string(), meta(reference));
			stub
		}
	}

	impl Catalog for StubCatalog {
		fn list_projects(&self) -> Result<Vec<String>, CatalogError> {
			if self.deny_projects {
				return Err(CatalogError::PermissionDenied("projects".to_string()));
			}
			Ok(self.projects.clone())
		}

		fn list_datasets(&self, _project: &str) -> Result<Vec<String>, CatalogError> {
			Ok(self.datasets.clone())
		}

		fn list_tables(&self, _project: &str, _dataset: &str) -> Result<Vec<String>, CatalogError> {
			Ok(self.tables.clone())
		}

		fn get_table(&self, table: &TableRef) -> Result<TableMeta, CatalogError> {
			self.metas
				.get(&table.to_string())
				.cloned()
				.ok_or_else(|| CatalogError::NotFound(table.to_string()))
		}
	}

	#[derive(Default)]
	struct QueuePicker {
		answers: VecDeque<Option<String>>,
	}

	impl QueuePicker {
		fn answering(answers: &[Option<&str>]) -> Self {
			Self {
				answers: answers
					.iter()
					.map(|answer| answer.map(String::from))
					.collect(),
			}
		}
	}

	impl Picker for QueuePicker {
		fn pick(&mut self, _title: &str, choices: &[String]) -> Result<Option<String>> {
			if choices.is_empty() {
				return Ok(None);
			}
			Ok(self.answers.pop_front().flatten())
		}
	}

	#[derive(Default)]
	struct RecordingSink {
		paints: usize,
		suspends: usize,
		resumes: usize,
		stops: usize,
	}

	impl FrameSink for RecordingSink {
		fn paint(&mut self, _model: &FrameModel) -> Result<()> {
			self.paints += 1;
			Ok(())
		}

		fn suspend(&mut self) -> Result<()> {
			self.suspends += 1;
			Ok(())
		}

		fn resume(&mut self) -> Result<()> {
			self.resumes += 1;
			Ok(())
		}

		fn stop(&mut self) -> Result<()> {
			self.stops += 1;
			Ok(())
		}
	}

	struct ScriptedKeys {
		keys: VecDeque<KeyEvent>,
	}

	impl ScriptedKeys {
		fn new(keys: &[KeyEvent]) -> Self {
			Self {
				keys: keys.iter().copied().collect(),
			}
		}
	}

	impl KeySource for ScriptedKeys {
		fn next_key(&mut self, _deadline: Option<Instant>) -> Result<Option<KeyEvent>> {
			match self.keys.pop_front() {
				Some(key) => Ok(Some(key)),
				None => bail!("key script exhausted"),
			}
		}
	}

	struct Fixture {
		dir: TempDir,
	}

	type TestWindow = Window<StubCatalog, QueuePicker, RecordingSink>;

	impl Fixture {
		fn new() -> Self {
			Self {
				dir: tempfile::tempdir().unwrap(),
			}
		}

		fn history(&self) -> HistoryStore {
			HistoryStore::new(self.dir.path().join("history"))
		}

		fn snippets(&self) -> SnippetStore {
			SnippetStore::new(self.dir.path().join("snippets"))
		}

		fn write_snippet(&self, name: &str) {
			let dir = self.dir.path().join("snippets");
			fs::create_dir_all(&dir).unwrap();
			fs::write(dir.join(name), "SELECT * FROM `{full_table_id}`").unwrap();
		}

		fn window(
			&self,
			table: Option<TableMeta>,
			catalog: StubCatalog,
			picker: QueuePicker,
		) -> TestWindow {
			Window::new(
				table,
				catalog,
				picker,
				RecordingSink::default(),
				self.history(),
				self.snippets(),
				None,
				None,
			)
			.unwrap()
		}
	}

	fn reference() -> TableRef {
		TableRef::new("proj1", "ds1", "tbl1")
	}

	#[test]
	fn undefined_and_precondition_failing_keys_are_noops() {
		let fixture = Fixture::new();
		let mut window = fixture.window(None, StubCatalog::default(), QueuePicker::default());

		let before = window.session.clone();
		for event in [
			ch('x'),
			ch('r'),
			ch('s'),
			ch('p'),
			ch('m'),
			ch('c'),
			ch('b'),
			ch('2'),
			ch('3'),
			key(KeyCode::Up),
			key(KeyCode::Down),
			key(KeyCode::F(5)),
		] {
			assert_eq!(window.handle_key(event).unwrap(), Flow::Continue);
			assert_eq!(window.session, before, "{event:?} must not mutate state");
		}
	}

	#[test]
	fn open_flow_sets_table_history_and_view() {
		let fixture = Fixture::new();
		let reference = reference();
		let mut window = fixture.window(
			None,
			StubCatalog::with_table(&reference),
			QueuePicker::answering(&[Some("proj1"), Some("ds1"), Some("tbl1")]),
		);

		window.handle_key(ch('o')).unwrap();

		assert_eq!(window.session.view, View::Table);
		let table = window.session.table.as_ref().unwrap();
		assert_eq!(table.reference, reference);
		assert_eq!(fixture.history().list(), vec![reference]);
		// The picker bracket suspended and resumed the sink three times.
		assert_eq!(window.sink.suspends, 3);
		assert_eq!(window.sink.resumes, 3);
	}

	#[test]
	fn cancelled_flow_aborts_without_partial_state() {
		let fixture = Fixture::new();
		let mut window = fixture.window(
			None,
			StubCatalog::with_table(&reference()),
			QueuePicker::answering(&[Some("proj1"), None]),
		);

		let before = window.session.clone();
		window.handle_key(ch('o')).unwrap();

		assert_eq!(window.session, before);
		assert!(fixture.history().list().is_empty());
	}

	#[test]
	fn denied_listing_surfaces_notice_and_keeps_state() {
		let fixture = Fixture::new();
		let catalog = StubCatalog {
			deny_projects: true,
			..StubCatalog::default()
		};
		let mut window = fixture.window(None, catalog, QueuePicker::default());

		window.handle_key(ch('o')).unwrap();

		assert_eq!(window.session.view, View::Empty);
		assert!(window.session.table.is_none());
		assert!(
			window
				.session
				.notice
				.as_deref()
				.unwrap()
				.contains("permission denied")
		);
	}

	#[test]
	fn schema_toggle_and_back() {
		let fixture = Fixture::new();
		let reference = reference();
		let mut window = fixture.window(
			Some(meta(&reference)),
			StubCatalog::with_table(&reference),
			QueuePicker::default(),
		);

		window.handle_key(ch('s')).unwrap();
		assert_eq!(window.session.view, View::Schema);
		window.handle_key(ch('s')).unwrap();
		assert_eq!(window.session.view, View::Table);

		window.handle_key(ch('m')).unwrap();
		assert_eq!(window.session.view, View::List(ListKind::Metadata));
		window.handle_key(key(KeyCode::Esc)).unwrap();
		assert_eq!(window.session.view, View::Table);
		assert!(window.session.items.is_empty());
		assert_eq!(window.session.selected, None);
	}

	#[test]
	fn refresh_flashes_and_keeps_the_current_view() {
		let fixture = Fixture::new();
		let reference = reference();
		let mut window = fixture.window(
			Some(meta(&reference)),
			StubCatalog::with_table(&reference),
			QueuePicker::default(),
		);

		window.handle_key(ch('s')).unwrap();
		window.handle_key(ch('r')).unwrap();

		assert_eq!(window.session.view, View::Schema);
		assert!(window.session.flash_until.is_some());
		assert!(window.session.table.is_some());
	}

	#[test]
	fn metadata_list_selection_clamps() {
		let fixture = Fixture::new();
		let reference = reference();
		let mut window = fixture.window(
			Some(meta(&reference)),
			StubCatalog::with_table(&reference),
			QueuePicker::default(),
		);

		window.handle_key(ch('m')).unwrap();
		assert_eq!(window.session.items.len(), content::METADATA_FIELDS.len());
		assert_eq!(window.session.selected, Some(0));

		window.handle_key(key(KeyCode::Up)).unwrap();
		assert_eq!(window.session.selected, Some(0));

		window.handle_key(key(KeyCode::Down)).unwrap();
		assert_eq!(window.session.selected, Some(1));

		for _ in 0..100 {
			window.handle_key(key(KeyCode::Down)).unwrap();
		}
		assert_eq!(
			window.session.selected,
			Some(content::METADATA_FIELDS.len() - 1)
		);
	}

	#[test]
	fn snippet_list_with_empty_library_has_no_selection() {
		let fixture = Fixture::new();
		let reference = reference();
		let mut window = fixture.window(
			Some(meta(&reference)),
			StubCatalog::with_table(&reference),
			QueuePicker::default(),
		);

		window.handle_key(ch('p')).unwrap();
		assert_eq!(window.session.view, View::List(ListKind::Snippets));
		assert!(window.session.items.is_empty());
		assert_eq!(window.session.selected, None);
	}

	#[test]
	fn history_pick_refetches_and_promotes_the_entry() {
		let fixture = Fixture::new();
		let a = TableRef::new("proj1", "ds1", "a");
		let b = TableRef::new("proj1", "ds1", "b");
		fixture.history().save(&a).unwrap();
		fixture.history().save(&b).unwrap();

		let mut catalog = StubCatalog::default();
		catalog.metas.insert(a.to_string(), meta(&a));
		catalog.metas.insert(b.to_string(), meta(&b));

		let mut window = fixture.window(
			None,
			catalog,
			QueuePicker::answering(&[Some("proj1.ds1.a")]),
		);
		window.handle_key(ch('h')).unwrap();

		assert_eq!(window.session.view, View::Table);
		assert_eq!(window.session.table.as_ref().unwrap().reference, a);
		assert_eq!(fixture.history().list(), vec![b.clone(), a.clone()]);
	}

	#[test]
	fn vanished_history_entry_is_pruned_and_view_kept() {
		let fixture = Fixture::new();
		let a = TableRef::new("proj1", "ds1", "a");
		let b = TableRef::new("proj1", "ds1", "b");
		fixture.history().save(&a).unwrap();
		fixture.history().save(&b).unwrap();

		// Only `b` still exists in the catalog.
		let mut catalog = StubCatalog::default();
		catalog.metas.insert(b.to_string(), meta(&b));

		let mut window = fixture.window(
			None,
			catalog,
			QueuePicker::answering(&[Some("proj1.ds1.a")]),
		);
		window.handle_key(ch('h')).unwrap();

		assert_eq!(fixture.history().list(), vec![b]);
		assert_eq!(window.session.view, View::Empty);
		assert!(window.session.table.is_none());
		assert!(window.session.notice.is_some());
	}

	#[test]
	fn history_write_failure_surfaces_notice_and_keeps_the_table() {
		let fixture = Fixture::new();
		let reference = reference();
		// A directory at the history path makes every write fail.
		let history_path = fixture.dir.path().join("history");
		fs::create_dir_all(&history_path).unwrap();

		let mut window: TestWindow = Window::new(
			None,
			StubCatalog::with_table(&reference),
			QueuePicker::answering(&[Some("proj1"), Some("ds1"), Some("tbl1")]),
			RecordingSink::default(),
			HistoryStore::new(history_path),
			fixture.snippets(),
			None,
			None,
		)
		.unwrap();

		assert_eq!(window.handle_key(ch('o')).unwrap(), Flow::Continue);
		assert_eq!(window.session.view, View::Table);
		assert_eq!(window.session.table.as_ref().unwrap().reference, reference);
		assert!(
			window
				.session
				.notice
				.as_deref()
				.unwrap()
				.contains("history not saved")
		);
	}

	#[test]
	fn run_stops_the_sink_exactly_once() {
		let fixture = Fixture::new();
		fixture.write_snippet("preview.sql");
		let reference = reference();
		let mut window = fixture.window(
			Some(meta(&reference)),
			StubCatalog::with_table(&reference),
			QueuePicker::default(),
		);

		let mut keys = ScriptedKeys::new(&[ch('p'), ch('q')]);
		window.run(&mut keys).unwrap();

		assert_eq!(window.session.view, View::List(ListKind::Snippets));
		assert_eq!(window.session.selected, Some(0));
		assert_eq!(window.sink.stops, 1);
		assert!(window.sink.paints >= 2);
	}

	#[test]
	fn startup_table_is_recorded_in_history() {
		let fixture = Fixture::new();
		let reference = reference();
		let window = fixture.window(
			Some(meta(&reference)),
			StubCatalog::with_table(&reference),
			QueuePicker::default(),
		);

		assert_eq!(window.session.view, View::Table);
		assert_eq!(fixture.history().list(), vec![reference]);
	}

	#[test]
	fn frame_model_reflects_view_and_flash() {
		let fixture = Fixture::new();
		let reference = reference();
		let mut window = fixture.window(
			Some(meta(&reference)),
			StubCatalog::with_table(&reference),
			QueuePicker::default(),
		);

		let model = window.frame_model();
		assert!(!model.flash);
		assert!(model.side.is_none());
		assert_eq!(model.header[0], ("Project".to_string(), "proj1".to_string()));
		assert!(model.hint.contains("schema (s)"));

		window.handle_key(ch('m')).unwrap();
		let model = window.frame_model();
		let side = model.side.unwrap();
		assert_eq!(side.title, "Metadata");
		assert_eq!(side.selected, Some(0));

		window.handle_key(ch('r')).unwrap();
		assert!(window.frame_model().flash);
	}
}
