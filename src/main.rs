//! Command-line entry point for the bqnav metadata browser.

mod cli;
mod settings;

use anyhow::{Context, Result};
use tracing::info;

use bqnav::catalog::{Catalog, RestCatalog, TableMeta, TableRef, auth};
use bqnav::history::HistoryStore;
use bqnav::logging;
use bqnav::picker::FuzzyPicker;
use bqnav::snippets::SnippetStore;
use bqnav::tui::{TerminalKeys, TerminalSink, Theme, Window, content};

fn main() -> Result<()> {
	let cli = cli::parse_cli();

	if cli.init {
		return settings::initialize();
	}

	let settings = settings::load(&cli)?;

	if cli.info {
		settings.print_summary();
		return Ok(());
	}

	let token = auth::access_token(&settings.token_command)
		.context("failed to obtain an access token")?;
	let catalog = RestCatalog::new(token)?;

	if cli.projects {
		for project in catalog.list_projects()? {
			println!("{project}");
		}
		return Ok(());
	}

	let table = match &cli.table {
		Some(arg) => {
			let reference: TableRef = arg.parse()?;
			let table = catalog
				.get_table(&reference)
				.with_context(|| format!("failed to fetch {reference}"))?;
			Some(table)
		}
		None => None,
	};

	if cli.raw || cli.schema {
		// `requires = "table"` in the CLI definition guarantees this.
		let table = table.context("a table is required")?;
		return print_table(&table, cli.schema);
	}

	logging::init()?;
	info!(version = env!("CARGO_PKG_VERSION"), "starting");

	run_browser(table, catalog, settings)
}

/// Non-interactive output for `--raw` and `--schema`.
fn print_table(table: &TableMeta, schema: bool) -> Result<()> {
	if schema {
		println!("{}", content::to_text(&content::schema_content(table)));
	} else {
		println!("{}", serde_json::to_string_pretty(&table.raw)?);
	}
	Ok(())
}

fn run_browser(
	table: Option<TableMeta>,
	catalog: RestCatalog,
	settings: settings::Settings,
) -> Result<()> {
	let history = HistoryStore::new(settings.history_path.clone());
	let snippets = SnippetStore::new(settings.snippet_dir.clone());

	// Terminal failures are the one fatal condition; everything after this
	// point is absorbed into the session notice.
	let sink = TerminalSink::new(Theme::default()).context("failed to initialize terminal")?;

	let mut window = Window::new(
		table,
		catalog,
		FuzzyPicker::new(),
		sink,
		history,
		snippets,
		settings.project,
		settings.account,
	)?;
	window.run(&mut TerminalKeys)
}
