//! Command-line arguments for the `bqnav` binary.

use std::path::PathBuf;

use clap::{ArgAction, Parser};

/// Command-line arguments accepted by the `bqnav` binary.
#[derive(Parser, Debug)]
#[command(
	name = "bqnav",
	version,
	about = "Interactive terminal browser for BigQuery table metadata"
)]
pub struct CliArgs {
	/// Table to open on startup, as `project.dataset.table` or
	/// `project:dataset.table`.
	#[arg(value_name = "TABLE")]
	pub table: Option<String>,
	#[arg(
		long,
		help = "Print the raw metadata JSON for TABLE and exit",
		requires = "table"
	)]
	pub raw: bool,
	#[arg(
		long,
		help = "Print the schema for TABLE and exit",
		requires = "table",
		conflicts_with = "raw"
	)]
	pub schema: bool,
	#[arg(long, help = "List accessible projects and exit")]
	pub projects: bool,
	#[arg(long, help = "Create the config and data directories and exit")]
	pub init: bool,
	#[arg(long, help = "Print the effective configuration and exit")]
	pub info: bool,
	#[arg(
		short = 'p',
		long,
		value_name = "ID",
		help = "Override the default project"
	)]
	pub project: Option<String>,
	#[arg(
		short,
		long = "config",
		value_name = "FILE",
		env = "BQNAV_CONFIG",
		action = ArgAction::Append,
		help = "Additional configuration file to merge"
	)]
	pub config: Vec<PathBuf>,
	#[arg(
		short = 'n',
		long = "no-config",
		help = "Skip loading default configuration files"
	)]
	pub no_config: bool,
}

/// Parse command-line arguments, exiting on error.
pub fn parse_cli() -> CliArgs {
	CliArgs::parse()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_table_and_project_override() {
		let cli = CliArgs::parse_from(["bqnav", "-p", "other", "proj1.ds1.tbl1"]);
		assert_eq!(cli.table.as_deref(), Some("proj1.ds1.tbl1"));
		assert_eq!(cli.project.as_deref(), Some("other"));
		assert!(!cli.raw);
	}

	#[test]
	fn raw_requires_a_table() {
		assert!(CliArgs::try_parse_from(["bqnav", "--raw"]).is_err());
		assert!(CliArgs::try_parse_from(["bqnav", "--raw", "p.d.t"]).is_ok());
	}

	#[test]
	fn raw_and_schema_conflict() {
		assert!(CliArgs::try_parse_from(["bqnav", "--raw", "--schema", "p.d.t"]).is_err());
	}

	#[test]
	fn config_flag_accumulates() {
		let cli = CliArgs::parse_from(["bqnav", "-c", "a.toml", "-c", "b.toml"]);
		assert_eq!(cli.config.len(), 2);
		assert!(!cli.no_config);
	}
}
