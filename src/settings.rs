//! Layered configuration for the `bqnav` binary.
//!
//! Values merge in order: `<config-dir>/config.toml`, `./.bqnav.toml`,
//! files given with `--config`, `BQNAV__*` environment variables, and
//! finally command-line overrides.

use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use config::{Config, ConfigError, File};
use serde::Deserialize;

use bqnav::app_dirs;
use bqnav::catalog::auth::DEFAULT_TOKEN_COMMAND;
use bqnav::snippets::{EXAMPLE_SNIPPET, EXAMPLE_SNIPPET_NAME};

use crate::cli::CliArgs;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RawSettings {
	project: Option<String>,
	account: Option<String>,
	token_command: Option<String>,
	snippet_dir: Option<PathBuf>,
	history_path: Option<PathBuf>,
}

/// Effective configuration after merging all sources.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
	/// Default project shown in the header before a table is open.
	pub project: Option<String>,
	/// Account label shown in the header.
	pub account: Option<String>,
	/// Command that prints an access token when `BQNAV_TOKEN` is unset.
	pub token_command: String,
	pub snippet_dir: PathBuf,
	pub history_path: PathBuf,
}

impl Settings {
	pub fn print_summary(&self) {
		println!("Effective configuration:");
		match &self.project {
			Some(project) => println!("  Project: {project}"),
			None => println!("  Project: (none)"),
		}
		match &self.account {
			Some(account) => println!("  Account: {account}"),
			None => println!("  Account: (none)"),
		}
		println!("  Token command: {}", self.token_command);
		println!("  Snippet directory: {}", self.snippet_dir.display());
		println!("  History file: {}", self.history_path.display());
	}
}

pub fn load(cli: &CliArgs) -> Result<Settings> {
	let builder = build_config(cli)?;
	let mut raw: RawSettings = builder
		.try_deserialize()
		.map_err(|err| anyhow!("failed to deserialize configuration: {err}"))?;
	raw.apply_cli_overrides(cli);
	raw.resolve()
}

fn build_config(cli: &CliArgs) -> Result<Config> {
	let mut builder = Config::builder();

	if !cli.no_config {
		for path in default_config_files() {
			builder = builder.add_source(File::from(path).required(false));
		}
	}

	for path in &cli.config {
		builder = builder.add_source(File::from(path.clone()).required(true));
	}

	builder = builder.add_source(
		config::Environment::with_prefix("bqnav")
			.separator("__")
			.try_parsing(true),
	);

	builder.build().map_err(|err| match err {
		ConfigError::Frozen => anyhow!("configuration builder is frozen"),
		other => other.into(),
	})
}

fn default_config_files() -> Vec<PathBuf> {
	let mut files = Vec::new();

	if let Ok(dir) = app_dirs::config_dir() {
		files.push(dir.join("config.toml"));
	}

	if let Ok(current_dir) = env::current_dir() {
		files.push(current_dir.join(".bqnav.toml"));
	}

	files
}

impl RawSettings {
	fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		if let Some(project) = cli.project.clone() {
			self.project = Some(project);
		}
	}

	fn resolve(self) -> Result<Settings> {
		let snippet_dir = match self.snippet_dir {
			Some(dir) => dir,
			None => app_dirs::snippets_dir()?,
		};
		let history_path = match self.history_path {
			Some(path) => path,
			None => app_dirs::history_path()?,
		};

		Ok(Settings {
			project: self.project,
			account: self.account,
			token_command: self
				.token_command
				.unwrap_or_else(|| DEFAULT_TOKEN_COMMAND.to_string()),
			snippet_dir,
			history_path,
		})
	}
}

/// Create the config and data directories, a default `config.toml`, and an
/// example snippet. Existing files are left alone.
pub fn initialize() -> Result<()> {
	let config_dir = app_dirs::config_dir()?;
	fs::create_dir_all(&config_dir)
		.with_context(|| format!("failed to create {}", config_dir.display()))?;

	let data_dir = app_dirs::data_dir()?;
	fs::create_dir_all(&data_dir)
		.with_context(|| format!("failed to create {}", data_dir.display()))?;

	let config_file = config_dir.join("config.toml");
	if !config_file.exists() {
		fs::write(&config_file, DEFAULT_CONFIG)
			.with_context(|| format!("failed to write {}", config_file.display()))?;
		println!("wrote {}", config_file.display());
	}

	let snippet_dir = app_dirs::snippets_dir()?;
	if !snippet_dir.exists() {
		fs::create_dir_all(&snippet_dir)
			.with_context(|| format!("failed to create {}", snippet_dir.display()))?;
		let example = snippet_dir.join(EXAMPLE_SNIPPET_NAME);
		fs::write(&example, EXAMPLE_SNIPPET)
			.with_context(|| format!("failed to write {}", example.display()))?;
		println!("wrote {}", example.display());
	}

	Ok(())
}

const DEFAULT_CONFIG: &str = "\
# bqnav configuration.
#
# project = \"my-project\"
# account = \"me@example.com\"
# token_command = \"gcloud auth print-access-token\"
";

#[cfg(test)]
mod tests {
	use std::sync::Mutex;

	use clap::Parser;

	use super::*;

	// `load` reads the process environment, so tests that call it take this
	// lock to keep `BQNAV__*` manipulation from leaking across threads.
	static ENV_LOCK: Mutex<()> = Mutex::new(());

	fn cli(args: &[&str]) -> CliArgs {
		CliArgs::parse_from(args)
	}

	#[test]
	fn explicit_config_file_is_merged() {
		let _env = ENV_LOCK.lock().unwrap();
		let dir = tempfile::tempdir().unwrap();
		let file = dir.path().join("conf.toml");
		fs::write(&file, "project = \"from-file\"\naccount = \"me\"\n").unwrap();

		let settings = load(&cli(&[
			"bqnav",
			"--no-config",
			"-c",
			file.to_str().unwrap(),
		]))
		.unwrap();

		assert_eq!(settings.project.as_deref(), Some("from-file"));
		assert_eq!(settings.account.as_deref(), Some("me"));
		assert_eq!(settings.token_command, DEFAULT_TOKEN_COMMAND);
	}

	#[test]
	fn cli_project_overrides_the_file() {
		let _env = ENV_LOCK.lock().unwrap();
		let dir = tempfile::tempdir().unwrap();
		let file = dir.path().join("conf.toml");
		fs::write(&file, "project = \"from-file\"\n").unwrap();

		let settings = load(&cli(&[
			"bqnav",
			"--no-config",
			"-c",
			file.to_str().unwrap(),
			"-p",
			"from-cli",
		]))
		.unwrap();

		assert_eq!(settings.project.as_deref(), Some("from-cli"));
	}

	#[test]
	fn env_overrides_file_and_cli_overrides_env() {
		let _env = ENV_LOCK.lock().unwrap();
		let dir = tempfile::tempdir().unwrap();
		let file = dir.path().join("conf.toml");
		fs::write(&file, "project = \"from-file\"\n").unwrap();
		let file = file.to_str().unwrap();

		unsafe { env::set_var("BQNAV__PROJECT", "from-env") };
		let from_env = load(&cli(&["bqnav", "--no-config", "-c", file]));
		let from_cli = load(&cli(&["bqnav", "--no-config", "-c", file, "-p", "from-cli"]));
		unsafe { env::remove_var("BQNAV__PROJECT") };

		assert_eq!(from_env.unwrap().project.as_deref(), Some("from-env"));
		assert_eq!(from_cli.unwrap().project.as_deref(), Some("from-cli"));
	}

	#[test]
	fn missing_explicit_config_file_is_an_error() {
		let _env = ENV_LOCK.lock().unwrap();
		assert!(load(&cli(&["bqnav", "--no-config", "-c", "/nonexistent/x.toml"])).is_err());
	}
}
