//! Resolve configuration and data directories for `bqnav`.
//!
//! Environment overrides take precedence; otherwise the platform locations
//! from the `dirs` crate are used.

use std::env;
use std::path::PathBuf;

use anyhow::{Result, anyhow};

const APPLICATION: &str = "bqnav";

const CONFIG_DIR_ENV: &str = "BQNAV_CONFIG_DIR";
const DATA_DIR_ENV: &str = "BQNAV_DATA_DIR";

/// Resolve an override directory from an environment variable. An empty
/// string is treated the same as an unset value.
fn dir_from_env(name: &str) -> Option<PathBuf> {
	let value = env::var_os(name)?;
	if value.is_empty() {
		None
	} else {
		Some(PathBuf::from(value))
	}
}

/// Configuration directory: `config.toml` and the snippet library.
pub fn config_dir() -> Result<PathBuf> {
	if let Some(dir) = dir_from_env(CONFIG_DIR_ENV) {
		return Ok(dir);
	}

	let base = dirs::config_dir().ok_or_else(|| anyhow!("unable to determine config directory"))?;
	Ok(base.join(APPLICATION))
}

/// Data directory: history file and log output.
pub fn data_dir() -> Result<PathBuf> {
	if let Some(dir) = dir_from_env(DATA_DIR_ENV) {
		return Ok(dir);
	}

	let base = dirs::data_dir().ok_or_else(|| anyhow!("unable to determine data directory"))?;
	Ok(base.join(APPLICATION))
}

/// Default location of the snippet library.
pub fn snippets_dir() -> Result<PathBuf> {
	Ok(config_dir()?.join("snippets"))
}

/// Default location of the visited-table history.
pub fn history_path() -> Result<PathBuf> {
	Ok(data_dir()?.join("history"))
}

/// Log file kept out of the terminal the TUI owns.
pub fn log_path() -> Result<PathBuf> {
	Ok(data_dir()?.join("bqnav.log"))
}
