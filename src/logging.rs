//! Tracing setup.
//!
//! The TUI owns stdout/stderr, so log output goes to a file in the data
//! directory. Filtering follows `RUST_LOG`, defaulting to `info`.

use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use crate::app_dirs;

pub fn init() -> Result<()> {
	let path = app_dirs::log_path()?;
	if let Some(parent) = path.parent() {
		fs::create_dir_all(parent)
			.with_context(|| format!("failed to create {}", parent.display()))?;
	}
	let file = OpenOptions::new()
		.create(true)
		.append(true)
		.open(&path)
		.with_context(|| format!("failed to open {}", path.display()))?;

	tracing_subscriber::fmt()
		.with_env_filter(
			EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
		)
		.with_writer(Mutex::new(file))
		.with_ansi(false)
		.init();

	Ok(())
}
