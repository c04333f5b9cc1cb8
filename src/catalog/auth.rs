//! Access-token acquisition for the REST catalog.
//!
//! Token exchange itself is out of scope: the token either arrives through
//! the `BQNAV_TOKEN` environment variable or from a configurable shell
//! command (`gcloud auth print-access-token` by default).

use std::env;
use std::process::Command;

use super::error::CatalogError;

const TOKEN_ENV: &str = "BQNAV_TOKEN";

/// Default command used when the configuration does not override it.
pub const DEFAULT_TOKEN_COMMAND: &str = "gcloud auth print-access-token";

/// Obtain a bearer token for catalog requests.
pub fn access_token(token_command: &str) -> Result<String, CatalogError> {
	if let Ok(token) = env::var(TOKEN_ENV) {
		let token = token.trim();
		if !token.is_empty() {
			return Ok(token.to_string());
		}
	}

	run_token_command(token_command)
}

fn run_token_command(token_command: &str) -> Result<String, CatalogError> {
	let mut parts = token_command.split_whitespace();
	let Some(program) = parts.next() else {
		return Err(CatalogError::Auth("token command is empty".to_string()));
	};

	let output = Command::new(program)
		.args(parts)
		.output()
		.map_err(|err| CatalogError::Auth(format!("failed to run '{token_command}': {err}")))?;

	if !output.status.success() {
		let stderr = String::from_utf8_lossy(&output.stderr);
		return Err(CatalogError::Auth(format!(
			"'{token_command}' exited with {}: {}",
			output.status,
			stderr.trim()
		)));
	}

	let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
	if token.is_empty() {
		return Err(CatalogError::Auth(format!(
			"'{token_command}' produced no token"
		)));
	}
	Ok(token)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn reads_token_from_command_output() {
		let token = run_token_command("echo test-token").unwrap();
		assert_eq!(token, "test-token");
	}

	#[test]
	fn missing_command_is_an_auth_error() {
		let err = run_token_command("bqnav-no-such-command-xyz").unwrap_err();
		assert!(matches!(err, CatalogError::Auth(_)));
	}

	#[test]
	fn empty_command_is_an_auth_error() {
		let err = run_token_command("   ").unwrap_err();
		assert!(matches!(err, CatalogError::Auth(_)));
	}
}
