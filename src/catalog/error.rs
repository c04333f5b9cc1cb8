use thiserror::Error;

/// Failures surfaced by catalog operations.
///
/// Every variant is caught at the navigation boundary: the window logs it,
/// keeps the previous view, and never unwinds past the render loop.
#[derive(Debug, Error)]
pub enum CatalogError {
	/// The table or dataset vanished or was mistyped. History entries that
	/// hit this are pruned.
	#[error("not found: {0}")]
	NotFound(String),

	#[error("permission denied: {0}")]
	PermissionDenied(String),

	#[error("authentication failed: {0}")]
	Auth(String),

	/// Transient transport failure. No automatic retry; the user re-triggers
	/// via refresh.
	#[error("network error: {0}")]
	Network(#[from] reqwest::Error),

	#[error("unexpected response: {0}")]
	Malformed(String),
}
