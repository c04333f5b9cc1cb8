//! bqnav: an interactive terminal browser for BigQuery table metadata.
//!
//! The crate is split into a catalog layer (REST client, auth, typed
//! metadata), small persistence helpers (history, snippets), and a TUI layer
//! whose [`tui::Window`] drives a single-threaded keypress loop.

pub mod app_dirs;
pub mod catalog;
pub mod clipboard;
pub mod format;
pub mod history;
pub mod logging;
pub mod picker;
pub mod snippets;
pub mod tui;
