//! Read-only client for the remote warehouse catalog.
//!
//! The navigation loop consumes the catalog exclusively through the
//! [`Catalog`] trait; the REST implementation lives in [`rest`], token
//! acquisition in [`auth`].

pub mod auth;
mod error;
pub mod rest;
mod types;

pub use error::CatalogError;
pub use rest::RestCatalog;
pub use types::{
	ParseRefError, SchemaField, StreamingBuffer, TableMeta, TableRef, TimePartitioning,
};

#[cfg(test)]
pub(crate) use types::fixtures;

/// Catalog operations the navigation state machine depends on.
///
/// Listings may be slow and paginated; implementations block until complete.
pub trait Catalog {
	fn list_projects(&self) -> Result<Vec<String>, CatalogError>;
	fn list_datasets(&self, project: &str) -> Result<Vec<String>, CatalogError>;
	fn list_tables(&self, project: &str, dataset: &str) -> Result<Vec<String>, CatalogError>;
	fn get_table(&self, table: &TableRef) -> Result<TableMeta, CatalogError>;
}
