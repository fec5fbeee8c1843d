//! In-memory stores for the camellia order system.
//!
//! This crate provides the two concurrent keyed stores the core operates
//! on: the menu catalog (read-mostly pricing inputs) and the order store
//! (insert, lookup, and serialized per-key mutation). Both are backed by
//! sharded concurrent maps, so operations on different keys do not
//! contend while mutations to the same key are mutually exclusive.

use thiserror::Error;

/// Menu catalog store.
pub mod catalog;
/// Order store.
pub mod orders;

pub use catalog::MenuCatalog;
pub use orders::OrderStore;

/// Errors that can occur during store operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StorageError {
	/// The requested key is not present.
	#[error("Not found")]
	NotFound,
	/// An insert collided with an existing key.
	#[error("Duplicate id: {0}")]
	DuplicateId(u64),
}
