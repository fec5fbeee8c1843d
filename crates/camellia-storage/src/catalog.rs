//! Concurrent menu catalog.
//!
//! The catalog is the source of truth for pricing inputs. It is
//! read-mostly: order creation only ever reads, while catalog
//! administration adds items, registers options/notes, and flips the
//! sold-out flag. Reads are safe under concurrent order creation.

use crate::StorageError;
use camellia_types::MenuItem;
use dashmap::DashMap;
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;

/// Concurrent store of menu items keyed by item id.
///
/// Item ids are allocated from an atomic counter and never reused within
/// a process lifetime.
pub struct MenuCatalog {
	items: DashMap<u64, MenuItem>,
	next_id: AtomicU64,
}

impl MenuCatalog {
	/// Creates an empty catalog.
	pub fn new() -> Self {
		Self {
			items: DashMap::new(),
			next_id: AtomicU64::new(1),
		}
	}

	/// Adds a new item with no options or notes and returns a copy of
	/// it. The id is assigned here and is immutable thereafter.
	pub fn add_item(&self, item_name: impl Into<String>, base_price: Decimal) -> MenuItem {
		let item_id = self.next_id.fetch_add(1, Ordering::Relaxed);
		let item = MenuItem::new(item_id, item_name, base_price);
		info!(item_id, name = %item.item_name, %base_price, "menu item added");
		self.items.insert(item_id, item.clone());
		item
	}

	/// Looks up an item by id, returning a copy.
	///
	/// Sold-out items are still returned; refusing to order one is an
	/// explicit guard the caller applies, not a lookup failure.
	pub fn lookup(&self, item_id: u64) -> Result<MenuItem, StorageError> {
		self.items
			.get(&item_id)
			.map(|entry| entry.clone())
			.ok_or(StorageError::NotFound)
	}

	/// Returns all items ordered by id, including options/notes maps.
	pub fn list(&self) -> Vec<MenuItem> {
		let mut items: Vec<MenuItem> = self.items.iter().map(|entry| entry.clone()).collect();
		items.sort_by_key(|item| item.item_id);
		items
	}

	/// Applies an administrative edit to an item under its key lock.
	pub fn update(
		&self,
		item_id: u64,
		f: impl FnOnce(&mut MenuItem),
	) -> Result<(), StorageError> {
		let mut entry = self.items.get_mut(&item_id).ok_or(StorageError::NotFound)?;
		f(entry.value_mut());
		Ok(())
	}

	/// Registers an option price on an item.
	pub fn add_option(
		&self,
		item_id: u64,
		name: impl Into<String>,
		price: Decimal,
	) -> Result<(), StorageError> {
		self.update(item_id, |item| item.add_option(name, price))
	}

	/// Registers a note surcharge on an item.
	pub fn add_note(
		&self,
		item_id: u64,
		name: impl Into<String>,
		price: Decimal,
	) -> Result<(), StorageError> {
		self.update(item_id, |item| item.add_note(name, price))
	}

	/// Sets the sold-out flag, the one mutable availability bit.
	pub fn set_sold_out(&self, item_id: u64, sold_out: bool) -> Result<(), StorageError> {
		self.update(item_id, |item| item.sold_out = sold_out)
	}
}

impl Default for MenuCatalog {
	fn default() -> Self {
		Self::new()
	}
}
