//! Concurrent order store.
//!
//! Orders are kept in a sharded concurrent map keyed by order id. The
//! required discipline is per-key mutual exclusion: two mutations of the
//! same order serialize, while operations on different orders proceed
//! without contending. No operation ever holds more than one key's lock,
//! so the store cannot deadlock.

use crate::StorageError;
use camellia_types::Order;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;

/// Concurrent store of orders keyed by order id.
pub struct OrderStore {
	orders: DashMap<u64, Order>,
	next_id: AtomicU64,
}

impl OrderStore {
	/// Creates an empty store.
	pub fn new() -> Self {
		Self {
			orders: DashMap::new(),
			next_id: AtomicU64::new(1),
		}
	}

	/// Allocates the next order id. Ids are never reused within a
	/// process lifetime.
	pub fn next_order_id(&self) -> u64 {
		self.next_id.fetch_add(1, Ordering::Relaxed)
	}

	/// Inserts a new order.
	///
	/// The duplicate check and the insert are a single critical section
	/// on the key's shard, so a racing insert with the same id cannot
	/// slip through.
	pub fn insert(&self, order: Order) -> Result<(), StorageError> {
		match self.orders.entry(order.order_id) {
			Entry::Occupied(_) => Err(StorageError::DuplicateId(order.order_id)),
			Entry::Vacant(slot) => {
				info!(order_id = order.order_id, table_id = %order.table_id, total = %order.total_price, "order stored");
				slot.insert(order);
				Ok(())
			}
		}
	}

	/// Returns a copy of the order with the given id.
	pub fn get(&self, order_id: u64) -> Result<Order, StorageError> {
		self.orders
			.get(&order_id)
			.map(|entry| entry.clone())
			.ok_or(StorageError::NotFound)
	}

	/// Returns copies of all orders, ordered by id.
	pub fn get_all(&self) -> Vec<Order> {
		let mut orders: Vec<Order> = self.orders.iter().map(|entry| entry.clone()).collect();
		orders.sort_by_key(|order| order.order_id);
		orders
	}

	/// Applies a fallible mutation to one order under its key lock.
	///
	/// The closure runs with exclusive access to the entry, so the whole
	/// read-modify-write is atomic with respect to other mutations and
	/// reads of the same key. Mutations of other keys are unaffected.
	/// The outer result reports a missing key; the inner result is the
	/// closure's own outcome.
	pub fn update_with<T, E>(
		&self,
		order_id: u64,
		f: impl FnOnce(&mut Order) -> Result<T, E>,
	) -> Result<Result<T, E>, StorageError> {
		let mut entry = self
			.orders
			.get_mut(&order_id)
			.ok_or(StorageError::NotFound)?;
		Ok(f(entry.value_mut()))
	}
}

impl Default for OrderStore {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use camellia_types::{OrderItem, OrderStatus};
	use rust_decimal_macros::dec;
	use std::sync::Arc;

	fn order(id: u64) -> Order {
		Order::new(id, "T1")
	}

	#[test]
	fn test_insert_and_get() {
		let store = OrderStore::new();
		store.insert(order(1)).unwrap();

		let found = store.get(1).unwrap();
		assert_eq!(found.order_id, 1);
		assert_eq!(found.order_status, OrderStatus::New);
	}

	#[test]
	fn test_insert_duplicate_id() {
		let store = OrderStore::new();
		store.insert(order(1)).unwrap();
		assert_eq!(store.insert(order(1)), Err(StorageError::DuplicateId(1)));
	}

	#[test]
	fn test_get_unknown_id() {
		let store = OrderStore::new();
		assert_eq!(store.get(7), Err(StorageError::NotFound));
	}

	#[test]
	fn test_get_all_ordered_by_id() {
		let store = OrderStore::new();
		store.insert(order(3)).unwrap();
		store.insert(order(1)).unwrap();
		store.insert(order(2)).unwrap();

		let ids: Vec<u64> = store.get_all().iter().map(|o| o.order_id).collect();
		assert_eq!(ids, vec![1, 2, 3]);
	}

	#[test]
	fn test_next_order_id_never_repeats() {
		let store = OrderStore::new();
		let a = store.next_order_id();
		let b = store.next_order_id();
		assert_ne!(a, b);
	}

	#[test]
	fn test_update_with_unknown_id() {
		let store = OrderStore::new();
		let result = store.update_with::<(), StorageError>(9, |_| Ok(()));
		assert_eq!(result, Err(StorageError::NotFound));
	}

	#[test]
	fn test_concurrent_updates_to_same_key_do_not_tear() {
		// Many threads append a line to the same order; every append must
		// land and the incremental total must match the bulk recompute.
		let store = Arc::new(OrderStore::new());
		store.insert(order(1)).unwrap();

		let threads: Vec<_> = (0..32)
			.map(|i| {
				let store = Arc::clone(&store);
				std::thread::spawn(move || {
					store
						.update_with(1, |o: &mut Order| {
							o.push_line(OrderItem {
								menu_item_id: i,
								item_name: format!("item-{}", i),
								quantity: 1,
								customer_name: None,
								chosen_option: None,
								note_names: vec![],
								unit_price: dec!(1.00),
							});
							Ok::<(), StorageError>(())
						})
						.unwrap()
						.unwrap();
				})
			})
			.collect();
		for t in threads {
			t.join().unwrap();
		}

		let final_order = store.get(1).unwrap();
		assert_eq!(final_order.order_items.len(), 32);
		assert_eq!(final_order.total_price, dec!(32.00));
		assert_eq!(final_order.recompute_total(), final_order.total_price);
	}

	#[test]
	fn test_concurrent_updates_to_distinct_keys() {
		let store = Arc::new(OrderStore::new());
		for id in 1..=8 {
			store.insert(order(id)).unwrap();
		}

		let threads: Vec<_> = (1..=8u64)
			.map(|id| {
				let store = Arc::clone(&store);
				std::thread::spawn(move || {
					for _ in 0..100 {
						store
							.update_with(id, |o: &mut Order| {
								o.order_status = OrderStatus::New;
								Ok::<(), StorageError>(())
							})
							.unwrap()
							.unwrap();
					}
				})
			})
			.collect();
		for t in threads {
			t.join().unwrap();
		}

		assert_eq!(store.get_all().len(), 8);
	}
}
