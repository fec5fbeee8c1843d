//! Order state machine implementation.
//!
//! Manages order status transitions with validation, ensuring orders move
//! through valid lifecycle states: NEW -> ACCEPTED -> READY -> COMPLETED,
//! with CANCELLED reachable from any non-terminal state. COMPLETED and
//! CANCELLED are terminal. Applying a valid transition is the only
//! mutation permitted on a stored order.

use camellia_storage::{OrderStore, StorageError};
use camellia_types::{Order, OrderStatus};
use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Errors that can occur during order state management.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OrderStateError {
	#[error("Order not found: {0}")]
	OrderNotFound(u64),
	#[error("Invalid state transition from {from} to {to}")]
	InvalidTransition { from: OrderStatus, to: OrderStatus },
	#[error("Storage error: {0}")]
	Storage(String),
}

// Static transition table - each state maps to allowed next states
static TRANSITIONS: Lazy<HashMap<OrderStatus, HashSet<OrderStatus>>> = Lazy::new(|| {
	let mut m = HashMap::new();
	m.insert(
		OrderStatus::New,
		HashSet::from([OrderStatus::Accepted, OrderStatus::Cancelled]),
	);
	m.insert(
		OrderStatus::Accepted,
		HashSet::from([OrderStatus::Ready, OrderStatus::Cancelled]),
	);
	m.insert(
		OrderStatus::Ready,
		HashSet::from([OrderStatus::Completed, OrderStatus::Cancelled]),
	);
	m.insert(OrderStatus::Completed, HashSet::new()); // terminal
	m.insert(OrderStatus::Cancelled, HashSet::new()); // terminal
	m
});

/// Checks whether a status transition is allowed.
pub fn is_valid_transition(from: OrderStatus, to: OrderStatus) -> bool {
	if from.is_terminal() {
		return false;
	}
	TRANSITIONS.get(&from).is_some_and(|set| set.contains(&to))
}

/// Validates and applies order status transitions against the store.
pub struct OrderStateMachine {
	store: Arc<OrderStore>,
}

impl OrderStateMachine {
	pub fn new(store: Arc<OrderStore>) -> Self {
		Self { store }
	}

	/// Transitions an order to a new status with validation.
	///
	/// The check and the write happen under the order's key lock, so two
	/// racing transitions on the same order serialize and each sees the
	/// other's result.
	pub fn transition_order_status(
		&self,
		order_id: u64,
		new_status: OrderStatus,
	) -> Result<Order, OrderStateError> {
		let outcome = self.store.update_with(order_id, |order: &mut Order| {
			if !is_valid_transition(order.order_status, new_status) {
				return Err(OrderStateError::InvalidTransition {
					from: order.order_status,
					to: new_status,
				});
			}
			let from = order.order_status;
			order.order_status = new_status;
			info!(order_id, %from, to = %new_status, "order status updated");
			Ok(order.clone())
		});

		match outcome {
			Ok(inner) => inner,
			Err(StorageError::NotFound) => Err(OrderStateError::OrderNotFound(order_id)),
			Err(e) => Err(OrderStateError::Storage(e.to_string())),
		}
	}
}
