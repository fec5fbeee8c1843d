//! Order service orchestration.
//!
//! The service owns the end-to-end order operations the transport adapter
//! exposes: creating an order from a request against the catalog, listing
//! orders, applying status updates through the state machine, and
//! projecting the menu. All pricing flows through the pricing crate's
//! single calculator; no path here assigns a unit price by hand.

use crate::state::{OrderStateError, OrderStateMachine};
use camellia_storage::{MenuCatalog, OrderStore, StorageError};
use camellia_types::{CreateOrderRequest, InvalidStatusError, MenuItem, Order, OrderStatus};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Errors returned by the order service.
///
/// Every failure is a typed outcome for the adapter to translate; the
/// only silently absorbed cases are the two documented permissive
/// pricing fallbacks (unknown option or note name).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OrderServiceError {
	#[error("Order items cannot be empty")]
	EmptyItemList,
	#[error("menuItemId is required for each order item")]
	InvalidItem,
	#[error("Menu item not found: {0}")]
	MenuItemNotFound(u64),
	#[error("Missing required field: status")]
	MissingField,
	#[error(transparent)]
	InvalidStatus(#[from] InvalidStatusError),
	#[error("Order not found: {0}")]
	OrderNotFound(u64),
	#[error("Invalid state transition from {from} to {to}")]
	InvalidTransition { from: OrderStatus, to: OrderStatus },
	#[error("Duplicate order id: {0}")]
	DuplicateId(u64),
	#[error("Storage error: {0}")]
	Storage(String),
}

impl From<OrderStateError> for OrderServiceError {
	fn from(err: OrderStateError) -> Self {
		match err {
			OrderStateError::OrderNotFound(id) => OrderServiceError::OrderNotFound(id),
			OrderStateError::InvalidTransition { from, to } => {
				OrderServiceError::InvalidTransition { from, to }
			}
			OrderStateError::Storage(msg) => OrderServiceError::Storage(msg),
		}
	}
}

/// Coordinates the catalog, pricing, and order store.
pub struct OrderService {
	catalog: Arc<MenuCatalog>,
	store: Arc<OrderStore>,
	state_machine: OrderStateMachine,
}

impl OrderService {
	pub fn new(catalog: Arc<MenuCatalog>, store: Arc<OrderStore>) -> Self {
		let state_machine = OrderStateMachine::new(Arc::clone(&store));
		Self {
			catalog,
			store,
			state_machine,
		}
	}

	/// Creates an order from a validated request.
	///
	/// Every line is resolved against the catalog and priced through the
	/// canonical calculator; the priced fields are copied into the line
	/// so later menu edits never change this order. The order is stored
	/// in status NEW with the total maintained incrementally.
	pub fn create_order(&self, req: &CreateOrderRequest) -> Result<Order, OrderServiceError> {
		if req.items.is_empty() {
			warn!(table_id = %req.table_id, "rejecting order with no items");
			return Err(OrderServiceError::EmptyItemList);
		}

		let order_id = self.store.next_order_id();
		let mut order = Order::new(order_id, req.table_id.clone());

		for item in &req.items {
			let menu_item_id = item.menu_item_id.ok_or(OrderServiceError::InvalidItem)?;
			let menu_item = self
				.catalog
				.lookup(menu_item_id)
				.map_err(|_| OrderServiceError::MenuItemNotFound(menu_item_id))?;

			let line = camellia_pricing::price_line(
				&menu_item,
				item.quantity,
				item.customer_name.clone(),
				item.chosen_option.clone(),
				item.normalized_notes(),
			);
			info!(
				order_id,
				menu_item_id,
				quantity = item.quantity,
				unit_price = %line.unit_price,
				"order line priced"
			);
			order.push_line(line);
		}

		self.store.insert(order.clone()).map_err(|e| match e {
			StorageError::DuplicateId(id) => OrderServiceError::DuplicateId(id),
			other => OrderServiceError::Storage(other.to_string()),
		})?;

		info!(order_id, table_id = %order.table_id, total = %order.total_price, "order created");
		Ok(order)
	}

	/// Returns all orders, oldest id first.
	pub fn all_orders(&self) -> Vec<Order> {
		self.store.get_all()
	}

	/// Returns one order by id.
	pub fn get_order(&self, order_id: u64) -> Result<Order, OrderServiceError> {
		self.store
			.get(order_id)
			.map_err(|_| OrderServiceError::OrderNotFound(order_id))
	}

	/// Applies a status update requested as a raw wire string.
	///
	/// Absence of the field, an unrecognized value, an unknown order,
	/// and a disallowed edge are each distinct failures.
	pub fn update_status(
		&self,
		order_id: u64,
		status: Option<&str>,
	) -> Result<Order, OrderServiceError> {
		let status = status.ok_or(OrderServiceError::MissingField)?;
		let new_status: OrderStatus = status.parse()?;
		let order = self
			.state_machine
			.transition_order_status(order_id, new_status)?;
		Ok(order)
	}

	/// Read-only projection of the full menu.
	pub fn menu(&self) -> Vec<MenuItem> {
		self.catalog.list()
	}
}
