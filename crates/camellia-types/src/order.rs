//! Order types for the camellia order system.
//!
//! This module defines the order aggregate, its line items, and the order
//! status lifecycle. An order owns its lines exclusively; after creation
//! the only permitted mutation is a status transition, so the line prices
//! captured at creation time are final.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Status of an order in the system.
///
/// Transition validation lives in the core's state machine; this type
/// only defines the value set and its wire representation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
	/// Order has been placed and is awaiting kitchen acceptance.
	New,
	/// Order has been accepted by staff.
	Accepted,
	/// Order is prepared and ready for pickup or delivery to the table.
	Ready,
	/// Order has been delivered; terminal.
	Completed,
	/// Order was cancelled before completion; terminal.
	Cancelled,
}

impl OrderStatus {
	/// Returns true for states with no outgoing transitions.
	pub fn is_terminal(&self) -> bool {
		matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
	}
}

impl fmt::Display for OrderStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			OrderStatus::New => write!(f, "NEW"),
			OrderStatus::Accepted => write!(f, "ACCEPTED"),
			OrderStatus::Ready => write!(f, "READY"),
			OrderStatus::Completed => write!(f, "COMPLETED"),
			OrderStatus::Cancelled => write!(f, "CANCELLED"),
		}
	}
}

/// Error returned when a status string is outside the recognized set.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Invalid order status: {0}")]
pub struct InvalidStatusError(pub String);

impl FromStr for OrderStatus {
	type Err = InvalidStatusError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"NEW" => Ok(OrderStatus::New),
			"ACCEPTED" => Ok(OrderStatus::Accepted),
			"READY" => Ok(OrderStatus::Ready),
			"COMPLETED" => Ok(OrderStatus::Completed),
			"CANCELLED" => Ok(OrderStatus::Cancelled),
			other => Err(InvalidStatusError(other.to_string())),
		}
	}
}

/// A single line of an order.
///
/// The line copies the priced fields out of the menu item at creation
/// time rather than holding a live reference, so a later menu edit never
/// changes what the customer was charged. `unit_price` is computed once
/// by the pricing crate and persisted with the line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
	/// Identifier of the menu item this line was priced from.
	pub menu_item_id: u64,
	/// Menu item name, frozen at creation time.
	pub item_name: String,
	/// Quantity ordered. Zero is a valid degenerate line contributing
	/// zero to the total.
	pub quantity: u32,
	/// Optional label for whom the line is for; no pricing effect.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub customer_name: Option<String>,
	/// Option name the customer chose, if any.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub chosen_option: Option<String>,
	/// Note names attached to this line, already trimmed and non-empty.
	#[serde(default)]
	pub note_names: Vec<String>,
	/// Unit price computed at creation, never recomputed.
	pub unit_price: Decimal,
}

impl OrderItem {
	/// The line's contribution to the order total.
	pub fn line_total(&self) -> Decimal {
		self.unit_price * Decimal::from(self.quantity)
	}
}

/// An order placed against the menu.
///
/// Invariant: `total_price` always equals the sum of `line_total()` over
/// `order_items`. The total is maintained incrementally by
/// [`Order::push_line`] / [`Order::remove_line`]; `recompute_total`
/// provides the from-scratch value the incremental bookkeeping must
/// always agree with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
	/// Unique identifier, assigned at creation, never reused within a
	/// process lifetime.
	pub order_id: u64,
	/// Table the order was placed from, non-empty.
	pub table_id: String,
	/// Line items, in the order the client supplied them.
	pub order_items: Vec<OrderItem>,
	/// Sum of unit price times quantity across all lines.
	pub total_price: Decimal,
	/// Current lifecycle status.
	pub order_status: OrderStatus,
	/// Set exactly once at creation, never updated.
	pub created_at: DateTime<Utc>,
}

impl Order {
	/// Creates an empty order in status `NEW` with a zero total.
	pub fn new(order_id: u64, table_id: impl Into<String>) -> Self {
		Self {
			order_id,
			table_id: table_id.into(),
			order_items: Vec::new(),
			total_price: Decimal::ZERO,
			order_status: OrderStatus::New,
			created_at: Utc::now(),
		}
	}

	/// Appends a priced line and increments the total by its
	/// contribution.
	pub fn push_line(&mut self, item: OrderItem) {
		self.total_price += item.line_total();
		self.order_items.push(item);
	}

	/// Removes the first line matching the menu item id and quantity,
	/// decrementing the total by the same frozen contribution that was
	/// added. The current menu price is never consulted.
	pub fn remove_line(&mut self, menu_item_id: u64, quantity: u32) -> Option<OrderItem> {
		let pos = self
			.order_items
			.iter()
			.position(|it| it.menu_item_id == menu_item_id && it.quantity == quantity)?;
		let item = self.order_items.remove(pos);
		self.total_price -= item.line_total();
		Some(item)
	}

	/// Recomputes the total from scratch across all lines.
	///
	/// Must always equal `total_price`; the equivalence of this bulk
	/// path with the incremental bookkeeping is pinned by tests.
	pub fn recompute_total(&self) -> Decimal {
		self.order_items.iter().map(|it| it.line_total()).sum()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rust_decimal_macros::dec;

	fn line(menu_item_id: u64, unit_price: Decimal, quantity: u32) -> OrderItem {
		OrderItem {
			menu_item_id,
			item_name: format!("item-{}", menu_item_id),
			quantity,
			customer_name: None,
			chosen_option: None,
			note_names: vec![],
			unit_price,
		}
	}

	#[test]
	fn test_status_round_trip() {
		for s in ["NEW", "ACCEPTED", "READY", "COMPLETED", "CANCELLED"] {
			let status: OrderStatus = s.parse().unwrap();
			assert_eq!(status.to_string(), s);
		}
	}

	#[test]
	fn test_status_rejects_unknown_value() {
		let err = "BOGUS".parse::<OrderStatus>().unwrap_err();
		assert_eq!(err, InvalidStatusError("BOGUS".to_string()));
		// Parsing is case sensitive, matching the wire format exactly.
		assert!("new".parse::<OrderStatus>().is_err());
	}

	#[test]
	fn test_only_completed_and_cancelled_are_terminal() {
		assert!(OrderStatus::Completed.is_terminal());
		assert!(OrderStatus::Cancelled.is_terminal());
		assert!(!OrderStatus::New.is_terminal());
		assert!(!OrderStatus::Accepted.is_terminal());
		assert!(!OrderStatus::Ready.is_terminal());
	}

	#[test]
	fn test_new_order_is_empty() {
		let order = Order::new(1, "T1");
		assert_eq!(order.order_status, OrderStatus::New);
		assert_eq!(order.total_price, Decimal::ZERO);
		assert!(order.order_items.is_empty());
	}

	#[test]
	fn test_push_line_increments_total() {
		let mut order = Order::new(1, "T1");
		order.push_line(line(10, dec!(8.99), 3));
		order.push_line(line(11, dec!(12.99), 2));
		assert_eq!(order.total_price, dec!(52.95));
		assert_eq!(order.recompute_total(), order.total_price);
	}

	#[test]
	fn test_zero_quantity_line_contributes_nothing() {
		let mut order = Order::new(1, "T1");
		order.push_line(line(10, dec!(8.99), 0));
		assert_eq!(order.total_price, Decimal::ZERO);
		assert_eq!(order.order_items.len(), 1);
	}

	#[test]
	fn test_remove_line_uses_frozen_price() {
		let mut order = Order::new(1, "T1");
		order.push_line(line(10, dec!(8.99), 2));
		order.push_line(line(11, dec!(12.99), 1));

		let removed = order.remove_line(10, 2).unwrap();
		assert_eq!(removed.unit_price, dec!(8.99));
		assert_eq!(order.total_price, dec!(12.99));
		assert_eq!(order.recompute_total(), order.total_price);

		// No match on quantity leaves the order untouched.
		assert!(order.remove_line(11, 5).is_none());
		assert_eq!(order.total_price, dec!(12.99));
	}

	#[test]
	fn test_status_serializes_upper_case() {
		let json = serde_json::to_string(&OrderStatus::Accepted).unwrap();
		assert_eq!(json, "\"ACCEPTED\"");
	}
}
