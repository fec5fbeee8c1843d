//! Menu catalog types.
//!
//! A menu item carries a base price plus two named price maps: options,
//! which replace the base price when chosen, and notes, which add a
//! surcharge on top. All money values are exact decimals; binary floating
//! point is never used for prices.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single item on the menu.
///
/// Items are created once by catalog administration and identified by a
/// stable `item_id`. Options and notes may be added over time; the core
/// never deletes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
	/// Unique identifier, assigned at creation and immutable thereafter.
	pub item_id: u64,
	/// Display name, non-empty.
	pub item_name: String,
	/// Optional longer description.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub item_desc: Option<String>,
	/// Base price used when no option is chosen (or the chosen option is
	/// unknown). Non-negative.
	pub base_price: Decimal,
	/// Whether the item is currently sold out. Sold-out items remain
	/// visible and resolvable; refusing to order them is a caller-side
	/// guard, not a catalog concern.
	pub sold_out: bool,
	/// Optional picture URL for menu display.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub picture_url: Option<String>,
	/// Option name to replacement price. Choosing an option substitutes
	/// its price for the base price.
	#[serde(default)]
	pub options: HashMap<String, Decimal>,
	/// Note name to additive surcharge.
	#[serde(default)]
	pub notes: HashMap<String, Decimal>,
}

impl MenuItem {
	/// Creates a menu item with no options or notes.
	pub fn new(item_id: u64, item_name: impl Into<String>, base_price: Decimal) -> Self {
		Self {
			item_id,
			item_name: item_name.into(),
			item_desc: None,
			base_price,
			sold_out: false,
			picture_url: None,
			options: HashMap::new(),
			notes: HashMap::new(),
		}
	}

	/// Registers an option price. An existing option with the same name
	/// is overwritten.
	pub fn add_option(&mut self, name: impl Into<String>, price: Decimal) {
		self.options.insert(name.into(), price);
	}

	/// Registers a note surcharge. An existing note with the same name
	/// is overwritten.
	pub fn add_note(&mut self, name: impl Into<String>, price: Decimal) {
		self.notes.insert(name.into(), price);
	}
}
