//! Price calculation for the camellia order system.
//!
//! This crate is the single canonical path by which any unit price is
//! produced. Every order line in the system is built through
//! [`price_line`], which in turn derives its price from [`unit_price`];
//! no other code assigns a `unit_price`, so there is exactly one pricing
//! implementation to reason about and test.
//!
//! All arithmetic is exact decimal ([`rust_decimal::Decimal`]). Money
//! values must round-trip without cent-level drift, so binary floating
//! point is never used.

use camellia_types::{MenuItem, OrderItem};
use rust_decimal::Decimal;
use tracing::debug;

/// Derives the unit price of one order line from a menu item, the
/// customer's chosen option, and the attached note names.
///
/// Evaluation order:
/// 1. Base component: with no option (or a blank one after trimming) the
///    base price is used. A chosen option that matches a named option
///    REPLACES the base price. An unknown option name is not an error;
///    it degrades silently to the base price.
/// 2. Note component: each trimmed, non-empty note name that matches a
///    named note ADDS its surcharge. Unknown note names are skipped
///    silently.
///
/// Both permissive fallbacks are deliberate policy: a misspelled name
/// degrades the charge instead of rejecting the order. Duplicate note
/// names are each charged; callers that want set semantics must
/// deduplicate before calling.
pub fn unit_price(menu_item: &MenuItem, chosen_option: Option<&str>, note_names: &[String]) -> Decimal {
	let mut price = base_component(menu_item, chosen_option);

	for name in note_names {
		let trimmed = name.trim();
		if trimmed.is_empty() {
			continue;
		}
		match menu_item.notes.get(trimmed) {
			Some(surcharge) => {
				debug!(item_id = menu_item.item_id, note = trimmed, %surcharge, "note surcharge applied");
				price += *surcharge;
			}
			None => {
				debug!(item_id = menu_item.item_id, note = trimmed, "unknown note skipped");
			}
		}
	}

	price
}

/// Resolves the base component: the chosen option's price when it
/// matches, the item's base price otherwise.
fn base_component(menu_item: &MenuItem, chosen_option: Option<&str>) -> Decimal {
	let Some(option) = chosen_option.map(str::trim).filter(|s| !s.is_empty()) else {
		return menu_item.base_price;
	};

	match menu_item.options.get(option) {
		Some(option_price) => {
			debug!(item_id = menu_item.item_id, option, %option_price, "option price replaces base");
			*option_price
		}
		None => {
			debug!(item_id = menu_item.item_id, option, "unknown option, falling back to base price");
			menu_item.base_price
		}
	}
}

/// Builds a priced order line from a menu item.
///
/// Copies the priced fields (name, computed unit price) into the line so
/// the order is insulated from later menu edits. This is the only
/// constructor that produces a priced [`OrderItem`].
pub fn price_line(
	menu_item: &MenuItem,
	quantity: u32,
	customer_name: Option<String>,
	chosen_option: Option<String>,
	note_names: Vec<String>,
) -> OrderItem {
	let unit = unit_price(menu_item, chosen_option.as_deref(), &note_names);
	OrderItem {
		menu_item_id: menu_item.item_id,
		item_name: menu_item.item_name.clone(),
		quantity,
		customer_name,
		chosen_option,
		note_names,
		unit_price: unit,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rust_decimal_macros::dec;

	fn fried_rice() -> MenuItem {
		let mut item = MenuItem::new(1, "Fried Rice", dec!(8.99));
		item.add_option("Beef", dec!(9.99));
		item.add_option("Shrimp", dec!(10.99));
		item.add_note("Add rice", dec!(1.00));
		item.add_note("Extra spicy", dec!(0.50));
		item
	}

	#[test]
	fn test_no_option_no_notes_uses_base_price() {
		let item = fried_rice();
		assert_eq!(unit_price(&item, None, &[]), dec!(8.99));
	}

	#[test]
	fn test_option_replaces_base_price() {
		let item = fried_rice();
		// 9.99, not 8.99 + 9.99
		assert_eq!(unit_price(&item, Some("Beef"), &[]), dec!(9.99));
	}

	#[test]
	fn test_option_name_is_trimmed() {
		let item = fried_rice();
		assert_eq!(unit_price(&item, Some("  Beef  "), &[]), dec!(9.99));
	}

	#[test]
	fn test_blank_option_falls_back_to_base_price() {
		let item = fried_rice();
		assert_eq!(unit_price(&item, Some("   "), &[]), dec!(8.99));
		assert_eq!(unit_price(&item, Some(""), &[]), dec!(8.99));
	}

	#[test]
	fn test_unknown_option_degrades_to_base_price() {
		let item = fried_rice();
		assert_eq!(unit_price(&item, Some("Tofu"), &[]), dec!(8.99));
	}

	#[test]
	fn test_notes_add_on_top_of_base() {
		let item = fried_rice();
		let notes = vec!["Add rice".to_string()];
		assert_eq!(unit_price(&item, None, &notes), dec!(9.99));
	}

	#[test]
	fn test_notes_add_on_top_of_option() {
		let item = fried_rice();
		let notes = vec!["Add rice".to_string(), "Extra spicy".to_string()];
		assert_eq!(unit_price(&item, Some("Shrimp"), &notes), dec!(12.49));
	}

	#[test]
	fn test_unknown_note_is_skipped() {
		let item = fried_rice();
		let notes = vec!["No such note".to_string(), "Add rice".to_string()];
		assert_eq!(unit_price(&item, None, &notes), dec!(9.99));
	}

	#[test]
	fn test_blank_note_names_are_discarded() {
		let item = fried_rice();
		let notes = vec!["   ".to_string(), " Add rice ".to_string()];
		assert_eq!(unit_price(&item, None, &notes), dec!(9.99));
	}

	#[test]
	fn test_duplicate_notes_charge_each_occurrence() {
		// Duplicates are not deduplicated; each occurrence is charged.
		let item = fried_rice();
		let notes = vec!["Add rice".to_string(), "Add rice".to_string()];
		assert_eq!(unit_price(&item, None, &notes), dec!(10.99));
	}

	#[test]
	fn test_price_line_copies_frozen_fields() {
		let item = fried_rice();
		let line = price_line(
			&item,
			2,
			Some("Alice".to_string()),
			Some("Beef".to_string()),
			vec!["Add rice".to_string()],
		);
		assert_eq!(line.menu_item_id, 1);
		assert_eq!(line.item_name, "Fried Rice");
		assert_eq!(line.unit_price, dec!(10.99));
		assert_eq!(line.line_total(), dec!(21.98));
	}

	#[test]
	fn test_exact_decimal_arithmetic() {
		// 0.1 + 0.2 must be exactly 0.3 in price space.
		let mut item = MenuItem::new(2, "Tea", dec!(0.10));
		item.add_note("Honey", dec!(0.20));
		let notes = vec!["Honey".to_string()];
		assert_eq!(unit_price(&item, None, &notes), dec!(0.30));
	}
}
