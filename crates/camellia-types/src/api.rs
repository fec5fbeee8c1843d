//! API types for the camellia order system HTTP API.
//!
//! This module defines the request and response types for the order
//! system endpoints. Notes-on-wire normalization also lives here: a
//! line's notes may arrive either as one delimited `notesText` string or
//! as a `notes` array of free-form values, and both forms are reduced to
//! the ordered list of trimmed, non-empty note names the pricing code
//! consumes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request body for creating an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
	/// Table the order is placed from.
	pub table_id: String,
	/// Optional order-level note; informational only.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub note: Option<String>,
	/// Lines to order. Must not be empty.
	#[serde(default)]
	pub items: Vec<CreateOrderItem>,
}

/// A single requested line within a create-order request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderItem {
	/// Menu item to order. Required; a missing id is a client error.
	#[serde(default)]
	pub menu_item_id: Option<u64>,
	/// Quantity ordered; zero is accepted as a degenerate line.
	#[serde(default)]
	pub quantity: u32,
	/// Optional customer label for the line.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub customer_name: Option<String>,
	/// Chosen option name, if any.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub chosen_option: Option<String>,
	/// Multi-select notes: strings or objects carrying a
	/// `label`/`name`/`value` key.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub notes: Option<Vec<Value>>,
	/// Alternative single-string form, comma delimited. Takes precedence
	/// over `notes` when both are present.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub notes_text: Option<String>,
}

impl CreateOrderItem {
	/// Normalizes whichever notes form arrived into trimmed, non-empty
	/// note names, preserving client order.
	pub fn normalized_notes(&self) -> Vec<String> {
		if let Some(text) = &self.notes_text {
			if !text.trim().is_empty() {
				return text
					.split(',')
					.map(str::trim)
					.filter(|s| !s.is_empty())
					.map(str::to_string)
					.collect();
			}
		}

		let Some(values) = &self.notes else {
			return Vec::new();
		};

		values
			.iter()
			.filter_map(|value| {
				let raw = match value {
					Value::String(s) => s.clone(),
					Value::Object(map) => map
						.get("label")
						.or_else(|| map.get("name"))
						.or_else(|| map.get("value"))
						.map(|v| match v {
							Value::String(s) => s.clone(),
							other => other.to_string(),
						})
						.unwrap_or_else(|| value.to_string()),
					Value::Null => return None,
					other => other.to_string(),
				};
				let trimmed = raw.trim().to_string();
				(!trimmed.is_empty()).then_some(trimmed)
			})
			.collect()
	}
}

/// Request body for updating an order's status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
	/// The requested new status. Absence is a client error, distinct
	/// from an unrecognized value.
	#[serde(default)]
	pub status: Option<String>,
}

/// API error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
	/// Machine-readable error code.
	pub error: String,
	/// Human-readable description.
	pub message: String,
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	fn item_with(notes: Option<Value>, notes_text: Option<&str>) -> CreateOrderItem {
		CreateOrderItem {
			menu_item_id: Some(1),
			quantity: 1,
			customer_name: None,
			chosen_option: None,
			notes: notes.map(|v| v.as_array().unwrap().clone()),
			notes_text: notes_text.map(str::to_string),
		}
	}

	#[test]
	fn test_notes_text_is_split_and_trimmed() {
		let item = item_with(None, Some(" Add rice ,  , Extra spicy"));
		assert_eq!(item.normalized_notes(), vec!["Add rice", "Extra spicy"]);
	}

	#[test]
	fn test_notes_array_of_strings() {
		let item = item_with(Some(json!(["Add rice", "  ", " No onion "])), None);
		assert_eq!(item.normalized_notes(), vec!["Add rice", "No onion"]);
	}

	#[test]
	fn test_notes_array_of_labeled_objects() {
		let item = item_with(
			Some(json!([
				{"label": "Add rice"},
				{"name": "No onion"},
				{"value": "Extra spicy"}
			])),
			None,
		);
		assert_eq!(
			item.normalized_notes(),
			vec!["Add rice", "No onion", "Extra spicy"]
		);
	}

	#[test]
	fn test_notes_text_takes_precedence_over_array() {
		let item = item_with(Some(json!(["from array"])), Some("from text"));
		assert_eq!(item.normalized_notes(), vec!["from text"]);
	}

	#[test]
	fn test_blank_notes_text_falls_back_to_array() {
		let item = item_with(Some(json!(["from array"])), Some("   "));
		assert_eq!(item.normalized_notes(), vec!["from array"]);
	}

	#[test]
	fn test_no_notes_normalizes_to_empty() {
		let item = item_with(None, None);
		assert!(item.normalized_notes().is_empty());
	}

	#[test]
	fn test_create_order_request_deserializes_camel_case() {
		let req: CreateOrderRequest = serde_json::from_value(json!({
			"tableId": "T1",
			"items": [{"menuItemId": 3, "quantity": 2, "chosenOption": "Beef"}]
		}))
		.unwrap();
		assert_eq!(req.table_id, "T1");
		assert_eq!(req.items[0].menu_item_id, Some(3));
		assert_eq!(req.items[0].quantity, 2);
		assert_eq!(req.items[0].chosen_option.as_deref(), Some("Beef"));
	}

	#[test]
	fn test_update_status_request_distinguishes_missing_field() {
		let absent: UpdateStatusRequest = serde_json::from_value(json!({})).unwrap();
		assert!(absent.status.is_none());

		let present: UpdateStatusRequest =
			serde_json::from_value(json!({"status": "ACCEPTED"})).unwrap();
		assert_eq!(present.status.as_deref(), Some("ACCEPTED"));
	}
}
