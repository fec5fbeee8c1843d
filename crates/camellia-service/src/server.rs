//! HTTP server for the camellia order system API.
//!
//! This module provides the transport adapter over the core order
//! service: routing, request/response marshaling, and the mapping from
//! typed core errors to HTTP status codes. The core itself never sees
//! transport concerns; it accepts and returns plain domain values.

use axum::{
	extract::{Path, State},
	http::StatusCode,
	response::Json,
	routing::{get, patch, post},
	Router,
};
use camellia_config::ServerConfig;
use camellia_core::{OrderService, OrderServiceError};
use camellia_types::{
	CreateOrderRequest, ErrorResponse, MenuItem, Order, UpdateStatusRequest,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

/// Shared application state for the API server.
#[derive(Clone)]
pub struct AppState {
	/// Reference to the order service for processing requests.
	pub service: Arc<OrderService>,
}

/// Starts the HTTP server for the API.
pub async fn start_server(
	server_config: &ServerConfig,
	service: Arc<OrderService>,
) -> Result<(), Box<dyn std::error::Error>> {
	let app_state = AppState { service };

	let app = Router::new()
		.nest(
			"/api",
			Router::new()
				.route("/orders", post(handle_create_order))
				.route("/orders/{id}/status", patch(handle_update_status))
				.route("/all_orders", get(handle_all_orders))
				.route("/menu", get(handle_menu)),
		)
		.layer(ServiceBuilder::new().layer(CorsLayer::permissive()))
		.with_state(app_state);

	let bind_address = format!("{}:{}", server_config.host, server_config.port);
	let listener = TcpListener::bind(&bind_address).await?;

	tracing::info!("camellia API server starting on {}", bind_address);

	axum::serve(listener, app).await?;

	Ok(())
}

/// Handles POST /api/orders requests.
async fn handle_create_order(
	State(state): State<AppState>,
	Json(request): Json<CreateOrderRequest>,
) -> Result<Json<Order>, (StatusCode, Json<ErrorResponse>)> {
	match state.service.create_order(&request) {
		Ok(order) => Ok(Json(order)),
		Err(e) => {
			tracing::warn!("Order creation failed: {}", e);
			Err(error_response(e))
		}
	}
}

/// Handles PATCH /api/orders/{id}/status requests.
async fn handle_update_status(
	State(state): State<AppState>,
	Path(id): Path<u64>,
	Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<Order>, (StatusCode, Json<ErrorResponse>)> {
	match state.service.update_status(id, request.status.as_deref()) {
		Ok(order) => Ok(Json(order)),
		Err(e) => {
			tracing::warn!("Status update for order {} failed: {}", id, e);
			Err(error_response(e))
		}
	}
}

/// Handles GET /api/all_orders requests.
async fn handle_all_orders(State(state): State<AppState>) -> Json<Vec<Order>> {
	Json(state.service.all_orders())
}

/// Handles GET /api/menu requests.
async fn handle_menu(State(state): State<AppState>) -> Json<Vec<MenuItem>> {
	Json(state.service.menu())
}

/// Maps a core error to an HTTP status and machine-readable error code.
///
/// Validation failures are 400s (an unknown menu item in a creation
/// request counts as a client error, not a 404), an unknown order is a
/// 404, and a disallowed status edge is a 409.
fn error_response(e: OrderServiceError) -> (StatusCode, Json<ErrorResponse>) {
	let (status_code, error_code) = match &e {
		OrderServiceError::EmptyItemList => (StatusCode::BAD_REQUEST, "EMPTY_ITEM_LIST"),
		OrderServiceError::InvalidItem => (StatusCode::BAD_REQUEST, "INVALID_ITEM"),
		OrderServiceError::MenuItemNotFound(_) => (StatusCode::BAD_REQUEST, "MENU_ITEM_NOT_FOUND"),
		OrderServiceError::MissingField => (StatusCode::BAD_REQUEST, "MISSING_FIELD"),
		OrderServiceError::InvalidStatus(_) => (StatusCode::BAD_REQUEST, "INVALID_STATUS"),
		OrderServiceError::OrderNotFound(_) => (StatusCode::NOT_FOUND, "ORDER_NOT_FOUND"),
		OrderServiceError::InvalidTransition { .. } => (StatusCode::CONFLICT, "INVALID_TRANSITION"),
		OrderServiceError::DuplicateId(_) | OrderServiceError::Storage(_) => {
			(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
		}
	};

	(
		status_code,
		Json(ErrorResponse {
			error: error_code.to_string(),
			message: e.to_string(),
		}),
	)
}
