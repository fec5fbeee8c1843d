//! Core orchestration for the camellia order system.
//!
//! This crate ties the catalog, pricing, and order store together: it
//! validates creation requests, prices every line through the canonical
//! calculator, and guards status changes behind the order state machine.

/// Order service orchestrating creation, listing, and status updates.
pub mod service;
/// Order status state machine.
pub mod state;

pub use service::{OrderService, OrderServiceError};
pub use state::{is_valid_transition, OrderStateError, OrderStateMachine};
