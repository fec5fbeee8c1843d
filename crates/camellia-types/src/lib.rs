//! Common types module for the camellia order system.
//!
//! This module defines the core data types and structures used throughout
//! the order system. It provides a centralized location for shared types
//! to ensure consistency across all components.

/// API types for HTTP endpoints and request/response structures.
pub mod api;
/// Menu catalog types: items, options, and note surcharges.
pub mod menu;
/// Order types: order aggregate, order lines, and status lifecycle.
pub mod order;

// Re-export all types for convenient access
pub use api::*;
pub use menu::*;
pub use order::*;
