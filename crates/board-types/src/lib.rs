//! Common types module for the order board system.
//!
//! This module defines the core data types and structures shared by the
//! board crates. It provides a centralized location for shared types to
//! ensure consistency across all board components.

/// API types for HTTP endpoints and request/response structures.
pub mod api;
/// Event types for board-to-presentation communication.
pub mod events;
/// Order record and fulfillment stage types.
pub mod order;
/// Registry trait for self-registering implementations.
pub mod registry;
/// Configuration validation types for ensuring type-safe configurations.
pub mod validation;

// Re-export all types for convenient access
pub use api::*;
pub use events::*;
pub use order::*;
pub use registry::*;
pub use validation::*;
