//! API types for HTTP endpoints and request/response structures.
//!
//! These are the payloads exchanged with the presentation layer. The board
//! itself never constructs HTTP responses; the service crate maps board
//! outcomes onto these types.

use crate::{Order, OrderStatus};
use serde::{Deserialize, Serialize};

/// One kanban column: a fulfillment stage and the orders currently in it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnView {
	/// Stage this column represents.
	pub status: OrderStatus,
	/// Column header label shown to the user.
	pub label: String,
	/// Orders currently in this stage, in collection order.
	pub orders: Vec<Order>,
}

/// The whole board, one column per stage in sequence order.
///
/// Derived from the order collection on every request, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardView {
	pub columns: Vec<ColumnView>,
}

/// Request body for the drop-on-column gesture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DropRequest {
	/// Stage of the column the dragged card was dropped on.
	pub target: OrderStatus,
}

/// Error payload for transport-level API failures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
	/// Machine-readable error code.
	pub error: String,
	/// Human-readable description.
	pub message: String,
}
