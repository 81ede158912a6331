//! Order record and fulfillment stage types.
//!
//! This module defines the customer order as it travels through the
//! restaurant's fulfillment pipeline, together with the fixed ordered
//! sequence of stages the board moves it through.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier type for orders, assigned by the backend repository.
pub type OrderId = i64;

/// Represents one customer order tracked by the restaurant.
///
/// Orders are created and deleted by external systems; the board only reads
/// the full list and writes single-field status updates. All fields except
/// `status` are informational and passed through verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
	/// Unique identifier, assigned by the repository, immutable.
	pub id: OrderId,
	/// Display label for the order.
	pub order_name: String,
	/// Order timestamp as reported by the backend. Informational only.
	pub date: String,
	/// Payment method label. Informational only.
	pub payment: String,
	/// Free-text customer comment. Informational only.
	pub comment: String,
	/// Current fulfillment stage. The only field the board mutates.
	pub status: OrderStatus,
}

/// Fulfillment stage of an order on the status board.
///
/// The variants form a fixed ordered sequence; an order's stage index may
/// only increase. Wire labels match the backend API, which speaks the
/// Portuguese column names of the original console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
	/// Order has arrived and is waiting for the restaurant to accept it.
	#[serde(rename = "Esperando Aceitação")]
	AwaitingAcceptance,
	/// Order has been accepted and the kitchen is preparing it.
	#[serde(rename = "Em Preparo")]
	InPreparation,
	/// Order has left the restaurant and is out for delivery.
	#[serde(rename = "Em Rota")]
	EnRoute,
	/// Order has been delivered. Terminal stage.
	#[serde(rename = "Entregue")]
	Delivered,
}

impl OrderStatus {
	/// Position of this stage in the fixed sequence, starting at zero.
	pub fn ordinal(&self) -> usize {
		match self {
			OrderStatus::AwaitingAcceptance => 0,
			OrderStatus::InPreparation => 1,
			OrderStatus::EnRoute => 2,
			OrderStatus::Delivered => 3,
		}
	}

	/// Whether this is the final stage of the sequence.
	pub fn is_terminal(&self) -> bool {
		matches!(self, OrderStatus::Delivered)
	}

	/// The wire label used by the backend API and the column headers.
	pub fn label(&self) -> &'static str {
		match self {
			OrderStatus::AwaitingAcceptance => "Esperando Aceitação",
			OrderStatus::InPreparation => "Em Preparo",
			OrderStatus::EnRoute => "Em Rota",
			OrderStatus::Delivered => "Entregue",
		}
	}
}

impl fmt::Display for OrderStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.label())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn ordinals_follow_the_sequence() {
		assert_eq!(OrderStatus::AwaitingAcceptance.ordinal(), 0);
		assert_eq!(OrderStatus::InPreparation.ordinal(), 1);
		assert_eq!(OrderStatus::EnRoute.ordinal(), 2);
		assert_eq!(OrderStatus::Delivered.ordinal(), 3);
	}

	#[test]
	fn only_delivered_is_terminal() {
		assert!(OrderStatus::Delivered.is_terminal());
		assert!(!OrderStatus::AwaitingAcceptance.is_terminal());
		assert!(!OrderStatus::InPreparation.is_terminal());
		assert!(!OrderStatus::EnRoute.is_terminal());
	}

	#[test]
	fn status_serializes_to_wire_labels() {
		let json = serde_json::to_string(&OrderStatus::AwaitingAcceptance).unwrap();
		assert_eq!(json, "\"Esperando Aceitação\"");

		let status: OrderStatus = serde_json::from_str("\"Em Rota\"").unwrap();
		assert_eq!(status, OrderStatus::EnRoute);
	}

	#[test]
	fn order_round_trips_camel_case_wire_format() {
		let body = r#"{
			"id": 3,
			"orderName": "Pedido 3",
			"date": "2024-05-10 19:32",
			"payment": "Cartão de Crédito",
			"comment": "Sem cebola",
			"status": "Em Preparo"
		}"#;

		let order: Order = serde_json::from_str(body).unwrap();
		assert_eq!(order.id, 3);
		assert_eq!(order.order_name, "Pedido 3");
		assert_eq!(order.status, OrderStatus::InPreparation);

		let json = serde_json::to_value(&order).unwrap();
		assert_eq!(json["orderName"], "Pedido 3");
		assert_eq!(json["status"], "Em Preparo");
	}
}
