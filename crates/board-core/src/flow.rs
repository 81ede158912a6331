//! Ordered fulfillment stage sequence.
//!
//! The stage sequence is injected into the board rather than inlined in
//! transition logic, so alternate workflows can be supported without
//! touching the transition rules.

use board_types::OrderStatus;

/// The ordered sequence of stages an order moves through.
///
/// Invariant: stages are unique and listed in forward order; the last
/// stage is the terminal one.
#[derive(Debug, Clone)]
pub struct StatusFlow {
	stages: Vec<OrderStatus>,
}

impl StatusFlow {
	/// Creates a flow from an ordered stage list.
	pub fn new(stages: Vec<OrderStatus>) -> Self {
		debug_assert!(!stages.is_empty());
		Self { stages }
	}

	/// The stages in sequence order.
	pub fn stages(&self) -> &[OrderStatus] {
		&self.stages
	}

	/// Position of a stage in this flow, if it belongs to it.
	pub fn index_of(&self, status: OrderStatus) -> Option<usize> {
		self.stages.iter().position(|s| *s == status)
	}

	/// The single next stage after the given one.
	///
	/// The terminal stage maps to itself, so a forward-only check on the
	/// result rejects the move as a no-op.
	pub fn next_after(&self, status: OrderStatus) -> OrderStatus {
		match self.index_of(status) {
			Some(idx) if idx + 1 < self.stages.len() => self.stages[idx + 1],
			_ => status,
		}
	}

	/// The final stage of the flow.
	pub fn terminal(&self) -> OrderStatus {
		*self.stages.last().expect("flow is never empty")
	}

	/// Whether moving from `from` to `to` is strictly forward in this flow.
	///
	/// A stage outside the flow is never a valid endpoint.
	pub fn is_forward(&self, from: OrderStatus, to: OrderStatus) -> bool {
		match (self.index_of(from), self.index_of(to)) {
			(Some(from_idx), Some(to_idx)) => to_idx > from_idx,
			_ => false,
		}
	}
}

impl Default for StatusFlow {
	/// The four-stage delivery flow of the restaurant console.
	fn default() -> Self {
		Self::new(vec![
			OrderStatus::AwaitingAcceptance,
			OrderStatus::InPreparation,
			OrderStatus::EnRoute,
			OrderStatus::Delivered,
		])
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_forward_moves_only() {
		let flow = StatusFlow::default();

		assert!(flow.is_forward(OrderStatus::AwaitingAcceptance, OrderStatus::InPreparation));
		assert!(flow.is_forward(OrderStatus::AwaitingAcceptance, OrderStatus::Delivered));
		assert!(!flow.is_forward(OrderStatus::InPreparation, OrderStatus::InPreparation));
		assert!(!flow.is_forward(OrderStatus::EnRoute, OrderStatus::AwaitingAcceptance));
	}

	#[test]
	fn test_next_after_terminal_is_itself() {
		let flow = StatusFlow::default();

		assert_eq!(
			flow.next_after(OrderStatus::EnRoute),
			OrderStatus::Delivered
		);
		assert_eq!(
			flow.next_after(OrderStatus::Delivered),
			OrderStatus::Delivered
		);
	}

	#[test]
	fn test_terminal_is_last_stage() {
		assert_eq!(StatusFlow::default().terminal(), OrderStatus::Delivered);
	}

	#[test]
	fn test_shorter_flow_keeps_transition_rules() {
		// A pickup-only workflow: no delivery leg.
		let flow = StatusFlow::new(vec![
			OrderStatus::AwaitingAcceptance,
			OrderStatus::InPreparation,
			OrderStatus::Delivered,
		]);

		assert_eq!(flow.terminal(), OrderStatus::Delivered);
		assert_eq!(
			flow.next_after(OrderStatus::InPreparation),
			OrderStatus::Delivered
		);
		// A stage outside the flow is never a valid endpoint.
		assert!(!flow.is_forward(OrderStatus::AwaitingAcceptance, OrderStatus::EnRoute));
	}
}
