//! Order board state machine.
//!
//! Maintains the in-memory collection of orders grouped into ordered
//! status columns, accepts the two gesture inputs (drag-and-drop and
//! double-click), enforces forward-only movement, and gates the terminal
//! stage behind an explicit confirmation. Both gestures funnel into
//! `propose_transition`, so the transition rules exist exactly once.

use crate::event_bus::EventBus;
use crate::flow::StatusFlow;
use crate::BoardError;
use board_repository::RepositoryInterface;
use board_types::{BoardEvent, BoardView, ColumnView, Notification, Order, OrderEvent, OrderId, OrderStatus};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Toast shown when the order list cannot be fetched.
const MSG_LOAD_FAILED: &str = "Erro ao carregar pedidos";
/// Toast shown when a status update is rejected by the backend.
const MSG_UPDATE_FAILED: &str = "Erro ao atualizar status do pedido";
/// Toast shown when a gesture proposes a non-forward move.
const MSG_INVALID_MOVE: &str = "Movimento inválido: só é permitido mover para a direita.";
/// Toast shown when a gesture lands on an order whose update is in flight.
const MSG_IN_FLIGHT: &str = "Aguarde: o pedido ainda está sendo atualizado.";

/// A terminal-stage transition waiting for the user's confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PendingTransition {
	pub order_id: OrderId,
	pub target: OrderStatus,
}

/// Why a proposed move was turned down without touching the repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveRejection {
	/// No order with the proposed id is on the board.
	UnknownOrder,
	/// The target stage is not strictly forward of the current one.
	NotForward,
	/// The order already has an unresolved repository update.
	InFlight,
	/// A drop arrived with no drag in progress.
	NoActiveDrag,
	/// Confirm or cancel arrived with no pending transition.
	NothingPending,
}

/// Answer of the board to a gesture.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TransitionOutcome {
	/// The repository accepted the transition and the board was patched.
	Applied { order: Order },
	/// The target is the terminal stage; waiting for user confirmation.
	ConfirmationRequired {
		order_id: OrderId,
		target: OrderStatus,
	},
	/// The move was rejected locally; no repository call was made.
	Rejected { reason: MoveRejection },
	/// The repository rejected or failed the update; the board is unchanged.
	Failed { message: String },
}

/// Mutable board state, owned by the board behind one lock.
#[derive(Debug, Default)]
struct BoardState {
	/// Orders as last fetched or locally patched.
	orders: Vec<Order>,
	/// At most one order whose detail panel is open.
	expanded_order_id: Option<OrderId>,
	/// Terminal-stage transition awaiting confirmation.
	pending_transition: Option<PendingTransition>,
	/// Set for the duration of a drag gesture.
	dragged_order_id: Option<OrderId>,
	/// Orders with an unresolved repository update.
	in_flight: HashSet<OrderId>,
}

/// Result of screening a proposal under the state lock.
enum Screened {
	/// The proposal was answered without a repository call.
	Answered(TransitionOutcome),
	/// The proposal passed the rules; the order is marked in flight.
	Commit { from: OrderStatus },
}

/// The order status board.
///
/// Shared as `Arc<OrderBoard>`; all operations take `&self` and serialize
/// state access through an internal lock. Repository calls happen outside
/// the lock so the board stays responsive while an update is in flight.
pub struct OrderBoard {
	repository: Arc<dyn RepositoryInterface>,
	flow: StatusFlow,
	event_bus: EventBus,
	state: RwLock<BoardState>,
}

impl OrderBoard {
	/// Creates a board over the given repository and stage flow.
	pub fn new(
		repository: Arc<dyn RepositoryInterface>,
		flow: StatusFlow,
		event_bus: EventBus,
	) -> Self {
		Self {
			repository,
			flow,
			event_bus,
			state: RwLock::new(BoardState::default()),
		}
	}

	/// The event bus this board publishes on.
	pub fn event_bus(&self) -> &EventBus {
		&self.event_bus
	}

	/// The stage flow this board enforces.
	pub fn flow(&self) -> &StatusFlow {
		&self.flow
	}

	/// Fetches the full order list and replaces the local collection
	/// wholesale.
	///
	/// On failure the previous collection is kept (empty on first load)
	/// and a failure notification is published.
	pub async fn load(&self) -> Result<usize, BoardError> {
		match self.repository.list().await {
			Ok(orders) => {
				let count = orders.len();
				let mut state = self.state.write().await;
				state.orders = orders;
				self.event_bus
					.publish(BoardEvent::Order(OrderEvent::Loaded { count }))
					.ok();
				Ok(count)
			},
			Err(e) => {
				warn!(error = %e, "Failed to load orders");
				self.notify(Notification::error(MSG_LOAD_FAILED));
				Err(e.into())
			},
		}
	}

	/// Snapshot of the current order collection.
	pub async fn orders(&self) -> Vec<Order> {
		self.state.read().await.orders.clone()
	}

	/// The order whose detail panel is currently open, if any.
	pub async fn expanded_order_id(&self) -> Option<OrderId> {
		self.state.read().await.expanded_order_id
	}

	/// The terminal-stage transition awaiting confirmation, if any.
	pub async fn pending_transition(&self) -> Option<PendingTransition> {
		self.state.read().await.pending_transition
	}

	/// Groups the cached orders into one column per flow stage.
	///
	/// Derived on every call, never stored.
	pub async fn view(&self) -> BoardView {
		let state = self.state.read().await;
		let columns = self
			.flow
			.stages()
			.iter()
			.map(|stage| ColumnView {
				status: *stage,
				label: stage.label().to_string(),
				orders: state
					.orders
					.iter()
					.filter(|o| o.status == *stage)
					.cloned()
					.collect(),
			})
			.collect();
		BoardView { columns }
	}

	/// Toggles the detail panel for an order: collapse if already
	/// expanded, else expand it (collapsing any other).
	///
	/// Returns the id now expanded, if any.
	pub async fn toggle_expand(&self, order_id: OrderId) -> Option<OrderId> {
		let mut state = self.state.write().await;
		state.expanded_order_id = if state.expanded_order_id == Some(order_id) {
			None
		} else {
			Some(order_id)
		};
		state.expanded_order_id
	}

	/// Records the start of a drag gesture. Validation happens at drop.
	pub async fn begin_drag(&self, order_id: OrderId) {
		let mut state = self.state.write().await;
		state.dragged_order_id = Some(order_id);
	}

	/// Drop adapter: proposes moving the dragged order to the column it
	/// was dropped on. The drag bookkeeping is cleared either way.
	pub async fn drop_on_column(&self, target: OrderStatus) -> TransitionOutcome {
		let dragged = {
			let mut state = self.state.write().await;
			state.dragged_order_id.take()
		};

		match dragged {
			Some(order_id) => self.propose_transition(order_id, target).await,
			None => {
				debug!("Drop received with no drag in progress");
				TransitionOutcome::Rejected {
					reason: MoveRejection::NoActiveDrag,
				}
			},
		}
	}

	/// Double-click adapter: proposes the single next stage after the
	/// order's current one. At the terminal stage the next stage equals
	/// the current stage, so the forward-only check rejects the move.
	pub async fn advance_by_double_click(&self, order_id: OrderId) -> TransitionOutcome {
		let current = {
			let state = self.state.read().await;
			state.orders.iter().find(|o| o.id == order_id).map(|o| o.status)
		};

		match current {
			Some(status) => {
				let next = self.flow.next_after(status);
				self.propose_transition(order_id, next).await
			},
			None => {
				warn!(order_id, "Double-click on unknown order");
				TransitionOutcome::Rejected {
					reason: MoveRejection::UnknownOrder,
				}
			},
		}
	}

	/// Single entry point for both gestures.
	///
	/// Rejects unknown orders, orders with an update in flight, and moves
	/// that are not strictly forward. A move to the terminal stage is
	/// parked as a pending transition until the user confirms; any other
	/// forward move is committed immediately.
	pub async fn propose_transition(
		&self,
		order_id: OrderId,
		target: OrderStatus,
	) -> TransitionOutcome {
		match self.screen_proposal(order_id, target).await {
			Screened::Answered(outcome) => outcome,
			Screened::Commit { from } => self.commit_marked(order_id, from, target).await,
		}
	}

	/// Confirms the pending terminal-stage transition, if any.
	///
	/// The pending slot is cleared up front, so the confirmation state can
	/// never wedge regardless of how the commit turns out.
	pub async fn confirm_pending_transition(&self) -> TransitionOutcome {
		let marked = {
			let mut state = self.state.write().await;
			let Some(pending) = state.pending_transition.take() else {
				return TransitionOutcome::Rejected {
					reason: MoveRejection::NothingPending,
				};
			};

			let Some(order) = state.orders.iter().find(|o| o.id == pending.order_id) else {
				warn!(order_id = pending.order_id, "Pending order no longer on the board");
				return TransitionOutcome::Rejected {
					reason: MoveRejection::UnknownOrder,
				};
			};

			if state.in_flight.contains(&pending.order_id) {
				self.notify(Notification::error(MSG_IN_FLIGHT));
				return TransitionOutcome::Rejected {
					reason: MoveRejection::InFlight,
				};
			}

			let from = order.status;
			state.in_flight.insert(pending.order_id);
			(pending, from)
		};

		let (pending, from) = marked;
		self.commit_marked(pending.order_id, from, pending.target).await
	}

	/// Cancels the pending terminal-stage transition without mutating any
	/// order or calling the repository.
	///
	/// Returns true if there was a pending transition to cancel.
	pub async fn cancel_pending_transition(&self) -> bool {
		let cancelled = {
			let mut state = self.state.write().await;
			state.pending_transition.take()
		};

		match cancelled {
			Some(pending) => {
				self.event_bus
					.publish(BoardEvent::Order(OrderEvent::TransitionCancelled {
						order_id: pending.order_id,
					}))
					.ok();
				true
			},
			None => false,
		}
	}

	/// Applies the transition rules under the state lock.
	///
	/// On the commit path the order is marked in flight before the lock is
	/// released, so a second gesture cannot race the repository call.
	async fn screen_proposal(&self, order_id: OrderId, target: OrderStatus) -> Screened {
		let mut state = self.state.write().await;

		let Some(order) = state.orders.iter().find(|o| o.id == order_id) else {
			warn!(order_id, "Transition proposed for unknown order");
			return Screened::Answered(TransitionOutcome::Rejected {
				reason: MoveRejection::UnknownOrder,
			});
		};
		let current = order.status;

		if state.in_flight.contains(&order_id) {
			self.notify(Notification::error(MSG_IN_FLIGHT));
			return Screened::Answered(TransitionOutcome::Rejected {
				reason: MoveRejection::InFlight,
			});
		}

		if !self.flow.is_forward(current, target) {
			self.notify(Notification::error(MSG_INVALID_MOVE));
			return Screened::Answered(TransitionOutcome::Rejected {
				reason: MoveRejection::NotForward,
			});
		}

		if target == self.flow.terminal() {
			state.pending_transition = Some(PendingTransition { order_id, target });
			self.event_bus
				.publish(BoardEvent::Order(OrderEvent::ConfirmationRequested {
					order_id,
					target,
				}))
				.ok();
			return Screened::Answered(TransitionOutcome::ConfirmationRequired { order_id, target });
		}

		state.in_flight.insert(order_id);
		Screened::Commit { from: current }
	}

	/// Commits a transition whose order is already marked in flight.
	///
	/// The repository call happens without the lock; the mark is cleared
	/// whatever the result. On success the repository's record replaces
	/// the local one, so server-assigned fields stay consistent. There is
	/// no local write before the call resolves.
	async fn commit_marked(
		&self,
		order_id: OrderId,
		from: OrderStatus,
		target: OrderStatus,
	) -> TransitionOutcome {
		let result = self.repository.update_status(order_id, target).await;

		let mut state = self.state.write().await;
		state.in_flight.remove(&order_id);

		match result {
			Ok(updated) => {
				if let Some(slot) = state.orders.iter_mut().find(|o| o.id == order_id) {
					*slot = updated.clone();
				}
				self.event_bus
					.publish(BoardEvent::Order(OrderEvent::TransitionApplied {
						order: updated.clone(),
						from,
						to: target,
					}))
					.ok();
				self.notify(Notification::success(format!(
					"Pedido {} movido para {}",
					order_id, target
				)));
				TransitionOutcome::Applied { order: updated }
			},
			Err(e) => {
				warn!(order_id, error = %e, "Status update failed");
				self.notify(Notification::error(MSG_UPDATE_FAILED));
				TransitionOutcome::Failed {
					message: e.to_string(),
				}
			},
		}
	}

	fn notify(&self, notification: Notification) {
		self.event_bus
			.publish(BoardEvent::Notification(notification))
			.ok();
	}
}
