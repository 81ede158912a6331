//! Event types for board-to-presentation communication.
//!
//! This module defines the event stream published by the order board.
//! Events flow through a broadcast bus so that the presentation layer and
//! the notification logger can react to state changes without the board
//! depending on either of them.

use crate::{Order, OrderId, OrderStatus};
use serde::{Deserialize, Serialize};

/// Main event type encompassing all board events.
///
/// Events are categorized so that consumers can filter the kinds they care
/// about: lifecycle events drive screen updates, notifications drive toasts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum BoardEvent {
	/// Events from the order board lifecycle.
	Order(OrderEvent),
	/// Transient user-facing notifications.
	Notification(Notification),
}

/// Events related to order lifecycle on the board.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OrderEvent {
	/// The board replaced its order collection from the repository.
	Loaded { count: usize },
	/// A transition was accepted by the repository and applied locally.
	TransitionApplied {
		order: Order,
		from: OrderStatus,
		to: OrderStatus,
	},
	/// A terminal-stage transition is waiting for user confirmation.
	ConfirmationRequested {
		order_id: OrderId,
		target: OrderStatus,
	},
	/// A pending terminal-stage transition was cancelled by the user.
	TransitionCancelled { order_id: OrderId },
}

/// Severity of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
	/// The operation completed; shown as a success toast.
	Success,
	/// The operation was rejected or failed; shown as an error toast.
	Error,
}

/// A transient user-facing toast.
///
/// Notifications are fire-and-forget: the board publishes them and never
/// depends on whether anything consumed them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
	pub severity: Severity,
	pub message: String,
}

impl Notification {
	pub fn success(message: impl Into<String>) -> Self {
		Self {
			severity: Severity::Success,
			message: message.into(),
		}
	}

	pub fn error(message: impl Into<String>) -> Self {
		Self {
			severity: Severity::Error,
			message: message.into(),
		}
	}
}
