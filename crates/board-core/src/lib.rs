//! Core order board for the restaurant console.
//!
//! This module provides the order status board: an in-memory kanban over
//! the orders last fetched from the repository, with forward-only stage
//! transitions, a confirmation gate on the terminal stage, and an event
//! bus carrying lifecycle events and user-facing notifications.

use board_repository::RepositoryError;
use thiserror::Error;

mod board;
pub mod event_bus;
mod flow;

pub use board::{MoveRejection, OrderBoard, PendingTransition, TransitionOutcome};
pub use event_bus::EventBus;
pub use flow::StatusFlow;

/// Errors that can occur during board operations.
///
/// Repository failures are already converted to notifications at the point
/// of the call; this error is returned alongside so programmatic callers
/// can distinguish a failed load from an empty board.
#[derive(Debug, Error)]
pub enum BoardError {
	/// Error from the order repository.
	#[error("Repository error: {0}")]
	Repository(#[from] RepositoryError),
}
