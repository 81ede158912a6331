//! Event bus for board-to-consumer communication.
//!
//! The board publishes lifecycle events and notifications onto a broadcast
//! channel. Publishing is fire-and-forget: a bus with no subscribers, or a
//! lagging subscriber, never affects board operation.

use board_types::BoardEvent;
use tokio::sync::broadcast;

/// Default buffer size for the broadcast channel.
const DEFAULT_CAPACITY: usize = 256;

/// Broadcast bus for board events.
///
/// Cloning the bus is cheap and every clone publishes into the same
/// channel. Subscribers receive events published after they subscribe.
#[derive(Debug, Clone)]
pub struct EventBus {
	sender: broadcast::Sender<BoardEvent>,
}

impl EventBus {
	/// Creates a new event bus with the given channel capacity.
	pub fn new(capacity: usize) -> Self {
		let (sender, _) = broadcast::channel(capacity);
		Self { sender }
	}

	/// Publishes an event to all current subscribers.
	///
	/// Returns the number of subscribers the event was sent to. An error
	/// only means there were no subscribers; callers ignore it.
	pub fn publish(
		&self,
		event: BoardEvent,
	) -> Result<usize, broadcast::error::SendError<BoardEvent>> {
		self.sender.send(event)
	}

	/// Creates a new subscription to the event stream.
	pub fn subscribe(&self) -> broadcast::Receiver<BoardEvent> {
		self.sender.subscribe()
	}
}

impl Default for EventBus {
	fn default() -> Self {
		Self::new(DEFAULT_CAPACITY)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use board_types::Notification;

	#[tokio::test]
	async fn test_subscriber_receives_published_event() {
		let bus = EventBus::default();
		let mut rx = bus.subscribe();

		bus.publish(BoardEvent::Notification(Notification::success("ok")))
			.unwrap();

		let event = rx.recv().await.unwrap();
		assert!(matches!(event, BoardEvent::Notification(n) if n.message == "ok"));
	}

	#[tokio::test]
	async fn test_publish_without_subscribers_is_harmless() {
		let bus = EventBus::default();
		let result = bus.publish(BoardEvent::Notification(Notification::error("lost")));
		// No subscribers: the send fails, and that is fine.
		assert!(result.is_err());
	}
}
