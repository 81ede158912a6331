//! Order repository module for the board system.
//!
//! This module provides the abstraction over the remote order store the
//! board synchronizes with, supporting different backend implementations
//! such as the production REST API or an in-memory store for tests and
//! local development.

use async_trait::async_trait;
use board_types::{ConfigSchema, ImplementationRegistry, Order, OrderId, OrderStatus};
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod http;
	pub mod memory;
}

/// Errors that can occur during repository operations.
///
/// The board treats every failure identically (notification + unchanged
/// local state); the variants exist for logging fidelity.
#[derive(Debug, Error)]
pub enum RepositoryError {
	/// Error that occurs while fetching the order list.
	#[error("Fetch error: {0}")]
	Fetch(String),
	/// Error that occurs while updating an order's status, including
	/// server-side rejections of the transition.
	#[error("Update error: {0}")]
	Update(String),
	/// Error that occurs when the backend answers with an unexpected body.
	#[error("Unexpected response: {0}")]
	UnexpectedResponse(String),
	/// Error that occurs during configuration validation.
	#[error("Configuration error: {0}")]
	Configuration(String),
}

/// Trait defining the interface for order repository backends.
///
/// This trait must be implemented by any backend that wants to act as the
/// board's source of truth. The board reads the full list on load and
/// writes single-field status updates; orders are created and deleted by
/// external systems.
#[async_trait]
pub trait RepositoryInterface: Send + Sync {
	/// Retrieves the full order list.
	async fn list(&self) -> Result<Vec<Order>, RepositoryError>;

	/// Updates a single order's status and returns the updated record.
	///
	/// The returned record is server truth and replaces the local copy
	/// verbatim, so repository-assigned fields stay consistent.
	async fn update_status(
		&self,
		id: OrderId,
		status: OrderStatus,
	) -> Result<Order, RepositoryError>;

	/// Returns the configuration schema for validation.
	fn config_schema(&self) -> Box<dyn ConfigSchema>;
}

/// Type alias for repository factory functions.
///
/// This is the function signature that all repository implementations must
/// provide to create instances of their interface.
pub type RepositoryFactory =
	fn(&toml::Value) -> Result<Box<dyn RepositoryInterface>, RepositoryError>;

/// Registry trait for repository implementations.
pub trait RepositoryRegistry: ImplementationRegistry<Factory = RepositoryFactory> {}

/// Get all registered repository implementations.
///
/// Returns a vector of (name, factory) tuples for all available repository
/// implementations. This is used by the service to resolve the configured
/// primary backend.
pub fn get_all_implementations() -> Vec<(&'static str, RepositoryFactory)> {
	use implementations::{http, memory};

	vec![
		(http::Registry::NAME, http::Registry::factory()),
		(memory::Registry::NAME, memory::Registry::factory()),
	]
}
