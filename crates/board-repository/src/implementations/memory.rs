//! In-memory order repository implementation.
//!
//! This module provides a memory-based implementation of the
//! RepositoryInterface trait, useful for testing and local development
//! where no backend API is available.

use crate::{RepositoryError, RepositoryInterface};
use async_trait::async_trait;
use board_types::{
	ConfigSchema, ImplementationRegistry, Order, OrderId, OrderStatus, Schema, ValidationError,
};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory repository implementation.
///
/// Stores orders in a HashMap keyed by id. Unlike the production backend
/// it accepts any status write; the board's own rules are the only
/// transition validation in play, which is exactly what the board tests
/// need.
pub struct MemoryRepository {
	/// The in-memory store protected by a read-write lock.
	orders: Arc<RwLock<HashMap<OrderId, Order>>>,
}

impl MemoryRepository {
	/// Creates a new empty MemoryRepository instance.
	pub fn new() -> Self {
		Self {
			orders: Arc::new(RwLock::new(HashMap::new())),
		}
	}

	/// Replaces the store contents with the given orders.
	pub async fn seed(&self, orders: Vec<Order>) {
		let mut store = self.orders.write().await;
		store.clear();
		for order in orders {
			store.insert(order.id, order);
		}
	}
}

impl Default for MemoryRepository {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl RepositoryInterface for MemoryRepository {
	async fn list(&self) -> Result<Vec<Order>, RepositoryError> {
		let store = self.orders.read().await;
		let mut orders: Vec<Order> = store.values().cloned().collect();
		// Stable listing order for a HashMap-backed store
		orders.sort_by_key(|o| o.id);
		Ok(orders)
	}

	async fn update_status(
		&self,
		id: OrderId,
		status: OrderStatus,
	) -> Result<Order, RepositoryError> {
		let mut store = self.orders.write().await;
		let order = store
			.get_mut(&id)
			.ok_or_else(|| RepositoryError::Update(format!("order {} not found", id)))?;
		order.status = status;
		Ok(order.clone())
	}

	fn config_schema(&self) -> Box<dyn ConfigSchema> {
		Box::new(MemoryRepositorySchema)
	}
}

/// Configuration schema for MemoryRepository.
pub struct MemoryRepositorySchema;

impl ConfigSchema for MemoryRepositorySchema {
	fn validate(&self, config: &toml::Value) -> Result<(), ValidationError> {
		// Memory repository has no required configuration
		let schema = Schema::new(vec![], vec![]);
		schema.validate(config)
	}
}

/// Registry for the memory repository implementation.
pub struct Registry;

impl ImplementationRegistry for Registry {
	const NAME: &'static str = "memory";
	type Factory = crate::RepositoryFactory;

	fn factory() -> Self::Factory {
		create_repository
	}
}

impl crate::RepositoryRegistry for Registry {}

/// Factory function to create a memory repository from configuration.
///
/// Configuration parameters:
/// - None required for the memory repository
pub fn create_repository(
	_config: &toml::Value,
) -> Result<Box<dyn RepositoryInterface>, RepositoryError> {
	Ok(Box::new(MemoryRepository::new()))
}
