//! HTTP order repository implementation.
//!
//! This module provides the production implementation of the
//! RepositoryInterface trait, talking to the backend REST API: the order
//! list lives at `GET {base_url}/orders` and status updates are
//! `PATCH {base_url}/orders/{id}` with a `{"status": ...}` body.

use crate::{RepositoryError, RepositoryInterface};
use async_trait::async_trait;
use board_types::{
	ConfigSchema, Field, FieldType, ImplementationRegistry, Order, OrderId, OrderStatus, Schema,
	ValidationError,
};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Default request timeout when the configuration does not set one.
const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// HTTP repository implementation backed by the restaurant backend API.
pub struct HttpRepository {
	/// Shared client with connection pooling.
	client: reqwest::Client,
	/// Base URL of the backend, without a trailing slash.
	base_url: String,
}

impl HttpRepository {
	/// Creates a new HttpRepository for the given base URL.
	pub fn new(base_url: String, timeout: Duration) -> Result<Self, RepositoryError> {
		let client = reqwest::Client::builder()
			.pool_idle_timeout(Duration::from_secs(90))
			.pool_max_idle_per_host(10)
			.timeout(timeout)
			.build()
			.map_err(|e| RepositoryError::Configuration(e.to_string()))?;

		Ok(Self {
			client,
			base_url: base_url.trim_end_matches('/').to_string(),
		})
	}

	fn orders_url(&self) -> String {
		format!("{}/orders", self.base_url)
	}
}

#[async_trait]
impl RepositoryInterface for HttpRepository {
	async fn list(&self) -> Result<Vec<Order>, RepositoryError> {
		let url = self.orders_url();
		debug!(%url, "Fetching order list");

		let response = self
			.client
			.get(&url)
			.send()
			.await
			.map_err(|e| RepositoryError::Fetch(e.to_string()))?;

		let status = response.status();
		if !status.is_success() {
			return Err(RepositoryError::Fetch(format!(
				"backend answered {}",
				status
			)));
		}

		let body: Value = response
			.json()
			.await
			.map_err(|e| RepositoryError::Fetch(e.to_string()))?;

		// The backend is expected to answer with a plain array; anything
		// else is a contract violation, not an empty board.
		if !body.is_array() {
			return Err(RepositoryError::UnexpectedResponse(
				"order list is not an array".to_string(),
			));
		}

		serde_json::from_value(body).map_err(|e| RepositoryError::UnexpectedResponse(e.to_string()))
	}

	async fn update_status(
		&self,
		id: OrderId,
		status: OrderStatus,
	) -> Result<Order, RepositoryError> {
		let url = format!("{}/{}", self.orders_url(), id);
		debug!(%url, %status, "Updating order status");

		let response = self
			.client
			.patch(&url)
			.json(&serde_json::json!({ "status": status }))
			.send()
			.await
			.map_err(|e| RepositoryError::Update(e.to_string()))?;

		let http_status = response.status();
		if !http_status.is_success() {
			return Err(RepositoryError::Update(format!(
				"backend answered {}",
				http_status
			)));
		}

		response
			.json()
			.await
			.map_err(|e| RepositoryError::UnexpectedResponse(e.to_string()))
	}

	fn config_schema(&self) -> Box<dyn ConfigSchema> {
		Box::new(HttpRepositorySchema)
	}
}

/// Configuration schema for HttpRepository.
pub struct HttpRepositorySchema;

impl ConfigSchema for HttpRepositorySchema {
	fn validate(&self, config: &toml::Value) -> Result<(), ValidationError> {
		let schema = Schema::new(
			vec![
				Field::new("base_url", FieldType::String).with_validator(|v| {
					let url = v.as_str().unwrap_or_default();
					if url.starts_with("http://") || url.starts_with("https://") {
						Ok(())
					} else {
						Err("base_url must start with http:// or https://".to_string())
					}
				}),
			],
			vec![Field::new(
				"timeout_seconds",
				FieldType::Integer {
					min: Some(1),
					max: Some(300),
				},
			)],
		);
		schema.validate(config)
	}
}

/// Registry for the HTTP repository implementation.
pub struct Registry;

impl ImplementationRegistry for Registry {
	const NAME: &'static str = "http";
	type Factory = crate::RepositoryFactory;

	fn factory() -> Self::Factory {
		create_repository
	}
}

impl crate::RepositoryRegistry for Registry {}

/// Factory function to create an HTTP repository from configuration.
///
/// Configuration parameters:
/// - `base_url` (required): backend API root, e.g. "https://backend.example.com"
/// - `timeout_seconds` (optional): request timeout, defaults to 30
pub fn create_repository(
	config: &toml::Value,
) -> Result<Box<dyn RepositoryInterface>, RepositoryError> {
	HttpRepositorySchema
		.validate(config)
		.map_err(|e| RepositoryError::Configuration(e.to_string()))?;

	let base_url = config
		.get("base_url")
		.and_then(|v| v.as_str())
		.ok_or_else(|| RepositoryError::Configuration("base_url is required".to_string()))?
		.to_string();

	let timeout_seconds = config
		.get("timeout_seconds")
		.and_then(|v| v.as_integer())
		.map(|v| v as u64)
		.unwrap_or(DEFAULT_TIMEOUT_SECONDS);

	let repository = HttpRepository::new(base_url, Duration::from_secs(timeout_seconds))?;
	Ok(Box::new(repository))
}

#[cfg(test)]
mod tests {
	use super::*;

	fn parse(s: &str) -> toml::Value {
		toml::from_str(s).unwrap()
	}

	#[test]
	fn test_schema_requires_base_url() {
		let result = HttpRepositorySchema.validate(&parse("timeout_seconds = 30"));
		assert!(result.is_err());
	}

	#[test]
	fn test_schema_rejects_non_http_base_url() {
		let result = HttpRepositorySchema.validate(&parse("base_url = \"ftp://example.com\""));
		assert!(result.is_err());
	}

	#[test]
	fn test_factory_builds_from_valid_config() {
		let config = parse("base_url = \"https://backend.example.com\"\ntimeout_seconds = 10");
		assert!(create_repository(&config).is_ok());
	}

	#[test]
	fn test_factory_rejects_missing_base_url() {
		let result = create_repository(&parse(""));
		assert!(matches!(result, Err(RepositoryError::Configuration(_))));
	}

	#[test]
	fn test_base_url_trailing_slash_is_trimmed() {
		let repo = HttpRepository::new(
			"https://backend.example.com/".to_string(),
			Duration::from_secs(5),
		)
		.unwrap();
		assert_eq!(repo.orders_url(), "https://backend.example.com/orders");
	}
}
