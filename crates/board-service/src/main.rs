//! Main entry point for the order board service.
//!
//! This binary hosts the restaurant's order status board: it loads the
//! configuration, wires up the configured order repository backend, builds
//! the board, and serves the gesture API consumed by the console frontend.

use board_config::Config;
use board_core::{EventBus, OrderBoard, StatusFlow};
use board_repository::RepositoryInterface;
use board_types::{BoardEvent, Severity};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

mod server;

/// Command-line arguments for the board service.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
	/// Path to configuration file
	#[arg(short, long, default_value = "config.toml")]
	config: PathBuf,

	/// Log level (trace, debug, info, warn, error)
	#[arg(short, long, default_value = "info")]
	log_level: String,
}

/// Main entry point for the board service.
///
/// This function:
/// 1. Parses command-line arguments
/// 2. Initializes logging infrastructure
/// 3. Loads configuration from file
/// 4. Builds the board over the configured repository backend
/// 5. Serves the gesture API until interrupted
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	// Initialize tracing with env filter
	use tracing_subscriber::{fmt, EnvFilter};

	let default_directive = args.log_level.to_string();
	let env_filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

	fmt()
		.with_env_filter(env_filter)
		.with_thread_ids(true)
		.with_target(true)
		.init();

	tracing::info!("Started order board");

	// Load configuration
	let config_path = args
		.config
		.to_str()
		.ok_or("Configuration path is not valid UTF-8")?;
	let config = Config::from_file(config_path)?;
	tracing::info!("Loaded configuration [{}]", config.board.id);

	// Build the board over the configured repository
	let repository = build_repository(&config)?;
	let board = Arc::new(OrderBoard::new(
		Arc::from(repository),
		StatusFlow::default(),
		EventBus::default(),
	));

	// Mirror notifications into the log
	spawn_notification_logger(&board);

	// Initial load; a failed fetch leaves an empty, retryable board
	match board.load().await {
		Ok(count) => tracing::info!(count, "Loaded orders"),
		Err(e) => tracing::warn!(error = %e, "Initial order load failed; board starts empty"),
	}

	if !config.api.enabled {
		tracing::warn!("API server disabled in configuration; nothing to serve");
		return Ok(());
	}

	server::start_server(config, board).await?;

	tracing::info!("Stopped order board");
	Ok(())
}

/// Resolves the configured primary repository implementation through the
/// factory registry and builds it.
fn build_repository(
	config: &Config,
) -> Result<Box<dyn RepositoryInterface>, Box<dyn std::error::Error>> {
	let factories: std::collections::HashMap<_, _> = board_repository::get_all_implementations()
		.into_iter()
		.collect();

	let primary = config.repository.primary.as_str();
	let factory = factories
		.get(primary)
		.ok_or_else(|| format!("Unknown repository implementation '{}'", primary))?;

	let implementation_config = config
		.repository
		.implementations
		.get(primary)
		.cloned()
		.unwrap_or(toml::Value::Table(toml::map::Map::new()));

	Ok(factory(&implementation_config)?)
}

/// Subscribes to the board's event bus and mirrors notifications into
/// tracing at the matching level. Lifecycle events are logged at debug.
fn spawn_notification_logger(board: &Arc<OrderBoard>) {
	let mut receiver = board.event_bus().subscribe();
	tokio::spawn(async move {
		loop {
			match receiver.recv().await {
				Ok(BoardEvent::Notification(n)) => match n.severity {
					Severity::Success => tracing::info!(toast = %n.message, "Notification"),
					Severity::Error => tracing::warn!(toast = %n.message, "Notification"),
				},
				Ok(BoardEvent::Order(event)) => {
					tracing::debug!(?event, "Board event");
				},
				Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
					tracing::debug!(skipped, "Notification logger lagged");
				},
				Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
			}
		}
	});
}

#[cfg(test)]
mod tests {
	use super::*;
	use board_config::{ApiConfig, BoardConfig, RepositoryConfig};
	use std::collections::HashMap;
	use toml::Value;

	/// Creates a minimal test configuration backed by the memory
	/// repository.
	fn create_test_config() -> Config {
		Config {
			board: BoardConfig {
				id: "test-board".to_string(),
			},
			repository: RepositoryConfig {
				primary: "memory".to_string(),
				implementations: {
					let mut map = HashMap::new();
					map.insert("memory".to_string(), Value::Table(toml::map::Map::new()));
					map
				},
			},
			api: ApiConfig::default(),
		}
	}

	#[test]
	fn test_args_default_values() {
		let args = Args {
			config: PathBuf::from("config.toml"),
			log_level: "info".to_string(),
		};

		assert_eq!(args.config, PathBuf::from("config.toml"));
		assert_eq!(args.log_level, "info");
	}

	#[test]
	fn test_build_repository_with_memory_backend() {
		let config = create_test_config();
		assert!(build_repository(&config).is_ok());
	}

	#[test]
	fn test_build_repository_with_unknown_backend() {
		let mut config = create_test_config();
		config.repository.primary = "redis".to_string();

		let result = build_repository(&config);
		assert!(result
			.err()
			.map(|e| e.to_string().contains("Unknown repository implementation"))
			.unwrap_or(false));
	}

	#[test]
	fn test_build_repository_with_http_backend() {
		let mut config = create_test_config();
		config.repository.primary = "http".to_string();
		let mut http = toml::map::Map::new();
		http.insert(
			"base_url".to_string(),
			Value::String("https://backend.example.com".to_string()),
		);
		config
			.repository
			.implementations
			.insert("http".to_string(), Value::Table(http));

		assert!(build_repository(&config).is_ok());
	}
}
