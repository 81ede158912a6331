//! Registry trait for self-registering implementations.
//!
//! This module provides the base trait that pluggable backends must
//! implement to register themselves with their configuration name and
//! factory function.

/// Base trait for implementation registries.
///
/// Each backend module (for now, the repository implementations) provides a
/// Registry struct that implements this trait. This ensures that every
/// implementation declares its configuration name and provides a factory
/// function.
pub trait ImplementationRegistry {
	/// The name used in configuration files to reference this implementation.
	///
	/// This should match the key used in the TOML configuration, for example:
	/// - "http" for repository.implementations.http
	/// - "memory" for repository.implementations.memory
	const NAME: &'static str;

	/// The factory function type this implementation provides.
	type Factory;

	/// Get the factory function for this implementation.
	fn factory() -> Self::Factory;
}
