//! Swapflow Adapters
//!
//! Provider-specific adapters for the Swapflow aggregation engine.

pub mod client;
pub mod oneinch_adapter;
pub mod zeroex_adapter;

pub use oneinch_adapter::OneInchAdapter;
pub use swapflow_types::{ProviderAdapter, ProviderError, ProviderResult};
pub use zeroex_adapter::ZeroExAdapter;

use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Registry-specific errors
#[derive(Error, Debug)]
pub enum AdapterRegistryError {
	#[error("Adapter already registered: {adapter_id}")]
	AlreadyRegistered { adapter_id: String },

	#[error("Adapter not registered: {adapter_id}")]
	NotRegistered { adapter_id: String },
}

/// Registry of adapter implementations keyed by adapter id
///
/// Providers reference adapters by id; the aggregator and the executor both
/// resolve through this registry, so one adapter instance can serve several
/// configured providers.
pub struct AdapterRegistry {
	adapters: HashMap<String, Arc<dyn ProviderAdapter>>,
}

impl AdapterRegistry {
	/// Create an empty registry
	pub fn new() -> Self {
		Self {
			adapters: HashMap::new(),
		}
	}

	/// Create a registry pre-populated with the built-in adapters
	pub fn with_defaults() -> Self {
		let mut registry = Self::new();
		registry
			.register(Arc::new(ZeroExAdapter::with_default_config()))
			.expect("default adapters have unique ids");
		registry
			.register(Arc::new(OneInchAdapter::with_default_config()))
			.expect("default adapters have unique ids");
		registry
	}

	/// Register an adapter under its own id
	pub fn register(
		&mut self,
		adapter: Arc<dyn ProviderAdapter>,
	) -> Result<(), AdapterRegistryError> {
		let id = adapter.id().to_string();
		if self.adapters.contains_key(&id) {
			return Err(AdapterRegistryError::AlreadyRegistered { adapter_id: id });
		}
		self.adapters.insert(id, adapter);
		Ok(())
	}

	pub fn get(&self, id: &str) -> Option<Arc<dyn ProviderAdapter>> {
		self.adapters.get(id).cloned()
	}

	pub fn ids(&self) -> Vec<String> {
		self.adapters.keys().cloned().collect()
	}

	pub fn len(&self) -> usize {
		self.adapters.len()
	}

	pub fn is_empty(&self) -> bool {
		self.adapters.is_empty()
	}
}

impl Default for AdapterRegistry {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_with_defaults_registers_builtins() {
		let registry = AdapterRegistry::with_defaults();
		assert_eq!(registry.len(), 2);
		assert!(registry.get("zerox-v1").is_some());
		assert!(registry.get("oneinch-v1").is_some());
	}

	#[test]
	fn test_duplicate_registration_rejected() {
		let mut registry = AdapterRegistry::with_defaults();
		let result = registry.register(Arc::new(ZeroExAdapter::with_default_config()));
		assert!(matches!(
			result,
			Err(AdapterRegistryError::AlreadyRegistered { .. })
		));
	}
}
