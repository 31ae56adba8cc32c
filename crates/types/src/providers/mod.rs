//! Core Provider domain model

use std::collections::HashMap;

/// A registered liquidity/routing provider
///
/// Registration order matters: the aggregator breaks net-value ties in
/// favor of the provider registered first.
#[derive(Debug, Clone, PartialEq)]
pub struct Provider {
	/// Unique identifier for the provider
	pub provider_id: String,

	/// ID of the adapter used to communicate with this provider
	pub adapter_id: String,

	/// HTTP endpoint for the provider API
	pub endpoint: String,

	/// Timeout for requests to this provider in milliseconds
	pub timeout_ms: u64,

	/// Whether the provider participates in aggregation
	pub enabled: bool,

	/// Additional metadata
	pub metadata: ProviderMetadata,
}

/// Provider metadata and configuration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProviderMetadata {
	/// Human-readable name
	pub name: Option<String>,

	/// Description of the provider
	pub description: Option<String>,

	/// Custom HTTP headers for requests
	pub headers: Option<HashMap<String, String>>,
}

impl Provider {
	pub fn new(
		provider_id: impl Into<String>,
		adapter_id: impl Into<String>,
		endpoint: impl Into<String>,
		timeout_ms: u64,
	) -> Self {
		Self {
			provider_id: provider_id.into(),
			adapter_id: adapter_id.into(),
			endpoint: endpoint.into(),
			timeout_ms,
			enabled: true,
			metadata: ProviderMetadata::default(),
		}
	}

	pub fn with_name(mut self, name: impl Into<String>) -> Self {
		self.metadata.name = Some(name.into());
		self
	}

	pub fn disabled(mut self) -> Self {
		self.enabled = false;
		self
	}
}

/// Runtime configuration handed to an adapter for a single call
///
/// Carries the per-provider endpoint, timeout and headers so one adapter
/// implementation can serve several configured providers.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderRuntimeConfig {
	pub provider_id: String,
	pub endpoint: String,
	pub timeout_ms: u64,
	pub headers: Option<HashMap<String, String>>,
}

impl From<&Provider> for ProviderRuntimeConfig {
	fn from(provider: &Provider) -> Self {
		Self {
			provider_id: provider.provider_id.clone(),
			endpoint: provider.endpoint.clone(),
			timeout_ms: provider.timeout_ms,
			headers: provider.metadata.headers.clone(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_runtime_config_from_provider() {
		let provider = Provider::new("zerox-mainnet", "zerox-v1", "https://api.0x.org", 4000)
			.with_name("0x Swap API");

		let config = ProviderRuntimeConfig::from(&provider);
		assert_eq!(config.provider_id, "zerox-mainnet");
		assert_eq!(config.endpoint, "https://api.0x.org");
		assert_eq!(config.timeout_ms, 4000);
	}
}
