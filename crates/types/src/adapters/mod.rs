//! Adapter contracts and shared adapter models

use std::collections::HashMap;

pub mod errors;
pub mod traits;

pub use errors::{ProviderError, ProviderValidationError};
pub use traits::ProviderAdapter;

/// Result type for adapter operations
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Static information describing an adapter implementation
#[derive(Debug, Clone, PartialEq)]
pub struct AdapterInfo {
	/// Unique identifier used for registration and provider matching
	pub adapter_id: String,

	/// Human-readable name
	pub name: String,

	/// Optional description
	pub description: Option<String>,

	/// Adapter version
	pub version: String,

	/// Adapter-specific configuration values
	pub configuration: HashMap<String, serde_json::Value>,
}

impl AdapterInfo {
	pub fn new(
		adapter_id: impl Into<String>,
		name: impl Into<String>,
		version: impl Into<String>,
	) -> Self {
		Self {
			adapter_id: adapter_id.into(),
			name: name.into(),
			description: None,
			version: version.into(),
			configuration: HashMap::new(),
		}
	}

	pub fn with_description(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());
		self
	}
}
