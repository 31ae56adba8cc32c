//! Configuration settings structures

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use swapflow_types::{Provider, ProviderMetadata};

/// Main application settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Settings {
	pub providers: HashMap<String, ProviderSettings>,
	pub timeouts: TimeoutSettings,
	pub execution: ExecutionSettings,
	pub logging: LoggingSettings,
}

/// Individual provider configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderSettings {
	pub provider_id: String,
	pub adapter_id: String,
	pub endpoint: String,
	pub timeout_ms: u64,
	pub enabled: bool,
	pub headers: Option<HashMap<String, String>>,
	// Optional descriptive metadata
	pub name: Option<String>,
	pub description: Option<String>,
}

/// Convert from settings ProviderSettings to the domain Provider
impl From<ProviderSettings> for Provider {
	fn from(settings: ProviderSettings) -> Self {
		Self {
			provider_id: settings.provider_id,
			adapter_id: settings.adapter_id,
			endpoint: settings.endpoint,
			timeout_ms: settings.timeout_ms,
			enabled: settings.enabled,
			metadata: ProviderMetadata {
				name: settings.name,
				description: settings.description,
				headers: settings.headers,
			},
		}
	}
}

/// Refresh cadence configuration
///
/// Per-provider quote timeouts live on each provider entry; these knobs
/// only drive the engine's scheduling.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TimeoutSettings {
	/// Debounce window for request changes in milliseconds
	pub debounce_ms: u64,
	/// Periodic refresh countdown in seconds
	pub refresh_interval_secs: u64,
}

impl Default for TimeoutSettings {
	fn default() -> Self {
		Self {
			debounce_ms: 600,
			refresh_interval_secs: 15,
		}
	}
}

/// Swap execution configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ExecutionSettings {
	/// Safety margin applied to successful gas estimates, in percent
	pub gas_margin_pct: u64,
	/// Gas limit used when estimation fails
	pub fallback_gas_limit: u64,
	/// Walk the state machine with fixed delays instead of a live wallet
	pub simulated: bool,
	/// Delay per simulated step in milliseconds
	pub simulated_step_ms: u64,
}

impl Default for ExecutionSettings {
	fn default() -> Self {
		Self {
			gas_margin_pct: 10,
			fallback_gas_limit: 1_500_000,
			simulated: false,
			simulated_step_ms: 800,
		}
	}
}

/// Logging configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoggingSettings {
	pub level: String,
	pub format: LogFormat,
	pub structured: bool,
}

impl Default for LoggingSettings {
	fn default() -> Self {
		Self {
			level: "info".to_string(),
			format: LogFormat::Pretty,
			structured: false,
		}
	}
}

/// Log format options
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
	Json,
	Pretty,
	Compact,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			providers: HashMap::new(),
			timeouts: TimeoutSettings::default(),
			execution: ExecutionSettings::default(),
			logging: LoggingSettings::default(),
		}
	}
}

impl Settings {
	/// Providers that participate in aggregation
	pub fn enabled_providers(&self) -> HashMap<String, ProviderSettings> {
		self.providers
			.iter()
			.filter(|(_, p)| p.enabled)
			.map(|(id, p)| (id.clone(), p.clone()))
			.collect()
	}
}
