//! Swapflow
//!
//! A multi-provider swap engine: competing quotes are fetched and ranked,
//! the user can pin a provider without losing future updates, and the
//! selected quote is driven through a multi-step on-chain execution with
//! failure recovery at each step.

// Core domain types - the most commonly used types
pub use swapflow_types::{
	chrono,
	// External dependencies for convenience
	serde_json,
	// Adapter contracts
	AdapterInfo,
	Chain,
	ChainSwitchOutcome,
	// Primary domain entities
	Provider,
	ProviderAdapter,
	// Error types
	ProviderError,
	ProviderRuntimeConfig,
	Quote,
	SwapError,
	SwapPhase,
	SwapRequest,
	SwapTransaction,
	Token,
	TokenRegistry,
	TxHandle,
	TxReceipt,
	U256,
	WalletError,
	WalletSession,
};

// Service layer
pub use swapflow_service::{
	AggregationOutcome, AggregatorService, AggregatorServiceError, EngineConfig, EngineState,
	ExecutionOutcome, ExecutorConfig, RegistryCache, RequestUpdate, SwapEngine, SwapExecutor,
};

// Adapters
pub use swapflow_adapters::{AdapterRegistry, OneInchAdapter, ZeroExAdapter};

// Config
pub use swapflow_config::{load_config, log_engine_info, ProviderSettings, Settings};

// Module aliases for advanced usage
pub mod models {
	pub use swapflow_types::*;
}

pub mod service {
	pub use swapflow_service::*;
}

pub mod adapters {
	pub use swapflow_adapters::*;
}

pub mod config {
	pub use swapflow_config::*;
}

pub mod mocks;

use std::sync::Arc;
use tracing::info;

// Re-export external dependencies for downstream integrations
pub use async_trait;

/// Builder pattern for configuring the engine
pub struct SwapEngineBuilder {
	settings: Option<Settings>,
	adapter_registry: Option<AdapterRegistry>,
	providers: Vec<Provider>,
	wallet: Option<Arc<dyn WalletSession>>,
	simulated: bool,
}

impl Default for SwapEngineBuilder {
	fn default() -> Self {
		Self::new()
	}
}

impl SwapEngineBuilder {
	/// Create a new engine builder
	pub fn new() -> Self {
		Self {
			settings: None,
			adapter_registry: None,
			providers: Vec::new(),
			wallet: None,
			simulated: false,
		}
	}

	/// Create an engine builder from configuration
	pub fn from_config(settings: Settings) -> Self {
		Self {
			settings: Some(settings),
			..Self::new()
		}
	}

	/// Set custom settings
	pub fn with_settings(mut self, settings: Settings) -> Self {
		self.settings = Some(settings);
		self
	}

	/// Register a custom adapter (uses adapter's own ID)
	///
	/// Panics if adapter registration fails; duplicate adapter ids are a
	/// fatal startup-time configuration error.
	pub fn with_adapter(mut self, adapter: Arc<dyn ProviderAdapter>) -> Self {
		let mut registry = self
			.adapter_registry
			.unwrap_or_else(AdapterRegistry::with_defaults);
		registry.register(adapter).expect(
			"Failed to register adapter during startup - this is a fatal configuration error",
		);
		self.adapter_registry = Some(registry);
		self
	}

	/// Start from an empty adapter registry instead of the built-ins
	pub fn without_default_adapters(mut self) -> Self {
		if self.adapter_registry.is_none() {
			self.adapter_registry = Some(AdapterRegistry::new());
		}
		self
	}

	/// Add a provider to the engine
	///
	/// Providers added here are ranked after config-defined providers, in
	/// the order of the calls.
	pub fn with_provider(mut self, provider: Provider) -> Self {
		self.providers.push(provider);
		self
	}

	/// Attach the wallet session used for execution
	pub fn with_wallet(mut self, wallet: Arc<dyn WalletSession>) -> Self {
		self.wallet = Some(wallet);
		self
	}

	/// Force simulated execution regardless of settings
	pub fn simulated(mut self) -> Self {
		self.simulated = true;
		self
	}

	/// Get the current settings
	pub fn settings(&self) -> Option<&Settings> {
		self.settings.as_ref()
	}

	/// Build the configured engine
	pub fn build(self) -> Result<SwapEngine, Box<dyn std::error::Error>> {
		let settings = self.settings.unwrap_or_default();

		// Config-defined providers first, sorted by id so registration
		// order (and therefore tie-breaking) is deterministic across runs
		let mut config_providers: Vec<Provider> = settings
			.enabled_providers()
			.into_values()
			.map(Provider::from)
			.collect();
		config_providers.sort_by(|a, b| a.provider_id.cmp(&b.provider_id));

		let mut providers = config_providers;
		providers.extend(self.providers);

		let adapter_registry = Arc::new(
			self.adapter_registry
				.unwrap_or_else(AdapterRegistry::with_defaults),
		);

		let aggregator =
			AggregatorService::new(providers.clone(), Arc::clone(&adapter_registry));
		aggregator
			.validate_providers()
			.map_err(|e| format!("Provider validation failed: {}", e))?;

		let executor = SwapExecutor::new(
			providers,
			Arc::clone(&adapter_registry),
			ExecutorConfig {
				gas_margin_pct: settings.execution.gas_margin_pct,
				fallback_gas_limit: settings.execution.fallback_gas_limit,
				simulated_step_ms: settings.execution.simulated_step_ms,
			},
		);

		let engine_config = EngineConfig {
			debounce_ms: settings.timeouts.debounce_ms,
			refresh_interval_secs: settings.timeouts.refresh_interval_secs,
			simulated: self.simulated || settings.execution.simulated,
		};

		info!(
			"Engine initialized with {} provider(s)",
			aggregator.stats().enabled_providers
		);

		Ok(SwapEngine::new(aggregator, executor, self.wallet, engine_config))
	}

	/// Build the engine with all defaults and environment setup
	///
	/// Handles everything needed to embed the engine: loading .env,
	/// loading configuration, initializing tracing and logging the
	/// configuration summary.
	pub fn start(mut self) -> Result<SwapEngine, Box<dyn std::error::Error>> {
		// Load .env file if it exists
		dotenvy::dotenv().ok();

		let settings = match self.settings.take() {
			Some(settings) => settings,
			None => load_config().unwrap_or_default(),
		};

		init_tracing(&settings)?;
		log_engine_info(&settings);

		self.settings = Some(settings);
		self.build()
	}
}

/// Initialize tracing with configuration-based settings
pub fn init_tracing(settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
	use swapflow_config::LogFormat;

	// Create env filter using config level or environment variable
	let log_level = &settings.logging.level;
	let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

	match settings.logging.format {
		LogFormat::Json => {
			let subscriber = tracing_subscriber::fmt().json().with_env_filter(env_filter);

			if settings.logging.structured {
				subscriber.with_target(true).with_thread_ids(true).init();
			} else {
				subscriber.init();
			}
		},
		LogFormat::Pretty => {
			let subscriber = tracing_subscriber::fmt()
				.pretty()
				.with_env_filter(env_filter);

			if settings.logging.structured {
				subscriber.with_target(true).with_thread_ids(true).init();
			} else {
				subscriber.init();
			}
		},
		LogFormat::Compact => {
			let subscriber = tracing_subscriber::fmt()
				.compact()
				.with_env_filter(env_filter);

			if settings.logging.structured {
				subscriber.with_target(true).with_thread_ids(true).init();
			} else {
				subscriber.init();
			}
		},
	}

	info!(
		"Logging configuration applied: level={}, format={:?}, structured={}",
		settings.logging.level, settings.logging.format, settings.logging.structured
	);

	Ok(())
}
