//! Swapflow Config
//!
//! Settings structures and file loading for the Swapflow engine.

pub mod loader;
pub mod settings;
pub mod startup_logger;

pub use loader::load_config;
pub use settings::{
	ExecutionSettings, LogFormat, LoggingSettings, ProviderSettings, Settings, TimeoutSettings,
};
pub use startup_logger::log_engine_info;
