//! Configuration loading utilities

use crate::Settings;
use config::{Config, ConfigError, File};

/// Load configuration from the config file
///
/// Reads `config/config.{json,toml,yaml}` relative to the working
/// directory, or the path named by `SWAPFLOW_CONFIG`. A missing file
/// yields an error from deserialization; callers fall back to
/// `Settings::default()` when embedding without a config file.
pub fn load_config() -> Result<Settings, ConfigError> {
	let path =
		std::env::var("SWAPFLOW_CONFIG").unwrap_or_else(|_| "config/config".to_string());

	let s = Config::builder()
		.add_source(File::with_name(&path).required(false))
		.build()?;

	s.try_deserialize()
}
