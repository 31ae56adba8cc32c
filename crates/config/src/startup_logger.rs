//! Startup logging helpers

use tracing::info;

use crate::Settings;

/// Log a summary of the engine configuration at startup
pub fn log_engine_info(settings: &Settings) {
	let enabled = settings.enabled_providers();
	info!("Enabled providers: {}", enabled.len());
	for (id, provider) in &enabled {
		info!(
			"  - {}: {} ({}ms timeout)",
			id, provider.endpoint, provider.timeout_ms
		);
	}
	info!(
		"Refresh cadence: {}ms debounce, {}s periodic",
		settings.timeouts.debounce_ms, settings.timeouts.refresh_interval_secs
	);
	if settings.execution.simulated {
		info!("Execution mode: simulated (no wallet interaction)");
	}
}
