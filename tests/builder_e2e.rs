//! Builder wiring from configuration

use swapflow::{ProviderSettings, Settings, SwapEngineBuilder, SwapPhase};

fn provider_settings(id: &str, adapter_id: &str) -> ProviderSettings {
	ProviderSettings {
		provider_id: id.to_string(),
		adapter_id: adapter_id.to_string(),
		endpoint: "https://quotes.example.com".to_string(),
		timeout_ms: 4_000,
		enabled: true,
		headers: None,
		name: None,
		description: None,
	}
}

#[tokio::test]
async fn builds_from_settings_with_default_adapters() {
	let mut settings = Settings::default();
	settings.providers.insert(
		"zerox-mainnet".to_string(),
		provider_settings("zerox-mainnet", "zerox-v1"),
	);
	settings.providers.insert(
		"oneinch-mainnet".to_string(),
		provider_settings("oneinch-mainnet", "oneinch-v1"),
	);

	let engine = SwapEngineBuilder::from_config(settings).build().unwrap();

	let state = engine.snapshot();
	assert!(state.quotes.is_empty());
	assert_eq!(state.swap_phase, SwapPhase::Idle);
	assert!(state.error.is_none());
}

#[tokio::test]
async fn unknown_adapter_in_settings_fails_the_build() {
	let mut settings = Settings::default();
	settings.providers.insert(
		"mystery".to_string(),
		provider_settings("mystery", "no-such-adapter"),
	);

	let error = SwapEngineBuilder::from_config(settings)
		.build()
		.err()
		.expect("build must fail");
	assert!(error.to_string().contains("Provider validation failed"));
}

#[tokio::test]
async fn disabled_providers_do_not_require_adapters() {
	let mut settings = Settings::default();
	let mut orphan = provider_settings("orphan", "no-such-adapter");
	orphan.enabled = false;
	settings.providers.insert("orphan".to_string(), orphan);

	assert!(SwapEngineBuilder::from_config(settings).build().is_ok());
}
