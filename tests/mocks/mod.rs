//! Shared fixtures for integration tests

#![allow(dead_code)]

pub mod entities;

use std::sync::Arc;
use std::time::Duration;

use swapflow::mocks::MockAdapter;
use swapflow::{
	EngineState, ProviderAdapter, Settings, SwapEngine, SwapEngineBuilder, WalletSession,
};

/// Settings with a short debounce so tests stay fast
pub fn fast_settings() -> Settings {
	let mut settings = Settings::default();
	settings.timeouts.debounce_ms = 50;
	settings.timeouts.refresh_interval_secs = 15;
	settings
}

/// Engine with two mock providers, registered as "p1" then "p2"
pub fn two_provider_engine(
	first: &MockAdapter,
	second: &MockAdapter,
	wallet: Option<Arc<dyn WalletSession>>,
) -> SwapEngine {
	let mut builder = SwapEngineBuilder::new()
		.with_settings(fast_settings())
		.without_default_adapters()
		.with_adapter(Arc::new(first.clone()))
		.with_adapter(Arc::new(second.clone()))
		.with_provider(entities::provider("p1", first.id()))
		.with_provider(entities::provider("p2", second.id()));

	if let Some(wallet) = wallet {
		builder = builder.with_wallet(wallet);
	}

	builder.build().expect("engine builds")
}

/// Wait until the observable state satisfies a predicate
pub async fn wait_until(
	engine: &SwapEngine,
	predicate: impl Fn(&EngineState) -> bool,
) -> EngineState {
	tokio::time::timeout(Duration::from_secs(120), async {
		let mut rx = engine.subscribe();
		loop {
			{
				let state = rx.borrow().clone();
				if predicate(&state) {
					return state;
				}
			}
			rx.changed().await.expect("engine state channel closed");
		}
	})
	.await
	.expect("engine never reached the expected state")
}

/// Wait for a settled (non-loading) result set
pub async fn wait_for_quotes(engine: &SwapEngine) -> EngineState {
	wait_until(engine, |state| !state.is_loading && !state.quotes.is_empty()).await
}
