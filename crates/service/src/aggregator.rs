//! Core aggregation service logic

use futures::future::join_all;
use std::sync::Arc;
use swapflow_adapters::AdapterRegistry;
use swapflow_types::{Provider, ProviderError, ProviderRuntimeConfig, Quote, SwapRequest};
use thiserror::Error;
use tokio::time::{timeout, Duration};
use tracing::{debug, info, warn};

/// Aggregation-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AggregatorServiceError {
	#[error("No route found: every provider failed to quote")]
	NoRouteFound,

	#[error("Provider '{provider_id}' references unknown adapter '{adapter_id}'")]
	UnknownAdapter {
		provider_id: String,
		adapter_id: String,
	},
}

/// One aggregation cycle's complete result
///
/// Carries one quote row per enabled provider regardless of outcome, the
/// winning quote (if any) and the fingerprint of the request that produced
/// it so callers can discard superseded results.
#[derive(Debug, Clone)]
pub struct AggregationOutcome {
	pub fingerprint: String,
	pub quotes: Vec<Quote>,
	pub best_quote: Option<Quote>,
	pub error: Option<AggregatorServiceError>,
}

/// Service for aggregating quotes from multiple providers
///
/// Providers are kept in registration order; ties in net value break in
/// favor of the provider registered first.
pub struct AggregatorService {
	providers: Vec<Provider>,
	adapter_registry: Arc<AdapterRegistry>,
}

impl AggregatorService {
	/// Create a new aggregator service with pre-configured adapters
	pub fn new(providers: Vec<Provider>, adapter_registry: Arc<AdapterRegistry>) -> Self {
		Self {
			providers,
			adapter_registry,
		}
	}

	/// Validate that all providers have matching adapters
	pub fn validate_providers(&self) -> Result<(), AggregatorServiceError> {
		for provider in &self.providers {
			if self.adapter_registry.get(&provider.adapter_id).is_none() {
				return Err(AggregatorServiceError::UnknownAdapter {
					provider_id: provider.provider_id.clone(),
					adapter_id: provider.adapter_id.clone(),
				});
			}
		}
		Ok(())
	}

	pub fn providers(&self) -> &[Provider] {
		&self.providers
	}

	/// Fetch quotes concurrently from all enabled providers
	///
	/// Fires every adapter call at once and waits for all of them to settle.
	/// A provider that fails or exceeds its own timeout contributes a failed
	/// row instead of blocking the others.
	pub async fn fetch_quotes(&self, request: &SwapRequest) -> AggregationOutcome {
		let fingerprint = request.fingerprint();
		let enabled: Vec<&Provider> = self.providers.iter().filter(|p| p.enabled).collect();

		info!(
			"Fetching quotes for {} {} -> {} from {} providers",
			request.amount, request.sell_token.symbol, request.buy_token.symbol,
			enabled.len()
		);

		let tasks = enabled.iter().map(|provider| {
			let request = request.clone();
			let provider = (*provider).clone();
			let adapter_registry = Arc::clone(&self.adapter_registry);

			tokio::spawn(async move {
				let provider_id = provider.provider_id.clone();
				debug!("Starting quote fetch from provider {}", provider_id);

				let adapter = match adapter_registry.get(&provider.adapter_id) {
					Some(adapter) => adapter,
					None => {
						warn!(
							"No adapter found for provider {} (adapter_id: {})",
							provider_id, provider.adapter_id
						);
						return Quote::unavailable(
							&provider_id,
							format!("unknown adapter '{}'", provider.adapter_id),
						);
					},
				};

				let config = ProviderRuntimeConfig::from(&provider);
				let call = adapter.fetch_quote(&request, &config);
				match timeout(Duration::from_millis(provider.timeout_ms), call).await {
					Ok(Ok(quote)) => {
						debug!("Successfully got quote from provider {}", provider_id);
						quote
					},
					Ok(Err(e)) => {
						warn!("Provider {} returned error: {}", provider_id, e);
						Quote::unavailable(&provider_id, e.to_string())
					},
					Err(_) => {
						warn!(
							"Provider {} timed out after {}ms",
							provider_id, provider.timeout_ms
						);
						let timeout_error = ProviderError::Timeout {
							timeout_ms: provider.timeout_ms,
						};
						Quote::unavailable(&provider_id, timeout_error.to_string())
					},
				}
			})
		});

		// join_all preserves submission order, which is registration order
		let mut quotes: Vec<Quote> = join_all(tasks)
			.await
			.into_iter()
			.filter_map(|r| r.ok())
			.collect();

		let best_index = rank_quotes(&quotes);
		if let Some(index) = best_index {
			quotes[index].is_best = true;
		}
		let best_quote = best_index.map(|index| quotes[index].clone());

		let error = if best_quote.is_none() {
			Some(AggregatorServiceError::NoRouteFound)
		} else {
			None
		};

		info!(
			"Quote aggregation completed: {}/{} providers quoted",
			quotes.iter().filter(|q| q.is_available()).count(),
			quotes.len()
		);

		AggregationOutcome {
			fingerprint,
			quotes,
			best_quote,
			error,
		}
	}

	/// Perform health checks on all enabled providers
	pub async fn health_check_all(&self) -> Vec<(String, bool)> {
		let mut results = Vec::new();

		for provider in self.providers.iter().filter(|p| p.enabled) {
			let healthy = match self.adapter_registry.get(&provider.adapter_id) {
				Some(adapter) => {
					let config = ProviderRuntimeConfig::from(provider);
					adapter.health_check(&config).await.unwrap_or(false)
				},
				None => false,
			};
			results.push((provider.provider_id.clone(), healthy));
		}

		results
	}

	/// Get aggregation statistics
	pub fn stats(&self) -> AggregationStats {
		AggregationStats {
			total_providers: self.providers.len(),
			enabled_providers: self.providers.iter().filter(|p| p.enabled).count(),
			initialized_adapters: self.adapter_registry.len(),
		}
	}
}

/// Index of the winning quote, if any
///
/// The winner is the available quote with the highest net value in USD;
/// earlier registration wins ties because only a strictly greater value
/// displaces the current winner.
fn rank_quotes(quotes: &[Quote]) -> Option<usize> {
	let mut best_index: Option<usize> = None;
	for (index, quote) in quotes.iter().enumerate() {
		if !quote.is_available() {
			continue;
		}
		let displaces = match best_index {
			Some(current) => quote.net_value_usd > quotes[current].net_value_usd,
			None => true,
		};
		if displaces {
			best_index = Some(index);
		}
	}
	best_index
}

/// Aggregation service statistics
#[derive(Debug, Clone)]
pub struct AggregationStats {
	pub total_providers: usize,
	pub enabled_providers: usize,
	pub initialized_adapters: usize,
}

#[cfg(test)]
mod tests {
	use super::*;
	use swapflow_types::U256;

	fn quote(provider_id: &str, net_value_usd: f64) -> Quote {
		Quote::new(provider_id, U256::from("1000"), 6, 1.0, net_value_usd)
	}

	#[test]
	fn test_rank_highest_net_value_wins() {
		let quotes = vec![quote("a", 1795.5), quote("b", 1800.0), quote("c", 160.0)];
		assert_eq!(rank_quotes(&quotes), Some(1));
	}

	#[test]
	fn test_rank_ties_break_by_registration_order() {
		let quotes = vec![quote("first", 100.0), quote("second", 100.0)];
		assert_eq!(rank_quotes(&quotes), Some(0));
	}

	#[test]
	fn test_rank_skips_failed_and_nan_quotes() {
		let quotes = vec![
			Quote::unavailable("down", "HTTP 503"),
			quote("ok", 5.0),
			Quote::new("odd", U256::from("1"), 18, 0.0, f64::NAN),
		];
		assert_eq!(rank_quotes(&quotes), Some(1));
	}

	#[test]
	fn test_rank_all_failed_is_none() {
		let quotes = vec![
			Quote::unavailable("a", "timeout"),
			Quote::unavailable("b", "no route"),
		];
		assert_eq!(rank_quotes(&quotes), None);
	}
}
