//! Core adapter trait for provider implementations

use super::{AdapterInfo, ProviderError, ProviderResult};
use crate::providers::ProviderRuntimeConfig;
use crate::quotes::{Quote, SwapRequest};
use crate::wallet::SwapTransaction;
use async_trait::async_trait;
use std::fmt::Debug;

/// Core trait for provider adapter implementations
///
/// Wraps one external quote/routing API behind a uniform contract. Adapters
/// serialize the request into their provider's format, call the endpoint and
/// map any non-success HTTP or payload-level error into a [`ProviderError`] -
/// never a panic. The aggregator turns those errors into failed quote rows.
#[async_trait]
pub trait ProviderAdapter: Send + Sync + Debug {
	/// Get adapter configuration information
	fn adapter_info(&self) -> &AdapterInfo;

	/// Get adapter ID (for registration and provider matching)
	fn id(&self) -> &str {
		&self.adapter_info().adapter_id
	}

	/// Fetch one quote for the request using runtime configuration
	///
	/// The per-call timeout is enforced by the aggregator around this call;
	/// implementations do not need their own deadline.
	async fn fetch_quote(
		&self,
		request: &SwapRequest,
		config: &ProviderRuntimeConfig,
	) -> ProviderResult<Quote>;

	/// Extract the approval spender address from a quote payload
	///
	/// The spender's location is provider-specific; every adapter that
	/// supports execution must document where it lives in its payload.
	/// Default implementation reports the operation as unsupported.
	fn spender_address(&self, _payload: &serde_json::Value) -> ProviderResult<String> {
		Err(ProviderError::UnsupportedOperation {
			operation: "spender_address".to_string(),
			adapter_id: self.id().to_string(),
		})
	}

	/// Build the executable transaction from a quote payload
	///
	/// Missing destination or call data must surface as
	/// [`ProviderError::MissingField`] so the executor can distinguish a
	/// malformed payload from an on-chain revert.
	/// Default implementation reports the operation as unsupported.
	fn build_transaction(&self, _payload: &serde_json::Value) -> ProviderResult<SwapTransaction> {
		Err(ProviderError::UnsupportedOperation {
			operation: "build_transaction".to_string(),
			adapter_id: self.id().to_string(),
		})
	}

	/// Health check for the provider using runtime configuration
	async fn health_check(&self, config: &ProviderRuntimeConfig) -> ProviderResult<bool>;

	/// Get human-readable name for this adapter
	fn name(&self) -> &str {
		&self.adapter_info().name
	}

	/// Get adapter version
	fn version(&self) -> &str {
		&self.adapter_info().version
	}
}
