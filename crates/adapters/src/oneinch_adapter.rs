//! 1inch-style swap API adapter
//!
//! Spender location: this provider nests the executable transaction under
//! the `tx` object of the quote payload, and the approval spender is the
//! router itself, i.e. `tx.to`. Call data lives at `tx.data` and the native
//! value at `tx.value`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use swapflow_types::{
	AdapterInfo, ProviderAdapter, ProviderError, ProviderResult, ProviderRuntimeConfig, Quote,
	SwapRequest, SwapTransaction, U256,
};
use tracing::debug;

use crate::client::{build_client, extract_error_message};

// ================================
// 1INCH API MODELS
// ================================

/// Request body in the provider's wire format
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct OneInchQuoteBody<'a> {
	sell_token: &'a str,
	buy_token: &'a str,
	amount: &'a str,
	user_address: &'a str,
	chain_id: u64,
	slippage: f64,
}

/// Destination token details as reported by the provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OneInchToken {
	pub address: String,
	pub decimals: u8,
}

/// Executable transaction as reported by the provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OneInchTx {
	pub to: String,
	pub data: String,
	#[serde(default)]
	pub value: Option<String>,
}

/// 1inch-style quote response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OneInchQuoteResponse {
	/// Output amount in the buy token's smallest unit
	pub to_amount: String,
	/// Destination token details
	pub to_token: OneInchToken,
	/// Output value in USD
	pub to_amount_usd: f64,
	/// Estimated gas cost in USD
	pub gas_usd: f64,
	/// Executable transaction
	pub tx: OneInchTx,
}

/// Convert a 1inch-style response into the canonical quote shape
pub fn normalize_quote(
	provider_id: &str,
	response: &OneInchQuoteResponse,
) -> ProviderResult<Quote> {
	let payload = serde_json::to_value(response)?;

	let quote = Quote::new(
		provider_id,
		U256::from(response.to_amount.as_str()),
		response.to_token.decimals,
		response.gas_usd,
		response.to_amount_usd - response.gas_usd,
	)
	.with_payload(payload);

	Ok(quote)
}

/// Adapter for 1inch-style swap APIs
#[derive(Debug)]
pub struct OneInchAdapter {
	config: AdapterInfo,
}

impl OneInchAdapter {
	pub fn new(config: AdapterInfo) -> Self {
		Self { config }
	}

	/// Create the default 1inch-style adapter instance
	pub fn with_default_config() -> Self {
		Self::new(
			AdapterInfo::new("oneinch-v1", "1inch Swap Adapter", "1.0.0")
				.with_description("1inch-style swap API adapter"),
		)
	}

	fn tx_object<'a>(&self, payload: &'a serde_json::Value) -> ProviderResult<&'a serde_json::Value> {
		payload.get("tx").ok_or(ProviderError::MissingField {
			field: "tx".to_string(),
		})
	}
}

#[async_trait]
impl ProviderAdapter for OneInchAdapter {
	fn adapter_info(&self) -> &AdapterInfo {
		&self.config
	}

	async fn fetch_quote(
		&self,
		request: &SwapRequest,
		config: &ProviderRuntimeConfig,
	) -> ProviderResult<Quote> {
		debug!(
			"1inch adapter fetching quote for {} -> {} via provider: {}",
			request.sell_token.symbol, request.buy_token.symbol, config.provider_id
		);

		let body = OneInchQuoteBody {
			sell_token: &request.sell_token.address,
			buy_token: &request.buy_token.address,
			amount: request.amount.as_str(),
			user_address: &request.user_address,
			chain_id: request.chain_id,
			slippage: request.slippage_bps as f64 / 10_000.0,
		};

		let client = build_client("OneInch-v1", config)?;
		let quote_url = format!("{}/swap", config.endpoint);

		let response = client
			.post(&quote_url)
			.json(&body)
			.send()
			.await
			.map_err(ProviderError::Http)?;

		let status = response.status();
		let text = response.text().await.map_err(ProviderError::Http)?;

		if !status.is_success() {
			return Err(ProviderError::http_failure(
				status.as_u16(),
				extract_error_message(&text),
			));
		}

		let parsed: OneInchQuoteResponse =
			serde_json::from_str(&text).map_err(|e| ProviderError::InvalidResponse {
				reason: format!("1inch quote body did not parse: {}", e),
			})?;

		normalize_quote(&config.provider_id, &parsed)
	}

	/// Spender is the router address at `tx.to` in this provider's payload
	fn spender_address(&self, payload: &serde_json::Value) -> ProviderResult<String> {
		self.tx_object(payload)?
			.get("to")
			.and_then(|v| v.as_str())
			.map(|s| s.to_string())
			.ok_or(ProviderError::MissingField {
				field: "tx.to".to_string(),
			})
	}

	fn build_transaction(&self, payload: &serde_json::Value) -> ProviderResult<SwapTransaction> {
		let tx = self.tx_object(payload)?;

		let to = tx
			.get("to")
			.and_then(|v| v.as_str())
			.ok_or(ProviderError::MissingField {
				field: "tx.to".to_string(),
			})?;
		let data = tx
			.get("data")
			.and_then(|v| v.as_str())
			.ok_or(ProviderError::MissingField {
				field: "tx.data".to_string(),
			})?;
		let value = tx.get("value").and_then(|v| v.as_str()).unwrap_or("0");

		Ok(SwapTransaction::new(to, data, U256::from(value)))
	}

	async fn health_check(&self, config: &ProviderRuntimeConfig) -> ProviderResult<bool> {
		let client = build_client("OneInch-v1", config)?;
		let health_url = format!("{}/healthcheck", config.endpoint);

		let response = client
			.get(&health_url)
			.send()
			.await
			.map_err(ProviderError::Http)?;

		Ok(response.status().is_success())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sample_response() -> OneInchQuoteResponse {
		OneInchQuoteResponse {
			to_amount: "1795500000".to_string(),
			to_token: OneInchToken {
				address: "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48".to_string(),
				decimals: 6,
			},
			to_amount_usd: 1798.7,
			gas_usd: 3.2,
			tx: OneInchTx {
				to: "0x1111111254eeb25477b68fb85ed929f73a960582".to_string(),
				data: "0x12aa3caf".to_string(),
				value: Some("1000000000000000000".to_string()),
			},
		}
	}

	#[test]
	fn test_normalize_quote() {
		let quote = normalize_quote("oneinch-mainnet", &sample_response()).unwrap();

		assert_eq!(quote.provider_id, "oneinch-mainnet");
		assert_eq!(quote.amount_out.as_str(), "1795500000");
		assert_eq!(quote.decimals, 6);
		assert!((quote.net_value_usd - 1795.5).abs() < 1e-9);
	}

	#[test]
	fn test_spender_is_router() {
		let adapter = OneInchAdapter::with_default_config();
		let quote = normalize_quote("oneinch-mainnet", &sample_response()).unwrap();

		let spender = adapter.spender_address(&quote.payload).unwrap();
		assert_eq!(spender, "0x1111111254eeb25477b68fb85ed929f73a960582");
	}

	#[test]
	fn test_build_transaction_carries_native_value() {
		let adapter = OneInchAdapter::with_default_config();
		let quote = normalize_quote("oneinch-mainnet", &sample_response()).unwrap();

		let tx = adapter.build_transaction(&quote.payload).unwrap();
		assert_eq!(tx.to, "0x1111111254eeb25477b68fb85ed929f73a960582");
		assert_eq!(tx.value.as_str(), "1000000000000000000");
	}

	#[test]
	fn test_missing_tx_object() {
		let adapter = OneInchAdapter::with_default_config();
		let payload = serde_json::json!({ "toAmount": "1" });

		assert!(matches!(
			adapter.build_transaction(&payload),
			Err(ProviderError::MissingField { ref field }) if field == "tx"
		));
	}
}
