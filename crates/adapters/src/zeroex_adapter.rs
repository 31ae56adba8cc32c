//! 0x-style swap API adapter
//!
//! Spender location: the approval spender for this provider lives at the
//! top-level `allowanceTarget` field of the quote payload. The executable
//! transaction lives at the top-level `to`/`data`/`value` fields.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use swapflow_types::{
	AdapterInfo, ProviderAdapter, ProviderError, ProviderResult, ProviderRuntimeConfig, Quote,
	SwapRequest, SwapTransaction, U256,
};
use tracing::debug;

use crate::client::{build_client, extract_error_message};

// ================================
// 0x API MODELS
// ================================

/// Request body in the provider's wire format
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct ZeroExQuoteBody<'a> {
	sell_token: &'a str,
	buy_token: &'a str,
	amount: &'a str,
	user_address: &'a str,
	chain_id: u64,
	slippage: f64,
}

/// 0x-style quote response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZeroExQuoteResponse {
	/// Output amount in the buy token's smallest unit
	pub buy_amount: String,
	/// Decimal precision of the output amount
	pub buy_token_decimals: u8,
	/// Output value in USD
	pub buy_amount_usd: f64,
	/// Estimated gas cost in USD
	pub gas_usd: f64,
	/// Contract that must be approved to move the sell token
	pub allowance_target: String,
	/// Swap router address
	pub to: String,
	/// ABI-encoded call data
	pub data: String,
	/// Native value to attach
	#[serde(default)]
	pub value: Option<String>,
}

/// Convert a 0x-style response into the canonical quote shape
///
/// Pure function: net value is output USD minus gas USD; the raw response
/// rides along as the opaque execution payload.
pub fn normalize_quote(provider_id: &str, response: &ZeroExQuoteResponse) -> ProviderResult<Quote> {
	let payload = serde_json::to_value(response)?;

	let quote = Quote::new(
		provider_id,
		U256::from(response.buy_amount.as_str()),
		response.buy_token_decimals,
		response.gas_usd,
		response.buy_amount_usd - response.gas_usd,
	)
	.with_payload(payload);

	Ok(quote)
}

/// Adapter for 0x-style swap APIs
#[derive(Debug)]
pub struct ZeroExAdapter {
	config: AdapterInfo,
}

impl ZeroExAdapter {
	pub fn new(config: AdapterInfo) -> Self {
		Self { config }
	}

	/// Create the default 0x-style adapter instance
	pub fn with_default_config() -> Self {
		Self::new(
			AdapterInfo::new("zerox-v1", "0x Swap Adapter", "1.0.0")
				.with_description("0x-style swap API adapter"),
		)
	}
}

#[async_trait]
impl ProviderAdapter for ZeroExAdapter {
	fn adapter_info(&self) -> &AdapterInfo {
		&self.config
	}

	async fn fetch_quote(
		&self,
		request: &SwapRequest,
		config: &ProviderRuntimeConfig,
	) -> ProviderResult<Quote> {
		debug!(
			"0x adapter fetching quote for {} -> {} via provider: {}",
			request.sell_token.symbol, request.buy_token.symbol, config.provider_id
		);

		let body = ZeroExQuoteBody {
			sell_token: &request.sell_token.address,
			buy_token: &request.buy_token.address,
			amount: request.amount.as_str(),
			user_address: &request.user_address,
			chain_id: request.chain_id,
			slippage: request.slippage_bps as f64 / 10_000.0,
		};

		let client = build_client("ZeroEx-v1", config)?;
		let quote_url = format!("{}/swap/v1/quote", config.endpoint);

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

		let parsed: ZeroExQuoteResponse =
			serde_json::from_str(&text).map_err(|e| ProviderError::InvalidResponse {
				reason: format!("0x quote body did not parse: {}", e),
			})?;

		normalize_quote(&config.provider_id, &parsed)
	}

	/// Spender lives at `allowanceTarget` in this provider's payload
	fn spender_address(&self, payload: &serde_json::Value) -> ProviderResult<String> {
		payload
			.get("allowanceTarget")
			.and_then(|v| v.as_str())
			.map(|s| s.to_string())
			.ok_or(ProviderError::MissingField {
				field: "allowanceTarget".to_string(),
			})
	}

	fn build_transaction(&self, payload: &serde_json::Value) -> ProviderResult<SwapTransaction> {
		let to = payload
			.get("to")
			.and_then(|v| v.as_str())
			.ok_or(ProviderError::MissingField {
				field: "to".to_string(),
			})?;
		let data = payload
			.get("data")
			.and_then(|v| v.as_str())
			.ok_or(ProviderError::MissingField {
				field: "data".to_string(),
			})?;
		let value = payload
			.get("value")
			.and_then(|v| v.as_str())
			.unwrap_or("0");

		Ok(SwapTransaction::new(to, data, U256::from(value)))
	}

	async fn health_check(&self, config: &ProviderRuntimeConfig) -> ProviderResult<bool> {
		let client = build_client("ZeroEx-v1", config)?;
		let health_url = format!("{}/swap/v1/healthz", config.endpoint);

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

	fn sample_response() -> ZeroExQuoteResponse {
		ZeroExQuoteResponse {
			buy_amount: "2500000000".to_string(),
			buy_token_decimals: 6,
			buy_amount_usd: 2500.0,
			gas_usd: 4.5,
			allowance_target: "0xdef1c0ded9bec7f1a1670819833240f027b25eff".to_string(),
			to: "0xdef1c0ded9bec7f1a1670819833240f027b25eff".to_string(),
			data: "0xd9627aa4".to_string(),
			value: Some("0".to_string()),
		}
	}

	#[test]
	fn test_normalize_quote() {
		let quote = normalize_quote("zerox-mainnet", &sample_response()).unwrap();

		assert_eq!(quote.provider_id, "zerox-mainnet");
		assert_eq!(quote.amount_out.as_str(), "2500000000");
		assert_eq!(quote.decimals, 6);
		assert_eq!(quote.net_value_usd, 2495.5);
		assert!(quote.is_available());
		assert!(!quote.payload.is_null());
	}

	#[test]
	fn test_spender_extraction() {
		let adapter = ZeroExAdapter::with_default_config();
		let quote = normalize_quote("zerox-mainnet", &sample_response()).unwrap();

		let spender = adapter.spender_address(&quote.payload).unwrap();
		assert_eq!(spender, "0xdef1c0ded9bec7f1a1670819833240f027b25eff");
	}

	#[test]
	fn test_spender_missing_field() {
		let adapter = ZeroExAdapter::with_default_config();
		let result = adapter.spender_address(&serde_json::json!({}));
		assert!(matches!(result, Err(ProviderError::MissingField { .. })));
	}

	#[test]
	fn test_build_transaction() {
		let adapter = ZeroExAdapter::with_default_config();
		let quote = normalize_quote("zerox-mainnet", &sample_response()).unwrap();

		let tx = adapter.build_transaction(&quote.payload).unwrap();
		assert_eq!(tx.to, "0xdef1c0ded9bec7f1a1670819833240f027b25eff");
		assert_eq!(tx.data, "0xd9627aa4");
		assert!(tx.value.is_zero());
		assert!(tx.gas_limit.is_none());
	}

	#[test]
	fn test_build_transaction_missing_calldata() {
		let adapter = ZeroExAdapter::with_default_config();
		let payload = serde_json::json!({ "to": "0xdef1" });

		let result = adapter.build_transaction(&payload);
		assert!(matches!(
			result,
			Err(ProviderError::MissingField { ref field }) if field == "data"
		));
	}
}
