//! Core Quote domain model and business logic

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::U256;

pub mod request;

pub use request::{SwapRequest, EMPTY_USER_ADDRESS};

/// A single provider's answer for one aggregation cycle
///
/// Quotes are value objects, recomputed wholesale on each cycle and never
/// patched in place. A quote carrying an error string is "unavailable": it is
/// excluded from ranking and selection but still shown as a failed row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
	/// Unique identifier for the quote
	pub quote_id: String,

	/// ID of the provider that produced this quote
	pub provider_id: String,

	/// Output amount in the buy token's smallest unit
	pub amount_out: U256,

	/// Decimal precision of the output amount
	pub decimals: u8,

	/// Estimated gas cost of the swap, in USD
	pub gas_usd: f64,

	/// Estimated net value (output value minus gas cost), in USD
	pub net_value_usd: f64,

	/// Raw provider-specific route payload, consumed only by the executor
	pub payload: serde_json::Value,

	/// Set on exactly the winning quote of a result set
	pub is_best: bool,

	/// Populated when the provider failed to quote
	pub error: Option<String>,

	/// When the quote was created
	pub created_at: DateTime<Utc>,
}

impl Quote {
	/// Create a successful quote
	pub fn new(
		provider_id: impl Into<String>,
		amount_out: U256,
		decimals: u8,
		gas_usd: f64,
		net_value_usd: f64,
	) -> Self {
		Self {
			quote_id: Uuid::new_v4().to_string(),
			provider_id: provider_id.into(),
			amount_out,
			decimals,
			gas_usd,
			net_value_usd,
			payload: serde_json::Value::Null,
			is_best: false,
			error: None,
			created_at: Utc::now(),
		}
	}

	/// Create a failed row for a provider that could not quote
	pub fn unavailable(provider_id: impl Into<String>, error: impl Into<String>) -> Self {
		Self {
			quote_id: Uuid::new_v4().to_string(),
			provider_id: provider_id.into(),
			amount_out: U256::zero(),
			decimals: 0,
			gas_usd: 0.0,
			net_value_usd: 0.0,
			payload: serde_json::Value::Null,
			is_best: false,
			error: Some(error.into()),
			created_at: Utc::now(),
		}
	}

	pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
		self.payload = payload;
		self
	}

	/// Whether the quote can participate in ranking and selection
	///
	/// Requires no provider error and a finite net value.
	pub fn is_available(&self) -> bool {
		self.error.is_none() && self.net_value_usd.is_finite()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_quote_creation() {
		let quote = Quote::new("paraswap", U256::from("2500000000"), 6, 4.2, 2495.8);

		assert_eq!(quote.provider_id, "paraswap");
		assert!(quote.is_available());
		assert!(!quote.is_best);
		assert!(quote.error.is_none());
	}

	#[test]
	fn test_unavailable_quote() {
		let quote = Quote::unavailable("zerox", "HTTP 503: Service Unavailable");

		assert!(!quote.is_available());
		assert_eq!(quote.error.as_deref(), Some("HTTP 503: Service Unavailable"));
		assert!(quote.amount_out.is_zero());
	}

	#[test]
	fn test_nan_net_value_is_unavailable() {
		let quote = Quote::new("odd", U256::from("1"), 18, 0.0, f64::NAN);
		assert!(!quote.is_available());
	}
}
