//! Token model shared between quotes, requests and the swap executor

use serde::{Deserialize, Serialize};

/// Sentinel address used by routing providers to denote the chain's
/// native asset (ETH, MATIC, ...) instead of an ERC-20 contract.
pub const NATIVE_TOKEN_ADDRESS: &str = "0xeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee";

/// A tradeable token on a specific chain
///
/// Tokens are immutable value objects; display metadata rides along so the
/// UI layer never needs a second lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
	/// Token contract address (or the native sentinel address)
	pub address: String,

	/// Ticker symbol, e.g. "USDC"
	pub symbol: String,

	/// Human-readable name
	pub name: String,

	/// Decimal precision of the smallest unit
	pub decimals: u8,

	/// Chain the token lives on
	pub chain_id: u64,

	/// Optional logo for display purposes
	pub logo_uri: Option<String>,
}

impl Token {
	pub fn new(
		address: impl Into<String>,
		symbol: impl Into<String>,
		name: impl Into<String>,
		decimals: u8,
		chain_id: u64,
	) -> Self {
		Self {
			address: address.into().to_lowercase(),
			symbol: symbol.into(),
			name: name.into(),
			decimals,
			chain_id,
			logo_uri: None,
		}
	}

	/// Construct the native asset token for a chain
	pub fn native(symbol: impl Into<String>, name: impl Into<String>, chain_id: u64) -> Self {
		Self::new(NATIVE_TOKEN_ADDRESS, symbol, name, 18, chain_id)
	}

	pub fn with_logo(mut self, logo_uri: impl Into<String>) -> Self {
		self.logo_uri = Some(logo_uri.into());
		self
	}

	/// Whether this token is the chain's native asset
	pub fn is_native(&self) -> bool {
		self.address.eq_ignore_ascii_case(NATIVE_TOKEN_ADDRESS)
	}
}
