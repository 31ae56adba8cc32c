//! Swap request model and fingerprinting

use serde::{Deserialize, Serialize};

use crate::models::{Token, U256};

/// Address used when no wallet is connected
pub const EMPTY_USER_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

/// One aggregation cycle's input
///
/// Constructed fresh on every cycle and never mutated afterwards; a new
/// request supersedes the old one. Identity is defined by [`fingerprint`],
/// which the engine uses to discard results of superseded requests.
///
/// [`fingerprint`]: SwapRequest::fingerprint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapRequest {
	/// Token being sold
	pub sell_token: Token,

	/// Token being bought
	pub buy_token: Token,

	/// Sell amount in the sell token's smallest unit
	pub amount: U256,

	/// Account performing the swap; [`EMPTY_USER_ADDRESS`] when no wallet
	/// is connected
	pub user_address: String,

	/// Chain the swap executes on
	pub chain_id: u64,

	/// Slippage tolerance in basis points (100 = 1%)
	pub slippage_bps: u16,
}

impl SwapRequest {
	pub fn new(sell_token: Token, buy_token: Token, amount: U256, chain_id: u64) -> Self {
		Self {
			sell_token,
			buy_token,
			amount,
			user_address: EMPTY_USER_ADDRESS.to_string(),
			chain_id,
			slippage_bps: 50,
		}
	}

	pub fn with_user_address(mut self, user_address: impl Into<String>) -> Self {
		self.user_address = user_address.into();
		self
	}

	pub fn with_slippage_bps(mut self, slippage_bps: u16) -> Self {
		self.slippage_bps = slippage_bps;
		self
	}

	/// Canonical identity string over every request field
	///
	/// A newer fingerprint invalidates application of an older one's results;
	/// two requests with equal fingerprints are interchangeable.
	pub fn fingerprint(&self) -> String {
		format!(
			"sell={}|buy={}|amount={}|user={}|chain_id={}|slippage_bps={}",
			self.sell_token.address,
			self.buy_token.address,
			self.amount,
			self.user_address,
			self.chain_id,
			self.slippage_bps
		)
	}

	/// Sub-fingerprint over the trade itself (pair + sell amount)
	///
	/// A change here means the user is making a new decision, so any
	/// provider pin is cleared.
	pub fn trade_key(&self) -> String {
		format!(
			"sell={}|buy={}|amount={}",
			self.sell_token.address, self.buy_token.address, self.amount
		)
	}

	/// Whether the request carries an amount worth quoting
	///
	/// Zero or unparsable amounts produce no aggregation call.
	pub fn has_quotable_amount(&self) -> bool {
		self.amount.validate().is_ok() && !self.amount.is_zero()
	}

	/// Whether a wallet account is attached to this request
	pub fn has_user(&self) -> bool {
		!self.user_address.is_empty() && self.user_address != EMPTY_USER_ADDRESS
	}
}
