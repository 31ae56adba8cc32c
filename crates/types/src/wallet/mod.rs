//! Wallet session contract consumed by the swap executor
//!
//! The engine never talks to a chain directly; everything goes through this
//! trait so the UI layer can plug in whatever wallet/connector it ships.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod errors;

pub use errors::{WalletError, WalletResult};

use crate::models::U256;

/// Outcome of asking the wallet to switch chains
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainSwitchOutcome {
	/// The wallet switched; the signer may be stale and the swap must be
	/// re-invoked by the user
	Accepted,
	/// The user declined the switch prompt
	Rejected,
	/// The wallet cannot switch to the requested chain
	Unsupported,
}

/// Executable transaction built from a quote payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapTransaction {
	/// Destination contract address
	pub to: String,

	/// ABI-encoded call data, 0x-prefixed hex
	pub data: String,

	/// Native value to attach, smallest units
	pub value: U256,

	/// Gas limit; set by the executor after estimation
	pub gas_limit: Option<u64>,
}

impl SwapTransaction {
	pub fn new(to: impl Into<String>, data: impl Into<String>, value: U256) -> Self {
		Self {
			to: to.into(),
			data: data.into(),
			value,
			gas_limit: None,
		}
	}

	pub fn with_gas_limit(mut self, gas_limit: u64) -> Self {
		self.gas_limit = Some(gas_limit);
		self
	}
}

/// Handle for a submitted transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxHandle(pub String);

impl TxHandle {
	pub fn new(hash: impl Into<String>) -> Self {
		Self(hash.into())
	}

	pub fn hash(&self) -> &str {
		&self.0
	}
}

/// Confirmation receipt for a mined transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TxReceipt {
	pub tx_hash: String,
	pub block_number: u64,
	pub success: bool,
}

/// Wallet capability consumed (never implemented) by the engine
#[async_trait]
pub trait WalletSession: Send + Sync {
	/// Connected account address, if any
	fn account(&self) -> Option<String>;

	/// Chain the wallet is currently on, if known
	fn chain_id(&self) -> Option<u64>;

	/// Whether the session is authorized to sign transactions
	fn can_sign(&self) -> bool;

	/// Ask the wallet to switch to the given chain
	async fn request_chain_switch(&self, chain_id: u64) -> WalletResult<ChainSwitchOutcome>;

	/// Estimate gas for a transaction
	async fn estimate_gas(&self, tx: &SwapTransaction) -> WalletResult<u64>;

	/// Submit a transaction
	async fn send_transaction(&self, tx: &SwapTransaction) -> WalletResult<TxHandle>;

	/// Wait for a submitted transaction to confirm
	async fn wait_for_confirmation(&self, handle: &TxHandle) -> WalletResult<TxReceipt>;

	/// Read the current ERC-20 allowance for a spender
	async fn read_allowance(&self, token: &str, owner: &str, spender: &str) -> WalletResult<U256>;

	/// Submit an approval transaction for a spender
	async fn send_approval(&self, token: &str, spender: &str, amount: &U256)
		-> WalletResult<TxHandle>;
}
