//! Error types for wallet operations

use thiserror::Error;

/// Result type for wallet operations
pub type WalletResult<T> = Result<T, WalletError>;

/// Errors surfaced by a wallet session
#[derive(Error, Debug, Clone)]
pub enum WalletError {
	#[error("RPC error: {reason}")]
	Rpc { reason: String },

	#[error("User rejected the request")]
	Rejected,

	#[error("Operation not supported by wallet: {reason}")]
	Unsupported { reason: String },

	#[error("Transaction reverted: {reason}")]
	Reverted { reason: String },
}

impl WalletError {
	pub fn rpc(reason: impl Into<String>) -> Self {
		Self::Rpc {
			reason: reason.into(),
		}
	}
}
