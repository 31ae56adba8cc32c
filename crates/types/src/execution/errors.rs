//! Error types for swap execution

use thiserror::Error;

use crate::wallet::WalletError;

/// Result type for swap execution
pub type SwapResult<T> = Result<T, SwapError>;

/// Errors that end a swap attempt and reset the machine to idle
///
/// Every variant is a distinct rejected-with-reason outcome, not a crash;
/// nothing here is retried automatically. Retry is always an explicit new
/// user action.
#[derive(Error, Debug, Clone)]
pub enum SwapError {
	#[error("Connect wallet before swapping")]
	WalletNotConnected,

	#[error("Reconnect wallet: session cannot sign transactions")]
	WalletNotAuthorized,

	#[error("No quote available")]
	NoQuoteAvailable,

	#[error("A swap attempt is already in flight")]
	AlreadyInFlight,

	#[error("Network switch rejected")]
	NetworkSwitchRejected,

	#[error("Manual network switch to chain {chain_id} required")]
	ManualSwitchRequired { chain_id: u64 },

	#[error("Approval failed: {reason}")]
	ApprovalFailed { reason: String },

	#[error("Malformed provider payload: {reason}")]
	TransactionConstruction { reason: String },

	#[error("Transaction reverted: {reason}")]
	TransactionReverted { reason: String },

	#[error("User rejected the transaction")]
	UserRejected,

	#[error("Wallet error: {0}")]
	Wallet(#[from] WalletError),
}

impl SwapError {
	/// Classify a wallet error raised during submission/confirmation
	pub fn from_submission(error: WalletError) -> Self {
		match error {
			WalletError::Rejected => SwapError::UserRejected,
			WalletError::Reverted { reason } => SwapError::TransactionReverted { reason },
			other => SwapError::Wallet(other),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_submission_classification() {
		assert!(matches!(
			SwapError::from_submission(WalletError::Rejected),
			SwapError::UserRejected
		));
		assert!(matches!(
			SwapError::from_submission(WalletError::Reverted {
				reason: "out of gas".to_string()
			}),
			SwapError::TransactionReverted { .. }
		));
		assert!(matches!(
			SwapError::from_submission(WalletError::rpc("nonce too low")),
			SwapError::Wallet(_)
		));
	}
}
