//! Swap execution state machine
//!
//! Turns a selected quote plus a wallet session into a confirmed
//! transaction: network check, token approval, gas estimation, submission
//! and confirmation, with failure recovery at every step. The machine is
//! never left in a non-idle phase after a call returns; every error path is
//! classified and handed back to the caller.

use std::collections::HashMap;
use std::sync::Arc;
use swapflow_adapters::AdapterRegistry;
use swapflow_types::{
	ChainSwitchOutcome, Provider, ProviderAdapter, Quote, SwapError, SwapPhase, SwapRequest,
	SwapResult, SwapTransaction, TxReceipt, WalletSession,
};
use tokio::time::{sleep, Duration};
use tracing::{debug, info, warn};

/// Execution knobs
#[derive(Debug, Clone)]
pub struct ExecutorConfig {
	/// Safety margin applied to successful gas estimates, in percent
	pub gas_margin_pct: u64,
	/// Gas limit used when estimation fails
	pub fallback_gas_limit: u64,
	/// Delay per simulated step in milliseconds
	pub simulated_step_ms: u64,
}

impl Default for ExecutorConfig {
	fn default() -> Self {
		Self {
			gas_margin_pct: 10,
			fallback_gas_limit: 1_500_000,
			simulated_step_ms: 800,
		}
	}
}

/// How a swap attempt ended
#[derive(Debug, Clone, PartialEq)]
pub enum ExecutionOutcome {
	/// Transaction confirmed on chain
	Confirmed(TxReceipt),
	/// The wallet switched chains; the user must re-invoke the swap since
	/// the signer may be stale after the change
	ChainSwitched,
	/// Simulated walk completed
	Simulated,
}

/// Apply the safety margin to a successful gas estimate
pub fn apply_gas_margin(estimate: u64, margin_pct: u64) -> u64 {
	estimate.saturating_add(estimate.saturating_mul(margin_pct) / 100)
}

/// One-attempt swap state machine
pub struct SwapExecutor {
	providers: HashMap<String, Provider>,
	adapter_registry: Arc<AdapterRegistry>,
	config: ExecutorConfig,
}

impl SwapExecutor {
	pub fn new(
		providers: Vec<Provider>,
		adapter_registry: Arc<AdapterRegistry>,
		config: ExecutorConfig,
	) -> Self {
		let mut provider_map = HashMap::new();
		for provider in providers {
			provider_map.insert(provider.provider_id.clone(), provider);
		}

		Self {
			providers: provider_map,
			adapter_registry,
			config,
		}
	}

	fn adapter_for(&self, quote: &Quote) -> SwapResult<Arc<dyn ProviderAdapter>> {
		let provider = self.providers.get(&quote.provider_id).ok_or_else(|| {
			SwapError::TransactionConstruction {
				reason: format!("unknown provider '{}'", quote.provider_id),
			}
		})?;
		self.adapter_registry
			.get(&provider.adapter_id)
			.ok_or_else(|| SwapError::TransactionConstruction {
				reason: format!("unknown adapter '{}'", provider.adapter_id),
			})
	}

	/// Drive one live swap attempt
	///
	/// `observe` is called on every phase transition; the terminal return
	/// to idle is the caller's responsibility so the failed/success phase
	/// stays visible until the attempt fully settles.
	pub async fn execute(
		&self,
		wallet: &dyn WalletSession,
		request: &SwapRequest,
		quote: &Quote,
		observe: &(dyn Fn(SwapPhase) + Send + Sync),
	) -> SwapResult<ExecutionOutcome> {
		// Preconditions reject before any state transition
		let account = wallet.account().ok_or(SwapError::WalletNotConnected)?;
		if !wallet.can_sign() {
			return Err(SwapError::WalletNotAuthorized);
		}

		let adapter = self.adapter_for(quote)?;

		observe(SwapPhase::CheckingNetwork);
		if wallet.chain_id() != Some(request.chain_id) {
			info!(
				"Wallet on chain {:?}, request targets {}; asking wallet to switch",
				wallet.chain_id(),
				request.chain_id
			);
			return match wallet.request_chain_switch(request.chain_id).await {
				Ok(ChainSwitchOutcome::Accepted) => Ok(ExecutionOutcome::ChainSwitched),
				Ok(ChainSwitchOutcome::Rejected) => Err(SwapError::NetworkSwitchRejected),
				Ok(ChainSwitchOutcome::Unsupported) | Err(_) => {
					Err(SwapError::ManualSwitchRequired {
						chain_id: request.chain_id,
					})
				},
			};
		}

		if !request.sell_token.is_native() {
			let spender = adapter.spender_address(&quote.payload).map_err(|e| {
				SwapError::TransactionConstruction {
					reason: e.to_string(),
				}
			})?;

			let allowance = wallet
				.read_allowance(&request.sell_token.address, &account, &spender)
				.await
				.map_err(|e| SwapError::ApprovalFailed {
					reason: e.to_string(),
				})?;

			if allowance.covers(&request.amount) {
				debug!(
					"Existing allowance {} covers {}, skipping approval",
					allowance, request.amount
				);
			} else {
				observe(SwapPhase::Approving);
				let handle = wallet
					.send_approval(&request.sell_token.address, &spender, &request.amount)
					.await
					.map_err(|e| SwapError::ApprovalFailed {
						reason: e.to_string(),
					})?;
				let receipt = wallet.wait_for_confirmation(&handle).await.map_err(|e| {
					SwapError::ApprovalFailed {
						reason: e.to_string(),
					}
				})?;
				if !receipt.success {
					return Err(SwapError::ApprovalFailed {
						reason: format!("approval transaction {} reverted", receipt.tx_hash),
					});
				}
				info!("Approval confirmed in block {}", receipt.block_number);
			}
		}

		observe(SwapPhase::Swapping);
		let mut tx: SwapTransaction = adapter.build_transaction(&quote.payload).map_err(|e| {
			SwapError::TransactionConstruction {
				reason: e.to_string(),
			}
		})?;

		// Estimation failure is a warning, not a blocker; the chain itself
		// is the final arbiter via revert
		let gas_limit = match wallet.estimate_gas(&tx).await {
			Ok(estimate) => apply_gas_margin(estimate, self.config.gas_margin_pct),
			Err(e) => {
				warn!(
					"Gas estimation failed ({}), falling back to limit {}",
					e, self.config.fallback_gas_limit
				);
				self.config.fallback_gas_limit
			},
		};
		tx.gas_limit = Some(gas_limit);

		let handle = wallet
			.send_transaction(&tx)
			.await
			.map_err(SwapError::from_submission)?;
		info!("Swap transaction submitted: {}", handle.hash());

		let receipt = wallet
			.wait_for_confirmation(&handle)
			.await
			.map_err(SwapError::from_submission)?;
		if !receipt.success {
			return Err(SwapError::TransactionReverted {
				reason: format!("transaction {} reverted", receipt.tx_hash),
			});
		}

		info!("Swap confirmed in block {}", receipt.block_number);
		observe(SwapPhase::Success);
		Ok(ExecutionOutcome::Confirmed(receipt))
	}

	/// Walk the state sequence with fixed delays and no wallet interaction
	///
	/// Used to validate the state machine and UI wiring without a live
	/// wallet or funds. The approval step is skipped when the current
	/// request sells the native asset, mirroring the live path.
	pub async fn execute_simulated(
		&self,
		request: Option<&SwapRequest>,
		observe: &(dyn Fn(SwapPhase) + Send + Sync),
	) -> SwapResult<ExecutionOutcome> {
		let step = Duration::from_millis(self.config.simulated_step_ms);

		observe(SwapPhase::CheckingNetwork);
		sleep(step).await;

		let native_sell = request.map(|r| r.sell_token.is_native()).unwrap_or(false);
		if !native_sell {
			observe(SwapPhase::Approving);
			sleep(step).await;
		}

		observe(SwapPhase::Swapping);
		sleep(step).await;

		observe(SwapPhase::Success);
		Ok(ExecutionOutcome::Simulated)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_gas_margin_applied() {
		assert_eq!(apply_gas_margin(100_000, 10), 110_000);
		assert_eq!(apply_gas_margin(0, 10), 0);
		// odd estimates round down on the margin, never up
		assert_eq!(apply_gas_margin(21_001, 10), 23_101);
	}

	#[test]
	fn test_gas_margin_saturates() {
		assert_eq!(apply_gas_margin(u64::MAX, 10), u64::MAX);
	}
}
