//! Mock adapters and wallet sessions for tests and integrations
//!
//! Simple, working doubles that exercise the engine without network access
//! or a live wallet.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use swapflow_types::{
	AdapterInfo, ChainSwitchOutcome, ProviderAdapter, ProviderError, ProviderResult,
	ProviderRuntimeConfig, Quote, SwapRequest, SwapTransaction, TxHandle, TxReceipt, U256,
	WalletError, WalletResult, WalletSession,
};

/// Mock provider adapter with scriptable behavior
///
/// This adapter provides:
/// - Call tracking for testing
/// - Configurable response delays for timeout testing
/// - Failure simulation, flippable between cycles
/// - Scripted net-value sequences for multi-cycle ranking tests
/// - An execution payload in the 0x shape so the executor path works
///
/// The produced quote echoes the request amount as its output amount, so
/// tests can tell which request a result set was computed for.
#[derive(Debug, Clone)]
pub struct MockAdapter {
	pub adapter: AdapterInfo,
	call_tracker: Arc<AtomicUsize>,
	should_fail: Arc<AtomicBool>,
	response_delay_ms: Arc<AtomicU64>,
	net_values: Arc<Mutex<VecDeque<f64>>>,
	fallback_net_value: f64,
	pub spender: String,
}

impl MockAdapter {
	/// Create a mock adapter with custom configuration
	pub fn with_config(id: &str, should_fail: bool, response_delay_ms: u64, net_value: f64) -> Self {
		Self {
			adapter: AdapterInfo::new(id, format!("{} Adapter", id), "1.0.0"),
			call_tracker: Arc::new(AtomicUsize::new(0)),
			should_fail: Arc::new(AtomicBool::new(should_fail)),
			response_delay_ms: Arc::new(AtomicU64::new(response_delay_ms)),
			net_values: Arc::new(Mutex::new(VecDeque::new())),
			fallback_net_value: net_value,
			spender: "0x00000000000000000000000000000000000spend".to_string(),
		}
	}

	/// Create a success adapter (no delay, no failure)
	pub fn success(id: &str, net_value: f64) -> Self {
		Self::with_config(id, false, 0, net_value)
	}

	/// Create a slow-responding adapter
	pub fn slow(id: &str, response_delay_ms: u64, net_value: f64) -> Self {
		Self::with_config(id, false, response_delay_ms, net_value)
	}

	/// Create a failing adapter
	pub fn failing(id: &str) -> Self {
		Self::with_config(id, true, 0, 0.0)
	}

	/// Script net values for the next cycles, consumed one per call
	pub fn push_net_values(&self, values: impl IntoIterator<Item = f64>) {
		self.net_values.lock().unwrap().extend(values);
	}

	/// Flip the failure switch between cycles
	pub fn set_failing(&self, should_fail: bool) {
		self.should_fail.store(should_fail, Ordering::Relaxed);
	}

	/// Change the response delay between cycles
	pub fn set_delay_ms(&self, delay_ms: u64) {
		self.response_delay_ms.store(delay_ms, Ordering::Relaxed);
	}

	/// Get the number of times this adapter has been called
	pub fn call_count(&self) -> usize {
		self.call_tracker.load(Ordering::Relaxed)
	}

	fn next_net_value(&self) -> f64 {
		self.net_values
			.lock()
			.unwrap()
			.pop_front()
			.unwrap_or(self.fallback_net_value)
	}
}

#[async_trait]
impl ProviderAdapter for MockAdapter {
	fn adapter_info(&self) -> &AdapterInfo {
		&self.adapter
	}

	async fn fetch_quote(
		&self,
		request: &SwapRequest,
		config: &ProviderRuntimeConfig,
	) -> ProviderResult<Quote> {
		self.call_tracker.fetch_add(1, Ordering::Relaxed);

		let delay_ms = self.response_delay_ms.load(Ordering::Relaxed);
		if delay_ms > 0 {
			tokio::time::sleep(Duration::from_millis(delay_ms)).await;
		}

		if self.should_fail.load(Ordering::Relaxed) {
			return Err(ProviderError::InvalidResponse {
				reason: format!("adapter {} configured to fail", self.adapter.adapter_id),
			});
		}

		let net_value = self.next_net_value();
		let payload = serde_json::json!({
			"allowanceTarget": self.spender,
			"to": "0x0000000000000000000000000000000000router",
			"data": "0xdeadbeef",
			"value": if request.sell_token.is_native() { request.amount.as_str() } else { "0" },
		});

		Ok(Quote::new(
			&config.provider_id,
			request.amount.clone(),
			request.buy_token.decimals,
			1.0,
			net_value,
		)
		.with_payload(payload))
	}

	/// Spender lives at `allowanceTarget`, like the 0x-style payload
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

	async fn health_check(&self, _config: &ProviderRuntimeConfig) -> ProviderResult<bool> {
		Ok(!self.should_fail.load(Ordering::Relaxed))
	}
}

/// An adapter whose payload is missing the executable transaction
///
/// Used to exercise the fatal construction-error path in the executor.
#[derive(Debug)]
pub struct BrokenPayloadAdapter {
	pub adapter: AdapterInfo,
}

impl BrokenPayloadAdapter {
	pub fn new(id: &str) -> Self {
		Self {
			adapter: AdapterInfo::new(id, format!("{} Adapter", id), "1.0.0"),
		}
	}
}

#[async_trait]
impl ProviderAdapter for BrokenPayloadAdapter {
	fn adapter_info(&self) -> &AdapterInfo {
		&self.adapter
	}

	async fn fetch_quote(
		&self,
		request: &SwapRequest,
		config: &ProviderRuntimeConfig,
	) -> ProviderResult<Quote> {
		// payload deliberately lacks to/data/allowanceTarget
		Ok(Quote::new(
			&config.provider_id,
			request.amount.clone(),
			request.buy_token.decimals,
			1.0,
			100.0,
		)
		.with_payload(serde_json::json!({})))
	}

	fn spender_address(&self, _payload: &serde_json::Value) -> ProviderResult<String> {
		Err(ProviderError::MissingField {
			field: "allowanceTarget".to_string(),
		})
	}

	fn build_transaction(&self, _payload: &serde_json::Value) -> ProviderResult<SwapTransaction> {
		Err(ProviderError::MissingField {
			field: "to".to_string(),
		})
	}

	async fn health_check(&self, _config: &ProviderRuntimeConfig) -> ProviderResult<bool> {
		Ok(true)
	}
}

/// Scripted wallet session recording every interface call
///
/// Defaults to a connected, signing-capable wallet on the requested chain
/// with zero allowance, a working gas estimator and succeeding
/// transactions; builder methods script the failure modes.
#[derive(Debug)]
pub struct MockWallet {
	account: Option<String>,
	chain_id: Option<u64>,
	can_sign: bool,
	switch_outcome: ChainSwitchOutcome,
	allowance: Mutex<U256>,
	gas_estimate: Option<u64>,
	send_error: Option<WalletError>,
	approval_error: Option<WalletError>,
	confirm_success: bool,
	calls: Mutex<Vec<String>>,
	sent_transactions: Mutex<Vec<SwapTransaction>>,
}

impl MockWallet {
	/// A connected wallet on the given chain
	pub fn connected(account: &str, chain_id: u64) -> Self {
		Self {
			account: Some(account.to_string()),
			chain_id: Some(chain_id),
			can_sign: true,
			switch_outcome: ChainSwitchOutcome::Accepted,
			allowance: Mutex::new(U256::zero()),
			gas_estimate: Some(210_000),
			send_error: None,
			approval_error: None,
			confirm_success: true,
			calls: Mutex::new(Vec::new()),
			sent_transactions: Mutex::new(Vec::new()),
		}
	}

	/// A wallet with no account attached
	pub fn disconnected() -> Self {
		Self {
			account: None,
			chain_id: None,
			..Self::connected("", 0)
		}
	}

	/// Put the wallet on a different chain than the request targets
	pub fn on_chain(mut self, chain_id: u64) -> Self {
		self.chain_id = Some(chain_id);
		self
	}

	/// Strip signing capability
	pub fn unsigned(mut self) -> Self {
		self.can_sign = false;
		self
	}

	pub fn with_switch_outcome(mut self, outcome: ChainSwitchOutcome) -> Self {
		self.switch_outcome = outcome;
		self
	}

	pub fn with_allowance(self, allowance: U256) -> Self {
		*self.allowance.lock().unwrap() = allowance;
		self
	}

	/// Make gas estimation fail
	pub fn without_gas_estimation(mut self) -> Self {
		self.gas_estimate = None;
		self
	}

	pub fn failing_send(mut self, error: WalletError) -> Self {
		self.send_error = Some(error);
		self
	}

	pub fn failing_approval(mut self, error: WalletError) -> Self {
		self.approval_error = Some(error);
		self
	}

	/// Make the swap transaction confirm as reverted
	pub fn reverting(mut self) -> Self {
		self.confirm_success = false;
		self
	}

	/// Every wallet interface call made so far, in order
	pub fn calls(&self) -> Vec<String> {
		self.calls.lock().unwrap().clone()
	}

	/// Swap transactions handed to `send_transaction`, in order
	pub fn sent_transactions(&self) -> Vec<SwapTransaction> {
		self.sent_transactions.lock().unwrap().clone()
	}

	fn record(&self, call: &str) {
		self.calls.lock().unwrap().push(call.to_string());
	}
}

#[async_trait]
impl WalletSession for MockWallet {
	fn account(&self) -> Option<String> {
		self.account.clone()
	}

	fn chain_id(&self) -> Option<u64> {
		self.chain_id
	}

	fn can_sign(&self) -> bool {
		self.can_sign
	}

	async fn request_chain_switch(&self, _chain_id: u64) -> WalletResult<ChainSwitchOutcome> {
		self.record("request_chain_switch");
		Ok(self.switch_outcome)
	}

	async fn estimate_gas(&self, _tx: &SwapTransaction) -> WalletResult<u64> {
		self.record("estimate_gas");
		self.gas_estimate
			.ok_or_else(|| WalletError::rpc("execution reverted during estimation"))
	}

	async fn send_transaction(&self, tx: &SwapTransaction) -> WalletResult<TxHandle> {
		self.record("send_transaction");
		self.sent_transactions.lock().unwrap().push(tx.clone());
		match &self.send_error {
			Some(error) => Err(error.clone()),
			None => Ok(TxHandle::new("0xswap00000000000000000000000000000000")),
		}
	}

	async fn wait_for_confirmation(&self, handle: &TxHandle) -> WalletResult<TxReceipt> {
		self.record("wait_for_confirmation");
		let success = handle.hash().starts_with("0xapproval") || self.confirm_success;
		Ok(TxReceipt {
			tx_hash: handle.hash().to_string(),
			block_number: 19_000_000,
			success,
		})
	}

	async fn read_allowance(
		&self,
		_token: &str,
		_owner: &str,
		_spender: &str,
	) -> WalletResult<U256> {
		self.record("read_allowance");
		Ok(self.allowance.lock().unwrap().clone())
	}

	async fn send_approval(
		&self,
		_token: &str,
		_spender: &str,
		amount: &U256,
	) -> WalletResult<TxHandle> {
		self.record("send_approval");
		match &self.approval_error {
			Some(error) => Err(error.clone()),
			None => {
				// approval takes effect once confirmed; good enough here
				*self.allowance.lock().unwrap() = amount.clone();
				Ok(TxHandle::new("0xapproval000000000000000000000000000"))
			},
		}
	}
}
