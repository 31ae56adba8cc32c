//! Swap executor state machine behavior

mod mocks;

use std::sync::{Arc, Mutex};

use mocks::entities;
use swapflow::mocks::{BrokenPayloadAdapter, MockAdapter, MockWallet};
use swapflow::{
	AdapterRegistry, ChainSwitchOutcome, ExecutionOutcome, ExecutorConfig, ProviderAdapter, Quote,
	SwapError, SwapExecutor, SwapPhase, U256, WalletError,
};

fn executor(adapter: Arc<dyn ProviderAdapter>) -> SwapExecutor {
	let mut registry = AdapterRegistry::new();
	let provider = entities::provider("prov", adapter.id());
	registry.register(adapter).unwrap();
	SwapExecutor::new(
		vec![provider],
		Arc::new(registry),
		ExecutorConfig {
			gas_margin_pct: 10,
			fallback_gas_limit: 1_500_000,
			simulated_step_ms: 1,
		},
	)
}

fn mock_executor() -> SwapExecutor {
	executor(Arc::new(MockAdapter::success("mock", 100.0)))
}

/// A quote shaped like the mock adapter's output
fn quote() -> Quote {
	Quote::new("prov", U256::from("5000000"), 6, 1.0, 100.0).with_payload(serde_json::json!({
		"allowanceTarget": "0x00000000000000000000000000000000000spend",
		"to": "0x0000000000000000000000000000000000router",
		"data": "0xdeadbeef",
		"value": "0",
	}))
}

fn phase_log() -> (Arc<Mutex<Vec<SwapPhase>>>, impl Fn(SwapPhase) + Send + Sync) {
	let phases = Arc::new(Mutex::new(Vec::new()));
	let sink = {
		let phases = Arc::clone(&phases);
		move |phase: SwapPhase| phases.lock().unwrap().push(phase)
	};
	(phases, sink)
}

#[tokio::test]
async fn full_approval_path_walks_every_phase() {
	let executor = mock_executor();
	let wallet = MockWallet::connected(entities::USER, 1);
	let (phases, sink) = phase_log();

	let outcome = executor
		.execute(&wallet, &entities::erc20_request("5000000"), &quote(), &sink)
		.await
		.unwrap();

	assert!(matches!(outcome, ExecutionOutcome::Confirmed(_)));
	assert_eq!(
		*phases.lock().unwrap(),
		vec![
			SwapPhase::CheckingNetwork,
			SwapPhase::Approving,
			SwapPhase::Swapping,
			SwapPhase::Success,
		]
	);
	assert_eq!(
		wallet.calls(),
		vec![
			"read_allowance",
			"send_approval",
			"wait_for_confirmation",
			"estimate_gas",
			"send_transaction",
			"wait_for_confirmation",
		]
	);
}

#[tokio::test]
async fn sufficient_allowance_skips_approving() {
	let executor = mock_executor();
	let wallet = MockWallet::connected(entities::USER, 1).with_allowance(U256::from("5000000"));
	let (phases, sink) = phase_log();

	executor
		.execute(&wallet, &entities::erc20_request("5000000"), &quote(), &sink)
		.await
		.unwrap();

	assert_eq!(
		*phases.lock().unwrap(),
		vec![
			SwapPhase::CheckingNetwork,
			SwapPhase::Swapping,
			SwapPhase::Success,
		]
	);
	assert!(!wallet.calls().contains(&"send_approval".to_string()));
}

#[tokio::test]
async fn native_sell_never_touches_allowance() {
	let executor = mock_executor();
	let wallet = MockWallet::connected(entities::USER, 1);
	let (phases, sink) = phase_log();

	executor
		.execute(
			&wallet,
			&entities::native_request("1000000000000000000"),
			&quote(),
			&sink,
		)
		.await
		.unwrap();

	assert_eq!(
		*phases.lock().unwrap(),
		vec![
			SwapPhase::CheckingNetwork,
			SwapPhase::Swapping,
			SwapPhase::Success,
		]
	);
	assert!(!wallet.calls().contains(&"read_allowance".to_string()));
}

#[tokio::test]
async fn chain_mismatch_switch_accepted_returns_without_swapping() {
	let executor = mock_executor();
	let wallet = MockWallet::connected(entities::USER, 137)
		.with_switch_outcome(ChainSwitchOutcome::Accepted);
	let (phases, sink) = phase_log();

	let outcome = executor
		.execute(&wallet, &entities::erc20_request("5000000"), &quote(), &sink)
		.await
		.unwrap();

	// the signer may be stale after a chain change; the user re-invokes
	assert_eq!(outcome, ExecutionOutcome::ChainSwitched);
	assert_eq!(*phases.lock().unwrap(), vec![SwapPhase::CheckingNetwork]);
	assert_eq!(wallet.calls(), vec!["request_chain_switch"]);
}

#[tokio::test]
async fn chain_mismatch_switch_rejected_fails() {
	let executor = mock_executor();
	let wallet = MockWallet::connected(entities::USER, 137)
		.with_switch_outcome(ChainSwitchOutcome::Rejected);
	let (phases, sink) = phase_log();

	let result = executor
		.execute(&wallet, &entities::erc20_request("5000000"), &quote(), &sink)
		.await;

	assert!(matches!(result, Err(SwapError::NetworkSwitchRejected)));
	assert_eq!(*phases.lock().unwrap(), vec![SwapPhase::CheckingNetwork]);
}

#[tokio::test]
async fn chain_mismatch_switch_unsupported_requires_manual_switch() {
	let executor = mock_executor();
	let wallet = MockWallet::connected(entities::USER, 137)
		.with_switch_outcome(ChainSwitchOutcome::Unsupported);
	let (_, sink) = phase_log();

	let result = executor
		.execute(&wallet, &entities::erc20_request("5000000"), &quote(), &sink)
		.await;

	assert!(matches!(
		result,
		Err(SwapError::ManualSwitchRequired { chain_id: 1 })
	));
}

#[tokio::test]
async fn disconnected_wallet_rejects_before_any_phase() {
	let executor = mock_executor();
	let wallet = MockWallet::disconnected();
	let (phases, sink) = phase_log();

	let result = executor
		.execute(&wallet, &entities::erc20_request("5000000"), &quote(), &sink)
		.await;

	assert!(matches!(result, Err(SwapError::WalletNotConnected)));
	assert!(phases.lock().unwrap().is_empty());
	assert!(wallet.calls().is_empty());
}

#[tokio::test]
async fn unauthorized_wallet_rejects_before_any_phase() {
	let executor = mock_executor();
	let wallet = MockWallet::connected(entities::USER, 1).unsigned();
	let (phases, sink) = phase_log();

	let result = executor
		.execute(&wallet, &entities::erc20_request("5000000"), &quote(), &sink)
		.await;

	assert!(matches!(result, Err(SwapError::WalletNotAuthorized)));
	assert!(phases.lock().unwrap().is_empty());
}

#[tokio::test]
async fn approval_failure_fails_the_attempt() {
	let executor = mock_executor();
	let wallet =
		MockWallet::connected(entities::USER, 1).failing_approval(WalletError::Rejected);
	let (phases, sink) = phase_log();

	let result = executor
		.execute(&wallet, &entities::erc20_request("5000000"), &quote(), &sink)
		.await;

	assert!(matches!(result, Err(SwapError::ApprovalFailed { .. })));
	assert_eq!(
		*phases.lock().unwrap(),
		vec![SwapPhase::CheckingNetwork, SwapPhase::Approving]
	);
	assert!(!wallet.calls().contains(&"send_transaction".to_string()));
}

#[tokio::test]
async fn malformed_payload_is_a_construction_error() {
	let executor = executor(Arc::new(BrokenPayloadAdapter::new("broken")));
	let wallet = MockWallet::connected(entities::USER, 1);
	let (_, sink) = phase_log();

	let bare_quote = Quote::new("prov", U256::from("5000000"), 6, 1.0, 100.0)
		.with_payload(serde_json::json!({}));

	let result = executor
		.execute(&wallet, &entities::erc20_request("5000000"), &bare_quote, &sink)
		.await;

	assert!(matches!(
		result,
		Err(SwapError::TransactionConstruction { .. })
	));
	// construction failure is distinct from an on-chain revert: nothing
	// was ever submitted
	assert!(!wallet.calls().contains(&"send_transaction".to_string()));
}

#[tokio::test]
async fn gas_estimation_failure_falls_back_to_fixed_limit() {
	let executor = mock_executor();
	let wallet = MockWallet::connected(entities::USER, 1)
		.with_allowance(U256::from("5000000"))
		.without_gas_estimation();
	let (_, sink) = phase_log();

	let outcome = executor
		.execute(&wallet, &entities::erc20_request("5000000"), &quote(), &sink)
		.await
		.unwrap();

	assert!(matches!(outcome, ExecutionOutcome::Confirmed(_)));
	let sent = wallet.sent_transactions();
	assert_eq!(sent.len(), 1);
	assert_eq!(sent[0].gas_limit, Some(1_500_000));
}

#[tokio::test]
async fn successful_estimation_applies_safety_margin() {
	let executor = mock_executor();
	let wallet =
		MockWallet::connected(entities::USER, 1).with_allowance(U256::from("5000000"));
	let (_, sink) = phase_log();

	executor
		.execute(&wallet, &entities::erc20_request("5000000"), &quote(), &sink)
		.await
		.unwrap();

	// mock estimates 210_000; +10% margin
	assert_eq!(wallet.sent_transactions()[0].gas_limit, Some(231_000));
}

#[tokio::test]
async fn user_rejection_is_classified() {
	let executor = mock_executor();
	let wallet = MockWallet::connected(entities::USER, 1)
		.with_allowance(U256::from("5000000"))
		.failing_send(WalletError::Rejected);
	let (_, sink) = phase_log();

	let result = executor
		.execute(&wallet, &entities::erc20_request("5000000"), &quote(), &sink)
		.await;

	assert!(matches!(result, Err(SwapError::UserRejected)));
}

#[tokio::test]
async fn reverted_confirmation_is_classified() {
	let executor = mock_executor();
	let wallet = MockWallet::connected(entities::USER, 1)
		.with_allowance(U256::from("5000000"))
		.reverting();
	let (phases, sink) = phase_log();

	let result = executor
		.execute(&wallet, &entities::erc20_request("5000000"), &quote(), &sink)
		.await;

	assert!(matches!(result, Err(SwapError::TransactionReverted { .. })));
	// success was never observed
	assert!(!phases.lock().unwrap().contains(&SwapPhase::Success));
}

#[tokio::test]
async fn simulated_walk_visits_every_phase_without_a_wallet() {
	let executor = mock_executor();
	let (phases, sink) = phase_log();

	let outcome = executor
		.execute_simulated(Some(&entities::erc20_request("5000000")), &sink)
		.await
		.unwrap();

	assert_eq!(outcome, ExecutionOutcome::Simulated);
	assert_eq!(
		*phases.lock().unwrap(),
		vec![
			SwapPhase::CheckingNetwork,
			SwapPhase::Approving,
			SwapPhase::Swapping,
			SwapPhase::Success,
		]
	);
}

#[tokio::test]
async fn simulated_walk_skips_approval_for_native_sells() {
	let executor = mock_executor();
	let (phases, sink) = phase_log();

	executor
		.execute_simulated(Some(&entities::native_request("1000000000000000000")), &sink)
		.await
		.unwrap();

	assert!(!phases.lock().unwrap().contains(&SwapPhase::Approving));
}
