//! Engine façade tying aggregation, selection, refresh scheduling and
//! execution together behind an observable state channel
//!
//! The engine owns the current request fingerprint: every aggregation
//! (debounced, periodic, post-swap) stamps the fingerprint it was issued
//! for and results are applied only while that fingerprint is still the
//! latest. Overlapping timers therefore never corrupt state with stale
//! data; a superseded response is computed and then discarded.

use std::sync::{Arc, Weak};
use swapflow_types::{Quote, SwapError, SwapPhase, SwapRequest, SwapResult, Token, U256};
use swapflow_types::WalletSession;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{sleep, Duration};
use tracing::{debug, info};

use crate::aggregator::{AggregationOutcome, AggregatorService};
use crate::executor::{ExecutionOutcome, SwapExecutor};
use crate::selection::SelectionManager;

/// Cadence and execution knobs for the engine
#[derive(Debug, Clone)]
pub struct EngineConfig {
	/// Debounce window for request changes in milliseconds
	pub debounce_ms: u64,
	/// Periodic refresh countdown in seconds
	pub refresh_interval_secs: u64,
	/// Walk the executor with fixed delays instead of a live wallet
	pub simulated: bool,
}

impl Default for EngineConfig {
	fn default() -> Self {
		Self {
			debounce_ms: 600,
			refresh_interval_secs: 15,
			simulated: false,
		}
	}
}

/// Observable snapshot exposed to the UI layer
#[derive(Debug, Clone)]
pub struct EngineState {
	pub quotes: Vec<Quote>,
	pub best_quote: Option<Quote>,
	pub selected_quote: Option<Quote>,
	pub is_loading: bool,
	pub error: Option<String>,
	pub swap_phase: SwapPhase,
	pub time_left: Option<u64>,
}

impl EngineState {
	fn empty() -> Self {
		Self {
			quotes: Vec::new(),
			best_quote: None,
			selected_quote: None,
			is_loading: false,
			error: None,
			swap_phase: SwapPhase::Idle,
			time_left: None,
		}
	}
}

/// Partial update applied on top of the current request
///
/// The engine composes a complete [`SwapRequest`] from the update and the
/// previous request; updates arriving before both tokens are known are
/// ignored.
#[derive(Debug, Clone, Default)]
pub struct RequestUpdate {
	pub sell_token: Option<Token>,
	pub buy_token: Option<Token>,
	pub amount: Option<U256>,
	pub user_address: Option<String>,
	pub chain_id: Option<u64>,
	pub slippage_bps: Option<u16>,
}

impl RequestUpdate {
	pub fn sell_token(mut self, token: Token) -> Self {
		self.sell_token = Some(token);
		self
	}

	pub fn buy_token(mut self, token: Token) -> Self {
		self.buy_token = Some(token);
		self
	}

	pub fn amount(mut self, amount: U256) -> Self {
		self.amount = Some(amount);
		self
	}

	pub fn user_address(mut self, user_address: impl Into<String>) -> Self {
		self.user_address = Some(user_address.into());
		self
	}

	pub fn slippage_bps(mut self, slippage_bps: u16) -> Self {
		self.slippage_bps = Some(slippage_bps);
		self
	}

	/// Merge with the previous request into a fresh one
	fn apply(&self, current: Option<&SwapRequest>) -> Option<SwapRequest> {
		let sell_token = self
			.sell_token
			.clone()
			.or_else(|| current.map(|r| r.sell_token.clone()))?;
		let buy_token = self
			.buy_token
			.clone()
			.or_else(|| current.map(|r| r.buy_token.clone()))?;
		let amount = self
			.amount
			.clone()
			.or_else(|| current.map(|r| r.amount.clone()))
			.unwrap_or_else(U256::zero);
		let chain_id = self
			.chain_id
			.or_else(|| current.map(|r| r.chain_id))
			.unwrap_or(sell_token.chain_id);

		let mut request = SwapRequest::new(sell_token, buy_token, amount, chain_id);
		if let Some(user) = self
			.user_address
			.clone()
			.or_else(|| current.map(|r| r.user_address.clone()))
		{
			request = request.with_user_address(user);
		}
		if let Some(slippage) = self.slippage_bps.or_else(|| current.map(|r| r.slippage_bps)) {
			request = request.with_slippage_bps(slippage);
		}
		Some(request)
	}
}

#[derive(Default)]
struct EngineCore {
	request: Option<SwapRequest>,
	current_fingerprint: Option<String>,
	generation: u64,
	auto_refresh: bool,
	selection: SelectionManager,
	last_outcome: Option<AggregationOutcome>,
	debounce_task: Option<JoinHandle<()>>,
	countdown_task: Option<JoinHandle<()>>,
	swap_in_flight: bool,
}

struct EngineInner {
	aggregator: AggregatorService,
	executor: SwapExecutor,
	wallet: Option<Arc<dyn WalletSession>>,
	config: EngineConfig,
	core: Mutex<EngineCore>,
	state_tx: watch::Sender<EngineState>,
}

/// The quote aggregation and swap execution engine
///
/// Cheap to clone; all clones share one engine. Background tasks hold only
/// weak handles, so dropping the last clone tears the timers down instead
/// of orphaning them.
#[derive(Clone)]
pub struct SwapEngine {
	inner: Arc<EngineInner>,
}

impl SwapEngine {
	pub fn new(
		aggregator: AggregatorService,
		executor: SwapExecutor,
		wallet: Option<Arc<dyn WalletSession>>,
		config: EngineConfig,
	) -> Self {
		let (state_tx, _) = watch::channel(EngineState::empty());
		let core = EngineCore {
			auto_refresh: true,
			..EngineCore::default()
		};

		Self {
			inner: Arc::new(EngineInner {
				aggregator,
				executor,
				wallet,
				config,
				core: Mutex::new(core),
				state_tx,
			}),
		}
	}

	/// Subscribe to state changes
	pub fn subscribe(&self) -> watch::Receiver<EngineState> {
		self.inner.state_tx.subscribe()
	}

	/// Current state snapshot
	pub fn snapshot(&self) -> EngineState {
		self.inner.state_tx.borrow().clone()
	}

	/// Apply a request change, debounced
	///
	/// Any change restarts the debounce window; only the last change within
	/// the window fires an aggregation. A zero or unparsable amount resets
	/// the result set without issuing a call and without raising an error.
	pub async fn set_request(&self, update: RequestUpdate) {
		let inner = &self.inner;
		let mut core = inner.core.lock().await;

		let Some(request) = update.apply(core.request.as_ref()) else {
			debug!("Request update ignored: token pair not configured yet");
			return;
		};

		core.selection.note_request(&request);
		core.request = Some(request.clone());
		core.generation += 1;
		if let Some(task) = core.debounce_task.take() {
			task.abort();
		}

		if !request.has_quotable_amount() {
			debug!("Amount not quotable, resetting quote state");
			core.current_fingerprint = None;
			core.last_outcome = None;
			if let Some(task) = core.countdown_task.take() {
				task.abort();
			}
			inner.publish(|state| {
				state.quotes.clear();
				state.best_quote = None;
				state.selected_quote = None;
				state.is_loading = false;
				state.error = None;
				state.time_left = None;
			});
			return;
		}

		let generation = core.generation;
		let debounce = Duration::from_millis(inner.config.debounce_ms);
		let weak = Arc::downgrade(inner);
		core.debounce_task = Some(tokio::spawn(async move {
			sleep(debounce).await;
			let Some(inner) = weak.upgrade() else {
				return;
			};
			let request = {
				let core = inner.core.lock().await;
				if core.generation != generation {
					// a later change restarted the window
					return;
				}
				match core.request.clone() {
					Some(request) => request,
					None => return,
				}
			};
			EngineInner::run_aggregation(inner, request).await;
		}));
	}

	/// Pin a provider so refreshes keep selecting it
	///
	/// Pinning a provider whose current quote is failed is rejected as a
	/// no-op; returns whether the pin was applied.
	pub async fn pin(&self, provider_id: &str) -> bool {
		let inner = &self.inner;
		let mut core = inner.core.lock().await;

		let (quotes, best_quote) = match &core.last_outcome {
			Some(outcome) => (outcome.quotes.clone(), outcome.best_quote.clone()),
			None => (Vec::new(), None),
		};

		let pinned = core.selection.pin(provider_id, &quotes);
		if pinned {
			let selected = core.selection.select(&quotes, best_quote.as_ref());
			inner.publish(move |state| state.selected_quote = selected);
		}
		pinned
	}

	/// Enable or disable periodic refresh
	///
	/// Disabling stops future refreshes only; an in-flight aggregation
	/// keeps running and still applies under the fingerprint rule.
	/// Enabling immediately issues a refresh of the current request.
	pub async fn toggle_auto_refresh(&self, enabled: bool) {
		let inner = &self.inner;
		let mut core = inner.core.lock().await;
		if core.auto_refresh == enabled {
			return;
		}
		core.auto_refresh = enabled;

		if !enabled {
			info!("Periodic refresh disabled");
			if let Some(task) = core.countdown_task.take() {
				task.abort();
			}
			inner.publish(|state| state.time_left = None);
			return;
		}

		info!("Periodic refresh enabled");
		let request = core.request.clone();
		drop(core);

		if let Some(request) = request {
			if request.has_quotable_amount() {
				tokio::spawn(EngineInner::run_aggregation(
					Arc::clone(inner),
					request,
				));
			}
		}
	}

	/// Execute the selected quote through the wallet session
	///
	/// Rejects a second invocation while an attempt is in flight. The state
	/// machine always settles back to idle before this returns; on a
	/// confirmed swap a fresh aggregation is fired since balances changed.
	pub async fn execute_swap(&self) -> SwapResult<ExecutionOutcome> {
		let inner = Arc::clone(&self.inner);

		{
			let mut core = inner.core.lock().await;
			if core.swap_in_flight {
				return Err(SwapError::AlreadyInFlight);
			}
			core.swap_in_flight = true;
		}

		let result = EngineInner::run_swap(&inner).await;

		{
			let mut core = inner.core.lock().await;
			core.swap_in_flight = false;
		}

		match &result {
			Ok(outcome) => {
				inner.publish(|state| {
					state.swap_phase = SwapPhase::Idle;
					state.error = None;
				});
				if matches!(outcome, ExecutionOutcome::Confirmed(_)) {
					// balances changed; re-quote right away
					let request = inner.core.lock().await.request.clone();
					if let Some(request) = request {
						if request.has_quotable_amount() {
							tokio::spawn(EngineInner::run_aggregation(
								Arc::clone(&inner),
								request,
							));
						}
					}
				}
			},
			Err(error) => {
				let message = error.to_string();
				inner.publish(move |state| {
					state.swap_phase = SwapPhase::Failed;
					state.error = Some(message);
				});
				inner.publish(|state| state.swap_phase = SwapPhase::Idle);
			},
		}

		result
	}

	/// Abort the debounce and countdown tasks
	///
	/// Dropping the last engine clone achieves the same through the weak
	/// handles; this is for deterministic teardown.
	pub async fn shutdown(&self) {
		let mut core = self.inner.core.lock().await;
		if let Some(task) = core.debounce_task.take() {
			task.abort();
		}
		if let Some(task) = core.countdown_task.take() {
			task.abort();
		}
		self.inner.publish(|state| state.time_left = None);
	}
}

impl EngineInner {
	fn publish(&self, update: impl FnOnce(&mut EngineState)) {
		self.state_tx.send_modify(update);
	}

	/// Issue one aggregation for `request` and apply its results if the
	/// request is still the latest when they arrive
	async fn run_aggregation(inner: Arc<EngineInner>, request: SwapRequest) {
		let fingerprint = request.fingerprint();
		{
			let mut core = inner.core.lock().await;
			core.current_fingerprint = Some(fingerprint.clone());
			if let Some(task) = core.countdown_task.take() {
				task.abort();
			}
		}
		inner.publish(|state| {
			state.is_loading = true;
			state.time_left = None;
		});

		let outcome = inner.aggregator.fetch_quotes(&request).await;

		let mut core = inner.core.lock().await;
		if core.current_fingerprint.as_deref() != Some(fingerprint.as_str()) {
			debug!("Discarding quotes computed for superseded request");
			return;
		}

		let selected = core
			.selection
			.select(&outcome.quotes, outcome.best_quote.as_ref());
		let error = outcome.error.as_ref().map(|e| e.to_string());
		core.last_outcome = Some(outcome.clone());

		if core.auto_refresh {
			Self::arm_countdown(&inner, &mut core, request);
		}

		// published under the core lock so a newer aggregation cannot
		// interleave between the fingerprint check and the state write
		inner.publish(move |state| {
			state.quotes = outcome.quotes;
			state.best_quote = outcome.best_quote;
			state.selected_quote = selected;
			state.is_loading = false;
			state.error = error;
		});
	}

	/// Arm the periodic countdown for an existing result set
	fn arm_countdown(inner: &Arc<EngineInner>, core: &mut EngineCore, request: SwapRequest) {
		if let Some(task) = core.countdown_task.take() {
			task.abort();
		}

		let interval = inner.config.refresh_interval_secs;
		let weak = Arc::downgrade(inner);
		core.countdown_task = Some(tokio::spawn(async move {
			let mut remaining = interval;
			loop {
				match weak.upgrade() {
					Some(inner) => inner.publish(|state| state.time_left = Some(remaining)),
					None => return,
				}
				if remaining == 0 {
					break;
				}
				sleep(Duration::from_secs(1)).await;
				remaining -= 1;
			}

			if let Some(inner) = weak.upgrade() {
				debug!("Refresh countdown reached zero, re-issuing request");
				Self::run_aggregation(inner, request).await;
			}
		}));
	}

	/// Run one swap attempt, publishing phase transitions as they happen
	async fn run_swap(inner: &Arc<EngineInner>) -> SwapResult<ExecutionOutcome> {
		let observer = {
			let weak = Arc::downgrade(inner);
			move |phase: SwapPhase| {
				if let Some(inner) = weak.upgrade() {
					inner.publish(move |state| state.swap_phase = phase);
				}
			}
		};

		if inner.config.simulated {
			let request = inner.core.lock().await.request.clone();
			return inner
				.executor
				.execute_simulated(request.as_ref(), &observer)
				.await;
		}

		let wallet = inner.wallet.as_ref().ok_or(SwapError::WalletNotConnected)?;
		if wallet.account().is_none() {
			return Err(SwapError::WalletNotConnected);
		}

		let (request, quote) = {
			let core = inner.core.lock().await;
			let request = core.request.clone().ok_or(SwapError::NoQuoteAvailable)?;
			let quote = match &core.last_outcome {
				Some(outcome) => core
					.selection
					.select(&outcome.quotes, outcome.best_quote.as_ref()),
				None => None,
			}
			.ok_or(SwapError::NoQuoteAvailable)?;
			(request, quote)
		};

		if !wallet.can_sign() {
			return Err(SwapError::WalletNotAuthorized);
		}

		inner
			.executor
			.execute(wallet.as_ref(), &request, &quote, &observer)
			.await
	}
}
