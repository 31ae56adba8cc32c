//! Swap execution phases and error taxonomy

use serde::{Deserialize, Serialize};

pub mod errors;

pub use errors::{SwapError, SwapResult};

/// Phase of the live swap session
///
/// `Idle` is both the initial and the resting state; `Success` and `Failed`
/// are transient and the machine always returns to `Idle` after a call
/// completes. Exactly one session is live per user-initiated attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SwapPhase {
	Idle,
	CheckingNetwork,
	Approving,
	Swapping,
	Success,
	Failed,
}

impl SwapPhase {
	/// Whether a new swap attempt may start from this phase
	pub fn can_start(&self) -> bool {
		matches!(self, SwapPhase::Idle | SwapPhase::Success | SwapPhase::Failed)
	}
}

impl std::fmt::Display for SwapPhase {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let label = match self {
			SwapPhase::Idle => "idle",
			SwapPhase::CheckingNetwork => "checkingNetwork",
			SwapPhase::Approving => "approving",
			SwapPhase::Swapping => "swapping",
			SwapPhase::Success => "success",
			SwapPhase::Failed => "failed",
		};
		write!(f, "{}", label)
	}
}
