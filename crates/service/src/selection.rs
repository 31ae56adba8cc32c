//! Provider pinning and active-quote selection

use swapflow_types::{Quote, SwapRequest};
use tracing::{debug, warn};

/// Decides which quote is "active" as result sets evolve
///
/// A user pin survives refresh cycles as long as the pinned provider keeps
/// quoting without error; otherwise selection falls back to the best quote.
/// The pin is cleared whenever the trade itself (pair or sell amount)
/// changes, since a changed trade is a new decision, not a continuation.
#[derive(Debug, Default)]
pub struct SelectionManager {
	pinned: Option<String>,
	trade_key: Option<String>,
}

impl SelectionManager {
	pub fn new() -> Self {
		Self::default()
	}

	/// Currently pinned provider, if any
	pub fn pinned(&self) -> Option<&str> {
		self.pinned.as_deref()
	}

	/// Record the request driving the next result set
	///
	/// Clears the pin when the trade key differs from the previous one.
	pub fn note_request(&mut self, request: &SwapRequest) {
		let key = request.trade_key();
		if self.trade_key.as_deref() != Some(key.as_str()) {
			if self.pinned.take().is_some() {
				debug!("Trade changed, clearing provider pin");
			}
			self.trade_key = Some(key);
		}
	}

	/// Pin a provider explicitly
	///
	/// Pinning a provider whose current quote is failed (or absent) is a
	/// no-op; returns whether the pin was applied.
	pub fn pin(&mut self, provider_id: &str, quotes: &[Quote]) -> bool {
		match quotes.iter().find(|q| q.provider_id == provider_id) {
			Some(quote) if quote.is_available() => {
				debug!("Pinning provider {}", provider_id);
				self.pinned = Some(provider_id.to_string());
				true
			},
			_ => {
				warn!(
					"Ignoring pin of provider {}: no error-free quote in current set",
					provider_id
				);
				false
			},
		}
	}

	/// Pick the active quote for a new result set
	///
	/// The pinned provider wins while it stays present and error-free, even
	/// when it is no longer best; otherwise the best quote is selected.
	pub fn select(&self, quotes: &[Quote], best_quote: Option<&Quote>) -> Option<Quote> {
		if let Some(pinned) = &self.pinned {
			if let Some(quote) = quotes
				.iter()
				.find(|q| &q.provider_id == pinned && q.is_available())
			{
				return Some(quote.clone());
			}
		}
		best_quote.cloned()
	}
}
