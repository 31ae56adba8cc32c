//! Get-or-fetch cache over a token/chain registry
//!
//! An explicit, injectable service with manual invalidation; the engine
//! depends only on the [`TokenRegistry`] interface, never on a
//! process-wide mutable singleton.

use std::collections::HashMap;
use std::sync::Arc;
use swapflow_types::{Chain, RegistryResult, Token, TokenRegistry};
use tokio::sync::RwLock;
use tracing::debug;

/// Caching wrapper around any [`TokenRegistry`]
pub struct RegistryCache {
	registry: Arc<dyn TokenRegistry>,
	chains: RwLock<Option<Vec<Chain>>>,
	tokens: RwLock<HashMap<u64, Vec<Token>>>,
}

impl RegistryCache {
	pub fn new(registry: Arc<dyn TokenRegistry>) -> Self {
		Self {
			registry,
			chains: RwLock::new(None),
			tokens: RwLock::new(HashMap::new()),
		}
	}

	/// Supported chains, fetched once and cached until invalidated
	pub async fn chains(&self) -> RegistryResult<Vec<Chain>> {
		if let Some(cached) = self.chains.read().await.as_ref() {
			return Ok(cached.clone());
		}

		let fetched = self.registry.list_chains().await?;
		debug!("Cached {} chains from registry", fetched.len());
		*self.chains.write().await = Some(fetched.clone());
		Ok(fetched)
	}

	/// Tokens for a chain, fetched once per chain and cached until
	/// invalidated
	pub async fn tokens(&self, chain_id: u64) -> RegistryResult<Vec<Token>> {
		if let Some(cached) = self.tokens.read().await.get(&chain_id) {
			return Ok(cached.clone());
		}

		let fetched = self.registry.list_tokens(chain_id).await?;
		debug!("Cached {} tokens for chain {}", fetched.len(), chain_id);
		self.tokens.write().await.insert(chain_id, fetched.clone());
		Ok(fetched)
	}

	/// Drop everything cached
	pub async fn invalidate(&self) {
		*self.chains.write().await = None;
		self.tokens.write().await.clear();
	}

	/// Drop the cached token list for one chain
	pub async fn invalidate_tokens(&self, chain_id: u64) {
		self.tokens.write().await.remove(&chain_id);
	}
}
