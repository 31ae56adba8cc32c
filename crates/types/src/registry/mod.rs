//! Token/chain registry contract consumed by the engine

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Chain, Token};

/// Result type for registry operations
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Errors surfaced by a token/chain registry
#[derive(Error, Debug)]
pub enum RegistryError {
	#[error("HTTP request failed: {0}")]
	Http(#[from] reqwest::Error),

	#[error("Invalid registry response: {reason}")]
	InvalidResponse { reason: String },

	#[error("Unknown chain: {chain_id}")]
	UnknownChain { chain_id: u64 },
}

/// External source of chain and token lists
///
/// Results are treated as already deduplicated and ordered as provided.
/// Callers that need caching wrap this in the service layer's registry
/// cache rather than relying on any process-wide singleton.
#[async_trait]
pub trait TokenRegistry: Send + Sync {
	/// List supported chains
	async fn list_chains(&self) -> RegistryResult<Vec<Chain>>;

	/// List tokens tradeable on a chain
	async fn list_tokens(&self, chain_id: u64) -> RegistryResult<Vec<Token>>;
}
