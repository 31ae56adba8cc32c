//! Chain model looked up from the external chain registry

use serde::{Deserialize, Serialize};

use super::Token;

/// A supported blockchain network
///
/// Immutable once constructed; instances come from the chain registry and
/// are treated as already deduplicated and ordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chain {
	/// Numeric chain id (EIP-155)
	pub chain_id: u64,

	/// Display name, e.g. "Ethereum"
	pub name: String,

	/// The chain's native currency
	pub native_token: Token,

	/// Optional logo for display purposes
	pub logo_uri: Option<String>,
}

impl Chain {
	pub fn new(chain_id: u64, name: impl Into<String>, native_token: Token) -> Self {
		Self {
			chain_id,
			name: name.into(),
			native_token,
			logo_uri: None,
		}
	}

	pub fn with_logo(mut self, logo_uri: impl Into<String>) -> Self {
		self.logo_uri = Some(logo_uri.into());
		self
	}
}
