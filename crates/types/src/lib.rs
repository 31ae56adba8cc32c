//! Swapflow Types
//!
//! Shared models and traits for the Swapflow aggregation engine.
//! This crate contains all domain models organized by business entity.

pub mod adapters;
pub mod execution;
pub mod models;
pub mod providers;
pub mod quotes;
pub mod registry;
pub mod wallet;

// Re-export chrono and serde_json for convenience
pub use chrono;
pub use serde_json;

// Re-export commonly used types for convenience
pub use quotes::{Quote, SwapRequest};

pub use providers::{Provider, ProviderMetadata, ProviderRuntimeConfig};

pub use adapters::{
	AdapterInfo, ProviderAdapter, ProviderError, ProviderResult, ProviderValidationError,
};

pub use models::{Chain, Token, U256, NATIVE_TOKEN_ADDRESS};

pub use wallet::{
	ChainSwitchOutcome, SwapTransaction, TxHandle, TxReceipt, WalletError, WalletResult,
	WalletSession,
};

pub use registry::{RegistryError, RegistryResult, TokenRegistry};

pub use execution::{SwapError, SwapPhase, SwapResult};
