//! Swapflow Service
//!
//! Core logic for quote aggregation, provider selection, refresh
//! scheduling and swap execution.

pub mod aggregator;
pub mod engine;
pub mod executor;
pub mod registry_cache;
pub mod selection;

pub use aggregator::{
	AggregationOutcome, AggregationStats, AggregatorService, AggregatorServiceError,
};
pub use engine::{EngineConfig, EngineState, RequestUpdate, SwapEngine};
pub use executor::{ExecutionOutcome, ExecutorConfig, SwapExecutor};
pub use registry_cache::RegistryCache;
pub use selection::SelectionManager;
