//! Shared domain models used across entities

pub mod chain;
pub mod token;
pub mod u256;

pub use chain::Chain;
pub use token::{Token, NATIVE_TOKEN_ADDRESS};
pub use u256::U256;
