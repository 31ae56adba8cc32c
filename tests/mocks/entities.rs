//! Test entities shared across integration tests

use swapflow::{Provider, SwapRequest, Token};

pub fn eth() -> Token {
	Token::native("ETH", "Ether", 1)
}

pub fn weth() -> Token {
	Token::new(
		"0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2",
		"WETH",
		"Wrapped Ether",
		18,
		1,
	)
}

pub fn usdc() -> Token {
	Token::new(
		"0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48",
		"USDC",
		"USD Coin",
		6,
		1,
	)
}

pub const USER: &str = "0x1111111111111111111111111111111111111111";

/// Native-asset sell request (ETH -> USDC on mainnet)
pub fn native_request(amount: &str) -> SwapRequest {
	SwapRequest::new(eth(), usdc(), amount.into(), 1).with_user_address(USER)
}

/// ERC-20 sell request (WETH -> USDC on mainnet)
pub fn erc20_request(amount: &str) -> SwapRequest {
	SwapRequest::new(weth(), usdc(), amount.into(), 1).with_user_address(USER)
}

/// Provider registration with a generous timeout for slow-adapter tests
pub fn provider(provider_id: &str, adapter_id: &str) -> Provider {
	Provider::new(
		provider_id,
		adapter_id,
		"https://quotes.example.com",
		5_000,
	)
}
