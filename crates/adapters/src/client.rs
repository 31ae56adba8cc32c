//! Shared HTTP client construction for adapters

use reqwest::{
	header::{HeaderMap, HeaderValue},
	Client,
};
use std::str::FromStr;
use std::time::Duration;
use swapflow_types::{ProviderError, ProviderResult, ProviderRuntimeConfig};

/// Build an HTTP client with the adapter's default headers and the
/// provider's per-call timeout
///
/// Custom headers from the provider config override nothing; they are added
/// on top of the defaults. Invalid header names or values are skipped.
pub fn build_client(adapter_tag: &'static str, config: &ProviderRuntimeConfig) -> ProviderResult<Client> {
	let mut headers = HeaderMap::new();
	headers.insert("Content-Type", HeaderValue::from_static("application/json"));
	headers.insert("Accept", HeaderValue::from_static("application/json"));
	headers.insert("User-Agent", HeaderValue::from_static("Swapflow/0.2"));
	headers.insert("X-Adapter-Type", HeaderValue::from_static(adapter_tag));

	if let Some(provider_headers) = &config.headers {
		for (key, value) in provider_headers {
			if let (Ok(header_name), Ok(header_value)) = (
				reqwest::header::HeaderName::from_str(key),
				HeaderValue::from_str(value),
			) {
				headers.insert(header_name, header_value);
			}
		}
	}

	Client::builder()
		.default_headers(headers)
		.timeout(Duration::from_millis(config.timeout_ms))
		.build()
		.map_err(ProviderError::Http)
}

/// Best-effort extraction of an error message from a provider response body
///
/// Providers disagree on the field name, so try the common ones before
/// falling back to the raw body.
pub fn extract_error_message(body: &str) -> String {
	if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
		for field in ["message", "description", "reason", "error"] {
			if let Some(text) = value.get(field).and_then(|v| v.as_str()) {
				return text.to_string();
			}
		}
	}

	let trimmed = body.trim();
	if trimmed.is_empty() {
		"empty response body".to_string()
	} else {
		trimmed.chars().take(200).collect()
	}
}
