//! Error types for adapter operations

use thiserror::Error;

/// Validation errors for adapter configurations
#[derive(Error, Debug)]
pub enum ProviderValidationError {
	#[error("Invalid adapter ID: {adapter_id}")]
	InvalidAdapterId { adapter_id: String },

	#[error("Invalid endpoint: {endpoint}")]
	InvalidEndpoint { endpoint: String },

	#[error("Missing required field: {field}")]
	MissingRequiredField { field: String },

	#[error("Invalid configuration: {reason}")]
	InvalidConfiguration { reason: String },
}

/// Single-provider fetch/parse failure
///
/// Isolated by design: the aggregator absorbs these into per-quote error
/// fields and never lets one failing provider block the others.
#[derive(Error, Debug)]
pub enum ProviderError {
	#[error("Provider validation failed: {0}")]
	Validation(#[from] ProviderValidationError),

	#[error("HTTP request failed: {0}")]
	Http(#[from] reqwest::Error),

	#[error("HTTP {status_code}: {reason}")]
	HttpStatus { status_code: u16, reason: String },

	#[error("Timeout occurred after {timeout_ms}ms")]
	Timeout { timeout_ms: u64 },

	#[error("Invalid response format: {reason}")]
	InvalidResponse { reason: String },

	#[error("Missing field in provider payload: {field}")]
	MissingField { field: String },

	#[error("Unsupported operation: {operation} for adapter {adapter_id}")]
	UnsupportedOperation {
		operation: String,
		adapter_id: String,
	},

	#[error("Serialization error: {0}")]
	Serialization(#[from] serde_json::Error),
}

impl ProviderError {
	/// Extract HTTP status code from the error if available
	pub fn status_code(&self) -> Option<u16> {
		match self {
			ProviderError::HttpStatus { status_code, .. } => Some(*status_code),
			ProviderError::Http(reqwest_error) => {
				reqwest_error.status().map(|status| status.as_u16())
			},
			_ => None,
		}
	}

	/// Create an HTTP failure error with the given status code and reason
	pub fn http_failure(status_code: u16, reason: impl Into<String>) -> Self {
		Self::HttpStatus {
			status_code,
			reason: reason.into(),
		}
	}
}
