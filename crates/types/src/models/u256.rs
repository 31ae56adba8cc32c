//! U256 model for handling large integers as strings

use std::cmp::Ordering;

use serde;

/// U256 value represented as a decimal string to preserve precision
///
/// Used for smallest-unit token amounts and allowances that might overflow
/// native integer types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct U256(pub String);

impl U256 {
	/// Create a new U256 from a string
	pub fn new(value: String) -> Self {
		Self(value)
	}

	pub fn zero() -> Self {
		Self("0".to_string())
	}

	/// Get the raw string value
	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Try to parse as u128 (for smaller values)
	pub fn as_u128(&self) -> Result<u128, std::num::ParseIntError> {
		self.0.parse()
	}

	/// Try to parse as u64 (for smaller values)
	pub fn as_u64(&self) -> Result<u64, std::num::ParseIntError> {
		self.0.parse()
	}

	/// Check if the value is zero
	pub fn is_zero(&self) -> bool {
		self.0 == "0" || self.0.chars().all(|c| c == '0')
	}

	/// Validate that the string contains only digits
	pub fn validate(&self) -> Result<(), String> {
		if self.0.is_empty() {
			return Err("U256 value cannot be empty".to_string());
		}

		if !self.0.chars().all(|c| c.is_ascii_digit()) {
			return Err("U256 value must contain only digits".to_string());
		}

		Ok(())
	}

	/// Compare two values by magnitude
	///
	/// Returns None when either side fails digit validation. Leading zeros
	/// are ignored, so "007" == "7".
	pub fn checked_cmp(&self, other: &U256) -> Option<Ordering> {
		if self.validate().is_err() || other.validate().is_err() {
			return None;
		}

		let a = self.0.trim_start_matches('0');
		let b = other.0.trim_start_matches('0');

		match a.len().cmp(&b.len()) {
			Ordering::Equal => Some(a.cmp(b)),
			order => Some(order),
		}
	}

	/// Whether this value covers (is at least) the other value
	///
	/// Used by the executor for allowance >= amount checks. Invalid digit
	/// strings never cover anything.
	pub fn covers(&self, other: &U256) -> bool {
		matches!(
			self.checked_cmp(other),
			Some(Ordering::Greater) | Some(Ordering::Equal)
		)
	}
}

impl std::fmt::Display for U256 {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl From<String> for U256 {
	fn from(value: String) -> Self {
		Self(value)
	}
}

impl From<&str> for U256 {
	fn from(value: &str) -> Self {
		Self(value.to_string())
	}
}

impl From<u128> for U256 {
	fn from(value: u128) -> Self {
		Self(value.to_string())
	}
}

impl From<u64> for U256 {
	fn from(value: u64) -> Self {
		Self(value.to_string())
	}
}

// Custom Serde implementation to serialize/deserialize as string
impl serde::Serialize for U256 {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		serializer.serialize_str(&self.0)
	}
}

impl<'de> serde::Deserialize<'de> for U256 {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		let value = String::deserialize(deserializer)?;
		let u256 = Self(value);
		u256.validate().map_err(serde::de::Error::custom)?;
		Ok(u256)
	}
}
