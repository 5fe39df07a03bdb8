//! Bank capability metadata.

// self
use crate::{
	_prelude::*,
	model::{Amount, Bank},
};

/// Capabilities Blink Debit supports for one bank.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BankMetadata {
	/// Bank the entry describes.
	pub name: Bank,
	/// Largest single payment the bank accepts.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub payment_limit: Option<Amount>,
	/// Supported flows and features, passed through as reported.
	#[serde(default)]
	pub features: serde_json::Value,
	/// Redirect flow details, passed through as reported.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub redirect_flow: Option<serde_json::Value>,
}
