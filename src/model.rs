//! Typed request and response models for the Blink Debit API.
//!
//! Resources carry a `status` the await engine classifies and a `detail` payload that
//! records how they were authorised. The payload is a `type`-tagged union that only
//! callers inspect; the engine never branches on it.

macro_rules! def_status {
	($name:ident, $doc:literal, { $($(#[doc = $vdoc:literal])* $variant:ident),+ $(,)? }) => {
		#[doc = $doc]
		///
		/// Values outside the known set decode into `Unrecognized` so the status classifier,
		/// not the JSON decoder, reports the drift.
		#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
		#[serde(from = "String", into = "String")]
		pub enum $name {
			$($(#[doc = $vdoc])* $variant,)+
			/// Status value this client does not recognise.
			Unrecognized(String),
		}
		impl $name {
			/// Returns the wire value.
			pub fn as_str(&self) -> &str {
				match self {
					$(Self::$variant => stringify!($variant),)+
					Self::Unrecognized(value) => value,
				}
			}
		}
		impl From<String> for $name {
			fn from(value: String) -> Self {
				match value.as_str() {
					$(stringify!($variant) => Self::$variant,)+
					_ => Self::Unrecognized(value),
				}
			}
		}
		impl From<$name> for String {
			fn from(value: $name) -> Self {
				match value {
					$name::Unrecognized(raw) => raw,
					known => known.as_str().to_owned(),
				}
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.write_str(self.as_str())
			}
		}
	};
}

pub mod common;
pub mod consent;
pub mod id;
pub mod meta;
pub mod payment;
pub mod quick_payment;
pub mod refund;

pub use common::*;
pub use consent::*;
pub use id::*;
pub use meta::*;
pub use payment::*;
pub use quick_payment::*;
pub use refund::*;

// self
use crate::_prelude::*;

/// Resource kinds the client can fetch, revoke, or await.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
	/// One-off payment consent.
	SingleConsent,
	/// Recurring payment consent.
	EnduringConsent,
	/// Combined consent and payment.
	QuickPayment,
	/// Payment executed against a consent.
	Payment,
	/// Refund of an earlier payment.
	Refund,
}
impl ResourceKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::SingleConsent => "single_consent",
			Self::EnduringConsent => "enduring_consent",
			Self::QuickPayment => "quick_payment",
			Self::Payment => "payment",
			Self::Refund => "refund",
		}
	}

	/// Returns `true` for kinds the await engine revokes after an exhausted wait.
	pub const fn revokes_on_exhaustion(self) -> bool {
		matches!(self, Self::EnduringConsent | Self::QuickPayment)
	}
}
impl Display for ResourceKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(match self {
			Self::SingleConsent => "single consent",
			Self::EnduringConsent => "enduring consent",
			Self::QuickPayment => "quick payment",
			Self::Payment => "payment",
			Self::Refund => "refund",
		})
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn only_cancellable_kinds_revoke_on_exhaustion() {
		assert!(ResourceKind::EnduringConsent.revokes_on_exhaustion());
		assert!(ResourceKind::QuickPayment.revokes_on_exhaustion());
		assert!(!ResourceKind::SingleConsent.revokes_on_exhaustion());
		assert!(!ResourceKind::Payment.revokes_on_exhaustion());
	}

	#[test]
	fn labels_differ_from_display() {
		assert_eq!(ResourceKind::QuickPayment.as_str(), "quick_payment");
		assert_eq!(ResourceKind::QuickPayment.to_string(), "quick payment");
	}
}
