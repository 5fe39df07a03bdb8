//! Strongly typed resource identifiers backed by UUIDs.

// std
use std::ops::Deref;
// self
use crate::_prelude::*;

macro_rules! def_id {
	($name:ident, $doc:literal, $kind:literal) => {
		#[doc = $doc]
		#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
		#[serde(transparent)]
		pub struct $name(Uuid);
		impl $name {
			/// Wraps an existing UUID.
			pub const fn from_uuid(value: Uuid) -> Self {
				Self(value)
			}

			/// Returns the wrapped UUID.
			pub const fn into_uuid(self) -> Uuid {
				self.0
			}
		}
		impl Deref for $name {
			type Target = Uuid;

			fn deref(&self) -> &Self::Target {
				&self.0
			}
		}
		impl From<Uuid> for $name {
			fn from(value: Uuid) -> Self {
				Self(value)
			}
		}
		impl From<$name> for Uuid {
			fn from(value: $name) -> Self {
				value.0
			}
		}
		impl Debug for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				write!(f, concat!($kind, "({})"), self.0)
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				Display::fmt(&self.0, f)
			}
		}
		impl FromStr for $name {
			type Err = IdentifierError;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				Uuid::parse_str(s).map(Self).map_err(|source| IdentifierError {
					kind: $kind,
					value: s.to_owned(),
					source,
				})
			}
		}
	};
}

/// Error returned when an identifier is not a UUID.
#[derive(Debug, ThisError)]
#[error("{kind} identifier `{value}` is not a valid UUID.")]
pub struct IdentifierError {
	/// Kind of identifier (consent, payment, ...).
	pub kind: &'static str,
	/// Rejected input.
	pub value: String,
	/// Underlying parse failure.
	#[source]
	pub source: uuid::Error,
}

def_id! { ConsentId, "Identifier of a single or enduring consent.", "Consent" }
def_id! { QuickPaymentId, "Identifier of a quick payment.", "QuickPayment" }
def_id! { PaymentId, "Identifier of a payment.", "Payment" }
def_id! { RefundId, "Identifier of a refund.", "Refund" }
