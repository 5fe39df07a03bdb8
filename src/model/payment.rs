//! Payments executed against consents.

// self
use crate::{
	_prelude::*,
	model::{Amount, ConsentId, PaymentId, Pcr, Refund},
};

def_status! {
	PaymentStatus,
	"Lifecycle status of a payment.",
	{
		/// Submitted and waiting on the bank.
		Pending,
		/// Accepted by the bank.
		Accepted,
		/// Accepted; settlement has started.
		AcceptedSettlementInProcess,
		/// Accepted and settled.
		AcceptedSettlementCompleted,
		/// Declined by the bank.
		Rejected,
	}
}

/// Whether a payment was taken against a single or an enduring consent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentType {
	/// Paid against a single consent or quick payment.
	Single,
	/// Paid against an enduring consent.
	Enduring,
}

/// Payment resource.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Payment {
	/// Payment identifier.
	pub payment_id: PaymentId,
	/// Consent type the payment was taken against.
	#[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
	pub kind: Option<PaymentType>,
	/// Current status.
	pub status: PaymentStatus,
	/// Creation instant.
	#[serde(with = "time::serde::rfc3339")]
	pub creation_timestamp: OffsetDateTime,
	/// Instant of the latest status change.
	#[serde(default, with = "time::serde::rfc3339::option")]
	pub status_updated_timestamp: Option<OffsetDateTime>,
	/// Deadline the bank has to settle an accepted payment.
	#[serde(
		default,
		with = "time::serde::rfc3339::option",
		skip_serializing_if = "Option::is_none"
	)]
	pub accepted_until: Option<OffsetDateTime>,
	/// Request the payment was created from.
	pub detail: PaymentRequest,
	/// Refunds issued against the payment.
	#[serde(default)]
	pub refunds: Vec<Refund>,
}

/// Request body for a payment.
///
/// Single consents carry their own amount and statement details, so only enduring
/// consents need `pcr` and `amount` here.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRequest {
	/// Consent to pay against.
	pub consent_id: ConsentId,
	/// Statement details, for enduring consents.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub pcr: Option<Pcr>,
	/// Amount, for enduring consents.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub amount: Option<Amount>,
	/// Merchant account reference for split settlement.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub account_reference_id: Option<Uuid>,
}
impl PaymentRequest {
	/// Builds a request paying a single consent in full.
	pub fn single(consent_id: ConsentId) -> Self {
		Self { consent_id, pcr: None, amount: None, account_reference_id: None }
	}

	/// Builds a request taking `amount` from an enduring consent.
	pub fn enduring(consent_id: ConsentId, pcr: Pcr, amount: Amount) -> Self {
		Self { consent_id, pcr: Some(pcr), amount: Some(amount), account_reference_id: None }
	}
}

/// Response to a payment creation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePaymentResponse {
	/// Identifier of the new payment.
	pub payment_id: PaymentId,
}
