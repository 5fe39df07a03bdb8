//! Single and enduring consents.

// self
use crate::{
	_prelude::*,
	model::{Amount, AuthFlow, ConsentId, Payment, Pcr, Period, Refund},
};

def_status! {
	ConsentStatus,
	"Lifecycle status shared by single consents, enduring consents, and quick payments.",
	{
		/// Waiting for the customer to authorise at their bank.
		AwaitingAuthorisation,
		/// Authorised and ready to be paid against.
		Authorised,
		/// A single consent that has been paid against.
		Consumed,
		/// Declined by the customer or the bank.
		Rejected,
		/// Revoked by the merchant or the customer.
		Revoked,
		/// Waiting for the customer to submit the gateway form.
		GatewayAwaitingSubmission,
		/// The gateway flow expired before submission.
		GatewayTimeout,
	}
}

/// Consent resource returned by the single and enduring consent endpoints.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Consent {
	/// Consent identifier.
	pub consent_id: ConsentId,
	/// Current status.
	pub status: ConsentStatus,
	/// Creation instant.
	#[serde(with = "time::serde::rfc3339")]
	pub creation_timestamp: OffsetDateTime,
	/// Instant of the latest status change; absent until the first change.
	#[serde(default, with = "time::serde::rfc3339::option")]
	pub status_updated_timestamp: Option<OffsetDateTime>,
	/// Request the consent was created from.
	pub detail: ConsentDetail,
	/// Payments made against the consent.
	#[serde(default)]
	pub payments: Vec<Payment>,
	/// Refunds issued against the consent.
	#[serde(default)]
	pub refunds: Vec<Refund>,
	/// Card network, for card-backed consents.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub card_network: Option<String>,
}

/// Consent request echoed back inside [`Consent::detail`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConsentDetail {
	/// One-off consent.
	Single(SingleConsentRequest),
	/// Recurring consent.
	Enduring(EnduringConsentRequest),
}

/// Request body for a single consent (and for a quick payment).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SingleConsentRequest {
	/// Authorisation flow.
	pub flow: AuthFlow,
	/// Statement details.
	pub pcr: Pcr,
	/// Amount to authorise.
	pub amount: Amount,
	/// Hashed customer identifier used for fraud checks.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub hashed_customer_identifier: Option<String>,
}

/// Request body for an enduring consent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnduringConsentRequest {
	/// Authorisation flow.
	pub flow: AuthFlow,
	/// First instant payments may be taken.
	#[serde(with = "time::serde::rfc3339")]
	pub from_timestamp: OffsetDateTime,
	/// Instant after which the consent lapses.
	#[serde(
		default,
		with = "time::serde::rfc3339::option",
		skip_serializing_if = "Option::is_none"
	)]
	pub expiry_timestamp: Option<OffsetDateTime>,
	/// Period the maximum amount applies to.
	pub period: Period,
	/// Maximum total per period.
	pub maximum_amount_period: Amount,
	/// Maximum amount of a single payment.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub maximum_amount_payment: Option<Amount>,
	/// Hashed customer identifier used for fraud checks.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub hashed_customer_identifier: Option<String>,
}

/// Response to a consent creation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateConsentResponse {
	/// Identifier of the new consent.
	pub consent_id: ConsentId,
	/// Where to send the customer, for redirect and gateway flows.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub redirect_uri: Option<String>,
}
