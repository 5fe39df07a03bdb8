//! Quick payments: a single consent and its payment created in one call.

// self
use crate::{
	_prelude::*,
	model::{Consent, QuickPaymentId, SingleConsentRequest},
};

/// Request body for a quick payment; identical in shape to a single consent request.
pub type QuickPaymentRequest = SingleConsentRequest;

/// Quick payment resource. Its lifecycle is tracked by the embedded consent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuickPayment {
	/// Quick payment identifier.
	pub quick_payment_id: QuickPaymentId,
	/// Consent created for the quick payment.
	pub consent: Consent,
}

/// Response to a quick payment creation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateQuickPaymentResponse {
	/// Identifier of the new quick payment.
	pub quick_payment_id: QuickPaymentId,
	/// Where to send the customer.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub redirect_uri: Option<String>,
}
