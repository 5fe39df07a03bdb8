//! Refunds of earlier payments.

// self
use crate::{
	_prelude::*,
	model::{Amount, ConsentId, PaymentId, Pcr, RefundId},
};

def_status! {
	RefundStatus,
	"Lifecycle status of a refund.",
	{
		/// Accepted and being processed.
		Processing,
		/// Paid back to the customer.
		Completed,
		/// Could not be paid back.
		Failed,
	}
}

/// Refund resource.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Refund {
	/// Refund identifier.
	pub refund_id: RefundId,
	/// Current status.
	pub status: RefundStatus,
	/// Creation instant.
	#[serde(with = "time::serde::rfc3339")]
	pub creation_timestamp: OffsetDateTime,
	/// Instant of the latest status change.
	#[serde(default, with = "time::serde::rfc3339::option")]
	pub status_updated_timestamp: Option<OffsetDateTime>,
	/// Customer account the refund is paid to, once known.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub account_number: Option<String>,
	/// Request the refund was created from.
	pub detail: RefundDetail,
}

/// Refund request, tagged by `type`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RefundDetail {
	/// Only look up the customer's account number.
	AccountNumber {
		/// Consent the payment was taken against.
		consent_id: ConsentId,
		/// Payment to refund.
		payment_id: PaymentId,
	},
	/// Refund the whole payment.
	FullRefund {
		/// Consent the payment was taken against.
		consent_id: ConsentId,
		/// Payment to refund.
		payment_id: PaymentId,
		/// Statement details for the refund.
		pcr: Pcr,
		/// Where the customer returns after authorising the account lookup.
		consent_redirect: String,
	},
	/// Refund part of the payment.
	PartialRefund {
		/// Consent the payment was taken against.
		consent_id: ConsentId,
		/// Payment to refund.
		payment_id: PaymentId,
		/// Statement details for the refund.
		pcr: Pcr,
		/// Where the customer returns after authorising the account lookup.
		consent_redirect: String,
		/// Amount to refund.
		amount: Amount,
	},
}

/// Response to a refund creation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateRefundResponse {
	/// Identifier of the new refund.
	pub refund_id: RefundId,
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn partial_refund_is_tagged() {
		let detail = RefundDetail::PartialRefund {
			consent_id: ConsentId::from_uuid(Uuid::nil()),
			payment_id: PaymentId::from_uuid(Uuid::nil()),
			pcr: Pcr { particulars: "refund".into(), ..Default::default() },
			consent_redirect: "https://merchant.example/refund".into(),
			amount: Amount::nzd("1.00"),
		};
		let value = serde_json::to_value(&detail).expect("Refund detail should serialize.");

		assert_eq!(value["type"], "partial_refund");
		assert_eq!(value["amount"]["total"], "1.00");
	}
}
