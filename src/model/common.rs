//! Value types shared by consents, payments, and refunds.

// self
use crate::_prelude::*;

/// Currency accepted by the API.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
	/// New Zealand dollar.
	#[default]
	#[serde(rename = "NZD")]
	Nzd,
}

/// Monetary amount with a decimal string total, e.g. `"12.50"`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amount {
	/// Currency of the total.
	pub currency: Currency,
	/// Decimal total with at most two fraction digits.
	pub total: String,
}
impl Amount {
	/// Builds an NZD amount.
	pub fn nzd(total: impl Into<String>) -> Self {
		Self { currency: Currency::Nzd, total: total.into() }
	}
}

/// Particulars, code, and reference shown on the payer's statement.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pcr {
	/// Particulars (required by the API).
	pub particulars: String,
	/// Optional code.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub code: Option<String>,
	/// Optional reference.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub reference: Option<String>,
}

/// Banks supported by Blink Debit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bank {
	/// ASB Bank.
	#[serde(rename = "ASB")]
	Asb,
	/// ANZ Bank New Zealand.
	#[serde(rename = "ANZ")]
	Anz,
	/// Bank of New Zealand.
	#[serde(rename = "BNZ")]
	Bnz,
	/// Westpac New Zealand.
	Westpac,
	/// Kiwibank.
	Kiwibank,
	/// Test bank available in the sandbox.
	#[serde(rename = "PNZ")]
	Pnz,
	/// Card payments routed through Cybersource.
	Cybersource,
	/// A bank added after this client was built.
	#[serde(other)]
	Other,
}

/// Recurrence period of an enduring consent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
	/// Every day.
	Daily,
	/// Every week.
	Weekly,
	/// Every two weeks.
	Fortnightly,
	/// Every month.
	Monthly,
	/// Every year.
	Annual,
}

/// Customer identifier used by decoupled flows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierType {
	/// Mobile phone number registered with the bank.
	PhoneNumber,
	/// Identifier of an earlier consent with the same bank.
	ConsentId,
}

/// Authorisation flow wrapper as sent and returned by the API.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthFlow {
	/// Flow variant.
	pub detail: AuthFlowDetail,
}
impl From<AuthFlowDetail> for AuthFlow {
	fn from(detail: AuthFlowDetail) -> Self {
		Self { detail }
	}
}

/// How the customer authorises a consent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuthFlowDetail {
	/// The customer is redirected to their bank.
	Redirect {
		/// Bank that authorises the consent.
		bank: Bank,
		/// Where the bank sends the customer afterwards.
		redirect_uri: String,
		/// Prefer the bank's mobile app when available.
		#[serde(default, skip_serializing_if = "Option::is_none")]
		redirect_to_app: Option<bool>,
	},
	/// The bank contacts the customer out of band.
	Decoupled {
		/// Bank that authorises the consent.
		bank: Bank,
		/// Kind of identifier supplied.
		identifier_type: IdentifierType,
		/// Identifier value.
		identifier_value: String,
		/// Optional webhook notified on completion.
		#[serde(default, skip_serializing_if = "Option::is_none")]
		callback_url: Option<String>,
	},
	/// The customer picks their bank on the Blink gateway.
	Gateway {
		/// Where the gateway sends the customer afterwards.
		redirect_uri: String,
		/// Optional hint that pre-selects a bank.
		#[serde(default, skip_serializing_if = "Option::is_none")]
		flow_hint: Option<FlowHint>,
	},
}

/// Pre-selection hint for gateway flows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FlowHint {
	/// Pre-select a redirect flow with the given bank.
	Redirect {
		/// Bank to pre-select.
		bank: Bank,
	},
	/// Pre-select a decoupled flow with the given bank and identifier.
	Decoupled {
		/// Bank to pre-select.
		bank: Bank,
		/// Kind of identifier supplied.
		identifier_type: IdentifierType,
		/// Identifier value.
		identifier_value: String,
	},
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn flow_detail_is_tagged_by_type() {
		let detail = AuthFlowDetail::Gateway {
			redirect_uri: "https://merchant.example/return".into(),
			flow_hint: Some(FlowHint::Redirect { bank: Bank::Bnz }),
		};
		let value = serde_json::to_value(&detail).expect("Flow detail should serialize.");

		assert_eq!(value["type"], "gateway");
		assert_eq!(value["flow_hint"]["type"], "redirect");
		assert_eq!(value["flow_hint"]["bank"], "BNZ");
	}

	#[test]
	fn unknown_banks_do_not_break_decoding() {
		let bank: Bank =
			serde_json::from_str("\"Co-operative\"").expect("Unknown banks should decode.");

		assert_eq!(bank, Bank::Other);
	}
}
