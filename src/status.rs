//! Status classification for awaited resources.

// self
use crate::{
	_prelude::*,
	model::{ConsentStatus, PaymentStatus, ResourceKind},
};

/// What a polled status means for the await loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Classification {
	/// Terminal success; the loop returns the resource.
	Success,
	/// Not settled yet; the loop waits and fetches again.
	Pending,
	/// Terminal failure reported by the bank, customer, or merchant.
	Rejected,
	/// The gateway flow expired remotely.
	GatewayTimedOut,
}

/// Status types the await loop can interpret.
pub trait Classify {
	/// Returns the classification, or `None` for a value this client does not recognise.
	fn classification(&self) -> Option<Classification>;

	/// Returns the wire value for error messages.
	fn label(&self) -> &str;
}
impl Classify for ConsentStatus {
	fn classification(&self) -> Option<Classification> {
		Some(match self {
			Self::Authorised | Self::Consumed => Classification::Success,
			Self::AwaitingAuthorisation | Self::GatewayAwaitingSubmission =>
				Classification::Pending,
			Self::Rejected | Self::Revoked => Classification::Rejected,
			Self::GatewayTimeout => Classification::GatewayTimedOut,
			Self::Unrecognized(_) => return None,
		})
	}

	fn label(&self) -> &str {
		self.as_str()
	}
}
impl Classify for PaymentStatus {
	fn classification(&self) -> Option<Classification> {
		Some(match self {
			Self::Accepted | Self::AcceptedSettlementCompleted => Classification::Success,
			Self::Pending | Self::AcceptedSettlementInProcess => Classification::Pending,
			Self::Rejected => Classification::Rejected,
			Self::Unrecognized(_) => return None,
		})
	}

	fn label(&self) -> &str {
		self.as_str()
	}
}

/// Classifies `status`, reporting unrecognised values as [`Error::UnknownStatus`].
pub fn classify<S>(kind: ResourceKind, id: Uuid, status: &S) -> Result<Classification>
where
	S: ?Sized + Classify,
{
	status.classification().ok_or_else(|| Error::UnknownStatus {
		kind,
		id,
		status: status.label().to_owned(),
	})
}
