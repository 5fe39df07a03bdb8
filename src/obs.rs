//! Optional observability helpers for API operations and await sessions.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `blink_debit.operation` with the
//!   `operation` (kind) and `stage` (call site) fields, plus `debug!`/`warn!` events for
//!   retries, token refreshes, and pending polls.
//! - Enable `metrics` to increment the `blink_debit_operation_total` counter for every
//!   attempt/retry/success/failure, labeled by `operation` + `outcome`, and the
//!   `blink_debit_poll_cycles_total` counter for every pending poll, labeled by `resource`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Operation kinds observed by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperationKind {
	/// Access token acquisition.
	Token,
	/// A single REST call, including its retries.
	Request,
	/// An await session polling a resource.
	Await,
}
impl OperationKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			OperationKind::Token => "token",
			OperationKind::Request => "request",
			OperationKind::Await => "await",
		}
	}
}
impl Display for OperationKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperationOutcome {
	/// Entry to an operation.
	Attempt,
	/// A retryable failure that schedules another attempt.
	Retry,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl OperationOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			OperationOutcome::Attempt => "attempt",
			OperationOutcome::Retry => "retry",
			OperationOutcome::Success => "success",
			OperationOutcome::Failure => "failure",
		}
	}
}
impl Display for OperationOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
