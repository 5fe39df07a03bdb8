// self
use crate::{_prelude::*, model::ResourceKind, obs::OperationKind};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedOperation<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedOperation<F> = F;

/// A span builder used by client operations.
#[derive(Clone, Debug)]
pub struct OperationSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl OperationSpan {
	/// Creates a new span tagged with the provided operation kind + stage.
	pub fn new(kind: OperationKind, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span =
				tracing::info_span!("blink_debit.operation", operation = kind.as_str(), stage);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (kind, stage);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedOperation<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Notes that a retryable failure schedules another attempt.
pub(crate) fn retry_scheduled(
	operation: &'static str,
	attempt: u32,
	delay: StdDuration,
	reason: &dyn Display,
) {
	#[cfg(feature = "tracing")]
	tracing::warn!(
		operation,
		attempt,
		delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
		%reason,
		"retrying request"
	);
	#[cfg(not(feature = "tracing"))]
	let _ = (operation, attempt, delay, reason);
}

/// Notes that a 401 triggered the one permitted token refresh.
pub(crate) fn token_refreshed(operation: &'static str) {
	#[cfg(feature = "tracing")]
	tracing::debug!(operation, "access token rejected; refreshed and re-issuing");
	#[cfg(not(feature = "tracing"))]
	let _ = operation;
}

/// Notes a pending poll before the engine waits for the next cycle.
pub(crate) fn poll_pending(kind: ResourceKind, id: Uuid, cycle: u32, status: &str) {
	#[cfg(feature = "tracing")]
	tracing::debug!(resource = kind.as_str(), %id, cycle, status, "resource still pending");
	#[cfg(not(feature = "tracing"))]
	let _ = (kind, id, cycle, status);
}

/// Notes that the best-effort revocation after an exhausted wait failed.
pub(crate) fn revocation_failed(kind: ResourceKind, id: Uuid, error: &Error) {
	#[cfg(feature = "tracing")]
	tracing::warn!(resource = kind.as_str(), %id, %error, "revocation after exhausted wait failed");
	#[cfg(not(feature = "tracing"))]
	let _ = (kind, id, error);
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn events_are_safe_without_a_subscriber() {
		retry_scheduled("get_payment", 1, StdDuration::from_secs(1), &"HTTP 503");
		poll_pending(ResourceKind::Payment, Uuid::nil(), 0, "Pending");
	}

	#[tokio::test]
	async fn instrument_wraps_future() {
		let span = OperationSpan::new(OperationKind::Await, "instrument_wraps_future");
		let value = span.instrument(async { 42 }).await;

		assert_eq!(value, 42);
	}
}
