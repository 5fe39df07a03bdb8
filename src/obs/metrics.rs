// self
use crate::{
	model::ResourceKind,
	obs::{OperationKind, OperationOutcome},
};

/// Records an operation outcome via the global metrics recorder (when enabled).
pub fn record_operation_outcome(kind: OperationKind, outcome: OperationOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"blink_debit_operation_total",
			"operation" => kind.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, outcome);
	}
}

/// Records one pending poll cycle for `resource`.
pub fn record_poll_cycle(resource: ResourceKind) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!("blink_debit_poll_cycles_total", "resource" => resource.as_str())
			.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = resource;
	}
}
