//! Failure surfaces offered on top of the await engine.
//!
//! [`AwaitError`] is the single wrapped failure returned by the plain await helpers;
//! the `_or_throw` helpers return the precise [`Error`] it wraps.

// self
use crate::{_prelude::*, model::ResourceKind};

/// Broad failure classes callers branch on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FailureKind {
	/// The resource was rejected or revoked.
	Rejected,
	/// The wait budget ran out, or the gateway timed out.
	Timeout,
	/// The resource does not exist.
	NotFound,
	/// The API failed or the retry budget ran out.
	Service,
	/// Configuration, token, decoding, or contract-drift failures.
	Other,
}

/// Generic failure of an await helper, wrapping the precise cause.
#[derive(Debug, ThisError)]
#[error("Awaiting the {resource} `{id}` did not succeed.")]
pub struct AwaitError {
	resource: ResourceKind,
	id: Uuid,
	#[source]
	source: Error,
}
impl AwaitError {
	/// Wraps `source` for the awaited resource.
	pub fn new(resource: ResourceKind, id: Uuid, source: Error) -> Self {
		Self { resource, id, source }
	}

	/// Returns the failure class of the wrapped cause.
	pub fn kind(&self) -> FailureKind {
		self.source.failure_kind()
	}

	/// Returns the kind of resource that was awaited.
	pub fn resource(&self) -> ResourceKind {
		self.resource
	}

	/// Returns the identifier that was awaited.
	pub fn id(&self) -> Uuid {
		self.id
	}

	/// Returns the wrapped cause.
	pub fn source_error(&self) -> &Error {
		&self.source
	}

	/// Unwraps the precise cause.
	pub fn into_source(self) -> Error {
		self.source
	}
}
