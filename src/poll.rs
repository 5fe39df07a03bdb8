//! Await engine: polls a resource until its status settles.
//!
//! Each session fetches immediately, classifies the status, and on a pending status
//! waits one poll interval before fetching again. The wait budget counts pending
//! cycles, not wall-clock time: a session with `max_wait_seconds = W` that never leaves
//! pending performs exactly `W` fetches and `W` waits (a budget of zero performs one
//! fetch and no wait) before it times out. Enduring consents and quick payments are then
//! revoked best-effort.

// self
use crate::{
	_prelude::*,
	error::TimeoutError,
	model::{Consent, ConsentStatus, Payment, PaymentStatus, QuickPayment, ResourceKind},
	obs::{self, OperationKind, OperationOutcome, OperationSpan},
	outcome::AwaitError,
	retry::Sleeper,
	status::{self, Classification, Classify},
};

/// Delay between two fetches of a pending resource.
pub const POLL_INTERVAL: StdDuration = StdDuration::from_secs(1);

/// Resources the await engine can poll.
pub trait Pollable {
	/// Status type carried by the resource.
	type Status: Classify;

	/// Returns the status that decides the next step.
	fn status(&self) -> &Self::Status;
}
impl Pollable for Consent {
	type Status = ConsentStatus;

	fn status(&self) -> &Self::Status {
		&self.status
	}
}
impl Pollable for QuickPayment {
	type Status = ConsentStatus;

	fn status(&self) -> &Self::Status {
		&self.consent.status
	}
}
impl Pollable for Payment {
	type Status = PaymentStatus;

	fn status(&self) -> &Self::Status {
		&self.status
	}
}

/// One await call: what is awaited and for how long.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AwaitSession {
	/// Kind of resource being awaited.
	pub kind: ResourceKind,
	/// Identifier of the resource.
	pub id: Uuid,
	/// Wait budget in poll cycles of one second.
	pub max_wait_seconds: u32,
	/// Correlation id sent with every fetch and the revocation.
	pub correlation_id: Uuid,
}
impl AwaitSession {
	/// Creates a session with a fresh correlation id.
	pub fn new(kind: ResourceKind, id: impl Into<Uuid>, max_wait_seconds: u32) -> Self {
		Self { kind, id: id.into(), max_wait_seconds, correlation_id: Uuid::new_v4() }
	}

	/// Overrides the correlation id.
	pub fn with_correlation_id(mut self, correlation_id: Uuid) -> Self {
		self.correlation_id = correlation_id;

		self
	}
}

/// Future returned by [`PollSource`] methods.
pub type PollFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + 'a + Send>>;

/// Fetches and revokes the resource named by an [`AwaitSession`].
pub trait PollSource<T>
where
	Self: Send + Sync,
{
	/// Fetches the current state of the resource.
	fn fetch<'a>(&'a self, session: &'a AwaitSession) -> PollFuture<'a, T>;

	/// Revokes the resource after an exhausted wait.
	fn revoke<'a>(&'a self, session: &'a AwaitSession) -> PollFuture<'a, ()>;
}

/// Drives await sessions.
#[derive(Clone)]
pub struct AwaitEngine {
	sleeper: Arc<dyn Sleeper>,
	interval: StdDuration,
}
impl AwaitEngine {
	/// Creates an engine polling every [`POLL_INTERVAL`].
	pub fn new(sleeper: Arc<dyn Sleeper>) -> Self {
		Self { sleeper, interval: POLL_INTERVAL }
	}

	/// Overrides the poll interval.
	pub fn with_interval(mut self, interval: StdDuration) -> Self {
		self.interval = interval;

		self
	}

	/// Awaits a terminal status, wrapping any failure in [`AwaitError`].
	pub async fn await_terminal<T, S>(
		&self,
		source: &S,
		session: &AwaitSession,
	) -> Result<T, AwaitError>
	where
		T: Send + Pollable,
		S: ?Sized + PollSource<T>,
	{
		self.await_terminal_or_throw(source, session)
			.await
			.map_err(|err| AwaitError::new(session.kind, session.id, err))
	}

	/// Awaits a terminal status, returning the precise [`Error`] on failure.
	pub async fn await_terminal_or_throw<T, S>(
		&self,
		source: &S,
		session: &AwaitSession,
	) -> Result<T>
	where
		T: Send + Pollable,
		S: ?Sized + PollSource<T>,
	{
		const KIND: OperationKind = OperationKind::Await;

		let span = OperationSpan::new(KIND, session.kind.as_str());

		obs::record_operation_outcome(KIND, OperationOutcome::Attempt);

		let result = span.instrument(self.run(source, session)).await;

		match &result {
			Ok(_) => obs::record_operation_outcome(KIND, OperationOutcome::Success),
			Err(_) => obs::record_operation_outcome(KIND, OperationOutcome::Failure),
		}

		result
	}

	async fn run<T, S>(&self, source: &S, session: &AwaitSession) -> Result<T>
	where
		T: Send + Pollable,
		S: ?Sized + PollSource<T>,
	{
		let AwaitSession { kind, id, max_wait_seconds, .. } = *session;
		let mut cycles = 0_u32;

		loop {
			let resource = source.fetch(session).await?;
			let current = resource.status();

			match status::classify(kind, id, current)? {
				Classification::Success => return Ok(resource),
				Classification::Rejected =>
					return Err(Error::Rejected { kind, id, status: current.label().to_owned() }),
				Classification::GatewayTimedOut =>
					return Err(TimeoutError::Gateway { kind, id }.into()),
				Classification::Pending => {
					obs::poll_pending(kind, id, cycles, current.label());
					obs::record_poll_cycle(kind);
				},
			}
			if max_wait_seconds == 0 {
				break;
			}

			self.sleeper.sleep(self.interval).await;

			cycles += 1;

			if cycles >= max_wait_seconds {
				break;
			}
		}

		Err(self.exhausted::<T, S>(source, session).await)
	}

	async fn exhausted<T, S>(&self, source: &S, session: &AwaitSession) -> Error
	where
		S: ?Sized + PollSource<T>,
	{
		let revocation_failure = if session.kind.revokes_on_exhaustion() {
			source.revoke(session).await.err().map(|err| {
				obs::revocation_failed(session.kind, session.id, &err);

				Box::new(err)
			})
		} else {
			None
		};

		TimeoutError::WaitExhausted {
			kind: session.kind,
			id: session.id,
			max_wait_seconds: session.max_wait_seconds,
			revocation_failure,
		}
		.into()
	}
}
impl Debug for AwaitEngine {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AwaitEngine")
			.field("sleeper", &"<sleeper>")
			.field("interval", &self.interval)
			.finish()
	}
}
