//! Retry executor for single REST exchanges.
//!
//! One logical request is re-issued on transport failures, HTTP 429, and HTTP 5xx
//! (except 501) with a fixed backoff schedule. Everything the request carries besides
//! the bearer token (request id, correlation id, idempotency key, body) is built once by
//! the caller and reused on every attempt. A 401 on the first attempt refreshes the token
//! once through [`RefreshGate`] and re-issues immediately; the re-issue consumes an
//! attempt from the same budget.

mod refresh_gate;

pub use refresh_gate::*;

// crates.io
use oauth2::{HttpRequest, HttpResponse};
// self
use crate::{
	_prelude::*,
	auth::{AccessToken, TokenSource},
	codec,
	error::{ServiceError, TransportError},
	http::{self, ApiHttpClient},
	model::ResourceKind,
	obs::{self, OperationKind, OperationOutcome, OperationSpan},
};

/// Default number of retries after the first attempt.
pub const MAX_RETRIES: u32 = 2;

const DEFAULT_BACKOFF: [StdDuration; 2] = [StdDuration::from_secs(1), StdDuration::from_secs(5)];

/// Future returned by [`Sleeper::sleep`].
pub type SleepFuture<'a> = Pin<Box<dyn Future<Output = ()> + 'a + Send>>;

/// Suspends the current task; every delay in the crate goes through it.
pub trait Sleeper
where
	Self: Send + Sync,
{
	/// Completes after `duration`.
	fn sleep(&self, duration: StdDuration) -> SleepFuture<'_>;
}

/// [`Sleeper`] backed by the tokio timer.
#[derive(Clone, Copy, Debug, Default)]
pub struct TokioSleeper;
impl Sleeper for TokioSleeper {
	fn sleep(&self, duration: StdDuration) -> SleepFuture<'_> {
		Box::pin(tokio::time::sleep(duration))
	}
}

/// Retry budget and backoff schedule.
///
/// Delays are positional: the first retry waits `backoff[0]`, the second `backoff[1]`,
/// and the last position repeats when more retries are allowed than positions exist.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
	enabled: bool,
	max_retries: u32,
	backoff: Vec<StdDuration>,
}
impl RetryPolicy {
	/// Creates an enabled policy with a custom budget and schedule.
	pub fn new(max_retries: u32, backoff: impl IntoIterator<Item = StdDuration>) -> Self {
		Self { enabled: true, max_retries, backoff: backoff.into_iter().collect() }
	}

	/// Policy that never retries. A 401 on the first attempt still refreshes once.
	pub fn disabled() -> Self {
		Self { enabled: false, ..Default::default() }
	}

	/// Enables or disables retries without touching the schedule.
	pub fn with_enabled(mut self, enabled: bool) -> Self {
		self.enabled = enabled;

		self
	}

	/// Returns `true` when retries are enabled.
	pub fn is_enabled(&self) -> bool {
		self.enabled
	}

	/// Number of retries permitted after the first attempt.
	pub fn max_retries(&self) -> u32 {
		if self.enabled { self.max_retries } else { 0 }
	}

	/// Total attempts permitted for one logical request.
	pub fn max_attempts(&self) -> u32 {
		self.max_retries().saturating_add(1)
	}

	/// Delay before the 1-based `retry`.
	pub fn delay_before(&self, retry: u32) -> StdDuration {
		let last = self.backoff.len().saturating_sub(1);
		let position = usize::try_from(retry.saturating_sub(1)).unwrap_or(usize::MAX).min(last);

		self.backoff.get(position).copied().unwrap_or_default()
	}
}
impl Default for RetryPolicy {
	fn default() -> Self {
		Self::new(MAX_RETRIES, DEFAULT_BACKOFF)
	}
}

/// Returns `true` for HTTP statuses worth re-sending: 429 and 5xx except 501.
pub fn is_retryable_status(status: u16) -> bool {
	status == 429 || ((500..600).contains(&status) && status != 501)
}

/// Executes one logical request with retries and the one-shot token refresh.
#[derive(Clone)]
pub struct RetryExecutor {
	policy: RetryPolicy,
	sleeper: Arc<dyn Sleeper>,
	tokens: Arc<dyn TokenSource>,
}
impl RetryExecutor {
	/// Creates an executor drawing tokens from `tokens` and sleeping through `sleeper`.
	pub fn new(
		policy: RetryPolicy,
		sleeper: Arc<dyn Sleeper>,
		tokens: Arc<dyn TokenSource>,
	) -> Self {
		Self { policy, sleeper, tokens }
	}

	/// Returns the active policy.
	pub fn policy(&self) -> &RetryPolicy {
		&self.policy
	}

	/// Runs `build` and sends its request until a 2xx response, a fatal failure, or an
	/// exhausted budget.
	///
	/// `build` receives the current access token and must produce the same request on
	/// every call apart from the `Authorization` header. When `resource` is set a 404 is
	/// reported as [`Error::NotFound`].
	pub async fn execute<C, B>(
		&self,
		client: &C,
		operation: &'static str,
		resource: Option<(ResourceKind, Uuid)>,
		build: B,
	) -> Result<HttpResponse>
	where
		C: ?Sized + ApiHttpClient,
		B: Send + Fn(&AccessToken) -> Result<HttpRequest>,
	{
		const KIND: OperationKind = OperationKind::Request;

		let span = OperationSpan::new(KIND, operation);

		obs::record_operation_outcome(KIND, OperationOutcome::Attempt);

		let result = span.instrument(self.run(client, operation, resource, build)).await;

		match &result {
			Ok(_) => obs::record_operation_outcome(KIND, OperationOutcome::Success),
			Err(_) => obs::record_operation_outcome(KIND, OperationOutcome::Failure),
		}

		result
	}

	async fn run<C, B>(
		&self,
		client: &C,
		operation: &'static str,
		resource: Option<(ResourceKind, Uuid)>,
		build: B,
	) -> Result<HttpResponse>
	where
		C: ?Sized + ApiHttpClient,
		B: Send + Fn(&AccessToken) -> Result<HttpRequest>,
	{
		let mut gate = RefreshGate::default();
		let mut token = self.tokens.access_token().await?;
		let mut attempt = 0_u32;
		let mut retries = 0_u32;

		loop {
			let attempts = attempt + 1;
			let failure = match client.execute(build(&token)?).await {
				Ok(response) if response.status().is_success() => return Ok(response),
				Ok(response) => {
					let status = response.status().as_u16();

					if status == 401 {
						let refreshed = gate.on_unauthorized(attempt, self.tokens.as_ref()).await?;
						let Some(fresh) = refreshed else {
							return Err(response_error(operation, attempts, &response).into());
						};

						obs::token_refreshed(operation);

						token = fresh;
						attempt = attempts;

						continue;
					}
					if let (404, Some((kind, id))) = (status, resource) {
						return Err(Error::NotFound { kind, id });
					}

					let failure = response_error(operation, attempts, &response);

					if !is_retryable_status(status) {
						return Err(failure.into());
					}

					failure
				},
				Err(err) => {
					let failure =
						transport_failure(operation, attempts, http::transport_error(err));

					if !failure.source.as_ref().is_some_and(TransportError::is_retryable) {
						return Err(failure.into());
					}

					failure
				},
			};

			if attempts >= self.policy.max_attempts() {
				return Err(failure.into());
			}

			retries += 1;

			let delay = self.policy.delay_before(retries);

			obs::retry_scheduled(operation, attempts, delay, &failure);
			obs::record_operation_outcome(OperationKind::Request, OperationOutcome::Retry);
			self.sleeper.sleep(delay).await;

			attempt = attempts;
		}
	}
}
impl Debug for RetryExecutor {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("RetryExecutor")
			.field("policy", &self.policy)
			.field("sleeper", &"<sleeper>")
			.field("tokens", &"<token source>")
			.finish()
	}
}

fn response_error(
	operation: &'static str,
	attempts: u32,
	response: &HttpResponse,
) -> ServiceError {
	let (code, message) = codec::error_summary(response);

	ServiceError {
		operation,
		status: Some(response.status().as_u16()),
		code,
		message,
		attempts,
		retry_after: http::parse_retry_after(response.headers()),
		source: None,
	}
}

fn transport_failure(
	operation: &'static str,
	attempts: u32,
	source: TransportError,
) -> ServiceError {
	ServiceError {
		operation,
		status: None,
		code: None,
		message: source.to_string(),
		attempts,
		retry_after: None,
		source: Some(source),
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn default_schedule_is_one_then_five_seconds() {
		let policy = RetryPolicy::default();

		assert_eq!(policy.max_attempts(), 3);
		assert_eq!(policy.delay_before(1), StdDuration::from_secs(1));
		assert_eq!(policy.delay_before(2), StdDuration::from_secs(5));
		assert_eq!(policy.delay_before(7), StdDuration::from_secs(5));
	}

	#[test]
	fn disabled_policy_allows_one_attempt() {
		let policy = RetryPolicy::disabled();

		assert_eq!(policy.max_attempts(), 1);
		assert_eq!(policy.with_enabled(true).max_attempts(), 3);
		assert_eq!(RetryPolicy::new(4, []).delay_before(3), StdDuration::ZERO);
	}

	#[test]
	fn retryable_statuses() {
		for status in [429, 500, 502, 503, 504] {
			assert!(is_retryable_status(status), "{status} should be retried.");
		}
		for status in [400, 401, 404, 408, 409, 422, 501] {
			assert!(!is_retryable_status(status), "{status} should not be retried.");
		}
	}
}
