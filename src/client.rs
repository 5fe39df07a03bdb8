//! Blink Debit API client.
//!
//! [`BlinkDebitClient`] owns the transport, the token source, and the retry and await
//! settings. Every operation builds its request once, hands it to the
//! [`RetryExecutor`](crate::retry::RetryExecutor), and decodes the final response. The
//! per-resource operations live in the private submodules as further `impl` blocks.

pub mod request;

mod awaiting;
mod consents;
mod meta;
mod payments;
mod quick_payments;
mod refunds;

pub use request::*;

// crates.io
use oauth2::HttpResponse;
// self
use crate::{
	_prelude::*,
	auth::{ClientCredentialsTokenSource, TokenSource},
	codec,
	config::ClientConfig,
	http::ApiHttpClient,
	model::ResourceKind,
	poll::{AwaitEngine, POLL_INTERVAL},
	retry::{RetryExecutor, RetryPolicy, Sleeper, TokioSleeper},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport.
pub type ReqwestBlinkDebitClient = BlinkDebitClient<ReqwestHttpClient>;

/// Async client for the Blink Debit API.
///
/// Cloning is cheap; clones share the transport and the cached access token.
pub struct BlinkDebitClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	http_client: Arc<C>,
	tokens: Arc<dyn TokenSource>,
	debit_url: Url,
	retry_policy: RetryPolicy,
	sleeper: Arc<dyn Sleeper>,
	poll_interval: StdDuration,
}
impl<C> BlinkDebitClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Creates a client that reuses the caller-provided transport and token source.
	pub fn with_http_client(
		debit_url: Url,
		http_client: impl Into<Arc<C>>,
		tokens: Arc<dyn TokenSource>,
	) -> Self {
		Self {
			http_client: http_client.into(),
			tokens,
			debit_url,
			retry_policy: RetryPolicy::default(),
			sleeper: Arc::new(TokioSleeper),
			poll_interval: POLL_INTERVAL,
		}
	}

	/// Creates a client over `http_client` that obtains tokens with the
	/// client-credentials grant described by `config`.
	pub fn with_config(config: &ClientConfig, http_client: impl Into<Arc<C>>) -> Result<Self> {
		let http_client = http_client.into();
		let tokens =
			ClientCredentialsTokenSource::<C>::from_config(config, Arc::clone(&http_client))?;

		Ok(Self::with_http_client(config.debit_url.clone(), http_client, Arc::new(tokens))
			.with_retry_policy(config.retry.clone()))
	}

	/// Replaces the retry policy.
	pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
		self.retry_policy = policy;

		self
	}

	/// Replaces the sleeper used for retry backoff and poll intervals.
	pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
		self.sleeper = sleeper;

		self
	}

	/// Overrides the delay between two fetches of a pending resource.
	pub fn with_poll_interval(mut self, interval: StdDuration) -> Self {
		self.poll_interval = interval;

		self
	}

	/// Returns the debit URL requests are sent to.
	pub fn debit_url(&self) -> &Url {
		&self.debit_url
	}

	/// Returns the active retry policy.
	pub fn retry_policy(&self) -> &RetryPolicy {
		&self.retry_policy
	}

	fn executor(&self) -> RetryExecutor {
		RetryExecutor::new(
			self.retry_policy.clone(),
			Arc::clone(&self.sleeper),
			Arc::clone(&self.tokens),
		)
	}

	fn engine(&self) -> AwaitEngine {
		AwaitEngine::new(Arc::clone(&self.sleeper)).with_interval(self.poll_interval)
	}

	async fn send(
		&self,
		operation: &'static str,
		resource: Option<(ResourceKind, Uuid)>,
		request: &PreparedRequest,
	) -> Result<HttpResponse> {
		self.executor()
			.execute(self.http_client.as_ref(), operation, resource, |token| request.build(token))
			.await
	}

	async fn send_json<T>(
		&self,
		operation: &'static str,
		resource: Option<(ResourceKind, Uuid)>,
		request: PreparedRequest,
	) -> Result<T>
	where
		T: DeserializeOwned,
	{
		let response = self.send(operation, resource, &request).await?;

		codec::decode(operation, &response)
	}
}
#[cfg(feature = "reqwest")]
impl BlinkDebitClient<ReqwestHttpClient> {
	/// Creates a client with its own reqwest transport.
	///
	/// The transport applies `config.request_timeout` to every request and does not
	/// follow redirects.
	pub fn new(config: &ClientConfig) -> Result<Self> {
		Self::with_config(config, ReqwestHttpClient::with_timeout(config.request_timeout)?)
	}

	/// Creates a client from `BLINKPAY_*` environment variables.
	pub fn from_env() -> Result<Self> {
		Self::new(&ClientConfig::from_env()?)
	}
}
impl<C> Clone for BlinkDebitClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn clone(&self) -> Self {
		Self {
			http_client: Arc::clone(&self.http_client),
			tokens: Arc::clone(&self.tokens),
			debit_url: self.debit_url.clone(),
			retry_policy: self.retry_policy.clone(),
			sleeper: Arc::clone(&self.sleeper),
			poll_interval: self.poll_interval,
		}
	}
}
impl<C> Debug for BlinkDebitClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("BlinkDebitClient")
			.field("debit_url", &self.debit_url.as_str())
			.field("retry_policy", &self.retry_policy)
			.field("poll_interval", &self.poll_interval)
			.finish_non_exhaustive()
	}
}
