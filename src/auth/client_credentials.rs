//! Client-credentials token source with caching + singleflight guards.
//!
//! Tokens come from `{debit_url}/oauth2/token` through `oauth2`'s client-credentials
//! grant with `client_secret_post`. A cached token is served until it enters the
//! preemptive window; concurrent callers that find it stale queue on one async mutex so
//! only the first of them reaches the token endpoint.

// crates.io
use oauth2::{
	AsyncHttpClient, AuthType, ClientId, ClientSecret, EndpointNotSet, EndpointSet, HttpClientError,
	RequestTokenError, TokenResponse, TokenUrl,
	basic::{BasicClient, BasicRequestTokenError},
};
// self
use crate::{
	_prelude::*,
	auth::{AccessToken, TokenFuture, TokenMetrics, TokenSecret, TokenSource},
	config::ClientConfig,
	error::TokenError,
	http::{self, ApiHttpClient, HttpFuture, OAuthHttpClient},
	obs::{self, OperationKind, OperationOutcome, OperationSpan},
	paths,
};

type ConfiguredBasicClient =
	BasicClient<EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>;

const DEFAULT_PREEMPTIVE_WINDOW: Duration = Duration::seconds(60);

/// [`TokenSource`] performing the OAuth 2.0 client-credentials grant.
pub struct ClientCredentialsTokenSource<C>
where
	C: ?Sized + ApiHttpClient,
{
	oauth_client: ConfiguredBasicClient,
	http_client: Arc<C>,
	cached: RwLock<Option<AccessToken>>,
	singleflight: AsyncMutex<()>,
	preemptive_window: Duration,
	metrics: TokenMetrics,
}
impl<C> ClientCredentialsTokenSource<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Creates a source for `{debit_url}/oauth2/token`.
	pub fn new(
		debit_url: &Url,
		client_id: &str,
		client_secret: &TokenSecret,
		http_client: impl Into<Arc<C>>,
	) -> Result<Self> {
		let token_url = TokenUrl::from_url(paths::collection(debit_url, paths::TOKEN)?);
		let oauth_client = BasicClient::new(ClientId::new(client_id.to_owned()))
			.set_client_secret(ClientSecret::new(client_secret.expose().to_owned()))
			.set_auth_type(AuthType::RequestBody)
			.set_token_uri(token_url);

		Ok(Self {
			oauth_client,
			http_client: http_client.into(),
			cached: RwLock::new(None),
			singleflight: AsyncMutex::new(()),
			preemptive_window: DEFAULT_PREEMPTIVE_WINDOW,
			metrics: TokenMetrics::default(),
		})
	}

	/// Creates a source from a validated [`ClientConfig`].
	pub fn from_config(config: &ClientConfig, http_client: impl Into<Arc<C>>) -> Result<Self> {
		Ok(Self::new(&config.debit_url, &config.client_id, &config.client_secret, http_client)?
			.with_preemptive_window(config.token_preemptive_window))
	}

	/// Overrides the preemptive window (defaults to 60 seconds).
	pub fn with_preemptive_window(mut self, window: Duration) -> Self {
		self.preemptive_window = if window.is_negative() { Duration::ZERO } else { window };

		self
	}

	/// Returns the token counters.
	pub fn metrics(&self) -> &TokenMetrics {
		&self.metrics
	}

	async fn obtain(&self, force: bool) -> Result<AccessToken> {
		const KIND: OperationKind = OperationKind::Token;

		let span = OperationSpan::new(KIND, if force { "refresh_token" } else { "access_token" });

		span.instrument(async move {
			let observed = self.cached.read().clone();

			if let Some(token) = observed.as_ref().filter(|token| !force && self.is_fresh(token)) {
				return Ok(token.clone());
			}

			let _singleflight = self.singleflight.lock().await;
			let current = self.cached.read().clone();

			// Another caller may have replaced the token while this one waited.
			if let Some(current) = current {
				let replaced = observed.as_ref().is_none_or(|seen| seen.secret != current.secret);

				if (!force || replaced) && self.is_fresh(&current) {
					return Ok(current);
				}
			}

			obs::record_operation_outcome(KIND, OperationOutcome::Attempt);
			self.metrics.record_request();

			match self.request_token().await {
				Ok(token) => {
					obs::record_operation_outcome(KIND, OperationOutcome::Success);
					*self.cached.write() = Some(token.clone());

					Ok(token)
				},
				Err(err) => {
					obs::record_operation_outcome(KIND, OperationOutcome::Failure);
					self.metrics.record_failure();

					Err(err.into())
				},
			}
		})
		.await
	}

	async fn request_token(&self) -> Result<AccessToken, TokenError> {
		let meta = ResponseMetadataSlot::default();
		let http_client = MetadataHttpClient {
			inner: OAuthHttpClient(Arc::clone(&self.http_client)),
			slot: meta.clone(),
		};
		let response = self
			.oauth_client
			.exchange_client_credentials()
			.request_async(&http_client)
			.await
			.map_err(|err| map_request_error(meta.take(), err))?;
		let expires_in = response.expires_in().ok_or(TokenError::InvalidExpiry)?.as_secs();
		let expires_in = i64::try_from(expires_in).map_err(|_| TokenError::InvalidExpiry)?;

		if expires_in <= 0 {
			return Err(TokenError::InvalidExpiry);
		}

		Ok(AccessToken::issued(
			response.access_token().secret().to_owned(),
			OffsetDateTime::now_utc(),
			Duration::seconds(expires_in),
		))
	}

	fn is_fresh(&self, token: &AccessToken) -> bool {
		!token.expires_within(self.preemptive_window, OffsetDateTime::now_utc())
	}
}
impl<C> TokenSource for ClientCredentialsTokenSource<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn access_token(&self) -> TokenFuture<'_> {
		Box::pin(self.obtain(false))
	}

	fn refresh_token(&self) -> TokenFuture<'_> {
		self.metrics.record_refresh();

		Box::pin(self.obtain(true))
	}
}
impl<C> Debug for ClientCredentialsTokenSource<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ClientCredentialsTokenSource")
			.field("token_url", &self.oauth_client.token_uri().as_str())
			.field("preemptive_window", &self.preemptive_window)
			.field("metrics", &self.metrics)
			.finish_non_exhaustive()
	}
}

/// HTTP status of the latest token response, kept for error mapping.
#[derive(Clone, Debug, Default)]
struct ResponseMetadataSlot(Arc<Mutex<Option<u16>>>);
impl ResponseMetadataSlot {
	fn store(&self, status: u16) {
		*self.0.lock() = Some(status);
	}

	fn take(&self) -> Option<u16> {
		self.0.lock().take()
	}
}

struct MetadataHttpClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	inner: OAuthHttpClient<C>,
	slot: ResponseMetadataSlot,
}
impl<'c, C> AsyncHttpClient<'c> for MetadataHttpClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	type Error = HttpClientError<C::TransportError>;
	type Future = HttpFuture<'c, C::TransportError>;

	fn call(&'c self, request: oauth2::HttpRequest) -> Self::Future {
		Box::pin(async move {
			self.slot.take();

			let response = self.inner.call(request).await?;

			self.slot.store(response.status().as_u16());

			Ok(response)
		})
	}
}

fn map_request_error<E>(
	status: Option<u16>,
	err: BasicRequestTokenError<HttpClientError<E>>,
) -> TokenError
where
	E: 'static + Send + Sync + StdError,
{
	match err {
		RequestTokenError::ServerResponse(response) => {
			let reason = response
				.error_description()
				.cloned()
				.unwrap_or_else(|| response.error().as_ref().to_owned());

			TokenError::Rejected { reason, status }
		},
		RequestTokenError::Request(error) => TokenError::Transport(http::transport_error(error)),
		RequestTokenError::Parse(source, _body) => TokenError::Parse { source, status },
		RequestTokenError::Other(message) => TokenError::Endpoint { message, status },
	}
}
