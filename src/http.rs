//! Transport seam shared by API calls and the token grant.
//!
//! [`ApiHttpClient`] is the crate's only dependency on an HTTP stack. It exchanges
//! `oauth2::http` values so the same implementation drives the JSON API through the
//! retry executor and the client-credentials grant through `oauth2`'s
//! [`AsyncHttpClient`] (via [`OAuthHttpClient`]).

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// crates.io
use oauth2::{
	AsyncHttpClient, HttpClientError, HttpRequest, HttpResponse,
	http::{HeaderMap, header::RETRY_AFTER},
};
use time::format_description::well_known::Rfc2822;
// self
use crate::{_prelude::*, error::TransportError};

/// Future returned by [`ApiHttpClient::execute`].
pub type HttpFuture<'a, E> =
	Pin<Box<dyn Future<Output = Result<HttpResponse, HttpClientError<E>>> + 'a + Send + Sync>>;

/// Abstraction over HTTP transports able to reach the Blink Debit API.
///
/// Implementations must be `Send + Sync + 'static` so one transport can be shared by the
/// client, its token source, and concurrent await sessions. The returned future must be
/// `Send + Sync` because `oauth2` requires both of its request futures. Non-2xx responses
/// are not errors at this layer; the retry executor interprets them.
pub trait ApiHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// Sends `request` and returns the full response.
	fn execute(&self, request: HttpRequest) -> HttpFuture<'_, Self::TransportError>;
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
/// The API and token endpoint answer directly, so the default client built by
/// [`ReqwestHttpClient::with_timeout`] does not follow redirects.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Builds a client with a per-request timeout and redirects disabled.
	pub fn with_timeout(timeout: StdDuration) -> Result<Self> {
		let client = ReqwestClient::builder()
			.timeout(timeout)
			.redirect(reqwest::redirect::Policy::none())
			.build()
			.map_err(crate::error::ConfigError::from)?;

		Ok(Self(client))
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl ApiHttpClient for ReqwestHttpClient {
	type TransportError = ReqwestError;

	fn execute(&self, request: HttpRequest) -> HttpFuture<'_, Self::TransportError> {
		let client = self.0.clone();

		Box::pin(async move {
			let response =
				client.execute(request.try_into().map_err(Box::new)?).await.map_err(Box::new)?;
			let status = response.status();
			let headers = response.headers().to_owned();
			let mut response_new =
				HttpResponse::new(response.bytes().await.map_err(Box::new)?.to_vec());

			*response_new.status_mut() = status;
			*response_new.headers_mut() = headers;

			Ok(response_new)
		})
	}
}

/// Adapter exposing an [`ApiHttpClient`] to `oauth2`'s token requests.
pub(crate) struct OAuthHttpClient<C>(pub Arc<C>)
where
	C: ?Sized + ApiHttpClient;
impl<'c, C> AsyncHttpClient<'c> for OAuthHttpClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	type Error = HttpClientError<C::TransportError>;
	type Future = HttpFuture<'c, C::TransportError>;

	fn call(&'c self, request: HttpRequest) -> Self::Future {
		self.0.execute(request)
	}
}

/// Converts a transport failure into the crate's [`TransportError`].
pub(crate) fn transport_error<E>(err: HttpClientError<E>) -> TransportError
where
	E: 'static + Send + Sync + StdError,
{
	match err {
		HttpClientError::Reqwest(inner) => TransportError::network(*inner),
		HttpClientError::Http(inner) => TransportError::Request(inner),
		HttpClientError::Io(inner) => TransportError::Io(inner),
		HttpClientError::Other(message) => TransportError::Other { message },
		_ => TransportError::Other { message: "unclassified transport failure".into() },
	}
}

/// Parses a `Retry-After` header given either as delta-seconds or as an RFC 2822 date.
pub(crate) fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
	let value = headers.get(RETRY_AFTER)?;
	let raw = value.to_str().ok()?.trim();

	if let Ok(secs) = raw.parse::<u32>() {
		return Some(Duration::seconds(secs.into()));
	}
	if let Ok(moment) = OffsetDateTime::parse(raw, &Rfc2822) {
		let delta = moment - OffsetDateTime::now_utc();

		if delta.is_positive() {
			return Some(delta);
		}
	}

	None
}

#[cfg(test)]
mod tests {
	// crates.io
	use oauth2::http::HeaderValue;
	// self
	use super::*;

	#[test]
	fn retry_after_accepts_seconds_and_dates() {
		let mut headers = HeaderMap::new();

		headers.insert(RETRY_AFTER, HeaderValue::from_static("7"));

		assert_eq!(parse_retry_after(&headers), Some(Duration::seconds(7)));

		headers.insert(RETRY_AFTER, HeaderValue::from_static("Wed, 21 Oct 2015 07:28:00 GMT"));

		assert_eq!(parse_retry_after(&headers), None);

		headers.insert(RETRY_AFTER, HeaderValue::from_static("soon"));

		assert_eq!(parse_retry_after(&headers), None);
	}

	#[test]
	fn transport_errors_keep_their_class() {
		let err = transport_error::<std::io::Error>(HttpClientError::Other("reset".into()));

		assert!(matches!(err, TransportError::Other { .. }));

		let err = transport_error::<std::io::Error>(HttpClientError::Io(std::io::Error::other(
			"broken pipe",
		)));

		assert!(err.is_retryable());
	}
}
