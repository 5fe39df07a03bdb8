//! Token source seam consumed by the retry executor.

// self
use crate::{_prelude::*, auth::AccessToken};

/// Future returned by [`TokenSource`] methods.
pub type TokenFuture<'a> = Pin<Box<dyn Future<Output = Result<AccessToken>> + 'a + Send>>;

/// Supplies bearer tokens for API requests.
///
/// `access_token` may serve a cached token; `refresh_token` is called at most once per
/// logical request, after the API rejected the token it was given.
pub trait TokenSource
where
	Self: Send + Sync,
{
	/// Returns a token that is valid for the next request.
	fn access_token(&self) -> TokenFuture<'_>;

	/// Discards the current token and obtains a new one.
	fn refresh_token(&self) -> TokenFuture<'_>;
}

/// Token source that always serves the same token.
///
/// Refreshing returns the same value, so a 401 surfaces as a service error after the
/// one permitted re-issue.
#[derive(Clone, Debug)]
pub struct StaticTokenSource(AccessToken);
impl StaticTokenSource {
	/// Serves `token` for every request.
	pub fn new(token: AccessToken) -> Self {
		Self(token)
	}
}
impl TokenSource for StaticTokenSource {
	fn access_token(&self) -> TokenFuture<'_> {
		Box::pin(async move { Ok(self.0.clone()) })
	}

	fn refresh_token(&self) -> TokenFuture<'_> {
		self.access_token()
	}
}
