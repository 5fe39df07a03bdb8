//! Bearer access token with expiry helpers.

// self
use crate::{_prelude::*, auth::TokenSecret};

/// Bearer token presented on every API request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccessToken {
	/// Token value; callers must avoid logging it.
	pub secret: TokenSecret,
	/// Instant the token was obtained.
	pub issued_at: OffsetDateTime,
	/// Expiry instant, when the issuer reported one.
	pub expires_at: Option<OffsetDateTime>,
}
impl AccessToken {
	/// Wraps a token without a known expiry.
	pub fn new(secret: impl Into<String>) -> Self {
		Self {
			secret: TokenSecret::new(secret),
			issued_at: OffsetDateTime::now_utc(),
			expires_at: None,
		}
	}

	/// Wraps a token issued at `issued_at` that lives for `expires_in`.
	pub fn issued(
		secret: impl Into<String>,
		issued_at: OffsetDateTime,
		expires_in: Duration,
	) -> Self {
		Self {
			secret: TokenSecret::new(secret),
			issued_at,
			expires_at: Some(issued_at + expires_in),
		}
	}

	/// Returns `true` if the token expired at or before `now`.
	pub fn is_expired_at(&self, now: OffsetDateTime) -> bool {
		self.expires_at.is_some_and(|expires_at| now >= expires_at)
	}

	/// Returns `true` if the token expires within `window` of `now`.
	pub fn expires_within(&self, window: Duration, now: OffsetDateTime) -> bool {
		self.expires_at.is_some_and(|expires_at| expires_at - now <= window)
	}

	/// Returns the `Authorization` header value.
	pub fn bearer(&self) -> String {
		format!("Bearer {}", self.secret.expose())
	}
}
