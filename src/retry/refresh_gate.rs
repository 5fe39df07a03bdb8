// self
use crate::{
	_prelude::*,
	auth::{AccessToken, TokenSource},
};

/// One-shot re-authentication hook for a single logical request.
///
/// Only a 401 on attempt 0 refreshes; any later 401 is left to the caller as fatal.
#[derive(Debug, Default)]
pub struct RefreshGate {
	used: bool,
}
impl RefreshGate {
	/// Returns `true` once the gate has refreshed.
	pub fn is_used(&self) -> bool {
		self.used
	}

	/// Handles a 401 on `attempt`, returning the refreshed token when a re-issue is allowed.
	pub async fn on_unauthorized(
		&mut self,
		attempt: u32,
		tokens: &dyn TokenSource,
	) -> Result<Option<AccessToken>> {
		if attempt != 0 || self.used {
			return Ok(None);
		}

		self.used = true;

		tokens.refresh_token().await.map(Some)
	}
}
