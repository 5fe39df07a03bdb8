//! Await helpers and the poll sources that back them.

// self
use crate::{
	_prelude::*,
	client::{BlinkDebitClient, RequestOptions},
	error::ConfigError,
	http::ApiHttpClient,
	model::{Consent, ConsentId, Payment, PaymentId, QuickPayment, QuickPaymentId, ResourceKind},
	outcome::AwaitError,
	poll::{AwaitSession, PollFuture, PollSource},
};

impl<C> BlinkDebitClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Waits until a single consent is authorised or consumed.
	pub async fn await_authorised_single_consent(
		&self,
		id: ConsentId,
		max_wait_seconds: u32,
	) -> Result<Consent, AwaitError> {
		let session = AwaitSession::new(ResourceKind::SingleConsent, id, max_wait_seconds);

		self.engine().await_terminal(self, &session).await
	}

	/// Same as [`Self::await_authorised_single_consent`], returning the precise error.
	pub async fn await_authorised_single_consent_or_throw(
		&self,
		id: ConsentId,
		max_wait_seconds: u32,
	) -> Result<Consent> {
		let session = AwaitSession::new(ResourceKind::SingleConsent, id, max_wait_seconds);

		self.engine().await_terminal_or_throw(self, &session).await
	}

	/// Waits until an enduring consent is authorised; revokes it if the wait runs out.
	pub async fn await_authorised_enduring_consent(
		&self,
		id: ConsentId,
		max_wait_seconds: u32,
	) -> Result<Consent, AwaitError> {
		let session = AwaitSession::new(ResourceKind::EnduringConsent, id, max_wait_seconds);

		self.engine().await_terminal(self, &session).await
	}

	/// Same as [`Self::await_authorised_enduring_consent`], returning the precise error.
	pub async fn await_authorised_enduring_consent_or_throw(
		&self,
		id: ConsentId,
		max_wait_seconds: u32,
	) -> Result<Consent> {
		let session = AwaitSession::new(ResourceKind::EnduringConsent, id, max_wait_seconds);

		self.engine().await_terminal_or_throw(self, &session).await
	}

	/// Waits until a quick payment's consent is authorised or consumed; revokes the quick
	/// payment if the wait runs out.
	pub async fn await_successful_quick_payment(
		&self,
		id: QuickPaymentId,
		max_wait_seconds: u32,
	) -> Result<QuickPayment, AwaitError> {
		let session = AwaitSession::new(ResourceKind::QuickPayment, id, max_wait_seconds);

		self.engine().await_terminal(self, &session).await
	}

	/// Same as [`Self::await_successful_quick_payment`], returning the precise error.
	pub async fn await_successful_quick_payment_or_throw(
		&self,
		id: QuickPaymentId,
		max_wait_seconds: u32,
	) -> Result<QuickPayment> {
		let session = AwaitSession::new(ResourceKind::QuickPayment, id, max_wait_seconds);

		self.engine().await_terminal_or_throw(self, &session).await
	}

	/// Waits until a payment is accepted.
	pub async fn await_successful_payment(
		&self,
		id: PaymentId,
		max_wait_seconds: u32,
	) -> Result<Payment, AwaitError> {
		let session = AwaitSession::new(ResourceKind::Payment, id, max_wait_seconds);

		self.engine().await_terminal(self, &session).await
	}

	/// Same as [`Self::await_successful_payment`], returning the precise error.
	pub async fn await_successful_payment_or_throw(
		&self,
		id: PaymentId,
		max_wait_seconds: u32,
	) -> Result<Payment> {
		let session = AwaitSession::new(ResourceKind::Payment, id, max_wait_seconds);

		self.engine().await_terminal_or_throw(self, &session).await
	}
}

impl<C> PollSource<Consent> for BlinkDebitClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn fetch<'a>(&'a self, session: &'a AwaitSession) -> PollFuture<'a, Consent> {
		Box::pin(async move {
			let options = session_options(session);
			let id = ConsentId::from_uuid(session.id);

			match session.kind {
				ResourceKind::SingleConsent => self.get_single_consent(id, &options).await,
				ResourceKind::EnduringConsent => self.get_enduring_consent(id, &options).await,
				kind => Err(ConfigError::UnsupportedOperation { kind, operation: "fetch" }.into()),
			}
		})
	}

	fn revoke<'a>(&'a self, session: &'a AwaitSession) -> PollFuture<'a, ()> {
		Box::pin(async move {
			let options = session_options(session);
			let id = ConsentId::from_uuid(session.id);

			match session.kind {
				ResourceKind::SingleConsent => self.revoke_single_consent(id, &options).await,
				ResourceKind::EnduringConsent => self.revoke_enduring_consent(id, &options).await,
				kind => Err(ConfigError::UnsupportedOperation { kind, operation: "revoke" }.into()),
			}
		})
	}
}
impl<C> PollSource<QuickPayment> for BlinkDebitClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn fetch<'a>(&'a self, session: &'a AwaitSession) -> PollFuture<'a, QuickPayment> {
		Box::pin(async move {
			ensure_kind(session, ResourceKind::QuickPayment, "fetch")?;

			self.get_quick_payment(QuickPaymentId::from_uuid(session.id), &session_options(session))
				.await
		})
	}

	fn revoke<'a>(&'a self, session: &'a AwaitSession) -> PollFuture<'a, ()> {
		Box::pin(async move {
			ensure_kind(session, ResourceKind::QuickPayment, "revoke")?;

			self.revoke_quick_payment(
				QuickPaymentId::from_uuid(session.id),
				&session_options(session),
			)
			.await
		})
	}
}
impl<C> PollSource<Payment> for BlinkDebitClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn fetch<'a>(&'a self, session: &'a AwaitSession) -> PollFuture<'a, Payment> {
		Box::pin(async move {
			ensure_kind(session, ResourceKind::Payment, "fetch")?;

			self.get_payment(PaymentId::from_uuid(session.id), &session_options(session)).await
		})
	}

	fn revoke<'a>(&'a self, session: &'a AwaitSession) -> PollFuture<'a, ()> {
		let err = ConfigError::UnsupportedOperation { kind: session.kind, operation: "revoke" };

		Box::pin(async move { Err(err.into()) })
	}
}

fn session_options(session: &AwaitSession) -> RequestOptions {
	RequestOptions::default().with_correlation_id(session.correlation_id)
}

fn ensure_kind(
	session: &AwaitSession,
	expected: ResourceKind,
	operation: &'static str,
) -> Result<()> {
	if session.kind == expected {
		Ok(())
	} else {
		Err(ConfigError::UnsupportedOperation { kind: session.kind, operation }.into())
	}
}
