// self
use crate::{
	_prelude::*,
	client::{BlinkDebitClient, PreparedRequest, RequestOptions},
	codec::{self, Tagged},
	http::ApiHttpClient,
	model::{
		Consent, ConsentId, CreateConsentResponse, EnduringConsentRequest, ResourceKind,
		SingleConsentRequest,
	},
	paths,
};

impl<C> BlinkDebitClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Creates a single consent.
	pub async fn create_single_consent(
		&self,
		request: &SingleConsentRequest,
		options: &RequestOptions,
	) -> Result<CreateConsentResponse> {
		let body = codec::encode(&Tagged { kind: "single", body: request })?;
		let url = paths::collection(&self.debit_url, paths::SINGLE_CONSENTS)?;

		self.send_json("create_single_consent", None, PreparedRequest::post(url, body, options))
			.await
	}

	/// Retrieves a single consent.
	pub async fn get_single_consent(
		&self,
		id: ConsentId,
		options: &RequestOptions,
	) -> Result<Consent> {
		let url = paths::resource(&self.debit_url, paths::SINGLE_CONSENTS, id)?;

		self.send_json(
			"get_single_consent",
			Some((ResourceKind::SingleConsent, id.into_uuid())),
			PreparedRequest::get(url, options),
		)
		.await
	}

	/// Revokes a single consent.
	pub async fn revoke_single_consent(
		&self,
		id: ConsentId,
		options: &RequestOptions,
	) -> Result<()> {
		let url = paths::resource(&self.debit_url, paths::SINGLE_CONSENTS, id)?;

		self.send(
			"revoke_single_consent",
			Some((ResourceKind::SingleConsent, id.into_uuid())),
			&PreparedRequest::delete(url, options),
		)
		.await?;

		Ok(())
	}

	/// Creates an enduring consent.
	pub async fn create_enduring_consent(
		&self,
		request: &EnduringConsentRequest,
		options: &RequestOptions,
	) -> Result<CreateConsentResponse> {
		let body = codec::encode(&Tagged { kind: "enduring", body: request })?;
		let url = paths::collection(&self.debit_url, paths::ENDURING_CONSENTS)?;

		self.send_json("create_enduring_consent", None, PreparedRequest::post(url, body, options))
			.await
	}

	/// Retrieves an enduring consent.
	pub async fn get_enduring_consent(
		&self,
		id: ConsentId,
		options: &RequestOptions,
	) -> Result<Consent> {
		let url = paths::resource(&self.debit_url, paths::ENDURING_CONSENTS, id)?;

		self.send_json(
			"get_enduring_consent",
			Some((ResourceKind::EnduringConsent, id.into_uuid())),
			PreparedRequest::get(url, options),
		)
		.await
	}

	/// Revokes an enduring consent.
	pub async fn revoke_enduring_consent(
		&self,
		id: ConsentId,
		options: &RequestOptions,
	) -> Result<()> {
		let url = paths::resource(&self.debit_url, paths::ENDURING_CONSENTS, id)?;

		self.send(
			"revoke_enduring_consent",
			Some((ResourceKind::EnduringConsent, id.into_uuid())),
			&PreparedRequest::delete(url, options),
		)
		.await?;

		Ok(())
	}
}
