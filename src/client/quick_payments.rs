// self
use crate::{
	_prelude::*,
	client::{BlinkDebitClient, PreparedRequest, RequestOptions},
	codec::{self, Tagged},
	http::ApiHttpClient,
	model::{
		CreateQuickPaymentResponse, QuickPayment, QuickPaymentId, QuickPaymentRequest,
		ResourceKind,
	},
	paths,
};

impl<C> BlinkDebitClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Creates a quick payment.
	pub async fn create_quick_payment(
		&self,
		request: &QuickPaymentRequest,
		options: &RequestOptions,
	) -> Result<CreateQuickPaymentResponse> {
		let body = codec::encode(&Tagged { kind: "single", body: request })?;
		let url = paths::collection(&self.debit_url, paths::QUICK_PAYMENTS)?;

		self.send_json("create_quick_payment", None, PreparedRequest::post(url, body, options))
			.await
	}

	/// Retrieves a quick payment.
	pub async fn get_quick_payment(
		&self,
		id: QuickPaymentId,
		options: &RequestOptions,
	) -> Result<QuickPayment> {
		let url = paths::resource(&self.debit_url, paths::QUICK_PAYMENTS, id)?;

		self.send_json(
			"get_quick_payment",
			Some((ResourceKind::QuickPayment, id.into_uuid())),
			PreparedRequest::get(url, options),
		)
		.await
	}

	/// Revokes a quick payment that has not been paid yet.
	pub async fn revoke_quick_payment(
		&self,
		id: QuickPaymentId,
		options: &RequestOptions,
	) -> Result<()> {
		let url = paths::resource(&self.debit_url, paths::QUICK_PAYMENTS, id)?;

		self.send(
			"revoke_quick_payment",
			Some((ResourceKind::QuickPayment, id.into_uuid())),
			&PreparedRequest::delete(url, options),
		)
		.await?;

		Ok(())
	}
}
