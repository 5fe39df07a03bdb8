// self
use crate::{
	_prelude::*,
	client::{BlinkDebitClient, PreparedRequest, RequestOptions},
	codec,
	http::ApiHttpClient,
	model::{CreatePaymentResponse, Payment, PaymentId, PaymentRequest, ResourceKind},
	paths,
};

impl<C> BlinkDebitClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Pays against an authorised consent.
	pub async fn create_payment(
		&self,
		request: &PaymentRequest,
		options: &RequestOptions,
	) -> Result<CreatePaymentResponse> {
		let body = codec::encode(request)?;
		let url = paths::collection(&self.debit_url, paths::PAYMENTS)?;

		self.send_json("create_payment", None, PreparedRequest::post(url, body, options)).await
	}

	/// Retrieves a payment.
	pub async fn get_payment(&self, id: PaymentId, options: &RequestOptions) -> Result<Payment> {
		let url = paths::resource(&self.debit_url, paths::PAYMENTS, id)?;

		self.send_json(
			"get_payment",
			Some((ResourceKind::Payment, id.into_uuid())),
			PreparedRequest::get(url, options),
		)
		.await
	}
}
