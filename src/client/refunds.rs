// self
use crate::{
	_prelude::*,
	client::{BlinkDebitClient, PreparedRequest, RequestOptions},
	codec,
	http::ApiHttpClient,
	model::{CreateRefundResponse, Refund, RefundDetail, RefundId, ResourceKind},
	paths,
};

impl<C> BlinkDebitClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Requests a refund, or only the customer's account number.
	pub async fn create_refund(
		&self,
		request: &RefundDetail,
		options: &RequestOptions,
	) -> Result<CreateRefundResponse> {
		let body = codec::encode(request)?;
		let url = paths::collection(&self.debit_url, paths::REFUNDS)?;

		self.send_json("create_refund", None, PreparedRequest::post(url, body, options)).await
	}

	/// Retrieves a refund.
	pub async fn get_refund(&self, id: RefundId, options: &RequestOptions) -> Result<Refund> {
		let url = paths::resource(&self.debit_url, paths::REFUNDS, id)?;

		self.send_json(
			"get_refund",
			Some((ResourceKind::Refund, id.into_uuid())),
			PreparedRequest::get(url, options),
		)
		.await
	}
}
