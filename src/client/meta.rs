// self
use crate::{
	_prelude::*,
	client::{BlinkDebitClient, PreparedRequest, RequestOptions},
	http::ApiHttpClient,
	model::BankMetadata,
	paths,
};

impl<C> BlinkDebitClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Lists the banks Blink Debit supports and their capabilities.
	pub async fn get_meta(&self, options: &RequestOptions) -> Result<Vec<BankMetadata>> {
		let url = paths::collection(&self.debit_url, paths::META)?;

		self.send_json("get_meta", None, PreparedRequest::get(url, options)).await
	}
}
