//! Per-call request options and the request template reused across retries.

// crates.io
use oauth2::{
	HttpRequest,
	http::{
		Method, Request,
		header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
	},
};
// self
use crate::{_prelude::*, auth::AccessToken, error::ConfigError};

const JSON: &str = "application/json";

/// Optional headers a caller can attach to one API call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestOptions {
	/// Sent as `x-correlation-id`; generated per call when absent.
	pub correlation_id: Option<Uuid>,
	/// Sent as `x-customer-ip`.
	pub customer_ip: Option<String>,
	/// Sent as `x-customer-user-agent`.
	pub customer_user_agent: Option<String>,
}
impl RequestOptions {
	/// Sets the correlation id.
	pub fn with_correlation_id(mut self, correlation_id: Uuid) -> Self {
		self.correlation_id = Some(correlation_id);

		self
	}

	/// Sets the customer's IP address.
	pub fn with_customer_ip(mut self, ip: impl Into<String>) -> Self {
		self.customer_ip = Some(ip.into());

		self
	}

	/// Sets the customer's user agent.
	pub fn with_customer_user_agent(mut self, user_agent: impl Into<String>) -> Self {
		self.customer_user_agent = Some(user_agent.into());

		self
	}
}

/// Everything one logical call sends, fixed before the first attempt.
#[derive(Clone, Debug)]
pub(crate) struct PreparedRequest {
	method: Method,
	url: Url,
	body: Option<Vec<u8>>,
	request_id: Uuid,
	correlation_id: Uuid,
	idempotency_key: Option<Uuid>,
	customer_ip: Option<String>,
	customer_user_agent: Option<String>,
}
impl PreparedRequest {
	pub(crate) fn get(url: Url, options: &RequestOptions) -> Self {
		Self::new(Method::GET, url, None, options)
	}

	/// Create operations carry a JSON body and an idempotency key.
	pub(crate) fn post(url: Url, body: Vec<u8>, options: &RequestOptions) -> Self {
		let mut request = Self::new(Method::POST, url, Some(body), options);

		request.idempotency_key = Some(Uuid::new_v4());

		request
	}

	pub(crate) fn delete(url: Url, options: &RequestOptions) -> Self {
		Self::new(Method::DELETE, url, None, options)
	}

	fn new(method: Method, url: Url, body: Option<Vec<u8>>, options: &RequestOptions) -> Self {
		Self {
			method,
			url,
			body,
			request_id: Uuid::new_v4(),
			correlation_id: options.correlation_id.unwrap_or_else(Uuid::new_v4),
			idempotency_key: None,
			customer_ip: options.customer_ip.clone(),
			customer_user_agent: options.customer_user_agent.clone(),
		}
	}

	/// Builds one attempt; only the `Authorization` header differs between attempts.
	pub(crate) fn build(&self, token: &AccessToken) -> Result<HttpRequest> {
		let mut builder = Request::builder()
			.method(self.method.clone())
			.uri(self.url.as_str())
			.header(AUTHORIZATION, token.bearer())
			.header(ACCEPT, JSON)
			.header("request-id", self.request_id.to_string())
			.header("x-correlation-id", self.correlation_id.to_string());

		if let Some(key) = self.idempotency_key {
			builder = builder.header("idempotency-key", key.to_string());
		}
		if let Some(ip) = &self.customer_ip {
			builder = builder.header("x-customer-ip", ip.as_str());
		}
		if let Some(user_agent) = &self.customer_user_agent {
			builder = builder.header("x-customer-user-agent", user_agent.as_str());
		}
		if self.body.is_some() {
			builder = builder.header(CONTENT_TYPE, JSON);
		}

		builder.body(self.body.clone().unwrap_or_default()).map_err(|e| ConfigError::from(e).into())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn url() -> Url {
		Url::parse("https://sandbox.debit.blinkpay.co.nz/payments/v1/payments")
			.expect("Payments URL fixture should parse.")
	}

	#[test]
	fn identifiers_survive_token_changes() {
		let correlation_id = Uuid::new_v4();
		let options = RequestOptions::default()
			.with_correlation_id(correlation_id)
			.with_customer_ip("192.0.2.10");
		let prepared = PreparedRequest::post(url(), b"{}".to_vec(), &options);
		let first = prepared.build(&AccessToken::new("one")).expect("First attempt should build.");
		let second =
			prepared.build(&AccessToken::new("two")).expect("Second attempt should build.");

		for name in ["idempotency-key", "request-id", "x-correlation-id"] {
			assert_eq!(first.headers()[name], second.headers()[name], "{name} must be stable.");
		}

		assert_eq!(first.headers()["x-correlation-id"], correlation_id.to_string().as_str());
		assert_eq!(first.headers()["x-customer-ip"], "192.0.2.10");
		assert_eq!(second.headers()[AUTHORIZATION], "Bearer two");
		assert_eq!(first.headers()[CONTENT_TYPE], JSON);
	}

	#[test]
	fn reads_carry_no_idempotency_key() {
		let request = PreparedRequest::get(url(), &RequestOptions::default())
			.build(&AccessToken::new("token"))
			.expect("GET should build.");

		assert!(request.headers().get("idempotency-key").is_none());
		assert!(request.headers().get(CONTENT_TYPE).is_none());
		assert!(request.body().is_empty());
	}

	#[test]
	fn invalid_header_values_are_configuration_errors() {
		let options = RequestOptions::default().with_customer_user_agent("bad\nagent");
		let err = PreparedRequest::delete(url(), &options)
			.build(&AccessToken::new("token"))
			.expect_err("Control characters cannot be sent as headers.");

		assert!(matches!(err, Error::Config(ConfigError::HttpRequest(_))));
	}
}
