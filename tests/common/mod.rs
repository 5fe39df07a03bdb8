#![allow(dead_code)]

// std
use std::{
	collections::VecDeque,
	error::Error as StdError,
	fmt::{Display, Formatter, Result as FmtResult},
	sync::{
		Arc,
		atomic::{AtomicU32, Ordering},
	},
	time::Duration as StdDuration,
};
// crates.io
use parking_lot::Mutex;
use serde_json::{Value, json};
// self
use blink_debit::{
	BlinkDebitClient,
	auth::{AccessToken, TokenFuture, TokenSource},
	http::{ApiHttpClient, HttpFuture},
	oauth2::{
		HttpClientError, HttpRequest, HttpResponse,
		http::{HeaderMap, HeaderValue, Method, StatusCode, header},
	},
	retry::{SleepFuture, Sleeper},
	url::Url,
	uuid::Uuid,
};

pub const DEBIT_URL: &str = "https://sandbox.debit.blinkpay.co.nz";

#[derive(Debug)]
pub enum FakeTransportError {
	Reset,
}
impl Display for FakeTransportError {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::Reset => write!(f, "Connection reset by peer."),
		}
	}
}
impl StdError for FakeTransportError {}

/// Scripted outcome of one HTTP exchange.
#[derive(Clone, Debug)]
pub enum Reply {
	Response { status: u16, body: String, retry_after: Option<&'static str> },
	Reset,
}
impl Reply {
	pub fn json(status: u16, body: Value) -> Self {
		Self::Response { status, body: body.to_string(), retry_after: None }
	}

	pub fn status(status: u16) -> Self {
		Self::json(status, json!({ "code": format!("E{status}"), "message": "scripted failure" }))
	}

	pub fn empty(status: u16) -> Self {
		Self::Response { status, body: String::new(), retry_after: None }
	}

	pub fn with_retry_after(self, value: &'static str) -> Self {
		match self {
			Self::Response { status, body, .. } =>
				Self::Response { status, body, retry_after: Some(value) },
			Self::Reset => Self::Reset,
		}
	}
}

/// Parts of a sent request the tests inspect.
#[derive(Clone, Debug)]
pub struct Recorded {
	pub method: Method,
	pub path: String,
	pub headers: HeaderMap,
	pub body: Vec<u8>,
}
impl Recorded {
	pub fn header(&self, name: &str) -> &str {
		self.headers.get(name).and_then(|value| value.to_str().ok()).unwrap_or_default()
	}

	pub fn json(&self) -> Value {
		serde_json::from_slice(&self.body).expect("Recorded body should be JSON.")
	}
}

/// Transport that answers from a queue and records every request it was given.
#[derive(Debug, Default)]
pub struct ScriptedHttpClient {
	replies: Mutex<VecDeque<Reply>>,
	requests: Mutex<Vec<Recorded>>,
}
impl ScriptedHttpClient {
	pub fn new(replies: impl IntoIterator<Item = Reply>) -> Arc<Self> {
		Arc::new(Self {
			replies: Mutex::new(replies.into_iter().collect()),
			requests: Mutex::new(Vec::new()),
		})
	}

	pub fn requests(&self) -> Vec<Recorded> {
		self.requests.lock().clone()
	}

	pub fn count(&self, method: &Method) -> usize {
		self.requests.lock().iter().filter(|request| &request.method == method).count()
	}

	pub fn remaining(&self) -> usize {
		self.replies.lock().len()
	}
}
impl ApiHttpClient for ScriptedHttpClient {
	type TransportError = FakeTransportError;

	fn execute(&self, request: HttpRequest) -> HttpFuture<'_, Self::TransportError> {
		self.requests.lock().push(Recorded {
			method: request.method().clone(),
			path: request.uri().path().to_owned(),
			headers: request.headers().clone(),
			body: request.body().clone(),
		});

		let reply = self.replies.lock().pop_front();

		Box::pin(async move {
			match reply {
				Some(Reply::Response { status, body, retry_after }) => {
					let mut response = HttpResponse::new(body.into_bytes());

					*response.status_mut() =
						StatusCode::from_u16(status).expect("Scripted status should be valid.");
					response
						.headers_mut()
						.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));

					if let Some(value) = retry_after {
						response
							.headers_mut()
							.insert(header::RETRY_AFTER, HeaderValue::from_static(value));
					}

					Ok(response)
				},
				Some(Reply::Reset) =>
					Err(HttpClientError::Reqwest(Box::new(FakeTransportError::Reset))),
				None => Err(HttpClientError::Other("script exhausted".into())),
			}
		})
	}
}

/// Sleeper that returns immediately and remembers every requested delay.
#[derive(Debug, Default)]
pub struct RecordingSleeper {
	delays: Mutex<Vec<StdDuration>>,
}
impl RecordingSleeper {
	pub fn delays(&self) -> Vec<StdDuration> {
		self.delays.lock().clone()
	}
}
impl Sleeper for RecordingSleeper {
	fn sleep(&self, duration: StdDuration) -> SleepFuture<'_> {
		self.delays.lock().push(duration);

		Box::pin(async {})
	}
}

/// Token source that hands out `token-{n}`, where `n` counts refreshes.
#[derive(Debug, Default)]
pub struct CountingTokenSource {
	accesses: AtomicU32,
	refreshes: AtomicU32,
}
impl CountingTokenSource {
	pub fn accesses(&self) -> u32 {
		self.accesses.load(Ordering::SeqCst)
	}

	pub fn refreshes(&self) -> u32 {
		self.refreshes.load(Ordering::SeqCst)
	}
}
impl TokenSource for CountingTokenSource {
	fn access_token(&self) -> TokenFuture<'_> {
		self.accesses.fetch_add(1, Ordering::SeqCst);

		let generation = self.refreshes();

		Box::pin(async move { Ok(AccessToken::new(format!("token-{generation}"))) })
	}

	fn refresh_token(&self) -> TokenFuture<'_> {
		let generation = self.refreshes.fetch_add(1, Ordering::SeqCst) + 1;

		Box::pin(async move { Ok(AccessToken::new(format!("token-{generation}"))) })
	}
}

/// Everything a scripted test needs to inspect after the call.
pub struct Harness {
	pub client: BlinkDebitClient<ScriptedHttpClient>,
	pub http: Arc<ScriptedHttpClient>,
	pub sleeper: Arc<RecordingSleeper>,
	pub tokens: Arc<CountingTokenSource>,
}
impl Harness {
	pub fn new(replies: impl IntoIterator<Item = Reply>) -> Self {
		let http = ScriptedHttpClient::new(replies);
		let sleeper = Arc::new(RecordingSleeper::default());
		let tokens = Arc::new(CountingTokenSource::default());
		let debit_url = Url::parse(DEBIT_URL).expect("Sandbox URL should parse.");
		let client = BlinkDebitClient::<ScriptedHttpClient>::with_http_client(
			debit_url,
			Arc::clone(&http),
			tokens.clone(),
		)
		.with_sleeper(sleeper.clone());

		Self { client, http, sleeper, tokens }
	}

	pub fn paths(&self) -> Vec<String> {
		self.http.requests().into_iter().map(|request| request.path).collect()
	}
}

pub fn seconds(values: &[u64]) -> Vec<StdDuration> {
	values.iter().copied().map(StdDuration::from_secs).collect()
}

pub fn single_consent(id: Uuid, status: &str) -> Value {
	json!({
		"consent_id": id,
		"status": status,
		"creation_timestamp": "2026-03-01T10:00:00+13:00",
		"status_updated_timestamp": "2026-03-01T10:00:02+13:00",
		"detail": {
			"type": "single",
			"flow": {
				"detail": {
					"type": "redirect",
					"bank": "PNZ",
					"redirect_uri": "https://merchant.example/return"
				}
			},
			"pcr": { "particulars": "coffee", "code": "latte" },
			"amount": { "currency": "NZD", "total": "4.50" }
		},
		"payments": [],
		"refunds": []
	})
}

pub fn enduring_consent(id: Uuid, status: &str) -> Value {
	json!({
		"consent_id": id,
		"status": status,
		"creation_timestamp": "2026-03-01T10:00:00+13:00",
		"detail": {
			"type": "enduring",
			"flow": {
				"detail": {
					"type": "gateway",
					"redirect_uri": "https://merchant.example/return"
				}
			},
			"from_timestamp": "2026-03-02T00:00:00+13:00",
			"period": "monthly",
			"maximum_amount_period": { "currency": "NZD", "total": "200.00" }
		}
	})
}

pub fn quick_payment(id: Uuid, status: &str) -> Value {
	json!({
		"quick_payment_id": id,
		"consent": single_consent(Uuid::new_v4(), status)
	})
}

pub fn payment(id: Uuid, status: &str) -> Value {
	json!({
		"payment_id": id,
		"type": "single",
		"status": status,
		"creation_timestamp": "2026-03-01T10:05:00+13:00",
		"status_updated_timestamp": null,
		"detail": { "consent_id": Uuid::new_v4() }
	})
}
