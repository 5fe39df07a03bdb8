//! JSON encoding and decoding shared by every API operation.

// crates.io
use oauth2::{HttpResponse, http::StatusCode};
// self
use crate::{
	_prelude::*,
	error::{ConfigError, DecodeError},
};

const BODY_PREVIEW_CHARS: usize = 256;

/// Create-request body with the `type` discriminant the API expects at the top level.
#[derive(Serialize)]
pub(crate) struct Tagged<'a, T> {
	#[serde(rename = "type")]
	pub kind: &'static str,
	#[serde(flatten)]
	pub body: &'a T,
}

/// Error envelope returned by the API. Every field is optional because gateways in front
/// of the API answer with their own shapes.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
	#[serde(default)]
	code: Option<String>,
	#[serde(default)]
	message: Option<String>,
	#[serde(default)]
	error: Option<String>,
}

/// Serialises a request body.
pub(crate) fn encode<T>(body: &T) -> Result<Vec<u8>>
where
	T: ?Sized + Serialize,
{
	serde_json::to_vec(body).map_err(|source| ConfigError::RequestEncode { source }.into())
}

/// Decodes a successful response body, keeping the JSON path of any mismatch.
pub(crate) fn decode<T>(operation: &'static str, response: &HttpResponse) -> Result<T>
where
	T: DeserializeOwned,
{
	let mut deserializer = serde_json::Deserializer::from_slice(response.body());

	serde_path_to_error::deserialize(&mut deserializer).map_err(|source| {
		DecodeError { operation, status: response.status().as_u16(), source }.into()
	})
}

/// Extracts the API error code and a readable message from a failed response.
pub(crate) fn error_summary(response: &HttpResponse) -> (Option<String>, String) {
	let status = response.status();
	let body = serde_json::from_slice::<ErrorBody>(response.body()).unwrap_or_default();
	let message = body.message.or(body.error).unwrap_or_else(|| preview(status, response.body()));

	(body.code, message)
}

fn preview(status: StatusCode, body: &[u8]) -> String {
	let text = String::from_utf8_lossy(body);
	let text = text.trim();

	if text.is_empty() {
		return status.canonical_reason().unwrap_or("no response body").to_owned();
	}

	text.chars().take(BODY_PREVIEW_CHARS).collect()
}
