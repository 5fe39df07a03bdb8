//! Client-level error types shared across transport, token, codec, and await layers.

// self
use crate::{_prelude::*, model::ResourceKind, outcome::FailureKind};

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Access token could not be obtained.
	#[error(transparent)]
	Token(#[from] TokenError),
	/// The API answered with a failure, or the retry budget ran out.
	#[error(transparent)]
	Service(#[from] ServiceError),
	/// The response body did not match the expected model.
	#[error(transparent)]
	Decode(#[from] DecodeError),
	/// Awaiting a resource timed out, locally or at the gateway.
	#[error(transparent)]
	Timeout(#[from] TimeoutError),

	/// The API does not know the requested resource.
	#[error("The {kind} `{id}` was not found.")]
	NotFound {
		/// Kind of resource that was requested.
		kind: ResourceKind,
		/// Identifier that was requested.
		id: Uuid,
	},
	/// The resource reached a rejected or revoked state.
	#[error("The {kind} `{id}` was rejected with status `{status}`.")]
	Rejected {
		/// Kind of resource that was awaited.
		kind: ResourceKind,
		/// Identifier that was awaited.
		id: Uuid,
		/// Terminal status reported by the API.
		status: String,
	},
	/// The API reported a status this client does not recognise.
	#[error("The {kind} `{id}` reported an unrecognised status `{status}`.")]
	UnknownStatus {
		/// Kind of resource that was awaited.
		kind: ResourceKind,
		/// Identifier that was awaited.
		id: Uuid,
		/// Raw status value.
		status: String,
	},
}
impl Error {
	/// Classifies the failure for callers that only care about its broad kind.
	pub fn failure_kind(&self) -> FailureKind {
		match self {
			Self::Rejected { .. } => FailureKind::Rejected,
			Self::Timeout(_) => FailureKind::Timeout,
			Self::NotFound { .. } => FailureKind::NotFound,
			Self::Service(_) => FailureKind::Service,
			_ => FailureKind::Other,
		}
	}
}

/// Configuration and validation failures raised before a request leaves the client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
	/// Request body could not be serialised.
	#[error("Request body could not be encoded as JSON.")]
	RequestEncode {
		/// Underlying serde failure.
		#[source]
		source: serde_json::Error,
	},
	/// A URL setting cannot be parsed.
	#[error("The {setting} URL is invalid.")]
	InvalidUrl {
		/// Setting or endpoint name.
		setting: &'static str,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Endpoints must use HTTPS unless they point at a loopback host.
	#[error("The debit URL must use HTTPS: {url}.")]
	InsecureEndpoint {
		/// URL that failed validation.
		url: String,
	},
	/// A required setting is missing or blank.
	#[error("The {setting} setting is required.")]
	MissingSetting {
		/// Setting name.
		setting: &'static str,
	},
	/// A setting holds a value that cannot be interpreted.
	#[error("The {setting} setting has an invalid value `{value}`.")]
	InvalidSetting {
		/// Setting name.
		setting: &'static str,
		/// Offending value.
		value: String,
	},
	/// A poll source was asked to handle a resource kind it does not serve.
	#[error("Cannot {operation} a {kind} through this source.")]
	UnsupportedOperation {
		/// Resource kind that was requested.
		kind: ResourceKind,
		/// Operation label.
		operation: &'static str,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Failures raised while obtaining an access token.
#[derive(Debug, ThisError)]
pub enum TokenError {
	/// Token endpoint refused the client credentials.
	#[error("Token endpoint rejected the client credentials: {reason}.")]
	Rejected {
		/// Provider-supplied reason string.
		reason: String,
		/// HTTP status code, when available.
		status: Option<u16>,
	},
	/// Token endpoint returned an unexpected but well-formed response.
	#[error("Token endpoint returned an unexpected response: {message}.")]
	Endpoint {
		/// Summary of the failure.
		message: String,
		/// HTTP status code, when available.
		status: Option<u16>,
	},
	/// Token endpoint responded with malformed JSON.
	#[error("Token endpoint returned malformed JSON.")]
	Parse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code, when available.
		status: Option<u16>,
	},
	/// Token endpoint could not be reached.
	#[error("Token endpoint could not be reached.")]
	Transport(#[source] TransportError),
	/// Token endpoint response omitted `expires_in` or sent a non-positive value.
	#[error("Token endpoint response carries no usable expires_in.")]
	InvalidExpiry,
}

/// Transport-level failures (network, IO, request construction).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the Blink Debit API.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the Blink Debit API.")]
	Io(#[from] std::io::Error),
	/// The request could not be converted for the transport.
	#[error("Request could not be prepared for the transport.")]
	Request(#[source] oauth2::http::Error),
	/// Transport failed without a structured error.
	#[error("HTTP client error occurred while calling the Blink Debit API: {message}.")]
	Other {
		/// Transport-supplied message.
		message: String,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}

	/// Returns `true` when the failure happened on the wire and re-sending may succeed.
	pub fn is_retryable(&self) -> bool {
		match self {
			#[cfg(feature = "reqwest")]
			Self::Network { source } =>
				source.downcast_ref::<ReqwestError>().is_none_or(|err| !err.is_builder()),
			#[cfg(not(feature = "reqwest"))]
			Self::Network { .. } => true,
			Self::Io(_) | Self::Other { .. } => true,
			Self::Request(_) => false,
		}
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

/// Failure reported by the API (or the retry budget) for a single logical request.
#[derive(Debug, ThisError)]
#[error("The {operation} request failed after {attempts} attempt(s): {message}.")]
pub struct ServiceError {
	/// Operation label, e.g. `get_single_consent`.
	pub operation: &'static str,
	/// Final HTTP status code, absent when the transport never produced a response.
	pub status: Option<u16>,
	/// API error code, when the body carried one.
	pub code: Option<String>,
	/// Human-readable summary.
	pub message: String,
	/// Number of attempts that were made.
	pub attempts: u32,
	/// Retry-After hint from the final response.
	pub retry_after: Option<Duration>,
	/// Transport failure behind the final attempt, if any.
	#[source]
	pub source: Option<TransportError>,
}
impl ServiceError {
	/// Returns `true` when the API rejected the access token.
	pub fn is_unauthorized(&self) -> bool {
		self.status == Some(401)
	}
}

/// Response body could not be decoded into the expected model.
#[derive(Debug, ThisError)]
#[error("The {operation} response (HTTP {status}) could not be decoded.")]
pub struct DecodeError {
	/// Operation label.
	pub operation: &'static str,
	/// HTTP status code of the decoded response.
	pub status: u16,
	/// Path-aware parsing failure.
	#[source]
	pub source: serde_path_to_error::Error<serde_json::Error>,
}

/// Await timeouts, either reported by the API or caused by an exhausted wait budget.
#[derive(Debug, ThisError)]
pub enum TimeoutError {
	/// The gateway flow timed out before the customer completed it.
	#[error("The gateway flow for {kind} `{id}` timed out.")]
	Gateway {
		/// Kind of resource that was awaited.
		kind: ResourceKind,
		/// Identifier that was awaited.
		id: Uuid,
	},
	/// The resource stayed pending for the whole wait budget.
	#[error("The {kind} `{id}` did not settle within {max_wait_seconds} second(s).")]
	WaitExhausted {
		/// Kind of resource that was awaited.
		kind: ResourceKind,
		/// Identifier that was awaited.
		id: Uuid,
		/// Budget that was exhausted.
		max_wait_seconds: u32,
		/// Failure of the best-effort revocation that followed, if any.
		revocation_failure: Option<Box<Error>>,
	},
}
impl TimeoutError {
	/// Returns the suppressed revocation failure attached to an exhausted wait.
	pub fn revocation_failure(&self) -> Option<&Error> {
		match self {
			Self::WaitExhausted { revocation_failure, .. } => revocation_failure.as_deref(),
			Self::Gateway { .. } => None,
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn rejected_message_names_the_resource() {
		let id = Uuid::nil();
		let err =
			Error::Rejected { kind: ResourceKind::SingleConsent, id, status: "Revoked".into() };

		assert!(err.to_string().contains(&id.to_string()));
		assert!(err.to_string().contains("Revoked"));
		assert_eq!(err.failure_kind(), FailureKind::Rejected);
	}

	#[test]
	fn revocation_failure_is_not_the_source() {
		let revoke = Error::NotFound { kind: ResourceKind::EnduringConsent, id: Uuid::nil() };
		let err = Error::from(TimeoutError::WaitExhausted {
			kind: ResourceKind::EnduringConsent,
			id: Uuid::nil(),
			max_wait_seconds: 3,
			revocation_failure: Some(Box::new(revoke)),
		});

		assert!(StdError::source(&err).is_none());

		let Error::Timeout(timeout) = &err else {
			panic!("Exhausted waits must surface as timeouts.");
		};

		assert!(matches!(timeout.revocation_failure(), Some(Error::NotFound { .. })));
	}

	#[test]
	fn builder_failures_are_not_retryable() {
		let err = TransportError::Request(
			oauth2::http::Request::builder()
				.uri("not a uri")
				.body(Vec::<u8>::new())
				.expect_err("Invalid URIs must fail to build."),
		);

		assert!(!err.is_retryable());
		assert!(TransportError::Other { message: "reset".into() }.is_retryable());
	}
}
