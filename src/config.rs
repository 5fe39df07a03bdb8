//! Client configuration: builder, environment loading, and validation.

// std
use std::net::IpAddr;
// crates.io
use url::Host;
// self
use crate::{_prelude::*, auth::TokenSecret, error::ConfigError, retry::RetryPolicy};

/// Environment variable holding the debit URL.
pub const DEBIT_URL_ENV: &str = "BLINKPAY_DEBIT_URL";
/// Environment variable holding the OAuth client id.
pub const CLIENT_ID_ENV: &str = "BLINKPAY_CLIENT_ID";
/// Environment variable holding the OAuth client secret.
pub const CLIENT_SECRET_ENV: &str = "BLINKPAY_CLIENT_SECRET";
/// Environment variable holding the request timeout in seconds.
pub const TIMEOUT_ENV: &str = "BLINKPAY_TIMEOUT";
/// Environment variable toggling retries (`true`/`false`).
pub const RETRY_ENABLED_ENV: &str = "BLINKPAY_RETRY_ENABLED";

const DEFAULT_REQUEST_TIMEOUT: StdDuration = StdDuration::from_secs(10);
const DEFAULT_PREEMPTIVE_WINDOW: Duration = Duration::seconds(60);

/// Published Blink Debit deployments.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Environment {
	/// Sandbox with test banks.
	Sandbox,
	/// Live payments.
	Production,
}
impl Environment {
	/// Returns the debit URL of the deployment.
	pub const fn debit_url(self) -> &'static str {
		match self {
			Self::Sandbox => "https://sandbox.debit.blinkpay.co.nz",
			Self::Production => "https://debit.blinkpay.co.nz",
		}
	}
}

/// Validated client configuration.
#[derive(Clone, Debug)]
pub struct ClientConfig {
	/// Base URL of the API and its token endpoint.
	pub debit_url: Url,
	/// OAuth client id.
	pub client_id: String,
	/// OAuth client secret.
	pub client_secret: TokenSecret,
	/// Timeout applied to every HTTP request.
	pub request_timeout: StdDuration,
	/// Retry policy applied to every API request.
	pub retry: RetryPolicy,
	/// Tokens expiring within this window are renewed before use.
	pub token_preemptive_window: Duration,
}
impl ClientConfig {
	/// Returns a builder.
	pub fn builder() -> ClientConfigBuilder {
		ClientConfigBuilder::default()
	}

	/// Loads the configuration from `BLINKPAY_*` environment variables.
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::from_lookup(|key| std::env::var(key).ok())
	}

	/// Loads the configuration through `lookup`, which resolves `BLINKPAY_*` names.
	///
	/// The debit URL, client id, and client secret are required. The timeout defaults to
	/// 10 seconds and retries default to enabled.
	pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let setting = |name: &'static str| lookup(name).filter(|value| !value.trim().is_empty());
		let raw_url =
			setting(DEBIT_URL_ENV).ok_or(ConfigError::MissingSetting { setting: DEBIT_URL_ENV })?;
		let debit_url = Url::parse(raw_url.trim())
			.map_err(|source| ConfigError::InvalidUrl { setting: DEBIT_URL_ENV, source })?;
		let mut builder = Self::builder().debit_url(debit_url);

		if let Some(client_id) = setting(CLIENT_ID_ENV) {
			builder = builder.client_id(client_id.trim());
		}
		if let Some(client_secret) = setting(CLIENT_SECRET_ENV) {
			builder = builder.client_secret(client_secret.trim());
		}
		if let Some(raw) = setting(TIMEOUT_ENV) {
			let seconds = raw.trim().parse::<u64>().map_err(|_| ConfigError::InvalidSetting {
				setting: TIMEOUT_ENV,
				value: raw.clone(),
			})?;

			builder = builder.request_timeout(StdDuration::from_secs(seconds));
		}
		if let Some(raw) = setting(RETRY_ENABLED_ENV) {
			let enabled = parse_flag(&raw).ok_or_else(|| ConfigError::InvalidSetting {
				setting: RETRY_ENABLED_ENV,
				value: raw.clone(),
			})?;

			builder = builder.retry_enabled(enabled);
		}

		builder.build()
	}
}

/// Builder for [`ClientConfig`] values.
#[derive(Debug)]
pub struct ClientConfigBuilder {
	debit_url: Option<Url>,
	client_id: Option<String>,
	client_secret: Option<TokenSecret>,
	request_timeout: StdDuration,
	retry: RetryPolicy,
	token_preemptive_window: Duration,
}
impl ClientConfigBuilder {
	/// Sets the debit URL.
	pub fn debit_url(mut self, url: Url) -> Self {
		self.debit_url = Some(url);

		self
	}

	/// Points the client at a published deployment.
	pub fn environment(self, environment: Environment) -> Result<Self, ConfigError> {
		let url = Url::parse(environment.debit_url())
			.map_err(|source| ConfigError::InvalidUrl { setting: "environment", source })?;

		Ok(self.debit_url(url))
	}

	/// Sets the OAuth client id.
	pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
		self.client_id = Some(client_id.into());

		self
	}

	/// Sets the OAuth client secret.
	pub fn client_secret(mut self, client_secret: impl Into<String>) -> Self {
		self.client_secret = Some(TokenSecret::new(client_secret));

		self
	}

	/// Overrides the request timeout (defaults to 10 seconds).
	pub fn request_timeout(mut self, timeout: StdDuration) -> Self {
		self.request_timeout = timeout;

		self
	}

	/// Overrides the retry policy.
	pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
		self.retry = policy;

		self
	}

	/// Enables or disables retries while keeping the schedule.
	pub fn retry_enabled(mut self, enabled: bool) -> Self {
		self.retry = self.retry.with_enabled(enabled);

		self
	}

	/// Overrides the token preemptive window (defaults to 60 seconds).
	pub fn token_preemptive_window(mut self, window: Duration) -> Self {
		self.token_preemptive_window = if window.is_negative() { Duration::ZERO } else { window };

		self
	}

	/// Consumes the builder and validates the resulting configuration.
	pub fn build(self) -> Result<ClientConfig, ConfigError> {
		let debit_url =
			self.debit_url.ok_or(ConfigError::MissingSetting { setting: DEBIT_URL_ENV })?;
		let client_id = self
			.client_id
			.filter(|value| !value.trim().is_empty())
			.ok_or(ConfigError::MissingSetting { setting: CLIENT_ID_ENV })?;
		let client_secret = self
			.client_secret
			.filter(|value| !value.is_blank())
			.ok_or(ConfigError::MissingSetting { setting: CLIENT_SECRET_ENV })?;

		validate_debit_url(&debit_url)?;

		if self.request_timeout.is_zero() {
			return Err(ConfigError::InvalidSetting { setting: TIMEOUT_ENV, value: "0".into() });
		}

		Ok(ClientConfig {
			debit_url,
			client_id,
			client_secret,
			request_timeout: self.request_timeout,
			retry: self.retry,
			token_preemptive_window: self.token_preemptive_window,
		})
	}
}
impl Default for ClientConfigBuilder {
	fn default() -> Self {
		Self {
			debit_url: None,
			client_id: None,
			client_secret: None,
			request_timeout: DEFAULT_REQUEST_TIMEOUT,
			retry: RetryPolicy::default(),
			token_preemptive_window: DEFAULT_PREEMPTIVE_WINDOW,
		}
	}
}

fn validate_debit_url(url: &Url) -> Result<(), ConfigError> {
	// API paths are joined from the root.
	if url.cannot_be_a_base() || url.path() != "/" {
		return Err(ConfigError::InvalidSetting { setting: DEBIT_URL_ENV, value: url.to_string() });
	}

	match url.scheme() {
		"https" => Ok(()),
		"http" if is_loopback(url) => Ok(()),
		_ => Err(ConfigError::InsecureEndpoint { url: url.to_string() }),
	}
}

fn is_loopback(url: &Url) -> bool {
	match url.host() {
		Some(Host::Domain(domain)) => domain.eq_ignore_ascii_case("localhost"),
		Some(Host::Ipv4(ip)) => IpAddr::V4(ip).is_loopback(),
		Some(Host::Ipv6(ip)) => IpAddr::V6(ip).is_loopback(),
		None => false,
	}
}

fn parse_flag(raw: &str) -> Option<bool> {
	match raw.trim().to_ascii_lowercase().as_str() {
		"true" | "1" | "yes" => Some(true),
		"false" | "0" | "no" => Some(false),
		_ => None,
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::collections::HashMap;
	// self
	use super::*;

	fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
		let map = pairs
			.iter()
			.map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
			.collect::<HashMap<_, _>>();

		move |key| map.get(key).cloned()
	}

	#[test]
	fn loads_from_lookup() {
		let config = ClientConfig::from_lookup(lookup(&[
			(DEBIT_URL_ENV, "https://sandbox.debit.blinkpay.co.nz"),
			(CLIENT_ID_ENV, "merchant"),
			(CLIENT_SECRET_ENV, "s3cret"),
			(TIMEOUT_ENV, "30"),
			(RETRY_ENABLED_ENV, "false"),
		]))
		.expect("Complete settings should load.");

		assert_eq!(config.client_id, "merchant");
		assert_eq!(config.request_timeout, StdDuration::from_secs(30));
		assert_eq!(config.retry.max_attempts(), 1);
		assert_eq!(config.token_preemptive_window, Duration::seconds(60));
		assert!(!format!("{config:?}").contains("s3cret"));
	}

	#[test]
	fn missing_and_invalid_settings_are_named() {
		let err =
			ClientConfig::from_lookup(lookup(&[(DEBIT_URL_ENV, "https://debit.blinkpay.co.nz")]))
				.expect_err("Credentials are required.");

		assert!(matches!(err, ConfigError::MissingSetting { setting: CLIENT_ID_ENV }));

		let err = ClientConfig::from_lookup(lookup(&[
			(DEBIT_URL_ENV, "https://debit.blinkpay.co.nz"),
			(CLIENT_ID_ENV, "merchant"),
			(CLIENT_SECRET_ENV, "s3cret"),
			(TIMEOUT_ENV, "soon"),
		]))
		.expect_err("Non-numeric timeouts must fail.");

		assert!(matches!(err, ConfigError::InvalidSetting { setting: TIMEOUT_ENV, .. }));
	}

	#[test]
	fn plain_http_is_limited_to_loopback() {
		let builder = || ClientConfig::builder().client_id("merchant").client_secret("s3cret");
		let local = Url::parse("http://127.0.0.1:8080").expect("Loopback fixture should parse.");
		let remote = Url::parse("http://debit.example.com").expect("Remote fixture should parse.");

		assert!(builder().debit_url(local).build().is_ok());
		assert!(matches!(
			builder().debit_url(remote).build(),
			Err(ConfigError::InsecureEndpoint { .. })
		));
		assert_eq!(
			builder()
				.environment(Environment::Production)
				.expect("Published URLs parse.")
				.build()
				.expect("Production settings are valid.")
				.debit_url
				.as_str(),
			"https://debit.blinkpay.co.nz/"
		);
	}

	#[test]
	fn debit_url_must_not_carry_a_path() {
		let builder = || ClientConfig::builder().client_id("merchant").client_secret("s3cret");
		let prefixed = Url::parse("https://gateway.example.com/blink")
			.expect("Prefixed fixture should parse.");
		let trailing = Url::parse("https://gateway.example.com/blink/")
			.expect("Trailing-slash fixture should parse.");
		let root =
			Url::parse("https://gateway.example.com/").expect("Root fixture should parse.");

		for url in [prefixed, trailing] {
			assert!(matches!(
				builder().debit_url(url).build(),
				Err(ConfigError::InvalidSetting { setting: DEBIT_URL_ENV, .. })
			));
		}

		assert!(builder().debit_url(root).build().is_ok());
		assert!(matches!(
			ClientConfig::from_lookup(lookup(&[
				(DEBIT_URL_ENV, "https://gateway.example.com/blink"),
				(CLIENT_ID_ENV, "merchant"),
				(CLIENT_SECRET_ENV, "s3cret"),
			])),
			Err(ConfigError::InvalidSetting { setting: DEBIT_URL_ENV, .. })
		));
	}
}
