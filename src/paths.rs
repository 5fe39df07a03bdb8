//! REST paths of the Blink Debit API.

// self
use crate::{_prelude::*, error::ConfigError};

/// Client-credentials token endpoint.
pub const TOKEN: &str = "/oauth2/token";
/// Single consent collection.
pub const SINGLE_CONSENTS: &str = "/payments/v1/single-consents";
/// Enduring consent collection.
pub const ENDURING_CONSENTS: &str = "/payments/v1/enduring-consents";
/// Quick payment collection.
pub const QUICK_PAYMENTS: &str = "/payments/v1/quick-payments";
/// Payment collection.
pub const PAYMENTS: &str = "/payments/v1/payments";
/// Refund collection.
pub const REFUNDS: &str = "/payments/v1/refunds";
/// Bank metadata.
pub const META: &str = "/payments/v1/meta";

/// Resolves a collection path against the debit URL.
pub fn collection(base: &Url, path: &str) -> Result<Url, ConfigError> {
	base.join(path).map_err(|source| ConfigError::InvalidUrl { setting: "endpoint", source })
}

/// Resolves `{path}/{id}` against the debit URL.
pub fn resource(base: &Url, path: &str, id: impl Display) -> Result<Url, ConfigError> {
	collection(base, &format!("{path}/{id}"))
}
