//! Async Blink Debit client: typed consent and payment models, client-credentials tokens,
//! idempotent retries, and await helpers that poll resources until they settle.
//!
//! The crate is organised leaf-first:
//!
//! - [`retry`] re-issues a request on transport failures, 429, and 5xx responses with a fixed
//!   backoff schedule, and refreshes the access token once when the API answers 401.
//! - [`status`] maps consent and payment statuses onto success, pending, rejected, or
//!   gateway-timeout outcomes.
//! - [`poll`] drives the await loop over any [`poll::PollSource`].
//! - [`outcome`] offers the wrapped failure surface next to the precise [`Error`].
//! - [`client`] wires everything to the Blink Debit REST API.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod model;
pub mod obs;
pub mod outcome;
pub mod paths;
pub mod poll;
pub mod retry;
pub mod status;

mod codec;

pub use client::*;
pub use error::{Error, Result};

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
		time::Duration as StdDuration,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::{Mutex, RwLock};
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize, de::DeserializeOwned};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;
	pub use uuid::Uuid;

	pub use crate::error::{Error, Result};
}

pub use oauth2;
#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
pub use uuid;
#[cfg(test)] use {color_eyre as _, httpmock as _};
