//! Access-token models, sources, and the client-credentials grant.

pub mod client_credentials;
pub mod metrics;
pub mod secret;
pub mod source;
pub mod token;

pub use client_credentials::*;
pub use metrics::*;
pub use secret::*;
pub use source::*;
pub use token::*;
