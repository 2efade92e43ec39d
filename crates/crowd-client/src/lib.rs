//! # crowd-client
//!
//! Client for the Atlassian Crowd user-authentication operation.
//!
//! The crate exposes three things:
//!
//! - [`CrowdConfig`], the three properties binding a client to a Crowd
//!   server (base URL, calling application name, shared secret);
//! - [`CrowdClient`], the remote-call abstraction whose single operation
//!   fails with one of six distinguishable [`CrowdError`] kinds;
//! - [`RestCrowdClient`], the REST implementation of that abstraction.
//!
//! Only the one operation consumers need is bound; the rest of the Crowd
//! REST API (SSO sessions, user and group management) is out of scope.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod config;
pub mod error;
pub mod rest;

pub use config::{
    CrowdConfig, CrowdConfigBuilder, KEY_CROWD_APP_NAME, KEY_CROWD_APP_PASSWORD, KEY_CROWD_URL,
};
pub use error::{CrowdError, CrowdResult};
pub use rest::RestCrowdClient;

use async_trait::async_trait;

/// Remote-call abstraction over the Crowd user-authentication operation.
///
/// Success carries no payload; failure is one of the six remote error
/// kinds of [`CrowdError`]. Implementations must be safe to share across
/// concurrent calls.
#[async_trait]
pub trait CrowdClient: Send + Sync {
    /// Authenticates a user by login and password against the remote
    /// service.
    ///
    /// Every call is an independent round trip: no caching, no retries.
    ///
    /// ## Errors
    ///
    /// One of the six remote kinds of [`CrowdError`]; see the enum docs
    /// for the cause classes.
    async fn authenticate_user(&self, username: &str, password: &str) -> CrowdResult<()>;
}
