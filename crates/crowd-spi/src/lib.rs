//! # crowd-spi
//!
//! Host plugin contract for login/password authenticators.
//!
//! The host framework loads an authenticator once, calls [`init`] during
//! startup, and then calls [`authenticate`] for every login attempt. The
//! contract is deliberately narrow: implementations report success or
//! failure as a boolean and keep failure diagnostics to their own logs.
//!
//! [`init`]: LoginPasswordAuthenticator::init
//! [`authenticate`]: LoginPasswordAuthenticator::authenticate

#![forbid(unsafe_code)]
#![deny(missing_docs)]

use async_trait::async_trait;

/// Capability interface implemented by login/password authenticators.
///
/// The host owns the lifecycle: one instance is created at startup and
/// shared across all login attempts, so implementations must be safe to
/// call concurrently.
#[async_trait]
pub trait LoginPasswordAuthenticator: Send + Sync {
    /// Lifecycle hook called once by the host before the first
    /// authentication attempt.
    ///
    /// Must be infallible; implementations with no startup work leave it
    /// empty.
    async fn init(&self);

    /// Checks the given credentials, returning `true` when they are valid.
    ///
    /// Implementations must not panic or surface errors here: every
    /// failure, expected or not, is reported as `false`.
    async fn authenticate(&self, login: &str, password: &str) -> bool;
}
