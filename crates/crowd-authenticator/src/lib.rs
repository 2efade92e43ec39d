//! # crowd-authenticator
//!
//! Login/password authenticator backed by an Atlassian Crowd server.
//!
//! [`CrowdAuthenticator`] implements the host's
//! [`LoginPasswordAuthenticator`](crowd_spi::LoginPasswordAuthenticator)
//! contract by delegating each attempt to a
//! [`CrowdClient`](crowd_client::CrowdClient) and translating the outcome
//! into a boolean. Failure causes are never surfaced to the caller; they
//! are logged, at debug for expected user-side rejections and at error for
//! application-level or unknown failures.
//!
//! ## Example
//!
//! ```ignore
//! use crowd_authenticator::CrowdAuthenticator;
//! use crowd_client::CrowdConfig;
//! use crowd_spi::LoginPasswordAuthenticator;
//!
//! let config = CrowdConfig::from_properties(&properties)?;
//! let authenticator = CrowdAuthenticator::new(config)?;
//! authenticator.init().await;
//! let ok = authenticator.authenticate("jdoe", "password").await;
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod authenticator;

pub use authenticator::CrowdAuthenticator;
