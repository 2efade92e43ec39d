//! Crowd client configuration.
//!
//! Three string properties bind a client to a Crowd server: the base URL,
//! the calling application's name, and the calling application's shared
//! secret. All three are required before a client can be constructed.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{CrowdError, CrowdResult};

/// Property key for the Crowd server base URL.
pub const KEY_CROWD_URL: &str = "crowd.url";

/// Property key for the calling application's name.
pub const KEY_CROWD_APP_NAME: &str = "crowd.application";

/// Property key for the calling application's shared secret.
pub const KEY_CROWD_APP_PASSWORD: &str = "crowd.password";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

fn default_timeout() -> Duration {
    DEFAULT_TIMEOUT
}

/// Configuration for a Crowd client.
///
/// A value of this type has always passed [`validate`](Self::validate):
/// both construction paths run validation before returning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrowdConfig {
    /// Base URL of the Crowd server, e.g. `https://crowd.example.org/crowd`.
    pub crowd_url: String,

    /// Name identifying the calling application to Crowd.
    pub application_name: String,

    /// Shared secret authorizing the calling application.
    #[serde(skip_serializing)]
    pub application_password: String,

    /// Request timeout applied to every remote call.
    #[serde(default = "default_timeout")]
    pub timeout: Duration,
}

impl CrowdConfig {
    /// Creates a new configuration builder.
    #[must_use]
    pub fn builder() -> CrowdConfigBuilder {
        CrowdConfigBuilder::new()
    }

    /// Builds a configuration from a string-properties map using the
    /// well-known `crowd.*` keys.
    ///
    /// ## Errors
    ///
    /// Returns a `Configuration` error when any of the three keys is
    /// missing or the resulting configuration is invalid. Callers are
    /// expected to treat this as fatal at startup.
    pub fn from_properties(properties: &HashMap<String, String>) -> CrowdResult<Self> {
        let get = |key: &str| {
            properties
                .get(key)
                .cloned()
                .ok_or_else(|| CrowdError::config(format!("property {key} is not set")))
        };

        Self::builder()
            .crowd_url(get(KEY_CROWD_URL)?)
            .application_name(get(KEY_CROWD_APP_NAME)?)
            .application_password(get(KEY_CROWD_APP_PASSWORD)?)
            .build()
    }

    /// Validates the configuration.
    ///
    /// ## Errors
    ///
    /// Returns a `Configuration` error when the URL is not HTTP(S) or any
    /// required property is empty.
    pub fn validate(&self) -> CrowdResult<()> {
        let url = self.crowd_url.to_lowercase();
        let host = url
            .strip_prefix("https://")
            .or_else(|| url.strip_prefix("http://"))
            .ok_or_else(|| {
                CrowdError::config("crowd_url must start with 'http://' or 'https://'")
            })?;
        if host.is_empty() {
            return Err(CrowdError::config("crowd_url is missing a host"));
        }
        if self.application_name.is_empty() {
            return Err(CrowdError::config("application_name cannot be empty"));
        }
        if self.application_password.is_empty() {
            return Err(CrowdError::config("application_password cannot be empty"));
        }
        Ok(())
    }
}

/// Builder for [`CrowdConfig`].
#[derive(Debug, Default)]
pub struct CrowdConfigBuilder {
    crowd_url: Option<String>,
    application_name: Option<String>,
    application_password: Option<String>,
    timeout: Option<Duration>,
}

impl CrowdConfigBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the Crowd server base URL.
    #[must_use]
    pub fn crowd_url(mut self, url: impl Into<String>) -> Self {
        self.crowd_url = Some(url.into());
        self
    }

    /// Sets the calling application's name.
    #[must_use]
    pub fn application_name(mut self, name: impl Into<String>) -> Self {
        self.application_name = Some(name.into());
        self
    }

    /// Sets the calling application's shared secret.
    #[must_use]
    pub fn application_password(mut self, password: impl Into<String>) -> Self {
        self.application_password = Some(password.into());
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds and validates the configuration.
    ///
    /// ## Errors
    ///
    /// Returns a `Configuration` error when a required property is missing
    /// or validation fails.
    pub fn build(self) -> CrowdResult<CrowdConfig> {
        let config = CrowdConfig {
            crowd_url: self
                .crowd_url
                .ok_or_else(|| CrowdError::config("crowd_url is required"))?,
            application_name: self
                .application_name
                .ok_or_else(|| CrowdError::config("application_name is required"))?,
            application_password: self
                .application_password
                .ok_or_else(|| CrowdError::config("application_password is required"))?,
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
        };
        config.validate()?;
        Ok(config)
    }
}
