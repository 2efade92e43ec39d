//! Crowd client error types.
//!
//! The remote service rejects an authentication attempt with one of six
//! distinguishable kinds. User-cause rejections (unknown user, inactive
//! account, expired credential) are expected outcomes of normal operation;
//! application-cause and unknown failures indicate a misconfiguration or an
//! operational problem on the Crowd side.

use thiserror::Error;

/// Errors produced while constructing or using a Crowd client.
#[derive(Debug, Error)]
pub enum CrowdError {
    /// Invalid or incomplete client configuration.
    ///
    /// Raised at construction time only; authentication calls never
    /// return this kind.
    #[error("Crowd configuration error: {0}")]
    Configuration(String),

    /// The remote service rejected the principal.
    ///
    /// Covers both an unknown user and a rejected user password; either
    /// way the login attempt is an expected user-side failure.
    #[error("user not found: {username}")]
    UserNotFound {
        /// Login the service rejected.
        username: String,
    },

    /// The principal exists but the account is disabled.
    #[error("inactive account: {username}")]
    InactiveAccount {
        /// Login of the disabled account.
        username: String,
    },

    /// The user's credential is past its expiry date.
    #[error("expired credentials for user {username}")]
    ExpiredCredential {
        /// Login whose credential has expired.
        username: String,
    },

    /// The calling application is not permitted to perform the operation.
    #[error("application permission denied: {0}")]
    ApplicationPermission(String),

    /// The calling application's own credentials were rejected.
    #[error("invalid application authentication: {0}")]
    InvalidAuthentication(String),

    /// Transient or unknown remote failure.
    #[error("authentication operation failed: {0}")]
    OperationFailed(String),
}

impl CrowdError {
    /// Creates a configuration error.
    #[must_use]
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Creates a user-not-found error.
    #[must_use]
    pub fn user_not_found(username: impl Into<String>) -> Self {
        Self::UserNotFound {
            username: username.into(),
        }
    }

    /// Creates an inactive-account error.
    #[must_use]
    pub fn inactive_account(username: impl Into<String>) -> Self {
        Self::InactiveAccount {
            username: username.into(),
        }
    }

    /// Creates an expired-credential error.
    #[must_use]
    pub fn expired_credential(username: impl Into<String>) -> Self {
        Self::ExpiredCredential {
            username: username.into(),
        }
    }

    /// Creates a generic operation failure.
    #[must_use]
    pub fn operation_failed(msg: impl Into<String>) -> Self {
        Self::OperationFailed(msg.into())
    }

    /// Checks if this is an expected user-side rejection.
    #[must_use]
    pub const fn is_user_rejection(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound { .. } | Self::InactiveAccount { .. } | Self::ExpiredCredential { .. }
        )
    }

    /// Checks if this failure is caused by the calling application's own
    /// identity or permissions.
    #[must_use]
    pub const fn is_application_error(&self) -> bool {
        matches!(self, Self::ApplicationPermission(_) | Self::InvalidAuthentication(_))
    }
}

impl From<reqwest::Error> for CrowdError {
    fn from(err: reqwest::Error) -> Self {
        Self::OperationFailed(err.to_string())
    }
}

/// Result type for Crowd client operations.
pub type CrowdResult<T> = Result<T, CrowdError>;
