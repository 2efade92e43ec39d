//! The Crowd login/password authenticator.

use async_trait::async_trait;
use crowd_client::{CrowdClient, CrowdConfig, CrowdError, CrowdResult, RestCrowdClient};
use crowd_spi::LoginPasswordAuthenticator;

/// Authenticator delegating credential checks to a Crowd server.
///
/// The remote client is built once at construction and shared across all
/// calls for the lifetime of the host plugin; the adapter adds no locking
/// of its own. Every `authenticate` call is a fresh round trip.
pub struct CrowdAuthenticator<C = RestCrowdClient> {
    client: C,
}

impl CrowdAuthenticator<RestCrowdClient> {
    /// Creates a new authenticator with the specified configuration.
    ///
    /// ## Errors
    ///
    /// Returns an error when the REST client cannot be constructed from
    /// the configuration. The host is expected to treat this as a fatal
    /// startup error; no recovery is attempted here.
    pub fn new(configuration: CrowdConfig) -> CrowdResult<Self> {
        Ok(Self {
            client: RestCrowdClient::new(configuration)?,
        })
    }
}

impl<C: CrowdClient> CrowdAuthenticator<C> {
    /// Creates an authenticator over an already-constructed client.
    pub const fn with_client(client: C) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<C: CrowdClient> LoginPasswordAuthenticator for CrowdAuthenticator<C> {
    async fn init(&self) {
        // noop
    }

    async fn authenticate(&self, login: &str, password: &str) -> bool {
        match self.client.authenticate_user(login, password).await {
            Ok(()) => true,
            Err(err) => {
                log_failure(login, &err);
                false
            }
        }
    }
}

/// Logs one line per failed call.
///
/// Expected user-side rejections go to debug; application-cause and
/// unknown failures are operational concerns and go to error.
fn log_failure(login: &str, err: &CrowdError) {
    match err {
        CrowdError::UserNotFound { .. } => {
            tracing::debug!(login, "user not found");
        }
        CrowdError::InactiveAccount { .. } => {
            tracing::debug!(login, "user is not active");
        }
        CrowdError::ExpiredCredential { .. } => {
            tracing::debug!(login, "credentials of user have expired");
        }
        CrowdError::ApplicationPermission(_) => {
            tracing::error!(login, error = %err, "access to Crowd has been denied for this application");
        }
        CrowdError::InvalidAuthentication(_) => {
            tracing::error!(login, error = %err, "invalid Crowd credentials for this application");
        }
        CrowdError::OperationFailed(_) | CrowdError::Configuration(_) => {
            tracing::error!(login, error = %err, "unable to authenticate user");
        }
    }
}
