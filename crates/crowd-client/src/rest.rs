//! REST binding for the Crowd user-authentication operation.
//!
//! Exactly one endpoint of the Crowd REST API is bound here: user
//! authentication by login and password. The calling application
//! authenticates itself with HTTP basic auth on every request; failures
//! come back as an error entity whose reason code is mapped onto
//! [`CrowdError`].

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::config::CrowdConfig;
use crate::error::{CrowdError, CrowdResult};
use crate::CrowdClient;

const AUTHENTICATION_PATH: &str = "/rest/usermanagement/1/authentication";

/// Request entity carrying the user's password.
#[derive(Serialize)]
struct PasswordEntity<'a> {
    value: &'a str,
}

/// Error entity returned by Crowd alongside non-2xx statuses.
#[derive(Debug, Deserialize)]
struct ErrorEntity {
    #[serde(default)]
    reason: String,
    #[serde(default)]
    message: String,
}

/// Crowd client speaking the REST protocol.
///
/// Holds one HTTP client built at construction time; the handle is shared
/// across concurrent calls without additional locking.
pub struct RestCrowdClient {
    config: CrowdConfig,
    http: reqwest::Client,
}

impl RestCrowdClient {
    /// Creates a new client bound to the given configuration.
    ///
    /// Does not touch the network; the first remote call happens on the
    /// first [`authenticate_user`](CrowdClient::authenticate_user).
    ///
    /// ## Errors
    ///
    /// Returns a `Configuration` error when the configuration is invalid,
    /// or an `OperationFailed` error when the HTTP client cannot be built.
    /// Callers are expected to treat either as fatal at startup.
    pub fn new(config: CrowdConfig) -> CrowdResult<Self> {
        config.validate()?;
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { config, http })
    }

    /// Returns the configuration this client is bound to.
    #[must_use]
    pub fn config(&self) -> &CrowdConfig {
        &self.config
    }

    fn authentication_url(&self) -> String {
        let base = self.config.crowd_url.trim_end_matches('/');
        format!("{base}{AUTHENTICATION_PATH}")
    }
}

#[async_trait]
impl CrowdClient for RestCrowdClient {
    async fn authenticate_user(&self, username: &str, password: &str) -> CrowdResult<()> {
        tracing::debug!(username, "authenticating user against Crowd");

        let response = self
            .http
            .post(self.authentication_url())
            .query(&[("username", username)])
            .basic_auth(
                &self.config.application_name,
                Some(&self.config.application_password),
            )
            .json(&PasswordEntity { value: password })
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        let entity = serde_json::from_str::<ErrorEntity>(&body).ok();
        Err(classify(status, entity.as_ref(), &body, username))
    }
}

/// Maps a non-2xx response onto an error kind.
///
/// Application-level authentication failures surface as HTTP statuses (401,
/// 403); user-level rejections come back as 400 with a reason code in the
/// error entity. Anything unrecognized is a generic operation failure.
fn classify(
    status: StatusCode,
    entity: Option<&ErrorEntity>,
    body: &str,
    username: &str,
) -> CrowdError {
    let reason = entity.map_or("", |e| e.reason.as_str());
    match (status.as_u16(), reason) {
        (401, _) => CrowdError::InvalidAuthentication(remote_message(status, entity, body)),
        (403, _) => CrowdError::ApplicationPermission(remote_message(status, entity, body)),
        (400, "USER_NOT_FOUND" | "INVALID_USER_AUTHENTICATION") => {
            CrowdError::user_not_found(username)
        }
        (400, "INACTIVE_ACCOUNT") => CrowdError::inactive_account(username),
        (400, "EXPIRED_CREDENTIAL") => CrowdError::expired_credential(username),
        (400, "APPLICATION_PERMISSION_DENIED" | "APPLICATION_ACCESS_DENIED") => {
            CrowdError::ApplicationPermission(remote_message(status, entity, body))
        }
        _ => CrowdError::operation_failed(remote_message(status, entity, body)),
    }
}

fn remote_message(status: StatusCode, entity: Option<&ErrorEntity>, body: &str) -> String {
    match entity {
        Some(e) if !e.message.is_empty() => format!("{status}: {}", e.message),
        _ if !body.trim().is_empty() => format!("{status}: {}", body.trim()),
        _ => status.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn config_for(base_url: &str) -> CrowdConfig {
        CrowdConfig::builder()
            .crowd_url(base_url)
            .application_name("sonar")
            .application_password("secret")
            .build()
            .unwrap()
    }

    fn client_for(base_url: &str) -> RestCrowdClient {
        RestCrowdClient::new(config_for(base_url)).unwrap()
    }

    fn error_entity(reason: &str) -> ErrorEntity {
        ErrorEntity {
            reason: reason.to_string(),
            message: format!("{reason} happened"),
        }
    }

    #[test]
    fn classify_user_rejections() {
        for reason in ["USER_NOT_FOUND", "INVALID_USER_AUTHENTICATION"] {
            let err = classify(
                StatusCode::BAD_REQUEST,
                Some(&error_entity(reason)),
                "",
                "jdoe",
            );
            assert!(matches!(err, CrowdError::UserNotFound { ref username } if username == "jdoe"));
        }

        let err = classify(
            StatusCode::BAD_REQUEST,
            Some(&error_entity("INACTIVE_ACCOUNT")),
            "",
            "jdoe",
        );
        assert!(matches!(err, CrowdError::InactiveAccount { .. }));

        let err = classify(
            StatusCode::BAD_REQUEST,
            Some(&error_entity("EXPIRED_CREDENTIAL")),
            "",
            "jdoe",
        );
        assert!(matches!(err, CrowdError::ExpiredCredential { .. }));
    }

    #[test]
    fn classify_application_failures() {
        let err = classify(StatusCode::UNAUTHORIZED, None, "Application not authenticated", "jdoe");
        assert!(matches!(err, CrowdError::InvalidAuthentication(_)));

        let err = classify(StatusCode::FORBIDDEN, None, "", "jdoe");
        assert!(matches!(err, CrowdError::ApplicationPermission(_)));

        for reason in ["APPLICATION_PERMISSION_DENIED", "APPLICATION_ACCESS_DENIED"] {
            let err = classify(
                StatusCode::BAD_REQUEST,
                Some(&error_entity(reason)),
                "",
                "jdoe",
            );
            assert!(matches!(err, CrowdError::ApplicationPermission(_)));
        }
    }

    #[test]
    fn classify_unknown_failures() {
        let err = classify(StatusCode::INTERNAL_SERVER_ERROR, None, "boom", "jdoe");
        assert!(matches!(err, CrowdError::OperationFailed(_)));

        // 400 with an unrecognized or missing reason is not a user rejection
        let err = classify(
            StatusCode::BAD_REQUEST,
            Some(&error_entity("SOMETHING_NEW")),
            "",
            "jdoe",
        );
        assert!(matches!(err, CrowdError::OperationFailed(_)));

        let err = classify(StatusCode::BAD_REQUEST, None, "not json", "jdoe");
        assert!(matches!(err, CrowdError::OperationFailed(_)));
    }

    #[test]
    fn remote_message_prefers_entity_message() {
        let entity = error_entity("USER_NOT_FOUND");
        let msg = remote_message(StatusCode::BAD_REQUEST, Some(&entity), "raw body");
        assert!(msg.contains("USER_NOT_FOUND happened"));

        let msg = remote_message(StatusCode::BAD_REQUEST, None, "raw body");
        assert!(msg.contains("raw body"));

        let msg = remote_message(StatusCode::BAD_GATEWAY, None, "");
        assert!(msg.contains("502"));
    }

    #[test]
    fn authentication_url_joins_cleanly() {
        let client = client_for("http://localhost:8095/crowd/");
        assert_eq!(
            client.authentication_url(),
            "http://localhost:8095/crowd/rest/usermanagement/1/authentication"
        );
    }

    #[tokio::test]
    async fn sends_expected_request_shape() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path(AUTHENTICATION_PATH)
                    .query_param("username", "alice")
                    // base64("sonar:secret")
                    .header("authorization", "Basic c29uYXI6c2VjcmV0")
                    .json_body(json!({"value": "correct"}));
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(json!({"name": "alice", "active": true}));
            })
            .await;

        let client = client_for(&server.base_url());
        client.authenticate_user("alice", "correct").await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn unknown_user_is_a_user_rejection() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path(AUTHENTICATION_PATH);
                then.status(400)
                    .header("content-type", "application/json")
                    .json_body(json!({
                        "reason": "USER_NOT_FOUND",
                        "message": "User <bob> does not exist"
                    }));
            })
            .await;

        let client = client_for(&server.base_url());
        let err = client.authenticate_user("bob", "whatever").await.unwrap_err();
        assert!(matches!(err, CrowdError::UserNotFound { ref username } if username == "bob"));
    }

    #[tokio::test]
    async fn rejected_application_credentials() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path(AUTHENTICATION_PATH);
                then.status(401).body("Application failed to authenticate");
            })
            .await;

        let client = client_for(&server.base_url());
        let err = client.authenticate_user("alice", "correct").await.unwrap_err();
        assert!(matches!(err, CrowdError::InvalidAuthentication(_)));
    }

    #[tokio::test]
    async fn server_error_is_operation_failure() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path(AUTHENTICATION_PATH);
                then.status(500).body("internal error");
            })
            .await;

        let client = client_for(&server.base_url());
        let err = client.authenticate_user("alice", "correct").await.unwrap_err();
        assert!(matches!(err, CrowdError::OperationFailed(_)));
    }

    #[tokio::test]
    async fn unreachable_server_is_operation_failure() {
        let client = client_for("http://127.0.0.1:1");
        let err = client.authenticate_user("alice", "correct").await.unwrap_err();
        assert!(matches!(err, CrowdError::OperationFailed(_)));
    }

    #[test]
    fn construction_rejects_invalid_configuration() {
        let config = CrowdConfig {
            crowd_url: "not-a-url".to_string(),
            application_name: "sonar".to_string(),
            application_password: "secret".to_string(),
            timeout: std::time::Duration::from_secs(30),
        };
        assert!(matches!(
            RestCrowdClient::new(config),
            Err(CrowdError::Configuration(_))
        ));
    }
}
