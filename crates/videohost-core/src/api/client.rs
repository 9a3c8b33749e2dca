//! Client for a GoTrue-compatible hosted auth API.
//!
//! Requests go to `{project_url}/auth/v1/...` with the project's anon key in
//! the `apikey` header. The access token returned by a password sign-in is
//! held in memory for `sign_out` and `current_user`; it is never written to
//! disk.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, warn};

use crate::auth::{AuthError, AuthProvider, Identity};
use crate::config::AuthConfig;

use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

/// Path prefix for all auth endpoints
const AUTH_PATH: &str = "auth/v1";

/// HTTP request timeout in seconds.
/// 30s allows for slow API responses while failing fast enough for good UX.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Header carrying the project's public anon key
const API_KEY_HEADER: &str = "apikey";

/// Fields GoTrue uses for a human-readable failure, in preference order
const REJECTION_FIELDS: [&str; 4] = ["error_description", "msg", "message", "error"];

#[derive(Debug, Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    user: Identity,
}

/// Signup answers with a full session when confirmation is disabled, or with
/// the bare user record when a confirmation mail was sent.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SignUpResponse {
    Session(TokenResponse),
    User(Identity),
}

impl SignUpResponse {
    fn into_identity(self) -> Identity {
        match self {
            SignUpResponse::Session(session) => session.user,
            SignUpResponse::User(user) => user,
        }
    }
}

/// Hosted auth provider client.
pub struct HostedAuthClient {
    client: Client,
    config: AuthConfig,
    access_token: Mutex<Option<String>>,
}

impl HostedAuthClient {
    /// Create a new client for the configured project
    pub fn new(config: AuthConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            config,
            access_token: Mutex::new(None),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}/{}", self.config.url, AUTH_PATH, path)
    }

    fn token(&self) -> Option<String> {
        self.access_token
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn set_token(&self, token: Option<String>) {
        *self
            .access_token
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = token;
    }

    fn take_token(&self) -> Option<String> {
        self.access_token
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take()
    }

    async fn post_credentials(
        &self,
        path: &str,
        email: &str,
        password: &str,
    ) -> Result<Response, AuthError> {
        let response = self
            .client
            .post(self.endpoint(path))
            .header(API_KEY_HEADER, &self.config.anon_key)
            .header(header::ACCEPT, "application/json")
            .json(&Credentials { email, password })
            .send()
            .await
            .map_err(ApiError::from)?;

        Self::check_response(response).await
    }

    /// Turn a non-success response into a rejection or a fault
    async fn check_response(response: Response) -> Result<Response, AuthError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(Self::classify_failure(status, &body))
    }

    fn classify_failure(status: StatusCode, body: &str) -> AuthError {
        if status.is_client_error() {
            if let Some(description) = Self::rejection_message(body) {
                return AuthError::Rejected(description);
            }
        }
        warn!(status = %status, "Auth provider returned an unreadable failure");
        AuthError::Unexpected(ApiError::from_status(status, body))
    }

    /// Extract the provider's human-readable failure description, if any
    fn rejection_message(body: &str) -> Option<String> {
        let value: serde_json::Value = serde_json::from_str(body).ok()?;
        REJECTION_FIELDS.iter().find_map(|field| {
            value
                .get(field)
                .and_then(|v| v.as_str())
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        })
    }

    async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T, AuthError> {
        let text = response.text().await.map_err(ApiError::from)?;
        serde_json::from_str(&text)
            .map_err(|e| AuthError::Unexpected(ApiError::InvalidResponse(e.to_string())))
    }
}

#[async_trait]
impl AuthProvider for HostedAuthClient {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        debug!("Requesting password grant");
        let response = self
            .post_credentials("token?grant_type=password", email, password)
            .await?;
        let token: TokenResponse = Self::parse_json(response).await?;
        self.set_token(Some(token.access_token));
        Ok(token.user)
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        debug!("Requesting signup");
        let response = self.post_credentials("signup", email, password).await?;
        let signup: SignUpResponse = Self::parse_json(response).await?;
        Ok(signup.into_identity())
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        let Some(token) = self.take_token() else {
            return Ok(());
        };

        let response = self
            .client
            .post(self.endpoint("logout"))
            .header(API_KEY_HEADER, &self.config.anon_key)
            .bearer_auth(token)
            .send()
            .await
            .map_err(ApiError::from)?;

        Self::check_response(response).await?;
        Ok(())
    }

    async fn current_user(&self) -> Result<Option<Identity>, AuthError> {
        let Some(token) = self.token() else {
            return Ok(None);
        };

        let response = self
            .client
            .get(self.endpoint("user"))
            .header(API_KEY_HEADER, &self.config.anon_key)
            .bearer_auth(token)
            .send()
            .await
            .map_err(ApiError::from)?;

        // An expired token means there is simply no current user
        if response.status() == StatusCode::UNAUTHORIZED {
            self.set_token(None);
            return Ok(None);
        }

        let response = Self::check_response(response).await?;
        Ok(Some(Self::parse_json(response).await?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> HostedAuthClient {
        let config = AuthConfig::new("https://project.supabase.co/", "anon").unwrap();
        HostedAuthClient::new(config).unwrap()
    }

    // -------------------------------------------------------------------------
    // Endpoint Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_endpoint_building() {
        let client = client();
        assert_eq!(
            client.endpoint("token?grant_type=password"),
            "https://project.supabase.co/auth/v1/token?grant_type=password"
        );
        assert_eq!(client.endpoint("logout"), "https://project.supabase.co/auth/v1/logout");
    }

    // -------------------------------------------------------------------------
    // Failure Classification Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_rejection_message_legacy_shape() {
        let body = r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#;
        assert_eq!(
            HostedAuthClient::rejection_message(body),
            Some("Invalid login credentials".to_string())
        );
    }

    #[test]
    fn test_rejection_message_msg_shape() {
        let body = r#"{"code":400,"error_code":"invalid_credentials","msg":"Invalid login credentials"}"#;
        assert_eq!(
            HostedAuthClient::rejection_message(body),
            Some("Invalid login credentials".to_string())
        );
    }

    #[test]
    fn test_rejection_message_skips_blank_fields() {
        let body = r#"{"error_description":"  ","error":"User already registered"}"#;
        assert_eq!(
            HostedAuthClient::rejection_message(body),
            Some("User already registered".to_string())
        );
    }

    #[test]
    fn test_rejection_message_unreadable() {
        assert_eq!(HostedAuthClient::rejection_message("<html>oops</html>"), None);
        assert_eq!(HostedAuthClient::rejection_message(r#"{"code":400}"#), None);
    }

    #[test]
    fn test_classify_client_error_is_rejection() {
        let err = HostedAuthClient::classify_failure(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"msg":"Password should be at least 6 characters"}"#,
        );
        assert!(matches!(err, AuthError::Rejected(ref m) if m == "Password should be at least 6 characters"));
    }

    #[test]
    fn test_classify_server_error_is_unexpected() {
        let err = HostedAuthClient::classify_failure(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"msg":"database is down"}"#,
        );
        assert!(matches!(err, AuthError::Unexpected(ApiError::ServerError(_))));
    }

    #[test]
    fn test_classify_unreadable_client_error_is_unexpected() {
        let err = HostedAuthClient::classify_failure(StatusCode::BAD_REQUEST, "not json");
        assert!(matches!(
            err,
            AuthError::Unexpected(ApiError::ClientError { status: 400, .. })
        ));
    }

    // -------------------------------------------------------------------------
    // Response Parsing Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_signup_response_bare_user() {
        let json = r#"{"id":"u1","email":"a@b.com","confirmation_sent_at":"2025-03-01T12:00:00Z"}"#;
        let parsed: SignUpResponse = serde_json::from_str(json).unwrap();
        assert!(matches!(parsed, SignUpResponse::User(_)));
        assert_eq!(parsed.into_identity().email, "a@b.com");
    }

    #[test]
    fn test_signup_response_session() {
        let json = r#"{
            "access_token": "jwt",
            "token_type": "bearer",
            "expires_in": 3600,
            "refresh_token": "r",
            "user": {"id": "u1", "email": "a@b.com"}
        }"#;
        let parsed: SignUpResponse = serde_json::from_str(json).unwrap();
        assert!(matches!(parsed, SignUpResponse::Session(_)));
        assert_eq!(parsed.into_identity().id, "u1");
    }

    // -------------------------------------------------------------------------
    // Tokenless Behaviour Tests
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_current_user_without_token_is_none() {
        let client = client();
        assert_eq!(client.current_user().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_sign_out_without_token_is_ok() {
        let client = client();
        assert!(client.sign_out().await.is_ok());
        assert_eq!(client.token(), None);
    }

    // -------------------------------------------------------------------------
    // Network Tests (in-process GoTrue stand-in)
    // -------------------------------------------------------------------------

    use crate::api::test_server::{MockGoTrue, Reply};

    const SESSION_JSON: &str =
        r#"{"access_token":"jwt-1","token_type":"bearer","user":{"id":"1","email":"a@b.com"}}"#;
    const USER_JSON: &str = r#"{"id":"1","email":"a@b.com"}"#;

    fn client_for(server: &MockGoTrue) -> HostedAuthClient {
        HostedAuthClient::new(AuthConfig::new(server.url(), "anon").unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_sign_in_stores_token_and_sends_apikey() {
        let server = MockGoTrue::start(|_| Reply::json(200, SESSION_JSON)).await;
        let client = client_for(&server);

        let identity = client.sign_in("a@b.com", "pw123").await.unwrap();
        assert_eq!(identity, Identity::new("1", "a@b.com"));
        assert_eq!(client.token(), Some("jwt-1".to_string()));

        let requests = server.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "POST");
        assert_eq!(requests[0].path, "/auth/v1/token?grant_type=password");
        assert_eq!(requests[0].header("apikey"), Some("anon"));
        assert_eq!(requests[0].json()["email"], "a@b.com");
        assert_eq!(requests[0].json()["password"], "pw123");
    }

    #[tokio::test]
    async fn test_sign_in_rejection_keeps_no_token() {
        let server = MockGoTrue::start(|_| {
            Reply::json(400, r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#)
        })
        .await;
        let client = client_for(&server);

        let err = client.sign_in("a@b.com", "wrong").await.unwrap_err();
        assert!(matches!(err, AuthError::Rejected(ref m) if m == "Invalid login credentials"));
        assert_eq!(client.token(), None);
    }

    #[tokio::test]
    async fn test_sign_up_never_stores_token() {
        let server = MockGoTrue::start(|_| Reply::json(200, SESSION_JSON)).await;
        let client = client_for(&server);

        let identity = client.sign_up("a@b.com", "pw123").await.unwrap();
        assert_eq!(identity.id, "1");
        assert_eq!(client.token(), None);

        let requests = server.requests_to("/auth/v1/signup");
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].header("apikey"), Some("anon"));
    }

    #[tokio::test]
    async fn test_sign_out_sends_bearer_and_clears_token() {
        let server = MockGoTrue::start(|request| {
            if request.path == "/auth/v1/logout" {
                Reply::empty(204)
            } else {
                Reply::json(200, SESSION_JSON)
            }
        })
        .await;
        let client = client_for(&server);

        client.sign_in("a@b.com", "pw123").await.unwrap();
        client.sign_out().await.unwrap();
        assert_eq!(client.token(), None);

        let logouts = server.requests_to("/auth/v1/logout");
        assert_eq!(logouts.len(), 1);
        assert_eq!(logouts[0].method, "POST");
        assert_eq!(logouts[0].header("authorization"), Some("Bearer jwt-1"));
        assert_eq!(logouts[0].header("apikey"), Some("anon"));
    }

    #[tokio::test]
    async fn test_current_user_with_token() {
        let server = MockGoTrue::start(|request| {
            if request.path == "/auth/v1/user" {
                Reply::json(200, USER_JSON)
            } else {
                Reply::json(200, SESSION_JSON)
            }
        })
        .await;
        let client = client_for(&server);

        client.sign_in("a@b.com", "pw123").await.unwrap();
        let user = client.current_user().await.unwrap();
        assert_eq!(user, Some(Identity::new("1", "a@b.com")));

        let lookups = server.requests_to("/auth/v1/user");
        assert_eq!(lookups.len(), 1);
        assert_eq!(lookups[0].method, "GET");
        assert_eq!(lookups[0].header("authorization"), Some("Bearer jwt-1"));
        assert_eq!(lookups[0].header("apikey"), Some("anon"));
    }

    #[tokio::test]
    async fn test_current_user_unauthorized_drops_token() {
        let server = MockGoTrue::start(|request| {
            if request.path == "/auth/v1/user" {
                Reply::json(401, r#"{"msg":"JWT expired"}"#)
            } else {
                Reply::json(200, SESSION_JSON)
            }
        })
        .await;
        let client = client_for(&server);

        client.sign_in("a@b.com", "pw123").await.unwrap();
        assert_eq!(client.current_user().await.unwrap(), None);
        assert_eq!(client.token(), None);

        // No token left, so the next lookup stays local
        assert_eq!(client.current_user().await.unwrap(), None);
        assert_eq!(server.requests_to("/auth/v1/user").len(), 1);
    }

    #[tokio::test]
    async fn test_server_error_is_unexpected() {
        let server = MockGoTrue::start(|_| Reply::json(503, r#"{"msg":"upstream down"}"#)).await;
        let client = client_for(&server);

        let err = client.sign_in("a@b.com", "pw123").await.unwrap_err();
        assert!(matches!(err, AuthError::Unexpected(ApiError::ServerError(_))));
    }

    #[tokio::test]
    async fn test_malformed_success_body_is_unexpected() {
        let server = MockGoTrue::start(|_| Reply::json(200, "not json")).await;
        let client = client_for(&server);

        let err = client.sign_in("a@b.com", "pw123").await.unwrap_err();
        assert!(matches!(err, AuthError::Unexpected(ApiError::InvalidResponse(_))));
        assert_eq!(client.token(), None);
    }
}
