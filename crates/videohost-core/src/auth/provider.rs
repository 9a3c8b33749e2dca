use async_trait::async_trait;
use thiserror::Error;

use crate::api::ApiError;

use super::Identity;

/// Failure from an auth capability call.
#[derive(Error, Debug)]
pub enum AuthError {
    /// The provider explicitly refused the request with a readable reason
    #[error("{0}")]
    Rejected(String),

    /// Anything else: transport loss, server failure, malformed payload
    #[error("Unexpected auth failure: {0}")]
    Unexpected(#[from] ApiError),
}

/// The hosted identity service, seen as a capability.
///
/// `sign_up` returns the created identity, which is not yet authenticated
/// when the provider requires email confirmation.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, AuthError>;

    async fn sign_up(&self, email: &str, password: &str) -> Result<Identity, AuthError>;

    async fn sign_out(&self) -> Result<(), AuthError>;

    /// The currently authenticated identity, if any
    async fn current_user(&self) -> Result<Option<Identity>, AuthError>;
}
