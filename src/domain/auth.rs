use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::domain::errors::ApiError;

// Payload sent to the backend for signup and login.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

// Signup only reports a message; the view discards it and redirects to login.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignupResponse {
    #[serde(default)]
    pub message: Option<String>,
}

// Token issued by the backend on successful login.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
}

// Views depend on this trait, not the concrete client implementation.
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn signup(
        &self,
        req: Credentials,
        cancel: &CancellationToken,
    ) -> Result<SignupResponse, ApiError>;

    async fn login(
        &self,
        req: Credentials,
        cancel: &CancellationToken,
    ) -> Result<LoginResponse, ApiError>;
}
