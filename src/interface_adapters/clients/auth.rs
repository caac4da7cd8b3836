use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::domain::{ApiError, AuthApi, Credentials, LoginResponse, SignupResponse};
use crate::interface_adapters::http::ApiClient;
use crate::interface_adapters::protocol::paths;

// Thin wrapper around the shared client for signup/login.
#[derive(Clone)]
pub struct AuthClient {
    api: ApiClient,
}

impl AuthClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl AuthApi for AuthClient {
    async fn signup(
        &self,
        req: Credentials,
        cancel: &CancellationToken,
    ) -> Result<SignupResponse, ApiError> {
        self.api.post(paths::SIGNUP, &req, cancel).await
    }

    async fn login(
        &self,
        req: Credentials,
        cancel: &CancellationToken,
    ) -> Result<LoginResponse, ApiError> {
        self.api.post(paths::LOGIN, &req, cancel).await
    }
}
