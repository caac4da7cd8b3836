use async_trait::async_trait;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::domain::{
    Acknowledgement, ApiError, BackupCodes, ChangePasswordRequest, ResetPasswordRequest,
    SecurityApi, TwoFactorCode, TwoFactorSetup, TwoFactorStatus,
};
use crate::interface_adapters::http::ApiClient;
use crate::interface_adapters::protocol::{ForgotPasswordRequest, paths};

#[derive(Clone)]
pub struct SecurityClient {
    api: ApiClient,
}

impl SecurityClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

// The password travels as a single path segment, so it must be percent-encoded.
fn strength_path(password: &str) -> Result<String, ApiError> {
    let mut url = Url::parse("http://placeholder")
        .map_err(|err| ApiError::Validation(err.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| ApiError::Validation("cannot encode password".to_string()))?
        .pop_if_empty()
        .extend(paths::PASSWORD_STRENGTH.trim_start_matches('/').split('/'))
        .push(password);
    Ok(url.path().to_string())
}

#[async_trait]
impl SecurityApi for SecurityClient {
    async fn change_password(
        &self,
        req: ChangePasswordRequest,
        cancel: &CancellationToken,
    ) -> Result<Acknowledgement, ApiError> {
        self.api.post(paths::CHANGE_PASSWORD, &req, cancel).await
    }

    async fn password_strength(
        &self,
        password: &str,
        cancel: &CancellationToken,
    ) -> Result<Value, ApiError> {
        let path = strength_path(password)?;
        self.api.get(&path, cancel).await
    }

    async fn forgot_password(
        &self,
        email: &str,
        cancel: &CancellationToken,
    ) -> Result<Acknowledgement, ApiError> {
        self.api
            .post(paths::FORGOT_PASSWORD, &ForgotPasswordRequest { email }, cancel)
            .await
    }

    async fn reset_password(
        &self,
        req: ResetPasswordRequest,
        cancel: &CancellationToken,
    ) -> Result<Acknowledgement, ApiError> {
        self.api.post(paths::RESET_PASSWORD, &req, cancel).await
    }

    async fn enable_two_factor(
        &self,
        cancel: &CancellationToken,
    ) -> Result<TwoFactorSetup, ApiError> {
        self.api.post_empty(paths::TWO_FACTOR_ENABLE, cancel).await
    }

    async fn verify_two_factor(
        &self,
        code: TwoFactorCode,
        cancel: &CancellationToken,
    ) -> Result<Acknowledgement, ApiError> {
        self.api.post(paths::TWO_FACTOR_VERIFY, &code, cancel).await
    }

    async fn disable_two_factor(
        &self,
        code: TwoFactorCode,
        cancel: &CancellationToken,
    ) -> Result<Acknowledgement, ApiError> {
        self.api.post(paths::TWO_FACTOR_DISABLE, &code, cancel).await
    }

    async fn two_factor_status(
        &self,
        cancel: &CancellationToken,
    ) -> Result<TwoFactorStatus, ApiError> {
        self.api.get(paths::TWO_FACTOR_STATUS, cancel).await
    }

    async fn regenerate_backup_codes(
        &self,
        code: TwoFactorCode,
        cancel: &CancellationToken,
    ) -> Result<BackupCodes, ApiError> {
        self.api
            .post(paths::TWO_FACTOR_REGENERATE, &code, cancel)
            .await
    }
}
