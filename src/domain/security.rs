use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::domain::errors::ApiError;

#[derive(Debug, Clone, Serialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResetPasswordRequest {
    pub token: String,
    pub new_password: String,
    pub confirm_password: String,
}

// Generic acknowledgement returned by most security endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Acknowledgement {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(flatten)]
    pub rest: serde_json::Map<String, Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TwoFactorCode {
    pub code: String,
}

// Material shown to the user while setting up 2FA.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TwoFactorSetup {
    pub qr_code: String,
    pub secret: String,
    #[serde(default)]
    pub backup_codes: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TwoFactorStatus {
    pub enabled: bool,
    #[serde(default)]
    pub activated_at: Option<String>,
    #[serde(default)]
    pub backup_codes_remaining: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BackupCodes {
    #[serde(default)]
    pub backup_codes: Vec<String>,
    #[serde(default)]
    pub message: Option<String>,
}

// Password change and two-factor endpoints.
#[async_trait]
pub trait SecurityApi: Send + Sync {
    async fn change_password(
        &self,
        req: ChangePasswordRequest,
        cancel: &CancellationToken,
    ) -> Result<Acknowledgement, ApiError>;

    // Strength report is opaque to the client.
    async fn password_strength(
        &self,
        password: &str,
        cancel: &CancellationToken,
    ) -> Result<Value, ApiError>;

    async fn forgot_password(
        &self,
        email: &str,
        cancel: &CancellationToken,
    ) -> Result<Acknowledgement, ApiError>;

    async fn reset_password(
        &self,
        req: ResetPasswordRequest,
        cancel: &CancellationToken,
    ) -> Result<Acknowledgement, ApiError>;

    async fn enable_two_factor(
        &self,
        cancel: &CancellationToken,
    ) -> Result<TwoFactorSetup, ApiError>;

    async fn verify_two_factor(
        &self,
        code: TwoFactorCode,
        cancel: &CancellationToken,
    ) -> Result<Acknowledgement, ApiError>;

    async fn disable_two_factor(
        &self,
        code: TwoFactorCode,
        cancel: &CancellationToken,
    ) -> Result<Acknowledgement, ApiError>;

    async fn two_factor_status(
        &self,
        cancel: &CancellationToken,
    ) -> Result<TwoFactorStatus, ApiError>;

    async fn regenerate_backup_codes(
        &self,
        code: TwoFactorCode,
        cancel: &CancellationToken,
    ) -> Result<BackupCodes, ApiError>;
}
