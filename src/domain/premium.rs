use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::domain::errors::ApiError;

// Role and subscription window for the signed-in user.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RoleInfo {
    #[serde(default)]
    pub email: Option<String>,
    pub role: String,
    #[serde(default)]
    pub subscription_start: Option<String>,
    #[serde(default)]
    pub subscription_end: Option<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub limits: Value,
    #[serde(default)]
    pub is_premium: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Pricing {
    #[serde(default)]
    pub plans: Vec<Plan>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Plan {
    pub name: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub period: Option<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub limits: Value,
}

// Payment is always the backend's demo method.
#[derive(Debug, Clone, Serialize)]
pub struct UpgradeRequest {
    pub duration_days: u32,
    pub payment_method: String,
}

impl UpgradeRequest {
    pub fn demo(duration_days: u32) -> Self {
        Self {
            duration_days,
            payment_method: "demo".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpgradeOutcome {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub subscription_end: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub analysis: Value,
    #[serde(default)]
    pub can_analyze: bool,
}

#[async_trait]
pub trait PremiumApi: Send + Sync {
    async fn role(&self, cancel: &CancellationToken) -> Result<RoleInfo, ApiError>;

    async fn stats(&self, cancel: &CancellationToken) -> Result<Value, ApiError>;

    async fn features(&self, cancel: &CancellationToken) -> Result<Value, ApiError>;

    async fn usage(&self, cancel: &CancellationToken) -> Result<Usage, ApiError>;

    async fn pricing(&self, cancel: &CancellationToken) -> Result<Pricing, ApiError>;

    async fn upgrade(
        &self,
        req: UpgradeRequest,
        cancel: &CancellationToken,
    ) -> Result<UpgradeOutcome, ApiError>;

    async fn downgrade(&self, cancel: &CancellationToken) -> Result<UpgradeOutcome, ApiError>;
}
