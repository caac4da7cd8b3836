use async_trait::async_trait;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::domain::{ApiError, PremiumApi, Pricing, RoleInfo, UpgradeOutcome, UpgradeRequest, Usage};
use crate::interface_adapters::http::ApiClient;
use crate::interface_adapters::protocol::paths;

#[derive(Clone)]
pub struct PremiumClient {
    api: ApiClient,
}

impl PremiumClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl PremiumApi for PremiumClient {
    async fn role(&self, cancel: &CancellationToken) -> Result<RoleInfo, ApiError> {
        self.api.get(paths::USER_ROLE, cancel).await
    }

    async fn stats(&self, cancel: &CancellationToken) -> Result<Value, ApiError> {
        self.api.get(paths::USER_STATS, cancel).await
    }

    async fn features(&self, cancel: &CancellationToken) -> Result<Value, ApiError> {
        self.api.get(paths::USER_FEATURES, cancel).await
    }

    async fn usage(&self, cancel: &CancellationToken) -> Result<Usage, ApiError> {
        self.api.get(paths::USER_USAGE, cancel).await
    }

    async fn pricing(&self, cancel: &CancellationToken) -> Result<Pricing, ApiError> {
        self.api.get(paths::USER_PRICING, cancel).await
    }

    async fn upgrade(
        &self,
        req: UpgradeRequest,
        cancel: &CancellationToken,
    ) -> Result<UpgradeOutcome, ApiError> {
        self.api.post(paths::USER_UPGRADE, &req, cancel).await
    }

    async fn downgrade(&self, cancel: &CancellationToken) -> Result<UpgradeOutcome, ApiError> {
        self.api.post_empty(paths::USER_DOWNGRADE, cancel).await
    }
}
