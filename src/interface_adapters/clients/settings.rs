use async_trait::async_trait;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::domain::{ApiError, Settings, SettingsApi, SettingsPatch};
use crate::interface_adapters::http::ApiClient;
use crate::interface_adapters::protocol::paths;

#[derive(Clone)]
pub struct SettingsClient {
    api: ApiClient,
}

impl SettingsClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl SettingsApi for SettingsClient {
    async fn get(&self, cancel: &CancellationToken) -> Result<Settings, ApiError> {
        self.api.get(paths::SETTINGS, cancel).await
    }

    async fn save(
        &self,
        settings: &Settings,
        cancel: &CancellationToken,
    ) -> Result<Settings, ApiError> {
        self.api.post(paths::SETTINGS, settings, cancel).await
    }

    async fn update(
        &self,
        patch: &SettingsPatch,
        cancel: &CancellationToken,
    ) -> Result<Settings, ApiError> {
        self.api.patch(paths::SETTINGS, patch, cancel).await
    }

    async fn reset(&self, cancel: &CancellationToken) -> Result<Value, ApiError> {
        self.api.delete(paths::SETTINGS, cancel).await
    }

    async fn export(&self, cancel: &CancellationToken) -> Result<Value, ApiError> {
        self.api.get(paths::SETTINGS_EXPORT, cancel).await
    }
}
