use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::domain::{
    AnalysisApi, AnalysisResult, ApiError, HistoryEntry, HistoryPayload, ImageUpload,
    parse_analysis_response,
};
use crate::interface_adapters::http::ApiClient;
use crate::interface_adapters::protocol::{IMAGE_FIELD, paths};

#[derive(Clone)]
pub struct AnalysisClient {
    api: ApiClient,
}

impl AnalysisClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl AnalysisApi for AnalysisClient {
    async fn analyze(
        &self,
        image: ImageUpload,
        cancel: &CancellationToken,
    ) -> Result<AnalysisResult, ApiError> {
        let part = Part::bytes(image.bytes)
            .file_name(image.file_name)
            .mime_str(&image.content_type)
            .map_err(|err| ApiError::Validation(format!("unsupported image type: {err}")))?;
        let form = Form::new().part(IMAGE_FIELD, part);

        // The body shape varies, so decode loosely and unwrap in the domain.
        let body: Value = self.api.post_multipart(paths::ANALYZE, form, cancel).await?;
        parse_analysis_response(body)
    }

    async fn history(&self, cancel: &CancellationToken) -> Result<Vec<HistoryEntry>, ApiError> {
        let payload: HistoryPayload = self.api.get(paths::HISTORY, cancel).await?;
        Ok(payload.into_entries())
    }
}
