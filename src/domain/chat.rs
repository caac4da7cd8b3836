use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::domain::errors::ApiError;

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatReply {
    pub reply: String,
}

#[async_trait]
pub trait ChatApi: Send + Sync {
    async fn send(&self, req: ChatRequest, cancel: &CancellationToken)
    -> Result<ChatReply, ApiError>;
}
