use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::domain::{ApiError, ChatApi, ChatReply, ChatRequest};
use crate::interface_adapters::http::ApiClient;
use crate::interface_adapters::protocol::paths;

#[derive(Clone)]
pub struct ChatClient {
    api: ApiClient,
}

impl ChatClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ChatApi for ChatClient {
    async fn send(
        &self,
        req: ChatRequest,
        cancel: &CancellationToken,
    ) -> Result<ChatReply, ApiError> {
        self.api.post(paths::CHAT, &req, cancel).await
    }
}
