use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::domain::ApiError;
use crate::use_cases::SessionStore;

// Shared request client for every backend call: base URL, bearer header, error mapping.
// No retry and no caching; each call is one request/response pair.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    session: Arc<SessionStore>,
}

impl ApiClient {
    pub fn new(
        base_url: impl Into<String>,
        timeout: Option<Duration>,
        session: Arc<SessionStore>,
    ) -> Result<Self, ApiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(transport_error)?;
        let base_url: String = base_url.into();
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    // Compose the URL and attach the bearer token when one is present.
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let builder = self.http.request(method, url);
        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        cancel: &CancellationToken,
    ) -> Result<T, ApiError> {
        self.send_json(self.request(Method::GET, path), path, cancel)
            .await
    }

    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        cancel: &CancellationToken,
    ) -> Result<T, ApiError> {
        self.send_json(self.request(Method::POST, path).json(body), path, cancel)
            .await
    }

    pub async fn post_empty<T: DeserializeOwned>(
        &self,
        path: &str,
        cancel: &CancellationToken,
    ) -> Result<T, ApiError> {
        self.send_json(self.request(Method::POST, path), path, cancel)
            .await
    }

    pub async fn patch<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        cancel: &CancellationToken,
    ) -> Result<T, ApiError> {
        self.send_json(self.request(Method::PATCH, path).json(body), path, cancel)
            .await
    }

    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        cancel: &CancellationToken,
    ) -> Result<T, ApiError> {
        self.send_json(self.request(Method::DELETE, path), path, cancel)
            .await
    }

    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
        cancel: &CancellationToken,
    ) -> Result<T, ApiError> {
        self.send_json(self.request(Method::POST, path).multipart(form), path, cancel)
            .await
    }

    // Send, then decode a 2xx body into T. A cancelled token wins over the response.
    pub async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        path: &str,
        cancel: &CancellationToken,
    ) -> Result<T, ApiError> {
        if cancel.is_cancelled() {
            tracing::debug!(path, "request skipped, view already gone");
            return Err(ApiError::Cancelled);
        }

        tracing::debug!(
            path,
            authenticated = self.session.is_authenticated(),
            "sending request"
        );

        let exchange = async {
            let res = builder.send().await.map_err(transport_error)?;
            let res = ensure_success(res).await?;
            res.json::<T>()
                .await
                .map_err(|err| ApiError::Decode(err.to_string()))
        };

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(ApiError::Cancelled),
            result = exchange => result,
        };

        if let Err(err) = &result {
            tracing::warn!(path, error = %err, "request failed");
        }
        result
    }
}

// Keep upstream status/detail so views can tell 401 apart from other failures.
async fn ensure_success(res: Response) -> Result<Response, ApiError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    let detail = res
        .json::<Value>()
        .await
        .ok()
        .and_then(|body| error_detail(&body));
    Err(ApiError::Status {
        status: status.as_u16(),
        detail,
    })
}

// Pull a readable reason out of the backend's error envelope:
// `{detail: "..."}`, `{detail: [{msg: "..."}, ...]}`, `{error: "..."}` or `{message: "..."}`.
pub fn error_detail(body: &Value) -> Option<String> {
    match body.get("detail") {
        Some(Value::String(detail)) => return Some(detail.clone()),
        Some(Value::Array(items)) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            if !messages.is_empty() {
                return Some(messages.join("; "));
            }
        }
        _ => {}
    }
    ["error", "message"]
        .into_iter()
        .find_map(|key| body.get(key).and_then(Value::as_str))
        .map(str::to_string)
}

fn transport_error(err: reqwest::Error) -> ApiError {
    ApiError::Transport {
        message: err.to_string(),
        timeout: err.is_timeout(),
    }
}
