// Scripted backend for integration tests: canned replies per route, every request recorded.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};

use beauty_client::domain::StoredSession;
use beauty_client::interface_adapters::http::ApiClient;
use beauty_client::interface_adapters::state::AppState;
use beauty_client::interface_adapters::storage::MemoryTokenStorage;
use beauty_client::use_cases::SessionStore;

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl Recorded {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("request body should be json")
    }
}

#[derive(Debug, Clone)]
enum Body {
    Json(Value),
    Text(String),
}

#[derive(Debug, Clone)]
struct Canned {
    status: StatusCode,
    body: Body,
    delay: Duration,
}

#[derive(Default)]
struct Shared {
    routes: HashMap<(Method, String), Canned>,
    log: Mutex<Vec<Recorded>>,
}

#[derive(Default)]
pub struct MockBackend {
    routes: HashMap<(Method, String), Canned>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(mut self, method: Method, path: &str, status: u16, body: Value) -> Self {
        self.insert(method, path, status, Body::Json(body));
        self
    }

    pub fn on_text(mut self, method: Method, path: &str, status: u16, body: &str) -> Self {
        self.insert(method, path, status, Body::Text(body.to_string()));
        self
    }

    // Hold the reply for the given route.
    pub fn slow(mut self, method: Method, path: &str, delay: Duration) -> Self {
        if let Some(canned) = self.routes.get_mut(&(method, path.to_string())) {
            canned.delay = delay;
        }
        self
    }

    fn insert(&mut self, method: Method, path: &str, status: u16, body: Body) {
        let status = StatusCode::from_u16(status).expect("valid status code");
        self.routes.insert(
            (method, path.to_string()),
            Canned {
                status,
                body,
                delay: Duration::ZERO,
            },
        );
    }

    // Bind an ephemeral port and serve on the current test runtime.
    pub async fn start(self) -> RunningBackend {
        let shared = Arc::new(Shared {
            routes: self.routes,
            log: Mutex::new(Vec::new()),
        });
        let app = Router::new()
            .fallback(handle)
            .with_state(shared.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind ephemeral test port");
        let addr = listener.local_addr().expect("get local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock backend failed");
        });

        RunningBackend {
            base_url: format!("http://{addr}"),
            shared,
        }
    }
}

pub struct RunningBackend {
    pub base_url: String,
    shared: Arc<Shared>,
}

impl RunningBackend {
    pub fn requests(&self) -> Vec<Recorded> {
        self.shared
            .log
            .lock()
            .expect("request log lock")
            .clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|req| req.path == path)
            .collect()
    }

    // Client wired to an in-memory session, optionally already logged in.
    pub fn client(&self, token: Option<&str>) -> (ApiClient, Arc<MemoryTokenStorage>) {
        let storage = Arc::new(match token {
            Some(token) => MemoryTokenStorage::with_session(StoredSession {
                token: Some(token.to_string()),
                email: Some("ana@example.com".to_string()),
            }),
            None => MemoryTokenStorage::new(),
        });
        let session = Arc::new(SessionStore::init(storage.clone()).expect("session init"));
        let api = ApiClient::new(self.base_url.as_str(), None, session).expect("api client");
        (api, storage)
    }

    pub fn state(&self, token: Option<&str>) -> (AppState, Arc<MemoryTokenStorage>) {
        let (api, storage) = self.client(token);
        (AppState::from_client(api), storage)
    }
}

async fn handle(
    State(shared): State<Arc<Shared>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let header_value = |name| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    };
    let path = uri.path().to_string();
    shared
        .log
        .lock()
        .expect("request log lock")
        .push(Recorded {
            method: method.clone(),
            path: path.clone(),
            authorization: header_value(header::AUTHORIZATION),
            content_type: header_value(header::CONTENT_TYPE),
            body,
        });

    let Some(canned) = shared.routes.get(&(method, path)).cloned() else {
        return (StatusCode::NOT_FOUND, axum::Json(json!({"detail": "Not Found"}))).into_response();
    };
    if !canned.delay.is_zero() {
        tokio::time::sleep(canned.delay).await;
    }
    match canned.body {
        Body::Json(value) => (canned.status, axum::Json(value)).into_response(),
        Body::Text(text) => (canned.status, text).into_response(),
    }
}
