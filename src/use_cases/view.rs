use std::future::Future;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::domain::ApiError;
use crate::use_cases::error_message::{
    Access, CANCELLED_TEXT, ErrorCategory, UserMessage, classify,
};
use crate::use_cases::{Navigator, SessionStore};

// Local state every screen keeps: loading flag, last error, last data.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState<T> {
    pub loading: bool,
    pub error: Option<UserMessage>,
    pub data: Option<T>,
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        Self {
            loading: false,
            error: None,
            data: None,
        }
    }
}

impl<T> ViewState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn succeed(&mut self, data: T) {
        self.loading = false;
        self.error = None;
        self.data = Some(data);
    }

    pub fn fail(&mut self, message: UserMessage) {
        self.loading = false;
        self.data = None;
        self.error = Some(message);
    }

    // Failed action on an already loaded screen; what is shown stays.
    pub fn set_error(&mut self, message: UserMessage) {
        self.loading = false;
        self.error = Some(message);
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn is_loaded(&self) -> bool {
        !self.loading && self.data.is_some()
    }
}

// Lifetime of one mounted screen; dropping it aborts whatever it started.
#[derive(Debug, Default)]
pub struct ViewScope {
    token: CancellationToken,
}

impl ViewScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    pub fn unmount(&self) {
        self.token.cancel();
    }

    pub fn is_unmounted(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl Drop for ViewScope {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

// What every view needs besides its own port: the session and the navigator.
#[derive(Clone)]
pub struct ViewContext {
    session: Arc<SessionStore>,
    navigator: Arc<Navigator>,
}

impl ViewContext {
    pub fn new(session: Arc<SessionStore>, navigator: Arc<Navigator>) -> Self {
        Self { session, navigator }
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub fn navigator(&self) -> &Arc<Navigator> {
        &self.navigator
    }

    // Classify a failure; a 401 from a protected endpoint also ends the session.
    pub fn report(&self, err: &ApiError, access: Access) -> UserMessage {
        let message = classify(err, access);
        if access == Access::Protected && err.is_unauthorized() {
            self.expire_session();
        }
        message
    }

    pub fn expire_session(&self) {
        if let Err(err) = self.session.logout() {
            tracing::warn!(error = %err, "failed to clear stored session");
        }
        self.navigator.force_login();
    }

    // Await one fetch and classify its failure. Results that arrive after unmount
    // are dropped and reported as cancelled.
    pub async fn call<T, F>(&self, scope: &ViewScope, access: Access, fetch: F) -> Result<T, UserMessage>
    where
        F: Future<Output = Result<T, ApiError>>,
    {
        let result = fetch.await;
        if scope.is_unmounted() {
            tracing::debug!("view unmounted, dropping result");
            return Err(UserMessage::new(ErrorCategory::Cancelled, CANCELLED_TEXT));
        }
        result.map_err(|err| self.report(&err, access))
    }

    // loading -> fetch -> data or message. Returns true when data was stored.
    pub async fn run<T, F>(
        &self,
        scope: &ViewScope,
        state: &mut ViewState<T>,
        access: Access,
        fetch: F,
    ) -> bool
    where
        F: Future<Output = Result<T, ApiError>>,
    {
        state.begin();
        match self.call(scope, access, fetch).await {
            Ok(data) => {
                state.succeed(data);
                true
            }
            Err(message) if scope.is_unmounted() => {
                tracing::debug!(%message, "state update skipped after unmount");
                false
            }
            Err(message) => {
                state.fail(message);
                false
            }
        }
    }
}
