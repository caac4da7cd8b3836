use std::sync::Arc;

use crate::domain::{AuthApi, Credentials, Route};
use crate::use_cases::error_message::{Access, ErrorCategory, UserMessage};
use crate::use_cases::view::{ViewContext, ViewScope, ViewState};

pub const PASSWORD_MISMATCH_TEXT: &str = "Passwords do not match";
pub const REQUIRED_FIELDS_TEXT: &str = "Email and password are required";
pub const SIGNUP_SUCCESS_TEXT: &str = "Signup successful! Please login.";

#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

// Local form checks; nothing here is enforced by the backend contract.
fn validate_signup(form: &SignupForm) -> Result<Credentials, UserMessage> {
    let email = form.email.trim();
    if email.is_empty() || form.password.is_empty() {
        return Err(UserMessage::validation(REQUIRED_FIELDS_TEXT));
    }
    if form.password != form.confirm_password {
        return Err(UserMessage::validation(PASSWORD_MISMATCH_TEXT));
    }
    Ok(Credentials {
        email: email.to_string(),
        password: form.password.clone(),
    })
}

pub struct SignupView {
    ctx: ViewContext,
    scope: ViewScope,
    auth: Arc<dyn AuthApi>,
    state: ViewState<String>,
}

impl SignupView {
    pub fn new(ctx: ViewContext, auth: Arc<dyn AuthApi>) -> Self {
        Self {
            ctx,
            scope: ViewScope::new(),
            auth,
            state: ViewState::new(),
        }
    }

    pub fn state(&self) -> &ViewState<String> {
        &self.state
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    #[tracing::instrument(skip_all)]
    pub async fn submit(&mut self, form: SignupForm) -> bool {
        let credentials = match validate_signup(&form) {
            Ok(credentials) => credentials,
            Err(message) => {
                self.state.fail(message);
                return false;
            }
        };

        let auth = self.auth.clone();
        let token = self.scope.token().clone();
        let fetch = async move {
            auth.signup(credentials, &token)
                .await
                .map(|_| SIGNUP_SUCCESS_TEXT.to_string())
        };

        let created = self
            .ctx
            .run(&self.scope, &mut self.state, Access::Public, fetch)
            .await;
        if created {
            tracing::info!("account created");
            self.ctx.navigator().navigate(Route::Login);
        }
        created
    }
}

pub struct LoginView {
    ctx: ViewContext,
    scope: ViewScope,
    auth: Arc<dyn AuthApi>,
    state: ViewState<()>,
}

impl LoginView {
    pub fn new(ctx: ViewContext, auth: Arc<dyn AuthApi>) -> Self {
        Self {
            ctx,
            scope: ViewScope::new(),
            auth,
            state: ViewState::new(),
        }
    }

    pub fn state(&self) -> &ViewState<()> {
        &self.state
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    // Stores the issued token and email, then moves to the dashboard.
    #[tracing::instrument(skip_all)]
    pub async fn submit(&mut self, email: &str, password: &str) -> bool {
        let email = email.trim().to_string();
        if email.is_empty() || password.is_empty() {
            self.state.fail(UserMessage::validation(REQUIRED_FIELDS_TEXT));
            return false;
        }

        self.state.begin();
        let credentials = Credentials {
            email: email.clone(),
            password: password.to_string(),
        };
        let login = self.auth.login(credentials, self.scope.token());
        let response = match self.ctx.call(&self.scope, Access::Public, login).await {
            Ok(response) => response,
            Err(message) => {
                if !self.scope.is_unmounted() {
                    self.state.fail(message);
                }
                return false;
            }
        };

        if let Err(err) = self.ctx.session().login(response.access_token, Some(email)) {
            tracing::error!(error = %err, "failed to persist session");
            self.state
                .fail(UserMessage::new(ErrorCategory::Unexpected, err.to_string()));
            return false;
        }

        self.state.succeed(());
        self.ctx.navigator().navigate(Route::Dashboard);
        true
    }
}

// Explicit logout: the session is cleared even when the stored copy cannot be removed.
pub fn logout(ctx: &ViewContext) {
    if let Err(err) = ctx.session().logout() {
        tracing::warn!(error = %err, "failed to clear stored session");
    }
    ctx.navigator().navigate(Route::Login);
}
