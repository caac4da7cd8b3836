use std::sync::Arc;

use serde_json::Value;

use crate::domain::{
    Acknowledgement, ChangePasswordRequest, ResetPasswordRequest, SecurityApi,
    TwoFactorCode, TwoFactorSetup, TwoFactorStatus,
};
use crate::use_cases::auth::PASSWORD_MISMATCH_TEXT;
use crate::use_cases::error_message::{Access, UserMessage};
use crate::use_cases::view::{ViewContext, ViewScope, ViewState};

pub const PASSWORD_CHANGED_TEXT: &str = "Password changed successfully!";
pub const TWO_FACTOR_ON_TEXT: &str = "Two-Factor Authentication activated successfully!";
pub const TWO_FACTOR_OFF_TEXT: &str = "Two-Factor Authentication disabled.";
pub const CODE_REQUIRED_TEXT: &str = "Please enter your 2FA code";
pub const RESET_LINK_TEXT: &str = "If that email is registered, a reset link has been sent.";
pub const PASSWORD_RESET_TEXT: &str = "Password reset successfully. Please login.";

#[derive(Debug, Clone, Default)]
pub struct PasswordForm {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

// Where the two-factor setup dialog is.
#[derive(Debug, Clone, PartialEq)]
pub enum TwoFactorStep {
    Initial,
    // QR code and secret are shown until a code is verified.
    Setup(TwoFactorSetup),
}

// Password and two-factor management.
pub struct SecurityView {
    ctx: ViewContext,
    scope: ViewScope,
    api: Arc<dyn SecurityApi>,
    state: ViewState<TwoFactorStatus>,
    step: TwoFactorStep,
    notice: Option<String>,
}

impl SecurityView {
    pub fn new(ctx: ViewContext, api: Arc<dyn SecurityApi>) -> Self {
        Self {
            ctx,
            scope: ViewScope::new(),
            api,
            state: ViewState::new(),
            step: TwoFactorStep::Initial,
            notice: None,
        }
    }

    pub fn state(&self) -> &ViewState<TwoFactorStatus> {
        &self.state
    }

    pub fn step(&self) -> &TwoFactorStep {
        &self.step
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    pub fn two_factor_enabled(&self) -> bool {
        self.state.data.as_ref().is_some_and(|status| status.enabled)
    }

    #[tracing::instrument(skip_all)]
    pub async fn load_status(&mut self) -> bool {
        let api = self.api.clone();
        let token = self.scope.token().clone();
        let fetch = async move { api.two_factor_status(&token).await };

        self.ctx
            .run(&self.scope, &mut self.state, Access::Protected, fetch)
            .await
    }

    // A 401 here ends the session like any other protected call.
    #[tracing::instrument(skip_all)]
    pub async fn change_password(&mut self, form: PasswordForm) -> bool {
        self.notice = None;
        if form.new_password != form.confirm_password {
            self.state.set_error(UserMessage::validation(PASSWORD_MISMATCH_TEXT));
            return false;
        }
        let request = ChangePasswordRequest {
            current_password: form.current_password,
            new_password: form.new_password,
            confirm_password: form.confirm_password,
        };
        let result = self
            .ctx
            .call(
                &self.scope,
                Access::Protected,
                self.api.change_password(request, self.scope.token()),
            )
            .await;
        self.acknowledge(result, PASSWORD_CHANGED_TEXT).is_some()
    }

    #[tracing::instrument(skip_all)]
    pub async fn start_two_factor(&mut self) -> bool {
        self.notice = None;
        let result = self
            .ctx
            .call(
                &self.scope,
                Access::Protected,
                self.api.enable_two_factor(self.scope.token()),
            )
            .await;
        match result {
            Ok(setup) => {
                self.step = TwoFactorStep::Setup(setup);
                true
            }
            Err(message) => {
                self.report(message);
                false
            }
        }
    }

    #[tracing::instrument(skip_all)]
    pub async fn verify_two_factor(&mut self, code: &str) -> bool {
        let Some(code) = self.code(code) else {
            return false;
        };
        let result = self
            .ctx
            .call(
                &self.scope,
                Access::Protected,
                self.api.verify_two_factor(code, self.scope.token()),
            )
            .await;
        if self.acknowledge(result, TWO_FACTOR_ON_TEXT).is_none() {
            return false;
        }
        self.step = TwoFactorStep::Initial;
        self.set_enabled(true);
        true
    }

    #[tracing::instrument(skip_all)]
    pub async fn disable_two_factor(&mut self, code: &str) -> bool {
        let Some(code) = self.code(code) else {
            return false;
        };
        let result = self
            .ctx
            .call(
                &self.scope,
                Access::Protected,
                self.api.disable_two_factor(code, self.scope.token()),
            )
            .await;
        if self.acknowledge(result, TWO_FACTOR_OFF_TEXT).is_none() {
            return false;
        }
        self.set_enabled(false);
        true
    }

    #[tracing::instrument(skip_all)]
    pub async fn regenerate_backup_codes(&mut self, code: &str) -> Option<Vec<String>> {
        let code = self.code(code)?;
        let result = self
            .ctx
            .call(
                &self.scope,
                Access::Protected,
                self.api.regenerate_backup_codes(code, self.scope.token()),
            )
            .await;
        match result {
            Ok(codes) => {
                if let Some(status) = self.state.data.as_mut() {
                    status.backup_codes_remaining = codes.backup_codes.len() as u32;
                }
                self.notice = codes.message;
                Some(codes.backup_codes)
            }
            Err(message) => {
                self.report(message);
                None
            }
        }
    }

    pub async fn password_strength(&mut self, password: &str) -> Option<Value> {
        let result = self
            .ctx
            .call(
                &self.scope,
                Access::Public,
                self.api.password_strength(password, self.scope.token()),
            )
            .await;
        result.map_err(|message| self.report(message)).ok()
    }

    #[tracing::instrument(skip_all)]
    pub async fn forgot_password(&mut self, email: &str) -> bool {
        let email = email.trim();
        if email.is_empty() {
            self.state
                .set_error(UserMessage::validation("Please enter your email"));
            return false;
        }
        let result = self
            .ctx
            .call(
                &self.scope,
                Access::Public,
                self.api.forgot_password(email, self.scope.token()),
            )
            .await;
        self.acknowledge(result, RESET_LINK_TEXT).is_some()
    }

    #[tracing::instrument(skip_all)]
    pub async fn reset_password(&mut self, reset_token: &str, new: &str, confirm: &str) -> bool {
        if new != confirm {
            self.state.set_error(UserMessage::validation(PASSWORD_MISMATCH_TEXT));
            return false;
        }
        let request = ResetPasswordRequest {
            token: reset_token.trim().to_string(),
            new_password: new.to_string(),
            confirm_password: confirm.to_string(),
        };
        let result = self
            .ctx
            .call(
                &self.scope,
                Access::Public,
                self.api.reset_password(request, self.scope.token()),
            )
            .await;
        self.acknowledge(result, PASSWORD_RESET_TEXT).is_some()
    }

    fn code(&mut self, code: &str) -> Option<TwoFactorCode> {
        let code = code.trim();
        if code.is_empty() {
            self.state.set_error(UserMessage::validation(CODE_REQUIRED_TEXT));
            return None;
        }
        Some(TwoFactorCode {
            code: code.to_string(),
        })
    }

    fn set_enabled(&mut self, enabled: bool) {
        let status = self.state.data.get_or_insert_with(TwoFactorStatus::default);
        status.enabled = enabled;
    }

    // Success keeps our own wording; the backend message is only logged.
    fn acknowledge(
        &mut self,
        result: Result<Acknowledgement, UserMessage>,
        notice: &str,
    ) -> Option<Acknowledgement> {
        match result {
            Ok(ack) => {
                if let Some(message) = &ack.message {
                    tracing::debug!(%message, "backend acknowledged");
                }
                self.state.error = None;
                self.notice = Some(notice.to_string());
                Some(ack)
            }
            Err(message) => {
                self.report(message);
                None
            }
        }
    }

    fn report(&mut self, message: UserMessage) {
        if !self.scope.is_unmounted() {
            self.state.set_error(message);
        }
    }
}

pub fn describe_status(status: &TwoFactorStatus) -> String {
    match (status.enabled, status.activated_at.as_deref()) {
        (true, Some(at)) => format!(
            "enabled since {at}, {} backup codes left",
            status.backup_codes_remaining
        ),
        (true, None) => format!("enabled, {} backup codes left", status.backup_codes_remaining),
        (false, _) => "disabled".to_string(),
    }
}
