use std::sync::Arc;

use futures::join;
use serde_json::Value;

use crate::domain::{
    PremiumApi, RoleInfo, SecurityApi, Settings, SettingsApi, SettingsPatch, TwoFactorStatus,
};
use crate::use_cases::error_message::{Access, UserMessage};
use crate::use_cases::view::{ViewContext, ViewScope, ViewState};

pub const SAVED_TEXT: &str = "Settings saved successfully!";
pub const RESET_TEXT: &str = "Settings reset to defaults.";
pub const SUBSCRIPTION_CANCELLED_TEXT: &str =
    "Subscription cancelled. You are now on the Free plan.";

// Everything the settings screen renders. The side panels are optional:
// only the settings document itself must load.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsScreen {
    pub settings: Settings,
    pub two_factor: Option<TwoFactorStatus>,
    pub role: Option<RoleInfo>,
}

impl SettingsScreen {
    pub fn is_premium(&self) -> bool {
        self.role.as_ref().is_some_and(|role| role.is_premium)
    }
}

pub struct SettingsView {
    ctx: ViewContext,
    scope: ViewScope,
    settings: Arc<dyn SettingsApi>,
    security: Arc<dyn SecurityApi>,
    premium: Arc<dyn PremiumApi>,
    state: ViewState<SettingsScreen>,
    notice: Option<String>,
}

impl SettingsView {
    pub fn new(
        ctx: ViewContext,
        settings: Arc<dyn SettingsApi>,
        security: Arc<dyn SecurityApi>,
        premium: Arc<dyn PremiumApi>,
    ) -> Self {
        Self {
            ctx,
            scope: ViewScope::new(),
            settings,
            security,
            premium,
            state: ViewState::new(),
            notice: None,
        }
    }

    pub fn state(&self) -> &ViewState<SettingsScreen> {
        &self.state
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    // Settings, 2FA status and plan are fetched together.
    #[tracing::instrument(skip_all)]
    pub async fn load(&mut self) -> bool {
        self.state.begin();
        let token = self.scope.token();
        let (settings, two_factor, role) = join!(
            self.ctx
                .call(&self.scope, Access::Protected, self.settings.get(token)),
            self.ctx.call(
                &self.scope,
                Access::Protected,
                self.security.two_factor_status(token)
            ),
            self.ctx
                .call(&self.scope, Access::Protected, self.premium.role(token)),
        );
        if self.scope.is_unmounted() {
            return false;
        }

        if let Err(message) = &two_factor {
            tracing::warn!(%message, "two-factor status unavailable");
        }
        if let Err(message) = &role {
            tracing::warn!(%message, "plan details unavailable");
        }
        match settings {
            Ok(settings) => {
                self.state.succeed(SettingsScreen {
                    settings,
                    two_factor: two_factor.ok(),
                    role: role.ok(),
                });
                true
            }
            Err(message) => {
                self.state.fail(message);
                false
            }
        }
    }

    // Sends the whole document back, unknown keys included.
    #[tracing::instrument(skip_all)]
    pub async fn save(&mut self, settings: Settings) -> bool {
        self.notice = None;
        let saved = self
            .ctx
            .call(
                &self.scope,
                Access::Protected,
                self.settings.save(&settings, self.scope.token()),
            )
            .await;
        self.apply(saved, SAVED_TEXT)
    }

    #[tracing::instrument(skip_all)]
    pub async fn update(&mut self, patch: SettingsPatch) -> bool {
        self.notice = None;
        let updated = self
            .ctx
            .call(
                &self.scope,
                Access::Protected,
                self.settings.update(&patch, self.scope.token()),
            )
            .await;
        self.apply(updated, SAVED_TEXT)
    }

    // Backend restores its defaults; the fresh document is read back.
    #[tracing::instrument(skip_all)]
    pub async fn reset(&mut self) -> bool {
        self.notice = None;
        let token = self.scope.token();
        let reset = async {
            self.settings.reset(token).await?;
            self.settings.get(token).await
        };
        let fresh = self.ctx.call(&self.scope, Access::Protected, reset).await;
        self.apply(fresh, RESET_TEXT)
    }

    pub async fn export(&mut self) -> Option<Value> {
        let exported = self
            .ctx
            .call(
                &self.scope,
                Access::Protected,
                self.settings.export(self.scope.token()),
            )
            .await;
        match exported {
            Ok(document) => Some(document),
            Err(message) => {
                if !self.scope.is_unmounted() {
                    self.state.set_error(message);
                }
                None
            }
        }
    }

    #[tracing::instrument(skip_all)]
    pub async fn cancel_subscription(&mut self) -> bool {
        self.notice = None;
        let cancelled = self
            .ctx
            .call(
                &self.scope,
                Access::Protected,
                self.premium.downgrade(self.scope.token()),
            )
            .await;
        match cancelled {
            Ok(_) => {
                if let Some(role) = self
                    .state
                    .data
                    .as_mut()
                    .and_then(|screen| screen.role.as_mut())
                {
                    role.is_premium = false;
                    role.role = "free".to_string();
                }
                self.notice = Some(SUBSCRIPTION_CANCELLED_TEXT.to_string());
                true
            }
            Err(message) => {
                if !self.scope.is_unmounted() {
                    self.state.set_error(message);
                }
                false
            }
        }
    }

    fn apply(&mut self, result: Result<Settings, UserMessage>, notice: &str) -> bool {
        match result {
            Ok(settings) => {
                match self.state.data.as_mut() {
                    Some(screen) => screen.settings = settings,
                    None => self.state.succeed(SettingsScreen {
                        settings,
                        two_factor: None,
                        role: None,
                    }),
                }
                self.state.error = None;
                self.notice = Some(notice.to_string());
                true
            }
            Err(message) => {
                if !self.scope.is_unmounted() {
                    self.state.set_error(message);
                }
                false
            }
        }
    }
}
