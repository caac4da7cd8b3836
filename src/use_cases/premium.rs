use std::sync::Arc;

use futures::future::try_join;

use crate::domain::{ApiError, PremiumApi, Pricing, RoleInfo, Route, UpgradeRequest};
use crate::use_cases::error_message::{Access, UserMessage};
use crate::use_cases::settings::SUBSCRIPTION_CANCELLED_TEXT;
use crate::use_cases::view::{ViewContext, ViewScope, ViewState};

pub const UPGRADED_TEXT: &str = "Successfully upgraded to Premium!";

#[derive(Debug, Clone, PartialEq)]
pub struct PremiumScreen {
    pub role: RoleInfo,
    pub pricing: Pricing,
}

// Plan overview and the demo upgrade flow.
pub struct PremiumView {
    ctx: ViewContext,
    scope: ViewScope,
    api: Arc<dyn PremiumApi>,
    state: ViewState<PremiumScreen>,
    upgrading: bool,
    message: Option<String>,
}

impl PremiumView {
    pub fn new(ctx: ViewContext, api: Arc<dyn PremiumApi>) -> Self {
        Self {
            ctx,
            scope: ViewScope::new(),
            api,
            state: ViewState::new(),
            upgrading: false,
            message: None,
        }
    }

    pub fn state(&self) -> &ViewState<PremiumScreen> {
        &self.state
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn is_upgrading(&self) -> bool {
        self.upgrading
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    // Role and pricing must both arrive before the page counts as loaded.
    #[tracing::instrument(skip_all)]
    pub async fn load(&mut self) -> bool {
        let api = self.api.clone();
        let token = self.scope.token().clone();
        let fetch = async move {
            let (role, pricing) = try_join(api.role(&token), api.pricing(&token)).await?;
            Ok::<_, ApiError>(PremiumScreen { role, pricing })
        };

        self.ctx
            .run(&self.scope, &mut self.state, Access::Protected, fetch)
            .await
    }

    // Demo payment only. On success the role is re-read and the dashboard opens.
    #[tracing::instrument(skip(self))]
    pub async fn upgrade(&mut self, duration_days: u32) -> bool {
        self.upgrading = true;
        self.message = None;
        let upgraded = self
            .ctx
            .call(
                &self.scope,
                Access::Protected,
                self.api
                    .upgrade(UpgradeRequest::demo(duration_days), self.scope.token()),
            )
            .await;
        let outcome = match upgraded {
            Ok(outcome) => outcome,
            Err(message) => {
                self.upgrading = false;
                self.fail(message);
                return false;
            }
        };
        self.message = Some(outcome.message.unwrap_or_else(|| UPGRADED_TEXT.to_string()));

        let refreshed = self
            .ctx
            .call(&self.scope, Access::Protected, self.api.role(self.scope.token()))
            .await;
        self.upgrading = false;
        match refreshed {
            Ok(role) => {
                if let Some(screen) = self.state.data.as_mut() {
                    screen.role = role;
                }
            }
            Err(message) => tracing::warn!(%message, "role refresh after upgrade failed"),
        }

        self.ctx.navigator().navigate(Route::Dashboard);
        true
    }

    #[tracing::instrument(skip_all)]
    pub async fn cancel(&mut self) -> bool {
        self.message = None;
        let cancelled = self
            .ctx
            .call(
                &self.scope,
                Access::Protected,
                self.api.downgrade(self.scope.token()),
            )
            .await;
        match cancelled {
            Ok(outcome) => {
                if let Some(screen) = self.state.data.as_mut() {
                    screen.role.is_premium = false;
                    screen.role.role = "free".to_string();
                }
                self.message =
                    Some(outcome.message.unwrap_or_else(|| SUBSCRIPTION_CANCELLED_TEXT.to_string()));
                true
            }
            Err(message) => {
                self.fail(message);
                false
            }
        }
    }

    // Failed actions surface as the page message; the plan data stays.
    fn fail(&mut self, message: UserMessage) {
        if self.scope.is_unmounted() {
            return;
        }
        self.message = Some(message.text.clone());
        self.state.set_error(message);
    }
}
