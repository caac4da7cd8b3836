use std::sync::Arc;

use futures::future::try_join3;

use crate::domain::{AnalysisApi, ApiError, HistoryEntry, PremiumApi, RoleInfo, Usage};
use crate::use_cases::error_message::Access;
use crate::use_cases::view::{ViewContext, ViewScope, ViewState};

const RECENT_LIMIT: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub recent: Vec<HistoryEntry>,
    pub total_analyses: usize,
    pub role: RoleInfo,
    pub usage: Usage,
}

// Dashboard home: recent analyses, plan and remaining quota.
pub struct DashboardView {
    ctx: ViewContext,
    scope: ViewScope,
    analysis: Arc<dyn AnalysisApi>,
    premium: Arc<dyn PremiumApi>,
    state: ViewState<DashboardSummary>,
}

impl DashboardView {
    pub fn new(ctx: ViewContext, analysis: Arc<dyn AnalysisApi>, premium: Arc<dyn PremiumApi>) -> Self {
        Self {
            ctx,
            scope: ViewScope::new(),
            analysis,
            premium,
            state: ViewState::new(),
        }
    }

    pub fn state(&self) -> &ViewState<DashboardSummary> {
        &self.state
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    // Loaded only once history, role and usage have all resolved.
    #[tracing::instrument(skip_all)]
    pub async fn load(&mut self) -> bool {
        let analysis = self.analysis.clone();
        let premium = self.premium.clone();
        let token = self.scope.token().clone();
        let fetch = async move {
            let (history, role, usage) = try_join3(
                analysis.history(&token),
                premium.role(&token),
                premium.usage(&token),
            )
            .await?;
            let total_analyses = history.len();
            Ok::<_, ApiError>(DashboardSummary {
                recent: history.into_iter().take(RECENT_LIMIT).collect(),
                total_analyses,
                role,
                usage,
            })
        };

        self.ctx
            .run(&self.scope, &mut self.state, Access::Protected, fetch)
            .await
    }
}
