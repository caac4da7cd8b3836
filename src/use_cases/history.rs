use std::sync::Arc;

use crate::domain::{AnalysisApi, HistoryEntry};
use crate::use_cases::error_message::Access;
use crate::use_cases::view::{ViewContext, ViewScope, ViewState};

pub const NOT_ENOUGH_DATA_TEXT: &str =
    "We need at least 2 analysis records to show your skin progress trends.";

// Past analyses, in the order the backend lists them.
pub struct HistoryView {
    ctx: ViewContext,
    scope: ViewScope,
    api: Arc<dyn AnalysisApi>,
    state: ViewState<Vec<HistoryEntry>>,
}

impl HistoryView {
    pub fn new(ctx: ViewContext, api: Arc<dyn AnalysisApi>) -> Self {
        Self {
            ctx,
            scope: ViewScope::new(),
            api,
            state: ViewState::new(),
        }
    }

    pub fn state(&self) -> &ViewState<Vec<HistoryEntry>> {
        &self.state
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    // Re-fetches on every call; nothing is cached between visits.
    #[tracing::instrument(skip_all)]
    pub async fn load(&mut self) -> bool {
        let api = self.api.clone();
        let token = self.scope.token().clone();
        let fetch = async move { api.history(&token).await };

        self.ctx
            .run(&self.scope, &mut self.state, Access::Protected, fetch)
            .await
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricTrend {
    pub name: String,
    // Latest score, 0..100.
    pub latest: i64,
    // Percentage points gained since the oldest record.
    pub change: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrendReport {
    // Oldest first.
    pub entries: Vec<HistoryEntry>,
    pub metrics: Vec<MetricTrend>,
}

// History arrives newest first; trends read oldest to newest.
// Metrics missing from either end are left out.
pub fn trend_report(mut entries: Vec<HistoryEntry>) -> Option<TrendReport> {
    if entries.len() < 2 {
        return None;
    }
    entries.reverse();

    let first = &entries[0].result.skin_scores;
    let latest = &entries[entries.len() - 1].result.skin_scores;
    let metrics = latest
        .iter()
        .filter_map(|(name, last)| {
            first.get(name).map(|start| MetricTrend {
                name: name.clone(),
                latest: (last * 100.0).round() as i64,
                change: ((last - start) * 100.0).round() as i64,
            })
        })
        .collect();

    Some(TrendReport { entries, metrics })
}

pub struct TrendsView {
    ctx: ViewContext,
    scope: ViewScope,
    api: Arc<dyn AnalysisApi>,
    state: ViewState<Option<TrendReport>>,
}

impl TrendsView {
    pub fn new(ctx: ViewContext, api: Arc<dyn AnalysisApi>) -> Self {
        Self {
            ctx,
            scope: ViewScope::new(),
            api,
            state: ViewState::new(),
        }
    }

    // Loaded with None means there is not enough history yet.
    pub fn state(&self) -> &ViewState<Option<TrendReport>> {
        &self.state
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    #[tracing::instrument(skip_all)]
    pub async fn load(&mut self) -> bool {
        let api = self.api.clone();
        let token = self.scope.token().clone();
        let fetch = async move { api.history(&token).await.map(trend_report) };

        self.ctx
            .run(&self.scope, &mut self.state, Access::Protected, fetch)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ApiError;
    use crate::use_cases::ErrorCategory;
    use crate::use_cases::test_support::{FakeBackend, context, history_entry};

    #[test]
    fn when_two_records_exist_then_change_is_latest_minus_oldest() {
        let newest_first = vec![
            history_entry("h3", "2026-10-03", 0.75),
            history_entry("h2", "2026-10-02", 0.6),
            history_entry("h1", "2026-10-01", 0.5),
        ];

        let report = trend_report(newest_first).expect("enough data");

        assert_eq!(report.entries[0].id.as_deref(), Some("h1"));
        let hydration = report
            .metrics
            .iter()
            .find(|metric| metric.name == "hydration")
            .expect("hydration trend");
        assert_eq!(hydration.latest, 75);
        assert_eq!(hydration.change, 25);
    }

    #[test]
    fn when_fewer_than_two_records_then_no_report() {
        assert_eq!(trend_report(Vec::new()), None);
        assert_eq!(
            trend_report(vec![history_entry("h1", "2026-10-01", 0.5)]),
            None
        );
    }

    #[tokio::test]
    async fn when_history_loads_then_entries_are_kept_in_backend_order() {
        let (ctx, _) = context(Some("token"));
        let backend = FakeBackend::new();
        let mut view = HistoryView::new(ctx, Arc::new(backend.clone()));

        assert!(view.load().await);
        assert!(view.load().await);

        let ids: Vec<_> = view
            .state()
            .data
            .iter()
            .flatten()
            .filter_map(|entry| entry.id.clone())
            .collect();
        assert_eq!(ids, vec!["h2".to_string(), "h1".to_string()]);
        assert_eq!(backend.calls(), vec!["history", "history"]);
    }

    #[tokio::test]
    async fn when_history_is_unreachable_then_network_message_is_shown() {
        let (ctx, _) = context(Some("token"));
        let backend = FakeBackend::new();
        backend.fail("history", ApiError::network("connection refused"));
        let mut view = TrendsView::new(ctx, Arc::new(backend));

        assert!(!view.load().await);

        assert_eq!(
            view.state().error.as_ref().map(|message| message.category),
            Some(ErrorCategory::Network)
        );
    }

    #[tokio::test]
    async fn when_trends_load_then_report_is_oldest_first() {
        let (ctx, _) = context(Some("token"));
        let mut view = TrendsView::new(ctx, Arc::new(FakeBackend::new()));

        assert!(view.load().await);

        let report = view.state().data.clone().flatten().expect("report");
        assert_eq!(report.entries[0].id.as_deref(), Some("h1"));
        let hydration = report
            .metrics
            .iter()
            .find(|metric| metric.name == "hydration")
            .expect("hydration trend");
        assert_eq!(hydration.change, 20);
    }
}
