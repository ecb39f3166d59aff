//! Dashboard - Wires the three data domains to their dispatchers.
//!
//! The analysis, memory and system-info domains each have their own store
//! and settle independently. [`Dashboard::mount`] loads system info once;
//! [`Dashboard::teardown`] detaches every domain so late responses are
//! dropped.
//!
//! # Example
//!
//! ```ignore
//! let dashboard = Dashboard::connect(&config.api, confirmation, notifier)?;
//! tokio::spawn({ let d = dashboard.clone(); async move { d.mount().await } });
//! dashboard.run_analysis(AnalysisRequest::new("battery life")).await?;
//! println!("{}", dashboard.report_view().await.unwrap());
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::handlers::{
    AnalysisRequest, ClearMemoryHandler, ClearOutcome, ExportMemoryHandler, LoadMemoryHandler,
    LoadSystemInfoHandler, LookupStoredAnalysisHandler, RunAnalysisHandler,
};
use super::store::{DomainReader, DomainStore};
use super::DispatchError;
use crate::adapters::HttpReviewApi;
use crate::config::ApiConfig;
use crate::domain::fetch::ApplyOutcome;
use crate::domain::memory::{MemorySnapshot, SystemInfo};
use crate::domain::presentation::{MemoryView, ReportView, SystemInfoView};
use crate::domain::report::AnalysisReport;
use crate::ports::{
    ApiError, ClearScope, ConfirmationPrompt, ExportReceipt, ReviewApi, UserNotifier,
};

/// Controller for one dashboard instance.
#[derive(Clone)]
pub struct Dashboard {
    analysis: DomainStore<AnalysisReport>,
    memory: DomainStore<MemorySnapshot>,
    system_info: DomainStore<SystemInfo>,
    run_analysis: RunAnalysisHandler,
    lookup: LookupStoredAnalysisHandler,
    load_memory: LoadMemoryHandler,
    clear_memory: ClearMemoryHandler,
    export_memory: ExportMemoryHandler,
    load_system_info: LoadSystemInfoHandler,
    mounted: Arc<AtomicBool>,
    torn_down: Arc<AtomicBool>,
}

impl Dashboard {
    pub fn new(
        api: Arc<dyn ReviewApi>,
        confirmation: Arc<dyn ConfirmationPrompt>,
        notifier: Arc<dyn UserNotifier>,
    ) -> Self {
        let analysis = DomainStore::new("analysis");
        let memory = DomainStore::new("memory");
        let system_info = DomainStore::new("system_info");

        let load_memory = LoadMemoryHandler::new(api.clone(), memory.clone());
        Self {
            run_analysis: RunAnalysisHandler::new(api.clone(), analysis.clone()),
            lookup: LookupStoredAnalysisHandler::new(api.clone(), notifier.clone()),
            clear_memory: ClearMemoryHandler::new(
                api.clone(),
                confirmation,
                notifier.clone(),
                load_memory.clone(),
            ),
            export_memory: ExportMemoryHandler::new(api.clone(), notifier),
            load_system_info: LoadSystemInfoHandler::new(api, system_info.clone()),
            load_memory,
            analysis,
            memory,
            system_info,
            mounted: Arc::new(AtomicBool::new(false)),
            torn_down: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Builds a dashboard talking HTTP to the configured backend.
    pub fn connect(
        config: &ApiConfig,
        confirmation: Arc<dyn ConfirmationPrompt>,
        notifier: Arc<dyn UserNotifier>,
    ) -> Result<Self, ApiError> {
        let api = HttpReviewApi::from_config(config)?;
        tracing::info!(base_url = %config.base_url, "dashboard connected");
        Ok(Self::new(Arc::new(api), confirmation, notifier))
    }

    /// Loads system info. Only the first call fetches; later calls
    /// return `None` without a request.
    pub async fn mount(&self) -> Option<SystemInfo> {
        if self.mounted.swap(true, Ordering::SeqCst) {
            tracing::debug!("dashboard already mounted");
            return None;
        }
        self.load_system_info.handle().await
    }

    /// Detaches all domains. Outstanding calls may still finish, but their
    /// results are never applied.
    pub async fn teardown(&self) {
        self.torn_down.store(true, Ordering::SeqCst);
        self.analysis.detach().await;
        self.memory.detach().await;
        self.system_info.detach().await;
        tracing::debug!("dashboard torn down");
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down.load(Ordering::SeqCst)
    }

    fn ensure_live(&self) -> Result<(), DispatchError> {
        if self.is_torn_down() {
            return Err(DispatchError::Discarded(ApplyOutcome::Detached));
        }
        Ok(())
    }

    pub async fn run_analysis(
        &self,
        request: AnalysisRequest,
    ) -> Result<AnalysisReport, DispatchError> {
        self.ensure_live()?;
        self.run_analysis.handle(request).await
    }

    pub async fn load_memory(&self) -> Result<MemorySnapshot, DispatchError> {
        self.ensure_live()?;
        self.load_memory.handle().await
    }

    pub async fn clear_memory(&self, scope: ClearScope) -> Result<ClearOutcome, DispatchError> {
        self.ensure_live()?;
        self.clear_memory.handle(scope).await
    }

    pub async fn export_memory(&self) -> Result<ExportReceipt, DispatchError> {
        self.ensure_live()?;
        self.export_memory.handle().await
    }

    pub async fn lookup_stored_analysis(
        &self,
        query: &str,
    ) -> Result<Option<AnalysisReport>, DispatchError> {
        self.ensure_live()?;
        self.lookup.handle(query).await
    }

    pub fn analysis(&self) -> DomainReader<AnalysisReport> {
        self.analysis.reader()
    }

    pub fn memory(&self) -> DomainReader<MemorySnapshot> {
        self.memory.reader()
    }

    pub fn system_info(&self) -> DomainReader<SystemInfo> {
        self.system_info.reader()
    }

    /// The current report, composed for display.
    pub async fn report_view(&self) -> Option<ReportView> {
        self.analysis
            .snapshot()
            .await
            .data()
            .map(ReportView::compose)
    }

    pub async fn memory_view(&self) -> MemoryView {
        MemoryView::compose(&self.memory.snapshot().await)
    }

    pub async fn system_info_view(&self) -> Option<SystemInfoView> {
        SystemInfoView::compose(&self.system_info.snapshot().await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{
        Endpoint, MockReviewApi, RecordingNotifier, ScriptedConfirmation,
    };
    use crate::domain::fetch::FetchStatus;
    use crate::domain::presentation::{MemoryPanel, SectionKind};
    use serde_json::json;
    use std::time::Duration;

    fn dashboard(api: &MockReviewApi) -> Dashboard {
        Dashboard::new(
            Arc::new(api.clone()),
            Arc::new(ScriptedConfirmation::accepting()),
            Arc::new(RecordingNotifier::new()),
        )
    }

    fn system_payload() -> serde_json::Value {
        json!({"system": {"version": "2.0", "architecture": "RAG", "features": [], "agents": ["A", "B"]}})
    }

    #[tokio::test]
    async fn mount_fetches_system_info_once() {
        let api = MockReviewApi::new()
            .with_json(Endpoint::SystemInfo, system_payload())
            .with_json(Endpoint::SystemInfo, system_payload());
        let dashboard = dashboard(&api);

        assert!(dashboard.mount().await.is_some());
        assert!(dashboard.mount().await.is_none());
        assert_eq!(api.call_count(Endpoint::SystemInfo), 1);

        let view = dashboard.system_info_view().await.unwrap();
        assert_eq!(view.architecture_line, "RAG • 2 Agents Active");
    }

    #[tokio::test]
    async fn system_info_failure_does_not_block_analysis() {
        let api = MockReviewApi::new()
            .with_delayed_error(
                Endpoint::SystemInfo,
                ApiError::Network("refused".to_string()),
                Duration::from_millis(50),
            )
            .with_json(Endpoint::Analyze, json!({"intent": "positive", "summary": "Great"}));
        let dashboard = dashboard(&api);

        let mount = tokio::spawn({
            let dashboard = dashboard.clone();
            async move { dashboard.mount().await }
        });
        tokio::time::sleep(Duration::from_millis(10)).await;
        let report = dashboard.run_analysis(AnalysisRequest::new("q")).await.unwrap();
        assert_eq!(report.summary_text, "Great");
        assert_eq!(
            dashboard.system_info().snapshot().await.status(),
            FetchStatus::Pending
        );

        assert!(mount.await.unwrap().is_none());
        assert_eq!(
            dashboard.system_info().snapshot().await.status(),
            FetchStatus::Failure
        );
        assert_eq!(
            dashboard.analysis().snapshot().await.status(),
            FetchStatus::Success
        );
    }

    #[tokio::test]
    async fn domains_settle_independently() {
        let api = MockReviewApi::new()
            .with_delayed_json(
                Endpoint::Analyze,
                json!({"intent": "negative"}),
                Duration::from_millis(60),
            )
            .with_error(
                Endpoint::MemoryStats,
                ApiError::Server {
                    status: 503,
                    message: "busy".to_string(),
                },
            );
        let dashboard = dashboard(&api);

        let analysis = tokio::spawn({
            let dashboard = dashboard.clone();
            async move { dashboard.run_analysis(AnalysisRequest::new("q")).await }
        });
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(dashboard.load_memory().await.is_err());
        assert!(dashboard.analysis().is_pending().await);

        analysis.await.unwrap().unwrap();
        let memory = dashboard.memory().snapshot().await;
        assert_eq!(memory.status(), FetchStatus::Failure);
        assert_eq!(dashboard.memory_view().await.panel, MemoryPanel::Empty);
        assert_eq!(
            dashboard.analysis().snapshot().await.status(),
            FetchStatus::Success
        );
    }

    #[tokio::test]
    async fn teardown_discards_late_results() {
        let api = MockReviewApi::new().with_delayed_json(
            Endpoint::Analyze,
            json!({"intent": "negative"}),
            Duration::from_millis(60),
        );
        let dashboard = dashboard(&api);

        let analysis = tokio::spawn({
            let dashboard = dashboard.clone();
            async move { dashboard.run_analysis(AnalysisRequest::new("q")).await }
        });
        tokio::time::sleep(Duration::from_millis(10)).await;
        dashboard.teardown().await;

        let result = analysis.await.unwrap();
        assert!(matches!(
            result,
            Err(DispatchError::Discarded(ApplyOutcome::Detached))
        ));
        let state = dashboard.analysis().snapshot().await;
        assert_eq!(state.status(), FetchStatus::Pending);
        assert!(state.data().is_none());
    }

    #[tokio::test]
    async fn nothing_is_dispatched_after_teardown() {
        let api = MockReviewApi::new();
        let dashboard = dashboard(&api);
        dashboard.teardown().await;

        assert!(dashboard
            .run_analysis(AnalysisRequest::new("q"))
            .await
            .unwrap_err()
            .is_discarded());
        assert!(dashboard.load_memory().await.unwrap_err().is_discarded());
        assert!(dashboard.export_memory().await.unwrap_err().is_discarded());
        assert!(dashboard
            .clear_memory(ClearScope::All)
            .await
            .unwrap_err()
            .is_discarded());
        assert_eq!(api.total_calls(), 0);
    }

    #[tokio::test]
    async fn invalid_input_after_teardown_is_discarded() {
        let api = MockReviewApi::new();
        let dashboard = dashboard(&api);
        dashboard.teardown().await;

        let err = dashboard
            .run_analysis(AnalysisRequest::new("   "))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DispatchError::Discarded(ApplyOutcome::Detached)
        ));
        let state = dashboard.analysis().snapshot().await;
        assert_eq!(state.status(), FetchStatus::Idle);
        assert!(state.error_message().is_none());
    }

    #[tokio::test]
    async fn repeated_clears_are_each_confirmed() {
        let api = MockReviewApi::new()
            .with_json(Endpoint::ClearMemory, json!({"message": "Cleared"}))
            .with_json(Endpoint::MemoryStats, json!({}))
            .with_json(Endpoint::ClearMemory, json!({"message": "Cleared"}))
            .with_json(Endpoint::MemoryStats, json!({}));
        let dashboard = dashboard(&api);

        for _ in 0..2 {
            let outcome = dashboard.clear_memory(ClearScope::Session).await.unwrap();
            assert!(matches!(outcome, ClearOutcome::Cleared { .. }));
        }
        assert_eq!(api.call_count(Endpoint::ClearMemory), 2);
    }

    #[tokio::test]
    async fn report_view_reflects_stored_report() {
        let api = MockReviewApi::new().with_json(
            Endpoint::Analyze,
            json!({
                "intent": "negative",
                "summary": {"summary_text": "Meh", "top_praises": [{"feature": "design"}]},
                "advisor": {"product_improvements": ["Bigger battery"]}
            }),
        );
        let dashboard = dashboard(&api);
        assert!(dashboard.report_view().await.is_none());

        dashboard.run_analysis(AnalysisRequest::new("q")).await.unwrap();
        let view = dashboard.report_view().await.unwrap();

        assert!(view.block(SectionKind::Praises).is_none());
        assert_eq!(
            view.block(SectionKind::Recommendations).unwrap().lines,
            vec!["1. Bigger battery"]
        );
    }
}
