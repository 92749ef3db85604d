//! Two-phase import of a Google Scholar profile.
//!
//! Phase one resolves the author id from the pasted profile URL, phase two
//! scrapes the profile. Phase two never starts unless phase one produced
//! an id. Progress notes are appended as each phase starts and ends.

use crate::dashboard::DashboardView;
use async_trait::async_trait;
use facultyhub_core::model::ScholarSyncResult;
use facultyhub_core::notice::Notifier;
use facultyhub_core::workflow::{
    ProgressLog, RecoveryPolicy, StepDefinition, StepOutcome, WorkflowController,
    WorkflowDefinition, WorkflowInput, WorkflowSnapshot, WorkflowSubmitter,
};
use facultyhub_core::{ClientError, Result};
use facultyhub_interaction::clients::ScholarClient;
use std::sync::Arc;

pub const URL_FIELD: &str = "url";

/// One step holding the profile URL. A failed sync has to be started over.
pub fn scholar_sync_definition() -> WorkflowDefinition {
    let step = StepDefinition::new("profile-url").rule(|input| {
        input
            .text(URL_FIELD)
            .is_none_or(|url| url.trim().is_empty())
            .then(|| "Please paste a URL first".to_string())
    });
    WorkflowDefinition::new("scholar-sync")
        .step(step)
        .recovery(RecoveryPolicy::RestartRequired)
        .failure_fallback("Unknown error")
}

pub struct ScholarSyncSubmitter {
    scholar: ScholarClient,
}

impl ScholarSyncSubmitter {
    pub fn new(scholar: ScholarClient) -> Self {
        Self { scholar }
    }
}

#[async_trait]
impl WorkflowSubmitter for ScholarSyncSubmitter {
    type Output = ScholarSyncResult;

    async fn submit(&self, input: &WorkflowInput, progress: &ProgressLog) -> Result<ScholarSyncResult> {
        let url = input.text(URL_FIELD).unwrap_or_default().trim();

        progress.push("Analyzing profile URL...");
        let author_id = self
            .scholar
            .resolve_author_id(url)
            .await?
            .ok_or_else(|| ClientError::validation("Could not find Author ID in this URL"))?;
        progress.push(format!("ID found: {author_id}"));

        progress.push("Contacting Google Scholar (this takes time)...");
        let result = self.scholar.import(&author_id).await?;
        progress.push("Papers saved & profile updated.");
        tracing::info!(author_id = %author_id, papers = result.paper_count, "Scholar profile imported");
        Ok(result)
    }
}

/// A scholar-sync run whose result is folded into a dashboard.
pub struct ScholarSync {
    controller: WorkflowController<ScholarSyncSubmitter>,
    definition: Arc<WorkflowDefinition>,
    notifier: Arc<dyn Notifier>,
}

impl ScholarSync {
    pub fn new(
        definition: Arc<WorkflowDefinition>,
        scholar: ScholarClient,
        dashboard: DashboardView,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let controller = WorkflowController::new(ScholarSyncSubmitter::new(scholar))
            .on_complete(move |result: &ScholarSyncResult| dashboard.apply_sync(result.clone()));
        controller.start(definition.clone());
        Self {
            controller,
            definition,
            notifier,
        }
    }

    /// Validates `profile_url` and runs both phases.
    pub async fn run(&self, profile_url: &str) -> Result<ScholarSyncResult> {
        if !self.controller.snapshot().is_some_and(|s| s.open) {
            self.restart();
        }
        self.controller.set_text(URL_FIELD, profile_url)?;

        if let StepOutcome::Invalid(message) = self.controller.advance()? {
            self.notifier.error(&message);
            return Err(ClientError::validation(message));
        }

        match self.controller.submit().await {
            Ok(result) => {
                self.notifier.success("Sync Complete!");
                Ok(result)
            }
            Err(ClientError::Cancelled) => Err(ClientError::Cancelled),
            Err(e) => {
                self.notifier.error("Sync failed.");
                Err(e)
            }
        }
    }

    /// Discards the current run and opens a fresh one.
    pub fn restart(&self) {
        self.controller.start(self.definition.clone());
    }

    pub fn cancel(&self) {
        self.controller.cancel();
    }

    pub fn progress(&self) -> Vec<String> {
        self.controller.progress()
    }

    pub fn snapshot(&self) -> Option<WorkflowSnapshot> {
        self.controller.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use facultyhub_core::notice::NoticeLog;
    use facultyhub_core::workflow::WorkflowStatus;
    use facultyhub_interaction::Method;
    use facultyhub_interaction::clients::DashboardClient;
    use facultyhub_interaction::testing::ScriptedGateway;
    use serde_json::json;

    fn setup() -> (Arc<ScriptedGateway>, Arc<NoticeLog>, DashboardView, ScholarSync) {
        let gateway = Arc::new(ScriptedGateway::new());
        let notices = Arc::new(NoticeLog::new());
        let dashboard = DashboardView::new(DashboardClient::new(gateway.clone()), notices.clone());
        let sync = ScholarSync::new(
            Arc::new(scholar_sync_definition()),
            ScholarClient::new(gateway.clone()),
            dashboard.clone(),
            notices.clone(),
        );
        (gateway, notices, dashboard, sync)
    }

    #[tokio::test]
    async fn test_empty_url_never_reaches_network() {
        let (gateway, notices, _, sync) = setup();

        let err = sync.run("   ").await.unwrap_err();

        assert_eq!(err, ClientError::validation("Please paste a URL first"));
        assert_eq!(gateway.request_count(), 0);
        assert_eq!(notices.errors(), vec!["Please paste a URL first".to_string()]);
    }

    #[tokio::test]
    async fn test_successful_sync_updates_dashboard() {
        let (gateway, notices, dashboard, sync) = setup();
        gateway
            .ok(Method::Get, "/users/getAuthorID", json!({ "authorId": "AbC123" }))
            .ok(
                Method::Get,
                "/users/authorProfile",
                json!({ "author": { "name": "Asha Rao" }, "paperCount": 31 }),
            );

        sync.run("https://scholar.google.com/citations?user=AbC123").await.unwrap();

        assert_eq!(
            sync.progress(),
            vec![
                "Analyzing profile URL...",
                "ID found: AbC123",
                "Contacting Google Scholar (this takes time)...",
                "Papers saved & profile updated.",
            ]
        );
        assert_eq!(dashboard.stats().papers_count, 31);
        assert!(dashboard.stats().has_scholar_data());
        assert_eq!(notices.successes(), vec!["Sync Complete!".to_string()]);
        let import = gateway.requests_to("/users/authorProfile").remove(0);
        assert_eq!(import.query_value("authorId"), Some("AbC123"));
    }

    #[tokio::test]
    async fn test_phase_one_failure_skips_import() {
        let (gateway, notices, dashboard, sync) = setup();
        gateway.fail(Method::Get, "/users/getAuthorID", 500, "Scraper offline");

        assert!(sync.run("https://scholar.google.com/x").await.is_err());

        assert!(gateway.requests_to("/users/authorProfile").is_empty());
        let snapshot = sync.snapshot().unwrap();
        assert_eq!(snapshot.status, WorkflowStatus::Failed);
        assert_eq!(snapshot.error_message.as_deref(), Some("Scraper offline"));
        assert!(!snapshot.open);
        assert_eq!(
            sync.progress(),
            vec!["Analyzing profile URL...", "Error: Scraper offline"]
        );
        assert_eq!(dashboard.stats().papers_count, 0);
        assert_eq!(notices.errors(), vec!["Sync failed.".to_string()]);
    }

    #[tokio::test]
    async fn test_failed_run_restarts_on_next_attempt() {
        let (gateway, _, _, sync) = setup();
        gateway
            .drop_connection(Method::Get, "/users/getAuthorID")
            .ok(Method::Get, "/users/getAuthorID", json!({ "authorId": "Z9" }))
            .ok(Method::Get, "/users/authorProfile", json!({ "paperCount": 2 }));

        let err = sync.run("https://scholar.google.com/a").await.unwrap_err();
        assert_eq!(err.user_message("Unknown error"), "Unknown error");
        let first_run = sync.snapshot().unwrap().run_id;

        let result = sync.run("https://scholar.google.com/a").await.unwrap();
        assert_eq!(result.paper_count, 2);
        assert_ne!(sync.snapshot().unwrap().run_id, first_run);
    }
}
