//! Personal dashboard.

use facultyhub_core::Result;
use facultyhub_core::model::{DashboardStats, ScholarSyncResult};
use facultyhub_core::notice::Notifier;
use facultyhub_core::optimistic::ViewState;
use facultyhub_interaction::clients::DashboardClient;
use std::sync::Arc;

/// Dashboard statistics as currently displayed. Clones share state.
#[derive(Clone)]
pub struct DashboardView {
    client: DashboardClient,
    notifier: Arc<dyn Notifier>,
    stats: ViewState<DashboardStats>,
}

impl DashboardView {
    pub fn new(client: DashboardClient, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            client,
            notifier,
            stats: ViewState::new(DashboardStats::default()),
        }
    }

    pub fn stats(&self) -> DashboardStats {
        self.stats.get()
    }

    /// Reloads the statistics. The displayed ones are kept on failure.
    pub async fn refresh(&self) -> Result<DashboardStats> {
        match self.client.stats().await {
            Ok(stats) => {
                self.stats.set(stats.clone());
                Ok(stats)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Dashboard refresh failed");
                self.notifier.error(&e.user_message("Failed to load dashboard"));
                Err(e)
            }
        }
    }

    /// Folds a completed scholar sync into the displayed statistics.
    pub fn apply_sync(&self, result: ScholarSyncResult) {
        self.stats.update(|stats| stats.merge_sync(result));
    }
}
