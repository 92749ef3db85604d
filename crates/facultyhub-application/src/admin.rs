//! Administrator views: portal-wide analytics and the faculty directory.

use facultyhub_core::analytics::{total_citations, yearly_counts};
use facultyhub_core::model::{
    AdminDashboardStats, FacultyDetail, FacultySummary, Paper, RangeAnalytics,
};
use facultyhub_core::notice::Notifier;
use facultyhub_core::optimistic::ViewState;
use facultyhub_core::{ClientError, Result};
use facultyhub_interaction::clients::AdminClient;
use std::collections::BTreeMap;
use std::sync::Arc;

/// A faculty member's record prepared for display.
#[derive(Debug, Clone, PartialEq)]
pub struct FacultyProfile {
    pub detail: FacultyDetail,
    /// Journal, conference and book-chapter papers, newest first.
    pub papers: Vec<Paper>,
    /// Publications per year, ascending.
    pub timeline: BTreeMap<i32, usize>,
    pub citations: u64,
}

impl From<FacultyDetail> for FacultyProfile {
    fn from(detail: FacultyDetail) -> Self {
        let papers = detail.papers();
        Self {
            timeline: yearly_counts(&papers),
            citations: total_citations(&papers),
            papers,
            detail,
        }
    }
}

#[derive(Clone)]
pub struct AdminView {
    client: AdminClient,
    notifier: Arc<dyn Notifier>,
    stats: ViewState<AdminDashboardStats>,
    faculty: ViewState<Vec<FacultySummary>>,
}

impl AdminView {
    pub fn new(client: AdminClient, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            client,
            notifier,
            stats: ViewState::new(AdminDashboardStats::default()),
            faculty: ViewState::new(Vec::new()),
        }
    }

    pub fn stats(&self) -> AdminDashboardStats {
        self.stats.get()
    }

    pub fn faculty(&self) -> Vec<FacultySummary> {
        self.faculty.get()
    }

    /// Loads the dashboard and the directory together.
    pub async fn load(&self) -> Result<()> {
        let loaded = tokio::try_join!(self.client.dashboard(), self.client.faculty());
        match loaded {
            Ok((stats, faculty)) => {
                self.stats.set(stats);
                self.faculty.set(faculty);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Loading admin data failed");
                self.notifier.error("Failed to load admin data");
                Err(e)
            }
        }
    }

    /// Directory entries whose name, email or department contain `query`,
    /// ignoring case.
    pub fn search(&self, query: &str) -> Vec<FacultySummary> {
        let needle = query.trim().to_lowercase();
        self.faculty
            .get()
            .into_iter()
            .filter(|f| {
                needle.is_empty()
                    || f.full_name.to_lowercase().contains(&needle)
                    || f.email.to_lowercase().contains(&needle)
                    || f.department
                        .as_deref()
                        .is_some_and(|d| d.to_lowercase().contains(&needle))
            })
            .collect()
    }

    pub async fn range(&self, from: &str, to: &str) -> Result<RangeAnalytics> {
        let (from, to) = (from.trim(), to.trim());
        if from.is_empty() || to.is_empty() {
            self.notifier.error("Enter both years");
            return Err(ClientError::validation("Enter both years"));
        }
        match self.client.range_analytics(from, to).await {
            Ok(range) => {
                self.notifier.success("Analysis complete");
                Ok(range)
            }
            Err(e) => {
                tracing::warn!(from, to, error = %e, "Range analytics failed");
                self.notifier.error(&e.user_message("Analysis failed"));
                Err(e)
            }
        }
    }

    pub async fn faculty_detail(&self, user_id: &str) -> Result<FacultyProfile> {
        match self.client.faculty_detail(user_id).await {
            Ok(detail) => Ok(detail.into()),
            Err(e) => {
                tracing::warn!(user_id, error = %e, "Loading faculty detail failed");
                self.notifier.error("Failed to fetch user details");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use facultyhub_core::notice::NoticeLog;
    use facultyhub_interaction::Method;
    use facultyhub_interaction::testing::ScriptedGateway;
    use serde_json::json;

    fn setup() -> (Arc<ScriptedGateway>, Arc<NoticeLog>, AdminView) {
        let gateway = Arc::new(ScriptedGateway::new());
        let notices = Arc::new(NoticeLog::new());
        let view = AdminView::new(AdminClient::new(gateway.clone()), notices.clone());
        (gateway, notices, view)
    }

    #[tokio::test]
    async fn test_range_requires_both_years() {
        let (gateway, notices, view) = setup();

        assert!(view.range("2019", " ").await.unwrap_err().is_validation());

        assert_eq!(gateway.request_count(), 0);
        assert_eq!(notices.errors(), vec!["Enter both years".to_string()]);
    }

    #[tokio::test]
    async fn test_faculty_detail_merges_and_counts() {
        let (gateway, _, view) = setup();
        gateway.ok(
            Method::Get,
            "/admin/user/u1",
            json!({
                "journalPapers": [{ "_id": "j1", "publishedDate": "2020-03-01", "citedBy": 4 }],
                "conferencePapers": [{ "_id": "c1", "publishedDate": "2022-05-01", "citedBy": 1 }],
                "bookChapterPapers": [{ "_id": "b1", "publishedDate": "2020-12-01" }]
            }),
        );

        let profile = view.faculty_detail("u1").await.unwrap();

        let ids: Vec<_> = profile.papers.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["c1", "b1", "j1"]);
        assert_eq!(profile.timeline, BTreeMap::from([(2020, 2), (2022, 1)]));
        assert_eq!(profile.citations, 5);
    }

    #[tokio::test]
    async fn test_load_failure_keeps_directory_empty() {
        let (gateway, notices, view) = setup();
        gateway
            .ok(Method::Get, "/admin/dashboard", json!({ "totalUsers": 3 }))
            .fail(Method::Get, "/admin/getAllUsers", 403, "Admins only");

        assert!(view.load().await.is_err());

        assert!(view.faculty().is_empty());
        assert_eq!(view.stats().total_users, 0);
        assert_eq!(notices.errors(), vec!["Failed to load admin data".to_string()]);
    }

    #[tokio::test]
    async fn test_search_matches_name_email_and_department() {
        let (gateway, _, view) = setup();
        gateway
            .ok(Method::Get, "/admin/dashboard", json!({}))
            .ok(
                Method::Get,
                "/admin/getAllUsers",
                json!([
                    { "_id": "u1", "fullName": "Asha Rao", "email": "asha@x", "department": "CSE" },
                    { "_id": "u2", "fullName": "Vikram Sen", "email": "vik@x", "department": "ECE" }
                ]),
            );
        view.load().await.unwrap();

        assert_eq!(view.search("ece").len(), 1);
        assert_eq!(view.search("ASHA")[0].id, "u1");
        assert_eq!(view.search("").len(), 2);
    }
}
