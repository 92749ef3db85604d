//! Patents: list, detail, create-or-edit form and delete.

use crate::reconcile::{SaveKind, reconcile, refresh_selected, remove_by_id};
use facultyhub_core::model::{Patent, PatentStatus, join_list, split_list};
use facultyhub_core::notice::Notifier;
use facultyhub_core::optimistic::ViewState;
use facultyhub_core::workflow::FileUpload;
use facultyhub_core::{ClientError, Result};
use facultyhub_interaction::clients::{PatentClient, PatentPayload};
use std::sync::Arc;

/// Create-or-edit form for a patent.
///
/// A new patent needs its PDF document; edits go out as JSON and keep the
/// stored document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatentForm {
    editing: Option<String>,
    pub title: String,
    pub abstract_text: String,
    pub application_number: String,
    pub filed_date: Option<String>,
    pub status: PatentStatus,
    /// Comma-separated
    pub tags: String,
    pub pdf: Option<FileUpload>,
}

impl PatentForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn edit(patent: &Patent) -> Self {
        Self {
            editing: Some(patent.id.clone()),
            title: patent.title.clone(),
            abstract_text: patent.abstract_text.clone(),
            application_number: patent.application_number.clone(),
            filed_date: patent.filed_date.clone(),
            status: patent.status.clone(),
            tags: join_list(&patent.tags),
            pdf: None,
        }
    }

    pub fn editing(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    pub fn payload(&self) -> PatentPayload {
        PatentPayload {
            title: self.title.trim().to_string(),
            abstract_text: self.abstract_text.trim().to_string(),
            application_number: self.application_number.trim().to_string(),
            filed_date: self.filed_date.clone().filter(|d| !d.trim().is_empty()),
            status: self.status.clone(),
            tags: split_list(&self.tags),
        }
    }
}

#[derive(Clone)]
pub struct PatentsView {
    client: PatentClient,
    notifier: Arc<dyn Notifier>,
    patents: ViewState<Vec<Patent>>,
    selected: ViewState<Option<Patent>>,
}

impl PatentsView {
    pub fn new(client: PatentClient, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            client,
            notifier,
            patents: ViewState::new(Vec::new()),
            selected: ViewState::new(None),
        }
    }

    pub fn patents(&self) -> Vec<Patent> {
        self.patents.get()
    }

    pub fn selected(&self) -> Option<Patent> {
        self.selected.get()
    }

    pub async fn load(&self) -> Result<Vec<Patent>> {
        match self.client.list().await {
            Ok(patents) => {
                self.patents.set(patents.clone());
                Ok(patents)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Loading patents failed");
                self.notifier.error(&e.user_message("Failed to load patents"));
                Err(e)
            }
        }
    }

    pub async fn open(&self, patent_id: &str) -> Result<Patent> {
        match self.client.get(patent_id).await {
            Ok(patent) => {
                self.selected.set(Some(patent.clone()));
                Ok(patent)
            }
            Err(e) => {
                tracing::warn!(patent_id, error = %e, "Loading patent failed");
                self.notifier.error("Failed to load patent details");
                Err(e)
            }
        }
    }

    pub async fn save(&self, form: &PatentForm) -> Result<Patent> {
        let payload = form.payload();
        let saved = match (form.editing(), &form.pdf) {
            (Some(id), _) => (self.client.update(id, &payload).await, SaveKind::Updated),
            (None, Some(pdf)) => (
                self.client.create(&payload, pdf.clone()).await,
                SaveKind::Created,
            ),
            (None, None) => {
                let message = "Please upload the patent document (PDF)";
                self.notifier.error(message);
                return Err(ClientError::validation(message));
            }
        };

        match saved {
            (Ok(patent), kind) => {
                self.patents
                    .update(|patents| reconcile(patents, patent.clone(), kind));
                self.selected
                    .update(|selected| refresh_selected(selected, &patent));
                self.notifier.success(match kind {
                    SaveKind::Created => "Patent Added Successfully!",
                    SaveKind::Updated => "Patent Updated!",
                });
                Ok(patent)
            }
            (Err(e), _) => {
                tracing::warn!(error = %e, "Saving patent failed");
                self.notifier.error(&e.user_message("Operation Failed"));
                Err(e)
            }
        }
    }

    pub async fn delete(&self, patent_id: &str) -> Result<()> {
        match self.client.delete(patent_id).await {
            Ok(()) => {
                self.patents.update(|patents| remove_by_id(patents, patent_id));
                self.selected.update(|selected| {
                    if selected.as_ref().is_some_and(|p| p.id == patent_id) {
                        *selected = None;
                    }
                });
                self.notifier.success("Patent deleted");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(patent_id, error = %e, "Deleting patent failed");
                self.notifier.error("Failed to delete");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use facultyhub_core::notice::NoticeLog;
    use facultyhub_interaction::testing::ScriptedGateway;
    use facultyhub_interaction::{Method, RequestBody};
    use serde_json::json;

    fn setup() -> (Arc<ScriptedGateway>, Arc<NoticeLog>, PatentsView) {
        let gateway = Arc::new(ScriptedGateway::new());
        let notices = Arc::new(NoticeLog::new());
        let view = PatentsView::new(PatentClient::new(gateway.clone()), notices.clone());
        (gateway, notices, view)
    }

    #[tokio::test]
    async fn test_create_without_pdf_is_rejected_locally() {
        let (gateway, notices, view) = setup();
        let form = PatentForm {
            title: "Sensor".into(),
            ..PatentForm::new()
        };

        assert!(view.save(&form).await.unwrap_err().is_validation());
        assert_eq!(gateway.request_count(), 0);
        assert_eq!(
            notices.errors(),
            vec!["Please upload the patent document (PDF)".to_string()]
        );
    }

    #[tokio::test]
    async fn test_edit_sends_json_without_document() {
        let (gateway, notices, view) = setup();
        gateway
            .ok(Method::Get, "/patents/getUserPatents", json!([{ "_id": "pt1", "title": "Old" }]))
            .ok(
                Method::Put,
                "/patents/updatePatent/pt1",
                json!({ "_id": "pt1", "title": "New", "status": "Granted", "tags": ["iot"] }),
            );

        let patents = view.load().await.unwrap();
        let mut form = PatentForm::edit(&patents[0]);
        form.title = "New".into();
        form.tags = "iot".into();
        form.status = PatentStatus::Granted;
        view.save(&form).await.unwrap();

        let request = gateway.last_request().unwrap();
        assert!(matches!(request.body, RequestBody::Json(_)));
        assert_eq!(request.json_field("tags"), Some(&json!("iot")));
        assert_eq!(view.patents()[0].status, PatentStatus::Granted);
        assert_eq!(view.patents().len(), 1);
        assert_eq!(notices.successes(), vec!["Patent Updated!".to_string()]);
    }

    #[tokio::test]
    async fn test_failed_create_reports_server_message() {
        let (gateway, notices, view) = setup();
        gateway.fail(Method::Post, "/patents/uploadPatent", 400, "Duplicate application number");
        let form = PatentForm {
            title: "Sensor".into(),
            pdf: Some(FileUpload::new("sensor.pdf", b"%PDF".to_vec())),
            ..PatentForm::new()
        };

        assert!(view.save(&form).await.is_err());
        assert!(view.patents().is_empty());
        assert_eq!(
            notices.errors(),
            vec!["Duplicate application number".to_string()]
        );
    }
}
