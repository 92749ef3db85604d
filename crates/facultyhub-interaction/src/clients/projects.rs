use crate::gateway::{ApiRequest, FormPart, HttpGateway};
use facultyhub_core::Result;
use facultyhub_core::model::{Attachment, Project, ProjectNote};
use facultyhub_core::workflow::FileUpload;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

/// Editable fields of a project, as sent on create and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPayload {
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    pub status: String,
    #[serde(serialize_with = "super::comma_joined")]
    pub team_members: Vec<String>,
}

impl Default for ProjectPayload {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            start_date: None,
            end_date: None,
            status: "Not Started".to_string(),
            team_members: Vec::new(),
        }
    }
}

/// Research projects with their members, attachments and notes.
#[derive(Clone)]
pub struct ProjectClient {
    gateway: Arc<dyn HttpGateway>,
}

impl ProjectClient {
    pub fn new(gateway: Arc<dyn HttpGateway>) -> Self {
        Self { gateway }
    }

    pub async fn list(&self) -> Result<Vec<Project>> {
        self.gateway
            .send(ApiRequest::get("/projects/getUserProjects"))
            .await?
            .data_or_default("GET /projects/getUserProjects")
    }

    pub async fn get(&self, project_id: &str) -> Result<Project> {
        self.gateway
            .send(ApiRequest::get(format!("/projects/getProjectById/{project_id}")))
            .await?
            .data("GET /projects/getProjectById/{id}")
    }

    pub async fn create(&self, payload: &ProjectPayload) -> Result<Project> {
        self.gateway
            .send(ApiRequest::post("/projects/uploadProject").json(payload)?)
            .await?
            .data("POST /projects/uploadProject")
    }

    pub async fn update(&self, project_id: &str, payload: &ProjectPayload) -> Result<Project> {
        let request = ApiRequest::put(format!("/projects/updateProject/{project_id}")).json(payload)?;
        self.gateway
            .send(request)
            .await?
            .data("PUT /projects/updateProject/{id}")
    }

    pub async fn delete(&self, project_id: &str) -> Result<()> {
        self.gateway
            .send(ApiRequest::delete(format!("/projects/deleteProject/{project_id}")))
            .await?;
        Ok(())
    }

    /// Returns the project with the member added.
    pub async fn add_member(&self, project_id: &str, email: &str) -> Result<Project> {
        let request = ApiRequest::patch(format!("/projects/addMember/{project_id}"))
            .json_value(json!({ "memberEmail": email }));
        self.gateway
            .send(request)
            .await?
            .data("PATCH /projects/addMember/{id}")
    }

    pub async fn attachments(&self, project_id: &str) -> Result<Vec<Attachment>> {
        self.gateway
            .send(ApiRequest::get(format!("/projects/getAllAttachments/{project_id}")))
            .await?
            .data_or_default("GET /projects/getAllAttachments/{id}")
    }

    pub async fn add_attachment(
        &self,
        project_id: &str,
        name: &str,
        file: FileUpload,
    ) -> Result<Attachment> {
        let request = ApiRequest::post(format!("/projects/addAttachment/{project_id}")).multipart(vec![
            FormPart::text("name", name),
            FormPart::file("attachment", file),
        ]);
        self.gateway
            .send(request)
            .await?
            .data("POST /projects/addAttachment/{id}")
    }

    pub async fn notes(&self, project_id: &str) -> Result<Vec<ProjectNote>> {
        self.gateway
            .send(ApiRequest::get(format!("/projects/getAllNotes/{project_id}")))
            .await?
            .data_or_default("GET /projects/getAllNotes/{id}")
    }

    pub async fn add_note(&self, project_id: &str, note: &str) -> Result<ProjectNote> {
        let request = ApiRequest::post(format!("/projects/addNoteToProject/{project_id}"))
            .json_value(json!({ "notes": note }));
        self.gateway
            .send(request)
            .await?
            .data("POST /projects/addNoteToProject/{id}")
    }
}
