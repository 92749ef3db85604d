//! Research projects: list, detail, create-or-edit form, members,
//! attachments and notes.

use crate::reconcile::{SaveKind, reconcile, refresh_selected, remove_by_id};
use facultyhub_core::model::{Attachment, Project, ProjectNote, join_list, split_list};
use facultyhub_core::notice::Notifier;
use facultyhub_core::optimistic::ViewState;
use facultyhub_core::workflow::FileUpload;
use facultyhub_core::{ClientError, Result};
use facultyhub_interaction::clients::{ProjectClient, ProjectPayload};
use std::sync::Arc;

/// Create-or-edit form for a project.
///
/// Team members are edited as one comma-separated string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectForm {
    editing: Option<String>,
    pub name: String,
    pub description: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub status: String,
    pub team_members: String,
}

impl Default for ProjectForm {
    fn default() -> Self {
        let payload = ProjectPayload::default();
        Self {
            editing: None,
            name: payload.name,
            description: payload.description,
            start_date: None,
            end_date: None,
            status: payload.status,
            team_members: String::new(),
        }
    }
}

impl ProjectForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// A form prefilled from `project` that saves as an update.
    pub fn edit(project: &Project) -> Self {
        Self {
            editing: Some(project.id.clone()),
            name: project.name.clone(),
            description: project.description.clone(),
            start_date: project.start_date.clone(),
            end_date: project.end_date.clone(),
            status: project.status.clone(),
            team_members: join_list(&project.team_members),
        }
    }

    pub fn editing(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    pub fn payload(&self) -> ProjectPayload {
        ProjectPayload {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            start_date: self.start_date.clone().filter(|d| !d.trim().is_empty()),
            end_date: self.end_date.clone().filter(|d| !d.trim().is_empty()),
            status: if self.status.trim().is_empty() {
                ProjectPayload::default().status
            } else {
                self.status.clone()
            },
            team_members: split_list(&self.team_members),
        }
    }
}

#[derive(Clone)]
pub struct ProjectsView {
    client: ProjectClient,
    notifier: Arc<dyn Notifier>,
    projects: ViewState<Vec<Project>>,
    selected: ViewState<Option<Project>>,
    attachments: ViewState<Vec<Attachment>>,
    notes: ViewState<Vec<ProjectNote>>,
}

impl ProjectsView {
    pub fn new(client: ProjectClient, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            client,
            notifier,
            projects: ViewState::new(Vec::new()),
            selected: ViewState::new(None),
            attachments: ViewState::new(Vec::new()),
            notes: ViewState::new(Vec::new()),
        }
    }

    pub fn projects(&self) -> Vec<Project> {
        self.projects.get()
    }

    pub fn selected(&self) -> Option<Project> {
        self.selected.get()
    }

    pub fn attachments(&self) -> Vec<Attachment> {
        self.attachments.get()
    }

    pub fn notes(&self) -> Vec<ProjectNote> {
        self.notes.get()
    }

    pub async fn load(&self) -> Result<Vec<Project>> {
        match self.client.list().await {
            Ok(projects) => {
                self.projects.set(projects.clone());
                Ok(projects)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Loading projects failed");
                self.notifier.error(&e.user_message("Failed to load projects"));
                Err(e)
            }
        }
    }

    /// Opens the detail of a project. Attachments and notes are loaded
    /// separately.
    pub async fn open(&self, project_id: &str) -> Result<Project> {
        match self.client.get(project_id).await {
            Ok(project) => {
                self.selected.set(Some(project.clone()));
                self.attachments.set(Vec::new());
                self.notes.set(Vec::new());
                Ok(project)
            }
            Err(e) => {
                tracing::warn!(project_id, error = %e, "Loading project failed");
                self.notifier.error("Failed to load project");
                Err(e)
            }
        }
    }

    /// Creates or updates, depending on how the form was opened.
    pub async fn save(&self, form: &ProjectForm) -> Result<Project> {
        let payload = form.payload();
        if payload.name.is_empty() {
            self.notifier.error("Enter a project name");
            return Err(ClientError::validation("Enter a project name"));
        }

        let (saved, kind) = match form.editing() {
            Some(id) => (self.client.update(id, &payload).await, SaveKind::Updated),
            None => (self.client.create(&payload).await, SaveKind::Created),
        };

        match saved {
            Ok(project) => {
                self.projects
                    .update(|projects| reconcile(projects, project.clone(), kind));
                self.selected
                    .update(|selected| refresh_selected(selected, &project));
                self.notifier.success(match kind {
                    SaveKind::Created => "Project Created!",
                    SaveKind::Updated => "Project Updated!",
                });
                Ok(project)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Saving project failed");
                self.notifier.error(&e.user_message("Failed"));
                Err(e)
            }
        }
    }

    pub async fn delete(&self, project_id: &str) -> Result<()> {
        match self.client.delete(project_id).await {
            Ok(()) => {
                self.projects.update(|projects| remove_by_id(projects, project_id));
                self.selected.update(|selected| {
                    if selected.as_ref().is_some_and(|p| p.id == project_id) {
                        *selected = None;
                    }
                });
                self.notifier.success("Project deleted");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(project_id, error = %e, "Deleting project failed");
                self.notifier.error("Failed to delete");
                Err(e)
            }
        }
    }

    pub async fn add_member(&self, project_id: &str, email: &str) -> Result<Project> {
        if email.trim().is_empty() {
            self.notifier.error("Enter an email");
            return Err(ClientError::validation("Enter an email"));
        }
        match self.client.add_member(project_id, email.trim()).await {
            Ok(project) => {
                self.projects
                    .update(|projects| reconcile(projects, project.clone(), SaveKind::Updated));
                self.selected
                    .update(|selected| refresh_selected(selected, &project));
                self.notifier.success("Member added");
                Ok(project)
            }
            Err(e) => {
                tracing::warn!(project_id, error = %e, "Adding member failed");
                self.notifier.error(&e.user_message("Failed to add member"));
                Err(e)
            }
        }
    }

    pub async fn load_attachments(&self, project_id: &str) -> Result<Vec<Attachment>> {
        let attachments = self.client.attachments(project_id).await.inspect_err(|e| {
            tracing::warn!(project_id, error = %e, "Loading attachments failed");
        })?;
        self.attachments.set(attachments.clone());
        Ok(attachments)
    }

    /// Uploads a named file. Both the name and the file are required.
    pub async fn upload_attachment(
        &self,
        project_id: &str,
        name: &str,
        file: Option<FileUpload>,
    ) -> Result<Attachment> {
        let file = match file {
            Some(file) if !name.trim().is_empty() => file,
            _ => {
                self.notifier.error("Name and File required");
                return Err(ClientError::validation("Name and File required"));
            }
        };
        match self.client.add_attachment(project_id, name.trim(), file).await {
            Ok(attachment) => {
                self.attachments
                    .update(|attachments| attachments.push(attachment.clone()));
                self.notifier.success("File uploaded");
                Ok(attachment)
            }
            Err(e) => {
                tracing::warn!(project_id, error = %e, "Attachment upload failed");
                self.notifier.error("Upload failed");
                Err(e)
            }
        }
    }

    pub async fn load_notes(&self, project_id: &str) -> Result<Vec<ProjectNote>> {
        let notes = self.client.notes(project_id).await.inspect_err(|e| {
            tracing::warn!(project_id, error = %e, "Loading notes failed");
        })?;
        self.notes.set(notes.clone());
        Ok(notes)
    }

    pub async fn add_note(&self, project_id: &str, text: &str) -> Result<ProjectNote> {
        if text.trim().is_empty() {
            return Err(ClientError::validation("Note is empty"));
        }
        match self.client.add_note(project_id, text.trim()).await {
            Ok(note) => {
                self.notes.update(|notes| notes.push(note.clone()));
                self.notifier.success("Note added");
                Ok(note)
            }
            Err(e) => {
                tracing::warn!(project_id, error = %e, "Adding note failed");
                self.notifier.error("Failed to add note");
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

    fn setup() -> (Arc<ScriptedGateway>, Arc<NoticeLog>, ProjectsView) {
        let gateway = Arc::new(ScriptedGateway::new());
        let notices = Arc::new(NoticeLog::new());
        let view = ProjectsView::new(ProjectClient::new(gateway.clone()), notices.clone());
        (gateway, notices, view)
    }

    #[test]
    fn test_form_round_trips_members_string() {
        let project: Project = serde_json::from_value(json!({
            "_id": "pr1", "name": "Edge AI", "teamMembers": ["a@x", "b@x"]
        }))
        .unwrap();

        let mut form = ProjectForm::edit(&project);
        assert_eq!(form.editing(), Some("pr1"));
        assert_eq!(form.team_members, "a@x, b@x");

        form.team_members = "a@x, , c@x ".to_string();
        form.status = String::new();
        let payload = form.payload();
        assert_eq!(payload.team_members, vec!["a@x", "c@x"]);
        assert_eq!(payload.status, "Not Started");
    }

    #[tokio::test]
    async fn test_edit_replaces_in_place_and_refreshes_detail() {
        let (gateway, notices, view) = setup();
        gateway
            .ok(
                Method::Get,
                "/projects/getUserProjects",
                json!([{ "_id": "pr1", "name": "One" }, { "_id": "pr2", "name": "Two" }]),
            )
            .ok(Method::Get, "/projects/getProjectById/pr2", json!({ "_id": "pr2", "name": "Two" }))
            .ok(Method::Put, "/projects/updateProject/pr2", json!({ "_id": "pr2", "name": "Renamed" }));

        view.load().await.unwrap();
        let project = view.open("pr2").await.unwrap();
        let mut form = ProjectForm::edit(&project);
        form.name = "Renamed".into();
        view.save(&form).await.unwrap();

        let names: Vec<_> = view.projects().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["One", "Renamed"]);
        assert_eq!(view.selected().unwrap().name, "Renamed");
        assert_eq!(notices.successes(), vec!["Project Updated!".to_string()]);
    }

    #[tokio::test]
    async fn test_create_prepends() {
        let (gateway, _, view) = setup();
        gateway
            .ok(Method::Get, "/projects/getUserProjects", json!([{ "_id": "pr1", "name": "One" }]))
            .ok(Method::Post, "/projects/uploadProject", json!({ "_id": "pr9", "name": "New" }));
        view.load().await.unwrap();

        let form = ProjectForm {
            name: "New".into(),
            ..ProjectForm::new()
        };
        view.save(&form).await.unwrap();

        assert_eq!(view.projects()[0].id, "pr9");
        assert!(view.selected().is_none());
    }

    #[tokio::test]
    async fn test_delete_clears_selected_project() {
        let (gateway, _, view) = setup();
        gateway
            .ok(Method::Get, "/projects/getProjectById/pr1", json!({ "_id": "pr1", "name": "One" }))
            .ok(Method::Delete, "/projects/deleteProject/pr1", json!(null));

        view.open("pr1").await.unwrap();
        view.delete("pr1").await.unwrap();

        assert!(view.selected().is_none());
    }

    #[tokio::test]
    async fn test_attachment_requires_name_and_file() {
        let (gateway, notices, view) = setup();

        let err = view.upload_attachment("pr1", "Slides", None).await.unwrap_err();
        assert!(err.is_validation());
        let file = FileUpload::new("deck.pdf", b"%PDF".to_vec());
        assert!(view.upload_attachment("pr1", " ", Some(file)).await.is_err());

        assert_eq!(gateway.request_count(), 0);
        assert_eq!(notices.errors().len(), 2);
        assert!(notices.errors().iter().all(|m| m == "Name and File required"));
    }

    #[tokio::test]
    async fn test_notes_accept_content_field() {
        let (gateway, _, view) = setup();
        gateway
            .ok(
                Method::Get,
                "/projects/getAllNotes/pr1",
                json!([{ "_id": "n1", "content": "Kickoff done" }]),
            )
            .ok(Method::Post, "/projects/addNoteToProject/pr1", json!({ "_id": "n2", "notes": "Draft" }));

        view.load_notes("pr1").await.unwrap();
        view.add_note("pr1", "Draft").await.unwrap();

        let notes: Vec<_> = view.notes().into_iter().map(|n| n.notes).collect();
        assert_eq!(notes, vec!["Kickoff done", "Draft"]);
    }
}
