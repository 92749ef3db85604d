//! Collections ("folders" of papers).

use crate::reconcile::{SaveKind, reconcile, remove_by_id};
use facultyhub_core::model::{Group, Paper};
use facultyhub_core::notice::Notifier;
use facultyhub_core::optimistic::{ViewState, apply_optimistic};
use facultyhub_core::{ClientError, Result};
use facultyhub_interaction::clients::GroupClient;
use std::sync::Arc;

/// The collection list and the currently opened collection.
#[derive(Clone)]
pub struct CollectionsView {
    client: GroupClient,
    notifier: Arc<dyn Notifier>,
    groups: ViewState<Vec<Group>>,
    selected: ViewState<Option<Group>>,
}

impl CollectionsView {
    pub fn new(client: GroupClient, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            client,
            notifier,
            groups: ViewState::new(Vec::new()),
            selected: ViewState::new(None),
        }
    }

    pub fn groups(&self) -> Vec<Group> {
        self.groups.get()
    }

    pub fn selected(&self) -> Option<Group> {
        self.selected.get()
    }

    /// Paper ids of the opened collection, in display order.
    pub fn selected_paper_ids(&self) -> Vec<String> {
        self.selected
            .get()
            .map(|g| g.papers.into_iter().map(|p| p.id).collect())
            .unwrap_or_default()
    }

    pub async fn load(&self) -> Result<Vec<Group>> {
        match self.client.list().await {
            Ok(groups) => {
                self.groups.set(groups.clone());
                Ok(groups)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Loading collections failed");
                self.notifier.error(&e.user_message("Failed to load collections"));
                Err(e)
            }
        }
    }

    /// Fetches the collection with its papers and makes it the open one.
    pub async fn open(&self, group_id: &str) -> Result<Group> {
        match self.client.get(group_id).await {
            Ok(group) => {
                self.selected.set(Some(group.clone()));
                Ok(group)
            }
            Err(e) => {
                tracing::warn!(group_id, error = %e, "Opening collection failed");
                self.notifier.error("Failed to open collection");
                Err(e)
            }
        }
    }

    pub fn close(&self) {
        self.selected.set(None);
    }

    pub async fn create(&self, name: &str, description: &str) -> Result<Group> {
        if name.trim().is_empty() {
            return Err(self.invalid("Enter a name"));
        }
        let created = self.client.create(name.trim(), description.trim()).await;
        self.finish_create(created)
    }

    /// Creates a collection filled with every paper carrying `tag`.
    pub async fn create_by_tag(&self, tag: &str) -> Result<Group> {
        if tag.trim().is_empty() {
            return Err(self.invalid("Enter a tag"));
        }
        let created = self.client.create_by_tag(tag.trim()).await;
        self.finish_create(created)
    }

    fn finish_create(&self, created: Result<Group>) -> Result<Group> {
        match created {
            Ok(group) => {
                self.groups
                    .update(|groups| reconcile(groups, group.clone(), SaveKind::Created));
                self.notifier.success("Collection Created!");
                Ok(group)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Creating collection failed");
                self.notifier.error(&e.user_message("Failed to create"));
                Err(e)
            }
        }
    }

    /// Deletes a collection; the list changes only after the server agrees.
    pub async fn delete(&self, group_id: &str) -> Result<()> {
        match self.client.delete(group_id).await {
            Ok(()) => {
                self.groups.update(|groups| remove_by_id(groups, group_id));
                self.selected.update(|selected| {
                    if selected.as_ref().is_some_and(|g| g.id == group_id) {
                        *selected = None;
                    }
                });
                self.notifier.success("Collection deleted");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(group_id, error = %e, "Deleting collection failed");
                self.notifier.error("Could not delete");
                Err(e)
            }
        }
    }

    /// Adds `paper` to a collection. An open collection with that id shows
    /// the paper once the server confirms.
    pub async fn add_paper(&self, group_id: &str, paper: Paper) -> Result<()> {
        match self.client.add_paper(group_id, &paper.id).await {
            Ok(()) => {
                self.selected.update(|selected| {
                    if let Some(group) = selected.as_mut().filter(|g| g.id == group_id) {
                        if !group.contains_paper(&paper.id) {
                            group.papers.push(paper);
                        }
                    }
                });
                self.notifier.success("Paper added");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(group_id, error = %e, "Adding paper failed");
                self.notifier.error(&e.user_message("Failed to add paper"));
                Err(e)
            }
        }
    }

    /// Removes a paper from the open collection optimistically.
    ///
    /// A rejected removal puts the paper back only while the same
    /// collection is still open; a late failure never touches another one.
    pub async fn remove_paper(&self, paper_id: &str) -> Result<()> {
        let group_id = self
            .selected
            .get()
            .map(|g| g.id)
            .ok_or_else(|| ClientError::validation("No collection is open"))?;

        apply_optimistic(
            &self.selected,
            |selected| take_paper(selected, paper_id),
            restore_paper,
            self.client.remove_paper(&group_id, paper_id),
            &*self.notifier,
            "Failed to remove paper",
        )
        .await?;

        self.notifier.success("Paper removed");
        Ok(())
    }

    fn invalid(&self, message: &str) -> ClientError {
        self.notifier.error(message);
        ClientError::validation(message)
    }
}

/// Where a removed paper sat, so a rejected removal can undo itself.
struct RemovedPaper {
    group_id: String,
    index: usize,
    paper: Paper,
}

fn take_paper(selected: &mut Option<Group>, paper_id: &str) -> Option<RemovedPaper> {
    let group = selected.as_mut()?;
    let index = group.papers.iter().position(|p| p.id == paper_id)?;
    Some(RemovedPaper {
        group_id: group.id.clone(),
        index,
        paper: group.papers.remove(index),
    })
}

fn restore_paper(selected: &mut Option<Group>, removed: Option<RemovedPaper>) {
    let Some(removed) = removed else { return };
    match selected.as_mut() {
        Some(group) if group.id == removed.group_id && !group.contains_paper(&removed.paper.id) => {
            let index = removed.index.min(group.papers.len());
            group.papers.insert(index, removed.paper);
        }
        _ => tracing::debug!(group_id = %removed.group_id, "Collection no longer open, dropping rollback"),
    }
}
