//! Folding saved entities back into locally held lists.

use facultyhub_core::model::{Group, Patent, Project};

/// Entities that carry a backend id.
pub trait Identified {
    fn id(&self) -> &str;
}

impl Identified for Group {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for Project {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for Patent {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Whether a form created a new entity or edited an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveKind {
    Created,
    Updated,
}

/// Created entities go to the front; updated ones replace the entry with
/// the same id in place. An update for an id not in the list is prepended.
pub fn reconcile<T: Identified>(items: &mut Vec<T>, saved: T, kind: SaveKind) {
    if kind == SaveKind::Updated {
        if let Some(slot) = items.iter_mut().find(|item| item.id() == saved.id()) {
            *slot = saved;
            return;
        }
    }
    items.insert(0, saved);
}

/// Removes the entry with `id`. Returns whether anything was removed.
pub fn remove_by_id<T: Identified>(items: &mut Vec<T>, id: &str) -> bool {
    let before = items.len();
    items.retain(|item| item.id() != id);
    items.len() != before
}

/// Replaces `selected` with `saved` when both refer to the same entity.
pub fn refresh_selected<T: Identified>(selected: &mut Option<T>, saved: &T)
where
    T: Clone,
{
    if selected.as_ref().is_some_and(|current| current.id() == saved.id()) {
        *selected = Some(saved.clone());
    }
}
