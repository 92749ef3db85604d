use std::sync::{Arc, Mutex, PoisonError};

/// Human-readable progress notes for one workflow run.
///
/// Notes are only ever appended; they are never reordered or deduplicated.
/// Clones share the same underlying log.
#[derive(Debug, Clone, Default)]
pub struct ProgressLog {
    notes: Arc<Mutex<Vec<String>>>,
}

impl ProgressLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, note: impl Into<String>) {
        let note = note.into();
        tracing::debug!(note = %note, "workflow progress");
        self.notes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(note);
    }

    pub fn notes(&self) -> Vec<String> {
        self.notes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.notes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
