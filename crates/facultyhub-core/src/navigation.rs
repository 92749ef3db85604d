//! Navigation seam used by the session store and route guard.

use std::sync::{Mutex, PoisonError};

/// Performs navigation on behalf of the session layer.
///
/// A hard navigation discards all in-memory view state (a full reload in a
/// browser, a fresh screen in a terminal front-end).
pub trait Navigator: Send + Sync {
    fn hard_navigate(&self, location: &str);
}

/// Navigator that only logs.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingNavigator;

impl Navigator for LoggingNavigator {
    fn hard_navigate(&self, location: &str) {
        tracing::debug!(location, "hard navigation requested");
    }
}

/// Navigator that remembers every requested location.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    visits: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visits(&self) -> Vec<String> {
        self.visits
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn last(&self) -> Option<String> {
        self.visits().pop()
    }
}

impl Navigator for RecordingNavigator {
    fn hard_navigate(&self, location: &str) {
        self.visits
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(location.to_string());
    }
}
