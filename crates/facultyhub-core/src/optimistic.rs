//! Optimistic updates of locally held view state.
//!
//! The local state changes before the server is asked. If the server
//! refuses and nothing else touched the view meanwhile, the exact
//! pre-mutation snapshot is put back; otherwise only the mutation itself
//! is undone, against whatever the view holds now. Either way one error
//! notice is raised.

use crate::error::Result;
use crate::notice::Notifier;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct Versioned<T> {
    value: T,
    version: u64,
}

/// Shared, cloneable handle to a piece of view state.
///
/// Every write bumps a version counter, so a pending operation can tell
/// whether the state it changed is still the state on screen.
#[derive(Debug, Default)]
pub struct ViewState<T> {
    inner: Arc<Mutex<Versioned<T>>>,
}

impl<T> Clone for ViewState<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Clone> ViewState<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Versioned { value, version: 0 })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Versioned<T>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get(&self) -> T {
        self.lock().value.clone()
    }

    pub fn version(&self) -> u64 {
        self.lock().version
    }

    pub fn set(&self, value: T) {
        let mut state = self.lock();
        state.value = value;
        state.version += 1;
    }

    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let mut state = self.lock();
        state.version += 1;
        f(&mut state.value)
    }

    /// Replaces the value only if no write happened since `version`.
    /// Returns whether the value was replaced.
    pub fn restore_if_unchanged(&self, version: u64, value: T) -> bool {
        let mut state = self.lock();
        if state.version != version {
            return false;
        }
        state.value = value;
        state.version += 1;
        true
    }
}

/// Applies `mutate` to `view` at once, then awaits `call`.
///
/// `mutate` returns whatever `revert` needs to undo it. On failure the
/// snapshot taken before `mutate` is restored if the view is untouched
/// since; if the view moved on (another write, another item opened),
/// `revert` runs against the current state instead and is expected to
/// leave unrelated state alone. `failure_message` is reported through
/// `notifier` exactly once and the error is returned.
pub async fn apply_optimistic<T, U, R, Fut>(
    view: &ViewState<T>,
    mutate: impl FnOnce(&mut T) -> U,
    revert: impl FnOnce(&mut T, U),
    call: Fut,
    notifier: &dyn Notifier,
    failure_message: &str,
) -> Result<R>
where
    T: Clone,
    Fut: Future<Output = Result<R>>,
{
    let (snapshot, undo, version) = {
        let mut state = view.lock();
        let snapshot = state.value.clone();
        let undo = mutate(&mut state.value);
        state.version += 1;
        (snapshot, undo, state.version)
    };

    match call.await {
        Ok(value) => Ok(value),
        Err(e) => {
            if view.restore_if_unchanged(version, snapshot) {
                tracing::warn!(error = %e, "Optimistic update rejected, restored previous state");
            } else {
                tracing::warn!(error = %e, "Optimistic update rejected after the view changed, undoing it in place");
                view.update(|state| revert(state, undo));
            }
            notifier.error(failure_message);
            Err(e)
        }
    }
}
