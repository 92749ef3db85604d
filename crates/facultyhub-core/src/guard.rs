//! Route guarding based on the session store.
//!
//! A guard is mounted for one protected location. It starts in
//! [`GuardState::Checking`] and resolves exactly once, as soon as the
//! session store stops loading. There is no timeout: a store that never
//! resolves keeps the guard checking.

use crate::model::User;
use crate::session::SessionStore;
use std::sync::Arc;

/// Where an unauthenticated visitor is sent, and where they were going.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub to: String,
    /// Originally requested location, so login can return there.
    pub from: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GuardState {
    Checking,
    Authenticated(User),
    Unauthenticated(Redirect),
}

/// What a view should show for a guarded location.
#[derive(Debug, Clone, PartialEq)]
pub enum GuardView<T> {
    /// Session not resolved yet; show a placeholder.
    Pending,
    Content(T),
    Redirect(Redirect),
}

pub struct RouteGuard {
    session: Arc<SessionStore>,
    requested: String,
    state: GuardState,
}

impl RouteGuard {
    /// Mounts a guard for `requested` and evaluates it once.
    pub fn mount(session: Arc<SessionStore>, requested: impl Into<String>) -> Self {
        let mut guard = Self {
            session,
            requested: requested.into(),
            state: GuardState::Checking,
        };
        guard.poll();
        guard
    }

    pub fn state(&self) -> &GuardState {
        &self.state
    }

    /// Resolves the guard if the session has finished loading.
    ///
    /// Once resolved, the state is latched for the lifetime of this mount.
    pub fn poll(&mut self) -> &GuardState {
        if matches!(self.state, GuardState::Checking) {
            let session = self.session.snapshot();
            if !session.loading {
                self.state = match session.identity {
                    Some(user) => GuardState::Authenticated(user),
                    None => GuardState::Unauthenticated(Redirect {
                        to: self.session.login_path().to_string(),
                        from: self.requested.clone(),
                    }),
                };
                tracing::debug!(location = %self.requested, state = ?self.state, "Route guard resolved");
            }
        }
        &self.state
    }

    /// Waits for the session store to resolve, then returns the latched state.
    pub async fn resolved(&mut self) -> &GuardState {
        if matches!(self.state, GuardState::Checking) {
            let mut rx = self.session.subscribe();
            // A closed channel means the store is gone; stay checking.
            let _ = rx.wait_for(|session| !session.loading).await;
        }
        self.poll()
    }

    /// Produces the view for this guard. `protected` is only invoked once the
    /// guard has resolved to an authenticated user.
    pub fn render<T>(&self, protected: impl FnOnce(&User) -> T) -> GuardView<T> {
        match &self.state {
            GuardState::Checking => GuardView::Pending,
            GuardState::Authenticated(user) => GuardView::Content(protected(user)),
            GuardState::Unauthenticated(redirect) => GuardView::Redirect(redirect.clone()),
        }
    }
}
