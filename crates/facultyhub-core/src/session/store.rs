use super::model::Session;
use super::repository::IdentityRepository;
use crate::error::Result;
use crate::model::User;
use crate::navigation::Navigator;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::watch;

/// Backend endpoint that ends the server-side session.
#[async_trait]
pub trait SessionTerminator: Send + Sync {
    async fn terminate(&self) -> Result<()>;
}

/// Single authority on "is someone logged in, and who".
///
/// `SessionStore` is responsible for:
/// - Restoring persisted identity at startup
/// - Recording identity after a successful login or profile update
/// - Clearing identity on logout or forced expiry
/// - Publishing every change to subscribers (route guards, views)
///
/// Views never write identity directly; they go through these operations.
pub struct SessionStore {
    /// Current session, doubling as the change feed for subscribers.
    state: watch::Sender<Session>,
    /// Durable storage for the serialized identity
    repository: Arc<dyn IdentityRepository>,
    /// Backend logout endpoint, informed opportunistically
    terminator: Arc<dyn SessionTerminator>,
    navigator: Arc<dyn Navigator>,
    login_path: String,
}

impl SessionStore {
    /// Creates a store in the unresolved (`loading`) state.
    ///
    /// Call [`initialize`](Self::initialize) before relying on identity.
    pub fn new(
        repository: Arc<dyn IdentityRepository>,
        terminator: Arc<dyn SessionTerminator>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let (state, _) = watch::channel(Session::unresolved());
        Self {
            state,
            repository,
            terminator,
            navigator,
            login_path: "/login".to_string(),
        }
    }

    pub fn with_login_path(mut self, login_path: impl Into<String>) -> Self {
        self.login_path = login_path.into();
        self
    }

    /// Reads persisted identity and marks the session resolved.
    ///
    /// Never fails: missing data is a normal empty state and unreadable
    /// data is logged and treated the same way.
    pub fn initialize(&self) {
        let identity = match self.repository.load() {
            Ok(identity) => identity,
            Err(e) => {
                tracing::warn!(error = %e, "Persisted identity unreadable, starting logged out");
                None
            }
        };
        tracing::debug!(restored = identity.is_some(), "Session initialized");
        self.state.send_replace(Session::resolved(identity));
    }

    /// Records a freshly authenticated identity in memory and durable storage.
    ///
    /// Makes no network call. The in-memory session is updated even when
    /// persisting fails; the storage error is returned to the caller.
    pub fn login(&self, identity: User) -> Result<()> {
        tracing::info!(email = %identity.email, "Session established");
        let persisted = self.repository.save(&identity);
        self.state.send_replace(Session::resolved(Some(identity)));
        persisted
    }

    /// Ends the session.
    ///
    /// The backend is told first, but its failure is only logged: local
    /// state is cleared and the hard navigation to the login entry point
    /// happens regardless.
    pub async fn logout(&self) {
        if let Err(e) = self.terminator.terminate().await {
            tracing::warn!(error = %e, "Logout request failed, clearing local session anyway");
        }
        self.clear_local();
        self.navigator.hard_navigate(&self.login_path);
    }

    /// Drops the session without contacting the backend, e.g. after the
    /// backend rejected our credentials.
    pub fn expire(&self) {
        tracing::info!("Session expired");
        self.clear_local();
        self.navigator.hard_navigate(&self.login_path);
    }

    /// Returns the store to its pre-`initialize` state. Storage is untouched.
    pub fn teardown(&self) {
        self.state.send_replace(Session::unresolved());
    }

    fn clear_local(&self) {
        self.state.send_replace(Session::resolved(None));
        if let Err(e) = self.repository.clear() {
            tracing::warn!(error = %e, "Failed to clear persisted identity");
        }
    }

    pub fn current_user(&self) -> Option<User> {
        self.state.borrow().identity.clone()
    }

    pub fn snapshot(&self) -> Session {
        self.state.borrow().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    pub fn is_authenticated(&self) -> bool {
        let session = self.state.borrow();
        !session.loading && session.authenticated
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    /// Subscribes to session changes.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use crate::navigation::RecordingNavigator;
    use crate::session::InMemoryIdentityRepository;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingTerminator {
        calls: AtomicUsize,
        fail: bool,
    }

    impl CountingTerminator {
        fn new(fail: bool) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail,
            }
        }
    }

    #[async_trait]
    impl SessionTerminator for CountingTerminator {
        async fn terminate(&self) -> Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(ClientError::transport("connection refused"))
            } else {
                Ok(())
            }
        }
    }

    struct BrokenRepository;

    impl IdentityRepository for BrokenRepository {
        fn load(&self) -> Result<Option<User>> {
            Err(ClientError::storage("corrupt identity file"))
        }
        fn save(&self, _identity: &User) -> Result<()> {
            Err(ClientError::storage("read-only"))
        }
        fn clear(&self) -> Result<()> {
            Err(ClientError::storage("read-only"))
        }
    }

    fn store_with(
        repository: Arc<dyn IdentityRepository>,
        fail_logout: bool,
    ) -> (SessionStore, Arc<CountingTerminator>, Arc<RecordingNavigator>) {
        let terminator = Arc::new(CountingTerminator::new(fail_logout));
        let navigator = Arc::new(RecordingNavigator::new());
        let store = SessionStore::new(repository, terminator.clone(), navigator.clone());
        (store, terminator, navigator)
    }

    #[test]
    fn test_starts_loading_until_initialized() {
        let (store, _, _) = store_with(Arc::new(InMemoryIdentityRepository::new()), false);
        assert!(store.is_loading());
        assert!(!store.is_authenticated());

        store.initialize();
        assert!(!store.is_loading());
        assert!(store.current_user().is_none());
    }

    #[test]
    fn test_initialize_restores_persisted_identity() {
        let repo = Arc::new(InMemoryIdentityRepository::with_identity(User::new(
            "Asha Rao",
            "asha@iiitnr.edu.in",
        )));
        let (store, _, _) = store_with(repo, false);

        store.initialize();
        assert!(store.is_authenticated());
        assert_eq!(store.current_user().unwrap().full_name, "Asha Rao");
    }

    #[test]
    fn test_initialize_never_fails_on_broken_storage() {
        let (store, _, _) = store_with(Arc::new(BrokenRepository), false);
        store.initialize();
        assert!(!store.is_loading());
        assert!(store.current_user().is_none());
    }

    #[test]
    fn test_login_persists_identity() {
        let repo = Arc::new(InMemoryIdentityRepository::new());
        let (store, _, _) = store_with(repo.clone(), false);
        store.initialize();

        store.login(User::new("Asha Rao", "asha@iiitnr.edu.in")).unwrap();

        assert!(store.is_authenticated());
        assert_eq!(repo.load().unwrap().unwrap().email, "asha@iiitnr.edu.in");
    }

    #[test]
    fn test_login_keeps_memory_when_storage_fails() {
        let (store, _, _) = store_with(Arc::new(BrokenRepository), false);
        store.initialize();

        let result = store.login(User::new("Asha Rao", "asha@iiitnr.edu.in"));
        assert!(result.is_err());
        assert!(store.is_authenticated());
    }

    #[tokio::test]
    async fn test_logout_clears_identity_even_if_network_fails() {
        let repo = Arc::new(InMemoryIdentityRepository::with_identity(User::new(
            "Asha Rao",
            "asha@iiitnr.edu.in",
        )));
        let (store, terminator, navigator) = store_with(repo.clone(), true);
        store.initialize();
        assert!(store.is_authenticated());

        store.logout().await;

        assert_eq!(terminator.calls.load(Ordering::SeqCst), 1);
        assert!(store.current_user().is_none());
        assert!(repo.load().unwrap().is_none());
        assert_eq!(navigator.visits(), vec!["/login".to_string()]);
    }

    #[test]
    fn test_expire_skips_backend() {
        let repo = Arc::new(InMemoryIdentityRepository::with_identity(User::new("A", "a@x")));
        let (store, terminator, navigator) = store_with(repo, false);
        let store = store.with_login_path("/signin");
        store.initialize();

        store.expire();

        assert_eq!(terminator.calls.load(Ordering::SeqCst), 0);
        assert!(!store.is_authenticated());
        assert_eq!(navigator.last().as_deref(), Some("/signin"));
    }

    #[test]
    fn test_teardown_returns_to_loading() {
        let repo = Arc::new(InMemoryIdentityRepository::with_identity(User::new("A", "a@x")));
        let (store, _, _) = store_with(repo.clone(), false);
        store.initialize();

        store.teardown();
        assert!(store.is_loading());
        assert!(repo.load().unwrap().is_some());
    }

    #[tokio::test]
    async fn test_subscribers_see_changes() {
        let (store, _, _) = store_with(Arc::new(InMemoryIdentityRepository::new()), false);
        let mut rx = store.subscribe();
        assert!(rx.borrow().loading);

        store.initialize();
        rx.changed().await.unwrap();
        assert!(!rx.borrow().loading);
    }
}
