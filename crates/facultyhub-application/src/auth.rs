//! Login and logout use cases.

use facultyhub_core::model::User;
use facultyhub_core::notice::Notifier;
use facultyhub_core::session::SessionStore;
use facultyhub_core::{ClientError, Result};
use facultyhub_interaction::clients::AuthClient;
use std::sync::Arc;

/// Authenticates against the backend and records the identity in the
/// session store.
pub struct AuthUseCase {
    session: Arc<SessionStore>,
    auth: AuthClient,
    notifier: Arc<dyn Notifier>,
}

impl AuthUseCase {
    pub fn new(session: Arc<SessionStore>, auth: AuthClient, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            session,
            auth,
            notifier,
        }
    }

    /// Email/password login.
    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        if email.trim().is_empty() || password.is_empty() {
            let err = ClientError::validation("Please enter email and password.");
            self.notifier.error(&err.to_string());
            return Err(err);
        }

        match self.auth.login(email.trim(), password).await {
            Ok(user) => {
                self.establish(user.clone());
                self.notifier.success("Welcome back!");
                Ok(user)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Login failed");
                self.notifier.error(&e.user_message("Invalid credentials."));
                Err(e)
            }
        }
    }

    /// Login with a Google identity token.
    pub async fn google_login(&self, id_token: &str) -> Result<User> {
        match self.auth.google_login(id_token).await {
            Ok(user) => {
                self.establish(user.clone());
                self.notifier.success("Signed in with Google!");
                Ok(user)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Google login failed");
                self.notifier.error(&e.user_message("Google Login failed."));
                Err(e)
            }
        }
    }

    pub async fn logout(&self) {
        self.session.logout().await;
    }

    // The backend session already exists at this point; a local storage
    // failure only costs persistence across restarts.
    fn establish(&self, user: User) {
        if let Err(e) = self.session.login(user) {
            tracing::warn!(error = %e, "Identity not persisted");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use facultyhub_core::navigation::RecordingNavigator;
    use facultyhub_core::notice::NoticeLog;
    use facultyhub_core::session::InMemoryIdentityRepository;
    use facultyhub_interaction::Method;
    use facultyhub_interaction::testing::ScriptedGateway;
    use serde_json::json;

    fn setup() -> (Arc<ScriptedGateway>, Arc<SessionStore>, Arc<NoticeLog>, AuthUseCase) {
        let gateway = Arc::new(ScriptedGateway::new());
        let auth = AuthClient::new(gateway.clone());
        let session = Arc::new(SessionStore::new(
            Arc::new(InMemoryIdentityRepository::new()),
            Arc::new(auth.clone()),
            Arc::new(RecordingNavigator::new()),
        ));
        session.initialize();
        let notices = Arc::new(NoticeLog::new());
        let usecase = AuthUseCase::new(session.clone(), auth, notices.clone());
        (gateway, session, notices, usecase)
    }

    #[tokio::test]
    async fn test_blank_credentials_never_reach_network() {
        let (gateway, session, notices, usecase) = setup();

        let err = usecase.login("  ", "").await.unwrap_err();

        assert!(err.is_validation());
        assert_eq!(gateway.request_count(), 0);
        assert!(!session.is_authenticated());
        assert_eq!(notices.errors(), vec!["Please enter email and password.".to_string()]);
    }

    #[tokio::test]
    async fn test_login_establishes_session() {
        let (gateway, session, notices, usecase) = setup();
        gateway.ok(
            Method::Post,
            "/users/login",
            json!({ "user": { "fullName": "Asha Rao", "email": "asha@iiitnr.edu.in", "isAdmin": true } }),
        );

        usecase.login("asha@iiitnr.edu.in", "secret1").await.unwrap();

        assert!(session.is_authenticated());
        assert!(session.snapshot().is_admin());
        assert_eq!(notices.successes(), vec!["Welcome back!".to_string()]);
    }

    #[tokio::test]
    async fn test_failed_login_uses_fallback_without_server_message() {
        let (gateway, session, notices, usecase) = setup();
        gateway.drop_connection(Method::Post, "/users/login");

        assert!(usecase.login("a@x", "pw").await.is_err());
        assert!(!session.is_authenticated());
        assert_eq!(notices.errors(), vec!["Invalid credentials.".to_string()]);
    }
}
