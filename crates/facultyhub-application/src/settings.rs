//! Account settings of the logged-in user.
//!
//! Every operation that returns a fresh identity writes it back through
//! the session store, so the session never shows stale profile data.

use facultyhub_core::model::User;
use facultyhub_core::notice::Notifier;
use facultyhub_core::session::SessionStore;
use facultyhub_core::workflow::FileUpload;
use facultyhub_core::{ClientError, Result};
use facultyhub_interaction::FormPart;
use facultyhub_interaction::clients::{PasswordChange, ProfileUpdate, UserClient};
use std::sync::Arc;

/// Literal the user has to type to delete their account.
pub const DELETE_CONFIRMATION: &str = "DELETE";

pub struct SettingsUseCase {
    session: Arc<SessionStore>,
    users: UserClient,
    notifier: Arc<dyn Notifier>,
}

impl SettingsUseCase {
    pub fn new(session: Arc<SessionStore>, users: UserClient, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            session,
            users,
            notifier,
        }
    }

    /// Re-reads the identity from the backend. A rejected session
    /// (401/403) expires the local one and sends the user to log in.
    pub async fn refresh_identity(&self) -> Result<User> {
        match self.users.current().await {
            Ok(user) => {
                self.session.login(user.clone())?;
                Ok(user)
            }
            Err(e) if e.is_unauthorized() => {
                tracing::info!(error = %e, "Backend rejected the session");
                self.session.expire();
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    pub async fn update_profile(&self, username: Option<&str>, email: Option<&str>) -> Result<User> {
        let update = ProfileUpdate {
            new_username: username.map(str::trim).filter(|s| !s.is_empty()).map(String::from),
            new_email: email.map(str::trim).filter(|s| !s.is_empty()).map(String::from),
        };
        if update == ProfileUpdate::default() {
            return Err(self.invalid("Nothing to update"));
        }
        let updated = self.users.update_details(&update).await;
        self.store_identity(updated, "Profile updated", "Failed to update profile")
    }

    pub async fn update_avatar(&self, avatar: FileUpload) -> Result<User> {
        let updated = self.users.update_avatar(avatar).await;
        self.store_identity(updated, "Avatar updated", "Failed to update avatar")
    }

    pub async fn update_cover_image(&self, cover: FileUpload) -> Result<User> {
        let updated = self.users.update_cover_image(cover).await;
        self.store_identity(updated, "Cover image updated", "Failed to update cover image")
    }

    pub async fn complete_profile(&self, form: Vec<FormPart>) -> Result<User> {
        let updated = self.users.complete_profile(form).await;
        self.store_identity(updated, "Profile completed", "Failed to complete profile")
    }

    /// Changes the password. `current` may be empty for accounts that never
    /// had one (Google sign-in), in which case the password is set instead.
    pub async fn change_password(&self, current: &str, new: &str, confirm: &str) -> Result<()> {
        if new.is_empty() {
            return Err(self.invalid("Enter a new password"));
        }
        if new != confirm {
            return Err(self.invalid("Passwords do not match"));
        }
        let change = PasswordChange {
            original_password: current.to_string(),
            new_password: new.to_string(),
            confirm_password: confirm.to_string(),
        };
        let outcome = if current.is_empty() {
            self.users.set_password(&change).await
        } else {
            self.users.change_password(&change).await
        };
        match outcome {
            Ok(()) => {
                self.notifier.success("Password updated");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Password change failed");
                self.notifier.error(&e.user_message("Failed to update password"));
                Err(e)
            }
        }
    }

    /// Deletes the account and logs out. Refused unless `confirmation` is
    /// exactly `DELETE`.
    pub async fn delete_account(&self, confirmation: &str) -> Result<()> {
        if confirmation != DELETE_CONFIRMATION {
            return Err(self.invalid("Type DELETE to confirm"));
        }
        match self.users.delete_account().await {
            Ok(()) => {
                self.notifier.success("Account deleted.");
                self.session.logout().await;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Account deletion failed");
                self.notifier.error("Failed to delete account");
                Err(e)
            }
        }
    }

    fn store_identity(&self, updated: Result<User>, success: &str, fallback: &str) -> Result<User> {
        match updated {
            Ok(user) => {
                self.session.login(user.clone())?;
                self.notifier.success(success);
                Ok(user)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Account update failed");
                self.notifier.error(&e.user_message(fallback));
                Err(e)
            }
        }
    }

    fn invalid(&self, message: &str) -> ClientError {
        self.notifier.error(message);
        ClientError::validation(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use facultyhub_core::navigation::RecordingNavigator;
    use facultyhub_core::notice::NoticeLog;
    use facultyhub_core::session::InMemoryIdentityRepository;
    use facultyhub_interaction::Method;
    use facultyhub_interaction::clients::AuthClient;
    use facultyhub_interaction::testing::ScriptedGateway;
    use serde_json::json;

    struct Fixture {
        gateway: Arc<ScriptedGateway>,
        session: Arc<SessionStore>,
        navigator: Arc<RecordingNavigator>,
        notices: Arc<NoticeLog>,
        settings: SettingsUseCase,
    }

    fn setup() -> Fixture {
        let gateway = Arc::new(ScriptedGateway::new());
        let navigator = Arc::new(RecordingNavigator::new());
        let session = Arc::new(SessionStore::new(
            Arc::new(InMemoryIdentityRepository::with_identity(User::new(
                "Asha Rao",
                "asha@iiitnr.edu.in",
            ))),
            Arc::new(AuthClient::new(gateway.clone())),
            navigator.clone(),
        ));
        session.initialize();
        let notices = Arc::new(NoticeLog::new());
        let settings = SettingsUseCase::new(
            session.clone(),
            UserClient::new(gateway.clone()),
            notices.clone(),
        );
        Fixture {
            gateway,
            session,
            navigator,
            notices,
            settings,
        }
    }

    #[tokio::test]
    async fn test_profile_update_writes_session() {
        let f = setup();
        f.gateway.ok(
            Method::Patch,
            "/users/updateDetails",
            json!({ "fullName": "Asha Rao", "email": "asha.rao@iiitnr.edu.in", "username": "arao" }),
        );

        f.settings
            .update_profile(Some("arao"), Some("asha.rao@iiitnr.edu.in"))
            .await
            .unwrap();

        let request = f.gateway.last_request().unwrap();
        assert_eq!(request.json_field("new_username"), Some(&json!("arao")));
        let user = f.session.current_user().unwrap();
        assert_eq!(user.email, "asha.rao@iiitnr.edu.in");
        assert_eq!(user.username.as_deref(), Some("arao"));
    }

    #[tokio::test]
    async fn test_rejected_refresh_expires_session() {
        let f = setup();
        f.gateway.fail(Method::Get, "/users/getUser", 401, "Unauthorized request");

        let err = f.settings.refresh_identity().await.unwrap_err();

        assert!(err.is_unauthorized());
        assert!(!f.session.is_authenticated());
        assert_eq!(f.navigator.last().as_deref(), Some("/login"));
        // Expiry never calls the logout endpoint
        assert!(f.gateway.requests_to("/users/logout").is_empty());
    }

    #[tokio::test]
    async fn test_offline_refresh_keeps_session() {
        let f = setup();
        f.gateway.drop_connection(Method::Get, "/users/getUser");

        assert!(f.settings.refresh_identity().await.is_err());

        assert!(f.session.is_authenticated());
        assert!(f.navigator.last().is_none());
    }

    #[tokio::test]
    async fn test_mismatched_passwords_never_reach_network() {
        let f = setup();

        let err = f.settings.change_password("old", "newpass", "newpas").await.unwrap_err();

        assert_eq!(err, ClientError::validation("Passwords do not match"));
        assert_eq!(f.gateway.request_count(), 0);
    }

    #[tokio::test]
    async fn test_password_without_current_uses_set_endpoint() {
        let f = setup();
        f.gateway.ok(Method::Post, "/users/setPassword", json!(null));

        f.settings.change_password("", "newpass", "newpass").await.unwrap();

        let request = f.gateway.last_request().unwrap();
        assert_eq!(request.path, "/users/setPassword");
        assert!(request.json_field("original_password").is_none());
    }

    #[tokio::test]
    async fn test_delete_account_requires_literal_confirmation() {
        let f = setup();

        assert!(f.settings.delete_account("delete").await.is_err());
        assert_eq!(f.gateway.request_count(), 0);
        assert!(f.session.is_authenticated());
    }

    #[tokio::test]
    async fn test_delete_account_logs_out() {
        let f = setup();
        f.gateway
            .ok(Method::Delete, "/users/delete", json!(null))
            .ok(Method::Post, "/users/logout", json!(null));

        f.settings.delete_account("DELETE").await.unwrap();

        assert!(!f.session.is_authenticated());
        assert_eq!(f.navigator.last().as_deref(), Some("/login"));
        assert_eq!(f.notices.successes(), vec!["Account deleted.".to_string()]);
    }
}
