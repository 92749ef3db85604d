pub mod admin;
pub mod collections;
pub mod dashboard;
pub mod report;
pub mod session;

use anyhow::{Result, bail};
use facultyhub_application::FacultyHub;
use facultyhub_core::guard::{GuardView, RouteGuard};
use facultyhub_core::model::User;

/// Guards a protected command the same way a protected page is guarded.
pub fn require_login(hub: &FacultyHub, location: &str) -> Result<User> {
    let guard = RouteGuard::mount(hub.session().clone(), location);
    match guard.render(User::clone) {
        GuardView::Content(user) => Ok(user),
        GuardView::Redirect(redirect) => {
            tracing::debug!(from = %redirect.from, to = %redirect.to, "Protected command refused");
            bail!("Not logged in (redirected to {}); run `facultyhub login` first", redirect.to)
        }
        GuardView::Pending => bail!("Session is still loading"),
    }
}

/// Like [`require_login`], additionally requiring an administrator.
pub fn require_admin(hub: &FacultyHub, location: &str) -> Result<User> {
    let user = require_login(hub, location)?;
    if !user.is_admin {
        bail!("{} is not an administrator", user.display_name());
    }
    Ok(user)
}
