use anyhow::{Result, bail};
use facultyhub_application::FacultyHub;

/// Prints the session, confirming a saved identity with the backend first.
pub async fn status(hub: &FacultyHub) {
    println!("Backend: {}", hub.config().base_url);
    if hub.session().current_user().is_some() {
        match hub.settings().refresh_identity().await {
            Ok(_) => tracing::debug!("Saved identity confirmed by backend"),
            Err(e) if e.is_unauthorized() => {
                println!("Session expired, log in again");
                return;
            }
            Err(e) => tracing::warn!(error = %e, "Could not reach backend, showing saved identity"),
        }
    }
    match hub.session().current_user() {
        Some(user) => {
            let role = if user.is_admin { "admin" } else { "faculty" };
            println!("Logged in as {} <{}> ({role})", user.display_name(), user.email);
        }
        None => println!("Not logged in"),
    }
}

pub async fn login(
    hub: &FacultyHub,
    email: Option<String>,
    password: Option<String>,
    google_token: Option<String>,
) -> Result<()> {
    let auth = hub.auth();
    let user = match (google_token, email, password) {
        (Some(token), _, _) => auth.google_login(&token).await?,
        (None, Some(email), Some(password)) => auth.login(&email, &password).await?,
        _ => bail!("Provide --email and --password, or --google-token"),
    };
    tracing::info!(email = %user.email, "Logged in");
    println!("Welcome back, {}!", user.display_name());
    Ok(())
}

pub async fn logout(hub: &FacultyHub) {
    hub.auth().logout().await;
    println!("Logged out");
}
