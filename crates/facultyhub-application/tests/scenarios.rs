//! End-to-end scenarios through a fully wired `FacultyHub`.

use facultyhub_application::FacultyHub;
use facultyhub_application::signup::fields;
use facultyhub_core::config::ClientConfig;
use facultyhub_core::guard::{GuardState, GuardView, RouteGuard};
use facultyhub_core::model::User;
use facultyhub_core::navigation::RecordingNavigator;
use facultyhub_core::notice::NoticeLog;
use facultyhub_core::session::{IdentityRepository, InMemoryIdentityRepository};
use facultyhub_core::workflow::{FileUpload, StepOutcome, WorkflowStatus};
use facultyhub_interaction::Method;
use facultyhub_interaction::testing::ScriptedGateway;
use serde_json::json;
use std::sync::Arc;

struct Harness {
    gateway: Arc<ScriptedGateway>,
    repository: Arc<InMemoryIdentityRepository>,
    navigator: Arc<RecordingNavigator>,
    notices: Arc<NoticeLog>,
    hub: FacultyHub,
}

fn harness(repository: InMemoryIdentityRepository) -> Harness {
    let gateway = Arc::new(ScriptedGateway::new());
    let repository = Arc::new(repository);
    let navigator = Arc::new(RecordingNavigator::new());
    let notices = Arc::new(NoticeLog::new());
    let hub = FacultyHub::new(
        ClientConfig::default(),
        gateway.clone(),
        repository.clone(),
        navigator.clone(),
        notices.clone(),
    );
    hub.session().initialize();
    Harness {
        gateway,
        repository,
        navigator,
        notices,
        hub,
    }
}

fn logged_in() -> Harness {
    harness(InMemoryIdentityRepository::with_identity(User::new(
        "Asha Rao",
        "asha@iiitnr.edu.in",
    )))
}

#[tokio::test]
async fn signup_step_one_blocks_on_missing_name() {
    let h = harness(InMemoryIdentityRepository::new());
    let wizard = h.hub.signup();

    wizard.set_text(fields::FULL_NAME, "").unwrap();
    wizard.set_text(fields::USERNAME, "a").unwrap();
    wizard.set_text(fields::EMAIL, "a@x.com").unwrap();
    let outcome = wizard.next().unwrap();

    assert!(matches!(outcome, StepOutcome::Invalid(ref m) if m.contains("fullName")));
    let snapshot = wizard.snapshot().unwrap();
    assert_eq!(snapshot.current_step, 0);
    assert_eq!(snapshot.status, WorkflowStatus::Failed);
    assert_eq!(h.gateway.request_count(), 0);
}

#[tokio::test]
async fn signup_failure_resumes_at_last_step_then_succeeds() {
    let h = harness(InMemoryIdentityRepository::new());
    h.gateway
        .fail(Method::Post, "/users/register", 409, "User with email or username already exists")
        .ok(Method::Post, "/users/register", json!({ "_id": "u1" }));
    let wizard = h.hub.signup();

    wizard.set_text(fields::FULL_NAME, "Asha Rao").unwrap();
    wizard.set_text(fields::USERNAME, "arao").unwrap();
    wizard.set_text(fields::EMAIL, "asha@iiitnr.edu.in").unwrap();
    assert_eq!(wizard.next().unwrap(), StepOutcome::Moved(1));
    wizard.set_text(fields::PASSWORD, "secret1").unwrap();
    wizard.set_text(fields::CONFIRM_PASSWORD, "secret1").unwrap();
    assert_eq!(wizard.next().unwrap(), StepOutcome::Moved(2));
    wizard.set_text(fields::DEPARTMENT, "CSE").unwrap();
    wizard.set_text(fields::DESIGNATION, "Assistant Professor").unwrap();
    wizard.set_text(fields::RESEARCH_INTEREST, "Edge AI").unwrap();
    assert_eq!(wizard.next().unwrap(), StepOutcome::Moved(3));
    wizard.set_file(fields::AVATAR, FileUpload::new("me.png", vec![1])).unwrap();
    wizard.set_file(fields::COVER_IMAGE, FileUpload::new("cover.jpg", vec![2])).unwrap();
    assert_eq!(wizard.next().unwrap(), StepOutcome::ReadyToSubmit);

    assert!(wizard.submit().await.is_err());
    let snapshot = wizard.snapshot().unwrap();
    assert_eq!(snapshot.current_step, 3);
    assert_eq!(snapshot.status, WorkflowStatus::InProgress);
    assert!(snapshot.open);
    assert_eq!(
        snapshot.error_message.as_deref(),
        Some("User with email or username already exists")
    );

    wizard.submit().await.unwrap();
    assert_eq!(wizard.snapshot().unwrap().status, WorkflowStatus::Succeeded);
    assert_eq!(
        h.notices.successes(),
        vec!["Account created successfully!".to_string()]
    );
    let request = h.gateway.last_request().unwrap();
    let names = request.form_field_names();
    for expected in ["fullName", "password", "researchInterest", "isAdmin", "avatar", "coverImage"] {
        assert!(names.contains(&expected), "missing form field {expected}");
    }
}

#[tokio::test]
async fn scholar_sync_without_author_id_never_imports() {
    let h = logged_in();
    h.gateway
        .ok(Method::Get, "/users/getAuthorID", json!({}));
    let dashboard = h.hub.dashboard();
    let sync = h.hub.scholar_sync(&dashboard);

    let err = sync.run("not-a-url").await.unwrap_err();

    assert!(err.to_string().contains("Author ID"));
    let snapshot = sync.snapshot().unwrap();
    assert_eq!(snapshot.status, WorkflowStatus::Failed);
    assert!(snapshot.error_message.unwrap().contains("Author ID"));
    assert!(h.gateway.requests_to("/users/authorProfile").is_empty());
    assert_eq!(
        sync.progress().last().map(String::as_str),
        Some("Error: Could not find Author ID in this URL")
    );
}

#[tokio::test]
async fn optimistic_remove_reverts_on_server_failure() {
    let h = logged_in();
    h.gateway
        .ok(
            Method::Get,
            "/group/groups/g1",
            json!({ "_id": "g1", "name": "ML", "papers": [{ "_id": "p1" }, { "_id": "p2" }] }),
        )
        .drop_connection(Method::Patch, "/group/removePaper");
    let collections = h.hub.collections();
    collections.open("g1").await.unwrap();

    assert!(collections.remove_paper("p1").await.is_err());

    assert_eq!(collections.selected_paper_ids(), vec!["p1", "p2"]);
    assert_eq!(h.notices.errors(), vec!["Failed to remove paper".to_string()]);
}

#[tokio::test]
async fn offline_logout_still_clears_identity() {
    let h = logged_in();
    h.gateway.drop_connection(Method::Post, "/users/logout");
    assert!(h.hub.session().is_authenticated());

    h.hub.auth().logout().await;

    assert!(!h.hub.session().is_authenticated());
    assert!(h.repository.load().unwrap().is_none());
    assert_eq!(h.navigator.last().as_deref(), Some("/login"));
    assert_eq!(h.gateway.requests_to("/users/logout").len(), 1);
}

#[tokio::test]
async fn guard_redirects_anonymous_visitor_with_origin() {
    let h = harness(InMemoryIdentityRepository::new());

    let guard = RouteGuard::mount(h.hub.session().clone(), "/projects");

    match guard.state() {
        GuardState::Unauthenticated(redirect) => {
            assert_eq!(redirect.to, "/login");
            assert_eq!(redirect.from, "/projects");
        }
        other => panic!("unexpected guard state: {other:?}"),
    }
    let view = guard.render(|_| "protected");
    assert!(matches!(view, GuardView::Redirect(_)));
}

#[tokio::test]
async fn login_then_guard_admits_user() {
    let h = harness(InMemoryIdentityRepository::new());
    h.gateway.ok(
        Method::Post,
        "/users/login",
        json!({ "user": { "fullName": "Asha Rao", "email": "asha@iiitnr.edu.in" } }),
    );

    h.hub.auth().login("asha@iiitnr.edu.in", "secret1").await.unwrap();
    let guard = RouteGuard::mount(h.hub.session().clone(), "/dashboard");

    assert_eq!(
        guard.render(|user| user.full_name.clone()),
        GuardView::Content("Asha Rao".to_string())
    );
    assert!(h.repository.load().unwrap().is_some());
}
