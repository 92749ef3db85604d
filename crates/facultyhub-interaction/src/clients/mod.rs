//! Resource clients.
//!
//! Each client maps semantic operations onto exactly one request with a
//! fixed method, path and payload shape, and decodes the response into a
//! typed model. Clients are stateless and cheap to clone.

mod admin;
mod auth;
mod dashboard;
mod groups;
mod patents;
mod projects;
mod report;
mod scholar;
mod user;

pub use admin::AdminClient;
pub use auth::AuthClient;
pub use dashboard::DashboardClient;
pub use groups::GroupClient;
pub use patents::{PatentClient, PatentPayload};
pub use projects::{ProjectClient, ProjectPayload};
pub use report::ReportClient;
pub use scholar::ScholarClient;
pub use user::{PasswordChange, ProfileUpdate, UserClient};

use crate::gateway::HttpGateway;
use facultyhub_core::model::join_list;
use serde::Serializer;
use std::sync::Arc;

/// List fields travel as one comma-separated string, as typed in the forms.
pub(crate) fn comma_joined<S: Serializer>(items: &[String], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&join_list(items))
}

/// Every resource client over one shared gateway.
#[derive(Clone)]
pub struct ApiClients {
    pub auth: AuthClient,
    pub users: UserClient,
    pub dashboard: DashboardClient,
    pub groups: GroupClient,
    pub patents: PatentClient,
    pub projects: ProjectClient,
    pub scholar: ScholarClient,
    pub reports: ReportClient,
    pub admin: AdminClient,
}

impl ApiClients {
    pub fn new(gateway: Arc<dyn HttpGateway>) -> Self {
        Self {
            auth: AuthClient::new(gateway.clone()),
            users: UserClient::new(gateway.clone()),
            dashboard: DashboardClient::new(gateway.clone()),
            groups: GroupClient::new(gateway.clone()),
            patents: PatentClient::new(gateway.clone()),
            projects: ProjectClient::new(gateway.clone()),
            scholar: ScholarClient::new(gateway.clone()),
            reports: ReportClient::new(gateway.clone()),
            admin: AdminClient::new(gateway),
        }
    }
}
