//! Wiring of the whole client.

use crate::admin::AdminView;
use crate::auth::AuthUseCase;
use crate::collections::CollectionsView;
use crate::dashboard::DashboardView;
use crate::patents::PatentsView;
use crate::projects::ProjectsView;
use crate::report::ReportService;
use crate::scholar_sync::{ScholarSync, scholar_sync_definition};
use crate::settings::SettingsUseCase;
use crate::signup::{SignupWizard, signup_definition};
use facultyhub_core::Result;
use facultyhub_core::config::ClientConfig;
use facultyhub_core::navigation::{LoggingNavigator, Navigator};
use facultyhub_core::notice::{Notifier, TracingNotifier};
use facultyhub_core::session::{IdentityRepository, SessionStore};
use facultyhub_infrastructure::{ConfigStorage, FacultyHubPaths, FileIdentityRepository};
use facultyhub_interaction::{ApiClients, HttpGateway, ReqwestGateway};
use std::sync::Arc;

/// One explicitly constructed client: configuration, session and resource
/// clients, handed to every use case that needs them.
#[derive(Clone)]
pub struct FacultyHub {
    config: ClientConfig,
    session: Arc<SessionStore>,
    api: ApiClients,
    notifier: Arc<dyn Notifier>,
}

impl FacultyHub {
    pub fn new(
        config: ClientConfig,
        gateway: Arc<dyn HttpGateway>,
        repository: Arc<dyn IdentityRepository>,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let api = ApiClients::new(gateway);
        let session = SessionStore::new(repository, Arc::new(api.auth.clone()), navigator)
            .with_login_path(config.login_path.clone());
        Self {
            config,
            session: Arc::new(session),
            api,
            notifier,
        }
    }

    /// Loads `config.toml` under `paths`, connects over HTTP and restores
    /// the persisted identity.
    pub fn open(paths: &FacultyHubPaths) -> Result<Self> {
        let config = ConfigStorage::new(paths.config_file()).load()?;
        let gateway = ReqwestGateway::new(config.clone())?;
        let repository = FileIdentityRepository::new(paths, &config.identity_key);
        tracing::info!(base_url = %config.base_url, root = %paths.root().display(), "Opening FacultyHub client");

        let hub = Self::new(
            config,
            Arc::new(gateway),
            Arc::new(repository),
            Arc::new(LoggingNavigator),
            Arc::new(TracingNotifier),
        );
        hub.session.initialize();
        Ok(hub)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub fn api(&self) -> &ApiClients {
        &self.api
    }

    pub fn notifier(&self) -> &Arc<dyn Notifier> {
        &self.notifier
    }

    pub fn auth(&self) -> AuthUseCase {
        AuthUseCase::new(self.session.clone(), self.api.auth.clone(), self.notifier.clone())
    }

    pub fn settings(&self) -> SettingsUseCase {
        SettingsUseCase::new(
            self.session.clone(),
            self.api.users.clone(),
            self.notifier.clone(),
        )
    }

    /// A signup wizard, already started.
    pub fn signup(&self) -> SignupWizard {
        SignupWizard::new(
            Arc::new(signup_definition(&self.config)),
            self.api.auth.clone(),
            self.notifier.clone(),
        )
    }

    /// A scholar-sync run bound to `dashboard`, already started.
    pub fn scholar_sync(&self, dashboard: &DashboardView) -> ScholarSync {
        ScholarSync::new(
            Arc::new(scholar_sync_definition()),
            self.api.scholar.clone(),
            dashboard.clone(),
            self.notifier.clone(),
        )
    }

    pub fn dashboard(&self) -> DashboardView {
        DashboardView::new(self.api.dashboard.clone(), self.notifier.clone())
    }

    pub fn collections(&self) -> CollectionsView {
        CollectionsView::new(self.api.groups.clone(), self.notifier.clone())
    }

    pub fn projects(&self) -> ProjectsView {
        ProjectsView::new(self.api.projects.clone(), self.notifier.clone())
    }

    pub fn patents(&self) -> PatentsView {
        PatentsView::new(self.api.patents.clone(), self.notifier.clone())
    }

    pub fn reports(&self) -> ReportService {
        ReportService::new(self.api.reports.clone(), self.notifier.clone())
    }

    pub fn admin(&self) -> AdminView {
        AdminView::new(self.api.admin.clone(), self.notifier.clone())
    }
}
