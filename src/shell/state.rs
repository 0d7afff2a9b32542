use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::modules::catalog::core::entity::CatalogKind;
use crate::modules::catalog::use_cases::manage_entities::handler::CatalogPanel;
use crate::modules::catalog::use_cases::manage_entities::repository_port::CatalogRepository;
use crate::modules::catalog::use_cases::manage_schedules::handler::SchedulePanel;
use crate::modules::catalog::use_cases::manage_schedules::repository_port::ScheduleRepository;
use crate::modules::registration::adapters::outbound::checkpoint_store::CheckpointStore;
use crate::modules::registration::use_cases::load_offerings::source_port::OfferingSource;
use crate::modules::registration::use_cases::submit_registration::gateway_port::RegistrationGateway;
use crate::modules::registration::use_cases::submit_registration::handler::RegistrationPage;
use crate::modules::students::adapters::outbound::text_table_renderer::TextTableRenderer;
use crate::modules::students::use_cases::delete_student::handler::DeleteStudentHandler;
use crate::modules::students::use_cases::delete_student::remover_port::RegistrationRemover;
use crate::modules::students::use_cases::list_students::handler::StudentsDashboard;
use crate::modules::students::use_cases::list_students::queries_port::StudentDirectory;
use crate::modules::students::use_cases::print_report::handler::PrintReportHandler;
use crate::shared::infrastructure::backend::in_memory::InMemoryBackend;
use crate::shared::infrastructure::backend::rest::RestBackend;
use crate::shared::infrastructure::session_storage::SessionStorage;
use crate::shared::infrastructure::session_storage::in_memory::InMemorySessionStorage;
use crate::shell::config::AppConfig;
use crate::shell::session::SessionSlots;

/// Every port a backend has to serve.
pub trait Backend:
    OfferingSource
    + RegistrationGateway
    + StudentDirectory
    + RegistrationRemover
    + CatalogRepository
    + ScheduleRepository
    + 'static
{
}

impl<T> Backend for T where
    T: OfferingSource
        + RegistrationGateway
        + StudentDirectory
        + RegistrationRemover
        + CatalogRepository
        + ScheduleRepository
        + 'static
{
}

pub type SharedPage = Arc<Mutex<RegistrationPage>>;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub offerings: Arc<dyn OfferingSource>,
    pub gateway: Arc<dyn RegistrationGateway>,
    pub directory: Arc<dyn StudentDirectory>,
    pub checkpoints: CheckpointStore,
    pub delete_student: Arc<DeleteStudentHandler>,
    pub print_report: Arc<PrintReportHandler>,
    pub catalog: Arc<CatalogPanel>,
    pub schedules: Arc<SchedulePanel>,
    pages: Arc<SessionSlots<Mutex<RegistrationPage>>>,
    dashboards: Arc<SessionSlots<StudentsDashboard>>,
}

impl AppState {
    pub fn new<B: Backend>(
        config: AppConfig,
        backend: Arc<B>,
        storage: Arc<dyn SessionStorage>,
    ) -> Self {
        let schedules = Arc::new(SchedulePanel::new(backend.clone(), config.default_capacity));
        Self {
            offerings: backend.clone(),
            gateway: backend.clone(),
            directory: backend.clone(),
            checkpoints: CheckpointStore::new(storage),
            delete_student: Arc::new(DeleteStudentHandler::new(backend.clone())),
            print_report: Arc::new(PrintReportHandler::new(
                backend.clone(),
                Arc::new(TextTableRenderer::new()),
            )),
            catalog: Arc::new(CatalogPanel::new(backend, schedules.clone())),
            schedules,
            pages: Arc::new(SessionSlots::new(config.session_idle, config.max_sessions)),
            dashboards: Arc::new(SessionSlots::new(config.session_idle, config.max_sessions)),
            config: Arc::new(config),
        }
    }

    /// REST backend when one is configured, the seeded in-memory one otherwise.
    pub async fn from_config(config: AppConfig) -> Self {
        let storage = Arc::new(InMemorySessionStorage::new());
        let state = match config.backend.clone() {
            Some(backend) => {
                info!(url = %backend.url, "using REST backend");
                Self::new(
                    config,
                    Arc::new(RestBackend::new(backend.url, backend.api_key)),
                    storage,
                )
            }
            None => {
                warn!("no backend configured, using the in-memory backend");
                Self::new(config, Arc::new(InMemoryBackend::seeded().await), storage)
            }
        };
        state.warm_up().await;
        state
    }

    /// Preloads the admin lists. Failures only leave them empty until the next reload.
    pub async fn warm_up(&self) {
        for kind in CatalogKind::ALL {
            if let Err(err) = self.catalog.reload(kind).await {
                warn!(%kind, error = %err, "catalog preload failed");
            }
        }
        if let Err(err) = self.schedules.reload().await {
            warn!(error = %err, "schedule preload failed");
        }
    }

    /// The registration page of one session, created on first use.
    pub async fn registration_page(&self, session_id: &str) -> SharedPage {
        self.pages
            .get_or_insert_with(session_id, || {
                Mutex::new(RegistrationPage::new(
                    session_id,
                    self.offerings.clone(),
                    self.gateway.clone(),
                    self.checkpoints.clone(),
                ))
            })
            .await
    }

    pub async fn dashboard(&self, session_id: &str) -> Arc<StudentsDashboard> {
        self.dashboards
            .get_or_insert_with(session_id, || {
                StudentsDashboard::new(
                    self.directory.clone(),
                    self.config.students_page_size,
                    self.config.search_debounce,
                )
            })
            .await
    }
}
