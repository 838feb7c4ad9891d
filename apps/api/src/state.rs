use std::sync::Arc;

use appointment_cell::services::{Clock, SystemClock};
use appointment_cell::AppointmentState;
use auth_cell::services::AuthService;
use doctor_cell::services::DoctorCatalog;
use shared_config::AppConfig;
use shared_database::KeyValueStore;

/// Everything the routers share. Every cell sees the same storage port.
#[derive(Clone)]
pub struct ApiState {
    pub catalog: Arc<DoctorCatalog>,
    pub appointments: Arc<AppointmentState>,
    pub auth: Arc<AuthService>,
}

impl ApiState {
    pub fn new(config: &AppConfig, backend: Arc<dyn KeyValueStore>, catalog: DoctorCatalog) -> Self {
        Self::with_clock(config, backend, catalog, Arc::new(SystemClock))
    }

    pub fn with_clock(
        config: &AppConfig,
        backend: Arc<dyn KeyValueStore>,
        catalog: DoctorCatalog,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let catalog = Arc::new(catalog);
        let appointments = Arc::new(AppointmentState::with_clock(
            catalog.clone(),
            backend.clone(),
            clock,
        ));
        let auth = Arc::new(AuthService::new(backend, config));

        Self {
            catalog,
            appointments,
            auth,
        }
    }
}
