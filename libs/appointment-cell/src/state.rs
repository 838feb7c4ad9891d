// libs/appointment-cell/src/state.rs
use std::sync::Arc;

use tokio::sync::Mutex;

use doctor_cell::services::DoctorCatalog;
use shared_database::KeyValueStore;

use crate::services::{AppointmentStore, BookingFlow, Clock, SystemClock};

/// Shared state behind the appointment and booking routes. The interactive
/// booking flow is a single session serialised by an async mutex.
pub struct AppointmentState {
    pub catalog: Arc<DoctorCatalog>,
    pub store: AppointmentStore,
    pub clock: Arc<dyn Clock>,
    pub booking: Mutex<BookingFlow>,
}

impl AppointmentState {
    pub fn new(catalog: Arc<DoctorCatalog>, backend: Arc<dyn KeyValueStore>) -> Self {
        Self::with_clock(catalog, backend, Arc::new(SystemClock))
    }

    pub fn with_clock(
        catalog: Arc<DoctorCatalog>,
        backend: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let store = AppointmentStore::new(backend);
        let booking = BookingFlow::new(store.clone(), clock.clone());

        Self {
            catalog,
            store,
            clock,
            booking: Mutex::new(booking),
        }
    }

    /// A flow independent of the interactive session, for one-shot bookings.
    pub fn detached_flow(&self) -> BookingFlow {
        BookingFlow::new(self.store.clone(), self.clock.clone())
    }
}
