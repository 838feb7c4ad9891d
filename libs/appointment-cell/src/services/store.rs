// libs/appointment-cell/src/services/store.rs
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use tracing::{debug, info};

use shared_database::{keys, KeyValueStore, LocalStore, StorageError};

use crate::models::{Appointment, AppointmentError, AppointmentTime};

/// Persisted, ordered list of active appointments under `appointments`.
///
/// Clones share the same write lock so a duplicate check and the append that
/// follows it cannot interleave with another booking in this process.
#[derive(Clone)]
pub struct AppointmentStore {
    store: LocalStore,
    write_lock: Arc<Mutex<()>>,
}

impl AppointmentStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store: LocalStore::new(backend),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn list(&self) -> Result<Vec<Appointment>, StorageError> {
        self.store.read_list(keys::APPOINTMENTS)
    }

    pub fn count(&self) -> Result<usize, StorageError> {
        Ok(self.list()?.len())
    }

    pub fn is_booked(
        &self,
        doctor_id: &str,
        date: NaiveDate,
        time: &AppointmentTime,
    ) -> Result<bool, StorageError> {
        Ok(self
            .list()?
            .iter()
            .any(|a| a.occupies(doctor_id, date, time)))
    }

    pub fn append(&self, appointment: &Appointment) -> Result<(), StorageError> {
        let _guard = self.lock()?;
        self.append_locked(appointment)
    }

    /// Append unless the (doctor, date, time) triple is already taken.
    pub fn book(&self, appointment: &Appointment) -> Result<(), AppointmentError> {
        let _guard = self.lock()?;

        if self.is_booked(&appointment.doctor_id, appointment.date, &appointment.time)? {
            debug!(
                "Rejecting duplicate booking for doctor {} on {} at {}",
                appointment.doctor_id, appointment.date, appointment.time
            );
            return Err(AppointmentError::SlotAlreadyBooked);
        }

        self.append_locked(appointment)?;
        Ok(())
    }

    /// Remove the first appointment with this id. Unknown ids are a no-op.
    pub fn remove(&self, appointment_id: &str) -> Result<bool, StorageError> {
        let _guard = self.lock()?;

        let mut list = self.store.load_list(keys::APPOINTMENTS)?;
        if !list.remove_first(|entry| entry["id"] == appointment_id) {
            debug!("No appointment {} to remove", appointment_id);
            return Ok(false);
        }

        self.store.save_list(&list)?;
        info!("Appointment {} cancelled", appointment_id);
        Ok(true)
    }

    fn append_locked(&self, appointment: &Appointment) -> Result<(), StorageError> {
        let mut list = self.store.load_list(keys::APPOINTMENTS)?;
        list.push(appointment)?;
        self.store.save_list(&list)?;

        info!(
            "Appointment {} booked with {} on {} at {}",
            appointment.id, appointment.doctor_name, appointment.date, appointment.time
        );
        Ok(())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, ()>, StorageError> {
        self.write_lock
            .lock()
            .map_err(|_| StorageError::Unavailable("appointment write lock poisoned".to_string()))
    }
}
