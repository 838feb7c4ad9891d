// libs/appointment-cell/src/services/booking.rs
use std::mem;
use std::sync::Arc;

use tracing::{debug, warn};

use doctor_cell::models::{Doctor, TimeSlot};

use crate::models::{Appointment, AppointmentError, BookingState};
use crate::services::clock::Clock;
use crate::services::store::AppointmentStore;

/// Doctor and slot selection leading to a confirmed appointment.
///
/// `Idle -> DoctorSelected -> SlotSelected -> Idle`. A failed operation
/// leaves the state as it was.
pub struct BookingFlow {
    store: AppointmentStore,
    clock: Arc<dyn Clock>,
    state: BookingState,
}

impl BookingFlow {
    pub fn new(store: AppointmentStore, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            state: BookingState::Idle,
        }
    }

    pub fn state(&self) -> &BookingState {
        &self.state
    }

    /// Allowed from any state; any earlier slot choice is dropped.
    pub fn select_doctor(&mut self, doctor: Doctor) {
        debug!("Booking flow: selected doctor {}", doctor.id);
        self.state = BookingState::DoctorSelected { doctor };
    }

    /// `None` clears the slot and keeps the doctor.
    pub fn select_slot(&mut self, slot: Option<TimeSlot>) -> Result<(), AppointmentError> {
        let doctor = self
            .state
            .doctor()
            .ok_or(AppointmentError::NoDoctorSelected)?;

        let next = match slot {
            None => BookingState::DoctorSelected {
                doctor: doctor.clone(),
            },
            Some(slot) => {
                if !doctor.offers(&slot) {
                    return Err(AppointmentError::SlotNotOffered {
                        doctor_name: doctor.name.clone(),
                        slot: slot.label(),
                    });
                }
                debug!("Booking flow: selected slot {}", slot.key());
                BookingState::SlotSelected {
                    doctor: doctor.clone(),
                    slot,
                }
            }
        };

        self.state = next;
        Ok(())
    }

    /// Book the selected slot for today. Only a successful append moves the
    /// flow back to `Idle`.
    pub fn confirm(&mut self) -> Result<Appointment, AppointmentError> {
        let BookingState::SlotSelected { doctor, slot } = &self.state else {
            return Err(AppointmentError::NoSlotSelected);
        };

        let appointment = Appointment::book(doctor, slot.clone(), self.clock.today());
        if let Err(e) = self.store.book(&appointment) {
            warn!("Booking with {} failed: {}", doctor.name, e);
            return Err(e);
        }

        self.state = BookingState::Idle;
        Ok(appointment)
    }

    /// Abandon the flow. Persisted appointments are untouched.
    pub fn close(&mut self) -> BookingState {
        mem::take(&mut self.state)
    }

    /// Select, pick and confirm in one step.
    pub fn book(&mut self, doctor: Doctor, slot: TimeSlot) -> Result<Appointment, AppointmentError> {
        let previous = self.state.clone();
        self.select_doctor(doctor);

        let result = self.select_slot(Some(slot)).and_then(|_| self.confirm());
        if result.is_err() {
            self.state = previous;
        }
        result
    }
}
