// libs/appointment-cell/src/models.rs
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use doctor_cell::models::{Doctor, TimeSlot};
use shared_database::StorageError;
use shared_models::error::AppError;

pub const BOOKED_MESSAGE: &str = "Appointment booked successfully!";
pub const CANCELLED_MESSAGE: &str = "Appointment cancelled successfully!";

// ==============================================================================
// CORE APPOINTMENT MODELS
// ==============================================================================

/// The booked time. Older records stored a display string instead of the
/// structured slot; both are read back as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AppointmentTime {
    Slot(TimeSlot),
    Legacy(String),
}

impl AppointmentTime {
    pub fn label(&self) -> String {
        match self {
            AppointmentTime::Slot(slot) => slot.label(),
            AppointmentTime::Legacy(text) => text.clone(),
        }
    }
}

impl fmt::Display for AppointmentTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl From<TimeSlot> for AppointmentTime {
    fn from(slot: TimeSlot) -> Self {
        AppointmentTime::Slot(slot)
    }
}

/// A booked appointment. Doctor fields are a snapshot taken at booking time
/// and are never re-joined against the catalog. Existence means active.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    pub doctor_id: String,
    pub doctor_name: String,
    pub specialty: String,
    pub location: String,
    pub photo: String,
    pub rating: f64,
    pub date: NaiveDate,
    pub time: AppointmentTime,
}

impl Appointment {
    pub fn book(doctor: &Doctor, slot: TimeSlot, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            doctor_id: doctor.id.clone(),
            doctor_name: doctor.name.clone(),
            specialty: doctor.specialty.clone(),
            location: doctor.location.clone(),
            photo: doctor.photo.clone(),
            rating: doctor.rating,
            date,
            time: AppointmentTime::Slot(slot),
        }
    }

    /// Whether this appointment occupies the (doctor, date, time) triple.
    pub fn occupies(&self, doctor_id: &str, date: NaiveDate, time: &AppointmentTime) -> bool {
        self.doctor_id == doctor_id && self.date == date && &self.time == time
    }
}

// ==============================================================================
// BOOKING FLOW MODELS
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum BookingState {
    #[default]
    Idle,
    DoctorSelected {
        doctor: Doctor,
    },
    SlotSelected {
        doctor: Doctor,
        slot: TimeSlot,
    },
}

impl BookingState {
    pub fn doctor(&self) -> Option<&Doctor> {
        match self {
            BookingState::Idle => None,
            BookingState::DoctorSelected { doctor } | BookingState::SlotSelected { doctor, .. } => {
                Some(doctor)
            }
        }
    }

    pub fn slot(&self) -> Option<&TimeSlot> {
        match self {
            BookingState::SlotSelected { slot, .. } => Some(slot),
            _ => None,
        }
    }

    pub fn is_confirmable(&self) -> bool {
        matches!(self, BookingState::SlotSelected { .. })
    }
}

// ==============================================================================
// REQUEST MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookAppointmentRequest {
    pub doctor_id: String,
    pub slot: TimeSlot,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectDoctorRequest {
    pub doctor_id: String,
}

/// `slot: null` clears the current choice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectSlotRequest {
    pub slot: Option<TimeSlot>,
}

// ==============================================================================
// ERROR HANDLING
// ==============================================================================

#[derive(Error, Debug)]
pub enum AppointmentError {
    #[error("Please select a doctor first.")]
    NoDoctorSelected,

    #[error("Please pick a time slot first.")]
    NoSlotSelected,

    #[error("{doctor_name} does not offer {slot}")]
    SlotNotOffered { doctor_name: String, slot: String },

    #[error("That time slot is already booked.")]
    SlotAlreadyBooked,

    #[error("Doctor not found: {0}")]
    DoctorNotFound(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl From<AppointmentError> for AppError {
    fn from(err: AppointmentError) -> Self {
        match err {
            AppointmentError::NoDoctorSelected
            | AppointmentError::NoSlotSelected
            | AppointmentError::SlotNotOffered { .. } => AppError::ValidationError(err.to_string()),
            AppointmentError::SlotAlreadyBooked => AppError::Conflict(err.to_string()),
            AppointmentError::DoctorNotFound(_) => AppError::NotFound(err.to_string()),
            AppointmentError::Storage(e) => AppError::Storage(e.to_string()),
        }
    }
}
