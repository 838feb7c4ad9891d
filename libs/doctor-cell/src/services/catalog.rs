// libs/doctor-cell/src/services/catalog.rs
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

use shared_config::AppConfig;

use crate::models::{CatalogMetrics, Doctor, DoctorError, TimeSlot, Weekday};

/// Immutable doctor reference data, loaded once at start-up.
#[derive(Debug, Clone)]
pub struct DoctorCatalog {
    doctors: Vec<Doctor>,
}

impl DoctorCatalog {
    pub fn new(doctors: Vec<Doctor>) -> Result<Self, DoctorError> {
        let mut seen = HashSet::new();
        for doctor in &doctors {
            doctor.validate()?;
            if !seen.insert(doctor.id.as_str()) {
                return Err(DoctorError::InvalidCatalog(format!(
                    "Duplicate doctor id {}",
                    doctor.id
                )));
            }
        }

        Ok(Self { doctors })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        match &config.doctor_catalog_path {
            Some(path) => Self::from_json_file(path),
            None => Ok(Self::builtin()),
        }
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        debug!("Loading doctor catalog from {}", path.display());

        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading doctor catalog {}", path.display()))?;
        let doctors: Vec<Doctor> = serde_json::from_str(&raw)
            .with_context(|| format!("parsing doctor catalog {}", path.display()))?;
        let catalog = Self::new(doctors)?;

        info!("Loaded {} doctors from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    pub fn doctors(&self) -> &[Doctor] {
        &self.doctors
    }

    pub fn len(&self) -> usize {
        self.doctors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doctors.is_empty()
    }

    pub fn get(&self, doctor_id: &str) -> Option<&Doctor> {
        self.doctors.iter().find(|d| d.id == doctor_id)
    }

    pub fn require(&self, doctor_id: &str) -> Result<&Doctor, DoctorError> {
        self.get(doctor_id)
            .ok_or_else(|| DoctorError::NotFound(doctor_id.to_string()))
    }

    /// Distinct specialties in first-seen catalog order.
    pub fn specialties(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.doctors
            .iter()
            .filter(|d| seen.insert(d.specialty.as_str()))
            .map(|d| d.specialty.clone())
            .collect()
    }

    pub fn metrics(&self) -> CatalogMetrics {
        CatalogMetrics {
            total: self.doctors.len(),
            available: self.doctors.iter().filter(|d| d.has_availability()).count(),
            specialties: self.specialties().len(),
        }
    }

    pub fn builtin() -> Self {
        use Weekday::*;

        let doctors = vec![
            doctor(
                "1",
                "Dr. Sarah Johnson",
                "Cardiology",
                4.8,
                &[Mon, Wed, Fri],
                "Downtown Medical Center, New York NY",
                "https://randomuser.me/api/portraits/women/65.jpg",
                &[(Mon, "09:00", "10:00"), (Wed, "11:00", "12:00"), (Fri, "14:00", "15:00")],
            ),
            doctor(
                "2",
                "Dr. Michael Chen",
                "Pediatrics",
                4.9,
                &[Tue, Thu, Sat],
                "Sunnyvale Clinic, Boston MA",
                "https://randomuser.me/api/portraits/men/32.jpg",
                &[(Tue, "10:00", "11:00"), (Thu, "13:00", "14:00"), (Sat, "15:00", "16:00")],
            ),
            doctor(
                "3",
                "Dr. Emily Rodriguez",
                "Dermatology",
                4.7,
                &[Mon, Thu, Fri],
                "Westside Health, Chicago IL",
                "https://randomuser.me/api/portraits/women/45.jpg",
                &[(Mon, "08:30", "09:30"), (Thu, "12:00", "13:00"), (Fri, "16:00", "17:00")],
            ),
            doctor(
                "4",
                "Dr. James Patel",
                "Orthopedics",
                4.6,
                &[Wed, Fri, Sat],
                "City Ortho Care, Los Angeles CA",
                "https://randomuser.me/api/portraits/men/78.jpg",
                &[(Wed, "09:30", "10:30"), (Fri, "11:30", "12:30"), (Sat, "14:30", "15:30")],
            ),
            doctor(
                "5",
                "Dr. Aisha Khan",
                "Neurology",
                4.9,
                &[Mon, Tue, Thu],
                "NeuroHealth Institute, Seattle WA",
                "https://randomuser.me/api/portraits/women/23.jpg",
                &[(Mon, "10:30", "11:30"), (Tue, "13:30", "14:30"), (Thu, "15:30", "16:30")],
            ),
            doctor(
                "6",
                "Dr. Robert Kim",
                "Gastroenterology",
                4.5,
                &[Tue, Wed, Fri],
                "Metro Health, Miami FL",
                "https://randomuser.me/api/portraits/men/19.jpg",
                &[(Tue, "09:00", "10:00"), (Wed, "12:30", "13:30"), (Fri, "15:00", "16:00")],
            ),
            doctor(
                "7",
                "Dr. Linda Martinez",
                "Endocrinology",
                4.8,
                &[Mon, Thu, Sat],
                "HealthPlus Clinic, Houston TX",
                "https://randomuser.me/api/portraits/women/88.jpg",
                &[(Mon, "08:00", "09:00"), (Thu, "11:00", "12:00"), (Sat, "14:00", "15:00")],
            ),
            doctor(
                "8",
                "Dr. David Okoye",
                "Oncology",
                4.7,
                &[Wed, Fri, Sat],
                "Cancer Care Center, Atlanta GA",
                "https://randomuser.me/api/portraits/men/56.jpg",
                &[(Wed, "10:00", "11:00"), (Fri, "13:00", "14:00"), (Sat, "16:00", "17:00")],
            ),
        ];

        Self { doctors }
    }
}

#[allow(clippy::too_many_arguments)]
fn doctor(
    id: &str,
    name: &str,
    specialty: &str,
    rating: f64,
    availability: &[Weekday],
    location: &str,
    photo: &str,
    slots: &[(Weekday, &str, &str)],
) -> Doctor {
    Doctor {
        id: id.to_string(),
        name: name.to_string(),
        specialty: specialty.to_string(),
        rating,
        availability: availability.to_vec(),
        location: location.to_string(),
        photo: photo.to_string(),
        time_slots: slots
            .iter()
            .map(|(day, start, end)| TimeSlot::new(*day, *start, *end))
            .collect(),
    }
}
