use std::fmt;
use std::str::FromStr;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared_models::error::AppError;

pub const MATCH_ALL: &str = "All";
pub const NO_MATCHES_MESSAGE: &str = "No doctors match your selected filters.";

// ==============================================================================
// CATALOG MODELS
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Weekday {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Weekday::Mon => "Mon",
            Weekday::Tue => "Tue",
            Weekday::Wed => "Wed",
            Weekday::Thu => "Thu",
            Weekday::Fri => "Fri",
            Weekday::Sat => "Sat",
            Weekday::Sun => "Sun",
        }
    }

    pub fn full_name(&self) -> &'static str {
        match self {
            Weekday::Mon => "Monday",
            Weekday::Tue => "Tuesday",
            Weekday::Wed => "Wednesday",
            Weekday::Thu => "Thursday",
            Weekday::Fri => "Friday",
            Weekday::Sat => "Saturday",
            Weekday::Sun => "Sunday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Weekday {
    type Err = DoctorError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Weekday::ALL
            .into_iter()
            .find(|day| day.code() == value)
            .ok_or_else(|| DoctorError::InvalidFilter(format!("Unknown weekday code: {}", value)))
    }
}

/// A bookable window on a weekday. Equality is structural.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeSlot {
    pub day: Weekday,
    pub start: String,
    pub end: String,
}

impl TimeSlot {
    pub fn new(day: Weekday, start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            day,
            start: start.into(),
            end: end.into(),
        }
    }

    /// Display form, e.g. `Mon 09:00 – 10:00`.
    pub fn label(&self) -> String {
        format!("{} {} – {}", self.day, self.start, self.end)
    }

    /// Stable option key, e.g. `Mon-09:00-10:00`.
    pub fn key(&self) -> String {
        format!("{}-{}-{}", self.day, self.start, self.end)
    }

    pub fn validate(&self) -> Result<(), DoctorError> {
        let start = parse_clock(&self.start)?;
        let end = parse_clock(&self.end)?;

        if start >= end {
            return Err(DoctorError::InvalidCatalog(format!(
                "Slot {} must start before it ends",
                self.label()
            )));
        }
        Ok(())
    }
}

fn parse_clock(value: &str) -> Result<NaiveTime, DoctorError> {
    if value.len() != 5 {
        return Err(DoctorError::InvalidCatalog(format!("Expected HH:mm time, got '{}'", value)));
    }
    NaiveTime::parse_from_str(value, "%H:%M")
        .map_err(|_| DoctorError::InvalidCatalog(format!("Expected HH:mm time, got '{}'", value)))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub id: String,
    pub name: String,
    pub specialty: String,
    pub rating: f64,
    pub availability: Vec<Weekday>,
    pub location: String,
    pub photo: String,
    pub time_slots: Vec<TimeSlot>,
}

impl Doctor {
    pub fn is_available_on(&self, day: Weekday) -> bool {
        self.availability.contains(&day)
    }

    pub fn has_availability(&self) -> bool {
        !self.availability.is_empty()
    }

    pub fn offers(&self, slot: &TimeSlot) -> bool {
        self.time_slots.contains(slot)
    }

    pub fn validate(&self) -> Result<(), DoctorError> {
        if self.id.trim().is_empty() {
            return Err(DoctorError::InvalidCatalog("Doctor id must not be empty".to_string()));
        }
        if !(0.0..=5.0).contains(&self.rating) {
            return Err(DoctorError::InvalidCatalog(format!(
                "Doctor {} has rating {} outside 0-5",
                self.id, self.rating
            )));
        }
        for slot in &self.time_slots {
            slot.validate()?;
        }
        Ok(())
    }
}

// ==============================================================================
// DIRECTORY MODELS
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SpecialtyFilter {
    #[default]
    All,
    Exact(String),
}

impl SpecialtyFilter {
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") | Some(MATCH_ALL) => SpecialtyFilter::All,
            Some(specialty) => SpecialtyFilter::Exact(specialty.to_string()),
        }
    }

    pub fn matches(&self, specialty: &str) -> bool {
        match self {
            SpecialtyFilter::All => true,
            SpecialtyFilter::Exact(wanted) => wanted == specialty,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DayFilter {
    #[default]
    All,
    Day(Weekday),
}

impl DayFilter {
    pub fn parse(value: Option<&str>) -> Result<Self, DoctorError> {
        match value.map(str::trim) {
            None | Some("") | Some(MATCH_ALL) => Ok(DayFilter::All),
            Some(code) => Ok(DayFilter::Day(code.parse()?)),
        }
    }

    pub fn matches(&self, doctor: &Doctor) -> bool {
        match self {
            DayFilter::All => true,
            DayFilter::Day(day) => doctor.is_available_on(*day),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DirectoryFilters {
    pub specialty: SpecialtyFilter,
    pub day: DayFilter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingStatus {
    /// No filter selection has been applied yet.
    Unfiltered,
    Matches,
    NoMatches,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryListing {
    pub status: ListingStatus,
    pub doctors: Vec<Doctor>,
    pub total: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOption {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryOptions {
    pub specialties: Vec<String>,
    pub availability: Vec<FilterOption>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogMetrics {
    pub total: usize,
    pub available: usize,
    pub specialties: usize,
}

// ==============================================================================
// ERROR HANDLING
// ==============================================================================

#[derive(Error, Debug, PartialEq)]
pub enum DoctorError {
    #[error("Doctor not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    InvalidFilter(String),

    #[error("Invalid doctor catalog: {0}")]
    InvalidCatalog(String),
}

impl From<DoctorError> for AppError {
    fn from(err: DoctorError) -> Self {
        match err {
            DoctorError::NotFound(_) => AppError::NotFound(err.to_string()),
            DoctorError::InvalidFilter(msg) => AppError::ValidationError(msg),
            DoctorError::InvalidCatalog(_) => AppError::Internal(err.to_string()),
        }
    }
}
