// libs/doctor-cell/src/services/directory.rs
use tracing::debug;

use crate::models::{
    DirectoryFilters, DirectoryListing, DirectoryOptions, Doctor, FilterOption, ListingStatus,
    Weekday, MATCH_ALL, NO_MATCHES_MESSAGE,
};
use crate::services::catalog::DoctorCatalog;

/// Weekday choices offered by the directory. Sunday is bookable data but
/// not a filter option.
const FILTER_DAYS: [Weekday; 6] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

pub struct DirectoryService;

impl DirectoryService {
    pub fn new() -> Self {
        Self
    }

    /// Doctors matching both predicates, in catalog order.
    pub fn filter<'a>(&self, catalog: &'a DoctorCatalog, filters: &DirectoryFilters) -> Vec<&'a Doctor> {
        catalog
            .doctors()
            .iter()
            .filter(|d| filters.specialty.matches(&d.specialty) && filters.day.matches(d))
            .collect()
    }

    /// `None` means no selection has been applied yet, which is reported
    /// differently from a selection that matched nothing.
    pub fn listing(&self, catalog: &DoctorCatalog, filters: Option<&DirectoryFilters>) -> DirectoryListing {
        let Some(filters) = filters else {
            return DirectoryListing {
                status: ListingStatus::Unfiltered,
                doctors: catalog.doctors().to_vec(),
                total: catalog.len(),
                message: None,
            };
        };

        let doctors: Vec<Doctor> = self.filter(catalog, filters).into_iter().cloned().collect();
        debug!("Directory filter {:?} matched {} doctors", filters, doctors.len());

        if doctors.is_empty() {
            DirectoryListing {
                status: ListingStatus::NoMatches,
                doctors,
                total: 0,
                message: Some(NO_MATCHES_MESSAGE.to_string()),
            }
        } else {
            DirectoryListing {
                status: ListingStatus::Matches,
                total: doctors.len(),
                doctors,
                message: None,
            }
        }
    }

    pub fn options(&self, catalog: &DoctorCatalog) -> DirectoryOptions {
        let mut specialties = vec![MATCH_ALL.to_string()];
        specialties.extend(catalog.specialties());

        let mut availability = vec![FilterOption {
            label: "Any day".to_string(),
            value: MATCH_ALL.to_string(),
        }];
        availability.extend(FILTER_DAYS.iter().map(|day| FilterOption {
            label: day.full_name().to_string(),
            value: day.code().to_string(),
        }));

        DirectoryOptions {
            specialties,
            availability,
        }
    }
}

impl Default for DirectoryService {
    fn default() -> Self {
        Self::new()
    }
}
