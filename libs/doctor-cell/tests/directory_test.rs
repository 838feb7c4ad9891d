use std::fs;

use doctor_cell::models::{
    DayFilter, DirectoryFilters, ListingStatus, SpecialtyFilter, Weekday, NO_MATCHES_MESSAGE,
};
use doctor_cell::services::{DirectoryService, DoctorCatalog};

fn filters(specialty: SpecialtyFilter, day: DayFilter) -> DirectoryFilters {
    DirectoryFilters { specialty, day }
}

#[test]
fn every_filter_pair_yields_a_matching_subset() {
    let catalog = DoctorCatalog::builtin();
    let service = DirectoryService::new();

    let mut specialties = vec![SpecialtyFilter::All];
    specialties.extend(
        catalog
            .specialties()
            .into_iter()
            .map(SpecialtyFilter::Exact),
    );
    specialties.push(SpecialtyFilter::Exact("Podiatry".to_string()));

    let mut days = vec![DayFilter::All];
    days.extend(Weekday::ALL.into_iter().map(DayFilter::Day));

    for specialty in &specialties {
        for day in &days {
            let selection = filters(specialty.clone(), *day);
            let result = service.filter(&catalog, &selection);

            for doctor in &result {
                assert!(specialty.matches(&doctor.specialty));
                assert!(day.matches(doctor));
            }

            // catalog order is preserved
            let positions: Vec<usize> = result
                .iter()
                .map(|d| catalog.doctors().iter().position(|c| c.id == d.id).unwrap())
                .collect();
            assert!(positions.windows(2).all(|w| w[0] < w[1]));

            let listing = service.listing(&catalog, Some(&selection));
            assert_eq!(listing.total, result.len());
            if result.is_empty() {
                assert_eq!(listing.status, ListingStatus::NoMatches);
                assert_eq!(listing.message.as_deref(), Some(NO_MATCHES_MESSAGE));
            } else {
                assert_eq!(listing.status, ListingStatus::Matches);
            }
        }
    }
}

#[test]
fn specialty_and_day_combine() {
    let catalog = DoctorCatalog::builtin();
    let result = DirectoryService::new().filter(
        &catalog,
        &filters(
            SpecialtyFilter::Exact("Cardiology".to_string()),
            DayFilter::Day(Weekday::Mon),
        ),
    );

    assert_eq!(result.len(), 1);
    assert_eq!(result[0].name, "Dr. Sarah Johnson");
}

#[test]
fn day_filter_uses_availability_membership() {
    let catalog = DoctorCatalog::builtin();
    let saturday: Vec<&str> = DirectoryService::new()
        .filter(&catalog, &filters(SpecialtyFilter::All, DayFilter::Day(Weekday::Sat)))
        .into_iter()
        .map(|d| d.id.as_str())
        .collect();

    assert_eq!(saturday, vec!["2", "4", "7", "8"]);
}

#[test]
fn unfiltered_listing_is_distinct_from_no_matches() {
    let catalog = DoctorCatalog::builtin();
    let service = DirectoryService::new();

    let unfiltered = service.listing(&catalog, None);
    assert_eq!(unfiltered.status, ListingStatus::Unfiltered);
    assert_eq!(unfiltered.total, 8);

    let none = service.listing(
        &catalog,
        Some(&filters(SpecialtyFilter::All, DayFilter::Day(Weekday::Sun))),
    );
    assert_eq!(none.status, ListingStatus::NoMatches);
    assert!(none.doctors.is_empty());
}

#[test]
fn options_start_with_the_match_all_sentinel() {
    let catalog = DoctorCatalog::builtin();
    let options = DirectoryService::new().options(&catalog);

    assert_eq!(options.specialties[0], "All");
    assert_eq!(options.specialties[1], "Cardiology");
    assert_eq!(options.specialties.len(), 9);

    let values: Vec<&str> = options.availability.iter().map(|o| o.value.as_str()).collect();
    assert_eq!(values, vec!["All", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]);
    assert_eq!(options.availability[0].label, "Any day");
}

#[test]
fn catalog_loads_from_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("doctors.json");
    fs::write(
        &path,
        r#"[{
            "id": "42",
            "name": "Dr. Test",
            "specialty": "Cardiology",
            "rating": 4.2,
            "availability": ["Mon"],
            "location": "Somewhere",
            "photo": "https://example.com/p.jpg",
            "timeSlots": [{"day": "Mon", "start": "09:00", "end": "10:00"}]
        }]"#,
    )
    .unwrap();

    let catalog = DoctorCatalog::from_json_file(&path).unwrap();
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.get("42").unwrap().time_slots[0].label(), "Mon 09:00 – 10:00");
}

#[test]
fn catalog_file_with_inverted_slot_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("doctors.json");
    fs::write(
        &path,
        r#"[{
            "id": "42",
            "name": "Dr. Test",
            "specialty": "Cardiology",
            "rating": 4.2,
            "availability": ["Mon"],
            "location": "Somewhere",
            "photo": "https://example.com/p.jpg",
            "timeSlots": [{"day": "Mon", "start": "11:00", "end": "10:00"}]
        }]"#,
    )
    .unwrap();

    assert!(DoctorCatalog::from_json_file(&path).is_err());
}
