use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use shared_models::error::AppError;

use crate::models::{DayFilter, DirectoryFilters, SpecialtyFilter};
use crate::services::{DirectoryService, DoctorCatalog};

#[derive(Debug, Default, Deserialize)]
pub struct DoctorSearchQuery {
    pub specialty: Option<String>,
    pub day: Option<String>,
}

impl DoctorSearchQuery {
    /// `None` when the caller sent no selection at all.
    pub fn filters(&self) -> Result<Option<DirectoryFilters>, AppError> {
        if self.specialty.is_none() && self.day.is_none() {
            return Ok(None);
        }

        Ok(Some(DirectoryFilters {
            specialty: SpecialtyFilter::parse(self.specialty.as_deref()),
            day: DayFilter::parse(self.day.as_deref())?,
        }))
    }
}

// ==============================================================================
// PUBLIC HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn list_doctors(
    State(catalog): State<Arc<DoctorCatalog>>,
    Query(query): Query<DoctorSearchQuery>,
) -> Result<Json<Value>, AppError> {
    let filters = query.filters()?;
    let listing = DirectoryService::new().listing(&catalog, filters.as_ref());

    Ok(Json(json!(listing)))
}

#[axum::debug_handler]
pub async fn get_directory_options(
    State(catalog): State<Arc<DoctorCatalog>>,
) -> Result<Json<Value>, AppError> {
    let options = DirectoryService::new().options(&catalog);
    Ok(Json(json!(options)))
}

#[axum::debug_handler]
pub async fn get_doctor(
    State(catalog): State<Arc<DoctorCatalog>>,
    Path(doctor_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let doctor = catalog.require(&doctor_id)?;
    Ok(Json(json!(doctor)))
}
