use std::sync::Arc;

use axum::{routing::get, Router};

use crate::handlers;
use crate::services::DoctorCatalog;

pub fn doctor_routes(catalog: Arc<DoctorCatalog>) -> Router {
    // The directory is public reference data
    Router::new()
        .route("/", get(handlers::list_doctors))
        .route("/options", get(handlers::get_directory_options))
        .route("/{doctor_id}", get(handlers::get_doctor))
        .with_state(catalog)
}
