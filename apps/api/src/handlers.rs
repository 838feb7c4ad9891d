use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use appointment_cell::models::AppointmentError;
use shared_models::error::AppError;

use crate::dashboard::DashboardSummary;
use crate::navigation;
use crate::state::ApiState;

#[derive(Debug, Default, Deserialize)]
pub struct ResolveQuery {
    pub path: Option<String>,
}

#[axum::debug_handler]
pub async fn resolve_page(Query(query): Query<ResolveQuery>) -> Json<Value> {
    let resolution = navigation::resolve(query.path.as_deref().unwrap_or("/"));
    Json(json!(resolution))
}

#[axum::debug_handler]
pub async fn get_dashboard_summary(
    State(state): State<ApiState>,
) -> Result<Json<Value>, AppError> {
    let user = state.auth.current_user()?;
    let appointment_count = state
        .appointments
        .store
        .count()
        .map_err(AppointmentError::from)?;

    let summary = DashboardSummary::build(user, appointment_count, state.catalog.metrics());
    Ok(Json(json!(summary)))
}
