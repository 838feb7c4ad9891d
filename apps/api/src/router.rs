use axum::{
    Router,
    routing::get,
};

use appointment_cell::router::{appointment_routes, booking_routes};
use auth_cell::router::auth_routes;
use doctor_cell::router::doctor_routes;

use crate::handlers;
use crate::state::ApiState;

pub fn create_router(state: ApiState) -> Router {
    let app_routes = Router::new()
        .route("/pages/resolve", get(handlers::resolve_page))
        .route("/dashboard/summary", get(handlers::get_dashboard_summary))
        .with_state(state.clone());

    Router::new()
        .route("/", get(|| async { "Doctor Point API is running!" }))
        .merge(app_routes)
        .nest("/auth", auth_routes(state.auth.clone()))
        .nest("/doctors", doctor_routes(state.catalog.clone()))
        .nest("/appointments", appointment_routes(state.appointments.clone()))
        .nest("/booking", booking_routes(state.appointments.clone()))
}
