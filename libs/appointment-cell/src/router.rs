// libs/appointment-cell/src/router.rs
use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers;
use crate::state::AppointmentState;

pub fn appointment_routes(state: Arc<AppointmentState>) -> Router {
    Router::new()
        .route("/", get(handlers::list_appointments).post(handlers::book_appointment))
        .route("/{appointment_id}", delete(handlers::cancel_appointment))
        .with_state(state)
}

pub fn booking_routes(state: Arc<AppointmentState>) -> Router {
    Router::new()
        .route("/", get(handlers::get_booking).delete(handlers::close_booking))
        .route("/doctor", post(handlers::select_doctor))
        .route("/slot", put(handlers::select_slot))
        .route("/confirm", post(handlers::confirm_booking))
        .with_state(state)
}
