// libs/appointment-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use tracing::info;

use doctor_cell::models::FilterOption;
use shared_models::error::AppError;

use crate::models::{
    AppointmentError, BookAppointmentRequest, BookingState, SelectDoctorRequest,
    SelectSlotRequest, BOOKED_MESSAGE, CANCELLED_MESSAGE,
};
use crate::state::AppointmentState;

/// Run a storage call on the blocking pool so file I/O stays off the async
/// workers.
async fn blocking<T, F>(call: F) -> Result<T, AppError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, AppointmentError> + Send + 'static,
{
    tokio::task::spawn_blocking(call)
        .await
        .map_err(|e| AppError::Internal(format!("appointment task failed: {}", e)))?
        .map_err(AppError::from)
}

fn booking_view(state: &BookingState) -> Value {
    let slots: Vec<FilterOption> = state
        .doctor()
        .map(|doctor| {
            doctor
                .time_slots
                .iter()
                .map(|slot| FilterOption {
                    label: slot.label(),
                    value: slot.key(),
                })
                .collect()
        })
        .unwrap_or_default();

    json!({
        "booking": state,
        "slots": slots,
        "canConfirm": state.is_confirmable(),
    })
}

// ==============================================================================
// APPOINTMENT HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn list_appointments(
    State(state): State<Arc<AppointmentState>>,
) -> Result<Json<Value>, AppError> {
    let store = state.store.clone();
    let appointments = blocking(move || Ok(store.list()?)).await?;

    Ok(Json(json!({
        "total": appointments.len(),
        "appointments": appointments,
    })))
}

/// One-shot booking of `{doctorId, slot}`; does not disturb the interactive
/// booking session.
#[axum::debug_handler]
pub async fn book_appointment(
    State(state): State<Arc<AppointmentState>>,
    Json(request): Json<BookAppointmentRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let doctor = state.catalog.require(&request.doctor_id)?.clone();
    let mut flow = state.detached_flow();
    let appointment = blocking(move || flow.book(doctor, request.slot)).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "appointment": appointment,
            "message": BOOKED_MESSAGE,
        })),
    ))
}

#[axum::debug_handler]
pub async fn cancel_appointment(
    State(state): State<Arc<AppointmentState>>,
    Path(appointment_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let store = state.store.clone();
    let removed = blocking(move || Ok(store.remove(&appointment_id)?)).await?;

    Ok(Json(json!({
        "removed": removed,
        "message": if removed { CANCELLED_MESSAGE } else { "No appointment with that id" },
    })))
}

// ==============================================================================
// BOOKING SESSION HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn get_booking(
    State(state): State<Arc<AppointmentState>>,
) -> Result<Json<Value>, AppError> {
    let flow = state.booking.lock().await;
    Ok(Json(booking_view(flow.state())))
}

#[axum::debug_handler]
pub async fn select_doctor(
    State(state): State<Arc<AppointmentState>>,
    Json(request): Json<SelectDoctorRequest>,
) -> Result<Json<Value>, AppError> {
    let doctor = state.catalog.require(&request.doctor_id)?.clone();

    let mut flow = state.booking.lock().await;
    flow.select_doctor(doctor);

    Ok(Json(booking_view(flow.state())))
}

#[axum::debug_handler]
pub async fn select_slot(
    State(state): State<Arc<AppointmentState>>,
    Json(request): Json<SelectSlotRequest>,
) -> Result<Json<Value>, AppError> {
    let mut flow = state.booking.lock().await;
    flow.select_slot(request.slot)?;

    Ok(Json(booking_view(flow.state())))
}

#[axum::debug_handler]
pub async fn confirm_booking(
    State(state): State<Arc<AppointmentState>>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let mut flow = state.booking.lock().await;
    let appointment = flow.confirm()?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "appointment": appointment,
            "message": BOOKED_MESSAGE,
        })),
    ))
}

#[axum::debug_handler]
pub async fn close_booking(
    State(state): State<Arc<AppointmentState>>,
) -> Result<Json<Value>, AppError> {
    let mut flow = state.booking.lock().await;
    let previous = flow.close();
    if previous != BookingState::Idle {
        info!("Booking flow closed without confirming");
    }

    Ok(Json(booking_view(flow.state())))
}
