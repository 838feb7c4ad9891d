use std::sync::Arc;

use axum::{
    extract::{Json, State},
    http::StatusCode,
};
use serde_json::{json, Value};
use tracing::debug;

use shared_models::error::AppError;

use crate::models::{
    AuthError, LoginRequest, RegisterRequest, UpdateProfileRequest, PROFILE_UPDATED_MESSAGE,
};
use crate::services::AuthService;

/// Run a service call on the blocking pool. Hashing and file-backed storage
/// must not stall the async workers.
async fn blocking<T, F>(service: Arc<AuthService>, call: F) -> Result<T, AppError>
where
    T: Send + 'static,
    F: FnOnce(&AuthService) -> Result<T, AuthError> + Send + 'static,
{
    tokio::task::spawn_blocking(move || call(&service))
        .await
        .map_err(|e| AppError::Internal(format!("auth task failed: {}", e)))?
        .map_err(AppError::from)
}

#[axum::debug_handler]
pub async fn register(
    State(service): State<Arc<AuthService>>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    debug!("Registering new user");

    let outcome = blocking(service, move |auth| auth.register(request)).await?;
    Ok((StatusCode::CREATED, Json(json!(outcome))))
}

#[axum::debug_handler]
pub async fn login(
    State(service): State<Arc<AuthService>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<Value>, AppError> {
    debug!("Login attempt");

    let outcome = blocking(service, move |auth| auth.login(request)).await?;
    Ok(Json(json!(outcome)))
}

#[axum::debug_handler]
pub async fn logout(
    State(service): State<Arc<AuthService>>,
) -> Result<Json<Value>, AppError> {
    let outcome = blocking(service, |auth| auth.logout()).await?;
    Ok(Json(json!(outcome)))
}

#[axum::debug_handler]
pub async fn get_current_user(
    State(service): State<Arc<AuthService>>,
) -> Result<Json<Value>, AppError> {
    let user = blocking(service, |auth| auth.current_user())
        .await?
        .ok_or(AuthError::NotSignedIn)?;
    Ok(Json(json!({ "user": user })))
}

#[axum::debug_handler]
pub async fn update_profile(
    State(service): State<Arc<AuthService>>,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<Value>, AppError> {
    let user = blocking(service, move |auth| auth.update_profile(request)).await?;

    Ok(Json(json!({
        "user": user,
        "message": PROFILE_UPDATED_MESSAGE,
    })))
}
