use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::handlers;
use crate::services::AuthService;

pub fn auth_routes(service: Arc<AuthService>) -> Router {
    let public_routes = Router::new()
        .route("/register", post(handlers::register))
        .route("/login", post(handlers::login))
        .route("/logout", post(handlers::logout));

    // Resolved against the stored session rather than a bearer token
    let session_routes = Router::new()
        .route("/me", get(handlers::get_current_user))
        .route("/profile", put(handlers::update_profile));

    Router::new()
        .merge(public_routes)
        .merge(session_routes)
        .with_state(service)
}
