// libs/auth-cell/src/models.rs
use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared_database::StorageError;
use shared_models::auth::UserProfile;
use shared_models::error::AppError;
use shared_models::redirect::Redirect;

pub const REGISTERED_MESSAGE: &str = "Registration successful!";
pub const LOGGED_IN_MESSAGE: &str = "Login successful!";
pub const LOGGED_OUT_MESSAGE: &str = "Logged out successfully!";
pub const PROFILE_UPDATED_MESSAGE: &str = "Profile updated successfully!";

// ==============================================================================
// REQUEST MODELS
// ==============================================================================

/// Missing fields deserialize as empty so they are reported the same way as
/// blank ones.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RegisterRequest {
    pub user_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Partial profile edit. Absent fields are left as they are; the role is
/// not editable and is ignored if sent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub user_name: Option<String>,
    pub email: Option<String>,
}

// ==============================================================================
// RESPONSE MODELS
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthOutcome {
    pub user: UserProfile,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    pub message: String,
    pub redirect: Redirect,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogoutOutcome {
    pub message: String,
    pub redirect: Redirect,
}

// ==============================================================================
// ERROR HANDLING
// ==============================================================================

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Please fill in all fields")]
    MissingFields,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("User with this email already exists")]
    EmailTaken,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Please log in first")]
    NotSignedIn,

    #[error("Name and email cannot be empty")]
    EmptyProfileField,

    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl From<argon2::password_hash::Error> for AuthError {
    fn from(err: argon2::password_hash::Error) -> Self {
        AuthError::Hashing(err.to_string())
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingFields
            | AuthError::PasswordMismatch
            | AuthError::EmptyProfileField => AppError::ValidationError(err.to_string()),
            AuthError::EmailTaken => AppError::Conflict(err.to_string()),
            AuthError::InvalidCredentials | AuthError::NotSignedIn => AppError::Auth(err.to_string()),
            AuthError::Hashing(_) => AppError::Internal(err.to_string()),
            AuthError::Storage(e) => AppError::Storage(e.to_string()),
        }
    }
}
