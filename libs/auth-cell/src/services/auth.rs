// libs/auth-cell/src/services/auth.rs
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use shared_config::AppConfig;
use shared_database::{keys, KeyValueStore};
use shared_models::auth::{User, UserId, UserProfile, DEFAULT_ROLE};
use shared_models::redirect::Redirect;

use crate::models::{
    AuthError, AuthOutcome, LoginRequest, LogoutOutcome, RegisterRequest, UpdateProfileRequest,
    LOGGED_IN_MESSAGE, LOGGED_OUT_MESSAGE, REGISTERED_MESSAGE,
};
use crate::services::password::PasswordService;
use crate::services::users::UserRepository;

pub struct AuthService {
    users: UserRepository,
    login_redirect_delay_ms: u64,
    logout_redirect_delay_ms: u64,
}

impl AuthService {
    pub fn new(backend: Arc<dyn KeyValueStore>, config: &AppConfig) -> Self {
        Self {
            users: UserRepository::new(backend),
            login_redirect_delay_ms: config.login_redirect_delay_ms,
            logout_redirect_delay_ms: config.logout_redirect_delay_ms,
        }
    }

    #[instrument(skip(self, request), fields(email = %request.email))]
    pub fn register(&self, request: RegisterRequest) -> Result<AuthOutcome, AuthError> {
        if [
            &request.user_name,
            &request.email,
            &request.password,
            &request.confirm_password,
        ]
        .iter()
        .any(|field| field.trim().is_empty())
        {
            return Err(AuthError::MissingFields);
        }
        if request.password != request.confirm_password {
            return Err(AuthError::PasswordMismatch);
        }
        // Hashed outside the write lock; the email check below runs inside it.
        let password_hash = PasswordService::hash_password(&request.password)?;

        let _guard = self.users.lock()?;
        if self.users.find_by_email(&request.email)?.is_some() {
            return Err(AuthError::EmailTaken);
        }

        let user = User {
            id: UserId::generate(),
            user_name: request.user_name,
            email: request.email,
            role: DEFAULT_ROLE.to_string(),
            password_hash: Some(password_hash),
            password: None,
        };

        self.users.all_or_nothing(&[keys::USERS, keys::USER_DATA], || {
            self.users.insert(&user)?;
            self.users.set_current(&user)
        })?;
        info!("Registered user {}", user.id);

        Ok(AuthOutcome {
            user: user.profile(),
            access_token: None,
            message: REGISTERED_MESSAGE.to_string(),
            redirect: Redirect::new("/login", self.login_redirect_delay_ms),
        })
    }

    /// Every mismatch reports the same error, whichever field was wrong.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub fn login(&self, request: LoginRequest) -> Result<AuthOutcome, AuthError> {
        if request.email.trim().is_empty() || request.password.is_empty() {
            return Err(AuthError::MissingFields);
        }

        let user = self
            .users
            .find_by_email(&request.email)?
            .ok_or(AuthError::InvalidCredentials)?;

        let upgrade = match self.check_password(&user, &request.password)? {
            PasswordCheck::Mismatch => return Err(AuthError::InvalidCredentials),
            PasswordCheck::Hashed => None,
            PasswordCheck::Legacy => Some(PasswordService::hash_password(&request.password)?),
        };

        let _guard = self.users.lock()?;
        self.users.all_or_nothing(&[keys::USER_DATA, keys::ACCESS_TOKEN], || {
            self.users.set_current(&user)?;
            self.users.write_access_token(&user.id)
        })?;
        if let Some(hash) = upgrade {
            self.upgrade_legacy_password(&user, hash);
        }
        info!("User {} logged in", user.id);

        Ok(AuthOutcome {
            access_token: self.users.access_token()?,
            user: user.profile(),
            message: LOGGED_IN_MESSAGE.to_string(),
            redirect: Redirect::new("/dashboard", self.login_redirect_delay_ms),
        })
    }

    /// Clears the session keys. Safe to call when nobody is signed in.
    pub fn logout(&self) -> Result<LogoutOutcome, AuthError> {
        let _guard = self.users.lock()?;
        self.users
            .all_or_nothing(&[keys::ACCESS_TOKEN, keys::USER_DATA], || self.users.clear_session())?;
        info!("Session cleared");

        Ok(LogoutOutcome {
            message: LOGGED_OUT_MESSAGE.to_string(),
            redirect: Redirect::new("/login", self.logout_redirect_delay_ms),
        })
    }

    pub fn current_user(&self) -> Result<Option<UserProfile>, AuthError> {
        Ok(self.users.current_user()?.map(|u| u.profile()))
    }

    /// The only write path for user details: the stored record and the
    /// session snapshot are rewritten together.
    #[instrument(skip(self, request))]
    pub fn update_profile(&self, request: UpdateProfileRequest) -> Result<UserProfile, AuthError> {
        let _guard = self.users.lock()?;
        let mut user = self.users.current_user()?.ok_or(AuthError::NotSignedIn)?;

        if let Some(user_name) = request.user_name {
            if user_name.trim().is_empty() {
                return Err(AuthError::EmptyProfileField);
            }
            user.user_name = user_name;
        }

        if let Some(email) = request.email {
            if email.trim().is_empty() {
                return Err(AuthError::EmptyProfileField);
            }
            if email != user.email {
                if let Some(other) = self.users.find_by_email(&email)? {
                    if other.id != user.id {
                        return Err(AuthError::EmailTaken);
                    }
                }
            }
            user.email = email;
        }

        let replaced = self.users.all_or_nothing(&[keys::USERS, keys::USER_DATA], || {
            if !self.users.replace(&user)? {
                return Ok(false);
            }
            self.users.set_current(&user)?;
            Ok(true)
        })?;
        if !replaced {
            return Err(AuthError::NotSignedIn);
        }
        info!("Updated profile for user {}", user.id);

        Ok(user.profile())
    }

    /// Verify against the stored hash, or against a legacy plaintext
    /// password.
    fn check_password(&self, user: &User, password: &str) -> Result<PasswordCheck, AuthError> {
        if let Some(hash) = &user.password_hash {
            return match PasswordService::verify_password(password, hash) {
                Ok(true) => Ok(PasswordCheck::Hashed),
                Ok(false) => Ok(PasswordCheck::Mismatch),
                Err(e) => {
                    warn!("Stored hash for user {} is unreadable: {}", user.id, e);
                    Ok(PasswordCheck::Mismatch)
                }
            };
        }

        if user.password.as_deref() == Some(password) {
            Ok(PasswordCheck::Legacy)
        } else {
            Ok(PasswordCheck::Mismatch)
        }
    }

    /// Swap a legacy plaintext password for `hash`. Called with the write
    /// lock held. The record is re-read so a concurrent profile edit is kept;
    /// a failure leaves the plaintext for the next login to retry.
    fn upgrade_legacy_password(&self, user: &User, hash: String) {
        let upgraded = self.users.find_by_id(&user.id).and_then(|current| match current {
            Some(mut current) if current.password_hash.is_none() => {
                current.password_hash = Some(hash);
                current.password = None;
                self.users.replace(&current)
            }
            _ => Ok(false),
        });

        match upgraded {
            Ok(true) => info!("Upgraded legacy password for user {}", user.id),
            Ok(false) => debug!("Legacy password for user {} already upgraded", user.id),
            Err(e) => warn!("Could not upgrade legacy password for user {}: {}", user.id, e),
        }
    }
}

enum PasswordCheck {
    Mismatch,
    Hashed,
    Legacy,
}
