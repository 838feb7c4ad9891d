use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DEFAULT_ROLE: &str = "user";

/// Stored user ids are either legacy millisecond timestamps or UUID strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    Numeric(u64),
    Text(String),
}

impl UserId {
    pub fn generate() -> Self {
        UserId::Text(Uuid::new_v4().to_string())
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserId::Numeric(id) => write!(f, "{}", id),
            UserId::Text(id) => write!(f, "{}", id),
        }
    }
}

/// Canonical user record as persisted under the `users` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub user_name: String,
    pub email: String,
    #[serde(default = "default_role")]
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
    /// Plaintext credential written by older clients. Upgraded to
    /// `password_hash` on the first successful login.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl User {
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id.clone(),
            user_name: self.user_name.clone(),
            email: self.email.clone(),
            role: self.role.clone(),
        }
    }
}

/// Password-free snapshot stored under `userData`. Only its `id` is
/// authoritative; everything else is re-read from the `users` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: UserId,
    pub user_name: String,
    pub email: String,
    #[serde(default = "default_role")]
    pub role: String,
}

fn default_role() -> String {
    DEFAULT_ROLE.to_string()
}

/// Opaque session marker, never used for authorization.
pub fn access_token_for(id: &UserId) -> String {
    format!("access_{}", id)
}
