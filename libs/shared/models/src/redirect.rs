use serde::{Deserialize, Serialize};

/// Client-side navigation hint returned after login, registration and logout.
/// The delay is cosmetic; the server never sleeps on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Redirect {
    pub to: String,
    pub after_ms: u64,
}

impl Redirect {
    pub fn new(to: impl Into<String>, after_ms: u64) -> Self {
        Self {
            to: to.into(),
            after_ms,
        }
    }
}
