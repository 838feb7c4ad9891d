use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_STORAGE_PATH: &str = "doctor-point-storage.json";
pub const DEFAULT_LOGIN_REDIRECT_DELAY_MS: u64 = 1000;
pub const DEFAULT_LOGOUT_REDIRECT_DELAY_MS: u64 = 1500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    Memory,
    File,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(StorageBackend::Memory),
            "file" => Ok(StorageBackend::File),
            other => Err(format!("unknown storage backend: {}", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub storage_backend: StorageBackend,
    pub storage_path: PathBuf,
    pub doctor_catalog_path: Option<PathBuf>,
    pub login_redirect_delay_ms: u64,
    pub logout_redirect_delay_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            storage_backend: StorageBackend::File,
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
            doctor_catalog_path: None,
            login_redirect_delay_ms: DEFAULT_LOGIN_REDIRECT_DELAY_MS,
            logout_redirect_delay_ms: DEFAULT_LOGOUT_REDIRECT_DELAY_MS,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            bind_addr: env::var("BIND_ADDR")
                .unwrap_or_else(|_| {
                    warn!("BIND_ADDR not set, using default {}", DEFAULT_BIND_ADDR);
                    DEFAULT_BIND_ADDR.to_string()
                }),
            storage_backend: env::var("STORAGE_BACKEND")
                .ok()
                .and_then(|value| match value.parse() {
                    Ok(backend) => Some(backend),
                    Err(e) => {
                        warn!("{}, falling back to file storage", e);
                        None
                    }
                })
                .unwrap_or(StorageBackend::File),
            storage_path: env::var("STORAGE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| {
                    warn!("STORAGE_PATH not set, using default {}", DEFAULT_STORAGE_PATH);
                    PathBuf::from(DEFAULT_STORAGE_PATH)
                }),
            doctor_catalog_path: env::var("DOCTOR_CATALOG_PATH").ok().map(PathBuf::from),
            login_redirect_delay_ms: delay_from_env(
                "LOGIN_REDIRECT_DELAY_MS",
                DEFAULT_LOGIN_REDIRECT_DELAY_MS,
            ),
            logout_redirect_delay_ms: delay_from_env(
                "LOGOUT_REDIRECT_DELAY_MS",
                DEFAULT_LOGOUT_REDIRECT_DELAY_MS,
            ),
        };

        if config.doctor_catalog_path.is_none() {
            warn!("DOCTOR_CATALOG_PATH not set, using the built-in doctor catalog");
        }

        config
    }

    pub fn is_persistent(&self) -> bool {
        self.storage_backend == StorageBackend::File
    }
}

fn delay_from_env(name: &str, default: u64) -> u64 {
    match env::var(name) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("{} is not a number ({}), using default {}", name, raw, default);
            default
        }),
        Err(_) => default,
    }
}
