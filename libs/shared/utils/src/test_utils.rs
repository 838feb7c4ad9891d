use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, Response},
};
use serde_json::Value;
use tempfile::TempDir;

use shared_config::{AppConfig, StorageBackend};
use shared_database::{FileStore, KeyValueStore, LocalStore, MemoryStore};

pub struct TestConfig {
    pub storage_backend: StorageBackend,
    pub storage_path: PathBuf,
    pub login_redirect_delay_ms: u64,
    pub logout_redirect_delay_ms: u64,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            storage_backend: StorageBackend::Memory,
            storage_path: PathBuf::from("test-storage.json"),
            login_redirect_delay_ms: 1000,
            logout_redirect_delay_ms: 1500,
        }
    }
}

impl TestConfig {
    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            bind_addr: "127.0.0.1:0".to_string(),
            storage_backend: self.storage_backend,
            storage_path: self.storage_path.clone(),
            doctor_catalog_path: None,
            login_redirect_delay_ms: self.login_redirect_delay_ms,
            logout_redirect_delay_ms: self.logout_redirect_delay_ms,
        }
    }
}

/// Fresh in-memory storage port.
pub fn memory_backend() -> Arc<dyn KeyValueStore> {
    Arc::new(MemoryStore::new())
}

/// In-memory storage seeded with raw `(key, json text)` pairs.
pub fn seeded_backend(entries: &[(&str, &str)]) -> Arc<dyn KeyValueStore> {
    Arc::new(MemoryStore::with_entries(entries.iter().copied()))
}

pub fn memory_store() -> LocalStore {
    LocalStore::new(memory_backend())
}

/// File-backed storage in a temp dir. Keep the `TempDir` alive for the
/// duration of the test.
pub fn file_backend() -> (TempDir, Arc<dyn KeyValueStore>) {
    let dir = tempfile::tempdir().expect("temp dir");
    let store = FileStore::open(dir.path().join("storage.json")).expect("file storage");
    (dir, Arc::new(store))
}

pub fn json_request(method: Method, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);

    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    }
}

pub async fn response_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body");
    serde_json::from_slice(&bytes).expect("json body")
}
