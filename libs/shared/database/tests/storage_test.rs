use std::fs;
use std::sync::Arc;

use serde_json::{json, Value};
use tempfile::tempdir;

use shared_config::{AppConfig, StorageBackend};
use shared_database::keys;
use shared_database::{open_storage, FileStore, KeyValueStore, LocalStore};

#[test]
fn file_store_persists_across_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("storage.json");

    {
        let store = FileStore::open(&path).unwrap();
        store.set(keys::APPOINTMENTS, "[]").unwrap();
        store.set(keys::ACCESS_TOKEN, "\"access_1\"").unwrap();
        store.remove(keys::ACCESS_TOKEN).unwrap();
    }

    let reopened = FileStore::open(&path).unwrap();
    assert_eq!(reopened.get(keys::APPOINTMENTS).unwrap().as_deref(), Some("[]"));
    assert_eq!(reopened.get(keys::ACCESS_TOKEN).unwrap(), None);
}

#[test]
fn file_store_moves_unreadable_file_aside() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("storage.json");
    fs::write(&path, "{ this is not json").unwrap();

    let store = FileStore::open(&path).unwrap();
    assert_eq!(store.get(keys::USERS).unwrap(), None);

    let backup = dir.path().join("storage.json.corrupt");
    assert_eq!(fs::read_to_string(backup).unwrap(), "{ this is not json");
}

#[test]
fn file_store_never_overwrites_an_earlier_backup() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("storage.json");

    fs::write(&path, "first").unwrap();
    FileStore::open(&path).unwrap();
    fs::write(&path, "second").unwrap();
    FileStore::open(&path).unwrap();

    assert_eq!(fs::read_to_string(dir.path().join("storage.json.corrupt")).unwrap(), "first");
    assert_eq!(fs::read_to_string(dir.path().join("storage.json.corrupt.1")).unwrap(), "second");
}

#[test]
fn file_store_creates_missing_parent_directories() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("storage.json");

    let store = FileStore::open(&path).unwrap();
    store.set(keys::USERS, "[]").unwrap();

    assert!(path.exists());
}

#[test]
fn corrupt_list_is_backed_up_before_overwrite() {
    let backend = Arc::new(shared_database::MemoryStore::with_entries([(
        keys::APPOINTMENTS,
        "[{\"id\": \"1\"",
    )]));
    let store = LocalStore::new(backend.clone());

    let mut list = store.load_list(keys::APPOINTMENTS).unwrap();
    assert!(list.is_corrupt());
    assert!(list.is_empty());

    list.push(&json!({"id": "2"})).unwrap();
    store.save_list(&list).unwrap();

    assert_eq!(
        backend.get("appointments.corrupt").unwrap().as_deref(),
        Some("[{\"id\": \"1\"")
    );
    let saved: Value = store.read_json(keys::APPOINTMENTS).unwrap().unwrap();
    assert_eq!(saved, json!([{"id": "2"}]));
}

#[test]
fn open_storage_honours_backend_choice() {
    let dir = tempdir().unwrap();
    let config = AppConfig {
        storage_backend: StorageBackend::Memory,
        storage_path: dir.path().join("unused.json"),
        ..AppConfig::default()
    };

    let store = open_storage(&config).unwrap();
    store.set(keys::USERS, "[]").unwrap();
    assert!(!dir.path().join("unused.json").exists());

    let config = AppConfig {
        storage_backend: StorageBackend::File,
        storage_path: dir.path().join("used.json"),
        ..AppConfig::default()
    };
    let store = open_storage(&config).unwrap();
    store.set(keys::USERS, "[]").unwrap();
    assert!(dir.path().join("used.json").exists());
}
