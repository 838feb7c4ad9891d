use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::keys::corrupt_backup_key;
use crate::storage::{KeyValueStore, StorageError};

/// JSON view over a [`KeyValueStore`].
///
/// Reads never fail on bad data: a value that does not parse is treated as
/// absent (or as an empty list) and logged. I/O failures from the port are
/// still reported.
#[derive(Clone)]
pub struct LocalStore {
    backend: Arc<dyn KeyValueStore>,
}

impl LocalStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &Arc<dyn KeyValueStore> {
        &self.backend
    }

    pub fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let Some(raw) = self.backend.get(key)? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                warn!("Ignoring unparsable value under '{}': {}", key, e);
                Ok(None)
            }
        }
    }

    pub fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let serialized = serde_json::to_string(value)?;
        self.backend.set(key, &serialized)
    }

    pub fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.backend.remove(key)
    }

    pub fn load_list(&self, key: &str) -> Result<JsonList, StorageError> {
        let raw = self.backend.get(key)?;
        Ok(JsonList::parse(key, raw))
    }

    /// Typed read of a list, skipping anything malformed.
    pub fn read_list<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, StorageError> {
        Ok(self.load_list(key)?.items())
    }

    /// Persist a list. If the value it was loaded from was unreadable, the
    /// original text is copied to the first free `<key>.corrupt[.N]` first.
    pub fn save_list(&self, list: &JsonList) -> Result<(), StorageError> {
        if let Some(raw) = &list.corrupt {
            let backup = self.free_backup_key(&list.key)?;
            warn!("Preserving unreadable '{}' value under '{}'", list.key, backup);
            self.backend.set(&backup, raw)?;
        }

        let serialized = serde_json::to_string(&list.entries)?;
        self.backend.set(&list.key, &serialized)?;
        debug!("Saved {} entries under '{}'", list.entries.len(), list.key);
        Ok(())
    }

    fn free_backup_key(&self, key: &str) -> Result<String, StorageError> {
        let mut attempt = 0;
        loop {
            let candidate = corrupt_backup_key(key, attempt);
            if self.backend.get(&candidate)?.is_none() {
                return Ok(candidate);
            }
            attempt += 1;
        }
    }
}

/// A stored JSON array kept as raw values so entries this build cannot
/// parse survive a read-modify-write cycle.
#[derive(Debug, Clone)]
pub struct JsonList {
    key: String,
    entries: Vec<Value>,
    corrupt: Option<String>,
}

impl JsonList {
    fn parse(key: &str, raw: Option<String>) -> Self {
        let mut list = Self {
            key: key.to_string(),
            entries: Vec::new(),
            corrupt: None,
        };

        let Some(raw) = raw else {
            return list;
        };

        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Array(entries)) => list.entries = entries,
            Ok(Value::Null) => {}
            Ok(other) => {
                warn!("Expected a list under '{}', found {}; reading it as empty", key, kind(&other));
                list.corrupt = Some(raw);
            }
            Err(e) => {
                warn!("Unparsable list under '{}' ({}); reading it as empty", key, e);
                list.corrupt = Some(raw);
            }
        }

        list
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_corrupt(&self) -> bool {
        self.corrupt.is_some()
    }

    pub fn items<T: DeserializeOwned>(&self) -> Vec<T> {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| match T::deserialize(entry) {
                Ok(item) => Some(item),
                Err(e) => {
                    warn!("Skipping malformed entry {} under '{}': {}", index, self.key, e);
                    None
                }
            })
            .collect()
    }

    pub fn push<T: Serialize>(&mut self, item: &T) -> Result<(), StorageError> {
        self.entries.push(serde_json::to_value(item)?);
        Ok(())
    }

    /// Remove the first entry matching `predicate`. Returns whether one was
    /// removed.
    pub fn remove_first(&mut self, predicate: impl Fn(&Value) -> bool) -> bool {
        match self.entries.iter().position(predicate) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// Replace the first entry matching `predicate`. Returns whether one was
    /// replaced.
    pub fn replace_first<T: Serialize>(
        &mut self,
        predicate: impl Fn(&Value) -> bool,
        item: &T,
    ) -> Result<bool, StorageError> {
        match self.entries.iter().position(predicate) {
            Some(index) => {
                self.entries[index] = serde_json::to_value(item)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, MockKeyValueStore};
    use serde::Deserialize;
    use assert_matches::assert_matches;
    use serde_json::json;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Entry {
        id: String,
    }

    fn store_with(key: &str, raw: &str) -> LocalStore {
        LocalStore::new(Arc::new(MemoryStore::with_entries([(key, raw)])))
    }

    #[test]
    fn missing_list_reads_empty() {
        let store = LocalStore::new(Arc::new(MemoryStore::new()));
        let list = store.load_list("things").unwrap();
        assert!(list.is_empty());
        assert!(!list.is_corrupt());
    }

    #[test]
    fn null_list_is_not_corrupt() {
        let list = store_with("things", "null").load_list("things").unwrap();
        assert!(list.is_empty());
        assert!(!list.is_corrupt());
    }

    #[test]
    fn object_instead_of_list_is_corrupt() {
        let list = store_with("things", r#"{"id":"1"}"#).load_list("things").unwrap();
        assert!(list.is_empty());
        assert!(list.is_corrupt());
    }

    #[test]
    fn malformed_entries_are_skipped_but_kept() {
        let store = store_with("things", r#"[{"id":"1"},{"nope":true}]"#);
        let mut list = store.load_list("things").unwrap();
        assert_eq!(list.items::<Entry>(), vec![Entry { id: "1".into() }]);

        list.push(&Entry { id: "2".into() }).unwrap();
        store.save_list(&list).unwrap();

        let raw: Value = store.read_json("things").unwrap().unwrap();
        assert_eq!(raw, json!([{"id":"1"},{"nope":true},{"id":"2"}]));
    }

    #[test]
    fn remove_first_only_removes_one() {
        let mut list = store_with("things", r#"[{"id":"1"},{"id":"1"}]"#)
            .load_list("things")
            .unwrap();
        assert!(list.remove_first(|v| v["id"] == "1"));
        assert_eq!(list.len(), 1);
        assert!(!list.remove_first(|v| v["id"] == "9"));
    }

    #[test]
    fn second_corruption_keeps_the_first_backup() {
        let store = store_with("things", "first garbage");
        let list = store.load_list("things").unwrap();
        store.save_list(&list).unwrap();

        store.backend().set("things", "second garbage").unwrap();
        let list = store.load_list("things").unwrap();
        assert!(list.is_corrupt());
        store.save_list(&list).unwrap();

        let backend = store.backend();
        assert_eq!(backend.get("things.corrupt").unwrap().as_deref(), Some("first garbage"));
        assert_eq!(backend.get("things.corrupt.1").unwrap().as_deref(), Some("second garbage"));
        assert_eq!(backend.get("things").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn read_json_degrades_to_none() {
        let store = store_with("userData", "{not json");
        let value: Option<Entry> = store.read_json("userData").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn port_failures_are_reported() {
        let mut mock = MockKeyValueStore::new();
        mock.expect_get()
            .returning(|_| Err(StorageError::Unavailable("quota exceeded".to_string())));

        let store = LocalStore::new(Arc::new(mock));
        assert_matches!(
            store.load_list("appointments"),
            Err(StorageError::Unavailable(msg)) if msg == "quota exceeded"
        );
    }
}
