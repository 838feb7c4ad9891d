// libs/auth-cell/src/services/users.rs
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, error, warn};

use shared_database::{keys, KeyValueStore, LocalStore, StorageError};
use shared_models::auth::{access_token_for, User, UserId, UserProfile};

/// The `users` list plus the session keys that point into it.
///
/// `users` is the only place a user record lives. `userData` holds a
/// password-free snapshot whose id is resolved against `users` on every read.
///
/// Clones share one write lock. Callers hold [`UserRepository::lock`] across
/// any check-then-write sequence; the methods here never take it themselves.
#[derive(Clone)]
pub struct UserRepository {
    store: LocalStore,
    write_lock: Arc<Mutex<()>>,
}

impl UserRepository {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store: LocalStore::new(backend),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn lock(&self) -> Result<MutexGuard<'_, ()>, StorageError> {
        self.write_lock
            .lock()
            .map_err(|_| StorageError::Unavailable("user write lock poisoned".to_string()))
    }

    /// Run `write`, putting `keys` back to their previous raw values if it
    /// fails, so a multi-key update lands completely or not at all.
    pub fn all_or_nothing<T>(
        &self,
        keys: &[&str],
        write: impl FnOnce() -> Result<T, StorageError>,
    ) -> Result<T, StorageError> {
        let backend = self.store.backend();
        let saved = keys
            .iter()
            .map(|key| Ok((*key, backend.get(key)?)))
            .collect::<Result<Vec<_>, StorageError>>()?;

        write().map_err(|e| {
            for (key, previous) in saved {
                let restored = match &previous {
                    Some(raw) => backend.set(key, raw),
                    None => backend.remove(key),
                };
                if let Err(restore_err) = restored {
                    error!("Could not restore '{}' after a failed write: {}", key, restore_err);
                }
            }
            e
        })
    }

    pub fn all(&self) -> Result<Vec<User>, StorageError> {
        self.store.read_list(keys::USERS)
    }

    pub fn find_by_email(&self, email: &str) -> Result<Option<User>, StorageError> {
        Ok(self.all()?.into_iter().find(|u| u.email == email))
    }

    pub fn find_by_id(&self, id: &UserId) -> Result<Option<User>, StorageError> {
        Ok(self.all()?.into_iter().find(|u| &u.id == id))
    }

    pub fn insert(&self, user: &User) -> Result<(), StorageError> {
        let mut list = self.store.load_list(keys::USERS)?;
        list.push(user)?;
        self.store.save_list(&list)
    }

    /// Rewrite the stored record with the same id. Returns false if there is
    /// no such record.
    pub fn replace(&self, user: &User) -> Result<bool, StorageError> {
        let wanted = serde_json::to_value(&user.id)?;
        let mut list = self.store.load_list(keys::USERS)?;

        if !list.replace_first(|entry| entry["id"] == wanted, user)? {
            return Ok(false);
        }
        self.store.save_list(&list)?;
        Ok(true)
    }

    /// The signed-in user, if the snapshot's id still names a stored user.
    pub fn current_user(&self) -> Result<Option<User>, StorageError> {
        let Some(snapshot) = self.store.read_json::<UserProfile>(keys::USER_DATA)? else {
            return Ok(None);
        };

        let user = self.find_by_id(&snapshot.id)?;
        if user.is_none() {
            warn!("Session refers to unknown user {}", snapshot.id);
        }
        Ok(user)
    }

    pub fn set_current(&self, user: &User) -> Result<(), StorageError> {
        debug!("Setting current user {}", user.id);
        self.store.write_json(keys::USER_DATA, &user.profile())
    }

    pub fn write_access_token(&self, id: &UserId) -> Result<(), StorageError> {
        self.store.write_json(keys::ACCESS_TOKEN, &access_token_for(id))
    }

    pub fn access_token(&self) -> Result<Option<String>, StorageError> {
        self.store.read_json(keys::ACCESS_TOKEN)
    }

    pub fn clear_session(&self) -> Result<(), StorageError> {
        self.store.remove(keys::ACCESS_TOKEN)?;
        self.store.remove(keys::USER_DATA)
    }
}
