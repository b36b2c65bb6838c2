//! Durable key-value storage for the attendance snapshot.

use std::{
    collections::HashMap,
    fs, io,
    path::PathBuf,
};

use shared::{
    domain::AttendanceState,
    error::SnapshotError,
    snapshot::{decode_state, encode_state},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("invalid storage key '{0}'")]
    InvalidKey(String),
    #[error("storage i/o failed for key '{key}'")]
    Io {
        key: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to encode attendance state")]
    Encode(#[source] serde_json::Error),
}

/// Text values stored under string keys, in the manner of browser local storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        (**self).set(key, value)
    }
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One `<key>.json` file per key under a root directory.
///
/// Writes go to a sibling temp file first and are renamed into place, so a
/// crash mid-write leaves the previous value readable.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path_for(&self, key: &str) -> Result<PathBuf, PersistenceError> {
        validate_key(key)?;
        Ok(self.root.join(format!("{key}.json")))
    }
}

fn validate_key(key: &str) -> Result<(), PersistenceError> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
    if valid {
        Ok(())
    } else {
        Err(PersistenceError::InvalidKey(key.to_string()))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(PersistenceError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        let path = self.path_for(key)?;
        let io_err = |source: io::Error| PersistenceError::Io {
            key: key.to_string(),
            source,
        };

        fs::create_dir_all(&self.root).map_err(io_err)?;
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, value).map_err(io_err)?;
        fs::rename(&tmp_path, &path).map_err(io_err)?;
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Storage(#[from] PersistenceError),
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

/// Saves and restores [`AttendanceState`] under a single key.
#[derive(Debug)]
pub struct StatePersistence<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> StatePersistence<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// `Ok(None)` when nothing has been saved yet.
    pub fn try_load(&self) -> Result<Option<AttendanceState>, LoadError> {
        let Some(raw) = self.store.get(&self.key)? else {
            return Ok(None);
        };
        Ok(Some(decode_state(&raw)?))
    }

    /// Restores the saved state, falling back to the zero state when the
    /// blob is absent, unreadable or fails validation.
    pub fn load(&self) -> AttendanceState {
        match self.try_load() {
            Ok(Some(state)) => {
                tracing::debug!(
                    key = %self.key,
                    total = state.total(),
                    "restored attendance state"
                );
                state
            }
            Ok(None) => AttendanceState::default(),
            Err(err) => {
                tracing::warn!(
                    key = %self.key,
                    error = %err,
                    "discarding stored attendance state"
                );
                AttendanceState::default()
            }
        }
    }

    pub fn save(&mut self, state: &AttendanceState) -> Result<(), PersistenceError> {
        let raw = encode_state(state).map_err(PersistenceError::Encode)?;
        self.store.set(&self.key, &raw)
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
