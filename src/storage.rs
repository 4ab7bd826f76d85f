use crate::models::{Exercise, PersistedState};
use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
    sync::{Mutex, PoisonError},
};
use thiserror::Error;
use tracing::error;

/// Slot the exercise list is written under.
pub const STORAGE_KEY: &str = "exercise-storage";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read slot `{key}`: {source}")]
    Read { key: String, source: io::Error },
    #[error("failed to write slot `{key}`: {source}")]
    Write { key: String, source: io::Error },
    #[error("failed to encode exercises: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("failed to decode exercises: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Durable string-valued key/value slots.
pub trait SlotStorage: Send + Sync {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Stores each slot as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl SlotStorage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.slot_path(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Read {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let write_err = |source| StorageError::Write {
            key: key.to_string(),
            source,
        };
        fs::create_dir_all(&self.dir).map_err(write_err)?;

        // Write beside the slot and rename so a crash never leaves a torn file.
        let path = self.slot_path(key);
        let staging = path.with_extension("json.tmp");
        fs::write(&staging, value).map_err(write_err)?;
        fs::rename(&staging, &path).map_err(write_err)?;
        Ok(())
    }
}

/// Process-local slots, used when nothing should touch the disk.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_slot(key: &str, value: impl Into<String>) -> Self {
        let storage = Self::default();
        storage.slots_mut().insert(key.to_string(), value.into());
        storage
    }

    fn slots_mut(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SlotStorage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.slots_mut().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.slots_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

pub fn encode_exercises(exercises: &[Exercise]) -> Result<String, StorageError> {
    serde_json::to_string(&PersistedState::borrowed(exercises)).map_err(StorageError::Encode)
}

pub fn decode_exercises(payload: &str) -> Result<Vec<Exercise>, StorageError> {
    serde_json::from_str::<PersistedState<'static>>(payload)
        .map(PersistedState::into_exercises)
        .map_err(StorageError::Decode)
}

/// Reads the exercise slot, falling back to an empty list when it is
/// missing or cannot be decoded.
pub fn load_exercises(storage: &dyn SlotStorage) -> Vec<Exercise> {
    match storage.read(STORAGE_KEY) {
        Ok(Some(payload)) => match decode_exercises(&payload) {
            Ok(exercises) => exercises.into_iter().filter(is_loadable).collect(),
            Err(err) => {
                error!("{err}");
                Vec::new()
            }
        },
        Ok(None) => Vec::new(),
        Err(err) => {
            error!("{err}");
            Vec::new()
        }
    }
}

/// Records the form would never have accepted are dropped on load.
fn is_loadable(exercise: &Exercise) -> bool {
    let loadable = exercise.duration > 0 && !exercise.name.trim().is_empty();
    if !loadable {
        error!(id = %exercise.id, duration = exercise.duration, "dropping invalid stored exercise");
    }
    loadable
}

pub fn persist_exercises(
    storage: &dyn SlotStorage,
    exercises: &[Exercise],
) -> Result<(), StorageError> {
    let payload = encode_exercises(exercises)?;
    storage.write(STORAGE_KEY, &payload)
}
