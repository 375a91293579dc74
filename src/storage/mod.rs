//! Key-value persistence for the max score, with an in-memory fallback.

use bevy::prelude::*;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::game::MAX_SCORE_KEY;

/// Storage error wrapper.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("corrupt score file: {0}")]
    Json(#[from] serde_json::Error),
}

/// String key-value store.
pub trait ScoreStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Volatile store used when nothing can be written to disk.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl ScoreStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// A JSON object of string values in a single file, rewritten on every set.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Opens `path`, creating parent directories. A missing file is an
    /// empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StorageError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let entries = match fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => BTreeMap::new(),
            Ok(raw) => parse_entries(&raw)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(StorageError::Io { path, source }),
        };
        Ok(JsonFileStore { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        let raw = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, raw).map_err(|source| StorageError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

/// Reads a JSON object into string entries. Numbers and booleans are kept
/// in their JSON spelling so hand-edited files like `{"maxScore": 12}` load;
/// nested values are skipped.
fn parse_entries(raw: &str) -> Result<BTreeMap<String, String>, StorageError> {
    let object: Map<String, Value> = serde_json::from_str(raw)?;
    let mut entries = BTreeMap::new();
    for (key, value) in object {
        match value {
            Value::String(text) => {
                entries.insert(key, text);
            }
            Value::Number(number) => {
                entries.insert(key, number.to_string());
            }
            Value::Bool(flag) => {
                entries.insert(key, flag.to_string());
            }
            other => warn!("Skipping unsupported score entry {key:?}: {other}"),
        }
    }
    Ok(entries)
}

/// File-backed store at `path`, or a memory store when the file is unusable.
pub fn open_store(path: &Path) -> Box<dyn ScoreStore> {
    match JsonFileStore::open(path) {
        Ok(store) => {
            info!("Scores stored in {}", store.path().display());
            Box::new(store)
        }
        Err(err) => {
            warn!("Score storage unavailable ({err}), keeping scores in memory");
            Box::new(MemoryStore::default())
        }
    }
}

/// Reads the max score; anything missing or unreadable counts as 0.
pub fn load_max_score(store: &dyn ScoreStore) -> u32 {
    match store.get(MAX_SCORE_KEY) {
        Ok(Some(raw)) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring malformed max score {raw:?}");
            0
        }),
        Ok(None) => 0,
        Err(err) => {
            warn!("Failed to read max score: {err}");
            0
        }
    }
}

/// Writes the max score, logging instead of failing.
pub fn save_max_score(store: &mut dyn ScoreStore, score: u32) {
    if let Err(err) = store.set(MAX_SCORE_KEY, &score.to_string()) {
        warn!("Failed to persist max score {score}: {err}");
    }
}
