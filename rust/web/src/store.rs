//! Snapshot persistence for the table and the user directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use nebula_engine::table::TableState;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::auth::UserRecord;

pub const TABLE_FILE: &str = "table.json";
pub const USERS_FILE: &str = "users.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("unreadable snapshot {path}: {source}")]
    SnapshotRead {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode snapshot: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("store lock poisoned")]
    Poisoned,
}

/// Where the table snapshot and user directory live.
pub trait TableStore: Send + Sync {
    /// `None` when no snapshot has been written yet.
    fn load_table(&self) -> Result<Option<TableState>, StoreError>;

    /// Replaces the stored snapshot.
    fn save_table(&self, table: &TableState) -> Result<(), StoreError>;

    fn load_users(&self) -> Result<Vec<UserRecord>, StoreError>;
}

/// Pretty-printed JSON files under one data directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn table_path(&self) -> PathBuf {
        self.dir.join(TABLE_FILE)
    }

    pub fn users_path(&self) -> PathBuf {
        self.dir.join(USERS_FILE)
    }

    fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StoreError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StoreError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        serde_json::from_str(&text)
            .map(Some)
            .map_err(|source| StoreError::SnapshotRead {
                path: path.to_path_buf(),
                source,
            })
    }

    fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StoreError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let json = serde_json::to_string_pretty(value)?;
        fs::write(path, json).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl TableStore for JsonFileStore {
    fn load_table(&self) -> Result<Option<TableState>, StoreError> {
        Self::read_json(&self.table_path())
    }

    fn save_table(&self, table: &TableState) -> Result<(), StoreError> {
        Self::write_json(&self.table_path(), table)
    }

    fn load_users(&self) -> Result<Vec<UserRecord>, StoreError> {
        let path = self.users_path();
        match Self::read_json(&path)? {
            Some(users) => Ok(users),
            None => {
                tracing::info!(path = %path.display(), "creating empty user directory");
                Self::write_json(&path, &[] as &[UserRecord])?;
                Ok(Vec::new())
            }
        }
    }
}

/// In-process store, mainly for tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    table: Mutex<Option<TableState>>,
    users: Mutex<Vec<UserRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(users: Vec<UserRecord>) -> Self {
        Self {
            table: Mutex::new(None),
            users: Mutex::new(users),
        }
    }

    pub fn with_table(self, table: TableState) -> Self {
        Self {
            table: Mutex::new(Some(table)),
            users: self.users,
        }
    }
}

impl TableStore for MemoryStore {
    fn load_table(&self) -> Result<Option<TableState>, StoreError> {
        self.table
            .lock()
            .map(|guard| guard.clone())
            .map_err(|_| StoreError::Poisoned)
    }

    fn save_table(&self, table: &TableState) -> Result<(), StoreError> {
        let mut guard = self.table.lock().map_err(|_| StoreError::Poisoned)?;
        *guard = Some(table.clone());
        Ok(())
    }

    fn load_users(&self) -> Result<Vec<UserRecord>, StoreError> {
        self.users
            .lock()
            .map(|guard| guard.clone())
            .map_err(|_| StoreError::Poisoned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nebula_engine::table::Stage;

    #[test]
    fn missing_table_loads_as_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = JsonFileStore::new(dir.path().join("nested"));
        assert!(store.load_table().expect("load").is_none());
    }

    #[test]
    fn table_round_trips_through_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = JsonFileStore::new(dir.path().join("nested"));
        let mut table = TableState::empty();
        table.stage = Stage::Flop;
        table.pot = 300;

        store.save_table(&table).expect("save");
        let text = fs::read_to_string(store.table_path()).expect("read");
        assert!(text.contains("\n  \"tableId\""));

        let loaded = store.load_table().expect("load").expect("present");
        assert_eq!(loaded, table);
    }

    #[test]
    fn corrupt_table_is_a_snapshot_read_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = JsonFileStore::new(dir.path());
        fs::write(store.table_path(), "{ not json").expect("write");
        assert!(matches!(
            store.load_table(),
            Err(StoreError::SnapshotRead { .. })
        ));
    }

    #[test]
    fn missing_users_file_is_created_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = JsonFileStore::new(dir.path());
        assert!(store.load_users().expect("users").is_empty());
        let text = fs::read_to_string(store.users_path()).expect("created");
        assert_eq!(text.trim(), "[]");
    }

    #[test]
    fn memory_store_keeps_last_save() {
        let store = MemoryStore::new();
        assert!(store.load_table().expect("load").is_none());
        store.save_table(&TableState::empty()).expect("save");
        assert_eq!(
            store.load_table().expect("load"),
            Some(TableState::empty())
        );
    }
}
