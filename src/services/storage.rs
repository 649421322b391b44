//! Persisted extension storage.
//!
//! Values live as JSON text in the `storage` table. The autoplay preference is
//! only ever written as a concrete boolean; `AutoplayPreference::Unknown` has
//! no path into this module.

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use rusqlite::{params, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::database::connection::Database;
use crate::types::errors::StorageError;

pub const KEY_AUTOPLAY: &str = "autoplay";
pub const KEY_USE_COUNT: &str = "useCount";
pub const KEY_INSTALL_TIME: &str = "installTime";
pub const KEY_STORAGE_VERSION: &str = "storageVersion";

/// Revision stamped by first-run initialization.
pub const STORAGE_REVISION: &str = "20240514";

/// Autoplay stays off until the cookie or the options page says otherwise.
pub const DEFAULT_AUTOPLAY: bool = false;

/// Trait defining the persisted store the background depends on.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// True once first-run initialization has completed.
    async fn is_ready(&self) -> Result<bool, StorageError>;
    /// Imports values left behind by the legacy storage format.
    async fn migrate_legacy(&self) -> Result<(), StorageError>;
    /// Writes defaults for missing keys and stamps the storage revision.
    async fn init(&self) -> Result<(), StorageError>;
    /// The stored preference, `None` before initialization.
    async fn autoplay(&self) -> Result<Option<bool>, StorageError>;
    async fn set_autoplay(&self, enabled: bool) -> Result<(), StorageError>;
    /// Increments the use counter and returns the new value.
    async fn record_app_use(&self) -> Result<u64, StorageError>;
}

/// Shape of the legacy storage file.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyStorage {
    autoplay: Option<bool>,
    use_count: Option<u64>,
}

/// SQLite-backed store.
pub struct SqliteStore {
    db: Mutex<Database>,
    legacy_path: Option<PathBuf>,
}

impl SqliteStore {
    pub fn new(db: Database, legacy_path: Option<PathBuf>) -> Self {
        Self {
            db: Mutex::new(db),
            legacy_path,
        }
    }

    /// Opens the database file at `path`.
    pub fn open<P: AsRef<Path>>(path: P, legacy_path: Option<PathBuf>) -> Result<Self, StorageError> {
        Ok(Self::new(Database::open(path)?, legacy_path))
    }

    pub fn open_in_memory() -> Result<Self, StorageError> {
        Ok(Self::new(Database::open_in_memory()?, None))
    }

    fn with_db<T>(&self, f: impl FnOnce(&Database) -> Result<T, StorageError>) -> Result<T, StorageError> {
        let db = self
            .db
            .lock()
            .map_err(|e| StorageError::Database(format!("storage lock poisoned: {}", e)))?;
        f(&db)
    }

    fn read<T: DeserializeOwned>(db: &Database, key: &str) -> Result<Option<T>, StorageError> {
        let raw: Option<String> = db
            .connection()
            .query_row("SELECT value FROM storage WHERE key = ?1", params![key], |row| row.get(0))
            .optional()?;
        match raw {
            Some(text) => Ok(Some(serde_json::from_str(&text)?)),
            None => Ok(None),
        }
    }

    fn write(db: &Database, key: &str, value: &Value) -> Result<(), StorageError> {
        db.connection().execute(
            "INSERT OR REPLACE INTO storage (key, value) VALUES (?1, ?2)",
            params![key, serde_json::to_string(value)?],
        )?;
        Ok(())
    }

    fn write_if_missing(db: &Database, key: &str, value: &Value) -> Result<(), StorageError> {
        db.connection().execute(
            "INSERT OR IGNORE INTO storage (key, value) VALUES (?1, ?2)",
            params![key, serde_json::to_string(value)?],
        )?;
        Ok(())
    }

    fn now_millis() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as i64
    }
}

#[async_trait]
impl PreferenceStore for SqliteStore {
    async fn is_ready(&self) -> Result<bool, StorageError> {
        self.with_db(|db| Ok(Self::read::<String>(db, KEY_STORAGE_VERSION)?.is_some()))
    }

    async fn migrate_legacy(&self) -> Result<(), StorageError> {
        let Some(path) = self.legacy_path.as_deref() else {
            return Ok(());
        };
        if !path.exists() {
            return Ok(());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| StorageError::Io(format!("Failed to read legacy storage: {}", e)))?;
        let legacy: LegacyStorage = serde_json::from_str(&content)?;

        self.with_db(|db| {
            if let Some(autoplay) = legacy.autoplay {
                Self::write(db, KEY_AUTOPLAY, &Value::Bool(autoplay))?;
            }
            if let Some(count) = legacy.use_count {
                Self::write(db, KEY_USE_COUNT, &Value::from(count))?;
            }
            Ok(())
        })?;

        std::fs::remove_file(path)
            .map_err(|e| StorageError::Io(format!("Failed to remove legacy storage: {}", e)))?;
        tracing::info!("Imported legacy storage from {}", path.display());
        Ok(())
    }

    async fn init(&self) -> Result<(), StorageError> {
        self.with_db(|db| {
            Self::write_if_missing(db, KEY_AUTOPLAY, &Value::Bool(DEFAULT_AUTOPLAY))?;
            Self::write_if_missing(db, KEY_USE_COUNT, &Value::from(0u64))?;
            Self::write_if_missing(db, KEY_INSTALL_TIME, &Value::from(Self::now_millis()))?;
            Self::write(db, KEY_STORAGE_VERSION, &Value::from(STORAGE_REVISION))
        })
    }

    async fn autoplay(&self) -> Result<Option<bool>, StorageError> {
        self.with_db(|db| Self::read(db, KEY_AUTOPLAY))
    }

    async fn set_autoplay(&self, enabled: bool) -> Result<(), StorageError> {
        self.with_db(|db| Self::write(db, KEY_AUTOPLAY, &Value::Bool(enabled)))
    }

    async fn record_app_use(&self) -> Result<u64, StorageError> {
        self.with_db(|db| {
            let count = Self::read::<u64>(db, KEY_USE_COUNT)?.unwrap_or(0) + 1;
            Self::write(db, KEY_USE_COUNT, &Value::from(count))?;
            Ok(count)
        })
    }
}
