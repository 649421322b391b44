use thiserror::Error;

// === StorageError ===

/// Errors raised by the persisted preference store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The underlying SQLite operation failed.
    #[error("Storage database error: {0}")]
    Database(String),
    /// A stored value could not be encoded or decoded.
    #[error("Storage serialization error: {0}")]
    Serialization(String),
    /// Reading or removing the legacy storage file failed.
    #[error("Storage I/O error: {0}")]
    Io(String),
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        StorageError::Database(err.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Serialization(err.to_string())
    }
}

// === BrowserError ===

/// Errors returned by browser API calls (tabs, navigation, injection).
#[derive(Debug, Error)]
pub enum BrowserError {
    /// The target tab has no listener for extension messages.
    #[error("No message receiver in tab: {0}")]
    NoReceiver(i64),
    /// No open tab has the given ID.
    #[error("Tab not found: {0}")]
    TabNotFound(i64),
    /// The connection to the browser is gone.
    #[error("Browser disconnected: {0}")]
    Disconnected(String),
    /// Platform information could not be determined.
    #[error("Platform query failed: {0}")]
    Platform(String),
}

// === SettingsError ===

/// Errors related to loading or saving the sync settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    #[error("Settings I/O error: {0}")]
    IoError(String),
    /// Failed to serialize or deserialize settings.
    #[error("Settings serialization error: {0}")]
    SerializationError(String),
    /// A setting holds a value the background cannot work with.
    #[error("Invalid setting {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

// === SyncError ===

/// Failure of an event or message handler.
///
/// Expected no-ops (unrecognized cookie values, unknown commands, self-sent
/// messages) never produce this; only collaborator failures do.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Browser(#[from] BrowserError),
    /// A request was missing a field its command requires.
    #[error("Malformed request: {0}")]
    MalformedRequest(String),
    /// A handler result could not be turned into a response value.
    #[error("Response serialization error: {0}")]
    Response(String),
}
