use autoplay_sync::database::connection::Database;
use autoplay_sync::database::migrations::{get_schema_version, CURRENT_SCHEMA_VERSION};
use autoplay_sync::services::storage::{PreferenceStore, SqliteStore, DEFAULT_AUTOPLAY};
use autoplay_sync::types::errors::StorageError;
use tempfile::TempDir;

fn stored_value(store_path: &std::path::Path, key: &str) -> Option<String> {
    let db = Database::open(store_path).unwrap();
    db.connection()
        .query_row("SELECT value FROM storage WHERE key = ?1", [key], |row| row.get(0))
        .ok()
}

#[test]
fn test_migrations_reach_current_version() {
    let db = Database::open_in_memory().unwrap();
    assert_eq!(get_schema_version(db.connection()), CURRENT_SCHEMA_VERSION);
}

#[test]
fn test_reopening_database_keeps_version() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("storage.db");
    drop(Database::open(&path).unwrap());
    let db = Database::open(&path).unwrap();
    assert_eq!(get_schema_version(db.connection()), CURRENT_SCHEMA_VERSION);
}

#[tokio::test]
async fn test_fresh_store_is_not_ready() {
    let store = SqliteStore::open_in_memory().unwrap();
    assert!(!store.is_ready().await.unwrap());
    assert_eq!(store.autoplay().await.unwrap(), None);
}

#[tokio::test]
async fn test_init_writes_defaults() {
    let store = SqliteStore::open_in_memory().unwrap();
    store.init().await.unwrap();

    assert!(store.is_ready().await.unwrap());
    assert_eq!(store.autoplay().await.unwrap(), Some(DEFAULT_AUTOPLAY));
    assert_eq!(store.record_app_use().await.unwrap(), 1);
}

#[tokio::test]
async fn test_init_keeps_existing_values() {
    let store = SqliteStore::open_in_memory().unwrap();
    store.set_autoplay(true).await.unwrap();

    store.init().await.unwrap();

    assert_eq!(store.autoplay().await.unwrap(), Some(true));
}

#[tokio::test]
async fn test_set_autoplay_round_trips() {
    let store = SqliteStore::open_in_memory().unwrap();
    store.init().await.unwrap();

    store.set_autoplay(true).await.unwrap();
    assert_eq!(store.autoplay().await.unwrap(), Some(true));
    store.set_autoplay(false).await.unwrap();
    assert_eq!(store.autoplay().await.unwrap(), Some(false));
}

#[tokio::test]
async fn test_record_app_use_increments() {
    let store = SqliteStore::open_in_memory().unwrap();
    store.init().await.unwrap();

    for expected in 1..=3 {
        assert_eq!(store.record_app_use().await.unwrap(), expected);
    }
}

#[tokio::test]
async fn test_values_persist_as_json_text() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("storage.db");
    {
        let store = SqliteStore::open(&path, None).unwrap();
        store.init().await.unwrap();
        store.set_autoplay(true).await.unwrap();
    }

    assert_eq!(stored_value(&path, "autoplay").as_deref(), Some("true"));
    assert_eq!(stored_value(&path, "storageVersion").as_deref(), Some("\"20240514\""));

    let reopened = SqliteStore::open(&path, None).unwrap();
    assert!(reopened.is_ready().await.unwrap());
    assert_eq!(reopened.autoplay().await.unwrap(), Some(true));
}

#[tokio::test]
async fn test_migrate_legacy_without_file_is_a_no_op() {
    let dir = TempDir::new().unwrap();
    let store = SqliteStore::open_in_memory().unwrap();
    let with_missing_file = SqliteStore::open(
        dir.path().join("storage.db"),
        Some(dir.path().join("missing.json")),
    )
    .unwrap();

    store.migrate_legacy().await.unwrap();
    with_missing_file.migrate_legacy().await.unwrap();
    assert_eq!(with_missing_file.autoplay().await.unwrap(), None);
}

#[tokio::test]
async fn test_migrate_legacy_imports_partial_file() {
    let dir = TempDir::new().unwrap();
    let legacy = dir.path().join("legacy.json");
    std::fs::write(&legacy, r#"{"autoplay": false}"#).unwrap();
    let store = SqliteStore::open(dir.path().join("storage.db"), Some(legacy.clone())).unwrap();

    store.migrate_legacy().await.unwrap();
    store.init().await.unwrap();

    assert_eq!(store.autoplay().await.unwrap(), Some(false));
    assert_eq!(store.record_app_use().await.unwrap(), 1);
    assert!(!legacy.exists());
}

#[tokio::test]
async fn test_malformed_legacy_file_is_serialization_error() {
    let dir = TempDir::new().unwrap();
    let legacy = dir.path().join("legacy.json");
    std::fs::write(&legacy, "{not json").unwrap();
    let store = SqliteStore::open(dir.path().join("storage.db"), Some(legacy.clone())).unwrap();

    let err = store.migrate_legacy().await.unwrap_err();

    assert!(matches!(err, StorageError::Serialization(_)));
    assert!(legacy.exists(), "unreadable legacy data is left in place");
}
