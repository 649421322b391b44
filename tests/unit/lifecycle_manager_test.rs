#[path = "../support/mod.rs"]
mod support;

use std::sync::Arc;

use autoplay_sync::host::EventHub;
use autoplay_sync::managers::lifecycle_manager::LifecycleManager;
use autoplay_sync::services::storage::{PreferenceStore, SqliteStore};
use autoplay_sync::types::cookie::{Cookie, CookieChange};
use autoplay_sync::types::install::{InstallDetails, InstallReason};
use autoplay_sync::types::message::Sender;
use autoplay_sync::types::settings::TargetEnv;
use autoplay_sync::types::tab::Tab;
use rstest::rstest;
use serde_json::json;
use support::{harness, initialized_store, settings_for, youtube_tab, FailingStore, FakeBrowser};
use tempfile::TempDir;

async fn manager_for(target_env: TargetEnv) -> (LifecycleManager, support::Harness) {
    let h = harness(
        settings_for(target_env),
        initialized_store().await,
        FakeBrowser::with_tabs(vec![youtube_tab(1)]),
    );
    (LifecycleManager::new(Arc::clone(&h.app)), h)
}

#[tokio::test]
async fn test_init_registers_one_listener_per_source() {
    let (manager, _h) = manager_for(TargetEnv::Chrome).await;
    let hub = EventHub::new();

    let setup = manager.init(&hub);

    assert_eq!(hub.listener_counts(), [1, 1, 1, 1]);
    assert!(!setup.await.unwrap().unwrap(), "storage was already initialized");
}

#[tokio::test]
async fn test_second_init_registers_again() {
    let (manager, _h) = manager_for(TargetEnv::Chrome).await;
    let hub = EventHub::new();

    manager.init(&hub).await.unwrap().unwrap();
    manager.init(&hub).await.unwrap().unwrap();

    assert_eq!(hub.listener_counts(), [2, 2, 2, 2]);
}

#[rstest]
#[case(TargetEnv::Chrome, InstallReason::Install, 1)]
#[case(TargetEnv::Chrome, InstallReason::Update, 1)]
#[case(TargetEnv::Edge, InstallReason::Install, 1)]
#[case(TargetEnv::Opera, InstallReason::Update, 1)]
#[case(TargetEnv::Samsung, InstallReason::Install, 1)]
#[case(TargetEnv::Firefox, InstallReason::Install, 0)]
#[case(TargetEnv::Safari, InstallReason::Update, 0)]
#[case(TargetEnv::Chrome, InstallReason::BrowserUpdate, 0)]
#[case(TargetEnv::Chrome, InstallReason::SharedModuleUpdate, 0)]
#[tokio::test]
async fn test_install_injection(
    #[case] target_env: TargetEnv,
    #[case] reason: InstallReason,
    #[case] expected: usize,
) {
    let (manager, h) = manager_for(target_env).await;

    let injected = manager.on_install(InstallDetails { reason }).await.unwrap();

    assert_eq!(injected, expected == 1);
    assert_eq!(h.hooks.injection_count(), expected);
}

#[tokio::test]
async fn test_injection_targets_site_top_frames() {
    let (manager, h) = manager_for(TargetEnv::Chrome).await;

    manager
        .on_install(InstallDetails { reason: InstallReason::Install })
        .await
        .unwrap();

    assert_eq!(
        *h.hooks.injections.lock().unwrap(),
        vec![("https://www.youtube.com/*".to_string(), false)]
    );
}

#[tokio::test]
async fn test_action_click_opens_options_page_with_tab() {
    let (manager, h) = manager_for(TargetEnv::Chrome).await;
    let hub = EventHub::new();
    manager.register_listeners(&hub);

    hub.action_clicked(youtube_tab(1)).await;

    assert_eq!(*h.hooks.options_pages.lock().unwrap(), vec![Some(youtube_tab(1))]);
}

#[tokio::test]
async fn test_registered_listeners_reach_components() {
    let (manager, h) = manager_for(TargetEnv::Chrome).await;
    let hub = EventHub::new();
    manager.register_listeners(&hub);

    hub.cookie_changed(CookieChange {
        cookie: Cookie {
            domain: ".youtube.com".to_string(),
            name: "PREF".to_string(),
            value: "f5=20000".to_string(),
        },
        removed: false,
    })
    .await;
    assert_eq!(h.store.autoplay().await.unwrap(), Some(true));
    assert_eq!(h.browser.delivered_ids(), vec![1]);

    let response = hub
        .message(json!({"id": "getPlatform"}), Sender::default())
        .await
        .unwrap();
    assert!(response.is_some());

    hub.installed(InstallDetails { reason: InstallReason::Install }).await;
    assert_eq!(h.hooks.injection_count(), 1);
}

#[tokio::test]
async fn test_setup_storage_initializes_fresh_store() {
    let store = Arc::new(SqliteStore::open_in_memory().unwrap());
    let h = harness(settings_for(TargetEnv::Chrome), store.clone(), FakeBrowser::default());
    let manager = LifecycleManager::new(Arc::clone(&h.app));

    assert!(manager.setup_storage().await.unwrap());
    assert!(store.is_ready().await.unwrap());
    assert_eq!(store.autoplay().await.unwrap(), Some(false));

    assert!(!manager.setup_storage().await.unwrap(), "second run is a no-op");
}

#[tokio::test]
async fn test_setup_storage_imports_legacy_values() {
    let dir = TempDir::new().unwrap();
    let legacy = dir.path().join("legacy-storage.json");
    std::fs::write(&legacy, r#"{"autoplay": true, "useCount": 12}"#).unwrap();
    let store = Arc::new(
        SqliteStore::open(dir.path().join("storage.db"), Some(legacy.clone())).unwrap(),
    );
    let h = harness(settings_for(TargetEnv::Chrome), store.clone(), FakeBrowser::default());
    let manager = LifecycleManager::new(Arc::clone(&h.app));

    assert!(manager.setup_storage().await.unwrap());

    assert_eq!(store.autoplay().await.unwrap(), Some(true));
    assert_eq!(store.record_app_use().await.unwrap(), 13);
    assert!(!legacy.exists());
    assert!(store.is_ready().await.unwrap());
}

#[tokio::test]
async fn test_setup_failure_is_reported_through_handle() {
    let h = harness(settings_for(TargetEnv::Chrome), Arc::new(FailingStore), FakeBrowser::default());
    let manager = LifecycleManager::new(Arc::clone(&h.app));
    let hub = EventHub::new();

    let result = manager.init(&hub).await.unwrap();

    assert!(result.is_err());
    assert_eq!(hub.listener_counts(), [1, 1, 1, 1]);
}

#[tokio::test]
async fn test_failing_listener_does_not_block_hub() {
    let h = harness(settings_for(TargetEnv::Chrome), Arc::new(FailingStore), FakeBrowser::default());
    let manager = LifecycleManager::new(Arc::clone(&h.app));
    let hub = EventHub::new();
    manager.register_listeners(&hub);

    hub.cookie_changed(CookieChange {
        cookie: Cookie {
            domain: ".youtube.com".to_string(),
            name: "PREF".to_string(),
            value: "f5=20000".to_string(),
        },
        removed: false,
    })
    .await;
    hub.action_clicked(Tab::new(3, "https://www.youtube.com/")).await;

    assert_eq!(h.hooks.options_pages.lock().unwrap().len(), 1);
}
