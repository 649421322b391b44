//! Fakes shared by the integration tests: a scripted browser, recording
//! hooks, a store that always fails, and an `App` builder.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use autoplay_sync::app::App;
use autoplay_sync::browser::match_pattern::url_matches_pattern;
use autoplay_sync::browser::{AppHooks, BrowserApi};
use autoplay_sync::platform::PlatformInfo;
use autoplay_sync::services::storage::{PreferenceStore, SqliteStore};
use autoplay_sync::types::errors::{BrowserError, StorageError, SyncError};
use autoplay_sync::types::settings::{SyncSettings, TargetEnv};
use autoplay_sync::types::tab::{Tab, TabMessage};

pub const CONTEXT_URL: &str = "extension://test-extension/background";

/// Browser with a fixed set of tabs; selected tabs reject messages.
#[derive(Default)]
pub struct FakeBrowser {
    pub tabs: Mutex<Vec<Tab>>,
    pub failing_tabs: Mutex<HashSet<i64>>,
    /// Every delivery attempt, successful or not.
    pub attempts: Mutex<Vec<(i64, TabMessage, u32)>>,
    pub delivered: Mutex<Vec<i64>>,
    pub get_tab_calls: Mutex<Vec<i64>>,
    pub query_calls: AtomicUsize,
    pub fail_query: AtomicBool,
}

impl FakeBrowser {
    pub fn with_tabs(tabs: Vec<Tab>) -> Self {
        Self {
            tabs: Mutex::new(tabs),
            ..Self::default()
        }
    }

    pub fn fail_tab(&self, tab_id: i64) {
        self.failing_tabs.lock().unwrap().insert(tab_id);
    }

    pub fn attempted_ids(&self) -> Vec<i64> {
        let mut ids: Vec<i64> = self.attempts.lock().unwrap().iter().map(|a| a.0).collect();
        ids.sort_unstable();
        ids
    }

    pub fn delivered_ids(&self) -> Vec<i64> {
        let mut ids = self.delivered.lock().unwrap().clone();
        ids.sort_unstable();
        ids
    }
}

#[async_trait]
impl BrowserApi for FakeBrowser {
    async fn query_tabs(&self, url_pattern: &str) -> Result<Vec<Tab>, BrowserError> {
        self.query_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_query.load(Ordering::SeqCst) {
            return Err(BrowserError::Disconnected("query failed".to_string()));
        }
        Ok(self
            .tabs
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.url.as_deref().is_some_and(|u| url_matches_pattern(u, url_pattern)))
            .cloned()
            .collect())
    }

    async fn get_tab(&self, tab_id: i64) -> Result<Tab, BrowserError> {
        self.get_tab_calls.lock().unwrap().push(tab_id);
        self.tabs
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id == tab_id)
            .cloned()
            .ok_or(BrowserError::TabNotFound(tab_id))
    }

    async fn send_tab_message(
        &self,
        tab_id: i64,
        message: TabMessage,
        frame_id: u32,
    ) -> Result<(), BrowserError> {
        self.attempts.lock().unwrap().push((tab_id, message, frame_id));
        if self.failing_tabs.lock().unwrap().contains(&tab_id) {
            return Err(BrowserError::NoReceiver(tab_id));
        }
        self.delivered.lock().unwrap().push(tab_id);
        Ok(())
    }

    async fn platform_info(&self) -> Result<PlatformInfo, BrowserError> {
        Ok(PlatformInfo {
            os: "linux".to_string(),
            arch: "x86-64".to_string(),
            target_env: TargetEnv::Chrome,
        })
    }
}

/// Hooks that only record what they were asked to do.
#[derive(Default)]
pub struct FakeHooks {
    pub app_uses: AtomicUsize,
    pub pages: Mutex<Vec<String>>,
    pub options_pages: Mutex<Vec<Option<Tab>>>,
    pub injections: Mutex<Vec<(String, bool)>>,
    pub fail_app_use: AtomicBool,
}

impl FakeHooks {
    pub fn app_use_count(&self) -> usize {
        self.app_uses.load(Ordering::SeqCst)
    }

    pub fn injection_count(&self) -> usize {
        self.injections.lock().unwrap().len()
    }
}

#[async_trait]
impl AppHooks for FakeHooks {
    async fn process_app_use(&self) -> Result<(), SyncError> {
        if self.fail_app_use.load(Ordering::SeqCst) {
            return Err(StorageError::Database("disk full".to_string()).into());
        }
        self.app_uses.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn show_page(&self, url: &str) -> Result<(), SyncError> {
        self.pages.lock().unwrap().push(url.to_string());
        Ok(())
    }

    async fn show_options_page(&self, active_tab: Option<Tab>) -> Result<(), SyncError> {
        self.options_pages.lock().unwrap().push(active_tab);
        Ok(())
    }

    async fn insert_base_module(&self, url_pattern: &str, all_frames: bool) -> Result<(), SyncError> {
        self.injections.lock().unwrap().push((url_pattern.to_string(), all_frames));
        Ok(())
    }
}

/// Store whose every call fails.
pub struct FailingStore;

#[async_trait]
impl PreferenceStore for FailingStore {
    async fn is_ready(&self) -> Result<bool, StorageError> {
        Err(StorageError::Database("unavailable".to_string()))
    }
    async fn migrate_legacy(&self) -> Result<(), StorageError> {
        Err(StorageError::Database("unavailable".to_string()))
    }
    async fn init(&self) -> Result<(), StorageError> {
        Err(StorageError::Database("unavailable".to_string()))
    }
    async fn autoplay(&self) -> Result<Option<bool>, StorageError> {
        Err(StorageError::Database("unavailable".to_string()))
    }
    async fn set_autoplay(&self, _enabled: bool) -> Result<(), StorageError> {
        Err(StorageError::Database("unavailable".to_string()))
    }
    async fn record_app_use(&self) -> Result<u64, StorageError> {
        Err(StorageError::Database("unavailable".to_string()))
    }
}

pub fn youtube_tab(id: i64) -> Tab {
    Tab::new(id, format!("https://www.youtube.com/watch?v=video{}", id))
}

pub fn settings_for(target_env: TargetEnv) -> SyncSettings {
    SyncSettings {
        target_env,
        context_url: Some(CONTEXT_URL.to_string()),
        ..SyncSettings::default()
    }
}

/// Fresh in-memory store after first-run initialization (autoplay off).
pub async fn initialized_store() -> Arc<SqliteStore> {
    let store = Arc::new(SqliteStore::open_in_memory().expect("in-memory store"));
    store.init().await.expect("init storage");
    store
}

pub struct Harness {
    pub app: Arc<App>,
    pub browser: Arc<FakeBrowser>,
    pub hooks: Arc<FakeHooks>,
    pub store: Arc<dyn PreferenceStore>,
}

pub fn harness(
    settings: SyncSettings,
    store: Arc<dyn PreferenceStore>,
    browser: FakeBrowser,
) -> Harness {
    let browser = Arc::new(browser);
    let hooks = Arc::new(FakeHooks::default());
    let app = Arc::new(App::new(
        settings,
        Arc::clone(&store),
        browser.clone(),
        hooks.clone(),
    ));
    Harness {
        app,
        browser,
        hooks,
        store,
    }
}
