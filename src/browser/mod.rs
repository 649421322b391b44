//! Seams between the background logic and the browser.
//!
//! Everything the background needs from the browser (tabs, platform info,
//! page navigation, script injection, usage bookkeeping, event delivery)
//! goes through the traits here, so the host bridge and the test fakes can
//! stand in for real browser APIs.

pub mod match_pattern;

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::future::BoxFuture;
use serde_json::Value;

use crate::platform::PlatformInfo;
use crate::types::cookie::CookieChange;
use crate::types::errors::{BrowserError, SyncError};
use crate::types::install::InstallDetails;
use crate::types::message::Sender;
use crate::types::tab::{Tab, TabMessage};

/// Tab and runtime calls the background makes.
#[async_trait]
pub trait BrowserApi: Send + Sync {
    /// Open tabs whose URL matches `url_pattern`.
    async fn query_tabs(&self, url_pattern: &str) -> Result<Vec<Tab>, BrowserError>;
    async fn get_tab(&self, tab_id: i64) -> Result<Tab, BrowserError>;
    /// Delivers `message` to one frame of a tab.
    async fn send_tab_message(
        &self,
        tab_id: i64,
        message: TabMessage,
        frame_id: u32,
    ) -> Result<(), BrowserError>;
    async fn platform_info(&self) -> Result<PlatformInfo, BrowserError>;
}

/// Extension-level collaborators outside the sync logic.
#[async_trait]
pub trait AppHooks: Send + Sync {
    /// Usage bookkeeping run after every sync pass and on `appUse`.
    async fn process_app_use(&self) -> Result<(), SyncError>;
    async fn show_page(&self, url: &str) -> Result<(), SyncError>;
    async fn show_options_page(&self, active_tab: Option<Tab>) -> Result<(), SyncError>;
    /// Injects the base content module into matching tabs.
    async fn insert_base_module(&self, url_pattern: &str, all_frames: bool) -> Result<(), SyncError>;
}

/// Callback invoked for one browser event.
pub type Listener<E> = Arc<dyn Fn(E) -> BoxFuture<'static, Result<(), SyncError>> + Send + Sync>;

/// Callback invoked for an extension message; resolves to the response.
pub type MessageListener =
    Arc<dyn Fn(Value, Sender) -> BoxFuture<'static, Result<Option<Value>, SyncError>> + Send + Sync>;

/// Browser event sources a background attaches its listeners to.
///
/// Each call adds one listener; nothing deduplicates repeated registration.
pub trait EventSources {
    fn on_cookie_changed(&self, listener: Listener<CookieChange>);
    fn on_message(&self, listener: MessageListener);
    fn on_action_clicked(&self, listener: Listener<Tab>);
    fn on_installed(&self, listener: Listener<InstallDetails>);
}
