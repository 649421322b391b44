//! Browser and hook implementations that talk to the browser side over the
//! outbound line channel.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::mpsc::UnboundedSender;

use crate::browser::{AppHooks, BrowserApi};
use crate::managers::tab_registry::{TabRegistry, TabRegistryTrait};
use crate::platform::{self, PlatformInfo};
use crate::services::storage::PreferenceStore;
use crate::types::errors::{BrowserError, SyncError};
use crate::types::settings::TargetEnv;
use crate::types::tab::{Tab, TabMessage};

use super::protocol::OutboundCommand;

fn emit(outbound: &UnboundedSender<Value>, command: OutboundCommand) -> Result<(), BrowserError> {
    let line = serde_json::to_value(&command).map_err(|e| BrowserError::Disconnected(e.to_string()))?;
    outbound
        .send(line)
        .map_err(|_| BrowserError::Disconnected("output channel closed".to_string()))
}

/// Tabs API backed by the tab events the browser side reports.
pub struct HostBrowser {
    tabs: Mutex<TabRegistry>,
    outbound: UnboundedSender<Value>,
    target_env: TargetEnv,
}

impl HostBrowser {
    pub fn new(outbound: UnboundedSender<Value>, target_env: TargetEnv) -> Self {
        Self {
            tabs: Mutex::new(TabRegistry::new()),
            outbound,
            target_env,
        }
    }

    fn registry(&self) -> Result<std::sync::MutexGuard<'_, TabRegistry>, BrowserError> {
        self.tabs
            .lock()
            .map_err(|_| BrowserError::Disconnected("tab registry poisoned".to_string()))
    }

    pub fn track_tab(&self, tab: Tab) {
        if let Ok(mut tabs) = self.registry() {
            tabs.upsert_tab(tab);
        }
    }

    pub fn forget_tab(&self, tab_id: i64) {
        if let Ok(mut tabs) = self.registry() {
            if tabs.remove_tab(tab_id).is_err() {
                tracing::debug!("removal of untracked tab {tab_id}");
            }
        }
    }

    pub fn tab_count(&self) -> usize {
        self.registry().map(|tabs| tabs.tab_count()).unwrap_or(0)
    }
}

#[async_trait]
impl BrowserApi for HostBrowser {
    async fn query_tabs(&self, url_pattern: &str) -> Result<Vec<Tab>, BrowserError> {
        Ok(self.registry()?.query(url_pattern))
    }

    async fn get_tab(&self, tab_id: i64) -> Result<Tab, BrowserError> {
        self.registry()?
            .get_tab(tab_id)
            .cloned()
            .ok_or(BrowserError::TabNotFound(tab_id))
    }

    /// Tabs the browser side never reported have no receiver.
    async fn send_tab_message(
        &self,
        tab_id: i64,
        message: TabMessage,
        frame_id: u32,
    ) -> Result<(), BrowserError> {
        if self.registry()?.get_tab(tab_id).is_none() {
            return Err(BrowserError::NoReceiver(tab_id));
        }
        emit(
            &self.outbound,
            OutboundCommand::SendMessage {
                tab_id,
                frame_id,
                message,
            },
        )
    }

    async fn platform_info(&self) -> Result<PlatformInfo, BrowserError> {
        Ok(platform::current_platform(self.target_env))
    }
}

/// Hooks that forward navigation and injection to the browser side and keep
/// usage bookkeeping in the store.
pub struct HostHooks {
    store: Arc<dyn PreferenceStore>,
    outbound: UnboundedSender<Value>,
}

impl HostHooks {
    pub fn new(store: Arc<dyn PreferenceStore>, outbound: UnboundedSender<Value>) -> Self {
        Self { store, outbound }
    }
}

#[async_trait]
impl AppHooks for HostHooks {
    async fn process_app_use(&self) -> Result<(), SyncError> {
        let count = self.store.record_app_use().await?;
        tracing::debug!("app use recorded ({count})");
        Ok(())
    }

    async fn show_page(&self, url: &str) -> Result<(), SyncError> {
        emit(&self.outbound, OutboundCommand::ShowPage { url: url.to_string() })?;
        Ok(())
    }

    async fn show_options_page(&self, active_tab: Option<Tab>) -> Result<(), SyncError> {
        emit(&self.outbound, OutboundCommand::ShowOptionsPage { active_tab })?;
        Ok(())
    }

    async fn insert_base_module(&self, url_pattern: &str, all_frames: bool) -> Result<(), SyncError> {
        emit(
            &self.outbound,
            OutboundCommand::InsertBaseModule {
                url: url_pattern.to_string(),
                all_frames,
            },
        )?;
        Ok(())
    }
}
