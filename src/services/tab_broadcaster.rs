//! Tab broadcaster: tells every open site tab to re-read the stored state.

use std::sync::Arc;

use futures_util::future::join_all;

use crate::browser::{AppHooks, BrowserApi};
use crate::types::errors::SyncError;
use crate::types::tab::{TabMessage, TOP_FRAME_ID};

/// Runs sync passes over the site's open tabs.
pub struct TabBroadcaster {
    browser: Arc<dyn BrowserApi>,
    hooks: Arc<dyn AppHooks>,
    url_pattern: String,
}

impl TabBroadcaster {
    pub fn new(browser: Arc<dyn BrowserApi>, hooks: Arc<dyn AppHooks>, url_pattern: impl Into<String>) -> Self {
        Self {
            browser,
            hooks,
            url_pattern: url_pattern.into(),
        }
    }

    pub fn url_pattern(&self) -> &str {
        &self.url_pattern
    }

    /// Sends `syncState` to the top frame of every matching tab, then runs the
    /// app-use hook once.
    ///
    /// Deliveries run concurrently and a failed one is dropped: tabs that
    /// have not loaded the content script have no receiver. Only the tab
    /// query and the hook can fail the pass.
    pub async fn sync_state(&self) -> Result<(), SyncError> {
        let tabs = self.browser.query_tabs(&self.url_pattern).await?;

        let deliveries = tabs.iter().map(|tab| async move {
            if let Err(e) = self
                .browser
                .send_tab_message(tab.id, TabMessage::SyncState, TOP_FRAME_ID)
                .await
            {
                tracing::debug!("syncState not delivered to tab {}: {e}", tab.id);
            }
        });
        join_all(deliveries).await;
        tracing::debug!("syncState sent to {} tab(s)", tabs.len());

        self.hooks.process_app_use().await
    }
}
