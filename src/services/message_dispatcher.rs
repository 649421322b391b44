//! Message dispatcher for extension messages.
//!
//! Incoming envelopes are parsed into a [`Command`] and routed to one handler
//! per command. Handlers resolve to the response sent back to the caller, or
//! `None` when the command has nothing to return.

use std::sync::{Arc, OnceLock};

use regex::Regex;
use serde_json::Value;

use crate::browser::{AppHooks, BrowserApi};
use crate::services::tab_broadcaster::TabBroadcaster;
use crate::types::errors::SyncError;
use crate::types::message::{Command, Sender};
use crate::types::settings::TargetEnv;
use crate::types::tab::TAB_ID_NONE;

/// Browser-action popup URL on Samsung Internet.
fn samsung_action_page() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^internet-extension://.*/src/action/index\.html").expect("static regex is valid")
    })
}

/// Routes extension messages to their handlers.
pub struct MessageDispatcher {
    context_url: String,
    target_env: TargetEnv,
    browser: Arc<dyn BrowserApi>,
    hooks: Arc<dyn AppHooks>,
    broadcaster: Arc<TabBroadcaster>,
}

impl MessageDispatcher {
    pub fn new(
        context_url: impl Into<String>,
        target_env: TargetEnv,
        browser: Arc<dyn BrowserApi>,
        hooks: Arc<dyn AppHooks>,
        broadcaster: Arc<TabBroadcaster>,
    ) -> Self {
        Self {
            context_url: context_url.into(),
            target_env,
            browser,
            hooks,
            broadcaster,
        }
    }

    /// URL of the context this dispatcher runs in.
    pub fn context_url(&self) -> &str {
        &self.context_url
    }

    /// Entry point for `runtime.onMessage`.
    ///
    /// Messages whose sender is this context itself are dropped: some
    /// browsers echo extension messages back to the sending frame.
    pub async fn dispatch(&self, request: Value, sender: Sender) -> Result<Option<Value>, SyncError> {
        if sender.url == self.context_url {
            tracing::debug!("ignoring message sent from the background itself");
            return Ok(None);
        }

        let sender = self.normalize_sender(sender).await?;
        let command = Command::from_value(request);
        tracing::debug!(
            "message {} from {} (tab {:?})",
            command.name(),
            sender.url,
            sender.tab.as_ref().map(|t| t.id)
        );
        self.handle(command).await
    }

    /// Corrects sender metadata for known browser quirks.
    ///
    /// Samsung Internet attaches a nonexistent tab to messages from the
    /// browser-action popup, and reports stale tab fields otherwise, so the
    /// tab is dropped or re-read there. Other browsers pass through.
    pub async fn normalize_sender(&self, mut sender: Sender) -> Result<Sender, SyncError> {
        if self.target_env != TargetEnv::Samsung {
            return Ok(sender);
        }

        let from_action_page = sender
            .tab
            .as_ref()
            .and_then(|tab| tab.url.as_deref())
            .is_some_and(|url| samsung_action_page().is_match(url));
        if from_action_page {
            sender.tab = None;
        }

        if let Some(tab) = sender.tab.as_ref() {
            if tab.id != TAB_ID_NONE {
                sender.tab = Some(self.browser.get_tab(tab.id).await?);
            }
        }

        Ok(sender)
    }

    /// Runs the handler for `command`.
    pub async fn handle(&self, command: Command) -> Result<Option<Value>, SyncError> {
        match command {
            Command::GetPlatform => self.handle_get_platform().await,
            Command::OptionChange => self.handle_option_change().await,
            Command::ShowPage { url } => self.handle_show_page(url.as_deref()).await,
            Command::AppUse => self.handle_app_use().await,
            Command::Unrecognized => Ok(None),
        }
    }

    async fn handle_get_platform(&self) -> Result<Option<Value>, SyncError> {
        let info = self.browser.platform_info().await?;
        let value = serde_json::to_value(info).map_err(|e| SyncError::Response(e.to_string()))?;
        Ok(Some(value))
    }

    /// The options page has already written storage; only the tabs need to
    /// hear about it.
    async fn handle_option_change(&self) -> Result<Option<Value>, SyncError> {
        self.broadcaster.sync_state().await?;
        Ok(None)
    }

    async fn handle_show_page(&self, url: Option<&str>) -> Result<Option<Value>, SyncError> {
        let url = url.ok_or_else(|| SyncError::MalformedRequest("showPage requires url".to_string()))?;
        self.hooks.show_page(url).await?;
        Ok(None)
    }

    async fn handle_app_use(&self) -> Result<Option<Value>, SyncError> {
        self.hooks.process_app_use().await?;
        Ok(None)
    }
}
