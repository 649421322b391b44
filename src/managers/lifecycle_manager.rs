//! Lifecycle manager: listener wiring and first-run storage setup.

use std::sync::Arc;

use futures_util::FutureExt;
use serde_json::Value;
use tokio::task::JoinHandle;

use crate::app::App;
use crate::browser::EventSources;
use crate::types::cookie::CookieChange;
use crate::types::errors::SyncError;
use crate::types::install::{InstallDetails, InstallReason};
use crate::types::message::Sender;
use crate::types::tab::Tab;

/// Wires the background into the browser's event sources.
#[derive(Clone)]
pub struct LifecycleManager {
    app: Arc<App>,
}

impl LifecycleManager {
    pub fn new(app: Arc<App>) -> Self {
        Self { app }
    }

    pub fn app(&self) -> &Arc<App> {
        &self.app
    }

    /// Registers all listeners and starts storage setup in the background.
    ///
    /// Meant to run once per process; a second call registers every
    /// listener again. Must be called within a tokio runtime.
    pub fn init(&self, sources: &dyn EventSources) -> JoinHandle<Result<bool, SyncError>> {
        self.register_listeners(sources);

        let this = self.clone();
        tokio::spawn(async move {
            let result = this.setup_storage().await;
            if let Err(e) = &result {
                tracing::warn!("storage setup failed: {e}");
            }
            result
        })
    }

    /// Adds one listener to each event source.
    pub fn register_listeners(&self, sources: &dyn EventSources) {
        let this = self.clone();
        sources.on_action_clicked(Arc::new(move |tab: Tab| {
            let this = this.clone();
            async move { this.on_action_clicked(tab).await }.boxed()
        }));

        let app = Arc::clone(&self.app);
        sources.on_message(Arc::new(move |request: Value, sender: Sender| {
            let app = Arc::clone(&app);
            async move { app.dispatcher.dispatch(request, sender).await }.boxed()
        }));

        let this = self.clone();
        sources.on_installed(Arc::new(move |details: InstallDetails| {
            let this = this.clone();
            async move { this.on_install(details).await.map(|_| ()) }.boxed()
        }));

        let app = Arc::clone(&self.app);
        sources.on_cookie_changed(Arc::new(move |change: CookieChange| {
            let app = Arc::clone(&app);
            async move { app.reconciler.on_cookie_change(&change).await.map(|_| ()) }.boxed()
        }));

        tracing::debug!("background listeners registered");
    }

    /// Migrates legacy storage and writes defaults on first run.
    ///
    /// Returns true if initialization ran, false if storage was ready.
    pub async fn setup_storage(&self) -> Result<bool, SyncError> {
        let store = &self.app.store;
        if store.is_ready().await? {
            return Ok(false);
        }

        store.migrate_legacy().await?;
        store.init().await?;
        tracing::info!("storage initialized");
        Ok(true)
    }

    /// Injects the base content module into already open site tabs after
    /// install or update, on browsers that skip declared content scripts for
    /// those tabs. Returns true if the injection was requested.
    pub async fn on_install(&self, details: InstallDetails) -> Result<bool, SyncError> {
        let relevant_reason = matches!(details.reason, InstallReason::Install | InstallReason::Update);
        if !relevant_reason || !self.app.settings.target_env.needs_base_module_injection() {
            return Ok(false);
        }

        self.app
            .hooks
            .insert_base_module(&self.app.settings.tab_url_pattern, false)
            .await?;
        tracing::info!("base module injected after {:?}", details.reason);
        Ok(true)
    }

    pub async fn on_action_clicked(&self, tab: Tab) -> Result<(), SyncError> {
        self.app.hooks.show_options_page(Some(tab)).await
    }
}
