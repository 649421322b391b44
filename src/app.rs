//! App Core for autoplay-sync.
//!
//! Central struct holding the background components and the collaborators
//! they share.

use std::sync::Arc;

use crate::browser::{AppHooks, BrowserApi};
use crate::services::message_dispatcher::MessageDispatcher;
use crate::services::state_reconciler::StateReconciler;
use crate::services::storage::PreferenceStore;
use crate::services::tab_broadcaster::TabBroadcaster;
use crate::types::settings::SyncSettings;

/// The background context: one per browser profile.
pub struct App {
    pub settings: SyncSettings,
    pub store: Arc<dyn PreferenceStore>,
    pub browser: Arc<dyn BrowserApi>,
    pub hooks: Arc<dyn AppHooks>,
    pub broadcaster: Arc<TabBroadcaster>,
    pub reconciler: StateReconciler,
    pub dispatcher: MessageDispatcher,
}

impl App {
    /// Builds the components from `settings`.
    ///
    /// Without a configured `context_url`, a unique
    /// `extension://<uuid>/background` URL is generated for this process.
    pub fn new(
        settings: SyncSettings,
        store: Arc<dyn PreferenceStore>,
        browser: Arc<dyn BrowserApi>,
        hooks: Arc<dyn AppHooks>,
    ) -> Self {
        let context_url = settings
            .context_url
            .clone()
            .unwrap_or_else(|| format!("extension://{}/background", uuid::Uuid::new_v4()));

        let broadcaster = Arc::new(TabBroadcaster::new(
            Arc::clone(&browser),
            Arc::clone(&hooks),
            settings.tab_url_pattern.clone(),
        ));
        let reconciler = StateReconciler::new(
            Arc::clone(&store),
            Arc::clone(&broadcaster),
            settings.cookie_domain.clone(),
            settings.cookie_name.clone(),
            settings.cookie_field.clone(),
        );
        let dispatcher = MessageDispatcher::new(
            context_url,
            settings.target_env,
            Arc::clone(&browser),
            Arc::clone(&hooks),
            Arc::clone(&broadcaster),
        );

        Self {
            settings,
            store,
            browser,
            hooks,
            broadcaster,
            reconciler,
            dispatcher,
        }
    }

    pub fn context_url(&self) -> &str {
        self.dispatcher.context_url()
    }
}
