//! State reconciler: accepts autoplay changes made on the site itself.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::services::cookie_decoder;
use crate::services::storage::PreferenceStore;
use crate::services::tab_broadcaster::TabBroadcaster;
use crate::types::cookie::CookieChange;
use crate::types::errors::SyncError;
use crate::types::preference::AutoplayPreference;

/// What a cookie change led to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciliation {
    /// Different cookie, or a removal.
    Ignored,
    /// The watched field held no recognizable value.
    Unknown,
    /// Decoded value already matches storage.
    Unchanged(bool),
    /// Storage was updated and the tabs notified.
    Updated(bool),
}

/// Compares cookie-decoded preferences against storage.
pub struct StateReconciler {
    store: Arc<dyn PreferenceStore>,
    broadcaster: Arc<TabBroadcaster>,
    cookie_domain: String,
    cookie_name: String,
    cookie_field: String,
    // Serializes read-compare-write across concurrently handled events.
    write_lock: Mutex<()>,
}

impl StateReconciler {
    pub fn new(
        store: Arc<dyn PreferenceStore>,
        broadcaster: Arc<TabBroadcaster>,
        cookie_domain: impl Into<String>,
        cookie_name: impl Into<String>,
        cookie_field: impl Into<String>,
    ) -> Self {
        Self {
            store,
            broadcaster,
            cookie_domain: cookie_domain.into(),
            cookie_name: cookie_name.into(),
            cookie_field: cookie_field.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Handles one cookie-change event.
    pub async fn on_cookie_change(&self, change: &CookieChange) -> Result<Reconciliation, SyncError> {
        if !change.qualifies(&self.cookie_domain, &self.cookie_name) {
            return Ok(Reconciliation::Ignored);
        }

        let decoded = cookie_decoder::decode_cookie_value(&change.cookie.value, &self.cookie_field);
        self.apply(decoded).await
    }

    /// Persists `decoded` if it differs from storage, then runs a sync pass.
    pub async fn apply(&self, decoded: AutoplayPreference) -> Result<Reconciliation, SyncError> {
        let Some(enabled) = decoded.as_bool() else {
            return Ok(Reconciliation::Unknown);
        };

        {
            let _guard = self.write_lock.lock().await;
            if self.store.autoplay().await? == Some(enabled) {
                return Ok(Reconciliation::Unchanged(enabled));
            }
            self.store.set_autoplay(enabled).await?;
        }

        tracing::info!("autoplay changed on site, now {}", if enabled { "on" } else { "off" });
        self.broadcaster.sync_state().await?;
        Ok(Reconciliation::Updated(enabled))
    }
}
