//! In-process event sources for the host bridge.

use std::sync::Mutex;

use serde_json::Value;

use crate::browser::{EventSources, Listener, MessageListener};
use crate::types::cookie::CookieChange;
use crate::types::errors::SyncError;
use crate::types::install::InstallDetails;
use crate::types::message::Sender;
use crate::types::tab::Tab;

/// Holds registered listeners and fans events out to them.
///
/// A failing listener is logged and does not stop the others or later events.
#[derive(Default)]
pub struct EventHub {
    cookie_listeners: Mutex<Vec<Listener<CookieChange>>>,
    message_listeners: Mutex<Vec<MessageListener>>,
    action_listeners: Mutex<Vec<Listener<Tab>>>,
    install_listeners: Mutex<Vec<Listener<InstallDetails>>>,
}

fn snapshot<T: Clone>(listeners: &Mutex<Vec<T>>) -> Vec<T> {
    listeners.lock().map(|l| l.clone()).unwrap_or_default()
}

fn push<T>(listeners: &Mutex<Vec<T>>, listener: T) {
    if let Ok(mut l) = listeners.lock() {
        l.push(listener);
    }
}

async fn notify_all<E: Clone>(kind: &str, listeners: Vec<Listener<E>>, event: E) {
    for listener in listeners {
        if let Err(e) = listener(event.clone()).await {
            tracing::warn!("{kind} handler failed: {e}");
        }
    }
}

impl EventHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn cookie_changed(&self, change: CookieChange) {
        notify_all("cookie change", snapshot(&self.cookie_listeners), change).await;
    }

    pub async fn action_clicked(&self, tab: Tab) {
        notify_all("browser action", snapshot(&self.action_listeners), tab).await;
    }

    pub async fn installed(&self, details: InstallDetails) {
        notify_all("install", snapshot(&self.install_listeners), details).await;
    }

    /// Delivers a message; the first listener that responds or fails decides
    /// the outcome.
    pub async fn message(&self, request: Value, sender: Sender) -> Result<Option<Value>, SyncError> {
        for listener in snapshot(&self.message_listeners) {
            if let Some(response) = listener(request.clone(), sender.clone()).await? {
                return Ok(Some(response));
            }
        }
        Ok(None)
    }

    pub fn listener_counts(&self) -> [usize; 4] {
        [
            snapshot(&self.cookie_listeners).len(),
            snapshot(&self.message_listeners).len(),
            snapshot(&self.action_listeners).len(),
            snapshot(&self.install_listeners).len(),
        ]
    }
}

impl EventSources for EventHub {
    fn on_cookie_changed(&self, listener: Listener<CookieChange>) {
        push(&self.cookie_listeners, listener);
    }

    fn on_message(&self, listener: MessageListener) {
        push(&self.message_listeners, listener);
    }

    fn on_action_clicked(&self, listener: Listener<Tab>) {
        push(&self.action_listeners, listener);
    }

    fn on_installed(&self, listener: Listener<InstallDetails>) {
        push(&self.install_listeners, listener);
    }
}
