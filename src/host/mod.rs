//! Host bridge: runs the background outside a browser, fed by
//! newline-delimited JSON events and answering with JSON lines.

pub mod bridge;
pub mod event_hub;
pub mod protocol;

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::mpsc::UnboundedSender;

use crate::types::cookie::CookieChange;
use crate::types::install::InstallDetails;

pub use bridge::{HostBrowser, HostHooks};
pub use event_hub::EventHub;
pub use protocol::{InboundEvent, OutboundCommand};

/// Routes parsed input lines to the event hub and the tab registry.
#[derive(Clone)]
pub struct Host {
    hub: Arc<EventHub>,
    browser: Arc<HostBrowser>,
    outbound: UnboundedSender<Value>,
}

impl Host {
    pub fn new(hub: Arc<EventHub>, browser: Arc<HostBrowser>, outbound: UnboundedSender<Value>) -> Self {
        Self { hub, browser, outbound }
    }

    /// Parses one input line.
    ///
    /// Tab bookkeeping events are applied immediately so later events see
    /// them; the remaining events are returned for [`Host::handle_event`].
    /// Unparseable lines are answered with a parse error.
    pub fn accept_line(&self, line: &str) -> Option<InboundEvent> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let event: InboundEvent = match serde_json::from_str(line) {
            Ok(event) => event,
            Err(e) => {
                self.respond(protocol::error_line(Value::Null, format!("parse error: {}", e)));
                return None;
            }
        };

        self.apply_tab_event(event)
    }

    /// Applies tab bookkeeping events; any other event is handed back.
    fn apply_tab_event(&self, event: InboundEvent) -> Option<InboundEvent> {
        match event {
            InboundEvent::TabUpdated { tab } => {
                self.browser.track_tab(tab);
                None
            }
            InboundEvent::TabRemoved { tab_id } => {
                self.browser.forget_tab(tab_id);
                None
            }
            other => Some(other),
        }
    }

    /// Handles one browser event to completion. Tab events are applied the
    /// same way [`Host::accept_line`] applies them.
    pub async fn handle_event(&self, event: InboundEvent) {
        let Some(event) = self.apply_tab_event(event) else {
            return;
        };
        match event {
            InboundEvent::CookieChanged { cookie, removed } => {
                self.hub.cookie_changed(CookieChange { cookie, removed }).await;
            }
            InboundEvent::Message { id, request, sender } => {
                let line = match self.hub.message(request, sender).await {
                    Ok(result) => protocol::result_line(id, result),
                    Err(e) => {
                        tracing::warn!("message handler failed: {e}");
                        protocol::error_line(id, e)
                    }
                };
                self.respond(line);
            }
            InboundEvent::ActionClicked { tab } => self.hub.action_clicked(tab).await,
            InboundEvent::Installed { reason } => self.hub.installed(InstallDetails { reason }).await,
            InboundEvent::TabUpdated { .. } | InboundEvent::TabRemoved { .. } => {}
        }
    }

    fn respond(&self, line: Value) {
        if self.outbound.send(line).is_err() {
            tracing::debug!("output closed, response dropped");
        }
    }
}
