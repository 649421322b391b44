//! Wire format of the host bridge: one JSON object per line.
//!
//! Inbound:  {"event":"cookieChanged","cookie":{...},"removed":false}
//!           {"event":"message","id":7,"request":{"id":"optionChange"},"sender":{"url":"..."}}
//! Outbound: {"id":7,"result":...} or {"id":7,"error":"..."}
//!           {"command":"sendMessage","tabId":3,"frameId":0,"message":{"id":"syncState"}}

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::types::cookie::Cookie;
use crate::types::install::InstallReason;
use crate::types::message::Sender;
use crate::types::tab::{Tab, TabMessage};

/// An event reported by the browser side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum InboundEvent {
    CookieChanged {
        cookie: Cookie,
        #[serde(default)]
        removed: bool,
    },
    Message {
        /// Correlation id echoed in the response line.
        #[serde(default)]
        id: Value,
        request: Value,
        #[serde(default)]
        sender: Sender,
    },
    ActionClicked {
        tab: Tab,
    },
    Installed {
        reason: InstallReason,
    },
    TabUpdated {
        tab: Tab,
    },
    TabRemoved {
        #[serde(rename = "tabId")]
        tab_id: i64,
    },
}

/// A call the host asks the browser side to perform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum OutboundCommand {
    SendMessage {
        #[serde(rename = "tabId")]
        tab_id: i64,
        #[serde(rename = "frameId")]
        frame_id: u32,
        message: TabMessage,
    },
    ShowPage {
        url: String,
    },
    ShowOptionsPage {
        #[serde(rename = "activeTab")]
        active_tab: Option<Tab>,
    },
    InsertBaseModule {
        url: String,
        #[serde(rename = "allFrames")]
        all_frames: bool,
    },
}

pub fn ready_line() -> Value {
    json!({"event": "ready", "version": env!("CARGO_PKG_VERSION")})
}

pub fn result_line(id: Value, result: Option<Value>) -> Value {
    json!({"id": id, "result": result.unwrap_or(Value::Null)})
}

pub fn error_line(id: Value, error: impl std::fmt::Display) -> Value {
    json!({"id": id, "error": error.to_string()})
}
