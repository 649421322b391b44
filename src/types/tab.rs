use serde::{Deserialize, Serialize};

/// Tab ID the browser uses for "no tab" (e.g. messages from extension pages).
pub const TAB_ID_NONE: i64 = -1;

/// Frame ID of a tab's top-level document.
pub const TOP_FRAME_ID: u32 = 0;

/// Represents a browser tab as reported by the tabs API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tab {
    pub id: i64,
    #[serde(default)]
    pub url: Option<String>,
}

impl Tab {
    pub fn new(id: i64, url: impl Into<String>) -> Self {
        Self {
            id,
            url: Some(url.into()),
        }
    }
}

/// Notification pushed from the background context into site tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "id", rename_all = "camelCase")]
pub enum TabMessage {
    /// Tells the content script to re-read the stored preference.
    SyncState,
}
