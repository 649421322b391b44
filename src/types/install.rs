use serde::{Deserialize, Serialize};

/// Why the browser fired the install event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallReason {
    Install,
    Update,
    BrowserUpdate,
    SharedModuleUpdate,
    #[serde(other)]
    Other,
}

/// Payload of the install/update event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallDetails {
    pub reason: InstallReason,
}
