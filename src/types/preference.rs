use serde::{Deserialize, Serialize};

/// Autoplay state decoded from the site cookie.
///
/// Only `On` and `Off` map to a stored value; `Unknown` means the cookie did
/// not carry a recognizable setting and must leave storage untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AutoplayPreference {
    On,
    Off,
    Unknown,
}

impl AutoplayPreference {
    /// The storable form of this preference, `None` for `Unknown`.
    pub fn as_bool(self) -> Option<bool> {
        match self {
            AutoplayPreference::On => Some(true),
            AutoplayPreference::Off => Some(false),
            AutoplayPreference::Unknown => None,
        }
    }
}

impl From<bool> for AutoplayPreference {
    fn from(enabled: bool) -> Self {
        if enabled {
            AutoplayPreference::On
        } else {
            AutoplayPreference::Off
        }
    }
}
