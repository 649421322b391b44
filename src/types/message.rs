use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::tab::Tab;

/// An extension message, keyed by its `id` field.
///
/// Ids the background does not handle deserialize to `Unrecognized`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "id", rename_all = "camelCase")]
pub enum Command {
    GetPlatform,
    OptionChange,
    ShowPage {
        #[serde(default)]
        url: Option<String>,
    },
    AppUse,
    #[serde(other)]
    Unrecognized,
}

impl Command {
    /// Reads a command from a raw message envelope.
    ///
    /// Envelopes without a usable `id` are treated like unknown commands.
    pub fn from_value(value: Value) -> Self {
        match serde_json::from_value(value) {
            Ok(command) => command,
            Err(e) => {
                tracing::debug!("unreadable message envelope: {e}");
                Command::Unrecognized
            }
        }
    }

    /// The wire id of the command, for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Command::GetPlatform => "getPlatform",
            Command::OptionChange => "optionChange",
            Command::ShowPage { .. } => "showPage",
            Command::AppUse => "appUse",
            Command::Unrecognized => "unrecognized",
        }
    }
}

/// Metadata about the context that sent a message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sender {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub tab: Option<Tab>,
}
