use serde::{Deserialize, Serialize};

use super::errors::SettingsError;

/// Browser family the extension build targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetEnv {
    Chrome,
    Edge,
    Firefox,
    Opera,
    Samsung,
    Safari,
}

impl TargetEnv {
    /// Environments that do not inject declared content scripts into tabs
    /// that were already open when the extension was installed.
    pub fn needs_base_module_injection(self) -> bool {
        matches!(
            self,
            TargetEnv::Chrome | TargetEnv::Edge | TargetEnv::Opera | TargetEnv::Samsung
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TargetEnv::Chrome => "chrome",
            TargetEnv::Edge => "edge",
            TargetEnv::Firefox => "firefox",
            TargetEnv::Opera => "opera",
            TargetEnv::Samsung => "samsung",
            TargetEnv::Safari => "safari",
        }
    }
}

impl std::str::FromStr for TargetEnv {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "chrome" => Ok(TargetEnv::Chrome),
            "edge" => Ok(TargetEnv::Edge),
            "firefox" => Ok(TargetEnv::Firefox),
            "opera" => Ok(TargetEnv::Opera),
            "samsung" => Ok(TargetEnv::Samsung),
            "safari" => Ok(TargetEnv::Safari),
            other => Err(format!("unknown target environment: {}", other)),
        }
    }
}

/// Settings for the autoplay sync background.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SyncSettings {
    /// Cookie domain to watch, matched exactly.
    pub cookie_domain: String,
    /// Cookie name to watch.
    pub cookie_name: String,
    /// Query-string field inside the cookie value that carries autoplay.
    pub cookie_field: String,
    /// Match pattern selecting the site's tabs.
    pub tab_url_pattern: String,
    pub target_env: TargetEnv,
    /// URL of the background context; messages from it are ignored.
    /// Generated per process when unset.
    pub context_url: Option<String>,
    /// Legacy storage file imported on first run, if present.
    pub legacy_storage_path: Option<String>,
}

impl SyncSettings {
    /// Rejects settings under which no cookie or tab could ever match.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let required = [
            ("cookie_domain", &self.cookie_domain),
            ("cookie_name", &self.cookie_name),
            ("cookie_field", &self.cookie_field),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(SettingsError::InvalidValue {
                    field,
                    reason: "must not be empty".to_string(),
                });
            }
        }

        if !is_match_pattern(&self.tab_url_pattern) {
            return Err(SettingsError::InvalidValue {
                field: "tab_url_pattern",
                reason: format!("not a match pattern: {}", self.tab_url_pattern),
            });
        }
        Ok(())
    }
}

/// `<all_urls>` or `<scheme>://<host>/<path>` with an http(s) or `*` scheme.
fn is_match_pattern(pattern: &str) -> bool {
    if pattern == "<all_urls>" {
        return true;
    }
    match pattern.split_once("://") {
        Some((scheme, rest)) => {
            matches!(scheme, "*" | "http" | "https")
                && rest.split_once('/').is_some_and(|(host, _)| !host.is_empty())
        }
        None => false,
    }
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            cookie_domain: ".youtube.com".to_string(),
            cookie_name: "PREF".to_string(),
            cookie_field: "f5".to_string(),
            tab_url_pattern: "https://www.youtube.com/*".to_string(),
            target_env: TargetEnv::Chrome,
            context_url: None,
            legacy_storage_path: None,
        }
    }
}
