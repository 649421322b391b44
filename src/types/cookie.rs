use serde::{Deserialize, Serialize};

/// A browser cookie as reported by the cookie-change event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cookie {
    pub domain: String,
    pub name: String,
    pub value: String,
}

/// Payload of a cookie-change notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookieChange {
    pub cookie: Cookie,
    #[serde(default)]
    pub removed: bool,
}

impl CookieChange {
    /// True for a non-removal change of exactly `domain` / `name`.
    pub fn qualifies(&self, domain: &str, name: &str) -> bool {
        !self.removed && self.cookie.domain == domain && self.cookie.name == name
    }
}
