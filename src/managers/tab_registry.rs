use crate::browser::match_pattern::url_matches_pattern;
use crate::types::errors::BrowserError;
use crate::types::tab::{Tab, TAB_ID_NONE};

/// Trait defining the open-tab bookkeeping interface.
pub trait TabRegistryTrait {
    /// Inserts or updates a tab. Returns true if the tab was new.
    fn upsert_tab(&mut self, tab: Tab) -> bool;
    fn remove_tab(&mut self, tab_id: i64) -> Result<Tab, BrowserError>;
    fn get_tab(&self, tab_id: i64) -> Option<&Tab>;
    /// Tabs whose URL matches `pattern`, in the order they were first seen.
    fn query(&self, pattern: &str) -> Vec<Tab>;
    fn tab_count(&self) -> usize;
    fn tab_ids(&self) -> Vec<i64>;
}

/// In-memory view of the browser's open tabs, kept current by tab events.
#[derive(Debug, Default)]
pub struct TabRegistry {
    tabs: Vec<Tab>,
}

impl TabRegistry {
    pub fn new() -> Self {
        Self { tabs: Vec::new() }
    }

    fn find_tab_index(&self, tab_id: i64) -> Option<usize> {
        self.tabs.iter().position(|t| t.id == tab_id)
    }
}

impl TabRegistryTrait for TabRegistry {
    /// `TAB_ID_NONE` never names a real tab and is not recorded.
    fn upsert_tab(&mut self, tab: Tab) -> bool {
        if tab.id == TAB_ID_NONE {
            return false;
        }
        match self.find_tab_index(tab.id) {
            Some(idx) => {
                self.tabs[idx] = tab;
                false
            }
            None => {
                self.tabs.push(tab);
                true
            }
        }
    }

    fn remove_tab(&mut self, tab_id: i64) -> Result<Tab, BrowserError> {
        let idx = self
            .find_tab_index(tab_id)
            .ok_or(BrowserError::TabNotFound(tab_id))?;
        Ok(self.tabs.remove(idx))
    }

    fn get_tab(&self, tab_id: i64) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.id == tab_id)
    }

    fn query(&self, pattern: &str) -> Vec<Tab> {
        self.tabs
            .iter()
            .filter(|t| t.url.as_deref().is_some_and(|url| url_matches_pattern(url, pattern)))
            .cloned()
            .collect()
    }

    fn tab_count(&self) -> usize {
        self.tabs.len()
    }

    fn tab_ids(&self) -> Vec<i64> {
        self.tabs.iter().map(|t| t.id).collect()
    }
}
