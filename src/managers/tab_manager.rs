//! Tab management collaborator.
//!
//! [`TabApi`] is the request/response surface a tab entry talks to. The
//! browser-backed implementation lives outside this crate; [`TabManager`] is
//! an in-memory window of tabs implementing it.

use std::collections::HashSet;
use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::types::errors::TabError;
use crate::types::tab::{DepthMap, TabId, TabRecord};

/// Asynchronous access to the browser's tab set.
pub trait TabApi {
    /// Marks the tab active.
    fn activate(&self, tab_id: TabId) -> impl Future<Output = Result<(), TabError>> + Send;
    /// Closes the tab. Resolves once the browser has processed the removal.
    fn remove(&self, tab_id: TabId) -> impl Future<Output = Result<(), TabError>> + Send;
}

/// A request accepted by [`TabManager`], in arrival order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabRequest {
    Activate(TabId),
    Remove(TabId),
}

#[derive(Default)]
struct Window {
    tabs: Vec<TabRecord>,
    next_id: TabId,
    requests: Vec<TabRequest>,
}

impl Window {
    fn find_tab_index(&self, tab_id: TabId) -> Option<usize> {
        self.tabs.iter().position(|t| t.id == Some(tab_id))
    }
}

/// In-memory tab set for a single window.
pub struct TabManager {
    window: Mutex<Window>,
}

impl TabManager {
    pub fn new() -> Self {
        Self {
            window: Mutex::new(Window {
                next_id: 1,
                ..Window::default()
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Window> {
        self.window.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Opens a tab at the end of the list and returns its id.
    /// The first tab opened becomes active.
    pub fn open_tab(&self, url: &str, title: &str, opener: Option<TabId>) -> TabId {
        let mut window = self.lock();
        let id = window.next_id;
        window.next_id += 1;
        let active = window.tabs.is_empty();
        window.tabs.push(TabRecord {
            id: Some(id),
            title: title.to_string(),
            url: Some(url.to_string()),
            active,
            opener_tab_id: opener,
            ..TabRecord::default()
        });
        id
    }

    pub fn get_tab(&self, tab_id: TabId) -> Option<TabRecord> {
        let window = self.lock();
        window.find_tab_index(tab_id).map(|i| window.tabs[i].clone())
    }

    /// All tabs in list order.
    pub fn get_all_tabs(&self) -> Vec<TabRecord> {
        self.lock().tabs.clone()
    }

    pub fn get_active_tab(&self) -> Option<TabRecord> {
        self.lock().tabs.iter().find(|t| t.active).cloned()
    }

    pub fn tab_count(&self) -> usize {
        self.lock().tabs.len()
    }

    /// Accepted requests, oldest first.
    pub fn requests(&self) -> Vec<TabRequest> {
        self.lock().requests.clone()
    }

    /// Nesting depth of every tab, following `openerTabId` links.
    ///
    /// Openers that are not open end the chain; cycles stop at the first
    /// repeated tab.
    pub fn depth_map(&self) -> DepthMap {
        let tabs = self.get_all_tabs();
        let opener_of = |id: TabId| {
            tabs.iter()
                .find(|t| t.id == Some(id))
                .and_then(|t| t.opener_tab_id)
        };

        let mut depths = DepthMap::new();
        for tab in &tabs {
            let Some(id) = tab.id else { continue };
            let mut depth = 0;
            let mut seen = HashSet::from([id]);
            let mut cursor = opener_of(id);
            while let Some(opener) = cursor {
                if !seen.insert(opener) || !tabs.iter().any(|t| t.id == Some(opener)) {
                    break;
                }
                depth += 1;
                cursor = opener_of(opener);
            }
            depths.insert(id, Some(depth));
        }
        depths
    }
}

impl Default for TabManager {
    fn default() -> Self {
        Self::new()
    }
}

impl TabApi for TabManager {
    async fn activate(&self, tab_id: TabId) -> Result<(), TabError> {
        let mut window = self.lock();
        if window.find_tab_index(tab_id).is_none() {
            log::warn!("Rejected activation of unknown tab {}", tab_id);
            return Err(TabError::ActivationFailed {
                tab_id,
                reason: "tab not found".to_string(),
            });
        }
        for tab in window.tabs.iter_mut() {
            tab.active = tab.id == Some(tab_id);
        }
        window.requests.push(TabRequest::Activate(tab_id));
        log::debug!("Activated tab {}", tab_id);
        Ok(())
    }

    async fn remove(&self, tab_id: TabId) -> Result<(), TabError> {
        let mut window = self.lock();
        let Some(index) = window.find_tab_index(tab_id) else {
            log::warn!("Rejected removal of unknown tab {}", tab_id);
            return Err(TabError::RemovalFailed {
                tab_id,
                reason: "tab not found".to_string(),
            });
        };
        window.tabs.remove(index);
        window.requests.push(TabRequest::Remove(tab_id));
        log::debug!("Removed tab {}", tab_id);
        Ok(())
    }
}
