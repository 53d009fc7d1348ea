//! Active Tab Reassigner — picks the tab to activate after a close.

use crate::types::tab::{TabId, TabRecord};

pub struct ActiveTabReassigner;

impl ActiveTabReassigner {
    /// Returns the tab that should be active once `closed` is gone.
    ///
    /// A non-active close leaves the current active sibling in place. Closing
    /// the active tab moves activation to the sibling just before it; when it
    /// is first in the list (or not listed) the first other sibling marked
    /// active is used, which may be none.
    pub fn next_active(closed: &TabRecord, siblings: &[TabRecord]) -> Option<TabId> {
        let current_active = siblings
            .iter()
            .filter(|t| t.active)
            .find(|t| !closed.active || t.id != closed.id)
            .and_then(|t| t.id);

        if !closed.active {
            return current_active;
        }

        let index = closed
            .id
            .and_then(|id| siblings.iter().position(|t| t.id == Some(id)));
        match index {
            Some(i) if i > 0 => siblings[i - 1].id,
            _ => current_active,
        }
    }
}
