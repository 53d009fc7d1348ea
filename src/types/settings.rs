use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Tunables for a tab entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EntrySettings {
    /// How long the pointer must rest on an entry before its popup shows.
    pub hover_delay_ms: u64,
    /// Indentation length units per nesting level.
    pub indent_per_level: u32,
}

impl Default for EntrySettings {
    fn default() -> Self {
        Self {
            hover_delay_ms: 500,
            indent_per_level: 12,
        }
    }
}

impl EntrySettings {
    pub fn hover_delay(&self) -> Duration {
        Duration::from_millis(self.hover_delay_ms)
    }
}
