use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::errors::TabDataError;

/// Browser-assigned tab identifier.
pub type TabId = i64;

/// Nesting depth per tab id, supplied by the containing list.
pub type DepthMap = HashMap<TabId, Option<u32>>;

/// One browser tab as reported by the tab-management collaborator.
///
/// Field names follow the browser's tab JSON (`openerTabId`, `favIconUrl`, ...).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TabRecord {
    #[serde(default)]
    pub id: Option<TabId>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub opener_tab_id: Option<TabId>,
    #[serde(default)]
    pub fav_icon_url: Option<String>,
    #[serde(default)]
    pub audible: bool,
    #[serde(default)]
    pub viv_ext_data: Option<String>,
}

/// Vivaldi's per-tab extension payload. Only the thumbnail is read.
#[derive(Debug, Deserialize)]
struct ExtData {
    #[serde(default)]
    thumbnail: Option<String>,
}

impl TabRecord {
    /// Returns the URL if it is set and non-empty.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref().filter(|u| !u.is_empty())
    }

    /// Returns the favicon URL if it is set and non-empty.
    pub fn fav_icon_url(&self) -> Option<&str> {
        self.fav_icon_url.as_deref().filter(|u| !u.is_empty())
    }

    /// Whether this tab was spawned from another tab.
    pub fn has_opener(&self) -> bool {
        self.opener_tab_id.is_some()
    }

    /// Extracts the page thumbnail from `vivExtData`.
    ///
    /// Missing ext data or a missing `thumbnail` field yield an empty string.
    pub fn thumbnail(&self) -> Result<String, TabDataError> {
        let raw = match self.viv_ext_data.as_deref() {
            Some(raw) if !raw.is_empty() => raw,
            _ => return Ok(String::new()),
        };
        let ext: ExtData = serde_json::from_str(raw)
            .map_err(|e| TabDataError::MalformedExtData(e.to_string()))?;
        Ok(ext.thumbnail.unwrap_or_default())
    }
}
