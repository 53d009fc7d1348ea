use serde::Serialize;

use super::tab::TabId;

/// Everything a front-end needs to draw one tab entry.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TabEntryView {
    pub tab_id: Option<TabId>,
    pub title: String,
    pub url: Option<String>,
    /// Left offset in length units.
    pub indent: u32,
    pub active: bool,
    pub favicon: FaviconView,
    pub audible: bool,
    pub popup: PopupView,
}

/// Favicon image, or the "unknown file" glyph when the tab has none.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FaviconView {
    Image { url: String },
    Placeholder,
}

/// Hover popup contents.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PopupView {
    pub visible: bool,
    pub opacity: f32,
    pub title: String,
    pub url: Option<String>,
}
