//! Tab Entry — one row of the hierarchical tab list.
//!
//! Wires title resolution, hover preview, click routing and close
//! reassignment around a single tab record. The entry never mutates the
//! record: activation and removal are requested from the [`TabApi`], and the
//! updated record comes back through [`TabEntry::set_props`].

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::managers::tab_manager::TabApi;
use crate::services::active_tab_reassigner::ActiveTabReassigner;
use crate::services::click_router::ClickRouter;
use crate::services::hover_preview::HoverPreviewController;
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::services::title_resolver::TitleResolver;
use crate::types::element::{ControlMarker, ElementId, ElementTree};
use crate::types::errors::{SettingsError, TabError};
use crate::types::event::PointerEvent;
use crate::types::settings::EntrySettings;
use crate::types::tab::{DepthMap, TabId, TabRecord};
use crate::types::view::{FaviconView, PopupView, TabEntryView};

/// Context-menu callback owned by the containing list.
pub type ContextMenuHandler = Arc<dyn Fn(&PointerEvent, &TabRecord) + Send + Sync>;

/// Inputs supplied by the containing list on every render.
#[derive(Clone)]
pub struct TabEntryProps {
    pub tab: TabRecord,
    /// Tabs of the same window or group, in display order.
    pub siblings: Vec<TabRecord>,
    pub depth_map: DepthMap,
    pub level: u32,
    pub on_context_menu: ContextMenuHandler,
}

impl fmt::Debug for TabEntryProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TabEntryProps")
            .field("tab", &self.tab)
            .field("siblings", &self.siblings.len())
            .field("level", &self.level)
            .finish_non_exhaustive()
    }
}

/// Element ids of the entry's visual structure.
#[derive(Debug, Clone)]
pub struct EntryLayout {
    pub tree: ElementTree,
    pub wrapper: ElementId,
    pub row: ElementId,
    pub favicon: ElementId,
    pub volume: ElementId,
    pub title: ElementId,
    pub close: ElementId,
    pub close_glyph: ElementId,
    pub popup: ElementId,
}

impl EntryLayout {
    fn build() -> Self {
        let mut tree = ElementTree::new();
        let wrapper = tree.add_root("tab-wrapper");
        let row = tree.add_child(wrapper, "tab", &[]);
        let favicon = tree.add_child(row, "favicon", &[]);
        let volume = tree.add_child(row, "volume-indicator", &[]);
        let title = tree.add_child(row, "title", &[]);
        let close = tree.add_child(row, "close", &[ControlMarker::Close]);
        let close_glyph = tree.add_child(close, "close-glyph", &[]);
        let popup = tree.add_child(wrapper, "popup", &[]);
        Self {
            tree,
            wrapper,
            row,
            favicon,
            volume,
            title,
            close,
            close_glyph,
            popup,
        }
    }
}

/// Result of a completed close request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CloseOutcome {
    pub removed: TabId,
    /// Tab activated afterwards, if any.
    pub activated: Option<TabId>,
}

/// Left offset of a tab: `level * unit` for tabs with an opener, else 0.
pub fn indent_offset(tab: &TabRecord, level: u32, unit: u32) -> u32 {
    if tab.has_opener() {
        level.saturating_mul(unit)
    } else {
        0
    }
}

pub struct TabEntry<A: TabApi> {
    api: Arc<A>,
    props: TabEntryProps,
    settings: EntrySettings,
    layout: EntryLayout,
    hover: HoverPreviewController,
}

impl<A: TabApi> TabEntry<A> {
    pub fn new(api: Arc<A>, props: TabEntryProps, settings: EntrySettings) -> Self {
        let hover = HoverPreviewController::new(settings.hover_delay());
        Self {
            api,
            props,
            settings,
            layout: EntryLayout::build(),
            hover,
        }
    }

    /// Builds an entry with tunables read from the JSON settings file at
    /// `config_path`. A missing file means defaults.
    pub fn from_config(
        api: Arc<A>,
        props: TabEntryProps,
        config_path: impl Into<PathBuf>,
    ) -> Result<Self, SettingsError> {
        let settings = SettingsEngine::new(config_path).load()?;
        Ok(Self::new(api, props, settings))
    }

    pub fn settings(&self) -> &EntrySettings {
        &self.settings
    }

    pub fn tab(&self) -> &TabRecord {
        &self.props.tab
    }

    pub fn props(&self) -> &TabEntryProps {
        &self.props
    }

    pub fn layout(&self) -> &EntryLayout {
        &self.layout
    }

    pub fn hover(&self) -> &HoverPreviewController {
        &self.hover
    }

    /// Replaces the inputs with fresh data from the list. Hover state is kept.
    pub fn set_props(&mut self, props: TabEntryProps) {
        self.props = props;
    }

    /// Depth recorded for this tab in the list's depth map.
    pub fn recorded_depth(&self) -> Option<u32> {
        let id = self.props.tab.id?;
        self.props.depth_map.get(&id).copied().flatten()
    }

    pub fn title(&self) -> String {
        TitleResolver::display_title(&self.props.tab)
    }

    pub fn indent(&self) -> u32 {
        indent_offset(
            &self.props.tab,
            self.props.level,
            self.settings.indent_per_level,
        )
    }

    pub fn popup_shown(&self) -> bool {
        self.hover.is_shown()
    }

    pub fn render(&self) -> TabEntryView {
        let tab = &self.props.tab;
        let title = self.title();
        let visible = self.popup_shown();
        TabEntryView {
            tab_id: tab.id,
            title: title.clone(),
            url: tab.url.clone(),
            indent: self.indent(),
            active: tab.active,
            favicon: match tab.fav_icon_url() {
                Some(url) => FaviconView::Image {
                    url: url.to_string(),
                },
                None => FaviconView::Placeholder,
            },
            audible: tab.audible,
            popup: PopupView {
                visible,
                opacity: if visible { 1.0 } else { 0.0 },
                title,
                url: tab.url.clone(),
            },
        }
    }

    /// Activates the tab unless the click came from a nested control.
    /// Returns whether activation was requested.
    pub async fn on_primary_click(&self, event: &PointerEvent) -> Result<bool, TabError> {
        if !ClickRouter::should_activate(&self.layout.tree, event.target) {
            return Ok(false);
        }
        let tab_id = self.props.tab.id.ok_or(TabError::MissingId)?;
        log::debug!("Activating tab {}", tab_id);
        self.api.activate(tab_id).await?;
        Ok(true)
    }

    /// Closes the tab, then moves activation if the closed tab was active.
    ///
    /// Activation is never requested before removal succeeds.
    pub async fn on_close_click(&self, event: &mut PointerEvent) -> Result<CloseOutcome, TabError> {
        event.prevent_default();
        let tab = self.props.tab.clone();
        let tab_id = tab.id.ok_or(TabError::MissingId)?;
        let next = ActiveTabReassigner::next_active(&tab, &self.props.siblings);

        log::debug!("Closing tab {}", tab_id);
        self.api.remove(tab_id).await?;

        let activated = match next {
            Some(next_id) if tab.active => {
                self.api.activate(next_id).await?;
                Some(next_id)
            }
            _ => None,
        };
        Ok(CloseOutcome {
            removed: tab_id,
            activated,
        })
    }

    /// Hands the event and the current record to the list's context menu.
    pub fn on_context_menu(&self, event: &PointerEvent) {
        (self.props.on_context_menu)(event, &self.props.tab);
    }

    pub fn on_mouse_enter(&mut self) {
        self.hover.on_mouse_enter();
    }

    pub fn on_mouse_leave(&mut self) {
        self.hover.on_mouse_leave();
    }
}
