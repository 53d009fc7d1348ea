//! Tests for the TabEntry composition root against the in-memory TabManager.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tabtree::managers::tab_manager::{TabApi, TabManager, TabRequest};
use tabtree::tab_entry::{indent_offset, CloseOutcome, TabEntry, TabEntryProps};
use tabtree::types::errors::{SettingsError, TabError};
use tabtree::types::event::PointerEvent;
use tabtree::types::settings::EntrySettings;
use tabtree::types::tab::{DepthMap, TabId, TabRecord};
use tabtree::types::view::FaviconView;

fn props_for(mgr: &TabManager, id: TabId, level: u32) -> TabEntryProps {
    TabEntryProps {
        tab: mgr.get_tab(id).unwrap(),
        siblings: mgr.get_all_tabs(),
        depth_map: mgr.depth_map(),
        level,
        on_context_menu: Arc::new(|_: &PointerEvent, _: &TabRecord| {}),
    }
}

fn entry_for(mgr: &Arc<TabManager>, id: TabId, level: u32) -> TabEntry<TabManager> {
    TabEntry::new(
        Arc::clone(mgr),
        props_for(mgr, id, level),
        EntrySettings::default(),
    )
}

/// Three tabs: 1 and 2 at the root, 3 opened from 2. Tab 1 is active.
fn three_tabs() -> Arc<TabManager> {
    let mgr = Arc::new(TabManager::new());
    mgr.open_tab("https://a.test/", "A - https://a.test/", None);
    mgr.open_tab("https://b.test/", "B", None);
    mgr.open_tab("https://b.test/child", "B child", Some(2));
    mgr
}

// ─── Rendering ───

#[test]
fn test_render_resolves_title_and_popup() {
    let mgr = three_tabs();
    let entry = entry_for(&mgr, 1, 0);
    let view = entry.render();

    assert_eq!(view.tab_id, Some(1));
    assert_eq!(view.title, "A");
    assert!(view.active);
    assert_eq!(view.popup.title, "A");
    assert_eq!(view.popup.url.as_deref(), Some("https://a.test/"));
    assert!(!view.popup.visible);
    assert_eq!(view.popup.opacity, 0.0);
}

#[test]
fn test_render_favicon_placeholder_and_audible() {
    let mgr = three_tabs();
    let mut entry = entry_for(&mgr, 1, 0);
    assert_eq!(entry.render().favicon, FaviconView::Placeholder);
    assert!(!entry.render().audible);

    let mut props = entry.props().clone();
    props.tab.fav_icon_url = Some("https://a.test/favicon.ico".to_string());
    props.tab.audible = true;
    entry.set_props(props);

    let view = entry.render();
    assert_eq!(
        view.favicon,
        FaviconView::Image {
            url: "https://a.test/favicon.ico".to_string()
        }
    );
    assert!(view.audible);
}

#[test]
fn test_indent_uses_level_only_for_opened_tabs() {
    let mgr = three_tabs();
    assert_eq!(entry_for(&mgr, 3, 1).indent(), 12);
    assert_eq!(entry_for(&mgr, 3, 3).indent(), 36);
    assert_eq!(entry_for(&mgr, 2, 3).indent(), 0);
    assert_eq!(entry_for(&mgr, 3, 0).indent(), 0);
}

#[test]
fn test_indent_unit_comes_from_settings() {
    let mgr = three_tabs();
    let settings = EntrySettings {
        indent_per_level: 20,
        ..EntrySettings::default()
    };
    let entry = TabEntry::new(Arc::clone(&mgr), props_for(&mgr, 3, 2), settings);
    assert_eq!(entry.indent(), 40);
    assert_eq!(indent_offset(entry.tab(), 2, 20), 40);
}

#[test]
fn test_recorded_depth_reads_depth_map() {
    let mgr = three_tabs();
    assert_eq!(entry_for(&mgr, 3, 1).recorded_depth(), Some(1));
    assert_eq!(entry_for(&mgr, 1, 0).recorded_depth(), Some(0));

    let mut entry = entry_for(&mgr, 1, 0);
    let mut props = entry.props().clone();
    props.depth_map = DepthMap::new();
    entry.set_props(props);
    assert_eq!(entry.recorded_depth(), None);
}

#[test]
fn test_render_serializes_to_json() {
    let mgr = three_tabs();
    let json = serde_json::to_value(entry_for(&mgr, 3, 2).render()).unwrap();
    assert_eq!(json["title"], "B child");
    assert_eq!(json["indent"], 24);
    assert_eq!(json["favicon"]["kind"], "placeholder");
}

// ─── Primary click ───

#[tokio::test]
async fn test_click_on_title_activates() {
    let mgr = three_tabs();
    let entry = entry_for(&mgr, 2, 0);
    let event = PointerEvent::new(entry.layout().title);

    assert!(entry.on_primary_click(&event).await.unwrap());
    assert_eq!(mgr.requests(), vec![TabRequest::Activate(2)]);
    assert_eq!(mgr.get_active_tab().unwrap().id, Some(2));
}

#[tokio::test]
async fn test_click_on_row_activates() {
    let mgr = three_tabs();
    let entry = entry_for(&mgr, 2, 0);
    let event = PointerEvent::new(entry.layout().row);
    assert!(entry.on_primary_click(&event).await.unwrap());
}

#[tokio::test]
async fn test_click_on_close_glyph_does_not_activate() {
    let mgr = three_tabs();
    let entry = entry_for(&mgr, 2, 0);
    for target in [entry.layout().close, entry.layout().close_glyph] {
        let event = PointerEvent::new(target);
        assert!(!entry.on_primary_click(&event).await.unwrap());
    }
    assert!(mgr.requests().is_empty());
}

#[tokio::test]
async fn test_click_without_id_fails() {
    let mgr = three_tabs();
    let mut entry = entry_for(&mgr, 2, 0);
    let mut props = entry.props().clone();
    props.tab.id = None;
    entry.set_props(props);

    let event = PointerEvent::new(entry.layout().title);
    assert_eq!(
        entry.on_primary_click(&event).await,
        Err(TabError::MissingId)
    );
}

// ─── Close ───

#[tokio::test]
async fn test_close_non_active_tab_only_removes() {
    let mgr = Arc::new(TabManager::new());
    mgr.open_tab("https://a.test/", "A", None);
    mgr.open_tab("https://example.com", "Docs - example.com", None);
    mgr.open_tab("https://c.test/", "C", None);
    mgr.activate(3).await.unwrap();

    let entry = entry_for(&mgr, 2, 0);
    let mut event = PointerEvent::new(entry.layout().close);
    let outcome = entry.on_close_click(&mut event).await.unwrap();

    assert!(event.default_prevented());
    assert_eq!(
        outcome,
        CloseOutcome {
            removed: 2,
            activated: None
        }
    );
    assert_eq!(
        mgr.requests(),
        vec![TabRequest::Activate(3), TabRequest::Remove(2)]
    );
    assert_eq!(mgr.get_active_tab().unwrap().id, Some(3));
}

#[tokio::test]
async fn test_close_active_tab_activates_previous_after_removal() {
    let mgr = three_tabs();
    mgr.activate(3).await.unwrap();

    let entry = entry_for(&mgr, 3, 1);
    let mut event = PointerEvent::new(entry.layout().close_glyph);
    let outcome = entry.on_close_click(&mut event).await.unwrap();

    assert_eq!(outcome.activated, Some(2));
    assert_eq!(
        mgr.requests(),
        vec![
            TabRequest::Activate(3),
            TabRequest::Remove(3),
            TabRequest::Activate(2)
        ]
    );
    assert_eq!(mgr.get_active_tab().unwrap().id, Some(2));
}

#[tokio::test]
async fn test_close_active_first_tab_requests_no_activation() {
    let mgr = three_tabs();
    let entry = entry_for(&mgr, 1, 0);
    let mut event = PointerEvent::new(entry.layout().close);
    let outcome = entry.on_close_click(&mut event).await.unwrap();

    assert_eq!(outcome.activated, None);
    assert_eq!(mgr.requests(), vec![TabRequest::Remove(1)]);
    assert!(mgr.get_active_tab().is_none());
}

#[tokio::test]
async fn test_failed_removal_skips_activation() {
    let mgr = three_tabs();
    mgr.activate(3).await.unwrap();
    let entry = entry_for(&mgr, 3, 1);
    // Another actor closes the tab first.
    mgr.remove(3).await.unwrap();

    let mut event = PointerEvent::new(entry.layout().close);
    let err = entry.on_close_click(&mut event).await.unwrap_err();

    assert!(matches!(err, TabError::RemovalFailed { tab_id: 3, .. }));
    assert_eq!(
        mgr.requests(),
        vec![TabRequest::Activate(3), TabRequest::Remove(3)]
    );
}

// ─── Context menu ───

#[test]
fn test_context_menu_forwards_event_and_tab() {
    let mgr = three_tabs();
    let seen: Arc<Mutex<Vec<(TabRecord, PointerEvent)>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);

    let mut props = props_for(&mgr, 2, 0);
    props.on_context_menu = Arc::new(move |event: &PointerEvent, tab: &TabRecord| {
        sink.lock().unwrap().push((tab.clone(), event.clone()));
    });
    let entry = TabEntry::new(Arc::clone(&mgr), props, EntrySettings::default());

    let event = PointerEvent::new(entry.layout().title);
    entry.on_context_menu(&event);

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].0.id, Some(2));
    assert_eq!(seen[0].1, event);
    assert!(mgr.requests().is_empty());
}

// ─── Hover ───

#[tokio::test(start_paused = true)]
async fn test_hover_shows_popup_in_view() {
    let mgr = three_tabs();
    let mut entry = entry_for(&mgr, 2, 0);

    entry.on_mouse_enter();
    tokio::time::sleep(Duration::from_millis(520)).await;
    let view = entry.render();
    assert!(view.popup.visible);
    assert_eq!(view.popup.opacity, 1.0);

    entry.on_mouse_leave();
    assert!(!entry.render().popup.visible);
}

#[tokio::test(start_paused = true)]
async fn test_hover_state_survives_prop_refresh() {
    let mgr = three_tabs();
    let mut entry = entry_for(&mgr, 2, 0);

    entry.on_mouse_enter();
    tokio::time::sleep(Duration::from_millis(600)).await;
    entry.set_props(props_for(&mgr, 2, 0));
    assert!(entry.popup_shown());
}

#[tokio::test(start_paused = true)]
async fn test_hover_delay_comes_from_settings() {
    let mgr = three_tabs();
    let settings = EntrySettings {
        hover_delay_ms: 50,
        ..EntrySettings::default()
    };
    let mut entry = TabEntry::new(Arc::clone(&mgr), props_for(&mgr, 2, 0), settings);
    assert_eq!(entry.hover().delay(), Duration::from_millis(50));

    entry.on_mouse_enter();
    tokio::time::sleep(Duration::from_millis(60)).await;
    assert!(entry.popup_shown());
}

// ─── Settings file ───

#[test]
fn test_from_config_applies_settings_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("entry.json");
    std::fs::write(&path, r#"{"hover_delay_ms": 80, "indent_per_level": 16}"#).unwrap();

    let mgr = three_tabs();
    let entry = TabEntry::from_config(Arc::clone(&mgr), props_for(&mgr, 3, 2), &path).unwrap();
    assert_eq!(entry.indent(), 32);
    assert_eq!(entry.hover().delay(), Duration::from_millis(80));
}

#[test]
fn test_from_config_missing_file_uses_defaults() {
    let dir = tempfile::TempDir::new().unwrap();
    let mgr = three_tabs();
    let entry = TabEntry::from_config(
        Arc::clone(&mgr),
        props_for(&mgr, 3, 2),
        dir.path().join("absent.json"),
    )
    .unwrap();
    assert_eq!(entry.settings(), &EntrySettings::default());
    assert_eq!(entry.indent(), 24);
}

#[test]
fn test_from_config_rejects_malformed_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("entry.json");
    std::fs::write(&path, "{ not json").unwrap();

    let mgr = three_tabs();
    let result = TabEntry::from_config(Arc::clone(&mgr), props_for(&mgr, 3, 2), &path);
    assert!(matches!(result, Err(SettingsError::SerializationError(_))));
}
