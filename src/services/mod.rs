// Tab entry services
// Self-contained logic: title derivation, close reassignment, hover debounce, click routing, settings.

pub mod active_tab_reassigner;
pub mod click_router;
pub mod hover_preview;
pub mod settings_engine;
pub mod title_resolver;
