// Tab state managers
// The tab-management collaborator surface and its in-memory implementation.

pub mod tab_manager;
