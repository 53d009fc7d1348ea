//! TabTree — interaction logic for one entry of a hierarchical browser tab list.
//!
//! This library crate exposes all modules for use by front-ends and integration tests.

pub mod managers;
pub mod services;
pub mod tab_entry;
pub mod types;
