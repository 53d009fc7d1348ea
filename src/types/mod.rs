// Shared type definitions for tab entries.

pub mod element;
pub mod errors;
pub mod event;
pub mod settings;
pub mod tab;
pub mod view;
