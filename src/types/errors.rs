use thiserror::Error;

use super::tab::TabId;

// === TitleError ===

/// Errors raised while deriving a display title.
#[derive(Debug, Error, PartialEq)]
pub enum TitleError {
    /// The tab URL could not be parsed.
    #[error("Malformed tab URL: {0}")]
    MalformedUrl(String),
}

// === TabError ===

/// Errors related to tab activation and removal requests.
#[derive(Debug, Error, PartialEq)]
pub enum TabError {
    /// The tab record carries no id yet.
    #[error("Tab has no id")]
    MissingId,
    /// The collaborator rejected a removal request.
    #[error("Failed to remove tab {tab_id}: {reason}")]
    RemovalFailed { tab_id: TabId, reason: String },
    /// The collaborator rejected an activation request.
    #[error("Failed to activate tab {tab_id}: {reason}")]
    ActivationFailed { tab_id: TabId, reason: String },
}

// === TabDataError ===

/// Errors related to opaque per-tab data.
#[derive(Debug, Error, PartialEq)]
pub enum TabDataError {
    /// `vivExtData` is not valid JSON.
    #[error("Malformed extension data: {0}")]
    MalformedExtData(String),
}

// === SettingsError ===

/// Errors related to entry settings management.
#[derive(Debug, Error, PartialEq)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    #[error("Settings I/O error: {0}")]
    IoError(String),
    /// Failed to serialize or deserialize settings.
    #[error("Settings serialization error: {0}")]
    SerializationError(String),
    /// The provided settings key is invalid.
    #[error("Invalid settings key: {0}")]
    InvalidKey(String),
    /// The provided settings value is invalid.
    #[error("Invalid settings value: {0}")]
    InvalidValue(String),
}
