//! Persistent storage
//!
//! This module handles all data persistence: the key-value store adapter,
//! the chat session repository, and UI preferences.

pub mod prefs;
pub mod sessions;
pub mod store;

use std::path::PathBuf;

use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("could not determine application data directory")]
    NoDataDir,
}

/// Store keys for all persisted state.
///
/// Core state and unrelated UI preferences share one store, so every key
/// lives here to keep the namespace collision-free.
pub mod keys {
    /// Serialized session collection
    pub const SESSIONS: &str = "chat-sessions";
    /// Id of the currently selected session
    pub const CURRENT_SESSION: &str = "current-session-id";
    /// Dark mode preference
    pub const DARK_MODE: &str = "dark-mode";
    /// Message sound preference
    pub const SOUND_ENABLED: &str = "sound-enabled";
    /// Background music preference
    pub const MUSIC_ENABLED: &str = "music-enabled";
    /// Saved birth date for the age widget
    pub const BIRTH_DATE: &str = "birth-date";
}

/// Get the application data directory, creating it if needed
pub fn get_data_dir() -> Result<PathBuf, StorageError> {
    let dirs = directories::ProjectDirs::from("", "", "agpt").ok_or(StorageError::NoDataDir)?;
    let dir = dirs.data_dir().to_path_buf();
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
