//! UI preferences
//!
//! Typed accessors over the key-value store for the small settings that
//! live alongside the session data: theme, sound, music, and the saved
//! birth date for the age widget.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::storage::store::KeyValueStore;
use crate::storage::{keys, StorageError};

/// Preferences facade over the shared store
#[derive(Clone)]
pub struct Preferences {
    store: Arc<dyn KeyValueStore>,
}

impl Preferences {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Dark mode, defaulting to on
    pub fn dark_mode(&self) -> bool {
        self.bool_pref(keys::DARK_MODE, true)
    }

    pub fn set_dark_mode(&self, enabled: bool) -> Result<(), StorageError> {
        self.store.set(keys::DARK_MODE, if enabled { "true" } else { "false" })
    }

    /// Message sound effects, defaulting to on
    pub fn sound_enabled(&self) -> bool {
        self.bool_pref(keys::SOUND_ENABLED, true)
    }

    pub fn set_sound_enabled(&self, enabled: bool) -> Result<(), StorageError> {
        self.store
            .set(keys::SOUND_ENABLED, if enabled { "true" } else { "false" })
    }

    /// Background music, defaulting to on
    pub fn music_enabled(&self) -> bool {
        self.bool_pref(keys::MUSIC_ENABLED, true)
    }

    pub fn set_music_enabled(&self, enabled: bool) -> Result<(), StorageError> {
        self.store
            .set(keys::MUSIC_ENABLED, if enabled { "true" } else { "false" })
    }

    /// Saved birth date, if the user entered one.
    ///
    /// An unparseable stored value is treated as absent.
    pub fn birth_date(&self) -> Option<NaiveDate> {
        let raw = self.store.get(keys::BIRTH_DATE)?;
        match raw.parse() {
            Ok(date) => Some(date),
            Err(e) => {
                tracing::warn!("ignoring invalid stored birth date {raw:?}: {e}");
                None
            }
        }
    }

    pub fn set_birth_date(&self, date: NaiveDate) -> Result<(), StorageError> {
        self.store
            .set(keys::BIRTH_DATE, &date.format("%Y-%m-%d").to_string())
    }

    pub fn clear_birth_date(&self) -> Result<(), StorageError> {
        self.store.remove(keys::BIRTH_DATE)
    }

    fn bool_pref(&self, key: &str, default: bool) -> bool {
        self.store
            .get(key)
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }
}
