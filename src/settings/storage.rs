//! Storage for display settings
//!
//! ```text
//! <data_dir>/settings.json   # {"showNative": true, "showForeign": true}
//! ```
//!
//! Every write goes to its own uniquely named temp file in the same directory,
//! which is then renamed over the real one. Readers, and other processes
//! writing at the same time, see either the previous pair or the new pair.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;
use tokio::sync::watch;

use super::models::DisplaySettings;

#[derive(Error, Debug)]
pub enum SettingsStorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SettingsStorageError>;

const SETTINGS_FILE: &str = "settings.json";

/// Preference store with a live view of the current settings
pub struct SettingsStorage {
    path: PathBuf,
    settings_tx: watch::Sender<DisplaySettings>,
}

impl SettingsStorage {
    /// Open the settings stored under `base_path`, falling back to defaults
    /// when nothing has been written yet.
    pub fn open(base_path: &Path) -> Result<Self> {
        fs::create_dir_all(base_path)?;
        let path = base_path.join(SETTINGS_FILE);

        let settings = if path.exists() {
            match read_settings(&path) {
                Ok(settings) => settings,
                Err(e) => {
                    log::warn!("Ignoring unreadable settings at {}: {}", path.display(), e);
                    DisplaySettings::default()
                }
            }
        } else {
            DisplaySettings::default()
        };

        let (settings_tx, _) = watch::channel(settings);
        Ok(Self { path, settings_tx })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn current(&self) -> DisplaySettings {
        *self.settings_tx.borrow()
    }

    /// Live settings; the receiver starts with the current value
    pub fn observe_settings(&self) -> watch::Receiver<DisplaySettings> {
        self.settings_tx.subscribe()
    }

    pub fn observer_count(&self) -> usize {
        self.settings_tx.receiver_count()
    }

    /// Replace both flags at once
    pub fn update_settings(&self, show_native: bool, show_foreign: bool) -> Result<()> {
        let settings = DisplaySettings::new(show_native, show_foreign);

        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(serde_json::to_string_pretty(&settings)?.as_bytes())?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        log::debug!(
            "Saved display settings: native={}, foreign={}",
            show_native,
            show_foreign
        );

        self.settings_tx.send_replace(settings);
        Ok(())
    }

    /// Reload the file and publish if another process changed it.
    /// Returns whether observers were notified.
    pub fn refresh(&self) -> Result<bool> {
        if !self.path.exists() {
            return Ok(false);
        }
        let settings = match read_settings(&self.path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring unreadable settings at {}: {}", self.path.display(), e);
                return Ok(false);
            }
        };
        Ok(self.settings_tx.send_if_modified(|current| {
            if *current == settings {
                return false;
            }
            *current = settings;
            true
        }))
    }
}

/// Read the persisted pair straight from disk
pub fn read_settings(path: &Path) -> Result<DisplaySettings> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
