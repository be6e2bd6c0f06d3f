//! Application configuration
//!
//! Read from `<data_dir>/config.toml`; every key is optional:
//! ```toml
//! [reminder]
//! enabled = true
//! time = "09:00"
//! exact = true
//!
//! [review]
//! reveal_policy = "cycle"   # or "independent"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::flashcards::RevealPolicy;

pub const CONFIG_FILE: &str = "config.toml";
pub const DATABASE_FILE: &str = "wordcards.db";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid reminder time '{0}', expected HH:MM")]
    InvalidTime(String),

    #[error("Data directory not found")]
    DataDirNotFound,
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub reminder: ReminderConfig,
    pub review: ReviewConfig,
}

/// Daily reminder settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReminderConfig {
    pub enabled: bool,
    /// Local time of day in "HH:MM" format
    pub time: String,
    /// Fire at the exact minute; when false the scheduler may run late
    pub exact: bool,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            time: "09:00".to_string(),
            exact: true,
        }
    }
}

impl ReminderConfig {
    pub fn time_of_day(&self) -> Result<NaiveTime> {
        parse_time(&self.time).ok_or_else(|| ConfigError::InvalidTime(self.time.clone()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewConfig {
    pub reveal_policy: RevealPolicy,
}

impl AppConfig {
    /// Load `config.toml` from the data directory, or defaults if it is absent
    pub fn load(data_dir: &Path) -> Result<Self> {
        let path = data_dir.join(CONFIG_FILE);
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let config = Self::parse(&content)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        // Reject a bad reminder time up front rather than when the daemon starts
        config.reminder.time_of_day()?;
        Ok(config)
    }
}

/// Default location for all wordcards data
pub fn default_data_dir() -> Result<PathBuf> {
    dirs::data_local_dir()
        .map(|p| p.join("wordcards"))
        .ok_or(ConfigError::DataDirNotFound)
}

/// Parse a time string in "HH:MM" format
pub fn parse_time(time_str: &str) -> Option<NaiveTime> {
    let (hour, minute) = time_str.trim().split_once(':')?;
    let hour: u32 = hour.parse().ok()?;
    let minute: u32 = minute.parse().ok()?;
    NaiveTime::from_hms_opt(hour, minute, 0)
}
