//! Display preferences for the review screen
//!
//! Two flags decide whether each side of a card is shown by default.
//! They are persisted together as one small JSON document.

pub mod models;
pub mod storage;

pub use models::DisplaySettings;
pub use storage::{SettingsStorage, SettingsStorageError};
