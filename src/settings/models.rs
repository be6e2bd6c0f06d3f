use serde::{Deserialize, Serialize};

use crate::flashcards::Side;

/// Which card sides are always shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplaySettings {
    #[serde(default = "default_show")]
    pub show_native: bool,
    #[serde(default = "default_show")]
    pub show_foreign: bool,
}

fn default_show() -> bool {
    true
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            show_native: true,
            show_foreign: true,
        }
    }
}

impl DisplaySettings {
    pub fn new(show_native: bool, show_foreign: bool) -> Self {
        Self {
            show_native,
            show_foreign,
        }
    }

    pub fn shows(&self, side: Side) -> bool {
        match side {
            Side::Native => self.show_native,
            Side::Foreign => self.show_foreign,
        }
    }

    /// Sides the settings keep hidden unless revealed
    pub fn hidden_sides(&self) -> Vec<Side> {
        [Side::Native, Side::Foreign]
            .into_iter()
            .filter(|side| !self.shows(*side))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_default_to_shown() {
        let settings: DisplaySettings = serde_json::from_str(r#"{"showNative": false}"#).unwrap();
        assert!(!settings.show_native);
        assert!(settings.show_foreign);
    }

    #[test]
    fn test_hidden_sides() {
        assert!(DisplaySettings::default().hidden_sides().is_empty());
        assert_eq!(DisplaySettings::new(true, false).hidden_sides(), vec![Side::Foreign]);
        assert_eq!(
            DisplaySettings::new(false, false).hidden_sides(),
            vec![Side::Native, Side::Foreign]
        );
    }
}
