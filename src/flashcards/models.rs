//! Data models for the flashcard system

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Store-assigned flashcard identity
pub type CardId = i64;

/// A word pair: a term in the learner's native language and its foreign counterpart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flashcard {
    pub id: CardId,
    pub native_text: String,
    pub foreign_text: String,
    /// Set at creation, only changed by an explicit update
    pub last_reviewed_at: DateTime<Utc>,
}

impl Flashcard {
    pub fn new(id: CardId, native_text: String, foreign_text: String) -> Self {
        Self {
            id,
            native_text,
            foreign_text,
            last_reviewed_at: Utc::now(),
        }
    }

    /// Copy of this card with both text fields replaced
    pub fn with_texts(&self, native_text: String, foreign_text: String) -> Self {
        Self {
            native_text,
            foreign_text,
            ..self.clone()
        }
    }

    pub fn text(&self, side: Side) -> &str {
        match side {
            Side::Native => &self.native_text,
            Side::Foreign => &self.foreign_text,
        }
    }
}

/// Convert a stored epoch-millisecond column back into a timestamp
pub(crate) fn millis_to_datetime(millis: i64) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(millis)
        .single()
        .unwrap_or_else(Utc::now)
}

/// One face of a card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Side {
    Native,
    Foreign,
}

impl Side {
    pub fn label(self) -> &'static str {
        match self {
            Self::Native => "native",
            Self::Foreign => "foreign",
        }
    }
}

/// How `toggle_reveal` behaves for sides the display settings hide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RevealPolicy {
    /// With both sides hidden, successive toggles step through
    /// hidden -> foreign -> native -> hidden; with one side hidden,
    /// a toggle flips that side.
    #[default]
    Cycle,
    /// Each hidden side is flipped on its own.
    Independent,
}

/// Transient per-card overrides on top of the display settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RevealState {
    pub native: bool,
    pub foreign: bool,
}

impl RevealState {
    pub fn get(&self, side: Side) -> bool {
        match side {
            Side::Native => self.native,
            Side::Foreign => self.foreign,
        }
    }

    pub fn flip(&mut self, side: Side) {
        match side {
            Side::Native => self.native = !self.native,
            Side::Foreign => self.foreign = !self.foreign,
        }
    }
}

/// Effective visibility of the current card after settings and overrides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Visibility {
    pub native: bool,
    pub foreign: bool,
}

impl Visibility {
    pub fn get(&self, side: Side) -> bool {
        match side {
            Side::Native => self.native,
            Side::Foreign => self.foreign,
        }
    }

    pub fn nothing_shown(&self) -> bool {
        !self.native && !self.foreign
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_texts_keeps_identity() {
        let card = Flashcard::new(7, "ус".to_string(), "water".to_string());
        let edited = card.with_texts("гал".to_string(), "fire".to_string());
        assert_eq!(edited.id, 7);
        assert_eq!(edited.last_reviewed_at, card.last_reviewed_at);
        assert_eq!(edited.text(Side::Native), "гал");
        assert_eq!(edited.text(Side::Foreign), "fire");
    }

    #[test]
    fn test_millis_round_trip() {
        let now = Utc::now();
        let restored = millis_to_datetime(now.timestamp_millis());
        assert_eq!(restored.timestamp_millis(), now.timestamp_millis());
    }

    #[test]
    fn test_reveal_policy_serde() {
        let policy: RevealPolicy = serde_json::from_str("\"independent\"").unwrap();
        assert_eq!(policy, RevealPolicy::Independent);
        assert_eq!(RevealPolicy::default(), RevealPolicy::Cycle);
    }
}
