//! Review session controller
//!
//! Combines the live card list and the live display settings into the state
//! the review screen renders: the ordered cards, a cursor into them, and the
//! transient reveal overrides of the selected card.
//!
//! The cursor is positional. When the list changes the index is kept if it is
//! still in range (it may now point at a different card), reset to the first
//! card if not, and cleared when the list becomes empty.

use std::rc::Rc;

use thiserror::Error;
use tokio::sync::watch;

use super::models::{CardId, Flashcard, RevealPolicy, RevealState, Side, Visibility};
use super::storage::{CardWatch, FlashcardStorage, FlashcardStorageError};
use crate::settings::{DisplaySettings, SettingsStorage, SettingsStorageError};

#[derive(Error, Debug)]
pub enum ReviewError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Card not found: {0}")]
    NotFound(CardId),

    #[error("Card storage error: {0}")]
    Storage(#[from] FlashcardStorageError),

    #[error("Settings storage error: {0}")]
    Settings(#[from] SettingsStorageError),
}

pub type Result<T> = std::result::Result<T, ReviewError>;

/// One review session. Must be driven from a single task; dropping it
/// releases its subscriptions on both stores.
pub struct ReviewController {
    card_storage: Rc<FlashcardStorage>,
    settings_storage: Rc<SettingsStorage>,
    policy: RevealPolicy,

    cards_rx: watch::Receiver<Vec<Flashcard>>,
    settings_rx: watch::Receiver<DisplaySettings>,

    cards: Vec<Flashcard>,
    settings: DisplaySettings,
    cursor: Option<usize>,
    /// Overrides for the card they were made on; stale once another card is selected
    reveal: Option<(CardId, RevealState)>,
}

impl ReviewController {
    pub fn new(
        card_storage: Rc<FlashcardStorage>,
        settings_storage: Rc<SettingsStorage>,
        policy: RevealPolicy,
    ) -> Self {
        let mut cards_rx = card_storage.observe_all();
        let mut settings_rx = settings_storage.observe_settings();
        let cards = cards_rx.borrow_and_update().clone();
        let settings = *settings_rx.borrow_and_update();

        let mut controller = Self {
            card_storage,
            settings_storage,
            policy,
            cards_rx,
            settings_rx,
            cards,
            settings,
            cursor: None,
            reveal: None,
        };
        controller.revalidate_cursor();
        log::debug!(
            "Review session started with {} cards, policy {:?}",
            controller.cards.len(),
            policy
        );
        controller
    }

    // ==================== Derived State ====================

    /// Pull the latest values from both stores and recompute derived state
    pub fn sync(&mut self) {
        if self.settings_rx.has_changed().unwrap_or(false) {
            self.settings = *self.settings_rx.borrow_and_update();
            self.reveal = None;
        }

        if self.cards_rx.has_changed().unwrap_or(false) {
            self.cards = self.cards_rx.borrow_and_update().clone();
            self.revalidate_cursor();
        }
    }

    /// Re-read both stores from disk so changes made by other processes show up
    pub fn reload(&mut self) -> Result<()> {
        self.card_storage.refresh()?;
        self.settings_storage.refresh()?;
        self.sync();
        Ok(())
    }

    fn revalidate_cursor(&mut self) {
        let count = self.cards.len();
        self.cursor = match self.cursor {
            _ if count == 0 => None,
            Some(index) if index < count => Some(index),
            _ => Some(0),
        };
    }

    pub fn cards(&self) -> &[Flashcard] {
        &self.cards
    }

    pub fn settings(&self) -> DisplaySettings {
        self.settings
    }

    pub fn policy(&self) -> RevealPolicy {
        self.policy
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn current_card(&self) -> Option<&Flashcard> {
        self.cursor.and_then(|index| self.cards.get(index))
    }

    /// Reveal overrides of the selected card (all off if none were made)
    pub fn reveal_state(&self) -> RevealState {
        match (self.reveal, self.current_card()) {
            (Some((id, state)), Some(card)) if card.id == id => state,
            _ => RevealState::default(),
        }
    }

    /// What the review screen should show for the selected card
    pub fn visibility(&self) -> Visibility {
        let reveal = self.reveal_state();
        Visibility {
            native: self.settings.show_native || reveal.native,
            foreign: self.settings.show_foreign || reveal.foreign,
        }
    }

    /// Live view of one card, used to prefill the edit form
    pub fn observe_by_id(&self, id: CardId) -> CardWatch {
        self.card_storage.observe_by_id(id)
    }

    // ==================== Navigation ====================

    pub fn advance(&mut self) {
        self.sync();
        let count = self.cards.len();
        if count == 0 {
            return;
        }
        let index = self.cursor.unwrap_or(0);
        self.cursor = Some((index + 1) % count);
        self.reveal = None;
    }

    pub fn retreat(&mut self) {
        self.sync();
        let count = self.cards.len();
        if count == 0 {
            return;
        }
        let index = self.cursor.unwrap_or(0);
        self.cursor = Some((index + count - 1) % count);
        self.reveal = None;
    }

    /// Flip the transient visibility of the selected card.
    ///
    /// Sides the settings always show are never affected. With `Cycle`, the
    /// side argument is ignored when both sides are hidden.
    pub fn toggle_reveal(&mut self, side: Option<Side>) {
        self.sync();
        let Some(card_id) = self.current_card().map(|c| c.id) else {
            return;
        };

        let hidden = self.settings.hidden_sides();
        let mut state = self.reveal_state();

        match self.policy {
            RevealPolicy::Cycle => match hidden.as_slice() {
                [] => return,
                [only] => {
                    if side.is_some_and(|s| s != *only) {
                        return;
                    }
                    state.flip(*only);
                }
                _ => state = next_cycle_step(state),
            },
            RevealPolicy::Independent => {
                let targets: Vec<Side> = match side {
                    Some(s) if hidden.contains(&s) => vec![s],
                    Some(_) => Vec::new(),
                    None => hidden,
                };
                if targets.is_empty() {
                    return;
                }
                for s in targets {
                    state.flip(s);
                }
            }
        }

        self.reveal = Some((card_id, state));
    }

    // ==================== Mutations ====================

    /// Create a card and select it
    pub fn add(&mut self, native_text: &str, foreign_text: &str) -> Result<CardId> {
        let (native_text, foreign_text) = validate_texts(native_text, foreign_text)?;

        let id = self.card_storage.insert(native_text, foreign_text)?;
        self.sync();

        if let Some(position) = self.cards.iter().position(|c| c.id == id) {
            self.cursor = Some(position);
            self.reveal = None;
        }
        log::info!("Added card {}", id);
        Ok(id)
    }

    /// Replace both texts of a card, keeping its id and timestamp
    pub fn edit(&mut self, id: CardId, native_text: &str, foreign_text: &str) -> Result<()> {
        let (native_text, foreign_text) = validate_texts(native_text, foreign_text)?;

        let card = self
            .card_storage
            .get(id)?
            .ok_or(ReviewError::NotFound(id))?;
        let updated = card.with_texts(native_text.to_string(), foreign_text.to_string());

        match self.card_storage.update(&updated) {
            Ok(()) => {}
            Err(FlashcardStorageError::CardNotFound(id)) => return Err(ReviewError::NotFound(id)),
            Err(e) => return Err(e.into()),
        }
        self.sync();
        log::info!("Edited card {}", id);
        Ok(())
    }

    pub fn remove(&mut self, card: &Flashcard) -> Result<()> {
        self.card_storage.delete(card)?;
        self.sync();
        log::info!("Removed card {}", card.id);
        Ok(())
    }

    /// Persist both display flags; keeps the cursor, drops reveal overrides
    pub fn update_display_settings(&mut self, show_native: bool, show_foreign: bool) -> Result<()> {
        self.settings_storage
            .update_settings(show_native, show_foreign)?;
        self.sync();
        self.reveal = None;
        Ok(())
    }
}

/// hidden -> foreign -> native -> hidden
fn next_cycle_step(state: RevealState) -> RevealState {
    match (state.native, state.foreign) {
        (false, false) => RevealState {
            native: false,
            foreign: true,
        },
        (false, true) => RevealState {
            native: true,
            foreign: false,
        },
        _ => RevealState::default(),
    }
}

fn validate_texts<'a>(native_text: &'a str, foreign_text: &'a str) -> Result<(&'a str, &'a str)> {
    let native_text = native_text.trim();
    let foreign_text = foreign_text.trim();
    if native_text.is_empty() {
        return Err(ReviewError::Validation("native word must not be blank".to_string()));
    }
    if foreign_text.is_empty() {
        return Err(ReviewError::Validation("foreign word must not be blank".to_string()));
    }
    Ok((native_text, foreign_text))
}
