use ratatui::prelude::Rect;

use wordcards_lib::flashcards::{CardWatch, Flashcard, ReviewController, Side};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Native,
    Foreign,
}

/// Add/edit prompt. Editing keeps a live view of the card so a deletion
/// from elsewhere closes the form.
pub struct FormState {
    pub editing: Option<CardWatch>,
    pub native: String,
    pub foreign: String,
    pub field: Field,
}

impl FormState {
    fn blank() -> Self {
        Self {
            editing: None,
            native: String::new(),
            foreign: String::new(),
            field: Field::Native,
        }
    }

    pub fn title(&self) -> String {
        match &self.editing {
            Some(watch) => format!(" Edit card #{} ", watch.id()),
            None => " New card ".to_string(),
        }
    }

    pub fn input_mut(&mut self) -> &mut String {
        match self.field {
            Field::Native => &mut self.native,
            Field::Foreign => &mut self.foreign,
        }
    }
}

pub enum Mode {
    Review,
    Form(FormState),
    ConfirmDelete(Flashcard),
    Settings,
}

pub struct TuiState {
    pub session: ReviewController,
    pub mode: Mode,

    // Panel areas for mouse hit-testing (updated each draw)
    pub card_area: Option<Rect>,
    pub deck_area: Option<Rect>,
    pub deck_scroll: usize,

    pub flash_message: Option<String>,
    pub show_help: bool,
    pub quit: bool,
}

impl TuiState {
    pub fn new(session: ReviewController, from_reminder: bool) -> Self {
        let flash_message = from_reminder.then(|| {
            format!("Time to review! {} cards waiting", session.cards().len())
        });

        Self {
            session,
            mode: Mode::Review,
            card_area: None,
            deck_area: None,
            deck_scroll: 0,
            flash_message,
            show_help: false,
            quit: false,
        }
    }

    /// Pull store changes into the session and react to the edited card vanishing
    pub fn tick(&mut self) {
        self.session.sync();

        let vanished = match &mut self.mode {
            Mode::Form(FormState { editing: Some(watch), .. }) if watch.has_changed() => {
                watch.current().is_none()
            }
            Mode::ConfirmDelete(card) => !self.session.cards().iter().any(|c| c.id == card.id),
            _ => false,
        };

        if vanished {
            self.mode = Mode::Review;
            self.flash_message = Some("Card was deleted elsewhere".to_string());
        }
    }

    pub fn reload(&mut self) {
        if let Err(e) = self.session.reload() {
            log::warn!("Failed to reload stores: {}", e);
            self.flash_message = Some(format!("Error: {}", e));
        }
    }

    pub fn open_add_form(&mut self) {
        self.mode = Mode::Form(FormState::blank());
    }

    pub fn open_edit_form(&mut self) {
        let Some(id) = self.session.current_card().map(|c| c.id) else {
            self.flash_message = Some("Nothing to edit".to_string());
            return;
        };

        let mut watch = self.session.observe_by_id(id);
        match watch.current() {
            Some(card) => {
                self.mode = Mode::Form(FormState {
                    editing: Some(watch),
                    native: card.native_text,
                    foreign: card.foreign_text,
                    field: Field::Native,
                });
            }
            None => self.flash_message = Some(format!("Card #{} no longer exists", id)),
        }
    }

    /// Enter on the form: move to the second field, or save from the last one
    pub fn submit_form(&mut self) {
        let Mode::Form(form) = &mut self.mode else {
            return;
        };

        if form.field == Field::Native {
            form.field = Field::Foreign;
            return;
        }

        let result = match &form.editing {
            Some(watch) => self
                .session
                .edit(watch.id(), &form.native, &form.foreign)
                .map(|()| format!("Updated card #{}", watch.id())),
            None => self
                .session
                .add(&form.native, &form.foreign)
                .map(|id| format!("Added card #{}", id)),
        };

        match result {
            Ok(msg) => {
                self.flash_message = Some(msg);
                self.mode = Mode::Review;
            }
            // Keep the form open so the input can be fixed
            Err(e) => self.flash_message = Some(format!("Error: {}", e)),
        }
    }

    pub fn ask_delete(&mut self) {
        match self.session.current_card() {
            Some(card) => self.mode = Mode::ConfirmDelete(card.clone()),
            None => self.flash_message = Some("Nothing to delete".to_string()),
        }
    }

    pub fn confirm_delete(&mut self) {
        let Mode::ConfirmDelete(card) = std::mem::replace(&mut self.mode, Mode::Review) else {
            return;
        };

        self.flash_message = Some(match self.session.remove(&card) {
            Ok(()) => format!("Deleted \"{}\"", card.native_text),
            Err(e) => format!("Error: {}", e),
        });
    }

    pub fn flip_setting(&mut self, side: Side) {
        let settings = self.session.settings();
        let (native, foreign) = match side {
            Side::Native => (!settings.show_native, settings.show_foreign),
            Side::Foreign => (settings.show_native, !settings.show_foreign),
        };

        if let Err(e) = self.session.update_display_settings(native, foreign) {
            self.flash_message = Some(format!("Error: {}", e));
        }
    }

    /// Select a card from the deck list by position
    pub fn select(&mut self, index: usize) {
        let Some(current) = self.session.cursor() else {
            return;
        };
        let len = self.session.cards().len();
        if index >= len || index == current {
            return;
        }

        let forward = (index + len - current) % len;
        let backward = (current + len - index) % len;
        if forward <= backward {
            (0..forward).for_each(|_| self.session.advance());
        } else {
            (0..backward).for_each(|_| self.session.retreat());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    use tempfile::TempDir;
    use wordcards_lib::flashcards::{FlashcardStorage, RevealPolicy};
    use wordcards_lib::settings::SettingsStorage;

    fn state_with(words: &[(&str, &str)]) -> (TuiState, Rc<FlashcardStorage>, TempDir) {
        let temp = TempDir::new().unwrap();
        let cards = Rc::new(FlashcardStorage::open_in_memory().unwrap());
        let settings = Rc::new(SettingsStorage::open(temp.path()).unwrap());
        for (native, foreign) in words {
            cards.insert(native, foreign).unwrap();
        }
        let session = ReviewController::new(Rc::clone(&cards), settings, RevealPolicy::Cycle);
        (TuiState::new(session, false), cards, temp)
    }

    fn type_text(state: &mut TuiState, text: &str) {
        if let Mode::Form(form) = &mut state.mode {
            form.input_mut().push_str(text);
        }
    }

    #[test]
    fn test_add_form_two_steps() {
        let (mut state, cards, _temp) = state_with(&[]);

        state.open_add_form();
        type_text(&mut state, "dog");
        state.submit_form();
        type_text(&mut state, "Hund");
        state.submit_form();

        assert!(matches!(state.mode, Mode::Review));
        assert_eq!(cards.count().unwrap(), 1);
        assert_eq!(state.session.current_card().unwrap().foreign_text, "Hund");
    }

    #[test]
    fn test_blank_form_stays_open() {
        let (mut state, cards, _temp) = state_with(&[]);

        state.open_add_form();
        type_text(&mut state, "dog");
        state.submit_form();
        state.submit_form();

        assert!(matches!(state.mode, Mode::Form(_)));
        assert!(state.flash_message.as_deref().unwrap().starts_with("Error"));
        assert_eq!(cards.count().unwrap(), 0);
    }

    #[test]
    fn test_edit_form_prefilled() {
        let (mut state, _cards, _temp) = state_with(&[("cat", "Katze")]);

        state.open_edit_form();
        match &state.mode {
            Mode::Form(form) => {
                assert_eq!(form.native, "cat");
                assert_eq!(form.foreign, "Katze");
                assert!(form.editing.is_some());
            }
            _ => panic!("expected form"),
        }
    }

    #[test]
    fn test_edit_form_closes_when_card_deleted() {
        let (mut state, cards, _temp) = state_with(&[("cat", "Katze")]);

        state.open_edit_form();
        let card = state.session.current_card().unwrap().clone();
        cards.delete(&card).unwrap();
        state.tick();

        assert!(matches!(state.mode, Mode::Review));
        assert!(state.session.current_card().is_none());
    }

    #[test]
    fn test_confirm_delete() {
        let (mut state, cards, _temp) = state_with(&[("cat", "Katze"), ("dog", "Hund")]);

        state.ask_delete();
        state.confirm_delete();

        assert_eq!(cards.count().unwrap(), 1);
        assert_eq!(state.session.cursor(), Some(0));
    }

    #[test]
    fn test_flip_setting() {
        let (mut state, _cards, _temp) = state_with(&[("cat", "Katze")]);

        state.flip_setting(Side::Native);
        assert!(!state.session.settings().show_native);
        assert!(state.session.settings().show_foreign);
    }

    #[test]
    fn test_select_walks_the_shorter_way() {
        let (mut state, _cards, _temp) = state_with(&[("a", "1"), ("b", "2"), ("c", "3"), ("d", "4")]);

        state.select(3);
        assert_eq!(state.session.cursor(), Some(3));
        state.select(1);
        assert_eq!(state.session.cursor(), Some(1));
        state.select(9);
        assert_eq!(state.session.cursor(), Some(1));
    }

    #[test]
    fn test_reminder_greeting() {
        let temp = TempDir::new().unwrap();
        let cards = Rc::new(FlashcardStorage::open_in_memory().unwrap());
        let settings = Rc::new(SettingsStorage::open(temp.path()).unwrap());
        let session = ReviewController::new(cards, settings, RevealPolicy::Cycle);

        let state = TuiState::new(session, true);
        assert!(state.flash_message.is_some());
    }
}
