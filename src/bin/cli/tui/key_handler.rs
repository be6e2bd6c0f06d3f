use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::prelude::Rect;

use wordcards_lib::flashcards::Side;

use super::app_state::{Field, Mode, TuiState};

pub fn handle_key(state: &mut TuiState, key: KeyEvent) {
    // Clear flash message on any keypress
    state.flash_message = None;

    if state.show_help {
        state.show_help = false;
        return;
    }

    match state.mode {
        Mode::Review => handle_review_key(state, key),
        Mode::Form(_) => handle_form_key(state, key),
        Mode::ConfirmDelete(_) => handle_confirm_key(state, key),
        Mode::Settings => handle_settings_key(state, key),
    }
}

fn handle_review_key(state: &mut TuiState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => state.quit = true,
        KeyCode::Char('l') | KeyCode::Char('n') | KeyCode::Right => state.session.advance(),
        KeyCode::Char('h') | KeyCode::Char('p') | KeyCode::Left => state.session.retreat(),
        KeyCode::Char(' ') | KeyCode::Enter => state.session.toggle_reveal(None),
        KeyCode::Char('1') => state.session.toggle_reveal(Some(Side::Native)),
        KeyCode::Char('2') => state.session.toggle_reveal(Some(Side::Foreign)),
        KeyCode::Char('a') => state.open_add_form(),
        KeyCode::Char('e') => state.open_edit_form(),
        KeyCode::Char('d') => state.ask_delete(),
        KeyCode::Char('s') => state.mode = Mode::Settings,
        KeyCode::Char('?') => state.show_help = true,
        _ => {}
    }
}

fn handle_form_key(state: &mut TuiState, key: KeyEvent) {
    let Mode::Form(form) = &mut state.mode else {
        return;
    };

    match key.code {
        KeyCode::Esc => state.mode = Mode::Review,
        KeyCode::Enter => state.submit_form(),
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            form.field = match form.field {
                Field::Native => Field::Foreign,
                Field::Foreign => Field::Native,
            };
        }
        KeyCode::Backspace => {
            form.input_mut().pop();
        }
        KeyCode::Char(c) => form.input_mut().push(c),
        _ => {}
    }
}

fn handle_confirm_key(state: &mut TuiState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => state.confirm_delete(),
        _ => state.mode = Mode::Review,
    }
}

fn handle_settings_key(state: &mut TuiState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('1') => state.flip_setting(Side::Native),
        KeyCode::Char('2') => state.flip_setting(Side::Foreign),
        KeyCode::Esc | KeyCode::Char('s') | KeyCode::Char('q') | KeyCode::Enter => {
            state.mode = Mode::Review;
        }
        _ => {}
    }
}

pub fn handle_mouse(state: &mut TuiState, mouse: MouseEvent) {
    if !matches!(state.mode, Mode::Review) {
        return;
    }

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let (col, row) = (mouse.column, mouse.row);

            // Tapping the card reveals it
            if state.card_area.is_some_and(|area| contains(area, col, row)) {
                state.session.toggle_reveal(None);
                return;
            }

            if let Some(inner_row) = state.deck_area.and_then(|area| deck_row(area, col, row)) {
                state.select(state.deck_scroll + inner_row);
            }
        }
        MouseEventKind::ScrollDown => state.session.advance(),
        MouseEventKind::ScrollUp => state.session.retreat(),
        _ => {}
    }
}

/// Row inside the deck list under the pointer; clicks on the border hit nothing
fn deck_row(area: Rect, col: u16, row: u16) -> Option<usize> {
    let inside_border = row > area.y && row + 1 < area.y + area.height;
    (contains(area, col, row) && inside_border).then(|| (row - area.y - 1) as usize)
}

fn contains(area: Rect, col: u16, row: u16) -> bool {
    col >= area.x && col < area.x + area.width && row >= area.y && row < area.y + area.height
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deck_row_skips_borders() {
        let area = Rect::new(0, 2, 20, 6);

        assert_eq!(deck_row(area, 5, 2), None);
        assert_eq!(deck_row(area, 5, 3), Some(0));
        assert_eq!(deck_row(area, 5, 6), Some(3));
        assert_eq!(deck_row(area, 5, 7), None);
        assert_eq!(deck_row(area, 25, 4), None);
    }
}
