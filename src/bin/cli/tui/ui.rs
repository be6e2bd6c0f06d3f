use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;

use super::app_state::TuiState;
use super::{card_widget, deck_widget, popup, status_bar};

pub fn draw(f: &mut Frame, state: &mut TuiState) {
    let size = f.area();

    // Main layout: content area + status bar
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(size);

    let main_area = outer[0];
    let status_area = outer[1];

    // Horizontal split: deck (30%) | card (70%)
    let panels = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(main_area);

    let deck_area = panels[0];
    let card_area = panels[1];

    // Save areas for mouse hit-testing
    state.deck_area = Some(deck_area);
    state.card_area = Some(card_area);

    deck_widget::draw(f, deck_area, state);
    card_widget::draw(f, card_area, state);
    popup::draw(f, main_area, state);
    status_bar::draw(f, status_area, state);
}
