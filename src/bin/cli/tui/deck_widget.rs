use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};

use super::app_state::TuiState;

pub fn draw(f: &mut Frame, area: Rect, state: &mut TuiState) {
    let block = Block::default()
        .title(format!(" Deck ({}) ", state.session.cards().len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let settings = state.session.settings();

    // Only words the settings show are listed, so the deck never gives answers away
    let items: Vec<ListItem> = state
        .session
        .cards()
        .iter()
        .map(|card| {
            let label = match (settings.show_foreign, settings.show_native) {
                (true, _) => card.foreign_text.clone(),
                (false, true) => card.native_text.clone(),
                (false, false) => format!("#{}", card.id),
            };
            ListItem::new(label).style(Style::default().fg(Color::White))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut list_state = ListState::default().with_offset(state.deck_scroll);
    list_state.select(state.session.cursor());

    f.render_stateful_widget(list, area, &mut list_state);
    state.deck_scroll = list_state.offset();
}
