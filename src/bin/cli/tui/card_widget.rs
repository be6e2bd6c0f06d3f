use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use wordcards_lib::flashcards::Side;

use super::app_state::TuiState;
use crate::render::terminal::{self, EMPTY_DECK, REVEAL_PLACEHOLDER};

pub fn draw(f: &mut Frame, area: Rect, state: &TuiState) {
    let session = &state.session;

    let title = match session.cursor() {
        Some(i) => format!(" Card {}/{} ", i + 1, session.cards().len()),
        None => " Review ".to_string(),
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let Some(card) = session.current_card() else {
        let help_text = vec![
            Line::from(""),
            Line::from(Span::styled(
                EMPTY_DECK,
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Press a to add your first card.",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        let paragraph = Paragraph::new(help_text)
            .block(block)
            .alignment(Alignment::Center);
        f.render_widget(paragraph, area);
        return;
    };

    // Vertically centre the words inside the card
    let faces = terminal::visible_faces(card, session.visibility());
    let body_height = if faces.is_empty() { 1 } else { faces.len() * 2 - 1 };
    let inner_height = area.height.saturating_sub(2) as usize;
    let mut text: Vec<Line> = vec![Line::from(""); inner_height.saturating_sub(body_height) / 2];

    if faces.is_empty() {
        text.push(Line::from(Span::styled(
            REVEAL_PLACEHOLDER,
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )));
    }

    for (i, (side, word)) in faces.into_iter().enumerate() {
        if i > 0 {
            text.push(Line::from(""));
        }
        let style = match side {
            Side::Foreign => Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            Side::Native => Style::default().fg(Color::White),
        };
        text.push(Line::from(Span::styled(word, style)));
    }

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    f.render_widget(paragraph, area);
}
