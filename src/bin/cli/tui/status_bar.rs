use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use super::app_state::{Field, Mode, TuiState};

pub fn draw(f: &mut Frame, area: Rect, state: &TuiState) {
    // Show flash message if present
    if let Some(ref msg) = state.flash_message {
        let color = if msg.starts_with("Error") {
            Color::Red
        } else {
            Color::Green
        };
        let flash = Paragraph::new(format!(" {}", msg))
            .style(Style::default().bg(color).fg(Color::Black));
        f.render_widget(flash, area);
        return;
    }

    let hints = match &state.mode {
        Mode::Review => {
            " h/l: prev/next  space: reveal  a: add  e: edit  d: delete  s: settings  ?: help  q: quit "
        }
        Mode::Form(form) => match form.field {
            Field::Native => " Enter: next field  Tab: switch field  Esc: cancel ",
            Field::Foreign => " Enter: save  Tab: switch field  Esc: cancel ",
        },
        Mode::ConfirmDelete(_) => " y: delete  any other key: cancel ",
        Mode::Settings => " 1: native words  2: foreign words  Esc: close ",
    };

    let status = Paragraph::new(hints)
        .style(Style::default().bg(Color::DarkGray).fg(Color::White));
    f.render_widget(status, area);
}
