use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use super::app_state::{Field, FormState, Mode, TuiState};

const HELP: &[(&str, &str)] = &[
    ("l, n, \u{2192}", "next card"),
    ("h, p, \u{2190}", "previous card"),
    ("space", "reveal hidden words"),
    ("1 / 2", "reveal native / foreign word"),
    ("click", "reveal"),
    ("a", "add a card"),
    ("e", "edit this card"),
    ("d", "delete this card"),
    ("s", "display settings"),
    ("q", "quit"),
];

pub fn draw(f: &mut Frame, area: Rect, state: &TuiState) {
    if state.show_help {
        draw_help(f, area);
        return;
    }

    match &state.mode {
        Mode::Form(form) => draw_form(f, area, form),
        Mode::ConfirmDelete(card) => {
            let text = vec![
                Line::from(""),
                Line::from(format!("Delete \"{}\" / \"{}\"?", card.native_text, card.foreign_text)),
                Line::from(""),
                Line::from(Span::styled("y: delete   any key: cancel", Style::default().fg(Color::DarkGray))),
            ];
            draw_box(f, area, " Delete card ", Color::Red, text, 7);
        }
        Mode::Settings => draw_settings(f, area, state),
        Mode::Review => {}
    }
}

fn draw_form(f: &mut Frame, area: Rect, form: &FormState) {
    let field_line = |label: &str, value: &str, active: bool| {
        let style = if active {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        let cursor = if active { "\u{2588}" } else { "" };
        Line::from(vec![
            Span::styled(format!("{:<9}", label), Style::default().fg(Color::DarkGray)),
            Span::styled(format!("{}{}", value, cursor), style),
        ])
    };

    let text = vec![
        Line::from(""),
        field_line("Native", &form.native, form.field == Field::Native),
        Line::from(""),
        field_line("Foreign", &form.foreign, form.field == Field::Foreign),
    ];
    draw_box(f, area, &form.title(), Color::Blue, text, 7);
}

fn draw_settings(f: &mut Frame, area: Rect, state: &TuiState) {
    let settings = state.session.settings();
    let check = |on: bool| if on { "[x]" } else { "[ ]" };

    let mut text = vec![
        Line::from(""),
        Line::from(format!("1  {} Show native words", check(settings.show_native))),
        Line::from(format!("2  {} Show foreign words", check(settings.show_foreign))),
    ];
    if !settings.show_native && !settings.show_foreign {
        text.push(Line::from(""));
        text.push(Line::from(Span::styled(
            "Both hidden: tap a card to reveal its words in turn.",
            Style::default().fg(Color::DarkGray),
        )));
    }
    let height = text.len() as u16 + 3;
    draw_box(f, area, " Settings ", Color::Yellow, text, height);
}

fn draw_help(f: &mut Frame, area: Rect) {
    let text: Vec<Line> = HELP
        .iter()
        .map(|(keys, action)| {
            Line::from(vec![
                Span::styled(format!(" {:<12}", keys), Style::default().fg(Color::Yellow)),
                Span::raw(*action),
            ])
        })
        .collect();
    let height = text.len() as u16 + 2;
    draw_box(f, area, " Keys ", Color::Cyan, text, height);
}

fn draw_box(f: &mut Frame, area: Rect, title: &str, color: Color, text: Vec<Line>, height: u16) {
    let popup = centered(area, 56, height);

    // Clear the area behind the popup
    f.render_widget(Clear, popup);

    let block = Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));

    let paragraph = Paragraph::new(text)
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, popup);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
