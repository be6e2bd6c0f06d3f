use wordcards_lib::flashcards::{Flashcard, Side, Visibility};

/// ANSI color codes
pub struct Color;

impl Color {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const GRAY: &str = "\x1b[90m";
}

/// Shown instead of the words while both sides are hidden
pub const REVEAL_PLACEHOLDER: &str = "Tap to reveal";

/// Shown when there is nothing to review
pub const EMPTY_DECK: &str = "No flashcards available";

/// Faces of a card that should be visible, foreign word first
pub fn visible_faces(card: &Flashcard, visibility: Visibility) -> Vec<(Side, String)> {
    [Side::Foreign, Side::Native]
        .into_iter()
        .filter(|side| visibility.get(*side))
        .map(|side| (side, card.text(side).to_string()))
        .collect()
}

/// One-line summary of a card for listings
pub fn card_line(card: &Flashcard, use_color: bool) -> String {
    let date = card
        .last_reviewed_at
        .with_timezone(&chrono::Local)
        .format("%Y-%m-%d");

    if use_color {
        format!(
            "{}{:>4}{}  {}{}{} \u{2014} {}  {}{}{}",
            Color::GRAY,
            card.id,
            Color::RESET,
            Color::BOLD,
            card.native_text,
            Color::RESET,
            card.foreign_text,
            Color::DIM,
            date,
            Color::RESET
        )
    } else {
        format!(
            "{:>4}  {} \u{2014} {}  {}",
            card.id, card.native_text, card.foreign_text, date
        )
    }
}

/// Full rendering of one card with labelled sides
pub fn render_card(card: &Flashcard, visibility: Visibility, use_color: bool) -> Vec<String> {
    let faces = visible_faces(card, visibility);
    if faces.is_empty() {
        return vec![REVEAL_PLACEHOLDER.to_string()];
    }

    faces
        .into_iter()
        .map(|(side, text)| {
            let label = format!("{:<8}", side.label());
            if use_color {
                format!("{}{}{}{}{}{}", Color::DIM, label, Color::RESET, Color::BOLD, text, Color::RESET)
            } else {
                format!("{}{}", label, text)
            }
        })
        .collect()
}
