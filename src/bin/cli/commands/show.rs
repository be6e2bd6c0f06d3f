use anyhow::Result;

use wordcards_lib::flashcards::Visibility;

use crate::app::App;
use crate::render::terminal;
use crate::OutputFormat;

pub fn run(app: &App, id: i64, format: &OutputFormat, use_color: bool) -> Result<()> {
    let card = app.find_card(id)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&card)?);
        }
        OutputFormat::Plain => {
            let all = Visibility { native: true, foreign: true };
            for line in terminal::render_card(&card, all, use_color) {
                println!("{}", line);
            }

            let added = card
                .last_reviewed_at
                .with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M");
            if use_color {
                println!("{}#{}  {}{}", terminal::Color::DIM, card.id, added, terminal::Color::RESET);
            } else {
                println!("#{}  {}", card.id, added);
            }
        }
    }

    Ok(())
}
