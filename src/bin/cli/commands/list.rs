use anyhow::Result;

use crate::app::App;
use crate::render::terminal;
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let cards = app.list_cards()?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&cards)?);
        }
        OutputFormat::Plain => {
            if cards.is_empty() {
                println!("{}", terminal::EMPTY_DECK);
                println!("  Add one with: wordcards add <native> <foreign>");
                return Ok(());
            }
            for card in &cards {
                println!("{}", terminal::card_line(card, use_color));
            }
            println!();
            println!("{} cards", cards.len());
        }
    }

    Ok(())
}
