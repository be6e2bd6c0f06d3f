use anyhow::{Context, Result};

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &App, native: &str, foreign: &str, format: &OutputFormat) -> Result<()> {
    let mut session = app.review_session();
    let id = session.add(native, foreign).context("Failed to add card")?;
    let card = app.find_card(id)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&card)?);
        }
        OutputFormat::Plain => {
            println!("Added \"{}\" / \"{}\"", card.native_text, card.foreign_text);
            println!("  ID: {}", card.id);
        }
    }

    Ok(())
}
