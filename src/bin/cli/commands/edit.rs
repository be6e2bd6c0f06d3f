use anyhow::{Context, Result};

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &App, id: i64, native: &str, foreign: &str, format: &OutputFormat) -> Result<()> {
    let mut session = app.review_session();
    session
        .edit(id, native, foreign)
        .with_context(|| format!("Failed to edit card {}", id))?;
    let card = app.find_card(id)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&card)?);
        }
        OutputFormat::Plain => {
            println!("Updated card {}: \"{}\" / \"{}\"", card.id, card.native_text, card.foreign_text);
        }
    }

    Ok(())
}
