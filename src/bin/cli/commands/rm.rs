use anyhow::{Context, Result};

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &App, id: i64, format: &OutputFormat) -> Result<()> {
    let card = app.find_card(id)?;
    let mut session = app.review_session();
    session
        .remove(&card)
        .with_context(|| format!("Failed to delete card {}", id))?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "id": card.id,
                "deleted": true,
                "remaining": session.cards().len(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("Deleted \"{}\" / \"{}\"", card.native_text, card.foreign_text);
        }
    }

    Ok(())
}
