use anyhow::{Context, Result};

use crate::app::App;
use crate::OutputFormat;

pub fn run(
    app: &App,
    show_native: Option<bool>,
    show_foreign: Option<bool>,
    format: &OutputFormat,
) -> Result<()> {
    let mut session = app.review_session();

    if show_native.is_some() || show_foreign.is_some() {
        // Both flags are always written together
        let current = session.settings();
        session
            .update_display_settings(
                show_native.unwrap_or(current.show_native),
                show_foreign.unwrap_or(current.show_foreign),
            )
            .context("Failed to save settings")?;
    }

    let settings = session.settings();
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
        OutputFormat::Plain => {
            println!("Show native words:  {}", on_off(settings.show_native));
            println!("Show foreign words: {}", on_off(settings.show_foreign));
            if !settings.show_native && !settings.show_foreign {
                println!();
                println!("Both sides are hidden: press space while reviewing to reveal them in turn.");
            }
        }
    }

    Ok(())
}

fn on_off(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}
