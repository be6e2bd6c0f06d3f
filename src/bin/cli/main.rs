mod app;
mod commands;
mod render;
#[cfg(feature = "tui")]
mod tui;

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "wordcards", about = "Word-pair flashcards: review, manage and get reminded", version)]
struct Cli {
    /// Use a specific data directory (default: platform data dir)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    /// Launched from a daily reminder
    #[arg(long, global = true)]
    from_reminder: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Open the interactive review screen
    #[cfg(feature = "tui")]
    Review,

    /// List all cards, newest first
    List,

    /// Show a single card
    Show {
        /// Card id
        id: i64,
    },

    /// Add a new card
    Add {
        /// Word in your native language
        native: String,
        /// Word in the foreign language
        foreign: String,
    },

    /// Replace both words of a card
    Edit {
        /// Card id
        id: i64,
        native: String,
        foreign: String,
    },

    /// Delete a card
    Rm {
        /// Card id
        id: i64,
    },

    /// Show or change which sides are displayed by default
    Settings {
        /// Always show the native word
        #[arg(long)]
        show_native: Option<bool>,
        /// Always show the foreign word
        #[arg(long)]
        show_foreign: Option<bool>,
    },

    /// Run the daily reminder daemon
    Remind {
        /// Send one reminder right away and exit
        #[arg(long)]
        now: bool,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let use_color = !cli.no_color && std::io::stdout().is_terminal();
    let data_dir = cli.data_dir.as_deref();

    match cli.command {
        None => {
            // No subcommand → launch TUI
            #[cfg(feature = "tui")]
            {
                tui::run(data_dir, cli.from_reminder)?;
            }
            #[cfg(not(feature = "tui"))]
            {
                eprintln!("TUI not available (built without 'tui' feature). Use a subcommand.");
                eprintln!("Run with --help for usage.");
                std::process::exit(1);
            }
        }
        #[cfg(feature = "tui")]
        Some(Command::Review) => {
            tui::run(data_dir, cli.from_reminder)?;
        }
        Some(Command::List) => {
            let app = app::App::new(data_dir)?;
            commands::list::run(&app, &cli.format, use_color)?;
        }
        Some(Command::Show { id }) => {
            let app = app::App::new(data_dir)?;
            commands::show::run(&app, id, &cli.format, use_color)?;
        }
        Some(Command::Add { native, foreign }) => {
            let app = app::App::new(data_dir)?;
            commands::add::run(&app, &native, &foreign, &cli.format)?;
        }
        Some(Command::Edit { id, native, foreign }) => {
            let app = app::App::new(data_dir)?;
            commands::edit::run(&app, id, &native, &foreign, &cli.format)?;
        }
        Some(Command::Rm { id }) => {
            let app = app::App::new(data_dir)?;
            commands::rm::run(&app, id, &cli.format)?;
        }
        Some(Command::Settings { show_native, show_foreign }) => {
            let app = app::App::new(data_dir)?;
            commands::settings::run(&app, show_native, show_foreign, &cli.format)?;
        }
        Some(Command::Remind { now }) => {
            let app = app::App::new(data_dir)?;
            commands::remind::run(&app, now, use_color)?;
        }
    }

    Ok(())
}
