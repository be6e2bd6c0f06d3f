mod app_state;
mod card_widget;
mod deck_widget;
mod key_handler;
mod popup;
mod status_bar;
mod ui;

use std::io;
use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::prelude::*;

use crate::app::App;
use app_state::TuiState;

pub fn run(data_dir: Option<&Path>, from_reminder: bool) -> Result<()> {
    let app = App::new(data_dir)?;
    if from_reminder {
        log::info!("Review opened from reminder");
    }
    let mut state = TuiState::new(app.review_session(), from_reminder);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Event loop
    let result = run_loop(&mut terminal, &mut state);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    result
}

/// How often the stores are re-read for changes made by other processes
const RELOAD_INTERVAL: Duration = Duration::from_secs(1);

fn run_loop<B: Backend>(terminal: &mut Terminal<B>, state: &mut TuiState) -> Result<()> {
    let mut last_reload = Instant::now();

    loop {
        if last_reload.elapsed() >= RELOAD_INTERVAL {
            state.reload();
            last_reload = Instant::now();
        }
        state.tick();
        terminal.draw(|f| ui::draw(f, state))?;

        if state.quit {
            return Ok(());
        }

        // Poll for events with timeout
        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    key_handler::handle_key(state, key);
                }
                Event::Mouse(mouse) => {
                    key_handler::handle_mouse(state, mouse);
                }
                _ => {}
            }
        }
    }
}
