use std::io::Write;

use thiserror::Error;

use super::models::Reminder;
use crate::config::ConfigError;

#[derive(Error, Debug)]
pub enum ReminderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Delivers reminders to the user
pub trait Notifier: Send + Sync {
    fn notify(&self, reminder: &Reminder) -> Result<(), ReminderError>;
}

/// Rings the terminal bell and prints the reminder to stdout
pub struct TerminalNotifier {
    use_color: bool,
}

impl TerminalNotifier {
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&self, reminder: &Reminder) -> Result<(), ReminderError> {
        let mut out = std::io::stdout().lock();
        let local = reminder.fired_at.with_timezone(&chrono::Local);

        let stamp = local.format("%Y-%m-%d %H:%M");

        if self.use_color {
            writeln!(
                out,
                "\x07\x1b[1m{}\x1b[0m  \x1b[2m{}\x1b[0m",
                reminder.title, stamp
            )?;
        } else {
            writeln!(out, "\x07{}  {}", reminder.title, stamp)?;
        }
        writeln!(out, "  {}", reminder.body)?;
        writeln!(out, "  Open with: {}", reminder.launch_command())?;
        out.flush()?;
        Ok(())
    }
}
