//! Daily review reminder
//!
//! A tokio task wakes once a day at the configured local time and hands a
//! [`Reminder`] to a [`Notifier`]. Reminders only fire while the daemon runs.

pub mod models;
pub mod notifier;
pub mod scheduler;

pub use models::Reminder;
pub use notifier::{Notifier, ReminderError, TerminalNotifier};
pub use scheduler::{next_fire_after, FirePlan, ReminderScheduler};
