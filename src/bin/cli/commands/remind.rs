use std::sync::Arc;

use anyhow::{bail, Context, Result};

use wordcards_lib::reminder::{Notifier, Reminder, ReminderScheduler, TerminalNotifier};

use crate::app::App;

pub fn run(app: &App, now: bool, use_color: bool) -> Result<()> {
    let notifier = Arc::new(TerminalNotifier::new(use_color));

    if now {
        notifier
            .notify(&Reminder::daily())
            .context("Failed to send reminder")?;
        return Ok(());
    }

    let reminder_config = &app.config.reminder;
    if !reminder_config.enabled {
        bail!(
            "Reminders are disabled; set `enabled = true` under [reminder] in {}",
            app.data_dir.join(wordcards_lib::config::CONFIG_FILE).display()
        );
    }

    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    runtime.block_on(async {
        let mut scheduler = ReminderScheduler::new(reminder_config, notifier)
            .context("Invalid reminder configuration")?;
        scheduler.start();
        println!(
            "Daily reminder scheduled for {} (Ctrl-C to stop)",
            reminder_config.time
        );

        tokio::signal::ctrl_c()
            .await
            .context("Failed to listen for Ctrl-C")?;
        scheduler.shutdown();
        scheduler.join().await;
        Ok::<(), anyhow::Error>(())
    })
}
