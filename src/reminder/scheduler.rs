//! Reminder Scheduler
//!
//! Fires one reminder per day at a fixed local time using tokio timers.
//! Reminders are scheduled in-process and only fire while the daemon runs.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local, LocalResult, NaiveTime, TimeZone, Utc};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use super::models::Reminder;
use super::notifier::{Notifier, ReminderError};
use crate::config::ReminderConfig;

/// Polling interval used when exact timing is not requested
const INEXACT_CHECK_INTERVAL: Duration = Duration::from_secs(60);

/// Message types for scheduler communication
#[derive(Debug)]
pub enum SchedulerMessage {
    /// Deliver a reminder immediately, keeping the daily schedule
    FireNow,
    /// Shutdown the scheduler
    Shutdown,
}

/// When the next reminder is due
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FirePlan {
    pub at: DateTime<Utc>,
    /// False when the local time could not be resolved exactly and a
    /// best-effort instant was chosen instead
    pub exact: bool,
}

/// Daily reminder scheduler that runs in the background
pub struct ReminderScheduler {
    time: NaiveTime,
    exact: bool,
    notifier: Arc<dyn Notifier>,
    sender: Option<mpsc::Sender<SchedulerMessage>>,
    handle: Option<JoinHandle<()>>,
}

impl ReminderScheduler {
    pub fn new(config: &ReminderConfig, notifier: Arc<dyn Notifier>) -> Result<Self, ReminderError> {
        Ok(Self {
            time: config.time_of_day()?,
            exact: config.exact,
            notifier,
            sender: None,
            handle: None,
        })
    }

    /// Start the scheduler on the current tokio runtime
    pub fn start(&mut self) {
        let (tx, rx) = mpsc::channel(8);
        self.sender = Some(tx);

        let notifier = Arc::clone(&self.notifier);
        let time = self.time;
        let exact = self.exact;

        self.handle = Some(tokio::spawn(async move {
            scheduler_loop(time, exact, notifier, rx).await;
        }));
        log::info!("Reminder scheduler started for {}", self.time.format("%H:%M"));
    }

    /// Request an immediate reminder
    pub fn fire_now(&self) {
        if let Some(sender) = &self.sender {
            let _ = sender.try_send(SchedulerMessage::FireNow);
        }
    }

    /// Shutdown the scheduler
    pub fn shutdown(&self) {
        if let Some(sender) = &self.sender {
            let _ = sender.try_send(SchedulerMessage::Shutdown);
        }
    }

    /// Wait for the scheduler task to finish
    pub async fn join(mut self) {
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                log::error!("Reminder scheduler task failed: {}", e);
            }
        }
    }
}

/// Main scheduler loop
async fn scheduler_loop(
    time: NaiveTime,
    exact: bool,
    notifier: Arc<dyn Notifier>,
    mut receiver: mpsc::Receiver<SchedulerMessage>,
) {
    let mut after = Local::now();

    loop {
        let plan = next_fire_after(&after, time);
        log::info!(
            "Next reminder at {}{}",
            plan.at.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
            if plan.exact { "" } else { " (best effort)" }
        );

        let until_due = (plan.at - Utc::now()).to_std().unwrap_or(Duration::ZERO);
        let deadline = Instant::now() + until_due;

        // Re-arm every check interval in inexact mode; fire once the plan is due
        // on either the runtime clock or the wall clock
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            let wait = if exact {
                remaining
            } else {
                remaining.min(INEXACT_CHECK_INTERVAL)
            };

            tokio::select! {
                _ = tokio::time::sleep(wait) => {
                    if Instant::now() >= deadline || Utc::now() >= plan.at {
                        deliver(notifier.as_ref());
                        after = Local::now().max(plan.at.with_timezone(&Local));
                        break;
                    }
                }

                msg = receiver.recv() => {
                    match msg {
                        Some(SchedulerMessage::FireNow) => {
                            log::info!("Scheduler: Firing reminder now");
                            deliver(notifier.as_ref());
                        }
                        Some(SchedulerMessage::Shutdown) | None => {
                            log::info!("Scheduler: Shutting down");
                            return;
                        }
                    }
                }
            }
        }
    }
}

fn deliver(notifier: &dyn Notifier) {
    let reminder = Reminder::daily();
    match notifier.notify(&reminder) {
        Ok(()) => log::info!("Reminder delivered"),
        Err(e) => log::error!("Failed to deliver reminder: {}", e),
    }
}

/// Next occurrence of `time` strictly after `now`, in `now`'s time zone.
///
/// If today's time has passed the reminder moves to tomorrow. A local time
/// skipped or repeated by a DST change degrades to a best-effort instant.
pub fn next_fire_after<Tz: TimeZone>(now: &DateTime<Tz>, time: NaiveTime) -> FirePlan {
    let tz = now.timezone();
    let mut date = now.date_naive();

    if now.time() >= time {
        date = date.succ_opt().unwrap_or(date);
    }

    let local = date.and_time(time);
    match tz.from_local_datetime(&local) {
        LocalResult::Single(at) => FirePlan {
            at: at.with_timezone(&Utc),
            exact: true,
        },
        LocalResult::Ambiguous(earliest, _) => {
            log::warn!("Reminder time {} is ambiguous, using the earlier instant", local);
            FirePlan {
                at: earliest.with_timezone(&Utc),
                exact: false,
            }
        }
        LocalResult::None => {
            log::warn!("Reminder time {} does not exist locally, firing late", local);
            let at = tz
                .from_local_datetime(&(local + chrono::Duration::hours(1)))
                .earliest()
                .map(|at| at.with_timezone(&Utc))
                .unwrap_or_else(|| now.with_timezone(&Utc) + chrono::Duration::hours(24));
            FirePlan { at, exact: false }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use chrono::{FixedOffset, NaiveDate, NaiveDateTime, Timelike};
    use tokio::sync::mpsc::UnboundedSender;

    fn nine() -> NaiveTime {
        NaiveTime::from_hms_opt(9, 0, 0).unwrap()
    }

    #[test]
    fn test_next_fire_later_today() {
        let now = Utc.with_ymd_and_hms(2026, 3, 10, 7, 30, 0).unwrap();
        let plan = next_fire_after(&now, nine());

        assert!(plan.exact);
        assert_eq!(plan.at, Utc.with_ymd_and_hms(2026, 3, 10, 9, 0, 0).unwrap());
    }

    #[test]
    fn test_next_fire_moves_to_tomorrow_once_passed() {
        let now = Utc.with_ymd_and_hms(2026, 3, 10, 9, 0, 0).unwrap();
        let plan = next_fire_after(&now, nine());
        assert_eq!(plan.at, Utc.with_ymd_and_hms(2026, 3, 11, 9, 0, 0).unwrap());

        let now = Utc.with_ymd_and_hms(2026, 12, 31, 22, 0, 0).unwrap();
        let plan = next_fire_after(&now, nine());
        assert_eq!(plan.at, Utc.with_ymd_and_hms(2027, 1, 1, 9, 0, 0).unwrap());
    }

    #[test]
    fn test_next_fire_uses_local_offset() {
        let ulaanbaatar = FixedOffset::east_opt(8 * 3600).unwrap();
        let now = ulaanbaatar.with_ymd_and_hms(2026, 5, 1, 8, 59, 0).unwrap();
        let plan = next_fire_after(&now, nine());

        let local = plan.at.with_timezone(&ulaanbaatar);
        assert_eq!(local.hour(), 9);
        assert_eq!(local.minute(), 0);
        assert_eq!(plan.at, Utc.with_ymd_and_hms(2026, 5, 1, 1, 0, 0).unwrap());
    }

    /// UTC+1 that springs forward to UTC+2 at 09:00 local on 2026-03-29
    /// and falls back at 10:00 local on 2026-10-25, so 09:00 is skipped on the
    /// first day and repeated on the second.
    #[derive(Debug, Clone, Copy)]
    struct NineOClockDst;

    impl NineOClockDst {
        fn winter() -> FixedOffset {
            FixedOffset::east_opt(3600).unwrap()
        }

        fn summer() -> FixedOffset {
            FixedOffset::east_opt(2 * 3600).unwrap()
        }
    }

    impl TimeZone for NineOClockDst {
        type Offset = FixedOffset;

        fn from_offset(_offset: &FixedOffset) -> Self {
            NineOClockDst
        }

        fn offset_from_local_date(&self, local: &NaiveDate) -> LocalResult<FixedOffset> {
            self.offset_from_local_datetime(&local.and_time(NaiveTime::MIN))
        }

        fn offset_from_local_datetime(&self, local: &NaiveDateTime) -> LocalResult<FixedOffset> {
            let fits = |offset: FixedOffset| {
                let utc = *local - chrono::Duration::seconds(offset.local_minus_utc() as i64);
                self.offset_from_utc_datetime(&utc) == offset
            };
            match (fits(Self::summer()), fits(Self::winter())) {
                (true, true) => LocalResult::Ambiguous(Self::summer(), Self::winter()),
                (true, false) => LocalResult::Single(Self::summer()),
                (false, true) => LocalResult::Single(Self::winter()),
                (false, false) => LocalResult::None,
            }
        }

        fn offset_from_utc_date(&self, utc: &NaiveDate) -> FixedOffset {
            self.offset_from_utc_datetime(&utc.and_time(NaiveTime::MIN))
        }

        fn offset_from_utc_datetime(&self, utc: &NaiveDateTime) -> FixedOffset {
            let spring = Utc.with_ymd_and_hms(2026, 3, 29, 8, 0, 0).unwrap().naive_utc();
            let fall = Utc.with_ymd_and_hms(2026, 10, 25, 8, 0, 0).unwrap().naive_utc();
            if *utc >= spring && *utc < fall {
                Self::summer()
            } else {
                Self::winter()
            }
        }
    }

    #[test]
    fn test_skipped_time_fires_an_hour_late() {
        let now = NineOClockDst.from_utc_datetime(
            &Utc.with_ymd_and_hms(2026, 3, 29, 5, 0, 0).unwrap().naive_utc(),
        );
        let plan = next_fire_after(&now, nine());

        assert!(!plan.exact);
        // 10:00 local, already on summer time
        assert_eq!(plan.at, Utc.with_ymd_and_hms(2026, 3, 29, 8, 0, 0).unwrap());
    }

    #[test]
    fn test_repeated_time_fires_at_the_earlier_instant() {
        let now = NineOClockDst.from_utc_datetime(
            &Utc.with_ymd_and_hms(2026, 10, 25, 6, 0, 0).unwrap().naive_utc(),
        );
        let plan = next_fire_after(&now, nine());

        assert!(!plan.exact);
        assert_eq!(plan.at, Utc.with_ymd_and_hms(2026, 10, 25, 7, 0, 0).unwrap());
    }

    #[test]
    fn test_ordinary_day_in_dst_zone_is_exact() {
        let now = NineOClockDst.from_utc_datetime(
            &Utc.with_ymd_and_hms(2026, 6, 1, 5, 0, 0).unwrap().naive_utc(),
        );
        let plan = next_fire_after(&now, nine());

        assert!(plan.exact);
        assert_eq!(plan.at, Utc.with_ymd_and_hms(2026, 6, 1, 7, 0, 0).unwrap());
    }

    #[test]
    fn test_local_next_fire_is_in_the_future() {
        let now = Local::now();
        let plan = next_fire_after(&now, nine());
        assert!(plan.at > now.with_timezone(&Utc));
        assert!(plan.at - now.with_timezone(&Utc) <= chrono::Duration::hours(25));
    }

    struct ChannelNotifier {
        tx: Mutex<UnboundedSender<Reminder>>,
    }

    impl Notifier for ChannelNotifier {
        fn notify(&self, reminder: &Reminder) -> Result<(), ReminderError> {
            let _ = self.tx.lock().unwrap().send(reminder.clone());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_fire_now_delivers_reminder() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let notifier = Arc::new(ChannelNotifier { tx: Mutex::new(tx) });

        let mut scheduler = ReminderScheduler::new(&ReminderConfig::default(), notifier).unwrap();
        scheduler.start();
        scheduler.fire_now();

        let reminder = tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert!(reminder.from_reminder);
        assert_eq!(reminder.title, "Flashcard Reminder");

        scheduler.shutdown();
        tokio::time::timeout(Duration::from_secs(5), scheduler.join())
            .await
            .unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_inexact_schedule_delivers_once() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let notifier = Arc::new(ChannelNotifier { tx: Mutex::new(tx) });
        let config = ReminderConfig {
            time: (Local::now() + chrono::Duration::minutes(3))
                .format("%H:%M")
                .to_string(),
            exact: false,
            ..ReminderConfig::default()
        };

        let mut scheduler = ReminderScheduler::new(&config, notifier).unwrap();
        scheduler.start();

        // Several 60s re-arms pass before the reminder is due
        let reminder = tokio::time::timeout(Duration::from_secs(10 * 60), rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert!(reminder.from_reminder);

        // The next one is a day away
        tokio::time::sleep(Duration::from_secs(2 * 3600)).await;
        assert!(rx.try_recv().is_err());

        scheduler.shutdown();
        scheduler.join().await;
    }

    #[test]
    fn test_invalid_time_rejected() {
        let config = ReminderConfig {
            time: "nine".to_string(),
            ..ReminderConfig::default()
        };
        let (tx, _rx) = mpsc::unbounded_channel();
        let notifier = Arc::new(ChannelNotifier { tx: Mutex::new(tx) });

        assert!(ReminderScheduler::new(&config, notifier).is_err());
    }
}
