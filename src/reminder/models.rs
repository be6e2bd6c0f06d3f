use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Command-line flag that marks a launch coming from a reminder
pub const FROM_REMINDER_FLAG: &str = "--from-reminder";

/// A notification asking the user to come back and review
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub title: String,
    pub body: String,
    pub fired_at: DateTime<Utc>,
    /// Opening the notification should land on the review screen
    pub from_reminder: bool,
}

impl Reminder {
    pub fn daily() -> Self {
        Self {
            title: "Flashcard Reminder".to_string(),
            body: "Time to review your flashcards!".to_string(),
            fired_at: Utc::now(),
            from_reminder: true,
        }
    }

    /// Shell command that opens the review screen for this reminder
    pub fn launch_command(&self) -> String {
        if self.from_reminder {
            format!("wordcards {}", FROM_REMINDER_FLAG)
        } else {
            "wordcards".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_daily_reminder_opens_review() {
        let reminder = Reminder::daily();
        assert!(reminder.from_reminder);
        assert_eq!(reminder.launch_command(), "wordcards --from-reminder");

        let plain = Reminder {
            from_reminder: false,
            ..reminder
        };
        assert_eq!(plain.launch_command(), "wordcards");
    }
}
