//! Word-pair flashcards: card store, display preferences, the review
//! session controller and the daily reminder.

pub mod config;
pub mod flashcards;
pub mod reminder;
pub mod settings;
