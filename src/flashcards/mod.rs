//! Word-pair flashcards
//!
//! This module provides:
//! - Flashcard CRUD on an embedded SQLite database
//! - Live views of the card list and of single cards
//! - The review session controller (cursor, reveal state)

pub mod models;
pub mod review;
pub mod storage;

pub use models::*;
pub use review::{ReviewController, ReviewError};
pub use storage::{CardWatch, FlashcardStorage, FlashcardStorageError};
