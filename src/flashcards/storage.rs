//! Storage operations for flashcards
//!
//! Cards live in a single SQLite table:
//! ```text
//! <data_dir>/wordcards.db
//! └── flashcards (id, native_text, foreign_text, last_reviewed_at)
//! ```
//!
//! Every successful mutation re-reads the table and publishes the ordered list
//! on a watch channel, so observers never have to poll.

use std::path::Path;

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};
use thiserror::Error;
use tokio::sync::watch;

use super::models::{millis_to_datetime, CardId, Flashcard};

#[derive(Error, Debug)]
pub enum FlashcardStorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Card not found: {0}")]
    CardNotFound(CardId),
}

pub type Result<T> = std::result::Result<T, FlashcardStorageError>;

// AUTOINCREMENT keeps ids of deleted rows from being handed out again.
const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS flashcards (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        native_text TEXT NOT NULL,
        foreign_text TEXT NOT NULL,
        last_reviewed_at INTEGER NOT NULL
    );
"#;

const SELECT_ALL: &str =
    "SELECT id, native_text, foreign_text, last_reviewed_at FROM flashcards ORDER BY id DESC";

/// Storage manager for flashcard operations
pub struct FlashcardStorage {
    conn: Connection,
    cards_tx: watch::Sender<Vec<Flashcard>>,
}

impl FlashcardStorage {
    /// Open (or create) the card database at `db_path`
    pub fn open(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(db_path)?;
        log::info!("Opened card store at {}", db_path.display());
        Self::with_connection(conn)
    }

    /// Volatile store, used by tests and dry runs
    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)?;
        let cards = query_all(&conn)?;
        let (cards_tx, _) = watch::channel(cards);
        Ok(Self { conn, cards_tx })
    }

    // ==================== Live Views ====================

    /// Live list of all cards, newest first. The receiver starts with the
    /// current list and is notified after every insert, update or delete.
    pub fn observe_all(&self) -> watch::Receiver<Vec<Flashcard>> {
        self.cards_tx.subscribe()
    }

    /// Live view of one card; yields `None` once the card is deleted
    pub fn observe_by_id(&self, id: CardId) -> CardWatch {
        CardWatch {
            id,
            cards: self.cards_tx.subscribe(),
        }
    }

    /// Number of live subscriptions currently held on the card list
    pub fn observer_count(&self) -> usize {
        self.cards_tx.receiver_count()
    }

    fn publish(&self) -> Result<()> {
        let cards = query_all(&self.conn)?;
        self.cards_tx.send_replace(cards);
        Ok(())
    }

    /// Re-read the table and publish only if another connection changed it.
    /// Returns whether observers were notified.
    pub fn refresh(&self) -> Result<bool> {
        let cards = query_all(&self.conn)?;
        Ok(self.cards_tx.send_if_modified(|current| {
            if *current == cards {
                return false;
            }
            *current = cards;
            true
        }))
    }

    // ==================== Card Operations ====================

    /// List all cards, newest first
    pub fn list_all(&self) -> Result<Vec<Flashcard>> {
        query_all(&self.conn)
    }

    pub fn count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM flashcards", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Get a specific card
    pub fn get(&self, id: CardId) -> Result<Option<Flashcard>> {
        let card = self
            .conn
            .query_row(
                "SELECT id, native_text, foreign_text, last_reviewed_at FROM flashcards WHERE id = ?1",
                params![id],
                card_from_row,
            )
            .optional()?;
        Ok(card)
    }

    /// Create a new card and return its id.
    ///
    /// The store does not validate the texts; callers are expected to.
    pub fn insert(&self, native_text: &str, foreign_text: &str) -> Result<CardId> {
        self.conn.execute(
            "INSERT INTO flashcards (native_text, foreign_text, last_reviewed_at) VALUES (?1, ?2, ?3)",
            params![native_text, foreign_text, Utc::now().timestamp_millis()],
        )?;
        let id = self.conn.last_insert_rowid();
        log::debug!("Inserted card {}", id);

        self.publish()?;
        Ok(id)
    }

    /// Replace the stored fields of an existing card
    pub fn update(&self, card: &Flashcard) -> Result<()> {
        let changed = self.conn.execute(
            "UPDATE flashcards SET native_text = ?1, foreign_text = ?2, last_reviewed_at = ?3 WHERE id = ?4",
            params![
                card.native_text,
                card.foreign_text,
                card.last_reviewed_at.timestamp_millis(),
                card.id,
            ],
        )?;
        if changed == 0 {
            return Err(FlashcardStorageError::CardNotFound(card.id));
        }
        log::debug!("Updated card {}", card.id);

        self.publish()
    }

    /// Delete a card. Deleting a card that is already gone is a no-op.
    pub fn delete(&self, card: &Flashcard) -> Result<()> {
        let changed = self
            .conn
            .execute("DELETE FROM flashcards WHERE id = ?1", params![card.id])?;
        if changed == 0 {
            log::debug!("Card {} already deleted", card.id);
            return Ok(());
        }
        log::debug!("Deleted card {}", card.id);

        self.publish()
    }
}

/// Live optional view of a single card, derived from the card list channel
pub struct CardWatch {
    id: CardId,
    cards: watch::Receiver<Vec<Flashcard>>,
}

impl CardWatch {
    pub fn id(&self) -> CardId {
        self.id
    }

    /// Current value of the card, marking the view as seen
    pub fn current(&mut self) -> Option<Flashcard> {
        self.cards
            .borrow_and_update()
            .iter()
            .find(|c| c.id == self.id)
            .cloned()
    }

    /// Whether the card list changed since the last `current()` call
    pub fn has_changed(&self) -> bool {
        self.cards.has_changed().unwrap_or(false)
    }

    /// Wait for the next change to the card list and return the new value
    pub async fn changed(&mut self) -> Option<Flashcard> {
        // A closed channel means the store is gone, so the card is too
        if self.cards.changed().await.is_err() {
            return None;
        }
        self.current()
    }
}

fn query_all(conn: &Connection) -> Result<Vec<Flashcard>> {
    let mut stmt = conn.prepare(SELECT_ALL)?;
    let cards = stmt
        .query_map([], card_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(cards)
}

fn card_from_row(row: &Row<'_>) -> rusqlite::Result<Flashcard> {
    Ok(Flashcard {
        id: row.get(0)?,
        native_text: row.get(1)?,
        foreign_text: row.get(2)?,
        last_reviewed_at: millis_to_datetime(row.get(3)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn ids(cards: &[Flashcard]) -> Vec<CardId> {
        cards.iter().map(|c| c.id).collect()
    }

    #[test]
    fn test_list_is_newest_first() {
        let storage = FlashcardStorage::open_in_memory().unwrap();
        let a = storage.insert("нэг", "one").unwrap();
        let b = storage.insert("хоёр", "two").unwrap();
        let c = storage.insert("гурав", "three").unwrap();

        let cards = storage.list_all().unwrap();
        assert_eq!(ids(&cards), vec![c, b, a]);
        assert_eq!(storage.count().unwrap(), 3);
    }

    #[test]
    fn test_ids_not_reused_after_delete() {
        let storage = FlashcardStorage::open_in_memory().unwrap();
        let first = storage.insert("нэг", "one").unwrap();
        let card = storage.get(first).unwrap().unwrap();
        storage.delete(&card).unwrap();

        let second = storage.insert("хоёр", "two").unwrap();
        assert!(second > first);
    }

    #[test]
    fn test_update_missing_card() {
        let storage = FlashcardStorage::open_in_memory().unwrap();
        let ghost = Flashcard::new(42, "a".to_string(), "b".to_string());

        let result = storage.update(&ghost);
        assert!(matches!(result, Err(FlashcardStorageError::CardNotFound(42))));
    }

    #[test]
    fn test_delete_is_idempotent() {
        let storage = FlashcardStorage::open_in_memory().unwrap();
        let id = storage.insert("нэг", "one").unwrap();
        let card = storage.get(id).unwrap().unwrap();

        storage.delete(&card).unwrap();
        storage.delete(&card).unwrap();
        assert!(storage.get(id).unwrap().is_none());
    }

    #[test]
    fn test_observe_all_receives_changes() {
        let storage = FlashcardStorage::open_in_memory().unwrap();
        let mut rx = storage.observe_all();
        assert!(rx.borrow_and_update().is_empty());
        assert!(!rx.has_changed().unwrap());

        let id = storage.insert("нэг", "one").unwrap();
        assert!(rx.has_changed().unwrap());
        assert_eq!(ids(&rx.borrow_and_update()), vec![id]);
    }

    #[test]
    fn test_observe_by_id_follows_updates_and_delete() {
        let storage = FlashcardStorage::open_in_memory().unwrap();
        let id = storage.insert("нэг", "one").unwrap();
        let mut watch = storage.observe_by_id(id);
        assert_eq!(watch.current().unwrap().foreign_text, "one");

        let card = storage.get(id).unwrap().unwrap();
        storage
            .update(&card.with_texts("нэг".to_string(), "uno".to_string()))
            .unwrap();
        assert!(watch.has_changed());
        assert_eq!(watch.current().unwrap().foreign_text, "uno");

        storage.delete(&card).unwrap();
        assert!(watch.current().is_none());
    }

    #[test]
    fn test_observer_count_tracks_subscriptions() {
        let storage = FlashcardStorage::open_in_memory().unwrap();
        assert_eq!(storage.observer_count(), 0);

        let rx = storage.observe_all();
        let watch = storage.observe_by_id(1);
        assert_eq!(storage.observer_count(), 2);

        drop(rx);
        drop(watch);
        assert_eq!(storage.observer_count(), 0);
    }

    #[test]
    fn test_cards_persist_across_reopen() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("wordcards.db");

        let id = {
            let storage = FlashcardStorage::open(&path).unwrap();
            storage.insert("ном", "book").unwrap()
        };

        let storage = FlashcardStorage::open(&path).unwrap();
        let card = storage.get(id).unwrap().unwrap();
        assert_eq!(card.native_text, "ном");
        assert_eq!(card.foreign_text, "book");
        assert_eq!(ids(&storage.observe_all().borrow()), vec![id]);
    }

    #[test]
    fn test_refresh_picks_up_other_connections() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("wordcards.db");

        let ours = FlashcardStorage::open(&path).unwrap();
        let theirs = FlashcardStorage::open(&path).unwrap();
        let mut rx = ours.observe_all();
        rx.borrow_and_update();

        assert!(!ours.refresh().unwrap());
        assert!(!rx.has_changed().unwrap());

        let id = theirs.insert("ус", "water").unwrap();
        assert!(ours.refresh().unwrap());
        assert!(rx.has_changed().unwrap());
        assert_eq!(ids(&rx.borrow_and_update()), vec![id]);
    }
}
