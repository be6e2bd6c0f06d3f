use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{Context, Result};

use wordcards_lib::config::{self, AppConfig};
use wordcards_lib::flashcards::{CardId, Flashcard, FlashcardStorage, ReviewController};
use wordcards_lib::settings::SettingsStorage;

/// Shared application state for CLI commands
pub struct App {
    pub data_dir: PathBuf,
    pub config: AppConfig,
    pub card_storage: Rc<FlashcardStorage>,
    pub settings_storage: Rc<SettingsStorage>,
}

impl App {
    /// Initialize from the given data directory, or the default one
    pub fn new(data_dir: Option<&Path>) -> Result<Self> {
        let data_dir = match data_dir {
            Some(dir) => dir.to_path_buf(),
            None => config::default_data_dir().context("Failed to get data directory")?,
        };

        let config = AppConfig::load(&data_dir)
            .with_context(|| format!("Failed to load config from {}", data_dir.display()))?;

        let card_storage = FlashcardStorage::open(&data_dir.join(config::DATABASE_FILE))
            .context("Failed to open card store")?;
        let settings_storage =
            SettingsStorage::open(&data_dir).context("Failed to open settings")?;

        Ok(Self {
            data_dir,
            config,
            card_storage: Rc::new(card_storage),
            settings_storage: Rc::new(settings_storage),
        })
    }

    /// Start a review session over the shared stores
    pub fn review_session(&self) -> ReviewController {
        ReviewController::new(
            Rc::clone(&self.card_storage),
            Rc::clone(&self.settings_storage),
            self.config.review.reveal_policy,
        )
    }

    /// Find a card by id
    pub fn find_card(&self, id: CardId) -> Result<Flashcard> {
        self.card_storage
            .get(id)
            .context("Failed to read card")?
            .with_context(|| format!("No card with id {}", id))
    }

    pub fn list_cards(&self) -> Result<Vec<Flashcard>> {
        self.card_storage.list_all().context("Failed to list cards")
    }
}
