use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use karteikarten_lib::cards::storage::{self, DeckFiles};
use karteikarten_lib::cards::{Card, DeckStats, ReviewSession};
use karteikarten_lib::config::StudyConfig;

/// Shared application state for CLI commands and the TUI
pub struct App {
    pub config: StudyConfig,
}

impl App {
    /// Load the config file and apply command-line overrides
    pub fn new(config_path: Option<&Path>, deck_dir: Option<PathBuf>) -> Result<Self> {
        let mut config = StudyConfig::load_or_default(config_path)
            .context("Failed to load config")?;

        if let Some(dir) = deck_dir {
            config.deck_dir = dir;
        }

        Ok(Self::with_config(config))
    }

    pub fn with_config(config: StudyConfig) -> Self {
        Self { config }
    }

    /// Resolve a deck argument: an existing file is used as given, anything
    /// else is treated as a deck name inside the deck directory
    pub fn resolve_deck(&self, deck: &str) -> PathBuf {
        let given = PathBuf::from(deck);
        if given.is_file() {
            given
        } else {
            self.config.deck_path(deck)
        }
    }

    /// Append a card to the deck `resolve_deck` picks, returning the file it
    /// was written to
    pub fn add_card(&self, deck: &str, front: &str, back: &str) -> Result<PathBuf> {
        let path = self.resolve_deck(deck);
        storage::append(&path, &Card::new(front.trim(), back.trim()))
            .with_context(|| format!("Failed to add card to {}", path.display()))?;
        Ok(path)
    }

    /// Load every card of a deck; a missing deck has no cards
    pub fn list_cards(&self, path: &Path) -> Result<Vec<Card>> {
        storage::load_or_empty(path)
            .with_context(|| format!("Failed to load {}", path.display()))
    }

    pub fn deck_stats(&self, path: &Path) -> Result<DeckStats> {
        DeckFiles::for_source(path)
            .stats()
            .with_context(|| format!("Failed to read deck {}", path.display()))
    }

    /// Check the columns of a user-selected file and start a session on it
    #[cfg_attr(not(feature = "tui"), allow(dead_code))]
    pub fn open_session(&self, path: &Path) -> storage::Result<ReviewSession> {
        storage::validate_schema(path)?;
        ReviewSession::open(path)
    }
}
