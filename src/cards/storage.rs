//! Storage operations for card files
//!
//! Every deck is a set of three sibling CSV files sharing a `front,back` schema:
//! ```text
//! {dir}/
//! ├── {stem}.csv               # Source deck, edited by the user
//! ├── {stem}_not_learned.csv   # Cards currently missed (may repeat)
//! └── {stem}_learned.csv       # Append-only archive of promoted cards
//! ```
//!
//! Nothing is cached. Each call re-reads its file and writes it back in full.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::models::{Card, DeckStats};

/// Extension enforced on deck names typed by the user
pub const CSV_EXTENSION: &str = ".csv";

const FRONT_HEADER: &str = "front";
const BACK_HEADER: &str = "back";

/// Accepted header names per column. Decks written by the German-language
/// version of the tool use `Vorne`/`Hinten`.
const FRONT_ALIASES: &[&str] = &[FRONT_HEADER, "vorne"];
const BACK_ALIASES: &[&str] = &[BACK_HEADER, "hinten"];

const NOT_LEARNED_SUFFIX: &str = "_not_learned";
const LEARNED_SUFFIX: &str = "_learned";

#[derive(Error, Debug)]
pub enum CardStoreError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error(
        "The CSV file {} must have 'front' and 'back' columns (missing: {})",
        .path.display(),
        .missing.join(", ")
    )]
    Schema { path: PathBuf, missing: Vec<String> },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl CardStoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, CardStoreError>;

/// Paths of the three files that make up one deck
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckFiles {
    pub source: PathBuf,
    pub not_learned: PathBuf,
    pub learned: PathBuf,
}

impl DeckFiles {
    /// Derive the collaborator files from the source path's stem
    pub fn for_source(source: impl AsRef<Path>) -> Self {
        let source = source.as_ref().to_path_buf();
        let stem = source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let dir = source.parent().map(Path::to_path_buf).unwrap_or_default();

        Self {
            not_learned: dir.join(format!("{stem}{NOT_LEARNED_SUFFIX}{CSV_EXTENSION}")),
            learned: dir.join(format!("{stem}{LEARNED_SUFFIX}{CSV_EXTENSION}")),
            source,
        }
    }

    /// Count records in each of the deck's files
    pub fn stats(&self) -> Result<DeckStats> {
        Ok(DeckStats {
            total_cards: load_or_empty(&self.source)?.len(),
            not_learned_entries: load_or_empty(&self.not_learned)?.len(),
            learned_cards: load_or_empty(&self.learned)?.len(),
        })
    }
}

/// Append `ext` to `name` unless it already ends with it (ignoring case)
pub fn ensure_extension(name: &str, ext: &str) -> String {
    if name.to_lowercase().ends_with(&ext.to_lowercase()) {
        name.to_string()
    } else {
        format!("{name}{ext}")
    }
}

struct Columns {
    front: usize,
    back: usize,
}

fn find_column(headers: &csv::StringRecord, aliases: &[&str]) -> Option<usize> {
    headers.iter().position(|h| {
        let h = h.trim();
        aliases.iter().any(|alias| h.eq_ignore_ascii_case(alias))
    })
}

fn resolve_columns(path: &Path, headers: &csv::StringRecord) -> Result<Columns> {
    let front = find_column(headers, FRONT_ALIASES);
    let back = find_column(headers, BACK_ALIASES);

    match (front, back) {
        (Some(front), Some(back)) => Ok(Columns { front, back }),
        _ => {
            let mut missing = Vec::new();
            if front.is_none() {
                missing.push(FRONT_HEADER.to_string());
            }
            if back.is_none() {
                missing.push(BACK_HEADER.to_string());
            }
            Err(CardStoreError::Schema {
                path: path.to_path_buf(),
                missing,
            })
        }
    }
}

fn open_reader(path: &Path) -> Result<csv::Reader<File>> {
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => CardStoreError::NotFound(path.to_path_buf()),
        _ => CardStoreError::Io(e),
    })?;

    Ok(csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file))
}

/// Check that a file has both required columns without reading its records
pub fn validate_schema(path: &Path) -> Result<()> {
    let mut reader = open_reader(path)?;
    let headers = reader.headers()?.clone();
    resolve_columns(path, &headers)?;
    Ok(())
}

/// Load every card from a deck file, in file order
pub fn load(path: &Path) -> Result<Vec<Card>> {
    let mut reader = open_reader(path)?;
    let headers = reader.headers()?.clone();
    let columns = resolve_columns(path, &headers)?;

    let mut cards = Vec::new();
    for result in reader.records() {
        let record = result?;
        cards.push(Card {
            front: record.get(columns.front).unwrap_or_default().to_string(),
            back: record.get(columns.back).unwrap_or_default().to_string(),
        });
    }

    log::debug!("Loaded {} cards from {:?}", cards.len(), path);
    Ok(cards)
}

/// Load a deck file, treating a missing file as an empty deck
pub fn load_or_empty(path: &Path) -> Result<Vec<Card>> {
    match load(path) {
        Err(CardStoreError::NotFound(_)) => Ok(Vec::new()),
        other => other,
    }
}

/// Rewrite a deck file with the canonical header and the given cards
pub fn write_all(path: &Path, cards: &[Card]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record([FRONT_HEADER, BACK_HEADER])?;
    for card in cards {
        writer.write_record([card.front.as_str(), card.back.as_str()])?;
    }
    writer.flush()?;
    Ok(())
}

/// Append a card to a deck file, creating the file if it does not exist
pub fn append(path: &Path, card: &Card) -> Result<()> {
    let mut cards = load_or_empty(path)?;
    cards.push(card.clone());
    write_all(path, &cards)?;

    log::info!("Appended card {:?} to {:?} ({} total)", card.front, path, cards.len());
    Ok(())
}

/// Drop every card matching `predicate` from a deck file.
///
/// A missing file is left missing. Returns the number of removed records.
pub fn remove_matching<F>(path: &Path, predicate: F) -> Result<usize>
where
    F: Fn(&Card) -> bool,
{
    let mut cards = match load(path) {
        Ok(cards) => cards,
        Err(CardStoreError::NotFound(_)) => return Ok(0),
        Err(e) => return Err(e),
    };

    let before = cards.len();
    cards.retain(|card| !predicate(card));
    let removed = before - cards.len();

    write_all(path, &cards)?;
    if removed > 0 {
        log::info!("Removed {} records from {:?}", removed, path);
    }
    Ok(removed)
}
