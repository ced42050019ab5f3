//! Flashcard decks and review sessions
//!
//! This module provides:
//! - Card files (a source deck plus its not-learned and learned companions)
//! - Append / rewrite / filtered-remove operations on those files
//! - The review session with its streak-based promotion rule

pub mod models;
pub mod session;
pub mod storage;

pub use models::*;
pub use session::{ReviewSession, PROMOTION_STREAK};
pub use storage::{CardStoreError, DeckFiles};
