//! Data models for cards and review sessions

use serde::Serialize;

/// A card with a front (prompt) and a back (answer).
///
/// Cards carry no surrogate key: two cards with the same text on both sides
/// are the same card for progress tracking and removal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub front: String,
    pub back: String,
}

impl Card {
    pub fn new(front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            front: front.into(),
            back: back.into(),
        }
    }

    /// Check whether this card has the given front/back pair
    pub fn matches(&self, other: &Card) -> bool {
        self.front == other.front && self.back == other.back
    }

    /// Text shown for the given face
    pub fn text(&self, face: CardFace) -> &str {
        match face {
            CardFace::Front => &self.front,
            CardFace::Back => &self.back,
        }
    }
}

/// Which side of the current card is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CardFace {
    #[default]
    Front,
    Back,
}

impl CardFace {
    pub fn flipped(self) -> Self {
        match self {
            Self::Front => Self::Back,
            Self::Back => Self::Front,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Front => "Front",
            Self::Back => "Back",
        }
    }
}

/// Lifecycle of a review session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Created, no card drawn yet
    AwaitingFirstCard,
    ShowingFront,
    ShowingBack,
    /// Working set is empty; the session is finished
    Exhausted,
}

/// What happened after a draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawOutcome {
    /// A card is current and showing its front
    Next,
    /// Every card has been learned
    Completed,
}

/// Card counts across the three files of a deck
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckStats {
    pub total_cards: usize,
    pub not_learned_entries: usize,
    pub learned_cards: usize,
}
