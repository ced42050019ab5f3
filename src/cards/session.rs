//! Review session state machine
//!
//! A session works through a deck's cards in random order. Each card keeps a
//! streak of consecutive correct answers; a wrong answer resets it and files
//! the card under "not learned", while reaching [`PROMOTION_STREAK`] moves the
//! card to the "learned" archive and out of the session.

use std::collections::HashMap;
use std::path::Path;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::models::{Card, CardFace, DrawOutcome, SessionState};
use super::storage::{self, DeckFiles, Result};

/// Consecutive correct answers needed before a card counts as learned
pub const PROMOTION_STREAK: u32 = 3;

pub struct ReviewSession<R = StdRng> {
    files: DeckFiles,
    working_set: Vec<Card>,
    streaks: HashMap<Card, u32>,
    current: Option<Card>,
    face: CardFace,
    exhausted: bool,
    rng: R,
}

impl ReviewSession<StdRng> {
    /// Start a session over a deck file with an entropy-seeded RNG
    pub fn open(source: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_rng(source, StdRng::from_entropy())
    }
}

impl<R: Rng> ReviewSession<R> {
    pub fn open_with_rng(source: impl AsRef<Path>, rng: R) -> Result<Self> {
        let files = DeckFiles::for_source(source);
        let cards = storage::load_or_empty(&files.source)?;
        log::info!("Starting review of {:?} with {} cards", files.source, cards.len());
        Ok(Self::new(files, cards, rng))
    }

    pub fn new(files: DeckFiles, cards: Vec<Card>, rng: R) -> Self {
        let streaks = cards.iter().map(|card| (card.clone(), 0)).collect();
        Self {
            files,
            working_set: cards,
            streaks,
            current: None,
            face: CardFace::Front,
            exhausted: false,
            rng,
        }
    }

    pub fn state(&self) -> SessionState {
        match (&self.current, self.face) {
            _ if self.exhausted => SessionState::Exhausted,
            (None, _) => SessionState::AwaitingFirstCard,
            (Some(_), CardFace::Front) => SessionState::ShowingFront,
            (Some(_), CardFace::Back) => SessionState::ShowingBack,
        }
    }

    pub fn files(&self) -> &DeckFiles {
        &self.files
    }

    pub fn current_card(&self) -> Option<&Card> {
        self.current.as_ref()
    }

    pub fn face(&self) -> CardFace {
        self.face
    }

    /// Cards still in the working set, duplicates included
    pub fn remaining(&self) -> usize {
        self.working_set.len()
    }

    pub fn streak(&self, card: &Card) -> Option<u32> {
        self.streaks.get(card).copied()
    }

    /// Draw the first card. Does nothing once a card has been drawn.
    pub fn begin(&mut self) -> DrawOutcome {
        match self.state() {
            SessionState::AwaitingFirstCard => self.draw(),
            SessionState::Exhausted => DrawOutcome::Completed,
            SessionState::ShowingFront | SessionState::ShowingBack => DrawOutcome::Next,
        }
    }

    pub fn flip(&mut self) {
        if self.current.is_some() {
            self.face = self.face.flipped();
        }
    }

    /// Record a wrong answer for the current card and draw the next one.
    ///
    /// On a storage error nothing in the session changes.
    pub fn mark_wrong(&mut self) -> Result<DrawOutcome> {
        let Some(card) = self.current.clone() else {
            return Ok(self.begin());
        };

        storage::append(&self.files.not_learned, &card)?;
        self.streaks.insert(card.clone(), 0);
        log::debug!("Missed {:?}, streak reset", card.front);

        Ok(self.draw())
    }

    /// Record a correct answer for the current card and draw the next one.
    ///
    /// On a storage error nothing in the session changes. The not-learned
    /// cleanup runs before the learned append, so retrying after either
    /// failure leaves the card in the learned file once.
    pub fn mark_right(&mut self) -> Result<DrawOutcome> {
        let Some(card) = self.current.clone() else {
            return Ok(self.begin());
        };

        let streak = self.streaks.get(&card).copied().unwrap_or(0) + 1;
        let promoted = streak >= PROMOTION_STREAK;

        storage::remove_matching(&self.files.not_learned, |c| c.matches(&card))?;
        if promoted {
            storage::append(&self.files.learned, &card)?;
        }

        if promoted {
            self.working_set.retain(|c| !c.matches(&card));
            self.streaks.insert(card.clone(), 0);
            log::info!(
                "Learned {:?}, {} cards remaining",
                card.front,
                self.working_set.len()
            );
        } else {
            self.streaks.insert(card.clone(), streak);
            log::debug!("Correct {:?}, streak {}", card.front, streak);
        }

        Ok(self.draw())
    }

    fn draw(&mut self) -> DrawOutcome {
        match self.working_set.choose(&mut self.rng) {
            Some(card) => {
                self.current = Some(card.clone());
                self.face = CardFace::Front;
                DrawOutcome::Next
            }
            None => {
                self.current = None;
                self.face = CardFace::Front;
                self.exhausted = true;
                log::info!("All cards in {:?} learned", self.files.source);
                DrawOutcome::Completed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_session(cards: Vec<Card>) -> (ReviewSession<StdRng>, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("deck.csv");
        storage::write_all(&source, &cards).unwrap();
        let session = ReviewSession::open_with_rng(&source, StdRng::seed_from_u64(7)).unwrap();
        (session, temp_dir)
    }

    fn hund() -> Card {
        Card::new("Hund", "dog")
    }

    #[test]
    fn test_new_session_awaits_first_card() {
        let (session, _temp) = create_test_session(vec![hund()]);

        assert_eq!(session.state(), SessionState::AwaitingFirstCard);
        assert!(session.current_card().is_none());
        assert_eq!(session.streak(&hund()), Some(0));
    }

    #[test]
    fn test_empty_deck_is_exhausted_immediately() {
        let (mut session, _temp) = create_test_session(Vec::new());

        assert_eq!(session.begin(), DrawOutcome::Completed);
        assert_eq!(session.state(), SessionState::Exhausted);
        assert!(session.current_card().is_none());
    }

    #[test]
    fn test_missing_source_is_empty_deck() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("nothing.csv");
        let mut session = ReviewSession::open_with_rng(&source, StdRng::seed_from_u64(1)).unwrap();

        assert_eq!(session.remaining(), 0);
        assert_eq!(session.begin(), DrawOutcome::Completed);
    }

    #[test]
    fn test_flip_toggles_face_only() {
        let (mut session, _temp) = create_test_session(vec![hund()]);

        session.flip();
        assert_eq!(session.state(), SessionState::AwaitingFirstCard);

        session.begin();
        assert_eq!(session.state(), SessionState::ShowingFront);

        session.flip();
        assert_eq!(session.state(), SessionState::ShowingBack);
        assert_eq!(session.face(), CardFace::Back);

        session.flip();
        assert_eq!(session.state(), SessionState::ShowingFront);
        assert_eq!(session.remaining(), 1);
        assert_eq!(session.streak(&hund()), Some(0));
    }

    #[test]
    fn test_three_correct_answers_promote_card() {
        let (mut session, _temp) = create_test_session(vec![hund()]);
        session.begin();

        assert_eq!(session.mark_right().unwrap(), DrawOutcome::Next);
        assert_eq!(session.mark_right().unwrap(), DrawOutcome::Next);
        assert_eq!(session.streak(&hund()), Some(2));
        assert_eq!(session.remaining(), 1);

        assert_eq!(session.mark_right().unwrap(), DrawOutcome::Completed);
        assert_eq!(session.state(), SessionState::Exhausted);
        assert_eq!(session.remaining(), 0);
        assert_eq!(session.streak(&hund()), Some(0));

        let learned = storage::load(&session.files().learned).unwrap();
        assert_eq!(learned, vec![hund()]);
    }

    #[test]
    fn test_wrong_answer_resets_streak() {
        let (mut session, _temp) = create_test_session(vec![hund()]);
        session.begin();
        session.mark_right().unwrap();
        session.mark_right().unwrap();

        session.flip();
        assert_eq!(session.mark_wrong().unwrap(), DrawOutcome::Next);

        assert_eq!(session.streak(&hund()), Some(0));
        assert_eq!(session.remaining(), 1);
        assert_eq!(session.current_card(), Some(&hund()));
        assert_eq!(session.face(), CardFace::Front);

        let not_learned = storage::load(&session.files().not_learned).unwrap();
        assert_eq!(not_learned, vec![hund()]);
    }

    #[test]
    fn test_wrong_answers_append_duplicates() {
        let (mut session, _temp) = create_test_session(vec![hund()]);
        session.begin();
        session.mark_wrong().unwrap();
        session.mark_wrong().unwrap();

        let not_learned = storage::load(&session.files().not_learned).unwrap();
        assert_eq!(not_learned, vec![hund(), hund()]);
    }

    #[test]
    fn test_correct_answer_clears_not_learned_entries() {
        let (mut session, _temp) = create_test_session(vec![hund()]);
        let katze = Card::new("Katze", "cat");
        storage::write_all(&session.files().not_learned, &[hund(), katze.clone(), hund()]).unwrap();

        session.begin();
        session.mark_right().unwrap();

        assert_eq!(session.streak(&hund()), Some(1));
        let not_learned = storage::load(&session.files().not_learned).unwrap();
        assert_eq!(not_learned, vec![katze]);
    }

    #[test]
    fn test_promotion_removes_every_copy() {
        let katze = Card::new("Katze", "cat");
        let (mut session, _temp) = create_test_session(vec![hund(), katze.clone(), hund()]);
        session.begin();

        for _ in 0..1000 {
            if session.current_card() != Some(&hund()) {
                session.mark_wrong().unwrap();
                continue;
            }
            session.mark_right().unwrap();
            if session.streak(&hund()) == Some(0) {
                break;
            }
        }

        assert_eq!(session.remaining(), 1);
        assert_eq!(session.current_card(), Some(&katze));
    }

    #[test]
    fn test_session_runs_until_all_cards_learned() {
        let cards = vec![
            Card::new("Hund", "dog"),
            Card::new("Katze", "cat"),
            Card::new("Maus", "mouse"),
        ];
        let (mut session, _temp) = create_test_session(cards.clone());

        let mut outcome = session.begin();
        let mut answers = 0;
        while outcome == DrawOutcome::Next && answers < 1000 {
            outcome = session.mark_right().unwrap();
            answers += 1;
        }

        assert_eq!(outcome, DrawOutcome::Completed);
        assert_eq!(answers, cards.len() * PROMOTION_STREAK as usize);

        let mut learned = storage::load(&session.files().learned).unwrap();
        learned.sort_by(|a, b| a.front.cmp(&b.front));
        assert_eq!(learned, cards);
        for card in &cards {
            assert_eq!(session.streak(card), Some(0));
        }
    }

    #[test]
    fn test_draws_reach_every_card() {
        let katze = Card::new("Katze", "cat");
        let (mut session, _temp) = create_test_session(vec![hund(), katze.clone()]);
        session.begin();

        let mut seen = std::collections::HashSet::new();
        for _ in 0..50 {
            seen.insert(session.current_card().cloned().unwrap());
            session.mark_wrong().unwrap();
        }

        assert!(seen.contains(&hund()));
        assert!(seen.contains(&katze));
    }

    #[test]
    fn test_marks_before_first_draw_only_draw() {
        let (mut session, _temp) = create_test_session(vec![hund()]);

        assert_eq!(session.mark_right().unwrap(), DrawOutcome::Next);
        assert_eq!(session.streak(&hund()), Some(0));
        assert!(!session.files().learned.exists());
        assert!(!session.files().not_learned.exists());
    }

    #[test]
    fn test_marks_after_exhaustion_do_nothing() {
        let (mut session, _temp) = create_test_session(Vec::new());
        session.begin();

        assert_eq!(session.mark_wrong().unwrap(), DrawOutcome::Completed);
        assert_eq!(session.mark_right().unwrap(), DrawOutcome::Completed);
        assert!(!session.files().not_learned.exists());
    }

    #[test]
    fn test_failed_write_leaves_session_unchanged() {
        let (mut session, _temp) = create_test_session(vec![hund()]);
        session.begin();
        session.mark_right().unwrap();
        session.flip();

        // A directory where the file should be makes every write fail
        fs::create_dir(&session.files().not_learned).unwrap();

        assert!(session.mark_wrong().is_err());
        assert_eq!(session.streak(&hund()), Some(1));
        assert_eq!(session.remaining(), 1);
        assert_eq!(session.state(), SessionState::ShowingBack);
    }

    #[test]
    fn test_retry_after_failed_cleanup_learns_card_once() {
        let (mut session, _temp) = create_test_session(vec![hund()]);
        session.begin();
        session.mark_right().unwrap();
        session.mark_right().unwrap();

        let not_learned = session.files().not_learned.clone();
        fs::create_dir(&not_learned).unwrap();

        assert!(session.mark_right().is_err());
        assert_eq!(session.streak(&hund()), Some(2));
        assert_eq!(session.remaining(), 1);
        assert!(!session.files().learned.exists());

        fs::remove_dir(&not_learned).unwrap();
        assert_eq!(session.mark_right().unwrap(), DrawOutcome::Completed);

        let learned = storage::load(&session.files().learned).unwrap();
        assert_eq!(learned, vec![hund()]);
    }

    #[test]
    fn test_retry_after_failed_learned_append_learns_card_once() {
        let (mut session, _temp) = create_test_session(vec![hund()]);
        session.begin();
        session.mark_right().unwrap();
        session.mark_right().unwrap();

        let learned = session.files().learned.clone();
        fs::create_dir(&learned).unwrap();

        assert!(session.mark_right().is_err());
        assert_eq!(session.streak(&hund()), Some(2));
        assert_eq!(session.current_card(), Some(&hund()));

        fs::remove_dir(&learned).unwrap();
        assert_eq!(session.mark_right().unwrap(), DrawOutcome::Completed);
        assert_eq!(storage::load(&learned).unwrap(), vec![hund()]);
    }
}
