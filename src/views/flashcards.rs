use std::{
    collections::HashSet,
    time::{
        Duration,
        Instant,
    },
};

use crate::core::VocabularyEntry;

/// Time the card needs to turn back to its front before the next one is shown.
pub const FLIP_BACK_DELAY: Duration = Duration::from_millis(200);

pub const EMPTY_MESSAGE: &str = "No words available to study.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CardFace {
    #[default]
    Front,
    Back,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardEvent {
    Reviewed(String),
    Learned(String),
    Speak(String), // Term to pronounce
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Next,
    Prev,
}

#[derive(Debug, Clone, Copy)]
struct PendingMove {
    step: Step,
    due: Instant,
}

#[derive(Debug, Default)]
pub struct FlashcardSession {
    index: usize,
    face: CardFace,
    reviewed: HashSet<String>,
    pending: Option<PendingMove>,
}

impl FlashcardSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn face(&self) -> CardFace {
        self.face
    }

    pub fn is_moving(&self) -> bool {
        self.pending.is_some()
    }

    pub fn current<'a>(&self, entries: &'a [VocabularyEntry]) -> Option<&'a VocabularyEntry> {
        if entries.is_empty() {
            return None;
        }
        entries.get(self.index.min(entries.len() - 1))
    }

    /// Toggles the face. The first time a card shows its back this session,
    /// a `Reviewed` event is returned for it.
    pub fn flip(&mut self, entries: &[VocabularyEntry]) -> Option<CardEvent> {
        let entry = self.current(entries)?;
        self.face = match self.face {
            CardFace::Front => CardFace::Back,
            CardFace::Back => CardFace::Front,
        };

        if self.face == CardFace::Back && self.reviewed.insert(entry.id.clone()) {
            return Some(CardEvent::Reviewed(entry.id.clone()));
        }
        None
    }

    pub fn next(&mut self, now: Instant) {
        self.schedule(Step::Next, now);
    }

    pub fn prev(&mut self, now: Instant) {
        self.schedule(Step::Prev, now);
    }

    fn schedule(&mut self, step: Step, now: Instant) {
        self.face = CardFace::Front;
        self.pending = Some(PendingMove { step, due: now + FLIP_BACK_DELAY });
    }

    /// Applies a scheduled move once its delay has passed. Returns true when the index changed.
    pub fn tick(&mut self, now: Instant, len: usize) -> bool {
        let Some(pending) = self.pending else {
            return false;
        };
        if now < pending.due {
            return false;
        }
        self.pending = None;
        if len == 0 {
            self.index = 0;
            return false;
        }

        let current = self.index.min(len - 1);
        self.index = match pending.step {
            Step::Next => (current + 1) % len,
            Step::Prev if current == 0 => len - 1,
            Step::Prev => current - 1,
        };
        true
    }

    /// Reported whatever face is showing. Does not move to another card.
    pub fn mark_learned(&self, entries: &[VocabularyEntry]) -> Option<CardEvent> {
        self.current(entries).map(|entry| CardEvent::Learned(entry.id.clone()))
    }

    /// Pronunciation is offered on the back face only.
    pub fn speak(&self, entries: &[VocabularyEntry]) -> Option<CardEvent> {
        if self.face != CardFace::Back {
            return None;
        }
        self.current(entries).map(|entry| CardEvent::Speak(entry.term.clone()))
    }

    pub fn has_reviewed(&self, id: &str) -> bool {
        self.reviewed.contains(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deck(n: usize) -> Vec<VocabularyEntry> {
        (0..n)
            .map(|i| VocabularyEntry::new(format!("word{i}"), "def", "noun", "An example.", None))
            .collect()
    }

    fn step_next(session: &mut FlashcardSession, len: usize) {
        let now = Instant::now();
        session.next(now);
        assert!(session.tick(now + FLIP_BACK_DELAY, len));
    }

    fn step_prev(session: &mut FlashcardSession, len: usize) {
        let now = Instant::now();
        session.prev(now);
        assert!(session.tick(now + FLIP_BACK_DELAY, len));
    }

    #[test]
    fn reviewed_is_reported_once_per_card() {
        let cards = deck(2);
        let mut session = FlashcardSession::new();

        assert_eq!(session.flip(&cards), Some(CardEvent::Reviewed(cards[0].id.clone())));
        assert_eq!(session.face(), CardFace::Back);
        assert_eq!(session.flip(&cards), None);
        assert_eq!(session.face(), CardFace::Front);
        assert_eq!(session.flip(&cards), None);
        assert!(session.has_reviewed(&cards[0].id));

        step_next(&mut session, cards.len());
        assert_eq!(session.flip(&cards), Some(CardEvent::Reviewed(cards[1].id.clone())));

        step_next(&mut session, cards.len());
        assert_eq!(session.flip(&cards), None);
    }

    #[test]
    fn navigation_wraps_both_ways() {
        let cards = deck(3);
        let mut session = FlashcardSession::new();

        step_prev(&mut session, cards.len());
        assert_eq!(session.index(), 2);
        step_next(&mut session, cards.len());
        assert_eq!(session.index(), 0);
    }

    #[test]
    fn move_waits_for_flip_back() {
        let cards = deck(3);
        let mut session = FlashcardSession::new();
        session.flip(&cards);

        let now = Instant::now();
        session.next(now);
        assert_eq!(session.face(), CardFace::Front);
        assert!(session.is_moving());
        assert!(!session.tick(now + Duration::from_millis(50), cards.len()));
        assert_eq!(session.index(), 0);

        assert!(session.tick(now + FLIP_BACK_DELAY, cards.len()));
        assert_eq!(session.index(), 1);
        assert!(!session.is_moving());
    }

    #[test]
    fn mark_learned_keeps_position_and_face() {
        let cards = deck(2);
        let mut session = FlashcardSession::new();
        session.flip(&cards);

        assert_eq!(session.mark_learned(&cards), Some(CardEvent::Learned(cards[0].id.clone())));
        assert_eq!(session.index(), 0);
        assert_eq!(session.face(), CardFace::Back);
    }

    #[test]
    fn speak_only_from_the_back() {
        let cards = deck(2);
        let mut session = FlashcardSession::new();
        assert_eq!(session.speak(&cards), None);

        session.flip(&cards);
        assert_eq!(session.speak(&cards), Some(CardEvent::Speak(cards[0].term.clone())));
        assert!(session.has_reviewed(&cards[0].id));
    }

    #[test]
    fn empty_deck_does_nothing() {
        let mut session = FlashcardSession::new();
        assert_eq!(session.flip(&[]), None);
        assert_eq!(session.mark_learned(&[]), None);

        let now = Instant::now();
        session.next(now);
        assert!(!session.tick(now + FLIP_BACK_DELAY, 0));
        assert_eq!(session.index(), 0);
    }

    #[test]
    fn index_is_clamped_after_deletion() {
        let cards = deck(3);
        let mut session = FlashcardSession::new();
        step_prev(&mut session, cards.len());

        let shorter = &cards[..1];
        assert_eq!(session.current(shorter).map(|e| &e.id), Some(&cards[0].id));
        step_next(&mut session, shorter.len());
        assert_eq!(session.index(), 0);
    }
}
