use crate::core::{
    GenerationError,
    QuizQuestion,
    VocabularyEntry,
};

pub const MIN_QUIZ_WORDS: usize = 3;
pub const TOO_FEW_WORDS: &str = "Need at least 3 words to generate a quiz.";
pub const LOAD_FAILED: &str = "Failed to load quiz. Please try again later.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizPhase {
    Loading,
    Error(String),
    Active,
    Finished,
}

/// Reported once when the last question is passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizOutcome {
    pub score: u32,
    pub total: u32,
}

impl QuizOutcome {
    pub fn percentage(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        ((self.score as f64 / self.total as f64) * 100.0).round() as u32
    }
}

#[derive(Debug, Clone)]
pub struct QuizSession {
    phase: QuizPhase,
    questions: Vec<QuizQuestion>,
    current: usize,
    selected: Option<usize>,
    score: u32,
}

impl QuizSession {
    /// `Loading` means the caller should now request questions for `entries`.
    /// With too few entries the session starts in the error state instead.
    pub fn start(entries: &[VocabularyEntry]) -> Self {
        let phase = if entries.len() < MIN_QUIZ_WORDS {
            QuizPhase::Error(TOO_FEW_WORDS.to_string())
        } else {
            QuizPhase::Loading
        };
        Self { phase, questions: Vec::new(), current: 0, selected: None, score: 0 }
    }

    pub fn phase(&self) -> &QuizPhase {
        &self.phase
    }

    pub fn needs_questions(&self) -> bool {
        self.phase == QuizPhase::Loading
    }

    pub fn on_questions(&mut self, result: Result<Vec<QuizQuestion>, GenerationError>) {
        if self.phase != QuizPhase::Loading {
            return;
        }
        match result {
            Ok(questions) if !questions.is_empty() => {
                self.questions = questions;
                self.current = 0;
                self.selected = None;
                self.score = 0;
                self.phase = QuizPhase::Active;
            }
            _ => self.phase = QuizPhase::Error(LOAD_FAILED.to_string()),
        }
    }

    pub fn question(&self) -> Option<&QuizQuestion> {
        match self.phase {
            QuizPhase::Active => self.questions.get(self.current),
            _ => None,
        }
    }

    pub fn question_number(&self) -> usize {
        self.current + 1
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Only the first selection on a question counts. Returns whether it was accepted.
    pub fn select(&mut self, option: usize) -> bool {
        if self.selected.is_some() {
            return false;
        }
        let Some(question) = self.question() else {
            return false;
        };
        if option >= question.options.len() {
            return false;
        }

        if question.is_correct(option) {
            self.score += 1;
        }
        self.selected = Some(option);
        true
    }

    /// Moves on once the current question is answered. On the last question the
    /// session finishes and returns the final score.
    pub fn advance(&mut self) -> Option<QuizOutcome> {
        if self.phase != QuizPhase::Active || self.selected.is_none() {
            return None;
        }
        if self.current + 1 < self.questions.len() {
            self.current += 1;
            self.selected = None;
            return None;
        }

        self.phase = QuizPhase::Finished;
        self.selected = None;
        Some(self.outcome())
    }

    pub fn outcome(&self) -> QuizOutcome {
        QuizOutcome { score: self.score, total: self.questions.len() as u32 }
    }

    /// (correct, incorrect) for the finished chart.
    pub fn breakdown(&self) -> (u32, u32) {
        let total = self.questions.len() as u32;
        (self.score, total.saturating_sub(self.score))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{
        errors::GenerationCause,
        GenerationOperation,
    };

    fn entries(n: usize) -> Vec<VocabularyEntry> {
        (0..n).map(|i| VocabularyEntry::new(format!("w{i}"), "d", "noun", "e", None)).collect()
    }

    fn question(correct: usize) -> QuizQuestion {
        QuizQuestion {
            question: "Pick one".to_string(),
            options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
            correct_answer_index: correct,
            explanation: "because".to_string(),
        }
    }

    fn active(questions: Vec<QuizQuestion>) -> QuizSession {
        let mut session = QuizSession::start(&entries(3));
        session.on_questions(Ok(questions));
        assert_eq!(session.phase(), &QuizPhase::Active);
        session
    }

    #[test]
    fn too_few_words_never_loads() {
        for n in 0..MIN_QUIZ_WORDS {
            let session = QuizSession::start(&entries(n));
            assert_eq!(session.phase(), &QuizPhase::Error(TOO_FEW_WORDS.to_string()));
            assert!(!session.needs_questions());
        }
        assert!(QuizSession::start(&entries(3)).needs_questions());
    }

    #[test]
    fn generation_failure_shows_fixed_message() {
        let mut session = QuizSession::start(&entries(4));
        session.on_questions(Err(GenerationError::new(
            GenerationOperation::Quiz,
            GenerationCause::EmptyResponse,
        )));
        assert_eq!(session.phase(), &QuizPhase::Error(LOAD_FAILED.to_string()));

        let mut empty = QuizSession::start(&entries(4));
        empty.on_questions(Ok(Vec::new()));
        assert_eq!(empty.phase(), &QuizPhase::Error(LOAD_FAILED.to_string()));
    }

    #[test]
    fn only_first_selection_scores() {
        let mut session = active(vec![question(1), question(2)]);
        assert!(session.select(0));
        assert!(!session.select(1));
        assert_eq!(session.score(), 0);
        assert_eq!(session.selected(), Some(0));

        assert_eq!(session.advance(), None);
        assert_eq!(session.selected(), None);
        assert!(session.select(2));
        assert!(!session.select(2));
        assert_eq!(session.score(), 1);
    }

    #[test]
    fn advance_requires_answer() {
        let mut session = active(vec![question(0), question(0)]);
        assert_eq!(session.advance(), None);
        assert_eq!(session.question_number(), 1);
    }

    #[test]
    fn last_question_reports_running_score() {
        let mut session = active(vec![question(0), question(1), question(2)]);
        session.select(0);
        session.advance();
        session.select(3);
        session.advance();
        session.select(2);

        let outcome = session.advance().unwrap();
        assert_eq!(outcome, QuizOutcome { score: 2, total: 3 });
        assert_eq!(outcome.percentage(), 67);
        assert_eq!(session.phase(), &QuizPhase::Finished);
        assert_eq!(session.breakdown(), (2, 1));
        assert!(session.question().is_none());
        assert_eq!(session.advance(), None);
    }

    #[test]
    fn out_of_range_option_is_ignored() {
        let mut session = active(vec![question(0)]);
        assert!(!session.select(4));
        assert_eq!(session.selected(), None);
    }
}
