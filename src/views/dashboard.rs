use chrono::NaiveDate;

use crate::core::{
    models::QuizScoreRecord,
    DailyStats,
    StatsTracker,
    VocabularyEntry,
};

pub const ACTIVITY_DAYS: u32 = 7;
pub const RECENT_QUIZZES: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSummary {
    pub total_words: usize,
    pub learned_words: usize,
    pub today: DailyStats,
    pub activity: Vec<DailyStats>, // Oldest first
    pub recent_quizzes: Vec<QuizScoreRecord>, // Newest first
}

impl DashboardSummary {
    pub fn build(entries: &[VocabularyEntry], stats: &StatsTracker, today: NaiveDate) -> Self {
        Self {
            total_words: entries.len(),
            learned_words: entries.iter().filter(|e| e.is_learned()).count(),
            today: stats.day(today),
            activity: stats.recent(today, ACTIVITY_DAYS),
            recent_quizzes: stats
                .lifetime
                .quiz_score_history
                .iter()
                .rev()
                .take(RECENT_QUIZZES)
                .cloned()
                .collect(),
        }
    }

    /// Share of the collection marked learned, 0.0..=1.0.
    pub fn learned_ratio(&self) -> f32 {
        if self.total_words == 0 {
            0.0
        } else {
            self.learned_words as f32 / self.total_words as f32
        }
    }

    pub fn peak_activity(&self) -> u32 {
        self.activity.iter().map(|d| d.words_reviewed + d.words_learned).max().unwrap_or(0)
    }
}
