use chrono::{
    Duration,
    Local,
    NaiveDate,
};
use serde::{
    Deserialize,
    Serialize,
};

use super::{
    models::QuizScoreRecord,
    DailyStats,
    LearningStats,
    LinguaError,
};
use crate::persistence::{
    JsonStore,
    STATS_FILE,
};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsTracker {
    pub lifetime: LearningStats,
    pub daily: Vec<DailyStats>, // Oldest first
}

impl StatsTracker {
    pub fn load(store: &JsonStore) -> Self {
        store.load_or_default(STATS_FILE)
    }

    pub fn save(&self, store: &JsonStore) -> Result<(), LinguaError> {
        store.save(self, STATS_FILE)
    }

    pub fn record_review(&mut self, date: NaiveDate) {
        self.day_mut(date).words_reviewed += 1;
    }

    pub fn record_learned(&mut self, date: NaiveDate) {
        self.day_mut(date).words_learned += 1;
        self.lifetime.words_learned += 1;
    }

    /// Un-marking a word takes it back out of the totals.
    pub fn record_unlearned(&mut self, date: NaiveDate) {
        let day = self.day_mut(date);
        day.words_learned = day.words_learned.saturating_sub(1);
        self.lifetime.words_learned = self.lifetime.words_learned.saturating_sub(1);
    }

    pub fn record_quiz(&mut self, date: NaiveDate, score: u32, total: u32) {
        let day = self.day_mut(date);
        day.quiz_correct += score;
        day.quiz_total += total;

        let percentage = if total == 0 { 0 } else { (score * 100 + total / 2) / total };
        self.lifetime
            .quiz_score_history
            .push(QuizScoreRecord { date: format_date(date), score: percentage });
    }

    pub fn day(&self, date: NaiveDate) -> DailyStats {
        let key = format_date(date);
        self.daily
            .iter()
            .find(|d| d.date == key)
            .cloned()
            .unwrap_or_else(|| DailyStats::for_date(key))
    }

    pub fn today(&self) -> DailyStats {
        self.day(today())
    }

    /// The last `days` days ending at `end`, oldest first, zero-filled.
    pub fn recent(&self, end: NaiveDate, days: u32) -> Vec<DailyStats> {
        (0..days as i64)
            .rev()
            .map(|offset| self.day(end - Duration::days(offset)))
            .collect()
    }

    pub fn restore(&mut self, lifetime: Option<LearningStats>, daily: Vec<DailyStats>) {
        if let Some(lifetime) = lifetime {
            self.lifetime = lifetime;
        }
        if !daily.is_empty() {
            self.daily = daily;
        }
    }

    fn day_mut(&mut self, date: NaiveDate) -> &mut DailyStats {
        let key = format_date(date);
        match self.daily.iter().position(|d| d.date == key) {
            Some(pos) => &mut self.daily[pos],
            None => {
                self.daily.push(DailyStats::for_date(key));
                self.daily.sort_by(|a, b| a.date.cmp(&b.date));
                let pos = self
                    .daily
                    .iter()
                    .position(|d| d.date == format_date(date))
                    .unwrap_or(self.daily.len() - 1);
                &mut self.daily[pos]
            }
        }
    }
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
