use chrono::{
    DateTime,
    Utc,
};
use serde::{
    Deserialize,
    Serialize,
};
use uuid::Uuid;

pub const QUIZ_OPTION_COUNT: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyEntry {
    pub id: String,                       // Client generated, the only unique key
    pub term: String,                     // Word in the language being studied
    pub definition: String,               // Definition in the definition language
    pub part_of_speech: String,
    pub example_sentence: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pronunciation: Option<String>,    // IPA or phonetic spelling
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub learned: Option<bool>,
}

impl VocabularyEntry {
    pub fn new(
        term: impl Into<String>,
        definition: impl Into<String>,
        part_of_speech: impl Into<String>,
        example_sentence: impl Into<String>,
        pronunciation: Option<String>,
    ) -> Self {
        Self {
            id: new_entry_id(),
            term: term.into(),
            definition: definition.into(),
            part_of_speech: part_of_speech.into(),
            example_sentence: example_sentence.into(),
            pronunciation,
            learned: Some(false),
        }
    }

    pub fn is_learned(&self) -> bool {
        self.learned.unwrap_or(false)
    }
}

pub fn new_entry_id() -> String {
    Uuid::new_v4().to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer_index: usize,
    pub explanation: String,
}

impl QuizQuestion {
    pub fn is_correct(&self, option: usize) -> bool {
        option == self.correct_answer_index
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppView {
    #[default]
    Dashboard,
    Study,
    Quiz,
    List,
    Generate,
}

impl AppView {
    pub const ALL: [AppView; 5] =
        [AppView::Dashboard, AppView::Study, AppView::Quiz, AppView::List, AppView::Generate];

    pub fn label(&self) -> &'static str {
        match self {
            AppView::Dashboard => "Dashboard",
            AppView::Study => "Flashcards",
            AppView::Quiz => "Quiz",
            AppView::List => "My Words",
            AppView::Generate => "Add Words",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyStats {
    pub date: String, // YYYY-MM-DD, local time
    pub words_learned: u32,
    pub words_reviewed: u32,
    pub quiz_correct: u32,
    pub quiz_total: u32,
}

impl DailyStats {
    pub fn for_date(date: impl Into<String>) -> Self {
        Self { date: date.into(), ..Default::default() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizScoreRecord {
    pub date: String,
    pub score: u32, // Percentage 0-100
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningStats {
    pub words_learned: u32,
    pub quiz_score_history: Vec<QuizScoreRecord>,
}

/// The whole collection as stored remotely. One snapshot replaces the previous one wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupSnapshot {
    pub words: Vec<VocabularyEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<LearningStats>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub daily_stats: Vec<DailyStats>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl BackupSnapshot {
    pub fn new(
        words: Vec<VocabularyEntry>,
        stats: Option<LearningStats>,
        daily_stats: Vec<DailyStats>,
    ) -> Self {
        Self { words, stats, daily_stats, timestamp: Some(Utc::now()) }
    }
}
