pub mod collection;
pub mod config;
pub mod errors;
pub mod http;
pub mod models;
pub mod stats;
pub mod tasks;

pub use collection::WordCollection;
pub use config::Settings;
pub use errors::{
    AuthError,
    GenerationError,
    GenerationOperation,
    LinguaError,
    StorageError,
};
pub use models::{
    AppView,
    BackupSnapshot,
    DailyStats,
    LearningStats,
    QuizQuestion,
    VocabularyEntry,
};
pub use stats::StatsTracker;
