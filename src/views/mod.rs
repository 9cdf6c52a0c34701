pub mod dashboard;
pub mod flashcards;
pub mod generator;
pub mod quiz;
pub mod word_list;

pub use dashboard::DashboardSummary;
pub use flashcards::{
    CardEvent,
    CardFace,
    FlashcardSession,
};
pub use generator::{
    GenerateRequest,
    GeneratorForm,
    GeneratorMode,
};
pub use quiz::{
    QuizOutcome,
    QuizPhase,
    QuizSession,
};
pub use word_list::ListAction;
