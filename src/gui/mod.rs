pub mod app;
pub mod backup_panel;
pub mod dashboard;
pub mod error_modal;
pub mod flashcards;
pub mod generator;
pub mod message_overlay;
pub mod quiz;
pub mod theme;
pub mod top_bar;
pub mod word_list;

pub use app::LinguaApp;
