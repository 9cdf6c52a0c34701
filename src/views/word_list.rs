use crate::core::VocabularyEntry;

pub const EMPTY_MESSAGE: &str = "Your list is empty. Try generating some words!";

/// What a list row asks its owner to do. The list itself holds nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListAction {
    Delete(String),
    ToggleLearned(String),
    Speak(String), // Term, not id
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListRow<'a> {
    pub entry: &'a VocabularyEntry,
    pub learned: bool,
}

pub fn rows(entries: &[VocabularyEntry]) -> Vec<ListRow<'_>> {
    entries.iter().map(|entry| ListRow { entry, learned: entry.is_learned() }).collect()
}

pub fn header(entries: &[VocabularyEntry]) -> String {
    format!("Your Collection ({})", entries.len())
}
