use tracing::info;

use super::{
    LinguaError,
    VocabularyEntry,
};
use crate::persistence::{
    JsonStore,
    WORDS_FILE,
};

/// The one owner of the entry list. Views borrow it and report mutations back here.
#[derive(Debug, Default, Clone)]
pub struct WordCollection {
    entries: Vec<VocabularyEntry>,
}

impl WordCollection {
    pub fn new(entries: Vec<VocabularyEntry>) -> Self {
        Self { entries }
    }

    pub fn load(store: &JsonStore) -> Self {
        let entries: Vec<VocabularyEntry> = store.load_or_default(WORDS_FILE);
        info!(count = entries.len(), "word collection loaded");
        Self { entries }
    }

    pub fn save(&self, store: &JsonStore) -> Result<(), LinguaError> {
        store.save(&self.entries, WORDS_FILE)
    }

    pub fn entries(&self) -> &[VocabularyEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&VocabularyEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn add(&mut self, new_entries: Vec<VocabularyEntry>) -> usize {
        let added = new_entries.len();
        self.entries.extend(new_entries);
        added
    }

    pub fn delete(&mut self, id: &str) -> Option<VocabularyEntry> {
        let pos = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(pos))
    }

    /// Flips the learned flag and returns the new value.
    pub fn toggle_learned(&mut self, id: &str) -> Option<bool> {
        let entry = self.entries.iter_mut().find(|e| e.id == id)?;
        let learned = !entry.is_learned();
        entry.learned = Some(learned);
        Some(learned)
    }

    pub fn replace_all(&mut self, entries: Vec<VocabularyEntry>) {
        self.entries = entries;
    }

    pub fn learned_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_learned()).count()
    }
}
