use crate::core::{
    config::GenerationSettings,
    VocabularyEntry,
};

pub const WORD_LIST_SYSTEM: &str = "You are an expert language tutor. Generate accurate, useful \
                                    vocabulary suitable for an intermediate learner.";
pub const WORD_DETAILS_SYSTEM: &str =
    "You are an expert dictionary assistant. Provide accurate definitions and natural examples.";

pub const QUIZ_QUESTION_COUNT: usize = 5;
pub const QUIZ_SOURCE_LIMIT: usize = 10;

pub fn word_list_prompt(settings: &GenerationSettings, topic: &str, count: u32) -> String {
    format!(
        "Generate a vocabulary list of {count} {study} words related to the topic: \"{topic}\". \
         Provide definitions in {definition} and example sentences in {study}.",
        study = settings.study_language,
        definition = settings.definition_language,
    )
}

pub fn word_details_prompt(settings: &GenerationSettings, term: &str) -> String {
    format!(
        "Provide detailed vocabulary information for the {study} word: \"{term}\".\n\
         1. Definition should be in {definition}.\n\
         2. Part of speech (e.g., Noun, Verb, Adjective).\n\
         3. A clear, simple example sentence in {study}.\n\
         4. IPA pronunciation.",
        study = settings.study_language,
        definition = settings.definition_language,
    )
}

/// Only the first `QUIZ_SOURCE_LIMIT` entries are sent.
pub fn quiz_prompt(entries: &[VocabularyEntry]) -> String {
    let word_list = entries
        .iter()
        .take(QUIZ_SOURCE_LIMIT)
        .map(|e| format!("{}: {}", e.term, e.definition))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Create a multiple-choice quiz based on these words: {word_list}. Create \
         {QUIZ_QUESTION_COUNT} questions. Questions can ask for definitions, synonyms, or \
         fill-in-the-blank."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiz_prompt_uses_first_ten_entries() {
        let entries: Vec<VocabularyEntry> = (0..12)
            .map(|i| VocabularyEntry::new(format!("word{i}"), format!("def{i}"), "Noun", "x", None))
            .collect();

        let prompt = quiz_prompt(&entries);
        assert!(prompt.contains("word0: def0, word1: def1"));
        assert!(prompt.contains("word9: def9"));
        assert!(!prompt.contains("word10"));
        assert!(prompt.contains("Create 5 questions"));
    }

    #[test]
    fn word_list_prompt_names_languages_and_count() {
        let settings = GenerationSettings::default();
        let prompt = word_list_prompt(&settings, "Coffee Shop", 5);
        assert!(prompt.contains("5 English words"));
        assert!(prompt.contains("\"Coffee Shop\""));
        assert!(prompt.contains("Traditional Chinese (Taiwan usage)"));
    }
}
