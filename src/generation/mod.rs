pub mod api;
pub mod prompts;
pub mod schema;

use reqwest::Client;
use serde::Deserialize;
use tracing::{
    error,
    info,
};

use self::{
    api::GeminiApi,
    prompts::{
        quiz_prompt,
        word_details_prompt,
        word_list_prompt,
        WORD_DETAILS_SYSTEM,
        WORD_LIST_SYSTEM,
    },
};
use crate::core::{
    config::GenerationSettings,
    errors::GenerationCause,
    models::QUIZ_OPTION_COUNT,
    GenerationError,
    GenerationOperation,
    QuizQuestion,
    VocabularyEntry,
};

/// Word shape as the provider returns it, before an id is attached.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeneratedWord {
    term: String,
    definition: String,
    part_of_speech: String,
    example_sentence: String,
    #[serde(default)]
    pronunciation: Option<String>,
}

impl GeneratedWord {
    fn into_entry(self) -> Result<VocabularyEntry, GenerationCause> {
        for (field, value) in [
            ("term", &self.term),
            ("definition", &self.definition),
            ("partOfSpeech", &self.part_of_speech),
            ("exampleSentence", &self.example_sentence),
        ] {
            if value.trim().is_empty() {
                return Err(GenerationCause::Invalid(format!("empty {field}")));
            }
        }

        let pronunciation = self.pronunciation.filter(|p| !p.trim().is_empty());
        Ok(VocabularyEntry::new(
            self.term,
            self.definition,
            self.part_of_speech,
            self.example_sentence,
            pronunciation,
        ))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeneratedQuestion {
    question: String,
    options: Vec<String>,
    correct_answer_index: i64,
    explanation: String,
}

impl GeneratedQuestion {
    fn into_question(self) -> Result<QuizQuestion, GenerationCause> {
        if self.options.len() != QUIZ_OPTION_COUNT {
            return Err(GenerationCause::Invalid(format!(
                "question has {} options, expected {}",
                self.options.len(),
                QUIZ_OPTION_COUNT
            )));
        }
        if !(0..QUIZ_OPTION_COUNT as i64).contains(&self.correct_answer_index) {
            return Err(GenerationCause::Invalid(format!(
                "correctAnswerIndex {} out of range",
                self.correct_answer_index
            )));
        }

        Ok(QuizQuestion {
            question: self.question,
            options: self.options,
            correct_answer_index: self.correct_answer_index as usize,
            explanation: self.explanation,
        })
    }
}

/// Parses a word-list payload. Every word must be well formed or the whole list is rejected.
pub fn parse_word_list(text: &str) -> Result<Vec<VocabularyEntry>, GenerationCause> {
    let words: Vec<GeneratedWord> = serde_json::from_str(text)?;
    words.into_iter().map(GeneratedWord::into_entry).collect()
}

pub fn parse_word(text: &str) -> Result<VocabularyEntry, GenerationCause> {
    let word: GeneratedWord = serde_json::from_str(text)?;
    word.into_entry()
}

pub fn parse_quiz(text: &str) -> Result<Vec<QuizQuestion>, GenerationCause> {
    let questions: Vec<GeneratedQuestion> = serde_json::from_str(text)?;
    if questions.is_empty() {
        return Err(GenerationCause::Invalid("quiz contained no questions".to_string()));
    }
    questions.into_iter().map(GeneratedQuestion::into_question).collect()
}

#[derive(Clone)]
pub struct GenerationClient {
    api: GeminiApi,
    settings: GenerationSettings,
}

impl GenerationClient {
    pub fn new(client: Client, settings: GenerationSettings) -> Self {
        Self { api: GeminiApi::new(client, &settings), settings }
    }

    pub fn default_word_count(&self) -> u32 {
        self.settings.default_word_count
    }

    pub async fn generate_word_list(
        &self,
        topic: &str,
        count: Option<u32>,
    ) -> Result<Vec<VocabularyEntry>, GenerationError> {
        let count = count.unwrap_or(self.settings.default_word_count);
        let prompt = word_list_prompt(&self.settings, topic, count);

        let result = async {
            let text = self
                .api
                .generate_json(&prompt, Some(WORD_LIST_SYSTEM), schema::word_list_schema())
                .await?;
            parse_word_list(&text)
        }
        .await;

        let words = fail_with(GenerationOperation::WordList, result)?;
        info!(
            model = self.api.model(),
            topic,
            requested = count,
            received = words.len(),
            "generated word list"
        );
        Ok(words)
    }

    pub async fn generate_word_details(
        &self,
        term: &str,
    ) -> Result<VocabularyEntry, GenerationError> {
        let prompt = word_details_prompt(&self.settings, term);

        let result = async {
            let text = self
                .api
                .generate_json(&prompt, Some(WORD_DETAILS_SYSTEM), schema::word_schema())
                .await?;
            parse_word(&text)
        }
        .await;

        let word = fail_with(GenerationOperation::WordDetails, result)?;
        info!(model = self.api.model(), term, "generated word details");
        Ok(word)
    }

    /// Builds the quiz from at most the first ten entries.
    pub async fn generate_quiz(
        &self,
        entries: &[VocabularyEntry],
    ) -> Result<Vec<QuizQuestion>, GenerationError> {
        let prompt = quiz_prompt(entries);

        let result = async {
            let text = self.api.generate_json(&prompt, None, schema::quiz_schema()).await?;
            parse_quiz(&text)
        }
        .await;

        let questions = fail_with(GenerationOperation::Quiz, result)?;
        info!(model = self.api.model(), questions = questions.len(), "generated quiz");
        Ok(questions)
    }
}

fn fail_with<T>(
    operation: GenerationOperation,
    result: Result<T, GenerationCause>,
) -> Result<T, GenerationError> {
    result.map_err(|cause| {
        error!(?operation, error = %cause, "generation failed");
        GenerationError::new(operation, cause)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const WORD: &str = r#"{"term":"latte","definition":"拿鐵","partOfSpeech":"Noun","exampleSentence":"A latte, please.","pronunciation":"/ˈlɑːteɪ/"}"#;

    #[test]
    fn parsed_words_get_fresh_ids_and_not_learned() {
        let words = parse_word_list(&format!("[{WORD},{WORD}]")).unwrap();
        assert_eq!(words.len(), 2);
        assert_ne!(words[0].id, words[1].id);
        assert_eq!(words[0].learned, Some(false));
        assert_eq!(words[0].pronunciation.as_deref(), Some("/ˈlɑːteɪ/"));
    }

    #[test]
    fn one_malformed_word_rejects_the_list() {
        let missing = r#"{"term":"mocha","definition":"摩卡","partOfSpeech":"Noun"}"#;
        let err = parse_word_list(&format!("[{WORD},{missing}]")).unwrap_err();
        assert!(matches!(err, GenerationCause::Parse(_)));

        let blank = r#"{"term":" ","definition":"摩卡","partOfSpeech":"Noun","exampleSentence":"x"}"#;
        let err = parse_word_list(&format!("[{blank}]")).unwrap_err();
        assert!(matches!(err, GenerationCause::Invalid(_)));
    }

    #[test]
    fn blank_pronunciation_is_dropped() {
        let word = parse_word(
            r#"{"term":"scone","definition":"司康","partOfSpeech":"Noun","exampleSentence":"A warm scone.","pronunciation":""}"#,
        )
        .unwrap();
        assert_eq!(word.pronunciation, None);
    }

    #[test]
    fn quiz_requires_four_options_and_valid_index() {
        let ok = r#"[{"question":"Q","options":["a","b","c","d"],"correctAnswerIndex":3,"explanation":"e"}]"#;
        let questions = parse_quiz(ok).unwrap();
        assert_eq!(questions[0].correct_answer_index, 3);

        let three = r#"[{"question":"Q","options":["a","b","c"],"correctAnswerIndex":0,"explanation":"e"}]"#;
        assert!(matches!(parse_quiz(three), Err(GenerationCause::Invalid(_))));

        let out_of_range = r#"[{"question":"Q","options":["a","b","c","d"],"correctAnswerIndex":4,"explanation":"e"}]"#;
        assert!(matches!(parse_quiz(out_of_range), Err(GenerationCause::Invalid(_))));

        let negative = r#"[{"question":"Q","options":["a","b","c","d"],"correctAnswerIndex":-1,"explanation":"e"}]"#;
        assert!(matches!(parse_quiz(negative), Err(GenerationCause::Invalid(_))));

        assert!(matches!(parse_quiz("[]"), Err(GenerationCause::Invalid(_))));
    }

    #[tokio::test]
    async fn missing_api_key_fails_without_request() {
        let client = GenerationClient::new(Client::new(), GenerationSettings::default());
        let err = client.generate_word_list("Movies", None).await.unwrap_err();
        assert_eq!(err.operation, GenerationOperation::WordList);
        assert!(matches!(err.cause, GenerationCause::NotConfigured));
    }
}
