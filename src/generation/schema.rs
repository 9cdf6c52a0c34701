use serde_json::{
    json,
    Value,
};

pub fn word_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "term": { "type": "STRING" },
            "definition": { "type": "STRING" },
            "partOfSpeech": { "type": "STRING" },
            "exampleSentence": { "type": "STRING" },
            "pronunciation": {
                "type": "STRING",
                "description": "IPA pronunciation or phonetic spelling"
            }
        },
        "required": ["term", "definition", "partOfSpeech", "exampleSentence"]
    })
}

pub fn word_list_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": word_schema()
    })
}

pub fn quiz_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "question": { "type": "STRING" },
                "options": {
                    "type": "ARRAY",
                    "items": { "type": "STRING" },
                    "description": "4 multiple choice options"
                },
                "correctAnswerIndex": {
                    "type": "INTEGER",
                    "description": "0-3 index of correct option"
                },
                "explanation": { "type": "STRING" }
            },
            "required": ["question", "options", "correctAnswerIndex", "explanation"]
        }
    })
}
