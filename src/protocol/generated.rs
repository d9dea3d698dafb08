//! Shape of the question list returned by the text-generation service.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::models::{Question, NUM_OPTIONS};

/// One entry as the generator returns it, before validation.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedQuestion {
    pub text: String,
    pub options: Vec<String>,
    #[serde(rename = "correctAnswerIndex")]
    pub correct_answer: usize,
}

impl GeneratedQuestion {
    /// Accept the entry only with exactly four options and an in-range index.
    pub fn into_question(self) -> Option<Question> {
        let options: [String; NUM_OPTIONS] = self.options.try_into().ok()?;
        Question::new(self.text, options, self.correct_answer).ok()
    }
}

/// JSON schema the generator is asked to follow.
pub fn response_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "text": {
                    "type": "STRING",
                    "description": "The question text",
                },
                "options": {
                    "type": "ARRAY",
                    "items": { "type": "STRING" },
                    "description": "Exactly 4 answer options",
                },
                "correctAnswerIndex": {
                    "type": "INTEGER",
                    "description": "Index of the correct option (0-3)",
                },
            },
            "required": ["text", "options", "correctAnswerIndex"],
        },
    })
}

/// Parse the raw generator text into questions with fresh ids.
///
/// The payload must be a JSON array; entries that do not validate are dropped
/// one by one instead of failing the batch.
pub fn parse_questions(raw: &str) -> Result<Vec<Question>, serde_json::Error> {
    let entries: Vec<Value> = serde_json::from_str(raw)?;
    let total = entries.len();

    let questions: Vec<Question> = entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            let question = serde_json::from_value::<GeneratedQuestion>(entry)
                .ok()
                .and_then(GeneratedQuestion::into_question);
            if question.is_none() {
                tracing::warn!(index, "dropping malformed generated question");
            }
            question
        })
        .collect();

    tracing::debug!(total, accepted = questions.len(), "parsed generated questions");
    Ok(questions)
}
