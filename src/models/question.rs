use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Every question carries exactly this many options.
pub const NUM_OPTIONS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuestionError {
    #[error("correct answer index {0} is out of range (must be below {NUM_OPTIONS})")]
    AnswerOutOfRange(usize),
}

/// A single multiple-choice question.
///
/// The `id` is session-local: it is never written into share links and a
/// decoded link always gets fresh ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub text: String,
    pub options: [String; NUM_OPTIONS],
    #[serde(rename = "correctAnswerIndex")]
    pub correct_answer: usize,
}

impl Question {
    /// Build a question with a freshly generated id.
    pub fn new(
        text: impl Into<String>,
        options: [String; NUM_OPTIONS],
        correct_answer: usize,
    ) -> Result<Self, QuestionError> {
        if correct_answer >= NUM_OPTIONS {
            return Err(QuestionError::AnswerOutOfRange(correct_answer));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            text: text.into(),
            options,
            correct_answer,
        })
    }

    pub fn is_correct(&self, answer: usize) -> bool {
        self.correct_answer == answer
    }

    pub fn correct_option(&self) -> &str {
        &self.options[self.correct_answer]
    }
}

/// Difficulty passed to the question generator.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Hard,
            Difficulty::Medium => Difficulty::Easy,
            Difficulty::Hard => Difficulty::Medium,
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
