mod question;

pub use question::{Difficulty, Question, QuestionError, NUM_OPTIONS};

/// Which top-level screen the application is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Authoring: manual form and AI generator.
    #[default]
    Create,
    /// Review list of the current collection.
    Preview,
    /// Taking the quiz (including its result screen).
    Take,
}
