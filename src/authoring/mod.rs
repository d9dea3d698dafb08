//! Producers of new questions: the manual form and the AI generator.

pub mod generator;
pub mod manual;

pub use generator::{
    GeminiGenerator, GenerationError, GenerationRequest, GeneratorForm, QuestionGenerator,
    COUNT_CHOICES, GENERATION_FAILED_MESSAGE,
};
pub use manual::{FormError, ManualField, ManualForm};
