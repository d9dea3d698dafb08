use thiserror::Error;

use crate::models::{Question, QuestionError, NUM_OPTIONS};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Please fill in all fields")]
    Incomplete,
    #[error(transparent)]
    Question(#[from] QuestionError),
}

/// Editable fields of the manual form, in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManualField {
    Text,
    Option(usize),
}

impl ManualField {
    pub fn next(self) -> Option<Self> {
        match self {
            ManualField::Text => Some(ManualField::Option(0)),
            ManualField::Option(i) if i + 1 < NUM_OPTIONS => Some(ManualField::Option(i + 1)),
            ManualField::Option(_) => None,
        }
    }

    pub fn previous(self) -> Option<Self> {
        match self {
            ManualField::Text => None,
            ManualField::Option(0) => Some(ManualField::Text),
            ManualField::Option(i) => Some(ManualField::Option(i - 1)),
        }
    }
}

/// Manual question entry form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManualForm {
    pub text: String,
    pub options: [String; NUM_OPTIONS],
    pub correct_index: usize,
}

impl ManualForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field_mut(&mut self, field: ManualField) -> &mut String {
        match field {
            ManualField::Text => &mut self.text,
            ManualField::Option(i) => &mut self.options[i],
        }
    }

    pub fn field(&self, field: ManualField) -> &str {
        match field {
            ManualField::Text => &self.text,
            ManualField::Option(i) => &self.options[i],
        }
    }

    pub fn set_correct(&mut self, index: usize) {
        if index < NUM_OPTIONS {
            self.correct_index = index;
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.text.trim().is_empty() && self.options.iter().all(|opt| !opt.trim().is_empty())
    }

    /// Build a question from the form and reset it.
    ///
    /// An incomplete form is left exactly as it was.
    pub fn submit(&mut self) -> Result<Question, FormError> {
        if !self.is_complete() {
            return Err(FormError::Incomplete);
        }

        let question = Question::new(self.text.clone(), self.options.clone(), self.correct_index)?;
        *self = Self::default();
        Ok(question)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ManualForm {
        ManualForm {
            text: "2+2?".to_string(),
            options: ["3", "4", "5", "6"].map(String::from),
            correct_index: 1,
        }
    }

    #[test]
    fn test_submit_builds_question_and_resets() {
        let mut form = filled();
        let question = form.submit().unwrap();

        assert_eq!(question.text, "2+2?");
        assert_eq!(question.correct_answer, 1);
        assert_eq!(form, ManualForm::default());
        assert_eq!(form.correct_index, 0);
    }

    #[test]
    fn test_blank_option_blocks_submit_and_keeps_fields() {
        let mut form = filled();
        form.options[2] = "   ".to_string();
        let before = form.clone();

        assert_eq!(form.submit(), Err(FormError::Incomplete));
        assert_eq!(form, before);
    }

    #[test]
    fn test_blank_text_blocks_submit() {
        let mut form = filled();
        form.text = "\t".to_string();
        assert_eq!(form.submit(), Err(FormError::Incomplete));
    }

    #[test]
    fn test_each_submit_gets_a_fresh_id() {
        let mut form = filled();
        let first = form.submit().unwrap();
        form = filled();
        let second = form.submit().unwrap();
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn test_set_correct_ignores_out_of_range() {
        let mut form = ManualForm::new();
        form.set_correct(3);
        form.set_correct(4);
        assert_eq!(form.correct_index, 3);
    }

    #[test]
    fn test_field_focus_order() {
        assert_eq!(ManualField::Text.next(), Some(ManualField::Option(0)));
        assert_eq!(ManualField::Option(3).next(), None);
        assert_eq!(ManualField::Option(0).previous(), Some(ManualField::Text));
        assert_eq!(ManualField::Text.previous(), None);
    }
}
