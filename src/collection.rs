//! The in-memory question collection.

use uuid::Uuid;

use crate::models::Question;

/// Ordered list of questions; insertion order is display and quiz order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizCollection {
    questions: Vec<Question>,
}

impl QuizCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_questions(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    pub fn push(&mut self, question: Question) {
        tracing::info!(id = %question.id, "question added");
        self.questions.push(question);
    }

    pub fn extend(&mut self, questions: impl IntoIterator<Item = Question>) {
        let before = self.questions.len();
        self.questions.extend(questions);
        tracing::info!(added = self.questions.len() - before, "questions added");
    }

    /// Remove the question with `id`. Unknown ids are ignored.
    pub fn remove(&mut self, id: Uuid) -> Option<Question> {
        let index = self.questions.iter().position(|q| q.id == id)?;
        tracing::info!(%id, "question removed");
        Some(self.questions.remove(index))
    }

    pub fn clear(&mut self) {
        tracing::info!(removed = self.questions.len(), "collection cleared");
        self.questions.clear();
    }

    /// Replace the whole collection, e.g. with a quiz loaded from a link.
    pub fn replace(&mut self, questions: Vec<Question>) {
        self.questions = questions;
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Question> {
        self.questions.iter()
    }

    pub fn as_slice(&self) -> &[Question] {
        &self.questions
    }
}

impl<'a> IntoIterator for &'a QuizCollection {
    type Item = &'a Question;
    type IntoIter = std::slice::Iter<'a, Question>;

    fn into_iter(self) -> Self::IntoIter {
        self.questions.iter()
    }
}
