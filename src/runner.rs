//! Quiz runner: steps through a fixed question list, records answers and
//! scores the attempt.

use std::collections::HashMap;

use uuid::Uuid;

use crate::models::{Question, NUM_OPTIONS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    InProgress { current: usize },
    Finished { score: Score },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub correct: usize,
    pub total: usize,
    /// `round(100 * correct / total)`.
    pub percentage: u32,
}

impl Score {
    pub fn new(correct: usize, total: usize) -> Self {
        let percentage = if total > 0 {
            ((correct as f64 / total as f64) * 100.0).round() as u32
        } else {
            0
        };

        Self {
            correct,
            total,
            percentage,
        }
    }

    pub fn grade(&self) -> Grade {
        Grade::from_percentage(self.percentage)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grade {
    Excellent,
    VeryGood,
    Good,
    TryAgain,
}

impl Grade {
    pub fn from_percentage(percentage: u32) -> Self {
        match percentage {
            90.. => Grade::Excellent,
            70..=89 => Grade::VeryGood,
            50..=69 => Grade::Good,
            _ => Grade::TryAgain,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Grade::Excellent => "Excellent!",
            Grade::VeryGood => "Very good!",
            Grade::Good => "Good",
            Grade::TryAgain => "Try again",
        }
    }

    pub fn is_pass(self) -> bool {
        !matches!(self, Grade::TryAgain)
    }
}

/// One row of the post-quiz review.
#[derive(Debug, Clone, Copy)]
pub struct ReviewItem<'a> {
    pub question: &'a Question,
    pub answer: Option<usize>,
}

impl ReviewItem<'_> {
    pub fn is_correct(&self) -> bool {
        self.answer.is_some_and(|answer| self.question.is_correct(answer))
    }
}

pub struct QuizRunner {
    questions: Vec<Question>,
    answers: HashMap<Uuid, usize>,
    phase: Phase,
    /// Option under the cursor; separate from the recorded answer.
    highlighted: usize,
}

impl QuizRunner {
    /// Start a run at the first question. There is nothing to run for an
    /// empty list.
    pub fn new(questions: Vec<Question>) -> Option<Self> {
        if questions.is_empty() {
            return None;
        }

        tracing::info!(questions = questions.len(), "quiz started");
        Some(Self {
            questions,
            answers: HashMap::new(),
            phase: Phase::InProgress { current: 0 },
            highlighted: 0,
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Finished { .. })
    }

    pub fn score(&self) -> Option<Score> {
        match self.phase {
            Phase::Finished { score } => Some(score),
            Phase::InProgress { .. } => None,
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    /// Index of the question on screen. Stays on the last question once
    /// finished.
    pub fn current_index(&self) -> usize {
        match self.phase {
            Phase::InProgress { current } => current,
            Phase::Finished { .. } => self.last_index(),
        }
    }

    pub fn current_question_number(&self) -> usize {
        self.current_index() + 1
    }

    pub fn current_question(&self) -> &Question {
        &self.questions[self.current_index()]
    }

    pub fn is_last_question(&self) -> bool {
        self.current_index() == self.last_index()
    }

    pub fn answer_for(&self, question: &Question) -> Option<usize> {
        self.answers.get(&question.id).copied()
    }

    pub fn current_answer(&self) -> Option<usize> {
        self.answer_for(self.current_question())
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    pub fn highlight_next(&mut self) {
        self.highlighted = (self.highlighted + 1) % NUM_OPTIONS;
    }

    pub fn highlight_previous(&mut self) {
        self.highlighted = (self.highlighted + NUM_OPTIONS - 1) % NUM_OPTIONS;
    }

    /// Record (or overwrite) the answer for the current question. Does not
    /// advance.
    pub fn select_option(&mut self, option: usize) -> bool {
        let Phase::InProgress { current } = self.phase else {
            return false;
        };
        if option >= NUM_OPTIONS {
            return false;
        }

        let id = self.questions[current].id;
        self.answers.insert(id, option);
        self.highlighted = option;
        true
    }

    pub fn select_highlighted(&mut self) -> bool {
        self.select_option(self.highlighted)
    }

    pub fn can_advance(&self) -> bool {
        match self.phase {
            Phase::InProgress { current } => {
                current < self.last_index() && self.answers.contains_key(&self.questions[current].id)
            }
            Phase::Finished { .. } => false,
        }
    }

    pub fn can_finish(&self) -> bool {
        match self.phase {
            Phase::InProgress { current } => {
                current == self.last_index()
                    && self.answers.contains_key(&self.questions[current].id)
            }
            Phase::Finished { .. } => false,
        }
    }

    /// Move forward one question. Blocked until the current one is answered.
    pub fn next(&mut self) -> bool {
        if !self.can_advance() {
            return false;
        }
        self.move_to(self.current_index() + 1);
        true
    }

    pub fn previous(&mut self) -> bool {
        match self.phase {
            Phase::InProgress { current } if current > 0 => {
                self.move_to(current - 1);
                true
            }
            _ => false,
        }
    }

    /// Score the run. Only possible on the last question once it has an
    /// answer.
    pub fn finish(&mut self) -> Option<Score> {
        if !self.can_finish() {
            return None;
        }

        let score = self.calculate_score();
        tracing::info!(
            correct = score.correct,
            total = score.total,
            percentage = score.percentage,
            "quiz finished"
        );
        self.phase = Phase::Finished { score };
        Some(score)
    }

    /// Clear all answers and start over from the first question.
    pub fn reset(&mut self) -> bool {
        if !self.is_finished() {
            return false;
        }

        self.answers.clear();
        self.highlighted = 0;
        self.phase = Phase::InProgress { current: 0 };
        tracing::info!("quiz restarted");
        true
    }

    /// Unanswered questions count as incorrect.
    pub fn calculate_score(&self) -> Score {
        let correct = self
            .questions
            .iter()
            .filter(|question| {
                self.answer_for(question)
                    .is_some_and(|answer| question.is_correct(answer))
            })
            .count();

        Score::new(correct, self.questions.len())
    }

    pub fn review(&self) -> Vec<ReviewItem<'_>> {
        self.questions
            .iter()
            .map(|question| ReviewItem {
                question,
                answer: self.answer_for(question),
            })
            .collect()
    }

    fn last_index(&self) -> usize {
        self.questions.len() - 1
    }

    fn move_to(&mut self, index: usize) {
        self.phase = Phase::InProgress { current: index };
        self.highlighted = self.current_answer().unwrap_or(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn questions(count: usize) -> Vec<Question> {
        (0..count)
            .map(|i| {
                Question::new(format!("q{i}"), ["a", "b", "c", "d"].map(String::from), i % 4)
                    .unwrap()
            })
            .collect()
    }

    fn answer_and_advance(runner: &mut QuizRunner, option: usize) {
        assert!(runner.select_option(option));
        if !runner.is_last_question() {
            assert!(runner.next());
        }
    }

    #[test]
    fn test_empty_list_has_no_runner() {
        assert!(QuizRunner::new(Vec::new()).is_none());
    }

    #[test]
    fn test_initial_state() {
        let runner = QuizRunner::new(questions(3)).unwrap();
        assert_eq!(runner.phase(), Phase::InProgress { current: 0 });
        assert_eq!(runner.answered_count(), 0);
        assert_eq!(runner.current_question_number(), 1);
    }

    #[test]
    fn test_next_blocked_until_answered() {
        let mut runner = QuizRunner::new(questions(3)).unwrap();

        assert!(!runner.next());
        assert_eq!(runner.current_index(), 0);

        assert!(runner.select_option(2));
        assert_eq!(runner.current_index(), 0);
        assert!(runner.next());
        assert_eq!(runner.current_index(), 1);
    }

    #[test]
    fn test_select_overwrites_answer() {
        let mut runner = QuizRunner::new(questions(2)).unwrap();
        runner.select_option(1);
        runner.select_option(3);
        assert_eq!(runner.current_answer(), Some(3));
        assert!(!runner.select_option(4));
        assert_eq!(runner.current_answer(), Some(3));
    }

    #[test]
    fn test_navigation_is_clamped() {
        let mut runner = QuizRunner::new(questions(2)).unwrap();
        assert!(!runner.previous());

        answer_and_advance(&mut runner, 0);
        runner.select_option(0);
        assert!(!runner.next());
        assert_eq!(runner.current_index(), 1);

        assert!(runner.previous());
        assert_eq!(runner.current_index(), 0);
        assert_eq!(runner.highlighted(), 0);
    }

    #[test]
    fn test_finish_requires_last_question_answered() {
        let mut runner = QuizRunner::new(questions(2)).unwrap();
        runner.select_option(0);
        assert_eq!(runner.finish(), None);

        runner.next();
        assert_eq!(runner.finish(), None);

        runner.select_option(1);
        assert_eq!(runner.score(), None);
        let score = runner.finish().unwrap();
        assert!(runner.is_finished());
        assert_eq!(runner.score(), Some(score));
        assert!(!runner.select_option(0));
        assert!(!runner.next());
        assert!(!runner.previous());
    }

    #[test]
    fn test_three_of_five_scores_sixty_percent() {
        let qs = questions(5);
        let picks: Vec<usize> = qs
            .iter()
            .enumerate()
            .map(|(i, q)| {
                if i < 3 {
                    q.correct_answer
                } else {
                    (q.correct_answer + 1) % 4
                }
            })
            .collect();

        let mut runner = QuizRunner::new(qs).unwrap();
        for pick in picks {
            answer_and_advance(&mut runner, pick);
        }

        let score = runner.finish().unwrap();
        assert_eq!(score.correct, 3);
        assert_eq!(score.total, 5);
        assert_eq!(score.percentage, 60);
        assert_eq!(score.grade(), Grade::Good);
        assert_eq!(runner.score(), Some(score));
    }

    #[test]
    fn test_percentage_rounds() {
        assert_eq!(Score::new(1, 3).percentage, 33);
        assert_eq!(Score::new(2, 3).percentage, 67);
        assert_eq!(Score::new(1, 8).percentage, 13);
        assert_eq!(Score::new(0, 0).percentage, 0);
    }

    #[test]
    fn test_review_marks_correctness() {
        let qs = questions(2);
        let mut runner = QuizRunner::new(qs.clone()).unwrap();
        answer_and_advance(&mut runner, qs[0].correct_answer);
        answer_and_advance(&mut runner, (qs[1].correct_answer + 1) % 4);
        runner.finish();

        let review = runner.review();
        assert!(review[0].is_correct());
        assert!(!review[1].is_correct());
        assert_eq!(review[1].answer, Some((qs[1].correct_answer + 1) % 4));
    }

    #[test]
    fn test_reset_only_from_finished() {
        let mut runner = QuizRunner::new(questions(1)).unwrap();
        assert!(!runner.reset());

        runner.select_option(0);
        runner.finish();
        assert!(runner.reset());
        assert_eq!(runner.phase(), Phase::InProgress { current: 0 });
        assert_eq!(runner.answered_count(), 0);
    }

    #[test]
    fn test_highlight_wraps() {
        let mut runner = QuizRunner::new(questions(1)).unwrap();
        runner.highlight_previous();
        assert_eq!(runner.highlighted(), 3);
        runner.highlight_next();
        assert_eq!(runner.highlighted(), 0);
        runner.highlight_next();
        assert!(runner.select_highlighted());
        assert_eq!(runner.current_answer(), Some(1));
    }

    #[test]
    fn test_grade_bands() {
        assert_eq!(Grade::from_percentage(100), Grade::Excellent);
        assert_eq!(Grade::from_percentage(90), Grade::Excellent);
        assert_eq!(Grade::from_percentage(70), Grade::VeryGood);
        assert_eq!(Grade::from_percentage(49), Grade::TryAgain);
        assert!(Grade::from_percentage(50).is_pass());
        assert!(!Grade::TryAgain.is_pass());
    }
}
