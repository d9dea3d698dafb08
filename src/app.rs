use url::Url;

use crate::authoring::{
    FormError, GenerationError, GenerationRequest, GeneratorForm, ManualField, ManualForm,
};
use crate::collection::QuizCollection;
use crate::models::{Question, View};
use crate::protocol::share_link;
use crate::runner::QuizRunner;
use crate::share::ShareDialog;

/// Field that receives typing on the create screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Manual(ManualField),
    Topic,
    Count,
    Difficulty,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Manual(field) => field.next().map_or(Focus::Topic, Focus::Manual),
            Focus::Topic => Focus::Count,
            Focus::Count => Focus::Difficulty,
            Focus::Difficulty => Focus::Manual(ManualField::Text),
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Focus::Manual(ManualField::Text) => Focus::Difficulty,
            Focus::Manual(field) => field.previous().map_or(Focus::Difficulty, Focus::Manual),
            Focus::Topic => Focus::Manual(ManualField::Option(3)),
            Focus::Count => Focus::Topic,
            Focus::Difficulty => Focus::Count,
        }
    }
}

/// Whole application state. Views read it and input handlers mutate it
/// through these methods only.
pub struct App {
    pub view: View,
    pub focus: Focus,
    pub should_quit: bool,
    collection: QuizCollection,
    title: String,
    manual: ManualForm,
    generator: GeneratorForm,
    share: Option<ShareDialog>,
    runner: Option<QuizRunner>,
    selected: usize,
    confirm_clear: bool,
    status: Option<String>,
    base_url: Url,
    copied_link: Option<String>,
    result_scroll: usize,
}

impl App {
    pub fn new(base_url: Url) -> Self {
        Self {
            view: View::Create,
            focus: Focus::Manual(ManualField::Text),
            should_quit: false,
            collection: QuizCollection::new(),
            title: String::new(),
            manual: ManualForm::new(),
            generator: GeneratorForm::default(),
            share: None,
            runner: None,
            selected: 0,
            confirm_clear: false,
            status: None,
            base_url,
            copied_link: None,
            result_scroll: 0,
        }
    }

    pub fn with_questions(base_url: Url, questions: Vec<Question>) -> Self {
        let mut app = Self::new(base_url);
        app.load_questions(questions);
        app
    }

    pub fn collection(&self) -> &QuizCollection {
        &self.collection
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn manual(&self) -> &ManualForm {
        &self.manual
    }

    pub fn manual_mut(&mut self) -> &mut ManualForm {
        &mut self.manual
    }

    pub fn generator(&self) -> &GeneratorForm {
        &self.generator
    }

    pub fn generator_mut(&mut self) -> &mut GeneratorForm {
        &mut self.generator
    }

    pub fn share(&self) -> Option<&ShareDialog> {
        self.share.as_ref()
    }

    pub fn runner(&self) -> Option<&QuizRunner> {
        self.runner.as_ref()
    }

    pub fn runner_mut(&mut self) -> Option<&mut QuizRunner> {
        self.runner.as_mut()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn is_confirming_clear(&self) -> bool {
        self.confirm_clear
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = Some(status.into());
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    /// Last link the user copied out of the share dialog.
    pub fn copied_link(&self) -> Option<&str> {
        self.copied_link.as_deref()
    }

    pub fn result_scroll(&self) -> usize {
        self.result_scroll
    }

    /// Preload a question list (e.g. from a file) and show it for review.
    pub fn load_questions(&mut self, questions: Vec<Question>) {
        self.collection.extend(questions);
        if !self.collection.is_empty() {
            self.view = View::Preview;
        }
    }

    /// Load a quiz from a share link and go straight to taking it.
    ///
    /// Returns false (and changes nothing) when the link holds no quiz.
    pub fn open_shared_link(&mut self, url: &Url) -> bool {
        let Some(shared) = share_link::decode(url) else {
            return false;
        };
        if shared.questions.is_empty() {
            return false;
        }

        tracing::info!(
            questions = shared.questions.len(),
            slug = shared.slug.as_deref().unwrap_or(""),
            "opened shared quiz"
        );
        self.collection.replace(shared.questions);
        if let Some(slug) = shared.slug {
            self.title = slug;
        }
        self.selected = 0;
        self.start_quiz()
    }

    pub fn switch_view(&mut self, view: View) {
        if self.view == View::Take || self.share.is_some() {
            return;
        }
        self.view = view;
        self.confirm_clear = false;
    }

    pub fn submit_manual(&mut self) -> Result<(), FormError> {
        match self.manual.submit() {
            Ok(question) => {
                self.collection.push(question);
                self.focus = Focus::Manual(ManualField::Text);
                self.set_status("Question added to the quiz");
                Ok(())
            }
            Err(err) => {
                self.set_status(err.to_string());
                Err(err)
            }
        }
    }

    pub fn begin_generation(&mut self) -> Option<GenerationRequest> {
        let request = self.generator.begin()?;
        self.set_status("Generating questions...");
        Some(request)
    }

    pub fn finish_generation(&mut self, result: Result<Vec<Question>, GenerationError>) {
        match self.generator.complete(result) {
            Some(questions) => {
                let count = questions.len();
                self.collection.extend(questions);
                self.set_status(format!("Added {count} generated questions"));
            }
            None => self.clear_status(),
        }
    }

    pub fn select_next(&mut self) {
        if !self.collection.is_empty() {
            self.selected = (self.selected + 1).min(self.collection.len() - 1);
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn remove_selected(&mut self) {
        let Some(id) = self.collection.get(self.selected).map(|q| q.id) else {
            return;
        };
        self.collection.remove(id);
        self.selected = self.selected.min(self.collection.len().saturating_sub(1));
    }

    /// First step of clearing; the caller must confirm.
    pub fn request_clear(&mut self) {
        if !self.collection.is_empty() {
            self.confirm_clear = true;
        }
    }

    pub fn confirm_clear(&mut self) {
        if !self.confirm_clear {
            return;
        }
        self.collection.clear();
        self.title.clear();
        self.selected = 0;
        self.confirm_clear = false;
        self.set_status("All questions deleted");
    }

    pub fn cancel_clear(&mut self) {
        self.confirm_clear = false;
    }

    pub fn open_share(&mut self) {
        if self.collection.is_empty() || self.view == View::Take {
            return;
        }
        self.share = Some(ShareDialog::open(
            self.collection.as_slice(),
            &self.title,
            &self.base_url,
        ));
    }

    /// Close the dialog; its label becomes the quiz title.
    pub fn close_share(&mut self) {
        if let Some(dialog) = self.share.take() {
            self.title = dialog.slug().trim().to_string();
        }
    }

    pub fn push_slug_char(&mut self, c: char) {
        if let Some(dialog) = self.share.as_mut() {
            dialog.push_slug_char(c, self.collection.as_slice(), &self.base_url);
        }
    }

    pub fn pop_slug_char(&mut self) {
        if let Some(dialog) = self.share.as_mut() {
            dialog.pop_slug_char(self.collection.as_slice(), &self.base_url);
        }
    }

    pub fn copy_link(&mut self) {
        if let Some(dialog) = self.share.as_mut() {
            let link = dialog.copy().to_string();
            tracing::info!(bytes = link.len(), "share link copied");
            self.copied_link = Some(link);
        }
    }

    pub fn start_quiz(&mut self) -> bool {
        let Some(runner) = QuizRunner::new(self.collection.as_slice().to_vec()) else {
            return false;
        };
        self.runner = Some(runner);
        self.share = None;
        self.confirm_clear = false;
        self.result_scroll = 0;
        self.view = View::Take;
        true
    }

    pub fn exit_quiz(&mut self) {
        self.runner = None;
        self.view = View::Preview;
    }

    pub fn restart_quiz(&mut self) {
        if let Some(runner) = self.runner.as_mut() {
            runner.reset();
            self.result_scroll = 0;
        }
    }

    pub fn scroll_results_down(&mut self) {
        let max_scroll = self.collection.len().saturating_sub(1);
        self.result_scroll = (self.result_scroll + 1).min(max_scroll);
    }

    pub fn scroll_results_up(&mut self) {
        self.result_scroll = self.result_scroll.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::authoring::{QuestionGenerator, GENERATION_FAILED_MESSAGE};

    struct StubGenerator {
        fail: bool,
    }

    #[async_trait]
    impl QuestionGenerator for StubGenerator {
        async fn generate(
            &self,
            request: &GenerationRequest,
        ) -> Result<Vec<Question>, GenerationError> {
            if self.fail {
                return Err(GenerationError::EmptyResponse);
            }
            Ok((0..request.count)
                .map(|i| {
                    Question::new(
                        format!("{} #{i}", request.topic),
                        ["a", "b", "c", "d"].map(String::from),
                        0,
                    )
                    .unwrap()
                })
                .collect())
        }
    }

    fn base() -> Url {
        Url::parse("https://quiz.example.com/").unwrap()
    }

    fn question(text: &str) -> Question {
        Question::new(text, ["a", "b", "c", "d"].map(String::from), 2).unwrap()
    }

    #[test]
    fn test_manual_submit_appends() {
        let mut app = App::new(base());
        let form = app.manual_mut();
        form.text = "2+2?".to_string();
        form.options = ["3", "4", "5", "6"].map(String::from);
        form.set_correct(1);

        assert!(app.submit_manual().is_ok());
        assert_eq!(app.collection().len(), 1);
        assert_eq!(app.manual(), &ManualForm::default());
    }

    #[test]
    fn test_incomplete_manual_submit_is_blocked() {
        let mut app = App::new(base());
        app.manual_mut().text = "2+2?".to_string();
        app.manual_mut().options = ["3", "4", "", "6"].map(String::from);
        let before = app.manual().clone();

        assert_eq!(app.submit_manual(), Err(FormError::Incomplete));
        assert!(app.collection().is_empty());
        assert_eq!(app.manual(), &before);
        assert_eq!(app.status(), Some("Please fill in all fields"));
    }

    #[tokio::test]
    async fn test_generation_appends_all_questions() {
        let mut app = App::new(base());
        app.collection.push(question("existing"));
        app.generator_mut().topic = "volcanoes".to_string();

        let request = app.begin_generation().unwrap();
        assert!(app.generator().is_loading());
        assert!(app.begin_generation().is_none());

        let result = StubGenerator { fail: false }.generate(&request).await;
        app.finish_generation(result);

        assert!(!app.generator().is_loading());
        assert_eq!(app.collection().len(), 6);
        assert_eq!(app.collection().get(1).unwrap().text, "volcanoes #0");
    }

    #[tokio::test]
    async fn test_generation_failure_keeps_collection() {
        let mut app = App::new(base());
        app.generator_mut().topic = "volcanoes".to_string();

        let request = app.begin_generation().unwrap();
        let result = StubGenerator { fail: true }.generate(&request).await;
        app.finish_generation(result);

        assert!(app.collection().is_empty());
        assert_eq!(app.generator().error(), Some(GENERATION_FAILED_MESSAGE));
        assert!(app.generator().can_generate());
    }

    #[test]
    fn test_remove_selected_and_clamp() {
        let mut app = App::with_questions(base(), vec![question("one"), question("two")]);
        assert_eq!(app.view, View::Preview);

        app.select_next();
        app.select_next();
        assert_eq!(app.selected(), 1);
        app.remove_selected();
        assert_eq!(app.selected(), 0);
        assert_eq!(app.collection().get(0).unwrap().text, "one");
    }

    #[test]
    fn test_clear_needs_confirmation() {
        let mut app = App::with_questions(base(), vec![question("one")]);
        app.confirm_clear();
        assert_eq!(app.collection().len(), 1);

        app.request_clear();
        app.cancel_clear();
        app.confirm_clear();
        assert_eq!(app.collection().len(), 1);

        app.request_clear();
        assert!(app.is_confirming_clear());
        app.confirm_clear();
        assert!(app.collection().is_empty());
        assert_eq!(app.title(), "");
    }

    #[test]
    fn test_share_round_trip_through_app() {
        let mut sender = App::with_questions(base(), vec![question("one"), question("two")]);
        sender.open_share();
        for c in "demo".chars() {
            sender.push_slug_char(c);
        }
        sender.copy_link();
        let link = sender.copied_link().unwrap().to_string();
        sender.close_share();
        assert_eq!(sender.title(), "demo");

        let mut receiver = App::new(base());
        assert!(receiver.open_shared_link(&Url::parse(&link).unwrap()));
        assert_eq!(receiver.view, View::Take);
        assert_eq!(receiver.title(), "demo");
        assert_eq!(receiver.collection().len(), 2);
        assert_ne!(
            receiver.collection().get(0).unwrap().id,
            sender.collection().get(0).unwrap().id
        );
        assert!(receiver.runner().is_some());
    }

    #[test]
    fn test_link_without_quiz_changes_nothing() {
        let mut app = App::new(base());
        assert!(!app.open_shared_link(&Url::parse("https://quiz.example.com/?q=%%%").unwrap()));
        assert!(!app.open_shared_link(&base()));
        assert_eq!(app.view, View::Create);
        assert!(app.collection().is_empty());
    }

    #[test]
    fn test_share_and_quiz_need_questions() {
        let mut app = App::new(base());
        app.open_share();
        assert!(app.share().is_none());
        assert!(!app.start_quiz());
        assert_eq!(app.view, View::Create);
    }

    #[test]
    fn test_quiz_lifecycle() {
        let mut app = App::with_questions(base(), vec![question("only")]);
        assert!(app.start_quiz());

        let runner = app.runner_mut().unwrap();
        runner.select_option(2);
        assert_eq!(runner.finish().unwrap().percentage, 100);

        app.restart_quiz();
        assert!(!app.runner().unwrap().is_finished());

        app.exit_quiz();
        assert!(app.runner().is_none());
        assert_eq!(app.view, View::Preview);
    }

    #[test]
    fn test_focus_cycle_covers_every_field() {
        let start = Focus::Manual(ManualField::Text);
        let mut focus = start;
        let mut steps = 0;
        loop {
            let next = focus.next();
            assert_eq!(next.previous(), focus);
            focus = next;
            steps += 1;
            if focus == start {
                break;
            }
        }
        assert_eq!(steps, 8);
    }
}
