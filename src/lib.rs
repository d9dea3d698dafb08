//! # quizlink
//!
//! Build multiple-choice quizzes by hand or with a text-generation service,
//! take them in the terminal, and share them as self-contained links.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use quizlink::{App, Config, GeminiGenerator, QuizError, Workbench};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), QuizError> {
//!     let config = Config::load(None)?;
//!     let generator = GeminiGenerator::new(&config.generator)?;
//!     let app = App::new(config.share_base_url()?);
//!
//!     let app = Workbench::new(app, Arc::new(generator)).run().await?;
//!     if let Some(link) = app.copied_link() {
//!         println!("{link}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! Share links can be produced and read without the TUI:
//!
//! ```rust
//! use quizlink::protocol::share_link;
//! use quizlink::Question;
//! use url::Url;
//!
//! let question = Question::new("2+2?", ["3", "4", "5", "6"].map(String::from), 1).unwrap();
//! let base = Url::parse("https://quiz.example.com/").unwrap();
//! let link = share_link::encode(&[question], Some("math"), &base);
//!
//! let shared = share_link::decode(&link).unwrap();
//! assert_eq!(shared.questions[0].text, "2+2?");
//! assert_eq!(shared.slug.as_deref(), Some("math"));
//! ```

pub mod app;
pub mod authoring;
pub mod collection;
pub mod config;
mod data;
pub mod input;
pub mod logging;
mod models;
pub mod protocol;
pub mod runner;
pub mod share;
pub mod terminal;
mod ui;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use thiserror::Error;
use tokio::sync::mpsc;

pub use app::App;
pub use authoring::{GeminiGenerator, GenerationError, QuestionGenerator};
pub use collection::QuizCollection;
pub use config::{Config, ConfigError};
pub use data::{load_questions_from_json, LoadError};
pub use models::{Difficulty, Question, QuestionError, View, NUM_OPTIONS};
pub use runner::{QuizRunner, Score};

use input::InputAction;

/// How long the event loop waits for a key before redrawing.
const TICK: Duration = Duration::from_millis(100);

/// Error type for quiz operations.
#[derive(Debug, Error)]
pub enum QuizError {
    #[error("Failed to load questions: {0}")]
    Load(#[from] LoadError),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

type GenerationResult = Result<Vec<Question>, GenerationError>;

/// The interactive quiz workbench: application state plus the generator it
/// calls out to.
pub struct Workbench {
    app: App,
    generator: Arc<dyn QuestionGenerator>,
}

impl Workbench {
    pub fn new(app: App, generator: Arc<dyn QuestionGenerator>) -> Self {
        Self { app, generator }
    }

    /// Get a reference to the underlying app.
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Get a mutable reference to the underlying app.
    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }

    /// Run the TUI until the user quits and hand back the final state.
    pub async fn run(mut self) -> Result<App, QuizError> {
        let mut guard = terminal::TerminalGuard::enter()?;
        run_event_loop(guard.terminal(), &mut self.app, &self.generator).await?;
        Ok(self.app)
    }
}

async fn run_event_loop(
    terminal: &mut terminal::AppTerminal,
    app: &mut App,
    generator: &Arc<dyn QuestionGenerator>,
) -> Result<(), QuizError> {
    let (tx, mut rx) = mpsc::unbounded_channel::<GenerationResult>();

    while !app.should_quit {
        while let Ok(result) = rx.try_recv() {
            app.finish_generation(result);
        }

        terminal.draw(|frame| ui::render(frame, app))?;

        if !event::poll(TICK)? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match input::handle_key(app, key) {
            InputAction::None => {}
            InputAction::Quit => app.should_quit = true,
            InputAction::Generate(request) => {
                let generator = Arc::clone(generator);
                let tx = tx.clone();
                tokio::spawn(async move {
                    let result = generator.generate(&request).await;
                    // The loop may already be gone if the user quit meanwhile.
                    let _ = tx.send(result);
                });
            }
        }
    }

    Ok(())
}
