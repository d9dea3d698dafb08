//! AI-backed question generation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;

use crate::config::GeneratorSettings;
use crate::models::{Difficulty, Question, NUM_OPTIONS};
use crate::protocol::generated;

/// The only message a user ever sees for a failed generation.
pub const GENERATION_FAILED_MESSAGE: &str =
    "Something went wrong while generating questions. Please try again.";

/// Question counts offered by the generator form.
pub const COUNT_CHOICES: [usize; 5] = [3, 5, 10, 15, 20];

const DEFAULT_COUNT: usize = 5;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("no API key configured")]
    MissingApiKey,
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("generator returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("generator returned no data")]
    EmptyResponse,
    #[error("generator returned malformed data: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("generator returned no usable questions")]
    NoValidQuestions,
}

impl GenerationError {
    pub fn user_message(&self) -> &'static str {
        GENERATION_FAILED_MESSAGE
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub topic: String,
    pub count: usize,
    pub difficulty: Difficulty,
}

/// Anything that can turn a topic into questions.
#[async_trait]
pub trait QuestionGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<Vec<Question>, GenerationError>;
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

/// Client for the Gemini `generateContent` endpoint.
pub struct GeminiGenerator {
    client: Client,
    settings: GeneratorSettings,
}

impl GeminiGenerator {
    pub fn new(settings: &GeneratorSettings) -> Result<Self, GenerationError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            settings: settings.clone(),
        })
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.settings.endpoint.trim_end_matches('/'),
            self.settings.model
        )
    }

    fn request_body(&self, request: &GenerationRequest) -> Value {
        json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": build_prompt(request, &self.settings.language) }],
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": generated::response_schema(),
                "temperature": self.settings.temperature,
            },
        })
    }
}

#[async_trait]
impl QuestionGenerator for GeminiGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<Vec<Question>, GenerationError> {
        let api_key = self
            .settings
            .api_key
            .as_deref()
            .ok_or(GenerationError::MissingApiKey)?;

        tracing::info!(
            topic = %request.topic,
            count = request.count,
            difficulty = %request.difficulty,
            model = %self.settings.model,
            "requesting generated questions"
        );

        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", api_key)
            .json(&self.request_body(request))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(GenerationError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let questions = parse_response(&body)?;
        tracing::info!(count = questions.len(), "generated questions received");
        Ok(questions)
    }
}

pub fn build_prompt(request: &GenerationRequest, language: &str) -> String {
    format!(
        "Create {count} multiple-choice quiz questions about \"{topic}\".\n\
         Difficulty: {difficulty}.\n\
         Language: {language}.\n\
         Each question must have exactly {NUM_OPTIONS} options.\n\
         Make sure the correct answer is clear and accurate.\n\
         Return the result as strict JSON.",
        count = request.count,
        topic = request.topic.trim(),
        difficulty = request.difficulty,
    )
}

/// Pull the generated question list out of a `generateContent` response.
pub fn parse_response(body: &str) -> Result<Vec<Question>, GenerationError> {
    let response: GenerateContentResponse = serde_json::from_str(body)?;

    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(GenerationError::EmptyResponse);
    }

    let questions = generated::parse_questions(&text)?;
    if questions.is_empty() {
        return Err(GenerationError::NoValidQuestions);
    }
    Ok(questions)
}

/// State of the generator form. The trigger is disabled while a request is
/// in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorForm {
    pub topic: String,
    pub count: usize,
    pub difficulty: Difficulty,
    loading: bool,
    error: Option<String>,
}

impl Default for GeneratorForm {
    fn default() -> Self {
        Self {
            topic: String::new(),
            count: DEFAULT_COUNT,
            difficulty: Difficulty::default(),
            loading: false,
            error: None,
        }
    }
}

impl GeneratorForm {
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn can_generate(&self) -> bool {
        !self.loading && !self.topic.trim().is_empty()
    }

    pub fn next_count(&mut self) {
        let index = COUNT_CHOICES.iter().position(|&c| c == self.count).unwrap_or(0);
        self.count = COUNT_CHOICES[(index + 1) % COUNT_CHOICES.len()];
    }

    pub fn previous_count(&mut self) {
        let index = COUNT_CHOICES.iter().position(|&c| c == self.count).unwrap_or(0);
        self.count = COUNT_CHOICES[(index + COUNT_CHOICES.len() - 1) % COUNT_CHOICES.len()];
    }

    /// Mark a request as in flight and hand out its parameters, or `None` if
    /// the trigger is currently disabled.
    pub fn begin(&mut self) -> Option<GenerationRequest> {
        if !self.can_generate() {
            return None;
        }

        self.loading = true;
        self.error = None;
        Some(GenerationRequest {
            topic: self.topic.trim().to_string(),
            count: self.count,
            difficulty: self.difficulty,
        })
    }

    /// Re-enable the trigger. Returns the questions on success; on failure
    /// keeps the user-facing message and nothing else.
    pub fn complete(
        &mut self,
        result: Result<Vec<Question>, GenerationError>,
    ) -> Option<Vec<Question>> {
        self.loading = false;
        match result {
            Ok(questions) => Some(questions),
            Err(err) => {
                tracing::warn!(error = %err, "question generation failed");
                self.error = Some(err.user_message().to_string());
                None
            }
        }
    }
}
