//! Summarization client abstraction
//!
//! Sends document text to a chat-completion service and returns the
//! generated summary or outline. A failed call never propagates as an
//! error: it comes back as [`Generation::Failed`] so ingestion can go on
//! and store the failure next to the record.

use crate::config::SummarizerConfig;
use crate::db::models::GenerationStatus;
use crate::errors::{AppError, Result};
use crate::metrics;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;

const SYSTEM_PROMPT: &str = "You are an assistant that summarizes scientific literature.";

/// Which artifact is being generated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationKind {
    Summary,
    Outline,
}

impl GenerationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationKind::Summary => "summary",
            GenerationKind::Outline => "outline",
        }
    }

    /// User prompt embedding the full document text
    pub fn prompt(&self, text: &str) -> String {
        match self {
            GenerationKind::Summary => format!(
                "Please provide a concise summary of the following scientific literature:\n\n{}\n\nSummary:",
                text
            ),
            GenerationKind::Outline => format!(
                "Analyze the following scientific literature and provide a structured outline with main sections such as Introduction, Methods, Results, and Discussion:\n\n{}\n\nOutline:",
                text
            ),
        }
    }
}

impl fmt::Display for GenerationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one generation call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Generation {
    /// Generated text, trimmed
    Generated(String),
    /// Human-readable reason the call failed
    Failed(String),
}

impl Generation {
    pub fn is_generated(&self) -> bool {
        matches!(self, Generation::Generated(_))
    }

    pub fn status(&self) -> GenerationStatus {
        match self {
            Generation::Generated(_) => GenerationStatus::Generated,
            Generation::Failed(_) => GenerationStatus::Failed,
        }
    }

    /// Text stored in the record's content column.
    ///
    /// A failure is stored as `Error generating <kind>: <reason>`.
    pub fn into_content(self, kind: GenerationKind) -> (String, GenerationStatus) {
        let status = self.status();
        let content = match self {
            Generation::Generated(text) => text,
            Generation::Failed(reason) => format!("Error generating {}: {}", kind, reason),
        };
        (content, status)
    }
}

/// Reasons a chat-completion call can fail
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("missing API key")]
    MissingApiKey,

    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("API error {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Failed to parse response: {0}")]
    MalformedResponse(String),

    #[error("Empty response")]
    EmptyResponse,
}

/// Trait for summary and outline generation
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Generate one artifact for the given document text
    async fn generate(&self, kind: GenerationKind, text: &str) -> Generation;

    async fn summarize(&self, text: &str) -> Generation {
        self.generate(GenerationKind::Summary, text).await
    }

    async fn outline(&self, text: &str) -> Generation {
        self.generate(GenerationKind::Outline, text).await
    }

    /// Get the model name
    fn model_name(&self) -> &str;
}

/// OpenAI-compatible chat-completion client
pub struct OpenAiSummarizer {
    client: reqwest::Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

impl OpenAiSummarizer {
    /// Create a client from configuration
    pub fn new(config: &SummarizerConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(|e| AppError::Configuration {
            message: format!("Failed to create HTTP client: {}", e),
        })?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url: config.api_base.trim_end_matches('/').to_string(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        })
    }

    async fn make_request(
        &self,
        kind: GenerationKind,
        text: &str,
    ) -> std::result::Result<String, GenerationError> {
        let api_key = self.api_key.as_deref().ok_or(GenerationError::MissingApiKey)?;
        let url = format!("{}/chat/completions", self.base_url);

        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: kind.prompt(text),
                },
            ],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let response = self.client
            .post(&url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Status { status, body });
        }

        let result: ChatResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::MalformedResponse(e.to_string()))?;

        result
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .ok_or(GenerationError::EmptyResponse)
    }
}

#[async_trait]
impl Summarizer for OpenAiSummarizer {
    async fn generate(&self, kind: GenerationKind, text: &str) -> Generation {
        let start = Instant::now();

        let outcome = match self.make_request(kind, text).await {
            Ok(content) => Generation::Generated(content),
            Err(e) => {
                tracing::warn!(
                    kind = %kind,
                    model = %self.model,
                    error = %e,
                    "Generation request failed"
                );
                Generation::Failed(e.to_string())
            }
        };

        metrics::record_generation(
            kind.as_str(),
            start.elapsed().as_secs_f64(),
            outcome.is_generated(),
        );

        outcome
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// Offline summarizer for local runs and tests
pub struct MockSummarizer;

#[async_trait]
impl Summarizer for MockSummarizer {
    async fn generate(&self, kind: GenerationKind, text: &str) -> Generation {
        Generation::Generated(format!(
            "Mock {} of {} characters",
            kind,
            text.chars().count()
        ))
    }

    fn model_name(&self) -> &str {
        "mock-summarizer"
    }
}

/// Create a summarizer based on configuration
pub fn create_summarizer(config: &SummarizerConfig) -> Result<Arc<dyn Summarizer>> {
    match config.provider.as_str() {
        "openai" => {
            if config.api_key.is_none() {
                tracing::warn!("No API key configured; every summary and outline will be recorded as failed");
            }
            Ok(Arc::new(OpenAiSummarizer::new(config)?))
        }
        "mock" => Ok(Arc::new(MockSummarizer)),
        other => Err(AppError::Configuration {
            message: format!("Unknown summarizer provider: {}", other),
        }),
    }
}
