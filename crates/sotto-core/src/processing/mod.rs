//! Text-processing client: one backend per LLM endpoint dialect.
//!
//! A 2xx response whose body normalizes to nothing is not an error here.
//! It comes back as [`ProcessOutcome::Empty`] so the pipeline can finish
//! the run, show a placeholder, and leave retry available. Transport
//! failures and non-2xx responses stay hard errors.

mod custom;
mod ollama;
mod openai;

pub use custom::CustomBackend;
pub use ollama::OllamaBackend;
pub use openai::OpenAiChatBackend;

use async_trait::async_trait;

use crate::config::{ProcessingDialect, ProcessingProfile};
use crate::error::Result;
use crate::http;

/// Placeholder the coordinator displays for an [`ProcessOutcome::Empty`]
/// outcome.
pub const EMPTY_RESULT_PLACEHOLDER: &str = "Error processing text.";

/// Prefix marking the user turn as raw transcript material.
pub(crate) const USER_TEXT_PREFIX: &str = "Raw Transcribed Text: ";

/// What a processing call produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessOutcome {
    Text(String),
    /// The server answered 2xx but normalization found no usable text.
    Empty,
}

impl ProcessOutcome {
    pub(crate) fn from_normalized(text: String) -> Self {
        if text.trim().is_empty() {
            ProcessOutcome::Empty
        } else {
            ProcessOutcome::Text(text)
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            ProcessOutcome::Text(t) => Some(t),
            ProcessOutcome::Empty => None,
        }
    }
}

/// One wire dialect of a text-processing endpoint.
#[async_trait]
pub trait ProcessingBackend: Send + Sync {
    fn name(&self) -> &'static str;

    async fn process(
        &self,
        client: &reqwest::Client,
        text: &str,
        profile: &ProcessingProfile,
    ) -> Result<ProcessOutcome>;

    /// Cheap connectivity check. Dialects without a known side route
    /// succeed vacuously.
    async fn test_connection(
        &self,
        client: &reqwest::Client,
        profile: &ProcessingProfile,
    ) -> Result<()>;
}

/// Select the backend for a dialect.
pub fn backend_for(dialect: ProcessingDialect) -> Box<dyn ProcessingBackend> {
    match dialect {
        ProcessingDialect::Ollama => Box::new(OllamaBackend),
        ProcessingDialect::OpenAi => Box::new(OpenAiChatBackend),
        ProcessingDialect::Custom => Box::new(CustomBackend),
    }
}

/// Public face of the text-processing stage.
pub struct ProcessingClient {
    profile: ProcessingProfile,
    backend: Box<dyn ProcessingBackend>,
    http: reqwest::Client,
}

impl ProcessingClient {
    pub fn new(profile: ProcessingProfile) -> Result<Self> {
        Ok(Self {
            http: http::client()?,
            backend: backend_for(profile.dialect),
            profile,
        })
    }

    pub fn profile(&self) -> &ProcessingProfile {
        &self.profile
    }

    pub async fn process(&self, text: &str) -> Result<ProcessOutcome> {
        tracing::debug!(
            backend = self.backend.name(),
            chars = text.len(),
            "processing transcript"
        );
        self.backend.process(&self.http, text, &self.profile).await
    }

    pub async fn test_connection(&self) -> Result<()> {
        self.backend.test_connection(&self.http, &self.profile).await
    }
}
