//! Transcription client: one backend per endpoint dialect.
//!
//! The dialect is fixed at client construction from the profile, so the
//! request path holds no string switches. Both backends run the response
//! body through [`crate::normalize`], since transcription servers answer
//! with anything from plain text to full chat-completion envelopes.

mod local;
mod openai;

pub use local::LocalWhisperBackend;
pub use openai::OpenAiTranscriptionBackend;

use async_trait::async_trait;

use crate::audio::AudioArtifact;
use crate::config::{TranscriptionDialect, TranscriptionProfile};
use crate::error::{Error, Result};
use crate::http;

/// One wire dialect of a speech-to-text endpoint.
#[async_trait]
pub trait TranscriptionBackend: Send + Sync {
    fn name(&self) -> &'static str;

    /// Upload the artifact and return the transcript text (possibly
    /// empty; the coordinator decides what empty means).
    async fn transcribe(
        &self,
        client: &reqwest::Client,
        audio: &AudioArtifact,
        profile: &TranscriptionProfile,
    ) -> Result<String>;

    /// Cheap connectivity check against an endpoint the server is more
    /// likely to answer than the upload route. A failure does not imply
    /// the upload will fail; some servers only expose the upload route.
    async fn test_connection(
        &self,
        client: &reqwest::Client,
        profile: &TranscriptionProfile,
    ) -> Result<()>;
}

/// Select the backend for a dialect.
pub fn backend_for(dialect: TranscriptionDialect) -> Box<dyn TranscriptionBackend> {
    match dialect {
        TranscriptionDialect::Local => Box::new(LocalWhisperBackend),
        TranscriptionDialect::OpenAi => Box::new(OpenAiTranscriptionBackend),
    }
}

/// Public face of the transcription stage.
pub struct TranscriptionClient {
    profile: TranscriptionProfile,
    backend: Box<dyn TranscriptionBackend>,
    http: reqwest::Client,
}

impl TranscriptionClient {
    pub fn new(profile: TranscriptionProfile) -> Result<Self> {
        Ok(Self {
            http: http::client()?,
            backend: backend_for(profile.dialect),
            profile,
        })
    }

    pub fn profile(&self) -> &TranscriptionProfile {
        &self.profile
    }

    pub async fn transcribe(&self, audio: &AudioArtifact) -> Result<String> {
        tracing::debug!(
            backend = self.backend.name(),
            bytes = audio.data().len(),
            "transcribing"
        );
        self.backend
            .transcribe(&self.http, audio, &self.profile)
            .await
    }

    pub async fn test_connection(&self) -> Result<()> {
        self.backend
            .test_connection(&self.http, &self.profile)
            .await
    }
}

/// Wrap a transport failure from a probe, keeping the caveat visible.
pub(crate) fn probe_error(e: reqwest::Error) -> Error {
    Error::Probe(format!(
        "{e} (the real request may still succeed even when this probe fails)"
    ))
}
