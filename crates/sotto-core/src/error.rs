//! Error taxonomy for the capture → transcribe → process pipeline.
//!
//! Four families matter to callers:
//! - permission errors (capture device denied), surfaced verbatim
//! - transport errors (non-2xx or network failure), enriched with the
//!   server's `error.message` when the body yields one
//! - empty-result errors (the call succeeded but produced no transcript)
//! - recorder misuse (start while recording, stop while idle)
//!
//! A processing response that parses but contains no usable text is NOT an
//! error; it travels as [`crate::processing::ProcessOutcome::Empty`].

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The platform refused to hand over a capture device.
    #[error("{0}")]
    Permission(String),

    /// `start` was called while a session is active. The active session is
    /// left untouched.
    #[error("A recording is already in progress")]
    AlreadyRecording,

    /// `stop` was called with no active session.
    #[error("No active recording to stop")]
    NoActiveRecording,

    /// The capture device failed while starting or flushing.
    #[error("Audio capture failed: {0}")]
    Capture(String),

    /// Non-2xx response. `message` is the server's `error.message` field
    /// when the body carried one, otherwise the HTTP status reason.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Network-level failure before any status line arrived.
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Transcription returned 2xx but no usable text.
    #[error("No text was transcribed from the audio")]
    EmptyTranscript,

    /// A connectivity probe failed. Some servers only expose the real
    /// upload/completion route, so a failed probe does not mean the
    /// pipeline call will fail; the message says as much.
    #[error("Connection failed: {0}")]
    Probe(String),

    /// The probe endpoint answered 401 for the configured key.
    #[error("Invalid API key")]
    InvalidApiKey,

    /// Clipboard backend failure.
    #[error("Clipboard error: {0}")]
    Clipboard(String),
}

impl Error {
    /// Build an [`Error::Api`] from a failed response, preferring the
    /// server-provided `error.message` over the bare status reason.
    pub(crate) async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status();
        let reason = status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| {
                v.pointer("/error/message")
                    .and_then(|m| m.as_str().map(str::to_string))
            })
            .unwrap_or(reason);
        Error::Api {
            status: status.as_u16(),
            message,
        }
    }
}
