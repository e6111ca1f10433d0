//! Recording controller: capture-device ownership, chunk buffering, and
//! artifact assembly.
//!
//! The controller is a two-state machine (idle ⇄ recording) that enforces
//! a single active session. The chunk buffer never escapes: the device
//! writes into a sink handle the controller hands it at start, and the
//! buffer is drained into an immutable [`AudioArtifact`] at stop. The
//! device is released and the buffer cleared on every exit path.

mod capture;
mod encoding;

pub use capture::CpalCaptureSource;
pub use encoding::{AudioEncoding, PREFERRED_ENCODINGS};

use async_trait::async_trait;
use std::sync::{Arc, Mutex, PoisonError};

use crate::error::{Error, Result};

/// File name used for multipart uploads of recorded audio.
pub const UPLOAD_FILE_NAME: &str = "recording.wav";

/// Shared handle the capture device appends finished chunks into.
pub type ChunkSink = Arc<Mutex<Vec<Vec<u8>>>>;

/// The finalized audio payload of a recording session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioArtifact {
    data: Vec<u8>,
    mime_type: &'static str,
}

impl AudioArtifact {
    pub fn new(data: Vec<u8>, mime_type: &'static str) -> Self {
        Self { data, mime_type }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    pub fn mime_type(&self) -> &'static str {
        self.mime_type
    }

    pub fn file_name(&self) -> &'static str {
        UPLOAD_FILE_NAME
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// An acquired capture device for one recording session.
#[async_trait]
pub trait CaptureDevice: Send {
    /// Whether the device can produce this encoding.
    fn supports(&self, encoding: AudioEncoding) -> bool;

    /// Begin capturing, appending finished chunks into `sink`.
    async fn start(&mut self, encoding: AudioEncoding, sink: ChunkSink) -> Result<()>;

    /// Finalize capture. Must flush any remaining chunks into the sink
    /// before returning.
    async fn stop(&mut self) -> Result<()>;
}

/// Acquires a fresh capture device per recording, mirroring how the
/// platform hands out a stream per request. Denial surfaces as
/// [`Error::Permission`].
#[async_trait]
pub trait CaptureSource: Send {
    async fn acquire(&self) -> Result<Box<dyn CaptureDevice>>;
}

struct RecordingSession {
    device: Box<dyn CaptureDevice>,
    encoding: AudioEncoding,
    chunks: ChunkSink,
}

/// Owner of the microphone capture session.
pub struct RecordingController {
    source: Box<dyn CaptureSource>,
    session: Option<RecordingSession>,
}

impl RecordingController {
    pub fn new(source: Box<dyn CaptureSource>) -> Self {
        Self {
            source,
            session: None,
        }
    }

    pub fn is_recording(&self) -> bool {
        self.session.is_some()
    }

    /// Acquire a device and begin buffering chunks. Fails with
    /// [`Error::AlreadyRecording`] while a session is active, leaving
    /// that session untouched.
    pub async fn start(&mut self) -> Result<()> {
        if self.session.is_some() {
            return Err(Error::AlreadyRecording);
        }

        let mut device = self.source.acquire().await?;
        let encoding = AudioEncoding::select(|e| device.supports(e));
        let chunks: ChunkSink = Arc::new(Mutex::new(Vec::new()));
        device.start(encoding, Arc::clone(&chunks)).await?;
        tracing::debug!(mime = encoding.mime_type(), "recording started");

        self.session = Some(RecordingSession {
            device,
            encoding,
            chunks,
        });
        Ok(())
    }

    /// Finalize the session and assemble the buffered chunks into one
    /// artifact. The device is released and the buffer cleared before
    /// this returns, on the error path too.
    pub async fn stop(&mut self) -> Result<AudioArtifact> {
        let mut session = self.session.take().ok_or(Error::NoActiveRecording)?;

        let flushed = session.device.stop().await;
        let encoding = session.encoding;
        let chunks = std::mem::take(
            &mut *session
                .chunks
                .lock()
                .unwrap_or_else(PoisonError::into_inner),
        );
        drop(session);
        flushed?;

        let data = chunks.concat();
        tracing::debug!(bytes = data.len(), "recording stopped");
        Ok(AudioArtifact::new(data, encoding.mime_type()))
    }
}
