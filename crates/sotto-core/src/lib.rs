pub mod audio;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod http;
pub mod normalize;
pub mod pipeline;
pub mod preset;
pub mod processing;
pub mod settings;
pub mod transcription;

pub use audio::{
    AudioArtifact, AudioEncoding, CaptureDevice, CaptureSource, ChunkSink, CpalCaptureSource,
    RecordingController, UPLOAD_FILE_NAME,
};
pub use clipboard::{Clipboard, SystemClipboard};
pub use config::{
    DEFAULT_SYSTEM_PROMPT, ProcessingDialect, ProcessingProfile, TranscriptionDialect,
    TranscriptionProfile,
};
pub use error::{Error, Result};
pub use http::DEFAULT_TIMEOUT_SECS;
pub use pipeline::{
    Notice, PipelineCoordinator, PipelineRun, Section, SectionState, Stage, UiSurface,
};
pub use preset::Preset;
pub use processing::{
    EMPTY_RESULT_PLACEHOLDER, ProcessOutcome, ProcessingBackend, ProcessingClient,
};
pub use settings::{Settings, SettingsStore};
pub use transcription::{TranscriptionBackend, TranscriptionClient};
