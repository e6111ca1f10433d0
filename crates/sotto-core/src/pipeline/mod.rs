//! Pipeline coordinator: drives recording → transcription → processing
//! and maps every outcome onto the UI status model.
//!
//! All client errors stop here. Callers of the coordinator never see a
//! transport error; they see a UI reset, an inline error message and an
//! armed retry. The only automatic retry anywhere is the local
//! transcription field-name fallback inside the client; the coordinator
//! itself retries nothing on its own.

mod state;
mod ui;

pub use state::{PipelineRun, Section, SectionState, Stage};
pub use ui::{Notice, UiSurface};

use crate::audio::{AudioArtifact, RecordingController};
use crate::clipboard::Clipboard;
use crate::error::{Error, Result};
use crate::processing::{EMPTY_RESULT_PLACEHOLDER, ProcessOutcome, ProcessingClient};
use crate::settings::Settings;
use crate::transcription::TranscriptionClient;

/// Owner of the pipeline run state. Single logical thread: every method
/// takes `&mut self` and runs stages strictly one at a time.
pub struct PipelineCoordinator {
    recorder: RecordingController,
    transcription: TranscriptionClient,
    processing: ProcessingClient,
    ui: Box<dyn UiSurface>,
    clipboard: Box<dyn Clipboard>,
    run: PipelineRun,
}

impl PipelineCoordinator {
    pub fn new(
        recorder: RecordingController,
        ui: Box<dyn UiSurface>,
        clipboard: Box<dyn Clipboard>,
        settings: &Settings,
    ) -> Result<Self> {
        Ok(Self {
            recorder,
            transcription: TranscriptionClient::new(settings.transcription.clone())?,
            processing: ProcessingClient::new(settings.processing.clone())?,
            ui,
            clipboard,
            run: PipelineRun::default(),
        })
    }

    /// Rebuild both clients from fresh profiles. Wire this to the
    /// settings store's subscription so a saved settings change takes
    /// effect on the next run.
    pub fn apply_settings(&mut self, settings: &Settings) -> Result<()> {
        self.transcription = TranscriptionClient::new(settings.transcription.clone())?;
        self.processing = ProcessingClient::new(settings.processing.clone())?;
        Ok(())
    }

    pub fn run(&self) -> &PipelineRun {
        &self.run
    }

    pub fn is_recording(&self) -> bool {
        self.recorder.is_recording()
    }

    pub async fn toggle_recording(&mut self) {
        if self.recorder.is_recording() {
            self.stop_recording().await;
        } else {
            self.start_recording().await;
        }
    }

    /// Begin a new run. Rejected while a recording is active, leaving
    /// the active session and run state untouched.
    pub async fn start_recording(&mut self) {
        if self.recorder.is_recording() {
            self.ui
                .notify(Notice::Error, &Error::AlreadyRecording.to_string());
            return;
        }

        self.reset_run_and_ui();
        self.ui.show_loading("Starting recording...");
        match self.recorder.start().await {
            Ok(()) => {
                self.run.stage = Stage::Recording;
                self.ui.set_record_button(true);
                self.ui.set_content("Recording... Click to stop", false);
                self.ui.hide_loading();
                self.ui.notify(Notice::Success, "Recording started");
            }
            Err(e) => {
                self.ui.hide_loading();
                self.ui.notify(Notice::Error, &e.to_string());
            }
        }
    }

    /// Finalize the recording and run both network stages.
    pub async fn stop_recording(&mut self) {
        self.ui.show_loading("Stopping recording...");
        match self.recorder.stop().await {
            Ok(artifact) => {
                self.ui.set_record_button(false);
                self.ui.hide_loading();
                self.run_stages(artifact).await;
            }
            Err(e) => {
                self.ui.hide_loading();
                self.ui.notify(Notice::Error, &e.to_string());
            }
        }
    }

    async fn run_stages(&mut self, artifact: AudioArtifact) {
        self.run.stage = Stage::Transcribing;
        self.ui
            .set_section_state(Section::Transcribe, SectionState::Processing);
        self.ui.show_loading("Transcribing audio...");

        let raw = match self.transcription.transcribe(&artifact).await {
            Ok(text) if text.trim().is_empty() => {
                self.fail(&Error::EmptyTranscript.to_string());
                return;
            }
            Ok(text) => text,
            Err(e) => {
                self.fail(&format!("Transcription failed: {e}"));
                return;
            }
        };

        self.run.raw_text = raw.clone();
        self.run.stage = Stage::Transcribed;
        self.ui
            .set_section_state(Section::Transcribe, SectionState::Completed);
        self.ui.set_content(&raw, false);
        self.ui.show_action_buttons();

        if !self.processing.profile().enabled {
            // Processing is switched off: the raw transcript is final.
            self.run.stage = Stage::Done;
            self.ui.hide_loading();
            self.copy_to_clipboard();
            self.ui.notify(Notice::Success, "Transcription complete!");
            return;
        }

        self.run.stage = Stage::Processing;
        self.ui
            .set_section_state(Section::Process, SectionState::Processing);
        self.ui.show_loading("Processing text...");

        let processed = match self.processing.process(&raw).await {
            Ok(ProcessOutcome::Text(text)) => text,
            Ok(ProcessOutcome::Empty) => EMPTY_RESULT_PLACEHOLDER.to_string(),
            Err(e) => {
                self.fail(&format!("Text processing failed: {e}"));
                return;
            }
        };

        self.run.processed_text = processed.clone();
        self.run.stage = Stage::Done;
        self.ui
            .set_section_state(Section::Process, SectionState::Completed);
        self.ui
            .set_section_state(Section::Transcribe, SectionState::Clickable);
        self.ui.set_content(&processed, true);
        self.ui.hide_loading();
        self.ui.show_action_buttons();
        self.copy_to_clipboard();
        self.ui.notify(Notice::Success, "Processing complete!");
    }

    fn fail(&mut self, message: &str) {
        tracing::warn!("pipeline failed: {message}");
        self.run.stage = Stage::Failed;
        self.ui.hide_loading();
        self.ui
            .set_section_state(Section::Transcribe, SectionState::Unset);
        self.ui
            .set_section_state(Section::Process, SectionState::Unset);
        self.ui.set_content(&format!("Error: {message}"), false);
        self.ui.show_retry_button();
        self.ui.notify(Notice::Error, message);
    }

    /// Display the raw transcript. Pure view operation: no client is
    /// re-invoked and the cached text is shown as-is.
    pub fn show_transcribed(&mut self) {
        if self.run.raw_text.is_empty() {
            return;
        }
        let raw = self.run.raw_text.clone();
        self.ui.set_content(&raw, false);
        self.ui
            .set_section_state(Section::Transcribe, SectionState::Active);
        let process_state = if self.run.processed_text.is_empty() {
            SectionState::Completed
        } else {
            SectionState::Clickable
        };
        self.ui.set_section_state(Section::Process, process_state);
    }

    /// Display the processed text. Pure view operation.
    pub fn show_processed(&mut self) {
        if self.run.processed_text.is_empty() {
            return;
        }
        let processed = self.run.processed_text.clone();
        self.ui.set_content(&processed, true);
        self.ui
            .set_section_state(Section::Process, SectionState::Active);
        self.ui
            .set_section_state(Section::Transcribe, SectionState::Clickable);
    }

    /// Arm a fresh attempt. Recording is never restarted automatically;
    /// the user records again.
    pub fn retry(&mut self) {
        self.reset_run_and_ui();
        self.ui.set_content("Click record to start...", false);
    }

    /// Copy the best available text: processed when present, else raw.
    pub fn copy_to_clipboard(&mut self) {
        let text = if self.run.processed_text.is_empty() {
            self.run.raw_text.clone()
        } else {
            self.run.processed_text.clone()
        };
        if text.is_empty() {
            self.ui.notify(Notice::Error, "No text to copy");
            return;
        }
        match self.clipboard.copy(&text) {
            Ok(()) => self.ui.notify(Notice::Success, "Copied to clipboard!"),
            Err(e) => {
                tracing::warn!("clipboard copy failed: {e}");
                self.ui.notify(Notice::Error, "Failed to copy to clipboard");
            }
        }
    }

    fn reset_run_and_ui(&mut self) {
        self.run.reset();
        self.ui.set_record_button(false);
        self.ui
            .set_section_state(Section::Transcribe, SectionState::Unset);
        self.ui
            .set_section_state(Section::Process, SectionState::Unset);
        self.ui.hide_action_controls();
    }
}
