//! Pipeline run state and the UI status model.

/// The two status sections the UI shows for the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Transcribe,
    Process,
}

impl Section {
    /// Stable element id of the section's status widget.
    pub fn id(&self) -> &'static str {
        match self {
            Section::Transcribe => "transcribe",
            Section::Process => "process",
        }
    }
}

/// Display state of one status section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SectionState {
    /// No state class applied.
    #[default]
    Unset,
    /// The stage is running.
    Processing,
    /// The stage finished.
    Completed,
    /// Finished, with cached content viewable on demand.
    Clickable,
    /// Currently displayed in the content area.
    Active,
}

impl SectionState {
    /// CSS class the UI layer applies; empty clears all state classes.
    pub fn css_class(&self) -> &'static str {
        match self {
            SectionState::Unset => "",
            SectionState::Processing => "processing",
            SectionState::Completed => "completed",
            SectionState::Clickable => "clickable",
            SectionState::Active => "active",
        }
    }
}

/// Where the current run is in the two-stage pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stage {
    #[default]
    Idle,
    Recording,
    Transcribing,
    Transcribed,
    Processing,
    Done,
    Failed,
}

/// Per-attempt pipeline state. Created when recording starts, reset on
/// retry. `raw_text` is written once on transcription success and never
/// mutated afterwards; `processed_text` once on processing success.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineRun {
    pub raw_text: String,
    pub processed_text: String,
    pub stage: Stage,
}

impl PipelineRun {
    pub fn reset(&mut self) {
        *self = PipelineRun::default();
    }
}
