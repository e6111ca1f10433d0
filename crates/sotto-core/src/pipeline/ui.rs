//! UI collaborator surface.
//!
//! The coordinator only needs a handful of operations from the widget
//! layer: set a status class, set the displayed text, toggle visibility
//! of the action controls, and pop a notification. Frontends implement
//! this against their widget toolkit; tests implement it as a recorder.

use super::state::{Section, SectionState};

/// Notification severity (toast styling).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Success,
    Error,
    Info,
    Warning,
}

/// Operations the coordinator drives on the widget layer.
pub trait UiSurface: Send {
    /// Apply a status class to a section widget.
    fn set_section_state(&mut self, section: Section, state: SectionState);

    /// Replace the content area text. `processed` styles the text as
    /// final output rather than raw transcript.
    fn set_content(&mut self, text: &str, processed: bool);

    /// Flip the record toggle between record and stop.
    fn set_record_button(&mut self, recording: bool);

    /// Show the loading overlay with a phase message.
    fn show_loading(&mut self, message: &str);

    fn hide_loading(&mut self);

    /// Show the copy/share controls, hiding retry.
    fn show_action_buttons(&mut self);

    /// Show the retry control, hiding the action buttons.
    fn show_retry_button(&mut self);

    /// Hide both action buttons and retry.
    fn hide_action_controls(&mut self);

    /// Pop a notification toast.
    fn notify(&mut self, level: Notice, message: &str);
}
