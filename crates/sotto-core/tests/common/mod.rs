//! Shared fakes for integration tests: a canned capture source, a
//! recording UI surface, an in-memory clipboard, and a loopback server
//! helper.
#![allow(dead_code)] // each test binary uses a subset



use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use sotto_core::audio::{AudioEncoding, CaptureDevice, CaptureSource, ChunkSink};
use sotto_core::clipboard::Clipboard;
use sotto_core::error::Result;
use sotto_core::pipeline::{Notice, Section, SectionState, UiSurface};

/// Capture source whose device yields fixed bytes as a single chunk.
pub struct CannedCaptureSource {
    pub chunk: Vec<u8>,
}

impl CannedCaptureSource {
    pub fn new(chunk: &[u8]) -> Self {
        Self {
            chunk: chunk.to_vec(),
        }
    }
}

#[async_trait]
impl CaptureSource for CannedCaptureSource {
    async fn acquire(&self) -> Result<Box<dyn CaptureDevice>> {
        Ok(Box::new(CannedCaptureDevice {
            chunk: self.chunk.clone(),
            sink: None,
        }))
    }
}

struct CannedCaptureDevice {
    chunk: Vec<u8>,
    sink: Option<ChunkSink>,
}

#[async_trait]
impl CaptureDevice for CannedCaptureDevice {
    fn supports(&self, encoding: AudioEncoding) -> bool {
        encoding == AudioEncoding::Wav
    }

    async fn start(&mut self, _encoding: AudioEncoding, sink: ChunkSink) -> Result<()> {
        self.sink = Some(sink);
        Ok(())
    }

    async fn stop(&mut self) -> Result<()> {
        if let Some(sink) = &self.sink {
            sink.lock().unwrap().push(self.chunk.clone());
        }
        Ok(())
    }
}

/// Everything the coordinator did to the UI, for assertions.
#[derive(Debug, Default)]
pub struct UiState {
    pub sections: HashMap<Section, SectionState>,
    pub content: String,
    pub content_processed: bool,
    pub record_button_recording: bool,
    pub loading_visible: bool,
    pub last_loading_message: String,
    pub actions_visible: bool,
    pub retry_visible: bool,
    pub notices: Vec<(Notice, String)>,
}

impl UiState {
    pub fn section(&self, section: Section) -> SectionState {
        self.sections.get(&section).copied().unwrap_or_default()
    }

    pub fn notice_messages(&self) -> Vec<&str> {
        self.notices.iter().map(|(_, m)| m.as_str()).collect()
    }
}

/// UI surface that records every operation into a shared [`UiState`].
#[derive(Clone, Default)]
pub struct RecordingUi {
    pub state: Arc<Mutex<UiState>>,
}

impl RecordingUi {
    pub fn new() -> (Self, Arc<Mutex<UiState>>) {
        let ui = Self::default();
        let state = ui.state.clone();
        (ui, state)
    }
}

impl UiSurface for RecordingUi {
    fn set_section_state(&mut self, section: Section, state: SectionState) {
        self.state.lock().unwrap().sections.insert(section, state);
    }

    fn set_content(&mut self, text: &str, processed: bool) {
        let mut ui = self.state.lock().unwrap();
        ui.content = text.to_string();
        ui.content_processed = processed;
    }

    fn set_record_button(&mut self, recording: bool) {
        self.state.lock().unwrap().record_button_recording = recording;
    }

    fn show_loading(&mut self, message: &str) {
        let mut ui = self.state.lock().unwrap();
        ui.loading_visible = true;
        ui.last_loading_message = message.to_string();
    }

    fn hide_loading(&mut self) {
        self.state.lock().unwrap().loading_visible = false;
    }

    fn show_action_buttons(&mut self) {
        let mut ui = self.state.lock().unwrap();
        ui.actions_visible = true;
        ui.retry_visible = false;
    }

    fn show_retry_button(&mut self) {
        let mut ui = self.state.lock().unwrap();
        ui.actions_visible = false;
        ui.retry_visible = true;
    }

    fn hide_action_controls(&mut self) {
        let mut ui = self.state.lock().unwrap();
        ui.actions_visible = false;
        ui.retry_visible = false;
    }

    fn notify(&mut self, level: Notice, message: &str) {
        self.state
            .lock()
            .unwrap()
            .notices
            .push((level, message.to_string()));
    }
}

/// Clipboard capturing the last copied text.
#[derive(Clone, Default)]
pub struct MemoryClipboard {
    pub contents: Arc<Mutex<Option<String>>>,
}

impl MemoryClipboard {
    pub fn new() -> (Self, Arc<Mutex<Option<String>>>) {
        let clipboard = Self::default();
        let contents = clipboard.contents.clone();
        (clipboard, contents)
    }
}

impl Clipboard for MemoryClipboard {
    fn copy(&mut self, text: &str) -> Result<()> {
        *self.contents.lock().unwrap() = Some(text.to_string());
        Ok(())
    }
}

/// Serve an axum router on an ephemeral loopback port, returning the
/// base URL.
pub async fn spawn_server(router: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind loopback");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve");
    });
    format!("http://{addr}")
}
