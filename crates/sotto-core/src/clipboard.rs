//! Clipboard collaborator.

use crate::error::{Error, Result};

/// The coordinator only needs "put text on the clipboard".
pub trait Clipboard: Send {
    fn copy(&mut self, text: &str) -> Result<()>;
}

/// System clipboard via arboard.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl SystemClipboard {
    pub fn new() -> Self {
        Self
    }
}

impl Clipboard for SystemClipboard {
    fn copy(&mut self, text: &str) -> Result<()> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| Error::Clipboard(e.to_string()))?;
        clipboard
            .set_text(text)
            .map_err(|e| Error::Clipboard(e.to_string()))?;
        Ok(())
    }
}
