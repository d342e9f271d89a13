//! System clipboard via arboard.

use card_export::{Clipboard, ShareError};

/// The desktop clipboard. A fresh handle is opened for every write.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ShareError> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| ShareError::Failed(e.to_string()))?;
        clipboard
            .set_text(text)
            .map_err(|e| ShareError::Failed(e.to_string()))?;
        tracing::debug!(chars = text.chars().count(), "text placed on clipboard");
        Ok(())
    }
}
