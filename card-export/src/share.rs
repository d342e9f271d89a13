//! Sharing a card's text.
//!
//! Native share first, clipboard when the host has no share capability.

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use card_core::{Artifact, ModeDescriptor, Notice, Notifier, PRODUCT_NAME};
use thiserror::Error;

/// What gets handed to a share target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharePayload {
    /// Share sheet title.
    pub title: String,
    /// Body text.
    pub text: String,
    /// Link back to the app, if known.
    pub url: Option<String>,
}

/// Build the share payload for an artifact.
#[must_use]
pub fn compose_share_payload(artifact: &Artifact, url: Option<&str>) -> SharePayload {
    let descriptor = ModeDescriptor::of(artifact.mode());
    let text = match artifact {
        Artifact::Quote(quote) => format!(
            "\"{}\" - {}\n\nvia {PRODUCT_NAME}",
            quote.text(),
            quote.attribution()
        ),
        Artifact::Meme(meme) => format!("{}\n\nvia {PRODUCT_NAME}", meme.text()),
    };
    SharePayload {
        title: descriptor.share_title.to_string(),
        text,
        url: url.map(str::to_string),
    }
}

/// Share or clipboard failure.
#[derive(Debug, Error)]
pub enum ShareError {
    /// The user dismissed the share sheet.
    #[error("share cancelled")]
    Cancelled,

    /// The target failed.
    #[error("share failed: {0}")]
    Failed(String),
}

/// A host share sheet.
#[async_trait]
pub trait NativeShare: Send + Sync {
    /// Offer the payload to the user.
    async fn share(&self, payload: &SharePayload) -> Result<(), ShareError>;
}

/// A writable text clipboard.
pub trait Clipboard: Send {
    /// Replace the clipboard contents.
    ///
    /// # Errors
    ///
    /// Returns [`ShareError::Failed`] if the clipboard is unavailable.
    fn set_text(&mut self, text: &str) -> Result<(), ShareError>;
}

/// How a share attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareOutcome {
    /// Handed to the native share target.
    Shared,
    /// The user dismissed the share sheet.
    Cancelled,
    /// Copied to the clipboard and the user was told.
    Copied,
    /// Nothing happened; the failure was logged.
    Failed,
}

/// Shares artifacts through whatever the host offers.
pub struct Sharer {
    native: Option<Box<dyn NativeShare>>,
    clipboard: Mutex<Box<dyn Clipboard>>,
    notifier: Arc<dyn Notifier>,
    url: Option<String>,
}

impl std::fmt::Debug for Sharer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sharer")
            .field("native", &self.native.is_some())
            .field("url", &self.url)
            .finish_non_exhaustive()
    }
}

impl Sharer {
    /// Create a sharer. `native` is `None` when the host has no share sheet.
    pub fn new(
        native: Option<Box<dyn NativeShare>>,
        clipboard: Box<dyn Clipboard>,
        notifier: Arc<dyn Notifier>,
        url: Option<String>,
    ) -> Self {
        Self {
            native,
            clipboard: Mutex::new(clipboard),
            notifier,
            url,
        }
    }

    /// Whether a native share target is available.
    #[must_use]
    pub fn has_native(&self) -> bool {
        self.native.is_some()
    }

    /// Share the artifact.
    ///
    /// Never returns an error: failures are logged, the clipboard path
    /// confirms with an info notice.
    pub async fn share(&self, artifact: &Artifact) -> ShareOutcome {
        let payload = compose_share_payload(artifact, self.url.as_deref());

        if let Some(native) = &self.native {
            return match native.share(&payload).await {
                Ok(()) => {
                    tracing::info!(title = %payload.title, "shared");
                    ShareOutcome::Shared
                }
                Err(ShareError::Cancelled) => {
                    tracing::debug!("share sheet dismissed");
                    ShareOutcome::Cancelled
                }
                Err(err) => {
                    tracing::warn!(error = %err, "native share failed");
                    ShareOutcome::Failed
                }
            };
        }

        let copied = self
            .clipboard
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .set_text(&payload.text);

        match copied {
            Ok(()) => {
                let notice = ModeDescriptor::of(artifact.mode()).copied_notice;
                self.notifier.notify(Notice::Info(notice.to_string()));
                ShareOutcome::Copied
            }
            Err(err) => {
                tracing::warn!(error = %err, "clipboard write failed");
                ShareOutcome::Failed
            }
        }
    }
}
