//! Native share with clipboard fallback.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use card_core::{Artifact, MemeArtifact, Notice, Notifier, QuoteArtifact};
use card_export::{Clipboard, NativeShare, ShareError, ShareOutcome, SharePayload, Sharer};

#[derive(Default)]
struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.lock().expect("lock").push(notice);
    }
}

struct MemoryClipboard {
    contents: Arc<Mutex<Option<String>>>,
    fail: bool,
}

impl Clipboard for MemoryClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ShareError> {
        if self.fail {
            return Err(ShareError::Failed("no display".into()));
        }
        *self.contents.lock().expect("lock") = Some(text.to_string());
        Ok(())
    }
}

struct ScriptedShare {
    result: fn() -> Result<(), ShareError>,
    seen: Arc<Mutex<Vec<SharePayload>>>,
}

#[async_trait]
impl NativeShare for ScriptedShare {
    async fn share(&self, payload: &SharePayload) -> Result<(), ShareError> {
        self.seen.lock().expect("lock").push(payload.clone());
        (self.result)()
    }
}

struct Harness {
    sharer: Sharer,
    notifier: Arc<RecordingNotifier>,
    clipboard: Arc<Mutex<Option<String>>>,
    shared: Arc<Mutex<Vec<SharePayload>>>,
}

fn harness(native: Option<fn() -> Result<(), ShareError>>, clipboard_fails: bool) -> Harness {
    let notifier = Arc::new(RecordingNotifier::default());
    let clipboard = Arc::new(Mutex::new(None));
    let shared = Arc::new(Mutex::new(Vec::new()));
    let native = native.map(|result| {
        Box::new(ScriptedShare {
            result,
            seen: Arc::clone(&shared),
        }) as Box<dyn NativeShare>
    });
    let sharer = Sharer::new(
        native,
        Box::new(MemoryClipboard {
            contents: Arc::clone(&clipboard),
            fail: clipboard_fails,
        }),
        Arc::clone(&notifier) as Arc<dyn Notifier>,
        Some("https://saatmishaali.example".into()),
    );
    Harness {
        sharer,
        notifier,
        clipboard,
        shared,
    }
}

fn quote() -> Artifact {
    QuoteArtifact::new("বৃষ্টি নামলেই মন খারাপ হয়।", "হুমায়ূন আহমেদ", "rain", true)
        .expect("quote")
        .into()
}

#[tokio::test]
async fn clipboard_fallback_without_native_share() {
    let h = harness(None, false);
    assert!(!h.sharer.has_native());

    assert_eq!(h.sharer.share(&quote()).await, ShareOutcome::Copied);
    assert_eq!(
        h.clipboard.lock().expect("lock").as_deref(),
        Some("\"বৃষ্টি নামলেই মন খারাপ হয়।\" - হুমায়ূন আহমেদ\n\nvia Saatmishaali AI")
    );
    assert_eq!(
        *h.notifier.notices.lock().expect("lock"),
        vec![Notice::Info("Quote copied to clipboard!".into())]
    );
}

#[tokio::test]
async fn meme_clipboard_notice() {
    let h = harness(None, false);
    let meme: Artifact = MemeArtifact::new("ক্রিকেট দেখা মানে হার্ট অ্যাটাকের প্র্যাকটিস।", "ক্রিকেট", "", true)
        .expect("meme")
        .into();

    assert_eq!(h.sharer.share(&meme).await, ShareOutcome::Copied);
    assert_eq!(
        *h.notifier.notices.lock().expect("lock"),
        vec![Notice::Info("Meme copied to clipboard!".into())]
    );
}

#[tokio::test]
async fn native_share_receives_payload() {
    let h = harness(Some(|| Ok(())), false);

    assert_eq!(h.sharer.share(&quote()).await, ShareOutcome::Shared);
    let shared = h.shared.lock().expect("lock");
    assert_eq!(shared.len(), 1);
    assert_eq!(shared[0].title, "Saatmishaali Quote");
    assert_eq!(shared[0].url.as_deref(), Some("https://saatmishaali.example"));
    assert!(h.clipboard.lock().expect("lock").is_none());
}

#[tokio::test]
async fn cancelled_share_is_silent() {
    let h = harness(Some(|| Err(ShareError::Cancelled)), false);

    assert_eq!(h.sharer.share(&quote()).await, ShareOutcome::Cancelled);
    assert!(h.notifier.notices.lock().expect("lock").is_empty());
    assert!(h.clipboard.lock().expect("lock").is_none());
}

#[tokio::test]
async fn failed_native_share_does_not_fall_back() {
    let h = harness(Some(|| Err(ShareError::Failed("denied".into()))), false);

    assert_eq!(h.sharer.share(&quote()).await, ShareOutcome::Failed);
    assert!(h.clipboard.lock().expect("lock").is_none());
    assert!(h.notifier.notices.lock().expect("lock").is_empty());
}

#[tokio::test]
async fn clipboard_failure_is_swallowed() {
    let h = harness(None, true);

    assert_eq!(h.sharer.share(&quote()).await, ShareOutcome::Failed);
    assert!(h.notifier.notices.lock().expect("lock").is_empty());
}
