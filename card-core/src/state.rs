//! Generation state machine owned by the UI layer.
//!
//! ```text
//!  Idle ──begin──▶ Pending ──resolve(Ok)──▶ Ready
//!                     │                       │
//!                     └──resolve(Err)──▶ Failed
//!  Ready / Failed ──begin──▶ Pending
//! ```
//!
//! `begin` is rejected while a request is outstanding, and `resolve` only
//! accepts the ticket of the outstanding request.

use serde::Serialize;

use crate::{Artifact, Category, GenerationError};

/// Phase of the generation state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Nothing generated yet.
    Idle,
    /// A request is outstanding.
    Pending,
    /// An artifact is available.
    Ready,
    /// The last request failed.
    Failed,
}

/// Proof that a request was started; required to resolve it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTicket {
    id: u64,
    category: Category,
}

impl RequestTicket {
    /// Category the request was started for.
    #[must_use]
    pub fn category(&self) -> Category {
        self.category
    }
}

/// UI-visible generation state.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationState {
    phase: Phase,
    artifact: Option<Artifact>,
    error_message: Option<String>,
    selected: Category,
    #[serde(skip)]
    in_flight: Option<u64>,
    #[serde(skip)]
    next_id: u64,
}

impl GenerationState {
    /// Create an idle state with `selected` as the current category.
    #[must_use]
    pub fn new(selected: Category) -> Self {
        Self {
            phase: Phase::Idle,
            artifact: None,
            error_message: None,
            selected,
            in_flight: None,
            next_id: 1,
        }
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current artifact, if any.
    #[must_use]
    pub fn artifact(&self) -> Option<&Artifact> {
        self.artifact.as_ref()
    }

    /// User-facing error of the last failed request.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Currently selected category.
    #[must_use]
    pub fn selected(&self) -> Category {
        self.selected
    }

    /// Select a category. Does not touch the artifact or error.
    pub fn select(&mut self, category: Category) {
        self.selected = category;
    }

    /// Whether a request is outstanding.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.phase == Phase::Pending
    }

    /// Whether the generate trigger is enabled.
    #[must_use]
    pub fn can_generate(&self) -> bool {
        !self.is_pending()
    }

    /// Whether export and share may run.
    #[must_use]
    pub fn can_export(&self) -> bool {
        self.phase == Phase::Ready && self.artifact.is_some()
    }

    /// Start a request for the selected category.
    ///
    /// Returns `None` while another request is outstanding. The previous
    /// artifact is kept on screen until the new result arrives.
    pub fn begin(&mut self) -> Option<RequestTicket> {
        if self.is_pending() {
            tracing::debug!("generation already pending, trigger ignored");
            return None;
        }

        let ticket = RequestTicket {
            id: self.next_id,
            category: self.selected,
        };
        self.next_id += 1;
        self.in_flight = Some(ticket.id);
        self.phase = Phase::Pending;
        self.error_message = None;
        tracing::info!(request = ticket.id, category = %ticket.category, "generation started");
        Some(ticket)
    }

    /// Apply the outcome of the request identified by `ticket`.
    ///
    /// Returns `false` and leaves the state untouched when `ticket` is not
    /// the outstanding request.
    pub fn resolve(
        &mut self,
        ticket: &RequestTicket,
        result: Result<Artifact, GenerationError>,
    ) -> bool {
        if self.in_flight != Some(ticket.id) {
            tracing::warn!(request = ticket.id, "stale generation result ignored");
            return false;
        }
        self.in_flight = None;

        match result {
            Ok(artifact) => {
                tracing::info!(request = ticket.id, mode = %artifact.mode(), "generation ready");
                self.phase = Phase::Ready;
                self.artifact = Some(artifact);
                self.error_message = None;
            }
            Err(err) => {
                tracing::info!(request = ticket.id, error = %err, "generation failed");
                self.phase = Phase::Failed;
                self.artifact = None;
                self.error_message = Some(err.user_message(ticket.category.mode()));
            }
        }
        true
    }
}

impl Default for GenerationState {
    fn default() -> Self {
        Self::new(Category::default())
    }
}
