//! The card studio: one generation state, one surface, one card at a time.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use card_core::{
    layout_card, Artifact, CardStyle, Category, ElementId, ExportError, GenerationState,
    Generator, Mode, ModeDescriptor, Phase,
};
use card_export::{
    export_filename, DirectoryDownloads, DownloadSink, ExportPipeline, RenderSurface,
    ShareOutcome, Sharer,
};

/// Card origin on the surface.
const CARD_ORIGIN: (f32, f32) = (0.0, 0.0);

/// Drives generation, layout, export and sharing.
///
/// The state mutex is never held across an await.
pub struct Studio<G: Generator, D: DownloadSink = DirectoryDownloads> {
    state: Mutex<GenerationState>,
    surface: Arc<RenderSurface>,
    generator: G,
    exports: ExportPipeline<D>,
    sharer: Sharer,
    style: CardStyle,
    exporting: AtomicBool,
}

impl<G: Generator, D: DownloadSink> std::fmt::Debug for Studio<G, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Studio")
            .field("state", &*self.lock())
            .field("exporting", &self.exporting.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

/// Clears the export flag when the export finishes, however it finishes.
struct ExportGuard<'a>(&'a AtomicBool);

impl Drop for ExportGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<G: Generator, D: DownloadSink> Studio<G, D> {
    /// Create a studio with `selected` as the initial category.
    pub fn new(
        generator: G,
        surface: Arc<RenderSurface>,
        exports: ExportPipeline<D>,
        sharer: Sharer,
        selected: Category,
    ) -> Self {
        Self {
            state: Mutex::new(GenerationState::new(selected)),
            surface,
            generator,
            exports,
            sharer,
            style: CardStyle::default(),
            exporting: AtomicBool::new(false),
        }
    }

    fn lock(&self) -> MutexGuard<'_, GenerationState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of the current state.
    #[must_use]
    pub fn state(&self) -> GenerationState {
        self.lock().clone()
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.lock().phase()
    }

    /// The on-screen artifact, if any.
    #[must_use]
    pub fn artifact(&self) -> Option<Artifact> {
        self.lock().artifact().cloned()
    }

    /// The render surface cards are laid out on.
    #[must_use]
    pub fn surface(&self) -> &Arc<RenderSurface> {
        &self.surface
    }

    /// Change the selected category. Takes effect on the next generation.
    pub fn select(&self, category: Category) {
        self.lock().select(category);
    }

    /// Generate for the selected category and show the result.
    ///
    /// A trigger while a request is outstanding is ignored and the current
    /// phase (`Pending`) is returned.
    pub async fn generate(&self) -> Phase {
        let ticket = self.lock().begin();
        let Some(ticket) = ticket else {
            return self.phase();
        };

        let result = self.generator.generate(ticket.category()).await;

        let (phase, artifact) = {
            let mut state = self.lock();
            if !state.resolve(&ticket, result) {
                return state.phase();
            }
            (state.phase(), state.artifact().cloned())
        };

        self.redraw(artifact.as_ref());
        phase
    }

    /// Make the scene show exactly the card for `artifact` and present the frame.
    ///
    /// Capture nodes of the other mode are removed.
    fn redraw(&self, artifact: Option<&Artifact>) {
        let shown = artifact.map(Artifact::mode);

        for mode in [Mode::Quote, Mode::Meme] {
            let node = ElementId::named(ModeDescriptor::of(mode).capture_node);
            let laid_out = self.surface.update(|scene| match artifact {
                Some(artifact) if shown == Some(mode) => {
                    layout_card(scene, &node, artifact, &self.style, CARD_ORIGIN).map(drop)
                }
                _ if scene.contains(&node) => scene.remove_subtree(&node).map(drop),
                _ => Ok(()),
            });
            if let Err(err) = laid_out {
                tracing::error!(node = %node, error = %err, "card layout failed");
            }
        }

        self.surface.present();
    }

    /// Save the current card as a PNG.
    ///
    /// Returns `Ok(None)` when there is nothing to export or an export is
    /// already running.
    ///
    /// # Errors
    ///
    /// Returns the export failure; the user has already been notified.
    pub async fn download(&self) -> Result<Option<PathBuf>, ExportError> {
        let artifact = {
            let state = self.lock();
            if !state.can_export() {
                tracing::debug!(phase = ?state.phase(), "nothing to export");
                return Ok(None);
            }
            state.artifact().cloned()
        };
        let Some(artifact) = artifact else {
            return Ok(None);
        };

        if self.exporting.swap(true, Ordering::AcqRel) {
            tracing::debug!("export already in progress");
            return Ok(None);
        }
        let _guard = ExportGuard(&self.exporting);

        let descriptor = ModeDescriptor::of(artifact.mode());
        let node = ElementId::named(descriptor.capture_node);
        let filename = export_filename(&artifact);

        self.exports
            .export_as_image(&self.surface, &node, &filename)
            .await
            .map(Some)
    }

    /// Share the current card's text. `None` when there is no artifact.
    pub async fn share(&self) -> Option<ShareOutcome> {
        let artifact = self.artifact()?;
        Some(self.sharer.share(&artifact).await)
    }
}
