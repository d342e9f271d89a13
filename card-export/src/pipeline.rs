//! Export a rendered card to a downloaded image.

use std::path::PathBuf;
use std::sync::Arc;

use card_core::{ElementId, ExportError, Notice, Notifier};

use crate::download::DownloadSink;
use crate::export::CardExporter;

/// Waits for the frame, rasterizes off the async runtime, saves, and
/// reports failures to the user.
pub struct ExportPipeline<D: DownloadSink> {
    exporter: CardExporter,
    downloads: D,
    notifier: Arc<dyn Notifier>,
}

impl<D: DownloadSink> std::fmt::Debug for ExportPipeline<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportPipeline")
            .field("exporter", &self.exporter)
            .finish_non_exhaustive()
    }
}

impl<D: DownloadSink> ExportPipeline<D> {
    /// Create a pipeline.
    pub fn new(exporter: CardExporter, downloads: D, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            exporter,
            downloads,
            notifier,
        }
    }

    /// Capture the subtree at `node_id` and save it as `filename`.
    ///
    /// Waits for the surface's latest revision to be presented before
    /// capturing. On failure the user is notified and no file is written.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::NodeNotFound`] if the node is absent (no wait
    /// happens), [`ExportError::Render`] if rasterization fails, and
    /// [`ExportError::Save`] if the sink rejects the bytes.
    pub async fn export_as_image(
        &self,
        surface: &crate::RenderSurface,
        node_id: &ElementId,
        filename: &str,
    ) -> Result<PathBuf, ExportError> {
        let result = self.run(surface, node_id, filename).await;
        if let Err(err) = &result {
            tracing::error!(node = %node_id, filename, error = %err, "image export failed");
            self.notifier
                .notify(Notice::Error(err.user_message().to_string()));
        }
        result
    }

    async fn run(
        &self,
        surface: &crate::RenderSurface,
        node_id: &ElementId,
        filename: &str,
    ) -> Result<PathBuf, ExportError> {
        if !surface.snapshot().contains(node_id) {
            return Err(ExportError::NodeNotFound(node_id.to_string()));
        }

        let scene = surface.rendered().await;
        if !scene.contains(node_id) {
            return Err(ExportError::NodeNotFound(node_id.to_string()));
        }
        tracing::debug!(node = %node_id, revision = scene.revision(), "capturing frame");

        let exporter = self.exporter.clone();
        let node = node_id.clone();
        let bytes = tokio::task::spawn_blocking(move || exporter.render_to_png(&scene, &node))
            .await
            .map_err(|e| ExportError::Render(e.to_string()))??;

        self.downloads
            .save(filename, &bytes)
            .await
            .map_err(|source| ExportError::Save {
                filename: filename.to_string(),
                source,
            })
    }
}
